//! Main/cross axis vocabulary for item flow.

use reflow_geometry::{Point, Size};

/// The axis along which items flow before wrapping.
///
/// `Horizontal` flow lays items left to right and wraps into new rows
/// (fixed-column grids, `row` flex); `Vertical` flow lays items top to
/// bottom and wraps into new columns (fixed-row grids, `column` flex).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal main axis. Cross axis: top to bottom.
    Horizontal,
    /// Vertical main axis. Cross axis: left to right.
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }

    /// Extent of `size` along this axis.
    #[inline]
    pub fn main_of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Extent of `size` along the cross axis.
    #[inline]
    pub fn cross_of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    /// Coordinate of `point` along this axis.
    #[inline]
    pub fn main_coord(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// Coordinate of `point` along the cross axis.
    #[inline]
    pub fn cross_coord(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.y,
            Axis::Vertical => point.x,
        }
    }

    /// Builds a point from main- and cross-axis coordinates.
    #[inline]
    pub fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }

    /// Builds a size from main- and cross-axis extents.
    #[inline]
    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_accessors_are_consistent() {
        let size = Size::new(100.0, 50.0);
        assert_eq!(Axis::Horizontal.main_of(size), 100.0);
        assert_eq!(Axis::Horizontal.cross_of(size), 50.0);
        assert_eq!(Axis::Vertical.main_of(size), 50.0);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);

        let point = Axis::Vertical.point(30.0, 40.0);
        assert_eq!(point, Point::new(40.0, 30.0));
        assert_eq!(Axis::Vertical.main_coord(point), 30.0);
    }
}
