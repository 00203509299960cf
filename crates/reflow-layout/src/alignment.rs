//! Alignment and distribution strategies for wrapped lines.

/// Per-item offset across a line's cross-axis extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AlignItems {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    /// Items keep their measured size; positioned like `FlexStart`.
    Stretch,
}

impl AlignItems {
    /// Computes the cross-axis offset of an item within its line.
    pub fn align(&self, available: f32, child: f32) -> f32 {
        match self {
            AlignItems::FlexStart | AlignItems::Stretch => 0.0,
            AlignItems::Center => ((available - child) / 2.0).max(0.0),
            AlignItems::FlexEnd => (available - child).max(0.0),
        }
    }
}

/// Distribution of items along the main axis within one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl JustifyContent {
    /// Computes the main-axis position of every item in a line.
    ///
    /// `gap` is the configured inter-item gap; distribution modes add
    /// extra spacing on top of it when the line does not fill
    /// `total_size`.
    pub fn arrange(&self, total_size: f32, sizes: &[f32], gap: f32, out_positions: &mut [f32]) {
        debug_assert_eq!(sizes.len(), out_positions.len());
        if sizes.is_empty() {
            return;
        }

        let children_total: f32 = sizes.iter().copied().sum();
        let gaps_total = gap * (sizes.len() as f32 - 1.0);
        let remaining = (total_size - children_total - gaps_total).max(0.0);

        let (start, extra_gap) = match *self {
            JustifyContent::FlexStart => (0.0, 0.0),
            JustifyContent::FlexEnd => (remaining, 0.0),
            JustifyContent::Center => (remaining / 2.0, 0.0),
            JustifyContent::SpaceBetween => {
                if sizes.len() <= 1 {
                    (0.0, 0.0)
                } else {
                    (0.0, remaining / (sizes.len() as f32 - 1.0))
                }
            }
            JustifyContent::SpaceAround => {
                let share = remaining / sizes.len() as f32;
                (share / 2.0, share)
            }
            JustifyContent::SpaceEvenly => {
                let share = remaining / (sizes.len() as f32 + 1.0);
                (share, share)
            }
        };

        let mut cursor = start;
        for (size, position) in sizes.iter().zip(out_positions.iter_mut()) {
            *position = cursor;
            cursor += size + gap + extra_gap;
        }
    }
}

/// Distribution of wrapped lines across the container's cross axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AlignContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    /// Leftover cross space is split evenly into the lines' extents.
    Stretch,
}

/// How [`AlignContent`] spreads leftover cross-axis space over lines.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContentDistribution {
    /// Offset before the first line.
    pub start: f32,
    /// Extra spacing added between consecutive lines.
    pub between: f32,
    /// Extra extent added to every line.
    pub line_growth: f32,
}

impl AlignContent {
    /// Splits `leftover` cross space (already clamped to >= 0) among
    /// `line_count` lines.
    pub fn distribute(&self, leftover: f32, line_count: usize) -> ContentDistribution {
        if line_count == 0 || leftover <= 0.0 {
            return ContentDistribution::default();
        }
        let count = line_count as f32;
        match *self {
            AlignContent::FlexStart => ContentDistribution::default(),
            AlignContent::FlexEnd => ContentDistribution {
                start: leftover,
                ..Default::default()
            },
            AlignContent::Center => ContentDistribution {
                start: leftover / 2.0,
                ..Default::default()
            },
            AlignContent::SpaceBetween => {
                if line_count <= 1 {
                    ContentDistribution::default()
                } else {
                    ContentDistribution {
                        between: leftover / (count - 1.0),
                        ..Default::default()
                    }
                }
            }
            AlignContent::SpaceAround => {
                let share = leftover / count;
                ContentDistribution {
                    start: share / 2.0,
                    between: share,
                    ..Default::default()
                }
            }
            AlignContent::SpaceEvenly => {
                let share = leftover / (count + 1.0);
                ContentDistribution {
                    start: share,
                    between: share,
                    ..Default::default()
                }
            }
            AlignContent::Stretch => ContentDistribution {
                line_growth: leftover / count,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/alignment_tests.rs"]
mod tests;
