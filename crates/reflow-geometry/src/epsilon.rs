//! Sub-pixel comparison policy.
//!
//! Upstream measurement sources jitter below a hundredth of a pixel;
//! exact float equality on measured values leads to layout
//! recomputation loops, so change detection goes through these helpers.

/// Tolerance in logical pixels for "has this value materially changed".
pub const EPSILON: f32 = 0.01;

/// Returns true when two measured values are equal within [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

/// Returns true when a measured value is zero within [`EPSILON`].
#[inline]
pub fn approx_zero(value: f32) -> bool {
    value.abs() <= EPSILON
}
