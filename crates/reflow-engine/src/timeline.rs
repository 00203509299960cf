//! Reversible progress timelines for activation/drop decoration.

/// Easing curves applied to timeline progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
    /// Material "fast out, slow in" standard curve.
    FastOutSlowIn,
}

impl Easing {
    /// Applies the easing to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric value matching the x fraction.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t -= x / dx;
    }
    if !converged {
        t = t.clamp(0.0, 1.0);
    }

    sample_curve(ay, by, cy, t).clamp(0.0, 1.0)
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(from: f32, to: f32, fraction: f32) -> f32 {
    from + (to - from) * fraction
}

/// A progress value animated toward a target over a fixed duration.
///
/// Progress advances linearly with time; [`Timeline::value`] applies
/// the easing. Reversible mid-flight: retargeting keeps the current
/// progress, so a drop started halfway through activation animates
/// back from where it is.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    progress: f32,
    target: f32,
    duration_ms: f64,
    easing: Easing,
}

impl Timeline {
    /// A settled timeline at `value`.
    pub fn settled(value: f32, easing: Easing) -> Self {
        Self {
            progress: value,
            target: value,
            duration_ms: 0.0,
            easing,
        }
    }

    /// Starts animating toward `target` over `duration_ms`.
    pub fn animate_to(&mut self, target: f32, duration_ms: f64) {
        self.target = target.clamp(0.0, 1.0);
        self.duration_ms = duration_ms.max(0.0);
    }

    /// Jumps to `value` with no animation.
    pub fn snap_to(&mut self, value: f32) {
        self.progress = value.clamp(0.0, 1.0);
        self.target = self.progress;
    }

    /// Advances by `dt_ms` and returns the eased value.
    pub fn advance(&mut self, dt_ms: f64) -> f32 {
        if self.progress != self.target {
            if self.duration_ms <= 0.0 {
                self.progress = self.target;
            } else {
                let step = (dt_ms / self.duration_ms) as f32;
                if self.target > self.progress {
                    self.progress = (self.progress + step).min(self.target);
                } else {
                    self.progress = (self.progress - step).max(self.target);
                }
            }
        }
        self.value()
    }

    /// The eased value in `[0, 1]`.
    #[inline]
    pub fn value(&self) -> f32 {
        self.easing.transform(self.progress)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.progress == self.target
    }
}
