//! Frame-rate independent exponential smoothing toward a target.

use orrery_core::vector::{Vector3, lerp};

/// Blend weight for one frame of length `dt` seconds at `rate` per second.
///
/// A non-positive rate means no smoothing (snap to target).
pub fn smoothing_alpha(rate: f64, dt: f64) -> f64 {
    if rate <= 0.0 || !rate.is_finite() {
        return 1.0;
    }
    1.0 - (-rate * dt.max(0.0)).exp()
}

/// Move `current` toward `target` by `alpha`.
pub fn smooth_toward(current: &Vector3, target: &Vector3, alpha: f64) -> Vector3 {
    lerp(current, target, alpha.clamp(0.0, 1.0))
}

/// Scalar counterpart of [`smooth_toward`].
pub fn smooth_scalar(current: f64, target: f64, alpha: f64) -> f64 {
    current + (target - current) * alpha.clamp(0.0, 1.0)
}
