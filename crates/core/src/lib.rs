//! Core constants, input bounds, and shared primitives for the stellar orrery workspace.

/// Model constants. Masses are in solar masses, ages in billions of years (BY),
/// distances and sizes in scene units.
pub mod constants {
    use std::time::Duration;

    /// Lowest stellar mass accepted by the model.
    pub const MASS_MIN: f64 = 0.5;
    /// Highest stellar mass accepted by the model.
    pub const MASS_MAX: f64 = 15.0;
    pub const AGE_MIN: f64 = 0.0;
    pub const AGE_MAX: f64 = 15.0;

    /// Real-time period of one playback tick.
    pub const TICK_PERIOD: Duration = Duration::from_millis(50);
    /// Age added per playback tick.
    pub const AGE_STEP: f64 = 0.05;

    /// `redGiantEnd = lifespan * RED_GIANT_SPAN`.
    pub const RED_GIANT_SPAN: f64 = 1.2;
    /// Star scale at the end of the red-giant phase is `base * (1 + RED_GIANT_GROWTH)`.
    pub const RED_GIANT_GROWTH: f64 = 5.0;
    /// Fraction of the initial mass left once the red-giant phase has ended.
    pub const MASS_FLOOR: f64 = 0.4;
    pub const SUPERNOVA_MASS: f64 = 8.0;
    pub const SUPERNOVA_SCALE: f64 = 0.5;
    pub const WHITE_DWARF_SCALE: f64 = 0.2;

    /// Angular time scale for planets and the inner belt.
    pub const PLANET_TIME_SCALE: f64 = 0.2;
    /// Angular time scale for the outer belt.
    pub const OUTER_BELT_TIME_SCALE: f64 = 0.1;
    pub const PLANET_ENGULF_THRESHOLD: f64 = 0.95;
    pub const INNER_BELT_ENGULF_THRESHOLD: f64 = 0.9;

    /// Real-time length of an explosion episode.
    pub const EXPLOSION_DURATION: Duration = Duration::from_secs(2);
    /// Visual star scale targeted while exploding (unit star = 1.0).
    pub const EXPLOSION_STAR_SCALE: f64 = 20.0;
    pub const SHOCKWAVE_MAX_RADIUS: f64 = 60.0;
}

/// Defensive clamping applied before any model evaluation.
pub mod bounds {
    use super::constants::{AGE_MAX, AGE_MIN, MASS_MAX, MASS_MIN};

    /// Map any `f64` into `[MASS_MIN, MASS_MAX]`.
    ///
    /// NaN and non-positive inputs fall to the minimum, `+inf` to the maximum.
    pub fn sanitize_mass(mass: f64) -> f64 {
        if mass.is_nan() || mass <= 0.0 {
            MASS_MIN
        } else {
            mass.clamp(MASS_MIN, MASS_MAX)
        }
    }

    /// Map any `f64` into `[AGE_MIN, AGE_MAX]`; NaN becomes `AGE_MIN`.
    pub fn sanitize_age(age: f64) -> f64 {
        if age.is_nan() {
            AGE_MIN
        } else {
            age.clamp(AGE_MIN, AGE_MAX)
        }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
///
/// Scene convention: `y` is vertical, the orbital plane is `x`/`z`.
pub mod vector {
    pub type Vector3 = [f64; 3];

    pub const ZERO: Vector3 = [0.0, 0.0, 0.0];

    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Distance from the vertical axis, ignoring `y`.
    #[inline]
    pub fn planar_norm(v: &Vector3) -> f64 {
        v[0].hypot(v[2])
    }

    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Linear interpolation from `a` (t = 0) to `b` (t = 1).
    #[inline]
    pub fn lerp(a: &Vector3, b: &Vector3, t: f64) -> Vector3 {
        add(a, &scale(&sub(b, a), t))
    }

    /// Normalize `v`, returning `None` for a zero-length vector.
    pub fn normalize(v: &Vector3) -> Option<Vector3> {
        let n = norm(v);
        (n > 0.0).then(|| scale(v, 1.0 / n))
    }
}
