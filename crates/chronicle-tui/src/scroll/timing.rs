//! Time and interpolation helpers shared by the physics loop and the animator

/// Nominal frame length in milliseconds; drag velocity is expressed per frame of this size
pub const FRAME_TIME_MS: f64 = 16.0;

/// Animation progress in `[0.0, 1.0]`
///
/// A non-positive duration is complete immediately.
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 || !duration_ms.is_finite() {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
