//! Converts wheel and drag input into velocity impulses and positions

use super::timing::FRAME_TIME_MS;

/// Share of a wheel delta that becomes velocity
pub const WHEEL_DAMPING: f64 = 0.5;

/// Floor for the interval between two drag samples
pub const MIN_SAMPLE_INTERVAL_MS: f64 = 1.0;

/// Velocity added by one wheel event
///
/// Vertical wheel motion is remapped onto the horizontal axis; the
/// horizontal delta only counts when there is no vertical one.
#[inline]
pub fn wheel_impulse(delta_x: f64, delta_y: f64, sensitivity: f64) -> f64 {
    let delta = if delta_y != 0.0 { delta_y } else { delta_x };
    delta * sensitivity * WHEEL_DAMPING
}

/// State of one pointer drag, from press to release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    origin_x: f64,
    origin_position: f64,
    last_x: f64,
    last_time_ms: f64,
}

/// Result of feeding one pointer sample into a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Per-frame velocity implied by the latest movement
    pub velocity: f64,
    /// Offset locked to the pointer
    pub position: f64,
}

impl DragSession {
    pub fn begin(x: f64, position: f64, now_ms: f64) -> Self {
        Self {
            origin_x: x,
            origin_position: position,
            last_x: x,
            last_time_ms: now_ms,
        }
    }

    pub fn origin_position(&self) -> f64 {
        self.origin_position
    }

    /// Feed a pointer sample
    ///
    /// Moving the pointer left scrolls forward.
    pub fn track(&mut self, x: f64, now_ms: f64, sensitivity: f64) -> DragSample {
        let dt = (now_ms - self.last_time_ms).max(MIN_SAMPLE_INTERVAL_MS);
        let velocity = (self.last_x - x) / dt * FRAME_TIME_MS * sensitivity;
        let position = self.origin_position + (self.origin_x - x);

        self.last_x = x;
        self.last_time_ms = now_ms;

        DragSample { velocity, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_prefers_vertical_delta() {
        assert_eq!(wheel_impulse(7.0, 10.0, 1.0), 5.0);
        assert_eq!(wheel_impulse(10.0, 0.0, 1.0), 5.0);
        assert_eq!(wheel_impulse(0.0, -4.0, 1.5), -3.0);
        assert_eq!(wheel_impulse(0.0, 0.0, 1.2), 0.0);
    }

    #[test]
    fn test_drag_velocity_from_last_sample() {
        let mut drag = DragSession::begin(300.0, 40.0, 0.0);
        let sample = drag.track(250.0, 100.0, 1.2);

        assert!((sample.velocity - 9.6).abs() < 1e-9);
        assert_eq!(sample.position, 90.0);

        // Right-ward movement scrolls back; velocity uses the latest interval only
        let sample = drag.track(260.0, 110.0, 1.0);
        assert!((sample.velocity - -16.0).abs() < 1e-9);
        assert_eq!(sample.position, 80.0);
    }

    #[test]
    fn test_drag_interval_is_floored() {
        let mut drag = DragSession::begin(100.0, 0.0, 50.0);
        let sample = drag.track(90.0, 50.0, 1.0);
        assert!(sample.velocity.is_finite());
        assert_eq!(sample.velocity, 10.0 * FRAME_TIME_MS);
    }
}
