//! Duration-based eased scrolling to an explicit target

use super::timing::{ease_out_cubic, lerp, progress};

/// One programmatic scroll from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
}

/// Position for one frame of a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame {
    pub position: f64,
    pub finished: bool,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn distance(&self) -> f64 {
        self.to - self.from
    }

    /// Position at `now_ms`, computed from the start rather than accumulated
    ///
    /// The finishing frame returns the target itself.
    pub fn sample(&self, now_ms: f64) -> TweenFrame {
        let t = progress(now_ms - self.start_ms, self.duration_ms);
        if t >= 1.0 {
            return TweenFrame {
                position: self.to,
                finished: true,
            };
        }
        TweenFrame {
            position: lerp(self.from, self.to, ease_out_cubic(t)),
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_and_end() {
        let tween = ScrollTween::new(0.0, 500.0, 0.0, 500.0);
        assert_eq!(tween.sample(250.0), TweenFrame { position: 437.5, finished: false });
        assert_eq!(tween.sample(500.0), TweenFrame { position: 500.0, finished: true });
        assert_eq!(tween.sample(800.0).position, 500.0);
    }

    #[test]
    fn test_lands_exactly_on_awkward_target() {
        let tween = ScrollTween::new(0.1, 0.3, 5.0, 120.0);
        assert_eq!(tween.sample(125.0).position, 0.3);
    }

    #[test]
    fn test_strictly_monotonic_backwards() {
        let tween = ScrollTween::new(800.0, 200.0, 0.0, 300.0);
        assert_eq!(tween.distance(), -600.0);
        let mut prev = tween.sample(0.0).position;
        for ms in 1..300 {
            let pos = tween.sample(ms as f64).position;
            assert!(pos < prev, "not decreasing at {ms}ms");
            prev = pos;
        }
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let tween = ScrollTween::new(10.0, 90.0, 0.0, 0.0);
        assert_eq!(tween.sample(0.0), TweenFrame { position: 90.0, finished: true });
    }
}
