//! Configuration types for inertial scrolling
//!
//! Re-exports configuration from chronicle-core and adds validation.

use std::time::Duration;

pub use chronicle_core::SmoothScrollConfig;

/// Highest accepted friction; 1.0 would never decay
pub const MAX_FRICTION: f64 = 0.999;
/// Smallest accepted stop threshold
pub const MIN_STOP_VELOCITY: f64 = 0.01;
/// Highest accepted bounce retention
pub const MAX_BOUNCE_STRENGTH: f64 = 0.99;

/// Extension trait for SmoothScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Copy of the config with every field inside its safe range
    fn validated(&self) -> SmoothScrollConfig;

    /// Interval between animation frames
    fn frame_interval(&self) -> Duration;

    /// Default duration for `scroll_to`, in milliseconds
    fn scroll_to_duration(&self) -> f64;
}

impl ScrollConfigExt for SmoothScrollConfig {
    fn validated(&self) -> SmoothScrollConfig {
        let defaults = SmoothScrollConfig::default();
        SmoothScrollConfig {
            friction: clamp_field("friction", self.friction, defaults.friction, 0.0, MAX_FRICTION),
            sensitivity: if self.sensitivity.is_finite() && self.sensitivity > 0.0 {
                self.sensitivity
            } else {
                tracing::warn!("sensitivity {} is not positive, using {}", self.sensitivity, defaults.sensitivity);
                defaults.sensitivity
            },
            min_velocity: clamp_field(
                "min_velocity",
                self.min_velocity,
                defaults.min_velocity,
                MIN_STOP_VELOCITY,
                f64::MAX,
            ),
            bounce_back: self.bounce_back,
            bounce_strength: clamp_field(
                "bounce_strength",
                self.bounce_strength,
                defaults.bounce_strength,
                0.0,
                MAX_BOUNCE_STRENGTH,
            ),
            scroll_to_duration_ms: self.scroll_to_duration_ms,
            animation_fps: self.animation_fps,
        }
    }

    #[inline]
    fn frame_interval(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn scroll_to_duration(&self) -> f64 {
        self.scroll_to_duration_ms as f64
    }
}

fn clamp_field(name: &str, value: f64, default: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        tracing::warn!("{} is not finite, using {}", name, default);
        return default;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        tracing::warn!("{} {} out of range, clamped to {}", name, value, clamped);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_through() {
        let config = SmoothScrollConfig::default();
        assert_eq!(config.validated(), config);
    }

    #[test]
    fn test_degenerate_values_are_clamped() {
        let config = SmoothScrollConfig {
            friction: 1.5,
            sensitivity: -2.0,
            min_velocity: -1.0,
            bounce_strength: 3.0,
            ..Default::default()
        }
        .validated();

        assert_eq!(config.friction, MAX_FRICTION);
        assert_eq!(config.sensitivity, 1.2);
        assert_eq!(config.min_velocity, MIN_STOP_VELOCITY);
        assert_eq!(config.bounce_strength, MAX_BOUNCE_STRENGTH);
    }

    #[test]
    fn test_non_finite_values_fall_back_to_defaults() {
        let config = SmoothScrollConfig {
            friction: f64::NAN,
            min_velocity: f64::INFINITY,
            ..Default::default()
        }
        .validated();

        assert_eq!(config.friction, 0.92);
        assert_eq!(config.min_velocity, 0.5);
    }

    #[test]
    fn test_frame_interval() {
        let mut config = SmoothScrollConfig::default();
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        config.animation_fps = 0;
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        config.animation_fps = 30;
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
    }
}
