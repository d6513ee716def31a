//! Per-tick integration of velocity into position, with boundary response

use super::config::SmoothScrollConfig;

/// Shared motion state of one engine
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub position: f64,
    /// Offset delta per tick
    pub velocity: f64,
    /// Set while the physics loop is carrying momentum
    pub is_scrolling: bool,
    /// A pointer drag is in progress; position follows the pointer
    pub is_dragging: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// Stateless clamp/bounce rule at both ends of the scroll range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPolicy {
    pub bounce_back: bool,
    pub bounce_strength: f64,
}

impl BoundaryPolicy {
    pub fn from_config(config: &SmoothScrollConfig) -> Self {
        Self {
            bounce_back: config.bounce_back,
            bounce_strength: config.bounce_strength,
        }
    }

    /// Clamp `position` into `[0, max_extent]`, returning the edge that was hit
    ///
    /// With bouncing the velocity is reversed and scaled by the bounce
    /// strength; without it the velocity is zeroed (hard stop).
    pub fn apply(&self, position: &mut f64, velocity: &mut f64, max_extent: f64) -> Option<Edge> {
        let max_extent = max_extent.max(0.0);
        let edge = if *position < 0.0 {
            *position = 0.0;
            Edge::Start
        } else if *position > max_extent {
            *position = max_extent;
            Edge::End
        } else {
            return None;
        };

        if self.bounce_back {
            *velocity *= -self.bounce_strength;
        } else {
            *velocity = 0.0;
        }
        Some(edge)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still moving; schedule another tick
    Continue,
    /// Velocity fell to the threshold; the loop ends
    Settled,
    /// A drag owns the position; nothing was changed
    Suspended,
}

/// Advance one tick
///
/// Checks the stop threshold on entry, then moves, applies the boundary
/// policy and friction. If friction takes the speed to the threshold the
/// loop settles on this same tick, so `is_scrolling` turns false on the
/// first tick whose outgoing velocity is at or below `min_velocity`.
pub fn integrate(
    state: &mut ScrollState,
    config: &SmoothScrollConfig,
    policy: &BoundaryPolicy,
    max_extent: f64,
) -> TickOutcome {
    if state.is_dragging {
        state.is_scrolling = false;
        return TickOutcome::Suspended;
    }

    if state.velocity.abs() <= config.min_velocity {
        return settle(state);
    }

    state.position += state.velocity;
    if let Some(edge) = policy.apply(&mut state.position, &mut state.velocity, max_extent) {
        tracing::trace!(?edge, velocity = state.velocity, "boundary hit");
    }
    state.velocity *= config.friction;

    if state.velocity.abs() <= config.min_velocity {
        return settle(state);
    }
    state.is_scrolling = true;
    TickOutcome::Continue
}

fn settle(state: &mut ScrollState) -> TickOutcome {
    state.velocity = 0.0;
    state.is_scrolling = false;
    TickOutcome::Settled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving(position: f64, velocity: f64) -> ScrollState {
        ScrollState {
            position,
            velocity,
            ..Default::default()
        }
    }

    #[test]
    fn test_bounce_reverses_and_attenuates() {
        let policy = BoundaryPolicy {
            bounce_back: true,
            bounce_strength: 0.15,
        };
        let mut position = -12.0;
        let mut velocity = -40.0;
        assert_eq!(policy.apply(&mut position, &mut velocity, 500.0), Some(Edge::Start));
        assert_eq!(position, 0.0);
        assert_eq!(velocity, -0.15 * -40.0);

        let mut position = 530.0;
        let mut velocity = 40.0;
        assert_eq!(policy.apply(&mut position, &mut velocity, 500.0), Some(Edge::End));
        assert_eq!(position, 500.0);
        assert_eq!(velocity, -0.15 * 40.0);
    }

    #[test]
    fn test_hard_stop_without_bounce() {
        let policy = BoundaryPolicy {
            bounce_back: false,
            bounce_strength: 0.15,
        };
        let mut position = 520.0;
        let mut velocity = 30.0;
        assert_eq!(policy.apply(&mut position, &mut velocity, 500.0), Some(Edge::End));
        assert_eq!(position, 500.0);
        assert_eq!(velocity, 0.0);
    }

    #[test]
    fn test_in_range_is_untouched() {
        let policy = BoundaryPolicy::from_config(&SmoothScrollConfig::default());
        let mut position = 250.0;
        let mut velocity = 12.0;
        assert_eq!(policy.apply(&mut position, &mut velocity, 500.0), None);
        assert_eq!((position, velocity), (250.0, 12.0));
    }

    #[test]
    fn test_negative_extent_clamps_to_zero() {
        let policy = BoundaryPolicy::from_config(&SmoothScrollConfig::default());
        let mut position = 3.0;
        let mut velocity = 1.0;
        assert_eq!(policy.apply(&mut position, &mut velocity, -20.0), Some(Edge::End));
        assert_eq!(position, 0.0);
    }

    #[test]
    fn test_integrate_moves_then_decays() {
        let config = SmoothScrollConfig::default();
        let policy = BoundaryPolicy::from_config(&config);
        let mut state = moving(10.0, 20.0);

        assert_eq!(integrate(&mut state, &config, &policy, 1000.0), TickOutcome::Continue);
        assert_eq!(state.position, 30.0);
        assert_eq!(state.velocity, 20.0 * 0.92);
        assert!(state.is_scrolling);
    }

    #[test]
    fn test_integrate_bounce_then_friction() {
        let config = SmoothScrollConfig::default();
        let policy = BoundaryPolicy::from_config(&config);
        let mut state = moving(990.0, 50.0);

        integrate(&mut state, &config, &policy, 1000.0);
        assert_eq!(state.position, 1000.0);
        assert_eq!(state.velocity, 50.0 * -0.15 * 0.92);
    }

    #[test]
    fn test_integrate_settles_below_threshold() {
        let config = SmoothScrollConfig::default();
        let policy = BoundaryPolicy::from_config(&config);
        let mut state = moving(10.0, 0.4);
        state.is_scrolling = true;

        assert_eq!(integrate(&mut state, &config, &policy, 1000.0), TickOutcome::Settled);
        assert_eq!(state.position, 10.0);
        assert_eq!(state.velocity, 0.0);
        assert!(!state.is_scrolling);
    }

    #[test]
    fn test_integrate_leaves_dragged_position_alone() {
        let config = SmoothScrollConfig::default();
        let policy = BoundaryPolicy::from_config(&config);
        let mut state = moving(10.0, 30.0);
        state.is_dragging = true;

        assert_eq!(integrate(&mut state, &config, &policy, 1000.0), TickOutcome::Suspended);
        assert_eq!(state.position, 10.0);
        assert_eq!(state.velocity, 30.0);
    }

    #[test]
    fn test_decay_scenario_settles_on_tick_64() {
        let config = SmoothScrollConfig::default();
        let policy = BoundaryPolicy::from_config(&config);
        let mut state = moving(0.0, 100.0);

        for tick in 1..=63 {
            assert_eq!(
                integrate(&mut state, &config, &policy, 1.0e6),
                TickOutcome::Continue,
                "tick {tick}"
            );
            assert!(state.is_scrolling);
        }
        assert_eq!(integrate(&mut state, &config, &policy, 1.0e6), TickOutcome::Settled);
        assert!(!state.is_scrolling);
    }
}
