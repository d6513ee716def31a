//! Property-based invariant tests for the inertial scroller.
//!
//! 1. Momentum always settles, within the bound implied by friction.
//! 2. The offset never leaves `[0, max_extent]`, whatever the input.
//! 3. While a drag holds the strip, frames never move it.
//! 4. Eased scrolls move monotonically and land exactly on the clamped target.
//! 5. A wheel event from rest adds exactly `delta × sensitivity × 0.5`.

use chronicle_tui::scroll::{
    FrameQueue, FrameScheduler, InertialScroller, InputEvent, ScrollHost, SmoothScrollConfig,
    Surface,
};
use chronicle_tui::surface::{CardStrip, TerminalPointer};
use proptest::prelude::*;
use ratatui::layout::Rect;

// ── Helpers ─────────────────────────────────────────────────────────────

type Scroller = InertialScroller<CardStrip, TerminalPointer, FrameQueue>;

fn scroller(config: SmoothScrollConfig, cards: usize, viewport: u16) -> Scroller {
    let mut strip = CardStrip::new(cards, 28, 2);
    strip.set_viewport(Rect::new(0, 0, viewport, 10));
    let mut scroller = InertialScroller::new(&config, TerminalPointer::new(), FrameQueue::new());
    scroller.attach(Some(strip));
    scroller
}

fn max_extent(scroller: &Scroller) -> f64 {
    scroller.host().map(|strip| strip.max_scroll_left()).unwrap_or(0.0)
}

/// Run 16ms frames until idle or `limit` frames, returning how many ran
fn run_until_idle(scroller: &mut Scroller, limit: usize) -> usize {
    let mut frames = 0;
    while scroller.needs_frame() && frames < limit {
        let now = scroller.scheduler().now() + 16.0;
        scroller.run_frame(now);
        frames += 1;
    }
    frames
}

#[derive(Debug, Clone)]
enum Op {
    Wheel(f64),
    Frame,
    Press(f64),
    Move(f64),
    Release,
    ScrollTo(f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-200.0f64..200.0).prop_map(Op::Wheel),
        Just(Op::Frame),
        (0.0f64..120.0).prop_map(Op::Press),
        (-400.0f64..400.0).prop_map(Op::Move),
        Just(Op::Release),
        (-2000.0f64..5000.0).prop_map(Op::ScrollTo),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Momentum settles
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn momentum_settles_within_friction_bound(
        friction in 0.5f64..0.99,
        min_velocity in 0.1f64..2.0,
        velocity in -500.0f64..500.0,
    ) {
        let config = SmoothScrollConfig { friction, min_velocity, ..Default::default() };
        let mut scroller = scroller(config, 2_000, 100);
        scroller.host_mut().unwrap().set_scroll_left(30_000.0);
        scroller.fling(velocity);

        let bound = if velocity.abs() <= min_velocity {
            1
        } else {
            ((min_velocity / velocity.abs()).ln() / friction.ln()).ceil() as usize + 2
        };
        let frames = run_until_idle(&mut scroller, bound + 10);

        prop_assert!(!scroller.needs_frame(), "still moving after {} frames", frames);
        prop_assert!(frames <= bound, "{} frames, bound {}", frames, bound);
        prop_assert!(!scroller.is_scrolling());
        prop_assert_eq!(scroller.velocity(), 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Offset stays in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_stays_in_range(
        bounce_back in any::<bool>(),
        ops in proptest::collection::vec(op(), 1..80),
    ) {
        let config = SmoothScrollConfig { bounce_back, ..Default::default() };
        let mut scroller = scroller(config, 12, 100);
        let max = max_extent(&scroller);

        for op in ops {
            scroller.scheduler_mut().advance(7.0);
            match op {
                Op::Wheel(delta) => {
                    scroller.handle_event(Surface::Host, &InputEvent::Wheel { delta_x: 0.0, delta_y: delta });
                }
                Op::Frame => {
                    let now = scroller.scheduler().now();
                    scroller.run_frame(now);
                }
                Op::Press(x) => {
                    scroller.handle_event(Surface::Host, &InputEvent::MouseDown { x });
                }
                Op::Move(x) => {
                    scroller.handle_event(Surface::Global, &InputEvent::MouseMove { x });
                }
                Op::Release => {
                    scroller.handle_event(Surface::Global, &InputEvent::MouseUp);
                }
                Op::ScrollTo(target) => scroller.scroll_to(target, 200.0),
            }
            let position = scroller.position();
            prop_assert!((0.0..=max).contains(&position), "offset {} outside 0..={}", position, max);
        }

        scroller.handle_event(Surface::Global, &InputEvent::MouseUp);
        run_until_idle(&mut scroller, 20_000);
        prop_assert!(!scroller.needs_frame());
        prop_assert!((0.0..=max).contains(&scroller.position()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Drag exclusivity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn frames_never_move_a_held_strip(
        fling in 1.0f64..300.0,
        press in 0.0f64..100.0,
        wheels in proptest::collection::vec(-100.0f64..100.0, 0..10),
    ) {
        let mut scroller = scroller(SmoothScrollConfig::default(), 20, 100);
        scroller.fling(fling);
        run_until_idle(&mut scroller, 3);

        scroller.handle_event(Surface::Host, &InputEvent::MouseDown { x: press });
        prop_assert!(scroller.is_dragging());
        prop_assert!(!scroller.is_scrolling());
        prop_assert_eq!(scroller.velocity(), 0.0);

        let held = scroller.position();
        for delta in wheels {
            scroller.on_wheel(0.0, delta);
            let now = scroller.scheduler().now() + 16.0;
            scroller.run_frame(now);
            prop_assert_eq!(scroller.position(), held);
            prop_assert!(!scroller.is_scrolling());
            prop_assert_eq!(scroller.velocity(), 0.0);
            prop_assert!(!scroller.needs_frame());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Eased scroll is monotonic and exact
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn eased_scroll_is_monotonic_and_exact(
        start in 0.0f64..500.0,
        target in -1000.0f64..3000.0,
        duration in 1.0f64..1000.0,
        step in 1.0f64..40.0,
    ) {
        let mut scroller = scroller(SmoothScrollConfig::default(), 30, 100);
        let max = max_extent(&scroller);
        scroller.host_mut().unwrap().set_scroll_left(start);
        scroller.scroll_to(target, duration);

        let expected = target.clamp(0.0, max);
        let forward = expected >= start;
        let mut prev = start;
        let mut frames = 0;
        while scroller.needs_frame() && frames < 2_000 {
            let now = scroller.scheduler().now() + step;
            scroller.run_frame(now);
            let position = scroller.position();
            if forward {
                prop_assert!(position >= prev, "moved back: {} -> {}", prev, position);
            } else {
                prop_assert!(position <= prev, "moved forward: {} -> {}", prev, position);
            }
            prev = position;
            frames += 1;
        }

        prop_assert!(!scroller.is_animating());
        prop_assert_eq!(scroller.position(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Wheel impulse
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn wheel_impulse_from_rest(
        delta_x in -100.0f64..100.0,
        delta_y in -100.0f64..100.0,
        sensitivity in 0.1f64..5.0,
    ) {
        let config = SmoothScrollConfig { sensitivity, ..Default::default() };
        let mut scroller = scroller(config, 20, 100);
        scroller.on_wheel(delta_x, delta_y);

        let delta = if delta_y != 0.0 { delta_y } else { delta_x };
        prop_assert!((scroller.velocity() - delta * sensitivity * 0.5).abs() < 1e-9);
        prop_assert_eq!(scroller.scheduler().pending_count(), 1);
    }
}
