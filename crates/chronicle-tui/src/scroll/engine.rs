//! The inertial scroller: input, physics loop, eased navigation and lifecycle
//! over one shared [`ScrollState`]

use super::animation::ScrollTween;
use super::config::{ScrollConfigExt, SmoothScrollConfig};
use super::host::{
    Bounded, Disposition, EventKind, EventTarget, InputEvent, ListenerId, ListenerMode,
    PointerSurface, ScrollHost, Surface,
};
use super::input::{wheel_impulse, DragSession};
use super::physics::{integrate, BoundaryPolicy, ScrollState, TickOutcome};
use super::scheduler::{FrameHandle, FrameQueue, FrameScheduler};

const HOST_LISTENERS: [(EventKind, ListenerMode); 3] = [
    (EventKind::Wheel, ListenerMode::Active),
    (EventKind::MouseDown, ListenerMode::Active),
    (EventKind::TouchStart, ListenerMode::Passive),
];

const GLOBAL_LISTENERS: [(EventKind, ListenerMode); 4] = [
    (EventKind::MouseMove, ListenerMode::Active),
    (EventKind::TouchMove, ListenerMode::Passive),
    (EventKind::MouseUp, ListenerMode::Active),
    (EventKind::TouchEnd, ListenerMode::Active),
];

/// The one frame the engine may have outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingFrame {
    Physics(FrameHandle),
    Animation(FrameHandle),
}

impl PendingFrame {
    fn handle(&self) -> FrameHandle {
        match self {
            Self::Physics(handle) | Self::Animation(handle) => *handle,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    surface: Surface,
    kind: EventKind,
    id: ListenerId,
}

/// Horizontal inertial drag-scroll controller
///
/// Drives the offset of a [`ScrollHost`] from wheel and drag input with
/// momentum, friction and edge bounce, and animates programmatic scrolls
/// with an ease-out curve. Momentum and programmatic animation never run at
/// the same time: starting one cancels the other.
///
/// Frames are requested from `S`; whoever drives the display delivers them
/// back through [`InertialScroller::on_frame`].
pub struct InertialScroller<H, P, S> {
    config: SmoothScrollConfig,
    policy: BoundaryPolicy,
    state: ScrollState,
    host: Option<H>,
    pointer: P,
    scheduler: S,
    pending: Option<PendingFrame>,
    tween: Option<ScrollTween>,
    drag: Option<DragSession>,
    listeners: Vec<Registration>,
}

impl<H, P, S> InertialScroller<H, P, S>
where
    H: ScrollHost,
    P: PointerSurface,
    S: FrameScheduler,
{
    /// Build a detached engine; the config is validated first
    pub fn new(config: &SmoothScrollConfig, pointer: P, scheduler: S) -> Self {
        let config = config.validated();
        Self {
            policy: BoundaryPolicy::from_config(&config),
            config,
            state: ScrollState::default(),
            host: None,
            pointer,
            scheduler,
            pending: None,
            tween: None,
            drag: None,
            listeners: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Start listening on `host` and the pointer surface
    ///
    /// `None` leaves the engine inert. Attaching while attached detaches
    /// the previous host first.
    pub fn attach(&mut self, host: Option<H>) {
        let Some(mut host) = host else {
            tracing::debug!("No scroll host, engine stays inert");
            return;
        };
        if self.host.is_some() {
            self.detach();
        }

        for (kind, mode) in HOST_LISTENERS {
            let id = host.add_listener(kind, mode);
            self.listeners.push(Registration {
                surface: Surface::Host,
                kind,
                id,
            });
        }
        for (kind, mode) in GLOBAL_LISTENERS {
            let id = self.pointer.add_listener(kind, mode);
            self.listeners.push(Registration {
                surface: Surface::Global,
                kind,
                id,
            });
        }

        self.state.position = host.scroll_left();
        self.host = Some(host);
        tracing::debug!("Scroller attached with {} listeners", self.listeners.len());
    }

    /// Remove every listener and cancel any pending frame, handing the host back
    ///
    /// Safe to call repeatedly or when never attached.
    pub fn detach(&mut self) -> Option<H> {
        self.cancel_pending();
        self.tween = None;
        if self.state.is_dragging {
            self.pointer.set_drag_affordance(false);
        }
        self.drag = None;

        for registration in std::mem::take(&mut self.listeners) {
            match registration.surface {
                Surface::Host => {
                    if let Some(host) = self.host.as_mut() {
                        host.remove_listener(registration.id);
                    }
                }
                Surface::Global => self.pointer.remove_listener(registration.id),
            }
        }

        self.state.is_dragging = false;
        self.state.is_scrolling = false;
        self.state.velocity = 0.0;

        let host = self.host.take();
        if host.is_some() {
            tracing::debug!("Scroller detached");
        }
        host
    }

    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Route one event delivered by `surface`
    ///
    /// Events nobody registered for are [`Disposition::Ignored`]. Wheel
    /// events report [`Disposition::PreventDefault`].
    pub fn handle_event(&mut self, surface: Surface, event: &InputEvent) -> Disposition {
        if !self.listens(surface, event.kind()) {
            return Disposition::Ignored;
        }

        match *event {
            InputEvent::Wheel { delta_x, delta_y } => {
                self.on_wheel(delta_x, delta_y);
                return Disposition::PreventDefault;
            }
            InputEvent::MouseDown { x } => self.on_drag_start(x),
            InputEvent::TouchStart { x } => self.on_drag_start(x.unwrap_or(0.0)),
            InputEvent::MouseMove { x } => self.on_drag_move(x),
            InputEvent::TouchMove { x } => self.on_drag_move(x.unwrap_or(0.0)),
            InputEvent::MouseUp | InputEvent::TouchEnd => self.on_drag_end(),
        }
        Disposition::Handled
    }

    /// Add wheel momentum and make sure the physics loop runs
    ///
    /// Ignored while a drag holds the strip and for non-finite deltas.
    pub fn on_wheel(&mut self, delta_x: f64, delta_y: f64) {
        if self.host.is_none() || self.state.is_dragging {
            return;
        }
        let impulse = wheel_impulse(delta_x, delta_y, self.config.sensitivity);
        if !impulse.is_finite() {
            tracing::warn!("Ignoring non-finite wheel delta ({}, {})", delta_x, delta_y);
            return;
        }
        self.cancel_animation();
        self.state.velocity += impulse;
        tracing::trace!(velocity = self.state.velocity, "wheel");
        self.schedule_physics();
    }

    pub fn on_drag_start(&mut self, x: f64) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        if !x.is_finite() {
            return;
        }
        let position = host.scroll_left();

        self.cancel_pending();
        self.tween = None;
        self.state.velocity = 0.0;
        self.state.position = position;
        self.state.is_scrolling = false;
        self.state.is_dragging = true;
        self.drag = Some(DragSession::begin(x, position, self.scheduler.now()));
        self.pointer.set_drag_affordance(true);
        tracing::debug!("Drag started at x={} position={}", x, position);
    }

    /// Lock the offset to the pointer; ignored unless a drag is in progress
    pub fn on_drag_move(&mut self, x: f64) {
        if !self.state.is_dragging || !x.is_finite() {
            return;
        }
        let now = self.scheduler.now();
        let (Some(drag), Some(host)) = (self.drag.as_mut(), self.host.as_mut()) else {
            return;
        };

        let sample = drag.track(x, now, self.config.sensitivity);
        let position = sample.position.clamp(0.0, host.max_scroll_left());
        host.set_scroll_left(position);
        self.state.position = position;
        self.state.velocity = sample.velocity;
    }

    /// Release the drag and coast on the last sampled velocity
    pub fn on_drag_end(&mut self) {
        if !self.state.is_dragging {
            return;
        }
        self.state.is_dragging = false;
        self.drag = None;
        self.pointer.set_drag_affordance(false);
        tracing::debug!("Drag ended with velocity {}", self.state.velocity);

        if self.state.velocity.abs() > self.config.min_velocity {
            self.schedule_physics();
        }
    }

    /// Replace the current momentum and let it coast
    pub fn fling(&mut self, velocity: f64) {
        if self.host.is_none() || self.state.is_dragging || !velocity.is_finite() {
            return;
        }
        self.cancel_animation();
        self.state.velocity = velocity;
        self.schedule_physics();
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Ease to `target` over `duration_ms`
    ///
    /// Momentum is discarded. Targets outside `[0, max_extent]` are clamped;
    /// a later call replaces an animation still in flight.
    pub fn scroll_to(&mut self, target: f64, duration_ms: f64) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        if !target.is_finite() {
            tracing::warn!("Ignoring non-finite scroll target {}", target);
            return;
        }
        if self.state.is_dragging {
            return;
        }

        let from = host.scroll_left();
        let target = target.clamp(0.0, host.max_scroll_left());

        self.cancel_pending();
        self.state.velocity = 0.0;
        self.state.is_scrolling = false;
        self.state.position = from;
        self.tween = Some(ScrollTween::new(
            from,
            target,
            self.scheduler.now(),
            duration_ms,
        ));
        tracing::debug!("Scroll to {} from {} over {}ms", target, from, duration_ms);
        self.schedule_animation();
    }

    /// Centre `element` in the viewport, measured from live geometry
    pub fn scroll_to_element(&mut self, element: &impl Bounded, duration_ms: f64) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let viewport = host.bounding_rect();
        let rect = element.bounding_rect();
        let target = host.scroll_left() + (rect.left - viewport.left)
            - (viewport.width - rect.width) / 2.0;
        self.scroll_to(target, duration_ms);
    }

    /// Halt momentum and any animation immediately
    pub fn stop(&mut self) {
        self.cancel_pending();
        self.tween = None;
        self.state.velocity = 0.0;
        self.state.is_scrolling = false;
    }

    // ---------------------------------------------------------------------
    // Frames
    // ---------------------------------------------------------------------

    /// Deliver a due frame; returns false for stale or unknown handles
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        let pending = match self.pending {
            Some(pending) if pending.handle() == handle => pending,
            _ => {
                tracing::trace!(?handle, "stale frame ignored");
                return false;
            }
        };
        self.pending = None;

        match pending {
            PendingFrame::Physics(_) => self.physics_tick(),
            PendingFrame::Animation(_) => self.animation_tick(),
        }
        true
    }

    fn physics_tick(&mut self) {
        let Some(host) = self.host.as_mut() else {
            self.state.is_scrolling = false;
            return;
        };

        self.state.position = host.scroll_left();
        let max_extent = host.max_scroll_left();
        let outcome = integrate(&mut self.state, &self.config, &self.policy, max_extent);
        if outcome != TickOutcome::Suspended {
            host.set_scroll_left(self.state.position);
        }
        tracing::trace!(
            position = self.state.position,
            velocity = self.state.velocity,
            ?outcome,
            "physics tick"
        );

        if outcome == TickOutcome::Continue {
            self.schedule_physics();
        }
    }

    fn animation_tick(&mut self) {
        let Some(tween) = self.tween else {
            return;
        };
        let now = self.scheduler.now();
        let Some(host) = self.host.as_mut() else {
            self.tween = None;
            return;
        };

        let frame = tween.sample(now);
        let position = frame.position.clamp(0.0, host.max_scroll_left());
        host.set_scroll_left(position);
        self.state.position = position;

        if frame.finished {
            self.tween = None;
            tracing::debug!("Scroll animation finished at {}", position);
        } else {
            self.schedule_animation();
        }
    }

    fn schedule_physics(&mut self) {
        match self.pending {
            Some(PendingFrame::Physics(_)) => return,
            Some(PendingFrame::Animation(_)) => self.cancel_pending(),
            None => {}
        }
        self.pending = Some(PendingFrame::Physics(self.scheduler.request_frame()));
    }

    fn schedule_animation(&mut self) {
        match self.pending {
            Some(PendingFrame::Animation(_)) => return,
            Some(PendingFrame::Physics(_)) => self.cancel_pending(),
            None => {}
        }
        self.pending = Some(PendingFrame::Animation(self.scheduler.request_frame()));
    }

    fn cancel_animation(&mut self) {
        if matches!(self.pending, Some(PendingFrame::Animation(_))) {
            self.cancel_pending();
        }
        self.tween = None;
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel_frame(pending.handle());
        }
    }

    fn listens(&self, surface: Surface, kind: EventKind) -> bool {
        self.listeners
            .iter()
            .any(|registration| registration.surface == surface && registration.kind == kind)
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Current offset, read from the host while attached
    pub fn position(&self) -> f64 {
        match self.host.as_ref() {
            Some(host) => host.scroll_left(),
            None => self.state.position,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.state.is_scrolling
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Whether a frame is outstanding
    pub fn needs_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Where a running animation will land
    pub fn animation_target(&self) -> Option<f64> {
        self.tween.map(|tween| tween.target())
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn config(&self) -> &SmoothScrollConfig {
        &self.config
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Mutable host access for layout changes; offsets written here are
    /// picked up on the next frame
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<H, P> InertialScroller<H, P, FrameQueue>
where
    H: ScrollHost,
    P: PointerSurface,
{
    /// Move the clock to `now_ms` and deliver every due frame
    ///
    /// Returns how many frames reached a tick.
    pub fn run_frame(&mut self, now_ms: f64) -> usize {
        self.scheduler.advance_to(now_ms);
        let due = self.scheduler.take_due();
        due.into_iter().filter(|handle| self.on_frame(*handle)).count()
    }
}
