//! Contracts for the surfaces the engine scrolls and listens on

/// Axis-aligned box in host coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.left && x < self.right()
    }
}

/// Anything with on-screen geometry
pub trait Bounded {
    fn bounding_rect(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounding_rect(&self) -> Rect {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Wheel,
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
}

/// Whether a listener may suppress the event's default action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerMode {
    Active,
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub trait EventTarget {
    fn add_listener(&mut self, kind: EventKind, mode: ListenerMode) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);
}

/// The element whose horizontal offset the engine drives
pub trait ScrollHost: EventTarget + Bounded {
    fn scroll_left(&self) -> f64;

    fn set_scroll_left(&mut self, value: f64);

    /// Total content extent
    fn scroll_width(&self) -> f64;

    /// Visible viewport extent
    fn client_width(&self) -> f64;

    /// Largest valid offset, queried fresh every time
    fn max_scroll_left(&self) -> f64 {
        (self.scroll_width() - self.client_width()).max(0.0)
    }
}

/// The whole interaction surface; tracks drags that leave the host
pub trait PointerSurface: EventTarget {
    /// Grabbing cursor and no text selection while `active`
    fn set_drag_affordance(&mut self, active: bool);
}

/// Which surface delivered an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Host,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Wheel { delta_x: f64, delta_y: f64 },
    MouseDown { x: f64 },
    MouseMove { x: f64 },
    MouseUp,
    /// First touch point, if any
    TouchStart { x: Option<f64> },
    TouchMove { x: Option<f64> },
    TouchEnd,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Wheel { .. } => EventKind::Wheel,
            Self::MouseDown { .. } => EventKind::MouseDown,
            Self::MouseMove { .. } => EventKind::MouseMove,
            Self::MouseUp => EventKind::MouseUp,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::TouchMove { .. } => EventKind::TouchMove,
            Self::TouchEnd => EventKind::TouchEnd,
        }
    }
}

/// What the host should do with an event after dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// No listener took it
    Ignored,
    Handled,
    /// Handled, and the default action (native scrolling) must not run
    PreventDefault,
}

/// Book-keeping for surfaces that hand out listener ids
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerId, EventKind, ListenerMode)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: EventKind, mode: ListenerMode) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, kind, mode));
        id
    }

    pub fn remove(&mut self, id: ListenerId) {
        self.entries.retain(|(entry, _, _)| *entry != id);
    }

    pub fn mode_of(&self, kind: EventKind) -> Option<ListenerMode> {
        self.entries
            .iter()
            .find(|(_, entry, _)| *entry == kind)
            .map(|(_, _, mode)| *mode)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
