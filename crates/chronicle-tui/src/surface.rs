//! Terminal-side implementations of the scroll surfaces
//!
//! The timeline strip is a row of fixed-width era cards. Offsets are in
//! columns, kept fractional so inertia can move by less than a cell per
//! frame; rendering rounds them.

use std::ops::Range;

use ratatui::layout::Rect as Area;

use crate::scroll::{
    Bounded, EventKind, EventTarget, ListenerId, ListenerMode, ListenerRegistry, PointerSurface,
    Rect, ScrollHost,
};

/// Horizontally scrolling row of era cards
#[derive(Debug, Clone)]
pub struct CardStrip {
    card_count: usize,
    card_width: u16,
    gap: u16,
    viewport: Rect,
    scroll_left: f64,
    listeners: ListenerRegistry,
}

impl CardStrip {
    pub fn new(card_count: usize, card_width: u16, gap: u16) -> Self {
        Self {
            card_count,
            card_width: card_width.max(1),
            gap,
            viewport: Rect::default(),
            scroll_left: 0.0,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Place the strip on screen; returns true when the geometry changed
    pub fn set_viewport(&mut self, area: Area) -> bool {
        let viewport = Rect::new(
            area.x as f64,
            area.y as f64,
            area.width as f64,
            area.height as f64,
        );
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.scroll_left = self.scroll_left.clamp(0.0, self.max_scroll_left());
        true
    }

    pub fn set_card_count(&mut self, count: usize) {
        self.card_count = count;
        self.scroll_left = self.scroll_left.clamp(0.0, self.max_scroll_left());
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    pub fn card_width(&self) -> u16 {
        self.card_width
    }

    /// Distance from one card's left edge to the next
    pub fn pitch(&self) -> f64 {
        (self.card_width + self.gap) as f64
    }

    pub fn has_viewport(&self) -> bool {
        self.viewport.width > 0.0
    }

    /// Screen geometry of card `index` at the current offset
    pub fn card_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.card_count {
            return None;
        }
        Some(Rect::new(
            self.viewport.left + index as f64 * self.pitch() - self.scroll_left,
            self.viewport.top,
            self.card_width as f64,
            self.viewport.height,
        ))
    }

    /// Card under screen column `x`; gaps hit nothing
    pub fn card_at(&self, x: f64) -> Option<usize> {
        if !self.viewport.contains_x(x) {
            return None;
        }
        let content_x = x - self.viewport.left + self.scroll_left;
        let index = (content_x / self.pitch()).floor() as usize;
        let within = content_x - index as f64 * self.pitch();
        (index < self.card_count && within < self.card_width as f64).then_some(index)
    }

    /// Cards at least partly inside the viewport
    pub fn visible_cards(&self) -> Range<usize> {
        if self.card_count == 0 || !self.has_viewport() {
            return 0..0;
        }
        let pitch = self.pitch();
        let first = (self.scroll_left / pitch).floor() as usize;
        let last = ((self.scroll_left + self.viewport.width) / pitch).ceil() as usize;
        first.min(self.card_count)..last.min(self.card_count)
    }

    /// Offset that centres card `index`, limited to the scroll range
    pub fn centering_offset(&self, index: usize) -> f64 {
        let inset = (self.viewport.width - self.card_width as f64) / 2.0;
        (index as f64 * self.pitch() - inset).clamp(0.0, self.max_scroll_left())
    }

    /// Card whose centred position is nearest the current offset
    pub fn centered_card(&self) -> Option<usize> {
        let distance = |index: &usize| (self.centering_offset(*index) - self.scroll_left).abs();
        (0..self.card_count).min_by(|a, b| distance(a).total_cmp(&distance(b)))
    }

    /// Whole-column offset used for drawing
    pub fn render_offset(&self) -> i32 {
        self.scroll_left.round() as i32
    }

    pub fn listens_for(&self, kind: EventKind) -> bool {
        self.listeners.mode_of(kind).is_some()
    }
}

impl EventTarget for CardStrip {
    fn add_listener(&mut self, kind: EventKind, mode: ListenerMode) -> ListenerId {
        self.listeners.add(kind, mode)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

impl Bounded for CardStrip {
    fn bounding_rect(&self) -> Rect {
        self.viewport
    }
}

impl ScrollHost for CardStrip {
    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, value: f64) {
        self.scroll_left = value;
    }

    fn scroll_width(&self) -> f64 {
        if self.card_count == 0 {
            return 0.0;
        }
        self.card_count as f64 * self.pitch() - self.gap as f64
    }

    fn client_width(&self) -> f64 {
        self.viewport.width
    }
}

/// The whole terminal, seen as the surface that follows drags
#[derive(Debug, Clone, Default)]
pub struct TerminalPointer {
    grabbing: bool,
    listeners: ListenerRegistry,
}

impl TerminalPointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag is holding the strip
    pub fn is_grabbing(&self) -> bool {
        self.grabbing
    }

    pub fn listens_for(&self, kind: EventKind) -> bool {
        self.listeners.mode_of(kind).is_some()
    }
}

impl EventTarget for TerminalPointer {
    fn add_listener(&mut self, kind: EventKind, mode: ListenerMode) -> ListenerId {
        self.listeners.add(kind, mode)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }
}

impl PointerSurface for TerminalPointer {
    fn set_drag_affordance(&mut self, active: bool) {
        self.grabbing = active;
    }
}
