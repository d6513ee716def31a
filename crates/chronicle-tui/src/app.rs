use std::sync::Arc;

use chronicle_core::favorites::{FavoriteKind, Favorites};
use chronicle_core::progress::{ReadingHistory, ReadingProgress};
use chronicle_core::settings::Settings;
use chronicle_core::timeline::{Era, Timeline};
use chronicle_core::{AppConfig, KeyValueStore, Route, Router};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect as Area;

use crate::input::{translate_mouse, Action};
use crate::scroll::{
    FrameQueue, InertialScroller, InputEvent, ScrollConfigExt, ScrollHost, Surface,
};
use crate::surface::{CardStrip, TerminalPointer};
use crate::theme::Theme;

/// The engine as wired up for the terminal
pub type TimelineScroller = InertialScroller<CardStrip, TerminalPointer, FrameQueue>;

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub timeline: Timeline,
    /// Drives the horizontal offset of the era strip
    pub scroller: TimelineScroller,
    /// Current view
    pub route: Route,
    back_stack: Vec<Route>,
    /// Era highlighted on the strip
    pub selected_era: usize,
    /// Cursor inside the favorites and history lists
    pub list_selected: usize,
    /// Line offset of the era detail text
    pub detail_scroll: u16,
    pub favorites: Favorites,
    pub history: ReadingHistory,
    pub progress: ReadingProgress,
    pub settings: Settings,
    store: Box<dyn KeyValueStore>,
    strip_area: Area,
    press_column: Option<u16>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, timeline: Timeline, store: Box<dyn KeyValueStore>) -> Self {
        let favorites = Favorites::load(&*store);
        let history = ReadingHistory::load(&*store);
        let progress = ReadingProgress::load(&*store, timeline.len().max(1));
        let settings = Settings::load(&*store);

        let strip = CardStrip::new(timeline.len(), config.ui.card_width, config.ui.card_gap);
        let mut scroller =
            InertialScroller::new(&config.ui.scroll, TerminalPointer::new(), FrameQueue::new());
        scroller.attach(Some(strip));

        let selected_era = progress
            .current_era_index()
            .min(timeline.len().saturating_sub(1));

        Self {
            config,
            theme: Theme::default(),
            timeline,
            scroller,
            route: Route::Home,
            back_stack: Vec::new(),
            selected_era,
            list_selected: 0,
            detail_scroll: 0,
            favorites,
            history,
            progress,
            settings,
            store,
            strip_area: Area::default(),
            press_column: None,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }

    /// Currently selected era
    pub fn current_era(&self) -> Option<&Era> {
        self.timeline.eras.get(self.selected_era)
    }

    /// Era shown by the detail view
    pub fn detail_era(&self) -> Option<&Era> {
        match &self.route {
            Route::EraDetail { id } => self.timeline.era(id),
            _ => None,
        }
    }

    pub fn strip(&self) -> Option<&CardStrip> {
        self.scroller.host()
    }

    pub fn is_grabbing(&self) -> bool {
        self.scroller.pointer().is_grabbing()
    }

    /// Place the strip on screen; a new geometry re-centres the selected card
    pub fn set_strip_area(&mut self, area: Area) {
        self.strip_area = area;
        let changed = self
            .scroller
            .host_mut()
            .map(|strip| strip.set_viewport(area))
            .unwrap_or(false);
        if changed && !self.scroller.is_dragging() {
            self.center_era(self.selected_era, 0.0);
        }
    }

    /// Advance the scroll clock and run due frames
    pub fn tick(&mut self, now_ms: f64) -> usize {
        let animating = self.scroller.is_animating();
        let frames = self.scroller.run_frame(now_ms);
        if frames > 0 && !animating {
            self.follow_strip();
        }
        frames
    }

    /// Move the scroll clock without running frames, so input is timed
    /// against the moment it arrived
    pub fn sync_clock(&mut self, now_ms: f64) {
        self.scroller.scheduler_mut().advance_to(now_ms);
    }

    /// Whether the loop should poll at animation rate
    pub fn needs_frame(&self) -> bool {
        self.scroller.needs_frame()
    }

    /// Duration for eased strip moves; zero when motion is reduced
    pub fn scroll_duration(&self) -> f64 {
        if self.settings.reduce_motion() {
            0.0
        } else {
            self.scroller.config().scroll_to_duration()
        }
    }

    pub fn apply(&mut self, action: Action) {
        if action != Action::None {
            self.clear_status();
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::PrevEra => self.select_era(self.selected_era.saturating_sub(1)),
            Action::NextEra => self.select_era(self.selected_era + 1),
            Action::FirstEra => self.select_era(0),
            Action::LastEra => self.select_era(self.timeline.len().saturating_sub(1)),
            Action::Open => self.open_selected(),
            Action::Back => self.back(),
            Action::ToggleFavorite => self.toggle_favorite(),
            Action::ShowFavorites => self.navigate(Route::Favorites),
            Action::ShowHistory => self.navigate(Route::History),
            Action::ContinueReading => self.continue_reading(),
            Action::StopMotion => self.scroller.stop(),
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::Remove => self.remove_selected(),
            Action::None => {}
        }
    }

    /// Select an era and ease the strip so its card is centred
    pub fn select_era(&mut self, index: usize) {
        if self.timeline.is_empty() {
            return;
        }
        let index = index.min(self.timeline.len() - 1);
        self.set_selected(index);
        self.center_era(index, self.scroll_duration());
    }

    fn set_selected(&mut self, index: usize) {
        if index != self.selected_era {
            self.selected_era = index;
            self.progress.set_current_era(index);
        }
    }

    fn center_era(&mut self, index: usize, duration_ms: f64) {
        let Some(rect) = self.strip().and_then(|strip| strip.card_rect(index)) else {
            return;
        };
        self.scroller.scroll_to_element(&rect, duration_ms);
    }

    /// Selection follows the strip while momentum or a drag moves it
    fn follow_strip(&mut self) {
        if let Some(index) = self.strip().and_then(|strip| strip.centered_card()) {
            self.set_selected(index);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some((surface, event)) = translate_mouse(mouse, self.strip_area) else {
            return;
        };
        // The strip is only on screen at home; releases must still end drags
        if surface == Surface::Host && self.route != Route::Home {
            return;
        }

        let click = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press_column = Some(mouse.column);
                false
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.press_column.take() == Some(mouse.column)
            }
            _ => false,
        };

        let disposition = self.scroller.handle_event(surface, &event);
        tracing::trace!(?event, ?disposition, "mouse");

        if self.scroller.is_dragging() && matches!(event, InputEvent::MouseMove { .. }) {
            self.follow_strip();
        }
        if click {
            let card = self
                .strip()
                .and_then(|strip| strip.card_at(mouse.column as f64));
            if let Some(index) = card {
                self.select_era(index);
            }
        }
    }

    fn open_selected(&mut self) {
        let target = match self.route {
            Route::Home => self.current_era().map(|era| era.id.clone()),
            Route::Favorites => {
                let item = self
                    .favorites
                    .items()
                    .get(self.list_selected)
                    .map(|item| (item.kind, item.target_id.clone()));
                match item {
                    Some((FavoriteKind::Era, id)) => Some(id),
                    Some((kind, _)) => {
                        self.set_status(format!("Cannot open a {} favorite", kind.as_str()));
                        None
                    }
                    None => None,
                }
            }
            Route::History => self
                .history
                .entries()
                .get(self.list_selected)
                .map(|entry| entry.era_id.clone()),
            Route::EraDetail { .. } => None,
        };
        if let Some(id) = target {
            self.navigate(Route::EraDetail { id });
        }
    }

    fn back(&mut self) {
        if let Some(previous) = self.back_stack.pop() {
            tracing::debug!("Back to {}", previous.name());
            self.route = previous;
            self.list_selected = 0;
        } else if self.route != Route::Home {
            self.route = Route::Home;
        }
    }

    fn toggle_favorite(&mut self) {
        let era = match &self.route {
            Route::Home => self.current_era(),
            Route::EraDetail { .. } => self.detail_era(),
            _ => None,
        };
        let Some((id, title)) = era.map(|era| (era.id.clone(), era.title.clone())) else {
            return;
        };

        if self.favorites.toggle(FavoriteKind::Era, &id, None) {
            self.set_status(format!("Added \"{}\" to favorites", title));
        } else {
            self.set_status(format!("Removed \"{}\" from favorites", title));
        }
    }

    fn continue_reading(&mut self) {
        let history = self.history.clone();
        if !history.continue_reading(self) {
            self.set_status("Nothing read yet");
        }
    }

    fn move_cursor(&mut self, delta: i32) {
        match self.route {
            Route::EraDetail { .. } => {
                self.detail_scroll = if delta < 0 {
                    self.detail_scroll.saturating_sub(1)
                } else {
                    self.detail_scroll.saturating_add(1)
                };
            }
            Route::Favorites | Route::History => {
                let len = self.list_len();
                if len == 0 {
                    return;
                }
                self.list_selected = if delta < 0 {
                    self.list_selected.saturating_sub(1)
                } else {
                    (self.list_selected + 1).min(len - 1)
                };
            }
            Route::Home => {}
        }
    }

    /// Entries in the list view on screen
    pub fn list_len(&self) -> usize {
        match self.route {
            Route::Favorites => self.favorites.len(),
            Route::History => self.history.len(),
            _ => 0,
        }
    }

    fn remove_selected(&mut self) {
        match self.route {
            Route::Favorites => {
                if let Some(item) = self.favorites.items().get(self.list_selected).cloned() {
                    self.favorites.remove(item.kind, &item.target_id);
                }
            }
            Route::History => {
                let era_id = self
                    .history
                    .entries()
                    .get(self.list_selected)
                    .map(|entry| entry.era_id.clone());
                if let Some(era_id) = era_id {
                    self.history.remove(&era_id);
                }
            }
            _ => return,
        }
        self.list_selected = self.list_selected.min(self.list_len().saturating_sub(1));
    }

    /// Write back every container that changed
    pub fn flush(&mut self) -> chronicle_core::Result<()> {
        let store = &mut *self.store;
        self.favorites.flush(store)?;
        self.history.flush(store)?;
        self.progress.flush(store)?;
        self.settings.flush(store)?;
        Ok(())
    }

    /// Detach the engine and persist state
    pub fn shutdown(&mut self) -> chronicle_core::Result<()> {
        self.scroller.detach();
        self.flush()
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Router for App {
    fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        if let Route::EraDetail { id } = &route {
            let Some(index) = self.timeline.index_of(id) else {
                self.set_status(format!("Era '{}' not found", id));
                return;
            };
            let title = self.timeline.eras[index].title.clone();
            let offset = self.strip().map(|strip| strip.scroll_left());
            self.history.record(id, &title, offset);
            self.set_selected(index);
            self.center_era(index, 0.0);
            self.detail_scroll = 0;
        }

        tracing::debug!("Navigate {} -> {}", self.route.name(), route.name());
        let previous = std::mem::replace(&mut self.route, route);
        self.back_stack.push(previous);
        self.list_selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::FrameScheduler;
    use chronicle_core::favorites::FAVORITES_KEY;
    use chronicle_core::progress::PROGRESS_KEY;
    use chronicle_core::MemoryStore;
    use crossterm::event::KeyModifiers;

    fn timeline(count: usize) -> Timeline {
        let eras: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"id":"era-{i}","timeRange":{{"start":{},"end":{}}},"title":"Era {i}","summary":"s"}}"#,
                    i * 100,
                    i * 100 + 99
                )
            })
            .collect();
        Timeline::from_json(&format!(r#"{{"eras":[{}]}}"#, eras.join(","))).unwrap()
    }

    fn app_with(store: MemoryStore) -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), timeline(5), Box::new(store));
        // 5 cards of 28 + 2 gap: content 148, viewport 60, max 88
        app.set_strip_area(Area::new(0, 2, 60, 10));
        app.tick(16.0);
        app
    }

    fn app() -> App {
        app_with(MemoryStore::new())
    }

    fn settle(app: &mut App) {
        let mut now = app.scroller.scheduler().now();
        for _ in 0..1_000 {
            if !app.needs_frame() {
                break;
            }
            now += 16.0;
            app.tick(now);
        }
    }

    fn mouse(kind: MouseEventKind, column: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row: 5,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_next_era_eases_card_to_centre() {
        let mut app = app();
        assert_eq!(app.strip().unwrap().scroll_left(), 0.0);

        app.apply(Action::NextEra);
        assert_eq!(app.selected_era, 1);
        assert!(app.scroller.is_animating());

        settle(&mut app);
        // Card 1 starts at 30; centring a 28-wide card in 60 columns
        assert_eq!(app.strip().unwrap().scroll_left(), 14.0);
        assert_eq!(app.selected_era, 1);

        app.apply(Action::LastEra);
        settle(&mut app);
        assert_eq!(app.selected_era, 4);
        assert_eq!(app.strip().unwrap().scroll_left(), 88.0);
    }

    #[test]
    fn test_open_records_history_and_back_returns() {
        let mut app = app();
        app.apply(Action::NextEra);
        app.apply(Action::Open);

        assert_eq!(app.route, Route::EraDetail { id: "era-1".into() });
        assert_eq!(app.history.last_read().unwrap().era_id, "era-1");
        assert_eq!(app.detail_era().unwrap().title, "Era 1");

        app.apply(Action::Back);
        assert_eq!(app.route, Route::Home);
        app.apply(Action::Back);
        assert_eq!(app.route, Route::Home);
    }

    #[test]
    fn test_unknown_era_is_not_navigated() {
        let mut app = app();
        app.navigate(Route::EraDetail { id: "missing".into() });
        assert_eq!(app.route, Route::Home);
        assert!(app.status_message.is_some());
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_toggle_favorite_and_flush() {
        let mut app = app();
        app.apply(Action::ToggleFavorite);
        assert!(app.favorites.is_favorite(FavoriteKind::Era, "era-0"));
        assert!(app.store().get(FAVORITES_KEY).unwrap().is_none());

        app.flush().unwrap();
        assert!(app.store().get(FAVORITES_KEY).unwrap().is_some());
        assert!(!app.favorites.is_dirty());

        app.apply(Action::ToggleFavorite);
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn test_remove_from_favorites_view() {
        let mut app = app();
        app.apply(Action::ToggleFavorite);
        app.apply(Action::ShowFavorites);
        assert_eq!(app.list_len(), 1);

        app.apply(Action::Open);
        assert_eq!(app.route, Route::EraDetail { id: "era-0".into() });
        app.apply(Action::Back);

        app.apply(Action::Remove);
        assert!(app.favorites.is_empty());
        assert_eq!(app.list_selected, 0);
    }

    #[test]
    fn test_continue_reading() {
        let mut app = app();
        app.apply(Action::ContinueReading);
        assert_eq!(app.route, Route::Home);
        assert!(app.status_message.is_some());

        app.select_era(3);
        app.apply(Action::Open);
        app.apply(Action::Back);
        app.select_era(0);

        app.apply(Action::ContinueReading);
        assert_eq!(app.route, Route::EraDetail { id: "era-3".into() });
        assert_eq!(app.selected_era, 3);
    }

    #[test]
    fn test_wheel_gives_strip_momentum() {
        let mut app = app();
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10));
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10));
        assert!(app.scroller.velocity() > 0.0);

        settle(&mut app);
        assert!(app.strip().unwrap().scroll_left() > 0.0);
        assert!(!app.scroller.is_scrolling());
    }

    #[test]
    fn test_click_selects_card() {
        let mut app = app();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 35));
        assert!(app.is_grabbing());
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 35));
        assert!(!app.is_grabbing());

        assert_eq!(app.selected_era, 1);
        assert!(app.scroller.is_animating());
    }

    #[test]
    fn test_drag_is_timed_by_synced_clock() {
        let mut app = app();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 50));
        app.sync_clock(116.0);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40));

        // 10 columns * 1.2 over 100 ms, per 16 ms frame
        assert!((app.scroller.velocity() - 1.92).abs() < 1e-9);
        assert_eq!(app.strip().unwrap().scroll_left(), 10.0);
        assert!(!app.needs_frame());
    }

    #[test]
    fn test_release_outside_home_ends_drag() {
        let mut app = app();
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 35));
        app.apply(Action::ShowHistory);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 20));
        assert!(!app.scroller.is_dragging());
    }

    #[test]
    fn test_progress_is_restored() {
        let mut store = MemoryStore::new();
        store
            .set(PROGRESS_KEY, r#"{"currentEraIndex":3,"scrollProgress":0}"#)
            .unwrap();
        let app = app_with(store);
        assert_eq!(app.selected_era, 3);
    }

    #[test]
    fn test_shutdown_detaches_and_persists() {
        let mut app = app();
        app.apply(Action::NextEra);
        app.shutdown().unwrap();

        assert!(!app.scroller.is_attached());
        assert!(!app.needs_frame());
        assert!(app.store().get(PROGRESS_KEY).unwrap().is_some());
    }
}
