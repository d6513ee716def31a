use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

use crate::scroll::timing::FRAME_TIME_MS;

/// Terminal events as the app loop sees them
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Button, drag, move or wheel
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The poll timed out
    Tick,
}

/// Polls crossterm at one of two rates
///
/// The idle rate keeps the loop cheap when nothing moves; the frame rate
/// paces momentum and eased scrolls.
pub struct EventHandler {
    idle_timeout: Duration,
    frame_timeout: Duration,
}

impl EventHandler {
    pub fn with_animation_fps(tick_rate_ms: u64, fps: u16) -> Self {
        Self {
            idle_timeout: Duration::from_millis(tick_rate_ms),
            frame_timeout: frame_interval(fps),
        }
    }

    pub fn next(&self) -> Result<Option<AppEvent>> {
        wait(self.idle_timeout)
    }

    /// Poll with the animation frame interval
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        wait(self.frame_timeout)
    }

    pub fn frame_timeout(&self) -> Duration {
        self.frame_timeout
    }
}

fn wait(timeout: Duration) -> Result<Option<AppEvent>> {
    if !event::poll(timeout)? {
        return Ok(Some(AppEvent::Tick));
    }
    Ok(translate(event::read()?))
}

/// Keep key presses (some terminals also report releases), mouse and resize
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
        _ => None,
    }
}

fn frame_interval(fps: u16) -> Duration {
    if fps == 0 {
        Duration::from_millis(FRAME_TIME_MS as u64)
    } else {
        Duration::from_millis((1000 / fps as u64).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('l'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_key_releases_are_dropped() {
        assert!(matches!(translate(key(KeyEventKind::Press)), Some(AppEvent::Key(_))));
        assert!(translate(key(KeyEventKind::Release)).is_none());
        assert!(translate(Event::FocusGained).is_none());
        assert!(matches!(
            translate(Event::Resize(80, 24)),
            Some(AppEvent::Resize(80, 24))
        ));
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(60), Duration::from_millis(16));
        assert_eq!(frame_interval(30), Duration::from_millis(33));
        assert_eq!(frame_interval(0), Duration::from_millis(16));
        assert_eq!(frame_interval(5000), Duration::from_millis(1));

        let handler = EventHandler::with_animation_fps(100, 120);
        assert_eq!(handler.frame_timeout(), Duration::from_millis(8));
    }
}
