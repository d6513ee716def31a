use chronicle_core::Route;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect as Area;

use crate::app::App;
use crate::scroll::{InputEvent, Surface};

/// Wheel delta reported for one notch, in columns
pub const WHEEL_NOTCH: f64 = 4.0;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    PrevEra,
    NextEra,
    FirstEra,
    LastEra,
    Open,
    Back,
    ToggleFavorite,
    ShowFavorites,
    ShowHistory,
    ContinueReading,
    StopMotion,
    MoveUp,
    MoveDown,
    Remove,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Strip navigation
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => Action::PrevEra,
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => Action::NextEra,
        (KeyCode::Char('0'), KeyModifiers::NONE) => Action::FirstEra,
        (KeyCode::Char('$'), _) => Action::LastEra,

        // Lists and detail text
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Char('d'), KeyModifiers::NONE)
            if matches!(app.route, Route::Favorites | Route::History) =>
        {
            Action::Remove
        }

        (KeyCode::Enter, KeyModifiers::NONE) => Action::Open,
        (KeyCode::Esc, _) | (KeyCode::Backspace, _) => Action::Back,

        (KeyCode::Char('f'), KeyModifiers::NONE) => Action::ToggleFavorite,
        (KeyCode::Char('F'), _) => Action::ShowFavorites,
        (KeyCode::Char('H'), _) => Action::ShowHistory,
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::ContinueReading,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::StopMotion,

        _ => Action::None,
    }
}

/// Map terminal mouse activity onto scroll engine events
///
/// Wheel and button presses only count over the strip; drags and releases
/// go to the global surface wherever they happen.
pub fn translate_mouse(mouse: MouseEvent, strip: Area) -> Option<(Surface, InputEvent)> {
    let x = mouse.column as f64;
    let over_strip = strip.contains((mouse.column, mouse.row).into());

    let translated = match mouse.kind {
        MouseEventKind::ScrollDown if over_strip => (
            Surface::Host,
            InputEvent::Wheel { delta_x: 0.0, delta_y: WHEEL_NOTCH },
        ),
        MouseEventKind::ScrollUp if over_strip => (
            Surface::Host,
            InputEvent::Wheel { delta_x: 0.0, delta_y: -WHEEL_NOTCH },
        ),
        MouseEventKind::ScrollRight if over_strip => (
            Surface::Host,
            InputEvent::Wheel { delta_x: WHEEL_NOTCH, delta_y: 0.0 },
        ),
        MouseEventKind::ScrollLeft if over_strip => (
            Surface::Host,
            InputEvent::Wheel { delta_x: -WHEEL_NOTCH, delta_y: 0.0 },
        ),
        MouseEventKind::Down(MouseButton::Left) if over_strip => {
            (Surface::Host, InputEvent::MouseDown { x })
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            (Surface::Global, InputEvent::MouseMove { x })
        }
        MouseEventKind::Up(MouseButton::Left) => (Surface::Global, InputEvent::MouseUp),
        _ => return None,
    };
    Some(translated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    const STRIP: Area = Area {
        x: 0,
        y: 2,
        width: 80,
        height: 10,
    };

    #[test]
    fn test_wheel_only_over_strip() {
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::ScrollDown, 10, 5), STRIP),
            Some((Surface::Host, InputEvent::Wheel { delta_x: 0.0, delta_y: WHEEL_NOTCH }))
        );
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::ScrollLeft, 10, 5), STRIP),
            Some((Surface::Host, InputEvent::Wheel { delta_x: -WHEEL_NOTCH, delta_y: 0.0 }))
        );
        assert_eq!(translate_mouse(mouse(MouseEventKind::ScrollDown, 10, 0), STRIP), None);
    }

    #[test]
    fn test_drag_sequence() {
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30, 4), STRIP),
            Some((Surface::Host, InputEvent::MouseDown { x: 30.0 }))
        );
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30, 20), STRIP),
            None
        );
        // Drags leaving the strip keep tracking
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 30), STRIP),
            Some((Surface::Global, InputEvent::MouseMove { x: 12.0 }))
        );
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 12, 30), STRIP),
            Some((Surface::Global, InputEvent::MouseUp))
        );
        assert_eq!(
            translate_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 30, 4), STRIP),
            None
        );
    }
}
