use chronicle_core::Route;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let motion = if app.is_grabbing() {
            "GRAB"
        } else if app.scroller.is_animating() {
            "EASE"
        } else if app.scroller.is_scrolling() {
            "COAST"
        } else {
            "IDLE"
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | {} | Era {}/{} | {:.0}% through",
                app.route.name().to_uppercase(),
                motion,
                app.selected_era + 1,
                app.timeline.len(),
                app.progress.progress_percent()
            )
        };

        let help_hint = match app.route {
            Route::Home => " q:quit h/l:era enter:open f:fav F:favs H:history c:continue ",
            Route::EraDetail { .. } => " esc:back j/k:scroll f:fav ",
            Route::Favorites | Route::History => " esc:back j/k:move enter:open d:remove ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
