use chronicle_core::favorites::FavoriteKind;
use chronicle_core::timeline::HighlightType;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::wrap_text;
use crate::app::App;

pub struct EraDetailWidget;

impl EraDetailWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let Some(era) = app.detail_era() else {
            return;
        };

        let favorite = app.favorites.is_favorite(FavoriteKind::Era, &era.id);
        let title = format!(
            " {}{} ({} - {}) ",
            if favorite { "★ " } else { "" },
            era.title,
            era.time_range.start,
            era.time_range.end
        );

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        let width = inner.width.saturating_sub(2) as usize;

        let heading = |text: &str| {
            Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(theme.orange).add_modifier(Modifier::BOLD),
            ))
        };
        let body = Style::default().fg(theme.fg0);

        let mut lines = Vec::new();
        for line in wrap_text(&era.summary, width) {
            lines.push(Line::from(Span::styled(line, body.add_modifier(Modifier::ITALIC))));
        }
        lines.push(Line::from(""));

        if !era.full_content.is_empty() {
            for line in wrap_text(&era.full_content, width) {
                lines.push(Line::from(Span::styled(line, body)));
            }
            lines.push(Line::from(""));
        }

        if !era.locations.is_empty() {
            lines.push(heading("Locations"));
            lines.push(Line::from(Span::styled(era.locations.join(" · "), body)));
            lines.push(Line::from(""));
        }

        if !era.key_characters.is_empty() {
            lines.push(heading("Key characters"));
            lines.push(Line::from(Span::styled(era.key_characters.join(" · "), body)));
            lines.push(Line::from(""));
        }

        if !era.highlights.is_empty() {
            lines.push(heading("Highlights"));
            for highlight in &era.highlights {
                let color = match highlight.kind {
                    HighlightType::Epic => theme.epic,
                    HighlightType::Emotional => theme.emotional,
                    HighlightType::Cool => theme.cool,
                };
                lines.push(Line::from(vec![
                    Span::styled("✦ ", Style::default().fg(color)),
                    Span::styled(
                        highlight.title.clone(),
                        Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
                    ),
                ]));
                for line in wrap_text(&highlight.description, width.saturating_sub(2)) {
                    lines.push(Line::from(Span::styled(format!("  {}", line), body)));
                }
                if let Some(quote) = &highlight.quote {
                    lines.push(Line::from(Span::styled(
                        format!("  「{}」", quote),
                        Style::default().fg(theme.grey2),
                    )));
                }
            }
            lines.push(Line::from(""));
        }

        if !era.quotes.is_empty() {
            lines.push(heading("Quotes"));
            for quote in &era.quotes {
                for line in wrap_text(&quote.text, width.saturating_sub(2)) {
                    lines.push(Line::from(Span::styled(
                        format!("│ {}", line),
                        Style::default().fg(theme.aqua),
                    )));
                }
                if let Some(speaker) = &quote.speaker {
                    lines.push(Line::from(Span::styled(
                        format!("  - {}", speaker),
                        Style::default().fg(theme.grey2),
                    )));
                }
            }
        }

        // Keep the last screenful reachable without scrolling into blank space
        let max_scroll = (lines.len() as u16).saturating_sub(inner.height);
        let scroll = app.detail_scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }
}
