use chronicle_core::favorites::FavoriteKind;
use chronicle_core::timeline::Era;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{truncate, wrap_text};
use crate::app::App;
use crate::theme::Theme;

pub struct TimelineStripWidget;

impl TimelineStripWidget {
    /// Draw the strip and hand its inner area to the scroll host
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &app.theme;
        let border_style = if app.is_grabbing() {
            Style::default().fg(theme.yellow)
        } else {
            Style::default().fg(theme.accent)
        };

        let title = format!(" Timeline ({} eras) ", app.timeline.len());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        app.set_strip_area(inner);

        if app.timeline.is_empty() {
            let empty = Paragraph::new("No eras loaded").style(Style::default().fg(app.theme.grey2));
            frame.render_widget(empty, inner);
            return;
        }

        let Some(strip) = app.strip() else {
            return;
        };
        let left_edge = inner.x as i32;
        let right_edge = inner.x as i32 + inner.width as i32;

        for index in strip.visible_cards() {
            let (Some(rect), Some(era)) = (strip.card_rect(index), app.timeline.eras.get(index))
            else {
                continue;
            };

            // Whole columns; the engine keeps the fractional offset
            let left = rect.left.round() as i32;
            let right = left + strip.card_width() as i32;
            let clipped_left = left.max(left_edge);
            let clipped_right = right.min(right_edge);
            if clipped_right <= clipped_left {
                continue;
            }

            let card_area = Rect::new(
                clipped_left as u16,
                inner.y,
                (clipped_right - clipped_left) as u16,
                inner.height,
            );
            let selected = index == app.selected_era;
            let favorite = app.favorites.is_favorite(FavoriteKind::Era, &era.id);
            Self::render_card(frame, card_area, era, selected, favorite, &app.theme);
        }
    }

    fn render_card(
        frame: &mut Frame,
        area: Rect,
        era: &Era,
        selected: bool,
        favorite: bool,
        theme: &Theme,
    ) {
        let border_style = if selected {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.grey0)
        };
        let background = if selected { theme.bg1 } else { theme.bg0 };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(background));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width as usize;
        if width == 0 {
            return;
        }

        let marker = if favorite { "★ " } else { "" };
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} - {}", era.time_range.start, era.time_range.end),
                Style::default().fg(theme.grey2),
            )),
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.favorite)),
                Span::styled(
                    truncate(&era.title, width.saturating_sub(marker.chars().count())),
                    Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        lines.extend(
            wrap_text(&era.summary, width)
                .into_iter()
                .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.fg0)))),
        );

        if !era.highlights.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("✦ {} highlights", era.highlights.len()),
                Style::default().fg(theme.yellow),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
