use chrono::Utc;
use chronicle_core::progress::format_relative;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::App;

pub struct FavoritesWidget;

impl FavoritesWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let counts = app.favorites.count_by_kind();
        let title = format!(
            " Favorites ({}) · eras {} · highlights {} ",
            app.favorites.len(),
            counts.era,
            counts.highlight
        );

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        if app.favorites.is_empty() {
            let empty = List::new(vec![ListItem::new(Span::styled(
                "  Nothing saved yet. Press f on an era to keep it here.",
                Style::default().fg(theme.grey2),
            ))])
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let now = Utc::now();
        let items: Vec<ListItem> = app
            .favorites
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let label = match app.timeline.era(&item.target_id) {
                    Some(era) => era.title.clone(),
                    None => item.target_id.clone(),
                };
                let style = if i == app.list_selected {
                    Style::default()
                        .fg(theme.fg0)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg0)
                };

                let mut spans = vec![
                    Span::styled("★ ", Style::default().fg(theme.favorite)),
                    Span::styled(format!("{:<10}", item.kind.as_str()), Style::default().fg(theme.purple)),
                    Span::styled(label, style),
                    Span::styled(
                        format!("  {}", format_relative(item.added_at, now)),
                        Style::default().fg(theme.grey0),
                    ),
                ];
                if let Some(note) = &item.note {
                    spans.push(Span::styled(format!("  {}", note), Style::default().fg(theme.grey2)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        let mut state = ListState::default();
        state.select(Some(app.list_selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
