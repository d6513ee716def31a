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

pub struct HistoryWidget;

impl HistoryWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .title(format!(" Reading history ({}) ", app.history.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        let now = Utc::now();
        let items: Vec<ListItem> = app
            .history
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == app.list_selected {
                    Style::default()
                        .fg(theme.fg0)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg0)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>10}  ", format_relative(entry.timestamp, now)),
                        Style::default().fg(theme.grey0),
                    ),
                    Span::styled(entry.era_title.clone(), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        let mut state = ListState::default();
        if !app.history.is_empty() {
            state.select(Some(app.list_selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }
}
