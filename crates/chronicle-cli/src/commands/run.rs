use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use chronicle_core::{timeline::Timeline, AppConfig, FileStore, Route};
use chronicle_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{EraDetailWidget, FavoritesWidget, HistoryWidget, StatusBarWidget, TimelineStripWidget},
};

pub async fn run(config: Arc<AppConfig>, store: FileStore, timeline_path: Option<PathBuf>) -> Result<()> {
    let path = timeline_path.unwrap_or_else(|| config.timeline_path());
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read timeline {}", path.display()))?;
    let timeline = Timeline::from_json(&content)
        .with_context(|| format!("Invalid timeline {}", path.display()))?;
    tracing::info!("Loaded {} eras from {}", timeline.len(), path.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Chronicle"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), timeline, Box::new(store));

    // Create event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_fps,
    );

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    if let Err(e) = app.shutdown() {
        tracing::warn!("Failed to save state on exit: {}", e);
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_secs_f64() * 1000.0;

    loop {
        app.tick(now_ms());
        terminal.draw(|frame| draw(frame, app))?;

        // Poll at frame rate while the strip moves or is held
        let event = if app.needs_frame() || app.scroller.is_dragging() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        let Some(event) = event else {
            continue;
        };

        // Drag velocity is measured against the frame clock
        app.sync_clock(now_ms());

        match event {
            AppEvent::Key(key) => {
                let action = handle_key_event(key, app);
                app.apply(action);
            }
            AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
            AppEvent::Resize(_, _) => {
                // Next draw hands the strip its new geometry
            }
            AppEvent::Tick => {}
        }

        if let Err(e) = app.flush() {
            tracing::warn!("Failed to save state: {}", e);
            app.set_status(format!("Save failed: {}", e));
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let route = app.route.clone();
    match route {
        Route::Home => TimelineStripWidget::render(frame, chunks[0], app),
        Route::EraDetail { .. } => EraDetailWidget::render(frame, chunks[0], app),
        Route::Favorites => FavoritesWidget::render(frame, chunks[0], app),
        Route::History => HistoryWidget::render(frame, chunks[0], app),
    }

    StatusBarWidget::render(frame, chunks[1], app);
}
