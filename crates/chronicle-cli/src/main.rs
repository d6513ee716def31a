use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chronicle_core::{favorites::FavoriteKind, AppConfig, FileStore};

mod commands;

#[derive(Parser)]
#[command(name = "chronicle")]
#[command(author, version, about = "A terminal timeline browser with inertial drag scrolling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Timeline JSON to browse (defaults to the configured path)
    #[arg(short = 't', long, global = true)]
    timeline: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Manage bookmarked eras, highlights and collectibles
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Show or edit the reading history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show or change persisted preferences
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites, optionally of one kind
    List {
        #[arg(short = 'k', long)]
        kind: Option<FavoriteKind>,
    },
    /// Bookmark a target (era, highlight, ability, treasure or beast)
    Add {
        kind: FavoriteKind,
        target: String,
        #[arg(short = 'n', long)]
        note: Option<String>,
    },
    /// Remove a bookmark
    Remove { kind: FavoriteKind, target: String },
    /// Remove all bookmarks, or all of one kind
    Clear {
        #[arg(short = 'k', long)]
        kind: Option<FavoriteKind>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Most recently read eras first
    List {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
    /// Forget one era
    Remove { era: String },
    /// Forget everything
    Clear,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print preferences and audio levels
    Show,
    /// Set a preference by name, e.g. `animation_level minimal`
    Set { key: String, value: String },
    /// Restore defaults
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first so its log level applies
    let config = Arc::new(AppConfig::load()?);

    let tui = matches!(cli.command, None | Some(Commands::Run));
    init_logging(&config, tui)?;

    let mut store = FileStore::open(config.store_dir())?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, store, cli.timeline).await,
        Some(Commands::Favorites { action }) => match action {
            FavoritesAction::List { kind } => commands::favorites::list(&store, kind),
            FavoritesAction::Add { kind, target, note } => {
                commands::favorites::add(&mut store, kind, &target, note)
            }
            FavoritesAction::Remove { kind, target } => {
                commands::favorites::remove(&mut store, kind, &target)
            }
            FavoritesAction::Clear { kind } => commands::favorites::clear(&mut store, kind),
        },
        Some(Commands::History { action }) => match action {
            HistoryAction::List { limit } => commands::history::list(&store, limit),
            HistoryAction::Remove { era } => commands::history::remove(&mut store, &era),
            HistoryAction::Clear => commands::history::clear(&mut store),
        },
        Some(Commands::Settings { action }) => match action {
            SettingsAction::Show => commands::settings::show(&store),
            SettingsAction::Set { key, value } => {
                commands::settings::set(&mut store, &key, &value)
            }
            SettingsAction::Reset => commands::settings::reset(&mut store),
        },
    }
}

/// RUST_LOG wins over the configured level
///
/// The TUI owns the terminal, so it logs to a file; subcommands log to
/// stderr and keep stdout for their output.
fn init_logging(config: &AppConfig, tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if tui {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .init();
    }

    Ok(())
}
