use anyhow::Result;
use chrono::Utc;

use chronicle_core::{
    progress::{format_relative, ReadingHistory},
    FileStore,
};

pub fn list(store: &FileStore, limit: usize) -> Result<()> {
    let history = ReadingHistory::load(store);

    if history.is_empty() {
        println!("Nothing read yet.");
        println!("\nOpen an era in the timeline with:");
        println!("  chronicle run");
        return Ok(());
    }

    let entries = history.recent(limit);
    println!("Reading history ({} of {}):\n", entries.len(), history.len());

    let now = Utc::now();
    for entry in entries {
        println!(
            "  {} - {}  ({})",
            entry.era_id,
            entry.era_title,
            format_relative(entry.timestamp, now)
        );
    }

    Ok(())
}

pub fn remove(store: &mut FileStore, era: &str) -> Result<()> {
    let mut history = ReadingHistory::load(store);
    if !history.remove(era) {
        println!("Not in history: {}", era);
        return Ok(());
    }
    history.flush(store)?;

    println!("Removed {} from history", era);
    Ok(())
}

pub fn clear(store: &mut FileStore) -> Result<()> {
    let mut history = ReadingHistory::load(store);
    let count = history.len();
    history.clear();
    history.flush(store)?;

    println!("Cleared {} history entries", count);
    Ok(())
}
