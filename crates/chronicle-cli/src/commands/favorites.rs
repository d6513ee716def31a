use anyhow::Result;
use chrono::Utc;

use chronicle_core::{
    favorites::{FavoriteItem, FavoriteKind, Favorites},
    progress::format_relative,
    FileStore,
};

pub fn list(store: &FileStore, kind: Option<FavoriteKind>) -> Result<()> {
    let favorites = Favorites::load(store);
    let items: Vec<&FavoriteItem> = match kind {
        Some(kind) => favorites.by_kind(kind),
        None => favorites.items().iter().collect(),
    };

    if items.is_empty() {
        println!("No favorites yet.");
        println!("\nTo bookmark an era, run:");
        println!("  chronicle favorites add era <era-id>");
        return Ok(());
    }

    println!("Favorites ({}):\n", items.len());

    let now = Utc::now();
    for item in &items {
        println!(
            "  [{}] {}  ({})",
            item.kind.as_str(),
            item.target_id,
            format_relative(item.added_at, now)
        );
        if let Some(note) = &item.note {
            println!("    {}", note);
        }
    }

    if kind.is_none() {
        let counts = favorites.count_by_kind();
        println!(
            "\n{} eras, {} highlights, {} abilities, {} treasures, {} beasts",
            counts.era, counts.highlight, counts.ability, counts.treasure, counts.beast
        );
    }

    Ok(())
}

pub fn add(store: &mut FileStore, kind: FavoriteKind, target: &str, note: Option<String>) -> Result<()> {
    let mut favorites = Favorites::load(store);
    let existed = favorites.is_favorite(kind, target);
    let id = favorites.add(kind, target, note).id.clone();
    favorites.flush(store)?;

    if existed {
        println!("Already a favorite: {} {} ({})", kind.as_str(), target, id);
    } else {
        println!("Added favorite {} {} ({})", kind.as_str(), target, id);
    }
    Ok(())
}

pub fn remove(store: &mut FileStore, kind: FavoriteKind, target: &str) -> Result<()> {
    let mut favorites = Favorites::load(store);
    if !favorites.remove(kind, target) {
        println!("Not a favorite: {} {}", kind.as_str(), target);
        return Ok(());
    }
    favorites.flush(store)?;

    println!("Removed favorite {} {}", kind.as_str(), target);
    Ok(())
}

pub fn clear(store: &mut FileStore, kind: Option<FavoriteKind>) -> Result<()> {
    let mut favorites = Favorites::load(store);
    let before = favorites.len();
    match kind {
        Some(kind) => favorites.clear_kind(kind),
        None => favorites.clear(),
    }
    favorites.flush(store)?;

    println!("Removed {} favorites", before - favorites.len());
    Ok(())
}
