use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{load_or_default, save_json, KeyValueStore};
use crate::{Error, Result};

pub const FAVORITES_KEY: &str = "chronicle-favorites";

/// How many entries `Favorites::recent` returns
const RECENT_LIMIT: usize = 10;

/// Things that can be bookmarked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteKind {
    Era,
    Highlight,
    Ability,
    Treasure,
    Beast,
}

impl FavoriteKind {
    pub const ALL: [FavoriteKind; 5] = [
        Self::Era,
        Self::Highlight,
        Self::Ability,
        Self::Treasure,
        Self::Beast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Era => "era",
            Self::Highlight => "highlight",
            Self::Ability => "ability",
            Self::Treasure => "treasure",
            Self::Beast => "beast",
        }
    }
}

impl FromStr for FavoriteKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::InvalidValue {
                key: "kind".to_string(),
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
    pub target_id: String,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl FavoriteItem {
    fn matches(&self, kind: FavoriteKind, target_id: &str) -> bool {
        self.kind == kind && self.target_id == target_id
    }
}

/// Per-kind tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FavoriteCounts {
    pub era: usize,
    pub highlight: usize,
    pub ability: usize,
    pub treasure: usize,
    pub beast: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoritesBlob {
    #[serde(default)]
    items: Vec<FavoriteItem>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

/// Bookmarked eras, highlights and collectibles
///
/// Mutations only mark the collection dirty; the owner calls
/// [`Favorites::flush`] to write it back.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    items: Vec<FavoriteItem>,
    dirty: bool,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        let blob: FavoritesBlob = load_or_default(store, FAVORITES_KEY);
        Self {
            items: blob.items,
            dirty: false,
        }
    }

    pub fn save(&mut self, store: &mut dyn KeyValueStore) -> Result<()> {
        let blob = FavoritesBlob {
            items: self.items.clone(),
            last_updated: Some(Utc::now()),
        };
        save_json(store, FAVORITES_KEY, &blob)?;
        self.dirty = false;
        Ok(())
    }

    /// Save only if something changed since the last save
    pub fn flush(&mut self, store: &mut dyn KeyValueStore) -> Result<()> {
        if self.dirty {
            self.save(store)?;
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn add(&mut self, kind: FavoriteKind, target_id: &str, note: Option<String>) -> &FavoriteItem {
        self.add_at(kind, target_id, note, Utc::now())
    }

    /// Add a favorite, or update the note of an existing one
    ///
    /// An existing entry keeps its note when `note` is `None`.
    pub fn add_at(
        &mut self,
        kind: FavoriteKind,
        target_id: &str,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> &FavoriteItem {
        if let Some(index) = self.position(kind, target_id) {
            if note.is_some() {
                self.items[index].note = note;
                self.dirty = true;
            }
            return &self.items[index];
        }

        self.items.push(FavoriteItem {
            id: format!("fav-{}", Uuid::new_v4()),
            kind,
            target_id: target_id.to_string(),
            added_at: now,
            note,
        });
        self.dirty = true;
        tracing::debug!("Added favorite {} {}", kind.as_str(), target_id);
        &self.items[self.items.len() - 1]
    }

    pub fn remove(&mut self, kind: FavoriteKind, target_id: &str) -> bool {
        match self.position(kind, target_id) {
            Some(index) => {
                self.items.remove(index);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Flip the favorite state; returns whether the target is now a favorite
    pub fn toggle(&mut self, kind: FavoriteKind, target_id: &str, note: Option<String>) -> bool {
        if self.remove(kind, target_id) {
            false
        } else {
            self.add(kind, target_id, note);
            true
        }
    }

    pub fn is_favorite(&self, kind: FavoriteKind, target_id: &str) -> bool {
        self.position(kind, target_id).is_some()
    }

    pub fn by_kind(&self, kind: FavoriteKind) -> Vec<&FavoriteItem> {
        self.items.iter().filter(|item| item.kind == kind).collect()
    }

    pub fn update_note(&mut self, kind: FavoriteKind, target_id: &str, note: &str) -> bool {
        match self.position(kind, target_id) {
            Some(index) => {
                self.items[index].note = Some(note.to_string());
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.dirty = true;
        }
    }

    pub fn clear_kind(&mut self, kind: FavoriteKind) {
        let before = self.items.len();
        self.items.retain(|item| item.kind != kind);
        if self.items.len() != before {
            self.dirty = true;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_by_kind(&self) -> FavoriteCounts {
        let mut counts = FavoriteCounts::default();
        for item in &self.items {
            let slot = match item.kind {
                FavoriteKind::Era => &mut counts.era,
                FavoriteKind::Highlight => &mut counts.highlight,
                FavoriteKind::Ability => &mut counts.ability,
                FavoriteKind::Treasure => &mut counts.treasure,
                FavoriteKind::Beast => &mut counts.beast,
            };
            *slot += 1;
        }
        counts
    }

    /// Newest favorites first
    pub fn recent(&self) -> Vec<&FavoriteItem> {
        let mut items: Vec<&FavoriteItem> = self.items.iter().collect();
        items.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        items.truncate(RECENT_LIMIT);
        items
    }

    fn position(&self, kind: FavoriteKind, target_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.matches(kind, target_id))
    }
}
