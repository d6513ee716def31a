use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::route::{Route, Router};
use crate::storage::{load_or_default, save_json, KeyValueStore};
use crate::Result;

pub const HISTORY_KEY: &str = "chronicle-reading-history";
pub const PROGRESS_KEY: &str = "chronicle-progress";

/// Oldest entries beyond this are dropped
pub const MAX_HISTORY_ITEMS: usize = 20;

const DEFAULT_TOTAL_ERAS: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub era_id: String,
    pub era_title: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_position: Option<f64>,
}

/// Most-recently-read eras, newest first, one entry per era
#[derive(Debug, Clone, Default)]
pub struct ReadingHistory {
    entries: Vec<HistoryEntry>,
    dirty: bool,
}

impl ReadingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut entries: Vec<HistoryEntry> = load_or_default(store, HISTORY_KEY);
        entries.truncate(MAX_HISTORY_ITEMS);
        Self {
            entries,
            dirty: false,
        }
    }

    pub fn save(&mut self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_json(store, HISTORY_KEY, &self.entries)?;
        self.dirty = false;
        Ok(())
    }

    pub fn flush(&mut self, store: &mut dyn KeyValueStore) -> Result<()> {
        if self.dirty {
            self.save(store)?;
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn record(&mut self, era_id: &str, era_title: &str, scroll_position: Option<f64>) {
        self.record_at(era_id, era_title, scroll_position, Utc::now());
    }

    /// Move `era_id` to the front of the history
    pub fn record_at(
        &mut self,
        era_id: &str,
        era_title: &str,
        scroll_position: Option<f64>,
        now: DateTime<Utc>,
    ) {
        self.entries.retain(|entry| entry.era_id != era_id);
        self.entries.insert(
            0,
            HistoryEntry {
                era_id: era_id.to_string(),
                era_title: era_title.to_string(),
                timestamp: now,
                scroll_position,
            },
        );
        self.entries.truncate(MAX_HISTORY_ITEMS);
        self.dirty = true;
    }

    pub fn last_read(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// Navigate to the most recently read era; false when history is empty
    pub fn continue_reading(&self, router: &mut dyn Router) -> bool {
        match self.last_read() {
            Some(entry) => {
                tracing::debug!("Continue reading {}", entry.era_id);
                router.navigate(Route::EraDetail {
                    id: entry.era_id.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, era_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.era_id != era_id);
        let removed = self.entries.len() != before;
        self.dirty |= removed;
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.dirty = true;
    }

    pub fn recent(&self, limit: usize) -> &[HistoryEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Human-friendly age of a timestamp
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);

    if diff.num_hours() < 1 {
        let minutes = diff.num_minutes();
        if minutes <= 0 {
            "just now".to_string()
        } else {
            format!("{} min ago", minutes)
        }
    } else if diff.num_hours() < 24 {
        format!("{} h ago", diff.num_hours())
    } else if diff.num_days() < 7 {
        format!("{} d ago", diff.num_days())
    } else {
        timestamp.format("%b %-d").to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressBlob {
    #[serde(default)]
    current_era_index: usize,
    #[serde(default)]
    scroll_progress: f64,
}

/// Position of the reader within the whole timeline
#[derive(Debug, Clone)]
pub struct ReadingProgress {
    current_era_index: usize,
    scroll_progress: f64,
    total_eras: usize,
    dirty: bool,
}

impl Default for ReadingProgress {
    fn default() -> Self {
        Self {
            current_era_index: 0,
            scroll_progress: 0.0,
            total_eras: DEFAULT_TOTAL_ERAS,
            dirty: false,
        }
    }
}

impl ReadingProgress {
    pub fn new(total_eras: usize) -> Self {
        Self {
            total_eras: total_eras.max(1),
            ..Default::default()
        }
    }

    pub fn load(store: &dyn KeyValueStore, total_eras: usize) -> Self {
        let mut progress = Self::new(total_eras);
        match crate::storage::load_json::<ProgressBlob>(store, PROGRESS_KEY) {
            Ok(Some(blob)) => {
                progress.set_current_era(blob.current_era_index);
                progress.set_scroll_progress(blob.scroll_progress);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to load {}: {}", PROGRESS_KEY, e),
        }
        progress.dirty = false;
        progress
    }

    pub fn save(&mut self, store: &mut dyn KeyValueStore) -> Result<()> {
        let blob = ProgressBlob {
            current_era_index: self.current_era_index,
            scroll_progress: self.scroll_progress,
        };
        save_json(store, PROGRESS_KEY, &blob)?;
        self.dirty = false;
        Ok(())
    }

    pub fn flush(&mut self, store: &mut dyn KeyValueStore) -> Result<()> {
        if self.dirty {
            self.save(store)?;
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn current_era_index(&self) -> usize {
        self.current_era_index
    }

    pub fn scroll_progress(&self) -> f64 {
        self.scroll_progress
    }

    pub fn total_eras(&self) -> usize {
        self.total_eras
    }

    pub fn set_current_era(&mut self, index: usize) {
        self.current_era_index = index.min(self.total_eras - 1);
        self.dirty = true;
    }

    /// Percentage in `[0, 100]`
    pub fn set_scroll_progress(&mut self, progress: f64) {
        self.scroll_progress = if progress.is_finite() {
            progress.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.dirty = true;
    }

    pub fn set_total_eras(&mut self, count: usize) {
        self.total_eras = count.max(1);
        self.current_era_index = self.current_era_index.min(self.total_eras - 1);
        self.dirty = true;
    }

    /// How far through the timeline the current era is, as a percentage
    pub fn progress_percent(&self) -> f64 {
        if self.total_eras <= 1 {
            return 100.0;
        }
        self.current_era_index as f64 / (self.total_eras - 1) as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::{Duration, TimeZone};

    struct RecordingRouter(Vec<Route>);

    impl Router for RecordingRouter {
        fn navigate(&mut self, route: Route) {
            self.0.push(route);
        }
    }

    #[test]
    fn test_record_moves_era_to_front() {
        let mut history = ReadingHistory::new();
        history.record("a", "A", None);
        history.record("b", "B", None);
        history.record("a", "A", Some(42.0));

        assert_eq!(history.len(), 2);
        let last = history.last_read().unwrap();
        assert_eq!(last.era_id, "a");
        assert_eq!(last.scroll_position, Some(42.0));
        assert_eq!(history.entries()[1].era_id, "b");
    }

    #[test]
    fn test_history_is_capped() {
        let mut history = ReadingHistory::new();
        for i in 0..25 {
            history.record(&format!("era-{i}"), "t", None);
        }
        assert_eq!(history.len(), MAX_HISTORY_ITEMS);
        assert_eq!(history.last_read().unwrap().era_id, "era-24");
        assert_eq!(history.recent(3).len(), 3);
        assert_eq!(history.recent(100).len(), MAX_HISTORY_ITEMS);
    }

    #[test]
    fn test_continue_reading_navigates_to_last_era() {
        let mut router = RecordingRouter(Vec::new());
        let mut history = ReadingHistory::new();
        assert!(!history.continue_reading(&mut router));

        history.record("era-3", "Three", None);
        assert!(history.continue_reading(&mut router));
        assert_eq!(router.0, vec![Route::EraDetail { id: "era-3".into() }]);
    }

    #[test]
    fn test_remove_and_persist() {
        let mut store = MemoryStore::new();
        let mut history = ReadingHistory::load(&store);
        history.record("a", "A", None);
        history.record("b", "B", None);
        assert!(history.remove("a"));
        assert!(!history.remove("a"));
        history.flush(&mut store).unwrap();

        let reloaded = ReadingHistory::load(&store);
        assert_eq!(reloaded.entries(), history.entries());

        history.clear();
        history.flush(&mut store).unwrap();
        assert!(ReadingHistory::load(&store).is_empty());
    }

    #[test]
    fn test_format_relative() {
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap();
        assert_eq!(format_relative(now - Duration::seconds(20), now), "just now");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5 min ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3 h ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2 d ago");
        assert_eq!(format_relative(now - Duration::days(30), now), "Feb 19");
    }

    #[test]
    fn test_progress_clamps() {
        let mut progress = ReadingProgress::new(5);
        progress.set_current_era(9);
        assert_eq!(progress.current_era_index(), 4);
        assert_eq!(progress.progress_percent(), 100.0);

        progress.set_current_era(2);
        assert_eq!(progress.progress_percent(), 50.0);

        progress.set_scroll_progress(140.0);
        assert_eq!(progress.scroll_progress(), 100.0);
        progress.set_scroll_progress(-3.0);
        assert_eq!(progress.scroll_progress(), 0.0);

        progress.set_total_eras(2);
        assert_eq!(progress.current_era_index(), 1);
    }

    #[test]
    fn test_progress_round_trip() {
        let mut store = MemoryStore::new();
        let mut progress = ReadingProgress::load(&store, 16);
        assert!(!progress.is_dirty());
        progress.set_current_era(7);
        progress.set_scroll_progress(33.0);
        progress.flush(&mut store).unwrap();

        let reloaded = ReadingProgress::load(&store, 16);
        assert_eq!(reloaded.current_era_index(), 7);
        assert_eq!(reloaded.scroll_progress(), 33.0);

        // Fewer eras than the stored index: clamp on load
        assert_eq!(ReadingProgress::load(&store, 4).current_era_index(), 3);
    }
}
