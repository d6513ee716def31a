use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Timeline JSON file shown by the TUI (defaults to `<data_dir>/timeline.json`)
    #[serde(default)]
    pub timeline_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            timeline_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when nothing is moving
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Width of one timeline card in columns
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    /// Gap between timeline cards in columns
    #[serde(default = "default_card_gap")]
    pub card_gap: u16,
    /// Inertial scrolling of the timeline strip
    #[serde(default)]
    pub scroll: SmoothScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            card_width: default_card_width(),
            card_gap: default_card_gap(),
            scroll: SmoothScrollConfig::default(),
        }
    }
}

/// Inertial drag-scroll tuning.
///
/// Values are validated (clamped) when a scroll engine is built from them,
/// so a hand-edited config file cannot produce a loop that never settles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothScrollConfig {
    /// Per-tick velocity retention factor, must stay below 1
    #[serde(default = "default_friction")]
    pub friction: f64,
    /// Scales raw wheel/drag deltas
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
    /// Speed (columns per tick) below which motion stops
    #[serde(default = "default_min_velocity")]
    pub min_velocity: f64,
    /// Reverse velocity when the strip hits either end
    #[serde(default = "default_true")]
    pub bounce_back: bool,
    /// Fraction of velocity kept (inverted) on a bounce
    #[serde(default = "default_bounce_strength")]
    pub bounce_strength: f64,
    /// Default duration of programmatic scrolls
    #[serde(default = "default_scroll_to_duration")]
    pub scroll_to_duration_ms: u64,
    /// Frame rate used while something is moving
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            friction: default_friction(),
            sensitivity: default_sensitivity(),
            min_velocity: default_min_velocity(),
            bounce_back: default_true(),
            bounce_strength: default_bounce_strength(),
            scroll_to_duration_ms: default_scroll_to_duration(),
            animation_fps: default_animation_fps(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chronicle")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_card_width() -> u16 {
    28
}

fn default_card_gap() -> u16 {
    2
}

fn default_friction() -> f64 {
    0.92
}

fn default_sensitivity() -> f64 {
    1.2
}

fn default_min_velocity() -> f64 {
    0.5
}

fn default_bounce_strength() -> f64 {
    0.15
}

fn default_scroll_to_duration() -> u64 {
    500
}

fn default_animation_fps() -> u16 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Always uses ~/.config/chronicle/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("chronicle")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Directory holding persisted key-value blobs
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir().join("store")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("chronicle.log")
    }

    pub fn timeline_path(&self) -> PathBuf {
        match &self.general.timeline_path {
            Some(path) => expand_tilde(path),
            None => self.data_dir().join("timeline.json"),
        }
    }
}
