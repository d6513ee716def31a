use serde::{Deserialize, Serialize};

use crate::storage::{load_json, save_json, KeyValueStore};
use crate::{Error, Result};

pub const SETTINGS_KEY: &str = "chronicle-settings";
pub const AUDIO_SETTINGS_KEY: &str = "chronicle-audio-settings";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationLevel {
    #[default]
    Full,
    Reduced,
    Minimal,
}

impl AnimationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Reduced => "reduced",
            Self::Minimal => "minimal",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "full" => Some(Self::Full),
            "reduced" => Some(Self::Reduced),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleDensity {
    High,
    #[default]
    Medium,
    Low,
}

impl ParticleDensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn particle_count(&self) -> u32 {
        match self {
            Self::High => 5000,
            Self::Medium => 2500,
            Self::Low => 1000,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Every field optional so one bad or missing field keeps the rest
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialSettings {
    sound_enabled: Option<bool>,
    sound_volume: Option<f64>,
    animation_level: Option<AnimationLevel>,
    particle_density: Option<ParticleDensity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsBlob {
    sound_enabled: bool,
    sound_volume: f64,
    animation_level: AnimationLevel,
    particle_density: ParticleDensity,
}

/// Presentation preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    sound_enabled: bool,
    sound_volume: f64,
    animation_level: AnimationLevel,
    particle_density: ParticleDensity,
    dirty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            sound_volume: 0.5,
            animation_level: AnimationLevel::Full,
            particle_density: ParticleDensity::Medium,
            dirty: false,
        }
    }
}

impl Settings {
    pub const KEYS: [&'static str; 4] = [
        "sound_enabled",
        "sound_volume",
        "animation_level",
        "particle_density",
    ];

    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut settings = Self::default();
        match load_json::<PartialSettings>(store, SETTINGS_KEY) {
            Ok(Some(stored)) => {
                if let Some(v) = stored.sound_enabled {
                    settings.sound_enabled = v;
                }
                if let Some(v) = stored.sound_volume {
                    settings.sound_volume = clamp_volume(v);
                }
                if let Some(v) = stored.animation_level {
                    settings.animation_level = v;
                }
                if let Some(v) = stored.particle_density {
                    settings.particle_density = v;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to load settings: {}", e),
        }
        settings
    }

    pub fn save(&mut self, store: &mut dyn KeyValueStore) -> Result<()> {
        let blob = SettingsBlob {
            sound_enabled: self.sound_enabled,
            sound_volume: self.sound_volume,
            animation_level: self.animation_level,
            particle_density: self.particle_density,
        };
        save_json(store, SETTINGS_KEY, &blob)?;
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

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn sound_volume(&self) -> f64 {
        self.sound_volume
    }

    pub fn animation_level(&self) -> AnimationLevel {
        self.animation_level
    }

    pub fn particle_density(&self) -> ParticleDensity {
        self.particle_density
    }

    pub fn particle_count(&self) -> u32 {
        self.particle_density.particle_count()
    }

    pub fn reduce_motion(&self) -> bool {
        self.animation_level == AnimationLevel::Minimal
    }

    pub fn set_sound_enabled(&mut self, value: bool) {
        self.sound_enabled = value;
        self.dirty = true;
    }

    pub fn set_sound_volume(&mut self, value: f64) {
        self.sound_volume = clamp_volume(value);
        self.dirty = true;
    }

    pub fn set_animation_level(&mut self, value: AnimationLevel) {
        self.animation_level = value;
        self.dirty = true;
    }

    pub fn set_particle_density(&mut self, value: ParticleDensity) {
        self.particle_density = value;
        self.dirty = true;
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self {
            dirty: true,
            ..Self::default()
        };
    }

    /// Set a field from its snake_case name and a textual value
    pub fn set_by_name(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || Error::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "sound_enabled" => self.set_sound_enabled(value.parse().map_err(|_| invalid())?),
            "sound_volume" => self.set_sound_volume(value.parse().map_err(|_| invalid())?),
            "animation_level" => {
                self.set_animation_level(AnimationLevel::parse(value).ok_or_else(invalid)?)
            }
            "particle_density" => {
                self.set_particle_density(ParticleDensity::parse(value).ok_or_else(invalid)?)
            }
            _ => return Err(Error::UnknownSetting(key.to_string())),
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sound_enabled", self.sound_enabled.to_string()),
            ("sound_volume", format!("{:.2}", self.sound_volume)),
            ("animation_level", self.animation_level.as_str().to_string()),
            ("particle_density", self.particle_density.as_str().to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AudioBlob {
    master_volume: f64,
    music_volume: f64,
    sfx_volume: f64,
    music_enabled: bool,
    sfx_enabled: bool,
}

impl Default for AudioBlob {
    fn default() -> Self {
        Self {
            master_volume: 0.7,
            music_volume: 0.5,
            sfx_volume: 0.8,
            music_enabled: true,
            sfx_enabled: true,
        }
    }
}

/// Mixer levels and toggles for ambient music and sound effects
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioSettings {
    levels: AudioBlob,
    dirty: bool,
}

impl AudioSettings {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut levels = match load_json::<AudioBlob>(store, AUDIO_SETTINGS_KEY) {
            Ok(Some(levels)) => levels,
            Ok(None) => AudioBlob::default(),
            Err(e) => {
                tracing::warn!("Failed to load audio settings: {}", e);
                AudioBlob::default()
            }
        };
        levels.master_volume = clamp_volume(levels.master_volume);
        levels.music_volume = clamp_volume(levels.music_volume);
        levels.sfx_volume = clamp_volume(levels.sfx_volume);
        Self {
            levels,
            dirty: false,
        }
    }

    pub fn save(&mut self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_json(store, AUDIO_SETTINGS_KEY, &self.levels)?;
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

    pub fn master_volume(&self) -> f64 {
        self.levels.master_volume
    }

    pub fn music_volume(&self) -> f64 {
        self.levels.music_volume
    }

    pub fn sfx_volume(&self) -> f64 {
        self.levels.sfx_volume
    }

    pub fn music_enabled(&self) -> bool {
        self.levels.music_enabled
    }

    pub fn sfx_enabled(&self) -> bool {
        self.levels.sfx_enabled
    }

    pub fn set_master_volume(&mut self, volume: f64) {
        self.levels.master_volume = clamp_volume(volume);
        self.dirty = true;
    }

    pub fn set_music_volume(&mut self, volume: f64) {
        self.levels.music_volume = clamp_volume(volume);
        self.dirty = true;
    }

    pub fn set_sfx_volume(&mut self, volume: f64) {
        self.levels.sfx_volume = clamp_volume(volume);
        self.dirty = true;
    }

    /// Flip (or force) music; returns the new state
    pub fn toggle_music(&mut self, enabled: Option<bool>) -> bool {
        self.levels.music_enabled = enabled.unwrap_or(!self.levels.music_enabled);
        self.dirty = true;
        self.levels.music_enabled
    }

    pub fn toggle_sfx(&mut self, enabled: Option<bool>) -> bool {
        self.levels.sfx_enabled = enabled.unwrap_or(!self.levels.sfx_enabled);
        self.dirty = true;
        self.levels.sfx_enabled
    }

    /// Output gain for a sound effect played at `gain`; zero when muted
    pub fn effective_sfx_volume(&self, gain: f64) -> f64 {
        if !self.levels.sfx_enabled {
            return 0.0;
        }
        clamp_volume(gain) * self.levels.sfx_volume * self.levels.master_volume
    }

    pub fn effective_music_volume(&self) -> f64 {
        if !self.levels.music_enabled {
            return 0.0;
        }
        self.levels.music_volume * self.levels.master_volume
    }

    pub fn set_by_name(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || Error::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "master_volume" => self.set_master_volume(value.parse().map_err(|_| invalid())?),
            "music_volume" => self.set_music_volume(value.parse().map_err(|_| invalid())?),
            "sfx_volume" => self.set_sfx_volume(value.parse().map_err(|_| invalid())?),
            "music_enabled" => {
                self.toggle_music(Some(value.parse().map_err(|_| invalid())?));
            }
            "sfx_enabled" => {
                self.toggle_sfx(Some(value.parse().map_err(|_| invalid())?));
            }
            _ => return Err(Error::UnknownSetting(key.to_string())),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("master_volume", format!("{:.2}", self.levels.master_volume)),
            ("music_volume", format!("{:.2}", self.levels.music_volume)),
            ("sfx_volume", format!("{:.2}", self.levels.sfx_volume)),
            ("music_enabled", self.levels.music_enabled.to_string()),
            ("sfx_enabled", self.levels.sfx_enabled.to_string()),
        ]
    }

    pub fn reset_to_defaults(&mut self) {
        self.levels = AudioBlob::default();
        self.dirty = true;
    }
}

fn clamp_volume(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
