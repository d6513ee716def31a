use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Span of chronicle years covered by an era
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

/// Kind of a memorable scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightType {
    Epic,
    Emotional,
    Cool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: HighlightType,
    #[serde(default)]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// One card of the timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Era {
    pub id: String,
    pub time_range: TimeRange,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub full_content: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub key_characters: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub eras: Vec<Era>,
    #[serde(default)]
    pub total_years: i64,
    #[serde(default)]
    pub last_updated: String,
}

impl Timeline {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let timeline = Self::from_json(&content)?;
        tracing::debug!("Loaded {} eras from {}", timeline.eras.len(), path.display());
        Ok(timeline)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn era(&self, id: &str) -> Option<&Era> {
        self.eras.iter().find(|era| era.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.eras.iter().position(|era| era.id == id)
    }

    pub fn len(&self) -> usize {
        self.eras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eras.is_empty()
    }
}
