use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::Path};

use crate::error::{Result, TimelineError};

/// Chapter number (1-based) -> number of pages that still belong to the
/// earlier grouping.
pub type SplitChapters = BTreeMap<u32, u32>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    /// Free-text publication date, see `dates::parse_chapter_date`.
    pub date: String,
    pub pages: u32,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub title: String,
    #[serde(default)]
    pub cover: Option<String>,
    pub chapters: Vec<Chapter>,
}

impl Volume {
    pub fn pages(&self) -> u32 {
        self.chapters.iter().map(|c| c.pages).sum()
    }
}

/// Inclusive, 1-based chapter-number interval. A missing `to` runs through
/// the last published chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub from: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<u32>,
}

impl Range {
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to: Some(to) }
    }

    pub fn open(from: u32) -> Self {
        Self { from, to: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub title: String,
    #[serde(default)]
    pub cover: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub title: String,
    #[serde(default)]
    pub cover: Option<String>,
    pub range: Range,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub title: String,
    #[serde(default)]
    pub cover: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saga {
    pub title: String,
    #[serde(default)]
    pub cover: Option<String>,
    /// Only checked against the arcs; widths always come from the arcs.
    #[serde(default)]
    pub range: Option<Range>,
    pub arcs: Vec<Arc>,
}

/// Everything known about one title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    pub title: String,
    pub volumes: Vec<Volume>,
    #[serde(default)]
    pub split_chapters: SplitChapters,
    #[serde(default)]
    pub seasons: Option<Vec<Season>>,
    #[serde(default)]
    pub sagas: Vec<Saga>,
}

impl TimelineData {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TimelineError::Dataset(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| TimelineError::Dataset(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// All chapters in publication order.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.volumes.iter().flat_map(|v| v.chapters.iter())
    }

    pub fn total_pages(&self) -> u32 {
        self.volumes.iter().map(Volume::pages).sum()
    }

    pub fn seasons(&self) -> &[Season] {
        self.seasons.as_deref().unwrap_or(&[])
    }

    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.seasons().iter().flat_map(|s| s.episodes.iter())
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.sagas.iter().flat_map(|s| s.arcs.iter())
    }
}
