use serde::{Deserialize, Serialize};

use crate::dates::DateGrouping;
use crate::width::WidthMode;

/// Gradient used for color banding when the user has not picked one.
pub const DEFAULT_COLOR_STOPS: &[u32] = &[0x2e5eaa, 0x5fb49c, 0xf2c14e, 0xe4572e];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub unbounded_chapter_width: bool,
    /// Title key selected when none is given explicitly.
    pub title: Option<String>,
    pub date_grouping: DateGrouping,
    pub color_stops: Vec<u32>,
}

impl Settings {
    pub fn width_mode(&self) -> WidthMode {
        WidthMode::from_unbounded(self.unbounded_chapter_width)
    }

    pub fn merge(&mut self, other: Self) {
        self.unbounded_chapter_width = other.unbounded_chapter_width;
        if other.title.is_some() {
            self.title = other.title;
        }
        self.date_grouping = other.date_grouping;
        if other.color_stops.len() >= 2 {
            self.color_stops = other.color_stops;
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unbounded_chapter_width: false,
            title: None,
            date_grouping: DateGrouping::Month,
            color_stops: DEFAULT_COLOR_STOPS.to_vec(),
        }
    }
}

type Listener = Box<dyn Fn(&Settings)>;

/// Holds the current settings and notifies subscribers on every change.
#[derive(Default)]
pub struct SettingsStore {
    settings: Settings,
    listeners: Vec<Listener>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    pub fn subscribe(&mut self, listener: impl Fn(&Settings) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies `change` and notifies subscribers if anything changed.
    pub fn update(&mut self, change: impl FnOnce(&mut Settings)) {
        let before = self.settings.clone();
        change(&mut self.settings);
        if self.settings != before {
            for listener in &self.listeners {
                listener(&self.settings);
            }
        }
    }

    pub fn into_inner(self) -> Settings {
        self.settings
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
