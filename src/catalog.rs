use eyre::{Result, WrapErr};
use std::collections::BTreeMap;
use std::{fs, path::Path};

use crate::error::TimelineError;
use crate::logging;
use crate::models::TimelineData;
use crate::settings::Settings;
use crate::timeline::Timeline;
use crate::validate::validate;

/// Every title available to the application, keyed by a short name such as
/// `one-piece`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    titles: BTreeMap<String, Timeline>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` file in `dir`, keyed by file stem.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut catalog = Self::new();
        if !dir.exists() {
            logging::info(format!("no titles directory at {}", dir.display()));
            return Ok(catalog);
        }

        let mut paths: Vec<_> = fs::read_dir(dir)
            .wrap_err_with(|| format!("reading {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let data = TimelineData::from_path(&path)?;
            catalog.insert(key, data);
        }
        logging::info(format!(
            "loaded {} title(s) from {}",
            catalog.len(),
            dir.display()
        ));
        Ok(catalog)
    }

    /// Adds a title, logging any dataset problems found on the way in.
    pub fn insert(&mut self, key: impl Into<String>, data: TimelineData) {
        let key = key.into();
        for issue in validate(&data) {
            logging::warn(format!("{key}: {issue}"));
        }
        logging::debug(format!(
            "{key}: {} volumes, {} chapters",
            data.volumes.len(),
            data.chapters().count()
        ));
        self.titles.insert(key, Timeline::new(data));
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.titles.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Result<&Timeline, TimelineError> {
        self.titles
            .get(key)
            .ok_or_else(|| TimelineError::UnknownTitle(key.to_string()))
    }

    /// The title named in settings, or the first one when none is set.
    pub fn selected(&self, settings: &Settings) -> Result<&Timeline, TimelineError> {
        match settings.title.as_deref() {
            Some(key) => self.get(key),
            None => self
                .titles
                .values()
                .next()
                .ok_or_else(|| TimelineError::UnknownTitle(String::new())),
        }
    }
}
