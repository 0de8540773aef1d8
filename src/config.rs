use crate::logging;
use crate::settings::Settings;
use eyre::Result;
use std::{fs, path::PathBuf};

pub const APP_NAME: &str = "serial-timeline";

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    filepath: PathBuf,
}

impl Config {
    /// Loads `configuration.json` from the app data directory, writing the
    /// defaults there on first run.
    pub fn new() -> Result<Self> {
        let prefix = get_app_data_prefix()?;
        let filepath = prefix.join("configuration.json");
        let existed = filepath.exists();
        let config = Self::load_from(filepath)?;
        if !existed {
            config.save()?;
        }
        Ok(config)
    }

    /// Load configuration from a custom path
    pub fn load_from(filepath: PathBuf) -> Result<Self> {
        let mut settings = Settings::default();

        if filepath.exists() {
            let config_str = fs::read_to_string(&filepath)?;
            match serde_json::from_str::<serde_json::Value>(&config_str) {
                Ok(user_config) => {
                    if let Some(section) = user_config.get("Setting") {
                        match serde_json::from_value::<Settings>(section.clone()) {
                            Ok(user_settings) => settings.merge(user_settings),
                            Err(err) => logging::warn(format!(
                                "ignoring settings in {}: {}",
                                filepath.display(),
                                err
                            )),
                        }
                    }
                }
                Err(err) => logging::warn(format!(
                    "{} is not valid JSON, using defaults: {}",
                    filepath.display(),
                    err
                )),
            }
        }

        Ok(Self { settings, filepath })
    }

    /// Get the configuration file path
    pub fn filepath(&self) -> &PathBuf {
        &self.filepath
    }

    /// Directory holding one `<title>.json` dataset per title.
    pub fn titles_dir(&self) -> PathBuf {
        self.filepath
            .parent()
            .map(|p| p.join("titles"))
            .unwrap_or_else(|| PathBuf::from("titles"))
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let config_json = serde_json::json!({
            "Setting": self.settings,
        });

        let config_str = serde_json::to_string_pretty(&config_json)?;

        if let Some(parent) = self.filepath.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.filepath, config_str)?;
        logging::debug(format!("saved configuration to {}", self.filepath.display()));
        Ok(())
    }
}

pub fn get_app_data_prefix() -> Result<PathBuf> {
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(config_home).join(APP_NAME));
    } else if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".config").join(APP_NAME));
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        return Ok(PathBuf::from(user_profile).join(format!(".{APP_NAME}")));
    }

    Err(eyre::eyre!(
        "Could not determine application data directory"
    ))
}
