use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::network::DEFAULT_BASE_URL;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    pub api_base_url: String,
    pub log_file: String,
    pub log_level: String,
    pub tick_rate_ms: u64,
    pub mouse: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            log_file: "~/.local/state/userdeck/userdeck.log".to_string(),
            log_level: "info".to_string(),
            tick_rate_ms: 200,
            mouse: true,
        }
    }
}

impl Settings {
    /// Layers, lowest priority first: built-in defaults, the user config,
    /// `userdeck.toml` in the working directory, then `explicit`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let user_config_path = get_user_config_path();
        if let Some(path) = &user_config_path {
            if !path.exists() {
                // Missing home or read-only config dir just means no user layer.
                if let Err(e) = write_default_config(path) {
                    tracing::warn!(path = %path.display(), error = %e, "could not create user config");
                }
            }
        }
        Self::load_from(user_config_path.as_deref(), explicit)
    }

    fn load_from(user_config: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("log_file", defaults.log_file)?
            .set_default("log_level", defaults.log_level)?
            .set_default("tick_rate_ms", defaults.tick_rate_ms)?
            .set_default("mouse", defaults.mouse)?;

        if let Some(path) = user_config {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(File::with_name("userdeck.toml").required(false));
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.build()?.try_deserialize()
    }

    /// `log_file` with a leading `~` expanded.
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.log_file).into_owned())
    }
}

pub fn get_user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("userdeck");
    path.push("userdeck.toml");
    Some(path)
}

pub fn write_default_config(path: &Path) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let doc = toml::to_string_pretty(&Settings::default())?;
    fs::write(path, doc)?;
    Ok(())
}
