// Runtime settings
//
// Layered with the `config` crate: built-in defaults, then an optional TOML file, then
// `QUESTIONNAIRE_*` environment variables (e.g. QUESTIONNAIRE_LOG_LEVEL=info).

use super::path_resolver;
use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_PREFIX: &str = "QUESTIONNAIRE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// error | warn | info | debug | trace
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            log_dir: None,
            export_dir: None,
        }
    }
}

impl Settings {
    /// Load settings. An explicit file must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => load_layers(Some((path, true)), ENV_PREFIX),
            None => {
                let default_file = path_resolver::default_config_file();
                load_layers(default_file.as_deref().map(|p| (p, false)), ENV_PREFIX)
            }
        }
    }

    /// Unknown levels fall back to `debug`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or(LevelFilter::Debug)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render settings as TOML")
    }
}

fn load_layers(file: Option<(&Path, bool)>, env_prefix: &str) -> Result<Settings> {
    let mut builder = config::Config::builder();
    if let Some((path, required)) = file {
        builder = builder.add_source(config::File::from(path.to_path_buf()).required(required));
    }
    builder = builder.add_source(config::Environment::with_prefix(env_prefix));

    let cfg = builder.build().context("Failed to load settings")?;
    cfg.try_deserialize::<Settings>()
        .context("Invalid settings")
}
