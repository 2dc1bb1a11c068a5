// src/config/settings.rs
//! Optional `fc_ranking.toml` in the working directory.
//!
//! ```toml
//! endpoint = "http://127.0.0.1:5001/crawl"
//! store_dir = ".store"
//! timeout_secs = 900
//! html_out = "out/results_table.html"
//! export_out = "out/rankings.csv"
//! ```
//!
//! Every key is optional. A missing file means defaults; an unreadable or
//! invalid one also means defaults, and the CLI logs and prints a warning.

use std::{fs, io, path::{Path, PathBuf}};

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub store_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub html_out: Option<PathBuf>,
    pub export_out: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid settings in {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// A missing file is `Ok(defaults)`. Errors are for the caller to report
/// once logging is up; it falls back to defaults.
pub fn load(path: &Path) -> Result<Settings, SettingsError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => return Err(SettingsError::Read { path: path.to_path_buf(), source }),
    };
    parse(&text).map_err(|source| SettingsError::Parse { path: path.to_path_buf(), source })
}

pub fn parse(text: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(text)
}
