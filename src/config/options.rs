// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use super::settings::Settings;

/// Everything a command needs, resolved from defaults < settings file < CLI flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub store_dir: PathBuf,
    pub crawl: CrawlOptions,
    pub render: RenderOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(STORE_DIR),
            crawl: CrawlOptions::default(),
            render: RenderOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

impl AppOptions {
    /// Layer a settings file over the built-in defaults.
    /// `export_out` is left to [`ExportOptions::set_path`] once the export
    /// type is known; its meaning depends on it.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut opts = Self::default();
        if let Some(dir) = &settings.store_dir { opts.store_dir = dir.clone(); }
        if let Some(ep) = &settings.endpoint { opts.crawl.endpoint = ep.clone(); }
        if let Some(secs) = settings.timeout_secs { opts.crawl.timeout = Some(Duration::from_secs(secs)); }
        if let Some(out) = &settings.html_out { opts.render.out = out.clone(); }
        opts
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    pub endpoint: String,
    /// `None`: wait as long as the transport lets us.
    pub timeout: Option<Duration>,
    /// Write the results page right after a stored crawl.
    pub render_after: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self { endpoint: s!(DEFAULT_ENDPOINT), timeout: None, render_after: true }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub out: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { out: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_HTML_FILE) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportType {
    SingleFile,
    PerLeague,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub export_type: ExportType,
    pub(crate) out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            export_type: ExportType::SingleFile,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// Single file: `<dir>/<stem>.<ext>`. Per league: the directory.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        match self.export_type {
            ExportType::SingleFile => {
                let stem = self.out_path.file_stem.to_string_lossy();
                path.push(join!(&*stem, ".", self.format.ext()));
            }
            ExportType::PerLeague => { /* directory only */ }
        }
        path
    }

    /// Parse user text into dir + stem. A pasted extension is ignored; `format` decides it.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        match self.export_type {
            ExportType::SingleFile => {
                let p = Path::new(s);
                if let Some(parent) = p.parent() {
                    self.out_path.dir = parent.to_path_buf();
                }
                if let Some(stem) = p.file_stem() {
                    self.out_path.file_stem = stem.to_os_string();
                }
            }
            ExportType::PerLeague => {
                self.out_path.dir = PathBuf::from(s);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_EXPORT_FILE),
        }
    }
}
