// src/cli.rs
//! Command-line front end.
//!
//! ```text
//! fc_ranking crawl [--endpoint URL] [--timeout SECS] [--no-render] [-o PAGE]
//! fc_ranking render [-o PAGE]
//! fc_ranking export [--format csv|tsv] [--per-league] [--no-headers] [-o PATH]
//! fc_ranking import <FILE>
//! fc_ranking clear
//! ```
//!
//! Option precedence: built-in defaults < `fc_ranking.toml` < environment < flags.

use std::{fs, path::{Path, PathBuf}, time::Duration};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};

use crate::config::consts::{DEFAULT_HTML_FILE, SETTINGS_FILE};
use crate::config::options::{AppOptions, ExportFormat, ExportType};
use crate::config::settings::{self, Settings, SettingsError};
use crate::core::net::HttpTransport;
use crate::export::export_tables;
use crate::file::resolve_single_out_path;
use crate::model::CrawlBatch;
use crate::progress::Progress;
use crate::render::write_page;
use crate::results::ResultsView;
use crate::store::{clear_batch, save_batch, FileStore, Store};
use crate::trigger::{trigger_crawl, TriggerOutcome};

#[derive(Parser, Debug)]
#[command(name = "fc_ranking", version, about = "Trigger FC Online league crawls and rank the results")]
pub struct Cli {
    /// Directory holding the stored crawl batch
    #[arg(long, env = "FC_RANKING_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Settings file
    #[arg(long, default_value = SETTINGS_FILE, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask the crawl service for a fresh batch and store it
    Crawl {
        /// Crawl endpoint URL
        #[arg(long, env = "FC_RANKING_ENDPOINT")]
        endpoint: Option<String>,
        /// Give up after this many seconds (0 = wait as long as it takes)
        #[arg(long)]
        timeout: Option<u64>,
        /// Store only; skip writing the results page
        #[arg(long)]
        no_render: bool,
        /// Results page path (file or directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write the ranked results page from the stored batch
    Render {
        /// Results page path (file or directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write the ranked tables as CSV/TSV
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        /// One file per league instead of a single merged file
        #[arg(long)]
        per_league: bool,
        #[arg(long)]
        no_headers: bool,
        /// Output file (single) or directory (per league)
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Replace the stored batch with a saved `{results, last_updated}` JSON file
    Import { file: PathBuf },
    /// Forget the stored batch
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

/// Prints status lines to stderr; results go to stdout.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        eprintln!("  {label}");
    }
}

pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<()> {
    let (opts, settings_err) = resolve_options(&cli)?;
    crate::log::init(&opts.store_dir);
    if let Some(e) = settings_err {
        loge!("{e}; using defaults");
        eprintln!("warning: {e}; using defaults");
    }
    logd!("{opts:?}");

    let mut store = FileStore::new(&opts.store_dir);

    match cli.command {
        Command::Crawl { .. } => crawl(&opts, &mut store),
        Command::Render { .. } => render(&opts.render.out, &store),
        Command::Export { .. } => export(&opts, &store),
        Command::Import { file } => import(&file, &mut store),
        Command::Clear => {
            clear_batch(&mut store)?;
            println!("저장된 크롤링 데이터를 삭제했습니다.");
            Ok(())
        }
    }
}

/// Defaults, then the settings file, then whatever the command line says.
/// A settings file that cannot be used is handed back for reporting, not raised.
pub fn resolve_options(cli: &Cli) -> Result<(AppOptions, Option<SettingsError>)> {
    let (settings, settings_err) = match settings::load(&cli.config) {
        Ok(s) => (s, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    let mut opts = AppOptions::from_settings(&settings);
    if let Some(dir) = &cli.store {
        opts.store_dir = dir.clone();
    }

    match &cli.command {
        Command::Crawl { endpoint, timeout, no_render, out } => {
            if let Some(ep) = endpoint { opts.crawl.endpoint = ep.clone(); }
            match timeout {
                Some(0) => opts.crawl.timeout = None,
                Some(secs) => opts.crawl.timeout = Some(Duration::from_secs(*secs)),
                None => {}
            }
            opts.crawl.render_after = !no_render;
            if let Some(out) = out { opts.render.out = page_path(out)?; }
        }
        Command::Render { out } => {
            if let Some(out) = out { opts.render.out = page_path(out)?; }
        }
        Command::Export { format, per_league, no_headers, out } => {
            let export = &mut opts.export;
            export.format = (*format).into();
            export.include_headers = !no_headers;
            if *per_league {
                export.export_type = ExportType::PerLeague;
            }
            match (out, &settings.export_out) {
                (Some(out), _) => export.set_path(out),
                (None, Some(configured)) => export.set_path(&configured.to_string_lossy()),
                (None, None) => {}
            }
        }
        Command::Import { .. } | Command::Clear => {}
    }
    Ok((opts, settings_err))
}

fn page_path(out: &Path) -> Result<PathBuf> {
    resolve_single_out_path(Some(out), DEFAULT_HTML_FILE)
        .wrap_err_with(|| format!("invalid output path {}", out.display()))
}

fn crawl(opts: &AppOptions, store: &mut FileStore) -> Result<()> {
    let transport = HttpTransport::new(&opts.crawl.endpoint, opts.crawl.timeout);

    match trigger_crawl(&transport, store, &mut ConsoleProgress)? {
        TriggerOutcome::Stored { message, total, succeeded, failed, last_updated } => {
            println!("{message}");
            println!("총 {total}개 중 {succeeded}개 성공, {failed}개 실패.");
            if let Some(ts) = last_updated {
                println!("데이터 마지막 최신화: {ts}");
            }
            if opts.crawl.render_after {
                render(&opts.render.out, &*store)?;
            }
            Ok(())
        }
        TriggerOutcome::Rejected { message, details } => {
            if !details.is_empty() {
                eprintln!("실패 상세:");
            }
            for detail in &details {
                for line in detail.lines() {
                    eprintln!("  {line}");
                }
                eprintln!();
            }
            Err(eyre!("crawl rejected by the service: {message}"))
        }
    }
}

fn render(out: &Path, store: &dyn Store) -> Result<()> {
    let view = ResultsView::load(store)?;
    println!("{}", view.info_line());
    for line in view.summaries() {
        println!("{line}");
    }
    write_page(&view, out).wrap_err_with(|| format!("could not write {}", out.display()))?;
    println!("{}", out.display());
    Ok(())
}

fn export(opts: &AppOptions, store: &dyn Store) -> Result<()> {
    let view = ResultsView::load(store)?;
    if view == ResultsView::Missing {
        bail!("{}", view.info_line());
    }
    let written = export_tables(&opts.export, &view.tables(), &mut ConsoleProgress)
        .wrap_err("export failed")?;
    logf!("export finished: {} file(s)", written.len());
    Ok(())
}

fn import(file: &Path, store: &mut dyn Store) -> Result<()> {
    let text = fs::read_to_string(file).wrap_err_with(|| format!("could not read {}", file.display()))?;
    let batch: CrawlBatch = serde_json::from_str(&text)
        .wrap_err_with(|| format!("{} is not a results file", file.display()))?;
    save_batch(store, &batch)?;
    logf!("imported {} record(s) from {}", batch.results.len(), file.display());
    println!("총 {}개 중 {}개 성공, {}개 실패.", batch.results.len(), batch.succeeded(), batch.failed());
    Ok(())
}
