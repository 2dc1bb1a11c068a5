// src/log.rs
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::consts::LOG_FILE;
use crate::file::ensure_directory;

/// Route `logf!`/`logd!`/`loge!` into `<store_dir>/debug.log`.
/// Level comes from `RUST_LOG` (default `info`). Falls back to stderr when
/// the log file cannot be opened. Safe to call more than once.
pub fn init(store_dir: &Path) {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = ensure_directory(store_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(store_dir.join(LOG_FILE))
    });

    let _ = match file {
        Ok(f) => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(Mutex::new(f))
            .with_ansi(false)
            .with_target(false)
            .try_init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
    };
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
