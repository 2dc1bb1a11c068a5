// src/export.rs
//! Ranked tables to CSV/TSV.
//!
//! Single file: one `리그` column prepended, both leagues in display order.
//! Per league: one file per league in the target directory, named after the
//! league label.

use std::{collections::HashMap, io, path::PathBuf};

use crate::config::options::{ExportOptions, ExportType};
use crate::core::sanitize::sanitize_filename;
use crate::csv::to_export_string;
use crate::file::{ensure_directory, resolve_unique_filename, write_text};
use crate::progress::{FinishGuard, Progress};
use crate::ranking::{LeagueTable, COLUMNS};

pub const LEAGUE_COLUMN: &str = "리그";

/// Write the tables per `export`. Returns the files written, in order.
pub fn export_tables(
    export: &ExportOptions,
    tables: &[LeagueTable],
    progress: &mut dyn Progress,
) -> io::Result<Vec<PathBuf>> {
    let mut progress = FinishGuard::new(progress);
    let sep = export.format.delim();

    match export.export_type {
        ExportType::SingleFile => {
            progress.get().begin(1);
            let path = export.out_path();

            let mut headers = vec![LEAGUE_COLUMN];
            headers.extend(COLUMNS);
            let rows: Vec<Vec<String>> = tables
                .iter()
                .flat_map(|t| {
                    t.rows().iter().map(move |r| {
                        let mut cells = vec![t.league_name.clone()];
                        cells.extend(r.cells());
                        cells
                    })
                })
                .collect();

            write_text(&path, &to_export_string(&headers, &rows, export.include_headers, sep))?;
            logf!("exported {} row(s) to {}", rows.len(), path.display());
            progress.get().item_done(&path.to_string_lossy());
            Ok(vec![path])
        }
        ExportType::PerLeague => {
            progress.get().begin(tables.len());
            let dir = export.out_path();
            ensure_directory(&dir)?;

            let mut seen: HashMap<String, usize> = HashMap::new();
            let mut written = Vec::with_capacity(tables.len());
            for table in tables {
                let stem = sanitize_filename(&table.league_name, "league");
                let path = resolve_unique_filename(&dir, &stem, &mut seen, export.format.ext());
                let rows: Vec<Vec<String>> = table.rows().iter().map(|r| r.cells()).collect();

                write_text(&path, &to_export_string(&COLUMNS, &rows, export.include_headers, sep))?;
                logf!("exported {} row(s) to {}", rows.len(), path.display());
                progress.get().item_done(&path.to_string_lossy());
                written.push(path);
            }
            Ok(written)
        }
    }
}
