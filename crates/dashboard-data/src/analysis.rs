//! Startup pipeline: discover input files, read and prepare them.
//!
//! Produces the [`Dataset`] the dashboard queries for the rest of the run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use dashboard_core::error::Result;
use dashboard_core::models::PreparationReport;
use dashboard_core::timestamps::TimestampNormalizer;
use tracing::{info, warn};

use crate::preparation::{prepare, TripTable};
use crate::reader::{read_raw_trips, resolve_input_files};

// ── Public types ──────────────────────────────────────────────────────────────

/// The cleaned table plus what it took to build it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Cleaned, immutable trip table.
    pub table: TripTable,
    /// Row accounting across all input files.
    pub report: PreparationReport,
    /// Input files in the order they were loaded.
    pub files: Vec<PathBuf>,
    /// Wall-clock seconds spent reading and preparing.
    pub load_time_seconds: f64,
}

impl Dataset {
    /// Short name for the input, used in headers and titles.
    pub fn source_label(&self) -> String {
        match self.files.as_slice() {
            [single] => single
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| single.display().to_string()),
            files => format!("{} files", files.len()),
        }
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Load every input file under `data_path` and prepare one combined table.
///
/// Files are processed in sorted order and their rows concatenated. Rows with
/// an unparseable `started_at` are dropped and counted per file at `warn`.
pub fn load_dataset(data_path: &Path, normalizer: &TimestampNormalizer) -> Result<Dataset> {
    let start = Instant::now();
    let files = resolve_input_files(data_path)?;

    let mut records = Vec::new();
    let mut report = PreparationReport::default();
    for file in &files {
        let (table, mut file_report) = prepare(read_raw_trips(file)?, normalizer);
        file_report.files_loaded = 1;
        if file_report.rows_dropped > 0 {
            warn!(
                "Dropped {} of {} rows with unparseable started_at in {}",
                file_report.rows_dropped,
                file_report.rows_read,
                file.display()
            );
        }
        report.merge(&file_report);
        records.extend(table.into_records());
    }

    let load_time_seconds = start.elapsed().as_secs_f64();
    info!(
        files = report.files_loaded,
        rows = report.rows_retained,
        dropped = report.rows_dropped,
        seconds = load_time_seconds,
        "trip table ready"
    );

    Ok(Dataset {
        table: TripTable::from_records(records),
        report,
        files,
        load_time_seconds,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
