//! CSV discovery and loading for the rental dashboard.
//!
//! Input files are read through polars with schema inference disabled, so
//! every column (station identifiers included) arrives as text and is handed
//! to preparation as [`RawTrip`] rows.

use std::fs::File;
use std::path::{Path, PathBuf};

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{RawTrip, REQUIRED_COLUMNS};
use polars::prelude::*;
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Expand the configured input path into the list of files to load.
///
/// A file is used as-is (whatever its extension); a directory expands to
/// every CSV beneath it.
pub fn resolve_input_files(data_path: &Path) -> Result<Vec<PathBuf>> {
    if !data_path.exists() {
        return Err(DashboardError::DataPathNotFound(data_path.to_path_buf()));
    }
    if data_path.is_file() {
        return Ok(vec![data_path.to_path_buf()]);
    }

    let files = find_csv_files(data_path);
    if files.is_empty() {
        return Err(DashboardError::NoDataFiles(data_path.to_path_buf()));
    }
    Ok(files)
}

/// Read one CSV file into raw trip rows.
///
/// Only the required columns are extracted; any others are ignored. A
/// missing required column is an error, as is a file polars cannot parse.
pub fn read_raw_trips(path: &Path) -> Result<Vec<RawTrip>> {
    let frame = read_frame(path)?;

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|name| frame.get_column_index(name).is_none())
    {
        return Err(DashboardError::MissingColumn {
            column: missing.to_string(),
            path: path.to_path_buf(),
        });
    }

    let started_at = text_column(&frame, "started_at", path)?;
    let rideable_type = text_column(&frame, "rideable_type", path)?;
    let member_casual = text_column(&frame, "member_casual", path)?;
    let start_station_id = text_column(&frame, "start_station_id", path)?;
    let end_station_id = text_column(&frame, "end_station_id", path)?;

    let rows: Vec<RawTrip> = started_at
        .into_iter()
        .zip(rideable_type.into_iter())
        .zip(member_casual.into_iter())
        .zip(start_station_id.into_iter())
        .zip(end_station_id.into_iter())
        .map(|((((started, ride), member), start), end)| RawTrip {
            started_at: started.map(str::to_string),
            rideable_type: ride.map(str::to_string),
            member_casual: member.map(str::to_string),
            start_station_id: start.map(str::to_string),
            end_station_id: end.map(str::to_string),
        })
        .collect();

    debug!("File {}: {} rows read", path.display(), rows.len());
    Ok(rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Load `path` as a frame whose columns are all strings.
fn read_frame(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|source| DashboardError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

/// Borrow a column as text.
fn text_column<'a>(frame: &'a DataFrame, name: &str, path: &Path) -> Result<&'a StringChunked> {
    frame
        .column(name)
        .and_then(|column| column.str())
        .map_err(|source| DashboardError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
