//! Data preparation: turns raw rows into the cleaned, immutable trip table.
//!
//! `started_at` is cleaned and parsed by a [`TimestampNormalizer`]; rows that
//! do not survive parsing are dropped and counted in the
//! [`PreparationReport`]. Everything else about a row is kept as text.

use std::collections::BTreeSet;

use dashboard_core::models::{GroupColumn, PreparationReport, RawTrip, TripRecord};
use dashboard_core::timestamps::TimestampNormalizer;
use tracing::debug;

// ── TripTable ─────────────────────────────────────────────────────────────────

/// Cleaned trip records. Built once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripTable {
    records: Vec<TripRecord>,
}

impl TripTable {
    /// Wrap already-cleaned records.
    pub fn from_records(records: Vec<TripRecord>) -> Self {
        Self { records }
    }

    /// Take the records out, e.g. to concatenate several tables.
    pub fn into_records(self) -> Vec<TripRecord> {
        self.records
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest observed years, or `None` for an empty table.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().map(TripRecord::year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Distinct values of `column`, sorted.
    pub fn group_values(&self, column: GroupColumn) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.group_value(column))
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Render every record back into raw text form.
    pub fn to_raw(&self) -> Vec<RawTrip> {
        self.records.iter().map(TripRecord::to_raw).collect()
    }
}

// ── Preparation ───────────────────────────────────────────────────────────────

/// Clean `rows` into a [`TripTable`].
///
/// The returned report has `files_loaded == 0`; callers loading from disk
/// fill that in.
pub fn prepare<I>(rows: I, normalizer: &TimestampNormalizer) -> (TripTable, PreparationReport)
where
    I: IntoIterator<Item = RawTrip>,
{
    let mut report = PreparationReport::default();
    let mut records = Vec::new();

    for row in rows {
        report.rows_read += 1;
        match clean_row(row, normalizer) {
            Some(record) => records.push(record),
            None => report.rows_dropped += 1,
        }
    }
    report.rows_retained = records.len();

    debug!(
        "Prepared {} rows: {} retained, {} dropped",
        report.rows_read, report.rows_retained, report.rows_dropped
    );

    (TripTable::from_records(records), report)
}

/// Convert one raw row, or `None` when `started_at` is missing or unparseable.
fn clean_row(row: RawTrip, normalizer: &TimestampNormalizer) -> Option<TripRecord> {
    let started_at = normalizer.normalize(row.started_at.as_deref()?)?;
    Some(TripRecord::new(
        started_at,
        row.rideable_type.unwrap_or_default(),
        row.member_casual.unwrap_or_default(),
        row.start_station_id,
        row.end_station_id,
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
