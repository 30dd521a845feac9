use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// Group key used for records whose categorical value is missing.
pub const UNKNOWN_GROUP: &str = "unknown";

/// Names of the columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "started_at",
    "rideable_type",
    "member_casual",
    "start_station_id",
    "end_station_id",
];

/// Categorical attribute a query can group trips by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupColumn {
    /// Bike category, e.g. `"electric_bike"` or `"classic_bike"`.
    RideableType,
    /// Rider category, e.g. `"member"` or `"casual"`.
    MemberCasual,
}

impl GroupColumn {
    /// Every selectable column, in selector order.
    pub const ALL: [GroupColumn; 2] = [GroupColumn::RideableType, GroupColumn::MemberCasual];

    /// Column name as it appears in the input header.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColumn::RideableType => "rideable_type",
            GroupColumn::MemberCasual => "member_casual",
        }
    }

    /// Human-readable label shown in the column selector.
    pub fn label(&self) -> &'static str {
        match self {
            GroupColumn::RideableType => "Rideable Type",
            GroupColumn::MemberCasual => "User Type",
        }
    }

    /// The other selectable column (the selector has exactly two entries).
    pub fn toggled(&self) -> Self {
        match self {
            GroupColumn::RideableType => GroupColumn::MemberCasual,
            GroupColumn::MemberCasual => GroupColumn::RideableType,
        }
    }
}

impl fmt::Display for GroupColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupColumn {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rideable_type" => Ok(GroupColumn::RideableType),
            "member_casual" => Ok(GroupColumn::MemberCasual),
            other => Err(DashboardError::InvalidColumn(other.to_string())),
        }
    }
}

/// One unprocessed row as read from an input file. Every field is text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTrip {
    pub started_at: Option<String>,
    pub rideable_type: Option<String>,
    pub member_casual: Option<String>,
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
}

/// A cleaned trip record.
///
/// `year` is computed from `started_at` when the record is built and cannot
/// be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRecord {
    started_at: NaiveDateTime,
    rideable_type: String,
    member_casual: String,
    start_station_id: Option<String>,
    end_station_id: Option<String>,
    year: i32,
}

impl TripRecord {
    /// Build a record, deriving `year` from `started_at`.
    ///
    /// Empty categorical values are stored as [`UNKNOWN_GROUP`].
    pub fn new(
        started_at: NaiveDateTime,
        rideable_type: impl Into<String>,
        member_casual: impl Into<String>,
        start_station_id: Option<String>,
        end_station_id: Option<String>,
    ) -> Self {
        Self {
            year: started_at.year(),
            started_at,
            rideable_type: category_or_unknown(rideable_type.into()),
            member_casual: category_or_unknown(member_casual.into()),
            start_station_id,
            end_station_id,
        }
    }

    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn rideable_type(&self) -> &str {
        &self.rideable_type
    }

    pub fn member_casual(&self) -> &str {
        &self.member_casual
    }

    pub fn start_station_id(&self) -> Option<&str> {
        self.start_station_id.as_deref()
    }

    pub fn end_station_id(&self) -> Option<&str> {
        self.end_station_id.as_deref()
    }

    /// Value of the given categorical column for this record.
    pub fn group_value(&self, column: GroupColumn) -> &str {
        match column {
            GroupColumn::RideableType => &self.rideable_type,
            GroupColumn::MemberCasual => &self.member_casual,
        }
    }

    /// Render the record back into its textual form.
    pub fn to_raw(&self) -> RawTrip {
        RawTrip {
            started_at: Some(format_started_at(&self.started_at)),
            rideable_type: Some(self.rideable_type.clone()),
            member_casual: Some(self.member_casual.clone()),
            start_station_id: self.start_station_id.clone(),
            end_station_id: self.end_station_id.clone(),
        }
    }
}

/// Timestamp text with the fractional second cut to its significant digits,
/// so `10:00:00.510` is written as `10:00:00.51`.
fn format_started_at(started_at: &NaiveDateTime) -> String {
    let mut text = started_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let nanos = started_at.nanosecond() % 1_000_000_000;
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text
}

fn category_or_unknown(value: String) -> String {
    if value.trim().is_empty() {
        UNKNOWN_GROUP.to_string()
    } else {
        value
    }
}

/// One output row of the cumulative aggregation query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedRow {
    /// Calendar year of the grouped trips.
    pub year: i32,
    /// Value of the selected categorical column.
    pub group_key: String,
    /// Number of trips with this `(year, group_key)`.
    pub count: u64,
    /// Running total of `count` for `group_key` over all years up to `year`.
    pub cumulative_count: u64,
}

/// Row accounting produced by data preparation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PreparationReport {
    /// Input files that contributed rows.
    pub files_loaded: usize,
    /// Raw rows seen before cleaning.
    pub rows_read: usize,
    /// Rows discarded because `started_at` could not be parsed.
    pub rows_dropped: usize,
    /// Rows kept in the cleaned table.
    pub rows_retained: usize,
}

impl PreparationReport {
    /// Fold another report (e.g. from a second file) into this one.
    pub fn merge(&mut self, other: &PreparationReport) {
        self.files_loaded += other.files_loaded;
        self.rows_read += other.rows_read;
        self.rows_dropped += other.rows_dropped;
        self.rows_retained += other.rows_retained;
    }
}
