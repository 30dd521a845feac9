use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// Spurious fractional-second text found in exported `started_at` values.
pub const DEFAULT_STRIP_PATTERN: &str = r"\.510";

/// Naive date-time layouts accepted after cleanup, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts; the time defaults to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

// ── TimestampNormalizer ───────────────────────────────────────────────────────

/// Cleans and parses raw `started_at` text.
///
/// Every match of the strip pattern is removed before parsing. Values that
/// still fail to parse yield `None`; callers drop those rows.
#[derive(Debug, Clone)]
pub struct TimestampNormalizer {
    strip: Regex,
}

impl TimestampNormalizer {
    /// Build a normalizer that removes every match of `pattern`.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            strip: Regex::new(pattern)?,
        })
    }

    /// The cleanup pattern in use.
    pub fn pattern(&self) -> &str {
        self.strip.as_str()
    }

    /// Strip spurious text from `raw` and parse what remains.
    pub fn normalize(&self, raw: &str) -> Option<NaiveDateTime> {
        let cleaned = self.strip.replace_all(raw, "");
        let parsed = parse_timestamp(&cleaned);
        if parsed.is_none() {
            debug!("unparseable started_at value \"{}\"", raw);
        }
        parsed
    }
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self {
            strip: Regex::new(DEFAULT_STRIP_PATTERN).expect("default strip pattern is valid"),
        }
    }
}

/// Parse a timestamp string into a naive wall-clock date-time.
///
/// RFC 3339 values keep their local wall-clock time; the offset is discarded
/// so the derived year matches what the export shows.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
