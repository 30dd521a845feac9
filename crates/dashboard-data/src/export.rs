//! Headless output of aggregation results as JSON or CSV.
//!
//! Both formats use the keys `year`, the selected column's name,
//! `count` and `cumulative_count`, in that order.

use std::io::Write;

use dashboard_core::error::Result;
use dashboard_core::models::{AggregatedRow, GroupColumn};
use polars::prelude::*;
use serde_json::{Map, Value};

/// Build one JSON object per row, keyed by the selected column's name.
pub fn rows_to_json(rows: &[AggregatedRow], column: GroupColumn) -> Value {
    let items = rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            object.insert("year".to_string(), Value::from(row.year));
            object.insert(column.as_str().to_string(), Value::from(row.group_key.clone()));
            object.insert("count".to_string(), Value::from(row.count));
            object.insert(
                "cumulative_count".to_string(),
                Value::from(row.cumulative_count),
            );
            Value::Object(object)
        })
        .collect();
    Value::Array(items)
}

/// Pretty-print rows as a JSON array into `writer`.
pub fn write_json<W: Write>(rows: &[AggregatedRow], column: GroupColumn, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &rows_to_json(rows, column))?;
    writeln!(writer)?;
    Ok(())
}

/// Lay rows out as a four-column frame.
pub fn rows_to_frame(rows: &[AggregatedRow], column: GroupColumn) -> Result<DataFrame> {
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    let groups: Vec<&str> = rows.iter().map(|r| r.group_key.as_str()).collect();
    let counts: Vec<u64> = rows.iter().map(|r| r.count).collect();
    let cumulative: Vec<u64> = rows.iter().map(|r| r.cumulative_count).collect();

    let frame = df!(
        "year" => years,
        column.as_str() => groups,
        "count" => counts,
        "cumulative_count" => cumulative,
    )?;
    Ok(frame)
}

/// Write rows as CSV with a header line into `writer`.
pub fn write_csv<W: Write>(rows: &[AggregatedRow], column: GroupColumn, writer: &mut W) -> Result<()> {
    let mut frame = rows_to_frame(rows, column)?;
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(())
}
