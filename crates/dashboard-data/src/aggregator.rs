//! Cumulative per-year, per-group trip counts.
//!
//! The query is a pure function of the trip table, the cutoff year and the
//! grouping column; it is rerun from scratch for every selection change.

use std::collections::{BTreeMap, HashMap};

use dashboard_core::error::Result;
use dashboard_core::models::{AggregatedRow, GroupColumn};

use crate::preparation::TripTable;

// ── CumulativeAggregator ──────────────────────────────────────────────────────

/// Stateless helper that groups trips by year and category.
pub struct CumulativeAggregator;

impl CumulativeAggregator {
    /// Count trips per `(year, group)` for years up to and including
    /// `selected_year`, with a running total per group.
    ///
    /// Rows are ordered by ascending year, then ascending group key. A group
    /// that has no trips in a year produces no row for that year.
    pub fn aggregate(
        table: &TripTable,
        selected_year: i32,
        column: GroupColumn,
    ) -> Vec<AggregatedRow> {
        // BTreeMap keeps (year, group) pairs in output order.
        let mut counts: BTreeMap<(i32, &str), u64> = BTreeMap::new();
        for record in table.records() {
            if record.year() > selected_year {
                continue;
            }
            *counts
                .entry((record.year(), record.group_value(column)))
                .or_insert(0) += 1;
        }

        let mut running: HashMap<&str, u64> = HashMap::new();
        counts
            .into_iter()
            .map(|((year, group), count)| {
                let total = running.entry(group).or_insert(0);
                *total += count;
                AggregatedRow {
                    year,
                    group_key: group.to_string(),
                    count,
                    cumulative_count: *total,
                }
            })
            .collect()
    }

    /// Same as [`Self::aggregate`] but takes the column by name, rejecting
    /// anything other than `rideable_type` or `member_casual`.
    pub fn aggregate_by_name(
        table: &TripTable,
        selected_year: i32,
        column: &str,
    ) -> Result<Vec<AggregatedRow>> {
        let column: GroupColumn = column.parse()?;
        Ok(Self::aggregate(table, selected_year, column))
    }

    /// Sum of `count` over all rows, i.e. the number of trips in the window.
    pub fn total_count(rows: &[AggregatedRow]) -> u64 {
        rows.iter().map(|r| r.count).sum()
    }

    /// Latest cumulative total per group key, sorted by key.
    pub fn final_totals(rows: &[AggregatedRow]) -> Vec<(String, u64)> {
        let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
        for row in rows {
            // Rows are year-ascending, so the last write per key wins.
            totals.insert(&row.group_key, row.cumulative_count);
        }
        totals
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::error::DashboardError;
    use dashboard_core::models::TripRecord;

    fn trip(year: i32, ride: &str, member: &str) -> TripRecord {
        let started_at = NaiveDate::from_ymd_opt(year, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        TripRecord::new(started_at, ride, member, None, None)
    }

    fn row(year: i32, group: &str, count: u64, cumulative_count: u64) -> AggregatedRow {
        AggregatedRow {
            year,
            group_key: group.to_string(),
            count,
            cumulative_count,
        }
    }

    fn sample_table() -> TripTable {
        TripTable::from_records(vec![
            trip(2019, "electric_bike", "member"),
            trip(2019, "classic_bike", "casual"),
            trip(2020, "electric_bike", "member"),
            trip(2020, "electric_bike", "casual"),
            trip(2021, "classic_bike", "member"),
            trip(2021, "docked_bike", "casual"),
            trip(2022, "electric_bike", "member"),
        ])
    }

    #[test]
    fn test_three_row_scenario() {
        let table = TripTable::from_records(vec![
            trip(2019, "electric_bike", "member"),
            trip(2019, "classic_bike", "member"),
            trip(2020, "electric_bike", "member"),
        ]);

        let rows = CumulativeAggregator::aggregate(&table, 2020, GroupColumn::RideableType);
        assert_eq!(
            rows,
            vec![
                row(2019, "classic_bike", 1, 1),
                row(2019, "electric_bike", 1, 1),
                row(2020, "electric_bike", 1, 2),
            ]
        );
    }

    #[test]
    fn test_filter_excludes_later_years() {
        let rows = CumulativeAggregator::aggregate(&sample_table(), 2020, GroupColumn::RideableType);
        assert!(rows.iter().all(|r| r.year <= 2020));
        assert_eq!(CumulativeAggregator::total_count(&rows), 4);
    }

    #[test]
    fn test_cutoff_below_minimum_is_empty() {
        let rows = CumulativeAggregator::aggregate(&sample_table(), 2018, GroupColumn::MemberCasual);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_cutoff_above_maximum_includes_everything() {
        let table = sample_table();
        let rows = CumulativeAggregator::aggregate(&table, 2100, GroupColumn::MemberCasual);
        assert_eq!(CumulativeAggregator::total_count(&rows), table.len() as u64);
    }

    #[test]
    fn test_no_zero_filling_for_absent_groups() {
        let rows = CumulativeAggregator::aggregate(&sample_table(), 2022, GroupColumn::RideableType);
        // docked_bike only appears in 2021.
        let docked: Vec<&AggregatedRow> =
            rows.iter().filter(|r| r.group_key == "docked_bike").collect();
        assert_eq!(docked.len(), 1);
        assert_eq!(docked[0].year, 2021);
    }

    #[test]
    fn test_cumulative_restarts_per_group() {
        let rows = CumulativeAggregator::aggregate(&sample_table(), 2022, GroupColumn::MemberCasual);
        assert_eq!(
            rows,
            vec![
                row(2019, "casual", 1, 1),
                row(2019, "member", 1, 1),
                row(2020, "casual", 1, 2),
                row(2020, "member", 1, 2),
                row(2021, "casual", 1, 3),
                row(2021, "member", 1, 3),
                row(2022, "member", 1, 4),
            ]
        );
    }

    #[test]
    fn test_cumulative_is_running_sum_and_monotonic() {
        let table = sample_table();
        for column in GroupColumn::ALL {
            let rows = CumulativeAggregator::aggregate(&table, 2022, column);
            for group in table.group_values(column) {
                let mut expected = 0;
                for r in rows.iter().filter(|r| r.group_key == group) {
                    expected += r.count;
                    assert_eq!(r.cumulative_count, expected);
                    assert!(r.cumulative_count >= r.count);
                }
            }
        }
    }

    #[test]
    fn test_row_count_conservation() {
        let table = sample_table();
        for year in 2018..=2023 {
            let expected = table.records().iter().filter(|r| r.year() <= year).count() as u64;
            for column in GroupColumn::ALL {
                let rows = CumulativeAggregator::aggregate(&table, year, column);
                assert_eq!(CumulativeAggregator::total_count(&rows), expected);
            }
        }
    }

    #[test]
    fn test_aggregate_by_name_rejects_unknown_column() {
        let err = CumulativeAggregator::aggregate_by_name(&sample_table(), 2022, "start_station_id")
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidColumn(_)));
    }

    #[test]
    fn test_aggregate_by_name_matches_typed() {
        let table = sample_table();
        let by_name = CumulativeAggregator::aggregate_by_name(&table, 2021, "member_casual").unwrap();
        let typed = CumulativeAggregator::aggregate(&table, 2021, GroupColumn::MemberCasual);
        assert_eq!(by_name, typed);
    }

    #[test]
    fn test_final_totals() {
        let rows = CumulativeAggregator::aggregate(&sample_table(), 2022, GroupColumn::RideableType);
        assert_eq!(
            CumulativeAggregator::final_totals(&rows),
            vec![
                ("classic_bike".to_string(), 2),
                ("docked_bike".to_string(), 1),
                ("electric_bike".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_empty_table() {
        let rows = CumulativeAggregator::aggregate(&TripTable::default(), 2022, GroupColumn::RideableType);
        assert!(rows.is_empty());
        assert!(CumulativeAggregator::final_totals(&rows).is_empty());
    }
}
