use std::io::Write;
use std::path::{Path, PathBuf};

use dashboard_data::aggregator::CumulativeAggregator;
use dashboard_data::analysis::load_dataset;
use dashboard_data::core::models::GroupColumn;
use dashboard_data::core::timestamps::TimestampNormalizer;
use dashboard_data::export::write_csv;
use tempfile::TempDir;

const HEADER: &str =
    "ride_id,rideable_type,started_at,ended_at,start_station_id,end_station_id,member_casual";

fn write_file(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

fn fixture(dir: &Path) -> PathBuf {
    write_file(
        dir,
        "daily_rent_detail.csv",
        &[
            HEADER,
            "R1,electric_bike,2019-04-02 07:15:00,2019-04-02 07:30:00,31000,31001,member",
            "R2,classic_bike,2019-07-12 18:00:00.510,2019-07-12 18:20:00,31002,31003,casual",
            "R3,electric_bike,2020-01-05 09:00:00,2020-01-05 09:10:00,TA1307000039,31001,member",
            "R4,docked_bike,2020-08-20 12:00:00,2020-08-20 12:45:00,,,casual",
            "R5,electric_bike,garbage,2021-02-01 10:00:00,31000,31001,member",
            "R6,classic_bike,2021-03-15 16:30:00.510,2021-03-15 16:55:00,31005,31006,member",
            "R7,,2022-06-01 06:00:00,2022-06-01 06:30:00,31007,31008,",
        ],
    )
}

#[test]
fn test_full_pipeline_counts() {
    let dir = TempDir::new().unwrap();
    let path = fixture(dir.path());

    let dataset = load_dataset(&path, &TimestampNormalizer::default()).unwrap();
    assert_eq!(dataset.report.rows_read, 7);
    assert_eq!(dataset.report.rows_dropped, 1);
    assert_eq!(dataset.table.year_range(), Some((2019, 2022)));

    let rows = CumulativeAggregator::aggregate(&dataset.table, 2020, GroupColumn::RideableType);
    let summary: Vec<(i32, &str, u64, u64)> = rows
        .iter()
        .map(|r| (r.year, r.group_key.as_str(), r.count, r.cumulative_count))
        .collect();
    assert_eq!(
        summary,
        vec![
            (2019, "classic_bike", 1, 1),
            (2019, "electric_bike", 1, 1),
            (2020, "docked_bike", 1, 1),
            (2020, "electric_bike", 1, 2),
        ]
    );
}

#[test]
fn test_pipeline_unknown_group_preserves_totals() {
    let dir = TempDir::new().unwrap();
    let path = fixture(dir.path());
    let dataset = load_dataset(&path, &TimestampNormalizer::default()).unwrap();

    for column in GroupColumn::ALL {
        let rows = CumulativeAggregator::aggregate(&dataset.table, 2022, column);
        assert_eq!(
            CumulativeAggregator::total_count(&rows),
            dataset.report.rows_retained as u64
        );
        assert!(rows.iter().any(|r| r.year == 2022 && r.group_key == "unknown"));
    }
}

#[test]
fn test_pipeline_csv_export() {
    let dir = TempDir::new().unwrap();
    let path = fixture(dir.path());
    let dataset = load_dataset(&path, &TimestampNormalizer::default()).unwrap();

    let rows = CumulativeAggregator::aggregate(&dataset.table, 2019, GroupColumn::MemberCasual);
    let mut out = Vec::new();
    write_csv(&rows, GroupColumn::MemberCasual, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec![
            "year,member_casual,count,cumulative_count",
            "2019,casual,1,1",
            "2019,member,1,1",
        ]
    );
}
