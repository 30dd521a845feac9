mod bootstrap;

use std::io::{self, Write};

use anyhow::{Context, Result};
use dashboard_core::models::GroupColumn;
use dashboard_core::settings::{Settings, DATA_PATH_ENV};
use dashboard_data::aggregator::CumulativeAggregator;
use dashboard_data::analysis::{load_dataset, Dataset};
use dashboard_data::export;
use dashboard_ui::app::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load();

    let app_dir = bootstrap::ensure_directories()?;
    // Interactive views own the terminal, so their logs go to a file.
    let log_file = settings.log_file.clone().or_else(|| {
        settings
            .is_interactive()
            .then(|| bootstrap::default_log_file(&app_dir))
    });
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Rental Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Column: {}, View: {}, Theme: {}",
        settings.column,
        settings.view,
        settings.theme
    );

    let column = settings.group_column()?;
    let normalizer = settings.normalizer()?;

    let cwd = std::env::current_dir()?;
    let data_path = bootstrap::discover_data_path(settings.data.as_deref(), &cwd).with_context(
        || {
            format!(
                "No trip data found: pass --data, set {DATA_PATH_ENV}, or place {} in the working directory",
                bootstrap::DEFAULT_DATA_FILE
            )
        },
    )?;
    tracing::info!("Loading trips from {}", data_path.display());

    let dataset = load_dataset(&data_path, &normalizer)?;

    match settings.view.as_str() {
        "chart" | "table" => {
            let view_mode = if settings.view == "table" {
                ViewMode::Table
            } else {
                ViewMode::Chart
            };
            let app = App::new(
                &dataset.table,
                dataset.source_label(),
                column,
                settings.year,
                view_mode,
                &settings.theme,
            );
            app.run()?;
        }

        "json" | "csv" => write_headless(&settings, &dataset, column)?,

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}

/// Run one query and print its rows to stdout.
///
/// Without `--year` the cutoff is the latest observed year, so the output
/// covers the whole table.
fn write_headless(settings: &Settings, dataset: &Dataset, column: GroupColumn) -> Result<()> {
    let year = settings
        .year
        .or_else(|| dataset.table.year_range().map(|(_, max)| max))
        .unwrap_or_default();
    let rows = CumulativeAggregator::aggregate(&dataset.table, year, column);
    tracing::info!("Writing {} rows for {} up to {}", rows.len(), column, year);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if settings.view == "csv" {
        export::write_csv(&rows, column, &mut out)?;
    } else {
        export::write_json(&rows, column, &mut out)?;
    }
    out.flush()?;
    Ok(())
}
