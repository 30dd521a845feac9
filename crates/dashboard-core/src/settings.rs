use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::GroupColumn;
use crate::timestamps::{TimestampNormalizer, DEFAULT_STRIP_PATTERN};

/// Environment variable consulted when `--data` is not given.
pub const DATA_PATH_ENV: &str = "RENTAL_DASHBOARD_DATA";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive cumulative trip dashboard for bike-rental exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rental-dashboard",
    about = "Interactive cumulative trip dashboard for bike-rental exports",
    version
)]
pub struct Settings {
    /// Trip CSV file, or a directory searched recursively for *.csv files
    #[arg(long, env = DATA_PATH_ENV)]
    pub data: Option<PathBuf>,

    /// Column to group trips by
    #[arg(long, default_value = "rideable_type", value_parser = ["rideable_type", "member_casual"])]
    pub column: String,

    /// Initial cutoff year (defaults to the earliest year in the data)
    #[arg(long)]
    pub year: Option<i32>,

    /// View mode
    #[arg(long, default_value = "chart", value_parser = ["chart", "table", "json", "csv"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Regex removed from started_at values before parsing
    #[arg(long, default_value = DEFAULT_STRIP_PATTERN)]
    pub strip_pattern: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Typed grouping column.
    pub fn group_column(&self) -> Result<GroupColumn> {
        self.column.parse()
    }

    /// Timestamp normalizer built from `--strip-pattern`.
    pub fn normalizer(&self) -> Result<TimestampNormalizer> {
        TimestampNormalizer::new(&self.strip_pattern)
    }

    /// `true` for the views that take over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self.view.as_str(), "chart" | "table")
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["rental-dashboard"]);

        assert_eq!(settings.column, "rideable_type");
        assert!(settings.year.is_none());
        assert_eq!(settings.view, "chart");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.strip_pattern, r"\.510");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_column_and_year() {
        let settings = Settings::parse_from([
            "rental-dashboard",
            "--column",
            "member_casual",
            "--year",
            "2021",
        ]);
        assert_eq!(settings.group_column().unwrap(), GroupColumn::MemberCasual);
        assert_eq!(settings.year, Some(2021));
    }

    #[test]
    fn test_settings_cli_rejects_unknown_column() {
        let result = Settings::try_parse_from(["rental-dashboard", "--column", "start_station_id"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_cli_data_path() {
        let settings = Settings::parse_from(["rental-dashboard", "--data", "/tmp/trips.csv"]);
        assert_eq!(settings.data, Some(PathBuf::from("/tmp/trips.csv")));
    }

    #[test]
    fn test_settings_data_path_env_binding() {
        use clap::CommandFactory;

        let command = Settings::command();
        let data = command
            .get_arguments()
            .find(|arg| arg.get_id() == "data")
            .unwrap();
        assert_eq!(data.get_env(), Some(std::ffi::OsStr::new(DATA_PATH_ENV)));
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings = Settings::load_from_args(["rental-dashboard", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_interactive_views() {
        let chart = Settings::parse_from(["rental-dashboard"]);
        assert!(chart.is_interactive());

        let table = Settings::parse_from(["rental-dashboard", "--view", "table"]);
        assert!(table.is_interactive());

        let json = Settings::parse_from(["rental-dashboard", "--view", "json"]);
        assert!(!json.is_interactive());
    }

    #[test]
    fn test_settings_invalid_strip_pattern() {
        let settings = Settings::parse_from(["rental-dashboard", "--strip-pattern", "[oops"]);
        assert!(settings.normalizer().is_err());
    }
}
