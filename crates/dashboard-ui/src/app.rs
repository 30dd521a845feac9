//! Application state and TUI event loop for the rental dashboard.
//!
//! [`App`] borrows the prepared trip table and owns the current selection
//! (cutoff year and grouping column). Every selection change reruns the
//! cumulative query synchronously.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::debug;

use dashboard_core::models::{AggregatedRow, GroupColumn};
use dashboard_data::aggregator::CumulativeAggregator;
use dashboard_data::preparation::TripTable;

use crate::chart_view::{self, ChartViewData};
use crate::components::column_selector::ColumnSelector;
use crate::components::header::Header;
use crate::components::year_slider::YearSlider;
use crate::table_view;
use crate::themes::Theme;

const HELP: &str = "←/→ year  Home/End bounds  Tab column  t chart/table  q quit";

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which body the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Grouped cumulative bar chart.
    Chart,
    /// Aggregated rows as a table with a totals row.
    Table,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Chart => ViewMode::Table,
            ViewMode::Table => ViewMode::Chart,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state.
pub struct App<'a> {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Input name shown in the header.
    pub source: String,
    pub should_quit: bool,
    table: &'a TripTable,
    year_bounds: Option<(i32, i32)>,
    selected_year: i32,
    column: GroupColumn,
    rows: Vec<AggregatedRow>,
    group_keys: Vec<String>,
}

impl<'a> App<'a> {
    /// Build the app and run the first query.
    ///
    /// `initial_year` is clamped into the table's year range; without one
    /// the slider starts at the earliest year.
    pub fn new(
        table: &'a TripTable,
        source: String,
        column: GroupColumn,
        initial_year: Option<i32>,
        view_mode: ViewMode,
        theme_name: &str,
    ) -> Self {
        let year_bounds = table.year_range();
        let selected_year = match (year_bounds, initial_year) {
            (Some((lo, hi)), Some(year)) => year.clamp(lo, hi),
            (Some((lo, _)), None) => lo,
            (None, year) => year.unwrap_or_default(),
        };

        let mut app = Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            source,
            should_quit: false,
            table,
            year_bounds,
            selected_year,
            column,
            rows: Vec::new(),
            group_keys: Vec::new(),
        };
        app.refresh();
        app
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn column(&self) -> GroupColumn {
        self.column
    }

    /// Result of the query for the current selection.
    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    /// Move the cutoff year to `year`, clamped to the table's range.
    pub fn set_year(&mut self, year: i32) {
        let Some((lo, hi)) = self.year_bounds else {
            return;
        };
        let year = year.clamp(lo, hi);
        if year != self.selected_year {
            self.selected_year = year;
            self.refresh();
        }
    }

    pub fn set_column(&mut self, column: GroupColumn) {
        if column != self.column {
            self.column = column;
            self.refresh();
        }
    }

    /// Apply one key press to the selection.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.set_year(self.selected_year.saturating_sub(1)),
            KeyCode::Right => self.set_year(self.selected_year.saturating_add(1)),
            KeyCode::Home => {
                if let Some((lo, _)) = self.year_bounds {
                    self.set_year(lo);
                }
            }
            KeyCode::End => {
                if let Some((_, hi)) = self.year_bounds {
                    self.set_year(hi);
                }
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down | KeyCode::Char('c') => {
                self.set_column(self.column.toggled());
            }
            KeyCode::Char('t') | KeyCode::Char('T') => self.view_mode = self.view_mode.toggled(),
            _ => {}
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// The terminal is restored even when drawing or input fails.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }
        }
        Ok(())
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw header, controls and the current body into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let Some((min_year, max_year)) = self.year_bounds else {
            table_view::render_no_data(frame, area, &self.theme);
            return;
        };

        let [header_area, selector_area, slider_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(area);

        let header = Header::new(self.column.label(), &self.source, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), header_area);

        let selector = ColumnSelector::new(self.column, &self.theme);
        frame.render_widget(Paragraph::new(selector.to_line()), selector_area);

        let slider = YearSlider::new(min_year, max_year, self.selected_year, &self.theme);
        frame.render_widget(Paragraph::new(slider.to_lines()), slider_area);

        let title = chart_view::chart_title(self.column, self.selected_year);
        match self.view_mode {
            ViewMode::Chart => {
                let data = ChartViewData {
                    rows: &self.rows,
                    column: self.column,
                    selected_year: self.selected_year,
                    group_keys: &self.group_keys,
                };
                chart_view::render_chart_view(frame, body_area, &data, &self.theme);
            }
            ViewMode::Table => {
                table_view::render_table_view(
                    frame,
                    body_area,
                    &title,
                    &self.rows,
                    self.column,
                    &self.theme,
                );
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(HELP, self.theme.dim))),
            help_area,
        );
    }

    fn refresh(&mut self) {
        self.rows = CumulativeAggregator::aggregate(self.table, self.selected_year, self.column);
        self.group_keys = self.table.group_values(self.column);
        debug!(
            year = self.selected_year,
            column = %self.column,
            rows = self.rows.len(),
            "query refreshed"
        );
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
