//! Cumulative bar chart for the rental dashboard.
//!
//! One bar group per year; within a group, one bar per group key whose
//! height is that key's cumulative count. Key colours come from the
//! position of the key in the full, sorted list of keys for the column, so
//! a key keeps its colour as the selected year changes.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use dashboard_core::formatting;
use dashboard_core::models::{AggregatedRow, GroupColumn};

use crate::themes::Theme;

const MAX_BAR_WIDTH: u16 = 9;
const BAR_GAP: u16 = 1;
const GROUP_GAP: u16 = 3;

/// Everything the chart needs for one render.
pub struct ChartViewData<'a> {
    pub rows: &'a [AggregatedRow],
    pub column: GroupColumn,
    pub selected_year: i32,
    /// Every distinct key of `column` in the table, sorted.
    pub group_keys: &'a [String],
}

/// `Cumulative Data for {column} in {year}`
pub fn chart_title(column: GroupColumn, selected_year: i32) -> String {
    format!("Cumulative Data for {} in {}", column.as_str(), selected_year)
}

/// Build the legend line: a coloured block and the key name per group key,
/// each entry padded to the widest key.
pub fn legend_line<'a>(group_keys: &'a [String], theme: &Theme) -> Line<'a> {
    let widest = group_keys
        .iter()
        .map(|k| k.as_str().width())
        .max()
        .unwrap_or(0);

    let mut spans = Vec::with_capacity(group_keys.len() * 2);
    for (i, key) in group_keys.iter().enumerate() {
        spans.push(Span::styled("■ ", theme.series_style(i)));
        let padding = widest - key.as_str().width() + 2;
        spans.push(Span::styled(
            format!("{key}{}", " ".repeat(padding)),
            theme.label,
        ));
    }
    Line::from(spans)
}

/// Group rows by year, preserving the ascending year order of `rows`.
fn rows_by_year(rows: &[AggregatedRow]) -> Vec<(i32, Vec<&AggregatedRow>)> {
    let mut groups: Vec<(i32, Vec<&AggregatedRow>)> = Vec::new();
    for row in rows {
        match groups.last_mut() {
            Some((year, members)) if *year == row.year => members.push(row),
            _ => groups.push((row.year, vec![row])),
        }
    }
    groups
}

/// Widest bar that lets every group fit in `available` columns.
fn bar_width(available: u16, groups: usize, bars_per_group: usize) -> u16 {
    if groups == 0 || bars_per_group == 0 {
        return 1;
    }
    let groups = groups as u16;
    let bars = bars_per_group as u16;
    let gaps = GROUP_GAP.saturating_mul(groups.saturating_sub(1))
        + BAR_GAP.saturating_mul(groups.saturating_mul(bars.saturating_sub(1)));
    let per_bar = available.saturating_sub(gaps) / groups.saturating_mul(bars).max(1);
    per_bar.clamp(1, MAX_BAR_WIDTH)
}

/// Render the chart with its title and legend into `area`.
pub fn render_chart_view(frame: &mut Frame, area: Rect, data: &ChartViewData, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(
            format!(" {} ", chart_title(data.column, data.selected_year)),
            theme.chart_title,
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [legend_area, chart_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
    frame.render_widget(Paragraph::new(legend_line(data.group_keys, theme)), legend_area);

    let by_year = rows_by_year(data.rows);
    let widest_group = by_year.iter().map(|(_, g)| g.len()).max().unwrap_or(0);
    let width = bar_width(chart_area.width, by_year.len(), widest_group);

    let mut chart = BarChart::default()
        .bar_width(width)
        .bar_gap(BAR_GAP)
        .group_gap(GROUP_GAP);

    for (year, members) in &by_year {
        let bars: Vec<Bar> = members
            .iter()
            .map(|row| {
                let index = data
                    .group_keys
                    .iter()
                    .position(|k| *k == row.group_key)
                    .unwrap_or(0);
                Bar::default()
                    .value(row.cumulative_count)
                    .text_value(formatting::format_compact(row.cumulative_count))
                    .style(theme.series_style(index))
                    .value_style(theme.bar_value.bg(theme.series_color(index)))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(year.to_string()))
                .bars(&bars),
        );
    }

    frame.render_widget(chart, chart_area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
