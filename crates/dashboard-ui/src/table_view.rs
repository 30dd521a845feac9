//! Tabular rendering of the aggregated rows.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per
//! aggregated row plus a highlighted totals row at the bottom.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use dashboard_core::formatting;
use dashboard_core::models::{AggregatedRow, GroupColumn};

use crate::themes::Theme;

/// Totals shown in the last row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTotals {
    /// Sum of `count` across all rows.
    pub trips: u64,
    /// Number of distinct years present.
    pub years: usize,
    /// Number of distinct group keys present.
    pub groups: usize,
}

impl TableTotals {
    pub fn from_rows(rows: &[AggregatedRow]) -> Self {
        let mut years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        years.dedup();
        let mut groups: Vec<&str> = rows.iter().map(|r| r.group_key.as_str()).collect();
        groups.sort_unstable();
        groups.dedup();
        Self {
            trips: rows.iter().map(|r| r.count).sum(),
            years: years.len(),
            groups: groups.len(),
        }
    }
}

/// Render the aggregated rows into `area`.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[AggregatedRow],
    column: GroupColumn,
    theme: &Theme,
) {
    let header_cells = ["Year", column.label(), "Trips", "Cumulative"]
        .into_iter()
        .map(|h| Cell::from(h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.year.to_string()),
                Cell::from(row.group_key.clone()),
                Cell::from(formatting::format_count(row.count)),
                Cell::from(formatting::format_count(row.cumulative_count)),
            ])
            .style(style)
        })
        .collect();

    let totals = TableTotals::from_rows(rows);
    let total_row = Row::new(vec![
        Cell::from("TOTAL"),
        Cell::from(format!("{} groups, {} years", totals.groups, totals.years)),
        Cell::from(formatting::format_count(totals.trips)),
        Cell::from(""),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(8),
        Constraint::Length(22),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Placeholder shown when the trip table has no rows at all.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No trip data found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the --data path and that started_at values parse.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Rental Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_rows() -> Vec<AggregatedRow> {
        vec![
            AggregatedRow {
                year: 2019,
                group_key: "casual".to_string(),
                count: 1_200,
                cumulative_count: 1_200,
            },
            AggregatedRow {
                year: 2019,
                group_key: "member".to_string(),
                count: 3_400,
                cumulative_count: 3_400,
            },
            AggregatedRow {
                year: 2020,
                group_key: "member".to_string(),
                count: 600,
                cumulative_count: 4_000,
            },
        ]
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ── Totals ────────────────────────────────────────────────────────────────

    #[test]
    fn test_table_totals_from_rows() {
        let totals = TableTotals::from_rows(&make_rows());
        assert_eq!(
            totals,
            TableTotals {
                trips: 5_200,
                years: 2,
                groups: 2,
            }
        );
    }

    #[test]
    fn test_table_totals_empty() {
        let totals = TableTotals::from_rows(&[]);
        assert_eq!(totals.trips, 0);
        assert_eq!(totals.years, 0);
        assert_eq!(totals.groups, 0);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_table_view_contents() {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        let theme = Theme::dark();
        let rows = make_rows();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(
                    frame,
                    area,
                    "Cumulative Data for member_casual in 2020",
                    &rows,
                    GroupColumn::MemberCasual,
                    &theme,
                );
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("User Type"));
        assert!(text.contains("3,400"));
        assert!(text.contains("4,000"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("5,200"));
    }

    #[test]
    fn test_render_table_view_empty_rows() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let theme = Theme::classic();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table_view(frame, area, "Empty", &[], GroupColumn::RideableType, &theme);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("TOTAL"));
    }

    #[test]
    fn test_render_no_data() {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, &theme);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("No trip data found"));
    }
}
