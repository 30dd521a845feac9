use crate::themes::Theme;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Decoration placed either side of the application title.
pub const ACCENT: &str = "◆ ◇ ◆";

const TITLE: &str = " RENTAL TRIP DASHBOARD ";

/// Dashboard header rendering four lines:
///
/// 1. Application title between accents.
/// 2. An `=` separator as wide as the title line.
/// 3. `[ column label | input name ]`.
/// 4. An empty line.
pub struct Header<'a> {
    /// Label of the selected grouping column, e.g. "User Type".
    pub column_label: &'a str,
    /// Name of the loaded input (file name or "N files").
    pub source: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(column_label: &'a str, source: &'a str, theme: &'a Theme) -> Self {
        Self {
            column_label,
            source,
            theme,
        }
    }

    /// Display width of the title line in terminal columns.
    pub fn title_width() -> usize {
        ACCENT.width() * 2 + TITLE.width()
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(TITLE, self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(
                "=".repeat(Self::title_width()),
                self.theme.separator,
            )),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.column_label, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
