use crate::themes::Theme;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

const TRACK_CHAR: char = '─';
const MARK_CHAR: char = '┼';
const HANDLE_CHAR: char = '●';

/// Horizontal year slider with one mark per year in `[min_year, max_year]`.
///
/// Renders two lines: the year labels, with the selected one highlighted,
/// and a track whose handle sits under the selected year.
pub struct YearSlider<'a> {
    pub min_year: i32,
    pub max_year: i32,
    pub selected: i32,
    pub theme: &'a Theme,
}

impl<'a> YearSlider<'a> {
    pub fn new(min_year: i32, max_year: i32, selected: i32, theme: &'a Theme) -> Self {
        Self {
            min_year,
            max_year,
            selected,
            theme,
        }
    }

    /// Years shown on the slider, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.min_year..=self.max_year
    }

    /// Render the label line and the track line.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let mut labels = vec![Span::styled("Year ", self.theme.label)];
        let mut track = vec![Span::raw(" ".repeat("Year ".width()))];

        for year in self.years() {
            let label = format!(" {year} ");
            let cell_width = label.as_str().width();
            let before = cell_width / 2;
            let after = cell_width.saturating_sub(before + 1);

            if year == self.selected {
                labels.push(Span::styled(label, self.theme.slider_selected));
                track.push(Span::styled(
                    segment(before, HANDLE_CHAR, after),
                    self.theme.selector_active,
                ));
            } else {
                labels.push(Span::styled(label, self.theme.slider_mark));
                track.push(Span::styled(
                    segment(before, MARK_CHAR, after),
                    self.theme.slider_track,
                ));
            }
        }

        vec![Line::from(labels), Line::from(track)]
    }
}

fn segment(before: usize, marker: char, after: usize) -> String {
    let track = TRACK_CHAR.to_string();
    format!("{}{marker}{}", track.repeat(before), track.repeat(after))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
