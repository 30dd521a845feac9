use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark, 7–15 light. Missing or unparseable values yield
/// `BackgroundType::Dark`.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    pub warning: Style,

    // ── Controls ─────────────────────────────────────────────────────────────
    /// Year labels that are not selected.
    pub slider_mark: Style,
    /// The selected year label and its marker on the track.
    pub slider_selected: Style,
    pub slider_track: Style,
    pub selector_active: Style,
    pub selector_inactive: Style,

    // ── Chart ────────────────────────────────────────────────────────────────
    pub chart_title: Style,
    pub chart_border: Style,
    pub bar_value: Style,
    /// Colours assigned to group keys, in legend order.
    pub series: Vec<Color>,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Yellow),

            slider_mark: Style::default().fg(Color::Gray),
            slider_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            slider_track: Style::default().fg(Color::DarkGray),
            selector_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selector_inactive: Style::default().fg(Color::Gray),

            chart_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            chart_border: Style::default().fg(Color::DarkGray),
            bar_value: Style::default().fg(Color::Black),
            series: vec![
                Color::Cyan,
                Color::Magenta,
                Color::Green,
                Color::Yellow,
                Color::Blue,
                Color::Red,
                Color::LightCyan,
                Color::LightMagenta,
            ],

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Dark text and saturated accents so bars stay legible on a light canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Red),

            slider_mark: Style::default().fg(Color::DarkGray),
            slider_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            slider_track: Style::default().fg(Color::Gray),
            selector_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            selector_inactive: Style::default().fg(Color::DarkGray),

            chart_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            chart_border: Style::default().fg(Color::Gray),
            bar_value: Style::default().fg(Color::White),
            series: vec![
                Color::Blue,
                Color::Magenta,
                Color::Green,
                Color::Red,
                Color::Cyan,
                Color::Yellow,
                Color::DarkGray,
                Color::LightBlue,
            ],

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette, no bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            warning: Style::default().fg(Color::Yellow),

            slider_mark: Style::default().fg(Color::White),
            slider_selected: Style::default().fg(Color::Black).bg(Color::White),
            slider_track: Style::default().fg(Color::DarkGray),
            selector_active: Style::default().fg(Color::Cyan),
            selector_inactive: Style::default().fg(Color::White),

            chart_title: Style::default().fg(Color::White),
            chart_border: Style::default().fg(Color::DarkGray),
            bar_value: Style::default().fg(Color::Black),
            series: vec![
                Color::Cyan,
                Color::Magenta,
                Color::Green,
                Color::Yellow,
                Color::Blue,
                Color::Red,
            ],

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Colour for the `index`-th group key, cycling through the palette.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return Color::Reset;
        }
        self.series[index % self.series.len()]
    }

    /// Bar style for the `index`-th group key.
    pub fn series_style(&self, index: usize) -> Style {
        Style::default().fg(self.series_color(index))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.slider_selected.bg, Some(Color::Cyan));
        assert_eq!(t.table_total.fg, Some(Color::Yellow));
        assert!(!t.series.is_empty());
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.selector_active.add_modifier.contains(Modifier::BOLD));
        assert!(!t.table_total.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert!(!Theme::from_name("classic")
            .header
            .add_modifier
            .contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("neon");
        assert!(t.header.fg.is_some());
    }

    // ── series palette ───────────────────────────────────────────────────────

    #[test]
    fn test_series_color_cycles() {
        let t = Theme::dark();
        let n = t.series.len();
        assert_eq!(t.series_color(0), t.series_color(n));
        assert_ne!(t.series_color(0), t.series_color(1));
    }

    #[test]
    fn test_series_style_uses_palette() {
        let t = Theme::classic();
        assert_eq!(t.series_style(2).fg, Some(Color::Green));
    }

    #[test]
    fn test_series_color_empty_palette() {
        let mut t = Theme::dark();
        t.series.clear();
        assert_eq!(t.series_color(3), Color::Reset);
    }
}
