use dashboard_core::models::GroupColumn;
use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Single-choice selector over the grouping columns.
pub struct ColumnSelector<'a> {
    pub selected: GroupColumn,
    pub theme: &'a Theme,
}

impl<'a> ColumnSelector<'a> {
    pub fn new(selected: GroupColumn, theme: &'a Theme) -> Self {
        Self { selected, theme }
    }

    /// `Group by: (•) Rideable Type   ( ) User Type`
    pub fn to_line(&self) -> Line<'a> {
        let mut spans = vec![Span::styled("Group by: ", self.theme.label)];
        for (i, column) in GroupColumn::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            let (marker, style) = if *column == self.selected {
                ("(•) ", self.theme.selector_active)
            } else {
                ("( ) ", self.theme.selector_inactive)
            };
            spans.push(Span::styled(format!("{marker}{}", column.label()), style));
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_marks_selected_column() {
        let theme = Theme::dark();
        let line = ColumnSelector::new(GroupColumn::MemberCasual, &theme).to_line();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Group by: ( ) Rideable Type   (•) User Type");
        assert_eq!(line.spans[3].style, theme.selector_active);
        assert_eq!(line.spans[1].style, theme.selector_inactive);
    }
}
