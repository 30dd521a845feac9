//! Small line-oriented widgets composed by the chart and table views.

pub mod column_selector;
pub mod header;
pub mod year_slider;
