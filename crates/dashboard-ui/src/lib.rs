//! Terminal UI layer for the rental trip dashboard.
//!
//! Provides themes, the header, column selector and year slider components,
//! the cumulative chart and table views, and the application event loop
//! built on [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
