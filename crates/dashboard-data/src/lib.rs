//! Data layer for the rental trip dashboard.
//!
//! Discovers and reads trip CSV files, prepares the cleaned trip table,
//! answers the cumulative aggregation query and exports its results for
//! headless use.

pub mod aggregator;
pub mod analysis;
pub mod export;
pub mod preparation;
pub mod reader;

pub use dashboard_core as core;
