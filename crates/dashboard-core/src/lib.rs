//! Core types for the rental trip dashboard.
//!
//! Holds the error type, trip and aggregation models, timestamp cleanup,
//! command-line settings and number formatting shared by the data and UI
//! crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod timestamps;

pub use error::{DashboardError, Result};
