//! Utility functions for date and number formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{format_date, format_date_long, format_percent, parse_date, rule};
