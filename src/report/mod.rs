//! Reporting utilities: tallies, calendar listings, and formatted output.

pub mod format;

pub use format::*;
