//! `holiday-crime` library crate.
//!
//! The binary (`hc`) is a thin wrapper around this library so that:
//!
//! - the transforms are testable without spawning processes
//! - they can be called directly from other tools over in-memory rows
//!
//! The three per-row transforms live in [`transform`]; everything else is the
//! table plumbing around them.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod transform;

pub use domain::{DateRecord, HolidayLabel, IncidentRecord, TemperaturePair, WeekdayOrigin};
pub use transform::{classify, classify_date, daily_mean, daily_rate};
