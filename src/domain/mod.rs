//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input records (`DateRecord`, `TemperaturePair`, `IncidentRecord`)
//! - the holiday label set (`HolidayLabel`) and weekday convention (`WeekdayOrigin`)
//! - run configuration (`RunConfig`, `ColumnNames`, `DivisorTable`)
//! - report rows (`LabelTally`, `HolidayDate`)

pub mod types;

pub use types::*;
