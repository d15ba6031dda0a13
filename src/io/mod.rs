//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - CSV export with a derived column (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
