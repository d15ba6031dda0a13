//! Per-row transforms: holiday labels, daily mean temperature, incident rates.

pub mod holiday;
pub mod incidents;
pub mod temperature;

pub use holiday::*;
pub use incidents::*;
pub use temperature::*;
