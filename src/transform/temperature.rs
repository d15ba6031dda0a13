//! Daily mean temperature from raw station readings.
//!
//! Readings are stored in tenths of a degree Celsius. The daily mean in whole
//! degrees is `(max + min) / 2 / 10`, computed as a single true division.

use crate::domain::TemperaturePair;

/// Mean of the daily max and min, in degrees Celsius.
///
/// No rounding is applied. The sum is taken in `i64` so any pair of `i32`
/// readings is representable.
pub fn daily_mean(pair: TemperaturePair) -> f64 {
    let sum = i64::from(pair.max_tenths) + i64::from(pair.min_tenths);
    sum as f64 / 20.0
}
