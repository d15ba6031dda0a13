//! Daily incident rates per holiday label.
//!
//! A label's incident total is divided by the number of days that label
//! covers in the source period. Thanksgiving and Christmas cover one year
//! fewer than the other holidays.
//!
//! Lookup compares label text exactly. Labels outside the known set fall into
//! the generic holiday divisor, same as a recognized holiday.

use crate::domain::{DivisorTable, HolidayLabel, IncidentRecord};

/// Divisor for a label under the given table.
pub fn divisor_for(label: &str, table: &DivisorTable) -> u32 {
    if label == HolidayLabel::ThanksgivingDay.as_str() || label == HolidayLabel::ChristmasDay.as_str() {
        table.short_holidays
    } else if label == HolidayLabel::NonHoliday.as_str() {
        table.non_holidays
    } else {
        table.holidays
    }
}

/// Daily rate under an explicit divisor table.
pub fn daily_rate_with(record: &IncidentRecord, table: &DivisorTable) -> f64 {
    record.total as f64 / f64::from(divisor_for(&record.label, table))
}

/// Daily rate under the default divisor table (18 / 19 / 6712).
pub fn daily_rate(record: &IncidentRecord) -> f64 {
    daily_rate_with(record, &DivisorTable::default())
}

/// Whether the label is one of the known holiday labels or "Non-holidays".
pub fn is_known_label(label: &str) -> bool {
    label.parse::<HolidayLabel>().is_ok()
}
