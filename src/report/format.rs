//! Formatted terminal output for the report commands.
//!
//! We keep formatting code in one place so the transforms stay clean and
//! output changes are localized.

use serde::Serialize;

use crate::domain::{HolidayDate, LabelTally};
use crate::error::AppError;
use crate::io::ingest::RowError;

/// Input accounting shown above a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub rows_read: usize,
    pub rows_used: usize,
    pub rows_skipped: usize,
}

/// Format per-label incident totals and daily rates.
pub fn format_tally(tallies: &[LabelTally], summary: &IngestSummary) -> String {
    let mut out = String::new();

    out.push_str("=== hc - incidents by holiday ===\n");
    out.push_str(&format!(
        "Rows: read={} | used={} | skipped={}\n\n",
        summary.rows_read, summary.rows_used, summary.rows_skipped
    ));

    out.push_str(format!("{:<24} {:>6} {:>10} {:>12}", "holiday", "days", "total", "daily_rate").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<24} {:-<6} {:-<10} {:-<12}", "", "", "", "").trim_end());
    out.push('\n');

    for t in tallies {
        out.push_str(
            format!(
                "{:<24} {:>6} {:>10} {:>12.3}",
                t.label.as_str(),
                t.days_observed,
                t.total,
                t.daily_rate
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the holiday calendar listing.
pub fn format_calendar(dates: &[HolidayDate]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<10} {:<3} {}", "date", "day", "holiday").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<3} {:-<24}", "", "", "").trim_end());
    out.push('\n');
    for d in dates {
        out.push_str(&format!("{} {:<3} {}\n", d.date, d.weekday, d.label));
    }
    out
}

/// One line per skipped row, for stderr.
pub fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = String::new();
    if errors.is_empty() {
        return out;
    }
    out.push_str(&format!("Skipped {} invalid row(s):\n", errors.len()));
    for e in errors {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    out
}

/// Pretty JSON for `--format json`.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::output(format!("Failed to serialize JSON: {e}")))
}
