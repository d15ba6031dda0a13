//! Write transformed tables back out as CSV.
//!
//! The output is the input table unchanged plus one derived column. If the
//! input already has a column with that name (case-insensitive), its values
//! are replaced in place instead. Rows shorter than the header are padded
//! with empty fields so the derived value lands under its header; extra
//! trailing fields on longer rows are written after it.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;
use crate::io::ingest::{Table, build_header_map, normalize_header_name};

/// Open the output sink: a file when `path` is set, stdout otherwise.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, AppError> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| AppError::output(format!("Failed to create output CSV '{}': {e}", path.display())))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Write `table` with `column` set to `derived[i]` for row `i`.
pub fn write_with_column<T, W: Write>(
    out: W,
    table: &Table<T>,
    column: &str,
    derived: &[String],
) -> Result<(), AppError> {
    debug_assert_eq!(table.rows.len(), derived.len());

    let existing = build_header_map(&table.headers)
        .get(&normalize_header_name(column))
        .copied();

    // Ingest is flexible, so rows longer than the header can reach here.
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    let width = table.headers.len();

    let mut headers: StringRecord = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h })
        .collect();
    if existing.is_none() {
        headers.push_field(column);
    }
    writer
        .write_record(&headers)
        .map_err(|e| AppError::output(format!("Failed to write output CSV header: {e}")))?;

    for (row, value) in table.rows.iter().zip(derived) {
        let record = derived_record(&row.record, width, existing, value);
        writer
            .write_record(&record)
            .map_err(|e| AppError::output(format!("Failed to write output CSV row {}: {e}", row.line)))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush output CSV: {e}")))?;
    Ok(())
}

/// Lay `record` out against a header of `width` columns with `value` placed in
/// column `existing`, or right after the last header column.
fn derived_record(record: &StringRecord, width: usize, existing: Option<usize>, value: &str) -> StringRecord {
    let mut out: StringRecord = (0..width)
        .map(|i| match existing {
            Some(idx) if idx == i => value,
            _ => record.get(i).unwrap_or(""),
        })
        .collect();
    if existing.is_none() {
        out.push_field(value);
    }
    for extra in record.iter().skip(width) {
        out.push_field(extra);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnNames;
    use crate::io::ingest::read_temperature_table;

    fn render(table: &Table<crate::domain::TemperaturePair>, column: &str, derived: &[String]) -> String {
        let mut buf = Vec::new();
        write_with_column(&mut buf, table, column, derived).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn appends_derived_column() {
        let csv = "Date,T_Max,T_Min\n2018-01-01,200,-100\n";
        let table = read_temperature_table(csv.as_bytes(), &ColumnNames::default(), false).unwrap();
        let out = render(&table, "T_Avg", &["5".to_string()]);
        assert_eq!(out, "Date,T_Max,T_Min,T_Avg\n2018-01-01,200,-100,5\n");
    }

    #[test]
    fn replaces_existing_column_case_insensitively() {
        let csv = "T_Max,t_avg,T_Min\n200,,-100\n";
        let table = read_temperature_table(csv.as_bytes(), &ColumnNames::default(), false).unwrap();
        let out = render(&table, "T_Avg", &["5".to_string()]);
        assert_eq!(out, "T_Max,t_avg,T_Min\n200,5,-100\n");
    }

    #[test]
    fn short_rows_are_padded_before_replacing() {
        let csv = "T_Max,T_Min,T_Avg\n200,-100\n10,10,old\n";
        let table = read_temperature_table(csv.as_bytes(), &ColumnNames::default(), false).unwrap();
        let out = render(&table, "T_Avg", &["5".to_string(), "1".to_string()]);
        assert_eq!(out, "T_Max,T_Min,T_Avg\n200,-100,5\n10,10,1\n");
    }

    #[test]
    fn short_rows_are_padded_before_appending() {
        let csv = "T_Max,T_Min,Station\n200,-100\n10,10,KORD\n";
        let table = read_temperature_table(csv.as_bytes(), &ColumnNames::default(), false).unwrap();
        let out = render(&table, "T_Avg", &["5".to_string(), "1".to_string()]);
        assert_eq!(out, "T_Max,T_Min,Station,T_Avg\n200,-100,,5\n10,10,KORD,1\n");
    }

    #[test]
    fn extra_trailing_fields_follow_the_derived_column() {
        let csv = "T_Max,T_Min\n200,-100,note\n";
        let table = read_temperature_table(csv.as_bytes(), &ColumnNames::default(), false).unwrap();
        let out = render(&table, "T_Avg", &["5".to_string()]);
        assert_eq!(out, "T_Max,T_Min,T_Avg\n200,-100,5,note\n");
    }
}
