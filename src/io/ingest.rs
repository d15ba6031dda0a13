//! CSV ingest and validation.
//!
//! Each reader turns a CSV table into typed rows while keeping the original
//! record, so export can write the input back out with a derived column.
//!
//! - Headers are matched case-insensitively (BOM stripped).
//! - A missing column is a hard error (exit code 2).
//! - A malformed cell fails the run with its line number, unless
//!   `skip_invalid` is set, in which case the row is skipped and reported.
//! - No fitting or classification logic lives here.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{ColumnNames, IncidentEvent, IncidentRecord, TemperaturePair};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// One validated input row.
#[derive(Debug, Clone)]
pub struct Row<T> {
    /// 1-based line number in the source file (header is line 1).
    pub line: usize,
    pub record: StringRecord,
    pub value: T,
}

/// A validated table: headers, parsed rows, and rows that were skipped.
#[derive(Debug, Clone)]
pub struct Table<T> {
    pub headers: StringRecord,
    pub rows: Vec<Row<T>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl<T> Table<T> {
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|row| &row.value)
    }
}

pub type DateTable = Table<NaiveDate>;
pub type TemperatureTable = Table<TemperaturePair>;
pub type IncidentTable = Table<IncidentRecord>;
pub type EventTable = Table<IncidentEvent>;

/// Read a table with a date column.
pub fn read_date_table<R: Read>(reader: R, columns: &ColumnNames, skip_invalid: bool) -> Result<DateTable, AppError> {
    read_table(reader, &[columns.date.as_str()], skip_invalid, |fields| {
        parse_date(fields[0])
    })
}

/// Read a table with daily max/min temperature columns (tenths of a degree).
pub fn read_temperature_table<R: Read>(
    reader: R,
    columns: &ColumnNames,
    skip_invalid: bool,
) -> Result<TemperatureTable, AppError> {
    let names = [columns.t_max.as_str(), columns.t_min.as_str()];
    read_table(reader, &names, skip_invalid, |fields| {
        let max = parse_tenths(fields[0], names[0])?;
        let min = parse_tenths(fields[1], names[1])?;
        Ok(TemperaturePair::new(max, min))
    })
}

/// Read a `(label, total)` table.
pub fn read_incident_table<R: Read>(
    reader: R,
    columns: &ColumnNames,
    skip_invalid: bool,
) -> Result<IncidentTable, AppError> {
    let names = [columns.holiday.as_str(), columns.total.as_str()];
    read_table(reader, &names, skip_invalid, |fields| {
        let total = parse_count(fields[1], names[1])?;
        Ok(IncidentRecord::new(fields[0], total))
    })
}

/// Read an incident log: one row per incident (or per `count` incidents when a
/// count column is configured).
pub fn read_incident_events<R: Read>(
    reader: R,
    columns: &ColumnNames,
    skip_invalid: bool,
) -> Result<EventTable, AppError> {
    let mut names = vec![columns.date.as_str()];
    if let Some(count) = &columns.count {
        names.push(count.as_str());
    }
    read_table(reader, &names, skip_invalid, |fields| {
        let date = parse_date(fields[0])?;
        let count = match fields.get(1) {
            Some(raw) => parse_count(raw, names[1])?,
            None => 1,
        };
        Ok(IncidentEvent { date, count })
    })
}

/// Open `path` and run one of the `read_*` functions over it.
pub fn load_table<T>(
    path: &Path,
    read: impl FnOnce(File) -> Result<Table<T>, AppError>,
) -> Result<Table<T>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read(file)
}

fn read_table<R, T, F>(reader: R, names: &[&str], skip_invalid: bool, parse: F) -> Result<Table<T>, AppError>
where
    R: Read,
    F: Fn(&[&str]) -> Result<T, String>,
{
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let indices = names
        .iter()
        .map(|name| {
            header_map
                .get(&normalize_header_name(name))
                .copied()
                .ok_or_else(|| AppError::input(format!("Missing required column: `{name}`")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header, which is line 1.
        let line = idx + 2;
        rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|record| {
                let fields = indices
                    .iter()
                    .zip(names)
                    .map(|(&i, name)| get_required(&record, i, name))
                    .collect::<Result<Vec<_>, _>>()?;
                let value = parse(&fields)?;
                Ok(Row { line, record, value })
            });

        match parsed {
            Ok(row) => rows.push(row),
            Err(message) if skip_invalid => {
                tracing::warn!(line, "skipping row: {message}");
                row_errors.push(RowError { line, message });
            }
            Err(message) => return Err(AppError::input(format!("line {line}: {message}"))),
        }
    }

    if rows.is_empty() {
        return Err(AppError::new(3, "No valid rows remain after validation."));
    }

    tracing::debug!(rows_read, rows_used = rows.len(), skipped = row_errors.len(), "table loaded");

    Ok(Table {
        headers,
        rows,
        row_errors,
        rows_read,
    })
}

pub(crate) fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

pub(crate) fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// Parse a calendar date, accepting the date and timestamp layouts common in
/// incident and weather exports. Time of day is discarded.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const DATE_FMTS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    const DATETIME_FMTS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %I:%M:%S %p",
        "%m/%d/%Y %H:%M",
    ];
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, MM/DD/YYYY, YYYY/MM/DD (optionally with a time)."
    ))
}

fn parse_tenths(s: &str, name: &str) -> Result<i32, String> {
    s.parse::<i32>()
        .map_err(|_| format!("Invalid `{name}` value '{s}' (expected an integer in tenths of a degree)."))
}

fn parse_count(s: &str, name: &str) -> Result<u64, String> {
    s.parse::<u64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}' (expected a non-negative integer)."))
}
