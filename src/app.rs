//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - loads and validates the input table
//! - runs the requested transform over every row
//! - writes the transformed CSV or prints a report

use std::path::Path;

use clap::Parser;

use crate::cli::{CalendarArgs, Command, HolidaysArgs, IncidentsArgs, TallyArgs, TempsArgs};
use crate::domain::{ColumnNames, ReportFormat, RunConfig};
use crate::error::AppError;
use crate::io::{
    Table, load_table, open_output, read_date_table, read_incident_events, read_incident_table,
    read_temperature_table, write_with_column,
};
use crate::report::{IngestSummary, format_calendar, format_row_errors, format_tally, to_json};

pub mod pipeline;

/// Derived column written by `hc temps`.
pub const TEMPERATURE_COLUMN: &str = "T_Avg";
/// Derived column written by `hc incidents`.
pub const RATE_COLUMN: &str = "Daily_Incidents";

/// Entry point for the `hc` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init(cli.verbose);

    match cli.command {
        Command::Holidays(args) => handle_holidays(&args),
        Command::Temps(args) => handle_temps(&args),
        Command::Incidents(args) => handle_incidents(&args),
        Command::Tally(args) => handle_tally(&args),
        Command::Calendar(args) => handle_calendar(&args),
    }
}

fn handle_holidays(args: &HolidaysArgs) -> Result<(), AppError> {
    let config = run_config_from_holidays(args);
    let table = load_table(input_path(&config)?, |f| {
        read_date_table(f, &config.columns, config.skip_invalid)
    })?;

    let labels = pipeline::label_dates(&table, config.weekday_origin);
    let derived: Vec<String> = labels.iter().map(|l| l.as_str().to_string()).collect();
    finish_table(&table, &config.columns.holiday, &derived, &config)
}

fn handle_temps(args: &TempsArgs) -> Result<(), AppError> {
    let config = run_config_from_temps(args);
    let table = load_table(input_path(&config)?, |f| {
        read_temperature_table(f, &config.columns, config.skip_invalid)
    })?;

    let means = pipeline::average_temperatures(&table);
    let derived: Vec<String> = means.iter().map(f64::to_string).collect();
    finish_table(&table, TEMPERATURE_COLUMN, &derived, &config)
}

fn handle_incidents(args: &IncidentsArgs) -> Result<(), AppError> {
    let config = run_config_from_incidents(args);
    let table = load_table(input_path(&config)?, |f| {
        read_incident_table(f, &config.columns, config.skip_invalid)
    })?;

    let rates = pipeline::rate_incidents(&table, &config.divisors);
    let derived: Vec<String> = rates.iter().map(f64::to_string).collect();
    finish_table(&table, RATE_COLUMN, &derived, &config)
}

fn handle_tally(args: &TallyArgs) -> Result<(), AppError> {
    let config = run_config_from_tally(args);
    let table = load_table(input_path(&config)?, |f| {
        read_incident_events(f, &config.columns, config.skip_invalid)
    })?;
    report_row_errors(&table);

    let events: Vec<_> = table.values().copied().collect();
    let tallies = pipeline::tally_incidents(&events, config.weekday_origin, &config.divisors);
    let summary = IngestSummary {
        rows_read: table.rows_read,
        rows_used: table.rows.len(),
        rows_skipped: table.row_errors.len(),
    };

    match config.format {
        ReportFormat::Table => print!("{}", format_tally(&tallies, &summary)),
        ReportFormat::Json => println!(
            "{}",
            to_json(&serde_json::json!({ "rows": summary, "tallies": tallies }))?
        ),
    }
    Ok(())
}

fn handle_calendar(args: &CalendarArgs) -> Result<(), AppError> {
    let to = args.to.unwrap_or(args.from);
    let dates = pipeline::holiday_calendar(args.from, to, args.weekday_origin)?;
    tracing::debug!(from = args.from, to, holidays = dates.len(), "calendar built");

    match args.format {
        ReportFormat::Table => print!("{}", format_calendar(&dates)),
        ReportFormat::Json => println!("{}", to_json(&dates)?),
    }
    Ok(())
}

fn finish_table<T>(table: &Table<T>, column: &str, derived: &[String], config: &RunConfig) -> Result<(), AppError> {
    report_row_errors(table);
    let out = open_output(config.output.as_deref())?;
    write_with_column(out, table, column, derived)?;
    tracing::info!(rows = derived.len(), column, "table written");
    Ok(())
}

fn report_row_errors<T>(table: &Table<T>) {
    let errors = format_row_errors(&table.row_errors);
    if !errors.is_empty() {
        eprint!("{errors}");
    }
}

fn input_path(config: &RunConfig) -> Result<&Path, AppError> {
    config
        .input
        .as_deref()
        .ok_or_else(|| AppError::input("No input CSV given."))
}

pub fn run_config_from_holidays(args: &HolidaysArgs) -> RunConfig {
    RunConfig {
        input: Some(args.input.clone()),
        output: args.output.output.clone(),
        columns: ColumnNames {
            date: args.date_col.clone(),
            holiday: args.holiday_col.clone(),
            ..ColumnNames::default()
        },
        weekday_origin: args.weekday_origin,
        skip_invalid: args.output.skip_invalid,
        ..RunConfig::default()
    }
}

pub fn run_config_from_temps(args: &TempsArgs) -> RunConfig {
    RunConfig {
        input: Some(args.input.clone()),
        output: args.output.output.clone(),
        columns: ColumnNames {
            t_max: args.max_col.clone(),
            t_min: args.min_col.clone(),
            ..ColumnNames::default()
        },
        skip_invalid: args.output.skip_invalid,
        ..RunConfig::default()
    }
}

pub fn run_config_from_incidents(args: &IncidentsArgs) -> RunConfig {
    RunConfig {
        input: Some(args.input.clone()),
        output: args.output.output.clone(),
        columns: ColumnNames {
            holiday: args.holiday_col.clone(),
            total: args.total_col.clone(),
            ..ColumnNames::default()
        },
        divisors: args.divisors.to_table(),
        skip_invalid: args.output.skip_invalid,
        ..RunConfig::default()
    }
}

pub fn run_config_from_tally(args: &TallyArgs) -> RunConfig {
    RunConfig {
        input: Some(args.input.clone()),
        columns: ColumnNames {
            date: args.date_col.clone(),
            count: args.count_col.clone(),
            ..ColumnNames::default()
        },
        weekday_origin: args.weekday_origin,
        divisors: args.divisors.to_table(),
        skip_invalid: args.skip_invalid,
        format: args.format,
        ..RunConfig::default()
    }
}
