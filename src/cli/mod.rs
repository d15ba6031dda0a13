//! Command-line parsing for the `hc` table transforms.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! transforms and table handling.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DivisorTable, ReportFormat, WeekdayOrigin};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "hc",
    version,
    about = "Federal holiday, daily temperature and incident-rate transforms for CSV tables"
)]
pub struct Cli {
    /// Log at debug level (overrides HC_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Append a holiday label column to a table of dates.
    Holidays(HolidaysArgs),
    /// Append a daily mean temperature column (degrees C) to a table of max/min readings.
    Temps(TempsArgs),
    /// Append a daily incident rate column to a table of per-holiday totals.
    Incidents(IncidentsArgs),
    /// Total incidents per holiday from an incident log and report daily rates.
    Tally(TallyArgs),
    /// List the dates the holiday rules select for a range of years.
    Calendar(CalendarArgs),
}

/// Options shared by the commands that write a transformed CSV.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Write the result here instead of stdout.
    #[arg(short, long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Skip malformed rows (reported on stderr) instead of failing on the first one.
    #[arg(long)]
    pub skip_invalid: bool,
}

/// Day counts used to turn incident totals into daily rates.
#[derive(Debug, Args, Clone)]
pub struct DivisorArgs {
    /// Days observed for Thanksgiving Day and Christmas Day.
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u32).range(1..))]
    pub short_holiday_days: u32,

    /// Days observed for every other holiday label.
    #[arg(long, default_value_t = 19, value_parser = clap::value_parser!(u32).range(1..))]
    pub holiday_days: u32,

    /// Days observed for "Non-holidays".
    #[arg(long, default_value_t = 6712, value_parser = clap::value_parser!(u32).range(1..))]
    pub non_holiday_days: u32,
}

impl DivisorArgs {
    pub fn to_table(&self) -> DivisorTable {
        DivisorTable {
            short_holidays: self.short_holiday_days,
            holidays: self.holiday_days,
            non_holidays: self.non_holiday_days,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct HolidaysArgs {
    /// Input CSV.
    pub input: PathBuf,

    /// Date column.
    #[arg(long, default_value = "Date")]
    pub date_col: String,

    /// Name of the label column to write.
    #[arg(long, default_value = "Holiday")]
    pub holiday_col: String,

    /// Weekday given index 0 when matching floating holidays.
    #[arg(long, value_enum, default_value_t = WeekdayOrigin::Monday)]
    pub weekday_origin: WeekdayOrigin,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TempsArgs {
    /// Input CSV.
    pub input: PathBuf,

    /// Daily maximum column (tenths of a degree C).
    #[arg(long, default_value = "T_Max")]
    pub max_col: String,

    /// Daily minimum column (tenths of a degree C).
    #[arg(long, default_value = "T_Min")]
    pub min_col: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct IncidentsArgs {
    /// Input CSV.
    pub input: PathBuf,

    /// Holiday label column.
    #[arg(long, default_value = "Holiday")]
    pub holiday_col: String,

    /// Incident total column.
    #[arg(long, default_value = "Total")]
    pub total_col: String,

    #[command(flatten)]
    pub divisors: DivisorArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TallyArgs {
    /// Incident log CSV (one row per incident).
    pub input: PathBuf,

    /// Date column.
    #[arg(long, default_value = "Date")]
    pub date_col: String,

    /// Optional column holding the number of incidents each row stands for.
    #[arg(long)]
    pub count_col: Option<String>,

    /// Weekday given index 0 when matching floating holidays.
    #[arg(long, value_enum, default_value_t = WeekdayOrigin::Monday)]
    pub weekday_origin: WeekdayOrigin,

    #[command(flatten)]
    pub divisors: DivisorArgs,

    /// Skip malformed rows (reported on stderr) instead of failing on the first one.
    #[arg(long)]
    pub skip_invalid: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,
}

#[derive(Debug, Args, Clone)]
pub struct CalendarArgs {
    /// First year (inclusive).
    #[arg(long)]
    pub from: i32,

    /// Last year (inclusive). Defaults to `--from`.
    #[arg(long)]
    pub to: Option<i32>,

    /// Weekday given index 0 when matching floating holidays.
    #[arg(long, value_enum, default_value_t = WeekdayOrigin::Monday)]
    pub weekday_origin: WeekdayOrigin,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,
}
