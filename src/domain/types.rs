//! Shared domain types.
//!
//! These are small, immutable value types. Each transform consumes one of the
//! input records and produces a label or a scalar; nothing here owns state
//! beyond a single call.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Federal holiday categories recognized by the classifier, plus the
/// catch-all `NonHoliday`.
///
/// Declaration order matches rule precedence, with `NonHoliday` last, so the
/// derived `Ord` sorts reports in calendar/rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HolidayLabel {
    #[serde(rename = "New Year's Day")]
    NewYearsDay,
    #[serde(rename = "Martin Luther King Day")]
    MartinLutherKingDay,
    #[serde(rename = "President's Day")]
    PresidentsDay,
    #[serde(rename = "Memorial Day")]
    MemorialDay,
    #[serde(rename = "Independence Day")]
    IndependenceDay,
    #[serde(rename = "Labor Day")]
    LaborDay,
    #[serde(rename = "Columbus Day")]
    ColumbusDay,
    #[serde(rename = "Veterans Day")]
    VeteransDay,
    #[serde(rename = "Thanksgiving Day")]
    ThanksgivingDay,
    #[serde(rename = "Christmas Day")]
    ChristmasDay,
    #[serde(rename = "Non-holidays")]
    NonHoliday,
}

impl HolidayLabel {
    pub const ALL: [HolidayLabel; 11] = [
        HolidayLabel::NewYearsDay,
        HolidayLabel::MartinLutherKingDay,
        HolidayLabel::PresidentsDay,
        HolidayLabel::MemorialDay,
        HolidayLabel::IndependenceDay,
        HolidayLabel::LaborDay,
        HolidayLabel::ColumbusDay,
        HolidayLabel::VeteransDay,
        HolidayLabel::ThanksgivingDay,
        HolidayLabel::ChristmasDay,
        HolidayLabel::NonHoliday,
    ];

    /// Exact label text as it appears in tables.
    pub fn as_str(self) -> &'static str {
        match self {
            HolidayLabel::NewYearsDay => "New Year's Day",
            HolidayLabel::MartinLutherKingDay => "Martin Luther King Day",
            HolidayLabel::PresidentsDay => "President's Day",
            HolidayLabel::MemorialDay => "Memorial Day",
            HolidayLabel::IndependenceDay => "Independence Day",
            HolidayLabel::LaborDay => "Labor Day",
            HolidayLabel::ColumbusDay => "Columbus Day",
            HolidayLabel::VeteransDay => "Veterans Day",
            HolidayLabel::ThanksgivingDay => "Thanksgiving Day",
            HolidayLabel::ChristmasDay => "Christmas Day",
            HolidayLabel::NonHoliday => "Non-holidays",
        }
    }

    pub fn is_holiday(self) -> bool {
        self != HolidayLabel::NonHoliday
    }
}

impl fmt::Display for HolidayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HolidayLabel {
    type Err = String;

    /// Exact, case-sensitive match against the label text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HolidayLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("Unrecognized holiday label '{s}'."))
    }
}

/// Which weekday is index 0 when holiday rules compare weekday indices.
///
/// The rule table stores raw indices (1 and 4). Under `Monday` those are
/// Tuesday and Friday; under `Sunday` they are Monday and Thursday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayOrigin {
    /// Monday = 0, Tuesday = 1, ..., Sunday = 6.
    #[default]
    Monday,
    /// Sunday = 0, Monday = 1, ..., Saturday = 6.
    Sunday,
}

impl WeekdayOrigin {
    pub fn index_of(self, weekday: Weekday) -> u32 {
        match self {
            WeekdayOrigin::Sunday => weekday.num_days_from_sunday(),
            WeekdayOrigin::Monday => weekday.num_days_from_monday(),
        }
    }
}

/// A calendar date broken into the fields the holiday rules look at.
///
/// Only built from a real date, so `weekday` always agrees with the other
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRecord {
    year: i32,
    month: u32,
    day: u32,
    weekday: Weekday,
}

impl DateRecord {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn weekday_index(&self, origin: WeekdayOrigin) -> u32 {
        origin.index_of(self.weekday)
    }
}

impl From<NaiveDate> for DateRecord {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday(),
        }
    }
}

/// Daily maximum and minimum temperature, both in tenths of a degree Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperaturePair {
    pub max_tenths: i32,
    pub min_tenths: i32,
}

impl TemperaturePair {
    pub fn new(max_tenths: i32, min_tenths: i32) -> Self {
        Self {
            max_tenths,
            min_tenths,
        }
    }
}

/// A holiday label with the total number of incidents recorded under it.
///
/// The label is kept as free text: rate lookup compares strings exactly and
/// anything it does not recognize falls into the generic holiday divisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRecord {
    pub label: String,
    pub total: u64,
}

impl IncidentRecord {
    pub fn new(label: impl Into<String>, total: u64) -> Self {
        Self {
            label: label.into(),
            total,
        }
    }
}

impl From<(HolidayLabel, u64)> for IncidentRecord {
    fn from((label, total): (HolidayLabel, u64)) -> Self {
        Self::new(label.as_str(), total)
    }
}

/// One row of an incident log: the date it happened and how many incidents
/// the row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncidentEvent {
    pub date: NaiveDate,
    pub count: u64,
}

/// Number of observed days per label category, used to turn incident totals
/// into daily rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisorTable {
    /// Thanksgiving Day and Christmas Day.
    pub short_holidays: u32,
    /// Every other label, recognized or not.
    pub holidays: u32,
    /// "Non-holidays".
    pub non_holidays: u32,
}

impl Default for DivisorTable {
    fn default() -> Self {
        Self {
            short_holidays: 18,
            holidays: 19,
            non_holidays: 6712,
        }
    }
}

/// How report commands render their output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

/// Column names used to locate input fields (matched case-insensitively).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub date: String,
    pub t_max: String,
    pub t_min: String,
    pub holiday: String,
    pub total: String,
    /// Optional per-row incident count for event tables; absent means 1 per row.
    pub count: Option<String>,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            t_max: "T_Max".to_string(),
            t_min: "T_Min".to_string(),
            holiday: "Holiday".to_string(),
            total: "Total".to_string(),
            count: None,
        }
    }
}

/// Resolved run configuration.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub columns: ColumnNames,
    pub weekday_origin: WeekdayOrigin,
    pub divisors: DivisorTable,
    /// Skip and report malformed rows instead of failing on the first one.
    pub skip_invalid: bool,
    pub format: ReportFormat,
}

/// Incident total and daily rate for one label, as produced by a tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelTally {
    pub label: HolidayLabel,
    /// Number of distinct dates in the input that carried this label.
    pub days_observed: usize,
    pub total: u64,
    pub daily_rate: f64,
}

/// One holiday occurrence produced by the calendar listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayDate {
    pub date: NaiveDate,
    pub weekday: String,
    pub label: HolidayLabel,
}
