//! Shared table-level workflow used by the CLI handlers.
//!
//! Each function maps one transform over a validated table. Rows are
//! independent, so mapping runs on the rayon pool; output order always
//! matches input order.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;

use crate::domain::{
    DateRecord, DivisorTable, HolidayDate, HolidayLabel, IncidentEvent, IncidentRecord, LabelTally, WeekdayOrigin,
};
use crate::error::AppError;
use crate::io::ingest::{DateTable, IncidentTable, TemperatureTable};
use crate::transform::{classify, daily_mean, daily_rate_with, is_known_label};

/// Holiday label for every row of a date table.
pub fn label_dates(table: &DateTable, origin: WeekdayOrigin) -> Vec<HolidayLabel> {
    table
        .rows
        .par_iter()
        .map(|row| classify(&DateRecord::from(row.value), origin))
        .collect()
}

/// Daily mean temperature for every row of a temperature table.
pub fn average_temperatures(table: &TemperatureTable) -> Vec<f64> {
    table.rows.par_iter().map(|row| daily_mean(row.value)).collect()
}

/// Daily incident rate for every row of an incident table.
///
/// Labels outside the known set still get the generic holiday divisor; each
/// distinct one is logged once.
pub fn rate_incidents(table: &IncidentTable, divisors: &DivisorTable) -> Vec<f64> {
    let unknown: BTreeSet<&str> = table
        .values()
        .map(|r| r.label.as_str())
        .filter(|label| !is_known_label(label))
        .collect();
    for label in unknown {
        tracing::warn!(label, divisor = divisors.holidays, "unrecognized holiday label");
    }

    table
        .rows
        .par_iter()
        .map(|row| daily_rate_with(&row.value, divisors))
        .collect()
}

/// Classify each incident's date, total the counts per label, and compute
/// each label's daily rate.
///
/// Rows come back in rule order with "Non-holidays" last. Labels with no
/// incidents are omitted.
pub fn tally_incidents(events: &[IncidentEvent], origin: WeekdayOrigin, divisors: &DivisorTable) -> Vec<LabelTally> {
    let labels: Vec<HolidayLabel> = events
        .par_iter()
        .map(|e| classify(&DateRecord::from(e.date), origin))
        .collect();

    let mut by_label: BTreeMap<HolidayLabel, (HashSet<NaiveDate>, u64)> = BTreeMap::new();
    for (event, label) in events.iter().zip(labels) {
        let (days, total) = by_label.entry(label).or_default();
        days.insert(event.date);
        *total += event.count;
    }

    by_label
        .into_iter()
        .map(|(label, (days, total))| LabelTally {
            label,
            days_observed: days.len(),
            total,
            daily_rate: daily_rate_with(&IncidentRecord::from((label, total)), divisors),
        })
        .collect()
}

/// Every holiday in `from..=to` (calendar years), in date order.
pub fn holiday_calendar(from: i32, to: i32, origin: WeekdayOrigin) -> Result<Vec<HolidayDate>, AppError> {
    if from > to {
        return Err(AppError::input(format!("Invalid year range: {from} > {to}.")));
    }
    for year in [from, to] {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() || NaiveDate::from_ymd_opt(year, 12, 31).is_none() {
            return Err(AppError::input(format!("Year {year} is out of range.")));
        }
    }

    let dates = (from..=to)
        .into_par_iter()
        .flat_map_iter(move |year| holidays_in_year(year, origin))
        .collect();
    Ok(dates)
}

fn holidays_in_year(year: i32, origin: WeekdayOrigin) -> Vec<HolidayDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.year() == year)
        .filter_map(|date| {
            let label = classify(&DateRecord::from(date), origin);
            label.is_holiday().then(|| HolidayDate {
                date,
                weekday: date.weekday().to_string(),
                label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnNames;
    use crate::io::ingest::{read_date_table, read_incident_table, read_temperature_table};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn label_dates_preserves_row_order() {
        let csv = "Date\n2018-12-25\n2018-03-01\n2018-11-23\n2018-01-01\n";
        let table = read_date_table(csv.as_bytes(), &ColumnNames::default(), false).unwrap();
        let labels = label_dates(&table, WeekdayOrigin::default());
        assert_eq!(
            labels,
            vec![
                HolidayLabel::ChristmasDay,
                HolidayLabel::NonHoliday,
                HolidayLabel::ThanksgivingDay,
                HolidayLabel::NewYearsDay,
            ]
        );
    }

    #[test]
    fn average_temperatures_per_row() {
        let csv = "T_Max,T_Min\n200,-100\n-100,200\n15,0\n";
        let table = read_temperature_table(csv.as_bytes(), &ColumnNames::default(), false).unwrap();
        assert_eq!(average_temperatures(&table), vec![5.0, 5.0, 0.75]);
    }

    #[test]
    fn rate_incidents_per_row() {
        let csv = "Holiday,Total\nChristmas Day,18000\nNon-holidays,6712\nNew Year's Day,19\nBoxing Day,38\n";
        let table = read_incident_table(csv.as_bytes(), &ColumnNames::default(), false).unwrap();
        let rates = rate_incidents(&table, &DivisorTable::default());
        assert_eq!(rates, vec![1000.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn tally_groups_by_label_in_rule_order() {
        let events = vec![
            IncidentEvent { date: date(2018, 3, 1), count: 1 },
            IncidentEvent { date: date(2018, 12, 25), count: 9 },
            IncidentEvent { date: date(2017, 12, 25), count: 9 },
            IncidentEvent { date: date(2018, 1, 1), count: 19 },
            IncidentEvent { date: date(2018, 3, 2), count: 2 },
        ];
        let tallies = tally_incidents(&events, WeekdayOrigin::default(), &DivisorTable::default());
        let labels: Vec<HolidayLabel> = tallies.iter().map(|t| t.label).collect();
        assert_eq!(
            labels,
            vec![HolidayLabel::NewYearsDay, HolidayLabel::ChristmasDay, HolidayLabel::NonHoliday]
        );

        let christmas = &tallies[1];
        assert_eq!(christmas.total, 18);
        assert_eq!(christmas.days_observed, 2);
        assert_eq!(christmas.daily_rate, 1.0);

        assert_eq!(tallies[0].daily_rate, 1.0);
        assert_eq!(tallies[2].total, 3);
        assert_eq!(tallies[2].days_observed, 2);
    }

    #[test]
    fn calendar_lists_ten_holidays_per_year() {
        let dates = holiday_calendar(2018, 2019, WeekdayOrigin::default()).unwrap();
        assert_eq!(dates.len(), 20);
        assert!(dates.windows(2).all(|w| w[0].date < w[1].date));
        let thanksgiving = dates
            .iter()
            .find(|d| d.label == HolidayLabel::ThanksgivingDay)
            .unwrap();
        assert_eq!(thanksgiving.date, date(2018, 11, 23));
        assert_eq!(thanksgiving.weekday, "Fri");
    }

    #[test]
    fn calendar_under_sunday_origin_lands_on_thursday() {
        let dates = holiday_calendar(2018, 2018, WeekdayOrigin::Sunday).unwrap();
        let thanksgiving = dates
            .iter()
            .find(|d| d.label == HolidayLabel::ThanksgivingDay)
            .unwrap();
        assert_eq!(thanksgiving.date, date(2018, 11, 22));
        assert_eq!(thanksgiving.weekday, "Thu");
    }

    #[test]
    fn calendar_rejects_inverted_range() {
        let err = holiday_calendar(2020, 2019, WeekdayOrigin::Sunday).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
