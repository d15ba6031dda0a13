//! Federal holiday classification.
//!
//! Holidays are described by an ordered rule table. A date takes the label of
//! the first rule it matches; dates matching no rule are "Non-holidays".
//! Fixed-date holidays match on month and day. Floating holidays match a
//! seven-day window in their month plus a weekday index, which is interpreted
//! under a `WeekdayOrigin` (Monday = 0 by default).

use chrono::NaiveDate;

use crate::domain::{DateRecord, HolidayLabel, WeekdayOrigin};

/// Day-of-month condition for a holiday rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMatch {
    /// Exactly this day of the month.
    On(u32),
    /// A day in `first..=last` falling on weekday index `weekday`.
    Window { first: u32, last: u32, weekday: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayRule {
    pub label: HolidayLabel,
    pub month: u32,
    pub days: DayMatch,
}

impl HolidayRule {
    pub fn matches(&self, date: &DateRecord, origin: WeekdayOrigin) -> bool {
        if date.month() != self.month {
            return false;
        }
        match self.days {
            DayMatch::On(day) => date.day() == day,
            DayMatch::Window { first, last, weekday } => {
                (first..=last).contains(&date.day()) && date.weekday_index(origin) == weekday
            }
        }
    }
}

/// Rule table in precedence order. Order is significant.
pub const HOLIDAY_RULES: [HolidayRule; 10] = [
    HolidayRule {
        label: HolidayLabel::NewYearsDay,
        month: 1,
        days: DayMatch::On(1),
    },
    HolidayRule {
        label: HolidayLabel::MartinLutherKingDay,
        month: 1,
        days: DayMatch::Window { first: 15, last: 21, weekday: 1 },
    },
    HolidayRule {
        label: HolidayLabel::PresidentsDay,
        month: 2,
        days: DayMatch::On(18),
    },
    HolidayRule {
        label: HolidayLabel::MemorialDay,
        month: 5,
        days: DayMatch::Window { first: 25, last: 31, weekday: 1 },
    },
    HolidayRule {
        label: HolidayLabel::IndependenceDay,
        month: 7,
        days: DayMatch::On(4),
    },
    HolidayRule {
        label: HolidayLabel::LaborDay,
        month: 9,
        days: DayMatch::Window { first: 1, last: 7, weekday: 1 },
    },
    HolidayRule {
        label: HolidayLabel::ColumbusDay,
        month: 10,
        days: DayMatch::Window { first: 8, last: 14, weekday: 1 },
    },
    HolidayRule {
        label: HolidayLabel::VeteransDay,
        month: 11,
        days: DayMatch::On(11),
    },
    HolidayRule {
        label: HolidayLabel::ThanksgivingDay,
        month: 11,
        days: DayMatch::Window { first: 22, last: 28, weekday: 4 },
    },
    HolidayRule {
        label: HolidayLabel::ChristmasDay,
        month: 12,
        days: DayMatch::On(25),
    },
];

/// Classify a date under an explicit weekday origin.
pub fn classify(date: &DateRecord, origin: WeekdayOrigin) -> HolidayLabel {
    HOLIDAY_RULES
        .iter()
        .find(|rule| rule.matches(date, origin))
        .map(|rule| rule.label)
        .unwrap_or(HolidayLabel::NonHoliday)
}

/// Classify a date under the default weekday origin (Monday = 0).
pub fn classify_date(date: NaiveDate) -> HolidayLabel {
    classify(&DateRecord::from(date), WeekdayOrigin::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use proptest::prelude::*;

    fn on(y: i32, m: u32, d: u32, origin: WeekdayOrigin) -> HolidayLabel {
        classify(&DateRecord::from_ymd(y, m, d).unwrap(), origin)
    }

    #[test]
    fn thanksgiving_2018_under_default_origin() {
        // 2018-11-22 is a Thursday: index 3 with Monday = 0.
        let thursday = NaiveDate::from_ymd_opt(2018, 11, 22).unwrap();
        let friday = NaiveDate::from_ymd_opt(2018, 11, 23).unwrap();
        assert_eq!(classify_date(thursday), HolidayLabel::NonHoliday);
        assert_eq!(classify_date(friday), HolidayLabel::ThanksgivingDay);
        assert_eq!(classify_date(friday).as_str(), "Thanksgiving Day");
    }

    #[test]
    fn default_origin_matches_tuesdays_and_fridays() {
        let date = |m, d| NaiveDate::from_ymd_opt(2018, m, d).unwrap();
        assert_eq!(classify_date(date(1, 15)), HolidayLabel::NonHoliday);
        assert_eq!(classify_date(date(1, 16)), HolidayLabel::MartinLutherKingDay);
        assert_eq!(classify_date(date(11, 23)), HolidayLabel::ThanksgivingDay);
    }

    #[test]
    fn sunday_origin_shifts_floating_holidays_back_one_day() {
        let sunday = WeekdayOrigin::Sunday;
        assert_eq!(on(2018, 11, 22, sunday), HolidayLabel::ThanksgivingDay);
        assert_eq!(on(2018, 11, 23, sunday), HolidayLabel::NonHoliday);
        assert_eq!(on(2018, 1, 15, sunday), HolidayLabel::MartinLutherKingDay);
        assert_eq!(on(2018, 1, 16, sunday), HolidayLabel::NonHoliday);
    }

    #[test]
    fn every_rule_fires_in_2018() {
        let monday = WeekdayOrigin::Monday;
        let cases = [
            ((1, 1), HolidayLabel::NewYearsDay),
            ((1, 16), HolidayLabel::MartinLutherKingDay),
            ((2, 18), HolidayLabel::PresidentsDay),
            ((5, 29), HolidayLabel::MemorialDay),
            ((7, 4), HolidayLabel::IndependenceDay),
            ((9, 4), HolidayLabel::LaborDay),
            ((10, 9), HolidayLabel::ColumbusDay),
            ((11, 11), HolidayLabel::VeteransDay),
            ((11, 23), HolidayLabel::ThanksgivingDay),
            ((12, 25), HolidayLabel::ChristmasDay),
            ((3, 15), HolidayLabel::NonHoliday),
            ((12, 24), HolidayLabel::NonHoliday),
        ];
        for ((m, d), expected) in cases {
            assert_eq!(on(2018, m, d, monday), expected, "2018-{m:02}-{d:02}");
        }
    }

    #[test]
    fn fixed_dates_ignore_weekday_origin() {
        for origin in [WeekdayOrigin::Sunday, WeekdayOrigin::Monday] {
            assert_eq!(on(2021, 7, 4, origin), HolidayLabel::IndependenceDay);
            assert_eq!(on(2021, 2, 18, origin), HolidayLabel::PresidentsDay);
        }
    }

    #[test]
    fn each_year_has_one_date_per_rule() {
        for origin in [WeekdayOrigin::Sunday, WeekdayOrigin::Monday] {
            for year in 2000..2030 {
                let mut hits = std::collections::HashMap::new();
                let mut date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
                while date.year() == year {
                    let label = classify(&DateRecord::from(date), origin);
                    if label.is_holiday() {
                        *hits.entry(label).or_insert(0usize) += 1;
                    }
                    date = date.succ_opt().unwrap();
                }
                assert_eq!(hits.len(), HOLIDAY_RULES.len(), "year {year}");
                assert!(hits.values().all(|&n| n == 1), "year {year}: {hits:?}");
            }
        }
    }

    /// The holiday rules written out longhand, one branch per rule.
    fn expected_label(date: NaiveDate, origin: WeekdayOrigin) -> HolidayLabel {
        use chrono::Weekday::{Fri, Mon, Thu, Tue};
        let (month, day) = (date.month(), date.day());
        let (first_weekday, fourth_weekday) = match origin {
            WeekdayOrigin::Monday => (Tue, Fri),
            WeekdayOrigin::Sunday => (Mon, Thu),
        };
        let wd = date.weekday();

        if month == 1 && day == 1 {
            HolidayLabel::NewYearsDay
        } else if month == 1 && (15..=21).contains(&day) && wd == first_weekday {
            HolidayLabel::MartinLutherKingDay
        } else if month == 2 && day == 18 {
            HolidayLabel::PresidentsDay
        } else if month == 5 && (25..=31).contains(&day) && wd == first_weekday {
            HolidayLabel::MemorialDay
        } else if month == 7 && day == 4 {
            HolidayLabel::IndependenceDay
        } else if month == 9 && (1..=7).contains(&day) && wd == first_weekday {
            HolidayLabel::LaborDay
        } else if month == 10 && (8..=14).contains(&day) && wd == first_weekday {
            HolidayLabel::ColumbusDay
        } else if month == 11 && day == 11 {
            HolidayLabel::VeteransDay
        } else if month == 11 && (22..=28).contains(&day) && wd == fourth_weekday {
            HolidayLabel::ThanksgivingDay
        } else if month == 12 && day == 25 {
            HolidayLabel::ChristmasDay
        } else {
            HolidayLabel::NonHoliday
        }
    }

    proptest! {
        #[test]
        fn classify_agrees_with_longhand_rules(days in 0i64..20_000, monday in any::<bool>()) {
            let origin = if monday { WeekdayOrigin::Monday } else { WeekdayOrigin::Sunday };
            let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(days);
            let rec = DateRecord::from(date);
            prop_assert_eq!(classify(&rec, origin), expected_label(date, origin));
            prop_assert_eq!(classify(&rec, origin), classify(&rec, origin));
        }
    }
}
