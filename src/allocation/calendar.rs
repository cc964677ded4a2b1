//! Month enumeration and working-day detection.
//!
//! This module lists the dates of a month and tells working days apart from
//! weekends and holidays.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// What kind of day a date is for planning purposes.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::DayKind;
///
/// assert!(DayKind::Working.is_working());
/// assert!(!DayKind::Holiday.is_working());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Monday through Friday and not a holiday.
    Working,
    /// Saturday or Sunday.
    Weekend,
    /// A weekday declared as a holiday.
    Holiday,
}

impl DayKind {
    /// Returns true for [`DayKind::Working`].
    pub fn is_working(self) -> bool {
        self == DayKind::Working
    }
}

impl std::fmt::Display for DayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayKind::Working => write!(f, "Working"),
            DayKind::Weekend => write!(f, "Weekend"),
            DayKind::Holiday => write!(f, "Holiday"),
        }
    }
}

/// Classifies a date against a holiday set.
///
/// Weekends win over holidays: a holiday falling on a Saturday is reported
/// as [`DayKind::Weekend`].
pub fn classify_day(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> DayKind {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayKind::Weekend,
        _ if holidays.contains(&date) => DayKind::Holiday,
        _ => DayKind::Working,
    }
}

/// Checks whether a date is a working day.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::is_working_day;
/// use chrono::NaiveDate;
/// use std::collections::BTreeSet;
///
/// let holidays = BTreeSet::from([NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()]);
///
/// // 2025-10-01 is a Wednesday declared as holiday
/// assert!(!is_working_day(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(), &holidays));
/// // 2025-10-02 is a Thursday
/// assert!(is_working_day(NaiveDate::from_ymd_opt(2025, 10, 2).unwrap(), &holidays));
/// // 2025-10-04 is a Saturday
/// assert!(!is_working_day(NaiveDate::from_ymd_opt(2025, 10, 4).unwrap(), &holidays));
/// ```
pub fn is_working_day(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
    classify_day(date, holidays).is_working()
}

/// Iterator over every date of one month.
///
/// Cloning the iterator restarts from the clone's position, so a fresh
/// [`all_days_of`] call always starts again at day 1.
#[derive(Debug, Clone)]
pub struct MonthDays {
    next: Option<NaiveDate>,
    month: u32,
}

impl Iterator for MonthDays {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| d.month() == self.month);
        Some(current)
    }
}

/// Lists every date of a month, from the 1st to the last day.
///
/// # Errors
///
/// Returns [`PlannerError::InvalidPeriod`] if `month` is not 1 to 12 or the
/// year is outside the range chrono can represent.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::all_days_of;
///
/// assert_eq!(all_days_of(2, 2024).unwrap().count(), 29);
/// assert_eq!(all_days_of(2, 2025).unwrap().count(), 28);
/// assert!(all_days_of(13, 2025).is_err());
/// ```
pub fn all_days_of(month: u32, year: i32) -> PlannerResult<MonthDays> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(PlannerError::InvalidPeriod { month, year })?;
    Ok(MonthDays {
        next: Some(first),
        month,
    })
}

/// Lists the working days of a month, in order.
pub fn working_days(
    month: u32,
    year: i32,
    holidays: &BTreeSet<NaiveDate>,
) -> PlannerResult<Vec<NaiveDate>> {
    Ok(all_days_of(month, year)?
        .filter(|d| is_working_day(*d, holidays))
        .collect())
}

/// A date of the month tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The date.
    pub date: NaiveDate,
    /// Whether the date is worked, a weekend or a holiday.
    pub kind: DayKind,
}

impl CalendarDay {
    /// Returns true if hours are planned on this date.
    pub fn is_working_day(&self) -> bool {
        self.kind.is_working()
    }
}

/// Every date of one month, tagged working or not.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::WorkingDayCalendar;
/// use chrono::NaiveDate;
/// use std::collections::BTreeSet;
///
/// let holidays = BTreeSet::from([
///     NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
/// ]);
/// let calendar = WorkingDayCalendar::build(10, 2025, &holidays).unwrap();
///
/// assert_eq!(calendar.days().len(), 31);
/// assert_eq!(calendar.working_day_count(), 21);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDayCalendar {
    month: u32,
    year: i32,
    days: Vec<CalendarDay>,
}

impl WorkingDayCalendar {
    /// Tags every date of the month against the holiday set.
    ///
    /// Holidays outside the month are ignored.
    pub fn build(month: u32, year: i32, holidays: &BTreeSet<NaiveDate>) -> PlannerResult<Self> {
        let days = all_days_of(month, year)?
            .map(|date| CalendarDay {
                date,
                kind: classify_day(date, holidays),
            })
            .collect();
        Ok(Self { month, year, days })
    }

    /// The month, 1 to 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Every date of the month, in order.
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Every date of the month, without tags.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }

    /// Working days only, in order.
    pub fn working_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days
            .iter()
            .filter(|d| d.is_working_day())
            .map(|d| d.date)
    }

    /// Number of working days in the month.
    pub fn working_day_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_working_day()).count()
    }
}
