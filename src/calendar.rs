use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TimetableError, TimetableResult};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Service day classification used as the lookup key into a source timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Weekday, DayType::Saturday, DayType::Sunday];

    /// Monday..Friday are weekdays; Saturday and Sunday are their own types.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday.num_days_from_monday() {
            0..=4 => DayType::Weekday,
            5 => DayType::Saturday,
            _ => DayType::Sunday,
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Saturday => "saturday",
            DayType::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedDate {
    pub date: NaiveDate,
    pub day_type: DayType,
}

impl ExpandedDate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            day_type: DayType::of(date),
        }
    }
}

pub fn validate_year(year: i32) -> TimetableResult<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TimetableError::invalid_range(format!(
            "year {year} is outside {MIN_YEAR}..={MAX_YEAR}"
        )));
    }
    Ok(())
}

/// Parse a user supplied year, e.g. from a form field.
pub fn parse_year(input: &str) -> TimetableResult<i32> {
    let year = input
        .trim()
        .parse::<i32>()
        .map_err(|_| TimetableError::invalid_range(format!("invalid year '{input}'")))?;
    validate_year(year)?;
    Ok(year)
}

/// First and last calendar day of the month.
pub fn month_bounds(year: i32, month: u32) -> TimetableResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(TimetableError::invalid_range(format!(
            "month {month} is outside 1..=12"
        )));
    }
    validate_year(year)?;

    let out_of_range =
        || TimetableError::invalid_range(format!("cannot build dates for {year}-{month:02}"));
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(out_of_range)?;

    Ok((first, next_month_start - Duration::days(1)))
}

/// Every day of `year`-`month` in ascending order, classified by day type.
pub fn expand(year: i32, month: u32) -> TimetableResult<Vec<ExpandedDate>> {
    let (start, end) = month_bounds(year, month)?;
    let mut days = Vec::with_capacity(31);
    let mut current = start;

    while current <= end {
        days.push(ExpandedDate::new(current));
        current = current + Duration::days(1);
    }
    Ok(days)
}
