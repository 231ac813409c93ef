use chrono::{Datelike, Duration, NaiveDate, Weekday};
use timetable_tool::{DayType, TimetableError, calendar, expand};

fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn expected_days(year: i32, month: u32) -> usize {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[test]
fn every_month_has_calendar_correct_length_and_consecutive_days() {
    for year in [1900, 1999, 2000, 2023, 2024, 2025, 2100, 9999] {
        for month in 1..=12 {
            let days = expand(year, month).unwrap();
            assert_eq!(days.len(), expected_days(year, month), "{year}-{month}");
            assert_eq!(days[0].date, NaiveDate::from_ymd_opt(year, month, 1).unwrap());
            for pair in days.windows(2) {
                assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
            }
            assert!(days.iter().all(|d| d.date.month() == month && d.date.year() == year));
        }
    }
}

#[test]
fn leap_february_has_29_days() {
    let days = expand(2024, 2).unwrap();
    assert_eq!(days.last().unwrap().date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(expand(2025, 2).unwrap().len(), 28);
}

#[test]
fn day_type_is_exhaustive_and_exclusive() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    for offset in 0..366 {
        let date = start + Duration::days(offset);
        let expected = match date.weekday() {
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        };
        assert_eq!(DayType::of(date), expected, "{date}");
    }
}

#[test]
fn expanded_dates_carry_their_day_type() {
    // 2025-06-01 is a Sunday, 2025-06-02 a Monday, 2025-06-07 a Saturday
    let days = expand(2025, 6).unwrap();
    assert_eq!(days[0].day_type, DayType::Sunday);
    assert_eq!(days[1].day_type, DayType::Weekday);
    assert_eq!(days[6].day_type, DayType::Saturday);
    let weekdays = days.iter().filter(|d| d.day_type == DayType::Weekday).count();
    assert_eq!(weekdays, 21);
}

#[test]
fn month_outside_range_is_invalid_range() {
    for month in [0, 13, 99] {
        assert!(matches!(
            expand(2025, month),
            Err(TimetableError::InvalidRange(_))
        ));
    }
    assert!(matches!(
        calendar::month_bounds(10_000, 1),
        Err(TimetableError::InvalidRange(_))
    ));
}
