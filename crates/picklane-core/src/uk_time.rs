//! UK civil dates without a timezone database.
//!
//! Ship-by deadlines are business dates in Europe/London. The clocks
//! go forward at 01:00 UTC on the last Sunday of March and back at
//! 01:00 UTC on the last Sunday of October, so the offset can be
//! computed directly from the instant.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// Converts a UTC instant to the civil date observed in the UK.
#[must_use]
pub fn uk_date(instant: DateTime<Utc>) -> NaiveDate {
    if in_british_summer_time(instant) {
        (instant + Duration::hours(1)).date_naive()
    } else {
        instant.date_naive()
    }
}

/// True when the instant falls inside British Summer Time.
#[must_use]
pub fn in_british_summer_time(instant: DateTime<Utc>) -> bool {
    let year = instant.year();
    let (Some(start), Some(end)) = (clock_change(year, 3), clock_change(year, 10)) else {
        return false;
    };
    instant >= start && instant < end
}

/// True for Monday through Friday.
#[must_use]
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 01:00 UTC on the last Sunday of the given month.
fn clock_change(year: i32, month: u32) -> Option<DateTime<Utc>> {
    let last_day = last_day_of_month(year, month)?;
    let back_to_sunday = i64::from(last_day.weekday().num_days_from_sunday());
    let last_sunday = last_day - Duration::days(back_to_sunday);
    Some(last_sunday.and_hms_opt(1, 0, 0)?.and_utc())
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    Some(NaiveDate::from_ymd_opt(next_year, next_month, 1)? - Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn winter_dates_stay_on_the_utc_day() {
        let late_evening = utc(2026, 1, 15, 23, 30);
        assert_eq!(uk_date(late_evening), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn summer_evenings_roll_into_the_next_day() {
        let late_evening = utc(2026, 7, 1, 23, 30);
        assert_eq!(uk_date(late_evening), NaiveDate::from_ymd_opt(2026, 7, 2).unwrap());
    }

    #[test]
    fn clocks_change_on_the_last_sundays_of_2026() {
        assert!(!in_british_summer_time(utc(2026, 3, 29, 0, 59)));
        assert!(in_british_summer_time(utc(2026, 3, 29, 1, 0)));
        assert!(in_british_summer_time(utc(2026, 10, 25, 0, 59)));
        assert!(!in_british_summer_time(utc(2026, 10, 25, 1, 0)));
    }

    #[test]
    fn weekends_are_not_business_days() {
        assert!(is_business_day(NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()));
        assert!(!is_business_day(NaiveDate::from_ymd_opt(2026, 8, 22).unwrap()));
        assert!(!is_business_day(NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()));
    }
}
