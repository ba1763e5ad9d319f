use crate::{
    civil::{Date, Day, Month, Year},
    duration::Days,
};

// Constants used for converting between Gregorian calendar dates and Unix
// epoch days.
//
// See: http://howardhinnant.github.io/date_algorithms.html
const DAYS_IN_ERA: i64 = 146_097;
const DAYS_FROM_0000_01_01_TO_1970_01_01: i64 = 719_468;

/// Returns true if and only if the given year is a leap year in the
/// proleptic Gregorian calendar.
///
/// A leap year is divisible by 4, except for years divisible by 100 that
/// aren't also divisible by 400.
///
/// # Example
///
/// ```
/// use calends::civil::is_leap_year;
///
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(2023));
/// assert!(is_leap_year(-4));
/// ```
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    // A multiple of 25 is a leap year only when it is a multiple of 400,
    // which for multiples of 25 is the same as being a multiple of 16.
    let d = if year % 25 != 0 { 4 } else { 16 };
    (year % d) == 0
}

/// Returns the number of days in the given month of the given year.
///
/// When `month` is not in the range `1..=12`, this returns `0`. So no day
/// is ever valid in such a month.
///
/// # Example
///
/// ```
/// use calends::civil::days_in_month;
///
/// assert_eq!(days_in_month(2000, 2), 29);
/// assert_eq!(days_in_month(1900, 2), 28);
/// assert_eq!(days_in_month(2024, 4), 30);
/// assert_eq!(days_in_month(2024, 13), 0);
/// ```
#[inline]
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        _ => 0,
    }
}

/// Converts a year, month and day to the number of days since
/// `1970-01-01`.
///
/// This is a closed form transformation that works for any inputs, valid or
/// not. It is linear in the day and in the flat month index
/// `year * 12 + (month - 1)`. So `2000-02-30` maps to the same serial day as
/// `2000-03-01`, and `2000-13-01` maps to the same serial day as
/// `2001-01-01`.
///
/// # Example
///
/// ```
/// use calends::{civil::{days_from_civil, Day, Month, Year}, duration::Days};
///
/// assert_eq!(days_from_civil(Year::new(1970), Month::JANUARY, Day::new(3)), Days::new(2));
/// assert_eq!(
///     days_from_civil(Year::new(2000), Month::FEBRUARY, Day::new(30)),
///     days_from_civil(Year::new(2000), Month::MARCH, Day::new(1)),
/// );
/// ```
#[inline]
pub fn days_from_civil(year: Year, month: Month, day: Day) -> Days {
    Days::new(to_serial_day(
        i64::from(year.get()),
        i64::from(month.get()),
        i64::from(day.get()),
    ))
}

/// Converts a number of days since `1970-01-01` to a calendar date.
///
/// This is the inverse of [`days_from_civil`] for valid dates. Day counts
/// outside the range of [`Date::MIN`] and [`Date::MAX`] saturate to those
/// bounds.
///
/// # Example
///
/// ```
/// use calends::{civil::{civil_from_days, Date}, duration::Days};
///
/// assert_eq!(civil_from_days(Days::new(0)), Date::new(1970, 1, 1));
/// assert_eq!(civil_from_days(Days::new(-1)), Date::new(1969, 12, 31));
/// assert_eq!(civil_from_days(Days::new(11_016)), Date::new(2000, 2, 29));
/// ```
#[inline]
pub fn civil_from_days(days: Days) -> Date {
    Date::from_serial_day(days.count())
}

/// Converts any year, month and day triple to a serial day.
///
/// The month is normalized through the flat month index first, so it may be
/// out of range. The day may be out of range too.
pub(crate) const fn to_serial_day(year: i64, month: i64, day: i64) -> i64 {
    // ref: http://howardhinnant.github.io/date_algorithms.html
    let flat = year * 12 + (month - 1);
    let (year, month) = (flat.div_euclid(12), flat.rem_euclid(12) + 1);

    let year = if month <= 2 { year - 1 } else { year };
    let month = if month > 2 { month - 3 } else { month + 9 };
    let era = year.div_euclid(400);
    let year_of_era = year.rem_euclid(400);
    let day_of_year = (153 * month + 2) / 5 + day - 1;
    let day_of_era =
        year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_IN_ERA + day_of_era - DAYS_FROM_0000_01_01_TO_1970_01_01
}

/// Converts a serial day to a year, month and day.
///
/// The year returned is wider than `i16` so that callers can detect values
/// outside the supported range.
pub(crate) const fn from_serial_day(days: i64) -> (i64, u8, u8) {
    // ref: http://howardhinnant.github.io/date_algorithms.html
    let days = days + DAYS_FROM_0000_01_01_TO_1970_01_01;
    let era = days.div_euclid(DAYS_IN_ERA);
    let day_of_era = days.rem_euclid(DAYS_IN_ERA);
    let year_of_era = (day_of_era - day_of_era / 1_460 + day_of_era / 36_524
        - day_of_era / (DAYS_IN_ERA - 1))
        / 365;
    let year = year_of_era + era * 400;
    let day_of_year =
        day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month = (day_of_year * 5 + 2) / 153;
    let day = day_of_year - (153 * month + 2) / 5 + 1;
    let month = if month < 10 { month + 3 } else { month - 9 };
    let year = if month <= 2 { year + 1 } else { year };
    (year, month as u8, day as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert!(is_leap_year(0));
        assert!(is_leap_year(-400));
        assert!(!is_leap_year(-100));
        assert!(!is_leap_year(-1));
    }

    #[test]
    fn known_serial_days() {
        assert_eq!(to_serial_day(1970, 1, 1), 0);
        assert_eq!(to_serial_day(1970, 1, 3), 2);
        assert_eq!(to_serial_day(1969, 12, 31), -1);
        assert_eq!(to_serial_day(2000, 3, 1), 11_017);
        assert_eq!(to_serial_day(0, 3, 1), -719_468);
        assert_eq!(from_serial_day(-719_468), (0, 3, 1));
        assert_eq!(from_serial_day(11_016), (2000, 2, 29));
    }

    #[test]
    fn linear_extension() {
        assert_eq!(to_serial_day(2000, 2, 30), to_serial_day(2000, 3, 1));
        assert_eq!(to_serial_day(2000, 13, 1), to_serial_day(2001, 1, 1));
        assert_eq!(to_serial_day(2000, 0, 31), to_serial_day(1999, 12, 31));
        assert_eq!(to_serial_day(2000, 3, 0), to_serial_day(2000, 2, 29));
        assert_eq!(to_serial_day(1999, 1, 365), to_serial_day(1999, 12, 31));
    }

    #[test]
    fn roundtrip_serial_day_date() {
        for year in -9999..=9999 {
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month) {
                    let serial = to_serial_day(
                        i64::from(year),
                        i64::from(month),
                        i64::from(day),
                    );
                    assert_eq!(
                        from_serial_day(serial),
                        (i64::from(year), month, day),
                    );
                }
            }
        }
    }

    #[test]
    fn roundtrip_extremes() {
        for (year, month, day) in
            [(-32767, 1, 1), (-32768, 1, 1), (32767, 12, 31)]
        {
            let serial = to_serial_day(year, i64::from(month), i64::from(day));
            assert_eq!(from_serial_day(serial), (year, month, day));
        }
    }

    quickcheck::quickcheck! {
        fn prop_serial_day_roundtrip(serial: i32) -> bool {
            let serial = i64::from(serial);
            let (year, month, day) = from_serial_day(serial);
            to_serial_day(year, i64::from(month), i64::from(day)) == serial
        }
    }
}
