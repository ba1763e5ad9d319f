use calends::{
    civil::{
        civil_from_days, days_from_civil, days_in_month, is_leap_year, Date,
        Month, Overflow, Weekday, Year, YearMonthLast,
    },
    duration::{Days, Months, Years},
};

use crate::Result;

#[test]
fn serial_day_roundtrip_across_eras() {
    let dates = [
        Date::MIN,
        Date::new(-1, 12, 31),
        Date::new(0, 1, 1),
        Date::new(0, 2, 29),
        Date::new(1600, 2, 29),
        Date::new(1899, 12, 31),
        Date::UNIX_EPOCH,
        Date::new(2000, 2, 29),
        Date::new(2024, 12, 31),
        Date::MAX,
    ];
    for date in dates {
        let days = days_from_civil(date.year(), date.month(), date.day());
        assert_eq!(civil_from_days(days), date, "serial day {days}");
    }
    for n in -5_000_000..=-4_999_000 {
        let date = civil_from_days(Days::new(n));
        let days = days_from_civil(date.year(), date.month(), date.day());
        assert_eq!(days, Days::new(n));
    }
}

quickcheck::quickcheck! {
    fn prop_days_from_civil_inverts_civil_from_days(n: i32) -> bool {
        // Keep the day count within the range of supported years.
        let n = i64::from(n) % 11_000_000;
        let date = civil_from_days(Days::new(n));
        date.ok()
            && days_from_civil(date.year(), date.month(), date.day())
                == Days::new(n)
    }
}

#[test]
fn leap_rule() {
    assert_eq!(days_in_month(2000, 2), 29);
    assert_eq!(days_in_month(1900, 2), 28);
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2023, 2), 28);
    assert!(is_leap_year(-4));
    assert!(!is_leap_year(-100));
    assert!(Year::new(2400).is_leap());
    assert_eq!(Year::new(2100).days(), 365);
}

#[test]
fn month_overflow_repair() -> Result {
    let d = Date::new(2000, 1, 30) + Months::new(1);
    assert_eq!(d.to_string(), "2000-02-30");
    assert!(!d.ok());
    assert_eq!(d.repair(Overflow::Clamp), Date::new(2000, 2, 29));
    assert_eq!(d.repair(Overflow::CarryOver), Date::new(2000, 3, 1));

    let d = Date::new(2001, 1, 31).checked_add_months(Months::new(1))?;
    assert_eq!(d.clamp_day(), Date::new(2001, 2, 28));
    assert_eq!(d.carry_over(), Date::new(2001, 3, 3));

    let d = Date::new(2000, 2, 29) + Years::new(1);
    assert!(!d.ok());
    assert_eq!(d.clamp_day(), Date::new(2001, 2, 28));
    assert_eq!(d.carry_over(), Date::new(2001, 3, 1));

    let valid = Date::new(2000, 2, 29) + Years::new(4);
    assert!(valid.ok());
    assert_eq!(valid.repair(Overflow::Clamp), valid);
    assert_eq!(valid.repair(Overflow::CarryOver), valid);

    Ok(())
}

#[test]
fn month_arithmetic_keeps_the_day() {
    let d = Date::new(2000, 1, 30);
    assert_eq!(d + Months::new(1) - Months::new(1), d);
    assert_eq!(d + Months::new(2), Date::new(2000, 3, 30));
    assert_eq!(d + Months::new(2) - Months::new(2), d);
    assert_eq!(d - Months::new(1), Date::new(1999, 12, 30));
    assert_eq!(d + Months::new(-13), Date::new(1998, 12, 30));
    assert_eq!(d + Months::new(25), Date::new(2002, 2, 30));

    let mut d = Date::new(2023, 12, 31);
    d += Months::new(2);
    assert_eq!(d, Date::new(2024, 2, 31));
    d -= Years::new(1);
    assert_eq!(d, Date::new(2023, 2, 31));
}

#[test]
fn year_overflow_is_an_error() {
    let err = Date::new(32767, 12, 1)
        .checked_add_months(Months::new(1))
        .unwrap_err();
    assert!(err.is_range());
    insta::assert_snapshot!(
        err,
        @"parameter 'year' with value 32768 is not in the required range of -32767..=32767",
    );

    let err =
        Date::new(-32767, 1, 1).checked_sub_years(Years::new(2)).unwrap_err();
    assert!(err.is_range());
}

#[test]
fn arithmetic_never_produces_the_invalid_year() {
    let first = Date::new(-32767, 1, 1);
    for result in [
        first.checked_sub_years(Years::new(1)),
        first.checked_sub_months(Months::new(1)),
        first.checked_add_months(Months::new(-12)),
    ] {
        let err = result.unwrap_err();
        assert!(err.is_range(), "{err}");
    }

    let last = Date::new(32767, 12, 31);
    assert!(last.checked_add_years(Years::new(1)).is_err());
    assert!(last.checked_add_months(Months::new(1)).is_err());
    assert_eq!(
        last.checked_sub_years(Years::new(1)).map(|d| d.ok()).ok(),
        Some(true),
    );
}

#[test]
fn age_boundary() {
    let birth = Date::new(2013, 7, 14);
    assert_eq!(birth.age_on(Date::new(2016, 7, 23)), Years::new(3));

    let birth = Date::new(2010, 8, 21);
    assert_eq!(birth.age_on(Date::new(2015, 8, 20)), Years::new(4));
    assert_eq!(birth.age_on(Date::new(2015, 8, 21)), Years::new(5));
    assert_eq!(birth.age_on(Date::new(2015, 8, 22)), Years::new(5));
}

#[test]
fn age_of_a_leap_day_birth() {
    let birth = Date::new(2000, 2, 29);
    assert_eq!(birth.age_on(Date::new(2001, 2, 28)), Years::new(0));
    assert_eq!(birth.age_on(Date::new(2001, 3, 1)), Years::new(1));
    assert_eq!(birth.age_on(Date::new(2004, 2, 28)), Years::new(3));
    assert_eq!(birth.age_on(Date::new(2004, 2, 29)), Years::new(4));
}

#[test]
fn serial_days_on_both_time_lines() {
    let days = Date::new(2010, 2, 28).to_sys_days() + Days::new(2);
    assert_eq!(Date::from_sys_days(days), Date::new(2010, 3, 2));

    let days = Date::new(2010, 2, 28).to_local_days() - Days::new(59);
    assert_eq!(Date::from_local_days(days), Date::new(2009, 12, 31));
    assert_eq!(days.to_string(), "2009-12-31");
}

#[test]
fn weekdays_of_a_month() {
    let march = (Year::new(2024), Month::MARCH);
    let second_sunday = Weekday::Sunday.nth(2).in_month(march.0, march.1);
    assert_eq!(second_sunday, Date::new(2024, 3, 10));
    assert_eq!(second_sunday.weekday_indexed(), Weekday::Sunday.nth(2));

    let last_friday =
        Weekday::Friday.last().in_month(Year::new(1999), Month::DECEMBER);
    assert_eq!(last_friday, Date::new(1999, 12, 31));
    assert_eq!(last_friday.weekday(), Weekday::Friday);

    let fifth = Weekday::Friday.nth(5).in_month(Year::new(2024), Month::MAY);
    assert!(fifth.ok());
    assert_eq!(fifth, Date::new(2024, 5, 31));

    let missing = Weekday::Friday.nth(5).in_month(Year::new(2024), Month::JUNE);
    assert!(!missing.ok());
    assert_eq!(missing.carry_over(), Date::new(2024, 7, 5));
}

#[test]
fn last_day_of_month() {
    let last = YearMonthLast::new(Year::new(2024), Month::FEBRUARY);
    assert!(last.ok());
    assert_eq!(last, Date::new(2024, 2, 29));
    assert_eq!(last.to_string(), "2024-02-last");

    let last = YearMonthLast::new(Year::new(2023), Month::FEBRUARY);
    assert_eq!(Date::from(last), Date::new(2023, 2, 28));
    assert_ne!(Date::new(2023, 2, 29), last);
    assert_eq!(Date::new(2023, 2, 17).last_of_month(), last);
}
