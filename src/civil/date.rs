use crate::{
    civil::{
        days_in_month,
        gregorian::{self, to_serial_day},
        Day, Month, NthWeekday, Weekday, Year, YearMonthLast,
    },
    duration::{period, Months, Years},
    error::Error,
    instant::{Instant, LocalTime},
};

/// A representation of a civil date in the proleptic Gregorian calendar.
///
/// A `Date` value corresponds to a triple of year, month and day. Unlike
/// many date types, a `Date` may be _invalid_: constructing one never fails,
/// and calendar arithmetic like adding a month to `2000-01-30` produces the
/// invalid date `2000-02-30` instead of silently picking a nearby valid
/// date. Use [`Date::ok`] to check validity, and one of the repair routines
/// ([`Date::clamp_day`], [`Date::carry_over`] or [`Date::repair`]) to turn an
/// invalid date into a valid one.
///
/// # Civil dates
///
/// A `Date` value behaves without regard to daylight saving time or time
/// zones in general. When converted to a time point (with
/// [`Date::to_sys_days`] or [`Date::to_local_days`]), days are always
/// precisely `86,400` seconds long.
///
/// # Comparisons
///
/// Dates are ordered lexicographically by year, then month, then day. This
/// ordering is also defined for invalid dates, so `2001-02-29` sorts after
/// `2001-02-28` and before `2001-03-01`.
///
/// ```
/// use calends::civil::Date;
///
/// let d1 = Date::new(2024, 3, 11);
/// let d2 = Date::new(2025, 1, 31);
/// assert!(d1 < d2);
/// assert!(Date::new(2001, 2, 28) < Date::new(2001, 2, 29));
/// ```
///
/// # Arithmetic
///
/// Adding [`Months`] or [`Years`] changes only the year and month, never
/// the day:
///
/// ```
/// use calends::{civil::Date, duration::Months};
///
/// let d = Date::new(2000, 1, 30) + Months::new(1);
/// assert_eq!(d, Date::new(2000, 2, 30));
/// assert!(!d.ok());
/// assert_eq!(d.clamp_day(), Date::new(2000, 2, 29));
/// assert_eq!(d.carry_over(), Date::new(2000, 3, 1));
/// ```
///
/// Arithmetic in days goes through the serial day number:
///
/// ```
/// use calends::{civil::Date, duration::Days};
///
/// let d = Date::new(2010, 2, 28).to_sys_days() + Days::new(2);
/// assert_eq!(Date::from(d), Date::new(2010, 3, 2));
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date {
    year: Year,
    month: Month,
    day: Day,
}

/// The minimum serial day, corresponding to `Date::MIN`.
const MIN_SERIAL_DAY: i64 = to_serial_day(-32767, 1, 1);
/// The maximum serial day, corresponding to `Date::MAX`.
const MAX_SERIAL_DAY: i64 = to_serial_day(32767, 12, 31);

impl Date {
    /// The minimum valid date.
    pub const MIN: Date = Date::new(-32767, 1, 1);

    /// The maximum valid date.
    pub const MAX: Date = Date::new(32767, 12, 31);

    /// The Unix epoch, `1970-01-01`.
    pub const UNIX_EPOCH: Date = Date::new(1970, 1, 1);

    /// Creates a new date from its year, month and day.
    ///
    /// This never fails. The resulting date may be invalid, which can be
    /// checked with [`Date::ok`].
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// assert!(Date::new(2024, 2, 29).ok());
    /// assert!(!Date::new(2023, 2, 29).ok());
    /// assert!(!Date::new(2023, 13, 1).ok());
    /// ```
    #[inline]
    pub const fn new(year: i16, month: u8, day: u8) -> Date {
        Date::from_parts(Year::new(year), Month::new(month), Day::new(day))
    }

    /// Creates a new date from typed fields.
    #[inline]
    pub const fn from_parts(year: Year, month: Month, day: Day) -> Date {
        Date { year, month, day }
    }

    /// Returns the year of this date.
    #[inline]
    pub const fn year(self) -> Year {
        self.year
    }

    /// Returns the month of this date.
    #[inline]
    pub const fn month(self) -> Month {
        self.month
    }

    /// Returns the day of this date.
    #[inline]
    pub const fn day(self) -> Day {
        self.day
    }

    /// Returns true if and only if this is a valid Gregorian date.
    ///
    /// That is, the year is valid, the month is in `1..=12` and the day is
    /// in `1..=N`, where `N` is the number of days in the month.
    #[inline]
    pub const fn ok(self) -> bool {
        self.year.ok()
            && self.month.ok()
            && self.day.get() >= 1
            && self.day.get() <= self.days_in_month()
    }

    /// Returns the number of days in this date's month.
    ///
    /// This is `0` when the month is invalid.
    #[inline]
    pub const fn days_in_month(self) -> u8 {
        days_in_month(self.year.get() as i32, self.month.get())
    }

    /// Returns the last day of this date's month.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// assert_eq!(Date::new(2024, 2, 10).last_of_month(), Date::new(2024, 2, 29));
    /// ```
    #[inline]
    pub const fn last_of_month(self) -> Date {
        YearMonthLast::new(self.year, self.month).to_date()
    }

    /// Returns the day of the week of this date.
    ///
    /// This is also defined for invalid dates, through the same linear
    /// extension that [`Date::carry_over`] uses.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::{Date, Weekday};
    ///
    /// assert_eq!(Date::new(2000, 1, 1).weekday(), Weekday::Saturday);
    /// assert_eq!(Date::new(1970, 1, 1).weekday(), Weekday::Thursday);
    /// ```
    #[inline]
    pub fn weekday(self) -> Weekday {
        Weekday::from_serial_day(self.serial_day())
    }

    /// Returns which occurrence of its weekday this date is within its
    /// month.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::{Date, Weekday};
    ///
    /// let nth = Date::new(2000, 1, 1).weekday_indexed();
    /// assert_eq!(nth, Weekday::Saturday.nth(1));
    /// let nth = Date::new(2024, 11, 28).weekday_indexed();
    /// assert_eq!(nth, Weekday::Thursday.nth(4));
    /// ```
    #[inline]
    pub fn weekday_indexed(self) -> NthWeekday {
        let nth = self.day.get().saturating_sub(1) / 7 + 1;
        self.weekday().nth(nth)
    }

    /// Returns this date as a time point on the system time line, at day
    /// precision.
    #[inline]
    pub fn to_sys_days(self) -> Instant<period::Day> {
        Instant::from_since_epoch(crate::duration::Days::new(self.serial_day()))
    }

    /// Returns this date as a time point on the local time line, at day
    /// precision.
    #[inline]
    pub fn to_local_days(self) -> LocalTime<period::Day> {
        LocalTime::from_since_epoch(crate::duration::Days::new(
            self.serial_day(),
        ))
    }

    /// Returns the date of a system time point at day precision.
    ///
    /// Time points outside the range of [`Date::MIN`] and [`Date::MAX`]
    /// saturate to those bounds.
    #[inline]
    pub fn from_sys_days(days: Instant<period::Day>) -> Date {
        Date::from_serial_day(days.serial_day())
    }

    /// Returns the date of a local time point at day precision.
    ///
    /// Time points outside the range of [`Date::MIN`] and [`Date::MAX`]
    /// saturate to those bounds.
    #[inline]
    pub fn from_local_days(days: LocalTime<period::Day>) -> Date {
        Date::from_serial_day(days.serial_day())
    }

    /// Adds the given number of calendar months, leaving the day unchanged.
    ///
    /// The year and month are combined into a flat month index, the months
    /// are added to it and the result is split back into a year and month.
    /// The result may be invalid when the day doesn't exist in the new
    /// month.
    ///
    /// # Errors
    ///
    /// When the resulting year is outside `-32767..=32767`.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{civil::Date, duration::Months};
    ///
    /// let d = Date::new(2000, 1, 30);
    /// assert_eq!(d.checked_add_months(Months::new(2))?, Date::new(2000, 3, 30));
    /// assert_eq!(d.checked_add_months(Months::new(-13))?, Date::new(1998, 12, 30));
    /// assert!(Date::new(32767, 12, 1).checked_add_months(Months::new(1)).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn checked_add_months(self, months: Months) -> Result<Date, Error> {
        self.add_months(i128::from(months.count()))
    }

    /// Subtracts the given number of calendar months, leaving the day
    /// unchanged.
    ///
    /// # Errors
    ///
    /// When the resulting year is outside `-32767..=32767`.
    pub fn checked_sub_months(self, months: Months) -> Result<Date, Error> {
        self.add_months(-i128::from(months.count()))
    }

    /// Adds the given number of calendar years, leaving the month and day
    /// unchanged.
    ///
    /// The result may be invalid, for example when adding a year to a
    /// February 29.
    ///
    /// # Errors
    ///
    /// When the resulting year is outside `-32767..=32767`.
    pub fn checked_add_years(self, years: Years) -> Result<Date, Error> {
        self.add_years(i128::from(years.count()))
    }

    /// Subtracts the given number of calendar years, leaving the month and
    /// day unchanged.
    ///
    /// # Errors
    ///
    /// When the resulting year is outside `-32767..=32767`.
    pub fn checked_sub_years(self, years: Years) -> Result<Date, Error> {
        self.add_years(-i128::from(years.count()))
    }

    /// Repairs an invalid date by replacing its day with the last day of
    /// its month.
    ///
    /// Valid dates are returned unchanged. A day of `0` becomes `1`. Dates
    /// with a month outside `1..=12` have no last day and are returned
    /// unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// assert_eq!(Date::new(2001, 2, 30).clamp_day(), Date::new(2001, 2, 28));
    /// assert_eq!(Date::new(2001, 4, 31).clamp_day(), Date::new(2001, 4, 30));
    /// ```
    pub fn clamp_day(self) -> Date {
        let last = self.days_in_month();
        if last == 0 {
            return self;
        }
        let day = self.day.get().clamp(1, last);
        Date { day: Day::new(day), ..self }
    }

    /// Repairs an invalid date by spilling excess days into the following
    /// month.
    ///
    /// This reinterprets the date as a serial day number (which is defined
    /// for invalid dates through linear extension) and converts back. Valid
    /// dates are returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Date;
    ///
    /// assert_eq!(Date::new(2000, 2, 30).carry_over(), Date::new(2000, 3, 1));
    /// assert_eq!(Date::new(2001, 2, 30).carry_over(), Date::new(2001, 3, 2));
    /// assert_eq!(Date::new(2001, 13, 1).carry_over(), Date::new(2002, 1, 1));
    /// ```
    pub fn carry_over(self) -> Date {
        if self.ok() {
            return self;
        }
        Date::from_serial_day(self.serial_day())
    }

    /// Repairs an invalid date with the given policy.
    ///
    /// This is a convenience for choosing between [`Date::clamp_day`] and
    /// [`Date::carry_over`] at runtime.
    pub fn repair(self, policy: Overflow) -> Date {
        match policy {
            Overflow::Clamp => self.clamp_day(),
            Overflow::CarryOver => self.carry_over(),
        }
    }

    /// Returns the age, in whole years, on `today` of someone born on this
    /// date.
    ///
    /// The age increments exactly on the anniversary. For a February 29
    /// birth, the anniversary in a non-leap year is March 1: the invalid
    /// date February 29 sorts after February 28 and before March 1.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{civil::Date, duration::Years};
    ///
    /// let birth = Date::new(2010, 8, 21);
    /// assert_eq!(birth.age_on(Date::new(2015, 8, 20)), Years::new(4));
    /// assert_eq!(birth.age_on(Date::new(2015, 8, 21)), Years::new(5));
    ///
    /// let leapling = Date::new(2004, 2, 29);
    /// assert_eq!(leapling.age_on(Date::new(2005, 2, 28)), Years::new(0));
    /// assert_eq!(leapling.age_on(Date::new(2005, 3, 1)), Years::new(1));
    /// ```
    pub fn age_on(self, today: Date) -> Years {
        let anniversary = Date { year: today.year, ..self };
        let mut years = i64::from(today.year.get()) - i64::from(self.year.get());
        if today < anniversary {
            years -= 1;
        }
        Years::new(years)
    }
}

/// Crate internal APIs.
impl Date {
    /// Returns the serial day of this date. Defined for invalid dates too.
    #[inline]
    pub(crate) const fn serial_day(self) -> i64 {
        to_serial_day(
            self.year.get() as i64,
            self.month.get() as i64,
            self.day.get() as i64,
        )
    }

    /// Converts a serial day to a date, saturating at `Date::MIN` and
    /// `Date::MAX`.
    #[inline]
    pub(crate) fn from_serial_day(days: i64) -> Date {
        let days = days.clamp(MIN_SERIAL_DAY, MAX_SERIAL_DAY);
        let (year, month, day) = gregorian::from_serial_day(days);
        // OK since the serial day is clamped to the range of valid years.
        let year = year as i16;
        Date::new(year, month, day)
    }

    fn add_months(self, months: i128) -> Result<Date, Error> {
        let flat = i128::from(self.year.get()) * 12
            + i128::from(self.month.get())
            - 1
            + months;
        let year = flat.div_euclid(12);
        let month = flat.rem_euclid(12) + 1;
        let year = checked_year(year)?;
        // OK since `rem_euclid(12) + 1` is in `1..=12`.
        let month = month as u8;
        Ok(Date::from_parts(year, Month::new(month), self.day))
    }

    fn add_years(self, years: i128) -> Result<Date, Error> {
        let year = checked_year(i128::from(self.year.get()) + years)?;
        Ok(Date { year, ..self })
    }
}

/// Returns the given year when it is in the range of valid years.
fn checked_year(year: i128) -> Result<Year, Error> {
    let (min, max) = (Year::MIN.get(), Year::MAX.get());
    if !(i128::from(min)..=i128::from(max)).contains(&year) {
        return Err(Error::range("year", year, min, max));
    }
    // OK since the year is in `-32767..=32767`.
    Ok(Year::new(year as i16))
}

/// A policy for repairing an invalid [`Date`].
///
/// # Example
///
/// ```
/// use calends::civil::{Date, Overflow};
///
/// let d = Date::new(2000, 2, 30);
/// assert_eq!(d.repair(Overflow::Clamp), Date::new(2000, 2, 29));
/// assert_eq!(d.repair(Overflow::CarryOver), Date::new(2000, 3, 1));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Overflow {
    /// Replace the day with the last day of the month.
    Clamp,
    /// Spill the excess days into the following month.
    CarryOver,
}

impl core::ops::Add<Months> for Date {
    type Output = Date;

    #[inline]
    #[track_caller]
    fn add(self, rhs: Months) -> Date {
        match self.checked_add_months(rhs) {
            Ok(date) => date,
            Err(err) => panic!("{err}"),
        }
    }
}

impl core::ops::AddAssign<Months> for Date {
    #[inline]
    fn add_assign(&mut self, rhs: Months) {
        *self = *self + rhs;
    }
}

impl core::ops::Sub<Months> for Date {
    type Output = Date;

    #[inline]
    #[track_caller]
    fn sub(self, rhs: Months) -> Date {
        match self.checked_sub_months(rhs) {
            Ok(date) => date,
            Err(err) => panic!("{err}"),
        }
    }
}

impl core::ops::SubAssign<Months> for Date {
    #[inline]
    fn sub_assign(&mut self, rhs: Months) {
        *self = *self - rhs;
    }
}

impl core::ops::Add<Years> for Date {
    type Output = Date;

    #[inline]
    #[track_caller]
    fn add(self, rhs: Years) -> Date {
        match self.checked_add_years(rhs) {
            Ok(date) => date,
            Err(err) => panic!("{err}"),
        }
    }
}

impl core::ops::AddAssign<Years> for Date {
    #[inline]
    fn add_assign(&mut self, rhs: Years) {
        *self = *self + rhs;
    }
}

impl core::ops::Sub<Years> for Date {
    type Output = Date;

    #[inline]
    #[track_caller]
    fn sub(self, rhs: Years) -> Date {
        match self.checked_sub_years(rhs) {
            Ok(date) => date,
            Err(err) => panic!("{err}"),
        }
    }
}

impl core::ops::SubAssign<Years> for Date {
    #[inline]
    fn sub_assign(&mut self, rhs: Years) {
        *self = *self - rhs;
    }
}

impl From<Instant<period::Day>> for Date {
    #[inline]
    fn from(days: Instant<period::Day>) -> Date {
        Date::from_sys_days(days)
    }
}

impl From<LocalTime<period::Day>> for Date {
    #[inline]
    fn from(days: LocalTime<period::Day>) -> Date {
        Date::from_local_days(days)
    }
}

impl From<Date> for Instant<period::Day> {
    #[inline]
    fn from(date: Date) -> Instant<period::Day> {
        date.to_sys_days()
    }
}

impl From<Date> for LocalTime<period::Day> {
    #[inline]
    fn from(date: Date) -> LocalTime<period::Day> {
        date.to_local_days()
    }
}

impl core::fmt::Debug for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Renders `YYYY-MM-DD`, with a leading `-` for negative years. Invalid
/// dates render their fields as they are, like `2001-02-30`.
impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Date {
    fn arbitrary(g: &mut quickcheck::Gen) -> Date {
        let year = i16::arbitrary(g).max(Year::MIN.get());
        let month = u8::arbitrary(g) % 12 + 1;
        let last = days_in_month(i32::from(year), month);
        let day = u8::arbitrary(g) % last + 1;
        Date::new(year, month, day)
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            (self.year.get(), self.month.get(), self.day.get())
                .shrink()
                .map(|(year, month, day)| Date::new(year, month, day))
                .filter(|date| date.ok()),
        )
    }
}
