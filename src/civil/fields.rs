use crate::civil::{is_leap_year, Date};

/// A Gregorian calendar year.
///
/// Construction never fails. A year is [`ok`](Year::ok) when it is in the
/// range `-32767..=32767`. Year `0` is `1 BCE`, year `-1` is `2 BCE` and so
/// on.
///
/// # Example
///
/// ```
/// use calends::civil::Year;
///
/// assert!(Year::new(2024).is_leap());
/// assert!(Year::new(-32767).ok());
/// assert!(!Year::new(i16::MIN).ok());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Year(i16);

impl Year {
    /// The smallest valid year.
    pub const MIN: Year = Year(-32767);
    /// The largest valid year.
    pub const MAX: Year = Year(32767);

    /// Creates a new year.
    #[inline]
    pub const fn new(year: i16) -> Year {
        Year(year)
    }

    /// Returns this year as a signed integer.
    #[inline]
    pub const fn get(self) -> i16 {
        self.0
    }

    /// Returns true when this year is in the range `-32767..=32767`.
    #[inline]
    pub const fn ok(self) -> bool {
        self.0 != i16::MIN
    }

    /// Returns true when this year has a February 29.
    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.0 as i32)
    }

    /// Returns the number of days in this year.
    #[inline]
    pub const fn days(self) -> u16 {
        if self.is_leap() {
            366
        } else {
            365
        }
    }
}

impl From<i16> for Year {
    #[inline]
    fn from(year: i16) -> Year {
        Year::new(year)
    }
}

impl core::fmt::Display for Year {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.0 < 0 {
            write!(f, "-{:04}", self.0.unsigned_abs())
        } else {
            write!(f, "{:04}", self.0)
        }
    }
}

/// A month of the year, nominally `1` (January) through `12` (December).
///
/// Construction never fails. Use [`Month::ok`] to check whether a month is
/// in range.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Month(u8);

impl Month {
    /// January, the first month.
    pub const JANUARY: Month = Month(1);
    /// February, the second month.
    pub const FEBRUARY: Month = Month(2);
    /// March, the third month.
    pub const MARCH: Month = Month(3);
    /// April, the fourth month.
    pub const APRIL: Month = Month(4);
    /// May, the fifth month.
    pub const MAY: Month = Month(5);
    /// June, the sixth month.
    pub const JUNE: Month = Month(6);
    /// July, the seventh month.
    pub const JULY: Month = Month(7);
    /// August, the eighth month.
    pub const AUGUST: Month = Month(8);
    /// September, the ninth month.
    pub const SEPTEMBER: Month = Month(9);
    /// October, the tenth month.
    pub const OCTOBER: Month = Month(10);
    /// November, the eleventh month.
    pub const NOVEMBER: Month = Month(11);
    /// December, the twelfth month.
    pub const DECEMBER: Month = Month(12);

    /// Creates a new month.
    #[inline]
    pub const fn new(month: u8) -> Month {
        Month(month)
    }

    /// Returns this month as an integer.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns true when this month is in the range `1..=12`.
    #[inline]
    pub const fn ok(self) -> bool {
        matches!(self.0, 1..=12)
    }
}

impl From<u8> for Month {
    #[inline]
    fn from(month: u8) -> Month {
        Month::new(month)
    }
}

impl core::fmt::Display for Month {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A day of the month, nominally `1` through `31`.
///
/// Construction never fails. [`Day::ok`] only checks the nominal range.
/// Whether a day exists in a particular month is a property of a whole
/// [`Date`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Day(u8);

impl Day {
    /// Creates a new day.
    #[inline]
    pub const fn new(day: u8) -> Day {
        Day(day)
    }

    /// Returns this day as an integer.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns true when this day is in the range `1..=31`.
    #[inline]
    pub const fn ok(self) -> bool {
        matches!(self.0, 1..=31)
    }
}

impl From<u8> for Day {
    #[inline]
    fn from(day: u8) -> Day {
        Day::new(day)
    }
}

impl core::fmt::Display for Day {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// The last day of a particular month.
///
/// Unlike a [`Date`], this is valid whenever its year and month are, since
/// the day is computed from them. It converts to a concrete date on demand.
///
/// # Example
///
/// ```
/// use calends::civil::{Date, Month, Year, YearMonthLast};
///
/// let last = YearMonthLast::new(Year::new(2000), Month::FEBRUARY);
/// assert_eq!(last.to_date(), Date::new(2000, 2, 29));
/// assert_eq!(Date::new(2000, 2, 29), last);
/// assert!(last.ok());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct YearMonthLast {
    year: Year,
    month: Month,
}

impl YearMonthLast {
    /// Creates a descriptor for the last day of the given month.
    #[inline]
    pub const fn new(year: Year, month: Month) -> YearMonthLast {
        YearMonthLast { year, month }
    }

    /// Returns the year.
    #[inline]
    pub const fn year(self) -> Year {
        self.year
    }

    /// Returns the month.
    #[inline]
    pub const fn month(self) -> Month {
        self.month
    }

    /// Returns the last day of the month.
    ///
    /// This is `0` when the month is not in the range `1..=12`.
    #[inline]
    pub const fn day(self) -> Day {
        Day::new(crate::civil::days_in_month(self.year.0 as i32, self.month.0))
    }

    /// Returns true when both the year and month are valid.
    #[inline]
    pub const fn ok(self) -> bool {
        self.year.ok() && self.month.ok()
    }

    /// Converts this descriptor to a concrete date.
    #[inline]
    pub const fn to_date(self) -> Date {
        Date::from_parts(self.year, self.month, self.day())
    }
}

impl From<YearMonthLast> for Date {
    #[inline]
    fn from(last: YearMonthLast) -> Date {
        last.to_date()
    }
}

impl PartialEq<Date> for YearMonthLast {
    #[inline]
    fn eq(&self, date: &Date) -> bool {
        self.to_date() == *date
    }
}

impl PartialEq<YearMonthLast> for Date {
    #[inline]
    fn eq(&self, last: &YearMonthLast) -> bool {
        *self == last.to_date()
    }
}

impl core::fmt::Display for YearMonthLast {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}-{}-last", self.year, self.month)
    }
}
