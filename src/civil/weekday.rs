use crate::{
    civil::{
        gregorian::{days_in_month, to_serial_day},
        Date, Day, Month, Year,
    },
    duration::period,
    error::Error,
    instant::Instant,
};

/// A representation for the day of the week.
///
/// The default representation follows ISO 8601. That is, the week starts
/// with Monday and numbering starts at `1`. Conversions to and from the
/// Sunday-first, zero-based numbering are also provided.
///
/// # Example
///
/// ```
/// use calends::civil::{Date, Weekday};
///
/// let wd = Date::new(2024, 7, 4).weekday();
/// assert_eq!(wd, Weekday::Thursday);
/// assert_eq!(wd.to_monday_one_offset(), 4);
/// assert_eq!(wd.to_sunday_zero_offset(), 4);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Weekday {
    #[allow(missing_docs)]
    Monday,
    #[allow(missing_docs)]
    Tuesday,
    #[allow(missing_docs)]
    Wednesday,
    #[allow(missing_docs)]
    Thursday,
    #[allow(missing_docs)]
    Friday,
    #[allow(missing_docs)]
    Saturday,
    #[allow(missing_docs)]
    Sunday,
}

impl Weekday {
    /// Converts an offset in the range `1..=7` (Monday is `1`) to a weekday.
    ///
    /// # Errors
    ///
    /// When the offset is out of range.
    #[inline]
    pub fn from_monday_one_offset(offset: i8) -> Result<Weekday, Error> {
        if !(1..=7).contains(&offset) {
            return Err(Error::range("weekday", offset, 1, 7));
        }
        Ok(Weekday::from_monday_zero_offset_unchecked(offset - 1))
    }

    /// Converts an offset in the range `0..=6` (Sunday is `0`) to a weekday.
    ///
    /// # Errors
    ///
    /// When the offset is out of range.
    #[inline]
    pub fn from_sunday_zero_offset(offset: i8) -> Result<Weekday, Error> {
        if !(0..=6).contains(&offset) {
            return Err(Error::range("weekday", offset, 0, 6));
        }
        Ok(Weekday::from_monday_zero_offset_unchecked((offset + 6) % 7))
    }

    /// Returns this weekday as an offset in the range `1..=7`, where Monday
    /// is `1`.
    #[inline]
    pub fn to_monday_one_offset(self) -> i8 {
        self.to_monday_zero_offset() + 1
    }

    /// Returns this weekday as an offset in the range `0..=6`, where Monday
    /// is `0`.
    #[inline]
    pub fn to_monday_zero_offset(self) -> i8 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// Returns this weekday as an offset in the range `0..=6`, where Sunday
    /// is `0`.
    #[inline]
    pub fn to_sunday_zero_offset(self) -> i8 {
        (self.to_monday_zero_offset() + 1) % 7
    }

    /// Returns the next weekday, wrapping around from Sunday to Monday.
    #[inline]
    pub fn next(self) -> Weekday {
        Weekday::from_monday_zero_offset_unchecked(
            (self.to_monday_zero_offset() + 1) % 7,
        )
    }

    /// Returns the previous weekday, wrapping around from Monday to Sunday.
    #[inline]
    pub fn previous(self) -> Weekday {
        Weekday::from_monday_zero_offset_unchecked(
            (self.to_monday_zero_offset() + 6) % 7,
        )
    }

    /// Returns the number of days from `other` forward to `self`, in the
    /// range `0..=6`.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::civil::Weekday;
    ///
    /// assert_eq!(Weekday::Friday.since(Weekday::Wednesday), 2);
    /// assert_eq!(Weekday::Monday.since(Weekday::Sunday), 1);
    /// assert_eq!(Weekday::Sunday.since(Weekday::Monday), 6);
    /// assert_eq!(Weekday::Sunday.since(Weekday::Sunday), 0);
    /// ```
    #[inline]
    pub fn since(self, other: Weekday) -> i8 {
        (self.to_monday_zero_offset() - other.to_monday_zero_offset())
            .rem_euclid(7)
    }

    /// Returns the number of days from `self` forward to `other`, in the
    /// range `0..=6`.
    #[inline]
    pub fn until(self, other: Weekday) -> i8 {
        other.since(self)
    }

    /// Returns a descriptor for the `nth` occurrence of this weekday in a
    /// month. Valid occurrences are `1..=5`.
    #[inline]
    pub fn nth(self, nth: u8) -> NthWeekday {
        NthWeekday { weekday: self, nth }
    }

    /// Returns a descriptor for the last occurrence of this weekday in a
    /// month.
    #[inline]
    pub fn last(self) -> LastWeekday {
        LastWeekday { weekday: self }
    }

    /// Returns the weekday of the given day on the system time line.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{civil::{Date, Weekday}, duration::Days};
    ///
    /// let days = Date::new(1999, 12, 31).to_sys_days();
    /// assert_eq!(Weekday::from_days(days), Weekday::Friday);
    /// assert_eq!(Weekday::from_days(days + Days::new(1)), Weekday::Saturday);
    /// ```
    #[inline]
    pub fn from_days(days: Instant<period::Day>) -> Weekday {
        Weekday::from_serial_day(days.since_epoch().count())
    }

    /// Returns the weekday of the given number of days since `1970-01-01`.
    #[inline]
    pub(crate) fn from_serial_day(days: i64) -> Weekday {
        // Based on Hinnant's approach, using the knowledge that 1970-01-01
        // was a Thursday.
        //
        // Ref: http://howardhinnant.github.io/date_algorithms.html
        let offset = (days + 3).rem_euclid(7);
        // OK since `rem_euclid(7)` is in `0..=6`.
        Weekday::from_monday_zero_offset_unchecked(offset as i8)
    }

    fn from_monday_zero_offset_unchecked(offset: i8) -> Weekday {
        match offset {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            6 => Weekday::Sunday,
            _ => unreachable!("invalid weekday offset {offset}"),
        }
    }
}

impl core::fmt::Display for Weekday {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let name = match *self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        };
        f.write_str(name)
    }
}

/// The `nth` occurrence of a weekday within some month.
///
/// # Example
///
/// ```
/// use calends::civil::{Date, Month, Weekday, Year};
///
/// // US Thanksgiving: the fourth Thursday of November.
/// let nth = Weekday::Thursday.nth(4);
/// assert_eq!(nth.in_month(Year::new(2024), Month::NOVEMBER), Date::new(2024, 11, 28));
///
/// // There is no fifth Monday in February 2023.
/// let date = Weekday::Monday.nth(5).in_month(Year::new(2023), Month::FEBRUARY);
/// assert!(!date.ok());
/// assert_eq!(date.carry_over(), Date::new(2023, 3, 6));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NthWeekday {
    weekday: Weekday,
    nth: u8,
}

impl NthWeekday {
    /// Returns the weekday.
    #[inline]
    pub fn weekday(self) -> Weekday {
        self.weekday
    }

    /// Returns the occurrence index, where `1` is the first.
    #[inline]
    pub fn nth(self) -> u8 {
        self.nth
    }

    /// Returns true when the occurrence index is in the range `1..=5`.
    #[inline]
    pub fn ok(self) -> bool {
        matches!(self.nth, 1..=5)
    }

    /// Resolves this descriptor to a concrete date in the given month.
    ///
    /// When the month doesn't have an `nth` occurrence of the weekday, the
    /// result is an invalid date past the end of the month (whose
    /// [`carry_over`](Date::carry_over) lands in the following month). When
    /// this descriptor is not [`ok`](NthWeekday::ok), the result is an
    /// invalid date.
    pub fn in_month(self, year: Year, month: Month) -> Date {
        let first = to_serial_day(i64::from(year.get()), i64::from(month.get()), 1);
        let delta = self.weekday.since(Weekday::from_serial_day(first));
        let day = 1 + i32::from(delta) + (i32::from(self.nth) - 1) * 7;
        let day = if self.ok() { u8::try_from(day).unwrap_or(0) } else { 0 };
        Date::from_parts(year, month, Day::new(day))
    }
}

impl core::fmt::Display for NthWeekday {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}[{}]", self.weekday, self.nth)
    }
}

/// The last occurrence of a weekday within some month.
///
/// # Example
///
/// ```
/// use calends::civil::{Date, Month, Weekday, Year};
///
/// let last = Weekday::Friday.last();
/// assert_eq!(last.in_month(Year::new(1999), Month::DECEMBER), Date::new(1999, 12, 31));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LastWeekday {
    weekday: Weekday,
}

impl LastWeekday {
    /// Returns the weekday.
    #[inline]
    pub fn weekday(self) -> Weekday {
        self.weekday
    }

    /// Resolves this descriptor to a concrete date in the given month.
    ///
    /// The result is invalid only when the month is outside `1..=12`.
    pub fn in_month(self, year: Year, month: Month) -> Date {
        let last = days_in_month(i32::from(year.get()), month.get());
        if last == 0 {
            return Date::from_parts(year, month, Day::new(0));
        }
        let serial = to_serial_day(
            i64::from(year.get()),
            i64::from(month.get()),
            i64::from(last),
        );
        let back = Weekday::from_serial_day(serial).since(self.weekday);
        // OK since `back` is at most 6 and `last` is at least 28.
        let day = last - back as u8;
        Date::from_parts(year, month, Day::new(day))
    }
}

impl core::fmt::Display for LastWeekday {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}[last]", self.weekday)
    }
}
