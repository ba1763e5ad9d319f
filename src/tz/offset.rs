use core::ops::Neg;

use crate::{
    duration::{period::DividesSecond, Duration, Seconds},
    error::Error,
    instant::{Instant, LocalTime, TimePoint},
};

/// An enum indicating whether a particular instant is in DST or not.
///
/// DST stands for "daylight saving time." It is a label used to contrast
/// points in time with "standard time." DST is usually, but not always, one
/// hour ahead of standard time.
///
/// This type has a `From<bool>` trait implementation, where the bool is
/// interpreted as being `true` when DST is active.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Dst {
    /// DST is not in effect. In other words, standard time is in effect.
    No,
    /// DST is in effect.
    Yes,
}

impl Dst {
    /// Returns true when this value is equal to `Dst::Yes`.
    pub fn is_dst(self) -> bool {
        matches!(self, Dst::Yes)
    }

    /// Returns true when this value is equal to `Dst::No`.
    pub fn is_std(self) -> bool {
        matches!(self, Dst::No)
    }
}

impl From<bool> for Dst {
    fn from(is_dst: bool) -> Dst {
        if is_dst {
            Dst::Yes
        } else {
            Dst::No
        }
    }
}

/// Represents a fixed offset from UTC, in whole seconds.
///
/// Negative offsets correspond to time zones west of the prime meridian,
/// while positive offsets correspond to time zones east of the prime
/// meridian. Equivalently, in all cases, `local - offset = instant`.
///
/// # Display format
///
/// This type renders as `{sign}{hours}[:{minutes}[:{seconds}]]`, where
/// `minutes` and `seconds` are only present when non-zero:
///
/// ```
/// use calends::tz::Offset;
///
/// assert_eq!(Offset::constant(-5).to_string(), "-05");
/// assert_eq!(Offset::constant_seconds(-18_060).to_string(), "-05:01");
/// assert_eq!(Offset::constant_seconds(-18_062).to_string(), "-05:01:02");
/// assert_eq!(Offset::constant_seconds(19_800).to_string(), "+05:30");
/// assert_eq!(Offset::MAX.to_string(), "+25:59:59");
/// assert_eq!(Offset::UTC.to_string(), "+00");
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    seconds: i32,
}

impl Offset {
    /// The minimum possible time zone offset, `-25:59:59`.
    pub const MIN: Offset = Offset { seconds: -93_599 };

    /// The maximum possible time zone offset, `+25:59:59`.
    pub const MAX: Offset = Offset { seconds: 93_599 };

    /// The offset corresponding to UTC. That is, no offset at all.
    pub const UTC: Offset = Offset { seconds: 0 };

    /// Creates a new offset from a whole number of hours in a `const`
    /// context.
    ///
    /// # Panics
    ///
    /// When the number of hours is out of range, which is `-25..=25`.
    #[inline]
    pub const fn constant(hours: i8) -> Offset {
        if !(-25 <= hours && hours <= 25) {
            panic!("invalid time zone offset hours")
        }
        Offset { seconds: hours as i32 * 3_600 }
    }

    /// Creates a new offset from a number of seconds in a `const` context.
    ///
    /// # Panics
    ///
    /// When the number of seconds is out of range, which is
    /// `-93,599..=93,599`.
    #[inline]
    pub const fn constant_seconds(seconds: i32) -> Offset {
        if !(Offset::MIN.seconds <= seconds && seconds <= Offset::MAX.seconds)
        {
            panic!("invalid time zone offset seconds")
        }
        Offset { seconds }
    }

    /// Creates a new offset from a whole number of hours.
    ///
    /// # Errors
    ///
    /// When the number of hours is out of the range `-25..=25`.
    #[inline]
    pub fn new(hours: i8) -> Result<Offset, Error> {
        if !(-25..=25).contains(&hours) {
            return Err(Error::range("offset-hours", hours, -25, 25));
        }
        Ok(Offset { seconds: i32::from(hours) * 3_600 })
    }

    /// Creates a new offset from a number of seconds.
    ///
    /// # Errors
    ///
    /// When the number of seconds is out of the range `-93,599..=93,599`.
    #[inline]
    pub fn new_seconds(seconds: i32) -> Result<Offset, Error> {
        if !(Offset::MIN.seconds..=Offset::MAX.seconds).contains(&seconds) {
            return Err(Error::range(
                "offset-seconds",
                seconds,
                Offset::MIN.seconds,
                Offset::MAX.seconds,
            ));
        }
        Ok(Offset { seconds })
    }

    /// Returns the total number of seconds in this offset.
    #[inline]
    pub fn seconds(self) -> i32 {
        self.seconds
    }

    /// Returns this offset as a duration.
    #[inline]
    pub fn duration(self) -> Seconds {
        Seconds::new(i64::from(self.seconds))
    }

    /// Returns the negation of this offset.
    #[inline]
    pub fn negate(self) -> Offset {
        Offset { seconds: -self.seconds }
    }

    /// Returns true when this offset is west of the prime meridian.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// Converts an instant to the local time observed at this offset.
    ///
    /// This saturates at the limits of [`LocalTime`].
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{duration::period::Second, tz::Offset, Instant};
    ///
    /// let local = Offset::constant(-5).to_local(Instant::<Second>::EPOCH);
    /// assert_eq!(local.to_string(), "1969-12-31 19:00:00");
    /// ```
    #[inline]
    pub fn to_local<P: DividesSecond>(self, instant: Instant<P>) -> LocalTime<P> {
        shift(instant, self.ticks::<P>())
    }

    /// Converts a local time observed at this offset to an instant.
    ///
    /// For a fixed offset, every local time corresponds to exactly one
    /// instant. This saturates at the limits of [`Instant`].
    #[inline]
    pub fn to_instant<P: DividesSecond>(self, local: LocalTime<P>) -> Instant<P> {
        shift(local, -self.ticks::<P>())
    }

    /// Returns this offset as a number of ticks of `P`.
    #[inline]
    pub(crate) fn ticks<P: DividesSecond>(self) -> i128 {
        i128::from(self.seconds) * i128::from(P::DEN) / i128::from(P::NUM)
    }
}

/// Moves a time point onto another time scale, shifting it by the given
/// number of ticks and saturating at the limits of a 64-bit tick count.
pub(crate) fn shift<S, T, P>(from: TimePoint<S, P>, ticks: i128) -> TimePoint<T, P>
where
    S: crate::instant::Scale,
    T: crate::instant::Scale,
    P: DividesSecond,
{
    let ticks = i128::from(from.since_epoch().count()) + ticks;
    let ticks = i64::try_from(ticks)
        .unwrap_or(if ticks < 0 { i64::MIN } else { i64::MAX });
    TimePoint::from_since_epoch(Duration::new(ticks))
}

impl Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        self.negate()
    }
}

/// Returns the difference between two offsets as a duration.
impl core::ops::Sub for Offset {
    type Output = Seconds;

    #[inline]
    fn sub(self, rhs: Offset) -> Seconds {
        Seconds::new(i64::from(self.seconds) - i64::from(rhs.seconds))
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.seconds < 0 { "-" } else { "" };
        let (hours, minutes, seconds) = self.parts();
        write!(f, "Offset({sign}{hours:02}:{minutes:02}:{seconds:02})")
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.seconds < 0 { "-" } else { "+" };
        let (hours, minutes, seconds) = self.parts();
        if hours == 0 && minutes == 0 && seconds == 0 {
            write!(f, "+00")
        } else if minutes == 0 && seconds == 0 {
            write!(f, "{sign}{hours:02}")
        } else if seconds == 0 {
            write!(f, "{sign}{hours:02}:{minutes:02}")
        } else {
            write!(f, "{sign}{hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}

impl Offset {
    /// Returns the absolute hour, minute and second parts of this offset.
    fn parts(self) -> (u32, u32, u32) {
        let secs = self.seconds.unsigned_abs();
        (secs / 3_600, (secs / 60) % 60, secs % 60)
    }
}
