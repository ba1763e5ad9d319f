use core::marker::PhantomData;

use crate::{
    civil::{Date, TimeOfDay},
    duration::{
        period::{self, Day, Nano},
        Duration, Period,
    },
    error::Error,
    round::RoundMode,
};

/// An instant on the system time line: a duration since the Unix epoch,
/// `1970-01-01T00:00:00Z`, with no time zone attached.
///
/// This is a [`TimePoint`] on the [`Sys`] scale. Its default tick period is
/// nanoseconds.
///
/// # Example
///
/// ```
/// use calends::{civil::Date, duration::{Days, Hours, period::{Day, Hour}}, Instant};
///
/// let t: Instant<Hour> = Date::new(1970, 1, 3).to_sys_days().cast::<Hour>()
///     + Hours::new(7);
/// assert_eq!(t.since_epoch(), Hours::new(55));
/// assert_eq!(t.floor::<Day>().since_epoch(), Days::new(2));
/// ```
pub type Instant<P = Nano> = TimePoint<Sys, P>;

/// A local (civil) time: a duration since the local epoch,
/// `1970-01-01 00:00:00`, in some unspecified time zone.
///
/// This is a [`TimePoint`] on the [`Local`] scale. It is a distinct type
/// from [`Instant`]: the only way to move between the two is through a
/// [`TimeZone`](crate::tz::TimeZone).
pub type LocalTime<P = Nano> = TimePoint<Local, P>;

/// A point on a time line, measured as a [`Duration`] since the epoch of the
/// scale `S`.
///
/// Most code should use the [`Instant`] and [`LocalTime`] aliases instead
/// of naming this type directly.
///
/// # Rounding
///
/// Time points round the same way durations do, by rounding their duration
/// since the epoch. Flooring to days yields midnight at or before the point,
/// even for points before the epoch:
///
/// ```
/// use calends::{civil::Date, duration::{Hours, period::{Day, Hour}}, Instant};
///
/// let epoch: Instant<Hour> = Instant::EPOCH;
/// let t = epoch - Hours::new(15);
/// assert_eq!(t.floor::<Day>(), Date::new(1969, 12, 31).to_sys_days());
/// assert_eq!(t.ceil::<Day>(), Date::new(1970, 1, 1).to_sys_days());
/// assert_eq!(t.round::<Day>(), Date::new(1969, 12, 31).to_sys_days());
/// assert_eq!(t.cast::<Day>(), Date::new(1970, 1, 1).to_sys_days());
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimePoint<S: Scale, P: Period = Nano> {
    since_epoch: Duration<P>,
    scale: PhantomData<S>,
}

impl<S: Scale, P: Period> TimePoint<S, P> {
    /// The epoch of this scale.
    pub const EPOCH: TimePoint<S, P> = TimePoint::from_since_epoch(Duration::ZERO);

    /// The smallest representable time point.
    pub const MIN: TimePoint<S, P> = TimePoint::from_since_epoch(Duration::MIN);

    /// The largest representable time point.
    pub const MAX: TimePoint<S, P> = TimePoint::from_since_epoch(Duration::MAX);

    /// Creates a time point from its duration since the epoch.
    #[inline]
    pub const fn from_since_epoch(since_epoch: Duration<P>) -> TimePoint<S, P> {
        TimePoint { since_epoch, scale: PhantomData }
    }

    /// Returns the duration since the epoch of this time point.
    #[inline]
    pub const fn since_epoch(self) -> Duration<P> {
        self.since_epoch
    }

    /// Converts this time point to ticks of `Q`, rounding with the given
    /// mode.
    ///
    /// # Errors
    ///
    /// When the result is out of range.
    pub fn try_convert<Q: Period>(
        self,
        mode: RoundMode,
    ) -> Result<TimePoint<S, Q>, Error> {
        self.since_epoch.try_convert(mode).map(TimePoint::from_since_epoch)
    }

    /// Rounds toward negative infinity to a whole tick of `Q`.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[track_caller]
    pub fn floor<Q: Period>(self) -> TimePoint<S, Q> {
        TimePoint::from_since_epoch(self.since_epoch.floor())
    }

    /// Rounds toward positive infinity to a whole tick of `Q`.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[track_caller]
    pub fn ceil<Q: Period>(self) -> TimePoint<S, Q> {
        TimePoint::from_since_epoch(self.since_epoch.ceil())
    }

    /// Rounds to the nearest whole tick of `Q`, with ties to even.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[track_caller]
    pub fn round<Q: Period>(self) -> TimePoint<S, Q> {
        TimePoint::from_since_epoch(self.since_epoch.round())
    }

    /// Truncates toward the epoch to a whole tick of `Q`.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[track_caller]
    pub fn cast<Q: Period>(self) -> TimePoint<S, Q> {
        TimePoint::from_since_epoch(self.since_epoch.cast())
    }

    /// Adds a duration to this time point, returning an error on overflow.
    pub fn checked_add(self, duration: Duration<P>) -> Result<TimePoint<S, P>, Error> {
        self.since_epoch.checked_add(duration).map(TimePoint::from_since_epoch)
    }

    /// Subtracts a duration from this time point, returning an error on
    /// overflow.
    pub fn checked_sub(self, duration: Duration<P>) -> Result<TimePoint<S, P>, Error> {
        self.since_epoch.checked_sub(duration).map(TimePoint::from_since_epoch)
    }

    /// Adds a duration, saturating at the bounds of this type.
    pub(crate) fn saturating_add(self, duration: Duration<P>) -> TimePoint<S, P> {
        let ticks = self.since_epoch.count().saturating_add(duration.count());
        TimePoint::from_since_epoch(Duration::new(ticks))
    }

    /// Returns the calendar date containing this time point.
    ///
    /// The date is found by flooring to days, so a point before the epoch
    /// belongs to the date whose midnight precedes it.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{civil::Date, duration::{Minutes, period::Minute}, Instant};
    ///
    /// let t: Instant<Minute> = Instant::EPOCH - Minutes::new(1);
    /// assert_eq!(t.date(), Date::new(1969, 12, 31));
    /// ```
    pub fn date(self) -> Date {
        let (days, _) = self.split_at_midnight();
        Date::from_serial_day(days)
    }

    /// Returns the time elapsed since the midnight that starts this time
    /// point's date, decomposed into fields.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{civil::Date, duration::{Seconds, period::Second}, Instant};
    ///
    /// let t: Instant<Second> = Date::new(1970, 1, 3).to_sys_days().cast::<Second>()
    ///     + Seconds::new(27_200);
    /// let time = t.time_of_day();
    /// assert_eq!((time.hours().count(), time.minutes().count()), (7, 33));
    /// assert_eq!(time.seconds().count(), 20);
    /// ```
    pub fn time_of_day(self) -> TimeOfDay<P> {
        let (_, units) = self.split_at_midnight();
        TimeOfDay::from_scaled(false, units)
    }

    /// Splits this time point into a serial day number and the time since
    /// that day's midnight, in units of `1/den` seconds, where `den` is the
    /// reduced denominator of `P`.
    fn split_at_midnight(self) -> (i64, i128) {
        let (num, den) = period::reduced::<P>();
        let units = i128::from(self.since_epoch.count()) * num;
        let per_day = 86_400 * den;
        // Only periods longer than a day can produce a day count beyond
        // 64 bits. Those saturate.
        let days = i64::try_from(units.div_euclid(per_day)).unwrap_or(
            if units < 0 { i64::MIN } else { i64::MAX },
        );
        (days, units.rem_euclid(per_day))
    }

    /// Returns true when `P` is a whole number of days, in which case only
    /// the date is shown when displaying a time point.
    fn is_day_granular() -> bool {
        let (num, den) = period::reduced::<P>();
        den == 1 && num % 86_400 == 0
    }
}

impl<S: Scale> TimePoint<S, Day> {
    /// Returns the serial day number of this time point: the number of days
    /// since the epoch.
    #[inline]
    pub(crate) fn serial_day(self) -> i64 {
        self.since_epoch.count()
    }
}

impl<S: Scale, P: Period> core::ops::Add<Duration<P>> for TimePoint<S, P> {
    type Output = TimePoint<S, P>;

    #[inline]
    #[track_caller]
    fn add(self, rhs: Duration<P>) -> TimePoint<S, P> {
        TimePoint::from_since_epoch(self.since_epoch + rhs)
    }
}

impl<S: Scale, P: Period> core::ops::AddAssign<Duration<P>> for TimePoint<S, P> {
    #[inline]
    fn add_assign(&mut self, rhs: Duration<P>) {
        *self = *self + rhs;
    }
}

impl<S: Scale, P: Period> core::ops::Sub<Duration<P>> for TimePoint<S, P> {
    type Output = TimePoint<S, P>;

    #[inline]
    #[track_caller]
    fn sub(self, rhs: Duration<P>) -> TimePoint<S, P> {
        TimePoint::from_since_epoch(self.since_epoch - rhs)
    }
}

impl<S: Scale, P: Period> core::ops::SubAssign<Duration<P>> for TimePoint<S, P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration<P>) {
        *self = *self - rhs;
    }
}

impl<S: Scale, P: Period> core::ops::Sub for TimePoint<S, P> {
    type Output = Duration<P>;

    #[inline]
    #[track_caller]
    fn sub(self, rhs: TimePoint<S, P>) -> Duration<P> {
        self.since_epoch - rhs.since_epoch
    }
}

impl<S: Scale, P: Period> core::fmt::Debug for TimePoint<S, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}({})", S::name(), self)
    }
}

/// Renders `YYYY-MM-DD` when the tick period is a whole number of days and
/// `YYYY-MM-DD HH:MM:SS[.fff]` otherwise.
impl<S: Scale, P: Period> core::fmt::Display for TimePoint<S, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let date = self.date();
        if Self::is_day_granular() {
            core::fmt::Display::fmt(&date, f)
        } else {
            write!(f, "{} {}", date, self.time_of_day())
        }
    }
}

#[cfg(test)]
impl<S: Scale, P: Period> quickcheck::Arbitrary for TimePoint<S, P> {
    fn arbitrary(g: &mut quickcheck::Gen) -> TimePoint<S, P> {
        // Keep values within a few thousand years of the epoch for
        // sub-second periods, so their dates stay in range.
        let ticks = i64::arbitrary(g) % 500_000_000_000;
        TimePoint::from_since_epoch(Duration::new(ticks))
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            self.since_epoch
                .count()
                .shrink()
                .map(|ticks| TimePoint::from_since_epoch(Duration::new(ticks))),
        )
    }
}

/// A time scale: the line that a [`TimePoint`] is measured on.
///
/// This trait is sealed. Its only implementations are [`Sys`] and
/// [`Local`].
pub trait Scale: private::ScaleInternal {}
impl<S: private::ScaleInternal> Scale for S {}

/// The system time scale: Unix time, without leap seconds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Sys;

/// The local time scale: civil time in some time zone, without saying
/// which one.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Local;

pub(crate) mod private {
    pub trait ScaleInternal:
        Clone
        + Copy
        + core::fmt::Debug
        + Default
        + Eq
        + core::hash::Hash
        + Ord
        + Send
        + Sync
        + 'static
    {
        fn name() -> &'static str;
    }

    impl ScaleInternal for super::Sys {
        fn name() -> &'static str {
            "Instant"
        }
    }

    impl ScaleInternal for super::Local {
        fn name() -> &'static str {
            "LocalTime"
        }
    }
}
