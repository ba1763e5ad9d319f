use core::marker::PhantomData;

use crate::duration::{
    period::{self, Period},
    Duration, Hours, Minutes, Seconds,
};

/// A duration decomposed into hours, minutes, seconds and subseconds.
///
/// This is most commonly used to describe the time elapsed since midnight,
/// as returned by [`TimePoint::time_of_day`](crate::TimePoint::time_of_day).
/// It is not limited to a single day though: any duration can be
/// decomposed, in which case the hours field may exceed `23` and the whole
/// value may be negative.
///
/// The subsecond part is kept at the resolution of the tick period `P`.
/// When displayed, it's rendered with the fewest decimal digits that can
/// show every distinct subsecond value of `P`. For example, a period of
/// `1/4` seconds needs one digit (values are truncated, so `0.25` seconds
/// renders as `.2`) while a period of `1/100` seconds needs two.
///
/// # Example
///
/// ```
/// use calends::{civil::TimeOfDay, duration::Milliseconds};
///
/// let time = TimeOfDay::new(Milliseconds::new(27_200_250));
/// assert_eq!(time.hours().count(), 7);
/// assert_eq!(time.minutes().count(), 33);
/// assert_eq!(time.seconds().count(), 20);
/// assert_eq!(time.subseconds(), Milliseconds::new(250));
/// assert_eq!(time.to_string(), "07:33:20.250");
///
/// let time = TimeOfDay::new(-Milliseconds::new(1_500));
/// assert_eq!(time.to_string(), "-00:00:01.500");
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct TimeOfDay<P: Period> {
    negative: bool,
    hours: i64,
    minutes: u8,
    seconds: u8,
    /// In units of `1/den` seconds, where `den` is the reduced denominator
    /// of `P`.
    subsec: i64,
    period: PhantomData<P>,
}

impl<P: Period> TimeOfDay<P> {
    /// Decomposes the given duration.
    pub fn new(duration: Duration<P>) -> TimeOfDay<P> {
        let (num, _) = period::reduced::<P>();
        let units = i128::from(duration.count()) * num;
        TimeOfDay::from_scaled(units < 0, units.abs())
    }

    /// Decomposes a non-negative number of `1/den` second units, where `den`
    /// is the reduced denominator of `P`.
    pub(crate) fn from_scaled(negative: bool, units: i128) -> TimeOfDay<P> {
        let (_, den) = period::reduced::<P>();
        let secs = units / den;
        // The remainder is less than `den`, which fits in an `i64`.
        let subsec = (units % den) as i64;
        let hours = i64::try_from(secs / 3_600).unwrap_or(i64::MAX);
        // Both remainders are less than 60.
        let minutes = ((secs / 60) % 60) as u8;
        let seconds = (secs % 60) as u8;
        TimeOfDay {
            negative: negative && units != 0,
            hours,
            minutes,
            seconds,
            subsec,
            period: PhantomData,
        }
    }

    /// Returns the hours field. This may be greater than `23`.
    #[inline]
    pub fn hours(self) -> Hours {
        Hours::new(self.hours)
    }

    /// Returns the minutes field, in the range `0..=59`.
    #[inline]
    pub fn minutes(self) -> Minutes {
        Minutes::new(i64::from(self.minutes))
    }

    /// Returns the seconds field, in the range `0..=59`.
    #[inline]
    pub fn seconds(self) -> Seconds {
        Seconds::new(i64::from(self.seconds))
    }

    /// Returns the part of this value smaller than a second, truncated to
    /// whole ticks of `P`.
    ///
    /// This is always zero when `P` is a whole number of seconds.
    #[inline]
    pub fn subseconds(self) -> Duration<P> {
        let (num, _) = period::reduced::<P>();
        // `subsec < den`, so dividing by `num` can only make it smaller.
        Duration::new((i128::from(self.subsec) / num) as i64)
    }

    /// Returns true when this decomposes a negative duration.
    ///
    /// All fields are magnitudes. The sign applies to the whole value.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.negative
    }

    /// Returns the number of decimal digits used to render subseconds.
    ///
    /// This is the number of digits in `den - 1`, where `den` is the reduced
    /// denominator of `P`, and `0` when `P` is a whole number of seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{
    ///     civil::TimeOfDay,
    ///     duration::{period::{Milli, Ratio}, Duration},
    /// };
    ///
    /// assert_eq!(TimeOfDay::new(Duration::<Ratio<1, 4>>::new(1)).fractional_width(), 1);
    /// assert_eq!(TimeOfDay::new(Duration::<Milli>::new(1)).fractional_width(), 3);
    /// assert_eq!(TimeOfDay::new(Duration::<Ratio<1, 3>>::new(1)).fractional_width(), 1);
    /// ```
    pub fn fractional_width(self) -> u8 {
        let (_, den) = period::reduced::<P>();
        let mut max = den - 1;
        let mut width = 0;
        while max > 0 {
            max /= 10;
            width += 1;
        }
        width
    }

    /// Returns the subsecond part as a decimal fraction with
    /// [`fractional_width`](TimeOfDay::fractional_width) digits, truncated.
    pub fn fraction(self) -> u64 {
        let (_, den) = period::reduced::<P>();
        let scale = 10i128.pow(u32::from(self.fractional_width()));
        // Less than `scale`, which is at most `10^19` for an `i64`
        // denominator.
        (i128::from(self.subsec) * scale / den) as u64
    }

    /// Recomposes the fields into a duration, truncating toward zero when
    /// `P` is longer than the decomposed value's resolution.
    ///
    /// This saturates when the result doesn't fit in a 64-bit tick count.
    pub fn to_duration(self) -> Duration<P> {
        let (num, den) = period::reduced::<P>();
        let secs = i128::from(self.hours) * 3_600
            + i128::from(self.minutes) * 60
            + i128::from(self.seconds);
        let mut ticks = (secs * den + i128::from(self.subsec)) / num;
        if self.negative {
            ticks = -ticks;
        }
        let ticks = i64::try_from(ticks)
            .unwrap_or(if ticks < 0 { i64::MIN } else { i64::MAX });
        Duration::new(ticks)
    }
}

impl<P: Period> core::fmt::Debug for TimeOfDay<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Renders `[-]HH:MM:SS[.fff]`.
impl<P: Period> core::fmt::Display for TimeOfDay<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)?;
        let width = usize::from(self.fractional_width());
        if width > 0 {
            write!(f, ".{:0width$}", self.fraction())?;
        }
        Ok(())
    }
}
