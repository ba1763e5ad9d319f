/*!
Durations measured in ticks of a compile-time tick period.

A [`Duration<P>`] is a signed 64-bit count of ticks, where each tick lasts
[`P`](Period) seconds. Durations with the same period support the usual
arithmetic. Durations with different periods never mix implicitly: moving
between periods is always an explicit rounding step (see
[`Duration::floor`], [`Duration::ceil`], [`Duration::round`] and
[`Duration::cast`]).

# Example

```
use calends::duration::{period::Second, Milliseconds, Seconds};

let d = Milliseconds::new(-750);
assert_eq!(d.floor::<Second>(), Seconds::new(-1));
assert_eq!(d.ceil::<Second>(), Seconds::new(0));
assert_eq!(d.round::<Second>(), Seconds::new(-1));
assert_eq!(d.cast::<Second>(), Seconds::new(0));
```
*/

use core::marker::PhantomData;

use crate::{error::Error, round::RoundMode};

pub use self::period::{DividesSecond, Period};

pub mod period;

/// A duration in nanoseconds.
pub type Nanoseconds = Duration<period::Nano>;
/// A duration in microseconds.
pub type Microseconds = Duration<period::Micro>;
/// A duration in centiseconds.
pub type Centiseconds = Duration<period::Centi>;
/// A duration in milliseconds.
pub type Milliseconds = Duration<period::Milli>;
/// A duration in seconds.
pub type Seconds = Duration<period::Second>;
/// A duration in minutes.
pub type Minutes = Duration<period::Minute>;
/// A duration in hours.
pub type Hours = Duration<period::Hour>;
/// A duration in civil days of 24 hours.
pub type Days = Duration<period::Day>;
/// A duration in weeks.
pub type Weeks = Duration<period::Week>;
/// A duration in average Gregorian months.
///
/// When added to a [`Date`](crate::civil::Date), this is interpreted as a
/// count of calendar months instead.
pub type Months = Duration<period::Month>;
/// A duration in average Gregorian years.
///
/// When added to a [`Date`](crate::civil::Date), this is interpreted as a
/// count of calendar years instead.
pub type Years = Duration<period::Year>;

/// A signed count of ticks of the period `P`.
///
/// # Conversions
///
/// Converting between periods computes the exact rational quotient (in
/// 128-bit integers) and then rounds it with a [`RoundMode`]. The four
/// common modes have shortcuts:
///
/// * [`Duration::floor`] rounds toward negative infinity.
/// * [`Duration::ceil`] rounds toward positive infinity.
/// * [`Duration::round`] rounds to the nearest tick, with ties going to the
/// even tick count.
/// * [`Duration::cast`] truncates toward zero.
///
/// Each panics when the result doesn't fit in 64 bits. Use
/// [`Duration::try_convert`] to handle overflow.
///
/// # Example
///
/// This shows conversions into a period that is not a power of ten:
///
/// ```
/// use calends::duration::{period::Ratio, Centiseconds};
///
/// type Quarter = Ratio<1, 4>;
///
/// let d = Centiseconds::new(60);
/// assert_eq!(d.floor::<Quarter>().count(), 2);
/// assert_eq!(d.ceil::<Quarter>().count(), 3);
/// assert_eq!(d.round::<Quarter>().count(), 2);
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Duration<P: Period> {
    ticks: i64,
    period: PhantomData<P>,
}

impl<P: Period> Duration<P> {
    /// A duration of zero ticks.
    pub const ZERO: Duration<P> = Duration::new(0);

    /// The smallest representable duration.
    pub const MIN: Duration<P> = Duration::new(i64::MIN);

    /// The largest representable duration.
    pub const MAX: Duration<P> = Duration::new(i64::MAX);

    /// Creates a new duration from a tick count.
    #[inline]
    pub const fn new(ticks: i64) -> Duration<P> {
        Duration { ticks, period: PhantomData }
    }

    /// Returns the number of ticks in this duration.
    #[inline]
    pub const fn count(self) -> i64 {
        self.ticks
    }

    /// Returns true if this duration has fewer than zero ticks.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.ticks < 0
    }

    /// Returns true if this duration has exactly zero ticks.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.ticks == 0
    }

    /// Returns the absolute value of this duration.
    ///
    /// # Panics
    ///
    /// When this duration is [`Duration::MIN`].
    #[inline]
    pub fn abs(self) -> Duration<P> {
        Duration::new(self.ticks.abs())
    }

    /// Adds two durations, returning an error on overflow.
    #[inline]
    pub fn checked_add(self, rhs: Duration<P>) -> Result<Duration<P>, Error> {
        self.ticks.checked_add(rhs.ticks).map(Duration::new).ok_or_else(|| {
            crate::error::duration::Error::ArithmeticOverflow {
                op: "addition",
            }
            .into()
        })
    }

    /// Subtracts `rhs` from this duration, returning an error on overflow.
    #[inline]
    pub fn checked_sub(self, rhs: Duration<P>) -> Result<Duration<P>, Error> {
        self.ticks.checked_sub(rhs.ticks).map(Duration::new).ok_or_else(|| {
            crate::error::duration::Error::ArithmeticOverflow {
                op: "subtraction",
            }
            .into()
        })
    }

    /// Multiplies this duration by a scalar, returning an error on overflow.
    #[inline]
    pub fn checked_mul(self, rhs: i64) -> Result<Duration<P>, Error> {
        self.ticks.checked_mul(rhs).map(Duration::new).ok_or_else(|| {
            crate::error::duration::Error::ArithmeticOverflow {
                op: "multiplication",
            }
            .into()
        })
    }

    /// Negates this duration, returning an error on overflow.
    ///
    /// This only fails for [`Duration::MIN`].
    #[inline]
    pub fn checked_neg(self) -> Result<Duration<P>, Error> {
        self.ticks.checked_neg().map(Duration::new).ok_or_else(|| {
            crate::error::duration::Error::ArithmeticOverflow {
                op: "negation",
            }
            .into()
        })
    }

    /// Converts this duration to ticks of `Q`, rounding the exact quotient
    /// with the given mode.
    ///
    /// # Errors
    ///
    /// When the converted tick count doesn't fit in a 64-bit integer.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{duration::{period::{Nano, Second}, Seconds}, RoundMode};
    ///
    /// let d = Seconds::new(i64::MAX);
    /// assert!(d.try_convert::<Nano>(RoundMode::Trunc).is_err());
    /// let d = Seconds::new(5);
    /// assert_eq!(d.try_convert::<Nano>(RoundMode::Trunc)?.count(), 5_000_000_000);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_convert<Q: Period>(
        self,
        mode: RoundMode,
    ) -> Result<Duration<Q>, Error> {
        let overflow = || -> Error {
            crate::error::duration::Error::ConvertOverflow {
                from: (P::NUM, P::DEN),
                to: (Q::NUM, Q::DEN),
            }
            .into()
        };
        let (num, den) = period::conversion::<P, Q>();
        let scaled =
            i128::from(self.ticks).checked_mul(num).ok_or_else(overflow)?;
        let ticks = mode.divide(scaled, den);
        i64::try_from(ticks).map(Duration::new).map_err(|_| overflow())
    }

    /// Converts this duration to ticks of `Q`, rounding the exact quotient
    /// with the given mode.
    ///
    /// # Panics
    ///
    /// When the converted tick count doesn't fit in a 64-bit integer.
    #[track_caller]
    pub fn convert<Q: Period>(self, mode: RoundMode) -> Duration<Q> {
        match self.try_convert(mode) {
            Ok(d) => d,
            Err(err) => panic!("{err}"),
        }
    }

    /// Converts to the largest whole count of `Q` ticks that is less than or
    /// equal to this duration.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[track_caller]
    pub fn floor<Q: Period>(self) -> Duration<Q> {
        self.convert(RoundMode::Floor)
    }

    /// Converts to the smallest whole count of `Q` ticks that is greater
    /// than or equal to this duration.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[track_caller]
    pub fn ceil<Q: Period>(self) -> Duration<Q> {
        self.convert(RoundMode::Ceil)
    }

    /// Converts to the nearest whole count of `Q` ticks. Exact ties go to
    /// the even count.
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[track_caller]
    pub fn round<Q: Period>(self) -> Duration<Q> {
        self.convert(RoundMode::HalfEven)
    }

    /// Converts to a whole count of `Q` ticks by truncating toward zero,
    /// independent of sign.
    ///
    /// This never loses precision when `Q` is finer than `P` (up to
    /// overflow).
    ///
    /// # Panics
    ///
    /// When the result overflows.
    #[track_caller]
    pub fn cast<Q: Period>(self) -> Duration<Q> {
        self.convert(RoundMode::Trunc)
    }
}

impl<P: Period> core::ops::Add for Duration<P> {
    type Output = Duration<P>;

    #[inline]
    #[track_caller]
    fn add(self, rhs: Duration<P>) -> Duration<P> {
        match self.checked_add(rhs) {
            Ok(d) => d,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<P: Period> core::ops::AddAssign for Duration<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Duration<P>) {
        *self = *self + rhs;
    }
}

impl<P: Period> core::ops::Sub for Duration<P> {
    type Output = Duration<P>;

    #[inline]
    #[track_caller]
    fn sub(self, rhs: Duration<P>) -> Duration<P> {
        match self.checked_sub(rhs) {
            Ok(d) => d,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<P: Period> core::ops::SubAssign for Duration<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration<P>) {
        *self = *self - rhs;
    }
}

impl<P: Period> core::ops::Mul<i64> for Duration<P> {
    type Output = Duration<P>;

    #[inline]
    #[track_caller]
    fn mul(self, rhs: i64) -> Duration<P> {
        match self.checked_mul(rhs) {
            Ok(d) => d,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<P: Period> core::ops::Neg for Duration<P> {
    type Output = Duration<P>;

    #[inline]
    #[track_caller]
    fn neg(self) -> Duration<P> {
        match self.checked_neg() {
            Ok(d) => d,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<P: Period> core::fmt::Debug for Duration<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Renders the tick count followed by a unit suffix, like `750ms`.
///
/// Periods without a conventional name render as `[N]s` or `[N/D]s`, like
/// `3[1/4]s` for three quarter seconds.
impl<P: Period> core::fmt::Display for Duration<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.ticks)?;
        if let Some(suffix) = period::suffix::<P>() {
            return f.write_str(suffix);
        }
        match period::reduced::<P>() {
            (num, 1) => write!(f, "[{num}]s"),
            (num, den) => write!(f, "[{num}/{den}]s"),
        }
    }
}
