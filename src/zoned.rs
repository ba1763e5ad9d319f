use crate::{
    civil::{Date, TimeOfDay},
    clock::Clock,
    duration::period::{DividesSecond, Nano},
    error::Error,
    instant::{Instant, LocalTime},
    tz::{Disambiguation, Offset, OffsetInfo, TimeZone},
};

/// An instant paired with the time zone it should be observed in.
///
/// A `Zoned` stores only the instant and the time zone. Its local time is
/// recomputed from the time zone's rules every time it's asked for, and
/// equality compares the instant and the time zone.
///
/// # Example
///
/// ```
/// use calends::{
///     clock::{Clock, FixedClock},
///     duration::Nanoseconds,
///     tz::{Offset, TimeZone},
///     Instant, Zoned,
/// };
///
/// let clock = FixedClock::new(Instant::from_since_epoch(Nanoseconds::new(1_500_000_000)));
/// let zdt = Zoned::now(&clock, TimeZone::fixed(Offset::constant(-5)));
/// assert_eq!(zdt.to_string(), "1969-12-31 19:00:01.500000000 -05");
/// assert_eq!(zdt.to_instant(), clock.now());
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct Zoned<P: DividesSecond = Nano> {
    instant: Instant<P>,
    tz: TimeZone,
}

impl Zoned {
    /// Returns the current instant of the given clock, in the given time
    /// zone.
    #[inline]
    pub fn now(clock: &impl Clock, tz: TimeZone) -> Zoned {
        Zoned::new(clock.now(), tz)
    }
}

impl<P: DividesSecond> Zoned<P> {
    /// Pairs an instant with a time zone.
    #[inline]
    pub const fn new(instant: Instant<P>, tz: TimeZone) -> Zoned<P> {
        Zoned { instant, tz }
    }

    /// Converts a local time in the given time zone, picking a candidate
    /// with the given policy when the local time is ambiguous or doesn't
    /// exist.
    #[inline]
    pub fn from_local(
        local: LocalTime<P>,
        tz: TimeZone,
        disambiguation: Disambiguation,
    ) -> Zoned<P> {
        let instant = tz.to_instant_with(local, disambiguation);
        Zoned::new(instant, tz)
    }

    /// Converts a local time in the given time zone.
    ///
    /// # Errors
    ///
    /// When the local time is ambiguous or doesn't exist in the time zone.
    #[inline]
    pub fn try_from_local(local: LocalTime<P>, tz: TimeZone) -> Result<Zoned<P>, Error> {
        let instant = tz.to_instant(local)?;
        Ok(Zoned::new(instant, tz))
    }

    /// Returns the time zone.
    #[inline]
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Returns the instant. This is exactly the instant this value was
    /// created with.
    #[inline]
    pub fn to_instant(&self) -> Instant<P> {
        self.instant
    }

    /// Returns the local time of this instant in its time zone.
    #[inline]
    pub fn to_local(&self) -> LocalTime<P> {
        self.tz.to_local(self.instant)
    }

    /// Returns the offset, DST status and abbreviation in force.
    #[inline]
    pub fn offset_info(&self) -> OffsetInfo<'_> {
        self.tz.to_offset_info(self.instant)
    }

    /// Returns the offset in force.
    #[inline]
    pub fn offset(&self) -> Offset {
        self.tz.to_offset(self.instant)
    }

    /// Returns the local date.
    #[inline]
    pub fn date(&self) -> Date {
        self.to_local().date()
    }

    /// Returns the local time elapsed since midnight.
    #[inline]
    pub fn time_of_day(&self) -> TimeOfDay<P> {
        self.to_local().time_of_day()
    }

    /// Returns the same instant observed in another time zone.
    #[inline]
    pub fn with_time_zone(&self, tz: TimeZone) -> Zoned<P> {
        Zoned::new(self.instant, tz)
    }
}

impl<P: DividesSecond> core::fmt::Debug for Zoned<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Zoned")
            .field("instant", &self.instant)
            .field("tz", &self.tz)
            .finish()
    }
}

/// Renders the local time followed by the abbreviation in force.
impl<P: DividesSecond> core::fmt::Display for Zoned<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} {}", self.to_local(), self.offset_info().abbreviation())
    }
}
