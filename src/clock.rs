/*!
Sources of the current time.

Nothing in this crate reads the system clock on its own. Code that needs
"now" takes a [`Clock`], so that tests can supply a [`FixedClock`] and
production code a [`SystemClock`].
*/

use crate::{duration::period::Nano, instant::Instant};

#[cfg(feature = "std")]
use crate::{duration::Nanoseconds, error::Error};

/// A source of the current instant.
///
/// # Example
///
/// ```
/// use calends::{clock::{Clock, FixedClock}, duration::Nanoseconds, Instant};
///
/// fn elapsed(clock: &impl Clock, since: Instant) -> Nanoseconds {
///     clock.now() - since
/// }
///
/// let clock = FixedClock::new(Instant::from_since_epoch(Nanoseconds::new(1_000)));
/// assert_eq!(elapsed(&clock, Instant::EPOCH), Nanoseconds::new(1_000));
/// ```
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant<Nano>;
}

impl<'a, C: Clock + ?Sized> Clock for &'a C {
    fn now(&self) -> Instant<Nano> {
        (**self).now()
    }
}

/// A clock that always returns the same instant.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct FixedClock {
    instant: Instant<Nano>,
}

impl FixedClock {
    /// Creates a clock stopped at the given instant.
    #[inline]
    pub fn new(instant: Instant<Nano>) -> FixedClock {
        FixedClock { instant }
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> Instant<Nano> {
        self.instant
    }
}

/// A clock backed by [`std::time::SystemTime`].
///
/// Times outside the range of [`Instant<Nano>`](Instant) (roughly the years
/// 1677 through 2262) saturate.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Instant<Nano> {
        let nanos = system_time_nanos(std::time::SystemTime::now());
        let nanos = i64::try_from(nanos)
            .unwrap_or(if nanos < 0 { i64::MIN } else { i64::MAX });
        Instant::from_since_epoch(Nanoseconds::new(nanos))
    }
}

#[cfg(feature = "std")]
impl TryFrom<std::time::SystemTime> for Instant<Nano> {
    type Error = Error;

    fn try_from(system_time: std::time::SystemTime) -> Result<Instant<Nano>, Error> {
        let nanos = system_time_nanos(system_time);
        let nanos = i64::try_from(nanos).map_err(|_| {
            Error::range("system-time-nanoseconds", nanos, i64::MIN, i64::MAX)
        })?;
        Ok(Instant::from_since_epoch(Nanoseconds::new(nanos)))
    }
}

/// Returns the signed number of nanoseconds since the Unix epoch.
#[cfg(feature = "std")]
fn system_time_nanos(system_time: std::time::SystemTime) -> i128 {
    let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
    match system_time.duration_since(unix_epoch) {
        Ok(duration) => i128::try_from(duration.as_nanos()).unwrap_or(i128::MAX),
        Err(err) => -i128::try_from(err.duration().as_nanos()).unwrap_or(i128::MAX),
    }
}

#[cfg(test)]
mod tests {
    use crate::duration::Nanoseconds;

    use super::*;

    #[test]
    fn fixed() {
        let t = Instant::from_since_epoch(Nanoseconds::new(-5));
        let clock = FixedClock::new(t);
        assert_eq!(clock.now(), t);
        assert_eq!((&clock).now(), t);
        assert_eq!(FixedClock::default().now(), Instant::EPOCH);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_time_conversion() {
        use std::time::{Duration, SystemTime};

        let epoch = SystemTime::UNIX_EPOCH;
        let t = Instant::<Nano>::try_from(epoch + Duration::new(1, 5)).unwrap();
        assert_eq!(t.since_epoch(), Nanoseconds::new(1_000_000_005));
        let t = Instant::<Nano>::try_from(epoch - Duration::new(1, 5)).unwrap();
        assert_eq!(t.since_epoch(), Nanoseconds::new(-1_000_000_005));
        let far = epoch + Duration::from_secs(300 * 365 * 86_400);
        assert!(Instant::<Nano>::try_from(far).unwrap_err().is_range());
        // Somewhere after 2020.
        assert!(SystemClock.now().since_epoch().count() > 1_577_836_800_000_000_000);
    }
}
