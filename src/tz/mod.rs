/*!
Routines for interacting with time zones and the zone rule tables that
describe them.

A [`TimeZone`] is a cheaply cloneable handle to an immutable [`ZoneTable`]:
an ordered sequence of [`ZoneRule`]s, each giving the offset from UTC, the
DST status and the abbreviation in force over an interval of instants.

# Converting between instants and local times

Every instant has exactly one local time in a given time zone, so
[`TimeZone::to_local`] is a total function. The reverse is not: when the
offset increases (a "gap," like the spring-forward DST transition) some
local times never happen, and when the offset decreases (a "fold," like the
fall-back DST transition) some local times happen twice.

[`TimeZone::resolve`] reports which of these cases applies as a
[`LocalResolution`]. From there, a caller may pick an instant with a
[`Disambiguation`] policy, or turn the anomalies into errors:

```
use calends::{
    civil::Date,
    duration::{Hours, Minutes, period::Second},
    tz::{Disambiguation, Dst, Offset, TimeZone, ZoneRule, ZoneTable},
    Instant,
};

// A zone switching from +01 to +02 at 2024-03-31T01:00Z.
let switch = Date::new(2024, 3, 31).to_sys_days().cast::<Second>()
    + Hours::new(1).cast::<Second>();
let tz = TimeZone::new(ZoneTable::new("Example/Zone", vec![
    ZoneRule::new(Instant::MIN, switch, Offset::constant(1), Dst::No, "CET"),
    ZoneRule::new(switch, Instant::MAX, Offset::constant(2), Dst::Yes, "CEST"),
])?);

// 02:30 on that day never happens.
let local = Date::new(2024, 3, 31).to_local_days().cast::<Second>()
    + Hours::new(2).cast::<Second>() + Minutes::new(30).cast::<Second>();
assert!(tz.to_instant(local).unwrap_err().is_nonexistent_local_time());

// Both policies resolve it to the transition, where clocks read 03:00.
let instant = tz.to_instant_with(local, Disambiguation::Earliest);
assert_eq!(instant, switch);
assert_eq!(tz.to_local(instant).to_string(), "2024-03-31 03:00:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Finding time zones

Time zones are looked up by name through a [`ZoneSource`]. This crate
provides one implementation, [`TimeZoneDatabase`], which is an immutable
snapshot built from zone tables supplied by the caller. There is no global
time zone database and no global "current" time zone: both are injected.
*/

use alloc::sync::Arc;

use crate::{
    duration::{
        period::{DividesSecond, Second},
        Duration, Period,
    },
    error::{
        tz::ambiguous::{ErasedInstant, Error as E},
        Error, ErrorContext,
    },
    instant::{Instant, LocalTime},
};

pub use self::{
    db::{TimeZoneDatabase, TimeZoneDatabaseBuilder, ZoneSource},
    offset::{Dst, Offset},
    table::{ZoneRule, ZoneTable, ZoneTransition},
};

use self::table::WallLookup;

mod db;
mod offset;
mod table;
#[cfg(test)]
pub(crate) mod testdata;

/// A representation of a time zone.
///
/// A time zone is either UTC, a fixed offset, or a [`ZoneTable`]. Cloning
/// a `TimeZone` is cheap: the table is shared behind an `Arc` and never
/// mutated, so a `TimeZone` may be used from many threads at once.
///
/// # Precision
///
/// Offsets are whole seconds, so converting between instants and local
/// times needs a tick period that whole seconds convert into exactly. The
/// conversions are therefore bounded by [`DividesSecond`]. Time points with
/// a coarser period, like minutes or days, are converted by casting them to
/// seconds first (which is exact) and back afterwards when the offsets
/// involved allow it:
///
/// ```
/// use calends::{
///     duration::{period::{Minute, Second}, Minutes},
///     tz::{Offset, TimeZone},
///     Instant,
/// };
///
/// let tz = TimeZone::fixed(Offset::constant_seconds(19_800));
/// let t = Instant::<Minute>::EPOCH + Minutes::new(90);
/// let local = tz.to_local(t.cast::<Second>());
/// assert_eq!(local.to_string(), "1970-01-01 07:00:00");
/// assert_eq!(tz.to_instant(local)?.cast::<Minute>(), t);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Example
///
/// ```
/// use calends::{duration::period::Second, tz::{Offset, TimeZone}, Instant};
///
/// let tz = TimeZone::fixed(Offset::constant(-5));
/// assert_eq!(tz.name(), "-05");
/// let local = tz.to_local(Instant::<Second>::EPOCH);
/// assert_eq!(local.to_string(), "1969-12-31 19:00:00");
/// assert_eq!(tz.to_instant(local)?, Instant::EPOCH);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Eq, PartialEq)]
pub struct TimeZone {
    table: Option<Arc<ZoneTable>>,
}

impl TimeZone {
    /// The UTC time zone.
    ///
    /// The offset of this time zone is `0` and it never has any transitions.
    pub const UTC: TimeZone = TimeZone { table: None };

    /// Creates a time zone from a zone table.
    #[inline]
    pub fn new(table: ZoneTable) -> TimeZone {
        TimeZone { table: Some(Arc::new(table)) }
    }

    /// Creates a time zone with a fixed offset.
    ///
    /// The name and abbreviation of the time zone are both the offset
    /// rendered as a string, like `+05:30`. A zero offset returns
    /// [`TimeZone::UTC`].
    #[inline]
    pub fn fixed(offset: Offset) -> TimeZone {
        use alloc::string::ToString;

        if offset == Offset::UTC {
            return TimeZone::UTC;
        }
        let name = offset.to_string();
        TimeZone::new(ZoneTable::fixed(&name, offset, &name))
    }

    /// Returns the name of this time zone.
    #[inline]
    pub fn name(&self) -> &str {
        match self.table {
            None => "UTC",
            Some(ref table) => table.name(),
        }
    }

    /// Returns the zone table of this time zone, or `None` for UTC.
    #[inline]
    pub fn table(&self) -> Option<&ZoneTable> {
        self.table.as_deref()
    }

    /// Returns the offset, DST status and abbreviation in force at the
    /// given instant.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{duration::Seconds, tz::{Dst, Offset, TimeZone, ZoneRule, ZoneTable}, Instant};
    ///
    /// let switch = Instant::EPOCH + Seconds::new(1_000);
    /// let tz = TimeZone::new(ZoneTable::new("Example/Zone", vec![
    ///     ZoneRule::new(Instant::MIN, switch, Offset::constant(-5), Dst::No, "EST"),
    ///     ZoneRule::new(switch, Instant::MAX, Offset::constant(-4), Dst::Yes, "EDT"),
    /// ])?);
    ///
    /// let info = tz.to_offset_info(switch - Seconds::new(1));
    /// assert_eq!((info.offset(), info.dst(), info.abbreviation()), (Offset::constant(-5), Dst::No, "EST"));
    /// let info = tz.to_offset_info(switch);
    /// assert_eq!((info.offset(), info.dst(), info.abbreviation()), (Offset::constant(-4), Dst::Yes, "EDT"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_offset_info<P: Period>(&self, instant: Instant<P>) -> OffsetInfo<'_> {
        let Some(ref table) = self.table else {
            return OffsetInfo {
                offset: Offset::UTC,
                dst: Dst::No,
                abbreviation: "UTC",
            };
        };
        let rule = table.rule_at(floor_seconds(instant));
        OffsetInfo {
            offset: rule.offset(),
            dst: rule.dst(),
            abbreviation: rule.abbreviation(),
        }
    }

    /// Returns the offset in force at the given instant.
    #[inline]
    pub fn to_offset<P: Period>(&self, instant: Instant<P>) -> Offset {
        self.to_offset_info(instant).offset()
    }

    /// Converts an instant to the local time observed in this time zone.
    ///
    /// Every instant has exactly one local time. This saturates at the
    /// limits of [`LocalTime`].
    ///
    /// Instants with a period coarser than a second are cast to seconds
    /// first. See the [precision](TimeZone#precision) notes.
    #[inline]
    pub fn to_local<P: DividesSecond>(&self, instant: Instant<P>) -> LocalTime<P> {
        self.to_offset(instant).to_local(instant)
    }

    /// Returns the offset (or offsets) that could apply to the given local
    /// time.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{duration::{Hours, Seconds, period::Second}, tz::{AmbiguousOffset, Dst, Offset, TimeZone, ZoneRule, ZoneTable}, Instant, LocalTime};
    ///
    /// // The offset drops from +02 to +01 at 01:00Z, so local times
    /// // 02:00 up to 03:00 happen twice.
    /// let switch = Instant::<Second>::EPOCH + Hours::new(1).cast::<Second>();
    /// let tz = TimeZone::new(ZoneTable::new("Example/Zone", vec![
    ///     ZoneRule::new(Instant::MIN, switch, Offset::constant(2), Dst::Yes, "CEST"),
    ///     ZoneRule::new(switch, Instant::MAX, Offset::constant(1), Dst::No, "CET"),
    /// ])?);
    ///
    /// let local = LocalTime::<Second>::EPOCH + Seconds::new(9_000);
    /// assert_eq!(
    ///     tz.to_ambiguous_offset(local),
    ///     AmbiguousOffset::Fold { before: Offset::constant(2), after: Offset::constant(1) },
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn to_ambiguous_offset<P: DividesSecond>(
        &self,
        local: LocalTime<P>,
    ) -> AmbiguousOffset {
        match self.lookup_local(local) {
            WallLookup::Unambiguous { offset } => {
                AmbiguousOffset::Unambiguous { offset }
            }
            WallLookup::Gap { before, after, .. } => {
                AmbiguousOffset::Gap { before, after }
            }
            WallLookup::Fold { before, after } => {
                AmbiguousOffset::Fold { before, after }
            }
        }
    }

    /// Resolves a local time in this time zone to its candidate instants.
    ///
    /// See [`LocalResolution`] for the cases that can occur.
    pub fn resolve<P: DividesSecond>(
        &self,
        local: LocalTime<P>,
    ) -> LocalResolution<P> {
        match self.lookup_local(local) {
            WallLookup::Unambiguous { offset } => {
                LocalResolution::Unique(offset.to_instant(local))
            }
            WallLookup::Gap { before, after, transition } => {
                trace!(
                    "local time {local} falls in a gap between offsets \
                     {before} and {after} in time zone {}",
                    self.name(),
                );
                LocalResolution::Gap {
                    boundary: transition_in::<P>(transition),
                    before,
                    after,
                }
            }
            WallLookup::Fold { before, after } => {
                trace!(
                    "local time {local} falls in a fold between offsets \
                     {before} and {after} in time zone {}",
                    self.name(),
                );
                LocalResolution::Overlap {
                    earlier: before.to_instant(local),
                    later: after.to_instant(local),
                    before,
                    after,
                }
            }
        }
    }

    /// Converts a local time in this time zone to an instant.
    ///
    /// # Errors
    ///
    /// When the local time falls in a gap or a fold. The error carries the
    /// candidates: see [`Error::gap_boundary`] and
    /// [`Error::ambiguous_candidates`].
    pub fn to_instant<P: DividesSecond>(
        &self,
        local: LocalTime<P>,
    ) -> Result<Instant<P>, Error> {
        use alloc::string::ToString;

        self.resolve(local).unique().with_context(|| E::InTimeZone {
            name: self.name().into(),
            local: local.to_string().into(),
        })
    }

    /// Converts a local time in this time zone to an instant, picking a
    /// candidate with the given policy when the local time is ambiguous or
    /// doesn't exist.
    ///
    /// See [`Disambiguation`] for how each case is resolved.
    #[inline]
    pub fn to_instant_with<P: DividesSecond>(
        &self,
        local: LocalTime<P>,
        disambiguation: Disambiguation,
    ) -> Instant<P> {
        self.resolve(local).choose(disambiguation)
    }

    /// Returns the most recent transition strictly before the given
    /// instant, if one exists.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{duration::Seconds, tz::{Dst, Offset, TimeZone, ZoneRule, ZoneTable}, Instant};
    ///
    /// let switch = Instant::EPOCH + Seconds::new(1_000);
    /// let tz = TimeZone::new(ZoneTable::new("Example/Zone", vec![
    ///     ZoneRule::new(Instant::MIN, switch, Offset::constant(-5), Dst::No, "EST"),
    ///     ZoneRule::new(switch, Instant::MAX, Offset::constant(-4), Dst::Yes, "EDT"),
    /// ])?);
    ///
    /// let trans = tz.previous_transition(switch + Seconds::new(1)).unwrap();
    /// assert_eq!((trans.instant(), trans.abbreviation()), (switch, "EDT"));
    /// assert!(tz.previous_transition(switch).is_none());
    /// assert!(tz.next_transition(switch).is_none());
    /// assert!(TimeZone::UTC.next_transition(switch).is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn previous_transition<P: Period>(
        &self,
        instant: Instant<P>,
    ) -> Option<ZoneTransition<'_>> {
        let table = self.table.as_deref()?;
        let rule = table.previous_transition(ceil_seconds(instant))?;
        Some(ZoneTransition { rule })
    }

    /// Returns the soonest transition strictly after the given instant, if
    /// one exists.
    pub fn next_transition<P: Period>(
        &self,
        instant: Instant<P>,
    ) -> Option<ZoneTransition<'_>> {
        let table = self.table.as_deref()?;
        let rule = table.next_transition(floor_seconds(instant))?;
        Some(ZoneTransition { rule })
    }

    fn lookup_local<P: DividesSecond>(&self, local: LocalTime<P>) -> WallLookup {
        match self.table {
            None => WallLookup::Unambiguous { offset: Offset::UTC },
            Some(ref table) => table.to_ambiguous_kind(floor_seconds(local)),
        }
    }
}

impl core::fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_tuple("TimeZone").field(&self.name()).finish()
    }
}

impl core::fmt::Display for TimeZone {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// The offset, DST status and abbreviation in force at some instant.
///
/// This is returned by [`TimeZone::to_offset_info`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct OffsetInfo<'t> {
    offset: Offset,
    dst: Dst,
    abbreviation: &'t str,
}

impl<'t> OffsetInfo<'t> {
    /// Returns the offset from UTC.
    #[inline]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Returns whether daylight saving time is in force.
    ///
    /// Callers should generally treat this as informational only. Not all
    /// transitions are related to daylight saving time.
    #[inline]
    pub fn dst(&self) -> Dst {
        self.dst
    }

    /// Returns the time zone abbreviation, like `EST`.
    ///
    /// Abbreviations can be ambiguous. For example, `CST` is used both in
    /// `America/Chicago` and `Asia/Shanghai`.
    #[inline]
    pub fn abbreviation(&self) -> &'t str {
        self.abbreviation
    }
}

/// The offset (or offsets) that could apply to a local time.
///
/// This is returned by [`TimeZone::to_ambiguous_offset`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AmbiguousOffset {
    /// Exactly one offset applies.
    Unambiguous {
        /// The offset.
        offset: Offset,
    },
    /// The local time was skipped when the offset increased.
    Gap {
        /// The offset in force before the gap.
        before: Offset,
        /// The offset in force after the gap.
        after: Offset,
    },
    /// The local time occurs twice because the offset decreased.
    Fold {
        /// The offset in force before the fold.
        before: Offset,
        /// The offset in force after the fold.
        after: Offset,
    },
}

/// A policy for picking an instant when a local time doesn't map to exactly
/// one instant.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Disambiguation {
    /// In a fold, pick the earlier instant: the one computed with the offset
    /// in force before the transition. In a gap, pick the transition.
    #[default]
    Earliest,
    /// In a fold, pick the later instant: the one computed with the offset
    /// in force after the transition. In a gap, pick the transition.
    Latest,
}

/// The result of resolving a local time in a time zone.
///
/// # Example
///
/// ```
/// use calends::{
///     duration::{Hours, Seconds, period::Second},
///     tz::{Disambiguation, Dst, LocalResolution, Offset, TimeZone, ZoneRule, ZoneTable},
///     Instant, LocalTime,
/// };
///
/// let switch = Instant::<Second>::EPOCH + Hours::new(1).cast::<Second>();
/// let tz = TimeZone::new(ZoneTable::new("Example/Zone", vec![
///     ZoneRule::new(Instant::MIN, switch, Offset::constant(2), Dst::Yes, "CEST"),
///     ZoneRule::new(switch, Instant::MAX, Offset::constant(1), Dst::No, "CET"),
/// ])?);
///
/// let local = LocalTime::<Second>::EPOCH + Seconds::new(9_000);
/// let LocalResolution::Overlap { earlier, later, .. } = tz.resolve(local) else {
///     unreachable!()
/// };
/// assert_eq!(later - earlier, Hours::new(1).cast::<Second>());
/// assert_eq!(tz.resolve(local).choose(Disambiguation::Latest), later);
/// assert!(tz.resolve(local).unique().unwrap_err().is_ambiguous_local_time());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LocalResolution<P: Period> {
    /// The local time corresponds to exactly one instant.
    Unique(Instant<P>),
    /// The local time doesn't exist. The gap ends at `boundary`, which is
    /// the first instant after the transition. Its local time is the first
    /// local time after the gap.
    Gap {
        /// The transition instant.
        boundary: Instant<P>,
        /// The offset in force before the transition.
        before: Offset,
        /// The offset in force after the transition.
        after: Offset,
    },
    /// The local time corresponds to two instants.
    Overlap {
        /// The instant computed with the offset in force before the
        /// transition.
        earlier: Instant<P>,
        /// The instant computed with the offset in force after the
        /// transition.
        later: Instant<P>,
        /// The offset in force before the transition.
        before: Offset,
        /// The offset in force after the transition.
        after: Offset,
    },
}

impl<P: Period> LocalResolution<P> {
    /// Picks an instant with the given policy.
    ///
    /// In a gap, both policies pick the transition instant, so a local time
    /// skipped by the transition resolves to the first local time after the
    /// gap.
    #[inline]
    pub fn choose(self, disambiguation: Disambiguation) -> Instant<P> {
        match (self, disambiguation) {
            (LocalResolution::Unique(instant), _) => instant,
            (LocalResolution::Gap { boundary, .. }, _) => boundary,
            (LocalResolution::Overlap { earlier, .. }, Disambiguation::Earliest) => {
                earlier
            }
            (LocalResolution::Overlap { later, .. }, Disambiguation::Latest) => {
                later
            }
        }
    }

    /// Returns the instant only when it is unique.
    ///
    /// # Errors
    ///
    /// A nonexistent local time error for a gap, and an ambiguous local
    /// time error (carrying both candidates) for an overlap.
    pub fn unique(self) -> Result<Instant<P>, Error> {
        match self {
            LocalResolution::Unique(instant) => Ok(instant),
            LocalResolution::Gap { boundary, before, after } => {
                Err(Error::from(E::Gap {
                    before,
                    after,
                    boundary: ErasedInstant::new(boundary),
                }))
            }
            LocalResolution::Overlap { earlier, later, before, after } => {
                Err(Error::from(E::Fold {
                    before,
                    after,
                    earlier: ErasedInstant::new(earlier),
                    later: ErasedInstant::new(later),
                }))
            }
        }
    }

    /// Returns true when the local time doesn't map to exactly one instant.
    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        !matches!(*self, LocalResolution::Unique(_))
    }
}

/// Converts a transition instant to the tick period `P`, saturating.
fn transition_in<P: DividesSecond>(instant: Instant<Second>) -> Instant<P> {
    let ticks = i128::from(instant.since_epoch().count()) * i128::from(P::DEN)
        / i128::from(P::NUM);
    let ticks = i64::try_from(ticks)
        .unwrap_or(if ticks < 0 { i64::MIN } else { i64::MAX });
    Instant::from_since_epoch(Duration::new(ticks))
}

/// Returns the largest whole second at or before the given time point,
/// saturating.
fn floor_seconds<S: crate::instant::Scale, P: Period>(
    point: crate::instant::TimePoint<S, P>,
) -> i64 {
    let units = i128::from(point.since_epoch().count()) * i128::from(P::NUM);
    let secs = units.div_euclid(i128::from(P::DEN));
    i64::try_from(secs).unwrap_or(if secs < 0 { i64::MIN } else { i64::MAX })
}

/// Returns the smallest whole second at or after the given time point,
/// saturating.
fn ceil_seconds<S: crate::instant::Scale, P: Period>(
    point: crate::instant::TimePoint<S, P>,
) -> i64 {
    let units = i128::from(point.since_epoch().count()) * i128::from(P::NUM);
    let den = i128::from(P::DEN);
    let secs = -((-units).div_euclid(den));
    i64::try_from(secs).unwrap_or(if secs < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::{
        civil::Date,
        duration::{
            period::{Milli, Second},
            Hours, Milliseconds, Minutes, Seconds,
        },
    };

    use super::{testdata, *};

    fn local(y: i16, m: u8, d: u8, h: i64, min: i64) -> LocalTime<Second> {
        Date::new(y, m, d).to_local_days().cast::<Second>()
            + Hours::new(h).cast::<Second>()
            + Minutes::new(min).cast::<Second>()
    }

    fn unix(second: i64) -> Instant<Second> {
        Instant::from_since_epoch(Seconds::new(second))
    }

    #[test]
    fn utc() {
        let tz = TimeZone::UTC;
        assert_eq!(tz.name(), "UTC");
        assert_eq!(TimeZone::fixed(Offset::UTC), TimeZone::UTC);
        let info = tz.to_offset_info(unix(0));
        assert_eq!(info.abbreviation(), "UTC");
        assert_eq!(info.dst(), Dst::No);
        let l = local(2024, 3, 10, 2, 30);
        assert_eq!(tz.resolve(l), LocalResolution::Unique(unix(l.since_epoch().count())));
    }

    #[test]
    fn offset_info_new_york() {
        let _ = crate::logging::Logger::init();
        let tz = testdata::america_new_york();
        let info = tz.to_offset_info(unix(1_710_054_000 - 1));
        assert_eq!((info.offset(), info.abbreviation()), (Offset::constant(-5), "EST"));
        let info = tz.to_offset_info(unix(1_710_054_000));
        assert_eq!((info.offset(), info.abbreviation()), (Offset::constant(-4), "EDT"));
        assert!(info.dst().is_dst());
        // Edges extend.
        assert_eq!(tz.to_offset(Instant::<Second>::MIN), Offset::constant(-5));
        assert_eq!(tz.to_offset(Instant::<Second>::MAX), Offset::constant(-5));
        // Subsecond precision right before the transition.
        let t: Instant<Milli> =
            Instant::from_since_epoch(Milliseconds::new(1_710_054_000_000 - 1));
        assert_eq!(tz.to_offset(t), Offset::constant(-5));
        assert_eq!(tz.to_local(t).to_string(), "2024-03-10 01:59:59.999");
    }

    #[test]
    fn gap() {
        let _ = crate::logging::Logger::init();
        let tz = testdata::europe_berlin();
        let l = local(2024, 3, 31, 2, 30);
        assert_eq!(
            tz.to_ambiguous_offset(l),
            AmbiguousOffset::Gap {
                before: Offset::constant(1),
                after: Offset::constant(2),
            },
        );
        let err = tz.to_instant(l).unwrap_err();
        assert!(err.is_nonexistent_local_time());
        assert_eq!(err.gap_boundary::<Second>(), Some(unix(1_711_846_800)));
        assert_eq!(err.gap_boundary::<Milli>(), None);
        insta::assert_snapshot!(
            err,
            @"failed to convert local time 2024-03-31 02:30:00 to an instant in time zone Europe/Berlin: local time does not exist since it falls into a gap between offsets +01 and +02",
        );
        for policy in [Disambiguation::Earliest, Disambiguation::Latest] {
            let instant = tz.to_instant_with(l, policy);
            assert_eq!(instant, unix(1_711_846_800));
            assert_eq!(tz.to_local(instant), local(2024, 3, 31, 3, 0));
        }
        // The edges of the gap.
        assert!(tz.to_instant(local(2024, 3, 31, 2, 0)).is_err());
        assert_eq!(
            tz.to_instant(local(2024, 3, 31, 1, 59))
                .unwrap()
                .since_epoch(),
            Seconds::new(1_711_846_800 - 60),
        );
        assert_eq!(
            tz.to_instant(local(2024, 3, 31, 3, 0)).unwrap(),
            unix(1_711_846_800),
        );
    }

    #[test]
    fn overlap() {
        let _ = crate::logging::Logger::init();
        let tz = testdata::europe_berlin();
        let l = local(2024, 10, 27, 2, 30);
        let err = tz.to_instant(l).unwrap_err();
        assert!(err.is_ambiguous_local_time());
        let (earlier, later) = err.ambiguous_candidates::<Second>().unwrap();
        assert_eq!(earlier, unix(1_729_989_000));
        assert_eq!(later, unix(1_729_992_600));
        insta::assert_snapshot!(
            err,
            @"failed to convert local time 2024-10-27 02:30:00 to an instant in time zone Europe/Berlin: local time is ambiguous since it falls into a fold between offsets +02 and +01",
        );

        let earliest = tz.to_instant_with(l, Disambiguation::Earliest);
        let latest = tz.to_instant_with(l, Disambiguation::Latest);
        assert_eq!((earliest, latest), (earlier, later));
        assert_eq!(tz.to_offset(earliest), Offset::constant(2));
        assert_eq!(tz.to_offset(latest), Offset::constant(1));
        assert_eq!(tz.to_local(earliest), l);
        assert_eq!(tz.to_local(latest), l);
        // 03:00 is past the fold.
        assert!(!tz.resolve(local(2024, 10, 27, 3, 0)).is_ambiguous());
    }

    #[test]
    fn southern_hemisphere() {
        let tz = testdata::australia_hobart();
        // Clocks go back from 03:00 to 02:00 local in April.
        let err = tz.to_instant(local(2024, 4, 7, 2, 30)).unwrap_err();
        assert!(err.is_ambiguous_local_time());
        // Clocks go forward from 02:00 to 03:00 local in October.
        let l = local(2024, 10, 6, 2, 30);
        assert!(tz.to_instant(l).unwrap_err().is_nonexistent_local_time());
        assert_eq!(
            tz.to_instant_with(l, Disambiguation::Latest),
            unix(1_728_144_000),
        );
    }

    #[test]
    fn subsecond_resolution() {
        let tz = testdata::europe_berlin();
        let l: LocalTime<Milli> = local(2024, 3, 31, 1, 59).cast::<Milli>()
            + Milliseconds::new(59_999);
        assert!(!tz.resolve(l).is_ambiguous());
        let l = l + Milliseconds::new(1);
        let boundary = tz.to_instant(l).unwrap_err().gap_boundary::<Milli>();
        assert_eq!(
            boundary,
            Some(Instant::from_since_epoch(Milliseconds::new(1_711_846_800_000))),
        );
    }

    #[test]
    fn transitions() {
        let tz = testdata::america_new_york();
        let t = unix(1_710_054_000);
        let prev = tz.previous_transition(t).unwrap();
        assert_eq!(prev.instant(), unix(1_699_164_000));
        assert_eq!(prev.abbreviation(), "EST");
        let next = tz.next_transition(t).unwrap();
        assert_eq!(next.instant(), unix(1_730_613_600));
        assert_eq!(next.offset(), Offset::constant(-5));

        let t: Instant<Milli> =
            Instant::from_since_epoch(Milliseconds::new(1_710_054_000_001));
        assert_eq!(tz.previous_transition(t).unwrap().instant(), unix(1_710_054_000));
    }

    #[test]
    fn rounding_helpers() {
        let t: Instant<Milli> = Instant::from_since_epoch(Milliseconds::new(-1));
        assert_eq!(floor_seconds(t), -1);
        assert_eq!(ceil_seconds(t), 0);
        let t: Instant<Milli> = Instant::from_since_epoch(Milliseconds::new(1_001));
        assert_eq!(floor_seconds(t), 1);
        assert_eq!(ceil_seconds(t), 2);
        assert_eq!(floor_seconds(Instant::<Second>::MIN), i64::MIN);
    }
}
