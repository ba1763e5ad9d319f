use alloc::{boxed::Box, vec::Vec};

use crate::{
    duration::period::Second,
    error::{tz::table::Error as E, Error},
    instant::Instant,
    tz::{Dst, Offset},
};

/// A single rule of a [`ZoneTable`]: the offset, DST status and
/// abbreviation in force over a half-open interval of instants.
///
/// # Example
///
/// ```
/// use calends::{duration::Seconds, tz::{Dst, Offset, ZoneRule}, Instant};
///
/// let rule = ZoneRule::new(
///     Instant::EPOCH,
///     Instant::EPOCH + Seconds::new(3_600),
///     Offset::constant(1),
///     Dst::No,
///     "CET",
/// );
/// assert_eq!(rule.abbreviation(), "CET");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ZoneRule {
    begin: Instant<Second>,
    end: Instant<Second>,
    offset: Offset,
    dst: Dst,
    abbreviation: Box<str>,
}

impl ZoneRule {
    /// Creates a rule that applies from `begin` (inclusive) up to `end`
    /// (exclusive).
    ///
    /// Rules are validated when a [`ZoneTable`] is built from them.
    pub fn new(
        begin: Instant<Second>,
        end: Instant<Second>,
        offset: Offset,
        dst: Dst,
        abbreviation: &str,
    ) -> ZoneRule {
        ZoneRule { begin, end, offset, dst, abbreviation: abbreviation.into() }
    }

    /// Returns the first instant at which this rule applies.
    #[inline]
    pub fn begin(&self) -> Instant<Second> {
        self.begin
    }

    /// Returns the instant at which this rule stops applying.
    #[inline]
    pub fn end(&self) -> Instant<Second> {
        self.end
    }

    /// Returns the offset from UTC in force under this rule.
    #[inline]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Returns whether this rule describes daylight saving time.
    #[inline]
    pub fn dst(&self) -> Dst {
        self.dst
    }

    /// Returns the abbreviation of this rule, like `EST` or `CEST`.
    #[inline]
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    fn begin_second(&self) -> i64 {
        self.begin.since_epoch().count()
    }
}

/// An ordered sequence of [`ZoneRule`]s describing the history of one time
/// zone.
///
/// A table is immutable once built. The rules must be contiguous: each
/// rule begins exactly where the previous one ends. The first rule also
/// applies to every instant before it begins and the last rule applies to
/// every instant after it ends.
///
/// # Example
///
/// ```
/// use calends::{
///     duration::Seconds,
///     tz::{Dst, Offset, ZoneRule, ZoneTable},
///     Instant,
/// };
///
/// let switch = Instant::EPOCH + Seconds::new(86_400);
/// let rules = vec![
///     ZoneRule::new(Instant::MIN, switch, Offset::constant(0), Dst::No, "GMT"),
///     ZoneRule::new(switch, Instant::MAX, Offset::constant(1), Dst::Yes, "BST"),
/// ];
/// let table = ZoneTable::new("Europe/London", rules)?;
/// assert_eq!(table.rules().len(), 2);
///
/// let rules = vec![
///     ZoneRule::new(Instant::MIN, switch, Offset::constant(0), Dst::No, "GMT"),
///     ZoneRule::new(switch + Seconds::new(1), Instant::MAX, Offset::constant(1), Dst::Yes, "BST"),
/// ];
/// assert!(ZoneTable::new("Europe/London", rules).unwrap_err().is_invalid_zone_table());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ZoneTable {
    name: Box<str>,
    rules: Vec<ZoneRule>,
    /// One wall per rule, describing the local times at which that rule
    /// starts to apply. The wall of the first rule starts at the beginning
    /// of time.
    walls: Vec<TransitionWall>,
}

impl ZoneTable {
    /// Builds a table from a sequence of rules ordered by time.
    ///
    /// # Errors
    ///
    /// When there are no rules, when a rule doesn't begin before it ends,
    /// or when a rule doesn't begin where its predecessor ends.
    ///
    /// Also when a rule is shorter than the offset changes at its edges,
    /// such that local times skipped or repeated at its start would overlap
    /// those skipped or repeated at its end. For example, a rule lasting
    /// 30 minutes that is entered by a one hour gap.
    pub fn new(name: &str, rules: Vec<ZoneRule>) -> Result<ZoneTable, Error> {
        if rules.is_empty() {
            return Err(Error::from(E::Empty { name: name.into() }));
        }
        for (index, rule) in rules.iter().enumerate() {
            if rule.begin >= rule.end {
                return Err(Error::from(E::EmptyInterval {
                    name: name.into(),
                    index,
                }));
            }
            if index > 0 && rules[index - 1].end != rule.begin {
                return Err(Error::from(E::NotContiguous {
                    name: name.into(),
                    index,
                }));
            }
        }
        let mut walls = Vec::with_capacity(rules.len());
        walls.push(TransitionWall::Unambiguous { start: i64::MIN });
        for pair in rules.windows(2) {
            walls.push(TransitionWall::new(
                pair[1].begin_second(),
                pair[0].offset,
                pair[1].offset,
            ));
        }
        for (index, pair) in walls.windows(2).enumerate() {
            if pair[0].end() > pair[1].start() {
                return Err(Error::from(E::TooShort {
                    name: name.into(),
                    index,
                }));
            }
        }
        debug!("built zone table `{name}` with {} rules", rules.len());
        Ok(ZoneTable { name: name.into(), rules, walls })
    }

    /// Builds a table with a single rule that applies at all times.
    pub fn fixed(name: &str, offset: Offset, abbreviation: &str) -> ZoneTable {
        let rule = ZoneRule::new(
            Instant::MIN,
            Instant::MAX,
            offset,
            Dst::No,
            abbreviation,
        );
        ZoneTable {
            name: name.into(),
            rules: alloc::vec![rule],
            walls: alloc::vec![TransitionWall::Unambiguous { start: i64::MIN }],
        }
    }

    /// Returns the name of this table's time zone.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rules of this table, ordered by time.
    #[inline]
    pub fn rules(&self) -> &[ZoneRule] {
        &self.rules
    }

    /// Returns the rule in force at the given second since the epoch.
    pub(crate) fn rule_at(&self, second: i64) -> &ZoneRule {
        let index =
            self.rules.partition_point(|rule| rule.begin_second() <= second);
        // The first rule extends back to the beginning of time.
        &self.rules[index.saturating_sub(1)]
    }

    /// Returns how the given local second (floored) maps onto this table.
    ///
    /// Since all transitions happen on whole seconds, the floor of a local
    /// time with subsecond precision always lands in the same gap, fold or
    /// unambiguous region as the local time itself.
    pub(crate) fn to_ambiguous_kind(&self, local_second: i64) -> WallLookup {
        let index = self
            .walls
            .partition_point(|wall| wall.start() <= local_second)
            .saturating_sub(1);
        let this = &self.rules[index];
        match self.walls[index] {
            TransitionWall::Gap { end, .. } if local_second < end => {
                // Gaps and folds only appear on walls after the first.
                let prev = &self.rules[index - 1];
                WallLookup::Gap {
                    before: prev.offset,
                    after: this.offset,
                    transition: this.begin,
                }
            }
            TransitionWall::Fold { end, .. } if local_second < end => {
                let prev = &self.rules[index - 1];
                WallLookup::Fold { before: prev.offset, after: this.offset }
            }
            _ => WallLookup::Unambiguous { offset: this.offset },
        }
    }

    /// Returns the rule of the most recent transition strictly before the
    /// given second.
    pub(crate) fn previous_transition(&self, second: i64) -> Option<&ZoneRule> {
        let index =
            self.rules.partition_point(|rule| rule.begin_second() < second);
        // The first rule doesn't begin with a transition.
        let index = index.checked_sub(1).filter(|&i| i > 0)?;
        Some(&self.rules[index])
    }

    /// Returns the rule of the soonest transition strictly after the given
    /// second.
    pub(crate) fn next_transition(&self, second: i64) -> Option<&ZoneRule> {
        let index =
            self.rules.partition_point(|rule| rule.begin_second() <= second);
        self.rules.get(index.max(1))
    }
}

/// The result of looking up a local time in a [`ZoneTable`].
#[derive(Clone, Copy, Debug)]
pub(crate) enum WallLookup {
    Unambiguous { offset: Offset },
    Gap { before: Offset, after: Offset, transition: Instant<Second> },
    Fold { before: Offset, after: Offset },
}

/// The local (wall clock) times at which a rule starts to apply.
///
/// This is derived from the rule's begin instant along with its offset and
/// the offset of the previous rule.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TransitionWall {
    /// The offset doesn't change, so no local time is ambiguous.
    Unambiguous {
        /// The local second at which this rule starts, inclusive.
        start: i64,
    },
    /// The offset increases. Local times in `start..end` are skipped.
    Gap { start: i64, end: i64 },
    /// The offset decreases. Local times in `start..end` occur twice.
    Fold { start: i64, end: i64 },
}

impl TransitionWall {
    fn new(transition: i64, prev: Offset, this: Offset) -> TransitionWall {
        let at = |offset: Offset| {
            transition.saturating_add(i64::from(offset.seconds()))
        };
        if prev == this {
            TransitionWall::Unambiguous { start: at(prev) }
        } else if prev < this {
            TransitionWall::Gap { start: at(prev), end: at(this) }
        } else {
            TransitionWall::Fold { start: at(this), end: at(prev) }
        }
    }

    fn start(&self) -> i64 {
        match *self {
            TransitionWall::Unambiguous { start }
            | TransitionWall::Gap { start, .. }
            | TransitionWall::Fold { start, .. } => start,
        }
    }

    /// The local second at which this wall's gap or fold ends, exclusive.
    fn end(&self) -> i64 {
        match *self {
            TransitionWall::Unambiguous { start } => start,
            TransitionWall::Gap { end, .. }
            | TransitionWall::Fold { end, .. } => end,
        }
    }
}

/// A time zone transition: the instant at which a new rule starts to
/// apply.
///
/// This is returned by
/// [`TimeZone::previous_transition`](crate::tz::TimeZone::previous_transition)
/// and [`TimeZone::next_transition`](crate::tz::TimeZone::next_transition).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ZoneTransition<'t> {
    pub(crate) rule: &'t ZoneRule,
}

impl<'t> ZoneTransition<'t> {
    /// Returns the instant at which this transition occurs.
    #[inline]
    pub fn instant(&self) -> Instant<Second> {
        self.rule.begin
    }

    /// Returns the offset in force starting at this transition.
    #[inline]
    pub fn offset(&self) -> Offset {
        self.rule.offset
    }

    /// Returns whether DST is in force starting at this transition.
    #[inline]
    pub fn dst(&self) -> Dst {
        self.rule.dst
    }

    /// Returns the abbreviation in use starting at this transition.
    #[inline]
    pub fn abbreviation(&self) -> &'t str {
        &self.rule.abbreviation
    }
}

/// Builds contiguous rules alternating between two offsets at the given
/// transition seconds. The first rule uses `first`.
#[cfg(test)]
pub(crate) fn alternating(
    transitions: &[i64],
    first: (Offset, Dst, &str),
    second: (Offset, Dst, &str),
) -> Vec<ZoneRule> {
    let mut bounds = Vec::with_capacity(transitions.len() + 2);
    bounds.push(Instant::MIN);
    bounds.extend(
        transitions
            .iter()
            .map(|&s| Instant::from_since_epoch(crate::duration::Seconds::new(s))),
    );
    bounds.push(Instant::MAX);
    bounds
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let (offset, dst, abbr) = if i % 2 == 0 { first } else { second };
            ZoneRule::new(w[0], w[1], offset, dst, abbr)
        })
        .collect()
}
