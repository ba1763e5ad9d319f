use alloc::{boxed::Box, sync::Arc, vec::Vec};

use crate::{
    error::{tz::db::Error as E, Error},
    tz::{TimeZone, ZoneTable},
};

/// A source of time zones, looked up by name.
///
/// This is the seam through which time zone data enters this crate. It also
/// names the time zone that should be treated as "current," which callers
/// would otherwise read from process-wide state.
///
/// # Example
///
/// A source that only knows about UTC and a single fixed offset zone:
///
/// ```
/// use calends::tz::{Offset, TimeZone, ZoneSource};
///
/// struct Tiny;
///
/// impl ZoneSource for Tiny {
///     fn lookup(&self, name: &str) -> Option<TimeZone> {
///         match name {
///             "UTC" => Some(TimeZone::UTC),
///             "Fixed/Plus1" => Some(TimeZone::fixed(Offset::constant(1))),
///             _ => None,
///         }
///     }
///
///     fn current_zone(&self) -> &str {
///         "Fixed/Plus1"
///     }
/// }
///
/// assert_eq!(Tiny.current()?.to_offset(calends::Instant::<calends::duration::period::Second>::EPOCH), Offset::constant(1));
/// assert!(Tiny.get("Nowhere").unwrap_err().is_unknown_time_zone());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait ZoneSource {
    /// Returns the time zone with the given name, if this source has one.
    fn lookup(&self, name: &str) -> Option<TimeZone>;

    /// Returns the name of the current time zone.
    fn current_zone(&self) -> &str;

    /// Returns the time zone with the given name.
    ///
    /// # Errors
    ///
    /// When this source doesn't know about the given name.
    fn get(&self, name: &str) -> Result<TimeZone, Error> {
        self.lookup(name).ok_or_else(|| E::unknown_time_zone(name).into())
    }

    /// Returns the current time zone.
    ///
    /// # Errors
    ///
    /// When this source doesn't know about the name returned by
    /// [`ZoneSource::current_zone`].
    fn current(&self) -> Result<TimeZone, Error> {
        self.get(self.current_zone())
    }
}

impl<'a, S: ZoneSource + ?Sized> ZoneSource for &'a S {
    fn lookup(&self, name: &str) -> Option<TimeZone> {
        (**self).lookup(name)
    }

    fn current_zone(&self) -> &str {
        (**self).current_zone()
    }
}

/// An immutable snapshot of time zones, looked up by name.
///
/// Lookups are ASCII case insensitive. `UTC` can always be found, even when
/// the database was built without any tables. Cloning a database is cheap
/// and the clones share their time zones.
///
/// To pick up new zone data, build a new database and replace the old one.
/// Time zones handed out by the old database keep working.
///
/// # Example
///
/// ```
/// use calends::{
///     duration::period::Second,
///     tz::{Offset, TimeZoneDatabase, ZoneSource, ZoneTable},
///     Instant,
/// };
///
/// let db = TimeZoneDatabase::builder()
///     .zone(ZoneTable::fixed("Asia/Kolkata", Offset::constant_seconds(19_800), "IST"))
///     .current_zone("Asia/Kolkata")
///     .build();
///
/// let tz = db.get("asia/kolkata")?;
/// assert_eq!(tz.name(), "Asia/Kolkata");
/// assert_eq!(db.current()?, tz);
/// assert_eq!(db.get("utc")?.to_offset(Instant::<Second>::EPOCH), Offset::UTC);
/// assert_eq!(db.names().collect::<Vec<_>>(), vec!["Asia/Kolkata", "UTC"]);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct TimeZoneDatabase {
    inner: Arc<TimeZoneDatabaseInner>,
}

struct TimeZoneDatabaseInner {
    /// Sorted by name, ignoring ASCII case. Names are unique under the same
    /// comparison.
    zones: Vec<TimeZone>,
    current: Box<str>,
}

impl TimeZoneDatabase {
    /// Returns a builder for a new database.
    #[inline]
    pub fn builder() -> TimeZoneDatabaseBuilder {
        TimeZoneDatabaseBuilder::default()
    }

    /// Returns the names of all time zones in this database, sorted while
    /// ignoring ASCII case.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.zones.iter().map(|tz| tz.name())
    }

    /// Returns the number of time zones in this database, including `UTC`.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.zones.len()
    }

    /// Returns true when this database has no time zones.
    ///
    /// This is always false since `UTC` is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.zones.is_empty()
    }
}

impl ZoneSource for TimeZoneDatabase {
    fn lookup(&self, name: &str) -> Option<TimeZone> {
        let search = self
            .inner
            .zones
            .binary_search_by(|tz| cmp_ignore_ascii_case(tz.name(), name));
        match search {
            Ok(i) => {
                trace!("found time zone `{name}` in database");
                Some(self.inner.zones[i].clone())
            }
            Err(_) => {
                debug!("could not find time zone `{name}` in database");
                None
            }
        }
    }

    fn current_zone(&self) -> &str {
        &self.inner.current
    }
}

impl core::fmt::Debug for TimeZoneDatabase {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("TimeZoneDatabase")
            .field("zones", &self.len())
            .field("current", &self.current_zone())
            .finish()
    }
}

/// A builder for a [`TimeZoneDatabase`].
///
/// When two tables share a name (ignoring ASCII case), the one added last
/// wins. A table named `UTC` replaces the built in one.
#[derive(Clone, Debug, Default)]
pub struct TimeZoneDatabaseBuilder {
    zones: Vec<TimeZone>,
    current: Option<Box<str>>,
}

impl TimeZoneDatabaseBuilder {
    /// Adds a zone table to the database.
    pub fn zone(mut self, table: ZoneTable) -> TimeZoneDatabaseBuilder {
        self.zones.push(TimeZone::new(table));
        self
    }

    /// Adds many zone tables to the database.
    pub fn zones(
        mut self,
        tables: impl IntoIterator<Item = ZoneTable>,
    ) -> TimeZoneDatabaseBuilder {
        self.zones.extend(tables.into_iter().map(TimeZone::new));
        self
    }

    /// Sets the name of the current time zone. This defaults to `UTC`.
    ///
    /// The name isn't checked against the zones in the database. When it's
    /// missing, [`ZoneSource::current`] returns an error.
    pub fn current_zone(mut self, name: &str) -> TimeZoneDatabaseBuilder {
        self.current = Some(name.into());
        self
    }

    /// Builds the database.
    pub fn build(self) -> TimeZoneDatabase {
        let mut zones = Vec::with_capacity(self.zones.len() + 1);
        zones.push(TimeZone::UTC);
        zones.extend(self.zones);
        // Stable, so later duplicates stay after earlier ones.
        zones.sort_by(|tz1, tz2| cmp_ignore_ascii_case(tz1.name(), tz2.name()));
        zones.reverse();
        zones.dedup_by(|tz2, tz1| {
            cmp_ignore_ascii_case(tz1.name(), tz2.name()).is_eq()
        });
        zones.reverse();
        let current = self.current.unwrap_or_else(|| "UTC".into());
        debug!(
            "built time zone database with {} zones, current zone `{current}`",
            zones.len(),
        );
        let inner = TimeZoneDatabaseInner { zones, current };
        TimeZoneDatabase { inner: Arc::new(inner) }
    }
}

/// Like std's `eq_ignore_ascii_case`, but returns a full `Ordering`.
fn cmp_ignore_ascii_case(s1: &str, s2: &str) -> core::cmp::Ordering {
    let it1 = s1.as_bytes().iter().map(|&b| b.to_ascii_lowercase());
    let it2 = s2.as_bytes().iter().map(|&b| b.to_ascii_lowercase());
    it1.cmp(it2)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::{
        duration::period::Second,
        instant::Instant,
        tz::{testdata, Offset},
    };

    use super::*;

    fn database() -> TimeZoneDatabase {
        let tables = [
            testdata::europe_berlin(),
            testdata::america_new_york(),
            testdata::australia_hobart(),
        ];
        TimeZoneDatabase::builder()
            .zones(tables.iter().filter_map(|tz| tz.table().cloned()))
            .current_zone("America/New_York")
            .build()
    }

    #[test]
    fn lookup() {
        let _ = crate::logging::Logger::init();
        let db = database();
        assert_eq!(db.len(), 4);
        assert_eq!(
            db.names().collect::<Vec<_>>(),
            vec!["America/New_York", "Australia/Hobart", "Europe/Berlin", "UTC"],
        );
        assert_eq!(db.get("EUROPE/BERLIN").unwrap().name(), "Europe/Berlin");
        assert_eq!(db.get("Utc").unwrap(), TimeZone::UTC);
        assert_eq!(db.current().unwrap().name(), "America/New_York");

        let err = db.get("Europe/Atlantis").unwrap_err();
        assert!(err.is_unknown_time_zone());
        insta::assert_snapshot!(
            err,
            @"failed to find time zone `Europe/Atlantis` in time zone database",
        );
    }

    #[test]
    fn empty_database_has_utc() {
        let db = TimeZoneDatabase::builder().build();
        assert!(!db.is_empty());
        assert_eq!(db.current().unwrap(), TimeZone::UTC);
        let db = TimeZoneDatabase::builder().current_zone("Nowhere").build();
        assert!(db.current().unwrap_err().is_unknown_time_zone());
    }

    #[test]
    fn later_duplicates_win() {
        let db = TimeZoneDatabase::builder()
            .zone(ZoneTable::fixed("Test/Zone", Offset::constant(1), "A"))
            .zone(ZoneTable::fixed("test/zone", Offset::constant(2), "B"))
            .zone(ZoneTable::fixed("UTC", Offset::constant(3), "C"))
            .build();
        assert_eq!(db.len(), 2);
        let tz = db.get("TEST/ZONE").unwrap();
        assert_eq!(tz.name(), "test/zone");
        assert_eq!(tz.to_offset(Instant::<Second>::EPOCH), Offset::constant(2));
        let utc = db.get("UTC").unwrap();
        assert_eq!(utc.to_offset(Instant::<Second>::EPOCH), Offset::constant(3));
    }

    #[test]
    fn snapshots_are_independent() {
        let old = database();
        let berlin = old.get("Europe/Berlin").unwrap();
        let new = TimeZoneDatabase::builder().build();
        drop(old);
        assert!(new.get("Europe/Berlin").is_err());
        assert_eq!(berlin.name(), "Europe/Berlin");
    }

    #[test]
    fn borrowed_source() {
        fn current_name(source: impl ZoneSource) -> alloc::string::String {
            use alloc::string::ToString;

            source.current().unwrap().name().to_string()
        }
        let db = database();
        assert_eq!(current_name(&db), "America/New_York");
    }
}
