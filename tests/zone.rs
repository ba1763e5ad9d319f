use calends::{
    civil::Date,
    duration::{
        period::{Day, Minute, Second},
        Hours, Minutes, Seconds,
    },
    tz::{
        AmbiguousOffset, Disambiguation, Dst, LocalResolution, Offset,
        TimeZone, TimeZoneDatabase, ZoneRule, ZoneSource, ZoneTable,
    },
    Instant, LocalTime, Zoned,
};

use crate::Result;

fn at(unix: i64) -> Instant<Second> {
    Instant::from_since_epoch(Seconds::new(unix))
}

fn local(y: i16, m: u8, d: u8, h: i64, mi: i64) -> LocalTime<Second> {
    Date::new(y, m, d).to_local_days().cast::<Second>()
        + Hours::new(h).cast::<Second>()
        + Minutes::new(mi).cast::<Second>()
}

/// Builds a table that alternates between a standard and a daylight saving
/// rule at each of the given transitions, starting with standard time.
fn alternating(
    name: &str,
    transitions: &[i64],
    std: (i8, &str),
    dst: (i8, &str),
) -> anyhow::Result<ZoneTable> {
    let mut rules = vec![];
    let mut begin = Instant::MIN;
    for (i, &unix) in transitions.iter().chain([&i64::MAX]).enumerate() {
        let end = if unix == i64::MAX { Instant::MAX } else { at(unix) };
        let ((hours, abbr), flag) =
            if i % 2 == 0 { (std, Dst::No) } else { (dst, Dst::Yes) };
        rules.push(ZoneRule::new(
            begin,
            end,
            Offset::constant(hours),
            flag,
            abbr,
        ));
        begin = end;
    }
    Ok(ZoneTable::new(name, rules)?)
}

fn new_york() -> anyhow::Result<ZoneTable> {
    alternating(
        "America/New_York",
        &[1710054000, 1730613600, 1741503600, 1762063200],
        (-5, "EST"),
        (-4, "EDT"),
    )
}

fn berlin() -> anyhow::Result<ZoneTable> {
    alternating(
        "Europe/Berlin",
        &[1711846800, 1729990800, 1743296400, 1761440400],
        (1, "CET"),
        (2, "CEST"),
    )
}

#[test]
fn offsets_follow_the_rules() -> Result {
    let _ = crate::Logger::init();

    let tz = TimeZone::new(new_york()?);
    let info = tz.to_offset_info(at(1710054000 - 1));
    assert_eq!(
        (info.offset(), info.dst(), info.abbreviation()),
        (Offset::constant(-5), Dst::No, "EST"),
    );
    let info = tz.to_offset_info(at(1710054000));
    assert_eq!(
        (info.offset(), info.dst(), info.abbreviation()),
        (Offset::constant(-4), Dst::Yes, "EDT"),
    );
    // Before the first rule and after the last, the edge rules apply.
    assert_eq!(tz.to_offset(Instant::<Second>::MIN), Offset::constant(-5));
    assert_eq!(tz.to_offset(Instant::<Second>::MAX), Offset::constant(-5));

    let utc = at(1720000000);
    assert_eq!(tz.to_local(utc).to_string(), "2024-07-03 05:46:40");
    assert_eq!(TimeZone::UTC.to_local(utc).to_string(), "2024-07-03 09:46:40");

    Ok(())
}

#[test]
fn dst_gap() -> Result {
    let _ = crate::Logger::init();

    let tz = TimeZone::new(new_york()?);
    let t = local(2024, 3, 10, 2, 30);
    assert_eq!(
        tz.to_ambiguous_offset(t),
        AmbiguousOffset::Gap {
            before: Offset::constant(-5),
            after: Offset::constant(-4),
        },
    );

    let err = tz.to_instant(t).unwrap_err();
    assert!(err.is_nonexistent_local_time());
    assert_eq!(err.gap_boundary::<Second>(), Some(at(1710054000)));
    insta::assert_snapshot!(
        err,
        @"failed to convert local time 2024-03-10 02:30:00 to an instant in time zone America/New_York: local time does not exist since it falls into a gap between offsets -05 and -04",
    );

    for disambiguation in [Disambiguation::Earliest, Disambiguation::Latest] {
        let instant = tz.to_instant_with(t, disambiguation);
        assert_eq!(instant, at(1710054000));
        assert_eq!(tz.to_local(instant), local(2024, 3, 10, 3, 0));
    }

    // The edges of the gap.
    assert!(tz.to_instant(local(2024, 3, 10, 1, 59)).is_ok());
    assert!(tz.to_instant(local(2024, 3, 10, 2, 0)).is_err());
    assert_eq!(tz.to_instant(local(2024, 3, 10, 3, 0))?, at(1710054000));

    Ok(())
}

#[test]
fn dst_overlap() -> Result {
    let _ = crate::Logger::init();

    let tz = TimeZone::new(new_york()?);
    let t = local(2024, 11, 3, 1, 30);
    let LocalResolution::Overlap { earlier, later, before, after } =
        tz.resolve(t)
    else {
        anyhow::bail!("expected {t} to fall in a fold");
    };
    assert_eq!((earlier, later), (at(1730611800), at(1730615400)));
    assert_eq!((before, after), (Offset::constant(-4), Offset::constant(-5)));

    let err = tz.to_instant(t).unwrap_err();
    assert!(err.is_ambiguous_local_time());
    assert_eq!(err.ambiguous_candidates::<Second>(), Some((earlier, later)));
    insta::assert_snapshot!(
        err,
        @"failed to convert local time 2024-11-03 01:30:00 to an instant in time zone America/New_York: local time is ambiguous since it falls into a fold between offsets -04 and -05",
    );

    let earliest = tz.to_instant_with(t, Disambiguation::Earliest);
    let latest = tz.to_instant_with(t, Disambiguation::Latest);
    assert_eq!((earliest, latest), (earlier, later));
    assert_eq!(tz.to_offset_info(earliest).abbreviation(), "EDT");
    assert_eq!(tz.to_offset_info(latest).abbreviation(), "EST");
    assert_eq!(tz.to_local(earliest), t);
    assert_eq!(tz.to_local(latest), t);

    Ok(())
}

#[test]
fn berlin_fall_back() -> Result {
    let tz = TimeZone::new(berlin()?);
    let t = local(2024, 10, 27, 2, 30);
    assert!(tz.resolve(t).is_ambiguous());
    assert_eq!(
        tz.to_instant_with(t, Disambiguation::Earliest),
        at(1729989000),
    );
    assert_eq!(tz.to_instant_with(t, Disambiguation::Latest), at(1729992600));
    Ok(())
}

#[test]
fn transitions() -> Result {
    let tz = TimeZone::new(new_york()?);

    let next = tz.next_transition(Instant::<Second>::EPOCH).unwrap();
    assert_eq!((next.instant(), next.abbreviation()), (at(1710054000), "EDT"));
    let next = tz.next_transition(next.instant()).unwrap();
    assert_eq!((next.instant(), next.dst()), (at(1730613600), Dst::No));

    let prev = tz.previous_transition(at(1730613600)).unwrap();
    assert_eq!(prev.instant(), at(1710054000));
    assert_eq!(prev.offset(), Offset::constant(-4));

    assert!(tz.previous_transition(at(1710054000)).is_none());
    assert!(tz.next_transition(at(1762063200)).is_none());

    Ok(())
}

#[test]
fn invalid_tables() {
    let err = ZoneTable::new("Nowhere/Empty", vec![]).unwrap_err();
    assert!(err.is_invalid_zone_table());
    insta::assert_snapshot!(
        err,
        @"zone table for `Nowhere/Empty` must contain at least one rule",
    );

    let rules = vec![
        ZoneRule::new(Instant::MIN, at(0), Offset::UTC, Dst::No, "A"),
        ZoneRule::new(at(1), Instant::MAX, Offset::UTC, Dst::No, "B"),
    ];
    let err = ZoneTable::new("Nowhere/Hole", rules).unwrap_err();
    insta::assert_snapshot!(
        err,
        @"rule 1 in zone table for `Nowhere/Hole` does not begin where the previous rule ends",
    );

    let rules = vec![ZoneRule::new(at(5), at(5), Offset::UTC, Dst::No, "A")];
    let err = ZoneTable::new("Nowhere/Instant", rules).unwrap_err();
    assert!(err.is_invalid_zone_table());
}

#[test]
fn coarse_instants_convert_through_seconds() -> Result {
    let tz = TimeZone::new(new_york()?);

    let t = Instant::<Minute>::from_since_epoch(Minutes::new(1710054000 / 60));
    let local = tz.to_local(t.cast::<Second>());
    assert_eq!(local.to_string(), "2024-03-10 03:00:00");
    assert_eq!(tz.to_instant(local)?.cast::<Minute>(), t);

    let day = Date::new(2024, 7, 1).to_sys_days();
    let local = tz.to_local(day.cast::<Second>());
    assert_eq!(local.to_string(), "2024-06-30 20:00:00");
    assert_eq!(local.date(), Date::new(2024, 6, 30));
    assert_eq!(tz.to_instant(local)?.floor::<Day>(), day);

    Ok(())
}

#[test]
fn fixed_offsets() {
    let tz = TimeZone::fixed(Offset::constant_seconds(19_800));
    assert_eq!(tz.name(), "+05:30");
    assert_eq!(tz.to_offset_info(at(0)).abbreviation(), "+05:30");
    assert_eq!(tz.to_local(at(0)).to_string(), "1970-01-01 05:30:00");
    assert_eq!(TimeZone::fixed(Offset::UTC), TimeZone::UTC);
    assert!(tz.next_transition(at(0)).is_none());
}

#[test]
fn database_lookups() -> Result {
    let _ = crate::Logger::init();

    let db = TimeZoneDatabase::builder()
        .zones([new_york()?, berlin()?])
        .current_zone("Europe/Berlin")
        .build();
    assert_eq!(
        db.names().collect::<Vec<_>>(),
        vec!["America/New_York", "Europe/Berlin", "UTC"],
    );
    assert_eq!(db.len(), 3);

    assert_eq!(db.get("AMERICA/NEW_YORK")?.name(), "America/New_York");
    assert_eq!(db.current()?.name(), "Europe/Berlin");
    assert_eq!(db.get("utc")?, TimeZone::UTC);

    let err = db.get("Europe/Atlantis").unwrap_err();
    assert!(err.is_unknown_time_zone());
    insta::assert_snapshot!(
        err,
        @"failed to find time zone `Europe/Atlantis` in time zone database",
    );

    Ok(())
}

#[test]
fn database_snapshots_are_replaced_not_mutated() -> Result {
    let old = TimeZoneDatabase::builder().zone(new_york()?).build();
    let tz = old.get("America/New_York")?;

    // Rebuilding with a table that abolishes daylight saving time.
    let permanent = ZoneTable::fixed(
        "America/New_York",
        Offset::constant(-5),
        "EST",
    );
    let new = TimeZoneDatabase::builder()
        .zone(new_york()?)
        .zone(permanent)
        .build();

    let summer = at(1720000000);
    assert_eq!(tz.to_offset(summer), Offset::constant(-4));
    assert_eq!(old.get("America/New_York")?.to_offset(summer), Offset::constant(-4));
    assert_eq!(new.get("America/New_York")?.to_offset(summer), Offset::constant(-5));

    Ok(())
}

#[test]
fn zoned_recomputes_local_time() -> Result {
    let db = TimeZoneDatabase::builder()
        .zones([new_york()?, berlin()?])
        .build();

    let zdt = Zoned::new(at(1710054000), db.get("America/New_York")?);
    assert_eq!(zdt.to_string(), "2024-03-10 03:00:00 EDT");
    assert_eq!(zdt.date(), Date::new(2024, 3, 10));
    assert_eq!(zdt.offset(), Offset::constant(-4));
    assert_eq!(zdt.time_of_day().hours().count(), 3);

    let berlin = zdt.with_time_zone(db.get("Europe/Berlin")?);
    assert_eq!(berlin.to_instant(), zdt.to_instant());
    assert_eq!(berlin.to_string(), "2024-03-10 08:00:00 CET");
    assert_eq!(berlin.offset_info().dst(), Dst::No);

    Ok(())
}

#[test]
fn zoned_from_local_time() -> Result {
    let tz = TimeZone::new(berlin()?);

    let gap = local(2024, 3, 31, 2, 30);
    let err = Zoned::try_from_local(gap, tz.clone()).unwrap_err();
    assert!(err.is_nonexistent_local_time());
    let zdt = Zoned::from_local(gap, tz.clone(), Disambiguation::Latest);
    assert_eq!(zdt.to_string(), "2024-03-31 03:00:00 CEST");

    let fold = local(2024, 10, 27, 2, 30);
    let zdt = Zoned::from_local(fold, tz.clone(), Disambiguation::Latest);
    assert_eq!(zdt.to_string(), "2024-10-27 02:30:00 CET");
    let zdt = Zoned::from_local(fold, tz.clone(), Disambiguation::Earliest);
    assert_eq!(zdt.to_string(), "2024-10-27 02:30:00 CEST");

    let zdt = Zoned::try_from_local(local(2024, 7, 1, 12, 0), tz)?;
    assert_eq!(zdt.to_instant(), at(1719828000));

    Ok(())
}
