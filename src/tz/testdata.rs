use crate::tz::{table::alternating, Dst, Offset, TimeZone, ZoneTable};

/// `America/New_York` for 2023 through 2025.
pub(crate) fn america_new_york() -> TimeZone {
    let transitions = [
        1_678_604_400,
        1_699_164_000,
        1_710_054_000,
        1_730_613_600,
        1_741_503_600,
        1_762_063_200,
    ];
    let rules = alternating(
        &transitions,
        (Offset::constant(-5), Dst::No, "EST"),
        (Offset::constant(-4), Dst::Yes, "EDT"),
    );
    TimeZone::new(ZoneTable::new("America/New_York", rules).unwrap())
}

/// `Europe/Berlin` for 2023 through 2025.
pub(crate) fn europe_berlin() -> TimeZone {
    let transitions = [
        1_679_792_400,
        1_698_541_200,
        1_711_846_800,
        1_729_990_800,
        1_743_296_400,
        1_761_440_400,
    ];
    let rules = alternating(
        &transitions,
        (Offset::constant(1), Dst::No, "CET"),
        (Offset::constant(2), Dst::Yes, "CEST"),
    );
    TimeZone::new(ZoneTable::new("Europe/Berlin", rules).unwrap())
}

/// `Australia/Hobart` for 2023 through 2025.
pub(crate) fn australia_hobart() -> TimeZone {
    let transitions = [
        1_680_364_800,
        1_696_089_600,
        1_712_419_200,
        1_728_144_000,
        1_743_868_800,
        1_759_593_600,
    ];
    let rules = alternating(
        &transitions,
        (Offset::constant(11), Dst::Yes, "AEDT"),
        (Offset::constant(10), Dst::No, "AEST"),
    );
    TimeZone::new(ZoneTable::new("Australia/Hobart", rules).unwrap())
}
