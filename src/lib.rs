/*!
Calends is a calendar and clock library for Rust. It provides durations whose
tick period is part of their type, time points on two distinct time lines
(the system time line and the local time line), a proleptic Gregorian
calendar whose dates may be invalid without being an error, and a time zone
engine that is explicit about local times that happen twice or never.

# Overview

The primary types in this crate are:

* [`Duration`] is a signed 64-bit count of ticks, where the length of a tick
is a compile time ratio of seconds described by a [`Period`]. Conversions
between periods are exact rational computations followed by an explicit
[`RoundMode`].
* [`Instant`] is a point on the system time line (Unix time, no leap
seconds), measured as a duration since `1970-01-01T00:00:00Z`.
* [`LocalTime`] is a point on the local time line of some unspecified time
zone. It is a distinct type from `Instant`. The only way between the two is
through a [`TimeZone`].
* [`civil::Date`] is a year, month and day. Arithmetic in months or years
may produce an invalid date (like `2001-02-29`), which the caller repairs
with an explicit [`civil::Overflow`] policy.
* [`TimeZone`] is a cheaply cloneable handle to an immutable table of zone
rules. Local times that fall into a gap or a fold are reported as such.
* [`Zoned`] pairs an instant with a time zone.

Time zone data and the current time are never read from global state. They
come from a [`tz::ZoneSource`] and a [`clock::Clock`] supplied by the caller.

# Example: durations and rounding

```
use calends::duration::{Milliseconds, Seconds, period::Second};

let d = Milliseconds::new(3_200);
assert_eq!(d.floor::<Second>(), Seconds::new(3));
assert_eq!(d.ceil::<Second>(), Seconds::new(4));
assert_eq!(Milliseconds::new(-3_200).cast::<Second>(), Seconds::new(-3));
assert_eq!(d.to_string(), "3200ms");
```

# Example: calendar arithmetic

```
use calends::{civil::{Date, Overflow}, duration::Months};

let d = Date::new(2000, 1, 31) + Months::new(1);
assert!(!d.ok());
assert_eq!(d.repair(Overflow::Clamp), Date::new(2000, 2, 29));
assert_eq!(d.repair(Overflow::CarryOver), Date::new(2000, 3, 2));
```

# Example: time zones

```
use calends::{
    civil::Date,
    duration::{Hours, Minutes, period::Second},
    tz::{Disambiguation, Dst, Offset, TimeZone, ZoneRule, ZoneTable},
    Instant,
};

// Clocks go back from 03:00 to 02:00 at 2024-10-27T01:00Z.
let switch = Date::new(2024, 10, 27).to_sys_days().cast::<Second>()
    + Hours::new(1).cast::<Second>();
let tz = TimeZone::new(ZoneTable::new("Europe/Berlin", vec![
    ZoneRule::new(Instant::MIN, switch, Offset::constant(2), Dst::Yes, "CEST"),
    ZoneRule::new(switch, Instant::MAX, Offset::constant(1), Dst::No, "CET"),
])?);

let local = Date::new(2024, 10, 27).to_local_days().cast::<Second>()
    + Hours::new(2).cast::<Second>()
    + Minutes::new(30).cast::<Second>();
let err = tz.to_instant(local).unwrap_err();
assert!(err.is_ambiguous_local_time());

let earliest = tz.to_instant_with(local, Disambiguation::Earliest);
let latest = tz.to_instant_with(local, Disambiguation::Latest);
assert_eq!(latest - earliest, Hours::new(1).cast::<Second>());
assert_eq!(tz.to_offset(earliest), Offset::constant(2));
assert_eq!(tz.to_offset(latest), Offset::constant(1));

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **std** (enabled by default) - When enabled, [`Error`] implements
`std::error::Error` and [`clock::SystemClock`] is available. When disabled,
this crate is `no_std` but still requires `alloc`.
* **logging** - When enabled, the `log` crate is used to emit messages about
building zone tables and databases, time zone lookups and the resolution of
gaps and folds.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]
// This adds Cargo feature annotations to items in the rustdoc output.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Errors and time zone tables are heap allocated.
extern crate alloc;

pub use crate::{
    duration::{Duration, Period},
    error::Error,
    instant::{Instant, Local, LocalTime, Scale, Sys, TimePoint},
    round::RoundMode,
    tz::TimeZone,
    zoned::Zoned,
};

#[macro_use]
mod logging;

pub mod civil;
pub mod clock;
pub mod duration;
mod error;
mod instant;
pub mod round;
pub mod tz;
mod zoned;
