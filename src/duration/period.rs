/*!
Tick periods: compile-time rational fractions of one second.

A [`Period`] says how long one tick of a [`Duration`](super::Duration) is.
The standard periods are provided here as type aliases of [`Ratio`], and
callers can name their own, such as a quarter second:

```
use calends::duration::{period::Ratio, Duration, Milliseconds};

type Quarters = Duration<Ratio<1, 4>>;

let d = Quarters::new(3);
assert_eq!(d.cast::<calends::duration::period::Milli>(), Milliseconds::new(750));
```
*/

/// A tick period, expressed as `NUM / DEN` seconds.
///
/// Both `NUM` and `DEN` must be positive. Implementations need not be
/// reduced: `Ratio<2, 4>` and `Ratio<1, 2>` describe the same period,
/// although they are distinct types and their durations don't mix without
/// an explicit conversion.
pub trait Period:
    Copy
    + Clone
    + core::fmt::Debug
    + Default
    + Eq
    + core::hash::Hash
    + Ord
    + Send
    + Sync
    + 'static
{
    /// The numerator of the tick period in seconds.
    const NUM: i64;
    /// The denominator of the tick period in seconds.
    const DEN: i64;
}

/// A period whose ticks evenly divide one second.
///
/// Whole seconds (and therefore UTC offsets) convert exactly into any such
/// period. This trait is sealed and implemented for every `Ratio<1, D>`.
pub trait DividesSecond: Period + private::Sealed {}

/// A zero sized marker type implementing [`Period`] for `N / D` seconds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ratio<const N: i64, const D: i64>;

impl<const N: i64, const D: i64> Period for Ratio<N, D> {
    const NUM: i64 = {
        assert!(N > 0 && D > 0, "tick period must be positive");
        N
    };
    const DEN: i64 = {
        assert!(N > 0 && D > 0, "tick period must be positive");
        D
    };
}

impl<const D: i64> DividesSecond for Ratio<1, D> {}
impl<const D: i64> private::Sealed for Ratio<1, D> {}

/// One billionth of a second.
pub type Nano = Ratio<1, 1_000_000_000>;
/// One millionth of a second.
pub type Micro = Ratio<1, 1_000_000>;
/// One thousandth of a second.
pub type Milli = Ratio<1, 1_000>;
/// One hundredth of a second.
pub type Centi = Ratio<1, 100>;
/// One tenth of a second.
pub type Deci = Ratio<1, 10>;
/// One second.
pub type Second = Ratio<1, 1>;
/// One minute.
pub type Minute = Ratio<60, 1>;
/// One hour.
pub type Hour = Ratio<3_600, 1>;
/// One civil day of 24 hours.
pub type Day = Ratio<86_400, 1>;
/// Seven civil days.
pub type Week = Ratio<604_800, 1>;
/// The average length of a Gregorian year: 365.2425 days.
pub type Year = Ratio<31_556_952, 1>;
/// One twelfth of an average Gregorian year.
pub type Month = Ratio<2_629_746, 1>;

/// Returns the tick period of `P` as a reduced fraction.
pub(crate) fn reduced<P: Period>() -> (i128, i128) {
    let (num, den) = (i128::from(P::NUM), i128::from(P::DEN));
    let g = gcd(num, den);
    (num / g, den / g)
}

/// Returns the exact factor converting ticks of `P` into ticks of `Q`, as a
/// reduced fraction `(numerator, denominator)` with a positive denominator.
pub(crate) fn conversion<P: Period, Q: Period>() -> (i128, i128) {
    let (pnum, pden) = reduced::<P>();
    let (qnum, qden) = reduced::<Q>();
    // ticks_q = ticks_p * (pnum / pden) / (qnum / qden)
    let g1 = gcd(pnum, qnum);
    let g2 = gcd(pden, qden);
    let num = (pnum / g1) * (qden / g2);
    let den = (pden / g2) * (qnum / g1);
    let g = gcd(num, den);
    (num / g, den / g)
}

/// Returns the unit suffix used when displaying a duration of `P` ticks,
/// or `None` when the period has no conventional name.
pub(crate) fn suffix<P: Period>() -> Option<&'static str> {
    let suffix = match reduced::<P>() {
        (1, 1_000_000_000) => "ns",
        (1, 1_000_000) => "µs",
        (1, 1_000) => "ms",
        (1, 100) => "cs",
        (1, 10) => "ds",
        (1, 1) => "s",
        (60, 1) => "min",
        (3_600, 1) => "h",
        (86_400, 1) => "d",
        _ => return None,
    };
    Some(suffix)
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

mod private {
    pub trait Sealed {}
}
