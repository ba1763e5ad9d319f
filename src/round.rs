/*!
Rounding modes for converting between tick periods.

Every conversion between two [`Duration`](crate::Duration) (or time point)
tick periods is an exact rational division followed by a rounding step. The
rounding step is described by a [`RoundMode`]. The common modes have
dedicated shortcuts: [`Duration::floor`](crate::Duration::floor),
[`Duration::ceil`](crate::Duration::ceil),
[`Duration::round`](crate::Duration::round) and
[`Duration::cast`](crate::Duration::cast).
*/

/// The mode for dealing with the remainder when converting a duration or
/// time point to a coarser tick period.
///
/// # Example
///
/// ```
/// use calends::{duration::{Milliseconds, period::Second}, RoundMode};
///
/// let d = Milliseconds::new(-1_500);
/// assert_eq!(d.convert::<Second>(RoundMode::HalfExpand).count(), -2);
/// assert_eq!(d.convert::<Second>(RoundMode::HalfTrunc).count(), -1);
/// assert_eq!(d.convert::<Second>(RoundMode::HalfEven).count(), -2);
/// ```
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RoundMode {
    /// Rounds toward positive infinity.
    ///
    /// For negative values, this option will make the value smaller in
    /// magnitude, which could be unexpected. To round away from zero, use
    /// `Expand`.
    Ceil,
    /// Rounds toward negative infinity.
    ///
    /// This mode acts like `Trunc` for positive values, but for negative
    /// values it will make the value larger in magnitude. To round towards
    /// zero, use `Trunc`.
    Floor,
    /// Rounds away from zero like `Ceil` for positive values and like
    /// `Floor` for negative values.
    Expand,
    /// Rounds toward zero, chopping off any fractional part of a tick.
    ///
    /// This is the mode used by [`Duration::cast`](crate::Duration::cast).
    Trunc,
    /// Rounds to the nearest tick like `HalfExpand`, but when there is a
    /// tie, round towards positive infinity like `Ceil`.
    HalfCeil,
    /// Rounds to the nearest tick like `HalfExpand`, but when there is a
    /// tie, round towards negative infinity like `Floor`.
    HalfFloor,
    /// Rounds to the nearest tick. When there is a tie, round away from
    /// zero.
    ///
    /// This corresponds to how rounding is often taught in school.
    HalfExpand,
    /// Rounds to the nearest tick like `HalfExpand`, but when there is a
    /// tie, round towards zero like `Trunc`.
    HalfTrunc,
    /// Rounds to the nearest tick like `HalfExpand`, but when there is a
    /// tie, round towards the even tick count. For example, `1.5s` rounds
    /// to `2s` and `2.5s` also rounds to `2s`.
    ///
    /// This is the mode used by [`Duration::round`](crate::Duration::round).
    HalfEven,
}

impl RoundMode {
    /// Divides `numerator` by `denominator` and rounds the exact quotient to
    /// an integer according to this mode.
    ///
    /// `denominator` must be positive.
    pub(crate) fn divide(self, numerator: i128, denominator: i128) -> i128 {
        // ref: https://tc39.es/proposal-temporal/#sec-temporal-roundnumbertoincrement
        debug_assert!(denominator > 0, "denominator must be positive");
        let mut quotient = numerator / denominator;
        let remainder = numerator % denominator;
        if remainder == 0 {
            return quotient;
        }
        let sign = if remainder < 0 { -1 } else { 1 };
        let tiebreaker = (remainder * 2).abs();
        let tie = tiebreaker == denominator;
        let expand_is_nearer = tiebreaker > denominator;
        match self {
            RoundMode::Ceil => {
                if sign > 0 {
                    quotient += sign;
                }
            }
            RoundMode::Floor => {
                if sign < 0 {
                    quotient += sign;
                }
            }
            RoundMode::Expand => {
                quotient += sign;
            }
            RoundMode::Trunc => {}
            RoundMode::HalfCeil => {
                if expand_is_nearer || (tie && sign > 0) {
                    quotient += sign;
                }
            }
            RoundMode::HalfFloor => {
                if expand_is_nearer || (tie && sign < 0) {
                    quotient += sign;
                }
            }
            RoundMode::HalfExpand => {
                if expand_is_nearer || tie {
                    quotient += sign;
                }
            }
            RoundMode::HalfTrunc => {
                if expand_is_nearer {
                    quotient += sign;
                }
            }
            RoundMode::HalfEven => {
                if expand_is_nearer || (tie && quotient.rem_euclid(2) == 1) {
                    quotient += sign;
                }
            }
        }
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The tables are inspired by the one in the Temporal proposal, but
    // expressed as quotients: `divide(-15, 10)` is rounding -1.5.
    //
    // ref: https://tc39.es/proposal-temporal/#sec-temporal-roundnumbertoincrement

    #[test]
    fn divide_table_ceil() {
        let div = |n, d| RoundMode::Ceil.divide(n, d);
        assert_eq!(-1, div(-15, 10));
        assert_eq!(0, div(-5, 10));
        assert_eq!(1, div(4, 10));
        assert_eq!(1, div(5, 10));
        assert_eq!(1, div(6, 10));
        assert_eq!(2, div(15, 10));
    }

    #[test]
    fn divide_table_floor() {
        let div = |n, d| RoundMode::Floor.divide(n, d);
        assert_eq!(-2, div(-15, 10));
        assert_eq!(-1, div(-5, 10));
        assert_eq!(0, div(4, 10));
        assert_eq!(0, div(5, 10));
        assert_eq!(0, div(6, 10));
        assert_eq!(1, div(15, 10));
    }

    #[test]
    fn divide_table_expand() {
        let div = |n, d| RoundMode::Expand.divide(n, d);
        assert_eq!(-2, div(-15, 10));
        assert_eq!(-1, div(-5, 10));
        assert_eq!(1, div(4, 10));
        assert_eq!(1, div(5, 10));
        assert_eq!(1, div(6, 10));
        assert_eq!(2, div(15, 10));
    }

    #[test]
    fn divide_table_trunc() {
        let div = |n, d| RoundMode::Trunc.divide(n, d);
        assert_eq!(-1, div(-15, 10));
        assert_eq!(0, div(-5, 10));
        assert_eq!(0, div(4, 10));
        assert_eq!(0, div(5, 10));
        assert_eq!(0, div(6, 10));
        assert_eq!(1, div(15, 10));
    }

    #[test]
    fn divide_table_half_ceil() {
        let div = |n, d| RoundMode::HalfCeil.divide(n, d);
        assert_eq!(-1, div(-15, 10));
        assert_eq!(0, div(-5, 10));
        assert_eq!(0, div(4, 10));
        assert_eq!(1, div(5, 10));
        assert_eq!(1, div(6, 10));
        assert_eq!(2, div(15, 10));
    }

    #[test]
    fn divide_table_half_floor() {
        let div = |n, d| RoundMode::HalfFloor.divide(n, d);
        assert_eq!(-2, div(-15, 10));
        assert_eq!(-1, div(-5, 10));
        assert_eq!(0, div(4, 10));
        assert_eq!(0, div(5, 10));
        assert_eq!(1, div(6, 10));
        assert_eq!(1, div(15, 10));
    }

    #[test]
    fn divide_table_half_expand() {
        let div = |n, d| RoundMode::HalfExpand.divide(n, d);
        assert_eq!(-2, div(-15, 10));
        assert_eq!(-1, div(-5, 10));
        assert_eq!(0, div(4, 10));
        assert_eq!(1, div(5, 10));
        assert_eq!(1, div(6, 10));
        assert_eq!(2, div(15, 10));
    }

    #[test]
    fn divide_table_half_trunc() {
        let div = |n, d| RoundMode::HalfTrunc.divide(n, d);
        assert_eq!(-1, div(-15, 10));
        assert_eq!(0, div(-5, 10));
        assert_eq!(0, div(4, 10));
        assert_eq!(0, div(5, 10));
        assert_eq!(1, div(6, 10));
        assert_eq!(1, div(15, 10));
    }

    #[test]
    fn divide_table_half_even() {
        let div = |n, d| RoundMode::HalfEven.divide(n, d);
        assert_eq!(-2, div(-15, 10));
        assert_eq!(0, div(-5, 10));
        assert_eq!(0, div(4, 10));
        assert_eq!(0, div(5, 10));
        assert_eq!(1, div(6, 10));
        assert_eq!(2, div(15, 10));
        assert_eq!(2, div(25, 10));
        assert_eq!(-2, div(-25, 10));
    }

    // Denominators that aren't powers of ten, like a third of a tick.
    #[test]
    fn divide_odd_denominators() {
        assert_eq!(3, RoundMode::HalfEven.divide(10, 3));
        assert_eq!(4, RoundMode::Ceil.divide(10, 3));
        assert_eq!(-4, RoundMode::Floor.divide(-10, 3));
        assert_eq!(-3, RoundMode::Trunc.divide(-10, 3));
        assert_eq!(7, RoundMode::HalfExpand.divide(20, 3));
    }
}
