use alloc::boxed::Box;

use crate::{
    duration::{Duration, Period},
    error,
    instant::Instant,
    tz::Offset,
};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    Fold {
        before: Offset,
        after: Offset,
        earlier: ErasedInstant,
        later: ErasedInstant,
    },
    Gap {
        before: Offset,
        after: Offset,
        boundary: ErasedInstant,
    },
    InTimeZone {
        name: Box<str>,
        local: Box<str>,
    },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TzAmbiguous(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            Fold { before, after, .. } => write!(
                f,
                "local time is ambiguous since it falls into a \
                 fold between offsets {before} and {after}",
            ),
            Gap { before, after, .. } => write!(
                f,
                "local time does not exist since it falls into a \
                 gap between offsets {before} and {after}",
            ),
            InTimeZone { ref name, ref local } => write!(
                f,
                "failed to convert local time {local} to an instant \
                 in time zone {name}",
            ),
        }
    }
}

/// An instant with its tick period erased.
///
/// Errors aren't generic, so candidate instants are stored alongside the
/// period they were computed in. They can only be recovered at that same
/// period (compared as reduced ratios).
#[derive(Clone, Copy, Debug)]
pub(crate) struct ErasedInstant {
    ticks: i64,
    num: i64,
    den: i64,
}

impl ErasedInstant {
    pub(crate) fn new<P: Period>(instant: Instant<P>) -> ErasedInstant {
        ErasedInstant {
            ticks: instant.since_epoch().count(),
            num: P::NUM,
            den: P::DEN,
        }
    }

    pub(crate) fn get<P: Period>(self) -> Option<Instant<P>> {
        let same = i128::from(P::NUM) * i128::from(self.den)
            == i128::from(self.num) * i128::from(P::DEN);
        if !same {
            return None;
        }
        Some(Instant::from_since_epoch(Duration::new(self.ticks)))
    }
}
