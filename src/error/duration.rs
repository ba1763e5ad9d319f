use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    ConvertOverflow { from: (i64, i64), to: (i64, i64) },
    ArithmeticOverflow { op: &'static str },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Duration(err).into()
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
            ConvertOverflow { from: (fnum, fden), to: (tnum, tden) } => {
                write!(
                    f,
                    "converting duration with tick period {fnum}/{fden}s \
                     to tick period {tnum}/{tden}s overflowed",
                )
            }
            ArithmeticOverflow { op } => {
                write!(f, "duration {op} overflowed 64-bit tick count")
            }
        }
    }
}
