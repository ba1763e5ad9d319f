use alloc::boxed::Box;

use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    UnknownTimeZone { name: Box<str> },
}

impl Error {
    pub(crate) fn unknown_time_zone(name: &str) -> Error {
        Error::UnknownTimeZone { name: name.into() }
    }
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TzDb(err).into()
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
            UnknownTimeZone { ref name } => write!(
                f,
                "failed to find time zone `{name}` in time zone database",
            ),
        }
    }
}
