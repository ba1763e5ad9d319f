use alloc::boxed::Box;

use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    Empty { name: Box<str> },
    EmptyInterval { name: Box<str>, index: usize },
    NotContiguous { name: Box<str>, index: usize },
    TooShort { name: Box<str>, index: usize },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TzTable(err).into()
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
            Empty { ref name } => write!(
                f,
                "zone table for `{name}` must contain at least one rule",
            ),
            EmptyInterval { ref name, index } => write!(
                f,
                "rule {index} in zone table for `{name}` has an \
                 empty validity interval (its begin is not before its end)",
            ),
            NotContiguous { ref name, index } => write!(
                f,
                "rule {index} in zone table for `{name}` does not begin \
                 where the previous rule ends",
            ),
            TooShort { ref name, index } => write!(
                f,
                "rule {index} in zone table for `{name}` is shorter than \
                 the offset changes at its edges",
            ),
        }
    }
}
