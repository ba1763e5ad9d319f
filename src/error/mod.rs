use alloc::{boxed::Box, sync::Arc, vec::Vec};

use crate::{duration::Period, instant::Instant};

pub(crate) mod duration;
pub(crate) mod tz;

/// An error that can occur in this crate.
///
/// The most common type of error is a result of overflow. But other errors
/// exist as well:
///
/// * Time zone database lookup failure.
/// * Converting a local time to an instant when the local time falls in a
/// gap (it doesn't exist) or a fold (it exists twice).
/// * Building a zone table from rules that don't form a contiguous sequence.
///
/// Notice that an invalid calendar date (like `2001-02-29`) is _not_ an
/// error. Such dates are representable and are queried with
/// [`Date::ok`](crate::civil::Date::ok).
///
/// # Introspection is limited
///
/// Other than implementing the [`std::error::Error`] trait when the
/// `std` feature is enabled, the [`core::fmt::Debug`] trait and the
/// [`core::fmt::Display`] trait, this error type provides a small set of
/// predicates like [`Error::is_range`] and
/// [`Error::is_ambiguous_local_time`]. The predicates are not exhaustive.
///
/// # Design
///
/// This crate uses a single error type for every fallible operation. Each
/// error may carry a cause, which makes it possible to attach context (for
/// example, the name of the time zone in which a conversion failed) without
/// losing the original failure. The predicates always inspect the root
/// cause.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cheap to clone and the size of
    /// one word.
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates a new error value from `core::fmt::Arguments`.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated as a result of a value being
    /// out of this crate's supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::duration::{Days, period::Nano};
    ///
    /// let err = Days::MAX.try_convert::<Nano>(calends::RoundMode::Trunc);
    /// assert!(err.unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Range(_) | ErrorKind::Duration(_)
        )
    }

    /// Returns true when this error originated from looking up a time zone
    /// name that the time zone database doesn't know about.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::tz::{TimeZoneDatabase, ZoneSource};
    ///
    /// let db = TimeZoneDatabase::builder().build();
    /// assert!(db.get("Mars/Olympus_Mons").unwrap_err().is_unknown_time_zone());
    /// ```
    pub fn is_unknown_time_zone(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::TzDb(self::tz::db::Error::UnknownTimeZone { .. })
        )
    }

    /// Returns true when this error originated from converting a local time
    /// that falls in a gap to an instant without a disambiguation policy.
    pub fn is_nonexistent_local_time(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::TzAmbiguous(self::tz::ambiguous::Error::Gap { .. })
        )
    }

    /// Returns true when this error originated from converting a local time
    /// that falls in a fold to an instant without a disambiguation policy.
    pub fn is_ambiguous_local_time(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::TzAmbiguous(self::tz::ambiguous::Error::Fold { .. })
        )
    }

    /// Returns true when this error originated from building a zone table
    /// out of rules that don't describe a contiguous timeline.
    pub fn is_invalid_zone_table(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::TzTable(_))
    }

    /// Returns the two candidate instants of an ambiguous local time.
    ///
    /// The first instant is the earlier one (computed with the offset in
    /// force before the transition) and the second is the later one.
    ///
    /// This returns `None` when this error is not an ambiguous local time
    /// error, or when the candidates were computed with a tick period that
    /// differs from `P`.
    ///
    /// # Example
    ///
    /// ```
    /// use calends::{
    ///     civil::Date,
    ///     duration::{Hours, period::{Milli, Second}},
    ///     tz::{Dst, Offset, TimeZone, ZoneRule, ZoneTable},
    ///     Instant,
    /// };
    ///
    /// let switch = Date::new(2024, 10, 27).to_sys_days().cast::<Second>()
    ///     + Hours::new(1).cast::<Second>();
    /// let berlin = TimeZone::new(ZoneTable::new("Europe/Berlin", vec![
    ///     ZoneRule::new(Instant::MIN, switch, Offset::constant(2), Dst::Yes, "CEST"),
    ///     ZoneRule::new(switch, Instant::MAX, Offset::constant(1), Dst::No, "CET"),
    /// ])?);
    ///
    /// let local = Date::new(2024, 10, 27).to_local_days().cast::<Second>()
    ///     + Hours::new(2).cast::<Second>();
    /// let err = berlin.to_instant(local).unwrap_err();
    /// let (earlier, later) = err.ambiguous_candidates::<Second>().unwrap();
    /// assert_eq!(later - earlier, Hours::new(1).cast::<Second>());
    /// // The candidates can only be recovered at the tick period they
    /// // were computed with.
    /// assert!(err.ambiguous_candidates::<Milli>().is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn ambiguous_candidates<P: Period>(
        &self,
    ) -> Option<(Instant<P>, Instant<P>)> {
        match *self.root().kind() {
            ErrorKind::TzAmbiguous(self::tz::ambiguous::Error::Fold {
                earlier,
                later,
                ..
            }) => Some((earlier.get::<P>()?, later.get::<P>()?)),
            _ => None,
        }
    }

    /// Returns the transition instant at which a nonexistent local time's
    /// gap ends.
    ///
    /// This returns `None` when this error is not a nonexistent local time
    /// error, or when the boundary was computed with a tick period that
    /// differs from `P`.
    pub fn gap_boundary<P: Period>(&self) -> Option<Instant<P>> {
        match *self.root().kind() {
            ErrorKind::TzAmbiguous(self::tz::ambiguous::Error::Gap {
                boundary,
                ..
            }) => boundary.get::<P>(),
            _ => None,
        }
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "year")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError::new(what, given, min, max)))
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        match Arc::get_mut(&mut err.inner) {
            Some(inner) if inner.cause.is_none() => {
                inner.cause = Some(self);
                err
            }
            // A shared or already caused consequent is rebuilt with `self`
            // appended below the end of its chain.
            _ => {
                let kinds: Vec<ErrorKind> =
                    err.chain().map(|e| e.inner.kind.clone()).collect();
                kinds.into_iter().rev().fold(self, |cause, kind| Error {
                    inner: Arc::new(ErrorInner { kind, cause: Some(cause) }),
                })
            }
        }
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(ref cause) = err.inner.cause {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always the
    /// "root" cause.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Clone, Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Duration(self::duration::Error),
    Range(RangeError),
    TzAmbiguous(self::tz::ambiguous::Error),
    TzDb(self::tz::db::Error),
    TzTable(self::tz::table::Error),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Duration(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            TzAmbiguous(ref err) => err.fmt(f),
            TzDb(ref err) => err.fmt(f),
            TzTable(ref err) => err.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A generic error message.
///
/// This supports the `Error::from_args` public API, which permits callers
/// to manifest their own `Error` values from an arbitrary message.
#[derive(Clone)]
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        AdhocError { message }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// An error that occurs when an input value is out of bounds.
///
/// The error message produced by this type will include a name describing
/// which input was out of bounds, the value given and its minimum and maximum
/// allowed values.
#[derive(Clone, Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl RangeError {
    fn new(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> RangeError {
        RangeError { what, given: given.into(), min: min.into(), max: max.into() }
    }
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait exists to make `ErrorContext` work without needing to rely
/// on public `From` impls.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`
/// without calling `map_err` everywhere one wants to add context.
pub(crate) trait ErrorContext<T, E> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    ///
    /// This is equivalent to saying that "consequent is caused by self."
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// The closure avoids paying the cost of contextual error creation (which
    /// usually allocates) in the happy path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T, E> for Result<T, E>
where
    E: IntoError,
{
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent().into_error())
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    // Not an API guarantee, but growing `Error` should be a deliberate
    // decision since nearly every fallible routine returns one.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn context_chain_display() {
        let result: Result<(), Error> =
            Err(Error::range("year", 40_000, -32767, 32767));
        let err = result
            .context(Error::from_args(format_args!("adding months")))
            .unwrap_err();
        insta::assert_snapshot!(
            err,
            @"adding months: parameter 'year' with value 40000 is not in the required range of -32767..=32767",
        );
        assert!(err.is_range());
        assert!(!err.is_unknown_time_zone());
    }

    #[test]
    fn context_on_result() {
        let result: Result<(), Error> =
            Err(Error::range("ticks", 1, 2, 3));
        let err = result
            .with_context(|| Error::from_args(format_args!("outer")))
            .unwrap_err();
        assert_eq!(err.chain().count(), 2);
        assert!(err.to_string().starts_with("outer: "));
    }

    #[test]
    fn context_on_shared_consequent() {
        let consequent = Error::from_args(format_args!("shared"));
        let clone = consequent.clone();
        let err = Error::range("day", 0, 1, 31).context_impl(consequent);
        assert!(err.is_range());
        assert_eq!(clone.to_string(), "shared");
    }

    #[test]
    fn context_keeps_existing_cause() {
        let consequent = Error::from_args(format_args!("middle"))
            .context_impl(Error::from_args(format_args!("outer")));
        assert_eq!(consequent.chain().count(), 2);
        let err = Error::range("day", 0, 1, 31).context_impl(consequent);
        assert_eq!(err.chain().count(), 3);
        assert!(err.is_range());
        insta::assert_snapshot!(
            err,
            @"outer: middle: parameter 'day' with value 0 is not in the required range of 1..=31",
        );
    }
}
