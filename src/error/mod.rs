use alloc::sync::Arc;

pub(crate) mod civil;
pub(crate) mod instant;
pub(crate) mod period;
pub(crate) mod tz;
pub(crate) mod zoned;

/// An error that can occur in this crate.
///
/// Errors come in a handful of flavors:
///
/// * An invalid field given to a constructor. For example, a day of `31` for
/// April. See [`Error::is_invalid_field`].
/// * An invalid UTC offset given to a fixed-offset clock. See
/// [`Error::is_invalid_offset`].
/// * A time zone identifier that the zone database doesn't know about. See
/// [`Error::is_unknown_zone`].
/// * A zone database that couldn't answer a query. See
/// [`Error::is_zone_data_unavailable`].
/// * Arithmetic whose result falls outside the supported range. See
/// [`Error::is_overflow`].
///
/// # Design
///
/// This crate uses a single error type for all of its operations. Finer
/// grained error types are difficult to compose, and the operations in this
/// crate compose quite a bit. (For example, adding a period to a zoned
/// datetime adds a period to a date, which can overflow the year.)
///
/// Errors may carry a chain of causes. The `Display` impl prints the whole
/// chain, from the highest level context to the root cause, separated by
/// `: `. The predicates on this type always inspect the root cause.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cheaply cloneable and exactly
    /// one word in size.
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
    /// Callers should generally use their own error types. But in some
    /// circumstances, it can be convenient to manufacture an error value of
    /// this type specifically.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::Error;
    ///
    /// let err = Error::from_args(format_args!("something failed"));
    /// assert_eq!(err.to_string(), "something failed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when this error originated from a constructor argument
    /// that violates its declared range.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::Date;
    ///
    /// assert!(Date::new(2024, 2, 30).unwrap_err().is_invalid_field());
    /// assert!(Date::new(2024, 13, 1).unwrap_err().is_invalid_field());
    /// ```
    pub fn is_invalid_field(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Range(_))
    }

    /// Returns the name and the offending value of the field that caused
    /// this error, if this is an invalid field error.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::Time;
    ///
    /// let err = Time::new(24, 0, 0).unwrap_err();
    /// assert_eq!(err.field(), Some(("hour", 24)));
    /// ```
    pub fn field(&self) -> Option<(&'static str, i128)> {
        match *self.root().kind() {
            ErrorKind::Range(ref err) => Some((err.what, err.given)),
            _ => None,
        }
    }

    /// Returns true when this error originated from a fixed UTC offset
    /// outside of the supported `-18:00..=+18:00` range.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::tz::Clock;
    ///
    /// let err = Clock::from_offset_seconds(19 * 60 * 60).unwrap_err();
    /// assert!(err.is_invalid_offset());
    /// ```
    pub fn is_invalid_offset(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Tz(self::tz::Error::InvalidOffset { .. })
        )
    }

    /// Returns true when this error originated from a time zone identifier
    /// that isn't recognized.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::tz::ClockIdentifierName;
    ///
    /// let err = "Mars/Olympus_Mons"
    ///     .parse::<ClockIdentifierName>()
    ///     .unwrap_err();
    /// assert!(err.is_unknown_zone());
    /// ```
    pub fn is_unknown_zone(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Tz(self::tz::Error::UnknownZone { .. })
        )
    }

    /// Returns true when this error originated from a zone database that
    /// could not answer a query.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{
    ///     tz::{Clock, ClockIdentifierName, TimeZoneDatabase},
    ///     Instant,
    /// };
    ///
    /// let db = TimeZoneDatabase::none();
    /// let err = Clock::named_with(
    ///     &db,
    ///     ClockIdentifierName::AsiaTokyo,
    ///     Instant::UNIX_EPOCH,
    /// ).unwrap_err();
    /// assert!(err.is_zone_data_unavailable());
    /// ```
    pub fn is_zone_data_unavailable(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Tz(self::tz::Error::ZoneDataUnavailable { .. })
        )
    }

    /// Returns true when this error originated from arithmetic whose result
    /// falls outside of the supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::Date, ToPeriod};
    ///
    /// let d = Date::new(9999, 12, 31)?;
    /// assert!(d.checked_add(1.day()).unwrap_err().is_overflow());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_overflow(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Overflow(_))
    }

    /// Returns true when this error originated from a combination of
    /// parameters that doesn't make sense. For example, asking for the
    /// number of hours between two dates, or adding months to an instant.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::Date, Unit};
    ///
    /// let d1 = Date::new(2025, 3, 18)?;
    /// let d2 = Date::new(2025, 12, 21)?;
    /// let err = d1.until_with_largest_unit(Unit::Hour, d2).unwrap_err();
    /// assert!(err.is_invalid_parameter());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_invalid_parameter(&self) -> bool {
        use self::{civil::Error as CivilError, instant::Error as InstantError};

        matches!(
            *self.root().kind(),
            ErrorKind::Civil(
                CivilError::LargestUnitTooSmall { .. }
                    | CivilError::LargestUnitTooBig { .. }
            ) | ErrorKind::Instant(InstantError::CalendarUnits { .. })
        )
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "day")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }))
    }

    /// Creates a new error indicating that arithmetic on `what` produced a
    /// value outside of the supported range.
    ///
    /// Unlike `Error::range`, this is reserved for results of computations.
    /// Callers supplied valid inputs, but combining them went too far.
    #[inline(never)]
    #[cold]
    pub(crate) fn overflow(what: &'static str) -> Error {
        Error::from(ErrorKind::Overflow(OverflowError { what }))
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        debug_assert!(
            err.inner.cause.is_none(),
            "cause of consequence must be `None`"
        );
        match Arc::get_mut(&mut err.inner) {
            Some(inner) => {
                inner.cause = Some(self);
                err
            }
            // The consequent is shared elsewhere, so we can't attach a cause
            // to it. Keep the root cause since that is what the predicates
            // inspect.
            None => self,
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
        let mut err = Some(self);
        core::iter::from_fn(move || {
            let this = err?;
            err = this.inner.cause.as_ref();
            Some(this)
        })
    }

    /// Returns the kind of this error.
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
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Civil(self::civil::Error),
    Instant(self::instant::Error),
    Overflow(OverflowError),
    Period(self::period::Error),
    Range(RangeError),
    Tz(self::tz::Error),
    Zoned(self::zoned::Error),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => msg.fmt(f),
            Civil(ref err) => err.fmt(f),
            Instant(ref err) => err.fmt(f),
            Overflow(ref err) => err.fmt(f),
            Period(ref err) => err.fmt(f),
            Range(ref err) => err.fmt(f),
            Tz(ref err) => err.fmt(f),
            Zoned(ref err) => err.fmt(f),
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
/// This supports the `Error::from_args` public API, which permits users to
/// manifest their own `Error` values from an arbitrary message.
struct AdhocError {
    message: alloc::boxed::Box<str>,
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
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
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

/// An error that occurs when arithmetic leaves the supported range.
#[derive(Clone, Debug)]
struct OverflowError {
    what: &'static str,
}

impl core::fmt::Display for OverflowError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let OverflowError { what } = *self;
        write!(f, "value for '{what}' overflowed the supported range")
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `ErrorContext` work without needing
/// to rely on public `From` impls for every internal error type.
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
/// This makes it easy to contextualize either `Error` or `Result<T, Error>`.
/// Specifically, in the latter case, it absolves one of the need to call
/// `map_err` everywhere one wants to add context to an error.
pub(crate) trait ErrorContext<T> {
    /// Contextualize the given consequent error with this (`self`) error as
    /// the cause.
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: IntoError,
{
    #[inline]
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| {
            err.into_error().context_impl(consequent.into_error())
        })
    }

    #[inline]
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

    // We test that our 'Error' type is the size we expect. This isn't an API
    // guarantee, but if the size increases, we really want to make sure we
    // decide to do that intentionally.
    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn range_message() {
        let err = Error::range("day", 30, 1, 29);
        assert_eq!(
            err.to_string(),
            "parameter 'day' with value 30 is not in the required range \
             of 1..=29",
        );
        assert!(err.is_invalid_field());
        assert_eq!(err.field(), Some(("day", 30)));
    }

    #[test]
    fn context_chain_keeps_root() {
        let result: Result<(), Error> = Err(Error::overflow("year"));
        let err = result
            .with_context(|| Error::from_args(format_args!("failed to add")))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to add: value for 'year' overflowed the supported range",
        );
        assert!(err.is_overflow());
        assert!(!err.is_invalid_field());
        assert_eq!(err.chain().count(), 2);
    }
}
