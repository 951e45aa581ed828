use crate::{
    civil::DateTime,
    error::{tz::Error as E, Error},
    util::itime::IOffset,
    Instant,
};

/// Represents a fixed UTC offset.
///
/// Negative offsets correspond to time zones west of the prime meridian,
/// while positive offsets correspond to time zones east of the prime
/// meridian. Equivalently, in all cases, `civil-time - offset = UTC`.
///
/// An offset is always in the range `-18:00..=+18:00`. In units of seconds,
/// that is `-64,800..=64,800`.
///
/// # Display format
///
/// This type implements the `std::fmt::Display` trait. It will convert the
/// offset to a string in the form `{sign}{hours}:{minutes}[:{seconds}]`,
/// where `seconds` is only present when non-zero. For example:
///
/// ```
/// use anydate::tz::Offset;
///
/// let o = Offset::constant(-5);
/// assert_eq!(o.to_string(), "-05:00");
/// let o = Offset::constant_seconds(19_800);
/// assert_eq!(o.to_string(), "+05:30");
/// let o = Offset::constant_seconds(-18_062);
/// assert_eq!(o.to_string(), "-05:01:02");
/// assert_eq!(Offset::UTC.to_string(), "+00:00");
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    seconds: i32,
}

impl Offset {
    const SECONDS_MIN: i32 = -18 * 60 * 60;
    const SECONDS_MAX: i32 = 18 * 60 * 60;

    /// The minimum possible UTC offset, `-18:00`.
    pub const MIN: Offset = Offset { seconds: Offset::SECONDS_MIN };

    /// The maximum possible UTC offset, `+18:00`.
    pub const MAX: Offset = Offset { seconds: Offset::SECONDS_MAX };

    /// The offset corresponding to UTC. That is, no offset at all.
    pub const UTC: Offset = Offset { seconds: 0 };

    /// Creates a new UTC offset in a `const` context from a given number of
    /// hours.
    ///
    /// The fallible non-const version of this constructor is
    /// [`Offset::from_hours`].
    ///
    /// # Panics
    ///
    /// This routine panics when the given number of hours is out of range.
    /// Namely, `hours` must be in the range `-18..=18`.
    #[inline]
    pub const fn constant(hours: i8) -> Offset {
        Offset::constant_seconds((hours as i32) * 60 * 60)
    }

    /// Creates a new UTC offset in a `const` context from a given number of
    /// seconds.
    ///
    /// The fallible non-const version of this constructor is
    /// [`Offset::from_seconds`].
    ///
    /// # Panics
    ///
    /// This routine panics when the given number of seconds is out of range.
    /// Namely, `seconds` must be in the range `-64800..=64800`.
    #[inline]
    pub const fn constant_seconds(seconds: i32) -> Offset {
        if seconds < Offset::SECONDS_MIN || seconds > Offset::SECONDS_MAX {
            panic!("invalid UTC offset seconds")
        }
        Offset { seconds }
    }

    /// Creates a new UTC offset from a given number of seconds.
    ///
    /// # Errors
    ///
    /// This routine returns an error when the given number of seconds is
    /// outside the range `-64800..=64800` (that is, `-18:00..=+18:00`).
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::tz::Offset;
    ///
    /// let o = Offset::from_seconds(-18_000)?;
    /// assert_eq!(o.seconds(), -18_000);
    /// assert!(Offset::from_seconds(64_801).unwrap_err().is_invalid_offset());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn from_seconds(seconds: i32) -> Result<Offset, Error> {
        if !(Offset::SECONDS_MIN..=Offset::SECONDS_MAX).contains(&seconds) {
            return Err(Error::from(E::InvalidOffset {
                seconds: i64::from(seconds),
            }));
        }
        Ok(Offset { seconds })
    }

    /// Creates a new UTC offset from a given number of hours.
    ///
    /// # Errors
    ///
    /// This routine returns an error when the given number of hours is
    /// outside the range `-18..=18`.
    #[inline]
    pub fn from_hours(hours: i8) -> Result<Offset, Error> {
        Offset::from_seconds(i32::from(hours) * 60 * 60)
    }

    /// Returns the total number of seconds in this offset.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::tz::Offset;
    ///
    /// assert_eq!(Offset::constant(-5).seconds(), -18_000);
    /// assert_eq!(Offset::constant(5).seconds(), 18_000);
    /// ```
    #[inline]
    pub fn seconds(self) -> i32 {
        self.seconds
    }

    /// Returns the negation of this offset.
    ///
    /// This never panics, since the range of offsets is symmetric.
    #[inline]
    pub fn negate(self) -> Offset {
        Offset { seconds: -self.seconds }
    }

    /// Returns true if and only if this offset is less than zero.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// Converts the given instant to a civil datetime using this offset.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, tz::Offset, Instant};
    ///
    /// assert_eq!(
    ///     Offset::constant(-8).to_datetime(Instant::UNIX_EPOCH),
    ///     datetime(1969, 12, 31, 16, 0, 0, 0),
    /// );
    /// ```
    #[inline]
    pub fn to_datetime(self, instant: Instant) -> DateTime {
        instant.to_datetime(self)
    }

    /// Converts the given civil datetime to an instant using this offset.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is outside the supported range
    /// of [`Instant`].
    #[inline]
    pub fn to_instant(self, dt: DateTime) -> Result<Instant, Error> {
        dt.to_instant(self)
    }

    #[inline]
    pub(crate) const fn to_ioffset(self) -> IOffset {
        IOffset { second: self.seconds }
    }

    fn parts(self) -> (&'static str, i32, i32, i32) {
        let sign = if self.seconds < 0 { "-" } else { "+" };
        let abs = self.seconds.abs();
        (sign, abs / 3_600, (abs / 60) % 60, abs % 60)
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let (sign, hours, minutes, seconds) = self.parts();
        write!(f, "Offset({sign}{hours:02}:{minutes:02}:{seconds:02})")
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let (sign, hours, minutes, seconds) = self.parts();
        write!(f, "{sign}{hours:02}:{minutes:02}")?;
        if seconds != 0 {
            write!(f, ":{seconds:02}")?;
        }
        Ok(())
    }
}

/// Negate this offset.
///
/// This never panics.
impl core::ops::Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        self.negate()
    }
}
