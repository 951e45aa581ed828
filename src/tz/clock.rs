use crate::{
    error::Error,
    tz::{db, ClockIdentifierName, Offset, ZoneDatabase},
    Instant,
};

/// A UTC offset policy.
///
/// A clock is either:
///
/// * A fixed offset, constructed with [`Clock::fixed`] or
/// [`Clock::from_offset_seconds`]. Its offset never changes.
/// * A named zone, constructed with [`Clock::named`], [`Clock::named_at`] or
/// [`Clock::named_with`]. The offset of a named zone can change over the
/// course of a year (for example, because of daylight saving time), so its
/// offset is resolved once, at construction, for a particular reference
/// instant.
///
/// A clock is a small `Copy` value. It never looks up its offset again after
/// construction. To get the offset of a named zone at another instant, use
/// [`Clock::resolved_at`].
///
/// # Example
///
/// ```
/// use anydate::{civil::datetime, tz::{Clock, ClockIdentifierName, Offset}};
///
/// let jan = datetime(2024, 1, 15, 12, 0, 0, 0).to_instant(Offset::UTC)?;
/// let jul = datetime(2024, 7, 15, 12, 0, 0, 0).to_instant(Offset::UTC)?;
///
/// let clock = Clock::named_at(ClockIdentifierName::AmericaNewYork, jan)?;
/// assert_eq!(clock.offset_second(), -5 * 60 * 60);
/// assert_eq!(clock.resolved_at(jul)?.offset_second(), -4 * 60 * 60);
///
/// let clock = Clock::from_offset_seconds(5 * 60 * 60 + 30 * 60)?;
/// assert!(clock.is_fixed());
/// assert_eq!(clock.to_string(), "+05:30");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Clock {
    offset: Offset,
    identifier: Option<ClockIdentifierName>,
}

impl Clock {
    /// A fixed clock for UTC.
    pub const UTC: Clock = Clock::fixed(Offset::UTC);

    /// Creates a clock with the given fixed offset.
    #[inline]
    pub const fn fixed(offset: Offset) -> Clock {
        Clock { offset, identifier: None }
    }

    /// Creates a clock with a fixed offset given in seconds.
    ///
    /// # Errors
    ///
    /// This returns an error when the offset is outside the range
    /// `-18:00..=+18:00`. The error returned reports `true` for
    /// [`Error::is_invalid_offset`].
    #[inline]
    pub fn from_offset_seconds(seconds: i32) -> Result<Clock, Error> {
        Ok(Clock::fixed(Offset::from_seconds(seconds)?))
    }

    /// Creates a clock for the named zone, with its offset resolved at the
    /// current time.
    ///
    /// This uses the global zone database returned by [`db()`].
    ///
    /// # Errors
    ///
    /// This returns an error when the zone database cannot resolve the
    /// offset.
    #[cfg(feature = "std")]
    #[inline]
    pub fn named(id: ClockIdentifierName) -> Result<Clock, Error> {
        Clock::named_at(id, Instant::now())
    }

    /// Creates a clock for the named zone, with its offset resolved at the
    /// given instant.
    ///
    /// This uses the global zone database returned by [`db()`].
    ///
    /// # Errors
    ///
    /// This returns an error when the zone database cannot resolve the
    /// offset.
    #[inline]
    pub fn named_at(
        id: ClockIdentifierName,
        at: Instant,
    ) -> Result<Clock, Error> {
        Clock::named_with(db(), id, at)
    }

    /// Creates a clock for the named zone, with its offset resolved at the
    /// given instant by the given zone database.
    ///
    /// # Errors
    ///
    /// This returns whatever error the zone database returns.
    pub fn named_with(
        db: &dyn ZoneDatabase,
        id: ClockIdentifierName,
        at: Instant,
    ) -> Result<Clock, Error> {
        let offset = db.resolve_offset(id, at)?;
        trace!("created clock for {id} with offset {offset} at {at}");
        Ok(Clock { offset, identifier: Some(id) })
    }

    /// Rebuilds a clock from an offset that was resolved previously.
    #[cfg(feature = "serde")]
    pub(crate) const fn from_parts(
        offset: Offset,
        identifier: Option<ClockIdentifierName>,
    ) -> Clock {
        Clock { offset, identifier }
    }

    /// Returns this clock with its offset resolved at the given instant.
    ///
    /// For a fixed clock, this always returns the clock unchanged. For a
    /// named clock, this looks up the offset again in the global zone
    /// database returned by [`db()`].
    ///
    /// # Errors
    ///
    /// This returns an error when the zone database cannot resolve the
    /// offset.
    #[inline]
    pub fn resolved_at(self, at: Instant) -> Result<Clock, Error> {
        self.resolved_with(db(), at)
    }

    /// Like [`Clock::resolved_at`], but uses the given zone database.
    ///
    /// # Errors
    ///
    /// This returns whatever error the zone database returns.
    pub fn resolved_with(
        self,
        db: &dyn ZoneDatabase,
        at: Instant,
    ) -> Result<Clock, Error> {
        match self.identifier {
            None => Ok(self),
            Some(id) => Clock::named_with(db, id, at),
        }
    }

    /// Returns the UTC offset of this clock.
    ///
    /// For a named clock, this is the offset resolved at construction.
    #[inline]
    pub fn offset(self) -> Offset {
        self.offset
    }

    /// Returns the UTC offset of this clock in seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::tz::Clock;
    ///
    /// assert_eq!(Clock::UTC.offset_second(), 0);
    /// let clock = Clock::from_offset_seconds(-3_600)?;
    /// assert_eq!(clock.offset_second(), -3_600);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn offset_second(self) -> i32 {
        self.offset.seconds()
    }

    /// Returns the zone identifier of this clock, or `None` for a fixed
    /// clock.
    #[inline]
    pub fn identifier(self) -> Option<ClockIdentifierName> {
        self.identifier
    }

    /// Returns true if this clock has a fixed offset.
    #[inline]
    pub fn is_fixed(self) -> bool {
        self.identifier.is_none()
    }
}

impl Default for Clock {
    fn default() -> Clock {
        Clock::UTC
    }
}

impl From<Offset> for Clock {
    fn from(offset: Offset) -> Clock {
        Clock::fixed(offset)
    }
}

impl core::fmt::Display for Clock {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.identifier {
            None => core::fmt::Display::fmt(&self.offset, f),
            Some(id) => core::fmt::Display::fmt(&id, f),
        }
    }
}
