use crate::{
    civil::{Date, DateTime, Time, Weekday},
    error::{zoned::Error as E, Error, ErrorContext},
    tz::Clock,
    util::itime::{ITimestamp, NANOS_PER_SECOND},
    Instant, Period, TimeSource, Unit,
};

/// A civil datetime paired with a [`Clock`].
///
/// A `ZonedDateTime` stores the "wall clock" fields as they appear in its
/// clock's offset. Combined with that offset, it identifies a unique instant
/// in time.
///
/// # Arithmetic
///
/// Adding a [`Period`] to a zoned datetime applies [`DateTime`] arithmetic to
/// its civil fields and carries the clock along unchanged. In particular,
/// the offset of a clock for a named zone is *not* looked up again, even when
/// the result crosses a daylight saving time transition. Callers who want
/// the zone's offset at the new instant can ask for it explicitly:
///
/// ```
/// use anydate::{
///     civil::datetime,
///     tz::{Clock, ClockIdentifierName},
///     ToPeriod, ZonedDateTime,
/// };
///
/// let jan = datetime(2024, 1, 15, 12, 0, 0, 0);
/// let clock = Clock::named_at(
///     ClockIdentifierName::AmericaNewYork,
///     jan.to_instant(Clock::UTC.offset())?,
/// )?;
/// let zdt = ZonedDateTime::new(jan, clock);
/// assert_eq!(zdt.offset_second(), -5 * 60 * 60);
///
/// // Six months later, the offset is unchanged...
/// let jul = zdt.checked_add(6.months())?;
/// assert_eq!(jul.to_string(), "2024-07-15T12:00:00-05:00[America/New_York]");
///
/// // ... unless it's resolved again at the new instant.
/// let clock = jul.clock().resolved_at(jul.to_instant()?)?;
/// let jul = jul.with_clock(clock)?;
/// assert_eq!(jul.to_string(), "2024-07-15T13:00:00-04:00[America/New_York]");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Comparisons
///
/// Equality and ordering compare the instants that zoned datetimes
/// identify. So two zoned datetimes with different clocks can be equal:
///
/// ```
/// use anydate::{civil::datetime, tz::Clock, ZonedDateTime};
///
/// let ist = Clock::from_offset_seconds(5 * 60 * 60 + 30 * 60)?;
/// let zdt1 = ZonedDateTime::new(datetime(2024, 2, 29, 17, 30, 0, 0), ist);
/// let zdt2 =
///     ZonedDateTime::new(datetime(2024, 2, 29, 12, 0, 0, 0), Clock::UTC);
/// assert_eq!(zdt1, zdt2);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct ZonedDateTime {
    datetime: DateTime,
    clock: Clock,
}

impl ZonedDateTime {
    /// Returns the current system time in the given clock.
    ///
    /// The clock is used as is. For a named clock, its offset is not looked
    /// up again for the current time.
    #[cfg(feature = "std")]
    #[inline]
    pub fn now(clock: Clock) -> ZonedDateTime {
        ZonedDateTime::now_with(&crate::SystemTimeSource, clock)
    }

    /// Returns the current time, according to the given source, in the given
    /// clock.
    #[inline]
    pub fn now_with(source: &dyn TimeSource, clock: Clock) -> ZonedDateTime {
        ZonedDateTime::from_instant(source.now(), clock)
    }

    /// Creates a zoned datetime from civil fields that are already in the
    /// clock's offset.
    ///
    /// This never fails and never consults a zone database.
    #[inline]
    pub const fn new(datetime: DateTime, clock: Clock) -> ZonedDateTime {
        ZonedDateTime { datetime, clock }
    }

    /// Creates a zoned datetime for the given instant as seen through the
    /// given clock's offset.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, tz::Clock, Instant, ZonedDateTime};
    ///
    /// let clock = Clock::from_offset_seconds(-8 * 60 * 60)?;
    /// let zdt = ZonedDateTime::from_instant(Instant::UNIX_EPOCH, clock);
    /// assert_eq!(zdt.datetime(), datetime(1969, 12, 31, 16, 0, 0, 0));
    /// assert_eq!(zdt.to_instant()?, Instant::UNIX_EPOCH);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn from_instant(instant: Instant, clock: Clock) -> ZonedDateTime {
        ZonedDateTime::new(instant.to_datetime(clock.offset()), clock)
    }

    /// Returns the year of this zoned datetime.
    #[inline]
    pub fn year(self) -> i16 {
        self.datetime.year()
    }

    /// Returns the month of this zoned datetime.
    #[inline]
    pub fn month(self) -> i8 {
        self.datetime.month()
    }

    /// Returns the day of this zoned datetime.
    #[inline]
    pub fn day(self) -> i8 {
        self.datetime.day()
    }

    /// Returns the hour of this zoned datetime.
    #[inline]
    pub fn hour(self) -> i8 {
        self.datetime.hour()
    }

    /// Returns the minute of this zoned datetime.
    #[inline]
    pub fn minute(self) -> i8 {
        self.datetime.minute()
    }

    /// Returns the second of this zoned datetime.
    #[inline]
    pub fn second(self) -> i8 {
        self.datetime.second()
    }

    /// Returns the fractional nanosecond of this zoned datetime.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.datetime.subsec_nanosecond()
    }

    /// Returns the weekday of this zoned datetime.
    #[inline]
    pub fn weekday(self) -> Weekday {
        self.datetime.weekday()
    }

    /// Returns the UTC offset of this zoned datetime's clock in seconds.
    #[inline]
    pub fn offset_second(self) -> i32 {
        self.clock.offset_second()
    }

    /// Returns the clock of this zoned datetime.
    #[inline]
    pub fn clock(self) -> Clock {
        self.clock
    }

    /// Returns the civil datetime of this zoned datetime.
    #[inline]
    pub fn datetime(self) -> DateTime {
        self.datetime
    }

    /// Returns the civil date of this zoned datetime.
    #[inline]
    pub fn date(self) -> Date {
        self.datetime.date()
    }

    /// Returns the civil time of this zoned datetime.
    #[inline]
    pub fn time(self) -> Time {
        self.datetime.time()
    }

    /// Returns the instant identified by this zoned datetime.
    ///
    /// # Errors
    ///
    /// This returns an error when the instant is outside the range of
    /// [`Instant::MIN`] to [`Instant::MAX`]. This can only happen for
    /// datetimes within a day of [`DateTime::MIN`] or [`DateTime::MAX`].
    #[inline]
    pub fn to_instant(self) -> Result<Instant, Error> {
        Instant::from_itimestamp(self.to_itimestamp())
            .context(E::FailedToInstant)
    }

    /// Returns the same instant as seen through another clock.
    ///
    /// # Errors
    ///
    /// This returns an error when this zoned datetime's instant is out of
    /// range. See [`ZonedDateTime::to_instant`].
    #[inline]
    pub fn with_clock(self, clock: Clock) -> Result<ZonedDateTime, Error> {
        Ok(ZonedDateTime::from_instant(self.to_instant()?, clock))
    }

    /// Adds the given period to the civil fields of this zoned datetime.
    ///
    /// The clock is carried over unchanged. See [`DateTime::checked_add`]
    /// for how the period is applied.
    ///
    /// # Errors
    ///
    /// This returns an error when the resulting civil datetime is out of
    /// range.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, tz::Clock, ToPeriod, ZonedDateTime};
    ///
    /// let clock = Clock::from_offset_seconds(9 * 60 * 60)?;
    /// let zdt =
    ///     ZonedDateTime::new(datetime(2024, 1, 31, 23, 0, 0, 0), clock);
    /// let zdt = zdt.checked_add(1.month().hours(2))?;
    /// assert_eq!(zdt.to_string(), "2024-03-01T01:00:00+09:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_add(self, period: Period) -> Result<ZonedDateTime, Error> {
        let datetime =
            self.datetime.checked_add(period).context(E::FailedAddPeriod)?;
        Ok(ZonedDateTime::new(datetime, self.clock))
    }

    /// Subtracts the given period from the civil fields of this zoned
    /// datetime.
    ///
    /// # Errors
    ///
    /// This returns an error when the resulting civil datetime is out of
    /// range.
    #[inline]
    pub fn checked_sub(self, period: Period) -> Result<ZonedDateTime, Error> {
        self.checked_add(period.checked_neg()?)
    }

    /// Returns the elapsed time from this zoned datetime until the other
    /// one.
    ///
    /// This is the difference between the instants, so the clocks of the two
    /// values don't matter. The period uses hours as its largest unit.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, tz::Clock, ToPeriod, ZonedDateTime};
    ///
    /// let tokyo = Clock::from_offset_seconds(9 * 60 * 60)?;
    /// let zdt1 = ZonedDateTime::new(datetime(2024, 3, 1, 9, 0, 0, 0), tokyo);
    /// let zdt2 =
    ///     ZonedDateTime::new(datetime(2024, 3, 1, 1, 30, 0, 0), Clock::UTC);
    /// assert_eq!(zdt1.until(zdt2), 1.hour().minutes(30));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn until(self, other: ZonedDateTime) -> Period {
        // Civil datetimes are at most about 20,000 years apart, which is
        // far less than `i64::MAX` hours.
        let Ok(period) =
            Period::from_fixed_nanoseconds(Unit::Hour, self.until_nanos(other))
        else {
            unreachable!("difference between zoned datetimes fits in hours")
        };
        period
    }

    /// Returns the elapsed time from the other zoned datetime until this
    /// one.
    #[inline]
    pub fn since(self, other: ZonedDateTime) -> Period {
        other.until(self)
    }

    /// Returns the period from this zoned datetime until the other one,
    /// using the given unit as the largest unit.
    ///
    /// For calendar units (days or bigger), `other` is first converted to
    /// this zoned datetime's offset, and then the difference is computed
    /// with [`DateTime::until_with_largest_unit`]. For smaller units, the
    /// difference between the two instants is used.
    ///
    /// # Errors
    ///
    /// This returns an error when either instant is out of range, or when
    /// the result cannot be represented.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{
    ///     civil::datetime, tz::Clock, ToPeriod, Unit, ZonedDateTime,
    /// };
    ///
    /// let paris = Clock::from_offset_seconds(60 * 60)?;
    /// let zdt1 =
    ///     ZonedDateTime::new(datetime(2024, 1, 31, 0, 0, 0, 0), paris);
    /// let zdt2 =
    ///     ZonedDateTime::new(datetime(2024, 2, 28, 23, 0, 0, 0), Clock::UTC);
    /// let p = zdt1.until_with_largest_unit(Unit::Month, zdt2)?;
    /// assert_eq!(p, 29.days());
    /// let p = zdt1.until_with_largest_unit(Unit::Hour, zdt2)?;
    /// assert_eq!(p, 696.hours());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn until_with_largest_unit(
        self,
        largest: Unit,
        other: ZonedDateTime,
    ) -> Result<Period, Error> {
        if !largest.is_calendar() {
            return Period::from_fixed_nanoseconds(
                largest,
                self.until_nanos(other),
            );
        }
        let other = other.to_instant()?.to_datetime(self.clock.offset());
        self.datetime.until_with_largest_unit(largest, other)
    }

    /// Returns the period from the other zoned datetime until this one,
    /// using the given unit as the largest unit.
    ///
    /// # Errors
    ///
    /// This returns an error in the same circumstances as
    /// [`ZonedDateTime::until_with_largest_unit`].
    #[inline]
    pub fn since_with_largest_unit(
        self,
        largest: Unit,
        other: ZonedDateTime,
    ) -> Result<Period, Error> {
        self.until_with_largest_unit(largest, other)?.checked_neg()
    }
}

/// Internal APIs.
impl ZonedDateTime {
    /// Returns the timestamp of this value without checking that it's in
    /// the range supported by `Instant`.
    #[inline]
    fn to_itimestamp(self) -> ITimestamp {
        let offset = self.clock.offset().to_ioffset();
        self.datetime.to_idatetime().to_timestamp(offset)
    }

    fn until_nanos(self, other: ZonedDateTime) -> i128 {
        let nanos = |its: ITimestamp| {
            i128::from(its.second) * i128::from(NANOS_PER_SECOND)
                + i128::from(its.nanosecond)
        };
        nanos(other.to_itimestamp()) - nanos(self.to_itimestamp())
    }
}

impl Eq for ZonedDateTime {}

impl PartialEq for ZonedDateTime {
    #[inline]
    fn eq(&self, rhs: &ZonedDateTime) -> bool {
        self.to_itimestamp() == rhs.to_itimestamp()
    }
}

impl Ord for ZonedDateTime {
    #[inline]
    fn cmp(&self, rhs: &ZonedDateTime) -> core::cmp::Ordering {
        self.to_itimestamp().cmp(&rhs.to_itimestamp())
    }
}

impl PartialOrd for ZonedDateTime {
    #[inline]
    fn partial_cmp(&self, rhs: &ZonedDateTime) -> Option<core::cmp::Ordering> {
        Some(self.cmp(rhs))
    }
}

impl core::hash::Hash for ZonedDateTime {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        let its = self.to_itimestamp();
        its.second.hash(state);
        its.nanosecond.hash(state);
    }
}

impl core::fmt::Debug for ZonedDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}{}", self.datetime, self.clock.offset())?;
        if let Some(id) = self.clock.identifier() {
            write!(f, "[{id}]")?;
        }
        Ok(())
    }
}

/// Adds a period to a zoned datetime.
///
/// # Panics
///
/// This panics in the same circumstances that
/// [`ZonedDateTime::checked_add`] returns an error.
impl core::ops::Add<Period> for ZonedDateTime {
    type Output = ZonedDateTime;

    #[inline]
    fn add(self, rhs: Period) -> ZonedDateTime {
        self.checked_add(rhs).expect("adding period to zoned datetime failed")
    }
}

/// Subtracts a period from a zoned datetime.
///
/// # Panics
///
/// This panics in the same circumstances that
/// [`ZonedDateTime::checked_sub`] returns an error.
impl core::ops::Sub<Period> for ZonedDateTime {
    type Output = ZonedDateTime;

    #[inline]
    fn sub(self, rhs: Period) -> ZonedDateTime {
        self.checked_sub(rhs)
            .expect("subtracting period from zoned datetime failed")
    }
}

/// Computes the elapsed time between two zoned datetimes.
///
/// This is equivalent to `rhs.until(self)`.
impl core::ops::Sub for ZonedDateTime {
    type Output = Period;

    #[inline]
    fn sub(self, rhs: ZonedDateTime) -> Period {
        self.since(rhs)
    }
}
