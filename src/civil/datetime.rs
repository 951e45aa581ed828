use crate::{
    civil::{Date, Time, Weekday},
    error::{civil::Error as E, Error, ErrorContext},
    tz::Offset,
    util::itime::{
        IDateTime, ITimeNanosecond, NANOS_PER_CIVIL_DAY, SECONDS_PER_CIVIL_DAY,
    },
    Instant, Period, Unit,
};

/// A representation of a civil datetime in the Gregorian calendar.
///
/// A `DateTime` value corresponds to a pair of a [`Date`] and a [`Time`].
/// That is, a datetime contains a year, month, day, hour, minute, second and
/// the fractional number of nanoseconds.
///
/// A `DateTime` value is guaranteed to contain a valid date. For example,
/// neither `2023-02-29T00:00:00` nor `2015-06-30T23:59:60` are valid
/// `DateTime` values.
///
/// # Civil datetimes
///
/// A `DateTime` value behaves without regard to daylight saving time or time
/// zones in general. When doing arithmetic on datetimes with periods
/// defined in units of time (such as with [`DateTime::checked_add`]), days
/// are considered to always be precisely `86,400` seconds long.
///
/// # Comparisons
///
/// Datetimes are ordered lexicographically by their date and then their
/// time, which is the same as chronological order.
///
/// ```
/// use anydate::civil::datetime;
///
/// let dt1 = datetime(2024, 3, 11, 1, 25, 15, 0);
/// let dt2 = datetime(2025, 1, 31, 0, 30, 0, 0);
/// assert!(dt1 < dt2);
/// ```
///
/// # Arithmetic
///
/// ```
/// use anydate::{civil::datetime, ToPeriod};
///
/// let start = datetime(2024, 2, 25, 15, 45, 0, 0);
/// let later = start + 1.month().days(3).hours(12);
/// assert_eq!(later, datetime(2024, 3, 29, 3, 45, 0, 0));
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// The minimum representable Gregorian datetime.
    pub const MIN: DateTime = DateTime::from_parts(Date::MIN, Time::MIN);

    /// The maximum representable Gregorian datetime.
    pub const MAX: DateTime = DateTime::from_parts(Date::MAX, Time::MAX);

    /// Creates a new `DateTime` value from its component year, month, day,
    /// hour, minute, second and fractional subsecond (up to nanosecond
    /// precision) values.
    ///
    /// # Errors
    ///
    /// This returns an error when any component is out of range. The error
    /// identifies the invalid field and its value. See [`Date::new`] and
    /// [`Time::new_with_nanosecond`] for the valid ranges.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::DateTime;
    ///
    /// let dt = DateTime::new(2024, 2, 29, 21, 30, 5, 123_456_789)?;
    /// assert_eq!(dt.year(), 2024);
    /// assert_eq!(dt.month(), 2);
    /// assert_eq!(dt.day(), 29);
    /// assert_eq!(dt.hour(), 21);
    /// assert_eq!(dt.minute(), 30);
    /// assert_eq!(dt.second(), 5);
    /// assert_eq!(dt.subsec_nanosecond(), 123_456_789);
    ///
    /// let err = DateTime::new(2023, 2, 29, 0, 0, 0, 0).unwrap_err();
    /// assert_eq!(err.field(), Some(("day", 29)));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn new(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> Result<DateTime, Error> {
        let date = Date::new(year, month, day)?;
        let time = Time::new_with_nanosecond(
            hour,
            minute,
            second,
            subsec_nanosecond,
        )?;
        Ok(DateTime { date, time })
    }

    /// Creates a new `DateTime` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`DateTime::new`] would return an error.
    #[inline]
    pub const fn constant(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> DateTime {
        let date = Date::constant(year, month, day);
        let time = Time::constant(hour, minute, second, subsec_nanosecond);
        DateTime { date, time }
    }

    /// Creates a `DateTime` from its date and time parts.
    #[inline]
    pub const fn from_parts(date: Date, time: Time) -> DateTime {
        DateTime { date, time }
    }

    /// Returns the date component of this datetime.
    #[inline]
    pub fn date(self) -> Date {
        self.date
    }

    /// Returns the time component of this datetime.
    #[inline]
    pub fn time(self) -> Time {
        self.time
    }

    /// Returns the year for this datetime.
    #[inline]
    pub fn year(self) -> i16 {
        self.date.year()
    }

    /// Returns the month for this datetime.
    #[inline]
    pub fn month(self) -> i8 {
        self.date.month()
    }

    /// Returns the day for this datetime.
    #[inline]
    pub fn day(self) -> i8 {
        self.date.day()
    }

    /// Returns the hour for this datetime.
    #[inline]
    pub fn hour(self) -> i8 {
        self.time.hour()
    }

    /// Returns the minute for this datetime.
    #[inline]
    pub fn minute(self) -> i8 {
        self.time.minute()
    }

    /// Returns the second for this datetime.
    #[inline]
    pub fn second(self) -> i8 {
        self.time.second()
    }

    /// Returns the fractional nanosecond for this datetime.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.time.subsec_nanosecond()
    }

    /// Returns the weekday corresponding to this datetime.
    #[inline]
    pub fn weekday(self) -> Weekday {
        self.date.weekday()
    }

    /// Returns the ordinal day of the year that this datetime resides in.
    #[inline]
    pub fn day_of_year(self) -> i16 {
        self.date.day_of_year()
    }

    /// Returns a new datetime with the date replaced.
    #[inline]
    pub fn with_date(self, date: Date) -> DateTime {
        DateTime { date, ..self }
    }

    /// Returns a new datetime with the time replaced.
    #[inline]
    pub fn with_time(self, time: Time) -> DateTime {
        DateTime { time, ..self }
    }

    /// Returns the number of seconds from `1970-01-01T00:00:00` to this
    /// datetime, as if this datetime were in UTC.
    ///
    /// The fractional second is ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::datetime;
    ///
    /// assert_eq!(datetime(1970, 1, 1, 0, 0, 0, 0).to_epoch_second(), 0);
    /// assert_eq!(datetime(1970, 1, 2, 0, 0, 1, 0).to_epoch_second(), 86_401);
    /// let dt = datetime(1969, 12, 31, 23, 59, 59, 999);
    /// assert_eq!(dt.to_epoch_second(), -1);
    /// ```
    #[inline]
    pub fn to_epoch_second(self) -> i64 {
        i64::from(self.date.to_epoch_day()) * SECONDS_PER_CIVIL_DAY
            + i64::from(self.time.to_itime().to_second().second)
    }

    /// Converts this datetime to an instant, treating its fields as being in
    /// the given UTC offset.
    ///
    /// # Errors
    ///
    /// This returns an error when the resulting instant is outside the range
    /// of [`Instant::MIN`] to [`Instant::MAX`]. This can only happen for
    /// datetimes near the minimum or maximum supported dates.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, tz::Offset, Instant};
    ///
    /// let dt = datetime(1970, 1, 1, 5, 30, 0, 0);
    /// let offset = Offset::from_seconds(5 * 60 * 60 + 30 * 60)?;
    /// assert_eq!(dt.to_instant(offset)?, Instant::UNIX_EPOCH);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_instant(self, offset: Offset) -> Result<Instant, Error> {
        let its = self.to_idatetime().to_timestamp(offset.to_ioffset());
        Instant::from_itimestamp(its)
    }

    /// Add the given period to this datetime.
    ///
    /// The components of the period are applied in this order:
    ///
    /// 1. Years and months are added to the date, clamping the day to the
    /// last day of the resulting month when necessary.
    /// 2. Days are added to the date.
    /// 3. Hours, minutes, seconds and nanoseconds are added as a fixed
    /// duration, carrying into days.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is outside the range of
    /// [`DateTime::MIN`] to [`DateTime::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, ToPeriod};
    ///
    /// let dt = datetime(2024, 1, 31, 23, 0, 0, 0);
    /// assert_eq!(
    ///     dt.checked_add(1.month())?,
    ///     datetime(2024, 2, 29, 23, 0, 0, 0),
    /// );
    /// assert_eq!(
    ///     dt.checked_add(2.hours())?,
    ///     datetime(2024, 2, 1, 1, 0, 0, 0),
    /// );
    /// assert_eq!(
    ///     dt.checked_add(1.month().hours(2))?,
    ///     datetime(2024, 3, 1, 1, 0, 0, 0),
    /// );
    /// assert_eq!(
    ///     dt.checked_add(-24.hours())?,
    ///     datetime(2024, 1, 30, 23, 0, 0, 0),
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_add(self, period: Period) -> Result<DateTime, Error> {
        self.checked_add_impl(period).context(E::FailedAddPeriodDateTime)
    }

    /// Subtract the given period from this datetime.
    ///
    /// This is equivalent to adding the negation of `period`.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is outside the range of
    /// [`DateTime::MIN`] to [`DateTime::MAX`].
    #[inline]
    pub fn checked_sub(self, period: Period) -> Result<DateTime, Error> {
        self.checked_add(period.checked_neg()?)
    }

    /// Returns the period from this datetime until the other datetime.
    ///
    /// The period returned uses days as its largest unit. Its hours,
    /// minutes, seconds and nanoseconds are balanced such that each is less
    /// than the next bigger unit. All components have the same sign, which
    /// is negative when `other` is before this datetime.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, ToPeriod};
    ///
    /// let dt1 = datetime(2024, 2, 28, 22, 0, 0, 0);
    /// let dt2 = datetime(2024, 3, 1, 1, 30, 0, 0);
    /// assert_eq!(dt1.until(dt2), 1.day().hours(3).minutes(30));
    /// assert_eq!(dt2.until(dt1), -1.day().hours(3).minutes(30));
    /// ```
    #[inline]
    pub fn until(self, other: DateTime) -> Period {
        let nanos = self.until_nanos(other);
        let day = i128::from(NANOS_PER_CIVIL_DAY);
        let days = nanos / day;
        // The number of days between any two datetimes always fits in an
        // `i64`, as does the remainder.
        let Ok(time) = Period::from_fixed_nanoseconds(Unit::Hour, nanos % day)
        else {
            unreachable!("remainder is less than a day")
        };
        time.days(days as i64)
    }

    /// Returns the period from the other datetime until this datetime.
    ///
    /// This is equivalent to `other.until(self)`.
    #[inline]
    pub fn since(self, other: DateTime) -> Period {
        other.until(self)
    }

    /// Returns the period from this datetime until the other datetime, using
    /// the given unit as the largest unit.
    ///
    /// For [`Unit::Year`] and [`Unit::Month`], the date components are
    /// computed with calendar arithmetic such that adding the result to this
    /// datetime gives `other`. For smaller units, the whole difference is
    /// balanced into the given unit and the units below it.
    ///
    /// # Errors
    ///
    /// This returns an error if the result cannot be represented. This
    /// happens only when requesting nanoseconds as the largest unit for
    /// datetimes more than about 292 years apart.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, ToPeriod, Unit};
    ///
    /// let dt1 = datetime(2024, 1, 31, 12, 0, 0, 0);
    /// let dt2 = datetime(2024, 4, 1, 6, 0, 0, 0);
    /// let p = dt1.until_with_largest_unit(Unit::Month, dt2)?;
    /// assert_eq!(p, 2.months().hours(18));
    /// assert_eq!(dt1.checked_add(p)?, dt2);
    ///
    /// let p = dt1.until_with_largest_unit(Unit::Hour, dt2)?;
    /// assert_eq!(p, 1_458.hours());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn until_with_largest_unit(
        self,
        largest: Unit,
        other: DateTime,
    ) -> Result<Period, Error> {
        match largest {
            Unit::Year | Unit::Month => self.until_calendar(largest, other),
            Unit::Day => Ok(self.until(other)),
            Unit::Hour | Unit::Minute | Unit::Second | Unit::Nanosecond => {
                Period::from_fixed_nanoseconds(
                    largest,
                    self.until_nanos(other),
                )
            }
        }
    }

    /// Returns the period from the other datetime until this datetime, using
    /// the given unit as the largest unit.
    ///
    /// The period returned is the one that, when subtracted from this
    /// datetime, gives `other`.
    ///
    /// # Errors
    ///
    /// This returns an error if the result cannot be represented.
    #[inline]
    pub fn since_with_largest_unit(
        self,
        largest: Unit,
        other: DateTime,
    ) -> Result<Period, Error> {
        self.until_with_largest_unit(largest, other)?.checked_neg()
    }

    /// Returns the number of whole units of the given kind from this
    /// datetime until the other datetime.
    ///
    /// The count is truncated toward zero.
    ///
    /// # Errors
    ///
    /// This returns an error if the count cannot be represented as an `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, Unit};
    ///
    /// let dt1 = datetime(2024, 3, 10, 0, 0, 0, 0);
    /// let dt2 = datetime(2024, 3, 11, 12, 30, 0, 0);
    /// assert_eq!(dt1.count_until(Unit::Day, dt2)?, 1);
    /// assert_eq!(dt1.count_until(Unit::Hour, dt2)?, 36);
    /// assert_eq!(dt1.count_until(Unit::Minute, dt2)?, 2_190);
    /// assert_eq!(dt2.count_until(Unit::Hour, dt1)?, -36);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn count_until(
        self,
        unit: Unit,
        other: DateTime,
    ) -> Result<i64, Error> {
        Ok(self.until_with_largest_unit(unit, other)?.get(unit))
    }
}

/// Internal APIs.
impl DateTime {
    #[inline]
    pub(crate) const fn to_idatetime(self) -> IDateTime {
        IDateTime { date: self.date.to_idate(), time: self.time.to_itime() }
    }

    #[inline]
    pub(crate) const fn from_idatetime(idt: IDateTime) -> DateTime {
        DateTime {
            date: Date::from_idate(idt.date),
            time: Time::from_itime(idt.time),
        }
    }

    fn checked_add_impl(self, period: Period) -> Result<DateTime, Error> {
        let date = self
            .date
            .checked_add_months(period.get_years(), period.get_months())?;
        let nanos = i128::from(self.time.to_nanosecond_of_day())
            + period.fixed_duration_nanoseconds();
        let day = i128::from(NANOS_PER_CIVIL_DAY);
        let carry = nanos.div_euclid(day);
        // OK because `rem_euclid` is always a valid nanosecond of the day.
        let nanosecond = nanos.rem_euclid(day) as i64;
        let date = date
            .checked_add_days_wide(i128::from(period.get_days()) + carry)?;
        let time = Time::from_itime(ITimeNanosecond { nanosecond }.to_time());
        Ok(DateTime { date, time })
    }

    /// Returns the number of nanoseconds from this datetime until the other.
    fn until_nanos(self, other: DateTime) -> i128 {
        let days = i128::from(self.date.until_days(other.date));
        let nanos = i128::from(other.time.to_nanosecond_of_day())
            - i128::from(self.time.to_nanosecond_of_day());
        days * i128::from(NANOS_PER_CIVIL_DAY) + nanos
    }

    /// Computes the difference in years or months (plus days and time) such
    /// that adding the result to `self` gives `other`.
    fn until_calendar(
        self,
        largest: Unit,
        other: DateTime,
    ) -> Result<Period, Error> {
        let mut end = other.date;
        let mut time_nanos = other.time.to_nanosecond_of_day()
            - self.time.to_nanosecond_of_day();
        // The date difference must not overshoot `other`, so borrow a day
        // when the time of day goes in the opposite direction.
        if self < other && time_nanos < 0 {
            end = end.yesterday()?;
            time_nanos += NANOS_PER_CIVIL_DAY;
        } else if self > other && time_nanos > 0 {
            end = end.tomorrow()?;
            time_nanos -= NANOS_PER_CIVIL_DAY;
        }
        let date = self.date.until_with_largest_unit(largest, end)?;
        let nanos = i128::from(time_nanos);
        let time = Period::from_fixed_nanoseconds(Unit::Hour, nanos)?;
        date.checked_add(time)
    }
}

impl core::fmt::Debug for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Writes the datetime in ISO 8601 extended format, e.g.,
/// `2024-02-29T12:30:00`.
impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl From<Date> for DateTime {
    /// Returns the datetime at midnight on the given date.
    #[inline]
    fn from(date: Date) -> DateTime {
        DateTime::from_parts(date, Time::midnight())
    }
}

impl From<DateTime> for Date {
    #[inline]
    fn from(dt: DateTime) -> Date {
        dt.date()
    }
}

impl From<DateTime> for Time {
    #[inline]
    fn from(dt: DateTime) -> Time {
        dt.time()
    }
}

/// Adds a period to a datetime.
///
/// This uses checked arithmetic and panics on overflow. To handle overflow
/// without panics, use [`DateTime::checked_add`].
impl core::ops::Add<Period> for DateTime {
    type Output = DateTime;

    #[inline]
    fn add(self, rhs: Period) -> DateTime {
        self.checked_add(rhs).expect("adding period to datetime overflowed")
    }
}

/// Subtracts a period from a datetime.
///
/// This uses checked arithmetic and panics on overflow. To handle overflow
/// without panics, use [`DateTime::checked_sub`].
impl core::ops::Sub<Period> for DateTime {
    type Output = DateTime;

    #[inline]
    fn sub(self, rhs: Period) -> DateTime {
        self.checked_sub(rhs)
            .expect("subtracting period from datetime overflowed")
    }
}

/// Computes the period between two datetimes, in days and smaller units.
impl core::ops::Sub for DateTime {
    type Output = Period;

    #[inline]
    fn sub(self, rhs: DateTime) -> Period {
        self.since(rhs)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for DateTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> DateTime {
        let date = Date::arbitrary(g);
        let time = Time::arbitrary(g);
        DateTime::from_parts(date, time)
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = DateTime>> {
        alloc::boxed::Box::new(
            (self.date, self.time)
                .shrink()
                .map(|(date, time)| DateTime::from_parts(date, time)),
        )
    }
}
