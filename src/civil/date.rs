use crate::{
    civil::{DateTime, Time, Weekday},
    error::{civil::Error as E, Error, ErrorContext},
    util::itime::{self, IDate, IEpochDay, NANOS_PER_CIVIL_DAY},
    Period, Unit,
};

/// A representation of a civil date in the Gregorian calendar.
///
/// A `Date` value corresponds to a triple of year, month and day. Every
/// `Date` value is guaranteed to be a valid Gregorian calendar date. For
/// example, both `2023-02-29` and `2023-11-31` are invalid and cannot be
/// represented by a `Date`.
///
/// The calendar is proleptic, which means the Gregorian rules are applied
/// to dates before the calendar was introduced. The year `0` exists and
/// corresponds to `1 BCE`. The supported range of years is `-9999..=9999`.
///
/// # Civil dates
///
/// A `Date` value behaves without regard to daylight saving time or time
/// zones in general. When doing arithmetic on dates with periods that
/// contain units of time (such as hours), days are considered to always be
/// precisely `86,400` seconds long.
///
/// # Comparisons
///
/// The `Date` type provides both `Eq` and `Ord` trait implementations.
/// Dates are ordered chronologically, which is the same as ordering them
/// lexicographically by year, month and day.
///
/// ```
/// use anydate::civil::date;
///
/// let d1 = date(2024, 3, 11);
/// let d2 = date(2025, 1, 31);
/// assert!(d1 < d2);
/// ```
///
/// # Arithmetic
///
/// Periods can be added to or subtracted from a date with
/// [`Date::checked_add`]
/// and [`Date::checked_sub`]. The `Add` and `Sub` trait implementations do the
/// same, but panic when the result overflows.
///
/// ```
/// use anydate::{civil::date, ToPeriod};
///
/// let start = date(2024, 2, 25);
/// assert_eq!(start + 7.days(), date(2024, 3, 3));
/// ```
///
/// The period between two dates can be computed with [`Date::until`] or
/// [`Date::since`], or subtracting one date from another:
///
/// ```
/// use anydate::{civil::date, ToPeriod};
///
/// let date1 = date(2024, 3, 3);
/// let date2 = date(2024, 2, 25);
/// assert_eq!(date1 - date2, 7.days());
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Date {
    year: i16,
    month: i8,
    day: i8,
}

impl Date {
    /// The smallest supported year.
    pub(crate) const YEAR_MIN: i16 = -9999;
    /// The largest supported year.
    pub(crate) const YEAR_MAX: i16 = 9999;

    /// The minimum representable Gregorian date.
    ///
    /// The minimum is chosen such that any [`Instant`](crate::Instant)
    /// combined with any valid UTC offset can be infallibly converted to
    /// this type.
    pub const MIN: Date = Date::constant(-9999, 1, 1);

    /// The maximum representable Gregorian date.
    ///
    /// The maximum is chosen such that any [`Instant`](crate::Instant)
    /// combined with any valid UTC offset can be infallibly converted to
    /// this type.
    pub const MAX: Date = Date::constant(9999, 12, 31);

    /// Creates a new `Date` value from its component year, month and day
    /// values.
    ///
    /// # Errors
    ///
    /// This returns an error when the given year-month-day does not
    /// correspond to a valid date. Namely, all of the following must be
    /// true:
    ///
    /// * The year must be in the range `-9999..=9999`.
    /// * The month must be in the range `1..=12`.
    /// * The day must be at least `1` and must be at most the number of days
    /// in the corresponding month. So for example, `2024-02-29` is valid but
    /// `2023-02-29` is not.
    ///
    /// The error identifies the invalid field and its value.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::Date;
    ///
    /// let d = Date::new(2024, 2, 29)?;
    /// assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
    ///
    /// let err = Date::new(2024, 2, 30).unwrap_err();
    /// assert!(err.is_invalid_field());
    /// assert_eq!(err.field(), Some(("day", 30)));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn new(year: i16, month: i8, day: i8) -> Result<Date, Error> {
        if !(Date::YEAR_MIN..=Date::YEAR_MAX).contains(&year) {
            return Err(Error::range(
                "year",
                year,
                Date::YEAR_MIN,
                Date::YEAR_MAX,
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        let max_day = itime::days_in_month(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(Error::range("day", day, 1, max_day));
        }
        Ok(Date { year, month, day })
    }

    /// Creates a new `Date` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This routine panics when [`Date::new`] would return an error.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::Date;
    ///
    /// const LEAP_DAY: Date = Date::constant(2024, 2, 29);
    /// assert_eq!(LEAP_DAY.day(), 29);
    /// ```
    #[inline]
    pub const fn constant(year: i16, month: i8, day: i8) -> Date {
        if year < Date::YEAR_MIN || year > Date::YEAR_MAX {
            panic!("invalid year");
        }
        if month < 1 || month > 12 {
            panic!("invalid month");
        }
        if day < 1 || day > itime::days_in_month(year, month) {
            panic!("invalid day");
        }
        Date { year, month, day }
    }

    /// Returns the date corresponding to the given number of days since
    /// `1970-01-01`.
    ///
    /// # Errors
    ///
    /// This returns an error when the epoch day is outside the range of
    /// [`Date::MIN`] to [`Date::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::{date, Date};
    ///
    /// assert_eq!(Date::from_epoch_day(0)?, date(1970, 1, 1));
    /// assert_eq!(Date::from_epoch_day(19_782)?, date(2024, 2, 29));
    /// assert_eq!(Date::from_epoch_day(-719_528)?, date(0, 1, 1));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn from_epoch_day(epoch_day: i32) -> Result<Date, Error> {
        if !(itime::EPOCH_DAY_MIN..=itime::EPOCH_DAY_MAX).contains(&epoch_day)
        {
            return Err(Error::range(
                "epoch day",
                epoch_day,
                itime::EPOCH_DAY_MIN,
                itime::EPOCH_DAY_MAX,
            ));
        }
        Ok(Date::from_idate(IEpochDay { epoch_day }.to_date()))
    }

    /// Returns the number of days since `1970-01-01` for this date.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::date;
    ///
    /// assert_eq!(date(1970, 1, 1).to_epoch_day(), 0);
    /// assert_eq!(date(1969, 12, 31).to_epoch_day(), -1);
    /// ```
    #[inline]
    pub fn to_epoch_day(self) -> i32 {
        self.to_idate().to_epoch_day().epoch_day
    }

    /// Returns the year for this date.
    ///
    /// The value returned is guaranteed to be in the range `-9999..=9999`.
    #[inline]
    pub fn year(self) -> i16 {
        self.year
    }

    /// Returns the month for this date.
    ///
    /// The value returned is guaranteed to be in the range `1..=12`.
    #[inline]
    pub fn month(self) -> i8 {
        self.month
    }

    /// Returns the day for this date.
    ///
    /// The value returned is guaranteed to be in the range `1..=31`.
    #[inline]
    pub fn day(self) -> i8 {
        self.day
    }

    /// Returns the weekday corresponding to this date.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::{date, Weekday};
    ///
    /// // The Unix epoch was on a Thursday.
    /// assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
    /// assert_eq!(date(2024, 3, 11).weekday(), Weekday::Monday);
    /// ```
    #[inline]
    pub fn weekday(self) -> Weekday {
        let offset = self.to_idate().to_epoch_day().monday_zero_weekday();
        Weekday::from_monday_zero_offset_unchecked(offset)
    }

    /// Returns the ordinal day of the year that this date resides in.
    ///
    /// For leap years, this always returns a value in the range `1..=366`.
    /// Otherwise, the value is in the range `1..=365`.
    #[inline]
    pub fn day_of_year(self) -> i16 {
        self.to_idate().day_of_year()
    }

    /// Returns the total number of days in the month in which this date
    /// resides.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::date;
    ///
    /// assert_eq!(date(2024, 2, 10).days_in_month(), 29);
    /// assert_eq!(date(2023, 2, 10).days_in_month(), 28);
    /// assert_eq!(date(2024, 8, 15).days_in_month(), 31);
    /// ```
    #[inline]
    pub fn days_in_month(self) -> i8 {
        itime::days_in_month(self.year, self.month)
    }

    /// Returns the total number of days in the year in which this date
    /// resides.
    #[inline]
    pub fn days_in_year(self) -> i16 {
        itime::days_in_year(self.year)
    }

    /// Returns true if and only if the year in which this date resides is a
    /// leap year.
    #[inline]
    pub fn in_leap_year(self) -> bool {
        itime::is_leap_year(self.year)
    }

    /// Returns the first date of the month that this date resides in.
    #[inline]
    pub fn first_of_month(self) -> Date {
        Date { day: 1, ..self }
    }

    /// Returns the last date of the month that this date resides in.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::date;
    ///
    /// assert_eq!(date(2024, 2, 5).last_of_month(), date(2024, 2, 29));
    /// assert_eq!(date(2023, 4, 5).last_of_month(), date(2023, 4, 30));
    /// ```
    #[inline]
    pub fn last_of_month(self) -> Date {
        Date { day: self.days_in_month(), ..self }
    }

    /// Returns the date immediately following this one.
    ///
    /// # Errors
    ///
    /// This returns an error when this date is [`Date::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::{date, Date};
    ///
    /// assert_eq!(date(2024, 2, 28).tomorrow()?, date(2024, 2, 29));
    /// assert_eq!(date(2023, 12, 31).tomorrow()?, date(2024, 1, 1));
    /// assert!(Date::MAX.tomorrow().is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn tomorrow(self) -> Result<Date, Error> {
        if self.day < self.days_in_month() {
            return Ok(Date { day: self.day + 1, ..self });
        }
        self.checked_add_days(1)
    }

    /// Returns the date immediately preceding this one.
    ///
    /// # Errors
    ///
    /// This returns an error when this date is [`Date::MIN`].
    #[inline]
    pub fn yesterday(self) -> Result<Date, Error> {
        if self.day > 1 {
            return Ok(Date { day: self.day - 1, ..self });
        }
        self.checked_add_days(-1)
    }

    /// Returns a new date with the year changed.
    ///
    /// # Errors
    ///
    /// This returns an error when the new year is out of range, or when the
    /// day doesn't exist in the new year (February 29 in a non-leap year).
    #[inline]
    pub fn with_year(self, year: i16) -> Result<Date, Error> {
        Date::new(year, self.month, self.day)
    }

    /// Returns a new date with the month changed.
    ///
    /// # Errors
    ///
    /// This returns an error when the new month is out of range, or when the
    /// day doesn't exist in the new month.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::date;
    ///
    /// assert_eq!(date(2024, 1, 31).with_month(3)?, date(2024, 3, 31));
    /// assert!(date(2024, 1, 31).with_month(4).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn with_month(self, month: i8) -> Result<Date, Error> {
        Date::new(self.year, month, self.day)
    }

    /// Returns a new date with the day changed.
    ///
    /// # Errors
    ///
    /// This returns an error when the day doesn't exist in this date's
    /// month.
    #[inline]
    pub fn with_day(self, day: i8) -> Result<Date, Error> {
        Date::new(self.year, self.month, day)
    }

    /// Combines this date with the given time to create a [`DateTime`].
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::{date, time};
    ///
    /// let dt = date(2024, 2, 29).to_datetime(time(12, 30, 0, 0));
    /// assert_eq!(dt.to_string(), "2024-02-29T12:30:00");
    /// ```
    #[inline]
    pub const fn to_datetime(self, time: Time) -> DateTime {
        DateTime::from_parts(self, time)
    }

    /// Combines this date with a time built from the given fields.
    ///
    /// # Panics
    ///
    /// This panics when the time fields are invalid. See
    /// [`Time::constant`].
    #[inline]
    pub const fn at(
        self,
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> DateTime {
        DateTime::from_parts(
            self,
            Time::constant(hour, minute, second, subsec_nanosecond),
        )
    }

    /// Add the given period to this date.
    ///
    /// The components of the period are applied in this order:
    ///
    /// 1. Years and months are added together as a number of months. If the
    /// resulting month has fewer days than this date's day, then the day is
    /// clamped to the last day of that month.
    /// 2. Days, hours, minutes, seconds and nanoseconds are summed into a
    /// single duration, with a day counted as 24 hours. Since a date has no
    /// time, only the whole number of days in that total is added (rounding
    /// toward zero). So `1 day, -1 hour` adds nothing.
    ///
    /// # Properties
    ///
    /// This routine is _not_ reversible in general, because of clamping. For
    /// example, adding `1 month` to `2024-03-31` produces `2024-04-30`, and
    /// subtracting `1 month` from that produces `2024-03-30`.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is outside the range of
    /// [`Date::MIN`] to [`Date::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::date, ToPeriod};
    ///
    /// let d = date(2024, 1, 31);
    /// assert_eq!(d.checked_add(1.month())?, date(2024, 2, 29));
    /// assert_eq!(d.checked_add(2.months())?, date(2024, 3, 31));
    /// assert_eq!(d.checked_add(1.year().months(1))?, date(2025, 2, 28));
    /// assert_eq!(d.checked_add(1.day())?, date(2024, 2, 1));
    /// // Time that doesn't add up to a whole day is ignored.
    /// assert_eq!(d.checked_add(23.hours())?, date(2024, 1, 31));
    /// assert_eq!(d.checked_add(25.hours())?, date(2024, 2, 1));
    ///
    /// assert!(d.checked_add(9000.years()).unwrap_err().is_overflow());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_add(self, period: Period) -> Result<Date, Error> {
        let per_day = i128::from(NANOS_PER_CIVIL_DAY);
        let total = i128::from(period.get_days()) * per_day
            + period.fixed_duration_nanoseconds();
        // Division truncates toward zero.
        let days = total / per_day;
        self.checked_add_months(period.get_years(), period.get_months())
            .and_then(|date| date.checked_add_days_wide(days))
            .context(E::FailedAddPeriodDate)
    }

    /// Subtract the given period from this date.
    ///
    /// This is equivalent to adding the negation of `period`.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is outside the range of
    /// [`Date::MIN`] to [`Date::MAX`], or when negating the period
    /// overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::date, ToPeriod};
    ///
    /// let d = date(2024, 3, 31);
    /// assert_eq!(d.checked_sub(1.month())?, date(2024, 2, 29));
    /// assert_eq!(d.checked_sub(-1.month())?, date(2024, 4, 30));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_sub(self, period: Period) -> Result<Date, Error> {
        self.checked_add(period.checked_neg()?)
    }

    /// Returns the period from this date until the other date, in units of
    /// days.
    ///
    /// When `other` is before this date, the period returned is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::date, ToPeriod};
    ///
    /// let earlier = date(2019, 1, 31);
    /// let later = date(2021, 9, 20);
    /// assert_eq!(earlier.until(later), 963.days());
    /// assert_eq!(later.until(earlier), -963.days());
    /// ```
    #[inline]
    pub fn until(self, other: Date) -> Period {
        Period::new().days(self.until_days(other))
    }

    /// Returns the period from the other date until this date, in units of
    /// days.
    ///
    /// This is equivalent to `other.until(self)`.
    #[inline]
    pub fn since(self, other: Date) -> Period {
        Period::new().days(other.until_days(self))
    }

    /// Returns the period from this date until the other date, using the
    /// given unit as the largest unit.
    ///
    /// For [`Unit::Day`], this is the same as [`Date::until`]. For
    /// [`Unit::Month`] and [`Unit::Year`], the result is balanced so that
    /// adding it to this date (with [`Date::checked_add`]) gives `other`.
    ///
    /// # Errors
    ///
    /// This returns an error when the largest unit is smaller than days,
    /// since dates have no time.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::date, ToPeriod, Unit};
    ///
    /// let d1 = date(2019, 2, 22);
    /// let d2 = date(2023, 4, 15);
    /// let p = d1.until_with_largest_unit(Unit::Year, d2)?;
    /// assert_eq!(p, 4.years().months(1).days(24));
    /// assert_eq!(d1.checked_add(p)?, d2);
    ///
    /// let p = d1.until_with_largest_unit(Unit::Month, d2)?;
    /// assert_eq!(p, 49.months().days(24));
    ///
    /// let p = d2.until_with_largest_unit(Unit::Month, d1)?;
    /// assert_eq!(p, -49.months().days(21));
    /// assert_eq!(d2.checked_add(p)?, d1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn until_with_largest_unit(
        self,
        largest: Unit,
        other: Date,
    ) -> Result<Period, Error> {
        match largest {
            Unit::Year | Unit::Month => {
                Ok(self.until_calendar(largest, other))
            }
            Unit::Day => Ok(self.until(other)),
            Unit::Hour | Unit::Minute | Unit::Second | Unit::Nanosecond => {
                Err(Error::from(E::LargestUnitTooSmall {
                    what: "dates",
                    unit: largest,
                }))
            }
        }
    }

    /// Returns the period from the other date until this date, using the
    /// given unit as the largest unit.
    ///
    /// The period returned is the one that, when subtracted from this date,
    /// gives `other`. This is the negation of
    /// `self.until_with_largest_unit(largest, other)`. Because of clamping,
    /// this is not necessarily the same as
    /// `other.until_with_largest_unit(largest, self)`.
    ///
    /// # Errors
    ///
    /// This returns an error when the largest unit is smaller than days.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::date, ToPeriod, Unit};
    ///
    /// let d1 = date(2020, 4, 30);
    /// let d2 = date(2020, 2, 29);
    /// assert_eq!(d1.since_with_largest_unit(Unit::Month, d2)?, 2.months());
    /// assert_eq!(
    ///     d2.until_with_largest_unit(Unit::Month, d1)?,
    ///     2.months().days(1),
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn since_with_largest_unit(
        self,
        largest: Unit,
        other: Date,
    ) -> Result<Period, Error> {
        self.until_with_largest_unit(largest, other)?.checked_neg()
    }

    /// Returns the number of whole units of the given kind from this date
    /// until the other date.
    ///
    /// The count is truncated toward zero and is negative when `other` is
    /// before this date.
    ///
    /// # Errors
    ///
    /// This returns an error when the unit is smaller than days.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::date, Unit};
    ///
    /// let d1 = date(2024, 1, 31);
    /// let d2 = date(2025, 1, 30);
    /// assert_eq!(d1.count_until(Unit::Year, d2)?, 0);
    /// assert_eq!(d1.count_until(Unit::Month, d2)?, 11);
    /// assert_eq!(d1.count_until(Unit::Day, d2)?, 365);
    /// assert_eq!(d2.count_until(Unit::Month, d1)?, -11);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn count_until(self, unit: Unit, other: Date) -> Result<i64, Error> {
        Ok(self.until_with_largest_unit(unit, other)?.get(unit))
    }
}

/// Internal APIs.
impl Date {
    #[inline]
    pub(crate) const fn to_idate(self) -> IDate {
        IDate { year: self.year, month: self.month, day: self.day }
    }

    #[inline]
    pub(crate) const fn from_idate(idate: IDate) -> Date {
        Date { year: idate.year, month: idate.month, day: idate.day }
    }

    /// Adds the given number of years and months to this date, clamping the
    /// day to the last day of the resulting month.
    pub(crate) fn checked_add_months(
        self,
        years: i64,
        months: i64,
    ) -> Result<Date, Error> {
        if years == 0 && months == 0 {
            return Ok(self);
        }
        let total = i128::from(years) * 12 + i128::from(months);
        let start = i128::from(self.year) * 12 + i128::from(self.month - 1);
        let target = start + total;
        let year = target.div_euclid(12);
        if !(i128::from(Date::YEAR_MIN)..=i128::from(Date::YEAR_MAX))
            .contains(&year)
        {
            return Err(Error::overflow("years"));
        }
        // Both casts are OK because of the range check above and because
        // `rem_euclid(12)` is always in `0..=11`.
        let year = year as i16;
        let month = (target.rem_euclid(12) + 1) as i8;
        let day = self.day.min(itime::days_in_month(year, month));
        Ok(Date { year, month, day })
    }

    /// Adds the given number of days to this date.
    pub(crate) fn checked_add_days(self, days: i64) -> Result<Date, Error> {
        self.checked_add_days_wide(i128::from(days))
    }

    /// Like `checked_add_days`, but accepts sums of day counts that may not
    /// fit in an `i64`.
    pub(crate) fn checked_add_days_wide(
        self,
        days: i128,
    ) -> Result<Date, Error> {
        if days == 0 {
            return Ok(self);
        }
        let epoch_day = i128::from(self.to_epoch_day()) + days;
        if !(i128::from(itime::EPOCH_DAY_MIN)
            ..=i128::from(itime::EPOCH_DAY_MAX))
            .contains(&epoch_day)
        {
            return Err(Error::overflow("days"));
        }
        // OK because of the range check above.
        let epoch_day = epoch_day as i32;
        Ok(Date::from_idate(IEpochDay { epoch_day }.to_date()))
    }

    /// Returns the number of days from this date until the other date.
    #[inline]
    pub(crate) fn until_days(self, other: Date) -> i64 {
        i64::from(other.to_epoch_day()) - i64::from(self.to_epoch_day())
    }

    /// Computes the difference between two dates in years, months and days,
    /// such that adding the result to `self` gives `other`.
    ///
    /// When `largest` is `Unit::Month`, years are folded into months.
    fn until_calendar(self, largest: Unit, other: Date) -> Period {
        debug_assert!(largest >= Unit::Month);

        let (year0, month0, day0) =
            (i32::from(self.year), i32::from(self.month), i32::from(self.day));
        let (mut year1, mut month1, day1) = (
            i32::from(other.year),
            i32::from(other.month),
            i32::from(other.day),
        );

        let mut years = year1 - year0;
        let mut months = month1 - month0;
        let mut days = day1 - day0;
        if years != 0 || months != 0 {
            let sign =
                if years != 0 { years.signum() } else { months.signum() };
            let mut days_in_month1 = month_length(year1, month1);
            let mut day_correct = 0;
            if days.signum() == -sign {
                let original_days_in_month1 = days_in_month1;
                (year1, month1) = month_add_one(year1, month1, -sign);
                years = year1 - year0;
                months = month1 - month0;
                days_in_month1 = month_length(year1, month1);
                day_correct = if sign < 0 {
                    -original_days_in_month1
                } else {
                    days_in_month1
                };
            }

            let day0_trunc = day0.min(days_in_month1);
            days = day1 - day0_trunc + day_correct;

            if years != 0 {
                months = month1 - month0;
                if months.signum() == -sign {
                    let month_correct = if sign < 0 { -12 } else { 12 };
                    year1 -= sign;
                    years = year1 - year0;
                    months = month1 - month0 + month_correct;
                }
            }
        }
        if largest == Unit::Month && years != 0 {
            months += years * 12;
            years = 0;
        }
        Period::new().years(years).months(months).days(days)
    }
}

/// Returns the length of the given month. The year may be one past the
/// supported range.
fn month_length(year: i32, month: i32) -> i32 {
    // OK because callers only ever pass years within one of the supported
    // range and valid months.
    i32::from(itime::days_in_month(year as i16, month as i8))
}

/// Moves the given year-month one month forward or backward, depending on
/// the sign of `delta`.
fn month_add_one(year: i32, month: i32, delta: i32) -> (i32, i32) {
    debug_assert!(delta == -1 || delta == 1);
    let month = month + delta;
    if month < 1 {
        (year - 1, 12)
    } else if month > 12 {
        (year + 1, 1)
    } else {
        (year, month)
    }
}

impl Default for Date {
    /// Returns the Unix epoch, `1970-01-01`.
    fn default() -> Date {
        Date::constant(1970, 1, 1)
    }
}

impl core::fmt::Debug for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Writes the date in ISO 8601 extended format, e.g., `2024-02-29`.
///
/// Negative years are written with a leading minus sign and at least four
/// digits, e.g., `-0044-03-15`.
impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

/// Adds a period to a date.
///
/// This uses checked arithmetic and panics on overflow. To handle overflow
/// without panics, use [`Date::checked_add`].
impl core::ops::Add<Period> for Date {
    type Output = Date;

    #[inline]
    fn add(self, rhs: Period) -> Date {
        self.checked_add(rhs).expect("adding period to date overflowed")
    }
}

/// Subtracts a period from a date.
///
/// This uses checked arithmetic and panics on overflow. To handle overflow
/// without panics, use [`Date::checked_sub`].
impl core::ops::Sub<Period> for Date {
    type Output = Date;

    #[inline]
    fn sub(self, rhs: Period) -> Date {
        self.checked_sub(rhs)
            .expect("subtracting period from date overflowed")
    }
}

/// Computes the period between two dates, in days.
///
/// This returns a negative period when the date being subtracted is
/// greater.
impl core::ops::Sub for Date {
    type Output = Period;

    #[inline]
    fn sub(self, rhs: Date) -> Period {
        self.since(rhs)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Date {
    fn arbitrary(g: &mut quickcheck::Gen) -> Date {
        let year = i16::arbitrary(g).rem_euclid(Date::YEAR_MAX + 1);
        let year = if bool::arbitrary(g) { year } else { -year };
        let month = i8::arbitrary(g).rem_euclid(12) + 1;
        let day = i8::arbitrary(g).rem_euclid(31) + 1;
        let day = day.min(itime::days_in_month(year, month));
        Date { year, month, day }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Date>> {
        alloc::boxed::Box::new(
            (self.year, self.month, self.day).shrink().filter_map(
                |(year, month, day)| Date::new(year, month, day).ok(),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::{civil::date, ToPeriod};

    use super::*;

    #[test]
    fn invalid_fields_name_the_field() {
        let err = Date::new(2024, 2, 30).unwrap_err();
        assert!(err.is_invalid_field());
        assert_eq!(err.field(), Some(("day", 30)));
        assert_eq!(
            err.to_string(),
            "parameter 'day' with value 30 is not in the required range \
             of 1..=29",
        );

        let err = Date::new(2024, 13, 1).unwrap_err();
        assert_eq!(err.field(), Some(("month", 13)));
        let err = Date::new(2024, 4, 31).unwrap_err();
        assert_eq!(err.field(), Some(("day", 31)));
        assert_eq!(
            Date::new(10_000, 1, 1).unwrap_err().field(),
            Some(("year", 10_000)),
        );
        assert!(Date::new(2023, 2, 29).is_err());
        assert!(Date::new(2024, 2, 29).is_ok());
    }

    #[test]
    fn end_of_month_clamp() {
        let d = date(2024, 1, 31);
        assert_eq!(d.checked_add(1.month()).unwrap(), date(2024, 2, 29));
        assert_eq!(d.checked_add(13.months()).unwrap(), date(2025, 2, 28));
        assert_eq!(d.checked_add(-2.months()).unwrap(), date(2023, 11, 30));

        let d = date(2023, 3, 31);
        assert_eq!(
            d.checked_add(1.month().days(1)).unwrap(),
            date(2023, 5, 1),
        );
    }

    #[test]
    fn month_carry_into_year() {
        let d = date(2024, 11, 15);
        assert_eq!(d.checked_add(2.months()).unwrap(), date(2025, 1, 15));
        assert_eq!(d.checked_add(-11.months()).unwrap(), date(2023, 12, 15));
        assert_eq!(
            d.checked_add(1.year().months(-12)).unwrap(),
            date(2024, 11, 15),
        );
    }

    #[test]
    fn days_cross_boundaries() {
        let d = date(2023, 12, 31);
        assert_eq!(d.checked_add(1.day()).unwrap(), date(2024, 1, 1));
        assert_eq!(d.checked_add(60.days()).unwrap(), date(2024, 2, 29));
        assert_eq!(d.checked_add(-365.days()).unwrap(), date(2022, 12, 31));
    }

    #[test]
    fn time_units_truncate_toward_zero() {
        let d = date(2024, 3, 31);
        assert_eq!(d.checked_add(23.hours()).unwrap(), d);
        assert_eq!(d.checked_add(28.hours()).unwrap(), date(2024, 4, 1));
        assert_eq!(d.checked_add(-23.hours()).unwrap(), d);
        assert_eq!(d.checked_add(-25.hours()).unwrap(), date(2024, 3, 30));
        assert_eq!(d.checked_add(1.day().hours(-1)).unwrap(), d);
        assert_eq!(d.checked_sub(1.day().hours(-1)).unwrap(), d);
        assert_eq!(
            d.checked_add(-2.days().hours(1)).unwrap(),
            date(2024, 3, 29),
        );
        assert_eq!(
            d.checked_add(1.month().days(1).hours(-1)).unwrap(),
            date(2024, 4, 30),
        );
    }

    #[test]
    fn overflow() {
        assert!(Date::MAX.checked_add(1.day()).unwrap_err().is_overflow());
        assert!(Date::MIN.checked_sub(1.day()).unwrap_err().is_overflow());
        assert!(Date::MAX.checked_add(1.month()).unwrap_err().is_overflow());
        assert!(date(2024, 1, 1)
            .checked_add(Period::new().days(i64::MAX).hours(i64::MAX))
            .unwrap_err()
            .is_overflow());
        assert!(date(2024, 1, 1)
            .checked_add(Period::new().years(i64::MAX).months(i64::MAX))
            .is_err());
        assert_eq!(
            Date::MAX.checked_add(1.day()).unwrap_err().to_string(),
            "failed to add period to date: \
             value for 'days' overflowed the supported range",
        );
    }

    #[test]
    fn tomorrow_yesterday() {
        assert_eq!(date(2024, 2, 29).tomorrow().unwrap(), date(2024, 3, 1));
        assert_eq!(date(2024, 3, 1).yesterday().unwrap(), date(2024, 2, 29));
        assert_eq!(date(2024, 1, 1).yesterday().unwrap(), date(2023, 12, 31));
        assert!(Date::MIN.yesterday().is_err());
        assert!(Date::MAX.tomorrow().is_err());
    }

    #[test]
    fn until_years() {
        let d1 = date(2019, 2, 22);
        let d2 = date(2023, 4, 15);
        let p = d2.since_with_largest_unit(Unit::Year, d1).unwrap();
        assert_eq!(p, 4.years().months(1).days(21));
        let p = d1.since_with_largest_unit(Unit::Year, d2).unwrap();
        assert_eq!(p, -4.years().months(1).days(24));

        let d1 = date(-9999, 1, 1);
        let d2 = date(9999, 12, 31);
        let p = d1.until_with_largest_unit(Unit::Year, d2).unwrap();
        assert_eq!(p, 19998.years().months(11).days(30));
        assert_eq!(d1.checked_add(p).unwrap(), d2);
    }

    #[test]
    fn until_months() {
        let d1 = date(2024, 2, 22);
        let d2 = date(2024, 7, 15);
        let p = d1.until_with_largest_unit(Unit::Month, d2).unwrap();
        assert_eq!(p, 4.months().days(23));
        assert_eq!(d1.checked_add(p).unwrap(), d2);
        let p = d2.until_with_largest_unit(Unit::Month, d1).unwrap();
        assert_eq!(p, -4.months().days(22));
        assert_eq!(d2.checked_add(p).unwrap(), d1);

        let d1 = date(2024, 1, 31);
        let d2 = date(2024, 2, 29);
        let p = d1.until_with_largest_unit(Unit::Month, d2).unwrap();
        assert_eq!(p, 29.days());
        assert_eq!(d1.checked_add(p).unwrap(), d2);
    }

    #[test]
    fn until_month_lengths() {
        let jan1 = date(2020, 1, 1);
        let feb1 = date(2020, 2, 1);
        let mar1 = date(2020, 3, 1);

        assert_eq!(jan1.until(feb1), 31.days());
        assert_eq!(
            jan1.until_with_largest_unit(Unit::Month, feb1).unwrap(),
            1.month(),
        );
        assert_eq!(feb1.until(mar1), 29.days());
        assert_eq!(jan1.until(mar1), 60.days());
        assert_eq!(
            jan1.until_with_largest_unit(Unit::Month, mar1).unwrap(),
            2.months(),
        );
    }

    #[test]
    fn until_rejects_time_units() {
        let d = date(2024, 1, 1);
        for unit in [Unit::Hour, Unit::Minute, Unit::Second, Unit::Nanosecond]
        {
            let err = d.until_with_largest_unit(unit, d).unwrap_err();
            assert!(err.is_invalid_parameter(), "unit {unit:?}");
            assert!(d.count_until(unit, d).is_err());
        }
    }

    #[test]
    fn display() {
        assert_eq!(date(2024, 2, 29).to_string(), "2024-02-29");
        assert_eq!(date(5, 1, 9).to_string(), "0005-01-09");
        assert_eq!(date(-44, 3, 15).to_string(), "-0044-03-15");
        assert_eq!(alloc::format!("{:?}", date(-9999, 1, 1)), "-9999-01-01");
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(date(2024, 1, 31) < date(2024, 2, 1));
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
        assert!(date(-1, 12, 31) < date(0, 1, 1));
        assert_eq!(date(2024, 2, 29), Date::new(2024, 2, 29).unwrap());
    }

    #[test]
    fn date_size() {
        assert_eq!(4, core::mem::size_of::<Date>());
    }

    quickcheck::quickcheck! {
        fn prop_epoch_day_roundtrip(d: Date) -> bool {
            Date::from_epoch_day(d.to_epoch_day()).unwrap() == d
        }

        fn prop_ordering_matches_epoch_day(d1: Date, d2: Date) -> bool {
            d1.cmp(&d2) == d1.to_epoch_day().cmp(&d2.to_epoch_day())
        }

        fn prop_until_then_add(d1: Date, d2: Date) -> bool {
            d1.checked_add(d1.until(d2)).unwrap() == d2
        }

        fn prop_since_then_sub(d1: Date, d2: Date) -> bool {
            d1.checked_sub(d1.since(d2)).unwrap() == d2
        }

        fn prop_until_months_then_add(d1: Date, d2: Date) -> bool {
            let p = d1.until_with_largest_unit(Unit::Month, d2).unwrap();
            d1.checked_add(p).unwrap() == d2
        }

        fn prop_until_years_then_add(d1: Date, d2: Date) -> bool {
            let p = d1.until_with_largest_unit(Unit::Year, d2).unwrap();
            d1.checked_add(p).unwrap() == d2
        }

        fn prop_days_add_then_sub(
            d1: Date,
            days: i32
        ) -> quickcheck::TestResult {
            let p = i64::from(days).days();
            let Ok(d2) = d1.checked_add(p) else {
                return quickcheck::TestResult::discard();
            };
            let back = d2.checked_sub(p).unwrap();
            quickcheck::TestResult::from_bool(back == d1)
        }
    }
}
