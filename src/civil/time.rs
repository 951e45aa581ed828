use crate::{
    error::{civil::Error as E, Error, ErrorContext},
    util::itime::{ITime, ITimeNanosecond, NANOS_PER_CIVIL_DAY},
    Period, Unit,
};

/// A representation of civil "wall clock" time.
///
/// Conceptually, a `Time` value corresponds to the typical hours and minutes
/// that you might see on a clock. This type also contains the second and
/// fractional subsecond (to nanosecond precision) associated with a time.
///
/// # Civil time
///
/// A `Time` value behaves as if it corresponds precisely to a single
/// nanosecond within a day, where all days have `86,400` seconds. That is,
/// any given `Time` value corresponds to a nanosecond in the inclusive range
/// `[0, 86399999999999]`, where `0` corresponds to `00:00:00.000000000`
/// ([`Time::MIN`]) and `86399999999999` corresponds to `23:59:59.999999999`
/// ([`Time::MAX`]). There is no representation of `24:00:00`.
///
/// # Arithmetic
///
/// Since a time has no date, adding a period to a time may carry over into
/// a day that the time cannot represent. Two flavors of arithmetic are
/// provided:
///
/// * [`Time::wrapping_add`] discards the carry, so that `23:00 + 2 hours`
/// is `01:00`.
/// * [`Time::checked_add`] returns an error if the result would cross
/// midnight in either direction.
///
/// In both cases, only the hours, minutes, seconds and nanoseconds of a
/// [`Period`] are used. The calendar units (years, months and days) of a
/// period are ignored.
///
/// ```
/// use anydate::{civil::time, ToPeriod};
///
/// let t = time(23, 0, 0, 0);
/// assert_eq!(t.wrapping_add(2.hours()), time(1, 0, 0, 0));
/// assert!(t.checked_add(2.hours()).is_err());
/// assert_eq!(t.checked_add(59.minutes())?, time(23, 59, 0, 0));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Time {
    hour: i8,
    minute: i8,
    second: i8,
    subsec_nanosecond: i32,
}

impl Time {
    /// The minimum representable time value.
    ///
    /// This corresponds to `00:00:00.000000000`.
    pub const MIN: Time = Time::midnight();

    /// The maximum representable time value.
    ///
    /// This corresponds to `23:59:59.999999999`.
    pub const MAX: Time = Time::constant(23, 59, 59, 999_999_999);

    /// Creates a new `Time` value from its component hour, minute and
    /// second values. The subsecond component is set to zero.
    ///
    /// # Errors
    ///
    /// This returns an error when any component is out of range. The error
    /// identifies the invalid field and its value. The valid ranges are:
    ///
    /// * `0..=23` for hours.
    /// * `0..=59` for minutes.
    /// * `0..=59` for seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::Time;
    ///
    /// let t = Time::new(13, 30, 5)?;
    /// assert_eq!((t.hour(), t.minute(), t.second()), (13, 30, 5));
    ///
    /// let err = Time::new(24, 0, 0).unwrap_err();
    /// assert_eq!(err.field(), Some(("hour", 24)));
    /// let err = Time::new(0, 60, 0).unwrap_err();
    /// assert_eq!(err.field(), Some(("minute", 60)));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn new(hour: i8, minute: i8, second: i8) -> Result<Time, Error> {
        Time::new_with_nanosecond(hour, minute, second, 0)
    }

    /// Creates a new `Time` value from its component hour, minute, second
    /// and fractional subsecond (up to nanosecond precision) values.
    ///
    /// # Errors
    ///
    /// This returns an error when any component is out of range. The
    /// subsecond component must be in the range `0..=999_999_999`.
    #[inline]
    pub fn new_with_nanosecond(
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> Result<Time, Error> {
        if !(0..=23).contains(&hour) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::range("second", second, 0, 59));
        }
        if !(0..=999_999_999).contains(&subsec_nanosecond) {
            return Err(Error::range(
                "subsecond nanosecond",
                subsec_nanosecond,
                0,
                999_999_999,
            ));
        }
        Ok(Time { hour, minute, second, subsec_nanosecond })
    }

    /// Creates a new `Time` value in a `const` context.
    ///
    /// # Panics
    ///
    /// This panics when [`Time::new_with_nanosecond`] would return an error.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::Time;
    ///
    /// const NOON: Time = Time::constant(12, 0, 0, 0);
    /// assert_eq!(NOON.hour(), 12);
    /// ```
    #[inline]
    pub const fn constant(
        hour: i8,
        minute: i8,
        second: i8,
        subsec_nanosecond: i32,
    ) -> Time {
        if hour < 0 || hour > 23 {
            panic!("invalid hour");
        }
        if minute < 0 || minute > 59 {
            panic!("invalid minute");
        }
        if second < 0 || second > 59 {
            panic!("invalid second");
        }
        if subsec_nanosecond < 0 || subsec_nanosecond > 999_999_999 {
            panic!("invalid nanosecond");
        }
        Time { hour, minute, second, subsec_nanosecond }
    }

    /// Returns the first moment of the day, `00:00:00`.
    #[inline]
    pub const fn midnight() -> Time {
        Time { hour: 0, minute: 0, second: 0, subsec_nanosecond: 0 }
    }

    /// Returns the hour component of this time.
    #[inline]
    pub fn hour(self) -> i8 {
        self.hour
    }

    /// Returns the minute component of this time.
    #[inline]
    pub fn minute(self) -> i8 {
        self.minute
    }

    /// Returns the second component of this time.
    #[inline]
    pub fn second(self) -> i8 {
        self.second
    }

    /// Returns the fractional nanosecond for this time.
    ///
    /// The value returned is always in the range `0..=999_999_999`.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.subsec_nanosecond
    }

    /// Returns the number of nanoseconds since midnight.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::{time, Time};
    ///
    /// assert_eq!(Time::MIN.to_nanosecond_of_day(), 0);
    /// assert_eq!(time(0, 0, 1, 5).to_nanosecond_of_day(), 1_000_000_005);
    /// assert_eq!(Time::MAX.to_nanosecond_of_day(), 86_399_999_999_999);
    /// ```
    #[inline]
    pub fn to_nanosecond_of_day(self) -> i64 {
        self.to_itime().to_nanosecond().nanosecond
    }

    /// Returns the time corresponding to the given number of nanoseconds
    /// since midnight.
    ///
    /// # Errors
    ///
    /// This returns an error when the value is not in the range
    /// `0..=86_399_999_999_999`.
    #[inline]
    pub fn from_nanosecond_of_day(nanosecond: i64) -> Result<Time, Error> {
        if !(0..NANOS_PER_CIVIL_DAY).contains(&nanosecond) {
            return Err(Error::range(
                "nanosecond of day",
                nanosecond,
                0,
                NANOS_PER_CIVIL_DAY - 1,
            ));
        }
        Ok(Time::from_itime(ITimeNanosecond { nanosecond }.to_time()))
    }

    /// Adds the given period to this time, wrapping around on overflow.
    ///
    /// Only the fixed length units of the period (hours, minutes, seconds
    /// and nanoseconds) are used. Any carry into days is discarded.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::time, ToPeriod};
    ///
    /// let t = time(20, 10, 1, 0);
    /// assert_eq!(t.wrapping_add(4.hours()), time(0, 10, 1, 0));
    /// assert_eq!(t.wrapping_add(-21.hours()), time(23, 10, 1, 0));
    /// assert_eq!(t.wrapping_add(1.day()), t);
    /// ```
    #[inline]
    pub fn wrapping_add(self, period: Period) -> Time {
        let nanos = i128::from(self.to_nanosecond_of_day())
            + period.fixed_duration_nanoseconds();
        let nanosecond =
            nanos.rem_euclid(i128::from(NANOS_PER_CIVIL_DAY)) as i64;
        // OK because `rem_euclid` guarantees a valid nanosecond of the day.
        Time::from_itime(ITimeNanosecond { nanosecond }.to_time())
    }

    /// Subtracts the given period from this time, wrapping around on
    /// overflow.
    #[inline]
    pub fn wrapping_sub(self, period: Period) -> Time {
        let nanos = i128::from(self.to_nanosecond_of_day())
            - period.fixed_duration_nanoseconds();
        let nanosecond =
            nanos.rem_euclid(i128::from(NANOS_PER_CIVIL_DAY)) as i64;
        Time::from_itime(ITimeNanosecond { nanosecond }.to_time())
    }

    /// Adds the given period to this time.
    ///
    /// Only the fixed length units of the period (hours, minutes, seconds
    /// and nanoseconds) are used.
    ///
    /// # Errors
    ///
    /// This returns an error when the result would cross midnight in either
    /// direction. Use [`Time::wrapping_add`] to discard the carry instead.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::time, ToPeriod};
    ///
    /// let t = time(23, 30, 0, 0);
    /// assert_eq!(t.checked_add(29.minutes())?, time(23, 59, 0, 0));
    /// assert!(t.checked_add(30.minutes()).is_err());
    /// assert!(t.checked_add(-24.hours()).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_add(self, period: Period) -> Result<Time, Error> {
        let nanos = i128::from(self.to_nanosecond_of_day())
            + period.fixed_duration_nanoseconds();
        self.from_checked_nanos(nanos)
    }

    /// Subtracts the given period from this time.
    ///
    /// # Errors
    ///
    /// This returns an error when the result would cross midnight in either
    /// direction.
    #[inline]
    pub fn checked_sub(self, period: Period) -> Result<Time, Error> {
        let nanos = i128::from(self.to_nanosecond_of_day())
            - period.fixed_duration_nanoseconds();
        self.from_checked_nanos(nanos)
    }

    /// Returns the period from this time until the other time.
    ///
    /// The period returned uses hours as its largest unit, and is negative
    /// when `other` is before this time.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::time, ToPeriod};
    ///
    /// let t1 = time(22, 35, 1, 0);
    /// let t2 = time(22, 35, 3, 500_000_000);
    /// assert_eq!(t1.until(t2), 2.seconds().nanoseconds(500_000_000));
    /// assert_eq!(t2.until(t1), -2.seconds().nanoseconds(500_000_000));
    /// let p = time(1, 0, 0, 0).until(time(3, 15, 0, 0));
    /// assert_eq!(p, 2.hours().minutes(15));
    /// ```
    #[inline]
    pub fn until(self, other: Time) -> Period {
        self.until_nanos(Unit::Hour, other)
    }

    /// Returns the period from the other time until this time.
    ///
    /// This is equivalent to `other.until(self)`.
    #[inline]
    pub fn since(self, other: Time) -> Period {
        other.until(self)
    }

    /// Returns the period from this time until the other time, using the
    /// given unit as the largest unit.
    ///
    /// # Errors
    ///
    /// This returns an error when the largest unit is days or bigger, since
    /// the difference between two times is always less than a day.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::time, ToPeriod, Unit};
    ///
    /// let t1 = time(1, 0, 0, 0);
    /// let t2 = time(3, 15, 0, 0);
    /// let p = t1.until_with_largest_unit(Unit::Minute, t2)?;
    /// assert_eq!(p, 135.minutes());
    /// let p = t1.until_with_largest_unit(Unit::Second, t2)?;
    /// assert_eq!(p, 8_100.seconds());
    /// assert!(t1.until_with_largest_unit(Unit::Day, t2).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn until_with_largest_unit(
        self,
        largest: Unit,
        other: Time,
    ) -> Result<Period, Error> {
        if largest.is_calendar() {
            return Err(Error::from(E::LargestUnitTooBig {
                what: "times",
                unit: largest,
            }));
        }
        Ok(self.until_nanos(largest, other))
    }

    /// Returns the number of whole units of the given kind from this time
    /// until the other time.
    ///
    /// The count is truncated toward zero.
    ///
    /// # Errors
    ///
    /// This returns an error when the unit is days or bigger.
    #[inline]
    pub fn count_until(self, unit: Unit, other: Time) -> Result<i64, Error> {
        Ok(self.until_with_largest_unit(unit, other)?.get(unit))
    }
}

/// Internal APIs.
impl Time {
    #[inline]
    pub(crate) const fn to_itime(self) -> ITime {
        ITime {
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            subsec_nanosecond: self.subsec_nanosecond,
        }
    }

    #[inline]
    pub(crate) const fn from_itime(itime: ITime) -> Time {
        Time {
            hour: itime.hour,
            minute: itime.minute,
            second: itime.second,
            subsec_nanosecond: itime.subsec_nanosecond,
        }
    }

    fn from_checked_nanos(self, nanos: i128) -> Result<Time, Error> {
        if !(0..i128::from(NANOS_PER_CIVIL_DAY)).contains(&nanos) {
            return Err(Error::from(E::TimeCrossesMidnight))
                .context(E::FailedAddPeriodTime);
        }
        // OK because of the range check above.
        let nanosecond = nanos as i64;
        Ok(Time::from_itime(ITimeNanosecond { nanosecond }.to_time()))
    }

    fn until_nanos(self, largest: Unit, other: Time) -> Period {
        let nanos = other.to_nanosecond_of_day() - self.to_nanosecond_of_day();
        // The difference is always less than a day, so balancing it into
        // any fixed unit fits in an `i64`.
        match Period::from_fixed_nanoseconds(largest, i128::from(nanos)) {
            Ok(period) => period,
            Err(_) => unreachable!("difference between times fits"),
        }
    }
}

impl core::fmt::Debug for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Writes the time in ISO 8601 extended format, e.g., `12:30:00`.
///
/// A non-zero fractional second is written with trailing zeros removed,
/// e.g., `12:30:00.5`.
impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.subsec_nanosecond != 0 {
            let mut digits = self.subsec_nanosecond;
            let mut width = 9;
            while digits % 10 == 0 {
                digits /= 10;
                width -= 1;
            }
            write!(f, ".{digits:0width$}")?;
        }
        Ok(())
    }
}

/// Adds a period to a time, wrapping around on overflow.
///
/// This uses [`Time::wrapping_add`].
impl core::ops::Add<Period> for Time {
    type Output = Time;

    #[inline]
    fn add(self, rhs: Period) -> Time {
        self.wrapping_add(rhs)
    }
}

/// Subtracts a period from a time, wrapping around on overflow.
///
/// This uses [`Time::wrapping_sub`].
impl core::ops::Sub<Period> for Time {
    type Output = Time;

    #[inline]
    fn sub(self, rhs: Period) -> Time {
        self.wrapping_sub(rhs)
    }
}

/// Computes the period between two times.
impl core::ops::Sub for Time {
    type Output = Period;

    #[inline]
    fn sub(self, rhs: Time) -> Period {
        self.since(rhs)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Time {
    fn arbitrary(g: &mut quickcheck::Gen) -> Time {
        let hour = i8::arbitrary(g).rem_euclid(24);
        let minute = i8::arbitrary(g).rem_euclid(60);
        let second = i8::arbitrary(g).rem_euclid(60);
        let subsec_nanosecond = i32::arbitrary(g).rem_euclid(1_000_000_000);
        Time { hour, minute, second, subsec_nanosecond }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Time>> {
        alloc::boxed::Box::new(
            (self.hour, self.minute, self.second, self.subsec_nanosecond)
                .shrink()
                .filter_map(|(hour, minute, second, subsec_nanosecond)| {
                    Time::new_with_nanosecond(
                        hour,
                        minute,
                        second,
                        subsec_nanosecond,
                    )
                    .ok()
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::{civil::time, ToPeriod};

    use super::*;

    #[test]
    fn invalid_fields_name_the_field() {
        let err = Time::new(24, 0, 0).unwrap_err();
        assert!(err.is_invalid_field());
        assert_eq!(err.field(), Some(("hour", 24)));
        let err = Time::new(0, 0, 60).unwrap_err();
        assert_eq!(err.field(), Some(("second", 60)));
        let err = Time::new(-1, 0, 0).unwrap_err();
        assert_eq!(err.field(), Some(("hour", -1)));
        assert_eq!(
            Time::new_with_nanosecond(0, 0, 0, 1_000_000_000)
                .unwrap_err()
                .field(),
            Some(("subsecond nanosecond", 1_000_000_000)),
        );
    }

    #[test]
    fn min_max() {
        assert_eq!(Time::MIN, time(0, 0, 0, 0));
        assert_eq!(Time::MAX.to_nanosecond_of_day(), NANOS_PER_CIVIL_DAY - 1);
        assert_eq!(Time::default(), Time::MIN);
        assert_eq!(Time::MAX.wrapping_add(1.nanosecond()), Time::MIN);
        assert_eq!(Time::MIN.wrapping_sub(1.nanosecond()), Time::MAX);
    }

    #[test]
    fn wrapping_ignores_calendar_units() {
        let t = time(10, 0, 0, 0);
        assert_eq!(t.wrapping_add(1.year().months(2).days(3)), t);
        assert_eq!(t.wrapping_add(1.day().hours(1)), time(11, 0, 0, 0));
        assert_eq!(t.wrapping_add(Period::new().hours(i64::MAX)), {
            // i64::MAX % 24 == 7
            time(17, 0, 0, 0)
        });
    }

    #[test]
    fn checked_crossing_midnight() {
        let t = time(0, 0, 0, 1);
        assert_eq!(t.checked_sub(1.nanosecond()).unwrap(), Time::MIN);
        let err = t.checked_sub(2.nanoseconds()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to add period to time: adding period to time crossed \
             midnight (use wrapping arithmetic to discard the day carry)",
        );
        assert!(Time::MAX.checked_add(1.nanosecond()).is_err());
    }

    #[test]
    fn until_balances() {
        let t1 = time(1, 2, 3, 4);
        let t2 = time(23, 59, 59, 999_999_999);
        let p = t1.until(t2);
        assert_eq!(
            p,
            22.hours().minutes(57).seconds(56).nanoseconds(999_999_995),
        );
        assert_eq!(t1.checked_add(p).unwrap(), t2);
        assert_eq!(t2.checked_sub(p).unwrap(), t1);
        assert_eq!(t1.count_until(Unit::Hour, t2).unwrap(), 22);
        assert_eq!(t2.count_until(Unit::Minute, t1).unwrap(), -1377);
    }

    #[test]
    fn until_rejects_calendar_units() {
        let t = time(1, 0, 0, 0);
        for unit in [Unit::Day, Unit::Month, Unit::Year] {
            let err = t.until_with_largest_unit(unit, t).unwrap_err();
            assert!(err.is_invalid_parameter(), "unit {unit:?}");
        }
    }

    #[test]
    fn display() {
        assert_eq!(time(0, 0, 0, 0).to_string(), "00:00:00");
        assert_eq!(time(12, 30, 5, 0).to_string(), "12:30:05");
        assert_eq!(time(12, 30, 5, 500_000_000).to_string(), "12:30:05.5");
        assert_eq!(time(12, 30, 5, 1).to_string(), "12:30:05.000000001");
        assert_eq!(time(12, 30, 5, 120_000).to_string(), "12:30:05.00012");
    }

    quickcheck::quickcheck! {
        fn prop_nanosecond_of_day_roundtrip(t: Time) -> bool {
            let nanos = t.to_nanosecond_of_day();
            Time::from_nanosecond_of_day(nanos).unwrap() == t
        }

        fn prop_until_then_add(t1: Time, t2: Time) -> bool {
            t1.checked_add(t1.until(t2)).unwrap() == t2
        }

        fn prop_wrapping_add_then_sub(t: Time, p: Period) -> bool {
            t.wrapping_add(p).wrapping_sub(p) == t
        }

        fn prop_ordering_matches_nanos(t1: Time, t2: Time) -> bool {
            t1.cmp(&t2)
                == t1.to_nanosecond_of_day().cmp(&t2.to_nanosecond_of_day())
        }
    }
}
