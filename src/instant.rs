use crate::{
    civil::DateTime,
    error::{
        civil::Error as CivilError, instant::Error as E, Error, ErrorContext,
    },
    tz::{Clock, Offset},
    util::itime::{ITimestamp, NANOS_PER_SECOND},
    Period, Unit, ZonedDateTime,
};

/// An instant in time represented as the number of nanoseconds since the
/// Unix epoch.
///
/// An `Instant` is always in UTC. It has no calendar and no time zone. To
/// look at an instant through the lens of a calendar, convert it to a
/// [`DateTime`] with [`Instant::to_datetime`] or to a [`ZonedDateTime`] with
/// [`Instant::to_zoned`].
///
/// # Representation
///
/// An instant is a number of whole seconds since `1970-01-01T00:00:00Z`
/// along with a fractional number of nanoseconds. The fractional part is
/// always in the range `0..=999_999_999`, even for instants before the
/// epoch. So `-0.5` seconds is represented as `-1` second plus
/// `500_000_000` nanoseconds.
///
/// # Range
///
/// The range of an `Instant` is chosen such that any instant, combined with
/// any valid UTC offset (up to `±18:00`), corresponds to a valid
/// [`DateTime`]. That is, [`Instant::MIN`] is `-9999-01-01T18:00:00Z` and
/// [`Instant::MAX`] is `9999-12-31T05:59:59.999999999Z`.
///
/// # Arithmetic
///
/// Since an instant has no calendar, only periods made of fixed length
/// units (hours, minutes, seconds and nanoseconds) can be added to it. Using
/// years, months or days returns an error.
///
/// ```
/// use anydate::{Instant, ToPeriod};
///
/// let i = Instant::from_second(1_709_208_000)?;
/// assert_eq!(i.checked_add(36.hours())?.second(), 1_709_337_600);
/// assert!(i.checked_add(1.day()).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Instant {
    second: i64,
    nanosecond: i32,
}

impl Instant {
    const SECOND_MIN: i64 = -377_705_052_000;
    const SECOND_MAX: i64 = 253_402_235_999;

    /// The minimum representable instant.
    pub const MIN: Instant =
        Instant { second: Instant::SECOND_MIN, nanosecond: 0 };

    /// The maximum representable instant.
    pub const MAX: Instant =
        Instant { second: Instant::SECOND_MAX, nanosecond: 999_999_999 };

    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const UNIX_EPOCH: Instant = Instant { second: 0, nanosecond: 0 };

    /// Returns the current system time as an instant.
    ///
    /// This reads the clock through
    /// [`SystemTimeSource`](crate::SystemTimeSource).
    /// A system clock reporting a time outside the supported range is
    /// clamped to [`Instant::MIN`] or [`Instant::MAX`].
    #[cfg(feature = "std")]
    #[inline]
    pub fn now() -> Instant {
        use crate::TimeSource;

        crate::SystemTimeSource.now()
    }

    /// Creates a new instant from a number of seconds and a fractional
    /// number of nanoseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// This returns an error when `second` is outside the supported range
    /// or when `nanosecond` is not in `0..=999_999_999`.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::Instant;
    ///
    /// let i = Instant::new(-1, 500_000_000)?;
    /// assert_eq!(i.to_string(), "1969-12-31T23:59:59.5Z");
    ///
    /// let err = Instant::new(0, 1_000_000_000).unwrap_err();
    /// assert_eq!(err.field(), Some(("nanosecond", 1_000_000_000)));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn new(second: i64, nanosecond: i32) -> Result<Instant, Error> {
        if !(Instant::SECOND_MIN..=Instant::SECOND_MAX).contains(&second) {
            return Err(Error::range(
                "second",
                second,
                Instant::SECOND_MIN,
                Instant::SECOND_MAX,
            ));
        }
        if !(0..NANOS_PER_SECOND as i32).contains(&nanosecond) {
            return Err(Error::range(
                "nanosecond",
                nanosecond,
                0,
                NANOS_PER_SECOND - 1,
            ));
        }
        Ok(Instant { second, nanosecond })
    }

    /// Creates a new instant from a whole number of seconds since the Unix
    /// epoch.
    ///
    /// # Errors
    ///
    /// This returns an error when `second` is outside the supported range.
    #[inline]
    pub fn from_second(second: i64) -> Result<Instant, Error> {
        Instant::new(second, 0)
    }

    /// Returns the number of whole seconds since the Unix epoch.
    ///
    /// For instants before the epoch this is rounded toward negative
    /// infinity, such that the fractional part from
    /// [`Instant::nanosecond`] is always non-negative.
    #[inline]
    pub fn second(self) -> i64 {
        self.second
    }

    /// Returns the fractional part of this instant in nanoseconds, in the
    /// range `0..=999_999_999`.
    #[inline]
    pub fn nanosecond(self) -> i32 {
        self.nanosecond
    }

    /// Adds the given number of seconds to this instant.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is outside the range of
    /// [`Instant::MIN`] to [`Instant::MAX`].
    #[inline]
    pub fn checked_add_seconds(self, seconds: i64) -> Result<Instant, Error> {
        let nanos = i128::from(seconds) * i128::from(NANOS_PER_SECOND);
        self.checked_add_nanos(nanos)
    }

    /// Adds the given number of nanoseconds to this instant, carrying into
    /// seconds as needed.
    ///
    /// # Errors
    ///
    /// This returns an error when the result is outside the range of
    /// [`Instant::MIN`] to [`Instant::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::Instant;
    ///
    /// let i = Instant::UNIX_EPOCH.checked_add_nanoseconds(-1)?;
    /// assert_eq!((i.second(), i.nanosecond()), (-1, 999_999_999));
    /// assert!(Instant::MAX.checked_add_nanoseconds(1).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_add_nanoseconds(
        self,
        nanoseconds: i64,
    ) -> Result<Instant, Error> {
        self.checked_add_nanos(i128::from(nanoseconds))
    }

    /// Adds the given period to this instant.
    ///
    /// # Errors
    ///
    /// This returns an error when the period has a non-zero year, month or
    /// day component, since an instant has no calendar. It also returns an
    /// error when the result is outside the range of [`Instant::MIN`] to
    /// [`Instant::MAX`].
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{Instant, ToPeriod};
    ///
    /// let i = Instant::UNIX_EPOCH.checked_add(1.hour().minutes(30))?;
    /// assert_eq!(i.second(), 5_400);
    ///
    /// let err = Instant::UNIX_EPOCH.checked_add(1.month()).unwrap_err();
    /// assert!(err.is_invalid_parameter());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn checked_add(self, period: Period) -> Result<Instant, Error> {
        self.checked_add_impl(period).context(E::FailedAddPeriod)
    }

    /// Subtracts the given period from this instant.
    ///
    /// # Errors
    ///
    /// This returns an error in the same circumstances as
    /// [`Instant::checked_add`].
    #[inline]
    pub fn checked_sub(self, period: Period) -> Result<Instant, Error> {
        self.checked_add(period.checked_neg()?)
    }

    /// Returns the period from this instant until the other instant.
    ///
    /// The period uses hours as its largest unit, and its components all have
    /// the same sign. The sign is negative when `other` is before `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{Instant, ToPeriod};
    ///
    /// let i1 = Instant::from_second(0)?;
    /// let i2 = Instant::new(90_061, 5)?;
    /// let p = 25.hours().minutes(1).seconds(1).nanoseconds(5);
    /// assert_eq!(i1.until(i2), p);
    /// assert_eq!(i2.until(i1), -p);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn until(self, other: Instant) -> Period {
        // The span between any two instants is about 175 million hours, so
        // this can never overflow.
        let Ok(period) =
            Period::from_fixed_nanoseconds(Unit::Hour, self.until_nanos(other))
        else {
            unreachable!("difference between instants fits in hours")
        };
        period
    }

    /// Returns the period from the other instant until this instant.
    ///
    /// This is equivalent to `other.until(self)`.
    #[inline]
    pub fn since(self, other: Instant) -> Period {
        other.until(self)
    }

    /// Returns the period from this instant until the other instant, using
    /// the given unit as the largest unit.
    ///
    /// # Errors
    ///
    /// This returns an error when `largest` is a calendar unit (days or
    /// bigger), or when the result cannot be represented. The latter only
    /// happens when asking for nanoseconds between instants more than about
    /// 292 years apart.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{Instant, ToPeriod, Unit};
    ///
    /// let i1 = Instant::from_second(0)?;
    /// let i2 = Instant::from_second(3_725)?;
    /// assert_eq!(
    ///     i1.until_with_largest_unit(Unit::Second, i2)?,
    ///     3_725.seconds(),
    /// );
    /// assert!(i1.until_with_largest_unit(Unit::Day, i2).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn until_with_largest_unit(
        self,
        largest: Unit,
        other: Instant,
    ) -> Result<Period, Error> {
        if largest.is_calendar() {
            return Err(Error::from(CivilError::LargestUnitTooBig {
                what: "instants",
                unit: largest,
            }));
        }
        Period::from_fixed_nanoseconds(largest, self.until_nanos(other))
    }

    /// Returns the number of whole units of the given kind from this instant
    /// until the other instant, truncated toward zero.
    ///
    /// # Errors
    ///
    /// This returns an error in the same circumstances as
    /// [`Instant::until_with_largest_unit`].
    #[inline]
    pub fn count_until(
        self,
        unit: Unit,
        other: Instant,
    ) -> Result<i64, Error> {
        Ok(self.until_with_largest_unit(unit, other)?.get(unit))
    }

    /// Converts this instant to a civil datetime in the given UTC offset.
    ///
    /// This never fails, since the range of an instant accounts for every
    /// valid offset.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{civil::datetime, tz::Offset, Instant};
    ///
    /// let i = Instant::from_second(1_709_208_000)?;
    /// let dt = i.to_datetime(Offset::UTC);
    /// assert_eq!(dt, datetime(2024, 2, 29, 12, 0, 0, 0));
    /// let ist = Offset::from_seconds(5 * 60 * 60 + 30 * 60)?;
    /// assert_eq!(i.to_datetime(ist), datetime(2024, 2, 29, 17, 30, 0, 0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_datetime(self, offset: Offset) -> DateTime {
        let idt = self.to_itimestamp().to_datetime(offset.to_ioffset());
        DateTime::from_idatetime(idt)
    }

    /// Converts this instant to a zoned datetime using the given clock.
    ///
    /// This is equivalent to [`ZonedDateTime::from_instant`].
    #[inline]
    pub fn to_zoned(self, clock: Clock) -> ZonedDateTime {
        ZonedDateTime::from_instant(self, clock)
    }
}

/// Internal APIs.
impl Instant {
    #[inline]
    pub(crate) const fn to_itimestamp(self) -> ITimestamp {
        ITimestamp { second: self.second, nanosecond: self.nanosecond }
    }

    /// Converts an internal timestamp to an instant.
    ///
    /// Internal timestamps are produced by arithmetic on valid values, so
    /// an out of range value is reported as an overflow.
    #[inline]
    pub(crate) fn from_itimestamp(its: ITimestamp) -> Result<Instant, Error> {
        if !(Instant::SECOND_MIN..=Instant::SECOND_MAX).contains(&its.second) {
            return Err(Error::overflow("instant"));
        }
        debug_assert!((0..NANOS_PER_SECOND as i32).contains(&its.nanosecond));
        Ok(Instant { second: its.second, nanosecond: its.nanosecond })
    }

    fn checked_add_impl(self, period: Period) -> Result<Instant, Error> {
        if !period.is_time_only() {
            // Not time-only means some calendar unit is non-zero.
            let unit = period.largest_nonzero_unit().unwrap_or(Unit::Day);
            return Err(Error::from(E::CalendarUnits { unit }));
        }
        self.checked_add_nanos(period.fixed_duration_nanoseconds())
    }

    fn checked_add_nanos(self, nanoseconds: i128) -> Result<Instant, Error> {
        let nanos = self
            .to_total_nanos()
            .checked_add(nanoseconds)
            .ok_or_else(|| Error::overflow("instant"))?;
        let per = i128::from(NANOS_PER_SECOND);
        let second = i64::try_from(nanos.div_euclid(per))
            .map_err(|_| Error::overflow("instant"))?;
        // OK because the remainder is always in `0..NANOS_PER_SECOND`.
        let nanosecond = nanos.rem_euclid(per) as i32;
        Instant::from_itimestamp(ITimestamp { second, nanosecond })
    }

    fn to_total_nanos(self) -> i128 {
        i128::from(self.second) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.nanosecond)
    }

    fn until_nanos(self, other: Instant) -> i128 {
        other.to_total_nanos() - self.to_total_nanos()
    }
}

impl Default for Instant {
    fn default() -> Instant {
        Instant::UNIX_EPOCH
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

impl core::fmt::Display for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}Z", self.to_datetime(Offset::UTC))
    }
}

/// Adds a period to an instant.
///
/// # Panics
///
/// This panics in the same circumstances that [`Instant::checked_add`]
/// returns an error.
impl core::ops::Add<Period> for Instant {
    type Output = Instant;

    #[inline]
    fn add(self, rhs: Period) -> Instant {
        self.checked_add(rhs).expect("adding period to instant failed")
    }
}

/// Subtracts a period from an instant.
///
/// # Panics
///
/// This panics in the same circumstances that [`Instant::checked_sub`]
/// returns an error.
impl core::ops::Sub<Period> for Instant {
    type Output = Instant;

    #[inline]
    fn sub(self, rhs: Period) -> Instant {
        self.checked_sub(rhs).expect("subtracting period from instant failed")
    }
}

/// Computes the period between two instants.
///
/// This is equivalent to `rhs.until(self)`.
impl core::ops::Sub for Instant {
    type Output = Period;

    #[inline]
    fn sub(self, rhs: Instant) -> Period {
        self.since(rhs)
    }
}

#[cfg(feature = "std")]
impl TryFrom<std::time::SystemTime> for Instant {
    type Error = Error;

    fn try_from(system_time: std::time::SystemTime) -> Result<Instant, Error> {
        let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
        let (duration, sign) = match system_time.duration_since(unix_epoch) {
            Ok(duration) => (duration, 1),
            Err(err) => (err.duration(), -1),
        };
        let second = i128::from(duration.as_secs());
        let nanos = second * i128::from(NANOS_PER_SECOND)
            + i128::from(duration.subsec_nanos());
        Instant::UNIX_EPOCH
            .checked_add_nanos(sign * nanos)
            .context(E::SystemTimeOutOfRange)
    }
}

#[cfg(feature = "std")]
impl From<Instant> for std::time::SystemTime {
    fn from(instant: Instant) -> std::time::SystemTime {
        let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
        let nanos = instant.to_total_nanos();
        let per = i128::from(NANOS_PER_SECOND);
        let abs = nanos.unsigned_abs();
        // These casts are fine since every instant is within about 2^39
        // seconds of the epoch.
        let duration = std::time::Duration::new(
            (abs / per.unsigned_abs()) as u64,
            (abs % per.unsigned_abs()) as u32,
        );
        // These are guaranteed to succeed because we assume that SystemTime
        // uses at least 64 bits for the time, and our instants are capped
        // at about 10,000 years from the epoch.
        if nanos >= 0 {
            unix_epoch
                .checked_add(duration)
                .expect("duration too big (positive)")
        } else {
            unix_epoch
                .checked_sub(duration)
                .expect("duration too big (negative)")
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        let span = Instant::SECOND_MAX - Instant::SECOND_MIN + 1;
        let second = Instant::SECOND_MIN + i64::arbitrary(g).rem_euclid(span);
        let nanosecond = i32::arbitrary(g).rem_euclid(NANOS_PER_SECOND as i32);
        Instant { second, nanosecond }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Instant>> {
        alloc::boxed::Box::new(
            (self.second, self.nanosecond)
                .shrink()
                .filter_map(|(second, nanosecond)| {
                    Instant::new(second, nanosecond).ok()
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use quickcheck::{quickcheck, TestResult};

    use crate::{civil::datetime, ToPeriod};

    use super::*;

    #[test]
    fn range_boundaries() {
        assert_eq!(
            Instant::MIN.to_datetime(Offset::MIN),
            datetime(-9999, 1, 1, 0, 0, 0, 0),
        );
        assert_eq!(
            Instant::MAX.to_datetime(Offset::MAX),
            datetime(9999, 12, 31, 23, 59, 59, 999_999_999),
        );
        assert_eq!(Instant::MIN.to_string(), "-9999-01-01T18:00:00Z");
        assert_eq!(
            Instant::MAX.to_string(),
            "9999-12-31T05:59:59.999999999Z",
        );

        let err = Instant::new(Instant::SECOND_MAX + 1, 0).unwrap_err();
        assert_eq!(
            err.field(),
            Some(("second", i128::from(Instant::SECOND_MAX) + 1)),
        );
        assert!(Instant::new(0, -1).unwrap_err().is_invalid_field());
    }

    #[test]
    fn add_nanoseconds_borrows() {
        let i = Instant::new(10, 100).unwrap();
        let got = i.checked_add_nanoseconds(-200).unwrap();
        assert_eq!((got.second(), got.nanosecond()), (9, 999_999_900));

        let got = i.checked_add_nanoseconds(999_999_900).unwrap();
        assert_eq!((got.second(), got.nanosecond()), (11, 0));
    }

    #[test]
    fn add_overflow() {
        let err = Instant::MAX.checked_add(1.nanosecond()).unwrap_err();
        assert!(err.is_overflow());
        assert_eq!(
            err.to_string(),
            "failed to add period to instant: \
             value for 'instant' overflowed the supported range",
        );
        let err = Instant::MIN.checked_sub(1.second()).unwrap_err();
        assert!(err.is_overflow());
        assert!(Instant::MAX.checked_add_seconds(i64::MAX).is_err());
        assert!(Instant::MIN.checked_add_seconds(i64::MIN).is_err());
    }

    #[test]
    fn add_calendar_units() {
        let err =
            Instant::UNIX_EPOCH.checked_add(1.year().hours(1)).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert_eq!(
            err.to_string(),
            "failed to add period to instant: \
             operation on an instant can only use fixed length units \
             (hours or smaller), but found non-zero years",
        );
        // A zero calendar component is fine.
        let i = Instant::UNIX_EPOCH.checked_add(0.days().hours(2)).unwrap();
        assert_eq!(i.second(), 7_200);
    }

    #[test]
    fn until_is_balanced() {
        let i1 = Instant::new(0, 900_000_000).unwrap();
        let i2 = Instant::new(1, 100_000_000).unwrap();
        assert_eq!(i1.until(i2), 200_000_000.nanoseconds());
        assert_eq!(i2.until(i1), -200_000_000.nanoseconds());
        assert_eq!(i2 - i1, 200_000_000.nanoseconds());

        let p = Instant::MIN.until(Instant::MAX);
        assert_eq!(Instant::MIN + p, Instant::MAX);
        assert!(Instant::MIN
            .until_with_largest_unit(Unit::Nanosecond, Instant::MAX)
            .unwrap_err()
            .is_overflow());
        assert_eq!(
            Instant::UNIX_EPOCH
                .count_until(Unit::Minute, Instant::from_second(-119).unwrap())
                .unwrap(),
            -1,
        );
    }

    #[test]
    fn datetime_roundtrip_with_offset() {
        let ist = Offset::from_seconds(5 * 60 * 60 + 30 * 60).unwrap();
        let i = Instant::new(1_709_208_000, 123).unwrap();
        let dt = i.to_datetime(ist);
        assert_eq!(dt, datetime(2024, 2, 29, 17, 30, 0, 123));
        assert_eq!(dt.to_instant(ist).unwrap(), i);
    }

    #[test]
    fn system_time_conversions() {
        use std::time::{Duration, SystemTime};

        let st = SystemTime::UNIX_EPOCH - Duration::new(1, 500_000_000);
        let i = Instant::try_from(st).unwrap();
        assert_eq!((i.second(), i.nanosecond()), (-2, 500_000_000));
        assert_eq!(SystemTime::from(i), st);

        let st = SystemTime::UNIX_EPOCH + Duration::new(1_709_208_000, 7);
        let i = Instant::try_from(st).unwrap();
        assert_eq!((i.second(), i.nanosecond()), (1_709_208_000, 7));
        assert_eq!(SystemTime::from(i), st);
    }

    quickcheck! {
        fn prop_time_period_add_then_sub(
            i: Instant,
            hours: i16,
            minutes: i32,
            seconds: i32
        ) -> TestResult {
            let p = hours.hours().minutes(minutes).seconds(seconds);
            let Ok(later) = i.checked_add(p) else {
                return TestResult::discard();
            };
            TestResult::from_bool(later.checked_sub(p).unwrap() == i)
        }

        fn prop_until_then_add(i1: Instant, i2: Instant) -> bool {
            i1.checked_add(i1.until(i2)).unwrap() == i2
        }

        fn prop_ordering_is_total(i1: Instant, i2: Instant) -> bool {
            use core::cmp::Ordering::*;

            match i1.cmp(&i2) {
                Less => i2 > i1 && i1 != i2,
                Equal => i1 == i2 && i1.until(i2).is_zero(),
                Greater => i2 < i1 && i1 != i2,
            }
        }

        fn prop_datetime_roundtrip(i: Instant, offset_seconds: i32) -> bool {
            let offset_seconds =
                offset_seconds.rem_euclid(2 * 64_800 + 1) - 64_800;
            let offset = Offset::from_seconds(offset_seconds).unwrap();
            i.to_datetime(offset).to_instant(offset).unwrap() == i
        }
    }
}
