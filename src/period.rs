use crate::{
    error::{period::Error as E, Error, ErrorContext},
    util::itime::NANOS_PER_SECOND,
};

/// A unit of time.
///
/// Units are ordered from smallest to largest. That is,
/// `Unit::Nanosecond < Unit::Second < ... < Unit::Year`.
///
/// Units are used to request the largest unit when computing the difference
/// between two values (for example, [`civil::Date::until_with_largest_unit`](
/// crate::civil::Date::until_with_largest_unit)) and to read a single
/// component from a [`Period`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Unit {
    /// A nanosecond.
    Nanosecond = 0,
    /// A second. Always `1,000,000,000` nanoseconds.
    Second = 1,
    /// A minute. Always `60` seconds.
    Minute = 2,
    /// An hour. Always `60` minutes.
    Hour = 3,
    /// A civil day. Its length in absolute time depends on the zone in
    /// which it is interpreted, so it is a calendar unit.
    Day = 4,
    /// A month. Its length varies from `28` to `31` days.
    Month = 5,
    /// A year. Its length is either `365` or `366` days.
    Year = 6,
}

impl Unit {
    /// Returns the plural name of this unit. e.g., `days`.
    pub(crate) fn plural(self) -> &'static str {
        match self {
            Unit::Year => "years",
            Unit::Month => "months",
            Unit::Day => "days",
            Unit::Hour => "hours",
            Unit::Minute => "minutes",
            Unit::Second => "seconds",
            Unit::Nanosecond => "nanoseconds",
        }
    }

    /// Returns true when this is a calendar unit (days or bigger).
    pub(crate) fn is_calendar(self) -> bool {
        self >= Unit::Day
    }

    /// The number of nanoseconds in this unit, for fixed length units.
    ///
    /// Calendar units return `None`.
    pub(crate) fn fixed_nanoseconds(self) -> Option<i128> {
        let nanos = match self {
            Unit::Nanosecond => 1,
            Unit::Second => NANOS_PER_SECOND,
            Unit::Minute => 60 * NANOS_PER_SECOND,
            Unit::Hour => 60 * 60 * NANOS_PER_SECOND,
            Unit::Day | Unit::Month | Unit::Year => return None,
        };
        Some(i128::from(nanos))
    }
}

/// A calendar-aware length of time.
///
/// A `Period` is made up of seven independent signed components: years,
/// months, days, hours, minutes, seconds and nanoseconds. Components are
/// never carried into one another. For example, `30.days()` is not the same
/// period as `1.month()`, and `90.minutes()` stays `90` minutes.
///
/// The meaning of each component depends on what it's added to:
///
/// * Years, months and days are calendar units. Adding them to a date goes
/// through calendar arithmetic. Years and months are added first (with the
/// day clamped to the end of the resulting month), then days.
/// * Hours, minutes, seconds and nanoseconds are fixed durations. They are
/// added as an exact number of nanoseconds, carrying into days when added to
/// a datetime.
///
/// Components may be negative, and a period may mix signs. For example,
/// `1.month().days(-1)` is a valid period.
///
/// # Example
///
/// ```
/// use anydate::{civil::Date, Period, ToPeriod};
///
/// let p = Period::new().months(1).days(2);
/// assert_eq!(p, 1.month().days(2));
///
/// let d = Date::new(2024, 1, 31)?;
/// assert_eq!(d.checked_add(p)?, Date::new(2024, 3, 2)?);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Period {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    nanoseconds: i64,
}

impl Period {
    /// A period with every component set to zero.
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        nanoseconds: 0,
    };

    /// Creates a new period with every component set to zero.
    #[inline]
    pub const fn new() -> Period {
        Period::ZERO
    }

    /// Returns a copy of this period with the years component set.
    #[inline]
    pub fn years<I: Into<i64>>(self, years: I) -> Period {
        Period { years: years.into(), ..self }
    }

    /// Returns a copy of this period with the months component set.
    #[inline]
    pub fn months<I: Into<i64>>(self, months: I) -> Period {
        Period { months: months.into(), ..self }
    }

    /// Returns a copy of this period with the days component set.
    #[inline]
    pub fn days<I: Into<i64>>(self, days: I) -> Period {
        Period { days: days.into(), ..self }
    }

    /// Returns a copy of this period with the hours component set.
    #[inline]
    pub fn hours<I: Into<i64>>(self, hours: I) -> Period {
        Period { hours: hours.into(), ..self }
    }

    /// Returns a copy of this period with the minutes component set.
    #[inline]
    pub fn minutes<I: Into<i64>>(self, minutes: I) -> Period {
        Period { minutes: minutes.into(), ..self }
    }

    /// Returns a copy of this period with the seconds component set.
    #[inline]
    pub fn seconds<I: Into<i64>>(self, seconds: I) -> Period {
        Period { seconds: seconds.into(), ..self }
    }

    /// Returns a copy of this period with the nanoseconds component set.
    #[inline]
    pub fn nanoseconds<I: Into<i64>>(self, nanoseconds: I) -> Period {
        Period { nanoseconds: nanoseconds.into(), ..self }
    }

    /// Returns a copy of this period with the component for `unit` set.
    #[inline]
    pub fn with(self, unit: Unit, value: i64) -> Period {
        match unit {
            Unit::Year => self.years(value),
            Unit::Month => self.months(value),
            Unit::Day => self.days(value),
            Unit::Hour => self.hours(value),
            Unit::Minute => self.minutes(value),
            Unit::Second => self.seconds(value),
            Unit::Nanosecond => self.nanoseconds(value),
        }
    }

    /// Returns the years component.
    #[inline]
    pub fn get_years(&self) -> i64 {
        self.years
    }

    /// Returns the months component.
    #[inline]
    pub fn get_months(&self) -> i64 {
        self.months
    }

    /// Returns the days component.
    #[inline]
    pub fn get_days(&self) -> i64 {
        self.days
    }

    /// Returns the hours component.
    #[inline]
    pub fn get_hours(&self) -> i64 {
        self.hours
    }

    /// Returns the minutes component.
    #[inline]
    pub fn get_minutes(&self) -> i64 {
        self.minutes
    }

    /// Returns the seconds component.
    #[inline]
    pub fn get_seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the nanoseconds component.
    #[inline]
    pub fn get_nanoseconds(&self) -> i64 {
        self.nanoseconds
    }

    /// Returns the component corresponding to the given unit.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{ToPeriod, Unit};
    ///
    /// let p = 5.months().days(3);
    /// assert_eq!(p.get(Unit::Month), 5);
    /// assert_eq!(p.get(Unit::Day), 3);
    /// assert_eq!(p.get(Unit::Year), 0);
    /// ```
    #[inline]
    pub fn get(&self, unit: Unit) -> i64 {
        match unit {
            Unit::Year => self.years,
            Unit::Month => self.months,
            Unit::Day => self.days,
            Unit::Hour => self.hours,
            Unit::Minute => self.minutes,
            Unit::Second => self.seconds,
            Unit::Nanosecond => self.nanoseconds,
        }
    }

    /// Returns true if every component of this period is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Period::ZERO
    }

    /// Returns true if this period only has non-zero fixed length components.
    /// That is, hours, minutes, seconds or nanoseconds.
    ///
    /// Such periods can be added to an [`Instant`](crate::Instant).
    #[inline]
    pub fn is_time_only(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Returns the total of the fixed length components (hours, minutes,
    /// seconds and nanoseconds) in units of nanoseconds.
    ///
    /// This never overflows since every component is at most an `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::ToPeriod;
    ///
    /// let p = 1.hour().minutes(-30).nanoseconds(5);
    /// assert_eq!(p.fixed_duration_nanoseconds(), 1_800_000_000_005);
    /// // Calendar units are not included.
    /// assert_eq!(1.day().fixed_duration_nanoseconds(), 0);
    /// ```
    #[inline]
    pub fn fixed_duration_nanoseconds(&self) -> i128 {
        const NANOS: i128 = NANOS_PER_SECOND as i128;

        i128::from(self.hours) * 3_600 * NANOS
            + i128::from(self.minutes) * 60 * NANOS
            + i128::from(self.seconds) * NANOS
            + i128::from(self.nanoseconds)
    }

    /// Adds the given period to this one, component-wise.
    ///
    /// No component is carried into any other.
    ///
    /// # Errors
    ///
    /// This returns an error if any component overflows an `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::ToPeriod;
    ///
    /// let p = 1.year().days(30).checked_add(2.days().hours(25))?;
    /// assert_eq!(p, 1.year().days(32).hours(25));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn checked_add(self, other: Period) -> Result<Period, Error> {
        let add = |unit: Unit| -> Result<i64, Error> {
            self.get(unit)
                .checked_add(other.get(unit))
                .ok_or_else(|| Error::overflow(unit.plural()))
                .context(E::FailedAdd { unit })
        };
        Ok(Period {
            years: add(Unit::Year)?,
            months: add(Unit::Month)?,
            days: add(Unit::Day)?,
            hours: add(Unit::Hour)?,
            minutes: add(Unit::Minute)?,
            seconds: add(Unit::Second)?,
            nanoseconds: add(Unit::Nanosecond)?,
        })
    }

    /// Subtracts the given period from this one, component-wise.
    ///
    /// # Errors
    ///
    /// This returns an error if any component overflows an `i64`.
    pub fn checked_sub(self, other: Period) -> Result<Period, Error> {
        self.checked_add(other.checked_neg()?)
    }

    /// Negates every component of this period.
    ///
    /// # Errors
    ///
    /// This returns an error if any component is `i64::MIN`.
    pub fn checked_neg(self) -> Result<Period, Error> {
        let neg = |unit: Unit| -> Result<i64, Error> {
            self.get(unit)
                .checked_neg()
                .ok_or_else(|| Error::overflow(unit.plural()))
                .context(E::FailedNegate { unit })
        };
        Ok(Period {
            years: neg(Unit::Year)?,
            months: neg(Unit::Month)?,
            days: neg(Unit::Day)?,
            hours: neg(Unit::Hour)?,
            minutes: neg(Unit::Minute)?,
            seconds: neg(Unit::Second)?,
            nanoseconds: neg(Unit::Nanosecond)?,
        })
    }

    /// Returns the largest unit with a non-zero component, if any.
    pub(crate) fn largest_nonzero_unit(&self) -> Option<Unit> {
        [
            Unit::Year,
            Unit::Month,
            Unit::Day,
            Unit::Hour,
            Unit::Minute,
            Unit::Second,
            Unit::Nanosecond,
        ]
        .into_iter()
        .find(|&unit| self.get(unit) != 0)
    }

    /// Builds a period from a signed number of nanoseconds, balanced into
    /// units no bigger than `largest`.
    ///
    /// `largest` must be a fixed length unit. The sign of every component
    /// is the sign of `nanoseconds`.
    pub(crate) fn from_fixed_nanoseconds(
        largest: Unit,
        nanoseconds: i128,
    ) -> Result<Period, Error> {
        debug_assert!(!largest.is_calendar());
        let mut remaining = nanoseconds;
        let mut period = Period::new();
        for unit in [Unit::Hour, Unit::Minute, Unit::Second, Unit::Nanosecond]
        {
            if unit > largest {
                continue;
            }
            let Some(per) = unit.fixed_nanoseconds() else { continue };
            let amount = if unit == largest || unit == Unit::Nanosecond {
                // The largest unit absorbs everything above it.
                let amount = remaining / per;
                remaining %= per;
                amount
            } else {
                let bigger = match unit {
                    Unit::Minute => 60,
                    Unit::Second => 60,
                    _ => unreachable!("hours are always the largest"),
                };
                let amount = (remaining / per) % bigger;
                remaining -= amount * per;
                amount
            };
            let amount = i64::try_from(amount)
                .map_err(|_| Error::overflow(unit.plural()))?;
            period = period.with(unit, amount);
        }
        Ok(period)
    }
}

impl core::fmt::Debug for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// Writes this period in a format inspired by ISO 8601 durations.
///
/// Since components may have different signs, each component carries its
/// own sign. A zero period is written as `PT0S`.
///
/// # Example
///
/// ```
/// use anydate::ToPeriod;
///
/// assert_eq!(1.year().months(2).days(-3).to_string(), "P1Y2M-3D");
/// assert_eq!(4.hours().seconds(5).to_string(), "PT4H5S");
/// assert_eq!(0.days().to_string(), "PT0S");
/// ```
impl core::fmt::Display for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        let has_time = self.hours != 0
            || self.minutes != 0
            || self.seconds != 0
            || self.nanoseconds != 0;
        if has_time {
            f.write_str("T")?;
        }
        if self.hours != 0 {
            write!(f, "{}H", self.hours)?;
        }
        if self.minutes != 0 {
            write!(f, "{}M", self.minutes)?;
        }
        if self.seconds != 0 {
            write!(f, "{}S", self.seconds)?;
        }
        if self.nanoseconds != 0 {
            write!(f, "{}N", self.nanoseconds)?;
        }
        Ok(())
    }
}

/// Adds two periods component-wise.
///
/// This panics on overflow. To handle overflow without panics, use
/// [`Period::checked_add`].
impl core::ops::Add for Period {
    type Output = Period;

    #[inline]
    fn add(self, rhs: Period) -> Period {
        self.checked_add(rhs).expect("adding periods overflowed")
    }
}

/// Subtracts two periods component-wise.
///
/// This panics on overflow. To handle overflow without panics, use
/// [`Period::checked_sub`].
impl core::ops::Sub for Period {
    type Output = Period;

    #[inline]
    fn sub(self, rhs: Period) -> Period {
        self.checked_sub(rhs).expect("subtracting periods overflowed")
    }
}

/// Negates every component.
///
/// This panics when a component is `i64::MIN`. To handle that case without
/// panics, use [`Period::checked_neg`].
impl core::ops::Neg for Period {
    type Output = Period;

    #[inline]
    fn neg(self) -> Period {
        self.checked_neg().expect("negating period overflowed")
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Period {
    fn arbitrary(g: &mut quickcheck::Gen) -> Period {
        // Keep components small enough that adding them to a datetime in
        // the middle of the supported range usually succeeds.
        let mut component = |max: i64| -> i64 {
            i64::arbitrary(g).rem_euclid(2 * max + 1) - max
        };
        Period {
            years: component(500),
            months: component(6_000),
            days: component(100_000),
            hours: component(1_000_000),
            minutes: component(10_000_000),
            seconds: component(100_000_000),
            nanoseconds: component(1_000_000_000_000),
        }
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Period>> {
        alloc::boxed::Box::new(
            (
                self.years,
                self.months,
                self.days,
                (self.hours, self.minutes, self.seconds, self.nanoseconds),
            )
                .shrink()
                .map(
                    |(
                        years,
                        months,
                        days,
                        (hours, minutes, seconds, nanoseconds),
                    )| Period {
                        years,
                        months,
                        days,
                        hours,
                        minutes,
                        seconds,
                        nanoseconds,
                    },
                ),
        )
    }
}

/// A trait for creating periods from integers.
///
/// This is implemented for the primitive signed integer types and the
/// unsigned integer types that losslessly convert to an `i64`. Each method
/// returns a [`Period`] with exactly one non-zero component (or none, when
/// the integer is zero). Both singular and plural names are provided so that
/// expressions like `1.year()` and `3.years()` both read naturally.
///
/// # Example
///
/// ```
/// use anydate::{Period, ToPeriod};
///
/// assert_eq!(1.year(), Period::new().years(1));
/// assert_eq!(3.months(), Period::new().months(3));
/// assert_eq!(-2.days(), Period::new().days(-2));
/// // Components can be chained after the first one.
/// assert_eq!(1.year().months(2), Period::new().years(1).months(2));
/// ```
pub trait ToPeriod: Sized {
    /// Create a new period from this integer in units of years.
    fn years(self) -> Period;

    /// Create a new period from this integer in units of months.
    fn months(self) -> Period;

    /// Create a new period from this integer in units of days.
    fn days(self) -> Period;

    /// Create a new period from this integer in units of hours.
    fn hours(self) -> Period;

    /// Create a new period from this integer in units of minutes.
    fn minutes(self) -> Period;

    /// Create a new period from this integer in units of seconds.
    fn seconds(self) -> Period;

    /// Create a new period from this integer in units of nanoseconds.
    fn nanoseconds(self) -> Period;

    /// Equivalent to `years()`, but reads better for singular units.
    #[inline]
    fn year(self) -> Period {
        self.years()
    }

    /// Equivalent to `months()`, but reads better for singular units.
    #[inline]
    fn month(self) -> Period {
        self.months()
    }

    /// Equivalent to `days()`, but reads better for singular units.
    #[inline]
    fn day(self) -> Period {
        self.days()
    }

    /// Equivalent to `hours()`, but reads better for singular units.
    #[inline]
    fn hour(self) -> Period {
        self.hours()
    }

    /// Equivalent to `minutes()`, but reads better for singular units.
    #[inline]
    fn minute(self) -> Period {
        self.minutes()
    }

    /// Equivalent to `seconds()`, but reads better for singular units.
    #[inline]
    fn second(self) -> Period {
        self.seconds()
    }

    /// Equivalent to `nanoseconds()`, but reads better for singular units.
    #[inline]
    fn nanosecond(self) -> Period {
        self.nanoseconds()
    }
}

macro_rules! impl_to_period {
    ($ty:ty) => {
        impl ToPeriod for $ty {
            #[inline]
            fn years(self) -> Period {
                Period::new().years(self)
            }
            #[inline]
            fn months(self) -> Period {
                Period::new().months(self)
            }
            #[inline]
            fn days(self) -> Period {
                Period::new().days(self)
            }
            #[inline]
            fn hours(self) -> Period {
                Period::new().hours(self)
            }
            #[inline]
            fn minutes(self) -> Period {
                Period::new().minutes(self)
            }
            #[inline]
            fn seconds(self) -> Period {
                Period::new().seconds(self)
            }
            #[inline]
            fn nanoseconds(self) -> Period {
                Period::new().nanoseconds(self)
            }
        }
    };
}

impl_to_period!(i8);
impl_to_period!(i16);
impl_to_period!(i32);
impl_to_period!(i64);
impl_to_period!(u8);
impl_to_period!(u16);
impl_to_period!(u32);

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn convenience_constructors_set_one_component() {
        let p = 1.year();
        assert_eq!(p.get_years(), 1);
        for unit in [
            Unit::Month,
            Unit::Day,
            Unit::Hour,
            Unit::Minute,
            Unit::Second,
            Unit::Nanosecond,
        ] {
            assert_eq!(p.get(unit), 0, "unit {unit:?} should be zero");
        }
        assert_eq!(3.months().get_months(), 3);
        assert_eq!(Period::new().with(Unit::Minute, 7), 7.minutes());
    }

    #[test]
    fn no_cross_unit_normalization() {
        let p = 30.days().checked_add(1.days()).unwrap();
        assert_eq!(p, 31.days());
        assert_ne!(p, 1.month());

        let p = 90.minutes() + 90.minutes();
        assert_eq!(p.get_minutes(), 180);
        assert_eq!(p.get_hours(), 0);
    }

    #[test]
    fn negative_components() {
        let p = -3.days();
        assert_eq!(p.get_days(), -3);
        assert_eq!(-p, 3.days());
        assert_eq!(1.month() - 1.day(), 1.month().days(-1));
    }

    #[test]
    fn overflow_is_an_error() {
        let p = Period::new().days(i64::MAX);
        let err = p.checked_add(1.day()).unwrap_err();
        assert!(err.is_overflow());
        assert_eq!(
            err.to_string(),
            "failed to add days of two periods: \
             value for 'days' overflowed the supported range",
        );
        assert!(Period::new().hours(i64::MIN).checked_neg().is_err());
    }

    #[test]
    fn unit_ordering() {
        assert!(Unit::Year > Unit::Month);
        assert!(Unit::Month > Unit::Day);
        assert!(Unit::Day > Unit::Hour);
        assert!(Unit::Second > Unit::Nanosecond);
        assert!(Unit::Day.is_calendar());
        assert!(!Unit::Hour.is_calendar());
    }

    #[test]
    fn from_fixed_nanoseconds_balances() {
        let nanos = i128::from(
            (2 * 3_600 + 3 * 60 + 4) * NANOS_PER_SECOND + 5,
        );
        let p = Period::from_fixed_nanoseconds(Unit::Hour, nanos).unwrap();
        assert_eq!(p, 2.hours().minutes(3).seconds(4).nanoseconds(5));

        let p = Period::from_fixed_nanoseconds(Unit::Minute, nanos).unwrap();
        assert_eq!(p, 123.minutes().seconds(4).nanoseconds(5));

        let p = Period::from_fixed_nanoseconds(Unit::Second, -nanos).unwrap();
        assert_eq!(p, (-7384).seconds().nanoseconds(-5));

        let p =
            Period::from_fixed_nanoseconds(Unit::Nanosecond, nanos).unwrap();
        assert_eq!(p.get_nanoseconds(), 7_384_000_000_005);
    }

    #[test]
    fn largest_nonzero_unit() {
        assert_eq!(Period::new().largest_nonzero_unit(), None);
        assert_eq!(
            1.day().seconds(1).largest_nonzero_unit(),
            Some(Unit::Day)
        );
        assert_eq!(
            5.nanoseconds().largest_nonzero_unit(),
            Some(Unit::Nanosecond)
        );
    }

    #[test]
    fn display() {
        assert_eq!(1.year().days(2).hours(3).to_string(), "P1Y2DT3H");
        assert_eq!(5.nanoseconds().to_string(), "PT5N");
        assert_eq!(2.months().to_string(), "P2M");
    }

    quickcheck::quickcheck! {
        fn prop_add_then_sub(p1: Period, p2: Period) -> bool {
            (p1 + p2) - p2 == p1
        }

        fn prop_negate_twice(p: Period) -> bool {
            -(-p) == p
        }
    }
}
