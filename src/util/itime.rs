/*!
Internal field arithmetic on plain integers.

Everything else in this crate is built on the conversions here: between an
instant in seconds and a civil datetime, between a civil date and a count of
days since `1970-01-01`, and between a time of day and a count of seconds or
nanoseconds since midnight.

The routines here assume their inputs are in range. The public types check
their fields when they are constructed, so by the time a value gets here it
is known to be valid.

The types are prefixed with `I` (for "internal") to keep them apart from the
public types they mirror. For example, `IDate` versus `Date`.
*/

pub(crate) const SECONDS_PER_CIVIL_DAY: i64 = 86_400;
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_CIVIL_DAY: i64 =
    SECONDS_PER_CIVIL_DAY * NANOS_PER_SECOND;

const NANOS_PER_HOUR: i64 = 3_600 * NANOS_PER_SECOND;
const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;

/// The number of days in a 400 year Gregorian cycle.
const DAYS_PER_ERA: i32 = 146_097;
/// The number of days from `0000-03-01` to `1970-01-01`.
const DAYS_BEFORE_EPOCH: i32 = 719_468;

/// The epoch day of `-9999-01-01`.
pub(crate) const EPOCH_DAY_MIN: i32 = -4_371_587;
/// The epoch day of `9999-12-31`.
pub(crate) const EPOCH_DAY_MAX: i32 = 2_932_896;

/// An instant as whole seconds since the Unix epoch plus a fraction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITimestamp {
    pub(crate) second: i64,
    /// Always in the range `0..=999_999_999`.
    pub(crate) nanosecond: i32,
}

impl ITimestamp {
    /// Returns the civil datetime seen at this instant on a clock with the
    /// given offset.
    #[inline(always)]
    pub(crate) const fn to_datetime(&self, offset: IOffset) -> IDateTime {
        let local = self.second + offset.second as i64;
        let epoch_day = local.div_euclid(SECONDS_PER_CIVIL_DAY) as i32;
        let second = local.rem_euclid(SECONDS_PER_CIVIL_DAY) as i32;

        let mut time = ITimeSecond { second }.to_time();
        time.subsec_nanosecond = self.nanosecond;
        IDateTime { date: IEpochDay { epoch_day }.to_date(), time }
    }
}

/// A UTC offset in seconds. Positive offsets are east of Greenwich.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IOffset {
    pub(crate) second: i32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDateTime {
    pub(crate) date: IDate,
    pub(crate) time: ITime,
}

impl IDateTime {
    /// Returns the instant at which a clock with the given offset shows this
    /// civil datetime.
    #[inline(always)]
    pub(crate) const fn to_timestamp(&self, offset: IOffset) -> ITimestamp {
        let day = self.date.to_epoch_day().epoch_day as i64;
        let local =
            day * SECONDS_PER_CIVIL_DAY + self.time.to_second().second as i64;
        ITimestamp {
            second: local - offset.second as i64,
            nanosecond: self.time.subsec_nanosecond,
        }
    }
}

/// A count of days since `1970-01-01`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IEpochDay {
    pub(crate) epoch_day: i32,
}

impl IEpochDay {
    /// Returns the Gregorian date of this epoch day.
    ///
    /// Days are counted in 400 year eras starting on March 1, which puts the
    /// leap day at the end of each computed year.
    #[inline(always)]
    pub(crate) const fn to_date(&self) -> IDate {
        let days = self.epoch_day + DAYS_BEFORE_EPOCH;
        let era = days.div_euclid(DAYS_PER_ERA);
        // 0..=146_096
        let day_of_era = days - era * DAYS_PER_ERA;
        // 0..=399
        let year_of_era = (day_of_era - day_of_era / 1_460
            + day_of_era / 36_524
            - day_of_era / 146_096)
            / 365;
        // 0..=365, with 0 being March 1.
        let day_of_year = day_of_era
            - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        // 0..=11, with 0 being March.
        let shifted_month = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
        let month = if shifted_month < 10 {
            shifted_month + 3
        } else {
            shifted_month - 9
        };
        let year = year_of_era + era * 400 + (month <= 2) as i32;
        IDate { year: year as i16, month: month as i8, day: day as i8 }
    }

    /// Returns the weekday of this epoch day, with Monday as `0` and Sunday
    /// as `6`.
    #[inline(always)]
    pub(crate) const fn monday_zero_weekday(&self) -> i8 {
        // 1970-01-01 was a Thursday.
        (self.epoch_day + 3).rem_euclid(7) as i8
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDate {
    pub(crate) year: i16,
    pub(crate) month: i8,
    pub(crate) day: i8,
}

impl IDate {
    /// Returns the number of days from `1970-01-01` to this date.
    ///
    /// This is the inverse of [`IEpochDay::to_date`].
    #[inline(always)]
    pub(crate) const fn to_epoch_day(&self) -> IEpochDay {
        let month = self.month as i32;
        let year = self.year as i32 - (month <= 2) as i32;
        let era = year.div_euclid(400);
        let year_of_era = year - era * 400;
        let shifted_month = (month + 9) % 12;
        let day_of_year =
            (153 * shifted_month + 2) / 5 + self.day as i32 - 1;
        let day_of_era = 365 * year_of_era + year_of_era / 4
            - year_of_era / 100
            + day_of_year;
        IEpochDay {
            epoch_day: era * DAYS_PER_ERA + day_of_era - DAYS_BEFORE_EPOCH,
        }
    }

    /// Returns the day of the year, starting at `1` for January 1.
    #[inline(always)]
    pub(crate) const fn day_of_year(&self) -> i16 {
        let mut days = self.day as i16;
        let mut month = 1;
        while month < self.month {
            days += days_in_month(self.year, month) as i16;
            month += 1;
        }
        days
    }
}

/// A time of day to nanosecond precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITime {
    pub(crate) hour: i8,
    pub(crate) minute: i8,
    pub(crate) second: i8,
    pub(crate) subsec_nanosecond: i32,
}

impl ITime {
    #[inline(always)]
    pub(crate) const fn to_second(&self) -> ITimeSecond {
        let second = self.hour as i32 * 3_600
            + self.minute as i32 * 60
            + self.second as i32;
        ITimeSecond { second }
    }

    #[inline(always)]
    pub(crate) const fn to_nanosecond(&self) -> ITimeNanosecond {
        let nanosecond = self.to_second().second as i64 * NANOS_PER_SECOND
            + self.subsec_nanosecond as i64;
        ITimeNanosecond { nanosecond }
    }
}

/// Seconds since midnight, in the range `0..86_400`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITimeSecond {
    pub(crate) second: i32,
}

impl ITimeSecond {
    #[inline(always)]
    pub(crate) const fn to_time(&self) -> ITime {
        ITime {
            hour: (self.second / 3_600) as i8,
            minute: (self.second % 3_600 / 60) as i8,
            second: (self.second % 60) as i8,
            subsec_nanosecond: 0,
        }
    }
}

/// Nanoseconds since midnight, in the range `0..86_400_000_000_000`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITimeNanosecond {
    pub(crate) nanosecond: i64,
}

impl ITimeNanosecond {
    #[inline(always)]
    pub(crate) const fn to_time(&self) -> ITime {
        let n = self.nanosecond;
        ITime {
            hour: (n / NANOS_PER_HOUR) as i8,
            minute: (n % NANOS_PER_HOUR / NANOS_PER_MINUTE) as i8,
            second: (n % NANOS_PER_MINUTE / NANOS_PER_SECOND) as i8,
            subsec_nanosecond: (n % NANOS_PER_SECOND) as i32,
        }
    }
}

/// Returns true if and only if the given year has 366 days.
#[inline]
pub(crate) const fn is_leap_year(year: i16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the given month of the given year.
#[inline]
pub(crate) const fn days_in_month(year: i16, month: i8) -> i8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns the number of days in the given year.
#[inline]
pub(crate) const fn days_in_year(year: i16) -> i16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_epochday_date() {
        for year in -9999..=9999 {
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month) {
                    let date = IDate { year, month, day };
                    let epoch_day = date.to_epoch_day();
                    let date_roundtrip = epoch_day.to_date();
                    assert_eq!(date, date_roundtrip);
                }
            }
        }
    }

    #[test]
    fn epoch_day_boundaries() {
        let min = IDate { year: -9999, month: 1, day: 1 };
        let max = IDate { year: 9999, month: 12, day: 31 };
        assert_eq!(min.to_epoch_day().epoch_day, EPOCH_DAY_MIN);
        assert_eq!(max.to_epoch_day().epoch_day, EPOCH_DAY_MAX);
        let epoch = IDate { year: 1970, month: 1, day: 1 };
        assert_eq!(epoch.to_epoch_day().epoch_day, 0);
    }

    #[test]
    fn roundtrip_second_time() {
        for second in 0..=86_399 {
            let second = ITimeSecond { second };
            let time = second.to_time();
            let second_roundtrip = time.to_second();
            assert_eq!(second, second_roundtrip);
        }
    }

    #[test]
    fn roundtrip_nanosecond_time() {
        for second in 0..=86_399 {
            for nanosecond in
                [0, 250_000_000, 500_000_000, 750_000_000, 900_000_000]
            {
                let nanosecond = ITimeNanosecond {
                    nanosecond: (second * 1_000_000_000 + nanosecond),
                };
                let time = nanosecond.to_time();
                let nanosecond_roundtrip = time.to_nanosecond();
                assert_eq!(nanosecond, nanosecond_roundtrip);
            }
        }
    }

    #[test]
    fn timestamp_datetime_roundtrip_with_offsets() {
        let offsets = [-64_800, -3_600, 0, 19_800, 64_800];
        let seconds = [-86_401, -1, 0, 1, 951_782_400, 1_709_164_800];
        for &second in seconds.iter() {
            for &offset in offsets.iter() {
                let offset = IOffset { second: offset };
                let ts = ITimestamp { second, nanosecond: 123 };
                let dt = ts.to_datetime(offset);
                assert_eq!(ts, dt.to_timestamp(offset), "for {dt:?}");
            }
        }
    }

    #[test]
    fn negative_timestamp() {
        let ts = ITimestamp { second: -1, nanosecond: 500_000_000 };
        let dt = ts.to_datetime(IOffset { second: 0 });
        assert_eq!(dt.date, IDate { year: 1969, month: 12, day: 31 });
        assert_eq!(
            dt.time,
            ITime {
                hour: 23,
                minute: 59,
                second: 59,
                subsec_nanosecond: 500_000_000
            }
        );
    }

    #[test]
    fn weekday() {
        // 1970-01-01 was a Thursday.
        assert_eq!(IEpochDay { epoch_day: 0 }.monday_zero_weekday(), 3);
        // 1969-12-29 was a Monday.
        assert_eq!(IEpochDay { epoch_day: -3 }.monday_zero_weekday(), 0);
        // 2024-02-29 was a Thursday.
        let d = IDate { year: 2024, month: 2, day: 29 }.to_epoch_day();
        assert_eq!(d.monday_zero_weekday(), 3);
    }

    #[test]
    fn day_of_year() {
        assert_eq!(IDate { year: 2024, month: 1, day: 1 }.day_of_year(), 1);
        assert_eq!(IDate { year: 2024, month: 3, day: 1 }.day_of_year(), 61);
        assert_eq!(IDate { year: 2023, month: 3, day: 1 }.day_of_year(), 60);
        assert_eq!(
            IDate { year: 2024, month: 12, day: 31 }.day_of_year(),
            366
        );
    }

    #[test]
    fn leap_year() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2001));
        assert!(!is_leap_year(2002));
        assert!(!is_leap_year(2003));
        assert!(is_leap_year(2004));
        assert!(is_leap_year(2024));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn number_of_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2024, 3), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 5), 31);
        assert_eq!(days_in_month(2024, 6), 30);
        assert_eq!(days_in_month(2024, 7), 31);
        assert_eq!(days_in_month(2024, 8), 31);
        assert_eq!(days_in_month(2024, 9), 30);
        assert_eq!(days_in_month(2024, 10), 31);
        assert_eq!(days_in_month(2024, 11), 30);
        assert_eq!(days_in_month(2024, 12), 31);

        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(1900), 365);
    }
}
