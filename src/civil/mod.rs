/*!
Civil ("wall clock") dates and times.

The types in this module have no association with a time zone. A
[`DateTime`] is a date on the proleptic Gregorian calendar combined with a
clock time. It does not identify a unique instant in time until it is paired
with a [`Clock`](crate::tz::Clock), which is what a
[`ZonedDateTime`](crate::ZonedDateTime) does.

Alongside the value types, this module exposes the raw calendar arithmetic
they're built on: leap years, month lengths and conversions between dates and
the number of days since the Unix epoch.

# Example

```
use anydate::civil::{self, Date};

assert!(civil::is_leap_year(2024));
assert!(!civil::is_leap_year(1900));
assert!(civil::is_leap_year(2000));

let epoch_day = civil::to_epoch_day(2024, 2, 29)?;
assert_eq!(civil::from_epoch_day(epoch_day)?, (2024, 2, 29));
assert_eq!(Date::from_epoch_day(epoch_day)?, Date::new(2024, 2, 29)?);

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use crate::{
    error::{civil::Error as E, Error, ErrorContext},
    util::itime,
};

pub use self::{
    date::Date, datetime::DateTime, time::Time, weekday::Weekday,
};

mod date;
mod datetime;
mod time;
mod weekday;

/// Returns true if and only if the given year is a leap year in the
/// Gregorian calendar.
///
/// A year is a leap year when it is divisible by `4`, except for years
/// divisible by `100` that aren't also divisible by `400`.
///
/// This works for any `i16`, even outside the range supported by [`Date`].
///
/// # Example
///
/// ```
/// use anydate::civil::is_leap_year;
///
/// assert!(is_leap_year(2024));
/// assert!(!is_leap_year(2023));
/// assert!(!is_leap_year(1900));
/// assert!(is_leap_year(2000));
/// assert!(is_leap_year(0));
/// assert!(is_leap_year(-4));
/// ```
#[inline]
pub const fn is_leap_year(year: i16) -> bool {
    itime::is_leap_year(year)
}

/// Returns the number of days in the given year.
///
/// This is `366` for leap years and `365` otherwise.
#[inline]
pub const fn days_in_year(year: i16) -> i16 {
    itime::days_in_year(year)
}

/// Returns the number of days in the given month of the given year.
///
/// # Errors
///
/// This returns an error when the year or the month is out of range.
///
/// # Example
///
/// ```
/// use anydate::civil::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2)?, 29);
/// assert_eq!(days_in_month(2023, 2)?, 28);
/// assert_eq!(days_in_month(2023, 4)?, 30);
/// assert_eq!(days_in_month(2023, 12)?, 31);
/// assert!(days_in_month(2023, 13).unwrap_err().is_invalid_field());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[inline]
pub fn days_in_month(year: i16, month: i8) -> Result<i8, Error> {
    Ok(Date::new(year, month, 1)?.days_in_month())
}

/// Returns the ordinal day of the year for the given date, starting at `1`
/// for January 1.
///
/// # Errors
///
/// This returns an error when any field is out of range.
///
/// # Example
///
/// ```
/// use anydate::civil::day_of_year;
///
/// assert_eq!(day_of_year(2024, 1, 1)?, 1);
/// assert_eq!(day_of_year(2024, 3, 1)?, 61);
/// assert_eq!(day_of_year(2023, 3, 1)?, 60);
/// assert_eq!(day_of_year(2024, 12, 31)?, 366);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[inline]
pub fn day_of_year(year: i16, month: i8, day: i8) -> Result<i16, Error> {
    Ok(Date::new(year, month, day)?.day_of_year())
}

/// Returns the number of days since `1970-01-01` for the given date.
///
/// Dates before the Unix epoch have a negative epoch day.
///
/// # Errors
///
/// This returns an error when any field is out of range.
///
/// # Example
///
/// ```
/// use anydate::civil::to_epoch_day;
///
/// assert_eq!(to_epoch_day(1970, 1, 1)?, 0);
/// assert_eq!(to_epoch_day(1969, 12, 31)?, -1);
/// assert_eq!(to_epoch_day(2000, 3, 1)?, 11_017);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[inline]
pub fn to_epoch_day(year: i16, month: i8, day: i8) -> Result<i32, Error> {
    let date = Date::new(year, month, day).context(E::FailedEpochDay)?;
    Ok(date.to_epoch_day())
}

/// Returns the `(year, month, day)` corresponding to the given number of
/// days since `1970-01-01`.
///
/// This is the inverse of [`to_epoch_day`].
///
/// # Errors
///
/// This returns an error when the epoch day is outside the range supported
/// by [`Date`].
///
/// # Example
///
/// ```
/// use anydate::civil::from_epoch_day;
///
/// assert_eq!(from_epoch_day(0)?, (1970, 1, 1));
/// assert_eq!(from_epoch_day(-1)?, (1969, 12, 31));
/// assert!(from_epoch_day(i32::MAX).unwrap_err().is_invalid_field());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[inline]
pub fn from_epoch_day(epoch_day: i32) -> Result<(i16, i8, i8), Error> {
    let date = Date::from_epoch_day(epoch_day).context(E::FailedEpochDay)?;
    Ok((date.year(), date.month(), date.day()))
}

/// A convenience function for constructing a [`Date`] value.
///
/// # Panics
///
/// This panics if the given year-month-day is invalid. See [`Date::constant`].
#[inline]
pub const fn date(year: i16, month: i8, day: i8) -> Date {
    Date::constant(year, month, day)
}

/// A convenience function for constructing a [`Time`] value.
///
/// # Panics
///
/// This panics if the given fields are invalid. See [`Time::constant`].
#[inline]
pub const fn time(
    hour: i8,
    minute: i8,
    second: i8,
    subsec_nanosecond: i32,
) -> Time {
    Time::constant(hour, minute, second, subsec_nanosecond)
}

/// A convenience function for constructing a [`DateTime`] value.
///
/// # Panics
///
/// This panics if the given fields are invalid. See [`DateTime::constant`].
#[inline]
pub const fn datetime(
    year: i16,
    month: i8,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    subsec_nanosecond: i32,
) -> DateTime {
    DateTime::constant(
        year,
        month,
        day,
        hour,
        minute,
        second,
        subsec_nanosecond,
    )
}
