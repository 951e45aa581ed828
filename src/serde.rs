/*!
Serde support for the value types in this crate.

Values serialize as structs of their fields. For example, a
[`Date`](crate::civil::Date) serializes as `{"year":2024,"month":2,"day":29}`
in JSON. Deserialization goes through the same validating constructors as
the rest of the API, so an invalid field fails deserialization.

Time zone identifiers serialize as their raw value, for example
`"America/New_York"`. A named [`Clock`](crate::tz::Clock) serializes its
resolved offset along with its identifier, and deserializing it does not
consult a zone database.
*/

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    civil::{Date, DateTime, Time},
    tz::{Clock, ClockIdentifierName, Offset},
    Instant, Period, ZonedDateTime,
};

#[derive(Deserialize, Serialize)]
struct DateRepr {
    year: i16,
    month: i8,
    day: i8,
}

#[derive(Deserialize, Serialize)]
struct TimeRepr {
    hour: i8,
    minute: i8,
    second: i8,
    #[serde(default)]
    subsec_nanosecond: i32,
}

#[derive(Deserialize, Serialize)]
struct DateTimeRepr {
    date: Date,
    time: Time,
}

#[derive(Deserialize, Serialize)]
struct InstantRepr {
    second: i64,
    #[serde(default)]
    nanosecond: i32,
}

#[derive(Deserialize, Serialize)]
struct ClockRepr {
    offset_seconds: i32,
    #[serde(default)]
    identifier: Option<ClockIdentifierName>,
}

#[derive(Deserialize, Serialize)]
struct ZonedDateTimeRepr {
    datetime: DateTime,
    clock: Clock,
}

#[derive(Default, Deserialize, Serialize)]
#[serde(default)]
struct PeriodRepr {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    nanoseconds: i64,
}

impl Serialize for Date {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        DateRepr { year: self.year(), month: self.month(), day: self.day() }
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Date, D::Error> {
        let r = DateRepr::deserialize(deserializer)?;
        Date::new(r.year, r.month, r.day).map_err(de::Error::custom)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        TimeRepr {
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            subsec_nanosecond: self.subsec_nanosecond(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Time, D::Error> {
        let r = TimeRepr::deserialize(deserializer)?;
        Time::new_with_nanosecond(
            r.hour,
            r.minute,
            r.second,
            r.subsec_nanosecond,
        )
        .map_err(de::Error::custom)
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        DateTimeRepr { date: self.date(), time: self.time() }
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime, D::Error> {
        let r = DateTimeRepr::deserialize(deserializer)?;
        Ok(DateTime::from_parts(r.date, r.time))
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        InstantRepr { second: self.second(), nanosecond: self.nanosecond() }
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Instant, D::Error> {
        let r = InstantRepr::deserialize(deserializer)?;
        Instant::new(r.second, r.nanosecond).map_err(de::Error::custom)
    }
}

impl Serialize for Offset {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.seconds())
    }
}

impl<'de> Deserialize<'de> for Offset {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Offset, D::Error> {
        let seconds = i32::deserialize(deserializer)?;
        Offset::from_seconds(seconds).map_err(de::Error::custom)
    }
}

impl Serialize for ClockIdentifierName {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.raw_value())
    }
}

impl<'de> Deserialize<'de> for ClockIdentifierName {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ClockIdentifierName, D::Error> {
        struct IdentifierVisitor;

        impl<'de> de::Visitor<'de> for IdentifierVisitor {
            type Value = ClockIdentifierName;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a time zone identifier string")
            }

            #[inline]
            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<ClockIdentifierName, E> {
                value.parse().map_err(de::Error::custom)
            }

            #[inline]
            fn visit_bytes<E: de::Error>(
                self,
                value: &[u8],
            ) -> Result<ClockIdentifierName, E> {
                let value = core::str::from_utf8(value).map_err(|_| {
                    de::Error::invalid_value(
                        de::Unexpected::Bytes(value),
                        &self,
                    )
                })?;
                self.visit_str(value)
            }
        }

        deserializer.deserialize_str(IdentifierVisitor)
    }
}

impl Serialize for Clock {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        ClockRepr {
            offset_seconds: self.offset_second(),
            identifier: self.identifier(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Clock {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Clock, D::Error> {
        let r = ClockRepr::deserialize(deserializer)?;
        let offset =
            Offset::from_seconds(r.offset_seconds).map_err(de::Error::custom)?;
        Ok(Clock::from_parts(offset, r.identifier))
    }
}

impl Serialize for ZonedDateTime {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        ZonedDateTimeRepr { datetime: self.datetime(), clock: self.clock() }
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ZonedDateTime {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ZonedDateTime, D::Error> {
        let r = ZonedDateTimeRepr::deserialize(deserializer)?;
        Ok(ZonedDateTime::new(r.datetime, r.clock))
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        PeriodRepr {
            years: self.get_years(),
            months: self.get_months(),
            days: self.get_days(),
            hours: self.get_hours(),
            minutes: self.get_minutes(),
            seconds: self.get_seconds(),
            nanoseconds: self.get_nanoseconds(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Period, D::Error> {
        let r = PeriodRepr::deserialize(deserializer)?;
        Ok(Period::new()
            .years(r.years)
            .months(r.months)
            .days(r.days)
            .hours(r.hours)
            .minutes(r.minutes)
            .seconds(r.seconds)
            .nanoseconds(r.nanoseconds))
    }
}
