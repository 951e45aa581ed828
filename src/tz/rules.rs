/*!
The rules used by the bundled zone database.

Each named zone is described by a rule in the style of POSIX's `TZ`
environment variable: a standard offset, plus an optional daylight saving
time (DST) offset along with the points in the year at which DST starts and
ends. For example, `America/New_York` is `EST5EDT,M3.2.0,M11.1.0`. That is,
standard time is `-05:00`, DST is `-04:00`, DST starts on the second Sunday
of March at 02:00 and DST ends on the first Sunday of November at 02:00.

The rules are evaluated for every year, past and future. There is no
historical data. So the offsets returned are only correct for years in
which the current rules were in force.

Note that a rule's transition times are in local wall clock time. The start
of DST is expressed in standard time while the end of DST is expressed in
DST.
*/

use crate::{
    civil::{Date, DateTime, Time, Weekday},
    error::Error,
    tz::{ClockIdentifierName, Offset},
    Instant, ToPeriod,
};

/// The rule for a single zone.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ZoneRule {
    std_offset: Offset,
    dst: Option<DstRule>,
}

/// The DST offset and the transitions into and out of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DstRule {
    offset: Offset,
    start: Transition,
    end: Transition,
}

/// A specification of the day and time at which a DST transition occurs.
///
/// This corresponds to the `Mm.w.d/time` form in a POSIX `TZ` string. The
/// `week` is in `1..=5`, where `5` means "the last `weekday` in `month`."
/// Week `1` is the first week in which `weekday` occurs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Transition {
    month: i8,
    week: i8,
    weekday: Weekday,
    /// Seconds after local midnight. This may be negative or exceed 24
    /// hours.
    seconds: i32,
}

/// The DST period in a particular year, in UTC.
#[derive(Debug, Eq, PartialEq)]
struct DstInfo {
    /// The start time (inclusive) that DST begins.
    ///
    /// Note that this may be greater than `end`. This tends to happen in the
    /// southern hemisphere.
    start: DateTime,
    /// The end time (exclusive) that DST ends.
    end: DateTime,
}

impl ZoneRule {
    const fn fixed(seconds: i32) -> ZoneRule {
        ZoneRule { std_offset: Offset::constant_seconds(seconds), dst: None }
    }

    const fn with_dst(
        std_seconds: i32,
        dst_seconds: i32,
        start: Transition,
        end: Transition,
    ) -> ZoneRule {
        ZoneRule {
            std_offset: Offset::constant_seconds(std_seconds),
            dst: Some(DstRule {
                offset: Offset::constant_seconds(dst_seconds),
                start,
                end,
            }),
        }
    }

    /// Returns the UTC offset in effect at the given instant.
    pub(crate) fn to_offset(&self, instant: Instant) -> Result<Offset, Error> {
        let Some(ref dst) = self.dst else { return Ok(self.std_offset) };
        let dt = instant.to_datetime(Offset::UTC);
        let info = self.dst_info_utc(dst, dt.year())?;
        if info.in_dst(dt) {
            Ok(dst.offset)
        } else {
            Ok(self.std_offset)
        }
    }

    fn dst_info_utc(
        &self,
        dst: &DstRule,
        year: i16,
    ) -> Result<DstInfo, Error> {
        // DST starts with respect to standard time, so offset it by the
        // standard offset.
        let start = dst.start.to_datetime(year, self.std_offset)?;
        // DST ends with respect to DST, so offset it by the DST offset.
        let end = dst.end.to_datetime(year, dst.offset)?;
        Ok(DstInfo { start, end })
    }
}

impl DstInfo {
    /// Returns true if and only if the given UTC datetime ought to be
    /// considered in DST.
    fn in_dst(&self, utc_dt: DateTime) -> bool {
        if self.start <= self.end {
            self.start <= utc_dt && utc_dt < self.end
        } else {
            !(self.end <= utc_dt && utc_dt < self.start)
        }
    }
}

impl Transition {
    /// The equivalent of `M{month}.{week}.{weekday}/{hour}`.
    const fn new(month: i8, week: i8, weekday: Weekday, hour: i32) -> Self {
        Transition { month, week, weekday, seconds: hour * 60 * 60 }
    }

    /// Turns this transition into a UTC datetime in the year given, where
    /// the transition time is in the local time of `offset`.
    ///
    /// The datetime returned always has a year equal to the year given. When
    /// the transition (combined with the offset) would fall outside of the
    /// year, the minimal or maximal datetime of the year is returned.
    fn to_datetime(
        &self,
        year: i16,
        offset: Offset,
    ) -> Result<DateTime, Error> {
        let mkmin = || -> Result<DateTime, Error> {
            Ok(Date::new(year, 1, 1)?.to_datetime(Time::MIN))
        };
        let mkmax = || -> Result<DateTime, Error> {
            Ok(Date::new(year, 12, 31)?.to_datetime(Time::MAX))
        };

        let date = self.to_date(year)?;
        let seconds = i64::from(self.seconds) - i64::from(offset.seconds());
        let Ok(dt) = date.to_datetime(Time::MIN).checked_add(seconds.seconds())
        else {
            return if seconds < 0 { mkmin() } else { mkmax() };
        };
        if dt.year() < year {
            mkmin()
        } else if dt.year() > year {
            mkmax()
        } else {
            Ok(dt)
        }
    }

    fn to_date(&self, year: i16) -> Result<Date, Error> {
        let first = Date::new(year, self.month, 1)?;
        if self.week == 5 {
            let last = first.last_of_month();
            let back = self.weekday.until(last.weekday());
            return last.checked_add_days(-i64::from(back));
        }
        let forward = first.weekday().until(self.weekday);
        let days = i64::from(forward) + i64::from(self.week - 1) * 7;
        first.checked_add_days(days)
    }
}

const US_START: Transition = Transition::new(3, 2, Weekday::Sunday, 2);
const US_END: Transition = Transition::new(11, 1, Weekday::Sunday, 2);
const EU_START: Transition = Transition::new(3, 5, Weekday::Sunday, 1);
const EU_END: Transition = Transition::new(10, 5, Weekday::Sunday, 2);

const H: i32 = 60 * 60;

/// Returns the rule for the given zone.
///
/// `EU_START` and `EU_END` are in London's local time. Europe switches at
/// 01:00 UTC everywhere, so zones east of London move the hour forward.
pub(crate) fn lookup(id: ClockIdentifierName) -> ZoneRule {
    use ClockIdentifierName::*;

    match id {
        Utc | Gmt => ZoneRule::fixed(0),
        AfricaJohannesburg => ZoneRule::fixed(2 * H),
        AmericaAnchorage => {
            ZoneRule::with_dst(-9 * H, -8 * H, US_START, US_END)
        }
        AmericaChicago => ZoneRule::with_dst(-6 * H, -5 * H, US_START, US_END),
        AmericaDenver => ZoneRule::with_dst(-7 * H, -6 * H, US_START, US_END),
        AmericaHalifax => ZoneRule::with_dst(-4 * H, -3 * H, US_START, US_END),
        AmericaLosAngeles => {
            ZoneRule::with_dst(-8 * H, -7 * H, US_START, US_END)
        }
        AmericaMexicoCity => ZoneRule::fixed(-6 * H),
        AmericaNewYork => ZoneRule::with_dst(-5 * H, -4 * H, US_START, US_END),
        AmericaPhoenix => ZoneRule::fixed(-7 * H),
        AmericaSaoPaulo => ZoneRule::fixed(-3 * H),
        AmericaStJohns => ZoneRule::with_dst(
            -(3 * H + 30 * 60),
            -(2 * H + 30 * 60),
            US_START,
            US_END,
        ),
        AsiaDubai => ZoneRule::fixed(4 * H),
        AsiaKathmandu => ZoneRule::fixed(5 * H + 45 * 60),
        AsiaKolkata => ZoneRule::fixed(5 * H + 30 * 60),
        AsiaSeoul | AsiaTokyo => ZoneRule::fixed(9 * H),
        AsiaShanghai | AsiaSingapore => ZoneRule::fixed(8 * H),
        // AEST-10AEDT,M10.1.0,M4.1.0/3
        AustraliaSydney => ZoneRule::with_dst(
            10 * H,
            11 * H,
            Transition::new(10, 1, Weekday::Sunday, 2),
            Transition::new(4, 1, Weekday::Sunday, 3),
        ),
        // CET-1CEST,M3.5.0,M10.5.0/3
        EuropeBerlin | EuropeParis => ZoneRule::with_dst(
            H,
            2 * H,
            Transition { seconds: 2 * H, ..EU_START },
            Transition { seconds: 3 * H, ..EU_END },
        ),
        // GMT0BST,M3.5.0/1,M10.5.0
        EuropeLondon => ZoneRule::with_dst(0, H, EU_START, EU_END),
        EuropeMoscow => ZoneRule::fixed(3 * H),
        // NZST-12NZDT,M9.5.0,M4.1.0/3
        PacificAuckland => ZoneRule::with_dst(
            12 * H,
            13 * H,
            Transition::new(9, 5, Weekday::Sunday, 2),
            Transition::new(4, 1, Weekday::Sunday, 3),
        ),
        PacificHonolulu => ZoneRule::fixed(-10 * H),
        PacificKiritimati => ZoneRule::fixed(14 * H),
        PacificPagoPago => ZoneRule::fixed(-11 * H),
    }
}

#[cfg(test)]
mod tests {
    use crate::civil::{date, datetime};

    use super::*;

    fn offset_at(id: ClockIdentifierName, dt: DateTime) -> i32 {
        let instant = dt.to_instant(Offset::UTC).unwrap();
        lookup(id).to_offset(instant).unwrap().seconds()
    }

    #[test]
    fn transition_dates() {
        let t = US_START;
        assert_eq!(t.to_date(2024).unwrap(), date(2024, 3, 10));
        assert_eq!(t.to_date(2025).unwrap(), date(2025, 3, 9));
        let t = US_END;
        assert_eq!(t.to_date(2024).unwrap(), date(2024, 11, 3));
        // Week 5 is the last Sunday, whether it's the fourth or fifth.
        assert_eq!(EU_START.to_date(2024).unwrap(), date(2024, 3, 31));
        assert_eq!(EU_START.to_date(2025).unwrap(), date(2025, 3, 30));
        assert_eq!(EU_END.to_date(2024).unwrap(), date(2024, 10, 27));
        // Feb 2024 ends on a Thursday, the 29th.
        let t = Transition::new(2, 5, Weekday::Thursday, 0);
        assert_eq!(t.to_date(2024).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn transition_datetime_clamps_to_year() {
        let t = Transition::new(1, 1, Weekday::Monday, 0);
        // 2024-01-01 is a Monday, so going east pushes into 2023.
        let dt = t.to_datetime(2024, Offset::constant(5)).unwrap();
        assert_eq!(dt, datetime(2024, 1, 1, 0, 0, 0, 0));

        let t = Transition::new(12, 5, Weekday::Tuesday, 23);
        // 2024-12-31 is a Tuesday, so going west pushes into 2025.
        let dt = t.to_datetime(2024, Offset::constant(-5)).unwrap();
        assert_eq!(dt, datetime(2024, 12, 31, 23, 59, 59, 999_999_999));
    }

    #[test]
    fn new_york() {
        use ClockIdentifierName::AmericaNewYork as NY;

        assert_eq!(offset_at(NY, datetime(2024, 1, 15, 12, 0, 0, 0)), -5 * H);
        assert_eq!(offset_at(NY, datetime(2024, 7, 15, 12, 0, 0, 0)), -4 * H);
        // 2024-03-10T02:00-05:00 is 07:00 UTC.
        let before = datetime(2024, 3, 10, 6, 59, 59, 999_999_999);
        assert_eq!(offset_at(NY, before), -5 * H);
        assert_eq!(offset_at(NY, datetime(2024, 3, 10, 7, 0, 0, 0)), -4 * H);
        // 2024-11-03T02:00-04:00 is 06:00 UTC.
        let before = datetime(2024, 11, 3, 5, 59, 59, 999_999_999);
        assert_eq!(offset_at(NY, before), -4 * H);
        assert_eq!(offset_at(NY, datetime(2024, 11, 3, 6, 0, 0, 0)), -5 * H);
    }

    #[test]
    fn southern_hemisphere() {
        use ClockIdentifierName::{AustraliaSydney as SYD, PacificAuckland};

        assert_eq!(offset_at(SYD, datetime(2024, 1, 15, 0, 0, 0, 0)), 11 * H);
        assert_eq!(offset_at(SYD, datetime(2024, 7, 15, 0, 0, 0, 0)), 10 * H);
        // 2024-04-07T03:00+11:00 is 2024-04-06T16:00 UTC.
        let before = datetime(2024, 4, 6, 15, 59, 59, 0);
        assert_eq!(offset_at(SYD, before), 11 * H);
        assert_eq!(offset_at(SYD, datetime(2024, 4, 6, 16, 0, 0, 0)), 10 * H);
        // 2024-10-06T02:00+10:00 is 2024-10-05T16:00 UTC.
        let before = datetime(2024, 10, 5, 15, 59, 59, 0);
        assert_eq!(offset_at(SYD, before), 10 * H);
        assert_eq!(offset_at(SYD, datetime(2024, 10, 5, 16, 0, 0, 0)), 11 * H);

        let jan = datetime(2024, 1, 15, 0, 0, 0, 0);
        assert_eq!(offset_at(PacificAuckland, jan), 13 * H);
    }

    #[test]
    fn europe_switches_at_one_utc() {
        use ClockIdentifierName::*;

        for id in [EuropeLondon, EuropeParis, EuropeBerlin] {
            let rule = lookup(id);
            let std = rule.std_offset.seconds();
            let before = datetime(2024, 3, 31, 0, 59, 59, 0);
            assert_eq!(offset_at(id, before), std, "{id}");
            let after = datetime(2024, 3, 31, 1, 0, 0, 0);
            assert_eq!(offset_at(id, after), std + H, "{id}");
            let before = datetime(2024, 10, 27, 0, 59, 59, 0);
            assert_eq!(offset_at(id, before), std + H, "{id}");
            let after = datetime(2024, 10, 27, 1, 0, 0, 0);
            assert_eq!(offset_at(id, after), std, "{id}");
        }
    }

    #[test]
    fn every_zone_resolves_at_the_extremes() {
        for &id in ClockIdentifierName::ALL {
            let rule = lookup(id);
            assert!(rule.to_offset(Instant::MIN).is_ok(), "{id}");
            assert!(rule.to_offset(Instant::MAX).is_ok(), "{id}");
            assert!(rule.to_offset(Instant::UNIX_EPOCH).is_ok(), "{id}");
        }
    }
}
