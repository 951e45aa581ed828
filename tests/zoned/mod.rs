use anydate::{
    civil::datetime,
    tz::{Clock, ClockIdentifierName, Offset, TimeZoneDatabase},
    Instant, ToPeriod, Unit, ZonedDateTime,
};

use crate::Result;

fn utc(y: i16, m: i8, d: i8, h: i8, min: i8, s: i8) -> Instant {
    datetime(y, m, d, h, min, s, 0).to_instant(Offset::UTC).unwrap()
}

#[test]
fn new_york_daylight_saving() -> Result {
    crate::logger();
    let id = ClockIdentifierName::AmericaNewYork;

    let before = Clock::named_at(id, utc(2024, 3, 10, 6, 59, 59))?;
    let after = Clock::named_at(id, utc(2024, 3, 10, 7, 0, 0))?;
    assert_eq!(before.offset_second(), -5 * 3_600);
    assert_eq!(after.offset_second(), -4 * 3_600);

    let before = Clock::named_at(id, utc(2024, 11, 3, 5, 59, 59))?;
    let after = Clock::named_at(id, utc(2024, 11, 3, 6, 0, 0))?;
    assert_eq!(before.offset_second(), -4 * 3_600);
    assert_eq!(after.offset_second(), -5 * 3_600);

    Ok(())
}

#[test]
fn sydney_daylight_saving() -> Result {
    crate::logger();
    let id = ClockIdentifierName::AustraliaSydney;

    let before = Clock::named_at(id, utc(2024, 4, 6, 15, 59, 59))?;
    let after = Clock::named_at(id, utc(2024, 4, 6, 16, 0, 0))?;
    assert_eq!(before.offset_second(), 11 * 3_600);
    assert_eq!(after.offset_second(), 10 * 3_600);

    let before = Clock::named_at(id, utc(2024, 10, 5, 15, 59, 59))?;
    let after = Clock::named_at(id, utc(2024, 10, 5, 16, 0, 0))?;
    assert_eq!(before.offset_second(), 10 * 3_600);
    assert_eq!(after.offset_second(), 11 * 3_600);

    Ok(())
}

#[test]
fn unavailable_zone_data() {
    let db = TimeZoneDatabase::none();
    let err = Clock::named_with(
        &db,
        ClockIdentifierName::EuropeBerlin,
        Instant::UNIX_EPOCH,
    )
    .unwrap_err();
    assert!(err.is_zone_data_unavailable());

    let err = "Mars/Olympus_Mons".parse::<ClockIdentifierName>().unwrap_err();
    assert!(err.is_unknown_zone());
}

#[test]
fn arithmetic_keeps_offset() -> Result {
    crate::logger();

    // The clock is resolved in March, before DST starts in New York. Adding
    // a month moves the civil time past the transition, but the offset of
    // the clock stays the same until it's re-resolved.
    let clock = Clock::named_at(
        ClockIdentifierName::AmericaNewYork,
        utc(2024, 3, 1, 12, 0, 0),
    )?;
    let zdt = ZonedDateTime::new(datetime(2024, 3, 1, 7, 0, 0, 0), clock);
    let later = zdt.checked_add(1.month())?;
    assert_eq!(later.datetime(), datetime(2024, 4, 1, 7, 0, 0, 0));
    assert_eq!(later.offset_second(), -5 * 3_600);

    let resolved = later.with_clock(clock.resolved_at(later.to_instant()?)?)?;
    assert_eq!(resolved.offset_second(), -4 * 3_600);
    assert_eq!(resolved.datetime(), datetime(2024, 4, 1, 8, 0, 0, 0));
    assert_eq!(resolved.to_instant()?, later.to_instant()?);

    Ok(())
}

#[test]
fn instant_period_inverse() -> Result {
    let i = utc(2024, 2, 29, 12, 0, 0);
    let periods =
        [1.hour(), 90.minutes(), 3_601.seconds(), -25.hours().seconds(1)];
    for p in periods {
        assert_eq!(i.checked_add(p)?.checked_sub(p)?, i, "{p:?}");
        assert_eq!(i + p - p, i);
    }

    let err = i.checked_add(1.day()).unwrap_err();
    assert!(err.to_string().contains("non-zero days"), "{err}");

    Ok(())
}

#[test]
fn instant_total_order() {
    let mut instants = vec![
        Instant::MAX,
        Instant::new(0, 1).unwrap(),
        Instant::UNIX_EPOCH,
        Instant::new(-1, 999_999_999).unwrap(),
        Instant::MIN,
    ];
    instants.sort();
    assert_eq!(instants[0], Instant::MIN);
    assert_eq!(instants[4], Instant::MAX);
    for pair in instants.windows(2) {
        assert!(pair[0] < pair[1]);
        assert!(!(pair[1] < pair[0]));
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn zoned_differences() -> Result {
    let paris = Clock::from_offset_seconds(3_600)?;
    let zdt1 = ZonedDateTime::new(datetime(2024, 1, 31, 0, 0, 0, 0), paris);
    let zdt2 =
        ZonedDateTime::new(datetime(2024, 2, 28, 23, 0, 0, 0), Clock::UTC);

    assert_eq!(zdt1.until(zdt2), 696.hours());
    assert_eq!(zdt1.until_with_largest_unit(Unit::Month, zdt2)?, 29.days());
    assert_eq!(zdt2.since(zdt1), 696.hours());
    assert!(zdt1 < zdt2);

    // Equal instants compare equal regardless of clock.
    let same =
        ZonedDateTime::new(datetime(2024, 1, 30, 23, 0, 0, 0), Clock::UTC);
    assert_eq!(zdt1, same);

    Ok(())
}
