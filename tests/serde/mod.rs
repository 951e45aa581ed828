use anydate::{
    civil::{date, datetime, Date},
    tz::{Clock, ClockIdentifierName},
    Instant, Period, ToPeriod, ZonedDateTime,
};

#[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
struct Meeting {
    on: Date,
    every: Period,
    id: ClockIdentifierName,
}

#[test]
fn nested_in_user_types() -> anyhow::Result<()> {
    let meeting = Meeting {
        on: date(2024, 2, 29),
        every: 1.month(),
        id: ClockIdentifierName::EuropeLondon,
    };
    let json = serde_json::to_string(&meeting)?;
    let got: Meeting = serde_json::from_str(&json)?;
    assert_eq!(got, meeting);
    Ok(())
}

#[test]
fn invalid_values_are_rejected() {
    assert!(serde_json::from_str::<Date>(r#"{"year":2024,"month":2,"day":30}"#)
        .is_err());
    assert!(serde_json::from_str::<Instant>(r#"{"second":253402236000}"#)
        .is_err());
    assert!(serde_json::from_str::<ClockIdentifierName>(r#""utc""#).is_err());
}

#[test]
fn zoned_keeps_clock() -> anyhow::Result<()> {
    let at = Instant::from_second(1_709_208_000)?;
    let clock = Clock::named_at(ClockIdentifierName::AsiaKathmandu, at)?;
    let zdt = ZonedDateTime::from_instant(at, clock);
    assert_eq!(zdt.datetime(), datetime(2024, 2, 29, 17, 45, 0, 0));

    let value = serde_json::to_value(zdt)?;
    assert_eq!(value["clock"]["identifier"], "Asia/Kathmandu");
    assert_eq!(value["clock"]["offset_seconds"], 20_700);
    assert_eq!(value["datetime"]["time"]["minute"], 45);

    let got: ZonedDateTime = serde_json::from_value(value)?;
    assert_eq!(got.clock(), clock);
    assert_eq!(got.to_instant()?, at);
    Ok(())
}
