use anydate::{
    civil::{self, date, datetime, Date, DateTime, Time, Weekday},
    ToPeriod, Unit,
};

use crate::Result;

#[test]
fn leap_years() {
    assert!(civil::is_leap_year(2024));
    assert!(!civil::is_leap_year(1900));
    assert!(civil::is_leap_year(2000));
    assert!(!civil::is_leap_year(2023));

    assert_eq!(civil::days_in_year(2024), 366);
    assert_eq!(civil::days_in_year(1900), 365);
}

#[test]
fn invalid_fields() {
    let err = Date::new(2024, 2, 30).unwrap_err();
    assert!(err.is_invalid_field());
    assert_eq!(err.field(), Some(("day", 30)));

    assert!(Date::new(2023, 2, 29).is_err());
    assert!(Date::new(2024, 13, 1).is_err());
    assert!(Date::new(2024, 0, 1).is_err());
    assert!(Time::new(24, 0, 0).is_err());
    assert!(Time::new(23, 60, 0).is_err());
    assert!(Time::new_with_nanosecond(0, 0, 0, 1_000_000_000).is_err());
    assert!(DateTime::new(2024, 4, 31, 0, 0, 0, 0).is_err());
    assert!(civil::days_in_month(2024, 13).is_err());
}

#[test]
fn month_addition_clamps() -> Result {
    let d = date(2024, 1, 31);
    assert_eq!(d.checked_add(1.month())?, date(2024, 2, 29));
    assert_eq!(d.checked_add(2.months())?, date(2024, 3, 31));
    assert_eq!(date(2023, 1, 31).checked_add(1.month())?, date(2023, 2, 28));
    assert_eq!(date(2024, 2, 29).checked_add(1.year())?, date(2025, 2, 28));
    assert_eq!(date(2024, 3, 31).checked_sub(1.month())?, date(2024, 2, 29));

    // Days are added after months.
    assert_eq!(d.checked_add(1.month().days(1))?, date(2024, 3, 1));

    Ok(())
}

#[test]
fn datetime_arithmetic_carries_into_date() -> Result {
    let dt = datetime(2024, 12, 31, 23, 59, 59, 999_999_999);
    assert_eq!(
        dt.checked_add(1.nanosecond())?,
        datetime(2025, 1, 1, 0, 0, 0, 0),
    );
    assert_eq!(dt.checked_add(25.hours())?.date(), date(2025, 1, 2));
    assert_eq!(
        datetime(2024, 3, 1, 0, 30, 0, 0).checked_sub(1.hour())?,
        datetime(2024, 2, 29, 23, 30, 0, 0),
    );

    Ok(())
}

#[test]
fn epoch_days() -> Result {
    assert_eq!(date(1970, 1, 1).to_epoch_day(), 0);
    assert_eq!(date(2000, 3, 1).to_epoch_day(), 11_017);
    assert_eq!(date(1969, 12, 31).to_epoch_day(), -1);

    for &epoch_day in &[-719_528, -1, 0, 1, 11_016, 19_782, 2_932_896] {
        let d = Date::from_epoch_day(epoch_day)?;
        assert_eq!(d.to_epoch_day(), epoch_day, "{d}");
    }
    assert_eq!(civil::from_epoch_day(19_782)?, (2024, 2, 29));
    assert_eq!(civil::to_epoch_day(2024, 2, 29)?, 19_782);

    Ok(())
}

#[test]
fn weekdays() {
    assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
    assert_eq!(date(2024, 2, 29).weekday(), Weekday::Thursday);
    assert_eq!(date(2000, 1, 1).weekday(), Weekday::Saturday);
}

#[test]
fn differences() -> Result {
    let d1 = date(2024, 1, 31);
    let d2 = date(2024, 2, 29);
    assert_eq!(d1.until(d2), 29.days());
    assert_eq!(d1.until_with_largest_unit(Unit::Month, d2)?, 29.days());
    assert_eq!(
        d1.until_with_largest_unit(Unit::Month, date(2024, 3, 31))?,
        2.months(),
    );
    assert!(d1.until_with_largest_unit(Unit::Hour, d2).is_err());

    let dt1 = datetime(2024, 2, 28, 22, 0, 0, 0);
    let dt2 = datetime(2024, 3, 1, 1, 0, 0, 0);
    assert_eq!(dt1.until(dt2), 1.day().hours(3));
    assert_eq!(dt2.until(dt1), -1.day().hours(3));
    assert_eq!(dt1.until_with_largest_unit(Unit::Hour, dt2)?, 27.hours());
    assert_eq!(
        dt1.until_with_largest_unit(Unit::Day, dt2)?,
        1.day().hours(3),
    );

    Ok(())
}

#[test]
fn ordering() {
    let mut dates = vec![
        date(2024, 3, 1),
        date(-100, 1, 1),
        date(2024, 2, 29),
        date(1970, 1, 1),
    ];
    dates.sort();
    assert_eq!(
        dates,
        vec![
            date(-100, 1, 1),
            date(1970, 1, 1),
            date(2024, 2, 29),
            date(2024, 3, 1),
        ],
    );
}
