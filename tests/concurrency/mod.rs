use anydate::{
    civil::{date, DateTime},
    tz::{self, Clock, ClockIdentifierName},
    Error, ToPeriod, ZonedDateTime,
};

const THREADS: usize = 100;

#[test]
fn utc_offset_from_many_threads() {
    crate::logger();

    let offsets: Vec<i32> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| s.spawn(|| Clock::UTC.offset_second()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(offsets.len(), THREADS);
    assert!(offsets.iter().all(|&o| o == 0));
}

#[test]
fn datetime_construction_from_many_threads() {
    crate::logger();

    let results: Vec<Result<DateTime, Error>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let day = (i % 28) as i8 + 1;
                s.spawn(move || DateTime::new(2024, 2, day, 12, 30, 0, 0))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (i, result) in results.into_iter().enumerate() {
        let dt = result.unwrap();
        assert_eq!(dt.day(), (i % 28) as i8 + 1);
        assert_eq!(dt.hour(), 12);
    }
}

#[test]
fn shared_values_across_threads() {
    crate::logger();

    let start = ZonedDateTime::new(
        date(2024, 1, 31).at(0, 0, 0, 0),
        Clock::from_offset_seconds(3_600).unwrap(),
    );
    let got: Vec<ZonedDateTime> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| s.spawn(move || start.checked_add((i as i64).days())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
    });
    for (i, zdt) in got.iter().enumerate() {
        assert_eq!(start.until(*zdt).get_hours(), 24 * i as i64);
        assert_eq!(zdt.clock(), start.clock());
    }
}

#[test]
fn global_database_from_many_threads() {
    crate::logger();

    let at =
        date(2024, 7, 1).at(0, 0, 0, 0).to_instant(tz::Offset::UTC).unwrap();
    let offsets: Vec<i32> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let id = ClockIdentifierName::ALL
                    [i % ClockIdentifierName::ALL.len()];
                s.spawn(move || {
                    let clock = Clock::named_at(id, at).unwrap();
                    let again = Clock::named_at(id, at).unwrap();
                    assert_eq!(clock, again);
                    clock.offset_second()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(offsets.len(), THREADS);
    // Every thread saw the same global database.
    assert!(std::ptr::eq(tz::db(), tz::db()));
}
