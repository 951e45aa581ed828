use crate::{
    error::{tz::Error as E, Error, ErrorContext},
    tz::{rules, ClockIdentifierName, Offset},
    Instant,
};

/// Returns the global [`TimeZoneDatabase`].
///
/// This is the database used by [`Clock::named`](crate::tz::Clock::named)
/// and [`Clock::named_at`](crate::tz::Clock::named_at). It is initialized
/// once, the first time it is requested, and is read-only afterwards. So it
/// may be used from many threads simultaneously without any further
/// synchronization.
///
/// # Example
///
/// ```
/// use anydate::{tz::{self, ClockIdentifierName, ZoneDatabase}, Instant};
///
/// let offset = tz::db().resolve_offset(
///     ClockIdentifierName::AsiaKolkata,
///     Instant::UNIX_EPOCH,
/// )?;
/// assert_eq!(offset.seconds(), 19_800);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn db() -> &'static TimeZoneDatabase {
    #[cfg(not(feature = "std"))]
    {
        static BUNDLED: TimeZoneDatabase = TimeZoneDatabase::bundled();
        &BUNDLED
    }
    #[cfg(feature = "std")]
    {
        use std::sync::OnceLock;

        static DB: OnceLock<TimeZoneDatabase> = OnceLock::new();
        DB.get_or_init(|| {
            let db = TimeZoneDatabase::bundled();
            debug!(
                "initialized global time zone database with {} zones",
                ClockIdentifierName::ALL.len(),
            );
            db
        })
    }
}

/// A source of UTC offsets for named time zones.
///
/// Implementations answer a single question: what is the UTC offset for the
/// given zone at the given instant? The bundled implementation is
/// [`TimeZoneDatabase`], but callers may provide their own (for example, to
/// pin offsets in tests, or to consult a system database).
///
/// Implementations should return an error for which
/// [`Error::is_unknown_zone`] is true when the zone isn't known, and one for
/// which [`Error::is_zone_data_unavailable`] is true when the data needed to
/// answer isn't available. Since constructing those errors is private to
/// this crate, implementations typically forward to another database such as
/// [`TimeZoneDatabase::none`].
pub trait ZoneDatabase: Send + Sync {
    /// Returns the UTC offset in effect for the zone `id` at the instant
    /// `at`.
    fn resolve_offset(
        &self,
        id: ClockIdentifierName,
        at: Instant,
    ) -> Result<Offset, Error>;
}

impl<'a, T: ?Sized + ZoneDatabase> ZoneDatabase for &'a T {
    #[inline]
    fn resolve_offset(
        &self,
        id: ClockIdentifierName,
        at: Instant,
    ) -> Result<Offset, Error> {
        (**self).resolve_offset(id, at)
    }
}

/// A time zone database compiled into this crate.
///
/// Every [`ClockIdentifierName`] has a rule in the bundled database. Rules
/// consist of a standard offset and, for zones that observe daylight saving
/// time, the yearly transitions into and out of it. Rules are applied to
/// every year, so offsets for dates before the current rules were adopted
/// may differ from the historical record.
///
/// A database that never answers is available via
/// [`TimeZoneDatabase::none`].
#[derive(Debug)]
pub struct TimeZoneDatabase {
    kind: TimeZoneDatabaseKind,
}

#[derive(Debug)]
enum TimeZoneDatabaseKind {
    None,
    Bundled,
}

impl TimeZoneDatabase {
    /// Returns the database of rules compiled into this crate.
    pub const fn bundled() -> TimeZoneDatabase {
        TimeZoneDatabase { kind: TimeZoneDatabaseKind::Bundled }
    }

    /// Returns a database that has no data.
    ///
    /// Every query returns an error for which
    /// [`Error::is_zone_data_unavailable`] is true.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::{
    ///     tz::{ClockIdentifierName, TimeZoneDatabase, ZoneDatabase},
    ///     Instant,
    /// };
    ///
    /// let db = TimeZoneDatabase::none();
    /// let err = db
    ///     .resolve_offset(ClockIdentifierName::Utc, Instant::UNIX_EPOCH)
    ///     .unwrap_err();
    /// assert!(err.is_zone_data_unavailable());
    /// ```
    pub const fn none() -> TimeZoneDatabase {
        TimeZoneDatabase { kind: TimeZoneDatabaseKind::None }
    }
}

impl ZoneDatabase for TimeZoneDatabase {
    fn resolve_offset(
        &self,
        id: ClockIdentifierName,
        at: Instant,
    ) -> Result<Offset, Error> {
        match self.kind {
            TimeZoneDatabaseKind::None => {
                Err(Error::from(E::ZoneDataUnavailable { id }))
            }
            TimeZoneDatabaseKind::Bundled => {
                let offset = rules::lookup(id)
                    .to_offset(at)
                    .with_context(|| E::FailedResolve { id })?;
                trace!("resolved {id} at {at} to UTC offset {offset}");
                Ok(offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_resolves_every_zone() {
        let db = TimeZoneDatabase::bundled();
        for &id in ClockIdentifierName::ALL {
            let result = db.resolve_offset(id, Instant::UNIX_EPOCH);
            assert!(result.is_ok(), "{id}");
        }
    }

    #[test]
    fn none_resolves_nothing() {
        let db = TimeZoneDatabase::none();
        for &id in ClockIdentifierName::ALL {
            let err = db.resolve_offset(id, Instant::UNIX_EPOCH).unwrap_err();
            assert!(err.is_zone_data_unavailable(), "{id}");
        }
    }

    #[test]
    fn dyn_database() {
        let db: &dyn ZoneDatabase = &TimeZoneDatabase::bundled();
        let offset = db
            .resolve_offset(ClockIdentifierName::AsiaKathmandu, Instant::MAX)
            .unwrap();
        assert_eq!(offset.seconds(), 20_700);
    }

    #[cfg(feature = "std")]
    #[test]
    fn global_is_shared() {
        assert!(core::ptr::eq(db(), db()));
    }
}
