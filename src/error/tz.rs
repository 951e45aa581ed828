use alloc::boxed::Box;

use crate::{error, tz::ClockIdentifierName};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    FailedResolve { id: ClockIdentifierName },
    InvalidOffset { seconds: i64 },
    UnknownZone { name: Box<str> },
    ZoneDataUnavailable { id: ClockIdentifierName },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Tz(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            FailedResolve { id } => write!(
                f,
                "failed to resolve UTC offset for time zone `{id}`",
                id = id.raw_value(),
            ),
            InvalidOffset { seconds } => write!(
                f,
                "UTC offset of {seconds} seconds is not in the required \
                 range of -64800..=64800 (-18:00..=+18:00)",
            ),
            UnknownZone { ref name } => {
                write!(f, "time zone identifier `{name}` is not recognized")
            }
            ZoneDataUnavailable { id } => write!(
                f,
                "time zone database is unavailable and cannot resolve `{id}`",
                id = id.raw_value(),
            ),
        }
    }
}
