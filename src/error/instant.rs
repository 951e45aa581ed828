use crate::{error, Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    CalendarUnits { unit: Unit },
    FailedAddPeriod,
    #[allow(dead_code)] // not used without std
    SystemTimeOutOfRange,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Instant(err).into()
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
            CalendarUnits { unit } => write!(
                f,
                "operation on an instant can only use fixed length units \
                 (hours or smaller), but found non-zero {unit}",
                unit = unit.plural(),
            ),
            FailedAddPeriod => f.write_str("failed to add period to instant"),
            SystemTimeOutOfRange => f.write_str(
                "system time is outside the range supported by instants",
            ),
        }
    }
}
