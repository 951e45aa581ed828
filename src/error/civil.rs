use crate::{error, Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    FailedAddPeriodDate,
    FailedAddPeriodDateTime,
    FailedAddPeriodTime,
    FailedEpochDay,
    LargestUnitTooBig { what: &'static str, unit: Unit },
    LargestUnitTooSmall { what: &'static str, unit: Unit },
    TimeCrossesMidnight,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Civil(err).into()
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
            FailedAddPeriodDate => f.write_str("failed to add period to date"),
            FailedAddPeriodDateTime => {
                f.write_str("failed to add period to datetime")
            }
            FailedAddPeriodTime => f.write_str("failed to add period to time"),
            FailedEpochDay => {
                f.write_str("failed to convert date to or from epoch day")
            }
            LargestUnitTooBig { what, unit } => write!(
                f,
                "the difference between two {what} must use hours \
                 or smaller for its largest unit, but found {unit}",
                unit = unit.plural(),
            ),
            LargestUnitTooSmall { what, unit } => write!(
                f,
                "the difference between two {what} must use days \
                 or bigger for its largest unit, but found {unit}",
                unit = unit.plural(),
            ),
            TimeCrossesMidnight => f.write_str(
                "adding period to time crossed midnight \
                 (use wrapping arithmetic to discard the day carry)",
            ),
        }
    }
}
