use crate::{error, Unit};

#[derive(Clone, Debug)]
pub(crate) enum Error {
    FailedAdd { unit: Unit },
    FailedNegate { unit: Unit },
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Period(err).into()
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
            FailedAdd { unit } => write!(
                f,
                "failed to add {unit} of two periods",
                unit = unit.plural(),
            ),
            FailedNegate { unit } => write!(
                f,
                "failed to negate {unit} of period",
                unit = unit.plural(),
            ),
        }
    }
}
