use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    FailedAddPeriod,
    FailedToInstant,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Zoned(err).into()
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
            FailedAddPeriod => {
                f.write_str("failed to add period to zoned datetime")
            }
            FailedToInstant => f.write_str(
                "failed to convert zoned datetime to an instant",
            ),
        }
    }
}
