use crate::Instant;

/// A source of the current time.
///
/// This trait is how the routines in this crate that need "now" get it. The
/// default source, [`SystemTimeSource`], reads the system clock. Callers can
/// provide their own source to make code that depends on the current time
/// deterministic.
///
/// Implementations must be safe to share across threads.
///
/// # Example
///
/// ```
/// use anydate::{tz::Clock, Instant, TimeSource, ZonedDateTime};
///
/// #[derive(Debug)]
/// struct Frozen(Instant);
///
/// impl TimeSource for Frozen {
///     fn now(&self) -> Instant {
///         self.0
///     }
/// }
///
/// let source = Frozen(Instant::from_second(1_709_208_000)?);
/// let zdt = ZonedDateTime::now_with(&source, Clock::UTC);
/// assert_eq!(zdt.to_string(), "2024-02-29T12:00:00+00:00");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TimeSource: Send + Sync {
    /// Returns the current instant according to this source.
    fn now(&self) -> Instant;
}

impl<'a, T: ?Sized + TimeSource> TimeSource for &'a T {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// A time source that reads the system clock.
///
/// When the system clock reports a time outside the range supported by
/// [`Instant`], the time is clamped to [`Instant::MIN`] or
/// [`Instant::MAX`] and a warning is logged.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

#[cfg(feature = "std")]
impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        let now = std::time::SystemTime::now();
        match Instant::try_from(now) {
            Ok(instant) => instant,
            Err(_err) => {
                warn!("system clock out of range, clamping: {_err}");
                if now >= std::time::SystemTime::UNIX_EPOCH {
                    Instant::MAX
                } else {
                    Instant::MIN
                }
            }
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn system_time_is_after_2024() {
        let now = SystemTimeSource.now();
        assert!(now > Instant::from_second(1_704_067_200).unwrap());
        assert!(Instant::now() >= now);
    }
}
