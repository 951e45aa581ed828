/*!
Immutable calendar and time values.

This crate provides value types for representing points in time and
computing with them:

* [`Instant`] is an absolute point in time, measured in seconds (and
nanoseconds) since the Unix epoch.
* [`civil::Date`], [`civil::Time`] and [`civil::DateTime`] are "civil" (or
"wall clock") values that carry no time zone.
* [`tz::Clock`] is a UTC offset policy. Either a fixed offset or a named
zone like `America/New_York` (see [`tz::ClockIdentifierName`]) whose offset
was resolved at a particular instant.
* [`ZonedDateTime`] pairs a civil datetime with a clock.
* [`Period`] is a calendar-aware length of time used as an operand for
arithmetic on all of the above.

Every type in this crate is a small `Copy` value without interior
mutability. Operations never mutate a value; they return a new one. This
means every value can be freely shared across threads without any
synchronization.

# Example

```
use anydate::{civil::Date, ToPeriod};

let d = Date::new(2024, 1, 31)?;
// Adding a month clamps the day to the end of February.
assert_eq!(d.checked_add(1.month())?, Date::new(2024, 2, 29)?);

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **std** (enabled by default) - When enabled, this crate can read the system
clock and uses a process wide time zone database for named clocks. It also
implements `std::error::Error` for [`Error`].
* **logging** - When enabled, the `log` crate is used to emit messages about
time zone resolution.
* **serde** - When enabled, all value types implement `Serialize` and
`Deserialize`.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Errors are the only thing that allocate. It'd be possible to slim them
// down in core-only environments, but there is no demand for that yet.
extern crate alloc;

pub use crate::{
    error::Error,
    instant::Instant,
    period::{Period, ToPeriod, Unit},
    source::TimeSource,
    zoned::ZonedDateTime,
};

#[cfg(feature = "std")]
pub use crate::source::SystemTimeSource;

#[macro_use]
mod logging;

pub mod civil;
mod error;
mod instant;
mod period;
#[cfg(feature = "serde")]
mod serde;
mod source;
pub mod tz;
mod util;
mod zoned;
