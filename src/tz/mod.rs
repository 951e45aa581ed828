/*!
UTC offsets, clocks and time zone identifiers.

The central type in this module is [`Clock`], which decides which UTC offset
applies to a civil datetime. A clock is either a fixed [`Offset`] or a named
zone identified by a [`ClockIdentifierName`]. A named zone's offset is looked
up in a [`ZoneDatabase`]. By default, that's the global database returned by
[`db()`], which is backed by rules compiled into this crate.

# Example

```
use anydate::{civil::datetime, tz::{Clock, ClockIdentifierName, Offset}};

let instant = datetime(2024, 7, 1, 0, 0, 0, 0).to_instant(Offset::UTC)?;
let clock = Clock::named_at(ClockIdentifierName::EuropeLondon, instant)?;
assert_eq!(clock.offset().to_string(), "+01:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub use self::{
    clock::Clock,
    db::{db, TimeZoneDatabase, ZoneDatabase},
    identifier::ClockIdentifierName,
    offset::Offset,
};

mod clock;
mod db;
mod identifier;
mod offset;
mod rules;
