/*!
Logging macros that compile to nothing unless the `logging` feature is on.

Only zone resolution, the global zone database and the system clock log
anything. Messages are at `trace` level, except for one-time initialization
(`debug`) and a misbehaving system clock (`warn`).
*/

macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}

// Only used when `std` is enabled.
#[allow(unused_macros)]
macro_rules! warn {
    ($($tt:tt)*) => { log!(log::warn!($($tt)*)) }
}

#[allow(unused_macros)]
macro_rules! debug {
    ($($tt:tt)*) => { log!(log::debug!($($tt)*)) }
}

macro_rules! trace {
    ($($tt:tt)*) => { log!(log::trace!($($tt)*)) }
}
