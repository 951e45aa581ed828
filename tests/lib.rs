mod civil;
mod concurrency;
#[cfg(feature = "serde")]
mod serde;
mod zoned;

/// A type alias we use for tests.
///
/// Most tests here construct several values that can fail, and the `?`
/// operator keeps them readable.
type Result = std::result::Result<(), anydate::Error>;

/// Installs a logger that writes to the test harness.
///
/// Set `RUST_LOG=trace` to see time zone resolution as it happens. This is
/// safe to call from every test; only the first call has an effect.
fn logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
