//! Time manipulation utilities.

use chrono::Utc;
use std::fmt::Debug;

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current time in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Clock yields the `timestamp` protocol field, in milliseconds since the
/// Unix epoch.
///
/// The signer takes this as a trait object so tests can pin the timestamp
/// and verify golden signatures deterministically.
pub trait Clock: Debug + Send + Sync + 'static {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// SystemClock reads the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now().timestamp_millis()
    }
}

/// FixedClock always returns the same instant.
///
/// # Note
///
/// We should always take current time to sign requests.
/// Only use this type for testing.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
