// Time source
//
// Envelope headers carry the send time; credential expiry is checked
// against it too. Both read the clock through this trait so tests can pin it.

use chrono::Utc;

pub trait Clock: Send + Sync {
    /// Seconds since the unix epoch, with sub-second precision.
    fn timestamp(&self) -> f64;

    /// Milliseconds since the unix epoch.
    fn timestamp_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn timestamp(&self) -> f64 {
        Utc::now().timestamp_micros() as f64 / 1_000_000.0
    }

    fn timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn timestamp(&self) -> f64 {
        self.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn timestamp_millis(&self) -> i64 {
        (self.0 * 1000.0) as i64
    }
}
