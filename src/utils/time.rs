//! Clock and duration helpers
//!
//! Token timestamps are milliseconds since the Unix epoch.

use crate::error::{Error, Result};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Unit for expressing a time-to-live as an `(amount, unit)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Convert `amount` of this unit into a [`Duration`]
    ///
    /// Saturates at [`Duration::MAX`].
    pub fn duration(self, amount: u64) -> Duration {
        let secs_per_unit = match self {
            TimeUnit::Milliseconds => return Duration::from_millis(amount),
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 60 * 60,
            TimeUnit::Days => 24 * 60 * 60,
        };
        amount
            .checked_mul(secs_per_unit)
            .map(Duration::from_secs)
            .unwrap_or(Duration::MAX)
    }
}

/// Current Unix timestamp in milliseconds
pub(crate) fn now_millis() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}

/// Compute `now + ttl` in milliseconds with overflow protection
pub(crate) fn expiration_from(now: i64, ttl: Duration) -> Result<i64> {
    i64::try_from(ttl.as_millis())
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .ok_or_else(|| Error::InvalidClaim {
            claim: "exp".into(),
            reason: format!("time-to-live of {ttl:?} overflows the expiration timestamp"),
        })
}
