//! Telemetry rate limiting
//!
//! The visual loop ticks far faster than a BLE UART can usefully carry, so
//! lines are gated by wall time, not by tick count. A line may go out once
//! strictly more than `interval` has elapsed since the last one.

use fugit::MillisDurationU64;

use crate::time::{elapsed, Timestamp};

/// Minimum-interval gate for telemetry lines
///
/// ## Example
/// ```rust
/// use forcegauge_core::telemetry::TelemetryLimiter;
/// use fugit::ExtU64;
///
/// let mut limiter = TelemetryLimiter::new(150.millis());
/// assert!(!limiter.try_acquire(150));
/// assert!(limiter.try_acquire(151));
/// assert!(!limiter.try_acquire(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryLimiter {
    interval: MillisDurationU64,
    last_emit: Timestamp,
    emitted: u32,
}

impl TelemetryLimiter {
    /// Limiter whose reference point is boot (t = 0)
    pub const fn new(interval: MillisDurationU64) -> Self {
        Self {
            interval,
            last_emit: 0,
            emitted: 0,
        }
    }

    /// Minimum gap between slots
    pub const fn interval(&self) -> MillisDurationU64 {
        self.interval
    }

    /// Whether a line may be sent at `now`, without consuming the slot
    pub fn is_due(&self, now: Timestamp) -> bool {
        elapsed(self.last_emit, now) > self.interval
    }

    /// Take the slot at `now` if one is due
    pub fn try_acquire(&mut self, now: Timestamp) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.last_emit = now;
        self.emitted = self.emitted.saturating_add(1);
        true
    }

    /// Time of the last granted slot, 0 before the first
    pub const fn last_emit(&self) -> Timestamp {
        self.last_emit
    }

    /// Slots granted so far
    pub const fn emitted(&self) -> u32 {
        self.emitted
    }
}
