//! Session peak magnitude
//!
//! The peak only ever moves up, and only on a strictly larger magnitude:
//! a tie keeps the timestamp of the first occurrence. There is no reset;
//! a new session starts with a new tracker.

use crate::time::Timestamp;

/// Largest magnitude seen and when
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakRecord {
    /// Magnitude in G
    pub magnitude_g: f32,
    /// Time of the first tick that reached it
    pub timestamp: Timestamp,
}

/// Monotonic maximum tracker
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeakTracker {
    record: PeakRecord,
}

impl PeakTracker {
    /// Tracker with a zero peak at time zero
    pub const fn new() -> Self {
        Self {
            record: PeakRecord {
                magnitude_g: 0.0,
                timestamp: 0,
            },
        }
    }

    /// Offer a magnitude; returns true if it became the new peak
    pub fn observe(&mut self, magnitude_g: f32, timestamp: Timestamp) -> bool {
        if magnitude_g > self.record.magnitude_g {
            self.record = PeakRecord {
                magnitude_g,
                timestamp,
            };
            true
        } else {
            false
        }
    }

    /// Current peak
    pub const fn record(&self) -> PeakRecord {
        self.record
    }
}
