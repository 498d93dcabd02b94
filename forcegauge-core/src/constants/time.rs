//! Loop Pacing and Telemetry Intervals

// ===== LOOP PACING =====

/// Main-loop tick interval (ms).
///
/// 20 ms gives a 50 Hz visual refresh, fast enough that the decay fade
/// looks continuous.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 20;

/// Tick interval of the magnitude ring gauge (ms).
pub const RING_GAUGE_TICK_INTERVAL_MS: u64 = 50;

// ===== TELEMETRY =====

/// Minimum time between telemetry lines (ms).
///
/// A BLE UART link comfortably carries ~7 lines per second of this size.
pub const DEFAULT_TELEMETRY_INTERVAL_MS: u64 = 150;
