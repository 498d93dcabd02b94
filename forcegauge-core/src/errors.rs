//! Error Types for the Gauge Pipeline
//!
//! ## Design Philosophy
//!
//! Errors are returned from the sensor boundary, from configuration checks and
//! from the telemetry link. All of them are handled inside the main loop, so
//! they follow the same embedded rules as every other value on the tick path:
//!
//! 1. **Small Size**: no variant carries more than two machine words.
//! 2. **No Heap Allocation**: reasons are `&'static str`, never `String`.
//! 3. **Copy Semantics**: errors can be stored in counters and re-reported.
//!
//! ## Error Categories
//!
//! ### Sensor
//! - `SensorUnavailable`: the accelerometer did not answer
//! - `SensorOutOfRange`: the accelerometer answered with garbage
//!
//! ### Calibration
//! - `CalibrationDegenerate`: the device moved while the baseline was taken
//!
//! ### Link
//! - `LinkNotConnected`: no central is listening on the wireless link
//!
//! ### Setup
//! - `InvalidConfig`, `CapacityExceeded`
//!
//! ## Propagation Policy
//!
//! ```rust
//! use forcegauge_core::GaugeError;
//!
//! fn on_tick_error(err: GaugeError) -> &'static str {
//!     match err {
//!         // Boot aborts; the main loop skips the tick and holds state.
//!         GaugeError::SensorUnavailable { .. } | GaugeError::SensorOutOfRange { .. } => "skip",
//!         // Telemetry is best-effort: drop silently.
//!         GaugeError::LinkNotConnected => "drop",
//!         _ => "halt",
//!     }
//! }
//! # assert_eq!(on_tick_error(GaugeError::LinkNotConnected), "drop");
//! ```

use thiserror_no_std::Error;

use crate::sample::Axis;

/// Result type for gauge operations
pub type GaugeResult<T> = Result<T, GaugeError>;

/// Gauge errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GaugeError {
    /// Sensor read failed, possibly after several attempts
    #[error("Sensor unavailable after {attempts} attempt(s)")]
    SensorUnavailable {
        /// Number of reads tried before giving up
        attempts: u32,
    },

    /// Sensor produced a non-finite value or one beyond the plausibility limit
    #[error("Sensor value {value} exceeds plausibility limit {limit}")]
    SensorOutOfRange {
        /// The offending raw component
        value: f32,
        /// Configured absolute limit for raw components
        limit: f32,
    },

    /// Telemetry sink unreachable
    #[error("Telemetry link not connected")]
    LinkNotConnected,

    /// Calibration offset far outside the expected rest range
    #[error("Calibration offset {offset} on {axis} axis exceeds rest limit {limit}")]
    CalibrationDegenerate {
        /// Axis whose offset is implausible
        axis: Axis,
        /// Computed offset
        offset: f32,
        /// Maximum absolute offset accepted at rest
        limit: f32,
    },

    /// Configuration rejected at session start
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong
        reason: &'static str,
    },

    /// Fixed-capacity storage too small
    #[error("Capacity exceeded: need {required}, have {available}")]
    CapacityExceeded {
        /// Items (or bytes) required
        required: usize,
        /// Capacity available
        available: usize,
    },
}

impl GaugeError {
    /// Sensor-side failures are recoverable in the main loop (tick is skipped)
    pub const fn is_sensor_fault(&self) -> bool {
        matches!(
            self,
            Self::SensorUnavailable { .. } | Self::SensorOutOfRange { .. }
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for GaugeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::SensorUnavailable { attempts } =>
                defmt::write!(fmt, "Sensor unavailable after {} attempts", attempts),
            Self::SensorOutOfRange { value, limit } =>
                defmt::write!(fmt, "Sensor value {} beyond {}", value, limit),
            Self::LinkNotConnected =>
                defmt::write!(fmt, "Link not connected"),
            Self::CalibrationDegenerate { axis, offset, limit } =>
                defmt::write!(fmt, "Offset {} on {} beyond {}", offset, axis.name(), limit),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::CapacityExceeded { required, available } =>
                defmt::write!(fmt, "Need {}, have {}", required, available),
        }
    }
}
