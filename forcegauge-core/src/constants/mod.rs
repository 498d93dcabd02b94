//! Constants for ForceGauge Core
//!
//! Centralized, documented defaults used by the presets in
//! [`config`](crate::config). Every value carries its unit in the name.
//!
//! ## Organization
//!
//! - **Sensors**: calibration and plausibility limits for the accelerometer
//! - **Dynamics**: trigger thresholds, decay constants and band boundaries
//! - **Display**: LED ring geometry and zone colours
//! - **Time**: loop pacing and telemetry intervals
//!
//! ## Units
//!
//! Thresholds are expressed in *force units*: offset-corrected sensor
//! readings multiplied by [`sensors::DEFAULT_INPUT_SCALE`]. With a sensor that
//! reports m/s², one force unit is 1 cm/s² and 1 G ≈ 981 units.

/// Accelerometer calibration and plausibility limits.
pub mod sensors;

/// Classifier thresholds, decay constants and band boundaries.
pub mod dynamics;

/// LED ring geometry and colours.
pub mod display;

/// Loop pacing and telemetry intervals.
pub mod time;

pub use sensors::{
    DEFAULT_CALIBRATION_SAMPLES, DEFAULT_CALIBRATION_RETRIES, DEFAULT_INPUT_SCALE,
    STANDARD_GRAVITY_MS2,
};

pub use dynamics::{
    ACCEL_THRESHOLD, BRAKE_THRESHOLD, BOUNCE_THRESHOLD, HOLD_DECAY, BOUNCE_DECAY,
    MAGNITUDE_BANDS_G, TURN_LABEL_BANDS,
};

pub use display::{RING_LED_COUNT, DEFAULT_BRIGHTNESS, MAX_ZONES};

pub use time::{DEFAULT_TICK_INTERVAL_MS, DEFAULT_TELEMETRY_INTERVAL_MS};
