//! Driving-Dynamics Classifier Tuning
//!
//! Values in force units unless noted. See the module docs of
//! [`constants`](crate::constants) for the unit definition.

/// Longitudinal force above which the accel channel triggers.
pub const ACCEL_THRESHOLD: f32 = 150.0;

/// Longitudinal force below `-BRAKE_THRESHOLD` triggers the brake channel.
pub const BRAKE_THRESHOLD: f32 = 150.0;

/// Vertical force magnitude above which the bounce channel triggers.
pub const BOUNCE_THRESHOLD: f32 = 250.0;

/// Lateral force that saturates the turn channel at intensity 1.0.
pub const TURN_FULL_SCALE: f32 = 300.0;

/// Per-tick decay of the accel and brake holds.
///
/// At 20 ms ticks the hold falls below 0.2 after ~30 ticks (0.6 s).
pub const HOLD_DECAY: f32 = 0.95;

/// Per-tick decay of the bounce hold. Bounces are short, so it fades faster.
pub const BOUNCE_DECAY: f32 = 0.90;

/// Intensity above which accel/brake report ON in telemetry.
pub const HOLD_LABEL_FLOOR: f32 = 0.2;

/// Intensity above which bounce reports ON in telemetry.
pub const BOUNCE_LABEL_FLOOR: f32 = 0.05;

/// Turn label boundaries (intensity): YELLOW, ORANGE, RED.
///
/// Exclusive lower bounds: exactly 0.25 is still GREEN.
pub const TURN_LABEL_BANDS: [f32; 3] = [0.25, 0.5, 0.75];

/// Magnitude band boundaries (G): yellow, orange, red.
///
/// Inclusive lower bounds: exactly 1.5 G is yellow.
pub const MAGNITUDE_BANDS_G: [f32; 3] = [1.5, 2.5, 3.5];

/// Magnitude that maps to the red end of the hue gradient (G).
pub const MAGNITUDE_FULL_SCALE_G: f32 = 4.0;

/// EMA smoothing factor used by the ring gauge preset.
pub const RING_GAUGE_ALPHA: f32 = 0.1;
