//! Accelerometer Calibration and Plausibility Limits

/// Standard gravity (m/s²).
///
/// Source: CGPM 1901 conventional value
pub const STANDARD_GRAVITY_MS2: f32 = 9.806_65;

/// Multiplier from offset-corrected m/s² to force units.
///
/// The driving-dynamics thresholds were tuned on a board whose motion
/// readings were multiplied by 100 before comparison.
pub const DEFAULT_INPUT_SCALE: f32 = 100.0;

/// Force units per G at [`DEFAULT_INPUT_SCALE`].
pub const DEFAULT_UNITS_PER_G: f32 = STANDARD_GRAVITY_MS2 * DEFAULT_INPUT_SCALE;

/// Stationary samples averaged into the rest baseline.
///
/// 100 samples at 10 ms keeps boot-time calibration around one second.
pub const DEFAULT_CALIBRATION_SAMPLES: u16 = 100;

/// Delay between calibration samples (ms).
pub const DEFAULT_CALIBRATION_DELAY_MS: u32 = 10;

/// Attempts per calibration sample before boot is aborted.
pub const DEFAULT_CALIBRATION_RETRIES: u32 = 3;

/// Largest raw component accepted from the sensor (m/s²).
///
/// LIS3DH full scale is ±16 G; anything beyond that is a bus glitch.
pub const DEFAULT_PLAUSIBILITY_LIMIT_MS2: f32 = 16.0 * STANDARD_GRAVITY_MS2;

/// Largest absolute offset accepted on any axis at rest (m/s²).
///
/// Gravity dominates one axis at rest, so the limit sits a little above 1 G.
/// A larger offset means the board moved during calibration.
pub const DEFAULT_REST_LIMIT_MS2: f32 = 1.5 * STANDARD_GRAVITY_MS2;
