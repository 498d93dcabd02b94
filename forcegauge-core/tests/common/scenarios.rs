//! Reading sequences for common driving situations
//!
//! Values are raw sensor units (m/s²). With the default input scale of 100
//! a reading of 3.0 becomes 300 force units.

use forcegauge_core::AxisSample;

/// Resting board with gravity on Z
///
/// 9.75 is exact in binary, so a calibrated baseline cancels it exactly.
pub const REST: AxisSample = AxisSample::new(0.0, 0.0, 9.75);

/// Resting board with a longitudinal reading of `x`
pub const fn with_x(x: f32) -> AxisSample {
    AxisSample::new(x, 0.0, REST.z)
}

/// `rest` quiet readings, `burst` readings at `x` on the X axis, then `tail` quiet readings
pub fn x_pulse(rest: usize, burst: usize, x: f32, tail: usize) -> Vec<AxisSample> {
    let quiet = AxisSample::ZERO;
    std::iter::repeat(quiet)
        .take(rest)
        .chain(std::iter::repeat(AxisSample::new(x, 0.0, 0.0)).take(burst))
        .chain(std::iter::repeat(quiet).take(tail))
        .collect()
}

/// Steady lateral load for `ticks` readings
pub fn sustained_turn(y: f32, ticks: usize) -> Vec<AxisSample> {
    vec![AxisSample::new(0.0, y, 0.0); ticks]
}

/// Alternating vertical jolts, as on a washboard road
pub fn washboard(amplitude: f32, ticks: usize) -> Vec<AxisSample> {
    (0..ticks)
        .map(|i| {
            let z = if i % 2 == 0 { amplitude } else { -amplitude };
            AxisSample::new(0.0, 0.0, z)
        })
        .collect()
}
