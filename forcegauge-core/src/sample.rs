//! Three-axis value types
//!
//! Every stage of the pipeline trades in one of three shapes that share the
//! same layout but mean different things:
//!
//! ```text
//! AxisSample        raw reading from the accelerometer (sensor units)
//! CalibrationOffset per-axis rest baseline, subtracted from every sample
//! SmoothedSignal    filter output, scaled into force units
//! ```
//!
//! Keeping them as distinct types stops a raw sample from being fed to the
//! classifier by accident.

use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

use crate::errors::{GaugeError, GaugeResult};

/// Accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Axis {
    /// Longitudinal (accelerate / brake)
    X = 0,
    /// Lateral (turning)
    Y = 1,
    /// Vertical (bounce)
    Z = 2,
}

impl Axis {
    /// All axes in component order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lower-case axis name
    pub const fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One raw accelerometer reading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisSample {
    /// Forward
    pub x: f32,
    /// Lateral
    pub y: f32,
    /// Vertical
    pub z: f32,
}

impl AxisSample {
    /// All-zero sample
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Build from components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Component for one axis
    pub const fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Euclidean norm `sqrt(x² + y² + z²)`
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Largest absolute component
    pub fn max_abs(&self) -> f32 {
        libm::fabsf(self.x)
            .max(libm::fabsf(self.y))
            .max(libm::fabsf(self.z))
    }

    /// First non-finite component, if any
    pub fn first_non_finite(&self) -> Option<f32> {
        [self.x, self.y, self.z].into_iter().find(|v| !v.is_finite())
    }

    /// Reject non-finite readings and components beyond `limit`
    pub fn check_plausible(self, limit: f32) -> GaugeResult<Self> {
        if let Some(value) = self.first_non_finite() {
            return Err(GaugeError::SensorOutOfRange { value, limit });
        }
        for value in [self.x, self.y, self.z] {
            if libm::fabsf(value) > limit {
                return Err(GaugeError::SensorOutOfRange { value, limit });
            }
        }
        Ok(self)
    }
}

impl Add for AxisSample {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for AxisSample {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for AxisSample {
    type Output = Self;

    fn mul(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

impl Div<f32> for AxisSample {
    type Output = Self;

    fn div(self, k: f32) -> Self {
        Self::new(self.x / k, self.y / k, self.z / k)
    }
}

/// Per-axis rest baseline
///
/// Computed once at boot as the arithmetic mean of the stationary samples.
/// Replaced only through [`Session::recalibrate`](crate::session::Session::recalibrate).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationOffset(pub AxisSample);

impl CalibrationOffset {
    /// No correction
    pub const NONE: Self = Self(AxisSample::ZERO);

    /// Build from components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(AxisSample::new(x, y, z))
    }

    /// Subtract the baseline from a raw reading
    pub fn correct(&self, raw: AxisSample) -> AxisSample {
        raw - self.0
    }

    /// Baseline component on `axis`
    pub const fn axis(&self, axis: Axis) -> f32 {
        self.0.axis(axis)
    }
}

/// Filter output in force units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothedSignal(pub AxisSample);

impl SmoothedSignal {
    /// Forward component
    pub const fn x(&self) -> f32 {
        self.0.x
    }

    /// Lateral component
    pub const fn y(&self) -> f32 {
        self.0.y
    }

    /// Vertical component
    pub const fn z(&self) -> f32 {
        self.0.z
    }

    /// Euclidean norm in force units
    pub fn magnitude(&self) -> f32 {
        self.0.magnitude()
    }
}
