//! Accelerometer Source

use crate::errors::GaugeError;
use crate::sample::AxisSample;

/// Source of raw three-axis samples
///
/// Implementations return a fresh reading on every successful call. Return
/// `nb::Error::WouldBlock` while a conversion is still in flight; the driver
/// spins on it with `nb::block!`. Bus failures map to
/// [`GaugeError::SensorUnavailable`].
///
/// Units are whatever the board reports (m/s² for the Circuit Playground
/// helpers); the session scales them with `input_scale`.
pub trait SensorSource {
    /// Read all three axes
    fn read_axes(&mut self) -> nb::Result<AxisSample, GaugeError>;
}

impl<S: SensorSource + ?Sized> SensorSource for &mut S {
    fn read_axes(&mut self) -> nb::Result<AxisSample, GaugeError> {
        (**self).read_axes()
    }
}
