//! Boundary Traits for External Collaborators
//!
//! The core owns no hardware. Everything it touches is reached through the
//! traits in this module, which the firmware implements on top of its
//! board support crate and the tests implement with scripted fakes.
//!
//! ## Module Organization
//!
//! - [`sensor`] - accelerometer source
//! - [`sink`] - LED ring and telemetry link
//! - [`time`] - clock and busy-delay
//! - [`control`] - cooperative shutdown between ticks
//!
//! ## Usage Example
//!
//! ```rust
//! use forcegauge_core::traits::SensorSource;
//! use forcegauge_core::{AxisSample, GaugeError};
//!
//! struct Still;
//!
//! impl SensorSource for Still {
//!     fn read_axes(&mut self) -> nb::Result<AxisSample, GaugeError> {
//!         Ok(AxisSample::new(0.0, 0.0, 9.8))
//!     }
//! }
//!
//! let mut sensor = Still;
//! assert_eq!(nb::block!(sensor.read_axes()).unwrap().z, 9.8);
//! ```

pub mod control;
pub mod sensor;
pub mod sink;
pub mod time;

pub use control::ShutdownSignal;
pub use sensor::SensorSource;
pub use sink::{LedSink, TelemetrySink};
pub use time::{Delay, TimeSource};
