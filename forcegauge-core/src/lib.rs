//! Core engine for ForceGauge
//!
//! Turns a three-axis accelerometer stream into an LED ring frame and a
//! rate-limited telemetry line, one tick at a time.
//!
//! Key constraints:
//! - Runs on a Circuit Playground class board (no OS, single loop)
//! - No heap allocation anywhere on the tick path
//! - Every tick produces a complete frame
//!
//! ```no_run
//! use forcegauge_core::{AxisSample, CalibrationOffset, GaugeConfig, Session};
//!
//! let config = GaugeConfig::force_gauge();
//! let mut session = Session::new(&config, CalibrationOffset::new(0.0, 0.0, 9.8)).unwrap();
//!
//! // Feed one reading taken 20 ms after boot
//! let out = session.tick(AxisSample::new(1.7, -0.4, 9.9), 20);
//! for (index, color) in out.frame.iter() {
//!     // push to the ring
//! }
//! if let Some(record) = out.telemetry {
//!     let line = session.encode(&record).unwrap();
//!     // send over the link
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod calibration;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod driver;
pub mod errors;
pub mod filter;
pub mod peak;
pub mod sample;
pub mod session;
pub mod telemetry;
pub mod time;
pub mod traits;
pub mod visual;

// Public API
pub use calibration::{CalibrationSettings, Calibrator};
pub use classifier::{Classifier, ClassifierState, Severity};
pub use config::GaugeConfig;
pub use driver::Driver;
pub use errors::{GaugeError, GaugeResult};
pub use filter::{FilterStrategy, SignalFilter};
pub use peak::{PeakRecord, PeakTracker};
pub use sample::{Axis, AxisSample, CalibrationOffset, SmoothedSignal};
pub use session::{Session, SessionStats, TickOutput};
pub use telemetry::{TelemetryFormat, TelemetryRecord};
pub use visual::{Rgb, VisualFrame};

/// Crate version as published
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
