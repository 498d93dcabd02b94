//! Rate-limited telemetry
//!
//! - [`encoder`] - fixed line schemas
//! - [`limiter`] - minimum interval between lines

pub mod encoder;
pub mod limiter;

pub use encoder::{
    TelemetryEncoder, TelemetryFormat, TelemetryLine, TelemetryRecord, TELEMETRY_LINE_CAPACITY,
};
pub use limiter::TelemetryLimiter;
