//! Telemetry line formats
//!
//! Two fixed schemas, chosen once per session:
//!
//! ```text
//! Labeled  X:  2.5  Y:-90.0  Z:  0.1 | TURN=YELLOW | ACCEL=ON | BRAKE=OFF | BOUNCE=OFF\r\n
//! Csv      2.5,-90.0,0.1,1.021,-0.300,0.950,0.000,0.000,1.873\r\n
//! ```
//!
//! CSV columns are `x,y,z,magnitude_g,turn,accel,brake,bounce,peak_g`.
//! Lines are written into a fixed [`heapless::String`]; nothing allocates.

use core::fmt::{self, Write};

use crate::classifier::ClassifierState;
use crate::errors::{GaugeError, GaugeResult};
use crate::peak::PeakRecord;
use crate::sample::SmoothedSignal;
use crate::time::Timestamp;

/// Longest line either format can produce, in bytes.
pub const TELEMETRY_LINE_CAPACITY: usize = 128;

/// One encoded line, terminated by `\r\n`
pub type TelemetryLine = heapless::String<TELEMETRY_LINE_CAPACITY>;

/// Line schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TelemetryFormat {
    /// Human-readable labels
    #[default]
    Labeled,
    /// Comma-separated values for logging tools
    Csv,
}

/// Snapshot handed to the encoder
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryRecord {
    /// Time of the tick that produced the record
    pub timestamp: Timestamp,
    /// Filtered signal
    pub signal: SmoothedSignal,
    /// Classifier output
    pub state: ClassifierState,
    /// Session peak at that time
    pub peak: PeakRecord,
}

/// Stateless line encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TelemetryEncoder {
    format: TelemetryFormat,
}

impl TelemetryEncoder {
    /// Encoder for `format`
    pub const fn new(format: TelemetryFormat) -> Self {
        Self { format }
    }

    /// Configured wire format
    pub const fn format(&self) -> TelemetryFormat {
        self.format
    }

    /// Column header for CSV sessions, `None` for labeled output
    pub const fn header(&self) -> Option<&'static str> {
        match self.format {
            TelemetryFormat::Labeled => None,
            TelemetryFormat::Csv => Some("x,y,z,magnitude_g,turn,accel,brake,bounce,peak_g\r\n"),
        }
    }

    /// Render one line, CRLF included
    pub fn encode(&self, record: &TelemetryRecord) -> GaugeResult<TelemetryLine> {
        let mut line = TelemetryLine::new();
        if self.write(&mut line, record).is_err() {
            let mut counter = Counter(0);
            let _ = self.write(&mut counter, record);
            return Err(GaugeError::CapacityExceeded {
                required: counter.0,
                available: TELEMETRY_LINE_CAPACITY,
            });
        }
        Ok(line)
    }

    fn write<W: Write>(&self, out: &mut W, record: &TelemetryRecord) -> fmt::Result {
        let s = &record.signal;
        let state = &record.state;
        match self.format {
            TelemetryFormat::Labeled => write!(
                out,
                "X:{:5.1}  Y:{:5.1}  Z:{:5.1} | TURN={} | ACCEL={} | BRAKE={} | BOUNCE={}\r\n",
                s.x(),
                s.y(),
                s.z(),
                state.labels.turn.label(),
                on_off(state.labels.accel),
                on_off(state.labels.brake),
                on_off(state.labels.bounce),
            ),
            TelemetryFormat::Csv => write!(
                out,
                "{:.1},{:.1},{:.1},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}\r\n",
                s.x(),
                s.y(),
                s.z(),
                state.magnitude_g,
                state.turn,
                state.accel,
                state.brake,
                state.bounce,
                record.peak.magnitude_g,
            ),
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "ON"
    } else {
        "OFF"
    }
}

/// Byte counter used to report how long an oversized line would be
struct Counter(usize);

impl Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}
