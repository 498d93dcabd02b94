//! LED Ring and Telemetry Link

use crate::errors::{GaugeError, GaugeResult};
use crate::visual::{Rgb, VisualFrame};

/// Addressable LED ring
///
/// The core hands over a complete frame every tick; the sink owns physical
/// transmission timing (latching, DMA, bit-banging).
pub trait LedSink {
    /// Set a single pixel
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Push pending pixels to the hardware
    fn show(&mut self) {}

    /// Write a whole frame and show it
    fn set_frame(&mut self, frame: &VisualFrame) {
        for (index, color) in frame.iter() {
            self.set_pixel(index, color);
        }
        self.show();
    }
}

/// Best-effort wireless telemetry link
///
/// No acknowledgment, no retry, no queue: a failed send is simply lost.
pub trait TelemetrySink {
    /// Whether a peer is currently connected
    fn is_connected(&self) -> bool;

    /// Transmit one encoded line
    fn send(&mut self, bytes: &[u8]) -> GaugeResult<()>;
}

/// Link that is never connected
///
/// For boards without a radio: every line is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLink;

impl TelemetrySink for NoLink {
    fn is_connected(&self) -> bool {
        false
    }

    fn send(&mut self, _bytes: &[u8]) -> GaugeResult<()> {
        Err(GaugeError::LinkNotConnected)
    }
}
