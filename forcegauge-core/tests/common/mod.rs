//! Shared fakes and scenario data for integration tests
//!
//! - Scripted sensor that replays a sequence of readings or faults
//! - Recording LED ring and telemetry link
//! - Simulated delay that advances a shared mock clock

#![allow(dead_code)]

pub mod scenarios;

use std::collections::VecDeque;

use forcegauge_core::{
    time::MockTimeSource,
    traits::{Delay, LedSink, SensorSource, TelemetrySink},
    AxisSample, GaugeError, GaugeResult, Rgb, VisualFrame,
};

/// One scripted sensor response
#[derive(Debug, Clone, Copy)]
pub enum Reading {
    Sample(AxisSample),
    Fault,
    NotReady,
}

/// Replays scripted readings, then repeats `fallback` forever
pub struct ScriptedSensor {
    script: VecDeque<Reading>,
    fallback: AxisSample,
    pub reads: u32,
}

impl ScriptedSensor {
    pub fn new(fallback: AxisSample) -> Self {
        Self {
            script: VecDeque::new(),
            fallback,
            reads: 0,
        }
    }

    pub fn then(mut self, reading: Reading) -> Self {
        self.script.push_back(reading);
        self
    }

    pub fn then_samples(mut self, samples: impl IntoIterator<Item = AxisSample>) -> Self {
        self.script.extend(samples.into_iter().map(Reading::Sample));
        self
    }

    pub fn then_faults(mut self, count: usize) -> Self {
        self.script.extend(std::iter::repeat(Reading::Fault).take(count));
        self
    }
}

impl SensorSource for ScriptedSensor {
    fn read_axes(&mut self) -> nb::Result<AxisSample, GaugeError> {
        match self.script.pop_front() {
            Some(Reading::NotReady) => Err(nb::Error::WouldBlock),
            Some(Reading::Fault) => {
                self.reads += 1;
                Err(nb::Error::Other(GaugeError::SensorUnavailable { attempts: 1 }))
            }
            Some(Reading::Sample(s)) => {
                self.reads += 1;
                Ok(s)
            }
            None => {
                self.reads += 1;
                Ok(self.fallback)
            }
        }
    }
}

/// LED ring that keeps every shown frame
pub struct RecordingRing {
    pending: Vec<Rgb>,
    pub frames: Vec<Vec<Rgb>>,
}

impl RecordingRing {
    pub fn new(len: usize) -> Self {
        Self {
            pending: vec![Rgb::OFF; len],
            frames: Vec::new(),
        }
    }

    pub fn last(&self) -> &[Rgb] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl LedSink for RecordingRing {
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(p) = self.pending.get_mut(index) {
            *p = color;
        }
    }

    fn show(&mut self) {
        self.frames.push(self.pending.clone());
    }
}

/// Telemetry link that records lines while connected
pub struct RecordingLink {
    pub connected: bool,
    pub fail_sends: bool,
    pub lines: Vec<String>,
}

impl RecordingLink {
    pub fn connected() -> Self {
        Self {
            connected: true,
            fail_sends: false,
            lines: Vec::new(),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::connected()
        }
    }
}

impl TelemetrySink for RecordingLink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn send(&mut self, bytes: &[u8]) -> GaugeResult<()> {
        if !self.connected || self.fail_sends {
            return Err(GaugeError::LinkNotConnected);
        }
        self.lines.push(String::from_utf8_lossy(bytes).into_owned());
        Ok(())
    }
}

/// Delay that advances a shared mock clock instead of sleeping
pub struct SimDelay<'a> {
    clock: &'a MockTimeSource,
}

impl<'a> SimDelay<'a> {
    pub fn new(clock: &'a MockTimeSource) -> Self {
        Self { clock }
    }
}

impl Delay for SimDelay<'_> {
    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(u64::from(ms));
    }
}

/// Every pixel of a frame as a vector
pub fn pixels(frame: &VisualFrame) -> Vec<Rgb> {
    frame.iter().map(|(_, c)| c).collect()
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
