//! One gauge session
//!
//! A [`Session`] bundles every piece of mutable state the loop has: filter
//! memory, channel intensities, the peak, the telemetry gate and counters.
//! It never touches hardware or reads a clock. The driver feeds it raw
//! readings and `now`, and gets back a complete frame plus, when the
//! limiter allows, a telemetry record.
//!
//! ```text
//!  raw ──► plausibility ──► filter ──► classifier ──┬─► mapper ──► frame
//!              │                                     ├─► peak
//!              └── fault: hold last frame            └─► limiter ──► record?
//! ```
//!
//! ## Example
//! ```rust
//! use forcegauge_core::{AxisSample, CalibrationOffset, GaugeConfig, Session};
//!
//! let config = GaugeConfig::force_gauge();
//! let mut session = Session::new(&config, CalibrationOffset::NONE).unwrap();
//!
//! let out = session.tick(AxisSample::new(3.0, 0.0, 0.0), 20);
//! assert_eq!(out.state.accel, 0.95);
//! assert_eq!(out.frame.len(), 10);
//! assert!(out.telemetry.is_none());
//! ```

use fugit::MillisDurationU64;

use crate::classifier::{Classifier, ClassifierState};
use crate::config::GaugeConfig;
use crate::errors::{GaugeError, GaugeResult};
use crate::filter::{SignalFilter, MAX_WINDOW_READS};
use crate::peak::{PeakRecord, PeakTracker};
use crate::sample::{AxisSample, CalibrationOffset, SmoothedSignal};
use crate::telemetry::{
    TelemetryEncoder, TelemetryFormat, TelemetryLimiter, TelemetryLine, TelemetryRecord,
};
use crate::time::Timestamp;
use crate::visual::{VisualFrame, VisualMapper};

/// Loop counters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionStats {
    /// Ticks that produced fresh state
    pub ticks: u32,
    /// Ticks skipped on sensor faults
    pub skipped: u32,
    /// Burst reads left out of the average (implausible or past `MAX_WINDOW_READS`)
    pub reads_dropped: u32,
    /// Telemetry lines handed to a connected link
    pub telemetry_sent: u32,
    /// Telemetry lines lost (link down, send or encode failure)
    pub telemetry_dropped: u32,
    /// Most recent error seen by the loop
    pub last_error: Option<GaugeError>,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Complete frame for the LED sink
    pub frame: VisualFrame,
    /// Record to encode and send, if the limiter allowed one
    pub telemetry: Option<TelemetryRecord>,
    /// Classifier state after this tick
    pub state: ClassifierState,
    /// Whether the tick was skipped and the previous state held
    pub skipped: bool,
}

/// Mutable state of one running gauge
#[derive(Debug, Clone)]
pub struct Session {
    offset: CalibrationOffset,
    filter: SignalFilter,
    classifier: Classifier,
    mapper: VisualMapper,
    encoder: TelemetryEncoder,
    limiter: TelemetryLimiter,
    peak: PeakTracker,
    plausibility_limit: f32,
    tick_interval: MillisDurationU64,
    signal: SmoothedSignal,
    frame: VisualFrame,
    stats: SessionStats,
}

impl Session {
    /// Validate `config` and start a session with a known baseline
    pub fn new(config: &GaugeConfig, offset: CalibrationOffset) -> GaugeResult<Self> {
        config.validate()?;
        let filter = SignalFilter::new(config.filter, config.conditioning)?;
        let classifier = Classifier::new(&config.classifier)?;
        let mapper = VisualMapper::new(config.layout.clone(), config.brightness)?;
        let frame = mapper.map_to_frame(classifier.state());

        Ok(Self {
            offset,
            filter,
            classifier,
            mapper,
            encoder: TelemetryEncoder::new(config.telemetry_format),
            limiter: TelemetryLimiter::new(config.telemetry_interval()),
            peak: PeakTracker::new(),
            plausibility_limit: config.calibration.plausibility_limit,
            tick_interval: config.tick_interval(),
            signal: SmoothedSignal::default(),
            frame,
            stats: SessionStats::default(),
        })
    }

    /// Process one raw reading taken at `now`
    ///
    /// Implausible readings skip the tick.
    pub fn tick(&mut self, raw: AxisSample, now: Timestamp) -> TickOutput {
        match raw.check_plausible(self.plausibility_limit) {
            Ok(raw) => {
                let signal = self.filter.filter(raw, &self.offset);
                self.advance(signal, now)
            }
            Err(err) => self.skip(err),
        }
    }

    /// Process all reads of one tick (window filter)
    ///
    /// Implausible reads are dropped; the tick is skipped only when none
    /// remain. At most `MAX_WINDOW_READS` good reads are averaged, the rest
    /// are counted in `reads_dropped`.
    pub fn tick_burst(&mut self, raws: &[AxisSample], now: Timestamp) -> TickOutput {
        let mut good: heapless::Vec<AxisSample, { MAX_WINDOW_READS as usize }> =
            heapless::Vec::new();
        let mut last_err = GaugeError::SensorUnavailable { attempts: 0 };
        let mut dropped = 0u32;
        for raw in raws {
            match raw.check_plausible(self.plausibility_limit) {
                Ok(raw) => {
                    if good.push(raw).is_err() {
                        dropped += 1;
                    }
                }
                Err(err) => {
                    dropped += 1;
                    last_err = err;
                }
            }
        }
        if dropped > 0 {
            self.stats.reads_dropped = self.stats.reads_dropped.saturating_add(dropped);
            gauge_debug!("Dropped {} of {} burst reads", dropped, raws.len());
        }
        match self.filter.filter_burst(&good, &self.offset) {
            Ok(signal) => self.advance(signal, now),
            Err(_) => self.skip(last_err),
        }
    }

    /// Record a failed read: hold state and repeat the previous frame
    pub fn skip(&mut self, err: GaugeError) -> TickOutput {
        self.stats.skipped = self.stats.skipped.saturating_add(1);
        self.stats.last_error = Some(err);
        gauge_warn!("Skipping tick: {}", err);
        TickOutput {
            frame: self.frame,
            telemetry: None,
            state: *self.classifier.state(),
            skipped: true,
        }
    }

    fn advance(&mut self, signal: SmoothedSignal, now: Timestamp) -> TickOutput {
        let state = self.classifier.classify(&signal);
        self.signal = signal;
        self.peak.observe(state.magnitude_g, now);
        self.frame = self.mapper.map_to_frame(&state);
        self.stats.ticks = self.stats.ticks.saturating_add(1);

        let telemetry = self.limiter.try_acquire(now).then(|| TelemetryRecord {
            timestamp: now,
            signal,
            state,
            peak: self.peak.record(),
        });

        TickOutput {
            frame: self.frame,
            telemetry,
            state,
            skipped: false,
        }
    }

    /// Encode a record with the session's line format
    pub fn encode(&self, record: &TelemetryRecord) -> GaugeResult<TelemetryLine> {
        self.encoder.encode(record)
    }

    /// Count the outcome of a telemetry send
    pub fn note_telemetry(&mut self, result: GaugeResult<()>) {
        match result {
            Ok(()) => self.stats.telemetry_sent = self.stats.telemetry_sent.saturating_add(1),
            Err(err) => {
                self.stats.telemetry_dropped = self.stats.telemetry_dropped.saturating_add(1);
                self.stats.last_error = Some(err);
            }
        }
    }

    /// Replace the baseline and restart smoothing
    ///
    /// Intensities and the peak are kept; they fade or stand on their own.
    pub fn recalibrate(&mut self, offset: CalibrationOffset) {
        gauge_info!(
            "Recalibrated: X={} Y={} Z={}",
            offset.0.x,
            offset.0.y,
            offset.0.z
        );
        self.offset = offset;
        self.filter.reset();
    }

    /// Baseline currently subtracted from every read
    pub fn offset(&self) -> &CalibrationOffset {
        &self.offset
    }

    /// Classifier output from the last tick
    pub fn state(&self) -> &ClassifierState {
        self.classifier.state()
    }

    /// Last smoothed signal
    pub fn signal(&self) -> &SmoothedSignal {
        &self.signal
    }

    /// Frame produced by the last tick (or the rest frame before any tick)
    pub fn frame(&self) -> &VisualFrame {
        &self.frame
    }

    /// Largest magnitude seen so far
    pub fn peak(&self) -> PeakRecord {
        self.peak.record()
    }

    /// Counters since construction
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Sensor reads the driver should gather per tick
    pub fn reads_per_tick(&self) -> usize {
        self.filter.reads_per_tick()
    }

    /// Tick period
    pub fn tick_interval(&self) -> MillisDurationU64 {
        self.tick_interval
    }

    /// Wire format this session encodes
    pub fn telemetry_format(&self) -> TelemetryFormat {
        self.encoder.format()
    }

    /// CSV header line, if the format has one
    pub fn telemetry_header(&self) -> Option<&'static str> {
        self.encoder.header()
    }
}
