//! Fixed-rate polling loop
//!
//! The driver is the only part that talks to collaborators. It owns the
//! sensor, the LED ring, the telemetry link, a clock and a delay, and runs
//! the session on them:
//!
//! ```text
//! boot:  calibrate ──ok──► session.recalibrate ──► rest frame
//!            └──err──► failure pattern, return error
//!
//! loop:  read ──► session.tick ──► set_frame ──► telemetry? ──► delay
//!          └─fault─► session.skip (previous frame re-sent)
//! ```
//!
//! Ticks always run to completion; the shutdown signal is checked between
//! them.

use crate::calibration::Calibrator;
use crate::config::GaugeConfig;
use crate::errors::{GaugeError, GaugeResult};
use crate::filter::MAX_WINDOW_READS;
use crate::sample::{AxisSample, CalibrationOffset};
use crate::session::{Session, SessionStats, TickOutput};
use crate::telemetry::TelemetryRecord;
use crate::traits::{Delay, LedSink, SensorSource, ShutdownSignal, TelemetrySink, TimeSource};
use crate::visual::VisualFrame;

/// Session plus the hardware it runs on
pub struct Driver<S, L, T, C, D> {
    sensor: S,
    leds: L,
    link: T,
    clock: C,
    delay: D,
    calibrator: Calibrator,
    session: Session,
    mirror_to_log: bool,
    calibrated: bool,
}

impl<S, L, T, C, D> Driver<S, L, T, C, D>
where
    S: SensorSource,
    L: LedSink,
    T: TelemetrySink,
    C: TimeSource,
    D: Delay,
{
    /// Validate the config and wire up the collaborators
    ///
    /// The session starts uncalibrated; [`boot`](Self::boot) sets the baseline.
    pub fn new(
        config: &GaugeConfig,
        sensor: S,
        leds: L,
        link: T,
        clock: C,
        delay: D,
    ) -> GaugeResult<Self> {
        Ok(Self {
            sensor,
            leds,
            link,
            clock,
            delay,
            calibrator: Calibrator::new(config.calibration)?,
            session: Session::new(config, CalibrationOffset::NONE)?,
            mirror_to_log: config.mirror_telemetry_to_log,
            calibrated: false,
        })
    }

    /// Calibrate and show the rest frame
    ///
    /// Blocks the whole system until the baseline is known. On failure the
    /// failure pattern is shown and the error returned; the loop must not
    /// start with an unknown baseline.
    pub fn boot(&mut self) -> GaugeResult<CalibrationOffset> {
        gauge_info!("Calibrating, keep the device still");
        match self.calibrator.calibrate(&mut self.sensor, &mut self.delay) {
            Ok(offset) => {
                self.session.recalibrate(offset);
                self.calibrated = true;
                self.leds.set_frame(self.session.frame());
                if let Some(header) = self.session.telemetry_header() {
                    if self.link.is_connected() {
                        let result = self.link.send(header.as_bytes());
                        self.session.note_telemetry(result);
                    }
                }
                gauge_info!("Calibration complete");
                Ok(offset)
            }
            Err(err) => {
                gauge_warn!("Calibration failed: {}", err);
                self.show_failure(false);
                Err(err)
            }
        }
    }

    /// Show one phase of the alternating red/off failure pattern
    pub fn show_failure(&mut self, phase: bool) {
        let frame = VisualFrame::failure_pattern(self.session.frame().len(), phase);
        self.leds.set_frame(&frame);
    }

    /// Blink the failure pattern for `cycles` on/off pairs
    pub fn blink_failure(&mut self, cycles: u32, period_ms: u32) {
        for _ in 0..cycles {
            self.show_failure(false);
            self.delay.delay_ms(period_ms / 2);
            self.show_failure(true);
            self.delay.delay_ms(period_ms / 2);
        }
    }

    /// Run one tick without pacing
    pub fn run_once(&mut self) -> TickOutput {
        let now = self.clock.now();
        let reads = self.session.reads_per_tick();

        let out = if reads <= 1 {
            match nb::block!(self.sensor.read_axes()) {
                Ok(raw) => self.session.tick(raw, now),
                Err(err) => self.session.skip(err),
            }
        } else {
            let mut burst: heapless::Vec<AxisSample, { MAX_WINDOW_READS as usize }> =
                heapless::Vec::new();
            for _ in 0..reads {
                match nb::block!(self.sensor.read_axes()) {
                    Ok(raw) => {
                        let _ = burst.push(raw);
                    }
                    Err(err) => gauge_debug!("Dropped window read: {}", err),
                }
            }
            if burst.is_empty() {
                self.session.skip(GaugeError::SensorUnavailable {
                    attempts: reads as u32,
                })
            } else {
                self.session.tick_burst(&burst, now)
            }
        };

        self.leds.set_frame(&out.frame);
        if let Some(record) = out.telemetry {
            self.publish(&record);
        }
        out
    }

    /// Encode, mirror and send one record; failures are counted, never raised
    fn publish(&mut self, record: &TelemetryRecord) {
        let line = match self.session.encode(record) {
            Ok(line) => line,
            Err(err) => {
                self.session.note_telemetry(Err(err));
                return;
            }
        };
        if self.mirror_to_log {
            gauge_debug!("{}", line.trim_end());
        }
        let result = if self.link.is_connected() {
            self.link.send(line.as_bytes())
        } else {
            Err(GaugeError::LinkNotConnected)
        };
        self.session.note_telemetry(result);
    }

    /// Boot if needed, then tick at the configured rate until `shutdown` fires
    pub fn run<Sd: ShutdownSignal + ?Sized>(&mut self, shutdown: &Sd) -> GaugeResult<SessionStats> {
        if !self.calibrated {
            self.boot()?;
        }
        let pause = u32::try_from(self.session.tick_interval().to_millis()).unwrap_or(u32::MAX);
        while !shutdown.should_stop() {
            self.run_once();
            self.delay.delay_ms(pause);
        }
        let stats = *self.session.stats();
        gauge_info!(
            "Stopped after {} ticks ({} skipped, {} lines sent, {} dropped)",
            stats.ticks,
            stats.skipped,
            stats.telemetry_sent,
            stats.telemetry_dropped
        );
        Ok(stats)
    }

    /// True once `boot` has succeeded
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// The wrapped session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the wrapped session
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// LED sink
    pub fn leds(&self) -> &L {
        &self.leds
    }

    /// Telemetry sink
    pub fn link(&self) -> &T {
        &self.link
    }

    /// Mutable telemetry sink
    pub fn link_mut(&mut self) -> &mut T {
        &mut self.link
    }

    /// Mutable sensor, for hot-swapping in tests
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Hand the collaborators back
    pub fn into_parts(self) -> (S, L, T, C, D) {
        (self.sensor, self.leds, self.link, self.clock, self.delay)
    }
}
