//! Boot-time rest calibration
//!
//! The device is assumed motionless while `samples` readings are taken at a
//! fixed spacing. The per-axis mean becomes the [`CalibrationOffset`].
//!
//! There is no outlier rejection: a knock during calibration biases the
//! baseline for the whole session. The optional rest limit catches the
//! gross cases (board carried around while booting) and fails the boot
//! instead of running with a nonsense baseline.
//!
//! ## Failure Handling
//!
//! Each sample gets up to `retries` read attempts. An unreadable or
//! implausible reading costs one attempt. Running out of attempts on any
//! sample aborts calibration with [`GaugeError::SensorUnavailable`].

use crate::constants::sensors::{
    DEFAULT_CALIBRATION_DELAY_MS, DEFAULT_CALIBRATION_RETRIES, DEFAULT_CALIBRATION_SAMPLES,
    DEFAULT_PLAUSIBILITY_LIMIT_MS2, DEFAULT_REST_LIMIT_MS2,
};
use crate::errors::{GaugeError, GaugeResult};
use crate::filter::WindowFilter;
use crate::sample::{Axis, AxisSample, CalibrationOffset};
use crate::traits::{Delay, SensorSource};

/// Calibration tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationSettings {
    /// Stationary samples averaged (> 0)
    pub samples: u16,
    /// Spacing between samples (ms)
    pub delay_ms: u32,
    /// Read attempts per sample (>= 1)
    pub retries: u32,
    /// Largest absolute offset accepted per axis, in sensor units
    pub rest_limit: Option<f32>,
    /// Largest absolute raw component accepted, in sensor units
    pub plausibility_limit: f32,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_CALIBRATION_SAMPLES,
            delay_ms: DEFAULT_CALIBRATION_DELAY_MS,
            retries: DEFAULT_CALIBRATION_RETRIES,
            rest_limit: Some(DEFAULT_REST_LIMIT_MS2),
            plausibility_limit: DEFAULT_PLAUSIBILITY_LIMIT_MS2,
        }
    }
}

impl CalibrationSettings {
    /// Reject zero sample counts and non-positive limits
    pub fn validate(&self) -> GaugeResult<()> {
        if self.samples == 0 {
            return Err(GaugeError::InvalidConfig {
                reason: "calibration needs at least one sample",
            });
        }
        if self.retries == 0 {
            return Err(GaugeError::InvalidConfig {
                reason: "calibration needs at least one attempt per sample",
            });
        }
        if !(self.plausibility_limit > 0.0) {
            return Err(GaugeError::InvalidConfig {
                reason: "plausibility limit must be positive",
            });
        }
        match self.rest_limit {
            Some(limit) if !(limit > 0.0) => Err(GaugeError::InvalidConfig {
                reason: "rest limit must be positive",
            }),
            _ => Ok(()),
        }
    }
}

/// One-shot rest calibrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibrator {
    settings: CalibrationSettings,
}

impl Calibrator {
    /// Build a calibrator after validating `settings`
    pub fn new(settings: CalibrationSettings) -> GaugeResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Settings this calibrator was built with
    pub fn settings(&self) -> &CalibrationSettings {
        &self.settings
    }

    /// Sample the sensor and compute the rest baseline
    ///
    /// Blocks for roughly `samples · delay_ms`.
    pub fn calibrate<S, D>(&self, sensor: &mut S, delay: &mut D) -> GaugeResult<CalibrationOffset>
    where
        S: SensorSource,
        D: Delay,
    {
        let mut sum = AxisSample::ZERO;
        for _ in 0..self.settings.samples {
            sum = sum + self.read_with_retry(sensor, delay)?;
            delay.delay_ms(self.settings.delay_ms);
        }
        let mean = sum / f32::from(self.settings.samples);
        let offset = CalibrationOffset(mean);

        self.check_rest(&offset)?;
        gauge_info!(
            "Calibration offsets: X={} Y={} Z={}",
            offset.0.x,
            offset.0.y,
            offset.0.z
        );
        Ok(offset)
    }

    /// Baseline from readings already taken
    pub fn from_samples(&self, samples: &[AxisSample]) -> GaugeResult<CalibrationOffset> {
        let mean = WindowFilter::mean(samples.iter().copied())
            .ok_or(GaugeError::SensorUnavailable { attempts: 0 })?;
        let offset = CalibrationOffset(mean);
        self.check_rest(&offset)?;
        Ok(offset)
    }

    fn read_with_retry<S, D>(&self, sensor: &mut S, delay: &mut D) -> GaugeResult<AxisSample>
    where
        S: SensorSource,
        D: Delay,
    {
        for attempt in 1..=self.settings.retries {
            let reading = nb::block!(sensor.read_axes())
                .and_then(|s| s.check_plausible(self.settings.plausibility_limit));
            match reading {
                Ok(sample) => return Ok(sample),
                Err(err) => {
                    gauge_warn!(
                        "Calibration read failed (attempt {}/{}): {}",
                        attempt,
                        self.settings.retries,
                        err
                    );
                    if attempt < self.settings.retries {
                        delay.delay_ms(self.settings.delay_ms);
                    }
                }
            }
        }
        Err(GaugeError::SensorUnavailable {
            attempts: self.settings.retries,
        })
    }

    fn check_rest(&self, offset: &CalibrationOffset) -> GaugeResult<()> {
        let Some(limit) = self.settings.rest_limit else {
            return Ok(());
        };
        for axis in Axis::ALL {
            let value = offset.axis(axis);
            if libm::fabsf(value) > limit {
                gauge_warn!("Degenerate calibration on {} axis: {}", axis, value);
                return Err(GaugeError::CalibrationDegenerate {
                    axis,
                    offset: value,
                    limit,
                });
            }
        }
        Ok(())
    }
}
