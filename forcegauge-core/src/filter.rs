//! Signal conditioning and smoothing
//!
//! Every raw sample goes through the same three steps:
//!
//! ```text
//! corrected = raw - offset
//! scaled    = corrected · input_scale + gravity_compensation
//! smoothed  = EMA(scaled)  or  mean(scaled over M reads)
//! ```
//!
//! Both strategies are convex combinations of their inputs, so the output
//! never leaves the range of the scaled samples it has seen.

use crate::constants::sensors::DEFAULT_INPUT_SCALE;
use crate::errors::{GaugeError, GaugeResult};
use crate::sample::{AxisSample, CalibrationOffset, SmoothedSignal};

/// Most reads a window filter may average in one tick.
pub const MAX_WINDOW_READS: u8 = 32;

/// Smoothing strategy
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterStrategy {
    /// `s' = α·x + (1-α)·s`, α in (0, 1]
    Ema {
        /// Weight of the newest sample, in (0, 1]
        alpha: f32,
    },
    /// Mean of `reads` fresh samples taken back to back each tick
    Window {
        /// Reads averaged per tick
        reads: u8,
    },
}

impl FilterStrategy {
    /// Reject an alpha outside (0, 1] or a window outside 1..=`MAX_WINDOW_READS`
    pub fn validate(&self) -> GaugeResult<()> {
        match *self {
            FilterStrategy::Ema { alpha } if !(alpha > 0.0 && alpha <= 1.0) => {
                Err(GaugeError::InvalidConfig {
                    reason: "EMA alpha must lie in (0, 1]",
                })
            }
            FilterStrategy::Window { reads } if reads == 0 || reads > MAX_WINDOW_READS => {
                Err(GaugeError::InvalidConfig {
                    reason: "window reads must lie in 1..=32",
                })
            }
            _ => Ok(()),
        }
    }

    /// Sensor reads the driver takes per tick
    pub const fn reads_per_tick(&self) -> usize {
        match *self {
            FilterStrategy::Ema { .. } => 1,
            FilterStrategy::Window { reads } => reads as usize,
        }
    }
}

impl Default for FilterStrategy {
    fn default() -> Self {
        FilterStrategy::Window { reads: 1 }
    }
}

/// Unit conversion applied before smoothing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputConditioning {
    /// Multiplier from offset-corrected sensor units to force units
    pub input_scale: f32,
    /// Added after scaling, in force units
    pub gravity_compensation: AxisSample,
}

impl InputConditioning {
    /// Subtract the baseline, scale, then add gravity compensation
    pub fn apply(&self, raw: AxisSample, offset: &CalibrationOffset) -> AxisSample {
        offset.correct(raw) * self.input_scale + self.gravity_compensation
    }
}

impl Default for InputConditioning {
    fn default() -> Self {
        Self {
            input_scale: DEFAULT_INPUT_SCALE,
            gravity_compensation: AxisSample::ZERO,
        }
    }
}

/// Exponential moving average
///
/// Seeded with its first input so it never pulls toward an arbitrary zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaFilter {
    alpha: f32,
    state: Option<AxisSample>,
}

impl EmaFilter {
    /// Unseeded filter with weight `alpha`
    pub const fn new(alpha: f32) -> Self {
        Self { alpha, state: None }
    }

    /// Blend `x` into the state; the first call seeds it
    pub fn update(&mut self, x: AxisSample) -> AxisSample {
        let next = match self.state {
            Some(s) => x * self.alpha + s * (1.0 - self.alpha),
            None => x,
        };
        self.state = Some(next);
        next
    }

    /// Forget the state so the next sample reseeds it
    pub fn reset(&mut self) {
        self.state = None;
    }
}

/// Fixed-window mean; holds no state between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFilter {
    reads: u8,
}

impl WindowFilter {
    /// Average `reads` samples per tick
    pub const fn new(reads: u8) -> Self {
        Self { reads }
    }

    /// Reads averaged per tick
    pub const fn reads(&self) -> u8 {
        self.reads
    }

    /// Mean of the samples, or `None` for an empty burst
    pub fn mean(samples: impl IntoIterator<Item = AxisSample>) -> Option<AxisSample> {
        let (sum, n) = samples
            .into_iter()
            .fold((AxisSample::ZERO, 0u32), |(sum, n), s| (sum + s, n + 1));
        (n > 0).then(|| sum / n as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Smoother {
    Ema(EmaFilter),
    Window(WindowFilter),
}

/// Configured filter owning its smoothing state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalFilter {
    smoother: Smoother,
    conditioning: InputConditioning,
}

impl SignalFilter {
    /// Validate both halves and build the smoother
    pub fn new(strategy: FilterStrategy, conditioning: InputConditioning) -> GaugeResult<Self> {
        strategy.validate()?;
        if !(conditioning.input_scale.is_finite() && conditioning.input_scale != 0.0) {
            return Err(GaugeError::InvalidConfig {
                reason: "input scale must be finite and non-zero",
            });
        }
        if conditioning.gravity_compensation.first_non_finite().is_some() {
            return Err(GaugeError::InvalidConfig {
                reason: "gravity compensation must be finite",
            });
        }
        let smoother = match strategy {
            FilterStrategy::Ema { alpha } => Smoother::Ema(EmaFilter::new(alpha)),
            FilterStrategy::Window { reads } => Smoother::Window(WindowFilter::new(reads)),
        };
        Ok(Self {
            smoother,
            conditioning,
        })
    }

    /// Sensor reads expected by [`filter_burst`](Self::filter_burst)
    pub fn reads_per_tick(&self) -> usize {
        match self.smoother {
            Smoother::Ema(_) => 1,
            Smoother::Window(w) => w.reads() as usize,
        }
    }

    /// Smooth one raw sample
    pub fn filter(&mut self, raw: AxisSample, offset: &CalibrationOffset) -> SmoothedSignal {
        let x = self.conditioning.apply(raw, offset);
        SmoothedSignal(match &mut self.smoother {
            Smoother::Ema(ema) => ema.update(x),
            Smoother::Window(_) => x,
        })
    }

    /// Smooth the reads of one tick
    ///
    /// A window filter averages them; an EMA folds in their mean as one step.
    pub fn filter_burst(
        &mut self,
        raws: &[AxisSample],
        offset: &CalibrationOffset,
    ) -> GaugeResult<SmoothedSignal> {
        let conditioning = self.conditioning;
        let mean = WindowFilter::mean(raws.iter().map(|r| conditioning.apply(*r, offset)))
            .ok_or(GaugeError::SensorUnavailable { attempts: 0 })?;
        Ok(SmoothedSignal(match &mut self.smoother {
            Smoother::Ema(ema) => ema.update(mean),
            Smoother::Window(_) => mean,
        }))
    }

    /// Forget smoothing history
    pub fn reset(&mut self) {
        if let Smoother::Ema(ema) = &mut self.smoother {
            ema.reset();
        }
    }
}
