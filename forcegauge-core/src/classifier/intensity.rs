//! Threshold-with-Decay Intensity Channels
//!
//! Each semantic channel keeps one intensity `I ∈ [0, 1]` and applies, every
//! tick, in this order:
//!
//! ```text
//! 1. drive   v  = component of the smoothed signal (sign per polarity)
//! 2. trigger if v > T:  I = 1.0            (Binary)
//!                       I = clamp(v/F)     (Proportional, F = full scale)
//!            always:    I = clamp(|v|/F)   (Tracking)
//! 3. decay   I = I · D
//! ```
//!
//! Trigger-then-decay is deliberate and observable: on the onset tick a
//! binary channel reads exactly `D`, never 1.0. Decay alone is a geometric
//! fade toward zero that can never go negative.

use crate::errors::{GaugeError, GaugeResult};
use crate::sample::{Axis, SmoothedSignal};

/// Which sign of the driving axis counts toward the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    /// Only positive values (accelerating)
    Positive,
    /// Only negative values (braking)
    Negative,
    /// Either sign; the channel remembers the direction (turning, bounce)
    Either,
}

impl Polarity {
    /// Signed axis value folded into a non-negative drive
    #[inline]
    pub fn drive(&self, value: f32) -> f32 {
        match self {
            Polarity::Positive => value,
            Polarity::Negative => -value,
            Polarity::Either => libm::fabsf(value),
        }
    }
}

/// How a trigger sets the intensity
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerMode {
    /// Jump to 1.0 when the drive crosses the threshold
    Binary,
    /// Jump to `drive / full_scale` (clamped) when the drive crosses the threshold
    Proportional {
        /// Drive that maps to intensity 1.0
        full_scale: f32,
    },
    /// Follow `drive / full_scale` (clamped) every tick; the threshold is ignored
    Tracking {
        /// Drive that maps to intensity 1.0
        full_scale: f32,
    },
}

/// Static tuning of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelConfig {
    /// Axis of the smoothed signal driving the channel
    pub axis: Axis,
    /// Sign of the axis that counts
    pub polarity: Polarity,
    /// Trigger threshold in force units (strict `>`)
    pub threshold: f32,
    /// Per-tick decay factor in (0, 1]; 1.0 disables the hold
    pub decay: f32,
    /// Trigger behaviour
    pub trigger: TriggerMode,
    /// Intensity above which the channel reports ON
    pub label_floor: f32,
}

impl ChannelConfig {
    /// Binary hold channel with the given axis, polarity, threshold and decay
    pub const fn hold(axis: Axis, polarity: Polarity, threshold: f32, decay: f32) -> Self {
        Self {
            axis,
            polarity,
            threshold,
            decay,
            trigger: TriggerMode::Binary,
            label_floor: 0.0,
        }
    }

    /// Instantaneous channel following `|axis| / full_scale` with no hold
    pub const fn tracking(axis: Axis, full_scale: f32) -> Self {
        Self {
            axis,
            polarity: Polarity::Either,
            threshold: 0.0,
            decay: 1.0,
            trigger: TriggerMode::Tracking { full_scale },
            label_floor: 0.0,
        }
    }

    /// Replace the trigger mode
    pub const fn with_trigger(mut self, trigger: TriggerMode) -> Self {
        self.trigger = trigger;
        self
    }

    /// Level a channel must exceed before its label turns on
    pub const fn with_label_floor(mut self, floor: f32) -> Self {
        self.label_floor = floor;
        self
    }

    /// Reject tunings that would break the decay invariants
    pub fn validate(&self) -> GaugeResult<()> {
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(GaugeError::InvalidConfig {
                reason: "channel decay must lie in (0, 1]",
            });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(GaugeError::InvalidConfig {
                reason: "channel threshold must be finite and non-negative",
            });
        }
        match self.trigger {
            TriggerMode::Proportional { full_scale } | TriggerMode::Tracking { full_scale }
                if !(full_scale > 0.0 && full_scale.is_finite()) =>
            {
                Err(GaugeError::InvalidConfig {
                    reason: "channel full scale must be positive",
                })
            }
            _ => Ok(()),
        }
    }
}

/// Live intensity state of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldChannel {
    config: ChannelConfig,
    level: f32,
    direction: f32,
}

impl HoldChannel {
    /// Channel at rest (intensity 0)
    pub const fn new(config: ChannelConfig) -> Self {
        Self {
            config,
            level: 0.0,
            direction: 1.0,
        }
    }

    /// Settings this channel was built with
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Current intensity in [0, 1]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Intensity carrying the sign of the last trigger, in [-1, 1]
    pub fn signed_level(&self) -> f32 {
        self.level * self.direction
    }

    /// Whether the intensity is above the label floor
    pub fn is_on(&self) -> bool {
        self.level > self.config.label_floor
    }

    /// Advance one tick using this channel's axis of the smoothed signal
    pub fn update(&mut self, signal: &SmoothedSignal) -> f32 {
        self.update_value(signal.0.axis(self.config.axis))
    }

    /// Advance one tick with an explicit signed axis value, returning the new level
    pub fn update_value(&mut self, value: f32) -> f32 {
        if self.triggers(value) {
            self.trigger(value);
        }
        self.decay();
        self.level
    }

    /// Trigger test for a signed axis value
    pub fn triggers(&self, value: f32) -> bool {
        match self.config.trigger {
            TriggerMode::Tracking { .. } => true,
            _ => self.config.polarity.drive(value) > self.config.threshold,
        }
    }

    /// Apply a trigger without decaying
    fn trigger(&mut self, value: f32) {
        let drive = self.config.polarity.drive(value);
        self.level = match self.config.trigger {
            TriggerMode::Binary => 1.0,
            TriggerMode::Proportional { full_scale } | TriggerMode::Tracking { full_scale } => {
                (drive / full_scale).clamp(0.0, 1.0)
            }
        };
        if value < 0.0 {
            self.direction = -1.0;
        } else if value > 0.0 {
            self.direction = 1.0;
        }
    }

    /// One geometric decay step
    pub fn decay(&mut self) {
        self.level *= self.config.decay;
    }

    /// Force the intensity back to rest
    pub fn reset(&mut self) {
        self.level = 0.0;
        self.direction = 1.0;
    }
}
