//! Driving-Dynamics Classifier
//!
//! ## Overview
//!
//! The classifier turns the smoothed three-axis signal into the only value
//! the rest of the system is allowed to look at: a [`ClassifierState`].
//!
//! ```text
//!                 ┌──────────────┐
//!  SmoothedSignal │ turn   (Y)   │ tracking, signed
//!  ─────────────► │ accel  (+X)  │ binary hold, D = 0.95
//!                 │ brake  (-X)  │ binary hold, D = 0.95
//!                 │ bounce (|Z|) │ binary hold, D = 0.90
//!                 │ magnitude    │ static bands, no memory
//!                 └──────┬───────┘
//!                        ▼
//!                 ClassifierState ──► visual mapper, telemetry
//! ```
//!
//! ## Channel Model
//!
//! Every channel is a [`HoldChannel`]: threshold test, optional trigger,
//! then decay. See [`intensity`] for the exact order. Channels are
//! independent; there is no cross-channel feedback.
//!
//! ## Magnitude
//!
//! The vector norm is converted to G and looked up in a [`BandTable`] with
//! inclusive lower bounds. It has no hold: a 3 G spike is red on exactly the
//! ticks it is present.
//!
//! ## Labels
//!
//! Labels bucket the intensities for display only. They never feed back
//! into the intensities and their boundaries are fixed for the session.

pub mod bands;
pub mod intensity;

pub use bands::{BandTable, Boundary, Severity};
pub use intensity::{ChannelConfig, HoldChannel, Polarity, TriggerMode};

use crate::constants::dynamics::{
    ACCEL_THRESHOLD, BOUNCE_DECAY, BOUNCE_LABEL_FLOOR, BOUNCE_THRESHOLD, BRAKE_THRESHOLD,
    HOLD_DECAY, HOLD_LABEL_FLOOR, MAGNITUDE_BANDS_G, MAGNITUDE_FULL_SCALE_G, TURN_FULL_SCALE,
    TURN_LABEL_BANDS,
};
use crate::constants::sensors::DEFAULT_UNITS_PER_G;
use crate::errors::{GaugeError, GaugeResult};
use crate::sample::{Axis, SmoothedSignal};

/// Semantic channel a zone or label refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Signed lateral force
    Turn,
    /// Forward acceleration
    Accel,
    /// Deceleration
    Brake,
    /// Vertical shocks
    Bounce,
    /// Total force relative to full scale
    Magnitude,
}

/// Tuning for all channels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifierConfig {
    /// Lateral channel
    pub turn: ChannelConfig,
    /// Forward hold channel
    pub accel: ChannelConfig,
    /// Rearward hold channel
    pub brake: ChannelConfig,
    /// Vertical hold channel
    pub bounce: ChannelConfig,
    /// Turn label bounds (intensity), exclusive
    pub turn_label_bands: [f32; 3],
    /// Magnitude band bounds (G), inclusive
    pub magnitude_bands_g: [f32; 3],
    /// Magnitude that maps to level 1.0 (G)
    pub magnitude_full_scale_g: f32,
    /// Force units per G
    pub units_per_g: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            turn: ChannelConfig::tracking(Axis::Y, TURN_FULL_SCALE),
            accel: ChannelConfig::hold(Axis::X, Polarity::Positive, ACCEL_THRESHOLD, HOLD_DECAY)
                .with_label_floor(HOLD_LABEL_FLOOR),
            brake: ChannelConfig::hold(Axis::X, Polarity::Negative, BRAKE_THRESHOLD, HOLD_DECAY)
                .with_label_floor(HOLD_LABEL_FLOOR),
            bounce: ChannelConfig::hold(Axis::Z, Polarity::Either, BOUNCE_THRESHOLD, BOUNCE_DECAY)
                .with_label_floor(BOUNCE_LABEL_FLOOR),
            turn_label_bands: TURN_LABEL_BANDS,
            magnitude_bands_g: MAGNITUDE_BANDS_G,
            magnitude_full_scale_g: MAGNITUDE_FULL_SCALE_G,
            units_per_g: DEFAULT_UNITS_PER_G,
        }
    }
}

impl ClassifierConfig {
    /// Check every channel and both band tables
    pub fn validate(&self) -> GaugeResult<()> {
        for channel in [&self.turn, &self.accel, &self.brake, &self.bounce] {
            channel.validate()?;
        }
        if !(self.units_per_g > 0.0 && self.units_per_g.is_finite()) {
            return Err(GaugeError::InvalidConfig {
                reason: "units_per_g must be positive",
            });
        }
        if !(self.magnitude_full_scale_g > 0.0) {
            return Err(GaugeError::InvalidConfig {
                reason: "magnitude full scale must be positive",
            });
        }
        BandTable::severity(self.turn_label_bands, Boundary::Exclusive)?;
        BandTable::severity(self.magnitude_bands_g, Boundary::Inclusive)?;
        Ok(())
    }
}

/// Display labels derived from the intensities
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelLabels {
    /// Severity of the current turn
    pub turn: Severity,
    /// Accelerating above the label floor
    pub accel: bool,
    /// Braking above the label floor
    pub brake: bool,
    /// Bouncing above the label floor
    pub bounce: bool,
}

/// Snapshot of every channel after one tick
///
/// The sole input of the visual mapper and of the telemetry labels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifierState {
    /// Signed turn intensity in [-1, 1]; negative is the -Y direction
    pub turn: f32,
    /// Accel hold in [0, 1]
    pub accel: f32,
    /// Brake hold in [0, 1]
    pub brake: f32,
    /// Bounce hold in [0, 1]
    pub bounce: f32,
    /// Vector norm of the smoothed signal (G)
    pub magnitude_g: f32,
    /// Magnitude normalised to the gauge full scale, in [0, 1]
    pub magnitude_level: f32,
    /// Static band of the magnitude
    pub magnitude_band: Severity,
    /// Discrete labels derived from the levels
    pub labels: ChannelLabels,
}

impl ClassifierState {
    /// Unsigned intensity of a channel in [0, 1]
    pub fn intensity(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Turn => libm::fabsf(self.turn),
            Channel::Accel => self.accel,
            Channel::Brake => self.brake,
            Channel::Bounce => self.bounce,
            Channel::Magnitude => self.magnitude_level,
        }
    }
}

/// Stateful classifier owning one hold channel per semantic event
#[derive(Debug, Clone)]
pub struct Classifier {
    turn: HoldChannel,
    accel: HoldChannel,
    brake: HoldChannel,
    bounce: HoldChannel,
    turn_labels: BandTable<Severity, 3>,
    magnitude_bands: BandTable<Severity, 3>,
    magnitude_full_scale_g: f32,
    units_per_g: f32,
    state: ClassifierState,
}

impl Classifier {
    /// Validate `config` and start every channel at rest
    pub fn new(config: &ClassifierConfig) -> GaugeResult<Self> {
        config.validate()?;
        Ok(Self {
            turn: HoldChannel::new(config.turn),
            accel: HoldChannel::new(config.accel),
            brake: HoldChannel::new(config.brake),
            bounce: HoldChannel::new(config.bounce),
            turn_labels: BandTable::severity(config.turn_label_bands, Boundary::Exclusive)?,
            magnitude_bands: BandTable::severity(config.magnitude_bands_g, Boundary::Inclusive)?,
            magnitude_full_scale_g: config.magnitude_full_scale_g,
            units_per_g: config.units_per_g,
            state: ClassifierState::default(),
        })
    }

    /// Advance every channel by one tick
    pub fn classify(&mut self, signal: &SmoothedSignal) -> ClassifierState {
        self.turn.update(signal);
        self.accel.update(signal);
        self.brake.update(signal);
        self.bounce.update(signal);

        let magnitude_g = signal.magnitude() / self.units_per_g;
        let turn_level = self.turn.level();

        self.state = ClassifierState {
            turn: self.turn.signed_level(),
            accel: self.accel.level(),
            brake: self.brake.level(),
            bounce: self.bounce.level(),
            magnitude_g,
            magnitude_level: (magnitude_g / self.magnitude_full_scale_g).clamp(0.0, 1.0),
            magnitude_band: self.magnitude_bands.classify(magnitude_g),
            labels: ChannelLabels {
                turn: self.turn_labels.classify(turn_level),
                accel: self.accel.is_on(),
                brake: self.brake.is_on(),
                bounce: self.bounce.is_on(),
            },
        };
        self.state
    }

    /// State produced by the last call to [`classify`](Self::classify)
    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Return every channel to rest
    pub fn reset(&mut self) {
        self.turn.reset();
        self.accel.reset();
        self.brake.reset();
        self.bounce.reset();
        self.state = ClassifierState::default();
    }
}
