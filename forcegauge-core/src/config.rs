//! Session configuration
//!
//! Everything tunable is fixed when a session starts. A config is plain
//! data: build it from a preset, adjust it with the `with_*` methods, and
//! let [`Session::new`](crate::session::Session::new) validate it.
//!
//! ```rust
//! use forcegauge_core::config::GaugeConfig;
//! use forcegauge_core::filter::FilterStrategy;
//!
//! let config = GaugeConfig::force_gauge()
//!     .with_filter(FilterStrategy::Ema { alpha: 0.3 })
//!     .with_telemetry_interval_ms(200);
//! assert!(config.validate().is_ok());
//! ```

use fugit::MillisDurationU64;

use crate::calibration::CalibrationSettings;
use crate::classifier::{ChannelConfig, ClassifierConfig};
use crate::constants::display::DEFAULT_BRIGHTNESS;
use crate::constants::dynamics::RING_GAUGE_ALPHA;
use crate::constants::time::{
    DEFAULT_TELEMETRY_INTERVAL_MS, DEFAULT_TICK_INTERVAL_MS, RING_GAUGE_TICK_INTERVAL_MS,
};
use crate::errors::{GaugeError, GaugeResult};
use crate::filter::{FilterStrategy, InputConditioning};
use crate::sample::AxisSample;
use crate::telemetry::TelemetryFormat;
use crate::visual::ZoneLayout;

/// Complete, session-wide configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugeConfig {
    /// Smoothing strategy
    pub filter: FilterStrategy,
    /// Scale and gravity compensation applied before smoothing
    pub conditioning: InputConditioning,
    /// Channel thresholds, decays and bands
    pub classifier: ClassifierConfig,
    /// Boot calibration
    pub calibration: CalibrationSettings,
    /// Loop pacing (ms)
    pub tick_interval_ms: u64,
    /// Minimum spacing of telemetry lines (ms)
    pub telemetry_interval_ms: u64,
    /// Telemetry line schema
    pub telemetry_format: TelemetryFormat,
    /// Mirror each telemetry line to the log at debug level
    pub mirror_telemetry_to_log: bool,
    /// Global LED brightness (0-255)
    pub brightness: u8,
    /// LED zones
    pub layout: ZoneLayout,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::force_gauge()
    }
}

impl GaugeConfig {
    /// Ten-LED turn/accel/brake/bounce visualiser
    pub fn force_gauge() -> Self {
        Self {
            filter: FilterStrategy::Window { reads: 1 },
            conditioning: InputConditioning::default(),
            classifier: ClassifierConfig::default(),
            calibration: CalibrationSettings::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            telemetry_interval_ms: DEFAULT_TELEMETRY_INTERVAL_MS,
            telemetry_format: TelemetryFormat::Labeled,
            mirror_telemetry_to_log: true,
            brightness: DEFAULT_BRIGHTNESS,
            layout: ZoneLayout::force_gauge(),
        }
    }

    /// Whole ring as a smoothed magnitude gauge
    pub fn ring_gauge() -> Self {
        Self {
            filter: FilterStrategy::Ema {
                alpha: RING_GAUGE_ALPHA,
            },
            tick_interval_ms: RING_GAUGE_TICK_INTERVAL_MS,
            telemetry_format: TelemetryFormat::Csv,
            layout: ZoneLayout::ring_gauge(),
            ..Self::force_gauge()
        }
    }

    /// Smoothing strategy
    pub fn with_filter(mut self, filter: FilterStrategy) -> Self {
        self.filter = filter;
        self
    }

    /// Multiplier from calibrated m/s² to force units
    pub fn with_input_scale(mut self, scale: f32) -> Self {
        self.conditioning.input_scale = scale;
        self
    }

    /// Gravity vector added after scaling, in force units
    pub fn with_gravity_compensation(mut self, gravity: AxisSample) -> Self {
        self.conditioning.gravity_compensation = gravity;
        self
    }

    /// Force units that make up one G
    pub fn with_units_per_g(mut self, units_per_g: f32) -> Self {
        self.classifier.units_per_g = units_per_g;
        self
    }

    /// Replace the turn channel
    pub fn with_turn(mut self, channel: ChannelConfig) -> Self {
        self.classifier.turn = channel;
        self
    }

    /// Replace the accel channel
    pub fn with_accel(mut self, channel: ChannelConfig) -> Self {
        self.classifier.accel = channel;
        self
    }

    /// Replace the brake channel
    pub fn with_brake(mut self, channel: ChannelConfig) -> Self {
        self.classifier.brake = channel;
        self
    }

    /// Replace the bounce channel
    pub fn with_bounce(mut self, channel: ChannelConfig) -> Self {
        self.classifier.bounce = channel;
        self
    }

    /// Magnitude band bounds in G (yellow, orange, red)
    pub fn with_magnitude_bands(mut self, bands: [f32; 3]) -> Self {
        self.classifier.magnitude_bands_g = bands;
        self
    }

    /// Turn severity bounds on `|turn|`
    pub fn with_turn_label_bands(mut self, bands: [f32; 3]) -> Self {
        self.classifier.turn_label_bands = bands;
        self
    }

    /// Replace every calibration setting
    pub fn with_calibration(mut self, calibration: CalibrationSettings) -> Self {
        self.calibration = calibration;
        self
    }

    /// Rest readings averaged at boot
    pub fn with_calibration_samples(mut self, samples: u16) -> Self {
        self.calibration.samples = samples;
        self
    }

    /// Tick period in milliseconds
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Minimum gap between telemetry lines
    pub fn with_telemetry_interval_ms(mut self, ms: u64) -> Self {
        self.telemetry_interval_ms = ms;
        self
    }

    /// Wire format for telemetry lines
    pub fn with_telemetry_format(mut self, format: TelemetryFormat) -> Self {
        self.telemetry_format = format;
        self
    }

    /// Also write each telemetry line to the log
    pub fn with_log_mirror(mut self, enabled: bool) -> Self {
        self.mirror_telemetry_to_log = enabled;
        self
    }

    /// Global LED brightness, 255 is full
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// LED zone layout
    pub fn with_layout(mut self, layout: ZoneLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Tick period as a duration
    pub fn tick_interval(&self) -> MillisDurationU64 {
        MillisDurationU64::millis(self.tick_interval_ms)
    }

    /// Telemetry gap as a duration
    pub fn telemetry_interval(&self) -> MillisDurationU64 {
        MillisDurationU64::millis(self.telemetry_interval_ms)
    }

    /// Check every section; the first problem found is returned
    pub fn validate(&self) -> GaugeResult<()> {
        self.filter.validate()?;
        self.classifier.validate()?;
        self.calibration.validate()?;
        self.layout.validate()?;
        if self.tick_interval_ms == 0 {
            return Err(GaugeError::InvalidConfig {
                reason: "tick interval must be at least 1 ms",
            });
        }
        if u32::try_from(self.tick_interval_ms).is_err() {
            return Err(GaugeError::InvalidConfig {
                reason: "tick interval does not fit a delay",
            });
        }
        if !(self.conditioning.input_scale.is_finite() && self.conditioning.input_scale != 0.0) {
            return Err(GaugeError::InvalidConfig {
                reason: "input scale must be finite and non-zero",
            });
        }
        Ok(())
    }
}
