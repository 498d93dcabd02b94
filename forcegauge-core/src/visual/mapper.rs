//! Classifier state to LED frame
//!
//! The ring is split into disjoint zones. Each zone reads exactly one
//! channel of the [`ClassifierState`] and colours its LEDs from that value
//! alone:
//!
//! ```text
//!  force_gauge()                       ring_gauge()
//!
//!  0 1 2 3 4 | 5 6 | 7 | 8 9           0 1 2 3 4 5 6 7 8 9
//!  turn      | acc | b | brake         magnitude (hue gradient)
//! ```
//!
//! Every call builds a fresh frame from all-off, so a zone that goes quiet
//! is dark on the very next frame.

use crate::classifier::{Channel, ClassifierState, Severity};
use crate::constants::display::{
    ACCEL_GREEN, BOUNCE_PURPLE, BRAKE_RED, MAX_LEDS, MAX_ZONES, RING_LED_COUNT, TURN_CALM,
    TURN_HARD,
};
use crate::errors::{GaugeError, GaugeResult};
use crate::visual::color::{HueGradient, Rgb};
use crate::visual::frame::VisualFrame;

/// How a zone turns an intensity into a colour
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorStyle {
    /// Fade from off up to `color`
    Linear {
        /// Colour at full level
        color: Rgb,
    },
    /// Linear blend between two colours
    Blend {
        /// Colour at level zero
        from: Rgb,
        /// Colour at full level
        to: Rgb,
    },
    /// Position on a hue arc
    Hue(HueGradient),
    /// One colour per severity band: green, yellow, orange, red
    ///
    /// Only valid on channels that carry a severity (turn, magnitude).
    Banded {
        /// One colour per severity, green to red
        colors: [Rgb; 4],
    },
}

/// How many of a zone's LEDs light up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneFill {
    /// Every LED shows the zone colour
    #[default]
    Uniform,
    /// Bar graph: `round(intensity · count)` LEDs from the zone start
    Bar,
}

/// A contiguous run of LEDs bound to one channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    /// First LED index
    pub start: usize,
    /// Number of LEDs
    pub count: usize,
    /// Channel whose level drives the zone
    pub channel: Channel,
    /// How the level becomes a colour
    pub style: ColorStyle,
    /// How the level fills the zone
    pub fill: ZoneFill,
    /// Show the zero-intensity colour instead of going dark at rest
    pub always_lit: bool,
}

impl Zone {
    /// Zone that goes dark at level zero
    pub const fn new(start: usize, count: usize, channel: Channel, style: ColorStyle) -> Self {
        Self {
            start,
            count,
            channel,
            style,
            fill: ZoneFill::Uniform,
            always_lit: false,
        }
    }

    /// Keep the zone lit at level zero
    pub const fn always_lit(mut self) -> Self {
        self.always_lit = true;
        self
    }

    /// Fill style
    pub const fn with_fill(mut self, fill: ZoneFill) -> Self {
        self.fill = fill;
        self
    }

    /// One past the last LED
    pub const fn end(&self) -> usize {
        self.start + self.count
    }

    fn overlaps(&self, other: &Zone) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    fn color(&self, state: &ClassifierState, intensity: f32) -> Rgb {
        match self.style {
            ColorStyle::Linear { color } => color.scale(intensity),
            ColorStyle::Blend { from, to } => from.lerp(to, intensity),
            ColorStyle::Hue(gradient) => gradient.color_at(intensity),
            ColorStyle::Banded { colors } => {
                let band = severity_of(state, self.channel).unwrap_or(Severity::Green);
                colors[band as usize]
            }
        }
    }
}

fn severity_of(state: &ClassifierState, channel: Channel) -> Option<Severity> {
    match channel {
        Channel::Turn => Some(state.labels.turn),
        Channel::Magnitude => Some(state.magnitude_band),
        Channel::Accel | Channel::Brake | Channel::Bounce => None,
    }
}

/// Ordered set of disjoint zones over a ring of `led_count` LEDs
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneLayout {
    led_count: usize,
    zones: heapless::Vec<Zone, MAX_ZONES>,
}

impl ZoneLayout {
    /// Empty layout; every LED stays dark
    pub fn new(led_count: usize) -> GaugeResult<Self> {
        if led_count == 0 || led_count > MAX_LEDS {
            return Err(GaugeError::CapacityExceeded {
                required: led_count,
                available: MAX_LEDS,
            });
        }
        Ok(Self {
            led_count,
            zones: heapless::Vec::new(),
        })
    }

    /// Turn, accel, bounce and brake zones on the 10-LED ring
    pub fn force_gauge() -> Self {
        Self::preset(
            RING_LED_COUNT,
            &[
                Zone::new(0, 5, Channel::Turn, ColorStyle::Blend { from: TURN_CALM, to: TURN_HARD })
                    .always_lit(),
                Zone::new(5, 2, Channel::Accel, ColorStyle::Linear { color: ACCEL_GREEN }),
                Zone::new(7, 1, Channel::Bounce, ColorStyle::Linear { color: BOUNCE_PURPLE }),
                Zone::new(8, 2, Channel::Brake, ColorStyle::Linear { color: BRAKE_RED }),
            ],
        )
    }

    /// Whole ring as one magnitude gauge on the green-to-red hue arc
    pub fn ring_gauge() -> Self {
        Self::preset(
            RING_LED_COUNT,
            &[Zone::new(
                0,
                RING_LED_COUNT,
                Channel::Magnitude,
                ColorStyle::Hue(HueGradient::GREEN_TO_RED),
            )
            .always_lit()],
        )
    }

    fn preset(led_count: usize, zones: &[Zone]) -> Self {
        let mut layout = Self {
            led_count,
            zones: heapless::Vec::new(),
        };
        for zone in zones.iter().take(MAX_ZONES) {
            let _ = layout.zones.push(*zone);
        }
        layout
    }

    /// Add a zone, rejecting overlaps and spans past the ring
    pub fn push(&mut self, zone: Zone) -> GaugeResult<()> {
        Self::check_zone(self.led_count, &zone)?;
        if self.zones.iter().any(|z| z.overlaps(&zone)) {
            return Err(GaugeError::InvalidConfig {
                reason: "zones overlap",
            });
        }
        self.zones
            .push(zone)
            .map_err(|_| GaugeError::CapacityExceeded {
                required: self.zones.len() + 1,
                available: MAX_ZONES,
            })
    }

    /// Add a zone; out-of-ring or overlapping zones are refused
    pub fn with_zone(mut self, zone: Zone) -> GaugeResult<Self> {
        self.push(zone)?;
        Ok(self)
    }

    fn check_zone(led_count: usize, zone: &Zone) -> GaugeResult<()> {
        if zone.count == 0 || zone.end() > led_count {
            return Err(GaugeError::InvalidConfig {
                reason: "zone must be non-empty and inside the ring",
            });
        }
        if matches!(zone.style, ColorStyle::Banded { .. })
            && !matches!(zone.channel, Channel::Turn | Channel::Magnitude)
        {
            return Err(GaugeError::InvalidConfig {
                reason: "banded colours need a turn or magnitude zone",
            });
        }
        Ok(())
    }

    /// Re-check a layout that did not come through [`push`](Self::push)
    pub fn validate(&self) -> GaugeResult<()> {
        if self.led_count == 0 || self.led_count > MAX_LEDS {
            return Err(GaugeError::CapacityExceeded {
                required: self.led_count,
                available: MAX_LEDS,
            });
        }
        for (i, zone) in self.zones.iter().enumerate() {
            Self::check_zone(self.led_count, zone)?;
            if self.zones[..i].iter().any(|z| z.overlaps(zone)) {
                return Err(GaugeError::InvalidConfig {
                    reason: "zones overlap",
                });
            }
        }
        Ok(())
    }

    /// Pixels on the ring
    pub fn led_count(&self) -> usize {
        self.led_count
    }

    /// Zones in insertion order
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self::force_gauge()
    }
}

/// Stateless classifier-to-frame mapping
#[derive(Debug, Clone, PartialEq)]
pub struct VisualMapper {
    layout: ZoneLayout,
    brightness: u8,
}

impl VisualMapper {
    /// Validate `layout` and keep it with the brightness
    pub fn new(layout: ZoneLayout, brightness: u8) -> GaugeResult<Self> {
        layout.validate()?;
        Ok(Self { layout, brightness })
    }

    /// Zone layout
    pub fn layout(&self) -> &ZoneLayout {
        &self.layout
    }

    /// Global brightness applied to every pixel
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Build the complete frame for one classifier state
    pub fn map_to_frame(&self, state: &ClassifierState) -> VisualFrame {
        let mut frame = VisualFrame::off(self.layout.led_count);
        for zone in self.layout.zones() {
            let intensity = state.intensity(zone.channel);
            if !zone.always_lit && !(intensity > 0.0) {
                continue;
            }
            let color = zone.color(state, intensity);
            let lit = match zone.fill {
                ZoneFill::Uniform => zone.count,
                ZoneFill::Bar => bar_length(intensity, zone.count, zone.always_lit),
            };
            frame.fill(zone.start, lit, color);
        }
        frame.dim(self.brightness);
        frame
    }
}

fn bar_length(intensity: f32, count: usize, always_lit: bool) -> usize {
    let lit = libm::roundf(intensity.clamp(0.0, 1.0) * count as f32) as usize;
    if always_lit {
        lit.max(1)
    } else {
        lit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ChannelLabels;

    fn mapper(layout: ZoneLayout) -> VisualMapper {
        VisualMapper::new(layout, 255).unwrap()
    }

    #[test]
    fn rest_frame_shows_only_the_calm_turn_zone() {
        let frame = mapper(ZoneLayout::force_gauge()).map_to_frame(&ClassifierState::default());
        assert_eq!(frame.len(), RING_LED_COUNT);
        for i in 0..5 {
            assert_eq!(frame.get(i), Some(TURN_CALM));
        }
        for i in 5..10 {
            assert_eq!(frame.get(i), Some(Rgb::OFF));
        }
    }

    #[test]
    fn half_turn_blends_in_whole_percent() {
        for turn in [0.5, -0.5] {
            let state = ClassifierState {
                turn,
                ..ClassifierState::default()
            };
            let frame = mapper(ZoneLayout::force_gauge()).map_to_frame(&state);
            for i in 0..5 {
                assert_eq!(frame.get(i), Some(Rgb::new(127, 178, 0)));
            }
        }
    }

    #[test]
    fn zones_read_only_their_channel() {
        let state = ClassifierState {
            brake: 0.95,
            ..ClassifierState::default()
        };
        let frame = mapper(ZoneLayout::force_gauge()).map_to_frame(&state);
        assert_eq!(frame.get(5), Some(Rgb::OFF));
        assert_eq!(frame.get(7), Some(Rgb::OFF));
        assert_eq!(frame.get(8), Some(Rgb::new(242, 0, 0)));
        assert_eq!(frame.get(9), Some(Rgb::new(242, 0, 0)));
    }

    #[test]
    fn uncovered_leds_are_off() {
        let layout = ZoneLayout::new(6)
            .unwrap()
            .with_zone(Zone::new(0, 2, Channel::Accel, ColorStyle::Linear { color: ACCEL_GREEN }))
            .unwrap();
        let state = ClassifierState {
            accel: 1.0,
            ..ClassifierState::default()
        };
        let frame = mapper(layout).map_to_frame(&state);
        assert_eq!(frame.lit_count(), 2);
        assert_eq!(frame.get(5), Some(Rgb::OFF));
    }

    #[test]
    fn ring_gauge_follows_magnitude_hue() {
        let state = ClassifierState {
            magnitude_level: 1.0,
            ..ClassifierState::default()
        };
        let frame = mapper(ZoneLayout::ring_gauge()).map_to_frame(&state);
        assert!(frame.iter().all(|(_, c)| c == Rgb::new(255, 0, 0)));
    }

    #[test]
    fn banded_zone_uses_severity() {
        let colors = [
            Rgb::new(0, 255, 0),
            Rgb::new(255, 255, 0),
            Rgb::new(255, 128, 0),
            Rgb::new(255, 0, 0),
        ];
        let layout = ZoneLayout::new(4)
            .unwrap()
            .with_zone(Zone::new(0, 4, Channel::Turn, ColorStyle::Banded { colors }))
            .unwrap();
        let state = ClassifierState {
            turn: -0.6,
            labels: ChannelLabels {
                turn: Severity::Orange,
                ..ChannelLabels::default()
            },
            ..ClassifierState::default()
        };
        let frame = mapper(layout).map_to_frame(&state);
        assert_eq!(frame.get(0), Some(Rgb::new(255, 128, 0)));
    }

    #[test]
    fn bar_fill_lights_a_fraction() {
        let layout = ZoneLayout::new(10)
            .unwrap()
            .with_zone(
                Zone::new(0, 10, Channel::Magnitude, ColorStyle::Hue(HueGradient::GREEN_TO_RED))
                    .with_fill(ZoneFill::Bar),
            )
            .unwrap();
        let state = ClassifierState {
            magnitude_level: 0.3,
            ..ClassifierState::default()
        };
        assert_eq!(mapper(layout).map_to_frame(&state).lit_count(), 3);
    }

    #[test]
    fn brightness_is_applied_last() {
        let state = ClassifierState {
            accel: 1.0,
            ..ClassifierState::default()
        };
        let frame = VisualMapper::new(ZoneLayout::force_gauge(), 80)
            .unwrap()
            .map_to_frame(&state);
        assert_eq!(frame.get(5), Some(Rgb::new(0, 80, 0)));
    }

    #[test]
    fn layout_rejects_overlap_and_overflow() {
        let accel = Zone::new(0, 3, Channel::Accel, ColorStyle::Linear { color: ACCEL_GREEN });
        let brake = Zone::new(2, 3, Channel::Brake, ColorStyle::Linear { color: BRAKE_RED });
        let mut layout = ZoneLayout::new(10).unwrap();
        layout.push(accel).unwrap();
        assert!(layout.push(brake).is_err());
        assert!(layout
            .push(Zone::new(8, 5, Channel::Brake, ColorStyle::Linear { color: BRAKE_RED }))
            .is_err());
        assert!(ZoneLayout::new(MAX_LEDS + 1).is_err());
    }

    #[test]
    fn banded_needs_a_severity_channel() {
        let zone = Zone::new(0, 1, Channel::Bounce, ColorStyle::Banded { colors: [Rgb::OFF; 4] });
        assert!(ZoneLayout::new(4).unwrap().push(zone).is_err());
    }
}
