//! RGB colours and the two colour strategies
//!
//! ```text
//! Fade           c(I) = c · I
//! Linear blend   c(I) = from + (to - from) · ⌊100·I⌋ / 100   per component
//! Hue gradient   c(I) = hsv(h_from + (h_to - h_from) · I, 1, 1)
//! ```
//!
//! Fades are truncated toward zero when converted back to `u8`, the same way
//! the NeoPixel drivers cast them. Blends work in integer percent, so they
//! move in 1% steps.

use crate::constants::display::{HUE_GREEN_DEG, HUE_RED_DEG};

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// All channels dark
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    /// Colour from 8-bit channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// All channels zero
    pub const fn is_off(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Fade from off toward `self`; each component is `c · intensity`, truncated
    pub fn scale(self, intensity: f32) -> Rgb {
        let k = intensity.clamp(0.0, 1.0);
        let fade = |c: u8| (c as f32 * k) as u8;
        Rgb::new(fade(self.r), fade(self.g), fade(self.b))
    }

    /// Blend from `self` (t = 0) to `to` (t = 1) in whole-percent steps
    ///
    /// `t` is clamped and truncated to a percentage, then every component is
    /// mapped with integer division rounding toward zero, as Arduino `map()`
    /// does. Halfway from green to orange is therefore `(127, 178, 0)`.
    pub fn lerp(self, to: Rgb, t: f32) -> Rgb {
        let pct = (t.clamp(0.0, 1.0) * 100.0) as i32;
        let mix = |a: u8, b: u8| {
            let a = i32::from(a);
            (a + pct * (i32::from(b) - a) / 100) as u8
        };
        Rgb::new(mix(self.r, to.r), mix(self.g, to.g), mix(self.b, to.b))
    }

    /// Global brightness scaling as done by NeoPixel drivers
    ///
    /// 255 leaves the colour untouched, 0 turns it off.
    pub const fn with_brightness(self, brightness: u8) -> Rgb {
        let k = brightness as u16 + 1;
        Rgb::new(
            ((self.r as u16 * k) >> 8) as u8,
            ((self.g as u16 * k) >> 8) as u8,
            ((self.b as u16 * k) >> 8) as u8,
        )
    }

    /// Fully saturated colour at `hue_deg` on the colour wheel
    pub fn from_hue(hue_deg: f32) -> Rgb {
        let mut hue = libm::fmodf(hue_deg, 360.0);
        if hue < 0.0 {
            hue += 360.0;
        }
        let sector = hue / 60.0;
        let rising = sector - libm::floorf(sector);
        let falling = 1.0 - rising;

        let (r, g, b) = match sector as u8 {
            0 => (1.0, rising, 0.0),
            1 => (falling, 1.0, 0.0),
            2 => (0.0, 1.0, rising),
            3 => (0.0, falling, 1.0),
            4 => (rising, 0.0, 1.0),
            _ => (1.0, 0.0, falling),
        };
        let to_u8 = |v: f32| libm::roundf(v * 255.0) as u8;
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Rgb {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Position on a fixed hue arc
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HueGradient {
    /// Hue at intensity 0 (degrees)
    pub from_deg: f32,
    /// Hue at intensity 1 (degrees)
    pub to_deg: f32,
}

impl HueGradient {
    /// Green through yellow and orange to red
    pub const GREEN_TO_RED: HueGradient = HueGradient::new(HUE_GREEN_DEG, HUE_RED_DEG);

    /// Sweep from `from_deg` to `to_deg`
    pub const fn new(from_deg: f32, to_deg: f32) -> Self {
        Self { from_deg, to_deg }
    }

    /// Hue (degrees) for an intensity in [0, 1]
    pub fn hue_at(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        self.from_deg + (self.to_deg - self.from_deg) * t
    }

    /// Fully saturated colour at `t` in [0, 1] along the sweep
    pub fn color_at(&self, t: f32) -> Rgb {
        Rgb::from_hue(self.hue_at(t))
    }
}

impl Default for HueGradient {
    fn default() -> Self {
        Self::GREEN_TO_RED
    }
}
