//! Complete LED frames
//!
//! A frame always holds a colour for every LED of the ring. There is no
//! "unchanged" pixel: building a frame starts from all-off.

use crate::constants::display::MAX_LEDS;
use crate::visual::color::Rgb;

/// Colour assignment for LEDs `0..len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualFrame {
    pixels: [Rgb; MAX_LEDS],
    len: usize,
}

impl VisualFrame {
    /// Frame of `len` dark pixels; `len` is capped at [`MAX_LEDS`]
    pub const fn off(len: usize) -> Self {
        let len = if len > MAX_LEDS { MAX_LEDS } else { len };
        Self {
            pixels: [Rgb::OFF; MAX_LEDS],
            len,
        }
    }

    /// Alternating red/off frame shown when boot fails
    ///
    /// `phase` swaps which pixels are lit so the driver can blink it.
    pub fn failure_pattern(len: usize, phase: bool) -> Self {
        let mut frame = Self::off(len);
        for index in 0..frame.len {
            if (index % 2 == 0) != phase {
                frame.pixels[index] = Rgb::new(255, 0, 0);
            }
        }
        frame
    }

    /// Number of pixels on the ring
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-length ring
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pixel at `index`, `None` past the ring
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.as_slice().get(index).copied()
    }

    /// Set one pixel; indices past the ring are ignored
    pub fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.as_mut_slice().get_mut(index) {
            *pixel = color;
        }
    }

    /// Set every pixel in `start..start + count`, clipped to the ring
    pub fn fill(&mut self, start: usize, count: usize, color: Rgb) {
        let end = start.saturating_add(count).min(self.len);
        if start < end {
            self.pixels[start..end].fill(color);
        }
    }

    /// Pixels as a slice
    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels[..self.len]
    }

    fn as_mut_slice(&mut self) -> &mut [Rgb] {
        &mut self.pixels[..self.len]
    }

    /// `(index, colour)` for every LED in order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Rgb)> + '_ {
        self.as_slice().iter().copied().enumerate()
    }

    /// Apply global brightness to every pixel
    pub fn dim(&mut self, brightness: u8) {
        for pixel in self.as_mut_slice() {
            *pixel = pixel.with_brightness(brightness);
        }
    }

    /// Number of pixels that are not off
    pub fn lit_count(&self) -> usize {
        self.as_slice().iter().filter(|c| !c.is_off()).count()
    }
}
