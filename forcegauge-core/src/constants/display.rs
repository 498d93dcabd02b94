//! LED Ring Geometry and Colours

use crate::visual::Rgb;

/// NeoPixels on the Circuit Playground ring.
pub const RING_LED_COUNT: usize = 10;

/// Upper bound on zones in one layout.
pub const MAX_ZONES: usize = 8;

/// Global brightness (0-255) the ring is driven at.
///
/// 80/255 keeps ten pixels within USB current limits.
pub const DEFAULT_BRIGHTNESS: u8 = 80;

/// Turn zone colour at zero intensity.
pub const TURN_CALM: Rgb = Rgb::new(0, 255, 0);

/// Turn zone colour at full intensity.
pub const TURN_HARD: Rgb = Rgb::new(255, 100, 0);

/// Accel zone colour at full intensity.
pub const ACCEL_GREEN: Rgb = Rgb::new(0, 255, 0);

/// Brake zone colour at full intensity.
pub const BRAKE_RED: Rgb = Rgb::new(255, 0, 0);

/// Bounce zone colour at full intensity.
pub const BOUNCE_PURPLE: Rgb = Rgb::new(150, 0, 255);

/// Hue (degrees) at the calm end of gradients.
pub const HUE_GREEN_DEG: f32 = 120.0;

/// Hue (degrees) at the hard end of gradients.
pub const HUE_RED_DEG: f32 = 0.0;

/// Largest ring a frame can describe.
pub const MAX_LEDS: usize = 32;
