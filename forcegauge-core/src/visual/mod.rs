//! LED ring rendering
//!
//! - [`color`] - RGB values, linear blends and hue gradients
//! - [`frame`] - complete per-tick frames
//! - [`mapper`] - zones and the classifier-to-frame mapping

pub mod color;
pub mod frame;
pub mod mapper;

pub use color::{HueGradient, Rgb};
pub use frame::VisualFrame;
pub use mapper::{ColorStyle, VisualMapper, Zone, ZoneFill, ZoneLayout};
