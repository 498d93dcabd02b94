//! Ordered band tables
//!
//! A band table maps a scalar onto a discrete label with one comparison pass
//! over an ascending list of lower bounds. It replaces nested if/else chains
//! for the turn labels and the magnitude gauge.
//!
//! ```rust
//! use forcegauge_core::classifier::{BandTable, Boundary, Severity};
//!
//! let table = BandTable::severity([1.5, 2.5, 3.5], Boundary::Inclusive).unwrap();
//! assert_eq!(table.classify(1.49), Severity::Green);
//! assert_eq!(table.classify(1.5), Severity::Yellow);
//! assert_eq!(table.classify(9.0), Severity::Red);
//! ```

use core::fmt;

use crate::errors::{GaugeError, GaugeResult};

/// Which side of a boundary the boundary value itself belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    /// `value >= bound` enters the band
    Inclusive,
    /// `value > bound` enters the band
    Exclusive,
}

impl Boundary {
    #[inline]
    fn passes(&self, value: f32, bound: f32) -> bool {
        match self {
            Boundary::Inclusive => value >= bound,
            Boundary::Exclusive => value > bound,
        }
    }
}

/// Four-step severity used by both the turn labels and the magnitude gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Calm
    #[default]
    Green,
    /// Noticeable
    Yellow,
    /// Hard
    Orange,
    /// Harsh
    Red,
}

impl Severity {
    /// Telemetry label
    pub const fn label(&self) -> &'static str {
        match self {
            Severity::Green => "GREEN",
            Severity::Yellow => "YELLOW",
            Severity::Orange => "ORANGE",
            Severity::Red => "RED",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Severity {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.label())
    }
}

/// Ascending lower bounds with the label each one opens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable<L: Copy, const N: usize> {
    below: L,
    bands: [(f32, L); N],
    boundary: Boundary,
}

impl<L: Copy, const N: usize> BandTable<L, N> {
    /// Build a table; `below` is the label for values under the first bound
    ///
    /// Bounds must be finite and strictly ascending.
    pub fn new(below: L, bands: [(f32, L); N], boundary: Boundary) -> GaugeResult<Self> {
        let ascending = bands.windows(2).all(|w| w[0].0 < w[1].0);
        let finite = bands.iter().all(|(bound, _)| bound.is_finite());
        if !ascending || !finite {
            return Err(GaugeError::InvalidConfig {
                reason: "band bounds must be finite and strictly ascending",
            });
        }
        Ok(Self { below, bands, boundary })
    }

    /// Label for `value`
    pub fn classify(&self, value: f32) -> L {
        let mut label = self.below;
        for (bound, band) in &self.bands {
            if !self.boundary.passes(value, *bound) {
                break;
            }
            label = *band;
        }
        label
    }

    /// How values equal to a bound are banded
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }
}

impl BandTable<Severity, 3> {
    /// Green below the first bound, then yellow, orange and red
    pub fn severity(bounds: [f32; 3], boundary: Boundary) -> GaugeResult<Self> {
        let bands = [
            (bounds[0], Severity::Yellow),
            (bounds[1], Severity::Orange),
            (bounds[2], Severity::Red),
        ];
        Self::new(Severity::Green, bands, boundary)
    }
}
