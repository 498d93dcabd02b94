//! Clock and Busy-Delay
//!
//! `TimeSource` lives in [`crate::time`] and is re-exported here so all
//! collaborator traits can be imported from one place.
//!
//! ## Platform-Specific Considerations
//!
//! ### Bare Metal (no_std)
//! - Back `Delay` with a SysTick or timer-peripheral busy loop
//! - Consider timer overflow and wraparound in `TimeSource::now`
//!
//! ### Linux/Unix
//! - `StdDelay` sleeps the thread; `StdClock` reads `Instant`

pub use crate::time::TimeSource;

/// Blocking delay used to pace the loop and the calibration sampler
pub trait Delay {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

/// Thread-sleep delay
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
