//! Cooperative Shutdown
//!
//! A tick always runs to completion. The driver checks the signal between
//! ticks and returns once it fires.

/// Checked once per tick boundary
pub trait ShutdownSignal {
    /// `true` once the loop should stop
    fn should_stop(&self) -> bool;
}

impl<F: Fn() -> bool> ShutdownSignal for F {
    fn should_stop(&self) -> bool {
        self()
    }
}

/// Never stops: the firmware main loop
#[derive(Debug, Default, Clone, Copy)]
pub struct RunForever;

impl ShutdownSignal for RunForever {
    fn should_stop(&self) -> bool {
        false
    }
}

#[cfg(feature = "std")]
impl ShutdownSignal for std::sync::atomic::AtomicBool {
    fn should_stop(&self) -> bool {
        self.load(std::sync::atomic::Ordering::Relaxed)
    }
}
