//! Simulated Drive Example
//!
//! Runs the full driver loop (calibration, fixed-rate ticks, LED frames and
//! rate-limited telemetry) against simulated hardware. The clock is virtual,
//! so six seconds of driving finish instantly.
//!
//! ## What You'll Learn
//!
//! - Implementing `SensorSource`, `LedSink` and `TelemetrySink`
//! - Booting a `Driver` and running it until a shutdown signal fires
//! - How sensor faults are absorbed without stopping the loop
//! - Reading the session statistics afterwards
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_simulated_drive
//! ```
//!
//! Use a terminal with 24-bit colour to see the ring.

use forcegauge_core::{
    time::{MockTimeSource, TimeSource},
    traits::{Delay, LedSink, SensorSource, TelemetrySink},
    AxisSample, Driver, GaugeConfig, GaugeError, GaugeResult, Rgb,
};

/// Synthetic car: accelerate, sweep through a bend, brake, cross a rough patch
struct SimulatedCar<'a> {
    clock: &'a MockTimeSource,
    reads: u32,
}

impl SensorSource for SimulatedCar<'_> {
    fn read_axes(&mut self) -> nb::Result<AxisSample, GaugeError> {
        self.reads += 1;
        // the bus drops one read in 97
        if self.reads % 97 == 0 {
            return Err(nb::Error::Other(GaugeError::SensorUnavailable { attempts: 1 }));
        }

        let t = self.clock.now() as f32 / 1000.0;
        let noise = 0.05 * libm::sinf(t * 131.0);
        let (x, y, z) = match self.clock.now() {
            0..=999 => (0.0, 0.0, 0.0),
            1000..=1999 => (2.8, 0.0, 0.0),
            2000..=3499 => (0.3, 4.0 * libm::sinf((t - 2.0) * core::f32::consts::PI / 1.5), 0.0),
            3500..=4299 => (-4.2, 0.0, 0.0),
            4300..=5299 => (0.0, 0.0, 3.2 * libm::sinf(t * 60.0)),
            _ => (0.0, 0.0, 0.0),
        };
        Ok(AxisSample::new(x + noise, y + noise, 9.8 + z))
    }
}

/// Prints the ring as a row of coloured blocks, once every `every` frames
struct TerminalRing {
    pixels: Vec<Rgb>,
    frames: u32,
    every: u32,
}

impl LedSink for TerminalRing {
    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(p) = self.pixels.get_mut(index) {
            *p = color;
        }
    }

    fn show(&mut self) {
        self.frames += 1;
        if self.frames % self.every != 0 {
            return;
        }
        let row: String = self
            .pixels
            .iter()
            .map(|c| format!("\x1b[38;2;{};{};{}m●\x1b[0m", c.r, c.g, c.b))
            .collect();
        println!("  ring {row}");
    }
}

/// Writes telemetry lines to stdout
struct StdoutLink;

impl TelemetrySink for StdoutLink {
    fn is_connected(&self) -> bool {
        true
    }

    fn send(&mut self, bytes: &[u8]) -> GaugeResult<()> {
        print!("  link {}", String::from_utf8_lossy(bytes));
        Ok(())
    }
}

/// Advances the virtual clock instead of sleeping
struct VirtualDelay<'a>(&'a MockTimeSource);

impl Delay for VirtualDelay<'_> {
    fn delay_ms(&mut self, ms: u32) {
        self.0.advance(u64::from(ms));
    }
}

fn main() {
    println!("ForceGauge Simulated Drive Example");
    println!("==================================\n");

    let clock = MockTimeSource::new(0);
    let config = GaugeConfig::force_gauge()
        .with_calibration_samples(50)
        .with_telemetry_interval_ms(500);

    let mut driver = match Driver::new(
        &config,
        SimulatedCar {
            clock: &clock,
            reads: 0,
        },
        TerminalRing {
            pixels: vec![Rgb::OFF; config.layout.led_count()],
            frames: 0,
            every: 25,
        },
        StdoutLink,
        &clock,
        VirtualDelay(&clock),
    ) {
        Ok(d) => d,
        Err(e) => {
            println!("Invalid configuration: {e}");
            return;
        }
    };

    match driver.boot() {
        Ok(offset) => println!(
            "Calibrated at t={} ms: X={:.2} Y={:.2} Z={:.2}\n",
            clock.now(),
            offset.0.x,
            offset.0.y,
            offset.0.z
        ),
        Err(e) => {
            println!("Calibration failed: {e}");
            return;
        }
    }

    let stop_at = clock.now() + 6000;
    let stats = match driver.run(&|| clock.now() >= stop_at) {
        Ok(stats) => stats,
        Err(e) => {
            println!("Loop aborted: {e}");
            return;
        }
    };

    let peak = driver.session().peak();
    println!("\nSession summary");
    println!("  ticks:             {}", stats.ticks);
    println!("  skipped (faults):  {}", stats.skipped);
    println!("  reads dropped:     {}", stats.reads_dropped);
    println!("  telemetry sent:    {}", stats.telemetry_sent);
    println!("  telemetry dropped: {}", stats.telemetry_dropped);
    println!("  peak:              {:.2} G at t={} ms", peak.magnitude_g, peak.timestamp);
    if let Some(err) = stats.last_error {
        println!("  last error:        {err}");
    }
}
