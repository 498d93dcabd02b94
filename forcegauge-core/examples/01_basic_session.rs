//! Basic Session Example
//!
//! Feeds a handful of hand-written readings straight into a session and
//! prints what the classifier, the LED frame and the telemetry encoder make
//! of them. No hardware and no driver loop.
//!
//! ## What You'll Learn
//!
//! - Computing a calibration baseline from rest readings
//! - Ticking a session with explicit timestamps
//! - Reading intensities and labels off the classifier state
//! - Why telemetry is not emitted on every tick
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_session
//! ```

use forcegauge_core::{AxisSample, CalibrationSettings, Calibrator, GaugeConfig, Session};

fn main() {
    println!("ForceGauge Basic Session Example");
    println!("================================\n");

    let config = GaugeConfig::force_gauge();

    // Board lying flat: gravity on Z, a little sensor noise
    let rest = [
        AxisSample::new(0.02, -0.01, 9.81),
        AxisSample::new(-0.01, 0.00, 9.79),
        AxisSample::new(0.00, 0.01, 9.80),
        AxisSample::new(-0.01, 0.00, 9.80),
    ];
    let calibrator = match Calibrator::new(CalibrationSettings::default()) {
        Ok(c) => c,
        Err(e) => {
            println!("Bad calibration settings: {e}");
            return;
        }
    };
    let offset = match calibrator.from_samples(&rest) {
        Ok(offset) => offset,
        Err(e) => {
            println!("Calibration failed: {e}");
            return;
        }
    };
    println!(
        "Baseline: X={:.3} Y={:.3} Z={:.3}\n",
        offset.0.x, offset.0.y, offset.0.z
    );

    let mut session = match Session::new(&config, offset) {
        Ok(s) => s,
        Err(e) => {
            println!("Bad config: {e}");
            return;
        }
    };

    // Pull away, cruise, brake hard, hit a pothole
    let drive = [
        ("standing", AxisSample::new(0.0, 0.0, 9.8)),
        ("pull away", AxisSample::new(2.4, 0.1, 9.8)),
        ("pull away", AxisSample::new(2.1, 0.2, 9.8)),
        ("cruise", AxisSample::new(0.3, 0.0, 9.8)),
        ("cruise", AxisSample::new(0.1, 0.0, 9.8)),
        ("left turn", AxisSample::new(0.0, 2.2, 9.8)),
        ("left turn", AxisSample::new(0.0, 3.1, 9.8)),
        ("hard brake", AxisSample::new(-4.5, 0.3, 9.8)),
        ("hard brake", AxisSample::new(-3.9, 0.0, 9.8)),
        ("pothole", AxisSample::new(0.0, 0.0, 14.0)),
        ("settle", AxisSample::new(0.0, 0.0, 9.8)),
        ("settle", AxisSample::new(0.0, 0.0, 9.8)),
    ];

    let mut records = 0;
    println!(
        "{:>5}  {:<11} {:>6} {:>5} {:>5} {:>6} {:>5}  lit",
        "t", "phase", "turn", "accel", "brake", "bounce", "G"
    );
    for (i, (phase, raw)) in drive.iter().enumerate() {
        let now = (i as u64 + 1) * 20;
        let out = session.tick(*raw, now);
        let s = out.state;
        println!(
            "{:>5}  {:<11} {:>6.2} {:>5.2} {:>5.2} {:>6.2} {:>5.2}  {}/{}",
            now,
            phase,
            s.turn,
            s.accel,
            s.brake,
            s.bounce,
            s.magnitude_g,
            out.frame.lit_count(),
            out.frame.len()
        );

        if let Some(record) = out.telemetry {
            records += 1;
            match session.encode(&record) {
                Ok(line) => print!("       telemetry → {line}"),
                Err(e) => println!("       telemetry dropped: {e}"),
            }
        }
    }

    let peak = session.peak();
    println!(
        "\nPeak: {:.2} G at t={} ms",
        peak.magnitude_g, peak.timestamp
    );
    println!(
        "Ticks: {}, telemetry records: {} (one per {} ms at most)",
        session.stats().ticks,
        records,
        config.telemetry_interval_ms
    );
}
