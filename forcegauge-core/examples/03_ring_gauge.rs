//! Ring Gauge and Custom Layouts Example
//!
//! The same classifier drives very different rings. This example shows the
//! built-in magnitude ring (EMA smoothing, hue gradient, CSV telemetry) and
//! then builds a 16-LED layout by hand with bar-graph and banded zones.
//!
//! ## What You'll Learn
//!
//! - Switching presets and filter strategies
//! - Building and validating a `ZoneLayout`
//! - Bar-graph fills and severity-banded colours
//! - CSV telemetry for logging to a spreadsheet
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 03_ring_gauge
//! ```

use forcegauge_core::{
    classifier::Channel,
    constants::display::{BOUNCE_PURPLE, BRAKE_RED},
    visual::{ColorStyle, HueGradient, VisualFrame, Zone, ZoneFill, ZoneLayout},
    AxisSample, CalibrationOffset, GaugeConfig, GaugeResult, Rgb, Session,
};

const REST: CalibrationOffset = CalibrationOffset::new(0.0, 0.0, 9.8);

fn render(frame: &VisualFrame) -> String {
    frame
        .iter()
        .map(|(_, c)| {
            if c.is_off() {
                "·".to_string()
            } else {
                format!("\x1b[38;2;{};{};{}m●\x1b[0m", c.r, c.g, c.b)
            }
        })
        .collect()
}

/// Magnitude sweep from rest up to about 4 G and back down
fn sweep() -> impl Iterator<Item = AxisSample> {
    (0..80).map(|i| {
        let phase = i as f32 / 80.0 * core::f32::consts::PI;
        let g = 9.806_65 * 4.0 * libm::sinf(phase);
        AxisSample::new(g * 0.6, g * 0.8, 9.8)
    })
}

fn magnitude_ring() -> GaugeResult<()> {
    println!("1. Built-in magnitude ring");
    println!("--------------------------");

    let config = GaugeConfig::ring_gauge();
    let mut session = Session::new(&config, REST)?;
    if let Some(header) = session.telemetry_header() {
        print!("   csv  {header}");
    }

    for (i, raw) in sweep().enumerate() {
        let now = (i as u64 + 1) * config.tick_interval_ms;
        let out = session.tick(raw, now);
        if i % 8 == 0 {
            println!(
                "   {:>4} ms  {}  {:.2} G ({:?})",
                now,
                render(&out.frame),
                out.state.magnitude_g,
                out.state.magnitude_band
            );
        }
        if let Some(record) = out.telemetry {
            print!("   csv  {}", session.encode(&record)?);
        }
    }
    println!();
    Ok(())
}

fn custom_layout() -> GaugeResult<()> {
    println!("2. Hand-built 16-LED layout");
    println!("---------------------------");

    let layout = ZoneLayout::new(16)?
        // severity colours on the turn label
        .with_zone(
            Zone::new(
                0,
                4,
                Channel::Turn,
                ColorStyle::Banded {
                    colors: [
                        Rgb::new(0, 255, 0),
                        Rgb::new(255, 255, 0),
                        Rgb::new(255, 100, 0),
                        Rgb::new(255, 0, 0),
                    ],
                },
            )
            .always_lit(),
        )?
        // total force as a growing bar
        .with_zone(
            Zone::new(4, 8, Channel::Magnitude, ColorStyle::Hue(HueGradient::GREEN_TO_RED))
                .with_fill(ZoneFill::Bar)
                .always_lit(),
        )?
        .with_zone(Zone::new(12, 2, Channel::Bounce, ColorStyle::Linear { color: BOUNCE_PURPLE }))?
        .with_zone(Zone::new(14, 2, Channel::Brake, ColorStyle::Linear { color: BRAKE_RED }))?;

    // overlapping zones are refused
    let overlap = ZoneLayout::new(16)?
        .with_zone(Zone::new(0, 4, Channel::Accel, ColorStyle::Linear { color: Rgb::new(0, 255, 0) }))?
        .with_zone(Zone::new(3, 2, Channel::Brake, ColorStyle::Linear { color: BRAKE_RED }));
    if let Err(e) = overlap {
        println!("   rejected layout: {e}");
    }

    let config = GaugeConfig::force_gauge().with_layout(layout).with_brightness(160);
    let mut session = Session::new(&config, REST)?;

    for (i, raw) in sweep().enumerate() {
        let raw = if (30..40).contains(&i) {
            AxisSample::new(-3.5, raw.y, raw.z)
        } else {
            raw
        };
        let out = session.tick(raw, (i as u64 + 1) * config.tick_interval_ms);
        if i % 8 == 0 {
            println!(
                "   {:>4} ms  {}  turn={:?} brake={:.2}",
                (i + 1) * 20,
                render(&out.frame),
                out.state.labels.turn,
                out.state.brake
            );
        }
    }
    Ok(())
}

fn main() {
    println!("ForceGauge Ring Gauge Example");
    println!("=============================\n");

    if let Err(e) = magnitude_ring() {
        println!("magnitude ring failed: {e}");
    }
    if let Err(e) = custom_layout() {
        println!("custom layout failed: {e}");
    }
}
