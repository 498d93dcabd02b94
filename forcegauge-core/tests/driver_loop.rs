//! Driver loop against scripted collaborators
//!
//! The mock clock only moves when the simulated delay runs, so one second
//! of loop time is exactly fifty 20 ms ticks.

mod common;

use forcegauge_core::{
    calibration::CalibrationSettings,
    config::GaugeConfig,
    filter::FilterStrategy,
    telemetry::TelemetryFormat,
    time::{MockTimeSource, TimeSource},
    Driver, GaugeError, Rgb,
};

use common::{scenarios, Reading, RecordingLink, RecordingRing, ScriptedSensor, SimDelay};

fn quick_boot() -> GaugeConfig {
    GaugeConfig::force_gauge()
        .with_brightness(255)
        .with_calibration(CalibrationSettings {
            samples: 10,
            delay_ms: 0,
            ..CalibrationSettings::default()
        })
}

#[test]
fn one_second_emits_six_lines_not_fifty() {
    let clock = MockTimeSource::new(0);
    let mut driver = Driver::new(
        &quick_boot(),
        ScriptedSensor::new(scenarios::REST),
        RecordingRing::new(10),
        RecordingLink::connected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();

    let stats = driver.run(&|| clock.now() >= 1000).unwrap();

    assert_eq!(stats.ticks, 50);
    assert_eq!(stats.telemetry_sent, 6);
    assert_eq!(driver.link().lines.len(), 6);
    assert!((6..=7).contains(&driver.link().lines.len()));
}

#[test]
fn telemetry_lines_follow_the_labeled_schema() {
    let clock = MockTimeSource::new(0);
    let sensor = ScriptedSensor::new(scenarios::REST)
        .then_samples(vec![scenarios::REST; 10])
        .then_samples(vec![scenarios::with_x(3.0); 9]);
    let mut driver = Driver::new(
        &quick_boot(),
        sensor,
        RecordingRing::new(10),
        RecordingLink::connected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();

    driver.run(&|| clock.now() >= 200).unwrap();

    let line = &driver.link().lines[0];
    assert!(line.ends_with("\r\n"));
    assert_eq!(
        line.as_str(),
        "X:300.0  Y:  0.0  Z:  0.0 | TURN=GREEN | ACCEL=ON | BRAKE=OFF | BOUNCE=OFF\r\n"
    );
}

#[test]
fn csv_sessions_start_with_a_header() {
    let clock = MockTimeSource::new(0);
    let config = quick_boot().with_telemetry_format(TelemetryFormat::Csv);
    let mut driver = Driver::new(
        &config,
        ScriptedSensor::new(scenarios::REST),
        RecordingRing::new(10),
        RecordingLink::connected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();

    let stats = driver.run(&|| clock.now() >= 400).unwrap();

    let lines = &driver.link().lines;
    assert_eq!(lines[0], "x,y,z,magnitude_g,turn,accel,brake,bounce,peak_g\r\n");
    assert_eq!(lines[1].trim_end().split(',').count(), 9);
    // header plus the rows at 160 and 320 ms
    assert_eq!(stats.telemetry_sent, 3);
    assert_eq!(lines.len(), 3);
}

#[test]
fn disconnected_link_drops_silently() {
    let clock = MockTimeSource::new(0);
    let mut driver = Driver::new(
        &quick_boot(),
        ScriptedSensor::new(scenarios::REST),
        RecordingRing::new(10),
        RecordingLink::disconnected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();

    let stats = driver.run(&|| clock.now() >= 1000).unwrap();

    assert_eq!(stats.ticks, 50);
    assert_eq!(stats.telemetry_sent, 0);
    assert_eq!(stats.telemetry_dropped, 6);
    assert_eq!(stats.last_error, Some(GaugeError::LinkNotConnected));
    assert!(driver.link().lines.is_empty());
    assert_eq!(driver.leds().frames.len(), 51);
}

#[test]
fn refused_csv_header_counts_as_dropped() {
    let clock = MockTimeSource::new(0);
    let mut link = RecordingLink::connected();
    link.fail_sends = true;
    let config = quick_boot().with_telemetry_format(TelemetryFormat::Csv);
    let mut driver = Driver::new(
        &config,
        ScriptedSensor::new(scenarios::REST),
        RecordingRing::new(10),
        link,
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();

    driver.boot().unwrap();
    assert_eq!(driver.session().stats().telemetry_dropped, 1);
    assert!(driver.link().lines.is_empty());
}

#[test]
fn failing_sends_are_counted_not_raised() {
    let clock = MockTimeSource::new(0);
    let mut link = RecordingLink::connected();
    link.fail_sends = true;
    let mut driver = Driver::new(
        &quick_boot(),
        ScriptedSensor::new(scenarios::REST),
        RecordingRing::new(10),
        link,
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();

    let stats = driver.run(&|| clock.now() >= 400).unwrap();
    assert_eq!(stats.telemetry_sent, 0);
    assert_eq!(stats.telemetry_dropped, 2);
}

#[test]
fn sensor_fault_mid_loop_repeats_previous_frame() {
    let clock = MockTimeSource::new(0);
    let sensor = ScriptedSensor::new(scenarios::REST)
        .then_samples(vec![scenarios::REST; 10])
        .then(Reading::Sample(scenarios::with_x(3.0)))
        .then_faults(2)
        .then(Reading::Sample(scenarios::REST));
    let mut driver = Driver::new(
        &quick_boot(),
        sensor,
        RecordingRing::new(10),
        RecordingLink::connected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();
    driver.boot().unwrap();

    let first = driver.run_once();
    let held = driver.run_once();
    let held_again = driver.run_once();
    let resumed = driver.run_once();

    assert!(held.skipped && held_again.skipped);
    assert_eq!(held.frame, first.frame);
    assert_eq!(held.state.accel, 0.95);
    assert_eq!(held_again.state.accel, 0.95);
    assert!((resumed.state.accel - 0.95 * 0.95).abs() < 1e-6);

    let frames = &driver.leds().frames;
    assert_eq!(frames[frames.len() - 2], frames[frames.len() - 3]);
    assert_eq!(driver.session().stats().skipped, 2);
}

#[test]
fn calibration_retries_then_fails_with_visible_pattern() {
    let clock = MockTimeSource::new(0);
    let sensor = ScriptedSensor::new(scenarios::REST).then_faults(3);
    let mut driver = Driver::new(
        &quick_boot(),
        sensor,
        RecordingRing::new(10),
        RecordingLink::connected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();

    let err = driver.run(&|| false).unwrap_err();
    assert_eq!(err, GaugeError::SensorUnavailable { attempts: 3 });

    let shown = driver.leds().last();
    assert_eq!(shown[0], Rgb::new(255, 0, 0));
    assert_eq!(shown[1], Rgb::OFF);
    assert!(driver.link().lines.is_empty());
}

#[test]
fn calibration_survives_transient_faults() {
    let clock = MockTimeSource::new(0);
    let sensor = ScriptedSensor::new(scenarios::REST).then_faults(2);
    let mut driver = Driver::new(
        &quick_boot(),
        sensor,
        RecordingRing::new(10),
        RecordingLink::connected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();

    let offset = driver.boot().unwrap();
    assert_eq!(offset.0, scenarios::REST);
}

#[test]
fn not_ready_reads_are_waited_out() {
    let clock = MockTimeSource::new(0);
    let sensor = ScriptedSensor::new(scenarios::REST)
        .then_samples(vec![scenarios::REST; 10])
        .then(Reading::NotReady)
        .then(Reading::NotReady)
        .then(Reading::Sample(scenarios::with_x(-3.0)));
    let mut driver = Driver::new(
        &quick_boot(),
        sensor,
        RecordingRing::new(10),
        RecordingLink::connected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();
    driver.boot().unwrap();

    let out = driver.run_once();
    assert!(!out.skipped);
    assert_eq!(out.state.brake, 0.95);
}

#[test]
fn window_filter_reads_a_burst_per_tick() {
    let clock = MockTimeSource::new(0);
    let config = quick_boot().with_filter(FilterStrategy::Window { reads: 4 });
    let sensor = ScriptedSensor::new(scenarios::REST)
        .then_samples(vec![scenarios::REST; 10])
        .then_samples([
            scenarios::with_x(6.0),
            scenarios::with_x(0.0),
            scenarios::with_x(0.0),
            scenarios::with_x(0.0),
        ]);
    let mut driver = Driver::new(
        &config,
        sensor,
        RecordingRing::new(10),
        RecordingLink::connected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();
    driver.boot().unwrap();

    let out = driver.run_once();
    // (600 + 0 + 0 + 0) / 4 = 150: not strictly above the threshold
    assert_eq!(out.state.accel, 0.0);
    assert_eq!(driver.sensor_mut().reads, 14);
}

#[test]
fn recalibration_hook_moves_baseline() {
    let clock = MockTimeSource::new(0);
    let mut driver = Driver::new(
        &quick_boot(),
        ScriptedSensor::new(scenarios::with_x(2.0)),
        RecordingRing::new(10),
        RecordingLink::connected(),
        &clock,
        SimDelay::new(&clock),
    )
    .unwrap();
    driver.boot().unwrap();
    assert_eq!(driver.run_once().state.accel, 0.0);

    driver
        .session_mut()
        .recalibrate(forcegauge_core::CalibrationOffset(scenarios::REST));
    assert_eq!(driver.run_once().state.accel, 0.95);
}
