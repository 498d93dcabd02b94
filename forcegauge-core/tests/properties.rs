//! Property tests for the tick pipeline invariants

use proptest::prelude::*;

use forcegauge_core::{
    calibration::CalibrationSettings,
    classifier::{ChannelConfig, ChannelLabels, ClassifierConfig, HoldChannel, Polarity},
    config::GaugeConfig,
    filter::{FilterStrategy, InputConditioning, MAX_WINDOW_READS},
    sample::Axis,
    visual::{VisualMapper, ZoneLayout},
    AxisSample, CalibrationOffset, Calibrator, Classifier, ClassifierState, Rgb, Session,
    Severity, SignalFilter, SmoothedSignal,
};

fn axis_sample(range: f32) -> impl Strategy<Value = AxisSample> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| AxisSample::new(x, y, z))
}

fn quiet_signal() -> impl Strategy<Value = SmoothedSignal> {
    (-150.0f32..=150.0, -1000.0f32..1000.0, -250.0f32..=250.0)
        .prop_map(|(x, y, z)| SmoothedSignal(AxisSample::new(x, y, z)))
}

fn any_signal() -> impl Strategy<Value = SmoothedSignal> {
    axis_sample(2000.0).prop_map(SmoothedSignal)
}

fn any_state() -> impl Strategy<Value = ClassifierState> {
    (-1.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..6.0).prop_map(
        |(turn, accel, brake, bounce, magnitude_g)| ClassifierState {
            turn,
            accel,
            brake,
            bounce,
            magnitude_g,
            magnitude_level: (magnitude_g / 4.0).min(1.0),
            magnitude_band: Severity::Green,
            labels: ChannelLabels::default(),
        },
    )
}

proptest! {
    #[test]
    fn untriggered_channel_stays_at_rest(
        threshold in 1.0f32..1000.0,
        decay in 0.01f32..1.0,
        values in prop::collection::vec(-1.0f32..=1.0, 1..200)
    ) {
        let mut channel =
            HoldChannel::new(ChannelConfig::hold(Axis::X, Polarity::Either, threshold, decay));
        for v in values {
            prop_assert_eq!(channel.update_value(v * threshold), 0.0);
        }
    }

    #[test]
    fn decay_alone_is_monotone_and_non_negative(
        decay in 0.01f32..1.0,
        ticks in 1usize..500
    ) {
        let mut channel =
            HoldChannel::new(ChannelConfig::hold(Axis::X, Polarity::Positive, 1.0, decay));
        let mut prev = channel.update_value(2.0);
        prop_assert_eq!(prev, decay);
        for _ in 0..ticks {
            channel.decay();
            let level = channel.level();
            prop_assert!(level >= 0.0);
            prop_assert!(level <= prev);
            prev = level;
        }
    }

    #[test]
    fn any_state_maps_to_a_full_frame(state in any_state()) {
        for layout in [ZoneLayout::force_gauge(), ZoneLayout::ring_gauge()] {
            let mapper = VisualMapper::new(layout, 255).unwrap();
            let frame = mapper.map_to_frame(&state);
            prop_assert_eq!(frame.len(), 10);
            prop_assert_eq!(frame.iter().count(), 10);
        }

        let frame = VisualMapper::new(ZoneLayout::force_gauge(), 255)
            .unwrap()
            .map_to_frame(&state);
        for (index, level) in [(5, state.accel), (7, state.bounce), (8, state.brake)] {
            if level == 0.0 {
                prop_assert_eq!(frame.get(index), Some(Rgb::OFF));
            }
        }
    }

    #[test]
    fn sub_threshold_streams_never_light_hold_channels(
        stream in prop::collection::vec(quiet_signal(), 1..200)
    ) {
        let mut classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
        for signal in &stream {
            let state = classifier.classify(signal);
            prop_assert_eq!(state.accel, 0.0);
            prop_assert_eq!(state.brake, 0.0);
            prop_assert_eq!(state.bounce, 0.0);
        }
    }

    #[test]
    fn quiet_tail_decays_monotonically(
        history in prop::collection::vec(any_signal(), 1..50),
        tail in 1usize..300
    ) {
        let mut classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
        for signal in &history {
            classifier.classify(signal);
        }

        let mut prev = *classifier.state();
        for _ in 0..tail {
            let next = classifier.classify(&SmoothedSignal::default());
            for (before, after) in [
                (prev.accel, next.accel),
                (prev.brake, next.brake),
                (prev.bounce, next.bounce),
            ] {
                prop_assert!(after >= 0.0);
                prop_assert!(after <= before);
            }
            prev = next;
        }
    }

    #[test]
    fn intensities_stay_in_range(stream in prop::collection::vec(any_signal(), 1..200)) {
        let mut classifier = Classifier::new(&ClassifierConfig::default()).unwrap();
        for signal in &stream {
            let state = classifier.classify(signal);
            prop_assert!((-1.0..=1.0).contains(&state.turn));
            for level in [state.accel, state.brake, state.bounce, state.magnitude_level] {
                prop_assert!((0.0..=1.0).contains(&level));
            }
        }
    }

    #[test]
    fn every_tick_produces_a_complete_frame(
        readings in prop::collection::vec(axis_sample(40.0), 1..120)
    ) {
        let config = GaugeConfig::force_gauge().with_brightness(255);
        let mut session = Session::new(&config, CalibrationOffset::NONE).unwrap();
        for (i, raw) in readings.iter().enumerate() {
            let out = session.tick(*raw, (i as u64 + 1) * 20);
            prop_assert!(!out.skipped);
            prop_assert_eq!(out.frame.len(), 10);

            // inactive zones are dark, not stale
            if out.state.accel == 0.0 {
                prop_assert_eq!(out.frame.get(5), Some(Rgb::OFF));
                prop_assert_eq!(out.frame.get(6), Some(Rgb::OFF));
            }
            if out.state.bounce == 0.0 {
                prop_assert_eq!(out.frame.get(7), Some(Rgb::OFF));
            }
            if out.state.brake == 0.0 {
                prop_assert_eq!(out.frame.get(8), Some(Rgb::OFF));
                prop_assert_eq!(out.frame.get(9), Some(Rgb::OFF));
            }
            // the turn zone is lit even at rest
            prop_assert!(!out.frame.get(0).unwrap().is_off());
        }
    }

    #[test]
    fn constant_stream_calibrates_to_itself(
        rest in axis_sample(20.0),
        count in 1usize..100
    ) {
        let calibrator = Calibrator::new(CalibrationSettings {
            rest_limit: None,
            ..CalibrationSettings::default()
        })
        .unwrap();
        let offset = calibrator.from_samples(&vec![rest; count]).unwrap();
        let tolerance = 1e-4 * rest.max_abs().max(1.0);
        prop_assert!((offset.0.x - rest.x).abs() <= tolerance);
        prop_assert!((offset.0.y - rest.y).abs() <= tolerance);
        prop_assert!((offset.0.z - rest.z).abs() <= tolerance);
    }

    #[test]
    fn filter_is_deterministic(
        alpha in 0.01f32..=1.0,
        readings in prop::collection::vec(axis_sample(40.0), 1..100)
    ) {
        let strategy = FilterStrategy::Ema { alpha };
        let mut a = SignalFilter::new(strategy, InputConditioning::default()).unwrap();
        let mut b = SignalFilter::new(strategy, InputConditioning::default()).unwrap();
        for raw in &readings {
            prop_assert_eq!(
                a.filter(*raw, &CalibrationOffset::NONE),
                b.filter(*raw, &CalibrationOffset::NONE)
            );
        }
    }

    #[test]
    fn window_filter_is_deterministic(
        reads in 1u8..=MAX_WINDOW_READS,
        bursts in prop::collection::vec(
            prop::collection::vec(axis_sample(40.0), 1..=MAX_WINDOW_READS as usize),
            1..50
        )
    ) {
        let strategy = FilterStrategy::Window { reads };
        let mut a = SignalFilter::new(strategy, InputConditioning::default()).unwrap();
        let mut b = SignalFilter::new(strategy, InputConditioning::default()).unwrap();
        for burst in &bursts {
            let first = a.filter_burst(burst, &CalibrationOffset::NONE).unwrap();
            let second = b.filter_burst(burst, &CalibrationOffset::NONE).unwrap();
            prop_assert_eq!(first, second);
        }
        // a window keeps no history: replaying the last burst alone agrees
        if let Some(last) = bursts.last() {
            let mut fresh = SignalFilter::new(strategy, InputConditioning::default()).unwrap();
            prop_assert_eq!(
                fresh.filter_burst(last, &CalibrationOffset::NONE).unwrap(),
                a.filter_burst(last, &CalibrationOffset::NONE).unwrap()
            );
        }
    }

    #[test]
    fn ema_output_stays_within_input_range(
        alpha in 0.01f32..=1.0,
        readings in prop::collection::vec(axis_sample(40.0), 1..100)
    ) {
        let conditioning = InputConditioning::default();
        let mut filter = SignalFilter::new(FilterStrategy::Ema { alpha }, conditioning).unwrap();

        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for raw in &readings {
            let x = conditioning.apply(*raw, &CalibrationOffset::NONE).x;
            lo = lo.min(x);
            hi = hi.max(x);

            let out = filter.filter(*raw, &CalibrationOffset::NONE);
            let slack = 1e-3 * hi.abs().max(lo.abs()).max(1.0);
            prop_assert!(out.x() >= lo - slack && out.x() <= hi + slack);
        }
    }
}
