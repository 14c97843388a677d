use exohunt::services::{
    synthesize_folded_curve, synthesize_light_curve, transit_windows, LightCurveParams,
    NoiseSource, PhaseFoldParams,
};
use exohunt::ExoError;
use proptest::prelude::*;
use qtty::Days;

const NOISE_HALF_WIDTH: f64 = 0.005;

proptest! {
    #[test]
    fn light_curve_has_requested_length_and_increasing_time(
        sample_count in 1usize..500,
        interval in 0.02f64..1.0,
        has_planet in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let params = LightCurveParams {
            sample_count,
            interval: Days::new(interval),
            ..Default::default()
        };
        let samples = synthesize_light_curve(has_planet, &params, &mut NoiseSource::seeded(seed)).unwrap();

        prop_assert_eq!(samples.len(), sample_count);
        for pair in samples.windows(2) {
            prop_assert!(pair[1].time.value() > pair[0].time.value());
        }
        for s in &samples {
            prop_assert!(s.flux.is_finite() && s.detrended.is_finite());
        }
    }

    #[test]
    fn light_curve_without_planet_stays_in_noise_band(seed in any::<u64>()) {
        let samples = synthesize_light_curve(
            false,
            &LightCurveParams::default(),
            &mut NoiseSource::seeded(seed),
        ).unwrap();

        for s in &samples {
            prop_assert!((s.flux - 1.0).abs() <= NOISE_HALF_WIDTH + 1e-12, "{:?}", s);
        }
    }

    #[test]
    fn light_curve_with_planet_dips_in_every_window(seed in any::<u64>()) {
        let params = LightCurveParams::default();
        let samples = synthesize_light_curve(true, &params, &mut NoiseSource::seeded(seed)).unwrap();
        let windows = transit_windows(&params).unwrap();
        prop_assert_eq!(windows.len(), 3);

        for (start, end) in windows {
            let dipped = samples.iter().any(|s| {
                let t = s.time.value();
                t >= start.value() && t < end.value() && s.flux < 1.0 - NOISE_HALF_WIDTH - 0.001
            });
            prop_assert!(dipped, "no dip in window [{}, {})", start.value(), end.value());
        }
    }

    #[test]
    fn folded_curve_has_single_dip_at_half_phase(seed in any::<u64>()) {
        let samples = synthesize_folded_curve(
            &PhaseFoldParams::default(),
            &mut NoiseSource::seeded(seed),
        ).unwrap();

        let dipped: Vec<usize> = samples
            .iter()
            .enumerate()
            .filter(|(_, s)| s.flux < 0.9974)
            .map(|(i, _)| i)
            .collect();

        prop_assert!(!dipped.is_empty());
        // One contiguous run
        for pair in dipped.windows(2) {
            prop_assert_eq!(pair[1], pair[0] + 1);
        }
        // Containing the center and confined to the transit window
        prop_assert!(dipped.iter().any(|&i| samples[i].phase == 0.5));
        for &i in &dipped {
            prop_assert!((samples[i].phase - 0.5).abs() < 0.05 + 1e-9);
        }
    }
}

#[test]
fn seeded_light_curves_are_byte_identical() {
    let params = LightCurveParams::default();
    let a = synthesize_light_curve(true, &params, &mut NoiseSource::seeded(2024)).unwrap();
    let b = synthesize_light_curve(true, &params, &mut NoiseSource::seeded(2024)).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn seeded_folded_curves_are_byte_identical() {
    let params = PhaseFoldParams::default();
    let a = synthesize_folded_curve(&params, &mut NoiseSource::seeded(77)).unwrap();
    let b = synthesize_folded_curve(&params, &mut NoiseSource::seeded(77)).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn unseeded_light_curves_differ() {
    let params = LightCurveParams::default();
    let a = synthesize_light_curve(false, &params, &mut NoiseSource::from_entropy()).unwrap();
    let b = synthesize_light_curve(false, &params, &mut NoiseSource::from_entropy()).unwrap();
    assert_ne!(a, b);
}

#[test]
fn default_light_curve_layout() {
    let samples =
        synthesize_light_curve(true, &LightCurveParams::default(), &mut NoiseSource::seeded(1))
            .unwrap();
    assert_eq!(samples.len(), 100);
    assert_eq!(samples[0].time.value(), 0.0);
    assert_eq!(samples[35].time.value(), 3.5);
    assert_eq!(samples[99].time.value(), 9.9);
}

#[test]
fn degenerate_parameters_are_rejected() {
    let params = LightCurveParams {
        period: Days::new(0.0),
        ..Default::default()
    };
    let err = synthesize_light_curve(true, &params, &mut NoiseSource::seeded(0)).unwrap_err();
    assert!(matches!(err, ExoError::InvalidParameter { ref parameter, .. } if parameter == "period"));

    let params = PhaseFoldParams {
        sample_count: 0,
        ..Default::default()
    };
    let err = synthesize_folded_curve(&params, &mut NoiseSource::seeded(0)).unwrap_err();
    assert!(matches!(err, ExoError::InvalidParameter { ref parameter, .. } if parameter == "sample_count"));
}
