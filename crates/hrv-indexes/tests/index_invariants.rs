use hrv_core::AnalysisConfig;
use hrv_indexes::{Band, BandPower, Index, Nnx, Pnnx, PoincareSd1, Rmssd, Sdsd};
use hrv_signal::Signal;
use proptest::prelude::*;

fn rr_series() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(400.0f64..1400.0, 64..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn time_domain_indexes_stay_in_range(rr in rr_series(), threshold in 0.0f64..200.0) {
        let signal = Signal::from_rr_intervals(rr.clone()).unwrap();
        let config = AnalysisConfig::default();

        let rmssd = Rmssd.compute(&signal, &config).unwrap();
        let sdsd = Sdsd.compute(&signal, &config).unwrap();
        prop_assert!(rmssd >= 0.0 && rmssd.is_finite());
        prop_assert!(sdsd >= 0.0 && sdsd.is_finite());

        let pnn = Pnnx::new(threshold).compute(&signal, &config).unwrap();
        let nn = Nnx::new(threshold).compute(&signal, &config).unwrap();
        prop_assert!((0.0..=100.0).contains(&pnn));
        prop_assert!(nn <= (rr.len() - 1) as f64);
        prop_assert!((pnn - 100.0 * nn / (rr.len() - 1) as f64).abs() < 1e-9);

        let sd1 = PoincareSd1.compute(&signal, &config).unwrap();
        prop_assert!(sd1 >= 0.0);
    }

    #[test]
    fn lf_and_hf_never_exceed_total_power(rr in rr_series()) {
        let signal = Signal::from_rr_intervals(rr).unwrap();
        let config = AnalysisConfig::default();

        let lf = BandPower(Band::Lf).compute(&signal, &config).unwrap();
        let hf = BandPower(Band::Hf).compute(&signal, &config).unwrap();
        let total = BandPower(Band::Total).compute(&signal, &config).unwrap();
        prop_assert!(lf >= 0.0 && hf >= 0.0);
        prop_assert!(
            lf + hf <= total * (1.0 + 1e-12) + 1e-12,
            "lf {} + hf {} > total {}",
            lf,
            hf,
            total
        );
    }
}
