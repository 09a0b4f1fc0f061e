//! Integration tests for the compliance pipeline.
//!
//! Tests cover:
//! - Reference scenarios (compliant record, zero denominator, empty input)
//! - Threshold boundaries and the compliance truth table
//! - Order independence of the compliance rate
//! - Full pipeline with mock and synthetic data ports, including report output

mod common;

use approx::assert_abs_diff_eq;
use common::*;
use proptest::prelude::*;
use regtrack::adapters::synthetic_adapter::SyntheticAdapter;
use regtrack::cli::run_pipeline;
use regtrack::domain::compliance::{evaluate, evaluate_all, EvaluatedRecord};
use regtrack::domain::error::{InvalidReason, TrackerError};
use regtrack::domain::rate::{compliance_rate, RateTally};
use regtrack::domain::ratios::{derive_all, derive_ratios, Ratios};
use regtrack::domain::tracker;
use regtrack::ports::data_port::DataPort;

mod scenarios {
    use super::*;

    #[test]
    fn single_compliant_record() {
        let periods = vec![make_period("2023-01-31")];
        let result = tracker::run(&periods).unwrap();

        let record = &result.records[0];
        assert_abs_diff_eq!(record.ratios.capital_adequacy, 0.10, epsilon = 1e-9);
        assert_abs_diff_eq!(record.ratios.liquidity_coverage, 12.5, epsilon = 1e-9);
        assert_abs_diff_eq!(record.ratios.leverage, 9.0, epsilon = 1e-9);
        assert!(record.flags.capital_adequacy_ok);
        assert!(record.flags.liquidity_coverage_ok);
        assert!(record.flags.leverage_ok);
        assert!(record.compliant());
        assert_eq!(result.compliance_rate, 100.0);
    }

    #[test]
    fn zero_risk_weighted_assets_is_invalid_input() {
        let mut period = make_period("2023-01-31");
        period.risk_weighted_assets = 0.0;
        let err = derive_all(&[period]).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InvalidInput {
                reason: InvalidReason::NonPositiveDenominator {
                    field: "risk_weighted_assets",
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn empty_sequence_is_empty_input() {
        assert!(matches!(
            compliance_rate(&[]),
            Err(TrackerError::EmptyInput { .. })
        ));
        assert!(matches!(
            tracker::run(&[]),
            Err(TrackerError::EmptyInput { .. })
        ));
    }

    #[test]
    fn negative_raw_field_is_invalid_input() {
        let mut period = make_period("2023-01-31");
        period.assets = -1.0;
        assert!(matches!(
            tracker::run(&[period]),
            Err(TrackerError::InvalidInput { .. })
        ));
    }

    #[test]
    fn all_failing_rate_is_zero() {
        let periods = vec![
            make_failing_period("2023-01-31"),
            make_failing_period("2023-02-28"),
        ];
        let result = tracker::run(&periods).unwrap();
        assert_eq!(result.compliance_rate, 0.0);
        assert!(result.records.iter().all(|r| r.flags.failed_metrics().len() == 3));
    }
}

mod boundaries {
    use super::*;

    #[test]
    fn capital_adequacy_exactly_at_threshold() {
        let mut period = make_period("2023-01-31");
        period.capital = 80.0;
        period.risk_weighted_assets = 1000.0;
        let ratios = derive_ratios(&period).unwrap();
        assert!(evaluate(&ratios).unwrap().capital_adequacy_ok);
    }

    #[test]
    fn capital_adequacy_just_below_threshold() {
        let ratios = Ratios {
            capital_adequacy: 0.079999,
            liquidity_coverage: 2.0,
            leverage: 5.0,
        };
        assert!(!evaluate(&ratios).unwrap().capital_adequacy_ok);
    }

    #[test]
    fn leverage_exactly_at_ceiling() {
        let mut period = make_period("2023-01-31");
        period.assets = 1000.0;
        period.capital = 100.0;
        let ratios = derive_ratios(&period).unwrap();
        assert_eq!(ratios.leverage, 10.0);
        assert!(evaluate(&ratios).unwrap().leverage_ok);
    }

    #[test]
    fn liquidity_coverage_exactly_at_floor() {
        let mut period = make_period("2023-01-31");
        period.liquid_assets = 40.0;
        period.debt = 400.0;
        let ratios = derive_ratios(&period).unwrap();
        assert_abs_diff_eq!(ratios.liquidity_coverage, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn truth_table_through_pipeline() {
        // (capital, liquid_assets, assets) toggle each metric independently
        for car_ok in [false, true] {
            for lcr_ok in [false, true] {
                for lev_ok in [false, true] {
                    let mut period = make_period("2023-01-31");
                    period.capital = if car_ok { 100.0 } else { 50.0 };
                    period.liquid_assets = if lcr_ok { 50.0 } else { 1.0 };
                    period.assets = if lev_ok { 400.0 } else { 10_000.0 };

                    let records = evaluate_all(derive_all(&[period]).unwrap()).unwrap();
                    let flags = records[0].flags;
                    assert_eq!(flags.capital_adequacy_ok, car_ok);
                    assert_eq!(flags.liquidity_coverage_ok, lcr_ok);
                    assert_eq!(flags.leverage_ok, lev_ok);
                    assert_eq!(flags.compliant(), car_ok && lcr_ok && lev_ok);
                }
            }
        }
    }
}

fn flags_to_records(flags: &[bool]) -> Vec<EvaluatedRecord> {
    let periods: Vec<PeriodRecord> = flags
        .iter()
        .enumerate()
        .map(|(i, &ok)| {
            let mut p = if ok {
                make_period("2000-01-01")
            } else {
                make_failing_period("2000-01-01")
            };
            p.date = date(2000, 1, 1) + chrono::Duration::days(i as i64);
            p
        })
        .collect();
    tracker::run(&periods).unwrap().records
}

proptest! {
    #[test]
    fn rate_is_invariant_under_permutation(
        (flags, shuffled) in prop::collection::vec(any::<bool>(), 1..60)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let rate = RateTally::from_flags(flags.iter().copied()).rate().unwrap();
        let shuffled_rate = RateTally::from_flags(shuffled.iter().copied()).rate().unwrap();
        prop_assert_eq!(rate, shuffled_rate);
    }

    #[test]
    fn rate_matches_compliant_share(flags in prop::collection::vec(any::<bool>(), 1..40)) {
        let records = flags_to_records(&flags);
        let expected = 100.0 * flags.iter().filter(|&&f| f).count() as f64 / flags.len() as f64;
        let rate = compliance_rate(&records).unwrap();
        prop_assert!((rate - expected).abs() < 1e-9);
        prop_assert!((0.0..=100.0).contains(&rate));

        let mut reversed = records.clone();
        reversed.reverse();
        prop_assert_eq!(compliance_rate(&reversed).unwrap(), rate);
    }

    #[test]
    fn partitioned_tallies_match_whole(
        flags in prop::collection::vec(any::<bool>(), 1..60),
        split in 0usize..60
    ) {
        let split = split.min(flags.len());
        let whole = RateTally::from_flags(flags.iter().copied());
        let left = RateTally::from_flags(flags[..split].iter().copied());
        let right = RateTally::from_flags(flags[split..].iter().copied());
        prop_assert_eq!(left.merge(right), whole);
    }

    #[test]
    fn capital_adequacy_matches_formula(
        capital in 1.0f64..1e9,
        rwa in 1.0f64..1e9
    ) {
        let mut period = make_period("2023-01-31");
        period.capital = capital;
        period.risk_weighted_assets = rwa;
        let ratios = derive_ratios(&period).unwrap();
        prop_assert!((ratios.capital_adequacy - capital / rwa).abs() < 1e-9);
    }
}

mod full_pipeline {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn pipeline_with_mock_data_port() {
        let port = MockDataPort::new().with_periods(generate_periods("2023-01-01", 10));
        let (result, summary) =
            run_pipeline(&port, date(2023, 1, 1), date(2023, 12, 31), None, None).unwrap();

        assert_eq!(result.records.len(), 10);
        assert_eq!(result.compliance_rate, 50.0);
        assert_eq!(summary.compliant_periods, 5);
        assert_eq!(summary.leverage_breaches, 5);
    }

    #[test]
    fn pipeline_respects_date_window() {
        let port = MockDataPort::new().with_periods(generate_periods("2023-01-01", 10));
        let (result, _) =
            run_pipeline(&port, date(2023, 1, 1), date(2023, 1, 3), None, None).unwrap();
        assert_eq!(result.records.len(), 3);
        assert_eq!(result.end_date(), Some(date(2023, 1, 3)));
    }

    #[test]
    fn pipeline_propagates_data_errors() {
        let port = MockDataPort::new().with_error("feed unavailable");
        let err = run_pipeline(&port, date(2023, 1, 1), date(2023, 12, 31), None, None)
            .unwrap_err();
        assert!(matches!(err, TrackerError::Data { reason } if reason == "feed unavailable"));
    }

    #[test]
    fn pipeline_with_no_periods_in_window_is_empty_input() {
        let port = MockDataPort::new().with_periods(generate_periods("2023-01-01", 3));
        let err =
            run_pipeline(&port, date(2024, 1, 1), date(2024, 12, 31), None, None).unwrap_err();
        assert!(matches!(err, TrackerError::EmptyInput { .. }));
    }

    #[test]
    fn pipeline_with_synthetic_data_writes_reports() {
        let dir = tempdir().unwrap();
        let html = dir.path().join("out/report.html");
        let export = dir.path().join("out/periods.csv");

        let port = SyntheticAdapter::default();
        let (result, summary) = run_pipeline(
            &port,
            date(2023, 1, 1),
            date(2024, 1, 1),
            Some(html.as_path()),
            Some(export.as_path()),
        )
        .unwrap();

        assert_eq!(result.records.len(), 12);
        assert_eq!(result.start_date(), Some(date(2023, 1, 31)));
        assert_eq!(summary.periods, 12);
        assert!((0.0..=100.0).contains(&summary.compliance_rate));

        let html_contents = fs::read_to_string(&html).unwrap();
        assert!(html_contents.contains(&format!(
            "Compliance Tracker (Rate: {:.1}%)",
            summary.compliance_rate
        )));

        let export_contents = fs::read_to_string(&export).unwrap();
        assert_eq!(export_contents.lines().count(), 13);
    }

    #[test]
    fn synthetic_pipeline_is_reproducible() {
        let port = SyntheticAdapter::default();
        let a = port.fetch_periods(date(2023, 1, 1), date(2024, 1, 1)).unwrap();
        let b = port.fetch_periods(date(2023, 1, 1), date(2024, 1, 1)).unwrap();
        assert_eq!(
            tracker::run(&a).unwrap().compliance_rate,
            tracker::run(&b).unwrap().compliance_rate
        );
    }
}
