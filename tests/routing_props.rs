//! Property tests for bands, routing, and packet building.

use proptest::prelude::*;
use riskband::{build_packets, make_band, Action, Route, ScoredCase};

proptest! {
    /// Band invariant: 0 <= t1 <= t <= t2 <= 1 for any valid inputs.
    #[test]
    fn band_brackets_and_stays_in_unit_interval(
        t in 0.0f64..=1.0,
        width in 0.0f64..=1.5,
    ) {
        let band = make_band(t, width).unwrap();
        prop_assert!(0.0 <= band.t1);
        prop_assert!(band.t1 <= t);
        prop_assert!(t <= band.t2);
        prop_assert!(band.t2 <= 1.0);
    }

    /// Degenerate bands happen exactly when the width is zero (for interior
    /// thresholds away from the clamping edges).
    #[test]
    fn interior_band_degenerate_iff_zero_width(
        t in 0.2f64..=0.8,
        width in prop_oneof![Just(0.0), 0.001f64..=0.1],
    ) {
        let band = make_band(t, width).unwrap();
        prop_assert_eq!(band.is_degenerate(), width == 0.0);
    }

    /// Routing is total: every finite score lands in exactly one zone, and the
    /// zone agrees with the defining predicates.
    #[test]
    fn routing_partitions_the_score_line(
        score in -0.5f64..=1.5,
        t in 0.0f64..=1.0,
        width in 0.0f64..=0.5,
    ) {
        let band = make_band(t, width).unwrap();
        let route = band.route(score);
        let expected = if score < band.t1 {
            Route::LowRisk
        } else if score < band.t2 {
            Route::Review
        } else {
            Route::HighRisk
        };
        prop_assert_eq!(route, expected);
    }

    /// Boundary semantics: t1 is review (inclusive), t2 is high risk
    /// (review is exclusive on the high side).
    #[test]
    fn band_edges_route_asymmetrically(t in 0.1f64..=0.9, width in 0.01f64..=0.09) {
        let band = make_band(t, width).unwrap();
        if band.t1 < band.t2 {
            prop_assert_eq!(band.route(band.t1), Route::Review);
        }
        prop_assert_eq!(band.route(band.t2), Route::HighRisk);
    }

    /// Packet count equals case count for any batch size, and identifiers
    /// come back in input order.
    #[test]
    fn packet_count_and_order_match_input(
        scores in prop::collection::vec(0.0f64..=1.0, 0..300),
        t in 0.0f64..=1.0,
        width in 0.0f64..=0.2,
    ) {
        let band = make_band(t, width).unwrap();
        let cases: Vec<ScoredCase> = scores
            .iter()
            .enumerate()
            .map(|(i, &s)| ScoredCase::new(format!("case{i}"), s))
            .collect();
        let packets = build_packets(&cases, band, "model", "model_v1").unwrap();

        prop_assert_eq!(packets.len(), cases.len());
        for (case, packet) in cases.iter().zip(&packets) {
            prop_assert_eq!(&packet.case_id, &case.id);
            prop_assert_eq!(packet.score, case.score);
            prop_assert_eq!(packet.route, band.route(case.score));
            prop_assert_eq!(packet.action, Action::from(packet.route));
        }
    }

    /// The string boundary agrees with the enum mapping for every defined
    /// route, and arbitrary other labels fail safe to manual review.
    #[test]
    fn route_label_boundary_is_fail_safe(label in "[a-z_]{0,12}") {
        let action = Action::for_route_label(&label);
        match Route::parse(&label) {
            Some(route) => prop_assert_eq!(action, Action::from(route)),
            None => prop_assert_eq!(action, Action::ManualReview),
        }
    }
}
