//! Banded routing of scores into action classes.
//!
//! A score lands in exactly one of three zones relative to the band:
//! below `t1` (low risk), inside `[t1, t2)` (review), or at/above `t2`
//! (high risk).  The boundary inclusion is deliberately asymmetric — `t1`
//! belongs to the review zone, `t2` to the high-risk zone — so the three
//! predicates partition the line and no score is ever double-counted.
//!
//! Routes and actions are closed enums rather than bare strings, so the
//! action mapping is checked exhaustively at compile time; the one string
//! boundary ([`Action::for_route_label`]) fails safe to manual review.

use crate::Band;

/// Risk zone a score was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Route {
    LowRisk,
    Review,
    HighRisk,
}

impl Route {
    /// Route a score against band edges `t1 <= t2`.
    ///
    /// Total over all scores: exactly one zone matches.  `score == t1`
    /// routes to review; `score == t2` routes to high risk.
    ///
    /// A `NaN` score routes to [`Route::Review`]: an undefined score is
    /// precisely the case a human should look at, never an automated
    /// approve or block.  Batch entry points ([`build_packets`]) still
    /// reject non-finite scores up front; this is the backstop for callers
    /// routing raw scores directly.
    ///
    /// [`build_packets`]: crate::build_packets
    ///
    /// ```rust
    /// use riskband::Route;
    ///
    /// assert_eq!(Route::of(0.10, 0.3, 0.4), Route::LowRisk);
    /// assert_eq!(Route::of(0.30, 0.3, 0.4), Route::Review);
    /// assert_eq!(Route::of(0.40, 0.3, 0.4), Route::HighRisk);
    /// assert_eq!(Route::of(f64::NAN, 0.3, 0.4), Route::Review);
    /// ```
    #[must_use]
    pub fn of(score: f64, t1: f64, t2: f64) -> Route {
        debug_assert!(t1 <= t2, "band edges must satisfy t1 <= t2");
        if score.is_nan() {
            return Route::Review;
        }
        if score < t1 {
            Route::LowRisk
        } else if score < t2 {
            Route::Review
        } else {
            Route::HighRisk
        }
    }

    /// Stable wire label for this route.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::LowRisk => "low_risk",
            Route::Review => "review",
            Route::HighRisk => "high_risk",
        }
    }

    /// Parse a wire label back into a route.  Unknown labels are `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Route> {
        match label {
            "low_risk" => Some(Route::LowRisk),
            "review" => Some(Route::Review),
            "high_risk" => Some(Route::HighRisk),
            _ => None,
        }
    }
}

impl Band {
    /// Route a score through this band.  See [`Route::of`].
    #[must_use]
    pub fn route(&self, score: f64) -> Route {
        Route::of(score, self.t1, self.t2)
    }
}

/// Downstream action for a routed case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    AutoApprove,
    ManualReview,
    InterveneOrBlock,
}

impl From<Route> for Action {
    fn from(route: Route) -> Action {
        match route {
            Route::LowRisk => Action::AutoApprove,
            Route::Review => Action::ManualReview,
            Route::HighRisk => Action::InterveneOrBlock,
        }
    }
}

impl Action {
    /// Map a route label from an external system to an action.
    ///
    /// Unrecognized labels map to [`Action::ManualReview`] — the fail-safe:
    /// a typo in an upstream route string must queue a human, never
    /// auto-approve or block.
    #[must_use]
    pub fn for_route_label(label: &str) -> Action {
        match Route::parse(label) {
            Some(route) => Action::from(route),
            None => Action::ManualReview,
        }
    }

    /// Stable wire label for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::AutoApprove => "auto_approve",
            Action::ManualReview => "manual_review",
            Action::InterveneOrBlock => "intervene_or_block",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_band;

    #[test]
    fn zones_partition_around_the_band() {
        let (t1, t2) = (0.3, 0.4);
        assert_eq!(Route::of(0.0, t1, t2), Route::LowRisk);
        assert_eq!(Route::of(0.29999, t1, t2), Route::LowRisk);
        assert_eq!(Route::of(0.3, t1, t2), Route::Review);
        assert_eq!(Route::of(0.39999, t1, t2), Route::Review);
        assert_eq!(Route::of(0.4, t1, t2), Route::HighRisk);
        assert_eq!(Route::of(1.0, t1, t2), Route::HighRisk);
    }

    #[test]
    fn degenerate_band_has_no_review_zone() {
        // t1 == t2: the half-open review interval is empty.
        assert_eq!(Route::of(0.49, 0.5, 0.5), Route::LowRisk);
        assert_eq!(Route::of(0.5, 0.5, 0.5), Route::HighRisk);
    }

    #[test]
    fn nan_scores_route_to_review() {
        // Without this backstop a NaN would fall through both comparisons
        // and land in HighRisk — an automated block on an undefined score.
        let band = make_band(0.35, 0.05).unwrap();
        assert_eq!(band.route(f64::NAN), Route::Review);
        assert_eq!(Route::of(f64::NAN, 0.5, 0.5), Route::Review);
        assert_eq!(
            Action::from(Route::of(f64::NAN, 0.3, 0.4)),
            Action::ManualReview
        );
    }

    #[test]
    fn infinite_scores_route_to_the_outer_zones() {
        assert_eq!(Route::of(f64::NEG_INFINITY, 0.3, 0.4), Route::LowRisk);
        assert_eq!(Route::of(f64::INFINITY, 0.3, 0.4), Route::HighRisk);
    }

    #[test]
    fn band_route_matches_free_function() {
        let band = make_band(0.35, 0.05).unwrap();
        for score in [0.0, 0.29, 0.3, 0.35, 0.39, 0.4, 0.9] {
            assert_eq!(band.route(score), Route::of(score, band.t1, band.t2));
        }
    }

    #[test]
    fn action_mapping_is_exhaustive() {
        assert_eq!(Action::from(Route::LowRisk), Action::AutoApprove);
        assert_eq!(Action::from(Route::Review), Action::ManualReview);
        assert_eq!(Action::from(Route::HighRisk), Action::InterveneOrBlock);
    }

    #[test]
    fn labels_round_trip() {
        for route in [Route::LowRisk, Route::Review, Route::HighRisk] {
            assert_eq!(Route::parse(route.as_str()), Some(route));
            assert_eq!(Action::for_route_label(route.as_str()), Action::from(route));
        }
    }

    #[test]
    fn unknown_labels_fail_safe_to_manual_review() {
        for label in ["", "hihg_risk", "LOW_RISK", "approve", "unknown"] {
            assert_eq!(Action::for_route_label(label), Action::ManualReview, "{label}");
        }
    }
}
