//! `riskband`: deterministic threshold selection and banded risk routing.
//!
//! Given a binary classifier that emits a continuous risk score in `[0, 1]`
//! per case, this crate owns the decision-theoretic step between the model and
//! the action taken: turning historical labeled scores into an operating
//! threshold, the threshold into a two-sided uncertainty band, and new scores
//! into one of three routes (`low_risk` / `review` / `high_risk`) with an
//! auditable per-case decision packet.
//!
//! The pipeline, offline to online:
//!
//! 1. **Evaluate** ([`evaluate_at_threshold`]): confusion-matrix metrics at a
//!    single cutoff.  Zero-denominator ratios resolve to `0.0` by policy
//!    ([`safe_ratio`]), never `NaN`.
//! 2. **Sweep** ([`threshold_sweep`]): evaluate across a deterministic grid
//!    regenerated from a step size, boundaries excluded.
//! 3. **Select** ([`pick_threshold`]): minimize FNR subject to an optional
//!    precision floor, with a deterministic smallest-threshold tie-break.  An
//!    unsatisfiable floor falls back to the unconstrained sweep — and the
//!    result says so ([`ConstraintState::FloorRelaxed`]).
//! 4. **Band** ([`make_band`]): clamp `t* ± band_width` into `[t1, t2]`;
//!    scores inside the band go to human review instead of automated action.
//! 5. **Route** ([`Route::of`], [`Action`]): classify each new score into
//!    exactly one zone; `t1` is inclusive and `t2` exclusive for review, so
//!    the zones partition the line.
//! 6. **Pack** ([`build_packets`]): one [`DecisionPacket`] per case, stamped
//!    with band edges, model identity, and threshold version.
//!
//! When true outcomes arrive for routed cases,
//! [`ThresholdRecord::reevaluate`] re-runs steps 2–3 over the feedback batch
//! and proposes the next threshold revision; promotion stays a caller
//! decision (`Proposed → Active → Superseded`).
//!
//! **Goals:**
//! - **Deterministic**: same data + config → same threshold, same routes.
//!   No hidden randomness, no process-wide knobs — configuration is a plain
//!   value ([`ThresholdConfig`]) threaded through calls.
//! - **Audit-friendly**: selection fallbacks, band edges, and version tags are
//!   part of the returned records, not log side effects.
//! - **Fail-fast, no partial output**: malformed input aborts the whole batch
//!   step before the first row is produced.
//!
//! **Non-goals:** model training/inference, persistence and report writers,
//! dashboards, and agent orchestration are external collaborators.  The crate
//! exposes serde-derivable shapes (feature `serde`) as the schema contract for
//! whatever does the writing.
//!
//! # Example
//!
//! ```rust
//! use riskband::{build_packets, plan_thresholds, ScoredCase, ThresholdConfig};
//!
//! // Offline: historical scores with known outcomes.
//! let labels = [true, false, true, false, true, false, false, true];
//! let scores = [0.91, 0.22, 0.64, 0.47, 0.83, 0.15, 0.58, 0.72];
//!
//! let cfg = ThresholdConfig::default(); // step 0.05, floor 0.30, band 0.05
//! let plan = plan_thresholds(&labels, &scores, &cfg).unwrap();
//! assert!(!plan.operating.floor_relaxed());
//!
//! // Online: route new, unlabeled cases.
//! let cases = vec![
//!     ScoredCase::new("c-1001", 0.12),
//!     ScoredCase::new("c-1002", 0.55),
//!     ScoredCase::new("c-1003", 0.97),
//! ];
//! let packets = build_packets(&cases, plan.band, "logreg", "logreg_v1").unwrap();
//! assert_eq!(packets.len(), cases.len());
//! ```

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod metrics;
pub use metrics::*;

mod sweep;
pub use sweep::*;

mod select;
pub use select::*;

mod band;
pub use band::*;

mod route;
pub use route::*;

mod packet;
pub use packet::*;

mod lifecycle;
pub use lifecycle::*;

/// Calibration configuration, constructed once per run and passed by value.
///
/// There is deliberately no global or environment-driven configuration in
/// this crate; every knob rides through function arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdConfig {
    /// Sweep grid granularity; the grid is `step, 2*step, ..` below `1.0`.
    pub step: f64,
    /// Minimum acceptable precision for the selected threshold, if any.
    pub precision_floor: Option<f64>,
    /// Half-width of the review band around the operating threshold.
    pub band_width: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            step: 0.05,
            precision_floor: Some(0.30),
            band_width: 0.05,
        }
    }
}

impl ThresholdConfig {
    /// Set the sweep step.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set or clear the precision floor.
    #[must_use]
    pub fn with_precision_floor(mut self, floor: Option<f64>) -> Self {
        self.precision_floor = floor;
        self
    }

    /// Set the review band half-width.
    #[must_use]
    pub fn with_band_width(mut self, band_width: f64) -> Self {
        self.band_width = band_width;
        self
    }
}

/// Output of the offline calibration stage: the full sweep table (evidence),
/// the selected operating threshold, and the routing band derived from it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdPlan {
    /// Metrics at every grid point, ascending threshold order.
    pub sweep: Vec<ThresholdMetrics>,
    /// The selected threshold with metrics and constraint state.
    pub operating: OperatingThreshold,
    /// The review band around the selected threshold.
    pub band: Band,
}

impl ThresholdPlan {
    /// Compact per-model summary record, shaped for JSON export.
    #[must_use]
    pub fn summary(&self) -> ThresholdSummary {
        ThresholdSummary {
            chosen_threshold: self.operating.threshold,
            t1: self.band.t1,
            t2: self.band.t2,
            metrics: self.operating.metrics,
        }
    }
}

/// Run the offline calibration stage end to end: sweep, select, band.
///
/// # Errors
///
/// Propagates [`threshold_sweep`], [`pick_threshold`], and [`make_band`]
/// errors; the first failing precondition aborts the run with nothing built.
pub fn plan_thresholds(
    labels: &[bool],
    scores: &[f64],
    cfg: &ThresholdConfig,
) -> Result<ThresholdPlan, RiskbandError> {
    let sweep = threshold_sweep(labels, scores, cfg.step)?;
    let operating = pick_threshold(&sweep, cfg.precision_floor)?;
    let band = make_band(operating.threshold, cfg.band_width)?;
    Ok(ThresholdPlan {
        sweep,
        operating,
        band,
    })
}
