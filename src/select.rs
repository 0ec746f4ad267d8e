//! Operating-threshold selection over a sweep.
//!
//! Objective: minimize the false-negative rate — a missed positive case costs
//! far more than a false alarm.  An optional precision floor limits how noisy
//! the positive predictions may get; when the floor excludes every sweep row,
//! selection falls back to the full unconstrained sweep rather than failing,
//! and the returned record says so.  Silent relaxation is how callers end up
//! believing a floor held when it did not, so the flag is part of the output,
//! not a log line.

use std::cmp::Ordering;

use crate::{RiskbandError, ThresholdMetrics};

/// Whether the precision-floor constraint shaped the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintState {
    /// No precision floor was supplied.
    Unconstrained,
    /// A floor was supplied and at least one sweep row satisfied it.
    FloorSatisfied,
    /// The floor excluded every row; selection fell back to the full sweep.
    FloorRelaxed,
}

/// The selected operating threshold, with the metrics row that won and the
/// constraint state that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatingThreshold {
    /// The chosen cutoff `t*`.
    pub threshold: f64,
    /// Metrics at `t*` on the sweep's labeled dataset.
    pub metrics: ThresholdMetrics,
    /// How the precision floor interacted with this selection.
    pub constraint: ConstraintState,
}

impl OperatingThreshold {
    /// True when a supplied precision floor turned out to be unsatisfiable.
    ///
    /// Downstream auditing should alert on this: the threshold is still the
    /// best available, but the floor the caller asked for was ineffective.
    #[must_use]
    pub fn floor_relaxed(&self) -> bool {
        self.constraint == ConstraintState::FloorRelaxed
    }
}

/// True when `candidate` beats `incumbent` under (min FNR, then min threshold).
///
/// FNR values computed from the same labeled set are exact fractions of the
/// same integer denominator, so exact comparison is the right tie semantics.
fn improves(candidate: &ThresholdMetrics, incumbent: &ThresholdMetrics) -> bool {
    match candidate.fnr.total_cmp(&incumbent.fnr) {
        Ordering::Less => true,
        Ordering::Equal => candidate.t < incumbent.t,
        Ordering::Greater => false,
    }
}

/// Select the operating threshold from a sweep.
///
/// Restricts candidates to rows with `precision >= precision_floor` (when a
/// floor is given), then minimizes FNR; among rows with equal minimal FNR the
/// smallest threshold wins — the more conservative, higher-recall-leaning
/// operating point, and a deterministic one.
///
/// If the floor excludes every row, the full sweep is used instead and the
/// result carries [`ConstraintState::FloorRelaxed`].
///
/// # Errors
///
/// - [`RiskbandError::Empty`] if `sweep` has no rows.
/// - [`RiskbandError::Domain`] if the floor is outside `[0, 1]`.
pub fn pick_threshold(
    sweep: &[ThresholdMetrics],
    precision_floor: Option<f64>,
) -> Result<OperatingThreshold, RiskbandError> {
    if sweep.is_empty() {
        return Err(RiskbandError::Empty);
    }
    if let Some(floor) = precision_floor {
        if !floor.is_finite() || !(0.0..=1.0).contains(&floor) {
            return Err(RiskbandError::Domain("precision floor must lie in [0, 1]"));
        }
    }

    let (constraint, best) = match precision_floor {
        None => (ConstraintState::Unconstrained, best_row(sweep.iter())),
        Some(floor) => {
            let constrained = best_row(sweep.iter().filter(|m| m.precision >= floor));
            match constrained {
                Some(row) => (ConstraintState::FloorSatisfied, Some(row)),
                None => (ConstraintState::FloorRelaxed, best_row(sweep.iter())),
            }
        }
    };

    // `sweep` is non-empty, so the unconstrained minimum always exists.
    let best = best.ok_or(RiskbandError::Empty)?;
    Ok(OperatingThreshold {
        threshold: best.t,
        metrics: *best,
        constraint,
    })
}

fn best_row<'a, I>(rows: I) -> Option<&'a ThresholdMetrics>
where
    I: Iterator<Item = &'a ThresholdMetrics>,
{
    let mut best: Option<&ThresholdMetrics> = None;
    for m in rows {
        match best {
            None => best = Some(m),
            Some(b) if improves(m, b) => best = Some(m),
            Some(_) => {}
        }
    }
    best
}
