//! Deterministic threshold grid and sweep.
//!
//! The grid is regenerated from the step size on every call rather than
//! persisted, so the same step always yields the same candidate set.  Grid
//! values are rounded to the step's own decimal precision to kill float
//! accumulation drift (`0.05 * 3` is not `0.15` in binary); without the
//! rounding, downstream version tags and audit rows would carry noise digits.

use crate::{evaluate_at_threshold, RiskbandError, ThresholdMetrics};

/// Number of decimal places at which `step` is exact, if any (up to 6).
///
/// Steps with no exact decimal representation at 6 places have no
/// well-defined grid precision; rounding them anyway would let grid points
/// collapse onto each other or onto 0.0, so such steps are rejected upstream.
fn step_decimals(step: f64) -> Option<i32> {
    (0..=6).find(|&d| {
        let p = 10f64.powi(d);
        ((step * p).round() / p - step).abs() < 1e-12
    })
}

/// Build the candidate threshold grid for a sweep step.
///
/// The grid is the arithmetic sequence `step, 2*step, ...` strictly below
/// `1.0`, each point rounded to the step's decimal precision.  The boundary
/// values `0.0` and `1.0` are excluded: those operating points are degenerate
/// (accept-all / reject-all) and never meaningful cutoffs.
///
/// ```rust
/// use riskband::threshold_grid;
///
/// let grid = threshold_grid(0.25).unwrap();
/// assert_eq!(grid, vec![0.25, 0.5, 0.75]);
/// ```
///
/// # Errors
///
/// [`RiskbandError::Domain`] if `step` is not in `(0, 1)`, or if `step` is
/// not an exact decimal within 6 places (e.g. `1e-7` or `1.0 / 3.0`) — such
/// steps have no well-defined grid precision.
pub fn threshold_grid(step: f64) -> Result<Vec<f64>, RiskbandError> {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return Err(RiskbandError::Domain("sweep step must lie in (0, 1)"));
    }
    let Some(decimals) = step_decimals(step) else {
        return Err(RiskbandError::Domain(
            "sweep step must be exact within 6 decimal places",
        ));
    };

    let p = 10f64.powi(decimals);
    let mut grid = Vec::new();
    for k in 1u64.. {
        let t = (k as f64 * step * p).round() / p;
        if t >= 1.0 {
            break;
        }
        grid.push(t);
    }

    debug_assert!(
        grid.windows(2).all(|w| w[0] < w[1]),
        "threshold grid must be strictly increasing"
    );
    Ok(grid)
}

/// Evaluate metrics at every grid point for `step`, in ascending threshold order.
///
/// Grid points are evaluated independently (no shared mutable state), so a
/// concurrent caller could fan the evaluations out and reassemble in grid
/// order.  Grids are tiny (≤20 points at the default step), so this
/// implementation stays sequential and deterministic.
///
/// # Errors
///
/// Propagates [`threshold_grid`] and [`evaluate_at_threshold`] errors; in
/// particular empty or mismatched inputs fail before any row is produced.
pub fn threshold_sweep(
    labels: &[bool],
    scores: &[f64],
    step: f64,
) -> Result<Vec<ThresholdMetrics>, RiskbandError> {
    let grid = threshold_grid(step)?;
    if labels.len() != scores.len() {
        return Err(RiskbandError::LengthMismatch(labels.len(), scores.len()));
    }
    if labels.is_empty() {
        return Err(RiskbandError::Empty);
    }

    let mut rows = Vec::with_capacity(grid.len());
    for t in grid {
        rows.push(evaluate_at_threshold(labels, scores, t)?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_excludes_boundaries() {
        let grid = threshold_grid(0.05).unwrap();
        assert_eq!(grid.len(), 19);
        assert_eq!(grid[0], 0.05);
        assert_eq!(*grid.last().unwrap(), 0.95);
        assert!(grid.iter().all(|&t| t > 0.0 && t < 1.0));
    }

    #[test]
    fn grid_points_are_rounded_exactly() {
        // 0.05 * 3 != 0.15 in f64; the grid must still carry the exact decimal.
        let grid = threshold_grid(0.05).unwrap();
        assert_eq!(grid[2], 0.15);
        assert_eq!(grid[6], 0.35);
    }

    #[test]
    fn grid_for_coarse_steps() {
        assert_eq!(threshold_grid(0.5).unwrap(), vec![0.5]);
        assert_eq!(
            threshold_grid(0.1).unwrap(),
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9]
        );
        assert_eq!(threshold_grid(0.33).unwrap(), vec![0.33, 0.66, 0.99]);
    }

    #[test]
    fn grid_rejects_bad_steps() {
        for step in [0.0, 1.0, -0.05, 1.5, f64::NAN, f64::INFINITY] {
            assert!(threshold_grid(step).is_err(), "step={step}");
        }
    }

    #[test]
    fn grid_rejects_steps_finer_than_supported_precision() {
        // Below the 6-decimal precision these steps would round grid points
        // onto 0.0 or onto each other, breaking the strictly-increasing,
        // boundary-excluding contract.
        for step in [1e-7, 4e-7, 6e-7, 1.0 / 3.0] {
            assert_eq!(
                threshold_grid(step).unwrap_err(),
                RiskbandError::Domain("sweep step must be exact within 6 decimal places"),
                "step={step}"
            );
        }
    }

    #[test]
    fn finest_supported_step_yields_a_valid_grid() {
        let grid = threshold_grid(1e-6).unwrap();
        assert_eq!(grid.len(), 999_999);
        assert_eq!(grid[0], 1e-6);
        assert!(grid[0] > 0.0);
        assert!(*grid.last().unwrap() < 1.0);
    }

    #[test]
    fn sweep_rows_follow_grid_order() {
        let labels = [true, false, true];
        let scores = [0.9, 0.4, 0.7];
        let rows = threshold_sweep(&labels, &scores, 0.25).unwrap();
        let ts: Vec<f64> = rows.iter().map(|r| r.t).collect();
        assert_eq!(ts, threshold_grid(0.25).unwrap());
    }

    #[test]
    fn sweep_positive_count_is_invariant() {
        let labels = [true, false, true, true, false, false];
        let scores = [0.81, 0.42, 0.65, 0.12, 0.93, 0.3];
        let rows = threshold_sweep(&labels, &scores, 0.1).unwrap();
        for r in &rows {
            assert_eq!(r.labeled_positives(), 3, "t={}", r.t);
            assert_eq!(r.total(), 6);
        }
    }

    #[test]
    fn sweep_fails_fast_on_bad_input() {
        assert_eq!(
            threshold_sweep(&[], &[], 0.1).unwrap_err(),
            RiskbandError::Empty
        );
        assert_eq!(
            threshold_sweep(&[true], &[0.1, 0.2], 0.1).unwrap_err(),
            RiskbandError::LengthMismatch(1, 2)
        );
        assert!(threshold_sweep(&[true], &[f64::NAN], 0.1).is_err());
    }
}
