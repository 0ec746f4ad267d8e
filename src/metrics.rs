//! Confusion-matrix metrics at a single threshold.
//!
//! [`evaluate_at_threshold`] is the leaf primitive of the offline stage: given
//! labeled scores and a candidate cutoff `t`, it counts the joint confusion
//! cells and derives the standard ratios.  It is pure, deterministic, and
//! `O(N)`; the sweep calls it once per grid point.

use crate::RiskbandError;

/// Ratio with the zero-denominator-returns-zero policy.
///
/// A degenerate denominator is a policy choice here, not an error: returning
/// `0.0` keeps every derived ratio inside `[0, 1]` and keeps downstream sorts
/// total where a `NaN` would poison them.
///
/// ```rust
/// use riskband::safe_ratio;
///
/// assert_eq!(safe_ratio(3.0, 4.0), 0.75);
/// assert_eq!(safe_ratio(0.0, 0.0), 0.0);
/// assert_eq!(safe_ratio(5.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn safe_ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Confusion-matrix counts and derived ratios at one threshold.
///
/// Counts always sum to the evaluated dataset size.  Every ratio lies in
/// `[0, 1]`; a ratio whose denominator is zero is `0.0` by the
/// [`safe_ratio`] policy.  `fnr == 1 - recall` exactly whenever the labeled
/// set contains at least one positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdMetrics {
    /// Threshold this row was evaluated at.
    pub t: f64,
    /// Predicted positive, labeled positive.
    #[cfg_attr(feature = "serde", serde(rename = "tp"))]
    pub true_positives: u64,
    /// Predicted positive, labeled negative.
    #[cfg_attr(feature = "serde", serde(rename = "fp"))]
    pub false_positives: u64,
    /// Predicted negative, labeled negative.
    #[cfg_attr(feature = "serde", serde(rename = "tn"))]
    pub true_negatives: u64,
    /// Predicted negative, labeled positive (the misses the selector minimizes).
    #[cfg_attr(feature = "serde", serde(rename = "fn"))]
    pub false_negatives: u64,
    /// `tp / (tp + fp)`.
    pub precision: f64,
    /// `tp / (tp + fn)` (true positive rate).
    pub recall: f64,
    /// `fp / (fp + tn)`.
    pub fpr: f64,
    /// `fn / (tp + fn)`; equals `1 - recall` when positives exist.
    pub fnr: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
}

impl ThresholdMetrics {
    /// Total number of evaluated cases.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Number of labeled positives (`tp + fn`); invariant across a sweep.
    #[must_use]
    pub fn labeled_positives(&self) -> u64 {
        self.true_positives + self.false_negatives
    }
}

/// Evaluate confusion-matrix metrics for `labels`/`scores` at threshold `t`.
///
/// A case is predicted positive iff `score >= t` (inclusive on the high side:
/// a score exactly at threshold is positive).  Scores must be finite but are
/// *not* required to lie in `[0, 1]`; clamping is the caller's concern.
///
/// # Errors
///
/// - [`RiskbandError::LengthMismatch`] if the sequences differ in length.
/// - [`RiskbandError::Empty`] if the sequences are empty.
/// - [`RiskbandError::Domain`] if `t` is outside `(0, 1)` or any score is
///   non-finite.
pub fn evaluate_at_threshold(
    labels: &[bool],
    scores: &[f64],
    t: f64,
) -> Result<ThresholdMetrics, RiskbandError> {
    if labels.len() != scores.len() {
        return Err(RiskbandError::LengthMismatch(labels.len(), scores.len()));
    }
    if labels.is_empty() {
        return Err(RiskbandError::Empty);
    }
    if !t.is_finite() || t <= 0.0 || t >= 1.0 {
        return Err(RiskbandError::Domain("threshold must lie in (0, 1)"));
    }
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(RiskbandError::Domain("scores must be finite"));
    }

    let mut tp: u64 = 0;
    let mut fp: u64 = 0;
    let mut tn: u64 = 0;
    let mut fnc: u64 = 0;
    for (&label, &score) in labels.iter().zip(scores) {
        let predicted = score >= t;
        match (predicted, label) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, false) => tn += 1,
            (false, true) => fnc += 1,
        }
    }

    let precision = safe_ratio(tp as f64, (tp + fp) as f64);
    let recall = safe_ratio(tp as f64, (tp + fnc) as f64);
    let fnr = safe_ratio(fnc as f64, (tp + fnc) as f64);
    let fpr = safe_ratio(fp as f64, (fp + tn) as f64);
    let f1 = safe_ratio(2.0 * precision * recall, precision + recall);

    Ok(ThresholdMetrics {
        t,
        true_positives: tp,
        false_positives: fp,
        true_negatives: tn,
        false_negatives: fnc,
        precision,
        recall,
        fpr,
        fnr,
        f1,
    })
}
