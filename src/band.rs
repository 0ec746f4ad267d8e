//! Two-sided uncertainty band around an operating threshold.
//!
//! Scores near the cutoff are the least reliable, so instead of a single
//! hard boundary the router uses `[t1, t2]`: everything inside the band goes
//! to human review.  The band is symmetric before clamping; clamping at the
//! `[0, 1]` edges can make it one-sided.

use crate::RiskbandError;

/// The routing band `[t1, t2]`, with `0 <= t1 <= t* <= t2 <= 1`.
///
/// Degenerates to `t1 == t2 == t*` only when the band width is zero, in which
/// case the review zone is empty and routing collapses to a single cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    /// Lower edge: scores below this are low risk.
    pub t1: f64,
    /// Upper edge: scores at or above this are high risk.
    pub t2: f64,
}

impl Band {
    /// Width of the review zone (`t2 - t1`).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.t2 - self.t1
    }

    /// True when the review zone is empty (`band_width` was zero or clamping
    /// collapsed the band at an extreme threshold).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.t1 == self.t2
    }
}

/// Construct the uncertainty band around operating threshold `t`.
///
/// `t1 = max(0, t - band_width)`, `t2 = min(1, t + band_width)`.
///
/// ```rust
/// use riskband::make_band;
///
/// let band = make_band(0.35, 0.05).unwrap();
/// assert_eq!(band.t1, 0.3);
/// assert_eq!(band.t2, 0.4);
///
/// // Clamped at the low edge.
/// let band = make_band(0.02, 0.05).unwrap();
/// assert_eq!(band.t1, 0.0);
/// ```
///
/// # Errors
///
/// [`RiskbandError::Domain`] if `t` is outside `[0, 1]` or `band_width` is
/// negative or non-finite.
pub fn make_band(t: f64, band_width: f64) -> Result<Band, RiskbandError> {
    if !t.is_finite() || !(0.0..=1.0).contains(&t) {
        return Err(RiskbandError::Domain(
            "operating threshold must lie in [0, 1]",
        ));
    }
    if !band_width.is_finite() || band_width < 0.0 {
        return Err(RiskbandError::Domain("band width must be non-negative"));
    }

    let t1 = (t - band_width).max(0.0);
    let t2 = (t + band_width).min(1.0);
    debug_assert!(t1 <= t2, "clamped band must satisfy t1 <= t2");
    Ok(Band { t1, t2 })
}
