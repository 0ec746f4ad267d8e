//! Threshold lifecycle and the outcome-feedback loop.
//!
//! A threshold moves through `Proposed → Active → Superseded`.  Nothing here
//! promotes automatically: activation and supersession are explicit calls made
//! by whoever owns the promotion decision (a human, or a scheduled job).  When
//! true outcomes arrive for routed cases, [`ThresholdRecord::reevaluate`]
//! re-runs the sweep and selection over them and returns a fresh `Proposed`
//! candidate at the next revision; the caller compares, then decides.

use crate::{
    make_band, pick_threshold, threshold_sweep, Band, OperatingThreshold, RiskbandError,
    ThresholdConfig,
};

/// Where a threshold sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ThresholdStatus {
    /// Selected from a sweep, not yet serving traffic.
    Proposed,
    /// Band constructed; the router is using it.
    Active,
    /// Replaced after feedback; kept for audit.
    Superseded,
}

/// A versioned operating threshold with its lifecycle state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdRecord {
    /// Model whose scores this threshold applies to.
    pub model_name: String,
    /// Monotonically increasing revision, bumped by each reevaluation.
    pub revision: u32,
    /// The selected threshold and its calibration metrics.
    pub operating: OperatingThreshold,
    /// Current lifecycle state.
    pub status: ThresholdStatus,
    /// Band in force; present only once activated.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub band: Option<Band>,
}

impl ThresholdRecord {
    /// Wrap a freshly selected threshold as revision 1, `Proposed`.
    pub fn propose(model_name: impl Into<String>, operating: OperatingThreshold) -> Self {
        Self {
            model_name: model_name.into(),
            revision: 1,
            operating,
            status: ThresholdStatus::Proposed,
            band: None,
        }
    }

    /// Opaque version tag for decision packets: `{model}_v{revision}_t{t*}`.
    ///
    /// Grid thresholds are exact decimals, so the tag is stable across runs.
    #[must_use]
    pub fn version_tag(&self) -> String {
        format!(
            "{}_v{}_t{}",
            self.model_name, self.revision, self.operating.threshold
        )
    }

    /// Promote `Proposed → Active`, constructing the routing band.
    ///
    /// # Errors
    ///
    /// [`RiskbandError::Domain`] if the record is not `Proposed`, or if
    /// `band_width` is invalid (see [`make_band`]).
    pub fn activate(&mut self, band_width: f64) -> Result<Band, RiskbandError> {
        if self.status != ThresholdStatus::Proposed {
            return Err(RiskbandError::Domain(
                "only a proposed threshold can be activated",
            ));
        }
        let band = make_band(self.operating.threshold, band_width)?;
        self.band = Some(band);
        self.status = ThresholdStatus::Active;
        Ok(band)
    }

    /// Retire `Active → Superseded` once a replacement has been chosen.
    ///
    /// # Errors
    ///
    /// [`RiskbandError::Domain`] if the record is not `Active`.
    pub fn supersede(&mut self) -> Result<(), RiskbandError> {
        if self.status != ThresholdStatus::Active {
            return Err(RiskbandError::Domain(
                "only an active threshold can be superseded",
            ));
        }
        self.status = ThresholdStatus::Superseded;
        Ok(())
    }

    /// Re-run sweep and selection over arrived outcomes, yielding a new
    /// `Proposed` candidate at the next revision.
    ///
    /// Does not touch `self`: whether the candidate replaces the active
    /// threshold is the caller's promotion decision.
    ///
    /// # Errors
    ///
    /// [`RiskbandError::Domain`] if the record is not `Active`; otherwise
    /// propagates sweep/selection errors on malformed feedback data.
    pub fn reevaluate(
        &self,
        labels: &[bool],
        scores: &[f64],
        cfg: &ThresholdConfig,
    ) -> Result<ThresholdRecord, RiskbandError> {
        if self.status != ThresholdStatus::Active {
            return Err(RiskbandError::Domain(
                "only an active threshold can be reevaluated",
            ));
        }
        let sweep = threshold_sweep(labels, scores, cfg.step)?;
        let operating = pick_threshold(&sweep, cfg.precision_floor)?;
        Ok(ThresholdRecord {
            model_name: self.model_name.clone(),
            revision: self.revision + 1,
            operating,
            status: ThresholdStatus::Proposed,
            band: None,
        })
    }
}
