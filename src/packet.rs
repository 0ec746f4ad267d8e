//! Per-case decision packets with batch provenance.
//!
//! A packet is the audit-friendly record of one routing decision: the score,
//! the band that was in force, the resulting route and action, and which
//! model/threshold version produced it.  Packets are built once at routing
//! time and never mutated; persistence (CSV/JSON writers, review queues) is
//! an external collaborator consuming these shapes as its schema contract.

use crate::{Action, Band, RiskbandError, Route, ThresholdMetrics};

/// A case scored by an upstream model.
///
/// `label` is the ground-truth outcome, present only in historical/offline
/// data; online cases carry `None` until feedback arrives.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredCase {
    /// Case identifier, carried through to the packet.
    pub id: String,
    /// Continuous risk score in `[0, 1]`.
    pub score: f64,
    /// Ground-truth outcome, when known.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<bool>,
}

impl ScoredCase {
    /// An unlabeled (online) case.
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
            label: None,
        }
    }

    /// A labeled (historical) case.
    pub fn labeled(id: impl Into<String>, score: f64, label: bool) -> Self {
        Self {
            id: id.into(),
            score,
            label: Some(label),
        }
    }
}

/// One routing decision with full provenance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionPacket {
    /// Identifier of the routed case.
    pub case_id: String,
    /// The score that was routed.
    pub score: f64,
    /// Lower band edge in force for this batch.
    pub t1: f64,
    /// Upper band edge in force for this batch.
    pub t2: f64,
    /// Risk zone the score landed in.
    pub route: Route,
    /// Action implied by the route.
    pub action: Action,
    /// Model that produced the score.
    pub model_name: String,
    /// Version tag tying this decision to a threshold/model combination,
    /// for audit and rollback.
    pub threshold_version: String,
}

/// Route a batch of cases through `band`, producing one packet per case.
///
/// Input order is preserved and the packet count always equals the case
/// count — no case is dropped or deduplicated.  `(t1, t2, model_name,
/// threshold_version)` are batch-level provenance stamped onto every packet.
///
/// # Errors
///
/// [`RiskbandError::Domain`] if any case score is non-finite.  The check runs
/// before any packet is built, so a malformed batch produces no output at
/// all rather than a truncated one.
pub fn build_packets(
    cases: &[ScoredCase],
    band: Band,
    model_name: &str,
    threshold_version: &str,
) -> Result<Vec<DecisionPacket>, RiskbandError> {
    if cases.iter().any(|c| !c.score.is_finite()) {
        return Err(RiskbandError::Domain("case scores must be finite"));
    }

    let packets = cases
        .iter()
        .map(|case| {
            let route = band.route(case.score);
            DecisionPacket {
                case_id: case.id.clone(),
                score: case.score,
                t1: band.t1,
                t2: band.t2,
                route,
                action: Action::from(route),
                model_name: model_name.to_string(),
                threshold_version: threshold_version.to_string(),
            }
        })
        .collect();
    Ok(packets)
}

/// Per-model calibration summary, shaped for JSON export.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdSummary {
    /// The operating threshold `t*`.
    pub chosen_threshold: f64,
    /// Lower band edge.
    pub t1: f64,
    /// Upper band edge.
    pub t2: f64,
    /// Metrics at `t*` on the calibration dataset.
    pub metrics: ThresholdMetrics,
}
