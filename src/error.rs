//! Crate error type.
//!
//! The taxonomy is deliberately small: precondition failures on input shape
//! (`Empty`, `LengthMismatch`) and value-domain failures (`Domain`).  An
//! unsatisfiable precision floor is *not* an error — the selector absorbs it
//! into a degraded-but-valid result and flags it via
//! [`ConstraintState::FloorRelaxed`](crate::ConstraintState::FloorRelaxed).

use thiserror::Error;

/// Errors returned by the threshold/routing primitives.
///
/// Every error aborts the calling batch step before any output row is
/// produced; no function in this crate emits partial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RiskbandError {
    /// An input sequence was empty where at least one element is required.
    #[error("empty input: at least one labeled case is required")]
    Empty,

    /// Paired input sequences had different lengths.
    #[error("length mismatch: {0} labels vs {1} scores")]
    LengthMismatch(usize, usize),

    /// A parameter or score was outside its required domain.
    #[error("domain error: {0}")]
    Domain(&'static str),
}
