//! Fatal simulation invariants
//!
//! These are programming errors, not gameplay outcomes. A miss, a clamp at a
//! platform edge or an empty collision result are normal control flow.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The collision resolver only makes sense for a stick lying flat
    #[error("stick is at {rotation}°, expected exactly 90°")]
    StickNotHorizontal { rotation: f32 },
    /// Transitioning requires the stick to have landed on a platform
    #[error("transitioning without a landing platform")]
    NoLandingPlatform,
    #[error("unknown phase: {0:?}")]
    UnknownPhase(String),
}
