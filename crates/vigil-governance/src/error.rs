//! Error types for the dormant-access engine.
//!
//! The error taxonomy distinguishes caller mistakes (`NotFound`,
//! `InvalidTransition`, `Validation`) from collaborator failures
//! (`ProviderUnavailable`, `RevocationFailed`). Batch operations never fail
//! as a whole because of one record: per-record failures are collected as
//! strings in the batch outcome instead of propagating.

use thiserror::Error;
use vigil_core::{ApplicationId, RecordId, UserId};
use vigil_events::EventError;

use crate::types::RecordStatus;

/// Errors that can occur in dormant-access operations.
#[derive(Debug, Error)]
pub enum DormancyError {
    /// An inventory or identity fetch failed. During a scan this aborts only
    /// the affected application's contribution, never the whole scan.
    #[error("{resource} unavailable: {cause}")]
    ProviderUnavailable {
        /// What could not be fetched (e.g. "applications", "grants").
        resource: String,
        /// The underlying failure.
        cause: String,
    },

    /// The inventory provider failed to remove a grant. The record stays in
    /// its pre-revocation state.
    #[error("failed to revoke access of user {user_id} to application {app_id}: {cause}")]
    RevocationFailed {
        user_id: UserId,
        app_id: ApplicationId,
        cause: String,
    },

    /// No dormant-access record with this ID exists for the tenant.
    #[error("dormant access record {0} not found")]
    NotFound(RecordId),

    /// The record is not in a state that permits the attempted transition.
    /// Terminal states (`revoked`, `exempted`) are absorbing.
    #[error("invalid transition from {from} to {attempted}")]
    InvalidTransition {
        from: RecordStatus,
        attempted: RecordStatus,
    },

    /// Another writer advanced the record first; the stale transition is
    /// rejected rather than applied twice.
    #[error("dormant access record {0} was modified concurrently")]
    TransitionConflict(RecordId),

    /// Input validation failure (e.g. non-ascending thresholds).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration value is invalid.
    #[error("Configuration invalid for {var}: {reason}")]
    ConfigInvalid { var: String, reason: String },

    /// Event layer failure.
    #[error(transparent)]
    Event(#[from] EventError),
}

/// Type alias for Results using [`DormancyError`].
pub type Result<T> = std::result::Result<T, DormancyError>;
