//! Built-in event types for vigil.
//!
//! This module provides the lifecycle events emitted by the dormant-access
//! engine:
//! - Detection events (an auto-revoke-category record was discovered)
//! - Notification events (user notified, approval requested)
//! - Terminal events (access revoked, record exempted)
//!
//! Each payload carries enough identifying fields (user, app, days since
//! access) for a consumer to build notifications or audit entries without
//! re-querying the engine. Tenant context travels in the envelope.

pub mod dormant;

// Re-export all events for convenience
pub use dormant::{
    DormantAccessDetected, DormantAccessExempted, DormantAccessRevoked, DormantApprovalRequested,
    DormantUserNotified,
};
