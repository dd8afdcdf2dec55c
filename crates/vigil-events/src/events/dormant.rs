//! Dormant-access lifecycle events.
//!
//! One event per meaningful workflow transition:
//! - Record discovery (`access.dormant_detected`)
//! - User notification (`access.dormant_user_notified`)
//! - Approval request (`access.dormant_approval_requested`)
//! - Access removal (`access.dormant_revoked`)
//! - Manual exemption (`access.dormant_exempted`)

use crate::event::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_core::{ApplicationId, RecordId, UserId};

/// Published when a scan discovers an auto-revoke-category dormant grant
/// that has no open record yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DormantAccessDetected {
    /// The dormant-access record ID.
    pub record_id: RecordId,
    /// The user holding the dormant grant.
    pub user_id: UserId,
    /// The user's email (notification target).
    pub user_email: String,
    /// The application the grant belongs to.
    pub app_id: ApplicationId,
    /// The application name (for display/audit).
    pub app_name: String,
    /// Days since the grant was last used.
    pub days_since_access: u32,
    /// Staleness category (warning/critical/`auto_revoke`).
    pub category: String,
    /// Per-license cost of the grant, 0 when no active contract.
    pub cost_per_license: f64,
    /// When the record was detected.
    pub detected_at: DateTime<Utc>,
}

impl Event for DormantAccessDetected {
    const TOPIC: &'static str = "access.dormant_detected";
    const EVENT_TYPE: &'static str = "access.dormant_detected";
}

/// Published when the user is notified that their unused access is about
/// to be revoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DormantUserNotified {
    /// The dormant-access record ID.
    pub record_id: RecordId,
    /// The user holding the dormant grant.
    pub user_id: UserId,
    /// The user's email (notification target).
    pub user_email: String,
    /// The user's manager, included when manager notification is enabled.
    pub manager: Option<String>,
    /// The application the grant belongs to.
    pub app_id: ApplicationId,
    /// The application name (for display/audit).
    pub app_name: String,
    /// Days since the grant was last used.
    pub days_since_access: u32,
    /// Days the user has before automatic revocation proceeds.
    pub grace_period_days: u32,
    /// When the notification was requested.
    pub notified_at: DateTime<Utc>,
}

impl Event for DormantUserNotified {
    const TOPIC: &'static str = "access.dormant_user_notified";
    const EVENT_TYPE: &'static str = "access.dormant_user_notified";
}

/// Published when a revocation requires human approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DormantApprovalRequested {
    /// The dormant-access record ID.
    pub record_id: RecordId,
    /// The user holding the dormant grant.
    pub user_id: UserId,
    /// The user's email.
    pub user_email: String,
    /// The user's manager (approval target, when known).
    pub manager: Option<String>,
    /// The application the grant belongs to.
    pub app_id: ApplicationId,
    /// The application name (for display/audit).
    pub app_name: String,
    /// Days since the grant was last used.
    pub days_since_access: u32,
    /// When the approval was requested.
    pub requested_at: DateTime<Utc>,
}

impl Event for DormantApprovalRequested {
    const TOPIC: &'static str = "access.dormant_approval_requested";
    const EVENT_TYPE: &'static str = "access.dormant_approval_requested";
}

/// Published after the inventory provider has removed the dormant grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DormantAccessRevoked {
    /// The dormant-access record ID.
    pub record_id: RecordId,
    /// The user whose access was removed.
    pub user_id: UserId,
    /// The user's email.
    pub user_email: String,
    /// The application the grant belonged to.
    pub app_id: ApplicationId,
    /// The application name (for display/audit).
    pub app_name: String,
    /// Days since the grant was last used.
    pub days_since_access: u32,
    /// Per-license cost reclaimed by the revocation.
    pub cost_per_license: f64,
    /// When the access was revoked.
    pub revoked_at: DateTime<Utc>,
}

impl Event for DormantAccessRevoked {
    const TOPIC: &'static str = "access.dormant_revoked";
    const EVENT_TYPE: &'static str = "access.dormant_revoked";
}

/// Published when a record is manually exempted from automatic revocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DormantAccessExempted {
    /// The dormant-access record ID.
    pub record_id: RecordId,
    /// The user holding the grant.
    pub user_id: UserId,
    /// The application the grant belongs to.
    pub app_id: ApplicationId,
    /// The application name (for display/audit).
    pub app_name: String,
    /// Who granted the exemption.
    pub exempted_by: String,
    /// Why the exemption was granted.
    pub reason: String,
    /// When the exemption was granted.
    pub exempted_at: DateTime<Utc>,
}

impl Event for DormantAccessExempted {
    const TOPIC: &'static str = "access.dormant_exempted";
    const EVENT_TYPE: &'static str = "access.dormant_exempted";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::EventEnvelope;
    use vigil_core::TenantId;

    #[test]
    fn test_detected_event_roundtrip() {
        let event = DormantAccessDetected {
            record_id: RecordId::new(),
            user_id: UserId::new(),
            user_email: "jane@example.com".to_string(),
            app_id: ApplicationId::new(),
            app_name: "crm".to_string(),
            days_since_access: 95,
            category: "auto_revoke".to_string(),
            cost_per_license: 12.5,
            detected_at: Utc::now(),
        };

        let envelope = EventEnvelope::new(event, TenantId::new(), None);
        assert_eq!(envelope.topic(), "access.dormant_detected");

        let raw = envelope.into_raw().unwrap();
        assert!(raw.validate().is_ok());

        let typed: EventEnvelope<DormantAccessDetected> = raw.into_typed().unwrap();
        assert_eq!(typed.payload.days_since_access, 95);
        assert_eq!(typed.payload.category, "auto_revoke");
    }

    #[test]
    fn test_exempted_event_carries_actor_and_reason() {
        let event = DormantAccessExempted {
            record_id: RecordId::new(),
            user_id: UserId::new(),
            app_id: ApplicationId::new(),
            app_name: "billing".to_string(),
            exempted_by: "mgr1".to_string(),
            reason: "seasonal contractor".to_string(),
            exempted_at: Utc::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["exempted_by"], "mgr1");
        assert_eq!(json["reason"], "seasonal contractor");
    }
}
