//! Type definitions for the dormant-access domain.
//!
//! Includes the staleness category and workflow status enums and the
//! central [`DormantAccessRecord`] entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use vigil_core::{ApplicationId, RecordId, TenantAware, TenantId, UserId};

// ============================================================================
// Enums
// ============================================================================

/// Staleness category of a dormant grant.
///
/// Ordered by severity; classification uses highest-threshold-wins, so a
/// grant past the auto-revoke threshold is `AutoRevoke`, not `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DormancyCategory {
    /// Past the warning threshold.
    Warning,
    /// Past the critical threshold.
    Critical,
    /// Past the auto-revoke threshold; eligible for automated removal.
    AutoRevoke,
}

impl fmt::Display for DormancyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
            Self::AutoRevoke => write!(f, "auto_revoke"),
        }
    }
}

/// Workflow state of a dormant-access record.
///
/// `Revoked` and `Exempted` are terminal and absorbing: once reached, every
/// further transition attempt is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Freshly detected by a scan; no side effect has fired yet.
    Detected,
    /// The user (and optionally their manager) has been notified.
    Notified,
    /// A human approval request has been raised; no access change yet.
    PendingApproval,
    /// Approval granted; the next processing pass performs the revocation.
    Approved,
    /// Access has been removed. Terminal.
    Revoked,
    /// Manually excluded from further automatic action. Terminal.
    Exempted,
}

impl RecordStatus {
    /// Whether this state permits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Revoked | Self::Exempted)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detected => write!(f, "detected"),
            Self::Notified => write!(f, "notified"),
            Self::PendingApproval => write!(f, "pending_approval"),
            Self::Approved => write!(f, "approved"),
            Self::Revoked => write!(f, "revoked"),
            Self::Exempted => write!(f, "exempted"),
        }
    }
}

/// Status of an access grant in the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    /// The grant is live; only active grants are scanned.
    Active,
    /// Temporarily suspended by the inventory system.
    Suspended,
    /// Already removed.
    Revoked,
}

/// Status of a license contract in the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Contract is in force; contributes to per-license cost.
    Active,
    /// Contract has lapsed.
    Expired,
}

// ============================================================================
// Dormant-access record
// ============================================================================

/// One (tenant, user, application) dormant grant and its workflow state.
///
/// Derived fresh from live inventory on every scan; persisted by the record
/// store only once the revocation workflow picks it up, so that approvals
/// and exemptions survive across scan invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DormantAccessRecord {
    /// Unique identifier, freshly generated at detection.
    pub id: RecordId,
    /// Tenant this record belongs to.
    pub tenant_id: TenantId,

    // Identity fields
    /// The user holding the grant.
    pub user_id: UserId,
    /// The user's display name.
    pub user_name: String,
    /// The user's email (notification target).
    pub user_email: String,
    /// The user's department, if known.
    pub department: Option<String>,
    /// The user's manager, if known.
    pub manager: Option<String>,

    // Application fields
    /// The application the grant belongs to.
    pub app_id: ApplicationId,
    /// The application name.
    pub app_name: String,
    /// The kind of access granted (e.g. "member", "owner").
    pub access_type: String,

    // Staleness
    /// When the access was granted.
    pub granted_at: DateTime<Utc>,
    /// Last recorded use; `None` means the grant was never accessed.
    pub last_access_at: Option<DateTime<Utc>>,
    /// Days since last use (days since grant for never-accessed grants).
    pub days_since_access: Option<u32>,
    /// Staleness category.
    pub category: DormancyCategory,

    // Workflow
    /// Current workflow state.
    pub status: RecordStatus,
    /// Per-license cost of the grant; 0 without an active contract.
    pub cost_per_license: f64,

    // Transition timestamps
    /// When the record was detected.
    pub detected_at: DateTime<Utc>,
    /// When the user was notified.
    pub notified_at: Option<DateTime<Utc>>,
    /// When an approval request was raised.
    pub approval_requested_at: Option<DateTime<Utc>>,
    /// When the revocation was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Who approved the revocation.
    pub approved_by: Option<String>,
    /// When the access was revoked.
    pub revoked_at: Option<DateTime<Utc>>,
    /// When the record was exempted.
    pub exempted_at: Option<DateTime<Utc>>,
    /// Who granted the exemption.
    pub exempted_by: Option<String>,
    /// Why the exemption was granted.
    pub exempted_reason: Option<String>,

    /// Optimistic-concurrency version, bumped on every committed transition.
    /// Two concurrent writers cannot both advance the same record: the
    /// second compare-and-set fails.
    pub version: u64,
}

impl DormantAccessRecord {
    /// The grant this record tracks, used to correlate records across scans.
    #[must_use]
    pub fn grant_key(&self) -> (TenantId, UserId, ApplicationId) {
        (self.tenant_id, self.user_id, self.app_id)
    }

    /// The department label used in summaries.
    #[must_use]
    pub fn department_label(&self) -> &str {
        self.department.as_deref().unwrap_or("Unknown")
    }
}

impl TenantAware for DormantAccessRecord {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
