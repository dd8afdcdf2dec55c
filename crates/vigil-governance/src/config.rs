//! Per-tenant dormancy policy configuration.
//!
//! The config is an immutable snapshot read at scan start and mutated only
//! through an explicit merge-update, never mid-scan. Threshold violations
//! are rejected at update time with a validation error, never clamped.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use vigil_core::TenantId;

use crate::error::{DormancyError, Result};

/// Tenant-scoped dormancy policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DormantAccessConfig {
    /// Days of staleness after which a grant is flagged `warning`.
    pub warning_days: u32,
    /// Days of staleness after which a grant is flagged `critical`.
    pub critical_days: u32,
    /// Days of staleness after which a grant is eligible for auto-revocation.
    pub auto_revoke_days: u32,
    /// Exclude users holding administrative roles.
    pub exclude_admins: bool,
    /// Exclude service accounts (matched by email markers).
    pub exclude_service_accounts: bool,
    /// Require human approval before revoking.
    pub require_approval: bool,
    /// Notify the user before revoking.
    pub notify_user: bool,
    /// Also notify the user's manager.
    pub notify_manager: bool,
    /// Days between user notification and automatic revocation.
    pub grace_period_days: u32,
}

impl Default for DormantAccessConfig {
    fn default() -> Self {
        Self {
            warning_days: 30,
            critical_days: 60,
            auto_revoke_days: 90,
            exclude_admins: true,
            exclude_service_accounts: true,
            require_approval: true,
            notify_user: true,
            notify_manager: false,
            grace_period_days: 7,
        }
    }
}

impl DormantAccessConfig {
    /// Check the threshold invariant: `warning < critical < auto_revoke`.
    pub fn validate(&self) -> Result<()> {
        if self.warning_days >= self.critical_days {
            return Err(DormancyError::Validation(format!(
                "warning_days ({}) must be less than critical_days ({})",
                self.warning_days, self.critical_days
            )));
        }
        if self.critical_days >= self.auto_revoke_days {
            return Err(DormancyError::Validation(format!(
                "critical_days ({}) must be less than auto_revoke_days ({})",
                self.critical_days, self.auto_revoke_days
            )));
        }
        Ok(())
    }

    /// Apply a partial update, returning the merged config.
    /// Unspecified fields retain their previous values.
    #[must_use]
    pub fn merged(&self, update: &DormantAccessConfigUpdate) -> Self {
        Self {
            warning_days: update.warning_days.unwrap_or(self.warning_days),
            critical_days: update.critical_days.unwrap_or(self.critical_days),
            auto_revoke_days: update.auto_revoke_days.unwrap_or(self.auto_revoke_days),
            exclude_admins: update.exclude_admins.unwrap_or(self.exclude_admins),
            exclude_service_accounts: update
                .exclude_service_accounts
                .unwrap_or(self.exclude_service_accounts),
            require_approval: update.require_approval.unwrap_or(self.require_approval),
            notify_user: update.notify_user.unwrap_or(self.notify_user),
            notify_manager: update.notify_manager.unwrap_or(self.notify_manager),
            grace_period_days: update.grace_period_days.unwrap_or(self.grace_period_days),
        }
    }
}

/// Partial update for [`DormantAccessConfig`]; `None` fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DormantAccessConfigUpdate {
    pub warning_days: Option<u32>,
    pub critical_days: Option<u32>,
    pub auto_revoke_days: Option<u32>,
    pub exclude_admins: Option<bool>,
    pub exclude_service_accounts: Option<bool>,
    pub require_approval: Option<bool>,
    pub notify_user: Option<bool>,
    pub notify_manager: Option<bool>,
    pub grace_period_days: Option<u32>,
}

// ============================================================================
// Store Trait
// ============================================================================

/// Trait for per-tenant config storage backends.
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Get the stored config for a tenant, if any.
    async fn get(&self, tenant_id: TenantId) -> Result<Option<DormantAccessConfig>>;

    /// Store a tenant's config, replacing any previous value.
    async fn put(&self, tenant_id: TenantId, config: DormantAccessConfig) -> Result<()>;
}

/// In-memory config store.
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    configs: Arc<RwLock<HashMap<TenantId, DormantAccessConfig>>>,
}

impl InMemoryConfigStore {
    /// Create a new in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            configs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn get(&self, tenant_id: TenantId) -> Result<Option<DormantAccessConfig>> {
        Ok(self.configs.read().await.get(&tenant_id).cloned())
    }

    async fn put(&self, tenant_id: TenantId, config: DormantAccessConfig) -> Result<()> {
        self.configs.write().await.insert(tenant_id, config);
        Ok(())
    }
}
