//! External collaborator interfaces.
//!
//! The engine consumes two providers: the access inventory (applications,
//! grants, contracts, revocation) and the identity directory (user records).
//! Both are `async` trait seams held as `Arc<dyn ..>` so callers can plug in
//! connector-backed implementations; the in-memory implementations here
//! serve as test doubles and reference behavior.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use vigil_core::{ApplicationId, TenantId, UserId};

use crate::error::{DormancyError, Result};
use crate::types::{ContractStatus, GrantStatus};

// ============================================================================
// Inventory types
// ============================================================================

/// An application in the tenant's access inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Unique identifier.
    pub id: ApplicationId,
    /// Display name.
    pub name: String,
}

/// One user's access grant to an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGrant {
    /// The user holding the grant.
    pub user_id: UserId,
    /// The application granted.
    pub app_id: ApplicationId,
    /// The kind of access granted (e.g. "member", "owner").
    pub access_type: String,
    /// Grant status; only active grants are scanned.
    pub status: GrantStatus,
    /// When the access was granted.
    pub granted_at: DateTime<Utc>,
    /// Last recorded use; `None` means never accessed.
    pub last_access_at: Option<DateTime<Utc>>,
}

/// A license contract for an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// The application this contract covers.
    pub app_id: ApplicationId,
    /// Contract status.
    pub status: ContractStatus,
    /// Total contract value per year.
    pub annual_value: f64,
    /// Number of licenses covered.
    pub total_licenses: u32,
}

/// A user record from the identity directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Department, if known.
    pub department: Option<String>,
    /// Manager, if known.
    pub manager: Option<String>,
    /// Role name (e.g. "technician", "admin").
    pub role: String,
}

// ============================================================================
// Provider traits
// ============================================================================

/// Access inventory provider.
///
/// Supplies the per-tenant list of applications, per-application grants and
/// contracts, and performs the actual access removal.
#[async_trait::async_trait]
pub trait InventoryProvider: Send + Sync {
    /// List all applications for a tenant.
    async fn list_applications(&self, tenant_id: TenantId) -> Result<Vec<Application>>;

    /// List all access grants for an application.
    async fn list_grants(
        &self,
        tenant_id: TenantId,
        app_id: ApplicationId,
    ) -> Result<Vec<AccessGrant>>;

    /// List active contracts for an application.
    async fn list_active_contracts(
        &self,
        tenant_id: TenantId,
        app_id: ApplicationId,
    ) -> Result<Vec<Contract>>;

    /// Remove a user's access to an application.
    ///
    /// This is the side effect behind every `revoked` transition; the
    /// workflow only commits the transition after this call succeeds.
    async fn revoke_access(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        app_id: ApplicationId,
    ) -> Result<()>;
}

/// Identity directory provider.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up a user by ID. `Ok(None)` means the user cannot be resolved;
    /// the scan treats that as a soft skip, not an error.
    async fn get_user(&self, tenant_id: TenantId, user_id: UserId) -> Result<Option<UserRecord>>;
}

// ============================================================================
// In-memory implementations
// ============================================================================

#[derive(Debug, Default)]
struct InventoryState {
    applications: HashMap<TenantId, Vec<Application>>,
    grants: HashMap<(TenantId, ApplicationId), Vec<AccessGrant>>,
    contracts: HashMap<(TenantId, ApplicationId), Vec<Contract>>,
    /// Grants whose revocation should fail (failure injection).
    failing_revocations: HashSet<(UserId, ApplicationId)>,
    /// Applications whose grant listing should fail (failure injection).
    failing_apps: HashSet<ApplicationId>,
    /// Successfully revoked grants, in call order.
    revoked: Vec<(TenantId, UserId, ApplicationId)>,
}

/// In-memory access inventory.
#[derive(Debug, Default)]
pub struct InMemoryInventoryProvider {
    state: Arc<RwLock<InventoryState>>,
}

impl InMemoryInventoryProvider {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(InventoryState::default())),
        }
    }

    /// Register an application for a tenant.
    pub async fn add_application(&self, tenant_id: TenantId, app: Application) {
        self.state
            .write()
            .await
            .applications
            .entry(tenant_id)
            .or_default()
            .push(app);
    }

    /// Register an access grant.
    pub async fn add_grant(&self, tenant_id: TenantId, grant: AccessGrant) {
        self.state
            .write()
            .await
            .grants
            .entry((tenant_id, grant.app_id))
            .or_default()
            .push(grant);
    }

    /// Register a contract.
    pub async fn add_contract(&self, tenant_id: TenantId, contract: Contract) {
        self.state
            .write()
            .await
            .contracts
            .entry((tenant_id, contract.app_id))
            .or_default()
            .push(contract);
    }

    /// Make `revoke_access` fail for a specific grant (failure injection).
    pub async fn fail_revocations_for(&self, user_id: UserId, app_id: ApplicationId) {
        self.state
            .write()
            .await
            .failing_revocations
            .insert((user_id, app_id));
    }

    /// Make `list_grants` fail for an application (failure injection).
    pub async fn fail_grants_for(&self, app_id: ApplicationId) {
        self.state.write().await.failing_apps.insert(app_id);
    }

    /// Grants revoked so far, in call order.
    pub async fn revocations(&self) -> Vec<(TenantId, UserId, ApplicationId)> {
        self.state.read().await.revoked.clone()
    }
}

#[async_trait::async_trait]
impl InventoryProvider for InMemoryInventoryProvider {
    async fn list_applications(&self, tenant_id: TenantId) -> Result<Vec<Application>> {
        Ok(self
            .state
            .read()
            .await
            .applications
            .get(&tenant_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_grants(
        &self,
        tenant_id: TenantId,
        app_id: ApplicationId,
    ) -> Result<Vec<AccessGrant>> {
        let state = self.state.read().await;
        if state.failing_apps.contains(&app_id) {
            return Err(DormancyError::ProviderUnavailable {
                resource: "grants".to_string(),
                cause: format!("inventory fetch failed for application {app_id}"),
            });
        }
        Ok(state
            .grants
            .get(&(tenant_id, app_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_active_contracts(
        &self,
        tenant_id: TenantId,
        app_id: ApplicationId,
    ) -> Result<Vec<Contract>> {
        Ok(self
            .state
            .read()
            .await
            .contracts
            .get(&(tenant_id, app_id))
            .map(|contracts| {
                contracts
                    .iter()
                    .filter(|c| c.status == ContractStatus::Active)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn revoke_access(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        app_id: ApplicationId,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        if state.failing_revocations.contains(&(user_id, app_id)) {
            return Err(DormancyError::RevocationFailed {
                user_id,
                app_id,
                cause: "inventory provider rejected the revocation".to_string(),
            });
        }

        // Reflect the removal in the grant list so a re-scan no longer
        // sees the grant as active.
        if let Some(grants) = state.grants.get_mut(&(tenant_id, app_id)) {
            for grant in grants.iter_mut().filter(|g| g.user_id == user_id) {
                grant.status = GrantStatus::Revoked;
            }
        }

        state.revoked.push((tenant_id, user_id, app_id));
        Ok(())
    }
}

/// In-memory identity directory.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    users: Arc<RwLock<HashMap<(TenantId, UserId), UserRecord>>>,
}

impl InMemoryIdentityProvider {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a user for a tenant.
    pub async fn add_user(&self, tenant_id: TenantId, user: UserRecord) {
        self.users.write().await.insert((tenant_id, user.id), user);
    }
}

#[async_trait::async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn get_user(&self, tenant_id: TenantId, user_id: UserId) -> Result<Option<UserRecord>> {
        Ok(self.users.read().await.get(&(tenant_id, user_id)).cloned())
    }
}
