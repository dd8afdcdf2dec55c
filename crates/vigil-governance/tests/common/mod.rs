//! Shared fixtures for integration tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use vigil_core::{ApplicationId, TenantId, UserId};
use vigil_events::{EventBus, InMemoryEventBus};
use vigil_governance::{
    AccessGrant, Application, ConfigStore, Contract, ContractStatus, DormantAccessService,
    EngineSettings, GrantStatus, IdentityProvider, InMemoryConfigStore, InMemoryIdentityProvider,
    InMemoryInventoryProvider, InMemoryRecordStore, InventoryProvider, RecordStore, UserRecord,
};

/// A fully wired service over in-memory collaborators, with handles kept
/// for seeding and assertions.
pub struct TestHarness {
    pub service: DormantAccessService,
    pub inventory: Arc<InMemoryInventoryProvider>,
    pub identity: Arc<InMemoryIdentityProvider>,
    pub records: Arc<InMemoryRecordStore>,
    pub bus: Arc<InMemoryEventBus>,
    pub tenant_id: TenantId,
}

impl TestHarness {
    pub fn new() -> Self {
        let inventory = Arc::new(InMemoryInventoryProvider::new());
        let identity = Arc::new(InMemoryIdentityProvider::new());
        let records = Arc::new(InMemoryRecordStore::new());
        let configs = Arc::new(InMemoryConfigStore::new());
        let bus = Arc::new(InMemoryEventBus::new());

        let service = DormantAccessService::new(
            Arc::clone(&inventory) as Arc<dyn InventoryProvider>,
            Arc::clone(&identity) as Arc<dyn IdentityProvider>,
            Arc::clone(&records) as Arc<dyn RecordStore>,
            Arc::clone(&configs) as Arc<dyn ConfigStore>,
            Arc::clone(&bus) as Arc<dyn EventBus>,
            EngineSettings::default(),
        );

        Self {
            service,
            inventory,
            identity,
            records,
            bus,
            tenant_id: TenantId::new(),
        }
    }

    /// Register an application for the harness tenant.
    pub async fn add_app(&self, name: &str) -> ApplicationId {
        self.add_app_for(self.tenant_id, name).await
    }

    pub async fn add_app_for(&self, tenant_id: TenantId, name: &str) -> ApplicationId {
        let id = ApplicationId::new();
        self.inventory
            .add_application(
                tenant_id,
                Application {
                    id,
                    name: name.to_string(),
                },
            )
            .await;
        id
    }

    /// Register a user for the harness tenant.
    pub async fn add_user(
        &self,
        role: &str,
        email: &str,
        department: Option<&str>,
        manager: Option<&str>,
    ) -> UserId {
        self.add_user_for(self.tenant_id, role, email, department, manager)
            .await
    }

    pub async fn add_user_for(
        &self,
        tenant_id: TenantId,
        role: &str,
        email: &str,
        department: Option<&str>,
        manager: Option<&str>,
    ) -> UserId {
        let id = UserId::new();
        let name = email.split('@').next().unwrap_or(email).to_string();
        self.identity
            .add_user(
                tenant_id,
                UserRecord {
                    id,
                    name,
                    email: email.to_string(),
                    department: department.map(str::to_string),
                    manager: manager.map(str::to_string),
                    role: role.to_string(),
                },
            )
            .await;
        id
    }

    /// Register an active grant idle for `idle_days` (None = never used).
    pub async fn add_grant(
        &self,
        user_id: UserId,
        app_id: ApplicationId,
        idle_days: Option<i64>,
    ) {
        self.add_grant_for(self.tenant_id, user_id, app_id, idle_days)
            .await;
    }

    pub async fn add_grant_for(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        app_id: ApplicationId,
        idle_days: Option<i64>,
    ) {
        let now = Utc::now();
        self.inventory
            .add_grant(
                tenant_id,
                AccessGrant {
                    user_id,
                    app_id,
                    access_type: "member".to_string(),
                    status: GrantStatus::Active,
                    granted_at: now - Duration::days(400),
                    last_access_at: idle_days.map(|d| now - Duration::days(d)),
                },
            )
            .await;
    }

    /// Register an active contract so per-license cost is non-zero.
    pub async fn add_contract(&self, app_id: ApplicationId, annual_value: f64, licenses: u32) {
        self.inventory
            .add_contract(
                self.tenant_id,
                Contract {
                    app_id,
                    status: ContractStatus::Active,
                    annual_value,
                    total_licenses: licenses,
                },
            )
            .await;
    }
}
