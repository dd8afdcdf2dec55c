//! Dormant-access service facade.
//!
//! Ties the scanner, workflow, aggregator, and stores together behind the
//! operations consumers call. All state lives in the injected collaborators;
//! the service itself is stateless and safe to share across tenants.

use std::sync::Arc;

use tracing::instrument;
use vigil_core::{ApplicationId, RecordId, TenantId, UserId};
use vigil_events::EventBus;

use crate::config::{ConfigStore, DormantAccessConfig, DormantAccessConfigUpdate};
use crate::providers::{IdentityProvider, InventoryProvider};
use crate::scan::DormancyScanner;
use crate::settings::EngineSettings;
use crate::store::RecordStore;
use crate::summary::{summarize, DormantAccessSummary};
use crate::types::DormantAccessRecord;
use crate::workflow::{ProcessingOutcome, RevocationWorkflow};
use crate::Result;

/// Result of a dormant-access scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// The dormant-access records found.
    pub records: Vec<DormantAccessRecord>,
    /// Aggregate statistics over those records.
    pub summary: DormantAccessSummary,
}

/// The dormant-access engine's service surface.
pub struct DormantAccessService {
    scanner: DormancyScanner,
    workflow: RevocationWorkflow,
    configs: Arc<dyn ConfigStore>,
    settings: EngineSettings,
}

impl DormantAccessService {
    /// Assemble the service from its collaborators.
    pub fn new(
        inventory: Arc<dyn InventoryProvider>,
        identity: Arc<dyn IdentityProvider>,
        records: Arc<dyn RecordStore>,
        configs: Arc<dyn ConfigStore>,
        bus: Arc<dyn EventBus>,
        settings: EngineSettings,
    ) -> Self {
        let scanner = DormancyScanner::new(
            Arc::clone(&inventory),
            identity,
            settings.scan_concurrency,
        );
        let workflow = RevocationWorkflow::new(inventory, records, bus);
        Self {
            scanner,
            workflow,
            configs,
            settings,
        }
    }

    /// Scan the tenant's inventory for dormant access.
    ///
    /// Read-only: persists nothing, emits nothing, safe to call repeatedly.
    #[instrument(skip(self))]
    pub async fn scan_for_dormant_access(&self, tenant_id: TenantId) -> Result<ScanOutcome> {
        let config = self.get_config(tenant_id).await?;
        let records = self.scanner.scan(tenant_id, &config).await?;
        let summary = summarize(&records, self.settings.top_users_limit);
        Ok(ScanOutcome { records, summary })
    }

    /// Scan, then advance the auto-revoke subset through the workflow.
    ///
    /// Individual record failures are collected in the outcome's error
    /// list; they never fail the pass as a whole.
    #[instrument(skip(self))]
    pub async fn process_auto_revocation(&self, tenant_id: TenantId) -> Result<ProcessingOutcome> {
        let config = self.get_config(tenant_id).await?;
        let scanned = self.scanner.scan(tenant_id, &config).await?;
        self.workflow.process(tenant_id, &config, &scanned).await
    }

    /// Approve a pending revocation.
    #[instrument(skip(self))]
    pub async fn approve_revocation(
        &self,
        tenant_id: TenantId,
        record_id: RecordId,
        approved_by: &str,
    ) -> Result<DormantAccessRecord> {
        self.workflow.approve(tenant_id, record_id, approved_by).await
    }

    /// Exempt a record from automatic revocation.
    #[instrument(skip(self))]
    pub async fn exempt_record(
        &self,
        tenant_id: TenantId,
        record_id: RecordId,
        exempted_by: &str,
        reason: &str,
    ) -> Result<DormantAccessRecord> {
        self.workflow
            .exempt(tenant_id, record_id, exempted_by, reason)
            .await
    }

    /// Dormant-access records for one user, from a fresh scan.
    #[instrument(skip(self))]
    pub async fn get_dormant_access_by_user(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<DormantAccessRecord>> {
        let outcome = self.scan_for_dormant_access(tenant_id).await?;
        Ok(outcome
            .records
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect())
    }

    /// Dormant-access records for one application, from a fresh scan.
    #[instrument(skip(self))]
    pub async fn get_dormant_access_by_app(
        &self,
        tenant_id: TenantId,
        app_id: ApplicationId,
    ) -> Result<Vec<DormantAccessRecord>> {
        let outcome = self.scan_for_dormant_access(tenant_id).await?;
        Ok(outcome
            .records
            .into_iter()
            .filter(|r| r.app_id == app_id)
            .collect())
    }

    /// Dormant-access records for one department, from a fresh scan.
    ///
    /// Records with no department match the label "Unknown".
    #[instrument(skip(self))]
    pub async fn get_dormant_access_by_department(
        &self,
        tenant_id: TenantId,
        department: &str,
    ) -> Result<Vec<DormantAccessRecord>> {
        let outcome = self.scan_for_dormant_access(tenant_id).await?;
        Ok(outcome
            .records
            .into_iter()
            .filter(|r| r.department_label() == department)
            .collect())
    }

    /// The tenant's effective configuration (defaults when never set).
    #[instrument(skip(self))]
    pub async fn get_config(&self, tenant_id: TenantId) -> Result<DormantAccessConfig> {
        Ok(self
            .configs
            .get(tenant_id)
            .await?
            .unwrap_or_default())
    }

    /// Merge a partial update into the tenant's configuration.
    ///
    /// Unspecified fields keep their previous values. The merged result is
    /// validated before it is stored; an invalid update changes nothing.
    #[instrument(skip(self, update))]
    pub async fn set_config(
        &self,
        tenant_id: TenantId,
        update: &DormantAccessConfigUpdate,
    ) -> Result<DormantAccessConfig> {
        let merged = self.get_config(tenant_id).await?.merged(update);
        merged.validate()?;
        self.configs.put(tenant_id, merged.clone()).await?;
        Ok(merged)
    }
}
