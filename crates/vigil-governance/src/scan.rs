//! Dormant-access scanning.
//!
//! The scanner walks a tenant's application inventory with bounded
//! concurrency, resolves each active grant's holder, applies exclusion
//! rules, and classifies staleness. It is read-only: it produces candidate
//! records but persists nothing and emits no events.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;
use tracing::warn;
use vigil_core::{RecordId, TenantId};

use crate::classify::{classify, days_since_access, per_license_cost};
use crate::config::DormantAccessConfig;
use crate::exclusion::is_excluded;
use crate::providers::{Application, IdentityProvider, InventoryProvider};
use crate::types::{DormantAccessRecord, GrantStatus, RecordStatus};
use crate::Result;

/// Scans a tenant's inventory for dormant access grants.
pub struct DormancyScanner {
    inventory: Arc<dyn InventoryProvider>,
    identity: Arc<dyn IdentityProvider>,
    concurrency: usize,
}

impl DormancyScanner {
    /// Create a scanner over the given providers.
    ///
    /// `concurrency` bounds how many applications are scanned in parallel;
    /// zero is treated as one.
    pub fn new(
        inventory: Arc<dyn InventoryProvider>,
        identity: Arc<dyn IdentityProvider>,
        concurrency: usize,
    ) -> Self {
        Self {
            inventory,
            identity,
            concurrency: concurrency.max(1),
        }
    }

    /// Scan all applications for a tenant and return candidate records.
    ///
    /// Applications are scanned concurrently up to the configured bound. A
    /// provider failure on one application skips that application and is
    /// logged; the scan still covers the rest. Grants whose holder cannot
    /// be resolved are skipped silently (soft skip).
    pub async fn scan(
        &self,
        tenant_id: TenantId,
        config: &DormantAccessConfig,
    ) -> Result<Vec<DormantAccessRecord>> {
        let now = Utc::now();
        let apps = self.inventory.list_applications(tenant_id).await?;

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(apps.len());

        for app in apps {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break, // semaphore closed, cannot happen here
            };
            let inventory = Arc::clone(&self.inventory);
            let identity = Arc::clone(&self.identity);
            let config = config.clone();

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                scan_application(&*inventory, &*identity, tenant_id, &app, &config, now).await
            }));
        }

        let mut records = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(Ok(mut app_records)) => records.append(&mut app_records),
                Ok(Err(err)) => {
                    warn!(%tenant_id, error = %err, "skipping application after provider failure");
                }
                Err(err) => {
                    warn!(%tenant_id, error = %err, "scan task panicked");
                }
            }
        }

        Ok(records)
    }
}

/// Scan one application's grants for dormancy.
async fn scan_application(
    inventory: &dyn InventoryProvider,
    identity: &dyn IdentityProvider,
    tenant_id: TenantId,
    app: &Application,
    config: &DormantAccessConfig,
    now: DateTime<Utc>,
) -> Result<Vec<DormantAccessRecord>> {
    let grants = inventory.list_grants(tenant_id, app.id).await?;
    let contracts = inventory.list_active_contracts(tenant_id, app.id).await?;
    let cost_per_license = per_license_cost(&contracts);

    let mut records = Vec::new();
    for grant in grants {
        if grant.status != GrantStatus::Active {
            continue;
        }

        // A grant never used counts its staleness from the grant date so
        // classification has a concrete figure to report.
        let days = days_since_access(grant.last_access_at, now)
            .or_else(|| days_since_access(Some(grant.granted_at), now));
        let Some(category) = classify(
            days_since_access(grant.last_access_at, now),
            config,
        ) else {
            continue;
        };

        let Some(user) = identity.get_user(tenant_id, grant.user_id).await? else {
            // Unresolvable holder: soft skip, not an error.
            continue;
        };
        if is_excluded(&user, config) {
            continue;
        }

        records.push(DormantAccessRecord {
            id: RecordId::new(),
            tenant_id,
            user_id: user.id,
            user_name: user.name,
            user_email: user.email,
            department: user.department,
            manager: user.manager,
            app_id: app.id,
            app_name: app.name.clone(),
            access_type: grant.access_type,
            granted_at: grant.granted_at,
            last_access_at: grant.last_access_at,
            days_since_access: days,
            category,
            cost_per_license,
            status: RecordStatus::Detected,
            detected_at: now,
            notified_at: None,
            approval_requested_at: None,
            approved_at: None,
            approved_by: None,
            revoked_at: None,
            exempted_at: None,
            exempted_by: None,
            exempted_reason: None,
            version: 0,
        });
    }

    Ok(records)
}
