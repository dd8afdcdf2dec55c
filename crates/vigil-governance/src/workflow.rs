//! Revocation workflow.
//!
//! Per-record state machine over dormant-access records:
//!
//! ```text
//! detected -> notified -> pending_approval -> approved -> revoked
//!     \___________\______________\______________/
//!                  exempted (from any non-terminal state)
//! ```
//!
//! `revoked` and `exempted` are absorbing. Every transition that removes
//! real access calls the inventory provider first and only then commits the
//! record, so a failed removal leaves the record in its prior state.
//! Commits go through the store's compare-and-set so two concurrent passes
//! can never both advance the same record.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use vigil_core::{RecordId, TenantId};
use vigil_events::events::{
    DormantAccessDetected, DormantAccessExempted, DormantAccessRevoked, DormantApprovalRequested,
    DormantUserNotified,
};
use vigil_events::{publish, EventBus};

use crate::config::DormantAccessConfig;
use crate::error::{DormancyError, Result};
use crate::providers::InventoryProvider;
use crate::store::RecordStore;
use crate::types::{DormancyCategory, DormantAccessRecord, RecordStatus};

/// Per-outcome counts from one processing pass.
#[derive(Debug, Clone, Default)]
pub struct ProcessingOutcome {
    /// Auto-revoke records examined this pass.
    pub processed: usize,
    /// Records whose access was removed.
    pub revoked: usize,
    /// Records that sent a user notification this pass.
    pub notified: usize,
    /// Records moved to `pending_approval` this pass.
    pub pending_approval: usize,
    /// Records left untouched (exempted, awaiting approval, inside grace).
    pub skipped: usize,
    /// One human-readable string per failed record. Failures never abort
    /// the pass.
    pub errors: Vec<String>,
}

/// Drives dormant-access records through the revocation state machine.
pub struct RevocationWorkflow {
    inventory: Arc<dyn InventoryProvider>,
    store: Arc<dyn RecordStore>,
    bus: Arc<dyn EventBus>,
}

impl RevocationWorkflow {
    /// Create a workflow over the given collaborators.
    pub fn new(
        inventory: Arc<dyn InventoryProvider>,
        store: Arc<dyn RecordStore>,
        bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            inventory,
            store,
            bus,
        }
    }

    /// Advance the auto-revoke subset of a freshly scanned record set.
    ///
    /// Each scanned record is correlated with the store by its grant
    /// (tenant, user, application). An open record carries its workflow
    /// state forward; a missing or already-revoked one starts a fresh
    /// lifecycle. Individual failures land in [`ProcessingOutcome::errors`]
    /// and never abort the batch.
    pub async fn process(
        &self,
        tenant_id: TenantId,
        config: &DormantAccessConfig,
        scanned: &[DormantAccessRecord],
    ) -> Result<ProcessingOutcome> {
        let mut outcome = ProcessingOutcome::default();

        for candidate in scanned
            .iter()
            .filter(|r| r.category == DormancyCategory::AutoRevoke)
        {
            outcome.processed += 1;

            let record = match self
                .store
                .find_by_grant(tenant_id, candidate.user_id, candidate.app_id)
                .await?
            {
                Some(existing) if existing.status == RecordStatus::Exempted => {
                    outcome.skipped += 1;
                    continue;
                }
                // A record revoked in a previous lifecycle means the grant
                // was re-issued; the dormant grant seen now is a new case.
                Some(existing) if existing.status == RecordStatus::Revoked => {
                    self.open_record(tenant_id, candidate).await?
                }
                Some(existing) => existing,
                None => self.open_record(tenant_id, candidate).await?,
            };

            if let Err(err) = self.advance(tenant_id, config, record, &mut outcome).await {
                outcome.errors.push(err.to_string());
            }
        }

        info!(
            %tenant_id,
            processed = outcome.processed,
            revoked = outcome.revoked,
            pending_approval = outcome.pending_approval,
            errors = outcome.errors.len(),
            "auto-revocation pass complete"
        );
        Ok(outcome)
    }

    /// Approve a pending revocation: `pending_approval -> approved`.
    ///
    /// The actual removal happens on the next processing pass.
    pub async fn approve(
        &self,
        tenant_id: TenantId,
        record_id: RecordId,
        approved_by: &str,
    ) -> Result<DormantAccessRecord> {
        let mut record = self
            .store
            .get(tenant_id, record_id)
            .await?
            .ok_or(DormancyError::NotFound(record_id))?;

        if record.status != RecordStatus::PendingApproval {
            return Err(DormancyError::InvalidTransition {
                from: record.status,
                attempted: RecordStatus::Approved,
            });
        }

        let version = record.version;
        record.status = RecordStatus::Approved;
        record.approved_at = Some(Utc::now());
        record.approved_by = Some(approved_by.to_string());
        self.store.update(tenant_id, record, version).await
    }

    /// Exempt a record from any further automatic action.
    ///
    /// Allowed from every non-terminal state; `revoked` and `exempted`
    /// records reject the attempt.
    pub async fn exempt(
        &self,
        tenant_id: TenantId,
        record_id: RecordId,
        exempted_by: &str,
        reason: &str,
    ) -> Result<DormantAccessRecord> {
        let mut record = self
            .store
            .get(tenant_id, record_id)
            .await?
            .ok_or(DormancyError::NotFound(record_id))?;

        if record.status.is_terminal() {
            return Err(DormancyError::InvalidTransition {
                from: record.status,
                attempted: RecordStatus::Exempted,
            });
        }

        let version = record.version;
        record.status = RecordStatus::Exempted;
        record.exempted_at = Some(Utc::now());
        record.exempted_by = Some(exempted_by.to_string());
        record.exempted_reason = Some(reason.to_string());
        let record = self.store.update(tenant_id, record, version).await?;

        // The exemption is committed; emission failure is logged, not
        // surfaced.
        if let Err(err) = publish(
            self.bus.as_ref(),
            DormantAccessExempted {
                record_id: record.id,
                user_id: record.user_id,
                app_id: record.app_id,
                app_name: record.app_name.clone(),
                exempted_by: exempted_by.to_string(),
                reason: reason.to_string(),
                exempted_at: record.exempted_at.unwrap_or_else(Utc::now),
            },
            tenant_id,
            None,
        )
        .await
        {
            warn!(%tenant_id, error = %err, "failed to emit exemption event");
        }

        Ok(record)
    }

    /// Persist a fresh record and announce its discovery.
    async fn open_record(
        &self,
        tenant_id: TenantId,
        candidate: &DormantAccessRecord,
    ) -> Result<DormantAccessRecord> {
        self.store.insert(candidate.clone()).await?;

        if let Err(err) = publish(
            self.bus.as_ref(),
            DormantAccessDetected {
                record_id: candidate.id,
                user_id: candidate.user_id,
                user_email: candidate.user_email.clone(),
                app_id: candidate.app_id,
                app_name: candidate.app_name.clone(),
                days_since_access: candidate.days_since_access.unwrap_or(0),
                category: candidate.category.to_string(),
                cost_per_license: candidate.cost_per_license,
                detected_at: candidate.detected_at,
            },
            tenant_id,
            None,
        )
        .await
        {
            warn!(%tenant_id, error = %err, "failed to emit detection event");
        }

        Ok(candidate.clone())
    }

    /// Advance one record a single step through the state machine.
    async fn advance(
        &self,
        tenant_id: TenantId,
        config: &DormantAccessConfig,
        record: DormantAccessRecord,
        outcome: &mut ProcessingOutcome,
    ) -> Result<()> {
        match record.status {
            RecordStatus::Detected => {
                if config.require_approval {
                    self.request_approval(tenant_id, config, record).await?;
                    outcome.pending_approval += 1;
                } else if config.notify_user {
                    let record = self.notify(tenant_id, config, record).await?;
                    outcome.notified += 1;
                    if config.grace_period_days == 0 {
                        self.revoke(tenant_id, record).await?;
                        outcome.revoked += 1;
                    }
                } else {
                    self.revoke(tenant_id, record).await?;
                    outcome.revoked += 1;
                }
            }
            RecordStatus::Notified => {
                if self.grace_elapsed(&record, config) {
                    self.revoke(tenant_id, record).await?;
                    outcome.revoked += 1;
                } else {
                    outcome.skipped += 1;
                }
            }
            RecordStatus::PendingApproval => {
                // Waiting on a human.
                outcome.skipped += 1;
            }
            RecordStatus::Approved => {
                self.revoke(tenant_id, record).await?;
                outcome.revoked += 1;
            }
            RecordStatus::Revoked | RecordStatus::Exempted => {
                outcome.skipped += 1;
            }
        }
        Ok(())
    }

    fn grace_elapsed(&self, record: &DormantAccessRecord, config: &DormantAccessConfig) -> bool {
        match record.notified_at {
            Some(notified_at) => {
                Utc::now() - notified_at >= Duration::days(i64::from(config.grace_period_days))
            }
            // Never notified; nothing to wait for.
            None => true,
        }
    }

    /// `detected -> pending_approval`, raising the approval request.
    async fn request_approval(
        &self,
        tenant_id: TenantId,
        config: &DormantAccessConfig,
        mut record: DormantAccessRecord,
    ) -> Result<DormantAccessRecord> {
        let version = record.version;
        record.status = RecordStatus::PendingApproval;
        record.approval_requested_at = Some(Utc::now());
        let record = self.store.update(tenant_id, record, version).await?;

        if let Err(err) = publish(
            self.bus.as_ref(),
            DormantApprovalRequested {
                record_id: record.id,
                user_id: record.user_id,
                user_email: record.user_email.clone(),
                manager: config.notify_manager.then(|| record.manager.clone()).flatten(),
                app_id: record.app_id,
                app_name: record.app_name.clone(),
                days_since_access: record.days_since_access.unwrap_or(0),
                requested_at: record.approval_requested_at.unwrap_or_else(Utc::now),
            },
            tenant_id,
            None,
        )
        .await
        {
            warn!(%tenant_id, error = %err, "failed to emit approval request event");
        }

        Ok(record)
    }

    /// `detected -> notified`, requesting the user notification.
    async fn notify(
        &self,
        tenant_id: TenantId,
        config: &DormantAccessConfig,
        mut record: DormantAccessRecord,
    ) -> Result<DormantAccessRecord> {
        let version = record.version;
        record.status = RecordStatus::Notified;
        record.notified_at = Some(Utc::now());
        let record = self.store.update(tenant_id, record, version).await?;

        if let Err(err) = publish(
            self.bus.as_ref(),
            DormantUserNotified {
                record_id: record.id,
                user_id: record.user_id,
                user_email: record.user_email.clone(),
                manager: config.notify_manager.then(|| record.manager.clone()).flatten(),
                app_id: record.app_id,
                app_name: record.app_name.clone(),
                days_since_access: record.days_since_access.unwrap_or(0),
                grace_period_days: config.grace_period_days,
                notified_at: record.notified_at.unwrap_or_else(Utc::now),
            },
            tenant_id,
            None,
        )
        .await
        {
            warn!(%tenant_id, error = %err, "failed to emit notification event");
        }

        Ok(record)
    }

    /// Remove the access, then commit `-> revoked`.
    ///
    /// The provider call comes first: if it fails the record keeps its
    /// prior state and the error propagates to the batch's error list.
    async fn revoke(
        &self,
        tenant_id: TenantId,
        mut record: DormantAccessRecord,
    ) -> Result<DormantAccessRecord> {
        self.inventory
            .revoke_access(tenant_id, record.user_id, record.app_id)
            .await?;

        let version = record.version;
        record.status = RecordStatus::Revoked;
        record.revoked_at = Some(Utc::now());
        let record = match self.store.update(tenant_id, record, version).await {
            Ok(record) => record,
            Err(err) => {
                // Access is gone but the commit lost a race; surface it
                // rather than pretend the pass succeeded cleanly.
                warn!(%tenant_id, error = %err, "revocation committed in provider but record update failed");
                return Err(err);
            }
        };

        if let Err(err) = publish(
            self.bus.as_ref(),
            DormantAccessRevoked {
                record_id: record.id,
                user_id: record.user_id,
                user_email: record.user_email.clone(),
                app_id: record.app_id,
                app_name: record.app_name.clone(),
                days_since_access: record.days_since_access.unwrap_or(0),
                cost_per_license: record.cost_per_license,
                revoked_at: record.revoked_at.unwrap_or_else(Utc::now),
            },
            tenant_id,
            None,
        )
        .await
        {
            warn!(%tenant_id, error = %err, "failed to emit revocation event");
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::InMemoryInventoryProvider;
    use crate::store::InMemoryRecordStore;
    use vigil_core::{ApplicationId, UserId};
    use vigil_events::InMemoryEventBus;

    struct Fixture {
        workflow: RevocationWorkflow,
        inventory: Arc<InMemoryInventoryProvider>,
        store: Arc<InMemoryRecordStore>,
        bus: Arc<InMemoryEventBus>,
        tenant_id: TenantId,
    }

    impl Fixture {
        fn new() -> Self {
            let inventory = Arc::new(InMemoryInventoryProvider::new());
            let store = Arc::new(InMemoryRecordStore::new());
            let bus = Arc::new(InMemoryEventBus::new());
            let workflow = RevocationWorkflow::new(
                Arc::clone(&inventory) as Arc<dyn InventoryProvider>,
                Arc::clone(&store) as Arc<dyn RecordStore>,
                Arc::clone(&bus) as Arc<dyn EventBus>,
            );
            Self {
                workflow,
                inventory,
                store,
                bus,
                tenant_id: TenantId::new(),
            }
        }

        fn candidate(&self) -> DormantAccessRecord {
            DormantAccessRecord {
                id: RecordId::new(),
                tenant_id: self.tenant_id,
                user_id: UserId::new(),
                user_name: "jane".to_string(),
                user_email: "jane@corp.example".to_string(),
                department: Some("Engineering".to_string()),
                manager: Some("mgr1".to_string()),
                app_id: ApplicationId::new(),
                app_name: "crm".to_string(),
                access_type: "member".to_string(),
                granted_at: Utc::now() - Duration::days(365),
                last_access_at: Some(Utc::now() - Duration::days(95)),
                days_since_access: Some(95),
                category: DormancyCategory::AutoRevoke,
                cost_per_license: 120.0,
                status: RecordStatus::Detected,
                detected_at: Utc::now(),
                notified_at: None,
                approval_requested_at: None,
                approved_at: None,
                approved_by: None,
                revoked_at: None,
                exempted_at: None,
                exempted_by: None,
                exempted_reason: None,
                version: 0,
            }
        }
    }

    fn approval_config() -> DormantAccessConfig {
        DormantAccessConfig::default()
    }

    fn direct_config() -> DormantAccessConfig {
        DormantAccessConfig {
            require_approval: false,
            notify_user: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_detected_moves_to_pending_approval() {
        let fx = Fixture::new();
        let candidate = fx.candidate();

        let outcome = fx
            .workflow
            .process(fx.tenant_id, &approval_config(), &[candidate.clone()])
            .await
            .unwrap();

        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.pending_approval, 1);
        assert_eq!(outcome.revoked, 0);
        assert!(outcome.errors.is_empty());

        let stored = fx.store.get(fx.tenant_id, candidate.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::PendingApproval);
        assert!(stored.approval_requested_at.is_some());

        assert_eq!(fx.bus.by_topic("access.dormant_detected").await.len(), 1);
        assert_eq!(
            fx.bus.by_topic("access.dormant_approval_requested").await.len(),
            1
        );
        assert!(fx.inventory.revocations().await.is_empty());
    }

    #[tokio::test]
    async fn test_approved_record_revoked_on_next_pass() {
        let fx = Fixture::new();
        let candidate = fx.candidate();

        fx.workflow
            .process(fx.tenant_id, &approval_config(), &[candidate.clone()])
            .await
            .unwrap();
        let approved = fx
            .workflow
            .approve(fx.tenant_id, candidate.id, "mgr1")
            .await
            .unwrap();
        assert_eq!(approved.status, RecordStatus::Approved);
        assert_eq!(approved.approved_by.as_deref(), Some("mgr1"));

        let outcome = fx
            .workflow
            .process(fx.tenant_id, &approval_config(), &[candidate.clone()])
            .await
            .unwrap();
        assert_eq!(outcome.revoked, 1);

        let stored = fx.store.get(fx.tenant_id, candidate.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::Revoked);
        assert_eq!(
            fx.inventory.revocations().await,
            vec![(fx.tenant_id, candidate.user_id, candidate.app_id)]
        );
        assert_eq!(fx.bus.by_topic("access.dormant_revoked").await.len(), 1);
    }

    #[tokio::test]
    async fn test_direct_revocation_without_approval_or_notify() {
        let fx = Fixture::new();
        let candidate = fx.candidate();

        let outcome = fx
            .workflow
            .process(fx.tenant_id, &direct_config(), &[candidate.clone()])
            .await
            .unwrap();

        assert_eq!(outcome.revoked, 1);
        let stored = fx.store.get(fx.tenant_id, candidate.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::Revoked);
    }

    #[tokio::test]
    async fn test_notify_with_grace_period_halts_at_notified() {
        let fx = Fixture::new();
        let candidate = fx.candidate();
        let config = DormantAccessConfig {
            require_approval: false,
            notify_user: true,
            grace_period_days: 7,
            ..Default::default()
        };

        let outcome = fx
            .workflow
            .process(fx.tenant_id, &config, &[candidate.clone()])
            .await
            .unwrap();
        assert_eq!(outcome.notified, 1);
        assert_eq!(outcome.revoked, 0);

        let stored = fx.store.get(fx.tenant_id, candidate.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::Notified);
        assert_eq!(fx.bus.by_topic("access.dormant_user_notified").await.len(), 1);

        // A second pass inside the grace period leaves the record alone.
        let outcome = fx
            .workflow
            .process(fx.tenant_id, &config, &[candidate.clone()])
            .await
            .unwrap();
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.revoked, 0);
    }

    #[tokio::test]
    async fn test_notify_with_zero_grace_revokes_immediately() {
        let fx = Fixture::new();
        let candidate = fx.candidate();
        let config = DormantAccessConfig {
            require_approval: false,
            notify_user: true,
            grace_period_days: 0,
            ..Default::default()
        };

        let outcome = fx
            .workflow
            .process(fx.tenant_id, &config, &[candidate.clone()])
            .await
            .unwrap();
        assert_eq!(outcome.notified, 1);
        assert_eq!(outcome.revoked, 1);

        let stored = fx.store.get(fx.tenant_id, candidate.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::Revoked);
    }

    #[tokio::test]
    async fn test_notified_record_revoked_after_grace_elapses() {
        let fx = Fixture::new();
        let mut notified = fx.candidate();
        notified.status = RecordStatus::Notified;
        notified.notified_at = Some(Utc::now() - Duration::days(10));
        fx.store.insert(notified.clone()).await.unwrap();

        let config = DormantAccessConfig {
            require_approval: false,
            notify_user: true,
            grace_period_days: 7,
            ..Default::default()
        };

        let outcome = fx
            .workflow
            .process(fx.tenant_id, &config, &[notified.clone()])
            .await
            .unwrap();
        assert_eq!(outcome.revoked, 1);

        let stored = fx.store.get(fx.tenant_id, notified.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::Revoked);
    }

    #[tokio::test]
    async fn test_revocation_failure_keeps_record_state() {
        let fx = Fixture::new();
        let candidate = fx.candidate();
        fx.inventory
            .fail_revocations_for(candidate.user_id, candidate.app_id)
            .await;

        let outcome = fx
            .workflow
            .process(fx.tenant_id, &direct_config(), &[candidate.clone()])
            .await
            .unwrap();

        assert_eq!(outcome.revoked, 0);
        assert_eq!(outcome.errors.len(), 1);

        // The record is still open so the next pass can retry.
        let stored = fx.store.get(fx.tenant_id, candidate.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::Detected);
        assert!(fx.bus.by_topic("access.dormant_revoked").await.is_empty());
    }

    #[tokio::test]
    async fn test_failure_does_not_block_remaining_records() {
        let fx = Fixture::new();
        let failing = fx.candidate();
        let healthy = fx.candidate();
        fx.inventory
            .fail_revocations_for(failing.user_id, failing.app_id)
            .await;

        let outcome = fx
            .workflow
            .process(
                fx.tenant_id,
                &direct_config(),
                &[failing.clone(), healthy.clone()],
            )
            .await
            .unwrap();

        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.revoked, 1);
        assert_eq!(outcome.errors.len(), 1);
        let stored = fx.store.get(fx.tenant_id, healthy.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::Revoked);
    }

    #[tokio::test]
    async fn test_exempted_record_is_absorbing() {
        let fx = Fixture::new();
        let candidate = fx.candidate();
        fx.store.insert(candidate.clone()).await.unwrap();

        let exempted = fx
            .workflow
            .exempt(fx.tenant_id, candidate.id, "mgr1", "seasonal contractor")
            .await
            .unwrap();
        assert_eq!(exempted.status, RecordStatus::Exempted);
        assert_eq!(fx.bus.by_topic("access.dormant_exempted").await.len(), 1);

        // Processing skips it and never revokes.
        let outcome = fx
            .workflow
            .process(fx.tenant_id, &direct_config(), &[candidate.clone()])
            .await
            .unwrap();
        assert_eq!(outcome.skipped, 1);
        assert!(fx.inventory.revocations().await.is_empty());

        // Terminal states reject all further transitions.
        let result = fx
            .workflow
            .approve(fx.tenant_id, candidate.id, "mgr1")
            .await;
        assert!(matches!(
            result,
            Err(DormancyError::InvalidTransition { .. })
        ));
        let result = fx
            .workflow
            .exempt(fx.tenant_id, candidate.id, "mgr2", "again")
            .await;
        assert!(matches!(
            result,
            Err(DormancyError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_revoked_record_rejects_transitions_and_is_never_revoked_twice() {
        let fx = Fixture::new();
        let candidate = fx.candidate();

        fx.workflow
            .process(fx.tenant_id, &direct_config(), &[candidate.clone()])
            .await
            .unwrap();
        assert_eq!(fx.inventory.revocations().await.len(), 1);

        let result = fx
            .workflow
            .exempt(fx.tenant_id, candidate.id, "mgr1", "too late")
            .await;
        assert!(matches!(
            result,
            Err(DormancyError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_regranted_access_opens_fresh_record() {
        let fx = Fixture::new();
        let candidate = fx.candidate();

        fx.workflow
            .process(fx.tenant_id, &direct_config(), &[candidate.clone()])
            .await
            .unwrap();

        // The same grant shows up dormant again later; same user and app,
        // new scan identity.
        let mut again = fx.candidate();
        again.user_id = candidate.user_id;
        again.app_id = candidate.app_id;
        again.detected_at = Utc::now() + Duration::seconds(1);

        let outcome = fx
            .workflow
            .process(fx.tenant_id, &direct_config(), &[again.clone()])
            .await
            .unwrap();
        assert_eq!(outcome.revoked, 1);
        assert_eq!(fx.inventory.revocations().await.len(), 2);
        assert_eq!(fx.bus.by_topic("access.dormant_detected").await.len(), 2);
    }

    #[tokio::test]
    async fn test_approve_unknown_record_is_not_found() {
        let fx = Fixture::new();
        let result = fx
            .workflow
            .approve(fx.tenant_id, RecordId::new(), "mgr1")
            .await;
        assert!(matches!(result, Err(DormancyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_approve_requires_pending_approval() {
        let fx = Fixture::new();
        let candidate = fx.candidate();
        fx.store.insert(candidate.clone()).await.unwrap();

        let result = fx
            .workflow
            .approve(fx.tenant_id, candidate.id, "mgr1")
            .await;
        assert!(matches!(
            result,
            Err(DormancyError::InvalidTransition {
                from: RecordStatus::Detected,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_non_auto_revoke_records_are_ignored() {
        let fx = Fixture::new();
        let mut warning = fx.candidate();
        warning.category = DormancyCategory::Warning;

        let outcome = fx
            .workflow
            .process(fx.tenant_id, &direct_config(), &[warning])
            .await
            .unwrap();
        assert_eq!(outcome.processed, 0);
        assert!(fx.inventory.revocations().await.is_empty());
    }
}
