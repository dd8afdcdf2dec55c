//! Record persistence.
//!
//! Dormant-access records survive across scans so workflow progress
//! (notifications, approvals, exemptions) is not lost. The store is a trait
//! seam; the in-memory implementation backs tests and single-node
//! deployments.
//!
//! Updates use compare-and-set on the record version so concurrent
//! processing passes cannot both advance the same record; the loser gets a
//! [`DormancyError::TransitionConflict`] and retries or skips.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use vigil_core::{ApplicationId, RecordId, TenantId, UserId};

use crate::error::{DormancyError, Result};
use crate::types::DormantAccessRecord;

/// Persistent store for dormant-access records.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, record: DormantAccessRecord) -> Result<()>;

    /// Fetch a record by ID within a tenant.
    async fn get(&self, tenant_id: TenantId, id: RecordId) -> Result<Option<DormantAccessRecord>>;

    /// Fetch the most recently detected record for a grant, if any.
    async fn find_by_grant(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        app_id: ApplicationId,
    ) -> Result<Option<DormantAccessRecord>>;

    /// List all records for a tenant.
    async fn list(&self, tenant_id: TenantId) -> Result<Vec<DormantAccessRecord>>;

    /// Replace a record, but only if its stored version still equals
    /// `expected_version`. The stored version is bumped on success.
    ///
    /// Returns [`DormancyError::TransitionConflict`] when another writer got
    /// there first, and [`DormancyError::NotFound`] when the record does not
    /// exist in this tenant.
    async fn update(
        &self,
        tenant_id: TenantId,
        record: DormantAccessRecord,
        expected_version: u64,
    ) -> Result<DormantAccessRecord>;
}

/// In-memory record store keyed by tenant and record ID.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<(TenantId, RecordId), DormantAccessRecord>>>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, record: DormantAccessRecord) -> Result<()> {
        self.records
            .write()
            .await
            .insert((record.tenant_id, record.id), record);
        Ok(())
    }

    async fn get(&self, tenant_id: TenantId, id: RecordId) -> Result<Option<DormantAccessRecord>> {
        Ok(self.records.read().await.get(&(tenant_id, id)).cloned())
    }

    async fn find_by_grant(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        app_id: ApplicationId,
    ) -> Result<Option<DormantAccessRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| {
                r.tenant_id == tenant_id && r.user_id == user_id && r.app_id == app_id
            })
            .max_by_key(|r| r.detected_at)
            .cloned())
    }

    async fn list(&self, tenant_id: TenantId) -> Result<Vec<DormantAccessRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        tenant_id: TenantId,
        mut record: DormantAccessRecord,
        expected_version: u64,
    ) -> Result<DormantAccessRecord> {
        let mut records = self.records.write().await;
        let stored = records
            .get_mut(&(tenant_id, record.id))
            .ok_or(DormancyError::NotFound(record.id))?;
        if stored.version != expected_version {
            return Err(DormancyError::TransitionConflict(record.id));
        }
        record.version = expected_version + 1;
        *stored = record.clone();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DormancyCategory, RecordStatus};
    use chrono::{Duration, Utc};

    fn record(tenant_id: TenantId) -> DormantAccessRecord {
        DormantAccessRecord {
            id: RecordId::new(),
            tenant_id,
            user_id: UserId::new(),
            user_name: "jane".to_string(),
            user_email: "jane@corp.example".to_string(),
            department: None,
            manager: None,
            app_id: ApplicationId::new(),
            app_name: "crm".to_string(),
            access_type: "member".to_string(),
            granted_at: Utc::now(),
            last_access_at: None,
            days_since_access: None,
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

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = InMemoryRecordStore::new();
        let tenant_id = TenantId::new();
        let rec = record(tenant_id);

        store.insert(rec.clone()).await.unwrap();

        let found = store.get(tenant_id, rec.id).await.unwrap();
        assert_eq!(found.unwrap().id, rec.id);

        // Wrong tenant sees nothing.
        let other = store.get(TenantId::new(), rec.id).await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_find_by_grant_returns_latest() {
        let store = InMemoryRecordStore::new();
        let tenant_id = TenantId::new();
        let mut old = record(tenant_id);
        old.detected_at = Utc::now() - Duration::days(30);
        let mut fresh = record(tenant_id);
        fresh.user_id = old.user_id;
        fresh.app_id = old.app_id;

        store.insert(old.clone()).await.unwrap();
        store.insert(fresh.clone()).await.unwrap();

        let found = store
            .find_by_grant(tenant_id, old.user_id, old.app_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, fresh.id);
    }

    #[tokio::test]
    async fn test_update_compare_and_set() {
        let store = InMemoryRecordStore::new();
        let tenant_id = TenantId::new();
        let rec = record(tenant_id);
        store.insert(rec.clone()).await.unwrap();

        let mut notified = rec.clone();
        notified.status = RecordStatus::Notified;
        let updated = store.update(tenant_id, notified, 0).await.unwrap();
        assert_eq!(updated.version, 1);

        // Stale writer loses.
        let mut stale = rec.clone();
        stale.status = RecordStatus::PendingApproval;
        let result = store.update(tenant_id, stale, 0).await;
        assert!(matches!(result, Err(DormancyError::TransitionConflict(_))));

        // Missing record is NotFound.
        let ghost = record(tenant_id);
        let result = store.update(tenant_id, ghost, 0).await;
        assert!(matches!(result, Err(DormancyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_scoped_to_tenant() {
        let store = InMemoryRecordStore::new();
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();
        store.insert(record(tenant_a)).await.unwrap();
        store.insert(record(tenant_a)).await.unwrap();
        store.insert(record(tenant_b)).await.unwrap();

        assert_eq!(store.list(tenant_a).await.unwrap().len(), 2);
        assert_eq!(store.list(tenant_b).await.unwrap().len(), 1);
    }
}
