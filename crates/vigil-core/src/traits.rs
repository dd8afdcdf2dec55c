//! Multi-Tenant Traits
//!
//! This module provides traits for multi-tenant entities in vigil.
//!
//! # Example
//!
//! ```
//! use vigil_core::{TenantId, TenantAware};
//!
//! struct AccessRow {
//!     tenant_id: TenantId,
//!     app_name: String,
//! }
//!
//! impl TenantAware for AccessRow {
//!     fn tenant_id(&self) -> TenantId {
//!         self.tenant_id
//!     }
//! }
//!
//! // Generic function that works with any TenantAware entity
//! fn verify_tenant<T: TenantAware>(entity: &T, expected: TenantId) -> bool {
//!     entity.tenant_id() == expected
//! }
//!
//! let tenant = TenantId::new();
//! let row = AccessRow {
//!     tenant_id: tenant,
//!     app_name: "crm".to_string(),
//! };
//!
//! assert!(verify_tenant(&row, tenant));
//! ```

use crate::ids::TenantId;

/// Trait for entities that belong to a specific tenant.
///
/// Implementing this trait marks an entity as tenant-scoped, enabling
/// compile-time verification that tenant isolation is properly implemented.
/// No cross-tenant aggregation or mutation is permitted anywhere in vigil;
/// this trait is the seam that makes that checkable.
///
/// # Object Safety
///
/// This trait is object-safe, meaning it can be used with trait objects:
/// `Box<dyn TenantAware>` or `&dyn TenantAware`.
pub trait TenantAware {
    /// Returns the tenant ID associated with this entity.
    ///
    /// Returns an owned `TenantId` (which is `Copy`) for convenience,
    /// allowing callers to use the value without lifetime concerns.
    fn tenant_id(&self) -> TenantId;
}
