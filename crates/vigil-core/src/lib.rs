//! vigil Core Library
//!
//! Shared types and traits for vigil.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (`TenantId`, `UserId`, `ApplicationId`, `RecordId`)
//! - [`traits`] - Multi-tenant traits (`TenantAware`)
//!
//! # Example
//!
//! ```
//! use vigil_core::{TenantId, UserId, TenantAware};
//!
//! let tenant_id = TenantId::new();
//! let user_id = UserId::new();
//!
//! struct Row { tenant_id: TenantId }
//!
//! impl TenantAware for Row {
//!     fn tenant_id(&self) -> TenantId {
//!         self.tenant_id
//!     }
//! }
//! ```

pub mod ids;
pub mod traits;

// Re-export main types for convenient access
pub use ids::{ApplicationId, ParseIdError, RecordId, TenantId, UserId};
pub use traits::TenantAware;
