//! Dormant-access detection and revocation-lifecycle engine.
//!
//! For a tenant, this crate inventories every (user, application) access
//! grant, classifies each grant's staleness against configurable
//! thresholds, and drives a multi-stage workflow (notify, request
//! approval, approve/exempt, revoke) that removes unused access and
//! reports the cost impact.
//!
//! # Components
//!
//! - [`classify`] - pure staleness-to-category mapping (highest threshold
//!   wins; never-accessed grants are maximally stale)
//! - [`exclusion`] - admin-role and service-account eligibility rules
//! - [`scan`] - bounded-concurrency fan-out over the tenant's inventory
//! - [`workflow`] - per-record state machine with at-most-once revocation
//! - [`summary`] - cross-record statistics and cost rollups
//!
//! # Service
//!
//! [`DormantAccessService`] is the facade consumers call:
//! - [`DormantAccessService::scan_for_dormant_access`] - read-only scan
//! - [`DormantAccessService::process_auto_revocation`] - scan plus workflow pass
//! - [`DormantAccessService::approve_revocation`] / [`DormantAccessService::exempt_record`]
//! - [`DormantAccessService::get_config`] / [`DormantAccessService::set_config`]
//!
//! # Collaborators
//!
//! The engine owns no I/O. The access inventory, identity directory,
//! record store, config store, and event bus are injected as trait
//! objects; [`providers`], [`store`], and [`config`] ship in-memory
//! implementations for tests and single-node use.

pub mod classify;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod providers;
pub mod scan;
pub mod service;
pub mod settings;
pub mod store;
pub mod summary;
pub mod types;
pub mod workflow;

// Re-export commonly used types
pub use error::{DormancyError, Result};
pub use types::{
    ContractStatus,
    DormancyCategory,
    DormantAccessRecord,
    GrantStatus,
    RecordStatus,
};

pub use config::{
    ConfigStore,
    DormantAccessConfig,
    DormantAccessConfigUpdate,
    InMemoryConfigStore,
};
pub use providers::{
    AccessGrant,
    Application,
    Contract,
    IdentityProvider,
    InMemoryIdentityProvider,
    InMemoryInventoryProvider,
    InventoryProvider,
    UserRecord,
};
pub use scan::DormancyScanner;
pub use service::{DormantAccessService, ScanOutcome};
pub use settings::EngineSettings;
pub use store::{InMemoryRecordStore, RecordStore};
pub use summary::{summarize, DormantAccessSummary, PotentialSavings, TopUserEntry};
pub use workflow::{ProcessingOutcome, RevocationWorkflow};
