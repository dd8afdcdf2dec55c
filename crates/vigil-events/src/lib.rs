//! # vigil-events
//!
//! Typed event layer for vigil.
//!
//! The dormant-access engine never talks to a message broker directly: it
//! builds events as plain values, wraps them in an [`EventEnvelope`] carrying
//! tenant context, and hands them to an [`EventBus`] implementation. Delivery
//! and persistence are the bus's responsibility (at-least-once assumed); this
//! crate does not retry emission.
//!
//! ## Features
//!
//! - **Type Safety**: Compile-time topic/event type association via the
//!   [`Event`] trait
//! - **Multi-tenant**: All envelopes include tenant context
//! - **Testability**: [`InMemoryEventBus`] captures emitted envelopes so
//!   workflows can be unit-tested without a live bus
//!
//! ## Example
//!
//! ```
//! use vigil_events::{publish, EventBus, InMemoryEventBus, events::DormantAccessRevoked};
//! use vigil_core::{ApplicationId, RecordId, TenantId, UserId};
//! use chrono::Utc;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let bus = Arc::new(InMemoryEventBus::new());
//!
//! let event = DormantAccessRevoked {
//!     record_id: RecordId::new(),
//!     user_id: UserId::new(),
//!     user_email: "jane@example.com".to_string(),
//!     app_id: ApplicationId::new(),
//!     app_name: "crm".to_string(),
//!     days_since_access: 120,
//!     cost_per_license: 24.0,
//!     revoked_at: Utc::now(),
//! };
//!
//! publish(bus.as_ref(), event, TenantId::new(), None).await.unwrap();
//! assert_eq!(bus.count().await, 1);
//! # }
//! ```

pub mod bus;
pub mod envelope;
pub mod error;
pub mod event;
pub mod events;

// Re-exports for convenience
pub use bus::{publish, EventBus, InMemoryEventBus};
pub use envelope::{EventEnvelope, RawEnvelope};
pub use error::EventError;
pub use event::Event;
