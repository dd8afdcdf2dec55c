//! Event bus abstraction.
//!
//! The engine emits lifecycle events through the [`EventBus`] trait and
//! assumes at-least-once delivery from the implementation; it does not retry
//! emission itself. [`InMemoryEventBus`] captures envelopes for tests and
//! doubles as a reference implementation.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use vigil_core::{TenantId, UserId};

use crate::envelope::{EventEnvelope, RawEnvelope};
use crate::error::EventError;
use crate::event::Event;

/// Trait for event bus backends.
///
/// Object-safe: takes a type-erased [`RawEnvelope`]. Use [`publish`] to emit
/// a typed event through a `dyn EventBus`.
#[async_trait::async_trait]
pub trait EventBus: Send + Sync {
    /// Emit an envelope to its topic.
    async fn emit(&self, topic: &str, envelope: RawEnvelope) -> Result<(), EventError>;
}

/// Build an envelope for a typed event and emit it through the bus.
pub async fn publish<T: Event>(
    bus: &dyn EventBus,
    payload: T,
    tenant_id: TenantId,
    actor_id: Option<UserId>,
) -> Result<(), EventError> {
    let envelope = EventEnvelope::new(payload, tenant_id, actor_id);
    debug!(
        event_id = %envelope.event_id,
        event_type = %envelope.event_type,
        tenant_id = %tenant_id,
        "Publishing event"
    );
    bus.emit(T::TOPIC, envelope.into_raw()?).await
}

/// In-memory event bus that records every emitted envelope.
#[derive(Debug, Default)]
pub struct InMemoryEventBus {
    emitted: Arc<RwLock<Vec<(String, RawEnvelope)>>>,
}

impl InMemoryEventBus {
    /// Create a new in-memory bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            emitted: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Number of envelopes emitted so far.
    pub async fn count(&self) -> usize {
        self.emitted.read().await.len()
    }

    /// All envelopes emitted to a given topic, in emission order.
    pub async fn by_topic(&self, topic: &str) -> Vec<RawEnvelope> {
        self.emitted
            .read()
            .await
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// All emitted `(topic, envelope)` pairs, in emission order.
    pub async fn all(&self) -> Vec<(String, RawEnvelope)> {
        self.emitted.read().await.clone()
    }

    /// Clear captured envelopes (for testing).
    pub async fn clear(&self) {
        self.emitted.write().await.clear();
    }
}

#[async_trait::async_trait]
impl EventBus for InMemoryEventBus {
    async fn emit(&self, topic: &str, envelope: RawEnvelope) -> Result<(), EventError> {
        envelope.validate()?;
        self.emitted
            .write()
            .await
            .push((topic.to_string(), envelope));
        Ok(())
    }
}
