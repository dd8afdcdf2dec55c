//! Event envelope for wrapping all events with metadata.

use crate::error::EventError;
use crate::event::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vigil_core::{TenantAware, TenantId, UserId};

/// Standard envelope wrapping all vigil events.
///
/// Contains metadata required for routing, idempotence, and audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope<T> {
    /// Unique identifier for this event instance.
    /// Used for idempotence checking by consumers.
    pub event_id: Uuid,

    /// Fully qualified event type name.
    /// E.g., "access.dormant_revoked"
    pub event_type: String,

    /// Tenant context for multi-tenant isolation.
    pub tenant_id: TenantId,

    /// User or service that triggered the event.
    /// None for system-generated events (automated revocation passes).
    pub actor_id: Option<UserId>,

    /// Timestamp when the event was created.
    pub timestamp: DateTime<Utc>,

    /// The actual event payload.
    pub payload: T,
}

impl<T: Event> EventEnvelope<T> {
    /// Create a new event envelope.
    pub fn new(payload: T, tenant_id: TenantId, actor_id: Option<UserId>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: T::EVENT_TYPE.to_string(),
            tenant_id,
            actor_id,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Get the bus topic for this event.
    pub fn topic(&self) -> &'static str {
        T::TOPIC
    }

    /// Erase the payload type, keeping it as a JSON value.
    ///
    /// This is how typed events cross the object-safe [`crate::EventBus`]
    /// boundary.
    pub fn into_raw(self) -> Result<RawEnvelope, EventError> {
        let payload =
            serde_json::to_value(&self.payload).map_err(|e| EventError::SerializationFailed {
                event_type: T::EVENT_TYPE.to_string(),
                cause: e.to_string(),
            })?;

        Ok(RawEnvelope {
            event_id: self.event_id,
            event_type: self.event_type,
            tenant_id: self.tenant_id,
            actor_id: self.actor_id,
            timestamp: self.timestamp,
            payload,
        })
    }
}

impl<T> TenantAware for EventEnvelope<T> {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Raw envelope with a type-erased payload.
///
/// Used at the [`crate::EventBus`] boundary and when the event type is not
/// known at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEnvelope {
    pub event_id: Uuid,
    pub event_type: String,
    pub tenant_id: TenantId,
    pub actor_id: Option<UserId>,
    pub timestamp: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl RawEnvelope {
    /// Validate that required fields are present and valid.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.event_type.is_empty() {
            return Err(EventError::InvalidEnvelope {
                reason: "event_type is empty".to_string(),
            });
        }

        if !self.event_type.starts_with("access.") {
            return Err(EventError::InvalidEnvelope {
                reason: format!(
                    "event_type '{}' does not follow naming convention",
                    self.event_type
                ),
            });
        }

        Ok(())
    }

    /// Try to deserialize the payload into a specific event type.
    pub fn into_typed<T: Event>(self) -> Result<EventEnvelope<T>, EventError> {
        let payload: T = serde_json::from_value(self.payload).map_err(|e| {
            EventError::DeserializationFailed {
                event_type: self.event_type.clone(),
                raw: e.to_string(),
            }
        })?;

        Ok(EventEnvelope {
            event_id: self.event_id,
            event_type: self.event_type,
            tenant_id: self.tenant_id,
            actor_id: self.actor_id,
            timestamp: self.timestamp,
            payload,
        })
    }
}

impl TenantAware for RawEnvelope {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
