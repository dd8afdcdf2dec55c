//! Error types for the vigil-events crate.

use thiserror::Error;

/// Errors that can occur during event operations.
#[derive(Debug, Error)]
pub enum EventError {
    // Publishing errors
    /// Failed to publish event to topic.
    #[error("Failed to publish to topic {topic}: {cause}")]
    PublishFailed { topic: String, cause: String },

    /// Failed to serialize event.
    #[error("Failed to serialize event type {event_type}: {cause}")]
    SerializationFailed { event_type: String, cause: String },

    /// Failed to deserialize event.
    #[error("Failed to deserialize event type {event_type}: {raw}")]
    DeserializationFailed { event_type: String, raw: String },

    // Envelope errors
    /// Invalid event envelope.
    #[error("Invalid event envelope: {reason}")]
    InvalidEnvelope { reason: String },
}
