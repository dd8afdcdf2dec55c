//! Event trait definition for type-safe event publishing.

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be published to the event bus.
///
/// Implementors must define the bus topic and event type name.
/// The event payload is automatically serialized/deserialized as JSON.
///
/// # Example
///
/// ```
/// use serde::{Serialize, Deserialize};
/// use vigil_events::Event;
/// use vigil_core::UserId;
///
/// #[derive(Debug, Serialize, Deserialize)]
/// pub struct AccessRestored {
///     pub user_id: UserId,
/// }
///
/// impl Event for AccessRestored {
///     const TOPIC: &'static str = "access.restored";
///     const EVENT_TYPE: &'static str = "access.restored";
/// }
/// ```
pub trait Event: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The bus topic for this event type.
    ///
    /// Events of this type will be published to this topic.
    const TOPIC: &'static str;

    /// The fully qualified event type name.
    ///
    /// Stored in the event envelope for routing and deserialization.
    /// Convention: `access.<entity>_<action>`
    const EVENT_TYPE: &'static str;
}
