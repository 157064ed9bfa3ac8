//! # Framework Errors
//!
//! This module defines the error types used throughout the entity framework.
//!
//! - [`ClientError`] is what a [`RemoteClient`](crate::framework::RemoteClient) raises.
//! - [`EntityError`] is what every framework operation returns. Client failures are wrapped
//!   transparently, so the kind and payload the client produced reach the caller unchanged.

/// Errors raised by a remote-access client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Errors that can occur within the entity framework itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EntityError {
    /// The concrete type did not provide [`Entity::update_fields`](crate::framework::Entity::update_fields).
    #[error("{type_name} does not implement update_fields")]
    NotImplemented { type_name: &'static str },

    #[error(transparent)]
    Client(#[from] ClientError),

    /// A raw response could not be turned into the expected field map shape.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Unknown attribute `{name}` on {type_name}")]
    UnknownAttribute { type_name: &'static str, name: String },

    #[error("Attribute `{name}` on {type_name} is readonly")]
    ReadonlyAttribute { type_name: &'static str, name: String },

    #[error("Unknown relationship `{name}` on {type_name}")]
    UnknownRelation { type_name: &'static str, name: String },

    #[error("Type `{0}` is not registered")]
    UnknownType(String),

    #[error("Expected {expected}, resolved {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },
}

impl From<serde_json::Error> for EntityError {
    fn from(e: serde_json::Error) -> Self {
        EntityError::Deserialization(e.to_string())
    }
}
