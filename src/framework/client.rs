//! # Remote Client
//!
//! This module defines the capability surface the framework needs from a remote-access client,
//! and the [`Session`] every entity carries to reach it.
//!
//! The framework never performs network I/O itself. Everything goes through [`RemoteClient`],
//! whose calls are blocking: they return when the remote side answered or failed.

use crate::framework::error::ClientError;
use crate::framework::registry::TypeRegistry;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Raw attribute values of one resource, as produced by deserializing a server response.
pub type FieldMap = serde_json::Map<String, Value>;

/// Query parameters sent alongside a request.
pub type Params = BTreeMap<String, String>;

/// The operations a remote-access client must provide.
///
/// Implementations own retries, timeouts and authentication. The framework propagates any
/// [`ClientError`] they return without translating it.
pub trait RemoteClient: Send + Sync {
    /// Fetch one resource of the type whose path name is `path_name`.
    fn find(&self, path_name: &str, id: &Value, params: &Params) -> Result<FieldMap, ClientError>;

    /// Fetch one resource at an explicit path instead of a type's own path.
    fn find_at(&self, path: &str, id: &Value, params: &Params) -> Result<FieldMap, ClientError>;

    /// Fetch a collection of `target_type` resources at `path`.
    fn find_many(
        &self,
        target_type: &str,
        path: &str,
        params: &Params,
    ) -> Result<Vec<FieldMap>, ClientError>;

    /// Create one resource. The raw server answer is returned as-is.
    fn create(&self, path_name: &str, options: &FieldMap) -> Result<Value, ClientError>;

    /// Send changed fields of an existing resource.
    fn update(&self, path_name: &str, id: &Value, fields: &FieldMap) -> Result<Value, ClientError>;
}

/// The client and type registry an entity resolves against.
///
/// Cheap to clone: both halves are reference counted.
#[derive(Clone)]
pub struct Session {
    client: Arc<dyn RemoteClient>,
    registry: Arc<TypeRegistry>,
}

impl Session {
    pub fn new(client: Arc<dyn RemoteClient>, registry: Arc<TypeRegistry>) -> Self {
        Self { client, registry }
    }

    pub fn client(&self) -> &dyn RemoteClient {
        self.client.as_ref()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Same registry, different client.
    pub fn with_client(&self, client: Arc<dyn RemoteClient>) -> Self {
        Self {
            client,
            registry: self.registry.clone(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Renders an id the way it appears inside a request path.
pub fn id_segment(id: &Value) -> String {
    match id {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
