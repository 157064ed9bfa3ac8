//! # In-memory Client
//!
//! [`InMemoryClient`] answers every [`RemoteClient`] request from a store held in memory, keyed
//! by path name and then by id. It follows the conventions the framework generates requests
//! with, so entities behave against it the way they would against a real server:
//!
//! - `find(path_name, id)` reads `store[path_name][id]`.
//! - `find_at("/lists", id)` and `find_at("/boards/b1/lists", id)` read `store["list"][id]`:
//!   only the last path segment names the store.
//! - `find_many(target, "/boards/b1/cards", params)` returns the `target` resources whose
//!   `board_id` is `b1` (or whose `board_ids` contains `b1`), filtered by `params` equality.
//!   The relationship segment (`cards`) is not consulted: two relationships of one owner with
//!   the same target type see the same rows unless their params tell them apart (`filter=open`
//!   keeps resources whose `closed` is not `true`).
//! - `create` assigns ids `"{path_name}_{n}"`; `update` merges fields.

use crate::framework::client::id_segment;
use crate::framework::inflect;
use crate::framework::{ClientError, FieldMap, Params, RemoteClient};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

type Store = HashMap<String, IndexMap<String, FieldMap>>;

#[derive(Debug, Default)]
pub struct InMemoryClient {
    store: Mutex<Store>,
    next_id: Mutex<u64>,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a resource. An `id` is assigned when `fields` has none.
    pub fn insert(&self, path_name: &str, mut fields: FieldMap) -> Value {
        let id = fields.get("id").cloned().unwrap_or(Value::Null);
        let id = if id.is_null() {
            let id = Value::String(self.next_id(path_name));
            fields.insert("id".into(), id.clone());
            id
        } else {
            id
        };
        self.lock()
            .entry(path_name.to_string())
            .or_default()
            .insert(id_segment(&id), fields);
        id
    }

    /// Number of stored resources under `path_name`.
    pub fn len(&self, path_name: &str) -> usize {
        self.lock().get(path_name).map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().values().all(IndexMap::is_empty)
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next_id(&self, path_name: &str) -> String {
        let mut next = self.next_id.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *next += 1;
        format!("{}_{}", path_name, *next)
    }
}

fn not_found(path_name: &str, id: &str) -> ClientError {
    ClientError::NotFound(format!("{path_name}/{id}"))
}

/// Whether `fields` points at the owner through `{singular}_id` or the `{singular}_ids` list.
fn owned_by(fields: &FieldMap, singular: &str, owner_id: &str) -> bool {
    let key = format!("{singular}_id");
    if fields.get(&key).is_some_and(|value| id_segment(value) == owner_id) {
        return true;
    }
    let list = format!("{singular}_ids");
    match fields.get(&list) {
        Some(Value::Array(ids)) => ids.iter().any(|value| id_segment(value) == owner_id),
        _ => false,
    }
}

fn matches_params(fields: &FieldMap, params: &Params) -> bool {
    params.iter().all(|(key, expected)| {
        fields
            .get(key)
            .is_some_and(|value| id_segment(value) == *expected)
    })
}

impl RemoteClient for InMemoryClient {
    fn find(&self, path_name: &str, id: &Value, _params: &Params) -> Result<FieldMap, ClientError> {
        let key = id_segment(id);
        debug!(entity_type = path_name, id = %key, "Find");
        let store = self.lock();
        match store.get(path_name).and_then(|rows| rows.get(&key)) {
            Some(fields) => Ok(fields.clone()),
            None => {
                warn!(entity_type = path_name, id = %key, "Not found");
                Err(not_found(path_name, &key))
            }
        }
    }

    fn find_at(&self, path: &str, id: &Value, params: &Params) -> Result<FieldMap, ClientError> {
        let last = path.trim_matches('/').rsplit('/').next().unwrap_or_default();
        let path_name = inflect::singularize(last);
        self.find(&path_name, id, params)
    }

    fn find_many(&self, target_type: &str, path: &str, params: &Params) -> Result<Vec<FieldMap>, ClientError> {
        debug!(entity_type = target_type, %path, ?params, "FindMany");
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let [owning, owner_id, _relation] = segments.as_slice() else {
            warn!(%path, "Unsupported path");
            return Err(ClientError::Rejected(format!("unsupported path {path}")));
        };
        let singular = inflect::singularize(owning);
        let path_name = inflect::underscore(target_type);
        let filters: Params = params
            .iter()
            .filter(|(key, _)| key.as_str() != "filter")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let open_only = params.get("filter").is_some_and(|f| f == "open");

        let store = self.lock();
        let found: Vec<FieldMap> = store
            .get(&path_name)
            .into_iter()
            .flat_map(IndexMap::values)
            .filter(|fields| owned_by(fields, &singular, owner_id))
            .filter(|fields| matches_params(fields, &filters))
            .filter(|fields| !open_only || !fields.get("closed").is_some_and(|c| c == &Value::Bool(true)))
            .cloned()
            .collect();
        info!(entity_type = target_type, %path, size = found.len(), "Found");
        Ok(found)
    }

    fn create(&self, path_name: &str, options: &FieldMap) -> Result<Value, ClientError> {
        let mut fields = options.clone();
        fields.remove("id");
        let id = self.insert(path_name, fields.clone());
        fields.insert("id".into(), id.clone());
        info!(entity_type = path_name, id = %id_segment(&id), size = self.len(path_name), "Created");
        Ok(Value::Object(fields))
    }

    fn update(&self, path_name: &str, id: &Value, fields: &FieldMap) -> Result<Value, ClientError> {
        let key = id_segment(id);
        let mut store = self.lock();
        let Some(stored) = store.get_mut(path_name).and_then(|rows| rows.get_mut(&key)) else {
            warn!(entity_type = path_name, id = %key, "Update of missing resource");
            return Err(not_found(path_name, &key));
        };
        for (name, value) in fields {
            stored.insert(name.clone(), value.clone());
        }
        info!(entity_type = path_name, id = %key, changed = fields.len(), "Updated");
        Ok(Value::Object(stored.clone()))
    }
}
