//! # Entity Trait
//!
//! The [`Entity`] trait is the contract every concrete resource type (Board, Card, Member, …)
//! implements. A type provides its [`Schema`], wraps a [`BasicData`], and fills attributes from a
//! field map in [`Entity::update_fields`]. Everything else (attribute access, change tracking,
//! identity, the gateway in [`Gateway`](crate::framework::Gateway) and relationship resolution in
//! [`Relations`](crate::framework::Relations)) is provided.
//!
//! # Identity
//! Two entities are equal when they are of the same concrete type and carry the same `id`.
//! Entities without an id therefore compare equal to every other unsaved entity of their type.
//! [`BasicData`] implements `PartialEq`, `Eq` and `Hash` that way, so concrete types simply
//! derive them.

use crate::framework::attributes::Attributes;
use crate::framework::client::{FieldMap, RemoteClient, Session};
use crate::framework::error::EntityError;
use crate::framework::gateway;
use crate::framework::schema::{Schema, ID};
use serde_json::Value;
use std::any::Any;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

static NULL: Value = Value::Null;

/// Identity of an entity across concrete types: `(type name, id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityKey {
    pub type_name: &'static str,
    pub id: Value,
}

impl Hash for EntityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        hash_value(&self.id, state);
    }
}

/// Hash consistent with `Value`'s `==`: `0.0` and `-0.0` are equal, so they hash alike.
fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Null => 0u8.hash(state),
        Value::Bool(b) => {
            1u8.hash(state);
            b.hash(state);
        }
        Value::Number(n) => {
            2u8.hash(state);
            match n.as_f64() {
                Some(f) if n.is_f64() => {
                    // -0.0 == 0.0
                    let f = if f == 0.0 { 0.0 } else { f };
                    f.to_bits().hash(state);
                }
                _ => n.to_string().hash(state),
            }
        }
        Value::String(s) => {
            3u8.hash(state);
            s.hash(state);
        }
        Value::Array(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        // key order may differ between equal maps
        Value::Object(map) => {
            5u8.hash(state);
            map.len().hash(state);
        }
    }
}

/// State shared by every entity: its attributes and the session it resolves against.
#[derive(Debug, Clone)]
pub struct BasicData {
    attributes: Attributes,
    session: Session,
}

impl BasicData {
    pub fn new(schema: &'static Schema, session: Session) -> Self {
        Self {
            attributes: Attributes::new(schema),
            session,
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.attributes.schema()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Use `client` for this instance's own calls. Other instances are unaffected.
    pub fn set_client(&mut self, client: Arc<dyn RemoteClient>) {
        self.session = self.session.with_client(client);
    }

    pub fn id(&self) -> &Value {
        self.attributes.get(ID).unwrap_or(&NULL)
    }

    pub fn key(&self) -> EntityKey {
        EntityKey {
            type_name: self.schema().type_name(),
            id: self.id().clone(),
        }
    }
}

impl PartialEq for BasicData {
    fn eq(&self, other: &Self) -> bool {
        self.schema().type_name() == other.schema().type_name() && self.id() == other.id()
    }
}

impl Eq for BasicData {}

impl Hash for BasicData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Trait that any remote resource type must implement.
///
/// # Example
/// ```rust
/// use entity_recipe::framework::{BasicData, Entity, EntityError, FieldMap, Schema};
/// use once_cell::sync::Lazy;
///
/// static LABEL: Lazy<Schema> = Lazy::new(|| {
///     Schema::builder("Label").attributes(["name", "color"]).build()
/// });
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct Label {
///     data: BasicData,
/// }
///
/// impl Entity for Label {
///     fn schema() -> &'static Schema { &LABEL }
///     fn from_data(data: BasicData) -> Self { Self { data } }
///     fn data(&self) -> &BasicData { &self.data }
///     fn data_mut(&mut self) -> &mut BasicData { &mut self.data }
///
///     fn update_fields(&mut self, fields: &FieldMap) -> Result<(), EntityError> {
///         self.data.attributes_mut().populate_from(fields);
///         Ok(())
///     }
/// }
/// ```
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// The declared shape of this type. Shared by all instances.
    fn schema() -> &'static Schema;

    /// Wrap freshly initialised state. Called by [`Entity::new`] before `update_fields`.
    fn from_data(data: BasicData) -> Self;

    fn data(&self) -> &BasicData;

    fn data_mut(&mut self) -> &mut BasicData;

    /// Copy values out of a field map into this instance's attributes.
    ///
    /// This is the one required extension point. It runs on construction and after the server
    /// answers a save. Implementations write with
    /// [`Attributes::populate`](crate::framework::Attributes::populate), which is allowed to
    /// assign `id` and other readonly attributes.
    fn update_fields(&mut self, fields: &FieldMap) -> Result<(), EntityError> {
        let _ = fields;
        Err(EntityError::NotImplemented {
            type_name: Self::schema().type_name(),
        })
    }

    /// Send this instance to the remote side: create it when it has no id, otherwise send its
    /// changed attributes. Change tracking is reset on success.
    fn persist(&mut self) -> Result<(), EntityError> {
        gateway::persist(self)
    }

    /// Build an instance bound to `session` from a field map.
    fn new(session: &Session, fields: &FieldMap) -> Result<Self, EntityError> {
        let mut entity = Self::from_data(BasicData::new(Self::schema(), session.clone()));
        entity.update_fields(fields)?;
        Ok(entity)
    }

    fn id(&self) -> &Value {
        self.data().id()
    }

    fn key(&self) -> EntityKey {
        self.data().key()
    }

    fn session(&self) -> &Session {
        self.data().session()
    }

    fn set_client(&mut self, client: Arc<dyn RemoteClient>) {
        self.data_mut().set_client(client);
    }

    fn attributes(&self) -> &Attributes {
        self.data().attributes()
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        self.data_mut().attributes_mut()
    }

    fn get(&self, name: &str) -> Result<&Value, EntityError> {
        self.attributes().get(name)
    }

    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<bool, EntityError> {
        self.attributes_mut().set(name, value)
    }

    fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).ok().and_then(Value::as_str)
    }

    fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).ok().and_then(Value::as_bool)
    }

    fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).ok().and_then(Value::as_i64)
    }

    fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).ok().and_then(Value::as_f64)
    }
}

/// Object-safe view of an [`Entity`], as produced by the [`TypeRegistry`](crate::framework::TypeRegistry).
pub trait AnyEntity: Debug + Send + Sync {
    fn type_name(&self) -> &'static str;
    fn dyn_key(&self) -> EntityKey;
    fn dyn_data(&self) -> &BasicData;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Entity> AnyEntity for T {
    fn type_name(&self) -> &'static str {
        T::schema().type_name()
    }

    fn dyn_key(&self) -> EntityKey {
        self.key()
    }

    fn dyn_data(&self) -> &BasicData {
        self.data()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Recover the concrete type behind a registry-built entity.
pub fn downcast<T: Entity>(entity: Box<dyn AnyEntity>) -> Result<T, EntityError> {
    let found = entity.type_name();
    entity
        .into_any()
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| EntityError::TypeMismatch {
            expected: T::schema().type_name(),
            found,
        })
}
