//! # Type Registry
//!
//! Maps canonical type names (`Board`, `CustomField`) to constructors. Relationship resolution
//! looks target types up here; the gateway never does, it already knows its own type.
//!
//! Populate it once at startup, then share it through a [`Session`].

use crate::framework::client::{FieldMap, Params, Session};
use crate::framework::entity::{AnyEntity, Entity};
use crate::framework::error::EntityError;
use crate::framework::inflect;
use indexmap::IndexMap;
use serde_json::Value;
use std::any::TypeId;
use std::fmt;

type Constructor = fn(&Session, &FieldMap) -> Result<Box<dyn AnyEntity>, EntityError>;

fn construct<T: Entity>(session: &Session, fields: &FieldMap) -> Result<Box<dyn AnyEntity>, EntityError> {
    Ok(Box::new(T::new(session, fields)?))
}

/// A registered entity type.
#[derive(Clone)]
pub struct EntityType {
    name: &'static str,
    path_name: String,
    type_id: TypeId,
    construct: Constructor,
}

impl EntityType {
    pub fn of<T: Entity>() -> Self {
        let name = T::schema().type_name();
        Self {
            name,
            path_name: inflect::underscore(name),
            type_id: TypeId::of::<T>(),
            construct: construct::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resource path name, e.g. `custom_field`.
    pub fn path_name(&self) -> &str {
        &self.path_name
    }

    pub fn is<T: Entity>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn build(&self, session: &Session, fields: &FieldMap) -> Result<Box<dyn AnyEntity>, EntityError> {
        (self.construct)(session, fields)
    }

    /// The type's own find-by-id.
    pub fn find(&self, session: &Session, id: &Value, params: &Params) -> Result<Box<dyn AnyEntity>, EntityError> {
        let fields = session.client().find(&self.path_name, id, params)?;
        self.build(session, &fields)
    }
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityType")
            .field("name", &self.name)
            .field("path_name", &self.path_name)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<&'static str, EntityType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its schema's type name. Registering twice replaces the entry.
    pub fn register<T: Entity>(&mut self) -> &mut Self {
        let entry = EntityType::of::<T>();
        self.types.insert(entry.name, entry);
        self
    }

    pub fn with<T: Entity>(mut self) -> Self {
        self.register::<T>();
        self
    }

    pub fn resolve(&self, name: &str) -> Result<&EntityType, EntityError> {
        self.types
            .get(name)
            .ok_or_else(|| EntityError::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::entity::{downcast, BasicData};
    use crate::framework::error::ClientError;
    use crate::framework::mock::{fields, MockClient};
    use crate::framework::schema::Schema;
    use once_cell::sync::Lazy;
    use serde_json::json;
    use std::sync::Arc;

    static CUSTOM_FIELD: Lazy<Schema> =
        Lazy::new(|| Schema::builder("CustomField").attributes(["name"]).build());

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct CustomField {
        data: BasicData,
    }

    impl Entity for CustomField {
        fn schema() -> &'static Schema {
            &CUSTOM_FIELD
        }
        fn from_data(data: BasicData) -> Self {
            Self { data }
        }
        fn data(&self) -> &BasicData {
            &self.data
        }
        fn data_mut(&mut self) -> &mut BasicData {
            &mut self.data
        }
        fn update_fields(&mut self, fields: &FieldMap) -> Result<(), EntityError> {
            self.data.attributes_mut().populate_from(fields);
            Ok(())
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = TypeRegistry::new().with::<CustomField>();
        let entry = registry.resolve("CustomField").unwrap();

        assert_eq!(entry.name(), "CustomField");
        assert_eq!(entry.path_name(), "custom_field");
        assert!(entry.is::<CustomField>());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["CustomField"]);
    }

    #[test]
    fn test_unknown_type() {
        let registry = TypeRegistry::new();
        assert_eq!(
            registry.resolve("Ghost").unwrap_err(),
            EntityError::UnknownType("Ghost".to_string())
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_find_uses_path_name_and_builds_entity() {
        let mut mock = MockClient::new();
        mock.expect_find("custom_field", "cf1")
            .return_ok(fields(json!({ "id": "cf1", "name": "Priority" })));
        let registry = Arc::new(TypeRegistry::new().with::<CustomField>());
        let session = Session::new(mock.client(), registry.clone());

        let found = registry
            .resolve("CustomField")
            .unwrap()
            .find(&session, &json!("cf1"), &Params::new())
            .unwrap();
        let field = downcast::<CustomField>(found).unwrap();

        assert_eq!(field.get_str("name"), Some("Priority"));
        mock.verify();
    }

    #[test]
    fn test_find_propagates_client_error() {
        let mut mock = MockClient::new();
        mock.expect_find("custom_field", "cf1")
            .return_err(ClientError::NotFound("cf1".into()));
        let registry = Arc::new(TypeRegistry::new().with::<CustomField>());
        let session = Session::new(mock.client(), registry.clone());

        let err = registry
            .resolve("CustomField")
            .unwrap()
            .find(&session, &json!("cf1"), &Params::new())
            .unwrap_err();
        assert_eq!(err, EntityError::Client(ClientError::NotFound("cf1".into())));
    }
}
