//! # Remote Gateway
//!
//! Type-level operations that turn domain requests into [`RemoteClient`](crate::framework::RemoteClient)
//! calls. [`Gateway`] is implemented for every [`Entity`]; bring it into scope and call
//! `Board::find(&session, "b1", &Params::new())`.
//!
//! Client failures come back as `EntityError::Client` with the client's own error inside,
//! untouched. Nothing here retries, caches or logs-and-swallows.

use crate::framework::client::{FieldMap, Params, Session};
use crate::framework::entity::Entity;
use crate::framework::error::EntityError;
use crate::framework::{inflect, json};
use serde_json::Value;
use tracing::{debug, instrument};

pub trait Gateway: Entity {
    /// Resource path name: the underscored type name, e.g. `custom_field`.
    fn path_name() -> String {
        inflect::underscore(Self::schema().type_name())
    }

    /// Fetch one resource by id.
    #[instrument(skip_all, fields(entity_type = Self::schema().type_name()))]
    fn find(session: &Session, id: impl Into<Value>, params: &Params) -> Result<Self, EntityError> {
        let id = id.into();
        debug!(%id, "Sending request");
        let fields = session.client().find(&Self::path_name(), &id, params)?;
        Self::new(session, &fields)
    }

    /// Create a resource and return the server's raw answer.
    #[instrument(skip_all, fields(entity_type = Self::schema().type_name()))]
    fn create(session: &Session, options: &FieldMap) -> Result<Value, EntityError> {
        debug!(?options, "Sending request");
        Ok(session.client().create(&Self::path_name(), options)?)
    }

    /// Build an instance from `options` and persist it.
    fn save(session: &Session, options: &FieldMap) -> Result<Self, EntityError> {
        Self::save_with(session, options, |_| {})
    }

    /// Build an instance from `options`, let `finalize` adjust it, then persist it.
    #[instrument(skip_all, fields(entity_type = Self::schema().type_name()))]
    fn save_with<F>(session: &Session, options: &FieldMap, finalize: F) -> Result<Self, EntityError>
    where
        F: FnOnce(&mut Self),
    {
        let mut entity = Self::new(session, options)?;
        finalize(&mut entity);
        entity.persist()?;
        Ok(entity)
    }

    /// Build one instance from a raw JSON object.
    fn parse(session: &Session, raw: &str) -> Result<Self, EntityError> {
        Self::parse_with(session, raw, |_| {})
    }

    fn parse_with<F>(session: &Session, raw: &str, finalize: F) -> Result<Self, EntityError>
    where
        F: FnOnce(&mut Self),
    {
        let fields = json::from_response(raw)?;
        let mut entity = Self::new(session, &fields)?;
        finalize(&mut entity);
        Ok(entity)
    }

    /// Build one instance per object of a raw JSON array, in response order.
    fn parse_many(session: &Session, raw: &str) -> Result<Vec<Self>, EntityError> {
        Self::parse_many_with(session, raw, |_| {})
    }

    fn parse_many_with<F>(session: &Session, raw: &str, mut finalize: F) -> Result<Vec<Self>, EntityError>
    where
        F: FnMut(&mut Self),
    {
        json::from_response_many(raw)?
            .iter()
            .map(|fields| {
                let mut entity = Self::new(session, fields)?;
                finalize(&mut entity);
                Ok(entity)
            })
            .collect()
    }

    /// Fetch the current server state of this resource as a new instance.
    fn refresh(&self) -> Result<Self, EntityError> {
        Self::find(self.session(), self.id().clone(), &Params::new())
    }
}

impl<T: Entity> Gateway for T {}

/// Default body of [`Entity::persist`].
#[instrument(skip_all, fields(entity_type = T::schema().type_name()))]
pub fn persist<T: Entity>(entity: &mut T) -> Result<(), EntityError> {
    let path_name = <T as Gateway>::path_name();

    let answer = if entity.id().is_null() {
        let fields = entity.attributes().present_fields();
        debug!(?fields, "Creating");
        entity.session().client().create(&path_name, &fields)?
    } else if !entity.attributes().has_changes() {
        debug!(id = %entity.id(), "Nothing to save");
        return Ok(());
    } else {
        let fields = entity.attributes().changed_fields();
        debug!(id = %entity.id(), ?fields, "Updating");
        entity
            .session()
            .client()
            .update(&path_name, entity.id(), &fields)?
    };

    if let Value::Object(echo) = answer {
        entity.update_fields(&echo)?;
    }
    entity.attributes_mut().clear_changes();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::entity::BasicData;
    use crate::framework::error::ClientError;
    use crate::framework::mock::{fields, MockClient};
    use crate::framework::registry::TypeRegistry;
    use crate::framework::schema::Schema;
    use once_cell::sync::Lazy;
    use serde_json::json;
    use std::sync::Arc;

    static TASK_LIST: Lazy<Schema> = Lazy::new(|| {
        Schema::builder("TaskList")
            .attributes(["name", "closed"])
            .build()
    });

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct TaskList {
        data: BasicData,
    }

    impl Entity for TaskList {
        fn schema() -> &'static Schema {
            &TASK_LIST
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

    fn session(mock: &MockClient) -> Session {
        Session::new(mock.client(), Arc::new(TypeRegistry::new()))
    }

    #[test]
    fn test_path_name_is_underscored_type_name() {
        assert_eq!(TaskList::path_name(), "task_list");
    }

    #[test]
    fn test_find_builds_instance() {
        let mut mock = MockClient::new();
        mock.expect_find("task_list", "t1")
            .return_ok(fields(json!({ "id": "t1", "name": "Todo" })));

        let list = TaskList::find(&session(&mock), "t1", &Params::new()).unwrap();
        assert_eq!(list.id(), &json!("t1"));
        assert_eq!(list.get_str("name"), Some("Todo"));
        mock.verify();
    }

    #[test]
    fn test_find_passes_params_through() {
        let mut mock = MockClient::new();
        mock.expect_find("task_list", "t1")
            .return_ok(fields(json!({ "id": "t1" })));
        let params = Params::from([("fields".to_string(), "name".to_string())]);

        TaskList::find(&session(&mock), "t1", &params).unwrap();
        assert!(matches!(
            &mock.calls()[0],
            crate::framework::mock::Call::Find { params: p, .. } if *p == params
        ));
    }

    #[test]
    fn test_find_propagates_client_error_unchanged() {
        let mut mock = MockClient::new();
        let failure = ClientError::Http {
            status: 401,
            message: "invalid token".into(),
        };
        mock.expect_find("task_list", "t1").return_err(failure.clone());

        let err = TaskList::find(&session(&mock), "t1", &Params::new()).unwrap_err();
        assert_eq!(err, EntityError::Client(failure));
    }

    #[test]
    fn test_create_returns_raw_answer() {
        let mut mock = MockClient::new();
        mock.expect_create("task_list")
            .return_ok(json!({ "id": "t9", "name": "New" }));

        let raw = TaskList::create(&session(&mock), &fields(json!({ "name": "New" }))).unwrap();
        assert_eq!(raw, json!({ "id": "t9", "name": "New" }));
    }

    #[test]
    fn test_create_propagates_client_error_unchanged() {
        let mut mock = MockClient::new();
        mock.expect_create("task_list")
            .return_err(ClientError::Transport("connection reset".into()));

        let err = TaskList::create(&session(&mock), &FieldMap::new()).unwrap_err();
        assert_eq!(
            err,
            EntityError::Client(ClientError::Transport("connection reset".into()))
        );
    }

    #[test]
    fn test_save_with_runs_finalize_before_persisting() {
        let mut mock = MockClient::new();
        mock.expect_create("task_list")
            .return_ok(json!({ "id": "t2", "name": "Doing", "closed": false }));

        let list = TaskList::save_with(&session(&mock), &fields(json!({ "name": "Doing" })), |l| {
            l.set("closed", false).unwrap();
        })
        .unwrap();

        assert_eq!(list.id(), &json!("t2"));
        assert!(!list.attributes().has_changes());
        match &mock.calls()[0] {
            crate::framework::mock::Call::Create { options, .. } => {
                assert_eq!(options, &fields(json!({ "name": "Doing", "closed": false })));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_persist_updates_only_changed_fields() {
        let mut mock = MockClient::new();
        mock.expect_update("task_list", "t1").return_ok(Value::Null);

        let mut list =
            TaskList::new(&session(&mock), &fields(json!({ "id": "t1", "name": "A" }))).unwrap();
        list.set("name", "B").unwrap();
        list.persist().unwrap();

        assert!(!list.attributes().has_changes());
        assert_eq!(
            mock.calls()[0],
            crate::framework::mock::Call::Update {
                path_name: "task_list".into(),
                id: json!("t1"),
                fields: fields(json!({ "name": "B" })),
            }
        );
    }

    #[test]
    fn test_persist_clean_persisted_instance_is_noop() {
        let mock = MockClient::new();
        let mut list = TaskList::new(&session(&mock), &fields(json!({ "id": "t1" }))).unwrap();
        list.persist().unwrap();
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_persist_failure_keeps_changes() {
        let mut mock = MockClient::new();
        mock.expect_update("task_list", "t1")
            .return_err(ClientError::Rejected("closed board".into()));

        let mut list = TaskList::new(&session(&mock), &fields(json!({ "id": "t1" }))).unwrap();
        list.set("name", "B").unwrap();
        assert!(list.persist().is_err());
        assert!(list.attributes().is_changed("name"));
    }

    #[test]
    fn test_parse_with_finalize() {
        let mock = MockClient::new();
        let list = TaskList::parse_with(&session(&mock), r#"{"id":"t1","name":"Todo"}"#, |l| {
            l.set("closed", true).unwrap();
        })
        .unwrap();

        assert_eq!(list.get_bool("closed"), Some(true));
        assert!(list.attributes().is_changed("closed"));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_parse_many_preserves_order_and_finalizes_each() {
        let mock = MockClient::new();
        let raw = r#"[{"id":"r1"},{"id":"r2"},{"id":"r3"}]"#;
        let mut seen = Vec::new();

        let lists = TaskList::parse_many_with(&session(&mock), raw, |l| {
            seen.push(l.id().clone());
        })
        .unwrap();

        let ids: Vec<_> = lists.iter().map(|l| l.id().clone()).collect();
        assert_eq!(ids, vec![json!("r1"), json!("r2"), json!("r3")]);
        assert_eq!(seen, ids);
    }

    #[test]
    fn test_parse_rejects_malformed_response() {
        let mock = MockClient::new();
        let err = TaskList::parse(&session(&mock), "[]").unwrap_err();
        assert!(matches!(err, EntityError::Deserialization(_)));

        let err = TaskList::parse_many(&session(&mock), r#"{"id":"r1"}"#).unwrap_err();
        assert!(matches!(err, EntityError::Deserialization(_)));
    }

    #[test]
    fn test_refresh_returns_new_instance_without_mutating() {
        let mut mock = MockClient::new();
        mock.expect_find("task_list", "t1")
            .return_ok(fields(json!({ "id": "t1", "name": "Server" })));

        let mut local =
            TaskList::new(&session(&mock), &fields(json!({ "id": "t1", "name": "Local" }))).unwrap();
        local.set("closed", true).unwrap();
        let fresh = local.refresh().unwrap();

        assert_eq!(fresh.get_str("name"), Some("Server"));
        assert_eq!(local.get_str("name"), Some("Local"));
        assert!(local.attributes().is_changed("closed"));
        assert_eq!(fresh, local);
    }

    #[test]
    fn test_refresh_uses_instance_client_override() {
        let shared = MockClient::new();
        let mut own = MockClient::new();
        own.expect_find("task_list", "t1")
            .return_ok(fields(json!({ "id": "t1" })));

        let mut list = TaskList::new(&session(&shared), &fields(json!({ "id": "t1" }))).unwrap();
        list.set_client(own.client());
        list.refresh().unwrap();

        assert_eq!(shared.call_count(), 0);
        assert_eq!(own.call_count(), 1);
    }
}
