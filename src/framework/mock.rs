//! # Mock Client & Testing Guide
//!
//! [`MockClient`] implements [`RemoteClient`] entirely in memory. Queue the requests you expect
//! together with the answers to give, hand the client to a [`Session`](crate::framework::Session),
//! and run the code under test. Every request is recorded, so tests can also count calls.
//!
//! ## When to use the mock vs the in-memory client
//!
//! | Feature | MockClient | InMemoryClient |
//! |---------|------------|----------------|
//! | **State** | None (scripted answers) | Real store |
//! | **Request shape checks** | Exact (path, id, params) | No |
//! | **Error injection** | Easy (`return_err`) | Only not-found |
//! | **Use case** | Unit-testing resolution and gateway logic | End-to-end flows |
//!
//! ## Example
//! ```rust
//! use entity_recipe::framework::mock::{fields, MockClient};
//! use entity_recipe::framework::RemoteClient;
//! use serde_json::json;
//!
//! let mut mock = MockClient::new();
//! mock.expect_find("board", "b1").return_ok(fields(json!({ "id": "b1" })));
//!
//! let client = mock.client();
//! let found = client.find("board", &json!("b1"), &Default::default()).unwrap();
//! assert_eq!(found["id"], json!("b1"));
//!
//! assert_eq!(mock.call_count(), 1);
//! mock.verify(); // Ensures all expectations were met
//! ```
//!
//! A request that does not match the next expectation panics, failing the test at the call
//! site.

use crate::framework::client::{FieldMap, Params, RemoteClient};
use crate::framework::error::ClientError;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// A request received by the mock, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Find {
        path_name: String,
        id: Value,
        params: Params,
    },
    FindAt {
        path: String,
        id: Value,
        params: Params,
    },
    FindMany {
        target_type: String,
        path: String,
        params: Params,
    },
    Create {
        path_name: String,
        options: FieldMap,
    },
    Update {
        path_name: String,
        id: Value,
        fields: FieldMap,
    },
}

enum Response {
    One(Result<FieldMap, ClientError>),
    Many(Result<Vec<FieldMap>, ClientError>),
    Raw(Result<Value, ClientError>),
}

/// What the next request must look like, and how to answer it.
struct Expectation {
    matches: Box<dyn Fn(&Call) -> bool + Send>,
    description: String,
    response: Response,
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A scripted [`RemoteClient`] with expectation tracking.
///
/// Cloning shares the expectation queue and call log.
#[derive(Clone, Default)]
pub struct MockClient {
    expectations: Queue,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockClient {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the client for use in a session.
    pub fn client(&self) -> Arc<dyn RemoteClient> {
        Arc::new(self.clone())
    }

    /// Expects `find(path_name, id, _)`.
    pub fn expect_find(&mut self, path_name: &str, id: impl Into<Value>) -> ExpectationBuilder<FieldMap> {
        let (path_name, id) = (path_name.to_string(), id.into());
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            description: format!("find({path_name}, {id})"),
            matches: Box::new(move |call| {
                matches!(call, Call::Find { path_name: p, id: i, .. } if *p == path_name && *i == id)
            }),
            wrap: Response::One,
        }
    }

    /// Expects `find_at(path, id, _)`.
    pub fn expect_find_at(&mut self, path: &str, id: impl Into<Value>) -> ExpectationBuilder<FieldMap> {
        let (path, id) = (path.to_string(), id.into());
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            description: format!("find_at({path}, {id})"),
            matches: Box::new(move |call| {
                matches!(call, Call::FindAt { path: p, id: i, .. } if *p == path && *i == id)
            }),
            wrap: Response::One,
        }
    }

    /// Expects `find_many(target_type, path, params)` with exactly these params.
    pub fn expect_find_many(
        &mut self,
        target_type: &str,
        path: &str,
        params: Params,
    ) -> ExpectationBuilder<Vec<FieldMap>> {
        let (target_type, path) = (target_type.to_string(), path.to_string());
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            description: format!("find_many({target_type}, {path}, {params:?})"),
            matches: Box::new(move |call| {
                matches!(call, Call::FindMany { target_type: t, path: p, params: q }
                    if *t == target_type && *p == path && *q == params)
            }),
            wrap: Response::Many,
        }
    }

    /// Expects `create(path_name, _)`.
    pub fn expect_create(&mut self, path_name: &str) -> ExpectationBuilder<Value> {
        let path_name = path_name.to_string();
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            description: format!("create({path_name})"),
            matches: Box::new(move |call| {
                matches!(call, Call::Create { path_name: p, .. } if *p == path_name)
            }),
            wrap: Response::Raw,
        }
    }

    /// Expects `update(path_name, id, _)`.
    pub fn expect_update(&mut self, path_name: &str, id: impl Into<Value>) -> ExpectationBuilder<Value> {
        let (path_name, id) = (path_name.to_string(), id.into());
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            description: format!("update({path_name}, {id})"),
            matches: Box::new(move |call| {
                matches!(call, Call::Update { path_name: p, id: i, .. } if *p == path_name && *i == id)
            }),
            wrap: Response::Raw,
        }
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = lock(&self.expectations);
        if !exps.is_empty() {
            let pending: Vec<_> = exps.iter().map(|e| e.description.as_str()).collect();
            panic!("Not all expectations were met. {} remaining: {:?}", exps.len(), pending);
        }
    }

    fn answer(&self, call: Call) -> Response {
        lock(&self.calls).push(call.clone());
        let expectation = lock(&self.expectations).pop_front();
        match expectation {
            Some(exp) if (exp.matches)(&call) => exp.response,
            Some(exp) => panic!("Unexpected request {call:?}, expected {}", exp.description),
            None => panic!("Unexpected request {call:?}, no expectations left"),
        }
    }
}

impl RemoteClient for MockClient {
    fn find(&self, path_name: &str, id: &Value, params: &Params) -> Result<FieldMap, ClientError> {
        let call = Call::Find {
            path_name: path_name.to_string(),
            id: id.clone(),
            params: params.clone(),
        };
        match self.answer(call) {
            Response::One(result) => result,
            _ => panic!("Expectation for find answered with the wrong response kind"),
        }
    }

    fn find_at(&self, path: &str, id: &Value, params: &Params) -> Result<FieldMap, ClientError> {
        let call = Call::FindAt {
            path: path.to_string(),
            id: id.clone(),
            params: params.clone(),
        };
        match self.answer(call) {
            Response::One(result) => result,
            _ => panic!("Expectation for find_at answered with the wrong response kind"),
        }
    }

    fn find_many(&self, target_type: &str, path: &str, params: &Params) -> Result<Vec<FieldMap>, ClientError> {
        let call = Call::FindMany {
            target_type: target_type.to_string(),
            path: path.to_string(),
            params: params.clone(),
        };
        match self.answer(call) {
            Response::Many(result) => result,
            _ => panic!("Expectation for find_many answered with the wrong response kind"),
        }
    }

    fn create(&self, path_name: &str, options: &FieldMap) -> Result<Value, ClientError> {
        let call = Call::Create {
            path_name: path_name.to_string(),
            options: options.clone(),
        };
        match self.answer(call) {
            Response::Raw(result) => result,
            _ => panic!("Expectation for create answered with the wrong response kind"),
        }
    }

    fn update(&self, path_name: &str, id: &Value, fields: &FieldMap) -> Result<Value, ClientError> {
        let call = Call::Update {
            path_name: path_name.to_string(),
            id: id.clone(),
            fields: fields.clone(),
        };
        match self.answer(call) {
            Response::Raw(result) => result,
            _ => panic!("Expectation for update answered with the wrong response kind"),
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<R> {
    expectations: Queue,
    description: String,
    matches: Box<dyn Fn(&Call) -> bool + Send>,
    wrap: fn(Result<R, ClientError>) -> Response,
}

impl<R> ExpectationBuilder<R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ClientError) {
        self.push(Err(error));
    }

    fn push(self, result: Result<R, ClientError>) {
        lock(&self.expectations).push_back(Expectation {
            matches: self.matches,
            description: self.description,
            response: (self.wrap)(result),
        });
    }
}

/// Turns a `json!({...})` object into a [`FieldMap`].
///
/// # Panics
/// When `value` is not a JSON object.
pub fn fields(value: Value) -> FieldMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mock_client_with_expectations() {
        let mut mock = MockClient::new();
        mock.expect_create("card").return_ok(json!({ "id": "c1" }));
        mock.expect_find("card", "c1")
            .return_ok(fields(json!({ "id": "c1", "name": "Test" })));

        let client = mock.client();
        let created = client
            .create("card", &fields(json!({ "name": "Test" })))
            .unwrap();
        assert_eq!(created["id"], json!("c1"));

        let fetched = client.find("card", &json!("c1"), &Params::new()).unwrap();
        assert_eq!(fetched["name"], json!("Test"));

        mock.verify();
        assert_eq!(mock.call_count(), 2);
        assert_eq!(
            mock.calls()[0],
            Call::Create {
                path_name: "card".into(),
                options: fields(json!({ "name": "Test" }))
            }
        );
    }

    #[test]
    fn test_return_err_passes_error_through() {
        let mut mock = MockClient::new();
        mock.expect_find_many("Card", "/boards/b1/cards", Params::new())
            .return_err(ClientError::Http {
                status: 500,
                message: "boom".into(),
            });

        let err = mock
            .client()
            .find_many("Card", "/boards/b1/cards", &Params::new())
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::Http {
                status: 500,
                message: "boom".into()
            }
        );
    }

    #[test]
    #[should_panic(expected = "Unexpected request")]
    fn test_mismatched_request_panics() {
        let mut mock = MockClient::new();
        mock.expect_find("card", "c1").return_ok(FieldMap::new());
        let _ = mock.client().find("card", &json!("c2"), &Params::new());
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_reports_pending() {
        let mut mock = MockClient::new();
        mock.expect_update("card", "c1").return_ok(Value::Null);
        mock.verify();
    }
}
