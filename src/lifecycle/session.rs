//! Composition root: the [`Session`] every entity of the process is built with.
//!
//! Library code takes a `&Session` explicitly. Applications that want one process-wide session
//! install it once with [`install_default`] and read it back with [`default_session`].

use crate::framework::{RemoteClient, Session, TypeRegistry};
use crate::model;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

static DEFAULT: OnceCell<Session> = OnceCell::new();

/// A session over `client` knowing every type in [`model`].
pub fn build_session(client: Arc<dyn RemoteClient>) -> Session {
    let mut registry = TypeRegistry::new();
    model::register_all(&mut registry);
    info!(types = registry.len(), "Session ready");
    Session::new(client, Arc::new(registry))
}

/// Install the process-wide session. Returns the rejected session if one is already installed.
pub fn install_default(session: Session) -> Result<(), Session> {
    DEFAULT.set(session)
}

/// The process-wide session, if [`install_default`] has run.
pub fn default_session() -> Option<&'static Session> {
    DEFAULT.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    #[test]
    fn test_build_session_registers_models() {
        let session = build_session(MockClient::new().client());
        assert!(session.registry().contains("Board"));
        assert!(session.registry().contains("Organization"));
    }

    #[test]
    fn test_install_default_only_once() {
        let first = build_session(MockClient::new().client());
        let second = build_session(MockClient::new().client());

        assert!(install_default(first).is_ok());
        assert!(install_default(second).is_err());
        assert!(default_session().is_some());
    }
}
