//! Application wiring: tracing setup and the session entities are built with.

pub mod session;
pub mod tracing;

pub use session::{build_session, default_session, install_default};
pub use self::tracing::setup_tracing;
