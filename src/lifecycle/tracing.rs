//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` formatter filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Gateway**: every `find` runs in a span carrying `entity_type`; `debug!` on request
//! - **Relationships**: `fetch_one` / `fetch_many` spans carry the `owner` and `target` types
//! - **In-memory client**: `info!` for created / updated / found, `warn!` for misses
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Request paths and params
//! RUST_LOG=debug cargo run
//!
//! # Only the relationship resolver
//! RUST_LOG=entity_recipe::framework::relations=debug cargo run
//! ```
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! DEBUG find: Sending request entity_type="Board" id=b1
//! DEBUG Find entity_type="board" id=b1
//! DEBUG fetch_many: Sending request owner="Board" target="Card" path=/boards/b1/cards params={}
//! INFO fetch_many: Found entity_type="Card" path=/boards/b1/cards size=2
//! ```

/// Initializes the tracing/logging infrastructure for the application.
///
/// Panics if a global subscriber is already installed; call it once, from `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type / owner fields identify the source
        .compact()
        .init();
}
