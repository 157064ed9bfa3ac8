#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Entity Recipe
//!
//! > **A Recipe for modeling remote REST resources as typed Rust objects.**
//!
//! Each resource type (a board, a card, a member...) declares its attributes and relationships
//! once, in a [`Schema`](framework::Schema). The framework derives everything else from that
//! declaration: attribute access with readonly enforcement, dirty tracking, find / create /
//! save / parse, and navigation to related resources.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Declarations, not generated code
//! Resource types are plain structs wrapping a [`BasicData`](framework::BasicData). Generic
//! `get` / `set` consult the schema at runtime, so a type definition is a few lines long and
//! unknown or readonly names fail with a precise [`EntityError`](framework::EntityError).
//!
//! ### Explicit wiring
//! There is no hidden global client. Every entity carries a [`Session`](framework::Session):
//! the [`RemoteClient`](framework::RemoteClient) to talk to and the
//! [`TypeRegistry`](framework::TypeRegistry) used to turn a relationship's type name into a
//! constructor. Tests swap the client for a [`MockClient`](framework::mock::MockClient).
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Client failures travel inside [`EntityError::Client`](framework::EntityError::Client)
//! untouched. Malformed responses are [`EntityError::Deserialization`](framework::EntityError::Deserialization),
//! so callers can tell "the server said no" from "the server said something unreadable".
//!
//! ### 2. Concurrency Model
//! Everything is synchronous and blocking. Instances are `Send + Sync` but meant to be mutated
//! from one thread at a time; clients must be safe to share.
//!
//! ### 3. Observability
//! Gateway and relationship operations run inside `tracing` spans. See the
//! [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Schema, attribute storage, the [`Entity`](framework::Entity) trait and the
//! [`Gateway`](framework::Gateway) / [`Relations`](framework::Relations) operations every entity
//! gets for free.
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! Builds the [`Session`](framework::Session) with every model registered and installs tracing.
//!
//! ### 3. The Transport ([`clients`])
//! [`InMemoryClient`](clients::InMemoryClient), a store-backed client that follows the request
//! conventions of the framework.
//!
//! ### 4. The Implementation ([`model`])
//! Boards, lists, cards, members and organizations built with the recipe.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use entity_recipe::clients::InMemoryClient;
//! use entity_recipe::framework::mock::fields;
//! use entity_recipe::framework::{Entity, Gateway, Params};
//! use entity_recipe::lifecycle::build_session;
//! use entity_recipe::model::Board;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let store = Arc::new(InMemoryClient::new());
//! store.insert("board", fields(json!({ "id": "b1", "name": "Roadmap" })));
//! store.insert("card", fields(json!({ "id": "c1", "board_id": "b1", "name": "Ship it" })));
//!
//! let session = build_session(store);
//! let board = Board::find(&session, "b1", &Params::new()).unwrap();
//! let cards = board.cards(&Params::new()).unwrap();
//! assert_eq!(cards.len(), 1);
//! assert_eq!(cards[0].name(), Some("Ship it"));
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
