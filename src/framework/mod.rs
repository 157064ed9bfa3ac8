//! Generic entity framework for remote resources.
//!
//! This module provides the building blocks for modeling resources of a REST-style API as
//! typed, mutable local objects.
//!
//! # Main Components
//!
//! - [`Schema`] - Declared attributes (with readonly flags) and relationships of a type
//! - [`Attributes`] - Per-instance storage with dirty tracking
//! - [`Entity`] - Trait that resource types implement
//! - [`Gateway`] - find / create / save / parse / parse_many / refresh
//! - [`Relations`] - to-one and to-many resolution
//! - [`TypeRegistry`] - Canonical type name to constructor
//! - [`RemoteClient`] / [`Session`] - The client capability and how entities reach it
//! - [`EntityError`] / [`ClientError`] - Error types
//!
//! # Testing
//!
//! See [`mock`] module for a scripted client that records every request.

pub mod attributes;
pub mod client;
pub mod collection;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod inflect;
pub mod json;
pub mod mock;
pub mod registry;
pub mod relations;
pub mod schema;

// Re-export core types for convenience
pub use attributes::Attributes;
pub use client::{FieldMap, Params, RemoteClient, Session};
pub use collection::MultiAssociation;
pub use entity::{downcast, AnyEntity, BasicData, Entity, EntityKey};
pub use error::{ClientError, EntityError};
pub use gateway::Gateway;
pub use registry::{EntityType, TypeRegistry};
pub use relations::Relations;
pub use schema::{AttributeSpec, Many, One, Relation, Schema, SchemaBuilder, ID};
