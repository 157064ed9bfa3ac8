//! # Declarative Schema
//!
//! A [`Schema`] is declared once per concrete resource type and describes:
//!
//! - the fixed set of attribute names, and which of them are readonly;
//! - the to-one ([`One`]) and to-many ([`Many`]) relationships.
//!
//! Every entity of the type shares the same `&'static Schema`. A single generic getter and
//! setter on [`Attributes`](crate::framework::Attributes) dispatch through it, instead of one
//! method per field.
//!
//! ```rust
//! use entity_recipe::framework::{Many, One, Schema};
//!
//! let schema = Schema::builder("Card")
//!     .attributes(["name", "board_id", "closed"])
//!     .readonly(["url"])
//!     .one("board", One::new().using("board_id"))
//!     .many("checklists", Many::new())
//!     .build();
//!
//! assert!(schema.has_attribute("id"));
//! assert!(schema.is_readonly("url"));
//! ```

use crate::framework::client::Params;
use indexmap::IndexMap;

/// Name every schema declares first.
pub const ID: &str = "id";

/// Per-attribute declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeSpec {
    pub readonly: bool,
}

/// Declaration of a to-one relationship.
///
/// All overrides are optional; see [`Relations::one`](crate::framework::Relations::one) for
/// how each is derived when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct One {
    pub via: Option<String>,
    pub using: Option<String>,
    pub path: Option<String>,
}

impl One {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical type name of the target, instead of the one derived from the relationship name.
    pub fn via(mut self, type_name: impl Into<String>) -> Self {
        self.via = Some(type_name.into());
        self
    }

    /// Attribute on the owner whose value is the target's id. Defaults to `id`.
    pub fn using(mut self, attribute: impl Into<String>) -> Self {
        self.using = Some(attribute.into());
        self
    }

    /// Resolve through the client's find-by-path instead of the target's own path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Declaration of a to-many relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Many {
    pub in_: Option<String>,
    pub via: Option<String>,
    pub path: Option<String>,
    pub params: Params,
}

impl Many {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owning collection segment, instead of the owner's pluralized type name.
    pub fn in_(mut self, segment: impl Into<String>) -> Self {
        self.in_ = Some(segment.into());
        self
    }

    pub fn via(mut self, type_name: impl Into<String>) -> Self {
        self.via = Some(type_name.into());
        self
    }

    /// Relationship segment, instead of the relationship name.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Default query parameter. Caller-supplied parameters win on conflict.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    One(One),
    Many(Many),
}

/// The declared shape of one concrete resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    type_name: &'static str,
    attributes: IndexMap<String, AttributeSpec>,
    relations: IndexMap<String, Relation>,
}

impl Schema {
    pub fn builder(type_name: &'static str) -> SchemaBuilder {
        let mut attributes = IndexMap::new();
        attributes.insert(ID.to_string(), AttributeSpec { readonly: true });
        SchemaBuilder {
            schema: Schema {
                type_name,
                attributes,
                relations: IndexMap::new(),
            },
        }
    }

    /// Canonical type name, e.g. `Board`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn is_readonly(&self, name: &str) -> bool {
        self.attributes.get(name).is_some_and(|spec| spec.readonly)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.get(name)
    }

    /// Attribute names in declaration order, `id` first.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.get(name)
    }

    pub fn relation_names(&self) -> impl Iterator<Item = &str> {
        self.relations.keys().map(String::as_str)
    }
}

/// Builder returned by [`Schema::builder`].
#[derive(Debug)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Copy attributes and relationships declared by a parent schema.
    ///
    /// An attribute readonly on either side stays readonly.
    pub fn inherit(mut self, parent: &Schema) -> Self {
        for (name, spec) in &parent.attributes {
            let merged = self.schema.attributes.entry(name.clone()).or_insert(*spec);
            merged.readonly |= spec.readonly;
        }
        for (name, relation) in &parent.relations {
            self.schema.relations.insert(name.clone(), relation.clone());
        }
        self
    }

    /// Declare writable attributes. Redeclaring a name keeps its readonly flag.
    pub fn attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.schema.attributes.entry(name.into()).or_default();
        }
        self
    }

    /// Declare readonly attributes: readable, never settable after construction.
    pub fn readonly<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.schema
                .attributes
                .insert(name.into(), AttributeSpec { readonly: true });
        }
        self
    }

    pub fn one(mut self, name: impl Into<String>, options: One) -> Self {
        self.schema.relations.insert(name.into(), Relation::One(options));
        self
    }

    pub fn many(mut self, name: impl Into<String>, options: Many) -> Self {
        self.schema.relations.insert(name.into(), Relation::Many(options));
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}
