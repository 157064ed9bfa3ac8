//! # Attribute Storage & Dirty Tracking
//!
//! [`Attributes`] holds the current value of every attribute a [`Schema`] declares, and
//! remembers the value each attribute had before its first change since the last reset.
//!
//! ## Rules
//!
//! - The key set is the schema's. Reading or writing any other name fails.
//! - [`Attributes::set`] refuses readonly names. Construction code uses
//!   [`Attributes::populate`], which bypasses both the readonly check and change tracking.
//! - Writing a value equal to the stored one never marks the attribute as changed.
//! - Once changed, an attribute stays changed until [`Attributes::clear_changes`], even if it is
//!   set back to its original value.

use crate::framework::client::FieldMap;
use crate::framework::error::EntityError;
use crate::framework::schema::{Schema, ID};
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Attributes {
    schema: &'static Schema,
    values: IndexMap<String, Value>,
    originals: IndexMap<String, Value>,
}

impl Attributes {
    /// Every declared name starts out as `Null`.
    pub fn new(schema: &'static Schema) -> Self {
        let values = schema
            .attribute_names()
            .map(|name| (name.to_string(), Value::Null))
            .collect();
        Self {
            schema,
            values,
            originals: IndexMap::new(),
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Current value of `name`; `Null` if it was never set.
    pub fn get(&self, name: &str) -> Result<&Value, EntityError> {
        self.values.get(name).ok_or_else(|| self.unknown(name))
    }

    /// Assign a writable attribute.
    ///
    /// Returns `true` when the stored value changed. The previous value is recorded before the
    /// new one is stored, so [`Attributes::was`] reports it afterwards.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<bool, EntityError> {
        let value = value.into();
        let type_name = self.schema.type_name();
        let readonly = self
            .schema
            .attribute(name)
            .map(|spec| spec.readonly)
            .ok_or_else(|| self.unknown(name))?;
        if readonly {
            return Err(EntityError::ReadonlyAttribute {
                type_name,
                name: name.to_string(),
            });
        }
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| EntityError::UnknownAttribute {
                type_name,
                name: name.to_string(),
            })?;
        if *slot == value {
            return Ok(false);
        }
        if !self.originals.contains_key(name) {
            self.originals.insert(name.to_string(), slot.clone());
        }
        *slot = value;
        Ok(true)
    }

    /// Construction-time write: no readonly check, no change tracking.
    pub fn populate(&mut self, name: &str, value: impl Into<Value>) -> Result<(), EntityError> {
        let type_name = self.schema.type_name();
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| EntityError::UnknownAttribute {
                type_name,
                name: name.to_string(),
            })?;
        *slot = value.into();
        Ok(())
    }

    /// Populate every declared attribute present in `fields`. Undeclared keys are ignored.
    pub fn populate_from(&mut self, fields: &FieldMap) {
        for (name, value) in fields {
            if let Some(slot) = self.values.get_mut(name.as_str()) {
                *slot = value.clone();
            }
        }
    }

    pub fn is_changed(&self, name: &str) -> bool {
        self.originals.contains_key(name)
    }

    pub fn has_changes(&self) -> bool {
        !self.originals.is_empty()
    }

    /// Changed attribute names, in declaration order.
    pub fn changed(&self) -> Vec<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|name| self.originals.contains_key(*name))
            .collect()
    }

    /// Value before the first change since the last reset.
    pub fn was(&self, name: &str) -> Option<&Value> {
        self.originals.get(name)
    }

    /// `(name, before, after)` for every changed attribute.
    pub fn changes(&self) -> Vec<(&str, &Value, &Value)> {
        self.values
            .iter()
            .filter_map(|(name, current)| {
                self.originals
                    .get(name)
                    .map(|before| (name.as_str(), before, current))
            })
            .collect()
    }

    /// Current values of the changed attributes.
    pub fn changed_fields(&self) -> FieldMap {
        self.changes()
            .into_iter()
            .map(|(name, _, current)| (name.to_string(), current.clone()))
            .collect()
    }

    /// Every non-null attribute except `id`: the payload for creating a new resource.
    pub fn present_fields(&self) -> FieldMap {
        self.values
            .iter()
            .filter(|(name, value)| name.as_str() != ID && !value.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn clear_changes(&mut self) {
        self.originals.clear();
    }

    fn unknown(&self, name: &str) -> EntityError {
        EntityError::UnknownAttribute {
            type_name: self.schema.type_name(),
            name: name.to_string(),
        }
    }
}
