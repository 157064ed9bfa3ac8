//! # MultiAssociation
//!
//! The result of a to-many accessor: the resolved entities, in the order the client returned
//! them, bound to the owner they were resolved for. Results are fixed when the collection is
//! built; reading it never calls the client again.
//!
//! `MultiAssociation<T>` derefs to `[T]`, so `len`, `iter`, `get`, `first`, `last` and
//! `contains` come from the slice.

use crate::framework::entity::EntityKey;
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiAssociation<T> {
    owner: EntityKey,
    items: Vec<T>,
}

impl<T> MultiAssociation<T> {
    pub fn new(owner: EntityKey, items: Vec<T>) -> Self {
        Self { owner, items }
    }

    /// The entity this collection was resolved for.
    pub fn owner(&self) -> &EntityKey {
        &self.owner
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for MultiAssociation<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for MultiAssociation<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a MultiAssociation<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
