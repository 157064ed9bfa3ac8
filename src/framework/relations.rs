//! # Relationship Resolution
//!
//! Resolves the relationships a [`Schema`](crate::framework::Schema) declares. [`Relations`] is
//! implemented for every [`Entity`].
//!
//! Resolution is never cached: each accessor call goes to the client again, so callers always
//! read current server state. Resolving never mutates the owner.
//!
//! ## To-one
//!
//! | Part | Override | Default |
//! |------|----------|---------|
//! | target type | `via` | relationship name camelized (`organization` → `Organization`) |
//! | id | `using` | the owner's `id` |
//! | request | `path` → `client.find_at(path, id)` | target's own `client.find(path_name, id)` |
//!
//! ## To-many
//!
//! | Part | Override | Default |
//! |------|----------|---------|
//! | owning segment | `in_` | owner type name lower-cased and pluralized (`Board` → `boards`) |
//! | target type | `via` | relationship name singularized and camelized (`cards` → `Card`) |
//! | relationship segment | `path` | relationship name |
//!
//! The request is `client.find_many(target, "/{owning}/{owner id}/{segment}", params)` where
//! `params` are the declared defaults overlaid with the caller's.

use crate::framework::client::{id_segment, Params};
use crate::framework::collection::MultiAssociation;
use crate::framework::entity::{downcast, AnyEntity, Entity};
use crate::framework::error::EntityError;
use crate::framework::inflect;
use crate::framework::registry::EntityType;
use crate::framework::schema::{Many, One, Relation, ID};
use tracing::{debug, instrument};

pub trait Relations: Entity {
    /// Resolve the to-one relationship `name` as a `T`.
    fn one<T: Entity>(&self, name: &str) -> Result<T, EntityError> {
        let (options, target) = one_target(self, name)?;
        expect_type::<T>(target)?;
        downcast(fetch_one(self, name, options, target)?)
    }

    /// Resolve the to-one relationship `name` as whatever type the registry holds.
    fn resolve_one(&self, name: &str) -> Result<Box<dyn AnyEntity>, EntityError> {
        let (options, target) = one_target(self, name)?;
        fetch_one(self, name, options, target)
    }

    /// Resolve the to-many relationship `name` as `T`s.
    fn many<T: Entity>(&self, name: &str, params: &Params) -> Result<MultiAssociation<T>, EntityError> {
        let (options, target) = many_target(self, name)?;
        expect_type::<T>(target)?;
        let items = fetch_many(self, name, options, target, params)?
            .into_iter()
            .map(downcast::<T>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MultiAssociation::new(self.key(), items))
    }

    /// Resolve the to-many relationship `name` as whatever types the registry holds.
    fn resolve_many(
        &self,
        name: &str,
        params: &Params,
    ) -> Result<MultiAssociation<Box<dyn AnyEntity>>, EntityError> {
        let (options, target) = many_target(self, name)?;
        let items = fetch_many(self, name, options, target, params)?;
        Ok(MultiAssociation::new(self.key(), items))
    }
}

impl<T: Entity> Relations for T {}

fn unknown_relation<E: Entity>(name: &str) -> EntityError {
    EntityError::UnknownRelation {
        type_name: E::schema().type_name(),
        name: name.to_string(),
    }
}

fn expect_type<T: Entity>(target: &EntityType) -> Result<(), EntityError> {
    if target.is::<T>() {
        Ok(())
    } else {
        Err(EntityError::TypeMismatch {
            expected: T::schema().type_name(),
            found: target.name(),
        })
    }
}

fn one_target<'a, E: Entity>(owner: &'a E, name: &str) -> Result<(&'static One, &'a EntityType), EntityError> {
    let options = match E::schema().relation(name) {
        Some(Relation::One(options)) => options,
        _ => return Err(unknown_relation::<E>(name)),
    };
    let type_name = options
        .via
        .clone()
        .unwrap_or_else(|| inflect::camelize(name));
    let target = owner.session().registry().resolve(&type_name)?;
    Ok((options, target))
}

fn many_target<'a, E: Entity>(owner: &'a E, name: &str) -> Result<(&'static Many, &'a EntityType), EntityError> {
    let options = match E::schema().relation(name) {
        Some(Relation::Many(options)) => options,
        _ => return Err(unknown_relation::<E>(name)),
    };
    let type_name = options
        .via
        .clone()
        .unwrap_or_else(|| inflect::camelize(&inflect::singularize(name)));
    let target = owner.session().registry().resolve(&type_name)?;
    Ok((options, target))
}

#[instrument(skip(owner, options, target), fields(owner = E::schema().type_name(), target = target.name()))]
fn fetch_one<E: Entity>(
    owner: &E,
    name: &str,
    options: &One,
    target: &EntityType,
) -> Result<Box<dyn AnyEntity>, EntityError> {
    let session = owner.session();
    let id = owner.get(options.using.as_deref().unwrap_or(ID))?;
    let params = Params::new();
    match &options.path {
        Some(path) => {
            debug!(%path, %id, "Sending request");
            let fields = session.client().find_at(path, id, &params)?;
            target.build(session, &fields)
        }
        None => {
            debug!(%id, "Sending request");
            target.find(session, id, &params)
        }
    }
}

#[instrument(skip(owner, options, target, params), fields(owner = E::schema().type_name(), target = target.name()))]
fn fetch_many<E: Entity>(
    owner: &E,
    name: &str,
    options: &Many,
    target: &EntityType,
    params: &Params,
) -> Result<Vec<Box<dyn AnyEntity>>, EntityError> {
    let session = owner.session();
    let owning = options
        .in_
        .clone()
        .unwrap_or_else(|| inflect::pluralize(&E::schema().type_name().to_lowercase()));
    let segment = options.path.as_deref().unwrap_or(name);
    let path = format!("/{}/{}/{}", owning, id_segment(owner.id()), segment);

    let mut merged = options.params.clone();
    merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

    debug!(%path, params = ?merged, "Sending request");
    session
        .client()
        .find_many(target.name(), &path, &merged)?
        .iter()
        .map(|fields| target.build(session, fields))
        .collect()
}
