//! Concrete resource types implementing the [`Entity`](crate::framework::Entity) trait.

pub mod board;
pub mod card;
pub mod list;
pub mod member;
pub mod organization;

pub use board::*;
pub use card::*;
pub use list::*;
pub use member::*;
pub use organization::*;

use crate::framework::TypeRegistry;

/// Register every type of this module.
pub fn register_all(registry: &mut TypeRegistry) {
    registry
        .register::<Board>()
        .register::<Card>()
        .register::<List>()
        .register::<Member>()
        .register::<Organization>();
}

/// A registry holding every type of this module.
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    register_all(&mut registry);
    registry
}
