//! Name → constant lookup for enumerated property types.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::str::FromStr;

use crate::action::ProjectileKind;

type Lookup<E> = fn(&str) -> Option<E>;

/// Registry of name lookups for enumerated property types.
///
/// Each enumerated type registers one lookup function. `modify_enum` asks the
/// registry to resolve a literal override; types that were never registered
/// and names that match no constant both resolve to `None`, which callers
/// treat as "keep the base value".
///
/// One registry is built at startup and shared by reference.
#[derive(Default)]
pub struct EnumRegistry {
    lookups: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every enumerated property type of the core.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<ProjectileKind>();
        registry
    }

    /// Registers `E` using its `FromStr` implementation (usually derived with
    /// `strum::EnumString`).
    pub fn register<E>(&mut self)
    where
        E: FromStr + 'static,
    {
        let lookup: Lookup<E> = |name| name.parse::<E>().ok();
        self.register_with(lookup);
    }

    /// Registers `E` with a custom lookup function, replacing any previous one.
    pub fn register_with<E: 'static>(&mut self, lookup: Lookup<E>) {
        self.lookups.insert(TypeId::of::<E>(), Box::new(lookup));
    }

    pub fn is_registered<E: 'static>(&self) -> bool {
        self.lookups.contains_key(&TypeId::of::<E>())
    }

    /// Resolves `name` to a constant of `E`.
    pub fn lookup<E: 'static>(&self, name: &str) -> Option<E> {
        let lookup = self
            .lookups
            .get(&TypeId::of::<E>())?
            .downcast_ref::<Lookup<E>>()?;
        lookup(name)
    }
}

impl std::fmt::Debug for EnumRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumRegistry")
            .field("types", &self.lookups.len())
            .finish()
    }
}
