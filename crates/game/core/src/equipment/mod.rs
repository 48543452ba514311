//! Engines, wings and the catalog that resolves equipment identifiers.
//!
//! Definitions are immutable content loaded once. [`Engine`] and [`Wings`]
//! are per-player instances carrying runtime state and a private
//! [`ModificationCompiler`](crate::modification::ModificationCompiler).
mod catalog;
mod engine;
mod wings;

pub use catalog::EquipmentCatalog;
pub use engine::{Engine, EngineDefinition};
pub use wings::{Wings, WingsDefinition};

#[cfg(test)]
pub(crate) mod test_support;
