//! Deterministic gameplay rules of the aerial combat game.
//!
//! `aerial-core` defines the modification compiler, typed property access,
//! usable items, equipment and the loadout transaction engine. It performs no
//! I/O and no logging; content loading lives in `aerial-content` and the tick
//! loop in `aerial-runtime`.
//!
//! Every game object that can be modified owns a
//! [`ModificationCompiler`](modification::ModificationCompiler); reads go
//! through a [`PropertyAccessor`](property::PropertyAccessor) so that the
//! effective value is always `compiler(base)`.
pub mod action;
pub mod activator;
pub mod combat;
pub mod config;
pub mod equipment;
pub mod error;
pub mod item;
pub mod kit;
pub mod loadout;
pub mod modification;
pub mod property;
pub mod state;

pub use action::{
    Action, ActionDefinition, ActionEnv, ActionKind, ActionResult, BurstPlan, ProjectileKind,
};
pub use activator::{Activator, ActivatorDefinition};
pub use combat::{AttackRecord, HitDispatcher, HitResolution};
pub use config::GameConfig;
pub use equipment::{Engine, EngineDefinition, EquipmentCatalog, Wings, WingsDefinition};
pub use error::{ConfigurationError, ErrorSeverity, GameError};
pub use item::{ItemDefinition, UsableItem, UsageDefinition};
pub use kit::{Kit, UseReport};
pub use loadout::{
    AddType, ApplyOutcome, BundleCosts, BundleItem, Loadout, LoadoutBundle, PlayerClass,
    TransactionConflict,
};
pub use modification::{EnumRegistry, Modification, ModificationCompiler, ModificationTarget, Modifier};
pub use property::{PropertyAccessor, PropertyMap, PropertyValue, ValueLoader};
pub use state::{EntityId, EquipmentId, PlayerId, SlotIndex, Tick};
