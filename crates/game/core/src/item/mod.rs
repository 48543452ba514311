//! Usable items: immutable definitions and per-player instances.
mod definition;
mod usable;

pub use definition::{ItemDefinition, UsageDefinition};
pub use usable::{Usage, UsableItem};
