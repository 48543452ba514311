//! Data-driven content for the aerial combat game.
//!
//! This crate turns RON/TOML data files into the types `aerial-core` plays
//! with:
//! - Engine, wings, item, action and activator definitions (RON)
//! - Lobby bundles and the default class (RON)
//! - Game configuration (TOML)
//!
//! The [`Catalog`] is the in-memory [`aerial_core::EquipmentCatalog`] the
//! runtime hands to kits and actions.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::Catalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EquipmentLoader, GameContent, Lobby, LobbyLoader,
    parse_item_entry,
};
