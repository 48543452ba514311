//! Content loaders for reading game data from files.
//!
//! Each loader reads one RON/TOML file. A file that cannot be parsed fails the
//! whole load; a single malformed object inside a parsed file is reported with
//! `tracing::warn!` and skipped so the rest of the content still loads.

pub mod config;
pub mod equipment;
pub mod factory;
pub mod lobby;

pub use config::ConfigLoader;
pub use equipment::{EquipmentLoader, ItemEntry};
pub use factory::{ContentFactory, GameContent};
pub use lobby::{BundleEntry, ClassEntry, Lobby, LobbyFile, LobbyLoader, parse_item_entry};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
