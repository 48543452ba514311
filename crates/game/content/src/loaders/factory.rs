//! Content factory building the catalog and lobby from data files.

use std::path::{Path, PathBuf};

use aerial_core::{ActionKind, EquipmentCatalog, GameConfig, PlayerClass, UsableItem};

use crate::catalog::Catalog;
use crate::loaders::{ConfigLoader, EquipmentLoader, LoadResult, Lobby, LobbyLoader};

/// Everything the runtime needs to host players.
#[derive(Debug, Clone)]
pub struct GameContent {
    pub config: GameConfig,
    pub catalog: Catalog,
    pub default_class: PlayerClass,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── engines.ron
/// ├── wings.ron
/// ├── actions.ron
/// ├── activators.ron
/// ├── items.ron
/// └── lobby.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load every equipment definition.
    ///
    /// Items go in last: an item whose usages reference an unknown action or
    /// activator is skipped like any other malformed object.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let mut catalog = Catalog::new();

        for engine in EquipmentLoader::load_engines(&self.data_dir.join("engines.ron"))? {
            catalog.insert_engine(engine);
        }
        for wings in EquipmentLoader::load_wings(&self.data_dir.join("wings.ron"))? {
            catalog.insert_wings(wings);
        }
        for action in EquipmentLoader::load_actions(&self.data_dir.join("actions.ron"))? {
            catalog.insert_action(action);
        }
        for activator in EquipmentLoader::load_activators(&self.data_dir.join("activators.ron"))? {
            catalog.insert_activator(activator);
        }

        let items = EquipmentLoader::load_items(&self.data_dir.join("items.ron"))?;
        for item in items {
            match UsableItem::build(&item, &catalog) {
                Ok(_) => catalog.insert_item(item),
                Err(error) => {
                    tracing::warn!(target: "content::factory", %error, "skipping item");
                }
            }
        }

        Ok(catalog)
    }

    /// Load `lobby.ron`, resolving it against `catalog`.
    pub fn load_lobby(&self, catalog: &Catalog) -> LoadResult<Lobby> {
        let path = self.data_dir.join("lobby.ron");
        LobbyLoader::load(&path, catalog)
    }

    /// Loads config, catalog and lobby, registering the lobby bundles in the
    /// catalog so item-set actions can reach them.
    pub fn load(&self) -> LoadResult<GameContent> {
        let config = self.load_config()?;
        let mut catalog = self.load_catalog()?;
        let lobby = self.load_lobby(&catalog)?;
        for bundle in lobby.bundles {
            catalog.insert_bundle(bundle);
        }
        warn_dangling_bundles(&catalog);

        let [engines, wings, items, actions, activators, bundles] = catalog.counts();
        tracing::info!(
            target: "content::factory",
            data_dir = %self.data_dir.display(),
            engines,
            wings,
            items,
            actions,
            activators,
            bundles,
            "content loaded"
        );

        Ok(GameContent {
            config,
            catalog,
            default_class: lobby.default_class,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Item-set actions resolve their bundle when fired; a missing one only
/// makes the action fail, so it is reported rather than rejected.
fn warn_dangling_bundles(catalog: &Catalog) {
    for action in catalog.actions() {
        if let ActionKind::ItemSet(set) = &action.kind {
            if catalog.bundle(&set.bundle).is_none() {
                tracing::warn!(
                    target: "content::factory",
                    action = %action.id,
                    bundle = %set.bundle,
                    "item-set action refers to an unknown bundle"
                );
            }
        }
    }
}
