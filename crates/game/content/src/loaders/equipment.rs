//! Engine, wings, item, action and activator loaders.
//!
//! Every file holds one named map from identifier to the object's base
//! properties:
//!
//! ```ron
//! (engines: {
//!     "jet": { "max_fuel": 100.0, "max_speed": 2.0, "acceleration": 0.4 },
//! })
//! ```
//!
//! Items additionally list their usages:
//!
//! ```ron
//! (items: {
//!     "gun": (
//!         properties: { "slot": 0, "cooldown": 4, "max_ammo": 60 },
//!         usages: [(activators: ["left_click"], actions: ["machine_gun"])],
//!     ),
//! })
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use aerial_core::{
    ActionDefinition, ActivatorDefinition, ConfigurationError, EngineDefinition, EquipmentId,
    ItemDefinition, PropertyMap, UsageDefinition, WingsDefinition,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EngineFile {
    engines: BTreeMap<String, PropertyMap>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WingsFile {
    wings: BTreeMap<String, PropertyMap>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ActionFile {
    actions: BTreeMap<String, PropertyMap>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ActivatorFile {
    activators: BTreeMap<String, PropertyMap>,
}

/// One entry of `items.ron`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemEntry {
    pub properties: PropertyMap,
    #[serde(default)]
    pub usages: Vec<UsageDefinition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ItemFile {
    items: BTreeMap<String, ItemEntry>,
}

/// Loader for equipment definitions from RON files.
pub struct EquipmentLoader;

impl EquipmentLoader {
    pub fn load_engines(path: &Path) -> LoadResult<Vec<EngineDefinition>> {
        let file: EngineFile = parse(path, "engine")?;
        Ok(build_each("engine", file.engines, |id, properties| {
            EngineDefinition::from_properties(id, properties)
        }))
    }

    pub fn load_wings(path: &Path) -> LoadResult<Vec<WingsDefinition>> {
        let file: WingsFile = parse(path, "wings")?;
        Ok(build_each("wings", file.wings, |id, properties| {
            WingsDefinition::from_properties(id, properties)
        }))
    }

    pub fn load_actions(path: &Path) -> LoadResult<Vec<ActionDefinition>> {
        let file: ActionFile = parse(path, "action")?;
        Ok(build_each("action", file.actions, |id, properties| {
            ActionDefinition::from_properties(id, properties)
        }))
    }

    pub fn load_activators(path: &Path) -> LoadResult<Vec<ActivatorDefinition>> {
        let file: ActivatorFile = parse(path, "activator")?;
        Ok(build_each("activator", file.activators, |id, properties| {
            ActivatorDefinition::from_properties(id, properties)
        }))
    }

    /// Loads item definitions. References to actions and activators are
    /// checked later, once the whole catalog is known.
    pub fn load_items(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let file: ItemFile = parse(path, "item")?;
        Ok(build_each("item", file.items, |id, spec| {
            ItemDefinition::from_properties(id, spec.properties, spec.usages)
        }))
    }
}

fn parse<T: for<'de> Deserialize<'de>>(path: &Path, kind: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} catalog RON: {}", kind, e))
}

/// Builds every entry, skipping (and reporting) the ones that fail.
fn build_each<S, T, F>(kind: &str, entries: BTreeMap<String, S>, build: F) -> Vec<T>
where
    F: Fn(EquipmentId, S) -> Result<T, ConfigurationError>,
{
    let total = entries.len();
    let built: Vec<T> = entries
        .into_iter()
        .filter_map(|(id, spec)| match build(EquipmentId::new(id), spec) {
            Ok(definition) => Some(definition),
            Err(error) => {
                tracing::warn!(target: "content::equipment", kind, %error, "skipping definition");
                None
            }
        })
        .collect();
    tracing::debug!(
        target: "content::equipment",
        kind,
        loaded = built.len(),
        skipped = total - built.len(),
        "definitions loaded"
    );
    built
}
