//! Lobby loader: the default class and the purchasable bundles.
//!
//! ```ron
//! #![enable(implicit_some)]
//! (
//!     default_class: (
//!         name: "Pilot",
//!         engine: "jet",
//!         wings: "glider",
//!         items: ["gun", "2 rocket"],
//!     ),
//!     bundles: {
//!         "rocketeer": (type: "add", items: ["4 rocket"], buy_cost: 10),
//!     },
//! )
//! ```
//!
//! Item entries are `"<quantity> <item>"` or just `"<item>"` for one piece;
//! the slot comes from the item's definition.

use std::collections::BTreeMap;
use std::path::Path;

use aerial_core::{
    AddType, BundleCosts, ConfigurationError, EquipmentCatalog, EquipmentId, Loadout,
    LoadoutBundle, PlayerClass, SlotIndex,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Equipment a new player starts with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub wings: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleEntry {
    /// Add-type name, case insensitive.
    #[serde(rename = "type")]
    pub add_type: String,
    /// Class name given to the player on success.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub wings: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub buy_cost: i64,
    #[serde(default)]
    pub unlock_cost: i64,
    #[serde(default = "persisting_default")]
    pub persisting: bool,
}

fn persisting_default() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LobbyFile {
    pub default_class: ClassEntry,
    #[serde(default)]
    pub bundles: BTreeMap<String, BundleEntry>,
}

/// Resolved lobby content.
#[derive(Debug, Clone)]
pub struct Lobby {
    pub default_class: PlayerClass,
    pub bundles: Vec<LoadoutBundle>,
}

/// Loader for `lobby.ron`.
pub struct LobbyLoader;

impl LobbyLoader {
    pub fn load(path: &Path, catalog: &dyn EquipmentCatalog) -> LoadResult<Lobby> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    /// Parses and resolves lobby content against `catalog`.
    ///
    /// The default class is mandatory, so a broken one fails the load; a
    /// broken bundle is skipped.
    pub fn parse(content: &str, catalog: &dyn EquipmentCatalog) -> LoadResult<Lobby> {
        let file: LobbyFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse lobby RON: {}", e))?;

        let default_class = Self::build_class(&file.default_class, catalog)
            .map_err(|e| anyhow::anyhow!("Invalid default class: {}", e))?;

        let mut bundles = Vec::with_capacity(file.bundles.len());
        for (name, bundle) in &file.bundles {
            match Self::build_bundle(name, bundle, catalog) {
                Ok(bundle) => bundles.push(bundle),
                Err(error) => {
                    tracing::warn!(target: "content::lobby", bundle = %name, %error, "skipping bundle");
                }
            }
        }

        tracing::debug!(
            target: "content::lobby",
            class = default_class.name(),
            bundles = bundles.len(),
            "lobby loaded"
        );
        Ok(Lobby {
            default_class,
            bundles,
        })
    }

    pub fn build_class(
        class: &ClassEntry,
        catalog: &dyn EquipmentCatalog,
    ) -> Result<PlayerClass, ConfigurationError> {
        let mut loadout = Loadout::new();
        loadout.engine = resolve_engine(class.engine.as_deref(), catalog)?;
        loadout.wings = resolve_wings(class.wings.as_deref(), catalog)?;
        for entry in &class.items {
            let (item, slot, quantity) = resolve_item(entry, catalog)?;
            if let Some(existing) = loadout.item(slot) {
                return Err(ConfigurationError::Invalid(format!(
                    "'{}' and '{}' both occupy {}",
                    existing.item, item, slot
                )));
            }
            loadout.set_item(slot, item, quantity);
        }
        Ok(PlayerClass::new(class.name.clone(), loadout))
    }

    pub fn build_bundle(
        name: &str,
        source: &BundleEntry,
        catalog: &dyn EquipmentCatalog,
    ) -> Result<LoadoutBundle, ConfigurationError> {
        Self::resolve_bundle(name, source, catalog).map_err(|e| e.within(name))
    }

    fn resolve_bundle(
        name: &str,
        source: &BundleEntry,
        catalog: &dyn EquipmentCatalog,
    ) -> Result<LoadoutBundle, ConfigurationError> {
        let add_type: AddType =
            source
                .add_type
                .parse()
                .map_err(|_| ConfigurationError::UnknownVariant {
                    key: "type".into(),
                    value: source.add_type.clone(),
                })?;
        if source.buy_cost < 0 || source.unlock_cost < 0 {
            return Err(ConfigurationError::Invalid("costs must not be negative".into()));
        }

        let mut bundle = LoadoutBundle::new(name, add_type);
        bundle.rename = source.name.clone();
        bundle.engine = resolve_engine(source.engine.as_deref(), catalog)?;
        bundle.wings = resolve_wings(source.wings.as_deref(), catalog)?;
        bundle.persisting = source.persisting;
        bundle.costs = BundleCosts {
            buy: source.buy_cost,
            unlock: source.unlock_cost,
        };
        for entry in &source.items {
            let (item, slot, quantity) = resolve_item(entry, catalog)?;
            bundle.add_item(item, slot, quantity);
        }
        Ok(bundle)
    }
}

/// Splits an item entry into quantity and identifier.
///
/// `"rocket"` is one rocket, `"3 rocket"` three. Zero is rejected.
pub fn parse_item_entry(entry: &str) -> Result<(u32, EquipmentId), ConfigurationError> {
    let entry = entry.trim();
    let (quantity, id) = match entry.split_once(char::is_whitespace) {
        Some((count, rest)) if count.chars().all(|c| c.is_ascii_digit()) => {
            let quantity = count.parse::<u32>().map_err(|_| {
                ConfigurationError::Invalid(format!("quantity of '{}' is too large", entry))
            })?;
            (quantity, rest.trim())
        }
        _ => (1, entry),
    };

    if id.is_empty() {
        return Err(ConfigurationError::Invalid(format!(
            "item entry '{}' names no item",
            entry
        )));
    }
    if quantity == 0 {
        return Err(ConfigurationError::OutOfRange {
            key: id.into(),
            constraint: "positive",
            value: 0.0,
        });
    }
    Ok((quantity, EquipmentId::new(id)))
}

fn resolve_item(
    entry: &str,
    catalog: &dyn EquipmentCatalog,
) -> Result<(EquipmentId, SlotIndex, u32), ConfigurationError> {
    let (quantity, id) = parse_item_entry(entry)?;
    let slot = catalog.require_item(&id)?.slot;
    Ok((id, slot, quantity))
}

fn resolve_engine(
    id: Option<&str>,
    catalog: &dyn EquipmentCatalog,
) -> Result<Option<EquipmentId>, ConfigurationError> {
    id.map(|id| catalog.require_engine(&EquipmentId::from(id)).map(|e| e.id.clone()))
        .transpose()
}

fn resolve_wings(
    id: Option<&str>,
    catalog: &dyn EquipmentCatalog,
) -> Result<Option<EquipmentId>, ConfigurationError> {
    id.map(|id| catalog.require_wings(&EquipmentId::from(id)).map(|w| w.id.clone()))
        .transpose()
}
