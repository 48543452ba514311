use crate::state::{EquipmentId, SlotIndex};

/// How a bundle combines with the loadout it is applied to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AddType {
    /// Restore the default class.
    Reset,
    /// Replace engine, wings and the whole item mapping.
    Clear,
    /// Replace engine/wings when given; evict same-slot items.
    Replace,
    /// Add engine/wings only into empty places; sum item quantities.
    Add,
    /// Remove matching engine/wings; subtract item quantities.
    Take,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BundleItem {
    pub item: EquipmentId,
    pub slot: SlotIndex,
    pub quantity: u32,
}

/// Money required before a bundle may be applied; checked by the lobby.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BundleCosts {
    /// Charged on every successful application.
    pub buy: i64,
    /// Charged once per player, before the first application.
    pub unlock: i64,
}

/// A named loadout transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutBundle {
    pub name: String,
    pub add_type: AddType,
    /// New class name given to the player on success.
    pub rename: Option<String>,
    pub engine: Option<EquipmentId>,
    pub wings: Option<EquipmentId>,
    pub items: Vec<BundleItem>,
    /// When set, the stored loadout is updated together with the current one.
    pub persisting: bool,
    pub costs: BundleCosts,
}

impl LoadoutBundle {
    pub fn new(name: impl Into<String>, add_type: AddType) -> Self {
        Self {
            name: name.into(),
            add_type,
            rename: None,
            engine: None,
            wings: None,
            items: Vec::new(),
            persisting: false,
            costs: BundleCosts::default(),
        }
    }

    pub fn with_engine(mut self, engine: impl Into<EquipmentId>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn with_wings(mut self, wings: impl Into<EquipmentId>) -> Self {
        self.wings = Some(wings.into());
        self
    }

    pub fn persisting(mut self) -> Self {
        self.persisting = true;
        self
    }

    pub fn add_item(&mut self, item: impl Into<EquipmentId>, slot: SlotIndex, quantity: u32) {
        self.items.push(BundleItem {
            item: item.into(),
            slot,
            quantity,
        });
    }

    pub fn with_item(mut self, item: impl Into<EquipmentId>, slot: SlotIndex, quantity: u32) -> Self {
        self.add_item(item, slot, quantity);
        self
    }
}
