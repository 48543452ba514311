//! Player loadouts and the bundle transaction engine.
//!
//! A [`Loadout`] is the declarative equipment of a player: engine, wings and
//! one item stack per slot. [`apply`] evaluates a [`LoadoutBundle`] against a
//! staged copy and returns the new loadout only when every check passed, so
//! callers commit by assignment and a conflict leaves nothing to undo.
mod bundle;
mod class;
mod transaction;

use std::collections::BTreeMap;

use crate::state::{EquipmentId, SlotIndex};

pub use bundle::{AddType, BundleCosts, BundleItem, LoadoutBundle};
pub use class::PlayerClass;
pub use transaction::{ApplyOutcome, TransactionConflict, apply};

/// Item identifier and quantity occupying one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item: EquipmentId,
    pub quantity: u32,
}

/// Declarative equipment of a player.
///
/// Items are keyed by slot, so two entries can never share a slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    pub engine: Option<EquipmentId>,
    pub wings: Option<EquipmentId>,
    pub items: BTreeMap<SlotIndex, ItemStack>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(mut self, engine: impl Into<EquipmentId>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn with_wings(mut self, wings: impl Into<EquipmentId>) -> Self {
        self.wings = Some(wings.into());
        self
    }

    pub fn with_item(mut self, slot: SlotIndex, item: impl Into<EquipmentId>, quantity: u32) -> Self {
        self.set_item(slot, item, quantity);
        self
    }

    /// Puts `quantity` of `item` into `slot`, evicting whatever was there.
    pub fn set_item(&mut self, slot: SlotIndex, item: impl Into<EquipmentId>, quantity: u32) {
        self.items.insert(
            slot,
            ItemStack {
                item: item.into(),
                quantity,
            },
        );
    }

    pub fn item(&self, slot: SlotIndex) -> Option<&ItemStack> {
        self.items.get(&slot)
    }

    pub fn quantity(&self, slot: SlotIndex) -> Option<u32> {
        self.items.get(&slot).map(|stack| stack.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.engine.is_none() && self.wings.is_none() && self.items.is_empty()
    }
}
