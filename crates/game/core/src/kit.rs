//! Instantiated equipment of one player.
//!
//! A [`Kit`] is built from the player's current [`Loadout`] and owns the
//! runtime instances (with their compilers) of every piece listed there.
//! It is rebuilt whenever the loadout changes; the caller re-installs the
//! session's active modifications afterwards.
use std::collections::{BTreeMap, HashSet};

use crate::action::{ActionEnv, ActionResult};
use crate::equipment::{Engine, EquipmentCatalog, Wings};
use crate::error::ConfigurationError;
use crate::item::UsableItem;
use crate::loadout::Loadout;
use crate::modification::Modification;
use crate::state::{EquipmentId, SlotIndex};

/// What happened when one item was triggered.
#[derive(Clone, Debug, PartialEq)]
pub struct UseReport {
    pub slot: SlotIndex,
    pub item: EquipmentId,
    /// False when the item refused the use (cooldown, ammo, amount).
    pub used: bool,
    pub results: Vec<ActionResult>,
}

impl UseReport {
    pub fn loadout_changed(&self) -> bool {
        self.results
            .iter()
            .any(|result| matches!(result, ActionResult::LoadoutChanged))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Kit {
    engine: Option<Engine>,
    wings: Option<Wings>,
    items: BTreeMap<SlotIndex, UsableItem>,
}

impl Kit {
    /// Instantiates every piece of `loadout`.
    ///
    /// Stack quantities become item amounts, clamped into the item's bounds.
    pub fn build(
        loadout: &Loadout,
        catalog: &dyn EquipmentCatalog,
    ) -> Result<Self, ConfigurationError> {
        let engine = loadout
            .engine
            .as_ref()
            .map(|id| catalog.require_engine(id).cloned().map(Engine::new))
            .transpose()?;
        let wings = loadout
            .wings
            .as_ref()
            .map(|id| catalog.require_wings(id).cloned().map(Wings::new))
            .transpose()?;

        let mut items = BTreeMap::new();
        for (slot, stack) in &loadout.items {
            let mut item = UsableItem::build(catalog.require_item(&stack.item)?, catalog)?;
            let quantity = i32::try_from(stack.quantity).unwrap_or(i32::MAX);
            item.set_amount(quantity.clamp(item.min_amount(), item.max_amount()));
            items.insert(*slot, item);
        }

        Ok(Self {
            engine,
            wings,
            items,
        })
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut Engine> {
        self.engine.as_mut()
    }

    pub fn wings(&self) -> Option<&Wings> {
        self.wings.as_ref()
    }

    pub fn wings_mut(&mut self) -> Option<&mut Wings> {
        self.wings.as_mut()
    }

    pub fn item(&self, slot: SlotIndex) -> Option<&UsableItem> {
        self.items.get(&slot)
    }

    pub fn item_mut(&mut self, slot: SlotIndex) -> Option<&mut UsableItem> {
        self.items.get_mut(&slot)
    }

    pub fn items(&self) -> impl Iterator<Item = (SlotIndex, &UsableItem)> {
        self.items.iter().map(|(slot, item)| (*slot, item))
    }

    /// Total weight of all carried items.
    pub fn weight(&self) -> f64 {
        self.items.values().map(UsableItem::weight).sum()
    }

    pub fn tick(&mut self) {
        if let Some(engine) = &mut self.engine {
            engine.tick();
        }
        for item in self.items.values_mut() {
            item.tick();
        }
    }

    pub fn refill(&mut self) {
        if let Some(engine) = &mut self.engine {
            engine.refill();
        }
        if let Some(wings) = &mut self.wings {
            wings.refill();
        }
        for item in self.items.values_mut() {
            item.refill();
        }
    }

    /// Offers `modification` to every piece; returns true if any installed it.
    pub fn add_modification(&mut self, modification: &Modification) -> bool {
        let mut changed = false;
        if let Some(engine) = &mut self.engine {
            changed |= engine.add_modification(modification);
        }
        if let Some(wings) = &mut self.wings {
            changed |= wings.add_modification(modification);
        }
        for item in self.items.values_mut() {
            changed |= item.add_modification(modification);
        }
        changed
    }

    pub fn remove_modification(&mut self, modification: &Modification) -> bool {
        let mut changed = false;
        if let Some(engine) = &mut self.engine {
            changed |= engine.remove_modification(modification);
        }
        if let Some(wings) = &mut self.wings {
            changed |= wings.remove_modification(modification);
        }
        for item in self.items.values_mut() {
            changed |= item.remove_modification(modification);
        }
        changed
    }

    /// Uses the item in `slot` directly, running all of its usages.
    pub fn use_slot(&mut self, slot: SlotIndex, env: &mut ActionEnv<'_>) -> Option<UseReport> {
        let item = self.items.get_mut(&slot)?;
        let usages: Vec<usize> = (0..item.usages().len()).collect();
        Some(run_item(slot, item, &usages, &mut self.wings, env))
    }

    /// Triggers every item that has a usage whose activators are all active.
    pub fn activate(
        &mut self,
        occurrences: &HashSet<String>,
        env: &mut ActionEnv<'_>,
    ) -> Vec<UseReport> {
        let mut reports = Vec::new();
        for (slot, item) in &mut self.items {
            let usages: Vec<usize> = item
                .usages()
                .iter()
                .enumerate()
                .filter(|(_, usage)| usage.is_active(occurrences))
                .map(|(index, _)| index)
                .collect();
            if usages.is_empty() {
                continue;
            }
            reports.push(run_item(*slot, item, &usages, &mut self.wings, env));
        }
        reports
    }
}

fn run_item(
    slot: SlotIndex,
    item: &mut UsableItem,
    usages: &[usize],
    wings: &mut Option<Wings>,
    env: &mut ActionEnv<'_>,
) -> UseReport {
    let mut report = UseReport {
        slot,
        item: item.id().clone(),
        used: item.use_item(),
        results: Vec::new(),
    };
    if !report.used {
        return report;
    }
    for &index in usages {
        for action in &item.usages()[index].actions {
            report
                .results
                .push(action.act(&report.item, wings.as_mut(), env));
        }
    }
    report
}
