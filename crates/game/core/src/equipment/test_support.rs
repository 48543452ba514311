use std::collections::HashMap;

use super::{EngineDefinition, EquipmentCatalog, WingsDefinition};
use crate::action::ActionDefinition;
use crate::activator::ActivatorDefinition;
use crate::item::ItemDefinition;
use crate::loadout::LoadoutBundle;
use crate::state::EquipmentId;

/// In-memory catalog for unit tests.
#[derive(Default)]
pub(crate) struct TestCatalog {
    pub engines: HashMap<EquipmentId, EngineDefinition>,
    pub wings: HashMap<EquipmentId, WingsDefinition>,
    pub items: HashMap<EquipmentId, ItemDefinition>,
    pub actions: HashMap<EquipmentId, ActionDefinition>,
    pub activators: HashMap<EquipmentId, ActivatorDefinition>,
    pub bundles: Vec<LoadoutBundle>,
}

impl EquipmentCatalog for TestCatalog {
    fn engine(&self, id: &EquipmentId) -> Option<&EngineDefinition> {
        self.engines.get(id)
    }

    fn wings(&self, id: &EquipmentId) -> Option<&WingsDefinition> {
        self.wings.get(id)
    }

    fn item(&self, id: &EquipmentId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    fn action(&self, id: &EquipmentId) -> Option<&ActionDefinition> {
        self.actions.get(id)
    }

    fn activator(&self, id: &EquipmentId) -> Option<&ActivatorDefinition> {
        self.activators.get(id)
    }

    fn bundle(&self, name: &str) -> Option<&LoadoutBundle> {
        self.bundles.iter().find(|bundle| bundle.name == name)
    }
}
