//! In-memory equipment catalog backed by loaded content.

use std::collections::HashMap;

use aerial_core::{
    ActionDefinition, ActivatorDefinition, EngineDefinition, EquipmentCatalog, EquipmentId,
    ItemDefinition, LoadoutBundle, WingsDefinition,
};

/// Every definition loaded from the data directory, keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    engines: HashMap<EquipmentId, EngineDefinition>,
    wings: HashMap<EquipmentId, WingsDefinition>,
    items: HashMap<EquipmentId, ItemDefinition>,
    actions: HashMap<EquipmentId, ActionDefinition>,
    activators: HashMap<EquipmentId, ActivatorDefinition>,
    bundles: HashMap<String, LoadoutBundle>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_engine(&mut self, definition: EngineDefinition) {
        self.engines.insert(definition.id.clone(), definition);
    }

    pub fn insert_wings(&mut self, definition: WingsDefinition) {
        self.wings.insert(definition.id.clone(), definition);
    }

    pub fn insert_item(&mut self, definition: ItemDefinition) {
        self.items.insert(definition.id.clone(), definition);
    }

    pub fn insert_action(&mut self, definition: ActionDefinition) {
        self.actions.insert(definition.id.clone(), definition);
    }

    pub fn insert_activator(&mut self, definition: ActivatorDefinition) {
        self.activators.insert(definition.id.clone(), definition);
    }

    pub fn insert_bundle(&mut self, bundle: LoadoutBundle) {
        self.bundles.insert(bundle.name.clone(), bundle);
    }

    pub fn actions(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.actions.values()
    }

    pub fn bundles(&self) -> impl Iterator<Item = &LoadoutBundle> {
        self.bundles.values()
    }

    /// Number of loaded definitions per kind: engines, wings, items, actions,
    /// activators, bundles.
    pub fn counts(&self) -> [usize; 6] {
        [
            self.engines.len(),
            self.wings.len(),
            self.items.len(),
            self.actions.len(),
            self.activators.len(),
            self.bundles.len(),
        ]
    }
}

impl EquipmentCatalog for Catalog {
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
        self.bundles.get(name)
    }
}
