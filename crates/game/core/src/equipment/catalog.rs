use super::{EngineDefinition, WingsDefinition};
use crate::action::ActionDefinition;
use crate::activator::ActivatorDefinition;
use crate::error::ConfigurationError;
use crate::item::ItemDefinition;
use crate::loadout::LoadoutBundle;
use crate::state::EquipmentId;

/// Read-only lookup of loaded content by identifier.
///
/// Implementors only provide the `Option` lookups; the `require_*` helpers
/// turn a missing identifier into [`ConfigurationError::UnknownEquipment`].
pub trait EquipmentCatalog: Send + Sync {
    fn engine(&self, id: &EquipmentId) -> Option<&EngineDefinition>;

    fn wings(&self, id: &EquipmentId) -> Option<&WingsDefinition>;

    fn item(&self, id: &EquipmentId) -> Option<&ItemDefinition>;

    fn action(&self, id: &EquipmentId) -> Option<&ActionDefinition>;

    fn activator(&self, id: &EquipmentId) -> Option<&ActivatorDefinition>;

    /// Named bundle applied by item-set actions and lobby clicks.
    fn bundle(&self, name: &str) -> Option<&LoadoutBundle>;

    fn require_engine(&self, id: &EquipmentId) -> Result<&EngineDefinition, ConfigurationError> {
        self.engine(id).ok_or_else(|| unknown("engine", id))
    }

    fn require_wings(&self, id: &EquipmentId) -> Result<&WingsDefinition, ConfigurationError> {
        self.wings(id).ok_or_else(|| unknown("wings", id))
    }

    fn require_item(&self, id: &EquipmentId) -> Result<&ItemDefinition, ConfigurationError> {
        self.item(id).ok_or_else(|| unknown("item", id))
    }

    fn require_action(&self, id: &EquipmentId) -> Result<&ActionDefinition, ConfigurationError> {
        self.action(id).ok_or_else(|| unknown("action", id))
    }

    fn require_activator(
        &self,
        id: &EquipmentId,
    ) -> Result<&ActivatorDefinition, ConfigurationError> {
        self.activator(id).ok_or_else(|| unknown("activator", id))
    }
}

fn unknown(kind: &'static str, id: &EquipmentId) -> ConfigurationError {
    ConfigurationError::UnknownEquipment {
        kind,
        id: id.to_string(),
    }
}
