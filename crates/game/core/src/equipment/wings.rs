use crate::error::ConfigurationError;
use crate::modification::{Modification, ModificationCompiler, ModificationTarget};
use crate::property::{PropertyAccessor, PropertyMap, ValueLoader};
use crate::state::EquipmentId;

#[derive(Clone, Debug, PartialEq)]
pub struct WingsDefinition {
    pub id: EquipmentId,
    pub max_health: f64,
    pub lifting_force: f64,
    pub aerodynamics: f64,
    pub properties: PropertyMap,
}

impl WingsDefinition {
    pub const MAX_HEALTH: &'static str = "max_health";
    pub const LIFTING_FORCE: &'static str = "lifting_force";
    pub const AERODYNAMICS: &'static str = "aerodynamics";

    pub fn from_properties(
        id: EquipmentId,
        properties: PropertyMap,
    ) -> Result<Self, ConfigurationError> {
        Self::load(id.clone(), &properties)
            .map(|definition| Self {
                properties,
                ..definition
            })
            .map_err(|e| e.within(id.as_str()))
    }

    fn load(id: EquipmentId, properties: &PropertyMap) -> Result<Self, ConfigurationError> {
        let loader = ValueLoader::new(properties);
        Ok(Self {
            id,
            max_health: loader.positive_number(Self::MAX_HEALTH)?,
            lifting_force: loader.number(Self::LIFTING_FORCE)?,
            aerodynamics: loader.number(Self::AERODYNAMICS)?,
            properties: PropertyMap::new(),
        })
    }
}

/// Wings instance mounted on one player's kit.
///
/// Health stays within `[0, max_health]`.
#[derive(Clone, Debug)]
pub struct Wings {
    definition: WingsDefinition,
    compiler: ModificationCompiler,
    health: f64,
}

impl Wings {
    pub fn new(definition: WingsDefinition) -> Self {
        let health = definition.max_health;
        Self {
            definition,
            compiler: ModificationCompiler::new(),
            health,
        }
    }

    pub fn id(&self) -> &EquipmentId {
        &self.definition.id
    }

    pub fn properties(&self) -> PropertyAccessor<'_> {
        PropertyAccessor::new(&self.definition.properties, &self.compiler)
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn max_health(&self) -> f64 {
        self.compiler
            .modify_number(WingsDefinition::MAX_HEALTH, self.definition.max_health)
            .max(0.0)
    }

    pub fn lifting_force(&self) -> f64 {
        self.compiler
            .modify_number(WingsDefinition::LIFTING_FORCE, self.definition.lifting_force)
    }

    pub fn aerodynamics(&self) -> f64 {
        self.compiler
            .modify_number(WingsDefinition::AERODYNAMICS, self.definition.aerodynamics)
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    /// Repairs the wings. Returns false when they are already at full health.
    pub fn add_health(&mut self, amount: f64) -> bool {
        let max = self.max_health();
        if self.health >= max {
            return false;
        }
        self.health = (self.health + amount).min(max);
        true
    }

    /// Damages the wings. Returns false when they are already destroyed.
    pub fn remove_health(&mut self, amount: f64) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        true
    }

    pub fn refill(&mut self) {
        self.health = self.max_health();
    }

    pub fn add_modification(&mut self, modification: &Modification) -> bool {
        let added = modification.applies_to(ModificationTarget::Wings, &self.definition.id)
            && self.compiler.add_modification(modification.clone());
        if added {
            self.health = self.health.min(self.max_health());
        }
        added
    }

    pub fn remove_modification(&mut self, modification: &Modification) -> bool {
        let removed = self.compiler.remove_modification(modification);
        if removed {
            self.health = self.health.min(self.max_health());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wings() -> Wings {
        Wings::new(WingsDefinition {
            id: "glider".into(),
            max_health: 50.0,
            lifting_force: 1.0,
            aerodynamics: 0.2,
            properties: PropertyMap::new(),
        })
    }

    #[test]
    fn health_is_clamped() {
        let mut wings = wings();
        assert!(!wings.add_health(10.0));

        assert!(wings.remove_health(80.0));
        assert_eq!(wings.health(), 0.0);
        assert!(wings.is_destroyed());
        assert!(!wings.remove_health(1.0));

        assert!(wings.add_health(100.0));
        assert_eq!(wings.health(), 50.0);
    }

    #[test]
    fn loads_from_properties() {
        let properties = PropertyMap::new()
            .with("max_health", 20.0)
            .with("lifting_force", 0.8)
            .with("aerodynamics", -0.1)
            .with("color", "red");
        let def = WingsDefinition::from_properties("kite".into(), properties).unwrap();

        assert_eq!(def.max_health, 20.0);
        assert!(def.properties.contains("color"));
    }
}
