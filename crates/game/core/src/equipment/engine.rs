use crate::error::ConfigurationError;
use crate::modification::{Modification, ModificationCompiler, ModificationTarget};
use crate::property::{PropertyAccessor, PropertyMap, ValueLoader};
use crate::state::EquipmentId;

/// Propulsion unit of a flier.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineDefinition {
    pub id: EquipmentId,
    pub max_fuel: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    /// Fuel restored per tick while the engine is idle.
    pub regeneration: f64,
    pub properties: PropertyMap,
}

impl EngineDefinition {
    pub const MAX_FUEL: &'static str = "max_fuel";
    pub const MAX_SPEED: &'static str = "max_speed";
    pub const ACCELERATION: &'static str = "acceleration";
    pub const REGENERATION: &'static str = "regeneration";

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
            max_fuel: loader.positive_number(Self::MAX_FUEL)?,
            max_speed: loader.positive_number(Self::MAX_SPEED)?,
            acceleration: loader.positive_number(Self::ACCELERATION)?,
            regeneration: loader.number_or(Self::REGENERATION, 0.0)?,
            properties: PropertyMap::new(),
        })
    }
}

/// Engine instance mounted on one player's kit.
#[derive(Clone, Debug)]
pub struct Engine {
    definition: EngineDefinition,
    compiler: ModificationCompiler,
    fuel: f64,
}

impl Engine {
    pub fn new(definition: EngineDefinition) -> Self {
        let fuel = definition.max_fuel;
        Self {
            definition,
            compiler: ModificationCompiler::new(),
            fuel,
        }
    }

    pub fn id(&self) -> &EquipmentId {
        &self.definition.id
    }

    pub fn properties(&self) -> PropertyAccessor<'_> {
        PropertyAccessor::new(&self.definition.properties, &self.compiler)
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn max_fuel(&self) -> f64 {
        self.compiler
            .modify_number(EngineDefinition::MAX_FUEL, self.definition.max_fuel)
            .max(0.0)
    }

    pub fn max_speed(&self) -> f64 {
        self.compiler
            .modify_number(EngineDefinition::MAX_SPEED, self.definition.max_speed)
    }

    pub fn acceleration(&self) -> f64 {
        self.compiler
            .modify_number(EngineDefinition::ACCELERATION, self.definition.acceleration)
    }

    /// Burns `amount` fuel; fails without change when not enough is left.
    pub fn burn(&mut self, amount: f64) -> bool {
        if amount < 0.0 || self.fuel < amount {
            return false;
        }
        self.fuel -= amount;
        true
    }

    /// Regenerates fuel for one tick, never above the maximum.
    pub fn tick(&mut self) {
        let regeneration = self
            .compiler
            .modify_number(EngineDefinition::REGENERATION, self.definition.regeneration);
        self.fuel = (self.fuel + regeneration).clamp(0.0, self.max_fuel());
    }

    pub fn refill(&mut self) {
        self.fuel = self.max_fuel();
    }

    pub fn add_modification(&mut self, modification: &Modification) -> bool {
        let added = modification.applies_to(ModificationTarget::Engine, &self.definition.id)
            && self.compiler.add_modification(modification.clone());
        if added {
            self.fuel = self.fuel.min(self.max_fuel());
        }
        added
    }

    pub fn remove_modification(&mut self, modification: &Modification) -> bool {
        let removed = self.compiler.remove_modification(modification);
        if removed {
            self.fuel = self.fuel.min(self.max_fuel());
        }
        removed
    }
}
