//! Conditions deciding when an item usage runs.
use std::collections::HashSet;

use crate::error::ConfigurationError;
use crate::modification::{Modification, ModificationCompiler, ModificationTarget};
use crate::property::{PropertyMap, ValueLoader};
use crate::state::EquipmentId;

/// Value of the `type` key selecting an activator implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ActivatorType {
    Occurrence,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActivatorKind {
    /// Active when the player recorded `occurrence` during the current tick.
    Occurrence { occurrence: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivatorDefinition {
    pub id: EquipmentId,
    pub kind: ActivatorKind,
    pub properties: PropertyMap,
}

impl ActivatorDefinition {
    pub const OCCURRENCE: &'static str = "occurrence";

    pub fn from_properties(
        id: EquipmentId,
        properties: PropertyMap,
    ) -> Result<Self, ConfigurationError> {
        let loader = ValueLoader::new(&properties);
        let kind = match loader.enumerated::<ActivatorType>("type") {
            Ok(ActivatorType::Occurrence) => loader
                .text(Self::OCCURRENCE)
                .map(|occurrence| ActivatorKind::Occurrence {
                    occurrence: occurrence.to_owned(),
                }),
            Err(e) => Err(e),
        }
        .map_err(|e| e.within(id.as_str()))?;
        Ok(Self {
            id,
            kind,
            properties,
        })
    }
}

/// Per-instance activator with its own modification compiler.
#[derive(Clone, Debug)]
pub struct Activator {
    definition: ActivatorDefinition,
    compiler: ModificationCompiler,
}

impl Activator {
    pub fn new(definition: ActivatorDefinition) -> Self {
        Self {
            definition,
            compiler: ModificationCompiler::new(),
        }
    }

    pub fn id(&self) -> &EquipmentId {
        &self.definition.id
    }

    pub fn is_active(&self, occurrences: &HashSet<String>) -> bool {
        match &self.definition.kind {
            ActivatorKind::Occurrence { occurrence } => {
                let occurrence = self
                    .compiler
                    .modify_string(ActivatorDefinition::OCCURRENCE, occurrence);
                occurrences.contains(occurrence)
            }
        }
    }

    pub fn add_modification(&mut self, modification: &Modification) -> bool {
        modification.applies_to(ModificationTarget::Activator, &self.definition.id)
            && self.compiler.add_modification(modification.clone())
    }

    pub fn remove_modification(&mut self, modification: &Modification) -> bool {
        self.compiler.remove_modification(modification)
    }
}
