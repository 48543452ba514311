use crate::state::EquipmentId;

use super::Modifier;

/// Kind of game object a modification targets.
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
pub enum ModificationTarget {
    UsableItem,
    Engine,
    Wings,
    Action,
    Activator,
}

/// A named bundle of modifiers scoped to a target kind and a set of object ids.
///
/// Two modifications are the same active-set member when all of their fields
/// are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modification {
    pub name: String,
    pub target: ModificationTarget,
    pub names: Vec<EquipmentId>,
    pub modifiers: Vec<Modifier>,
}

impl Modification {
    pub fn new(
        name: impl Into<String>,
        target: ModificationTarget,
        names: impl IntoIterator<Item = EquipmentId>,
        modifiers: impl IntoIterator<Item = Modifier>,
    ) -> Self {
        Self {
            name: name.into(),
            target,
            names: names.into_iter().collect(),
            modifiers: modifiers.into_iter().collect(),
        }
    }

    /// Returns true if this modification should be installed on the object
    /// of the given kind and id.
    pub fn applies_to(&self, target: ModificationTarget, id: &EquipmentId) -> bool {
        self.target == target && self.names.iter().any(|name| name == id)
    }
}
