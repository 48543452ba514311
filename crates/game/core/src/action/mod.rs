//! Effects run by usable items.
//!
//! An [`ActionDefinition`] is loaded once from an open-key [`PropertyMap`]
//! (the `type` key selects the [`ActionKind`]). Every item instance builds its
//! own [`Action`] from the definition, so each action owns a private
//! [`ModificationCompiler`] and modifications targeting one player's gun never
//! leak into another player's copy.
mod gun;
mod item_set;
mod wings_health;

use crate::combat::HitDispatcher;
use crate::equipment::{EquipmentCatalog, Wings};
use crate::error::ConfigurationError;
use crate::loadout::PlayerClass;
use crate::modification::{EnumRegistry, Modification, ModificationCompiler, ModificationTarget};
use crate::property::{PropertyAccessor, PropertyMap, ValueLoader};
use crate::state::{EquipmentId, PlayerId};

pub use gun::{BurstPlan, ProjectileGun};
pub use item_set::ItemSetAction;
pub use wings_health::WingsHealthAction;

/// Projectile entity launched by guns.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ProjectileKind {
    Arrow,
    Bolt,
    Rocket,
    Fireball,
    Snowball,
}

/// Value of the `type` key selecting an action implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ActionType {
    WingsHealth,
    ItemSet,
    ProjectileGun,
}

/// Loaded, immutable configuration of one action kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionKind {
    WingsHealth(WingsHealthAction),
    ItemSet(ItemSetAction),
    ProjectileGun(ProjectileGun),
}

impl ActionKind {
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::WingsHealth(_) => ActionType::WingsHealth,
            Self::ItemSet(_) => ActionType::ItemSet,
            Self::ProjectileGun(_) => ActionType::ProjectileGun,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionDefinition {
    pub id: EquipmentId,
    pub kind: ActionKind,
    pub properties: PropertyMap,
}

impl ActionDefinition {
    /// Builds a definition from its base properties.
    ///
    /// Errors are wrapped with the action id.
    pub fn from_properties(
        id: EquipmentId,
        properties: PropertyMap,
    ) -> Result<Self, ConfigurationError> {
        let kind = Self::load_kind(&properties).map_err(|e| e.within(id.as_str()))?;
        Ok(Self {
            id,
            kind,
            properties,
        })
    }

    fn load_kind(properties: &PropertyMap) -> Result<ActionKind, ConfigurationError> {
        let loader = ValueLoader::new(properties);
        Ok(match loader.enumerated::<ActionType>("type")? {
            ActionType::WingsHealth => ActionKind::WingsHealth(WingsHealthAction::load(&loader)?),
            ActionType::ItemSet => ActionKind::ItemSet(ItemSetAction::load(&loader)?),
            ActionType::ProjectileGun => ActionKind::ProjectileGun(ProjectileGun::load(&loader)?),
        })
    }
}

/// Session resources an action may touch besides the acting player's kit.
pub struct ActionEnv<'a> {
    pub player: PlayerId,
    pub class: &'a mut PlayerClass,
    pub catalog: &'a dyn EquipmentCatalog,
    pub dispatcher: &'a mut HitDispatcher,
    pub registry: &'a EnumRegistry,
}

/// What running one action did.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResult {
    /// The action could not run (no wings, full health, rejected bundle).
    Failed,
    /// The action changed the acting player's state in place.
    Applied,
    /// The player's loadout changed; the kit must be rebuilt.
    LoadoutChanged,
    /// Projectiles were registered for launch.
    Launched(BurstPlan),
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Per-instance action with its own modification compiler.
#[derive(Clone, Debug)]
pub struct Action {
    definition: ActionDefinition,
    compiler: ModificationCompiler,
}

impl Action {
    pub fn new(definition: ActionDefinition) -> Self {
        Self {
            definition,
            compiler: ModificationCompiler::new(),
        }
    }

    pub fn id(&self) -> &EquipmentId {
        &self.definition.id
    }

    pub fn kind(&self) -> &ActionKind {
        &self.definition.kind
    }

    pub fn compiler(&self) -> &ModificationCompiler {
        &self.compiler
    }

    pub fn properties(&self) -> PropertyAccessor<'_> {
        PropertyAccessor::new(&self.definition.properties, &self.compiler)
    }

    /// Installs `modification` if it targets this action.
    pub fn add_modification(&mut self, modification: &Modification) -> bool {
        modification.applies_to(ModificationTarget::Action, &self.definition.id)
            && self.compiler.add_modification(modification.clone())
    }

    pub fn remove_modification(&mut self, modification: &Modification) -> bool {
        self.compiler.remove_modification(modification)
    }

    /// Runs the action for the player described by `env`.
    ///
    /// `item` is the usable item the action belongs to; `wings` are the
    /// acting player's wings, if any.
    pub fn act(
        &self,
        item: &EquipmentId,
        wings: Option<&mut Wings>,
        env: &mut ActionEnv<'_>,
    ) -> ActionResult {
        match &self.definition.kind {
            ActionKind::WingsHealth(action) => {
                if action.act(&self.compiler, wings) {
                    ActionResult::Applied
                } else {
                    ActionResult::Failed
                }
            }
            ActionKind::ItemSet(action) => {
                if action.act(env.class, env.catalog) {
                    ActionResult::LoadoutChanged
                } else {
                    ActionResult::Failed
                }
            }
            ActionKind::ProjectileGun(gun) => ActionResult::Launched(gun.fire(
                &self.definition.id,
                &self.compiler,
                item,
                env,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_key_selects_the_kind() {
        let properties = PropertyMap::new()
            .with("type", "wings_health")
            .with("amount", 5.0);
        let def = ActionDefinition::from_properties("repair".into(), properties).unwrap();

        assert_eq!(def.kind.action_type(), ActionType::WingsHealth);
    }

    #[test]
    fn load_errors_name_the_action() {
        let properties = PropertyMap::new().with("type", "teleport");
        let err = ActionDefinition::from_properties("blink".into(), properties).unwrap_err();

        assert_eq!(
            err.to_string(),
            "error in 'blink': 'type' has unknown value 'teleport'"
        );
    }

    #[test]
    fn modifications_install_only_on_matching_action() {
        let properties = PropertyMap::new()
            .with("type", "wings_health")
            .with("amount", 5.0);
        let def = ActionDefinition::from_properties("repair".into(), properties).unwrap();
        let mut action = Action::new(def);

        let other = Modification::new(
            "other",
            ModificationTarget::Action,
            [EquipmentId::from("machine_gun")],
            [crate::modification::Modifier::new("amount", "*(2)")],
        );
        let mine = Modification::new(
            "mine",
            ModificationTarget::Action,
            [EquipmentId::from("repair")],
            [crate::modification::Modifier::new("amount", "*(2)")],
        );

        assert!(!action.add_modification(&other));
        assert!(action.add_modification(&mine));
        assert_eq!(action.properties().number("amount", 0.0), 10.0);
    }
}
