//! Per-player game state owned by the simulation worker.
//!
//! A [`Session`] ties together the player's class (declarative loadout), the
//! kit instantiated from it, the session-scoped modifications and the lobby
//! wallet. Whenever the loadout changes the kit is rebuilt and the active
//! modifications are installed on the new instances.

mod guard;
mod lobby;

use std::collections::{BTreeSet, HashSet};

use aerial_core::{
    ActionEnv, ConfigurationError, EnumRegistry, EquipmentCatalog, EquipmentId, HitDispatcher,
    Kit, Loadout, Modification, PlayerClass, PlayerId, SlotIndex, UseReport,
};
use serde::{Deserialize, Serialize};

pub use guard::TriggerGuard;
pub use lobby::PurchaseOutcome;

/// Read-only view of a session returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub player: PlayerId,
    pub class: String,
    pub loadout: Loadout,
    pub money: i64,
    pub unlocked: BTreeSet<String>,
    pub modifications: Vec<String>,
    pub engine_fuel: Option<f64>,
    pub wings_health: Option<f64>,
    pub items: Vec<ItemSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub slot: SlotIndex,
    pub item: EquipmentId,
    pub amount: i32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub cooldown: u32,
}

/// Shared, read-only simulation resources a session needs to act.
#[derive(Clone, Copy)]
pub struct World<'a> {
    pub catalog: &'a dyn EquipmentCatalog,
    pub registry: &'a EnumRegistry,
}

pub struct Session {
    player: PlayerId,
    class: PlayerClass,
    kit: Kit,
    /// Insertion ordered; a later literal overrides an earlier one.
    modifications: Vec<Modification>,
    money: i64,
    unlocked: BTreeSet<String>,
    occurrences: HashSet<String>,
    guard: TriggerGuard,
}

impl Session {
    pub fn new(
        player: PlayerId,
        class: PlayerClass,
        money: i64,
        debounce_ticks: u64,
        catalog: &dyn EquipmentCatalog,
    ) -> Result<Self, ConfigurationError> {
        let kit = Kit::build(class.current(), catalog)?;
        Ok(Self {
            player,
            class,
            kit,
            modifications: Vec::new(),
            money,
            unlocked: BTreeSet::new(),
            occurrences: HashSet::new(),
            guard: TriggerGuard::new(debounce_ticks),
        })
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn class(&self) -> &PlayerClass {
        &self.class
    }

    pub fn kit(&self) -> &Kit {
        &self.kit
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    /// Adds `modification` to the active set and installs it on the kit.
    ///
    /// Returns false if it was already active.
    pub fn add_modification(&mut self, modification: Modification) -> bool {
        if self.modifications.contains(&modification) {
            return false;
        }
        self.kit.add_modification(&modification);
        self.modifications.push(modification);
        true
    }

    /// Returns false if `modification` was not active.
    pub fn remove_modification(&mut self, modification: &Modification) -> bool {
        let Some(index) = self.modifications.iter().position(|m| m == modification) else {
            return false;
        };
        self.modifications.remove(index);
        self.kit.remove_modification(modification);
        true
    }

    /// Records that `occurrence` happened during the current tick.
    pub fn record_occurrence(&mut self, occurrence: impl Into<String>) {
        self.occurrences.insert(occurrence.into());
    }

    /// Uses the item in `slot` regardless of its activators.
    pub fn use_slot(
        &mut self,
        slot: SlotIndex,
        world: World<'_>,
        dispatcher: &mut HitDispatcher,
    ) -> Result<Option<UseReport>, ConfigurationError> {
        let mut env = ActionEnv {
            player: self.player,
            class: &mut self.class,
            catalog: world.catalog,
            dispatcher,
            registry: world.registry,
        };
        let report = self.kit.use_slot(slot, &mut env);
        if report.as_ref().is_some_and(UseReport::loadout_changed) {
            self.rebuild_kit(world.catalog)?;
        }
        Ok(report)
    }

    /// Ends the current tick: fires every item with a usage whose activators
    /// are all active, advances cooldowns and forgets the occurrences.
    ///
    /// A usage without activators is always active, so such an item fires
    /// whenever it is ready.
    pub fn tick(
        &mut self,
        world: World<'_>,
        dispatcher: &mut HitDispatcher,
    ) -> Result<Vec<UseReport>, ConfigurationError> {
        let mut env = ActionEnv {
            player: self.player,
            class: &mut self.class,
            catalog: world.catalog,
            dispatcher,
            registry: world.registry,
        };
        let reports = self.kit.activate(&self.occurrences, &mut env);
        self.occurrences.clear();

        if reports.iter().any(UseReport::loadout_changed) {
            self.rebuild_kit(world.catalog)?;
        } else {
            self.kit.tick();
        }
        Ok(reports)
    }

    /// Restores the stored loadout and a refilled kit.
    pub fn respawn(&mut self, catalog: &dyn EquipmentCatalog) -> Result<(), ConfigurationError> {
        self.class.respawn();
        self.rebuild_kit(catalog)
    }

    /// Instantiates the current loadout and reinstalls every active
    /// modification on the new pieces.
    ///
    /// On error the previous kit stays in place.
    pub fn rebuild_kit(&mut self, catalog: &dyn EquipmentCatalog) -> Result<(), ConfigurationError> {
        let mut kit = Kit::build(self.class.current(), catalog)?;
        for modification in &self.modifications {
            kit.add_modification(modification);
        }
        self.kit = kit;
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            player: self.player,
            class: self.class.name().to_owned(),
            loadout: self.class.current().clone(),
            money: self.money,
            unlocked: self.unlocked.clone(),
            modifications: self.modifications.iter().map(|m| m.name.clone()).collect(),
            engine_fuel: self.kit.engine().map(|engine| engine.fuel()),
            wings_health: self.kit.wings().map(|wings| wings.health()),
            items: self
                .kit
                .items()
                .map(|(slot, item)| ItemSnapshot {
                    slot,
                    item: item.id().clone(),
                    amount: item.amount(),
                    ammo: item.ammo(),
                    max_ammo: item.max_ammo(),
                    cooldown: item.cooldown(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use aerial_content::Catalog;
    use aerial_core::{
        ActionDefinition, ActivatorDefinition, AddType, EngineDefinition, ItemDefinition,
        Loadout, LoadoutBundle, PlayerClass, PropertyMap, SlotIndex, UsageDefinition,
        WingsDefinition,
    };

    /// Gun in slot 0 fired by `left_click`, two rockets in slot 1 and an ace
    /// badge in slot 2 applying the `ace` bundle on `right_click`.
    pub fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_engine(
            EngineDefinition::from_properties(
                "jet".into(),
                PropertyMap::new()
                    .with("max_fuel", 100.0)
                    .with("max_speed", 2.0)
                    .with("acceleration", 0.5),
            )
            .unwrap(),
        );
        catalog.insert_wings(
            WingsDefinition::from_properties(
                "glider".into(),
                PropertyMap::new()
                    .with("max_health", 20.0)
                    .with("lifting_force", 1.0)
                    .with("aerodynamics", 0.8),
            )
            .unwrap(),
        );
        catalog.insert_action(
            ActionDefinition::from_properties(
                "machine_gun".into(),
                PropertyMap::new()
                    .with("type", "projectile_gun")
                    .with("entity", "arrow")
                    .with("burst_amount", 2.0)
                    .with("burst_ticks", 1.0)
                    .with("projectile_speed", 3.0),
            )
            .unwrap(),
        );
        catalog.insert_action(
            ActionDefinition::from_properties(
                "become_ace".into(),
                PropertyMap::new()
                    .with("type", "item_set")
                    .with("bundle", "ace"),
            )
            .unwrap(),
        );
        for occurrence in ["left_click", "right_click"] {
            catalog.insert_activator(
                ActivatorDefinition::from_properties(
                    occurrence.into(),
                    PropertyMap::new().with("occurrence", occurrence),
                )
                .unwrap(),
            );
        }
        catalog.insert_item(
            ItemDefinition::from_properties(
                "gun".into(),
                PropertyMap::new()
                    .with("slot", 0.0)
                    .with("cooldown", 4.0)
                    .with("max_ammo", 10.0),
                vec![UsageDefinition {
                    activators: vec!["left_click".into()],
                    actions: vec!["machine_gun".into()],
                }],
            )
            .unwrap(),
        );
        catalog.insert_item(
            ItemDefinition::from_properties(
                "rocket".into(),
                PropertyMap::new()
                    .with("slot", 1.0)
                    .with("consumable", true)
                    .with("max_amount", 8.0),
                Vec::new(),
            )
            .unwrap(),
        );
        catalog.insert_item(
            ItemDefinition::from_properties(
                "ace_badge".into(),
                PropertyMap::new().with("slot", 2.0).with("consumable", true),
                vec![UsageDefinition {
                    activators: vec!["right_click".into()],
                    actions: vec!["become_ace".into()],
                }],
            )
            .unwrap(),
        );

        let mut rockets = LoadoutBundle::new("rockets", AddType::Add)
            .with_item("rocket", SlotIndex(1), 2)
            .persisting();
        rockets.costs.buy = 10;
        rockets.costs.unlock = 30;
        catalog.insert_bundle(rockets);

        let mut ace = LoadoutBundle::new("ace", AddType::Clear)
            .with_engine("jet")
            .with_item("gun", SlotIndex(0), 1);
        ace.rename = Some("Ace".into());
        catalog.insert_bundle(ace);

        let mut ghost_cargo = LoadoutBundle::new("ghost_cargo", AddType::Add)
            .with_item("ghost", SlotIndex(3), 1)
            .persisting();
        ghost_cargo.costs.buy = 10;
        catalog.insert_bundle(ghost_cargo);

        catalog.insert_bundle(
            LoadoutBundle::new("second_engine", AddType::Add)
                .with_engine("jet")
                .persisting(),
        );
        catalog
    }

    pub fn class() -> PlayerClass {
        PlayerClass::new(
            "Pilot",
            Loadout::new()
                .with_engine("jet")
                .with_wings("glider")
                .with_item(SlotIndex(0), "gun", 1)
                .with_item(SlotIndex(1), "rocket", 2)
                .with_item(SlotIndex(2), "ace_badge", 1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{catalog, class};
    use super::*;
    use aerial_core::{ActionResult, ModificationTarget, Modifier};

    fn session(catalog: &dyn EquipmentCatalog) -> Session {
        Session::new(PlayerId(1), class(), 100, 5, catalog).unwrap()
    }

    fn extra_ammo() -> Modification {
        Modification::new(
            "extra_ammo",
            ModificationTarget::UsableItem,
            [EquipmentId::from("gun")],
            [Modifier::new("max_ammo", "+(5)")],
        )
    }

    #[test]
    fn occurrences_fire_matching_items_once() {
        let catalog = catalog();
        let registry = EnumRegistry::with_defaults();
        let world = World {
            catalog: &catalog,
            registry: &registry,
        };
        let mut dispatcher = HitDispatcher::new();
        let mut session = session(&catalog);

        session.record_occurrence("left_click");
        let reports = session.tick(world, &mut dispatcher).unwrap();

        assert_eq!(reports.len(), 1);
        assert!(matches!(reports[0].results[0], ActionResult::Launched(_)));
        assert_eq!(dispatcher.len(), 2);

        let reports = session.tick(world, &mut dispatcher).unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn modifications_survive_a_kit_rebuild() {
        let catalog = catalog();
        let mut session = session(&catalog);

        assert!(session.add_modification(extra_ammo()));
        assert!(!session.add_modification(extra_ammo()));
        session.rebuild_kit(&catalog).unwrap();

        let gun = session.kit().item(SlotIndex(0)).unwrap();
        assert_eq!(gun.max_ammo(), 15);

        assert!(session.remove_modification(&extra_ammo()));
        assert_eq!(session.kit().item(SlotIndex(0)).unwrap().max_ammo(), 10);
        assert!(!session.remove_modification(&extra_ammo()));
    }

    #[test]
    fn item_set_action_rebuilds_the_kit() {
        let catalog = catalog();
        let registry = EnumRegistry::with_defaults();
        let world = World {
            catalog: &catalog,
            registry: &registry,
        };
        let mut dispatcher = HitDispatcher::new();
        let mut session = session(&catalog);

        let report = session
            .use_slot(SlotIndex(2), world, &mut dispatcher)
            .unwrap()
            .unwrap();

        assert!(report.loadout_changed());
        assert_eq!(session.class().name(), "Ace");
        assert!(session.kit().item(SlotIndex(1)).is_none());
        assert!(session.kit().wings().is_none());

        // The bundle did not persist, so a respawn brings the old class back.
        session.respawn(&catalog).unwrap();
        assert!(session.kit().item(SlotIndex(1)).is_some());
    }

    #[test]
    fn using_an_empty_slot_reports_nothing() {
        let catalog = catalog();
        let registry = EnumRegistry::with_defaults();
        let world = World {
            catalog: &catalog,
            registry: &registry,
        };
        let mut dispatcher = HitDispatcher::new();
        let mut session = session(&catalog);

        assert!(
            session
                .use_slot(SlotIndex(7), world, &mut dispatcher)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn snapshot_reflects_the_kit() {
        let catalog = catalog();
        let snapshot = session(&catalog).snapshot();

        assert_eq!(snapshot.class, "Pilot");
        assert_eq!(snapshot.money, 100);
        assert_eq!(snapshot.wings_health, Some(20.0));
        assert_eq!(snapshot.items.len(), 3);
        assert_eq!(snapshot.items[1].amount, 2);
    }
}
