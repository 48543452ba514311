use std::collections::HashSet;

use super::{ItemDefinition, UsageDefinition};
use crate::action::Action;
use crate::activator::Activator;
use crate::equipment::EquipmentCatalog;
use crate::error::ConfigurationError;
use crate::modification::{Modification, ModificationCompiler, ModificationTarget};
use crate::property::PropertyAccessor;
use crate::state::{EquipmentId, SlotIndex};

/// Instantiated usage: activators and actions owned by one item instance.
#[derive(Clone, Debug, Default)]
pub struct Usage {
    pub activators: Vec<Activator>,
    pub actions: Vec<Action>,
}

impl Usage {
    pub fn build(
        definition: &UsageDefinition,
        catalog: &dyn EquipmentCatalog,
    ) -> Result<Self, ConfigurationError> {
        let mut usage = Self::default();
        for id in &definition.activators {
            usage
                .activators
                .push(Activator::new(catalog.require_activator(id)?.clone()));
        }
        for id in &definition.actions {
            usage
                .actions
                .push(Action::new(catalog.require_action(id)?.clone()));
        }
        Ok(usage)
    }

    /// A usage without activators is active on every trigger.
    pub fn is_active(&self, occurrences: &HashSet<String>) -> bool {
        self.activators
            .iter()
            .all(|activator| activator.is_active(occurrences))
    }
}

/// Runtime state of an item in a player's kit.
///
/// ```text
/// Ready ──use──▶ OnCooldown ──tick × cooldown──▶ Ready
/// ```
///
/// `ammo` stays in `[0, max_ammo]` and `amount` in `[min_amount, max_amount]`.
/// A rejected operation never changes any of them.
#[derive(Clone, Debug)]
pub struct UsableItem {
    definition: ItemDefinition,
    compiler: ModificationCompiler,
    usages: Vec<Usage>,
    cooldown: u32,
    whole_cooldown: u32,
    ammo: u32,
    amount: i32,
}

impl UsableItem {
    /// Creates a refilled item without usages.
    pub fn new(definition: ItemDefinition) -> Self {
        Self::with_usages(definition, Vec::new())
    }

    pub fn with_usages(definition: ItemDefinition, usages: Vec<Usage>) -> Self {
        let mut item = Self {
            ammo: 0,
            amount: definition.default_amount,
            definition,
            compiler: ModificationCompiler::new(),
            usages,
            cooldown: 0,
            whole_cooldown: 0,
        };
        item.refill();
        item
    }

    /// Instantiates the item and every action and activator it refers to.
    pub fn build(
        definition: &ItemDefinition,
        catalog: &dyn EquipmentCatalog,
    ) -> Result<Self, ConfigurationError> {
        let usages = definition
            .usages
            .iter()
            .map(|usage| Usage::build(usage, catalog))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.within(definition.id.as_str()))?;
        Ok(Self::with_usages(definition.clone(), usages))
    }

    // ===== use / refill / tick =====

    /// Uses the item once.
    ///
    /// Fails without side effects when the item is cooling down, out of
    /// ammunition, or has no amount left.
    pub fn use_item(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        let uses_ammo = self.max_ammo() > 0;
        if uses_ammo && self.ammo == 0 {
            return false;
        }
        if self.amount <= 0 {
            return false;
        }

        let cooldown = self
            .compiler
            .modify_number(
                ItemDefinition::COOLDOWN,
                f64::from(self.definition.cooldown),
            )
            .round()
            .max(0.0) as u32;
        self.cooldown = cooldown;
        self.whole_cooldown = cooldown;
        if uses_ammo {
            self.ammo -= 1;
        }
        if self.definition.consumable {
            self.amount -= 1;
        }
        true
    }

    /// Makes the item as new: ready, full ammunition, default amount.
    pub fn refill(&mut self) {
        self.cooldown = 0;
        self.whole_cooldown = 0;
        self.ammo = self.max_ammo();
        self.amount = self.definition.default_amount;
    }

    /// Advances the cooldown by one tick.
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    // ===== ammunition / amount =====

    /// Sets ammunition, clamped into `[0, max_ammo]`.
    pub fn set_ammo(&mut self, ammo: i64) {
        self.ammo = ammo.clamp(0, i64::from(self.max_ammo())) as u32;
    }

    /// Sets the amount. Returns false (and changes nothing) when `amount` is
    /// outside `[min_amount, max_amount]`.
    pub fn set_amount(&mut self, amount: i32) -> bool {
        if amount < self.min_amount() || amount > self.max_amount() {
            return false;
        }
        self.amount = amount;
        true
    }

    // ===== accessors =====

    pub fn id(&self) -> &EquipmentId {
        &self.definition.id
    }

    pub fn slot(&self) -> SlotIndex {
        self.definition.slot
    }

    pub fn weight(&self) -> f64 {
        self.definition.weight
    }

    pub fn definition(&self) -> &ItemDefinition {
        &self.definition
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown == 0
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Cooldown length recorded by the last successful use.
    pub fn whole_cooldown(&self) -> u32 {
        self.whole_cooldown
    }

    pub fn is_consumable(&self) -> bool {
        self.definition.consumable
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Effective ammunition capacity; zero means no ammunition is used.
    pub fn max_ammo(&self) -> u32 {
        self.compiler
            .modify_number(
                ItemDefinition::MAX_AMMO,
                f64::from(self.definition.max_ammo),
            )
            .round()
            .max(0.0) as u32
    }

    pub fn amount(&self) -> i32 {
        self.amount
    }

    pub fn min_amount(&self) -> i32 {
        self.definition.min_amount
    }

    pub fn max_amount(&self) -> i32 {
        self.definition.max_amount
    }

    pub fn default_amount(&self) -> i32 {
        self.definition.default_amount
    }

    pub fn usages(&self) -> &[Usage] {
        &self.usages
    }

    pub fn properties(&self) -> PropertyAccessor<'_> {
        PropertyAccessor::new(&self.definition.properties, &self.compiler)
    }

    // ===== modifications =====

    /// Installs `modification` on this item, its actions and activators,
    /// wherever it applies. Returns true if any compiler changed.
    pub fn add_modification(&mut self, modification: &Modification) -> bool {
        let mut changed = false;
        if modification.applies_to(ModificationTarget::UsableItem, &self.definition.id) {
            changed |= self.compiler.add_modification(modification.clone());
        }
        for usage in &mut self.usages {
            for action in &mut usage.actions {
                changed |= action.add_modification(modification);
            }
            for activator in &mut usage.activators {
                changed |= activator.add_modification(modification);
            }
        }
        self.ammo = self.ammo.min(self.max_ammo());
        changed
    }

    pub fn remove_modification(&mut self, modification: &Modification) -> bool {
        let mut changed = self.compiler.remove_modification(modification);
        for usage in &mut self.usages {
            for action in &mut usage.actions {
                changed |= action.remove_modification(modification);
            }
            for activator in &mut usage.activators {
                changed |= activator.remove_modification(modification);
            }
        }
        self.ammo = self.ammo.min(self.max_ammo());
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modification::Modifier;
    use crate::property::PropertyMap;

    fn definition(cooldown: u32, max_ammo: u32, consumable: bool) -> ItemDefinition {
        ItemDefinition {
            id: "rocket".into(),
            slot: SlotIndex(1),
            weight: 2.0,
            cooldown,
            max_ammo,
            consumable,
            min_amount: 0,
            max_amount: 5,
            default_amount: 3,
            usages: Vec::new(),
            properties: PropertyMap::new(),
        }
    }

    fn modification(modifiers: &[(&str, &str)]) -> Modification {
        Modification::new(
            "m",
            ModificationTarget::UsableItem,
            [EquipmentId::from("rocket")],
            modifiers.iter().map(|(p, v)| Modifier::new(*p, *v)),
        )
    }

    #[test]
    fn use_starts_cooldown_and_consumes() {
        let mut item = UsableItem::new(definition(3, 2, true));

        assert!(item.use_item());
        assert_eq!(item.cooldown(), 3);
        assert_eq!(item.whole_cooldown(), 3);
        assert_eq!(item.ammo(), 1);
        assert_eq!(item.amount(), 2);
        assert!(!item.is_ready());

        // Still cooling down: nothing changes.
        assert!(!item.use_item());
        assert_eq!(item.ammo(), 1);
        assert_eq!(item.amount(), 2);
    }

    #[test]
    fn tick_reaches_ready_exactly_at_zero() {
        let mut item = UsableItem::new(definition(2, 0, false));
        item.use_item();

        item.tick();
        assert!(!item.is_ready());
        item.tick();
        assert!(item.is_ready());
        item.tick();
        assert_eq!(item.cooldown(), 0);
    }

    #[test]
    fn empty_ammo_blocks_use_without_side_effects() {
        let mut item = UsableItem::new(definition(4, 2, true));
        item.set_ammo(0);

        assert!(!item.use_item());
        assert!(item.is_ready());
        assert_eq!(item.cooldown(), 0);
        assert_eq!(item.whole_cooldown(), 0);
        assert_eq!(item.amount(), 3);
        assert_eq!(item.ammo(), 0);
    }

    #[test]
    fn zero_amount_blocks_use() {
        let mut item = UsableItem::new(definition(0, 0, true));
        assert!(item.set_amount(0));
        assert!(!item.use_item());
    }

    #[test]
    fn items_without_ammunition_never_run_dry() {
        let mut item = UsableItem::new(definition(0, 0, false));
        for _ in 0..10 {
            assert!(item.use_item());
        }
        assert_eq!(item.ammo(), 0);
        assert_eq!(item.amount(), 3);
    }

    #[test]
    fn refill_restores_everything() {
        let mut item = UsableItem::new(definition(4, 2, true));
        item.use_item();
        item.use_item();
        item.refill();

        assert!(item.is_ready());
        assert_eq!(item.ammo(), 2);
        assert_eq!(item.amount(), 3);
    }

    #[test]
    fn ammo_is_clamped_and_amount_is_validated() {
        let mut item = UsableItem::new(definition(0, 4, false));
        item.set_ammo(10);
        assert_eq!(item.ammo(), 4);
        item.set_ammo(-3);
        assert_eq!(item.ammo(), 0);

        assert!(!item.set_amount(6));
        assert!(!item.set_amount(-1));
        assert_eq!(item.amount(), 3);
        assert!(item.set_amount(5));
        assert_eq!(item.amount(), 5);
    }

    #[test]
    fn thresholds_are_read_through_the_compiler() {
        let mut item = UsableItem::new(definition(10, 4, false));
        item.add_modification(&modification(&[("cooldown", "*(0.44)"), ("max_ammo", "+(2)")]));

        assert_eq!(item.max_ammo(), 6);
        item.refill();
        assert!(item.use_item());
        // 10 * 0.44 = 4.4, rounded
        assert_eq!(item.cooldown(), 4);
        assert_eq!(item.ammo(), 5);
    }

    #[test]
    fn negative_modified_cooldown_is_zero() {
        let mut item = UsableItem::new(definition(2, 0, false));
        item.add_modification(&modification(&[("cooldown", "+(-10)")]));

        assert!(item.use_item());
        assert!(item.is_ready());
    }

    #[test]
    fn removing_capacity_clamps_ammo() {
        let mut item = UsableItem::new(definition(0, 4, false));
        let m = modification(&[("max_ammo", "+(4)")]);
        item.add_modification(&m);
        item.refill();
        assert_eq!(item.ammo(), 8);

        item.remove_modification(&m);
        assert_eq!(item.ammo(), 4);
    }
}
