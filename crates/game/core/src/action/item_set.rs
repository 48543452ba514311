use crate::equipment::EquipmentCatalog;
use crate::error::ConfigurationError;
use crate::loadout::{ApplyOutcome, PlayerClass};
use crate::property::ValueLoader;

/// Applies a named loadout bundle to the acting player.
///
/// Whether the stored loadout changes too is decided by the bundle's
/// `persisting` flag.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemSetAction {
    pub bundle: String,
}

impl ItemSetAction {
    pub const BUNDLE: &'static str = "bundle";

    pub(super) fn load(loader: &ValueLoader<'_>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            bundle: loader.text(Self::BUNDLE)?.to_owned(),
        })
    }

    /// Returns true when the bundle produced an accepted outcome.
    ///
    /// A reset is not accepted here; only lobby clicks may reset a class.
    pub fn act(&self, class: &mut PlayerClass, catalog: &dyn EquipmentCatalog) -> bool {
        let Some(bundle) = catalog.bundle(&self.bundle) else {
            return false;
        };
        matches!(
            class.apply_bundle_if(bundle, ApplyOutcome::is_accepted_by_action),
            Ok(Some(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::test_support::TestCatalog;
    use crate::loadout::{AddType, Loadout, LoadoutBundle};
    use crate::state::{EquipmentId, SlotIndex};

    fn class() -> PlayerClass {
        let mut default = Loadout::new();
        default.set_item(SlotIndex(0), EquipmentId::from("rocket"), 1);
        PlayerClass::new("pilot", default)
    }

    #[test]
    fn applies_catalog_bundle() {
        let mut catalog = TestCatalog::default();
        let mut bundle = LoadoutBundle::new("more_rockets", AddType::Add);
        bundle.add_item("rocket", SlotIndex(0), 2);
        catalog.bundles.push(bundle);

        let mut class = class();
        let action = ItemSetAction {
            bundle: "more_rockets".into(),
        };

        assert!(action.act(&mut class, &catalog));
        assert_eq!(class.current().quantity(SlotIndex(0)), Some(3));
        // Not persisting: the stored loadout is untouched.
        assert_eq!(class.stored().quantity(SlotIndex(0)), Some(1));
    }

    #[test]
    fn unknown_bundle_and_reset_are_rejected() {
        let mut catalog = TestCatalog::default();
        catalog.bundles.push(LoadoutBundle::new("reset", AddType::Reset));
        let mut class = class();

        let missing = ItemSetAction {
            bundle: "nothing".into(),
        };
        let reset = ItemSetAction {
            bundle: "reset".into(),
        };

        assert!(!missing.act(&mut class, &catalog));
        assert!(!reset.act(&mut class, &catalog));
    }

    #[test]
    fn refused_reset_leaves_the_loadout_alone() {
        let mut catalog = TestCatalog::default();
        let mut more = LoadoutBundle::new("more_rockets", AddType::Add);
        more.add_item("rocket", SlotIndex(0), 5);
        catalog.bundles.push(more);
        catalog.bundles.push(LoadoutBundle::new("reset", AddType::Reset));

        let mut class = class();
        let more = ItemSetAction {
            bundle: "more_rockets".into(),
        };
        let reset = ItemSetAction {
            bundle: "reset".into(),
        };

        assert!(more.act(&mut class, &catalog));
        assert_eq!(class.current().quantity(SlotIndex(0)), Some(6));

        let before = class.clone();
        assert!(!reset.act(&mut class, &catalog));
        assert_eq!(class, before);
        assert_eq!(class.current().quantity(SlotIndex(0)), Some(6));
    }
}
