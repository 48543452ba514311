use crate::equipment::Wings;
use crate::error::ConfigurationError;
use crate::modification::ModificationCompiler;
use crate::property::ValueLoader;

/// Changes the health of the acting player's wings.
///
/// Positive amounts repair, negative amounts damage.
#[derive(Clone, Debug, PartialEq)]
pub struct WingsHealthAction {
    pub amount: f64,
}

impl WingsHealthAction {
    pub const AMOUNT: &'static str = "amount";

    pub(super) fn load(loader: &ValueLoader<'_>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            amount: loader.number(Self::AMOUNT)?,
        })
    }

    pub fn act(&self, compiler: &ModificationCompiler, wings: Option<&mut Wings>) -> bool {
        let Some(wings) = wings else {
            return false;
        };
        let amount = compiler.modify_number(Self::AMOUNT, self.amount);
        if amount >= 0.0 {
            wings.add_health(amount)
        } else {
            wings.remove_health(-amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::WingsDefinition;
    use crate::modification::{Modification, ModificationTarget, Modifier};
    use crate::property::PropertyMap;

    fn wings(health: f64) -> Wings {
        let mut wings = Wings::new(WingsDefinition {
            id: "glider".into(),
            max_health: 100.0,
            lifting_force: 1.0,
            aerodynamics: 0.5,
            properties: PropertyMap::new(),
        });
        wings.remove_health(100.0 - health);
        wings
    }

    #[test]
    fn negative_amount_damages_wings() {
        let action = WingsHealthAction { amount: -30.0 };
        let mut wings = wings(100.0);

        assert!(action.act(&ModificationCompiler::new(), Some(&mut wings)));
        assert_eq!(wings.health(), 70.0);
    }

    #[test]
    fn amount_is_read_through_compiler() {
        let action = WingsHealthAction { amount: 10.0 };
        let mut compiler = ModificationCompiler::new();
        compiler.add_modification(Modification::new(
            "medic",
            ModificationTarget::Action,
            [crate::state::EquipmentId::from("repair")],
            [Modifier::new("amount", "+(15)")],
        ));
        let mut wings = wings(50.0);

        assert!(action.act(&compiler, Some(&mut wings)));
        assert_eq!(wings.health(), 75.0);
    }

    #[test]
    fn fails_without_wings_or_at_full_health() {
        let action = WingsHealthAction { amount: 10.0 };
        let compiler = ModificationCompiler::new();
        let mut full = wings(100.0);

        assert!(!action.act(&compiler, None));
        assert!(!action.act(&compiler, Some(&mut full)));
    }
}
