//! Lobby purchases: unlocking and buying loadout bundles.

use aerial_core::{
    ApplyOutcome, ConfigurationError, EquipmentCatalog, LoadoutBundle, Tick, TransactionConflict,
};

use super::Session;

/// Result of one click on a lobby bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The bundle was applied and `charged` money was spent in total
    /// (unlock included).
    Applied { outcome: ApplyOutcome, charged: i64 },
    /// The click followed another one too closely and was ignored.
    Debounced,
    /// The bundle is locked and the player cannot afford to unlock it.
    Locked { unlock_cost: i64, money: i64 },
    /// The bundle is unlocked but the player cannot afford to buy it.
    TooExpensive { buy_cost: i64, money: i64 },
    /// The bundle conflicts with the current loadout.
    Conflict(TransactionConflict),
}

impl PurchaseOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

impl Session {
    pub fn is_unlocked(&self, bundle: &str) -> bool {
        self.unlocked.contains(bundle)
    }

    /// Handles a lobby click on `bundle` at tick `now`.
    ///
    /// The first click unlocks the bundle, charging its unlock cost, and goes
    /// on to buy it in the same click. An unlock stays paid even if the
    /// purchase then fails. The buy cost is charged only once the new kit
    /// has been built; if that fails the class is restored.
    pub fn click_bundle(
        &mut self,
        bundle: &LoadoutBundle,
        now: Tick,
        catalog: &dyn EquipmentCatalog,
    ) -> Result<PurchaseOutcome, ConfigurationError> {
        if !self.guard.admit(now) {
            return Ok(PurchaseOutcome::Debounced);
        }

        let mut charged = 0;
        if !self.unlocked.contains(&bundle.name) {
            if bundle.costs.unlock > self.money {
                return Ok(PurchaseOutcome::Locked {
                    unlock_cost: bundle.costs.unlock,
                    money: self.money,
                });
            }
            self.money -= bundle.costs.unlock;
            charged += bundle.costs.unlock;
            self.unlocked.insert(bundle.name.clone());
        }

        if bundle.costs.buy > self.money {
            return Ok(PurchaseOutcome::TooExpensive {
                buy_cost: bundle.costs.buy,
                money: self.money,
            });
        }

        let previous = self.class.clone();
        match self.class.apply_bundle(bundle) {
            Ok(outcome) => {
                if let Err(error) = self.rebuild_kit(catalog) {
                    self.class = previous;
                    return Err(error);
                }
                self.money -= bundle.costs.buy;
                charged += bundle.costs.buy;
                Ok(PurchaseOutcome::Applied { outcome, charged })
            }
            Err(conflict) => Ok(PurchaseOutcome::Conflict(conflict)),
        }
    }
}
