use super::{AddType, Loadout, LoadoutBundle};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EquipmentId, SlotIndex};

/// Successful result of applying a bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ApplyOutcome {
    /// Equipment was replaced (CLEAR / REPLACE).
    Replaced,
    /// Equipment was added into empty places.
    Added,
    /// At least one quantity was summed into an existing stack.
    Filled,
    /// Equipment was taken away.
    Removed,
    /// The default class was restored.
    Reset,
}

impl ApplyOutcome {
    /// Outcomes an item-set action reports as success.
    pub fn is_accepted_by_action(self) -> bool {
        !matches!(self, Self::Reset)
    }
}

/// Reason a bundle could not be applied. The loadout is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransactionConflict {
    #[error("engine '{current}' is already mounted")]
    EngineOccupied { current: EquipmentId },

    #[error("wings '{current}' are already mounted")]
    WingsOccupied { current: EquipmentId },

    #[error("{slot} holds '{current}', not '{requested}'")]
    SlotMismatch {
        slot: SlotIndex,
        current: EquipmentId,
        requested: EquipmentId,
    },

    #[error("cannot take {requested} of '{item}' from {slot}, only {available} left")]
    NotEnoughItems {
        slot: SlotIndex,
        item: EquipmentId,
        requested: u32,
        available: u32,
    },
}

impl GameError for TransactionConflict {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EngineOccupied { .. } => "LOADOUT_ENGINE_OCCUPIED",
            Self::WingsOccupied { .. } => "LOADOUT_WINGS_OCCUPIED",
            Self::SlotMismatch { .. } => "LOADOUT_SLOT_MISMATCH",
            Self::NotEnoughItems { .. } => "LOADOUT_NOT_ENOUGH_ITEMS",
        }
    }
}

/// Applies `bundle` to a staged copy of `current`.
///
/// `default` is the loadout restored by [`AddType::Reset`]. On success the
/// returned loadout replaces `current`; on conflict `current` was never
/// touched.
pub fn apply(
    bundle: &LoadoutBundle,
    current: &Loadout,
    default: &Loadout,
) -> Result<(Loadout, ApplyOutcome), TransactionConflict> {
    let mut staged = current.clone();
    let outcome = match bundle.add_type {
        AddType::Reset => {
            staged = default.clone();
            ApplyOutcome::Reset
        }
        AddType::Clear => {
            staged.engine = bundle.engine.clone();
            staged.wings = bundle.wings.clone();
            staged.items.clear();
            for entry in &bundle.items {
                staged.set_item(entry.slot, entry.item.clone(), entry.quantity);
            }
            ApplyOutcome::Replaced
        }
        AddType::Replace => {
            if let Some(engine) = &bundle.engine {
                staged.engine = Some(engine.clone());
            }
            if let Some(wings) = &bundle.wings {
                staged.wings = Some(wings.clone());
            }
            for entry in &bundle.items {
                staged.set_item(entry.slot, entry.item.clone(), entry.quantity);
            }
            ApplyOutcome::Replaced
        }
        AddType::Add => add(bundle, &mut staged)?,
        AddType::Take => take(bundle, &mut staged)?,
    };
    Ok((staged, outcome))
}

fn add(bundle: &LoadoutBundle, staged: &mut Loadout) -> Result<ApplyOutcome, TransactionConflict> {
    if let Some(engine) = &bundle.engine {
        if let Some(current) = &staged.engine {
            return Err(TransactionConflict::EngineOccupied {
                current: current.clone(),
            });
        }
        staged.engine = Some(engine.clone());
    }
    if let Some(wings) = &bundle.wings {
        if let Some(current) = &staged.wings {
            return Err(TransactionConflict::WingsOccupied {
                current: current.clone(),
            });
        }
        staged.wings = Some(wings.clone());
    }

    let mut filled = false;
    for entry in &bundle.items {
        match staged.items.get_mut(&entry.slot) {
            Some(stack) if stack.item == entry.item => {
                stack.quantity = stack.quantity.saturating_add(entry.quantity);
                filled = true;
            }
            Some(stack) => {
                return Err(TransactionConflict::SlotMismatch {
                    slot: entry.slot,
                    current: stack.item.clone(),
                    requested: entry.item.clone(),
                });
            }
            None => staged.set_item(entry.slot, entry.item.clone(), entry.quantity),
        }
    }

    Ok(if filled {
        ApplyOutcome::Filled
    } else {
        ApplyOutcome::Added
    })
}

fn take(bundle: &LoadoutBundle, staged: &mut Loadout) -> Result<ApplyOutcome, TransactionConflict> {
    if bundle.engine.is_some() && bundle.engine == staged.engine {
        staged.engine = None;
    }
    if bundle.wings.is_some() && bundle.wings == staged.wings {
        staged.wings = None;
    }

    for entry in &bundle.items {
        let available = match staged.items.get(&entry.slot) {
            Some(stack) if stack.item == entry.item => stack.quantity,
            Some(stack) => {
                return Err(TransactionConflict::SlotMismatch {
                    slot: entry.slot,
                    current: stack.item.clone(),
                    requested: entry.item.clone(),
                });
            }
            None => 0,
        };
        match available.checked_sub(entry.quantity) {
            None => {
                return Err(TransactionConflict::NotEnoughItems {
                    slot: entry.slot,
                    item: entry.item.clone(),
                    requested: entry.quantity,
                    available,
                });
            }
            Some(0) => {
                staged.items.remove(&entry.slot);
            }
            Some(left) => staged.set_item(entry.slot, entry.item.clone(), left),
        }
    }

    Ok(ApplyOutcome::Removed)
}
