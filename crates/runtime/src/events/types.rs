//! Event types for different topics.

use aerial_core::{
    ApplyOutcome, BurstPlan, EntityId, EquipmentId, HitResolution, PlayerId, SlotIndex, Tick,
};
use serde::{Deserialize, Serialize};

/// Events related to a player's class and loadout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LoadoutEvent {
    /// The player's loadout changed and the kit was rebuilt.
    Changed {
        player: PlayerId,
        /// Lobby bundle that caused the change, `None` for item-set actions.
        bundle: Option<String>,
        outcome: Option<ApplyOutcome>,
        class: String,
        money: i64,
        clock: Tick,
    },

    /// A lobby click was refused; nothing but a possible unlock was charged.
    Rejected {
        player: PlayerId,
        bundle: String,
        reason: String,
        clock: Tick,
    },
}

/// Events related to item use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemEvent {
    pub player: PlayerId,
    pub slot: SlotIndex,
    pub item: EquipmentId,
    /// False when the item refused the use (cooldown, ammo, amount).
    pub used: bool,
    /// Number of actions that reported success.
    pub succeeded: usize,
    pub failed: usize,
    pub clock: Tick,
}

/// Events related to projectiles and hits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CombatEvent {
    ProjectilesLaunched {
        player: PlayerId,
        plan: BurstPlan,
        clock: Tick,
    },

    /// A registered projectile hit a player.
    Hit(HitResolution),

    /// A registered projectile expired or left the game without a hit.
    EntityDestroyed { entity: EntityId },
}
