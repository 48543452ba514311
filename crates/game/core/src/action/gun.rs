use super::{ActionEnv, ProjectileKind};
use crate::combat::AttackRecord;
use crate::error::ConfigurationError;
use crate::modification::ModificationCompiler;
use crate::property::ValueLoader;
use crate::state::{EntityId, EquipmentId};

/// Burst weapon launching unguided projectiles.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileGun {
    pub entity: ProjectileKind,
    pub burst_amount: u32,
    pub burst_ticks: u32,
    pub projectile_speed: f64,
}

/// Launch schedule handed to the host after a gun fires.
///
/// Projectile `n` (0-based) leaves the gun `n * interval_ticks` ticks after
/// firing and is despawned after `lifetime_ticks`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BurstPlan {
    pub weapon: EquipmentId,
    pub entity: ProjectileKind,
    pub projectile_speed: f64,
    pub interval_ticks: u32,
    pub lifetime_ticks: u32,
    pub projectiles: Vec<EntityId>,
}

impl ProjectileGun {
    pub const ENTITY: &'static str = "entity";
    pub const BURST_AMOUNT: &'static str = "burst_amount";
    pub const BURST_TICKS: &'static str = "burst_ticks";
    pub const PROJECTILE_SPEED: &'static str = "projectile_speed";

    /// Ten seconds at 20 ticks per second.
    pub const LIFETIME_TICKS: u32 = 10 * 20;

    pub(super) fn load(loader: &ValueLoader<'_>) -> Result<Self, ConfigurationError> {
        Ok(Self {
            entity: loader.enumerated(Self::ENTITY)?,
            burst_amount: loader.positive_int(Self::BURST_AMOUNT)?,
            burst_ticks: loader.positive_int(Self::BURST_TICKS)?,
            projectile_speed: loader.positive_number(Self::PROJECTILE_SPEED)?,
        })
    }

    /// Registers every projectile of one burst in the hit dispatcher.
    ///
    /// Modified amounts below one still launch a single projectile.
    pub fn fire(
        &self,
        weapon: &EquipmentId,
        compiler: &ModificationCompiler,
        item: &EquipmentId,
        env: &mut ActionEnv<'_>,
    ) -> BurstPlan {
        let amount = compiler
            .modify_number(Self::BURST_AMOUNT, f64::from(self.burst_amount))
            .max(1.0) as u32;
        let interval = compiler
            .modify_number(Self::BURST_TICKS, f64::from(self.burst_ticks))
            .max(1.0) as u32;
        let speed = compiler.modify_number(Self::PROJECTILE_SPEED, self.projectile_speed);
        let entity = compiler.modify_enum(env.registry, Self::ENTITY, self.entity);

        // Later projectiles of the burst leave the barrel `interval` ticks apart.
        let projectiles = (0..amount)
            .map(|index| {
                env.dispatcher.register(
                    AttackRecord {
                        weapon: weapon.clone(),
                        item: Some(item.clone()),
                        creator: env.player,
                        target: env.player,
                    },
                    Self::LIFETIME_TICKS.saturating_add(index.saturating_mul(interval)),
                )
            })
            .collect();

        BurstPlan {
            weapon: weapon.clone(),
            entity,
            projectile_speed: speed,
            interval_ticks: interval,
            lifetime_ticks: Self::LIFETIME_TICKS,
            projectiles,
        }
    }
}
