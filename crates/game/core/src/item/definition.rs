use crate::error::ConfigurationError;
use crate::property::{PropertyMap, ValueLoader};
use crate::state::{EquipmentId, SlotIndex};

/// One way of using an item: when every activator is active, every action
/// runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UsageDefinition {
    pub activators: Vec<EquipmentId>,
    pub actions: Vec<EquipmentId>,
}

/// Immutable content of a usable item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemDefinition {
    pub id: EquipmentId,
    pub slot: SlotIndex,
    pub weight: f64,
    /// Cooldown in ticks started by every successful use.
    pub cooldown: u32,
    /// Zero means the item does not use ammunition.
    pub max_ammo: u32,
    pub consumable: bool,
    pub min_amount: i32,
    pub max_amount: i32,
    pub default_amount: i32,
    pub usages: Vec<UsageDefinition>,
    pub properties: PropertyMap,
}

impl ItemDefinition {
    pub const SLOT: &'static str = "slot";
    pub const WEIGHT: &'static str = "weight";
    pub const COOLDOWN: &'static str = "cooldown";
    pub const MAX_AMMO: &'static str = "max_ammo";
    pub const CONSUMABLE: &'static str = "consumable";
    pub const MIN_AMOUNT: &'static str = "min_amount";
    pub const MAX_AMOUNT: &'static str = "max_amount";
    pub const DEFAULT_AMOUNT: &'static str = "default_amount";

    pub fn from_properties(
        id: EquipmentId,
        properties: PropertyMap,
        usages: Vec<UsageDefinition>,
    ) -> Result<Self, ConfigurationError> {
        Self::load(id.clone(), &properties)
            .map(|definition| Self {
                usages,
                properties,
                ..definition
            })
            .map_err(|e| e.within(id.as_str()))
    }

    fn load(id: EquipmentId, properties: &PropertyMap) -> Result<Self, ConfigurationError> {
        let loader = ValueLoader::new(properties);

        let slot = loader.int(Self::SLOT)?;
        let slot = u8::try_from(slot).map_err(|_| ConfigurationError::OutOfRange {
            key: Self::SLOT.into(),
            constraint: "between 0 and 255",
            value: f64::from(slot),
        })?;

        let min_amount = loader.int_or(Self::MIN_AMOUNT, 0)?;
        let max_amount = loader.int_or(Self::MAX_AMOUNT, 1)?;
        let default_amount = loader.int_or(Self::DEFAULT_AMOUNT, max_amount)?;
        // Consumption stops at zero, so a positive minimum could never be held.
        if min_amount > 0 || min_amount > default_amount || default_amount > max_amount {
            return Err(ConfigurationError::InvalidAmountBounds {
                min: min_amount,
                default: default_amount,
                max: max_amount,
            });
        }

        Ok(Self {
            id,
            slot: SlotIndex(slot),
            weight: loader.number_or(Self::WEIGHT, 0.0)?,
            cooldown: loader.non_negative_int_or(Self::COOLDOWN, 0)?,
            max_ammo: loader.non_negative_int_or(Self::MAX_AMMO, 0)?,
            consumable: loader.boolean_or(Self::CONSUMABLE, false)?,
            min_amount,
            max_amount,
            default_amount,
            usages: Vec::new(),
            properties: PropertyMap::new(),
        })
    }
}
