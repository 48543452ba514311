//! Identifiers and clock types shared by every subsystem.
mod common;

pub use common::{EntityId, EquipmentId, PlayerId, SlotIndex, Tick};
