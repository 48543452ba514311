use std::collections::HashMap;

use crate::state::{EntityId, EquipmentId, PlayerId, Tick};

/// Who launched an entity and with what.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRecord {
    /// Action that spawned the entity.
    pub weapon: EquipmentId,
    /// Usable item the action belongs to.
    pub item: Option<EquipmentId>,
    pub creator: PlayerId,
    /// Player the action was run for (the creator for self-fired weapons).
    pub target: PlayerId,
}

/// A hit by a registered entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitResolution {
    pub entity: EntityId,
    pub victim: PlayerId,
    pub record: AttackRecord,
}

#[derive(Debug)]
struct Tracked {
    record: AttackRecord,
    expires: Tick,
}

/// Side-table from spawned entities to their attack records.
///
/// One dispatcher exists per simulation and is handed to weapons by `&mut`.
/// Entity ids are allocated here and skip ids that are still live, so an id
/// never refers to two live records. Records expire after the lifetime they
/// were registered with; [`advance`](Self::advance) sweeps them.
#[derive(Debug, Default)]
pub struct HitDispatcher {
    records: HashMap<EntityId, Tracked>,
    next_id: u32,
    now: Tick,
}

impl HitDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under a fresh entity id for `lifetime_ticks` ticks.
    pub fn register(&mut self, record: AttackRecord, lifetime_ticks: u32) -> EntityId {
        let mut id = EntityId(self.next_id);
        while self.records.contains_key(&id) {
            self.next_id = self.next_id.wrapping_add(1);
            id = EntityId(self.next_id);
        }
        self.next_id = self.next_id.wrapping_add(1);
        self.records.insert(
            id,
            Tracked {
                record,
                expires: self.now + u64::from(lifetime_ticks),
            },
        );
        id
    }

    pub fn record(&self, entity: EntityId) -> Option<&AttackRecord> {
        self.records.get(&entity).map(|tracked| &tracked.record)
    }

    /// Consumes the record of an entity that hit `victim`.
    ///
    /// Returns `None` for entities this dispatcher never registered (or that
    /// already hit something or expired), which the host must leave alone.
    pub fn resolve_hit(&mut self, entity: EntityId, victim: PlayerId) -> Option<HitResolution> {
        self.records
            .remove(&entity)
            .map(|tracked| HitResolution {
                entity,
                victim,
                record: tracked.record,
            })
    }

    /// Drops the record of an entity removed from the world without a hit.
    pub fn destroy(&mut self, entity: EntityId) -> bool {
        self.records.remove(&entity).is_some()
    }

    /// Drops every record created by `player`; returns how many were removed.
    pub fn forget_creator(&mut self, player: PlayerId) -> usize {
        let before = self.records.len();
        self.records.retain(|_, tracked| tracked.record.creator != player);
        before - self.records.len()
    }

    /// Advances the dispatcher clock by one tick and drops every record whose
    /// lifetime is over. Returns the expired entities in id order.
    pub fn advance(&mut self) -> Vec<EntityId> {
        self.now = self.now + 1;
        let now = self.now;
        let mut expired: Vec<EntityId> = self
            .records
            .iter()
            .filter(|(_, tracked)| tracked.expires <= now)
            .map(|(id, _)| *id)
            .collect();
        expired.sort();
        for id in &expired {
            self.records.remove(id);
        }
        expired
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
