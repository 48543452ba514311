//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving sessions or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use aerial_core::{EntityId, HitResolution, Modification, PlayerId, SlotIndex, Tick, UseReport};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::session::{PurchaseOutcome, SessionSnapshot};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the reply.
    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start a session for `player` with the default class
    pub async fn join(&self, player: PlayerId) -> Result<SessionSnapshot> {
        self.request(|reply| Command::Join { player, reply }).await?
    }

    pub async fn leave(&self, player: PlayerId) -> Result<()> {
        self.request(|reply| Command::Leave { player, reply }).await?
    }

    /// Record an occurrence (click, key press) for the player's activators.
    ///
    /// Matching items fire when the current tick ends.
    pub async fn trigger(&self, player: PlayerId, occurrence: impl Into<String>) -> Result<()> {
        let occurrence = occurrence.into();
        self.request(|reply| Command::Trigger {
            player,
            occurrence,
            reply,
        })
        .await?
    }

    /// Use the item in `slot` directly; `None` if the slot is empty
    pub async fn use_item(&self, player: PlayerId, slot: SlotIndex) -> Result<Option<UseReport>> {
        self.request(|reply| Command::UseItem {
            player,
            slot,
            reply,
        })
        .await?
    }

    /// Click a lobby bundle
    pub async fn click_bundle(
        &self,
        player: PlayerId,
        bundle: impl Into<String>,
    ) -> Result<PurchaseOutcome> {
        let bundle = bundle.into();
        self.request(|reply| Command::ClickBundle {
            player,
            bundle,
            reply,
        })
        .await?
    }

    /// Add a modification to the player's active set
    ///
    /// Returns false if it was already active.
    pub async fn add_modification(
        &self,
        player: PlayerId,
        modification: Modification,
    ) -> Result<bool> {
        self.request(|reply| Command::AddModification {
            player,
            modification,
            reply,
        })
        .await?
    }

    pub async fn remove_modification(
        &self,
        player: PlayerId,
        modification: Modification,
    ) -> Result<bool> {
        self.request(|reply| Command::RemoveModification {
            player,
            modification,
            reply,
        })
        .await?
    }

    /// Restore the player's stored loadout with a refilled kit
    pub async fn respawn(&self, player: PlayerId) -> Result<SessionSnapshot> {
        self.request(|reply| Command::Respawn { player, reply }).await?
    }

    /// Report that a spawned entity hit `victim`
    ///
    /// Returns `None` for entities this runtime did not spawn.
    pub async fn report_hit(
        &self,
        entity: EntityId,
        victim: PlayerId,
    ) -> Result<Option<HitResolution>> {
        self.request(|reply| Command::Hit {
            entity,
            victim,
            reply,
        })
        .await
    }

    /// Report that a spawned entity left the game without a hit
    pub async fn destroy_entity(&self, entity: EntityId) -> Result<bool> {
        self.request(|reply| Command::DestroyEntity { entity, reply })
            .await
    }

    /// Run `ticks` ticks immediately and return the new clock
    pub async fn advance(&self, ticks: u64) -> Result<Tick> {
        self.request(|reply| Command::Advance { ticks, reply }).await?
    }

    /// Query a player's session (read-only snapshot)
    pub async fn query_session(&self, player: PlayerId) -> Result<SessionSnapshot> {
        self.request(|reply| Command::QuerySession { player, reply })
            .await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Loadout` - Class changes and lobby purchases
    /// - `Topic::Item` - Item uses
    /// - `Topic::Combat` - Launched projectiles and hits
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
