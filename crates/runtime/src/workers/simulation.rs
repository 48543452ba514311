//! Simulation worker that owns every player [`Session`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), advances
//! the fixed-rate tick loop, and publishes events to the EventBus. Commands
//! and ticks share one task, so an item use or loadout transaction always
//! runs to completion before the next tick.

use std::collections::BTreeMap;
use std::time::Duration;

use aerial_content::Catalog;
use aerial_core::{
    ActionResult, EntityId, EnumRegistry, EquipmentCatalog, HitDispatcher, HitResolution,
    Modification, PlayerClass, PlayerId, SlotIndex, Tick, UseReport,
};
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError};
use crate::events::{CombatEvent, Event, EventBus, ItemEvent, LoadoutEvent};
use crate::runtime::{RuntimeConfig, TickMode};
use crate::session::{PurchaseOutcome, Session, SessionSnapshot, World};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Start a session with the default class.
    Join {
        player: PlayerId,
        reply: oneshot::Sender<Result<SessionSnapshot>>,
    },
    /// End a session and forget the player's projectiles.
    Leave {
        player: PlayerId,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Record an occurrence for the player's activators this tick.
    Trigger {
        player: PlayerId,
        occurrence: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Use the item in a slot directly.
    UseItem {
        player: PlayerId,
        slot: SlotIndex,
        reply: oneshot::Sender<Result<Option<UseReport>>>,
    },
    /// Lobby click on a named bundle.
    ClickBundle {
        player: PlayerId,
        bundle: String,
        reply: oneshot::Sender<Result<PurchaseOutcome>>,
    },
    AddModification {
        player: PlayerId,
        modification: Modification,
        reply: oneshot::Sender<Result<bool>>,
    },
    RemoveModification {
        player: PlayerId,
        modification: Modification,
        reply: oneshot::Sender<Result<bool>>,
    },
    Respawn {
        player: PlayerId,
        reply: oneshot::Sender<Result<SessionSnapshot>>,
    },
    /// A spawned entity hit a player.
    Hit {
        entity: EntityId,
        victim: PlayerId,
        reply: oneshot::Sender<Option<HitResolution>>,
    },
    /// A spawned entity left the game.
    DestroyEntity {
        entity: EntityId,
        reply: oneshot::Sender<bool>,
    },
    /// Run `ticks` ticks immediately.
    Advance {
        ticks: u64,
        reply: oneshot::Sender<Result<Tick>>,
    },
    QuerySession {
        player: PlayerId,
        reply: oneshot::Sender<Result<SessionSnapshot>>,
    },
}

/// Background task that processes gameplay commands and ticks.
pub struct SimulationWorker {
    config: RuntimeConfig,
    catalog: Catalog,
    default_class: PlayerClass,
    registry: EnumRegistry,
    dispatcher: HitDispatcher,
    sessions: BTreeMap<PlayerId, Session>,
    clock: Tick,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        config: RuntimeConfig,
        catalog: Catalog,
        default_class: PlayerClass,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            tick_rate_hz = config.game.tick_rate_hz,
            debounce_ticks = config.game.debounce_ticks,
            class = default_class.name(),
            "SimulationWorker initialized"
        );

        Self {
            config,
            catalog,
            default_class,
            registry: EnumRegistry::with_defaults(),
            dispatcher: HitDispatcher::new(),
            sessions: BTreeMap::new(),
            clock: Tick::ZERO,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    ///
    /// Ends when every command sender has been dropped.
    pub async fn run(mut self) {
        let tick_millis = self.config.game.tick_millis().max(1);
        let ticking = self.config.tick_mode == TickMode::Interval;
        let mut interval = tokio::time::interval(Duration::from_millis(tick_millis));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = interval.tick(), if ticking => {
                    if let Err(error) = self.advance(1) {
                        warn!(target: "runtime::worker", %error, "tick failed");
                    }
                }
            }
        }

        debug!(target: "runtime::worker", clock = %self.clock, "SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Join { player, reply } => {
                let result = self.handle_join(player);
                if reply.send(result).is_err() {
                    debug!("Join reply channel closed (caller dropped)");
                }
            }
            Command::Leave { player, reply } => {
                let result = self.handle_leave(player);
                if reply.send(result).is_err() {
                    debug!("Leave reply channel closed (caller dropped)");
                }
            }
            Command::Trigger {
                player,
                occurrence,
                reply,
            } => {
                let result = self
                    .session_mut(player)
                    .map(|session| session.record_occurrence(occurrence));
                if reply.send(result).is_err() {
                    debug!("Trigger reply channel closed (caller dropped)");
                }
            }
            Command::UseItem {
                player,
                slot,
                reply,
            } => {
                let result = self.handle_use_item(player, slot);
                if reply.send(result).is_err() {
                    debug!("UseItem reply channel closed (caller dropped)");
                }
            }
            Command::ClickBundle {
                player,
                bundle,
                reply,
            } => {
                let result = self.handle_click_bundle(player, &bundle);
                if reply.send(result).is_err() {
                    debug!("ClickBundle reply channel closed (caller dropped)");
                }
            }
            Command::AddModification {
                player,
                modification,
                reply,
            } => {
                let result = self
                    .session_mut(player)
                    .map(|session| session.add_modification(modification));
                if reply.send(result).is_err() {
                    debug!("AddModification reply channel closed (caller dropped)");
                }
            }
            Command::RemoveModification {
                player,
                modification,
                reply,
            } => {
                let result = self
                    .session_mut(player)
                    .map(|session| session.remove_modification(&modification));
                if reply.send(result).is_err() {
                    debug!("RemoveModification reply channel closed (caller dropped)");
                }
            }
            Command::Respawn { player, reply } => {
                let result = self.handle_respawn(player);
                if reply.send(result).is_err() {
                    debug!("Respawn reply channel closed (caller dropped)");
                }
            }
            Command::Hit {
                entity,
                victim,
                reply,
            } => {
                let resolution = self.dispatcher.resolve_hit(entity, victim);
                if let Some(hit) = &resolution {
                    self.event_bus
                        .publish(Event::Combat(CombatEvent::Hit(hit.clone())));
                }
                if reply.send(resolution).is_err() {
                    debug!("Hit reply channel closed (caller dropped)");
                }
            }
            Command::DestroyEntity { entity, reply } => {
                let removed = self.dispatcher.destroy(entity);
                if removed {
                    self.event_bus
                        .publish(Event::Combat(CombatEvent::EntityDestroyed { entity }));
                }
                if reply.send(removed).is_err() {
                    debug!("DestroyEntity reply channel closed (caller dropped)");
                }
            }
            Command::Advance { ticks, reply } => {
                let result = self.advance(ticks).map(|()| self.clock);
                if reply.send(result).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::QuerySession { player, reply } => {
                let result = self
                    .sessions
                    .get(&player)
                    .map(Session::snapshot)
                    .ok_or(RuntimeError::UnknownPlayer(player));
                if reply.send(result).is_err() {
                    debug!("QuerySession reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn session_mut(&mut self, player: PlayerId) -> Result<&mut Session> {
        self.sessions
            .get_mut(&player)
            .ok_or(RuntimeError::UnknownPlayer(player))
    }

    fn handle_join(&mut self, player: PlayerId) -> Result<SessionSnapshot> {
        if self.sessions.contains_key(&player) {
            return Err(RuntimeError::AlreadyJoined(player));
        }
        let session = Session::new(
            player,
            self.default_class.clone(),
            self.config.game.starting_money,
            self.config.game.debounce_ticks,
            &self.catalog,
        )?;
        let snapshot = session.snapshot();
        self.sessions.insert(player, session);

        info!(target: "runtime::session", %player, "player joined");
        Ok(snapshot)
    }

    fn handle_leave(&mut self, player: PlayerId) -> Result<()> {
        self.sessions
            .remove(&player)
            .ok_or(RuntimeError::UnknownPlayer(player))?;
        let forgotten = self.dispatcher.forget_creator(player);

        info!(target: "runtime::session", %player, forgotten, "player left");
        Ok(())
    }

    fn handle_respawn(&mut self, player: PlayerId) -> Result<SessionSnapshot> {
        let session = self
            .sessions
            .get_mut(&player)
            .ok_or(RuntimeError::UnknownPlayer(player))?;
        session.respawn(&self.catalog)?;
        Ok(session.snapshot())
    }

    fn handle_use_item(&mut self, player: PlayerId, slot: SlotIndex) -> Result<Option<UseReport>> {
        let world = World {
            catalog: &self.catalog,
            registry: &self.registry,
        };
        let session = self
            .sessions
            .get_mut(&player)
            .ok_or(RuntimeError::UnknownPlayer(player))?;
        let report = session.use_slot(slot, world, &mut self.dispatcher)?;

        if let Some(report) = &report {
            publish_report(&self.event_bus, session, report, self.clock);
        }
        Ok(report)
    }

    fn handle_click_bundle(&mut self, player: PlayerId, name: &str) -> Result<PurchaseOutcome> {
        let bundle = self
            .catalog
            .bundle(name)
            .ok_or_else(|| RuntimeError::UnknownBundle(name.to_owned()))?;
        let session = self
            .sessions
            .get_mut(&player)
            .ok_or(RuntimeError::UnknownPlayer(player))?;

        let outcome = session.click_bundle(bundle, self.clock, &self.catalog)?;
        match &outcome {
            PurchaseOutcome::Applied { outcome, charged } => {
                debug!(
                    target: "runtime::lobby",
                    %player,
                    bundle = name,
                    %outcome,
                    charged,
                    "bundle applied"
                );
                self.event_bus.publish(Event::Loadout(LoadoutEvent::Changed {
                    player,
                    bundle: Some(name.to_owned()),
                    outcome: Some(*outcome),
                    class: session.class().name().to_owned(),
                    money: session.money(),
                    clock: self.clock,
                }));
            }
            PurchaseOutcome::Debounced => {
                debug!(target: "runtime::lobby", %player, bundle = name, "click debounced");
            }
            rejected => {
                let reason = match rejected {
                    PurchaseOutcome::Locked { unlock_cost, money } => {
                        format!("unlocking costs {unlock_cost}, player has {money}")
                    }
                    PurchaseOutcome::TooExpensive { buy_cost, money } => {
                        format!("buying costs {buy_cost}, player has {money}")
                    }
                    PurchaseOutcome::Conflict(conflict) => conflict.to_string(),
                    PurchaseOutcome::Applied { .. } | PurchaseOutcome::Debounced => String::new(),
                };
                debug!(target: "runtime::lobby", %player, bundle = name, %reason, "bundle rejected");
                self.event_bus.publish(Event::Loadout(LoadoutEvent::Rejected {
                    player,
                    bundle: name.to_owned(),
                    reason,
                    clock: self.clock,
                }));
            }
        }
        Ok(outcome)
    }

    /// Runs `ticks` ticks over every session, then expires projectiles that
    /// outlived their lifetime.
    ///
    /// A session whose kit cannot be rebuilt keeps its previous kit; the
    /// first such error is returned after all sessions have ticked.
    fn advance(&mut self, ticks: u64) -> Result<()> {
        let mut first_error = None;
        for _ in 0..ticks {
            let world = World {
                catalog: &self.catalog,
                registry: &self.registry,
            };
            for session in self.sessions.values_mut() {
                match session.tick(world, &mut self.dispatcher) {
                    Ok(reports) => {
                        for report in &reports {
                            publish_report(&self.event_bus, session, report, self.clock);
                        }
                    }
                    Err(error) => {
                        warn!(
                            target: "runtime::session",
                            player = %session.player(),
                            %error,
                            "kit rebuild failed"
                        );
                        first_error.get_or_insert(error);
                    }
                }
            }
            for entity in self.dispatcher.advance() {
                self.event_bus
                    .publish(Event::Combat(CombatEvent::EntityDestroyed { entity }));
            }
            self.clock = self.clock + 1;
        }
        match first_error {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

/// Publishes the events describing one item use.
fn publish_report(bus: &EventBus, session: &Session, report: &UseReport, clock: Tick) {
    let player = session.player();
    let succeeded = report.results.iter().filter(|r| r.is_success()).count();

    bus.publish(Event::Item(ItemEvent {
        player,
        slot: report.slot,
        item: report.item.clone(),
        used: report.used,
        succeeded,
        failed: report.results.len() - succeeded,
        clock,
    }));

    for result in &report.results {
        if let ActionResult::Launched(plan) = result {
            bus.publish(Event::Combat(CombatEvent::ProjectilesLaunched {
                player,
                plan: plan.clone(),
                clock,
            }));
        }
    }

    if report.loadout_changed() {
        bus.publish(Event::Loadout(LoadoutEvent::Changed {
            player,
            bundle: None,
            outcome: None,
            class: session.class().name().to_owned(),
            money: session.money(),
            clock,
        }));
    }
}
