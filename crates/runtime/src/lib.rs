//! Runtime orchestration for the aerial combat simulation.
//!
//! This crate wires player sessions, the lobby purchase flow and the tick loop
//! into a cohesive runtime API. Consumers embed [`Runtime`] to drive sessions,
//! subscribe to events, and interact with the game through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`session`] holds per-player state and the lobby rules
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{CombatEvent, Event, EventBus, ItemEvent, LoadoutEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, TickMode};
pub use session::{ItemSnapshot, PurchaseOutcome, Session, SessionSnapshot, TriggerGuard};
