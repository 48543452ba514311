//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for hosts to drive the game.

use std::env;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use aerial_content::{Catalog, GameContent};
use aerial_core::{GameConfig, PlayerClass};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::{Command, SimulationWorker};

/// How the simulation clock advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMode {
    /// A timer runs one tick every `1 / tick_rate_hz` seconds.
    Interval,
    /// Ticks only run through [`RuntimeHandle::advance`].
    Manual,
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub tick_mode: TickMode,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_mode: TickMode::Interval,
        }
    }
}

impl RuntimeConfig {
    pub fn with_game(game: GameConfig) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    /// Applies environment overrides on top of `self`.
    ///
    /// - `AERIAL_TICK_RATE`: ticks per second (at least 1)
    /// - `AERIAL_DEBOUNCE_TICKS`: lobby click debounce window
    /// - `AERIAL_MANUAL_TICKS`: `true` disables the tick timer
    pub fn overridden_from_env(mut self) -> Self {
        if let Some(rate) = read_env::<u32>("AERIAL_TICK_RATE") {
            self.game.tick_rate_hz = rate.max(1);
        }
        if let Some(ticks) = read_env::<u64>("AERIAL_DEBOUNCE_TICKS") {
            self.game.debounce_ticks = ticks;
        }
        if let Some(manual) = read_env::<bool>("AERIAL_MANUAL_TICKS") {
            self.tick_mode = if manual {
                TickMode::Manual
            } else {
                TickMode::Interval
            };
        }
        self
    }

    pub fn from_env() -> Self {
        Self::default().overridden_from_env()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that hosts player sessions
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: Option<RuntimeConfig>,
    catalog: Option<Catalog>,
    default_class: Option<PlayerClass>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: None,
            catalog: None,
            default_class: None,
        }
    }

    /// Override runtime configuration
    ///
    /// Without this, the game config of the loaded content is used.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Provide catalog and default class, and the game config unless one
    /// was set explicitly.
    pub fn content(mut self, content: GameContent) -> Self {
        if self.config.is_none() {
            self.config = Some(RuntimeConfig::with_game(content.config));
        }
        self.catalog = Some(content.catalog);
        self.default_class = Some(content.default_class);
        self
    }

    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn default_class(mut self, class: PlayerClass) -> Self {
        self.default_class = Some(class);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingContent)?;
        let default_class = self.default_class.ok_or(RuntimeError::MissingContent)?;
        let config = self.config.unwrap_or_default();

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker =
            SimulationWorker::new(config, catalog, default_class, command_rx, event_bus);

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_requires_content() {
        let result = Runtime::builder().build().await;
        assert!(matches!(result, Err(RuntimeError::MissingContent)));
    }

    #[test]
    fn explicit_config_wins_over_content() {
        let config = RuntimeConfig {
            tick_mode: TickMode::Manual,
            ..RuntimeConfig::default()
        };
        let content = GameContent {
            config: GameConfig {
                debounce_ticks: 9,
                ..GameConfig::default()
            },
            catalog: Catalog::new(),
            default_class: PlayerClass::new("Pilot", Default::default()),
        };

        let builder = Runtime::builder().config(config).content(content);
        let config = builder.config.unwrap();

        assert_eq!(config.tick_mode, TickMode::Manual);
        assert_eq!(config.game.debounce_ticks, GameConfig::DEFAULT_DEBOUNCE_TICKS);
    }
}
