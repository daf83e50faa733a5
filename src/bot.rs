//! Process lifecycle - explicit bootstrap wiring
//!
//! All state lives here and is passed down through the dispatcher; there is
//! no global initialization guard.

use std::sync::Arc;

use crate::application::commands;
use crate::application::cooldown::Cooldowns;
use crate::application::errors::BotError;
use crate::application::messaging::dispatcher::Dispatcher;
use crate::application::services::EconomyService;
use crate::domain::entities::{AppOwner, CommandRegistry, Inbound};
use crate::domain::traits::Gateway;
use crate::infrastructure::config::Config;
use crate::infrastructure::database::Database;

/// Shared state reachable from every command handler.
pub struct BotState {
    pub config: Config,
    pub database: Database,
    pub economy: EconomyService,
    pub owner: AppOwner,
    pub cooldowns: Cooldowns,
}

/// A fully wired bot instance.
pub struct Bot {
    dispatcher: Dispatcher,
}

impl Bot {
    /// Build the store, services and command registry. A duplicate command
    /// name or alias aborts startup here.
    pub async fn bootstrap(config: Config) -> Result<Self, BotError> {
        let database =
            Database::connect(&config.database.url, config.database.max_connections).await?;
        tracing::info!("Database initialized");

        if config.owners.is_empty() {
            tracing::warn!("No owners configured; owner-level commands are unreachable");
        }
        let owner = AppOwner::from_ids(&config.owners);

        let economy = EconomyService::new(database.clone());
        let prefix = config.bot.prefix.clone();
        let state = Arc::new(BotState {
            config,
            database,
            economy,
            owner,
            cooldowns: Cooldowns::new(),
        });

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry)?;
        tracing::info!("Registered {} commands", registry.len());

        Ok(Self {
            dispatcher: Dispatcher::new(prefix, registry, state),
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Feed one inbound message through the dispatch pipeline.
    pub async fn handle(&self, gateway: &dyn Gateway, msg: &Inbound) {
        self.dispatcher.dispatch(gateway, msg).await;
    }
}
