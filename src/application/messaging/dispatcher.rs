//! Message dispatcher - routes inbound messages to command handlers
//!
//! Per-message pipeline, terminal at the first failing gate: guild check,
//! prefix parse, registry resolution, capability check, permission check,
//! handler invocation. Handler failures are contained here; the loop itself
//! never crashes.

use std::sync::Arc;

use super::parser::MessageParser;
use crate::application::errors::GatewayError;
use crate::application::permissions::check_permission;
use crate::bot::BotState;
use crate::domain::entities::{Capability, CapabilitySet, CommandRegistry, Inbound, Outbound};
use crate::domain::traits::Gateway;

/// Capabilities every command needs before its own requirements are added.
const BASELINE: &[Capability] = &[Capability::SendMessages, Capability::EmbedLinks];

/// Everything a command handler may reach during one invocation.
pub struct CommandContext<'a> {
    pub bot: &'a BotState,
    pub gateway: &'a dyn Gateway,
    pub registry: &'a CommandRegistry,
    pub msg: &'a Inbound,
}

impl CommandContext<'_> {
    /// Reply into the originating channel.
    pub async fn reply(&self, content: Outbound) -> Result<String, GatewayError> {
        self.gateway.send(&self.msg.channel_id, content).await
    }
}

/// Routes inbound messages through the gate pipeline to handlers.
pub struct Dispatcher {
    parser: MessageParser,
    registry: CommandRegistry,
    state: Arc<BotState>,
}

impl Dispatcher {
    pub fn new(prefix: impl Into<String>, registry: CommandRegistry, state: Arc<BotState>) -> Self {
        Self {
            parser: MessageParser::new(prefix),
            registry,
            state,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Process one inbound message end to end.
    pub async fn dispatch(&self, gateway: &dyn Gateway, msg: &Inbound) {
        if msg.author.is_bot {
            return;
        }
        // Commands are guild-only; direct messages are ignored.
        let Some(guild) = msg.guild.as_ref() else {
            return;
        };
        let Some(parsed) = self.parser.parse(&msg.text) else {
            return;
        };
        let Some(command) = self.registry.resolve(&parsed.command) else {
            tracing::debug!("Unknown command token: {}", parsed.command);
            return;
        };

        let required = CapabilitySet::of(BASELINE).union(&command.capabilities);
        let granted = guild
            .bot_member
            .as_ref()
            .map(|bot| bot.capabilities.clone())
            .unwrap_or_default();
        let missing = required.missing(&granted);
        if !missing.is_empty() {
            let list = missing
                .iter()
                .map(|cap| cap.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::info!("Missing capabilities for {}: {}", command.name, list);
            if let Err(e) = gateway
                .send(
                    &msg.channel_id,
                    Outbound::text(format!(
                        ":x: I am missing the following permissions to run that command: {}",
                        list
                    )),
                )
                .await
            {
                tracing::warn!("Failed to report missing capabilities: {}", e);
            }
            return;
        }

        // Denials are silent towards the channel so commands above the
        // invoker's level stay invisible.
        if !check_permission(&self.state.owner, msg, command.permission) {
            tracing::debug!(
                "Permission denied for {} running {}",
                msg.author.id,
                command.name
            );
            return;
        }

        let ctx = CommandContext {
            bot: &self.state,
            gateway,
            registry: &self.registry,
            msg,
        };
        if let Err(e) = command.run(&ctx, &parsed).await {
            tracing::error!("Command {} failed: {}", command.name, e);
            if let Err(send_err) = gateway
                .send(
                    &msg.channel_id,
                    Outbound::text(":x: Something went wrong while running that command."),
                )
                .await
            {
                tracing::warn!("Failed to report command failure: {}", send_err);
            }
        }
    }
}
