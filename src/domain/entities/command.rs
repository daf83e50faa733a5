use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{Capability, CapabilitySet};
use crate::application::errors::{BotError, RegistryError};
use crate::application::messaging::dispatcher::CommandContext;
use crate::application::messaging::parser::ParsedCommand;
use crate::application::permissions::PermissionLevel;

/// Executable body of a command.
///
/// Infrastructure failures are returned as errors and contained at the
/// dispatch boundary; business-rule outcomes are reported to the channel by
/// the handler itself.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(&self, ctx: &CommandContext<'_>, parsed: &ParsedCommand) -> Result<(), BotError>;
}

/// A registered bot command.
pub struct Command {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub permission: PermissionLevel,
    pub capabilities: CapabilitySet,
    handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: String::new(),
            permission: PermissionLevel::Everyone,
            capabilities: CapabilitySet::new(),
            handler: Arc::new(handler),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_permission(mut self, permission: PermissionLevel) -> Self {
        self.permission = permission;
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub async fn run(
        &self,
        ctx: &CommandContext<'_>,
        parsed: &ParsedCommand,
    ) -> Result<(), BotError> {
        self.handler.run(ctx, parsed).await
    }
}

/// Name/alias -> command mapping.
///
/// Names and aliases occupy a single namespace; any collision is rejected at
/// registration time. Lookup is exact-match and case-sensitive.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<Command>>,
    aliases: HashMap<String, Arc<Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if self.is_taken(&command.name) {
            return Err(RegistryError::DuplicateName(command.name));
        }
        let mut seen = vec![command.name.clone()];
        for alias in &command.aliases {
            if self.is_taken(alias) || seen.contains(alias) {
                return Err(RegistryError::DuplicateAlias {
                    command: command.name.clone(),
                    alias: alias.clone(),
                });
            }
            seen.push(alias.clone());
        }

        let command = Arc::new(command);
        for alias in &command.aliases {
            self.aliases.insert(alias.clone(), command.clone());
        }
        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    pub fn resolve(&self, token: &str) -> Option<Arc<Command>> {
        self.commands
            .get(token)
            .or_else(|| self.aliases.get(token))
            .cloned()
    }

    /// Remove a command (by name or alias) together with all of its aliases.
    pub fn remove(&mut self, token: &str) -> Option<Arc<Command>> {
        let command = self.resolve(token)?;
        self.commands.remove(&command.name);
        for alias in &command.aliases {
            self.aliases.remove(alias);
        }
        Some(command)
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<Command>> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn is_taken(&self, token: &str) -> bool {
        self.commands.contains_key(token) || self.aliases.contains_key(token)
    }
}
