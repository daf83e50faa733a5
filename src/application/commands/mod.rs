//! Built-in command set.

pub mod core;
pub mod dev;
pub mod eco;

use crate::application::errors::RegistryError;
use crate::application::permissions::PermissionLevel;
use crate::domain::entities::{Command, CommandRegistry};

/// Register every built-in command. Any name/alias collision aborts startup.
pub fn register_all(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(
        Command::new("help", core::HelpCommand)
            .with_description("Shows information and usage for commands."),
    )?;
    registry.register(Command::new("ping", core::PingCommand).with_description("Pong!"))?;
    registry.register(
        Command::new("register", eco::RegisterCommand)
            .with_description("Register yourself in the economy system.")
            .with_aliases(&["reg"]),
    )?;
    registry.register(
        Command::new("balance", eco::BalanceCommand)
            .with_description("Get your balance!")
            .with_aliases(&["bal"]),
    )?;
    registry.register(
        Command::new("pay", eco::PayCommand)
            .with_description("Pay a user")
            .with_aliases(&["give", "transfer"]),
    )?;
    registry.register(
        Command::new("deposit", eco::DepositCommand)
            .with_description("Deposit money from your wallet into your bank")
            .with_aliases(&["dep"]),
    )?;
    registry.register(
        Command::new("withdraw", eco::WithdrawCommand)
            .with_description("Withdraw money from your bank into your wallet")
            .with_aliases(&["with"]),
    )?;
    registry.register(
        Command::new("ecoset", eco::EcoSetCommand)
            .with_description("Set wallet and bank balance for users in the economy system.")
            .with_aliases(&["eset"])
            .with_permission(PermissionLevel::BotOwner),
    )?;
    registry.register(
        Command::new("sql", dev::SqlCommand)
            .with_description("Interface with the database")
            .with_aliases(&["db"])
            .with_permission(PermissionLevel::BotOwner),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_set_registers_without_collisions() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry).unwrap();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.resolve("bal").unwrap().name, "balance");
        assert_eq!(registry.resolve("give").unwrap().name, "pay");
        assert_eq!(
            registry.resolve("ecoset").unwrap().permission,
            PermissionLevel::BotOwner
        );
    }
}
