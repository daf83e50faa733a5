//! Application layer errors
//!
//! Business-rule outcomes (insufficient funds, invalid target) are plain
//! return values on the services that produce them; everything here is the
//! infrastructure/configuration side of the taxonomy and propagates to the
//! dispatch boundary.

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Economy error: {0}")]
    Economy(#[from] EconomyError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Gateway transport errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Send failed: {0}")]
    Send(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ledger store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Connection error: {0}")]
    Connect(String),
}

/// Economy service errors
#[derive(Error, Debug)]
pub enum EconomyError {
    #[error("No account row for user {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Command registration errors. Fatal at startup, never recovered from.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Command {0} already loaded")]
    DuplicateName(String),

    #[error("Command {command} with alias {alias} already loaded")]
    DuplicateAlias { command: String, alias: String },
}
