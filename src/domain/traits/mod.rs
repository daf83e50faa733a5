//! Domain traits - Abstractions for infrastructure implementations

pub mod gateway;

pub use gateway::{BotUser, Gateway};
