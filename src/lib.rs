//! tally-bot - a chat-platform bot with a virtual-currency ledger
//!
//! Layers:
//! - Domain: entities (accounts, commands, messages) and gateway abstraction
//! - Application: dispatch pipeline, permissions, economy service
//! - Infrastructure: configuration, SQLite store, gateway adapters

pub mod application;
pub mod bot;
pub mod domain;
pub mod infrastructure;
