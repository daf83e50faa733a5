//! Domain entities - Core business objects

pub mod balance;
pub mod capability;
pub mod command;
pub mod message;
pub mod outbound;
pub mod user;

pub use balance::{group_digits, Balance, BankAmount};
pub use capability::{Capability, CapabilitySet};
pub use command::{Command, CommandHandler, CommandRegistry};
pub use message::{BotMember, GuildContext, Inbound, Member};
pub use outbound::{Embed, EmbedField, Outbound};
pub use user::{AppOwner, Author};
