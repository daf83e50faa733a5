use super::{Author, CapabilitySet};
use chrono::{DateTime, Utc};

/// The invoking user's resolved membership in a guild.
#[derive(Debug, Clone, Default)]
pub struct Member {
    pub can_kick_members: bool,
    pub is_administrator: bool,
}

/// The bot's own standing in the channel a message came from.
#[derive(Debug, Clone, Default)]
pub struct BotMember {
    pub capabilities: CapabilitySet,
}

/// Guild (server) context attached to an inbound message.
///
/// `member` and `bot_member` are `None` when the respective membership record
/// could not be resolved; permission evaluation treats either absence as a
/// denial.
#[derive(Debug, Clone)]
pub struct GuildContext {
    pub id: String,
    pub owner_id: String,
    pub member: Option<Member>,
    pub bot_member: Option<BotMember>,
}

/// An inbound text message handed over by the gateway.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub id: String,
    pub channel_id: String,
    pub author: Author,
    /// Absent for direct messages, which carry no commands.
    pub guild: Option<GuildContext>,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Inbound {
    pub fn new(channel_id: impl Into<String>, author: Author, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel_id: channel_id.into(),
            author,
            guild: None,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_guild(mut self, guild: GuildContext) -> Self {
        self.guild = Some(guild);
        self
    }
}
