use async_trait::async_trait;
use std::time::Duration;

use crate::application::errors::GatewayError;
use crate::domain::entities::Outbound;

/// Gateway trait - abstraction over the real-time messaging client.
///
/// Connection management, wire framing and rendering all live behind this
/// seam; the core only sends and edits content.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Send content to a channel, returning the platform message id.
    async fn send(&self, channel_id: &str, content: Outbound) -> Result<String, GatewayError>;

    /// Edit a previously sent message in place.
    async fn edit(
        &self,
        channel_id: &str,
        message_id: &str,
        content: Outbound,
    ) -> Result<(), GatewayError>;

    /// Round-trip latency of the underlying connection, if known.
    fn latency(&self) -> Option<Duration>;

    /// The bot's own identity.
    fn bot_user(&self) -> BotUser;
}

/// Bot identity as reported by the gateway.
#[derive(Debug, Clone)]
pub struct BotUser {
    pub id: String,
    pub username: String,
}
