//! Console adapter for development/testing

use async_trait::async_trait;
use std::time::Duration;

use crate::application::errors::GatewayError;
use crate::domain::entities::Outbound;
use crate::domain::traits::{BotUser, Gateway};

/// Console gateway for local development. Messages are rendered to stdout.
pub struct ConsoleAdapter {
    user: BotUser,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            user: BotUser {
                id: "console".to_string(),
                username: name.into(),
            },
        }
    }

    fn render(content: &Outbound) -> String {
        match content {
            Outbound::Text(text) => text.clone(),
            Outbound::Embed(embed) => {
                let mut lines = Vec::new();
                if let Some(title) = &embed.title {
                    lines.push(format!("== {} ==", title));
                }
                if let Some(description) = &embed.description {
                    lines.push(description.clone());
                }
                for field in &embed.fields {
                    lines.push(format!("{}: {}", field.name, field.value));
                }
                lines.join("\n")
            }
        }
    }
}

#[async_trait]
impl Gateway for ConsoleAdapter {
    async fn send(&self, _channel_id: &str, content: Outbound) -> Result<String, GatewayError> {
        println!("[BOT] {}", Self::render(&content));
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn edit(
        &self,
        _channel_id: &str,
        message_id: &str,
        content: Outbound,
    ) -> Result<(), GatewayError> {
        println!("[BOT edit {}] {}", message_id, Self::render(&content));
        Ok(())
    }

    fn latency(&self) -> Option<Duration> {
        Some(Duration::ZERO)
    }

    fn bot_user(&self) -> BotUser {
        self.user.clone()
    }
}
