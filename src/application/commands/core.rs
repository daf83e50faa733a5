//! Core commands: help and ping.

use async_trait::async_trait;
use std::time::Instant;

use crate::application::errors::BotError;
use crate::application::messaging::dispatcher::CommandContext;
use crate::application::messaging::parser::ParsedCommand;
use crate::application::permissions::check_permission;
use crate::domain::entities::{CommandHandler, Embed, Outbound};

pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn run(&self, ctx: &CommandContext<'_>, parsed: &ParsedCommand) -> Result<(), BotError> {
        let mut body = String::new();
        if let Some(topic) = parsed.args.first() {
            match ctx.registry.resolve(topic) {
                Some(command) => {
                    let aliases = if command.aliases.is_empty() {
                        "<None>".to_string()
                    } else {
                        command.aliases.join(", ")
                    };
                    body.push_str(&format!(
                        "`{}`\n{}\n\nAliases: {}",
                        command.name, command.description, aliases
                    ));
                }
                None => body.push_str(":x: Could not find command."),
            }
        } else {
            // Only list what the invoker could actually run.
            let mut commands: Vec<_> = ctx.registry.all().collect();
            commands.sort_by(|a, b| a.name.cmp(&b.name));
            for command in commands {
                if !check_permission(&ctx.bot.owner, ctx.msg, command.permission) {
                    continue;
                }
                body.push_str(&format!("`{}` - {}\n", command.name, command.description));
            }
        }

        let embed = Embed::new()
            .with_color(0x87ceeb)
            .with_title(format!("{} - Help", ctx.gateway.bot_user().username))
            .with_description(body);
        ctx.reply(Outbound::Embed(embed)).await?;
        Ok(())
    }
}

pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    async fn run(&self, ctx: &CommandContext<'_>, _parsed: &ParsedCommand) -> Result<(), BotError> {
        let send_before = Instant::now();
        let message_id = ctx.reply(Outbound::text("h!")).await?;
        let send_latency = send_before.elapsed();

        let db_before = Instant::now();
        ctx.bot
            .database
            .serialize(|conn| {
                Box::pin(async move {
                    sqlx::query_scalar::<_, i64>("SELECT 1")
                        .fetch_one(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .await?;
        let db_latency = db_before.elapsed();

        let websocket = ctx.gateway.latency().unwrap_or_default();
        let report = serde_json::json!({
            "API": send_latency.saturating_sub(websocket).as_millis() as u64,
            "Websocket": websocket.as_millis() as u64,
            "Database": db_latency.as_millis() as u64,
        });
        let embed = Embed::new()
            .with_color(0x87ceeb)
            .with_description(format!(
                "```json\n{}\n```",
                serde_json::to_string_pretty(&report).unwrap_or_default()
            ))
            .with_timestamp();
        ctx.gateway
            .edit(&ctx.msg.channel_id, &message_id, Outbound::Embed(embed))
            .await?;
        Ok(())
    }
}
