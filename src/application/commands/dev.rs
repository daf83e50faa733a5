//! Developer commands.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row};

use crate::application::errors::BotError;
use crate::application::messaging::dispatcher::CommandContext;
use crate::application::messaging::parser::ParsedCommand;
use crate::domain::entities::{CommandHandler, Outbound};

const MAX_ROWS: usize = 20;
const MAX_OUTPUT: usize = 1900;

/// Owner-only raw SQL access through the serialized connection wrapper.
pub struct SqlCommand;

#[async_trait]
impl CommandHandler for SqlCommand {
    async fn run(&self, ctx: &CommandContext<'_>, parsed: &ParsedCommand) -> Result<(), BotError> {
        let statement = parsed.body.trim().to_string();
        if statement.is_empty() {
            ctx.reply(Outbound::text(":x: Please provide a statement to run."))
                .await?;
            return Ok(());
        }

        let is_query = statement.to_lowercase().starts_with("select");
        let mut output = ctx
            .bot
            .database
            .serialize(move |conn| {
                Box::pin(async move {
                    if is_query {
                        let rows = sqlx::query(&statement).fetch_all(&mut *conn).await?;
                        Ok(render_rows(&rows))
                    } else {
                        let result = sqlx::query(&statement).execute(&mut *conn).await?;
                        Ok(format!("{} row(s) affected", result.rows_affected()))
                    }
                })
            })
            .await?;

        if output.is_empty() {
            output = "<empty result>".to_string();
        }
        if output.len() > MAX_OUTPUT {
            output = output.chars().take(MAX_OUTPUT).collect::<String>() + "\n...";
        }
        ctx.reply(Outbound::text(format!("```\n{}\n```", output)))
            .await?;
        Ok(())
    }
}

fn render_rows(rows: &[SqliteRow]) -> String {
    let mut lines: Vec<String> = rows
        .iter()
        .take(MAX_ROWS)
        .map(|row| {
            row.columns()
                .iter()
                .map(|col| {
                    let idx = col.ordinal();
                    let value = row
                        .try_get::<i64, _>(idx)
                        .map(|v| v.to_string())
                        .or_else(|_| row.try_get::<f64, _>(idx).map(|v| v.to_string()))
                        .or_else(|_| row.try_get::<String, _>(idx))
                        .unwrap_or_else(|_| "NULL".to_string());
                    format!("{}={}", col.name(), value)
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    if rows.len() > MAX_ROWS {
        lines.push(format!("... {} more row(s)", rows.len() - MAX_ROWS));
    }
    lines.join("\n")
}
