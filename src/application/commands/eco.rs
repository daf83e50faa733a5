//! Economy commands: registration, balances and money moves.
//!
//! Business-rule failures (insufficient funds, bad arguments) are answered
//! with specific messages right here; store failures bubble up to the
//! dispatcher's containment.

use async_trait::async_trait;
use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::dispatcher::CommandContext;
use crate::application::messaging::parser::{ArgReader, ParsedCommand};
use crate::domain::entities::{group_digits, BankAmount, CommandHandler, Embed, Outbound};

const PAY_COOLDOWN: Duration = Duration::from_secs(10);

pub struct RegisterCommand;

#[async_trait]
impl CommandHandler for RegisterCommand {
    async fn run(&self, ctx: &CommandContext<'_>, _parsed: &ParsedCommand) -> Result<(), BotError> {
        if ctx.bot.economy.register(&ctx.msg.author.id).await? {
            ctx.reply(Outbound::text(
                ":white_check_mark: You have been registered with the economy system, you may now use economy commands.",
            ))
            .await?;
        } else {
            ctx.reply(Outbound::text(
                ":x: You have already registered, and therefore cannot register again.",
            ))
            .await?;
        }
        Ok(())
    }
}

pub struct BalanceCommand;

#[async_trait]
impl CommandHandler for BalanceCommand {
    async fn run(&self, ctx: &CommandContext<'_>, parsed: &ParsedCommand) -> Result<(), BotError> {
        let mut reader = ArgReader::new(&parsed.args);
        let target = reader
            .next_user_id(|_| true)
            .unwrap_or_else(|| ctx.msg.author.id.clone());

        let balance = ctx.bot.economy.balance(&target).await?;

        let tag = if target == ctx.msg.author.id {
            ctx.msg.author.tag.clone()
        } else {
            target.clone()
        };
        let mut embed = Embed::new()
            .with_title(format!("Balance for {}", tag))
            .with_color(0x60ff60)
            .with_field("Wallet", group_digits(balance.wallet))
            .with_field("Bank", group_digits(balance.bank))
            .with_timestamp();
        if let Some(avatar) = &ctx.msg.author.avatar_url {
            embed = embed.with_thumbnail(avatar.clone());
        }
        ctx.reply(Outbound::Embed(embed)).await?;
        Ok(())
    }
}

pub struct PayCommand;

#[async_trait]
impl CommandHandler for PayCommand {
    async fn run(&self, ctx: &CommandContext<'_>, parsed: &ParsedCommand) -> Result<(), BotError> {
        let author = ctx.msg.author.id.clone();
        let mut reader = ArgReader::new(&parsed.args);
        let target = reader.next_user_id(|id| id != author);
        let amount = reader.next_int(|n| n > 0);

        let (Some(target), Some(amount)) = (target, amount) else {
            ctx.reply(Outbound::text(
                "Please specify a valid user to pay and a valid amount.",
            ))
            .await?;
            return Ok(());
        };

        if !ctx.bot.cooldowns.try_acquire("pay", &author, PAY_COOLDOWN) {
            ctx.reply(Outbound::text(
                ":x: You are doing that too fast, try again in a few seconds.",
            ))
            .await?;
            return Ok(());
        }

        let currency = &ctx.bot.config.bot.currency;
        if ctx.bot.economy.transfer(&author, &target, amount).await? {
            ctx.reply(Outbound::text(format!(
                ":white_check_mark: Transferred {}{} to {}!",
                group_digits(amount),
                currency,
                target
            )))
            .await?;
        } else {
            let wallet = ctx.bot.economy.balance(&author).await?.wallet;
            ctx.reply(Outbound::text(format!(
                ":x: Could not transfer {}{}. You have {}{} in your wallet.",
                group_digits(amount),
                currency,
                group_digits(wallet),
                currency
            )))
            .await?;
        }
        Ok(())
    }
}

pub struct DepositCommand;

#[async_trait]
impl CommandHandler for DepositCommand {
    async fn run(&self, ctx: &CommandContext<'_>, parsed: &ParsedCommand) -> Result<(), BotError> {
        let mut reader = ArgReader::new(&parsed.args);
        let amount = reader.next_int(|n| n > 0);
        let all = reader.next_str(|s| s.eq_ignore_ascii_case("all"));

        if amount.is_none() && all.is_none() {
            ctx.reply(Outbound::text(
                ":x: Please specify a valid amount to deposit (use `all` to deposit all your money).",
            ))
            .await?;
            return Ok(());
        }

        let request = amount.map(BankAmount::Delta).unwrap_or(BankAmount::DepositAll);
        if ctx.bot.economy.move_bank(&ctx.msg.author.id, request).await? {
            ctx.reply(Outbound::text(":white_check_mark: Transaction succeeded."))
                .await?;
        } else {
            ctx.reply(Outbound::text(":x: Transaction failed.")).await?;
        }
        Ok(())
    }
}

pub struct WithdrawCommand;

#[async_trait]
impl CommandHandler for WithdrawCommand {
    async fn run(&self, ctx: &CommandContext<'_>, parsed: &ParsedCommand) -> Result<(), BotError> {
        let mut reader = ArgReader::new(&parsed.args);
        let amount = reader.next_int(|n| n > 0);
        let all = reader.next_str(|s| s.eq_ignore_ascii_case("all"));

        if amount.is_none() && all.is_none() {
            ctx.reply(Outbound::text(
                ":x: Please specify a valid amount to withdraw (use `all` to withdraw all your money).",
            ))
            .await?;
            return Ok(());
        }

        // Negative deltas draw from the bank.
        let request = amount
            .map(|n| BankAmount::Delta(-n))
            .unwrap_or(BankAmount::WithdrawAll);
        if ctx.bot.economy.move_bank(&ctx.msg.author.id, request).await? {
            ctx.reply(Outbound::text(":white_check_mark: Transaction succeeded."))
                .await?;
        } else {
            ctx.reply(Outbound::text(":x: Transaction failed.")).await?;
        }
        Ok(())
    }
}

pub struct EcoSetCommand;

#[async_trait]
impl CommandHandler for EcoSetCommand {
    async fn run(&self, ctx: &CommandContext<'_>, parsed: &ParsedCommand) -> Result<(), BotError> {
        let mut reader = ArgReader::new(&parsed.args);
        let target = reader.next_user_id(|_| true);
        let location = reader.next_str(|_| true);
        let amount = reader.next_int(|n| n >= 0);

        let Some(target) = target else {
            ctx.reply(Outbound::text(":x: Please specify a valid user."))
                .await?;
            return Ok(());
        };
        let Some(amount) = amount else {
            ctx.reply(Outbound::text(
                ":x: Please specify a valid integer amount >= 0.",
            ))
            .await?;
            return Ok(());
        };

        let mut balance = ctx.bot.economy.balance(&target).await?;
        match location {
            Some("bank") => balance.bank = amount,
            Some("wallet") => balance.wallet = amount,
            _ => {
                ctx.reply(Outbound::text(
                    ":x: Please specify a valid location (`bank` or `wallet`).",
                ))
                .await?;
                return Ok(());
            }
        }

        ctx.bot.economy.set_balance(&target, balance).await?;

        ctx.reply(Outbound::text(format!(
            ":white_check_mark: Updated balance of **{}** -- bank = {}, wallet = {}",
            target,
            group_digits(balance.bank),
            group_digits(balance.wallet)
        )))
        .await?;
        Ok(())
    }
}
