//! Economy service - balance reads, writes and money moves
//!
//! Every operation resolves the external snowflake to the surrogate key
//! first (get-or-create). Money moves run inside one store transaction and
//! report business failures as `Ok(false)`; only infrastructure failures
//! surface as errors.

use crate::application::errors::{EconomyError, StoreError};
use crate::domain::entities::{Balance, BankAmount};
use crate::infrastructure::database::Database;

#[derive(Clone)]
pub struct EconomyService {
    db: Database,
}

impl EconomyService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Resolve a snowflake to its surrogate key, creating the account row on
    /// first sight.
    pub async fn user_id(&self, snowflake: &str) -> Result<i64, StoreError> {
        let snowflake = snowflake.to_string();
        self.db
            .transaction(move |conn| {
                Box::pin(async move {
                    let existing: Option<i64> =
                        sqlx::query_scalar("SELECT id FROM users WHERE snowflake = ?1")
                            .bind(&snowflake)
                            .fetch_optional(&mut *conn)
                            .await?;
                    if let Some(id) = existing {
                        return Ok(id);
                    }
                    let inserted = sqlx::query("INSERT INTO users (snowflake) VALUES (?1)")
                        .bind(&snowflake)
                        .execute(&mut *conn)
                        .await?;
                    Ok(inserted.last_insert_rowid())
                })
            })
            .await
    }

    /// Explicit registration. Returns `false` when the account already exists.
    pub async fn register(&self, snowflake: &str) -> Result<bool, StoreError> {
        let snowflake = snowflake.to_string();
        self.db
            .transaction(move |conn| {
                Box::pin(async move {
                    let existing: Option<i64> =
                        sqlx::query_scalar("SELECT 1 FROM users WHERE snowflake = ?1")
                            .bind(&snowflake)
                            .fetch_optional(&mut *conn)
                            .await?;
                    if existing.is_some() {
                        return Ok(false);
                    }
                    sqlx::query("INSERT INTO users (snowflake) VALUES (?1)")
                        .bind(&snowflake)
                        .execute(&mut *conn)
                        .await?;
                    Ok(true)
                })
            })
            .await
    }

    /// Plain read of both balances.
    pub async fn balance(&self, snowflake: &str) -> Result<Balance, EconomyError> {
        let id = self.user_id(snowflake).await?;
        let row: Option<(i64, i64)> =
            sqlx::query_as("SELECT balance_wallet, balance_bank FROM users WHERE id = ?1")
                .bind(id)
                .fetch_optional(self.db.pool())
                .await
                .map_err(StoreError::from)?;
        let (wallet, bank) = row.ok_or_else(|| EconomyError::NotFound(snowflake.to_string()))?;
        Ok(Balance { wallet, bank })
    }

    /// Unconditional overwrite of both balances. Callers supply non-negative
    /// fields; the schema rejects anything else.
    pub async fn set_balance(&self, snowflake: &str, balance: Balance) -> Result<(), EconomyError> {
        let id = self.user_id(snowflake).await?;
        sqlx::query("UPDATE users SET balance_bank = ?1, balance_wallet = ?2 WHERE id = ?3")
            .bind(balance.bank)
            .bind(balance.wallet)
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(StoreError::from)?;
        Ok(())
    }

    /// Relative adjustment as a single atomic update expression.
    pub async fn add_balance(
        &self,
        snowflake: &str,
        delta_wallet: i64,
        delta_bank: i64,
    ) -> Result<(), EconomyError> {
        let id = self.user_id(snowflake).await?;
        sqlx::query(
            "UPDATE users
             SET balance_wallet = balance_wallet + ?1,
                 balance_bank = balance_bank + ?2
             WHERE id = ?3",
        )
        .bind(delta_wallet)
        .bind(delta_bank)
        .bind(id)
        .execute(self.db.pool())
        .await
        .map_err(StoreError::from)?;
        Ok(())
    }

    /// Wallet-to-wallet transfer. Returns `true` if it succeeded; an amount
    /// that is not positive or exceeds the sender's wallet fails without any
    /// mutation.
    pub async fn transfer(
        &self,
        from: &str,
        to: &str,
        amount: i64,
    ) -> Result<bool, EconomyError> {
        if amount <= 0 {
            return Ok(false);
        }
        let from_id = self.user_id(from).await?;
        let to_id = self.user_id(to).await?;

        let moved = self
            .db
            .transaction(move |conn| {
                Box::pin(async move {
                    let wallet: Option<i64> =
                        sqlx::query_scalar("SELECT balance_wallet FROM users WHERE id = ?1")
                            .bind(from_id)
                            .fetch_optional(&mut *conn)
                            .await?;
                    match wallet {
                        Some(wallet) if wallet >= amount => {}
                        _ => return Ok(false),
                    }
                    sqlx::query(
                        "UPDATE users SET balance_wallet = balance_wallet - ?1 WHERE id = ?2",
                    )
                    .bind(amount)
                    .bind(from_id)
                    .execute(&mut *conn)
                    .await?;
                    sqlx::query(
                        "UPDATE users SET balance_wallet = balance_wallet + ?1 WHERE id = ?2",
                    )
                    .bind(amount)
                    .bind(to_id)
                    .execute(&mut *conn)
                    .await?;
                    Ok(true)
                })
            })
            .await?;
        Ok(moved)
    }

    /// Move value between wallet and bank in one signed update: positive
    /// deltas deposit (wallet -> bank), negative deltas withdraw. A delta
    /// larger than the source side fails without mutation; zero is a no-op
    /// success.
    pub async fn move_bank(
        &self,
        snowflake: &str,
        amount: BankAmount,
    ) -> Result<bool, EconomyError> {
        let id = self.user_id(snowflake).await?;
        let moved = self
            .db
            .transaction(move |conn| {
                Box::pin(async move {
                    let row: Option<(i64, i64)> = sqlx::query_as(
                        "SELECT balance_wallet, balance_bank FROM users WHERE id = ?1",
                    )
                    .bind(id)
                    .fetch_optional(&mut *conn)
                    .await?;
                    let Some((wallet, bank)) = row else {
                        return Ok(false);
                    };
                    let delta = match amount {
                        BankAmount::Delta(delta) => delta,
                        BankAmount::WithdrawAll => -bank,
                        BankAmount::DepositAll => wallet,
                    };
                    let source = if delta < 0 { bank } else { wallet };
                    if source < delta.abs() {
                        return Ok(false);
                    }
                    sqlx::query(
                        "UPDATE users
                         SET balance_wallet = balance_wallet - ?1,
                             balance_bank = balance_bank + ?1
                         WHERE id = ?2",
                    )
                    .bind(delta)
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
                    Ok(true)
                })
            })
            .await?;
        Ok(moved)
    }
}
