//! Economy service integration tests against an in-memory store.
//! Run with: cargo test --test economy_test

use tally_bot::application::services::EconomyService;
use tally_bot::domain::entities::{Balance, BankAmount};
use tally_bot::infrastructure::database::Database;

async fn setup() -> EconomyService {
    let db = Database::connect_in_memory()
        .await
        .expect("in-memory store should open");
    EconomyService::new(db)
}

#[tokio::test]
async fn get_or_create_returns_a_stable_surrogate_key() {
    let economy = setup().await;

    let first = economy.user_id("100").await.unwrap();
    let again = economy.user_id("100").await.unwrap();
    let other = economy.user_id("200").await.unwrap();

    assert_eq!(first, again);
    assert_ne!(first, other);
}

#[tokio::test]
async fn fresh_accounts_start_empty() {
    let economy = setup().await;
    let balance = economy.balance("100").await.unwrap();
    assert_eq!(balance, Balance { wallet: 0, bank: 0 });
}

#[tokio::test]
async fn register_reports_whether_the_account_was_new() {
    let economy = setup().await;
    assert!(economy.register("100").await.unwrap());
    assert!(!economy.register("100").await.unwrap());
}

#[tokio::test]
async fn register_after_lazy_creation_reports_existing() {
    let economy = setup().await;
    economy.user_id("100").await.unwrap();
    assert!(!economy.register("100").await.unwrap());
}

#[tokio::test]
async fn set_balance_overwrites_both_sides() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 70, bank: 30 })
        .await
        .unwrap();
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 70, bank: 30 }
    );
}

#[tokio::test]
async fn add_balance_applies_relative_deltas() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 10, bank: 5 })
        .await
        .unwrap();
    economy.add_balance("100", 15, -5).await.unwrap();
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 25, bank: 0 }
    );
}

#[tokio::test]
async fn add_balance_cannot_push_a_side_negative() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 5, bank: 0 })
        .await
        .unwrap();

    assert!(economy.add_balance("100", -10, 0).await.is_err());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 5, bank: 0 }
    );
}

#[tokio::test]
async fn transfer_rejects_non_positive_amounts() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 50, bank: 0 })
        .await
        .unwrap();

    assert!(!economy.transfer("100", "200", 0).await.unwrap());
    assert!(!economy.transfer("100", "200", -5).await.unwrap());
    assert_eq!(economy.balance("100").await.unwrap().wallet, 50);
    assert_eq!(economy.balance("200").await.unwrap().wallet, 0);
}

#[tokio::test]
async fn transfer_with_insufficient_funds_changes_nothing() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 40, bank: 100 })
        .await
        .unwrap();

    assert!(!economy.transfer("100", "200", 41).await.unwrap());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 40, bank: 100 }
    );
    assert_eq!(economy.balance("200").await.unwrap().wallet, 0);
}

#[tokio::test]
async fn transfer_moves_the_exact_amount_and_conserves_total() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 80, bank: 0 })
        .await
        .unwrap();
    economy
        .set_balance("200", Balance { wallet: 20, bank: 0 })
        .await
        .unwrap();

    assert!(economy.transfer("100", "200", 30).await.unwrap());

    let from = economy.balance("100").await.unwrap();
    let to = economy.balance("200").await.unwrap();
    assert_eq!(from.wallet, 50);
    assert_eq!(to.wallet, 50);
    assert_eq!(from.wallet + to.wallet, 100);
}

#[tokio::test]
async fn transfer_creates_the_recipient_account() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 10, bank: 0 })
        .await
        .unwrap();

    assert!(economy.transfer("100", "999", 10).await.unwrap());
    assert_eq!(economy.balance("999").await.unwrap().wallet, 10);
}

#[tokio::test]
async fn deposit_moves_wallet_to_bank() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 50, bank: 0 })
        .await
        .unwrap();

    assert!(economy
        .move_bank("100", BankAmount::Delta(30))
        .await
        .unwrap());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 20, bank: 30 }
    );
}

#[tokio::test]
async fn withdraw_moves_bank_to_wallet() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 0, bank: 50 })
        .await
        .unwrap();

    assert!(economy
        .move_bank("100", BankAmount::Delta(-20))
        .await
        .unwrap());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 20, bank: 30 }
    );
}

#[tokio::test]
async fn move_exceeding_the_source_side_fails_without_mutation() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 10, bank: 20 })
        .await
        .unwrap();

    // Deposit bounded by the wallet, withdrawal bounded by the bank.
    assert!(!economy
        .move_bank("100", BankAmount::Delta(11))
        .await
        .unwrap());
    assert!(!economy
        .move_bank("100", BankAmount::Delta(-21))
        .await
        .unwrap());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 10, bank: 20 }
    );
}

#[tokio::test]
async fn zero_delta_is_a_no_op_success() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 10, bank: 20 })
        .await
        .unwrap();

    assert!(economy.move_bank("100", BankAmount::Delta(0)).await.unwrap());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 10, bank: 20 }
    );
}

#[tokio::test]
async fn deposit_all_empties_the_wallet() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 45, bank: 5 })
        .await
        .unwrap();

    assert!(economy
        .move_bank("100", BankAmount::DepositAll)
        .await
        .unwrap());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 0, bank: 50 }
    );

    // Empty wallet: still a success, still unchanged.
    assert!(economy
        .move_bank("100", BankAmount::DepositAll)
        .await
        .unwrap());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 0, bank: 50 }
    );
}

#[tokio::test]
async fn withdraw_all_empties_the_bank() {
    let economy = setup().await;
    economy
        .set_balance("100", Balance { wallet: 5, bank: 45 })
        .await
        .unwrap();

    assert!(economy
        .move_bank("100", BankAmount::WithdrawAll)
        .await
        .unwrap());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 50, bank: 0 }
    );

    assert!(economy
        .move_bank("100", BankAmount::WithdrawAll)
        .await
        .unwrap());
    assert_eq!(
        economy.balance("100").await.unwrap(),
        Balance { wallet: 50, bank: 0 }
    );
}

#[tokio::test]
async fn full_account_lifecycle() {
    let economy = setup().await;
    economy
        .set_balance("alice", Balance { wallet: 100, bank: 0 })
        .await
        .unwrap();

    // Over-spend fails and changes nothing.
    assert!(!economy.transfer("alice", "bob", 150).await.unwrap());
    assert_eq!(
        economy.balance("alice").await.unwrap(),
        Balance { wallet: 100, bank: 0 }
    );

    // A covered transfer moves exactly the requested amount.
    assert!(economy.transfer("alice", "bob", 50).await.unwrap());
    assert_eq!(economy.balance("alice").await.unwrap().wallet, 50);
    assert_eq!(economy.balance("bob").await.unwrap().wallet, 50);

    // Positive delta draws from the wallet into the bank.
    assert!(economy
        .move_bank("alice", BankAmount::Delta(30))
        .await
        .unwrap());
    assert_eq!(
        economy.balance("alice").await.unwrap(),
        Balance { wallet: 20, bank: 30 }
    );
}
