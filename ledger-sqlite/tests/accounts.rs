mod common;

use common::TestApp;
use ledger_core::{
    ErrorKind, LedgerError,
    models::{AccountId, NewAccount, NewOrder},
    ports::{AccountFailure, AccountRepository as _, Application, OrderRepository as _},
};
use rust_decimal_macros::dec;

#[tokio::test]
async fn creates_and_reads_accounts() -> anyhow::Result<()> {
    let app = TestApp::memory().await?;

    let created = app
        .registry()
        .create("Ada", "ada@example.com", dec!(12.50))
        .await?;
    assert_eq!(created.id, AccountId(1));
    assert_eq!(created.balance.value(), dec!(12.50));

    let fetched = app.registry().get(created.id).await?;
    assert_eq!(fetched, created);
    // the scale survives the round trip through text
    assert_eq!(fetched.balance.to_string(), "12.50");

    app.0.close().await;
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> anyhow::Result<()> {
    let app = TestApp::memory().await?;
    let db = app.database();

    let account = NewAccount::new("Ada", "ada@example.com", dec!(1))?;
    assert!(db.create_account(account.clone()).await?.is_ok());
    assert_eq!(
        db.create_account(account).await?,
        Err(AccountFailure::DuplicateEmail("ada@example.com".into()))
    );

    let err = app
        .registry()
        .create("Other", "ada@example.com", dec!(0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    Ok(())
}

#[tokio::test]
async fn missing_account_is_none() -> anyhow::Result<()> {
    let app = TestApp::memory().await?;
    assert_eq!(app.database().get_account(AccountId(42)).await?, None);
    assert!(matches!(
        app.registry().get(AccountId(42)).await,
        Err(LedgerError::AccountNotFound(AccountId(42)))
    ));
    Ok(())
}

#[tokio::test]
async fn lists_accounts_by_page() -> anyhow::Result<()> {
    let app = TestApp::memory().await?;
    for name in ["a", "b", "c", "d", "e"] {
        app.open(name, dec!(1)).await?;
    }

    let page = |offset, limit| {
        let registry = app.registry();
        async move {
            registry
                .list(offset, limit)
                .await
                .map(|accounts| accounts.into_iter().map(|a| a.id.get()).collect::<Vec<_>>())
        }
    };

    assert_eq!(page(0, 2).await?, [1, 2]);
    assert_eq!(page(2, 2).await?, [3, 4]);
    assert_eq!(page(4, 2).await?, [5]);
    assert!(page(10, 2).await?.is_empty());
    assert!(page(0, u64::MAX).await?.len() == 5);
    Ok(())
}

#[tokio::test]
async fn credits_add_to_the_balance() -> anyhow::Result<()> {
    let app = TestApp::memory().await?;
    let id = app.open("a", dec!(10)).await?;

    let account = app.registry().credit(id, dec!(2.5)).await?;
    assert_eq!(account.balance.value(), dec!(12.5));
    assert_eq!(app.balance(id).await?, dec!(12.5));

    assert!(matches!(
        app.registry().credit(AccountId(99), dec!(1)).await,
        Err(LedgerError::AccountNotFound(AccountId(99)))
    ));
    assert!(matches!(
        app.registry().credit(id, dec!(0)).await,
        Err(LedgerError::InvalidAmount(_))
    ));
    Ok(())
}

#[tokio::test]
async fn orders_belong_to_existing_accounts() -> anyhow::Result<()> {
    let app = TestApp::memory().await?;
    let db = app.database();
    let a = app.open("a", dec!(0)).await?;
    let b = app.open("b", dec!(0)).await?;

    app.registry().place_order(a, "Laptop", dec!(999.99)).await?;
    app.registry().place_order(b, "Mouse", dec!(20)).await?;
    app.registry().place_order(a, "Monitor", dec!(150)).await?;

    let orders = app.registry().orders(a).await?;
    let names: Vec<_> = orders.iter().map(|o| o.product_name.as_str()).collect();
    assert_eq!(names, ["Laptop", "Monitor"]);
    assert_eq!(orders[0].amount.to_string(), "999.99");
    assert!(orders.iter().all(|o| o.user_id == a));

    // rejected by the foreign key
    let orphan = NewOrder::new(AccountId(77), "Desk", dec!(1))?;
    assert_eq!(db.create_order(orphan).await?, None);
    assert!(matches!(
        app.registry().orders(AccountId(77)).await,
        Err(LedgerError::AccountNotFound(_))
    ));

    // orders do not touch balances
    assert_eq!(app.balance(a).await?, dec!(0));
    Ok(())
}

#[tokio::test]
async fn data_survives_reopening() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let app = TestApp::on_disk(dir.path()).await?;
    let id = app.open("a", dec!(7.25)).await?;
    app.0.close().await;

    let app = TestApp::on_disk(dir.path()).await?;
    assert_eq!(app.balance(id).await?, dec!(7.25));
    app.0.close().await;
    Ok(())
}

#[tokio::test]
async fn store_rejects_negative_balances() -> anyhow::Result<()> {
    let app = TestApp::memory().await?;
    let id = app.open("a", dec!(1)).await?;

    let result = sqlx::query("update accounts set balance = '-1' where id = $1")
        .bind(id.get())
        .execute(&app.database().writer)
        .await;
    assert!(matches!(result, Err(sqlx::Error::Database(err)) if err.is_check_violation()));
    assert_eq!(app.balance(id).await?, dec!(1));
    Ok(())
}
