use axum_test::TestServer;
use ledger_axum::{config::AxumConfig, router};
use ledger_core::ports::Application;
use ledger_sqlite::{Db, config::SqliteConfig};
use serde_json::{Value, json};

#[derive(Clone)]
pub struct TestApp(pub Db);

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }
}

/// A server over a fresh in-memory database.
pub async fn server(config: AxumConfig) -> TestServer {
    server_with(SqliteConfig::default(), config).await.0
}

/// A server over a fresh database opened with `sqlite`, plus a handle to it.
pub async fn server_with(sqlite: SqliteConfig, config: AxumConfig) -> (TestServer, Db) {
    let db = Db::open(&sqlite).await.unwrap();
    let (router, _) = router(TestApp(db.clone()), config);
    (TestServer::new(router).unwrap(), db)
}

/// Open an account through the API and return its id.
pub async fn open(server: &TestServer, name: &str, balance: Value) -> i64 {
    let response = server
        .post("/accounts")
        .json(&json!({
            "name": name,
            "email": format!("{name}@example.com"),
            "initial_balance": balance,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}
