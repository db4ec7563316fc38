use crate::config::Config;
use crate::models::Message;
use anyhow::Context;
use chrono::Utc;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use sqlx::Row;
use std::time::Duration;

/// Repository over the pooled connection. Cloning is cheap (the pool is
/// internally reference-counted) and every handler borrows a connection
/// per operation.
#[derive(Clone)]
pub struct Db(pub PgPool);

impl Db {
    /// Connects, probes liveness, and applies pending migrations. Any
    /// failure here must prevent the service from starting.
    pub async fn connect_and_migrate(cfg: &Config) -> anyhow::Result<Self> {
        let opts = PgConnectOptions::new()
            .host(&cfg.db_host)
            .port(cfg.db_port)
            .username(&cfg.db_user)
            .password(&cfg.db_password)
            .database(&cfg.db_name)
            .ssl_mode(PgSslMode::Disable);

        let pool = PgPoolOptions::new()
            .max_connections(8)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(opts)
            .await
            .context("failed to connect to the database")?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .context("database liveness probe failed")?;
        log::info!("connected to the database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to apply migrations")?;
        log::info!("migrations are up to date");

        Ok(Db(pool))
    }

    /// Inserts one message with the current server time and returns the
    /// generated id. Text is validated non-empty by the caller.
    pub async fn add_message(&self, text: &str) -> sqlx::Result<i32> {
        let row = sqlx::query("INSERT INTO messages (text, timestamp) VALUES ($1, $2) RETURNING id")
            .bind(text)
            .bind(Utc::now())
            .fetch_one(&self.0)
            .await?;
        let id: i32 = row.get("id");
        log::debug!("message stored with id {id}");
        Ok(id)
    }

    /// All messages from the `offset`-th row on, ascending by timestamp.
    /// No page size; an empty result is not an error.
    pub async fn list_messages(&self, offset: i64) -> sqlx::Result<Vec<Message>> {
        sqlx::query_as("SELECT id, text, timestamp FROM messages ORDER BY timestamp ASC OFFSET $1")
            .bind(offset)
            .fetch_all(&self.0)
            .await
    }

    pub async fn count_messages(&self) -> sqlx::Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.0)
            .await?;
        Ok(row.get(0))
    }
}
