// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use super::CurrencyStore;
use crate::config::DatabaseConfig;
use crate::error::CurrencyError;
use crate::models::Currency;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

/// Open the database and bring its schema up to date.
///
/// The pool holds exactly one connection that never expires, so an
/// in-memory database lives as long as the pool does.
pub async fn create_db_pool(db_url: &str, create_if_missing: bool) -> Result<SqlitePool, CurrencyError> {
    let connection_error = |source| CurrencyError::Connection {
        url: db_url.to_string(),
        source,
    };

    let options = SqliteConnectOptions::from_str(db_url)
        .map_err(connection_error)?
        .create_if_missing(create_if_missing);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(connection_error)?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, CurrencyError> {
        let pool = create_db_pool(&config.url, config.create_if_missing).await?;
        info!(url = %config.url, "connected to currency database");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurrencyStore for SqliteStore {
    async fn fetch_all(&self) -> Result<Vec<Currency>, CurrencyError> {
        let records = sqlx::query_as::<_, (i64, String, f64)>(
            r#"
            SELECT id, code, rate
            FROM currencies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = records.len(), "fetched currencies");
        Ok(records.into_iter().map(Currency::from).collect())
    }

    async fn insert(&self, code: &str, rate: f64) -> Result<(), CurrencyError> {
        sqlx::query(
            r#"
            INSERT INTO currencies (code, rate)
            VALUES (?, ?)
            "#,
        )
        .bind(code)
        .bind(rate)
        .execute(&self.pool)
        .await?;

        debug!(code, rate, "inserted currency");
        Ok(())
    }

    async fn update(&self, id: i64, code: &str, rate: f64) -> Result<(), CurrencyError> {
        let result = sqlx::query(
            r#"
            UPDATE currencies
            SET code = ?, rate = ?
            WHERE id = ?
            "#,
        )
        .bind(code)
        .bind(rate)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CurrencyError::MissingRow(id));
        }
        debug!(id, code, rate, "updated currency");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), CurrencyError> {
        let result = sqlx::query("DELETE FROM currencies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CurrencyError::MissingRow(id));
        }
        debug!(id, "deleted currency");
        Ok(())
    }

    async fn close(self) {
        self.pool.close().await;
        info!("closed currency database");
    }
}
