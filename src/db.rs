// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::config::SeedCurrency;
use crate::error::CurrencyError;
use crate::models::Currency;
use crate::validation;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{info, warn};

#[cfg(test)]
pub mod memory;
mod sqlite;

pub use sqlite::SqliteStore;

/// Persistence boundary for the `currencies` table
#[async_trait]
pub trait CurrencyStore: Send + Sync {
    /// Every row, in store order
    async fn fetch_all(&self) -> Result<Vec<Currency>, CurrencyError>;

    async fn insert(&self, code: &str, rate: f64) -> Result<(), CurrencyError>;

    /// Rewrite the row with `id`
    async fn update(&self, id: i64, code: &str, rate: f64) -> Result<(), CurrencyError>;

    async fn delete(&self, id: i64) -> Result<(), CurrencyError>;

    /// Release the connection. Consumes the store so it can only happen once.
    async fn close(self)
    where
        Self: Sized;
}

/// Insert the configured seed currencies if the table is empty.
/// Invalid or repeated seed entries are skipped with a warning.
pub async fn seed_if_empty<S: CurrencyStore + ?Sized>(
    store: &S,
    seeds: &[SeedCurrency],
) -> Result<usize, CurrencyError> {
    if seeds.is_empty() || !store.fetch_all().await?.is_empty() {
        return Ok(0);
    }

    let mut taken = HashSet::new();
    for seed in seeds {
        let code = match validation::new_code(&seed.code, &taken) {
            Ok(code) => code,
            Err(e) => {
                warn!(code = %seed.code, error = %e, "skipping seed currency");
                continue;
            }
        };
        let rate = match validation::usable_rate(seed.rate) {
            Ok(rate) => rate,
            Err(e) => {
                warn!(code = %code, error = %e, "skipping seed currency");
                continue;
            }
        };
        store.insert(&code, rate).await?;
        taken.insert(code);
    }

    info!(count = taken.len(), "seeded currencies table");
    Ok(taken.len())
}
