// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::db::CurrencyStore;
use crate::error::CurrencyError;
use std::collections::HashSet;
use tracing::debug;

/// One row of the `currencies` table
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub id: i64,
    pub code: String,
    pub rate: f64,
}

impl From<(i64, String, f64)> for Currency {
    fn from((id, code, rate): (i64, String, f64)) -> Self {
        Self { id, code, rate }
    }
}

/// In-memory copy of the `currencies` table, in the order the store returned it
#[derive(Debug, Default)]
pub struct CurrencyCache {
    currencies: Vec<Currency>,
}

impl CurrencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache with a fresh read of the store
    pub async fn reload<S: CurrencyStore + ?Sized>(&mut self, store: &S) -> Result<(), CurrencyError> {
        self.currencies = store.fetch_all().await?;
        debug!(count = self.currencies.len(), "reloaded currency cache");
        Ok(())
    }

    pub fn codes(&self) -> HashSet<String> {
        self.currencies.iter().map(|c| c.code.clone()).collect()
    }

    pub fn find(&self, code: &str) -> Result<&Currency, CurrencyError> {
        self.currencies
            .iter()
            .find(|c| c.code == code)
            .ok_or_else(|| CurrencyError::NotFound(code.to_string()))
    }

    /// Drop a single record without reloading. Returns whether anything was removed.
    pub fn remove(&mut self, currency: &Currency) -> bool {
        match self.currencies.iter().position(|c| c.id == currency.id) {
            Some(index) => {
                self.currencies.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}
