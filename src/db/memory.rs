// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! In-memory `CurrencyStore` for tests. Counts every write so tests can
//! assert which statements reached the store.

use super::CurrencyStore;
use crate::error::CurrencyError;
use crate::models::Currency;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    rows: Vec<Currency>,
    next_id: i64,
    inserts: usize,
    updates: usize,
    deletes: usize,
    fail_writes: bool,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn with_rows(rows: &[(&str, f64)]) -> Self {
        let rows: Vec<Currency> = rows
            .iter()
            .enumerate()
            .map(|(i, (code, rate))| Currency {
                id: i as i64 + 1,
                code: code.to_string(),
                rate: *rate,
            })
            .collect();
        let next_id = rows.len() as i64;

        Self {
            state: Mutex::new(State {
                rows,
                next_id,
                ..State::default()
            }),
        }
    }

    /// Make every later insert, update and delete fail like a backend rejection
    pub fn fail_writes(&self) {
        self.state.lock().unwrap().fail_writes = true;
    }

    pub fn inserts(&self) -> usize {
        self.state.lock().unwrap().inserts
    }

    pub fn updates(&self) -> usize {
        self.state.lock().unwrap().updates
    }

    pub fn deletes(&self) -> usize {
        self.state.lock().unwrap().deletes
    }

    pub fn rows(&self) -> Vec<Currency> {
        self.state.lock().unwrap().rows.clone()
    }
}

fn rejected(message: &str) -> CurrencyError {
    CurrencyError::Store(sqlx::Error::Protocol(message.to_string()))
}

#[async_trait]
impl CurrencyStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Currency>, CurrencyError> {
        Ok(self.rows())
    }

    async fn insert(&self, code: &str, rate: f64) -> Result<(), CurrencyError> {
        let mut state = self.state.lock().unwrap();
        state.inserts += 1;
        if state.fail_writes || state.rows.iter().any(|c| c.code == code) {
            return Err(rejected("UNIQUE constraint failed: currencies.code"));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.rows.push(Currency {
            id,
            code: code.to_string(),
            rate,
        });
        Ok(())
    }

    async fn update(&self, id: i64, code: &str, rate: f64) -> Result<(), CurrencyError> {
        let mut state = self.state.lock().unwrap();
        state.updates += 1;
        if state.fail_writes {
            return Err(rejected("database is locked"));
        }
        let row = state
            .rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CurrencyError::MissingRow(id))?;
        row.code = code.to_string();
        row.rate = rate;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), CurrencyError> {
        let mut state = self.state.lock().unwrap();
        state.deletes += 1;
        if state.fail_writes {
            return Err(rejected("database is locked"));
        }
        let before = state.rows.len();
        state.rows.retain(|c| c.id != id);
        if state.rows.len() == before {
            return Err(CurrencyError::MissingRow(id));
        }
        Ok(())
    }

    async fn close(self) {}
}
