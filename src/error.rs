// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

/// Failures raised by the store, the cache and the console.
#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("failed to connect to {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to migrate database schema: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("store rejected the operation: {0}")]
    Store(#[from] sqlx::Error),

    #[error("currency {0} not found")]
    NotFound(String),

    #[error("no currency row with id {0}")]
    MissingRow(i64),

    #[error("input closed")]
    InputClosed,

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a line of user input was rejected. Always answered with a re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is not a known currency code")]
    UnknownCode(String),

    #[error("{0} is not a three-letter code")]
    WrongLength(String),

    #[error("{0} is already in use")]
    DuplicateCode(String),

    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("{0} is not a finite number")]
    NonFiniteNumber(String),

    #[error("exchange rate must be greater than zero")]
    NonPositiveRate,
}
