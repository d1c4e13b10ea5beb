// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::ValidationError;
use std::collections::HashSet;

pub const CODE_LENGTH: usize = 3;

/// Trim and upper-case a currency code the way it is stored
pub fn normalize_code(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Accept a code only if it is one of `codes`
pub fn existing_code(input: &str, codes: &HashSet<String>) -> Result<String, ValidationError> {
    let code = normalize_code(input);
    if codes.contains(&code) {
        Ok(code)
    } else {
        Err(ValidationError::UnknownCode(code))
    }
}

/// Accept a three character code that none of `taken` already uses
pub fn new_code(input: &str, taken: &HashSet<String>) -> Result<String, ValidationError> {
    let code = normalize_code(input);
    if code.chars().count() != CODE_LENGTH {
        return Err(ValidationError::WrongLength(code));
    }
    if taken.contains(&code) {
        return Err(ValidationError::DuplicateCode(code));
    }
    Ok(code)
}

/// Parse an amount to convert. Any finite number is accepted.
pub fn amount(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteNumber(trimmed.to_string()));
    }
    Ok(value)
}

/// Parse an exchange rate. Rates divide conversions, so zero and below are refused.
pub fn rate(input: &str) -> Result<f64, ValidationError> {
    usable_rate(amount(input)?)
}

/// Check an already numeric rate
pub fn usable_rate(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteNumber(value.to_string()));
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveRate);
    }
    Ok(value)
}
