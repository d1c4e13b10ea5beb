// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::error::CurrencyError;
use crate::models::CurrencyCache;

/// Convert `amount` between two cached currencies.
///
/// Rates are all relative to one implicit unit, so the result is
/// `amount * rate(to) / rate(from)`. Both codes must be in the cache.
pub fn convert(
    cache: &CurrencyCache,
    from_currency: &str,
    to_currency: &str,
    amount: f64,
) -> Result<f64, CurrencyError> {
    let from = cache.find(from_currency)?;
    let to = cache.find(to_currency)?;

    if from.code == to.code {
        return Ok(amount);
    }

    Ok(amount * to.rate / from.rate)
}

/// Round for display only. Values too large to scale have no fractional
/// digits left and are returned as they are.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use anyhow::Result;
    use approx::assert_relative_eq;

    async fn cache(rows: &[(&str, f64)]) -> Result<CurrencyCache> {
        let store = MemoryStore::with_rows(rows);
        let mut cache = CurrencyCache::new();
        cache.reload(&store).await?;
        Ok(cache)
    }

    #[tokio::test]
    async fn test_convert_usd_eur() -> Result<()> {
        let cache = cache(&[("USD", 1.0), ("EUR", 0.9)]).await?;

        assert_relative_eq!(convert(&cache, "USD", "EUR", 10.0)?, 9.0, epsilon = 1e-12);
        assert_relative_eq!(convert(&cache, "EUR", "USD", 9.0)?, 10.0, epsilon = 1e-12);
        Ok(())
    }

    #[tokio::test]
    async fn test_convert_formula_and_round_trip() -> Result<()> {
        let cache = cache(&[("USD", 1.0), ("JPY", 150.0), ("GBP", 0.79), ("SEK", 11.25)]).await?;

        let pairs = [("JPY", "GBP"), ("SEK", "JPY"), ("GBP", "USD")];
        for (from, to) in pairs {
            let r_from = cache.find(from)?.rate;
            let r_to = cache.find(to)?.rate;
            for amount in [0.0, 1.0, 12.5, 1000.0] {
                let there = convert(&cache, from, to, amount)?;
                assert_relative_eq!(there, amount * r_to / r_from, max_relative = 1e-12);

                let back = convert(&cache, to, from, there)?;
                assert_relative_eq!(back, amount, epsilon = 1e-9, max_relative = 1e-12);
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_convert_identity() -> Result<()> {
        let cache = cache(&[("USD", 1.0), ("CHF", 0.8765)]).await?;

        for amount in [0.0, 0.1, 3.3333, 123456.789] {
            assert_eq!(convert(&cache, "CHF", "CHF", amount)?, amount);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_convert_unknown_code() -> Result<()> {
        let cache = cache(&[("USD", 1.0)]).await?;

        assert!(matches!(
            convert(&cache, "USD", "XXX", 1.0),
            Err(CurrencyError::NotFound(code)) if code == "XXX"
        ));
        assert!(matches!(
            convert(&cache, "XXX", "USD", 1.0),
            Err(CurrencyError::NotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 4), 1.2346);
        assert_eq!(round_to(9.0, 4), 9.0);
        assert_eq!(round_to(0.00004, 4), 0.0);
        assert_eq!(round_to(1e305, 4), 1e305);
        assert_eq!(round_to(-f64::MAX, 4), -f64::MAX);
    }
}
