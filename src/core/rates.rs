//! Rate table construction: rebasing feed rates onto the configured base currency

use crate::core::error::{FxError, FxResult};
use crate::core::feed::{FeedOrigin, FeedRate, PIVOT_CURRENCY};
use crate::core::metadata::{CurrencyMetadata, find_metadata};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Units of `currency` per one unit of the table's base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub currency: String,
    pub rate: f64,
    pub symbol: Option<String>,
}

/// Snapshot of rates built from a single fetch of the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base_currency: String,
    pub date: Option<NaiveDate>,
    pub origin: FeedOrigin,
    pub entries: Vec<RateEntry>,
}

impl RateTable {
    /// Rate of the first entry with the given code.
    pub fn rate_of(&self, currency: &str) -> FxResult<f64> {
        self.entries
            .iter()
            .find(|e| e.currency == currency)
            .map(|e| e.rate)
            .ok_or_else(|| FxError::CurrencyNotFound(currency.to_string()))
    }
}

/// Rebases `rates` (quoted against the pivot) onto `base_currency` and attaches
/// symbols. Entries keep feed order; the pivot entry is appended last.
pub fn build_rate_table(
    rates: &[FeedRate],
    base_currency: &str,
    metadata: &[CurrencyMetadata],
) -> FxResult<Vec<RateEntry>> {
    let factor = if base_currency == PIVOT_CURRENCY {
        1.0
    } else {
        rates
            .iter()
            .find(|r| r.currency == base_currency)
            .map(|r| r.rate)
            .ok_or_else(|| FxError::UnknownBaseCurrency(base_currency.to_string()))?
    };
    debug!(base = %base_currency, factor, "Rebasing feed rates");

    let symbol_of = |code: &str| find_metadata(metadata, code).map(|m| m.symbol.clone());

    let mut entries: Vec<RateEntry> = rates
        .iter()
        .map(|r| RateEntry {
            currency: r.currency.clone(),
            rate: (1.0 / factor) * r.rate,
            symbol: symbol_of(&r.currency),
        })
        .collect();

    entries.push(RateEntry {
        currency: PIVOT_CURRENCY.to_string(),
        rate: (1.0 / factor) * 1.0,
        symbol: symbol_of(PIVOT_CURRENCY),
    });

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::MetadataSource;

    fn feed_rates() -> Vec<FeedRate> {
        vec![
            FeedRate {
                currency: "USD".to_string(),
                rate: 1.25,
            },
            FeedRate {
                currency: "JPY".to_string(),
                rate: 150.0,
            },
            FeedRate {
                currency: "XAU".to_string(),
                rate: 0.0005,
            },
        ]
    }

    #[test]
    fn test_build_with_pivot_base_keeps_feed_rates() {
        let metadata = MetadataSource::Bundled.load().unwrap();
        let entries = build_rate_table(&feed_rates(), "EUR", &metadata).unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].currency, "USD");
        assert_eq!(entries[0].rate, 1.25);
        assert_eq!(entries[0].symbol.as_deref(), Some("$"));
        assert_eq!(entries[1].rate, 150.0);
        let pivot = entries.last().unwrap();
        assert_eq!(pivot.currency, "EUR");
        assert_eq!(pivot.rate, 1.0);
        assert_eq!(pivot.symbol.as_deref(), Some("€"));
    }

    #[test]
    fn test_build_rebases_onto_base_currency() {
        let metadata = MetadataSource::Bundled.load().unwrap();
        let entries = build_rate_table(&feed_rates(), "USD", &metadata).unwrap();

        assert_eq!(entries[0].rate, 1.0);
        assert_eq!(entries[1].rate, 120.0);
        assert_eq!(entries[3].currency, "EUR");
        assert_eq!(entries[3].rate, 0.8);
    }

    #[test]
    fn test_missing_metadata_leaves_symbol_empty() {
        let metadata = MetadataSource::Bundled.load().unwrap();
        let entries = build_rate_table(&feed_rates(), "EUR", &metadata).unwrap();
        assert_eq!(entries[2].currency, "XAU");
        assert!(entries[2].symbol.is_none());

        let entries = build_rate_table(&feed_rates(), "EUR", &[]).unwrap();
        assert!(entries.iter().all(|e| e.symbol.is_none()));
    }

    #[test]
    fn test_unknown_base_currency() {
        let err = build_rate_table(&feed_rates(), "CHF", &[]).unwrap_err();
        assert!(matches!(err, FxError::UnknownBaseCurrency(code) if code == "CHF"));
    }

    #[test]
    fn test_rate_of() {
        let table = RateTable {
            base_currency: "EUR".to_string(),
            date: None,
            origin: FeedOrigin::Live,
            entries: build_rate_table(&feed_rates(), "EUR", &[]).unwrap(),
        };
        assert_eq!(table.rate_of("JPY").unwrap(), 150.0);
        assert!(matches!(
            table.rate_of("CHF"),
            Err(FxError::CurrencyNotFound(code)) if code == "CHF"
        ));
    }
}
