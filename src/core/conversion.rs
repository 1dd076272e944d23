//! Pairwise exchange rates and rounded conversions over a built rate table

use crate::core::error::FxResult;
use crate::core::rates::RateTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_ACCURACY: u32 = 4;
/// Digits past this are below f64 resolution for typical rates.
pub const MAX_ACCURACY: u32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub currency: String,
    pub exchange_rate: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub exchange_rate: f64,
}

/// Rounds half away from zero to `places` decimal digits.
pub fn round_to(value: f64, places: u32) -> f64 {
    let multiplier = 10f64.powi(places.min(MAX_ACCURACY) as i32);
    (value * multiplier).round() / multiplier
}

fn effective_accuracy(accuracy: Option<u32>) -> u32 {
    match accuracy {
        Some(places) if places > MAX_ACCURACY => {
            debug!(places, "Clamping accuracy to {}", MAX_ACCURACY);
            MAX_ACCURACY
        }
        Some(places) => places,
        None => DEFAULT_ACCURACY,
    }
}

/// Units of `to` per one unit of `from`.
pub fn rate_between(table: &RateTable, from: &str, to: &str) -> FxResult<f64> {
    let from_rate = table.rate_of(from)?;
    let to_rate = table.rate_of(to)?;
    Ok((1.0 / from_rate) * to_rate)
}

pub fn exchange_rate(
    table: &RateTable,
    from: &str,
    to: &str,
    accuracy: Option<u32>,
) -> FxResult<ExchangeRate> {
    let places = effective_accuracy(accuracy);
    let rate = rate_between(table, from, to)?;
    Ok(ExchangeRate {
        from_currency: from.to_string(),
        to_currency: to.to_string(),
        exchange_rate: round_to(rate, places),
    })
}

/// Converts `amount` of `from` into `to`. The rate is rounded first and the
/// amount is computed from the rounded rate.
pub fn convert(
    table: &RateTable,
    from: &str,
    to: &str,
    amount: f64,
    accuracy: Option<u32>,
) -> FxResult<Conversion> {
    let places = effective_accuracy(accuracy);
    let rate = round_to(rate_between(table, from, to)?, places);
    let converted = round_to(amount * rate, places);
    debug!(%from, %to, amount, rate, converted, "Converted amount");

    Ok(Conversion {
        currency: to.to_string(),
        exchange_rate: rate,
        amount: converted,
    })
}
