//! Error taxonomy for the rate pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    /// Transport failure or non-success status. Never returned to callers of
    /// the query operations: the feed provider swaps in the fallback document.
    #[error("Failed to fetch rates feed from {url}: {reason}")]
    FeedFetch { url: String, reason: String },

    #[error("Failed to parse rates feed: {0}")]
    FeedParse(String),

    #[error("Base currency {0} is not present in the rates feed")]
    UnknownBaseCurrency(String),

    #[error("Currency not found: {0}")]
    CurrencyNotFound(String),

    #[error("Currency metadata unavailable from {source_name}: {reason}")]
    MetadataUnavailable { source_name: String, reason: String },
}

pub type FxResult<T> = std::result::Result<T, FxError>;
