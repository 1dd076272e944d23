//! Core business logic: feed parsing, rate tables and conversions

pub mod config;
pub mod conversion;
pub mod error;
pub mod feed;
pub mod log;
pub mod metadata;
pub mod rates;

// Re-export main types for cleaner imports
pub use conversion::{Conversion, ExchangeRate};
pub use error::{FxError, FxResult};
pub use feed::{FeedDocument, FeedOrigin, FeedSource, PIVOT_CURRENCY};
pub use metadata::{CurrencyMetadata, MetadataSource};
pub use rates::{RateEntry, RateTable};
