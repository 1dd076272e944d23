//! Query operations over freshly built rate tables.
//!
//! Every rate query runs the whole pipeline (fetch, normalize, parse, build)
//! and works on its own table; nothing is shared between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::config::AppConfig;
use crate::core::conversion::{self, Conversion, ExchangeRate};
use crate::core::error::FxResult;
use crate::core::feed::{self, FeedSource};
use crate::core::metadata::{CurrencyMetadata, MetadataSource, find_metadata};
use crate::core::rates::{RateTable, build_rate_table};
use crate::providers::EcbFeedProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseCurrency {
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    #[serde(default)]
    pub accuracy: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub from_currency: String,
    pub to_currency: String,
    #[serde(default)]
    pub accuracy: Option<u32>,
}

pub struct CurrencyConverter {
    base_currency: String,
    metadata: MetadataSource,
    feed: Box<dyn FeedSource>,
}

impl CurrencyConverter {
    pub fn new(base_currency: &str, metadata: MetadataSource, feed: Box<dyn FeedSource>) -> Self {
        CurrencyConverter {
            base_currency: base_currency.to_string(),
            metadata,
            feed,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.base_currency,
            MetadataSource::from_path(config.metadata_path.as_deref()),
            Box::new(EcbFeedProvider::new(&config.feed.url)),
        )
    }

    /// Fetches the feed and builds a rate table against the base currency.
    #[instrument(skip(self), fields(base = %self.base_currency))]
    pub async fn rate_table(&self) -> FxResult<RateTable> {
        let document = self.feed.fetch_feed().await;
        debug!(origin = ?document.origin, bytes = document.body.len(), "Fetched feed");

        let parsed = feed::parse(&feed::normalize(&document.body))?;
        let metadata = self.metadata.load()?;
        let entries = build_rate_table(&parsed.rates, &self.base_currency, &metadata)?;

        Ok(RateTable {
            base_currency: self.base_currency.clone(),
            date: parsed.date,
            origin: document.origin,
            entries,
        })
    }

    pub async fn get_all_currencies(&self) -> FxResult<RateTable> {
        self.rate_table().await
    }

    pub async fn get_base_currency(&self) -> BaseCurrency {
        BaseCurrency {
            currency: self.base_currency.clone(),
        }
    }

    pub async fn convert(&self, request: &ConvertRequest) -> FxResult<Conversion> {
        let table = self.rate_table().await?;
        conversion::convert(
            &table,
            &request.from_currency,
            &request.to_currency,
            request.amount,
            request.accuracy,
        )
    }

    pub async fn get_exchange_rate(&self, request: &RateRequest) -> FxResult<ExchangeRate> {
        let table = self.rate_table().await?;
        conversion::exchange_rate(
            &table,
            &request.from_currency,
            &request.to_currency,
            request.accuracy,
        )
    }

    pub async fn get_currencies_metadata(&self) -> FxResult<Vec<CurrencyMetadata>> {
        self.metadata.load()
    }

    pub async fn get_currency_metadata(
        &self,
        currency: &str,
    ) -> FxResult<Option<CurrencyMetadata>> {
        let metadata = self.metadata.load()?;
        Ok(find_metadata(&metadata, currency).cloned())
    }
}
