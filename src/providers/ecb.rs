use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::core::error::{FxError, FxResult};
use crate::core::feed::{FeedDocument, FeedOrigin, FeedSource};

pub const ECB_DAILY_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

/// Reference rates of 2023-04-20, served when the feed cannot be fetched.
pub const FALLBACK_FEED: &str = r#"<gesmes:Envelope xmlns:gesmes="http://www.gesmes.org/xml/2002-08-01" xmlns="http://www.ecb.int/vocabulary/2002-08-01/eurofxref">
    <gesmes:subject>Reference rates</gesmes:subject>
    <gesmes:Sender>
        <gesmes:name>European Central Bank</gesmes:name>
    </gesmes:Sender>
    <Cube>
        <Cube time="2023-04-20">
            <Cube currency="USD" rate="1.0944"/>
            <Cube currency="JPY" rate="147.46"/>
            <Cube currency="BGN" rate="1.9558"/>
            <Cube currency="CZK" rate="23.502"/>
            <Cube currency="DKK" rate="7.4524"/>
            <Cube currency="GBP" rate="0.88153"/>
            <Cube currency="HUF" rate="377.68"/>
            <Cube currency="PLN" rate="4.6110"/>
            <Cube currency="RON" rate="4.9308"/>
            <Cube currency="SEK" rate="11.3280"/>
            <Cube currency="CHF" rate="0.9810"/>
            <Cube currency="ISK" rate="149.50"/>
            <Cube currency="NOK" rate="11.6040"/>
            <Cube currency="TRY" rate="21.2348"/>
            <Cube currency="AUD" rate="1.6290"/>
            <Cube currency="BRL" rate="5.5484"/>
            <Cube currency="CAD" rate="1.4757"/>
            <Cube currency="CNY" rate="7.5298"/>
            <Cube currency="HKD" rate="8.5907"/>
            <Cube currency="IDR" rate="16364.81"/>
            <Cube currency="ILS" rate="4.0022"/>
            <Cube currency="INR" rate="89.9365"/>
            <Cube currency="KRW" rate="1450.34"/>
            <Cube currency="MXN" rate="19.8156"/>
            <Cube currency="MYR" rate="4.8564"/>
            <Cube currency="NZD" rate="1.7763"/>
            <Cube currency="PHP" rate="61.429"/>
            <Cube currency="SGD" rate="1.4599"/>
            <Cube currency="THB" rate="37.609"/>
            <Cube currency="ZAR" rate="19.8552"/>
        </Cube>
    </Cube>
</gesmes:Envelope>"#;

// EcbFeedProvider implementation for FeedSource
pub struct EcbFeedProvider {
    url: String,
}

impl EcbFeedProvider {
    pub fn new(url: &str) -> Self {
        EcbFeedProvider {
            url: url.to_string(),
        }
    }

    /// Single GET of the feed URL; no retries.
    async fn fetch_live(&self) -> FxResult<String> {
        let fetch_error = |reason: String| FxError::FeedFetch {
            url: self.url.clone(),
            reason,
        };

        let client = reqwest::Client::builder()
            .user_agent("eurofx/1.0")
            .build()
            .map_err(|e| fetch_error(e.to_string()))?;

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| fetch_error(format!("Request error: {e}")))?;

        debug!(response = ?response, "Received feed response");

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP error: {}", response.status())));
        }

        response
            .text()
            .await
            .map_err(|e| fetch_error(format!("Failed to read body: {e}")))
    }
}

#[async_trait]
impl FeedSource for EcbFeedProvider {
    #[instrument(name = "EcbFeedFetch", skip(self), fields(url = %self.url))]
    async fn fetch_feed(&self) -> FeedDocument {
        match self.fetch_live().await {
            Ok(body) => FeedDocument {
                body,
                origin: FeedOrigin::Live,
            },
            Err(e) => {
                warn!(error = %e, "Using fallback reference rates");
                FeedDocument {
                    body: FALLBACK_FEED.to_string(),
                    origin: FeedOrigin::Fallback,
                }
            }
        }
    }
}
