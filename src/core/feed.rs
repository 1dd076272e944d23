//! Reference rates feed: source abstraction, namespace normalizer and parser

use crate::core::error::{FxError, FxResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Currency every rate in the feed is quoted against.
pub const PIVOT_CURRENCY: &str = "EUR";

static TAG_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(</?)(\w+:)").expect("tag prefix pattern is valid")
});
static NAMESPACE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s*xmlns(:\w+)?="[^"]*""#).expect("namespace pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrigin {
    /// Body of a successful response from the feed URL.
    Live,
    /// Embedded snapshot substituted after a failed fetch.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct FeedDocument {
    pub body: String,
    pub origin: FeedOrigin,
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieves the raw feed document. Never fails: a source that cannot
    /// reach its provider returns a fallback document instead.
    async fn fetch_feed(&self) -> FeedDocument;
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedRate {
    pub currency: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeed {
    pub date: Option<NaiveDate>,
    pub rates: Vec<FeedRate>,
}

/// Strips element-name prefixes and `xmlns` declarations from the document.
pub fn normalize(xml: &str) -> String {
    let unprefixed = TAG_PREFIX.replace_all(xml, "${1}");
    NAMESPACE_DECLARATION
        .replace_all(&unprefixed, "")
        .trim()
        .to_string()
}

#[derive(Debug, Deserialize)]
struct XmlEnvelope {
    #[serde(rename = "Cube", default)]
    groups: Vec<XmlCubeGroup>,
}

#[derive(Debug, Deserialize)]
struct XmlCubeGroup {
    #[serde(rename = "Cube", default)]
    days: Vec<XmlDailyCube>,
}

#[derive(Debug, Deserialize)]
struct XmlDailyCube {
    #[serde(default)]
    time: String,
    #[serde(rename = "Cube", default)]
    rates: Vec<XmlRateCube>,
}

#[derive(Debug, Deserialize)]
struct XmlRateCube {
    currency: String,
    rate: String,
}

/// Parses a normalized document: Envelope -> Cube -> Cube[time] -> Cube[currency, rate].
pub fn parse(normalized_xml: &str) -> FxResult<ParsedFeed> {
    let envelope: XmlEnvelope = serde_xml_rs::from_str(normalized_xml)
        .map_err(|e| FxError::FeedParse(e.to_string()))?;

    let day = envelope
        .groups
        .into_iter()
        .next()
        .ok_or_else(|| FxError::FeedParse("missing rates group".to_string()))?
        .days
        .into_iter()
        .next()
        .ok_or_else(|| FxError::FeedParse("missing daily rates group".to_string()))?;

    if day.rates.is_empty() {
        return Err(FxError::FeedParse("daily rates group is empty".to_string()));
    }

    let date = parse_feed_date(&day.time);

    let rates = day
        .rates
        .into_iter()
        .map(|cube| -> FxResult<FeedRate> {
            let rate = cube.rate.trim().parse::<f64>().map_err(|e| {
                FxError::FeedParse(format!(
                    "invalid rate {:?} for {}: {}",
                    cube.rate, cube.currency, e
                ))
            })?;
            if !rate.is_finite() {
                return Err(FxError::FeedParse(format!(
                    "invalid rate {} for {}",
                    rate, cube.currency
                )));
            }
            if rate <= 0.0 {
                return Err(FxError::FeedParse(format!(
                    "non-positive rate {} for {}",
                    rate, cube.currency
                )));
            }
            Ok(FeedRate {
                currency: cube.currency,
                rate,
            })
        })
        .collect::<FxResult<Vec<_>>>()?;

    debug!(count = rates.len(), ?date, "Parsed rates feed");
    Ok(ParsedFeed { date, rates })
}

fn parse_feed_date(time: &str) -> Option<NaiveDate> {
    if time.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(time, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(time = %time, error = %e, "Ignoring unparseable feed date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gesmes:Envelope xmlns:gesmes="http://www.gesmes.org/xml/2002-08-01" xmlns="http://www.ecb.int/vocabulary/2002-08-01/eurofxref">
    <gesmes:subject>Reference rates</gesmes:subject>
    <gesmes:Sender>
        <gesmes:name>European Central Bank</gesmes:name>
    </gesmes:Sender>
    <Cube>
        <Cube time="2024-01-05">
            <Cube currency="USD" rate="1.0921"/>
            <Cube currency="JPY" rate="158.16"/>
            <Cube currency="GBP" rate="0.86000"/>
        </Cube>
    </Cube>
</gesmes:Envelope>
"#;

    #[test]
    fn test_normalize_strips_prefixes_and_declarations() {
        let xml = r#"<gesmes:Envelope xmlns:gesmes="http://www.gesmes.org/xml/2002-08-01"><gesmes:Sender><gesmes:name>X</gesmes:name></gesmes:Sender></gesmes:Envelope>"#;
        assert_eq!(
            normalize(xml),
            "<Envelope><Sender><name>X</name></Sender></Envelope>"
        );
    }

    #[test]
    fn test_normalize_keeps_content_and_attributes() {
        let xml = "  <Cube currency=\"USD\" rate=\"1.0944\"/> <a:note>ratio 1:2</a:note>\n";
        assert_eq!(
            normalize(xml),
            "<Cube currency=\"USD\" rate=\"1.0944\"/> <note>ratio 1:2</note>"
        );
    }

    #[test]
    fn test_normalize_removes_default_namespace() {
        let xml = r#"<Envelope xmlns="http://www.ecb.int/vocabulary/2002-08-01/eurofxref" version="1"/>"#;
        assert_eq!(normalize(xml), r#"<Envelope version="1"/>"#);
    }

    #[test]
    fn test_parse_sample_feed() {
        let parsed = parse(&normalize(SAMPLE)).unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(
            parsed.rates,
            vec![
                FeedRate {
                    currency: "USD".to_string(),
                    rate: 1.0921
                },
                FeedRate {
                    currency: "JPY".to_string(),
                    rate: 158.16
                },
                FeedRate {
                    currency: "GBP".to_string(),
                    rate: 0.86
                },
            ]
        );
    }

    #[test]
    fn test_parse_missing_structure_fails() {
        let xml = "<Envelope><subject>Reference rates</subject></Envelope>";
        let err = parse(xml).unwrap_err();
        assert!(matches!(err, FxError::FeedParse(_)));

        let xml = "<Envelope><Cube></Cube></Envelope>";
        assert!(matches!(parse(xml), Err(FxError::FeedParse(_))));

        let xml = r#"<Envelope><Cube><Cube time="2024-01-05"></Cube></Cube></Envelope>"#;
        assert!(matches!(parse(xml), Err(FxError::FeedParse(_))));
    }

    #[test]
    fn test_parse_not_xml_fails() {
        assert!(matches!(
            parse("{\"rates\": []}"),
            Err(FxError::FeedParse(_))
        ));
    }

    #[test]
    fn test_parse_invalid_rate_fails() {
        let xml = r#"<Envelope><Cube><Cube time="2024-01-05"><Cube currency="USD" rate="abc"/></Cube></Cube></Envelope>"#;
        let err = parse(xml).unwrap_err();
        assert!(err.to_string().contains("USD"));

        let xml = r#"<Envelope><Cube><Cube time="2024-01-05"><Cube currency="USD" rate="0"/></Cube></Cube></Envelope>"#;
        let err = parse(xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to parse rates feed: non-positive rate 0 for USD"
        );
    }

    #[test]
    fn test_parse_non_finite_rate_fails() {
        for value in ["inf", "NaN", "-inf"] {
            let xml = format!(
                r#"<Envelope><Cube><Cube time="2024-01-05"><Cube currency="USD" rate="{value}"/></Cube></Cube></Envelope>"#
            );
            let err = parse(&xml).unwrap_err();
            assert!(
                err.to_string().contains("invalid rate") && err.to_string().contains("USD"),
                "{value}: {err}"
            );
        }
    }

    #[test]
    fn test_parse_bad_date_is_absent() {
        let xml = r#"<Envelope><Cube><Cube time="yesterday"><Cube currency="USD" rate="1.1"/></Cube></Cube></Envelope>"#;
        let parsed = parse(xml).unwrap();
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.rates.len(), 1);
    }
}
