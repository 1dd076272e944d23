//! Static per-currency display metadata

use crate::core::error::{FxError, FxResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const BUNDLED_CURRENCIES: &str = include_str!("../../data/currencies.json");

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CurrencyMetadata {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Any further fields of the record, kept as they appear in the table.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Where the metadata table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// The table compiled into the binary.
    Bundled,
    File(PathBuf),
}

impl MetadataSource {
    pub fn from_path(path: Option<&str>) -> Self {
        path.map_or(MetadataSource::Bundled, |p| MetadataSource::File(p.into()))
    }

    pub fn load(&self) -> FxResult<Vec<CurrencyMetadata>> {
        match self {
            MetadataSource::Bundled => {
                debug!("Loading bundled currency metadata");
                parse_metadata(BUNDLED_CURRENCIES, "bundled table")
            }
            MetadataSource::File(path) => {
                debug!("Loading currency metadata from {}", path.display());
                let data =
                    fs::read_to_string(path).map_err(|e| FxError::MetadataUnavailable {
                        source_name: path.display().to_string(),
                        reason: e.to_string(),
                    })?;
                parse_metadata(&data, &path.display().to_string())
            }
        }
    }
}

fn parse_metadata(data: &str, source_name: &str) -> FxResult<Vec<CurrencyMetadata>> {
    serde_json::from_str(data).map_err(|e| FxError::MetadataUnavailable {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })
}

/// First record whose code matches exactly.
pub fn find_metadata<'a>(
    metadata: &'a [CurrencyMetadata],
    code: &str,
) -> Option<&'a CurrencyMetadata> {
    metadata.iter().find(|m| m.code == code)
}
