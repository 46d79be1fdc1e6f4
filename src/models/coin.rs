//! Coin catalog types shared with the REST API.

use serde::{Deserialize, Serialize};

/// A scanned coin as served by `GET /api/coins`.
///
/// Created and updated only by the server; the client treats it as read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub mint: Option<String>,
    #[serde(default)]
    pub denomination: Option<String>,
    #[serde(default)]
    pub metal: Option<String>,
    #[serde(default)]
    pub weight_grams: Option<f64>,
    #[serde(default)]
    pub diameter_mm: Option<f64>,
    pub model_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    // Numismatic grading and reference fields
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub catalog_reference: Option<String>,
    #[serde(default)]
    pub ruler: Option<String>,
    #[serde(default)]
    pub obverse_description: Option<String>,
    #[serde(default)]
    pub reverse_description: Option<String>,
    #[serde(default)]
    pub obverse_legend: Option<String>,
    #[serde(default)]
    pub reverse_legend: Option<String>,
}

impl Coin {
    /// One-line label for lists: name plus year and mint when known.
    pub fn caption(&self) -> String {
        match (&self.year, &self.mint) {
            (Some(year), Some(mint)) => format!("{} ({}, {})", self.name, year, mint),
            (Some(year), None) => format!("{} ({})", self.name, year),
            (None, Some(mint)) => format!("{} ({})", self.name, mint),
            (None, None) => self.name.clone(),
        }
    }
}

/// Metadata submitted alongside a model file when creating a coin.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinMetadata {
    pub name: String,
    pub description: String,
    pub year: Option<String>,
    pub mint: Option<String>,
    pub denomination: Option<String>,
    pub metal: Option<String>,
    pub weight_grams: Option<f64>,
    pub diameter_mm: Option<f64>,
    pub grade: Option<String>,
    pub catalog_reference: Option<String>,
    pub ruler: Option<String>,
    pub obverse_description: Option<String>,
    pub reverse_description: Option<String>,
    pub obverse_legend: Option<String>,
    pub reverse_legend: Option<String>,
}

impl CoinMetadata {
    /// Metadata with only the required fields set.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Identity of a freshly created coin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoinSummary {
    pub id: String,
    pub name: String,
}

/// Outcome of an upload. Always produced, never raised.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin: Option<CoinSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn succeeded(coin: CoinSummary) -> Self {
        Self {
            success: true,
            coin: Some(coin),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            coin: None,
            error: Some(error.into()),
        }
    }

    /// Collapse into a `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<CoinSummary, String> {
        match (self.success, self.coin) {
            (true, Some(coin)) => Ok(coin),
            _ => Err(self.error.unwrap_or_else(|| "Upload failed".to_string())),
        }
    }
}

/// Keys identifying cached API queries.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The full coin list.
    Coins,
    /// A single coin by id.
    Coin(String),
}

impl QueryKey {
    /// Stable string form, e.g. `coins` or `coins/abc`.
    pub fn cache_key(&self) -> String {
        match self {
            Self::Coins => "coins".to_string(),
            Self::Coin(id) => format!("coins/{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COIN_JSON: &str = r#"{
        "id": "tetradrachm-01",
        "name": "Athenian Tetradrachm",
        "description": "Owl of Athena",
        "year": "450 BC",
        "mint": "Athens",
        "denomination": null,
        "metal": "Silver",
        "weight_grams": 17.2,
        "diameter_mm": null,
        "model_url": "/api/models/tetradrachm-01.glb",
        "thumbnail_url": null,
        "grade": "VF",
        "catalog_reference": null,
        "ruler": null,
        "obverse_description": "Helmeted Athena",
        "reverse_description": "Owl",
        "obverse_legend": null,
        "reverse_legend": "AΘE"
    }"#;

    #[test]
    fn test_coin_deserialize() {
        let coin: Coin = serde_json::from_str(COIN_JSON).unwrap();
        assert_eq!(coin.id, "tetradrachm-01");
        assert_eq!(coin.weight_grams, Some(17.2));
        assert_eq!(coin.diameter_mm, None);
        assert_eq!(coin.reverse_legend.as_deref(), Some("AΘE"));
        assert_eq!(coin.caption(), "Athenian Tetradrachm (450 BC, Athens)");
    }

    #[test]
    fn test_coin_missing_optional_fields() {
        let json = r#"{"id":"a","name":"A","description":"d","model_url":"/m.glb"}"#;
        let coin: Coin = serde_json::from_str(json).unwrap();
        assert_eq!(coin.year, None);
        assert_eq!(coin.thumbnail_url, None);
        assert_eq!(coin.caption(), "A");
    }

    #[test]
    fn test_metadata_serializes_nulls() {
        let meta = CoinMetadata::new("Denarius", "Roman silver");
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["name"], "Denarius");
        assert!(value["year"].is_null());
        assert!(value.get("id").is_none());
        assert!(value.get("model_url").is_none());
    }

    #[test]
    fn test_upload_response_into_result() {
        let coin = CoinSummary {
            id: "x".into(),
            name: "X".into(),
        };
        assert_eq!(UploadResponse::succeeded(coin.clone()).into_result(), Ok(coin));
        assert_eq!(
            UploadResponse::failed("Network error").into_result(),
            Err("Network error".to_string())
        );
    }

    #[test]
    fn test_query_keys() {
        assert_eq!(QueryKey::Coins.cache_key(), "coins");
        assert_eq!(QueryKey::Coin("abc".into()).cache_key(), "coins/abc");
    }
}
