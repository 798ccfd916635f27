//! Key-based place search against the map provider's local-search API.
//!
//! # Invariants
//! - Coordinates arrive as strings from the upstream API and are parsed
//!   into `f64`; unparseable values are decode errors, not panics.

use crate::weather::WeatherError;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/v2/local";

/// One resolved place from a free-text query.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
}

/// Raw response shape of the local-search endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    documents: Vec<SearchDocument>,
}

#[derive(Debug, Deserialize)]
struct SearchDocument {
    address_name: String,
    #[serde(default)]
    place_name: Option<String>,
    /// Longitude as a decimal string.
    x: String,
    /// Latitude as a decimal string.
    y: String,
}

impl SearchResponse {
    fn into_places(self) -> Result<Vec<Place>, WeatherError> {
        self.documents
            .into_iter()
            .map(|doc| {
                let lon = parse_coordinate(&doc.x, "x")?;
                let lat = parse_coordinate(&doc.y, "y")?;
                Ok(Place {
                    name: doc.place_name.unwrap_or_else(|| doc.address_name.clone()),
                    address: doc.address_name,
                    lat,
                    lon,
                })
            })
            .collect()
    }
}

fn parse_coordinate(value: &str, field: &str) -> Result<f64, WeatherError> {
    value
        .parse::<f64>()
        .map_err(|_| WeatherError::Decode(format!("invalid coordinate `{value}` in field {field}")))
}

/// HTTP client for free-text place search.
pub struct GeocodeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeocodeClient {
    /// # Errors
    /// - `MissingApiKey` when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the upstream base URL; test hook.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Searches places matching the free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<Place>, WeatherError> {
        let url = format!("{}/search/keyword.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("query", query)])
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|err| WeatherError::Decode(err.to_string()))?;
        parsed.into_places()
    }
}

#[cfg(test)]
mod tests {
    use super::SearchResponse;
    use crate::weather::WeatherError;

    #[test]
    fn decodes_documents_with_string_coordinates() {
        let raw = r#"{
            "documents": [
                {"address_name": "Jeonju-si Wansan-gu", "x": "127.1479", "y": "35.8242"},
                {"address_name": "Seoul Jung-gu", "place_name": "City Hall", "x": "126.9779", "y": "37.5663"}
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).expect("fixture decodes");
        let places = parsed.into_places().expect("coordinates parse");

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Jeonju-si Wansan-gu");
        assert!((places[0].lat - 35.8242).abs() < 1e-9);
        assert_eq!(places[1].name, "City Hall");
        assert_eq!(places[1].address, "Seoul Jung-gu");
    }

    #[test]
    fn bad_coordinate_string_is_a_decode_error() {
        let raw = r#"{"documents": [{"address_name": "nowhere", "x": "not-a-number", "y": "0"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(raw).expect("fixture decodes");
        assert!(matches!(
            parsed.into_places(),
            Err(WeatherError::Decode(_))
        ));
    }
}
