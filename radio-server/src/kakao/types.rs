//! Place-search response DTOs.

use serde::Deserialize;

/// Response from either local-search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// One place document. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Longitude.
    pub x: String,
    /// Latitude.
    pub y: String,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub address_name: Option<String>,
    #[serde(default)]
    pub road_address_name: Option<String>,
    #[serde(default)]
    pub category_group_name: Option<String>,
}
