use serde::{Deserialize, Serialize};

use crate::models::domain::ScoreReport;

/// One row of the ranked comparison list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProperty {
    pub rank: usize,
    #[serde(rename = "propertyId")]
    pub property_id: String,
    pub address: String,
    #[serde(rename = "wishlistId")]
    pub wishlist_id: Option<String>,
    /// `None` when the property has no linked wishlist to score against
    pub report: Option<ScoreReport>,
}

impl RankedProperty {
    pub fn match_score(&self) -> Option<f64> {
        self.report.as_ref().map(|report| report.match_percentage)
    }
}

/// One property column of a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonColumn {
    pub position: usize,
    #[serde(rename = "propertyId")]
    pub property_id: String,
    pub address: String,
    pub price: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    #[serde(rename = "matchScore")]
    pub match_score: Option<f64>,
    #[serde(rename = "scoreLabel")]
    pub score_label: String,
    #[serde(rename = "wishlistName")]
    pub wishlist_name: String,
    pub notes: Option<String>,
}

/// Response for a ranked comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub matches: Vec<RankedProperty>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "totalProperties")]
    pub total_properties: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for a side-by-side comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideBySideResponse {
    pub columns: Vec<ComparisonColumn>,
    #[serde(rename = "missingPropertyIds")]
    pub missing_property_ids: Vec<String>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
