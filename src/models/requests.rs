use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Property, Wishlist};

/// Request to rank properties against their linked wishlists
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ComparisonRequest {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub wishlists: Vec<Wishlist>,
    #[validate(range(max = 100))]
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: u8,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request to lay selected properties out side by side
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SideBySideRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "property_ids", rename = "propertyIds")]
    pub property_ids: Vec<String>,
}
