use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::lenient;

/// Maximum numeric score a single criterion can reach (an `excellent` rating)
pub const MAX_SCORE_PER_ITEM: u8 = 5;

/// Lowest numeric score at which a must-have criterion counts as met (`average`)
pub const MUST_HAVE_MET_THRESHOLD_SCORE: u8 = 3;

/// Maximum number of properties that can be compared side by side
pub const MAX_COMPARE_ITEMS: usize = 3;

/// Weight tier a user assigns to a wishlist criterion
///
/// Values outside the five known tiers are kept verbatim in `Unrecognized`
/// and weigh the same as `Optional`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Importance {
    MustHave,
    VeryImportant,
    #[default]
    Important,
    NiceToHave,
    Optional,
    Unrecognized(String),
}

impl Importance {
    /// The known tiers, most important first
    pub const ALL: [Importance; 5] = [
        Importance::MustHave,
        Importance::VeryImportant,
        Importance::Important,
        Importance::NiceToHave,
        Importance::Optional,
    ];

    /// Wire name as stored in wishlist documents
    pub fn as_str(&self) -> &str {
        match self {
            Importance::MustHave => "mustHave",
            Importance::VeryImportant => "veryImportant",
            Importance::Important => "important",
            Importance::NiceToHave => "niceToHave",
            Importance::Optional => "optional",
            Importance::Unrecognized(raw) => raw,
        }
    }

    /// Multiplier applied to the criterion's numeric score
    #[inline]
    pub fn weight(&self) -> u32 {
        match self {
            Importance::MustHave => 5,
            Importance::VeryImportant => 4,
            Importance::Important => 3,
            Importance::NiceToHave => 2,
            Importance::Optional | Importance::Unrecognized(_) => 1,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Importance::MustHave => "Must Have",
            Importance::VeryImportant => "Very Important",
            Importance::Important => "Important",
            Importance::NiceToHave => "Nice to Have",
            Importance::Optional => "Optional",
            Importance::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Importance::Unrecognized(_))
    }
}

impl From<&str> for Importance {
    fn from(value: &str) -> Self {
        match value {
            "mustHave" => Importance::MustHave,
            "veryImportant" => Importance::VeryImportant,
            "important" => Importance::Important,
            "niceToHave" => Importance::NiceToHave,
            "optional" => Importance::Optional,
            other => Importance::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Importance {
    fn from(value: String) -> Self {
        Importance::from(value.as_str())
    }
}

impl From<Importance> for String {
    fn from(value: Importance) -> Self {
        match value {
            Importance::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative rating a user records for one criterion of a property
///
/// Decoding never fails: blank values mean `NotRated` and anything that is
/// not a known rating string is kept in `Unrecognized` (scoring 0).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum RatingValue {
    #[default]
    NotRated,
    VeryPoor,
    Poor,
    Average,
    Good,
    Excellent,
    Unrecognized(String),
}

impl RatingValue {
    /// The known ratings, lowest first
    pub const ALL: [RatingValue; 6] = [
        RatingValue::NotRated,
        RatingValue::VeryPoor,
        RatingValue::Poor,
        RatingValue::Average,
        RatingValue::Good,
        RatingValue::Excellent,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            RatingValue::NotRated => "not_rated",
            RatingValue::VeryPoor => "very_poor",
            RatingValue::Poor => "poor",
            RatingValue::Average => "average",
            RatingValue::Good => "good",
            RatingValue::Excellent => "excellent",
            RatingValue::Unrecognized(raw) => raw,
        }
    }

    /// Numeric score (0-5) used by the weighted match
    #[inline]
    pub fn score(&self) -> u8 {
        match self {
            RatingValue::NotRated | RatingValue::Unrecognized(_) => 0,
            RatingValue::VeryPoor => 1,
            RatingValue::Poor => 2,
            RatingValue::Average => 3,
            RatingValue::Good => 4,
            RatingValue::Excellent => 5,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RatingValue::NotRated => "Not Rated",
            RatingValue::VeryPoor => "Very Poor",
            RatingValue::Poor => "Poor",
            RatingValue::Average => "Average",
            RatingValue::Good => "Good",
            RatingValue::Excellent => "Excellent",
            RatingValue::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for RatingValue {
    fn from(value: &str) -> Self {
        match value {
            "" | "not_rated" => RatingValue::NotRated,
            "very_poor" => RatingValue::VeryPoor,
            "poor" => RatingValue::Poor,
            "average" => RatingValue::Average,
            "good" => RatingValue::Good,
            "excellent" => RatingValue::Excellent,
            other => RatingValue::Unrecognized(other.to_string()),
        }
    }
}

impl From<Value> for RatingValue {
    fn from(value: Value) -> Self {
        lenient::rating(&value)
    }
}

impl From<RatingValue> for String {
    fn from(value: RatingValue) -> Self {
        match value {
            RatingValue::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RatingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line item of a wishlist
///
/// `name` doubles as the key into a property's ratings. Malformed entries
/// decode with `name` or `importance` unset and are skipped when scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct WishlistCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub importance: Option<Importance>,
}

impl WishlistCriterion {
    pub fn new(name: impl Into<String>, importance: Importance) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            importance: Some(importance),
        }
    }

    /// Trimmed name used to look up ratings, if the criterion has one
    pub fn key(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim)
    }
}

impl From<Value> for WishlistCriterion {
    fn from(value: Value) -> Self {
        lenient::criterion(&value)
    }
}

/// Named collection of weighted criteria
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(default, deserialize_with = "lenient::deserialize_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_text_or_empty")]
    pub name: String,
    pub items: Vec<WishlistCriterion>,
}

/// Where a property sits in the buying process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyStatus {
    Researching,
    ViewingScheduled,
    VisitedInterested,
    VisitedNotInterested,
    OfferMade,
    UnderContract,
    RejectedLost,
    Archived,
    #[serde(other)]
    Unknown,
}

impl PropertyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyStatus::Researching => "Researching",
            PropertyStatus::ViewingScheduled => "Viewing Scheduled",
            PropertyStatus::VisitedInterested => "Visited - Interested",
            PropertyStatus::VisitedNotInterested => "Visited - Not Interested",
            PropertyStatus::OfferMade => "Offer Made",
            PropertyStatus::UnderContract => "Under Contract",
            PropertyStatus::RejectedLost => "Rejected / Lost",
            PropertyStatus::Archived => "Archived",
            PropertyStatus::Unknown => "Unknown Status",
        }
    }
}

/// Candidate property with the ratings recorded against its wishlist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PropertyDocument")]
pub struct Property {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub address: String,
    #[serde(rename = "listingLink", skip_serializing_if = "Option::is_none")]
    pub listing_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    /// Garage spaces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "wishlistId", skip_serializing_if = "Option::is_none")]
    pub wishlist_id: Option<String>,
    #[serde(rename = "dateVisited", skip_serializing_if = "Option::is_none")]
    pub date_visited: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Ratings keyed by trimmed criterion name
    pub ratings: BTreeMap<String, RatingValue>,
}

/// Stored shape of a property, before the legacy ratings key is resolved
#[derive(Deserialize)]
struct PropertyDocument {
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_text_or_empty")]
    address: String,
    #[serde(rename = "listingLink", default, deserialize_with = "lenient::deserialize_text")]
    listing_link: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_number")]
    price: Option<f64>,
    #[serde(default)]
    status: Option<PropertyStatus>,
    #[serde(default, deserialize_with = "lenient::deserialize_number")]
    bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient::deserialize_number")]
    bathrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient::deserialize_number")]
    garage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    notes: Option<String>,
    #[serde(rename = "wishlistId", default, deserialize_with = "lenient::deserialize_text")]
    wishlist_id: Option<String>,
    #[serde(rename = "dateVisited", default, deserialize_with = "lenient::deserialize_timestamp")]
    date_visited: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient::deserialize_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::deserialize_present")]
    ratings: Option<Value>,
    #[serde(rename = "wishlistRatings", default, deserialize_with = "lenient::deserialize_present")]
    wishlist_ratings: Option<Value>,
}

impl From<PropertyDocument> for Property {
    fn from(doc: PropertyDocument) -> Self {
        // `ratings` wins over the legacy key whenever it is present, even as null
        let ratings = doc
            .ratings
            .or(doc.wishlist_ratings)
            .map(|value| lenient::ratings(&value))
            .unwrap_or_default();

        Self {
            id: doc.id,
            address: doc.address,
            listing_link: doc.listing_link,
            price: doc.price,
            status: doc.status,
            bedrooms: doc.bedrooms,
            bathrooms: doc.bathrooms,
            garage: doc.garage,
            notes: doc.notes,
            wishlist_id: doc.wishlist_id,
            date_visited: doc.date_visited,
            created_at: doc.created_at,
            ratings,
        }
    }
}

impl Property {
    /// Rating recorded for a criterion key, `NotRated` when absent
    pub fn rating_for(&self, key: &str) -> RatingValue {
        self.ratings.get(key).cloned().unwrap_or_default()
    }
}

/// Per-criterion row of a score report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionDetail {
    #[serde(rename = "criterionId")]
    pub criterion_id: String,
    pub criterion: String,
    pub importance: Importance,
    #[serde(rename = "ratingValue")]
    pub rating_value: RatingValue,
    #[serde(rename = "numericScore")]
    pub numeric_score: u8,
    #[serde(rename = "maxPoints")]
    pub max_points: u8,
    #[serde(rename = "isMustHave")]
    pub is_must_have: bool,
    pub met: bool,
}

/// How a single criterion fared, used to colour per-criterion bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailStatus {
    Met,
    Partial,
    Unmet,
}

impl CriterionDetail {
    /// Fraction of the maximum points reached, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.max_points == 0 {
            return 0.0;
        }
        (f64::from(self.numeric_score) / f64::from(self.max_points)).clamp(0.0, 1.0)
    }

    pub fn status(&self) -> DetailStatus {
        if self.met {
            DetailStatus::Met
        } else if self.progress() > 0.0 {
            DetailStatus::Partial
        } else {
            DetailStatus::Unmet
        }
    }
}

/// Result of scoring one property against one wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    #[serde(rename = "matchPercentage")]
    pub match_percentage: f64,
    #[serde(rename = "mustHaveMet")]
    pub must_have_met: bool,
    pub details: Vec<CriterionDetail>,
    /// Malformed criteria left out of the computation
    #[serde(skip)]
    pub skipped: usize,
}

impl ScoreReport {
    /// Zero-value report returned for unusable input documents
    pub fn invalid_input() -> Self {
        Self {
            match_percentage: 0.0,
            must_have_met: true,
            details: Vec::new(),
            skipped: 0,
        }
    }
}
