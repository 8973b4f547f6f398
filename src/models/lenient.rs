//! Tolerant decoding for documents written by the mobile app.
//!
//! Stored documents are loosely typed: names can be missing or non-strings,
//! ratings can be `null`, and older records use different keys. These
//! helpers map any JSON shape onto the typed model without failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::domain::{Importance, RatingValue, WishlistCriterion};

/// Falsy values in the stored documents (`null`, `false`, `0`, `""`)
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Non-empty string content, anything else is treated as absent
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

pub(crate) fn importance(value: &Value) -> Option<Importance> {
    if is_blank(value) {
        return None;
    }
    Some(match value {
        Value::String(raw) => Importance::from(raw.as_str()),
        other => Importance::Unrecognized(other.to_string()),
    })
}

pub(crate) fn rating(value: &Value) -> RatingValue {
    if is_blank(value) {
        return RatingValue::NotRated;
    }
    match value {
        Value::String(raw) => RatingValue::from(raw.as_str()),
        other => RatingValue::Unrecognized(other.to_string()),
    }
}

/// Ratings mapping; a missing or non-object value yields no ratings
pub(crate) fn ratings(value: &Value) -> BTreeMap<String, RatingValue> {
    match value {
        Value::Object(entries) => entries
            .iter()
            .map(|(key, value)| (key.clone(), rating(value)))
            .collect(),
        _ => BTreeMap::new(),
    }
}

/// Wishlist line item; non-objects decode as an empty (skipped) criterion
pub(crate) fn criterion(value: &Value) -> WishlistCriterion {
    let Some(doc) = value.as_object() else {
        return WishlistCriterion::default();
    };

    WishlistCriterion {
        id: doc.get("id").and_then(text),
        name: doc.get("name").or_else(|| doc.get("criterion")).and_then(text),
        importance: doc.get("importance").and_then(importance),
    }
}

/// Numeric field that may have been stored as a number or numeric text
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok().filter(|n: &f64| n.is_finite()),
        _ => None,
    }
}

/// RFC 3339 text or a Firestore `{ seconds, nanoseconds }` timestamp
pub(crate) fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        Value::Object(doc) => {
            let seconds = doc
                .get("seconds")
                .or_else(|| doc.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = doc
                .get("nanoseconds")
                .or_else(|| doc.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}

pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text(&value))
}

pub(crate) fn deserialize_text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_text(deserializer).map(Option::unwrap_or_default)
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

pub(crate) fn deserialize_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number(&value))
}

pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(timestamp(&value))
}
