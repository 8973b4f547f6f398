use serde_json::Value;
use thiserror::Error;

use crate::models::{
    lenient, CriterionDetail, Importance, Property, RatingValue, ScoreReport, Wishlist,
    MAX_SCORE_PER_ITEM, MUST_HAVE_MET_THRESHOLD_SCORE,
};

/// Reasons an untyped (property, wishlist) pair cannot be scored at all
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("property document is missing or not an object")]
    InvalidProperty,

    #[error("wishlist document is missing or not an object")]
    InvalidWishlist,

    #[error("wishlist items are missing or not a list")]
    InvalidItems,
}

/// Calculate how well a property matches a wishlist
///
/// Each criterion contributes `score * weight` out of a possible
/// `MAX_SCORE_PER_ITEM * weight`:
///
/// match = 100 * sum(score * weight) / sum(5 * weight)
///
/// A wishlist with no usable criteria is a vacuous 100% match. Must-have
/// criteria do not change the percentage; they only drive `must_have_met`,
/// which requires every must-have to be rated `average` or better.
/// Criteria without a name or importance are skipped and counted in
/// `ScoreReport::skipped`.
pub fn compute_match(property: &Property, wishlist: &Wishlist) -> ScoreReport {
    let mut total_weighted_score: u64 = 0;
    let mut total_max_weighted_score: u64 = 0;
    let mut must_have_count = 0usize;
    let mut must_have_met_count = 0usize;
    let mut skipped = 0usize;
    let mut details = Vec::with_capacity(wishlist.items.len());

    for item in &wishlist.items {
        let (Some(name), Some(importance)) = (item.name.as_deref(), item.importance.as_ref())
        else {
            skipped += 1;
            continue;
        };
        if name.is_empty() {
            skipped += 1;
            continue;
        }

        // Ratings are keyed by the trimmed display name
        let key = name.trim();
        let weight = u64::from(importance.weight());
        let rating_value = property.rating_for(key);
        let numeric_score = rating_value.score();

        total_weighted_score += u64::from(numeric_score) * weight;
        total_max_weighted_score += u64::from(MAX_SCORE_PER_ITEM) * weight;

        let is_must_have = *importance == Importance::MustHave;
        let met = if is_must_have {
            must_have_count += 1;
            let met = numeric_score >= MUST_HAVE_MET_THRESHOLD_SCORE;
            if met {
                must_have_met_count += 1;
            }
            met
        } else {
            numeric_score > RatingValue::NotRated.score()
        };

        details.push(CriterionDetail {
            criterion_id: key.to_string(),
            criterion: key.to_string(),
            importance: importance.clone(),
            rating_value,
            numeric_score,
            max_points: MAX_SCORE_PER_ITEM,
            is_must_have,
            met,
        });
    }

    let match_percentage = if total_max_weighted_score == 0 {
        100.0
    } else {
        100.0 * total_weighted_score as f64 / total_max_weighted_score as f64
    };

    ScoreReport {
        match_percentage: match_percentage.clamp(0.0, 100.0),
        must_have_met: must_have_count == 0 || must_have_met_count == must_have_count,
        details,
        skipped,
    }
}

/// Score raw property and wishlist documents
///
/// Only the property's `ratings` (or legacy `wishlistRatings`) and the
/// wishlist's `items` are read. Malformed items are skipped; the pair as a
/// whole is rejected only when either document is not an object or `items`
/// is not a list.
pub fn try_score_documents(property: &Value, wishlist: &Value) -> Result<ScoreReport, ScoreError> {
    let property_doc = property.as_object().ok_or(ScoreError::InvalidProperty)?;
    let wishlist_doc = wishlist.as_object().ok_or(ScoreError::InvalidWishlist)?;
    let items = wishlist_doc
        .get("items")
        .and_then(Value::as_array)
        .ok_or(ScoreError::InvalidItems)?;

    let ratings = property_doc
        .get("ratings")
        .or_else(|| property_doc.get("wishlistRatings"))
        .map(lenient::ratings)
        .unwrap_or_default();

    let property = Property {
        ratings,
        ..Property::default()
    };
    let wishlist = Wishlist {
        items: items.iter().map(lenient::criterion).collect(),
        ..Wishlist::default()
    };

    Ok(compute_match(&property, &wishlist))
}

/// Like [`try_score_documents`], but falls back to the zero-value report
/// (`0%`, must-haves met, no details) for unusable input
pub fn score_documents(property: &Value, wishlist: &Value) -> ScoreReport {
    try_score_documents(property, wishlist).unwrap_or_else(|e| {
        tracing::warn!("Cannot score documents: {}", e);
        ScoreReport::invalid_input()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WishlistCriterion;
    use serde_json::json;

    fn wishlist(items: Vec<WishlistCriterion>) -> Wishlist {
        Wishlist {
            id: Some("w1".to_string()),
            name: "Family home".to_string(),
            items,
        }
    }

    fn property(ratings: &[(&str, RatingValue)]) -> Property {
        Property {
            id: Some("p1".to_string()),
            ratings: ratings
                .iter()
                .map(|(name, rating)| (name.to_string(), rating.clone()))
                .collect(),
            ..Property::default()
        }
    }

    #[test]
    fn test_must_have_good_rating() {
        let wishlist = wishlist(vec![WishlistCriterion::new("Garage", Importance::MustHave)]);
        let report = compute_match(&property(&[("Garage", RatingValue::Good)]), &wishlist);

        assert_eq!(report.match_percentage, 80.0);
        assert!(report.must_have_met);
        assert_eq!(report.details[0].numeric_score, 4);
        assert!(report.details[0].met);
    }

    #[test]
    fn test_must_have_poor_rating() {
        let wishlist = wishlist(vec![WishlistCriterion::new("Garage", Importance::MustHave)]);
        let report = compute_match(&property(&[("Garage", RatingValue::Poor)]), &wishlist);

        assert_eq!(report.match_percentage, 40.0);
        assert!(!report.must_have_met);
        assert!(!report.details[0].met);
    }

    #[test]
    fn test_must_have_threshold_is_average() {
        let wishlist = wishlist(vec![WishlistCriterion::new("Garage", Importance::MustHave)]);
        let report = compute_match(&property(&[("Garage", RatingValue::Average)]), &wishlist);

        assert!(report.must_have_met);
        assert_eq!(report.match_percentage, 60.0);
    }

    #[test]
    fn test_unrated_optional() {
        let wishlist = wishlist(vec![WishlistCriterion::new("Pool", Importance::Optional)]);
        let report = compute_match(&property(&[]), &wishlist);

        assert_eq!(report.match_percentage, 0.0);
        assert!(report.must_have_met);
        assert_eq!(report.details[0].rating_value, RatingValue::NotRated);
        assert!(!report.details[0].met);
    }

    #[test]
    fn test_empty_wishlist_is_full_match() {
        let report = compute_match(&property(&[]), &wishlist(vec![]));

        assert_eq!(report.match_percentage, 100.0);
        assert!(report.must_have_met);
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_weighted_mix() {
        let wishlist = wishlist(vec![
            WishlistCriterion::new("Garage", Importance::MustHave),
            WishlistCriterion::new("Yard", Importance::NiceToHave),
        ]);
        let report = compute_match(
            &property(&[("Garage", RatingValue::Excellent), ("Yard", RatingValue::VeryPoor)]),
            &wishlist,
        );

        // (5*5 + 1*2) / (5*5 + 5*2) = 27 / 35
        assert!((report.match_percentage - 100.0 * 27.0 / 35.0).abs() < 1e-9);
        assert!(report.must_have_met);
        assert!(report.details[1].met);
    }

    #[test]
    fn test_name_is_trimmed_for_lookup() {
        let wishlist = wishlist(vec![WishlistCriterion::new("  Garage ", Importance::Important)]);
        let report = compute_match(&property(&[("Garage", RatingValue::Excellent)]), &wishlist);

        assert_eq!(report.match_percentage, 100.0);
        assert_eq!(report.details[0].criterion_id, "Garage");
        assert_eq!(report.details[0].criterion, "Garage");
    }

    #[test]
    fn test_malformed_items_are_skipped() {
        let wishlist = wishlist(vec![
            WishlistCriterion::default(),
            WishlistCriterion {
                id: None,
                name: Some("Garage".to_string()),
                importance: None,
            },
            WishlistCriterion {
                id: None,
                name: Some(String::new()),
                importance: Some(Importance::MustHave),
            },
            WishlistCriterion::new("Pool", Importance::Important),
        ]);
        let report = compute_match(&property(&[("Pool", RatingValue::Good)]), &wishlist);

        assert_eq!(report.details.len(), 1);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.match_percentage, 80.0);
    }

    #[test]
    fn test_unrecognized_importance_weighs_as_optional() {
        let wishlist = wishlist(vec![
            WishlistCriterion::new("Garage", Importance::from("critical")),
            WishlistCriterion::new("Pool", Importance::Important),
        ]);
        let report = compute_match(
            &property(&[("Garage", RatingValue::Excellent), ("Pool", RatingValue::NotRated)]),
            &wishlist,
        );

        // (5*1 + 0*3) / (5*1 + 5*3) = 5 / 20
        assert_eq!(report.match_percentage, 25.0);
        assert_eq!(report.details[0].importance, Importance::Unrecognized("critical".to_string()));
        assert!(!report.details[0].is_must_have);
    }

    #[test]
    fn test_unrecognized_rating_scores_zero() {
        let wishlist = wishlist(vec![WishlistCriterion::new("Garage", Importance::Important)]);
        let report = compute_match(&property(&[("Garage", RatingValue::from("superb"))]), &wishlist);

        assert_eq!(report.details[0].numeric_score, 0);
        assert_eq!(report.details[0].rating_value.as_str(), "superb");
        assert_eq!(report.match_percentage, 0.0);
    }

    #[test]
    fn test_documents_fallback() {
        let wishlist = json!({ "items": [{ "name": "Garage", "importance": "mustHave" }] });

        assert_eq!(score_documents(&json!(null), &wishlist), ScoreReport::invalid_input());
        assert_eq!(score_documents(&json!({}), &json!({ "items": "Garage" })), ScoreReport::invalid_input());
        assert_eq!(score_documents(&json!({}), &json!(null)), ScoreReport::invalid_input());
        assert_eq!(
            try_score_documents(&json!({}), &json!({})),
            Err(ScoreError::InvalidItems)
        );
    }

    #[test]
    fn test_documents_without_ratings() {
        let wishlist = json!({ "items": [{ "name": "Garage", "importance": "mustHave" }] });
        let report = try_score_documents(&json!({ "address": "1 Main St" }), &wishlist).unwrap();

        assert_eq!(report.match_percentage, 0.0);
        assert!(!report.must_have_met);
    }

    #[test]
    fn test_documents_with_odd_items() {
        let wishlist = json!({
            "items": [
                null,
                "Garage",
                { "name": 12, "importance": "important" },
                { "name": "Pool" },
                { "criterion": "Yard", "importance": "important" },
            ]
        });
        let property = json!({ "wishlistRatings": { "Yard": "excellent" } });
        let report = try_score_documents(&property, &wishlist).unwrap();

        assert_eq!(report.details.len(), 1);
        assert_eq!(report.skipped, 4);
        assert_eq!(report.match_percentage, 100.0);
    }
}
