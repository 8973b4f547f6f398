use std::collections::BTreeSet;

use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Importance, Property, Wishlist, WishlistCriterion};

/// Errors raised while editing a wishlist
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WishlistError {
    #[error("wishlist name is required")]
    MissingName,

    #[error("criterion text is required")]
    BlankCriterion,

    #[error("\"{0}\" is already in the list")]
    Duplicate(String),

    #[error("unknown importance level: {0}")]
    UnknownImportance(String),

    #[error("criterion not found: {0}")]
    CriterionNotFound(String),
}

#[derive(Debug, Validate)]
struct WishlistName {
    #[validate(length(min = 1))]
    name: String,
}

/// Editable wishlist
///
/// Every criterion in a draft has an id, a name and a known importance.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistDraft {
    id: Option<String>,
    name: String,
    items: Vec<WishlistCriterion>,
}

impl WishlistDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Start editing an existing wishlist, repairing incomplete items
    pub fn from_wishlist(wishlist: &Wishlist) -> Self {
        let items = wishlist
            .items
            .iter()
            .map(|item| WishlistCriterion {
                id: Some(item.id.clone().unwrap_or_else(new_criterion_id)),
                name: Some(item.name.clone().unwrap_or_else(|| "Unknown".to_string())),
                importance: Some(
                    item.importance
                        .clone()
                        .filter(Importance::is_recognized)
                        .unwrap_or_default(),
                ),
            })
            .collect();

        Self {
            id: wishlist.id.clone(),
            name: wishlist.name.clone(),
            items,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn items(&self) -> &[WishlistCriterion] {
        &self.items
    }

    /// Append a criterion with the default importance
    ///
    /// Names are trimmed and compared case-insensitively.
    pub fn add_criterion(&mut self, text: &str) -> Result<&WishlistCriterion, WishlistError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(WishlistError::BlankCriterion);
        }

        let lowered = trimmed.to_lowercase();
        let exists = self
            .items
            .iter()
            .filter_map(WishlistCriterion::key)
            .any(|name| name.to_lowercase() == lowered);
        if exists {
            return Err(WishlistError::Duplicate(trimmed.to_string()));
        }

        let mut criterion = WishlistCriterion::new(trimmed, Importance::default());
        criterion.id = Some(new_criterion_id());
        self.items.push(criterion);

        Ok(&self.items[self.items.len() - 1])
    }

    pub fn set_importance(&mut self, criterion_id: &str, importance: Importance) -> Result<(), WishlistError> {
        if !importance.is_recognized() {
            return Err(WishlistError::UnknownImportance(importance.to_string()));
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id.as_deref() == Some(criterion_id))
            .ok_or_else(|| WishlistError::CriterionNotFound(criterion_id.to_string()))?;
        item.importance = Some(importance);
        Ok(())
    }

    /// Remove a criterion, returning whether it was present
    pub fn remove(&mut self, criterion_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id.as_deref() != Some(criterion_id));
        self.items.len() != before
    }

    /// Validate and produce the wishlist to store
    pub fn finish(self) -> Result<Wishlist, WishlistError> {
        let checked = WishlistName {
            name: self.name.trim().to_string(),
        };
        checked.validate().map_err(|_| WishlistError::MissingName)?;

        Ok(Wishlist {
            id: self.id,
            name: checked.name,
            items: self.items,
        })
    }
}

fn new_criterion_id() -> String {
    Uuid::new_v4().to_string()
}

/// Detach properties from a deleted wishlist
///
/// Ratings are left in place. Returns the number of properties changed.
pub fn unlink_wishlist(properties: &mut [Property], wishlist_id: &str) -> usize {
    let mut unlinked = 0;
    for property in properties
        .iter_mut()
        .filter(|property| property.wishlist_id.as_deref() == Some(wishlist_id))
    {
        property.wishlist_id = None;
        unlinked += 1;
    }

    if unlinked > 0 {
        tracing::info!("Unlinked {} properties from wishlist {}", unlinked, wishlist_id);
    }
    unlinked
}

/// Rating keys that no longer match any criterion of the wishlist
///
/// Ratings are keyed by criterion name, so renaming a criterion leaves its
/// old ratings behind; these are the keys the scorer will never read.
pub fn orphaned_ratings(property: &Property, wishlist: &Wishlist) -> Vec<String> {
    let keys: BTreeSet<&str> = wishlist
        .items
        .iter()
        .filter_map(WishlistCriterion::key)
        .collect();

    property
        .ratings
        .keys()
        .filter(|key| !keys.contains(key.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RatingValue;

    #[test]
    fn test_add_criterion_trims_and_defaults() {
        let mut draft = WishlistDraft::new("Family home");
        let criterion = draft.add_criterion("  Garage  ").unwrap();

        assert_eq!(criterion.name.as_deref(), Some("Garage"));
        assert_eq!(criterion.importance, Some(Importance::Important));
        assert!(criterion.id.is_some());
    }

    #[test]
    fn test_add_criterion_rejects_blank_and_duplicates() {
        let mut draft = WishlistDraft::new("Family home");
        draft.add_criterion("Garage").unwrap();

        assert_eq!(draft.add_criterion("   "), Err(WishlistError::BlankCriterion));
        assert_eq!(
            draft.add_criterion("garage"),
            Err(WishlistError::Duplicate("garage".to_string()))
        );
        assert_eq!(draft.items().len(), 1);
    }

    #[test]
    fn test_duplicate_check_ignores_stored_padding() {
        let wishlist = Wishlist {
            id: Some("w1".to_string()),
            name: "Old".to_string(),
            items: vec![WishlistCriterion::new(" Garage ", Importance::MustHave)],
        };
        let mut draft = WishlistDraft::from_wishlist(&wishlist);

        assert_eq!(
            draft.add_criterion("garage"),
            Err(WishlistError::Duplicate("garage".to_string()))
        );
        assert_eq!(draft.items().len(), 1);
    }

    #[test]
    fn test_set_importance() {
        let mut draft = WishlistDraft::new("Family home");
        let id = draft.add_criterion("Garage").unwrap().id.clone().unwrap();

        draft.set_importance(&id, Importance::MustHave).unwrap();
        assert_eq!(draft.items()[0].importance, Some(Importance::MustHave));

        assert_eq!(
            draft.set_importance(&id, Importance::from("urgent")),
            Err(WishlistError::UnknownImportance("urgent".to_string()))
        );
        assert_eq!(
            draft.set_importance("missing", Importance::Optional),
            Err(WishlistError::CriterionNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_remove_criterion() {
        let mut draft = WishlistDraft::new("Family home");
        let id = draft.add_criterion("Garage").unwrap().id.clone().unwrap();

        assert!(draft.remove(&id));
        assert!(!draft.remove(&id));
        assert!(draft.items().is_empty());
    }

    #[test]
    fn test_finish_requires_name() {
        assert_eq!(WishlistDraft::new("   ").finish(), Err(WishlistError::MissingName));

        let wishlist = WishlistDraft::new("  Starter  ").finish().unwrap();
        assert_eq!(wishlist.name, "Starter");
    }

    #[test]
    fn test_from_wishlist_repairs_items() {
        let wishlist = Wishlist {
            id: Some("w1".to_string()),
            name: "Old".to_string(),
            items: vec![
                WishlistCriterion::default(),
                WishlistCriterion::new("Pool", Importance::from("urgent")),
            ],
        };

        let draft = WishlistDraft::from_wishlist(&wishlist);

        assert_eq!(draft.items()[0].name.as_deref(), Some("Unknown"));
        assert_eq!(draft.items()[0].importance, Some(Importance::Important));
        assert_eq!(draft.items()[1].importance, Some(Importance::Important));
        assert!(draft.items().iter().all(|item| item.id.is_some()));
    }

    #[test]
    fn test_unlink_wishlist() {
        let mut properties = vec![
            Property {
                id: Some("1".to_string()),
                wishlist_id: Some("w1".to_string()),
                ratings: [("Garage".to_string(), RatingValue::Good)].into_iter().collect(),
                ..Property::default()
            },
            Property {
                id: Some("2".to_string()),
                wishlist_id: Some("w2".to_string()),
                ..Property::default()
            },
        ];

        assert_eq!(unlink_wishlist(&mut properties, "w1"), 1);
        assert!(properties[0].wishlist_id.is_none());
        assert_eq!(properties[0].ratings.len(), 1);
        assert_eq!(properties[1].wishlist_id.as_deref(), Some("w2"));
    }

    #[test]
    fn test_orphaned_ratings_after_rename() {
        let wishlist = Wishlist {
            id: Some("w1".to_string()),
            name: "Family home".to_string(),
            items: vec![WishlistCriterion::new(" Two-car garage ", Importance::MustHave)],
        };
        let property = Property {
            ratings: [
                ("Garage".to_string(), RatingValue::Good),
                ("Two-car garage".to_string(), RatingValue::Average),
            ]
            .into_iter()
            .collect(),
            ..Property::default()
        };

        assert_eq!(orphaned_ratings(&property, &wishlist), vec!["Garage".to_string()]);
    }
}
