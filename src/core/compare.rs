use thiserror::Error;

use crate::core::{filters::score_label, ranker::linked_wishlist, scoring::compute_match};
use crate::models::{ComparisonColumn, Property, Wishlist, MAX_COMPARE_ITEMS};

/// Errors raised while selecting properties for comparison
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("at most {0} properties can be compared at once")]
    LimitReached(usize),

    #[error("no properties selected for comparison")]
    Empty,
}

/// Properties picked for a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareSelection {
    ids: Vec<String>,
    capacity: usize,
}

impl CompareSelection {
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: Vec::new(),
            capacity,
        }
    }

    /// Add the property if absent, remove it if present
    ///
    /// Returns `true` when the property is now selected.
    pub fn toggle(&mut self, property_id: &str) -> Result<bool, SelectionError> {
        if let Some(position) = self.ids.iter().position(|id| id == property_id) {
            self.ids.remove(position);
            return Ok(false);
        }
        if self.ids.len() >= self.capacity {
            return Err(SelectionError::LimitReached(self.capacity));
        }
        self.ids.push(property_id.to_string());
        Ok(true)
    }

    pub fn contains(&self, property_id: &str) -> bool {
        self.ids.iter().any(|id| id == property_id)
    }

    /// A comparison needs at least two properties
    pub fn is_ready(&self) -> bool {
        self.ids.len() >= 2
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl Default for CompareSelection {
    fn default() -> Self {
        Self::new(MAX_COMPARE_ITEMS)
    }
}

/// Columns for a side-by-side comparison
#[derive(Debug, Clone, PartialEq)]
pub struct SideBySide {
    pub columns: Vec<ComparisonColumn>,
    /// Selected ids with no matching property (e.g. deleted since selection)
    pub missing_ids: Vec<String>,
}

/// Name shown for a property's linked wishlist
pub fn wishlist_label<'a>(property: &Property, wishlists: &'a [Wishlist]) -> &'a str {
    if property.wishlist_id.is_none() {
        return "N/A";
    }
    linked_wishlist(property, wishlists).map_or("Unknown", |wishlist| wishlist.name.as_str())
}

/// Lay out the selected properties side by side
///
/// Columns follow the order of `properties`, not the selection order.
pub fn side_by_side(
    property_ids: &[String],
    properties: &[Property],
    wishlists: &[Wishlist],
) -> Result<SideBySide, SelectionError> {
    if property_ids.is_empty() {
        return Err(SelectionError::Empty);
    }

    let selected: Vec<&Property> = properties
        .iter()
        .filter(|property| {
            property
                .id
                .as_ref()
                .is_some_and(|id| property_ids.contains(id))
        })
        .collect();

    let columns: Vec<ComparisonColumn> = selected
        .iter()
        .enumerate()
        .map(|(index, property)| {
            let match_score = linked_wishlist(property, wishlists)
                .map(|wishlist| compute_match(property, wishlist).match_percentage);

            ComparisonColumn {
                position: index + 1,
                property_id: property.id.clone().unwrap_or_default(),
                address: property.address.clone(),
                price: property.price,
                bedrooms: property.bedrooms,
                bathrooms: property.bathrooms,
                match_score,
                score_label: score_label(match_score),
                wishlist_name: wishlist_label(property, wishlists).to_string(),
                notes: property.notes.clone(),
            }
        })
        .collect();

    let missing_ids: Vec<String> = property_ids
        .iter()
        .filter(|id| !columns.iter().any(|column| &column.property_id == *id))
        .cloned()
        .collect();

    if !missing_ids.is_empty() {
        tracing::warn!("Some selected properties could not be found: {:?}", missing_ids);
    }

    Ok(SideBySide {
        columns,
        missing_ids,
    })
}
