use crate::core::{filters::passes_min_score, scoring::compute_match};
use crate::models::{Property, RankedProperty, Wishlist};

/// Result of ranking a set of properties
#[derive(Debug)]
pub struct RankingResult {
    pub entries: Vec<RankedProperty>,
    pub total_properties: usize,
}

/// Builds the ranked comparison list
///
/// # Pipeline Stages
/// 1. Drop properties without an id
/// 2. Score each property against its linked wishlist
/// 3. Apply the minimum score filter
/// 4. Sort by score and assign ranks
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    min_score: u8,
    limit: Option<usize>,
}

impl Ranker {
    pub fn new(min_score: u8) -> Self {
        Self {
            min_score: min_score.min(100),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn min_score(&self) -> u8 {
        self.min_score
    }

    /// Rank properties by how well they match their linked wishlists
    ///
    /// Properties without a linked (or existing) wishlist have no score; they
    /// are only listed when the minimum score is 0 and always sort last.
    /// Equal scores keep their input order. With no wishlists at all there
    /// is nothing to rank against and the list is empty.
    pub fn rank(&self, properties: &[Property], wishlists: &[Wishlist]) -> RankingResult {
        let total_properties = properties.len();

        if wishlists.is_empty() {
            tracing::debug!("No wishlists to rank {} properties against", total_properties);
            return RankingResult {
                entries: Vec::new(),
                total_properties,
            };
        }

        let mut scored: Vec<RankedProperty> = properties
            .iter()
            .filter_map(|property| {
                let Some(property_id) = property.id.clone() else {
                    tracing::warn!("Skipping property without id: {:?}", property.address);
                    return None;
                };

                let report = linked_wishlist(property, wishlists).map(|wishlist| {
                    let report = compute_match(property, wishlist);
                    if report.skipped > 0 {
                        tracing::warn!(
                            "Skipped {} malformed criteria scoring {} against wishlist {:?}",
                            report.skipped,
                            property_id,
                            wishlist.id
                        );
                    }
                    report
                });

                let score = report.as_ref().map(|report| report.match_percentage);
                if !passes_min_score(score, self.min_score) {
                    return None;
                }

                Some(RankedProperty {
                    rank: 0,
                    property_id,
                    address: property.address.clone(),
                    wishlist_id: property.wishlist_id.clone(),
                    report,
                })
            })
            .collect();

        // Unscored entries sort as -1, below any real score
        scored.sort_by(|a, b| {
            let a_score = a.match_score().unwrap_or(-1.0);
            let b_score = b.match_score().unwrap_or(-1.0);
            b_score
                .partial_cmp(&a_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (index, entry) in scored.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        if let Some(limit) = self.limit {
            scored.truncate(limit);
        }

        tracing::debug!(
            "Ranked {} of {} properties (min score {})",
            scored.len(),
            total_properties,
            self.min_score
        );

        RankingResult {
            entries: scored,
            total_properties,
        }
    }
}

/// The wishlist a property is linked to, if it still exists
pub fn linked_wishlist<'a>(property: &Property, wishlists: &'a [Wishlist]) -> Option<&'a Wishlist> {
    let wishlist_id = property.wishlist_id.as_deref()?;
    wishlists
        .iter()
        .find(|wishlist| wishlist.id.as_deref() == Some(wishlist_id))
}
