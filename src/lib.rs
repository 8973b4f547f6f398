//! House Match - weighted wishlist matching for candidate properties
//!
//! This library scores how well a property's recorded ratings satisfy a
//! wishlist of weighted criteria, and builds the ranked and side-by-side
//! comparisons on top of that score.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{compute_match, score_documents, CompareSelection, Ranker, WishlistDraft};
pub use models::{Importance, Property, RatingValue, ScoreReport, Wishlist, WishlistCriterion};
