// Core algorithm exports
pub mod compare;
pub mod filters;
pub mod ranker;
pub mod scoring;
pub mod wishlist;

pub use compare::{side_by_side, wishlist_label, CompareSelection, SelectionError, SideBySide};
pub use filters::{passes_min_score, score_label, MinScoreFilter};
pub use ranker::{linked_wishlist, Ranker, RankingResult};
pub use scoring::{compute_match, score_documents, try_score_documents, ScoreError};
pub use wishlist::{orphaned_ratings, unlink_wishlist, WishlistDraft, WishlistError};
