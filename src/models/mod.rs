// Model exports
pub mod domain;
pub(crate) mod lenient;
pub mod requests;
pub mod responses;

pub use domain::{
    CriterionDetail, DetailStatus, Importance, Property, PropertyStatus, RatingValue, ScoreReport,
    Wishlist, WishlistCriterion, MAX_COMPARE_ITEMS, MAX_SCORE_PER_ITEM,
    MUST_HAVE_MET_THRESHOLD_SCORE,
};
pub use requests::{ComparisonRequest, SideBySideRequest};
pub use responses::{
    ComparisonColumn, ComparisonResponse, ErrorResponse, RankedProperty, SideBySideResponse,
};
