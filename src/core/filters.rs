use serde::{Deserialize, Serialize};

/// Minimum match score presets offered when filtering the comparison list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MinScoreFilter {
    #[default]
    All,
    Fifty,
    Seventy,
    Eighty,
    Ninety,
}

impl MinScoreFilter {
    pub const PRESETS: [MinScoreFilter; 5] = [
        MinScoreFilter::All,
        MinScoreFilter::Fifty,
        MinScoreFilter::Seventy,
        MinScoreFilter::Eighty,
        MinScoreFilter::Ninety,
    ];

    pub fn min_score(self) -> u8 {
        match self {
            MinScoreFilter::All => 0,
            MinScoreFilter::Fifty => 50,
            MinScoreFilter::Seventy => 70,
            MinScoreFilter::Eighty => 80,
            MinScoreFilter::Ninety => 90,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MinScoreFilter::All => "Show All Scores",
            MinScoreFilter::Fifty => "50% +",
            MinScoreFilter::Seventy => "70% +",
            MinScoreFilter::Eighty => "80% +",
            MinScoreFilter::Ninety => "90% +",
        }
    }
}

/// Check if a (possibly unavailable) score passes the minimum score filter
///
/// A minimum of 0 shows everything, including properties that could not be
/// scored. Any other minimum drops unscored properties.
#[inline]
pub fn passes_min_score(score: Option<f64>, min_score: u8) -> bool {
    if min_score == 0 {
        return true;
    }
    score.is_some_and(|score| score >= f64::from(min_score))
}

/// Render a match score for display, `N/A` when unavailable
///
/// Halves round up (62.5 shows as 63%).
pub fn score_label(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{}%", score.round()),
        None => "N/A".to_string(),
    }
}
