use serde::Serialize;
use thiserror::Error;

/// Conditions under which no meaningful report can be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("no posts to analyze")]
    NoPosts,
    #[error("lexicon is empty")]
    EmptyLexicon,
    #[error("no favorited posts")]
    NoFavoritedPosts,
    #[error("no retweeted posts")]
    NoRetweetedPosts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub average_sentiment: f64,
    pub total_posts: u64,
    pub positive_count: u64,
    pub negative_count: u64,
    pub neutral_count: u64,
    pub favorited_count: u64,
    pub average_sentiment_favorited: f64,
    pub retweeted_count: u64,
    pub average_sentiment_retweeted: f64,
    pub top_five_countries: Vec<String>,
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Mean of `sum` over `count`, rounded; `None` when `count` is zero.
pub fn rounded_mean(sum: i128, count: u64, decimals: u32) -> Option<f64> {
    (count > 0).then(|| round_to(sum as f64 / count as f64, decimals))
}

/// Shortest decimal form that still shows a fractional part, e.g. `2.0`, `0.33`.
pub fn format_average(value: f64) -> String {
    format!("{:?}", value)
}
