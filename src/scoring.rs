use crate::lexicon::Lexicon;
use crate::models::{Classification, Post, PostScore};
use crate::normalize::clean_text;

/// Sums lexicon weights over the whitespace-separated words of already-cleaned text.
pub fn score_text(clean: &str, lexicon: &Lexicon) -> i128 {
    clean
        .split_whitespace()
        .map(|w| i128::from(lexicon.weight(w)))
        .sum()
}

pub fn classify(score: i128) -> Classification {
    match score {
        s if s > 0 => Classification::Positive,
        s if s < 0 => Classification::Negative,
        _ => Classification::Neutral,
    }
}

pub fn score_post<'a>(post: &'a Post, lexicon: &Lexicon) -> PostScore<'a> {
    let score = score_text(&clean_text(&post.raw_text), lexicon);
    PostScore {
        post,
        score,
        classification: classify(score),
    }
}
