use rayon::prelude::*;
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::models::{Classification, CountryTable, Post, PostScore};
use crate::rank::{top_countries, RankOptions};
use crate::report::{rounded_mean, Report, ReportError};
use crate::scoring::score_post;

/// Running statistics for one pass over the posts.
///
/// Two tallies over adjacent slices merge into the tally of the concatenated slice,
/// which is what lets `aggregate_parallel` split the work freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub total_posts: u64,
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub score_sum: i128,
    pub favorited: u64,
    pub favorited_sum: i128,
    pub retweeted: u64,
    pub retweeted_sum: i128,
    pub countries: CountryTable,
}

impl Tally {
    pub fn observe(&mut self, ps: &PostScore<'_>) {
        match ps.classification {
            Classification::Positive => self.positive += 1,
            Classification::Negative => self.negative += 1,
            Classification::Neutral => self.neutral += 1,
        }
        self.total_posts += 1;
        self.score_sum += ps.score;

        self.countries.record(&ps.post.country, ps.score);

        if ps.post.retweet_count > 0 {
            self.retweeted += 1;
            self.retweeted_sum += ps.score;
        }
        if ps.post.favorite_count > 0 {
            self.favorited += 1;
            self.favorited_sum += ps.score;
        }
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        self.total_posts += other.total_posts;
        self.positive += other.positive;
        self.negative += other.negative;
        self.neutral += other.neutral;
        self.score_sum += other.score_sum;
        self.favorited += other.favorited;
        self.favorited_sum += other.favorited_sum;
        self.retweeted += other.retweeted;
        self.retweeted_sum += other.retweeted_sum;
        self.countries.merge(other.countries);
        self
    }

    /// Turns the running sums into a report. Fails instead of dividing by zero.
    pub fn finish(self, opts: &RankOptions) -> Result<(Report, CountryTable), ReportError> {
        let average_sentiment =
            rounded_mean(self.score_sum, self.total_posts, opts.decimals).ok_or(ReportError::NoPosts)?;
        let average_sentiment_favorited = rounded_mean(self.favorited_sum, self.favorited, opts.decimals)
            .ok_or(ReportError::NoFavoritedPosts)?;
        let average_sentiment_retweeted = rounded_mean(self.retweeted_sum, self.retweeted, opts.decimals)
            .ok_or(ReportError::NoRetweetedPosts)?;

        let report = Report {
            average_sentiment,
            total_posts: self.total_posts,
            positive_count: self.positive,
            negative_count: self.negative,
            neutral_count: self.neutral,
            favorited_count: self.favorited,
            average_sentiment_favorited,
            retweeted_count: self.retweeted,
            average_sentiment_retweeted,
            top_five_countries: top_countries(&self.countries, opts),
        };
        Ok((report, self.countries))
    }
}

pub fn tally(posts: &[Post], lexicon: &Lexicon) -> Tally {
    let mut t = Tally::default();
    for post in posts {
        t.observe(&score_post(post, lexicon));
    }
    t
}

pub fn tally_parallel(posts: &[Post], lexicon: &Lexicon) -> Tally {
    posts
        .par_iter()
        .fold(Tally::default, |mut t, post| {
            t.observe(&score_post(post, lexicon));
            t
        })
        .reduce(Tally::default, Tally::merge)
}

/// Scores every post and builds the report in a single sequential pass.
pub fn aggregate(
    posts: &[Post],
    lexicon: &Lexicon,
    opts: &RankOptions,
) -> Result<(Report, CountryTable), ReportError> {
    if posts.is_empty() {
        return Err(ReportError::NoPosts);
    }
    let t = tally(posts, lexicon);
    debug!(
        "Aggregation done - posts={}, countries={}, favorited={}, retweeted={}",
        t.total_posts,
        t.countries.len(),
        t.favorited,
        t.retweeted
    );
    t.finish(opts)
}

/// Same result as [`aggregate`], with scoring spread over the rayon pool.
pub fn aggregate_parallel(
    posts: &[Post],
    lexicon: &Lexicon,
    opts: &RankOptions,
) -> Result<(Report, CountryTable), ReportError> {
    if posts.is_empty() {
        return Err(ReportError::NoPosts);
    }
    let t = tally_parallel(posts, lexicon);
    debug!(
        "Parallel aggregation done - posts={}, countries={}, threads={}",
        t.total_posts,
        t.countries.len(),
        rayon::current_num_threads()
    );
    t.finish(opts)
}
