use std::collections::HashMap;

/// Country value the post source uses when no location was attached.
pub const SENTINEL_COUNTRY: &str = "NULL";

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub timestamp: String,
    pub raw_text: String,
    pub author: String,
    pub retweet_count: u64,
    pub favorite_count: u64,
    pub language: String,
    pub country: String, // may be SENTINEL_COUNTRY
    pub region: String,
    pub locality: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy)]
pub struct PostScore<'a> {
    pub post: &'a Post,
    pub score: i128, // sum of i64 weights, cannot overflow
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryStat {
    pub country: String,
    pub cumulative_score: i128,
    pub post_count: u64, // >= 1 once stored
}

impl CountryStat {
    pub fn new(country: &str, score: i128) -> Self {
        Self {
            country: country.to_string(),
            cumulative_score: score,
            post_count: 1,
        }
    }

    pub fn add(&mut self, score: i128) {
        self.cumulative_score += score;
        self.post_count += 1;
    }

    pub fn absorb(&mut self, other: &CountryStat) {
        self.cumulative_score += other.cumulative_score;
        self.post_count += other.post_count;
    }

    /// Raw mean; callers round before ranking or display.
    pub fn average_score(&self) -> f64 {
        self.cumulative_score as f64 / self.post_count as f64
    }
}

/// Per-country stats kept in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryTable {
    stats: Vec<CountryStat>,
    index: HashMap<String, usize>,
}

impl CountryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, country: &str, score: i128) {
        match self.index.get(country) {
            Some(&i) => self.stats[i].add(score),
            None => {
                self.index.insert(country.to_string(), self.stats.len());
                self.stats.push(CountryStat::new(country, score));
            }
        }
    }

    /// Folds `other` into `self`; countries new to `self` are appended in `other`'s order.
    pub fn merge(&mut self, other: CountryTable) {
        for stat in other.stats {
            match self.index.get(&stat.country) {
                Some(&i) => self.stats[i].absorb(&stat),
                None => {
                    self.index.insert(stat.country.clone(), self.stats.len());
                    self.stats.push(stat);
                }
            }
        }
    }

    pub fn get(&self, country: &str) -> Option<&CountryStat> {
        self.index.get(country).map(|&i| &self.stats[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryStat> {
        self.stats.iter()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keeps_first_occurrence_order() {
        let mut t = CountryTable::new();
        t.record("CA", 1);
        t.record("US", 2);
        t.record("CA", -3);

        let names: Vec<_> = t.iter().map(|s| s.country.as_str()).collect();
        assert_eq!(names, vec!["CA", "US"]);
        let ca = t.get("CA").unwrap();
        assert_eq!(ca.cumulative_score, -2);
        assert_eq!(ca.post_count, 2);
        assert!((ca.average_score() + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn merge_appends_unseen_and_sums_seen() {
        let mut left = CountryTable::new();
        left.record("US", 2);
        let mut right = CountryTable::new();
        right.record("MX", 4);
        right.record("US", -1);

        left.merge(right);
        let names: Vec<_> = left.iter().map(|s| s.country.as_str()).collect();
        assert_eq!(names, vec!["US", "MX"]);
        assert_eq!(left.get("US").unwrap().cumulative_score, 1);
        assert_eq!(left.get("US").unwrap().post_count, 2);
        assert_eq!(left.len(), 2);
    }
}
