use serde::Deserialize;
use std::cmp::Ordering;
use tracing::debug;

use crate::models::{CountryTable, SENTINEL_COUNTRY};
use crate::report::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Equal averages keep the order in which countries first appeared.
    #[default]
    Insertion,
    /// Equal averages are ordered by country name, ascending.
    Name,
}

#[derive(Debug, Clone)]
pub struct RankOptions {
    pub sentinel: String,
    pub limit: usize,
    pub tie_break: TieBreak,
    pub decimals: u32,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            sentinel: SENTINEL_COUNTRY.to_string(),
            limit: 5,
            tie_break: TieBreak::Insertion,
            decimals: 2,
        }
    }
}

/// Countries ordered by rounded average sentiment, best first, sentinel removed, at most `limit`.
pub fn top_countries(table: &CountryTable, opts: &RankOptions) -> Vec<String> {
    let mut ranked: Vec<(&str, f64)> = table
        .iter()
        .map(|s| (s.country.as_str(), round_to(s.average_score(), opts.decimals)))
        .collect();

    // sort_by is stable, so Insertion falls back to table order
    ranked.sort_by(|a, b| {
        let by_avg = b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal);
        match opts.tie_break {
            TieBreak::Insertion => by_avg,
            TieBreak::Name => by_avg.then_with(|| a.0.cmp(b.0)),
        }
    });

    let top: Vec<String> = ranked
        .into_iter()
        .filter(|(c, _)| *c != opts.sentinel)
        .take(opts.limit)
        .map(|(c, _)| c.to_string())
        .collect();

    debug!(
        "Country ranking - candidates={}, selected={}, tie_break={:?}",
        table.len(),
        top.len(),
        opts.tie_break
    );
    top
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, i128)]) -> CountryTable {
        let mut t = CountryTable::new();
        for (c, s) in rows {
            t.record(c, *s);
        }
        t
    }

    #[test]
    fn sentinel_never_ranked_even_when_best() {
        let t = table(&[("NULL", 10), ("US", 1), ("CA", 2)]);
        let top = top_countries(&t, &RankOptions::default());
        assert_eq!(top, vec!["CA", "US"]);
    }

    #[test]
    fn sentinel_removed_before_limit_applies() {
        let t = table(&[
            ("A", 9),
            ("NULL", 8),
            ("B", 7),
            ("C", 6),
            ("D", 5),
            ("E", 4),
            ("F", 3),
        ]);
        let top = top_countries(&t, &RankOptions::default());
        assert_eq!(top, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn fewer_countries_than_limit() {
        let t = table(&[("NULL", 1), ("US", 0)]);
        let top = top_countries(&t, &RankOptions::default());
        assert_eq!(top, vec!["US"]);
        assert!(top_countries(&CountryTable::new(), &RankOptions::default()).is_empty());
    }

    #[test]
    fn insertion_order_breaks_ties() {
        let t = table(&[("ZA", 1), ("BR", 2), ("AR", 1), ("BR", 0)]);
        let top = top_countries(&t, &RankOptions::default());
        assert_eq!(top, vec!["ZA", "BR", "AR"]);
    }

    #[test]
    fn name_tie_break_sorts_alphabetically() {
        let t = table(&[("ZA", 1), ("BR", 2), ("AR", 1), ("BR", 0), ("US", 3)]);
        let opts = RankOptions {
            tie_break: TieBreak::Name,
            ..RankOptions::default()
        };
        assert_eq!(top_countries(&t, &opts), vec!["US", "AR", "BR", "ZA"]);
    }

    #[test]
    fn ties_are_judged_on_rounded_averages() {
        // Y averages 66/200 = 0.33, X averages 1/3; both round to 0.33
        let mut t = CountryTable::new();
        for i in 0..200 {
            t.record("Y", if i < 66 { 1 } else { 0 });
        }
        for s in [1, 0, 0] {
            t.record("X", s);
        }
        t.record("Z", -1);
        let top = top_countries(&t, &RankOptions::default());
        assert_eq!(top, vec!["Y", "X", "Z"]);
    }
}
