use std::collections::HashMap;

/// Word → integer sentiment weight. Unknown words weigh zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    words: HashMap<String, i64>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a lexicon from `(word, weight)` pairs. Later duplicates replace earlier ones.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut lex = Self::new();
        for (word, weight) in entries {
            lex.insert(word.as_ref(), weight);
        }
        lex
    }

    pub fn insert(&mut self, word: &str, weight: i64) {
        self.words.insert(word.trim().to_lowercase(), weight);
    }

    pub fn weight(&self, word: &str) -> i64 {
        self.words.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
