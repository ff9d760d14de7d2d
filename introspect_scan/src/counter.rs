// Per-file keyword counting.
//
// `count_keywords` lowercases the text once and counts non-overlapping
// substring occurrences of every vocabulary keyword. There is no word
// boundary logic: "killer" contributes to "kill", "nullify" to "null".
//
// A `CountMap` only ever holds vocabulary keywords. Maps built by
// `count_keywords` carry an explicit entry (possibly zero) for every
// keyword, which is what later lets the ratio metric tell "tallied as zero"
// apart from "never tallied".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Vocabulary;
use crate::error::ReflectError;

/// Keyword occurrence tally. Absent keywords are implicitly zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountMap {
    counts: BTreeMap<String, u64>,
}

impl CountMap {
    /// Build a map from explicit pairs, rejecting keywords outside the
    /// vocabulary. Repeated keywords accumulate.
    pub fn from_pairs<'a, I>(vocabulary: &Vocabulary, pairs: I) -> Result<Self, ReflectError>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut map = CountMap::default();
        for (keyword, count) in pairs {
            if !vocabulary.contains(keyword) {
                return Err(ReflectError::UnknownKeyword {
                    keyword: keyword.to_string(),
                });
            }
            map.add(keyword, count);
        }
        Ok(map)
    }

    /// Count for `keyword`, zero if absent.
    pub fn get(&self, keyword: &str) -> u64 {
        self.counts.get(keyword).copied().unwrap_or(0)
    }

    /// Whether `keyword` has been tallied, even if its count is zero.
    pub fn is_tallied(&self, keyword: &str) -> bool {
        self.counts.contains_key(keyword)
    }

    /// True when no keyword has been tallied at all.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Tallied entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Add `count` to `keyword`, creating the entry if needed.
    ///
    /// Callers guarantee `keyword` belongs to the vocabulary.
    pub(crate) fn add(&mut self, keyword: &str, count: u64) {
        match self.counts.get_mut(keyword) {
            Some(existing) => *existing += count,
            None => {
                self.counts.insert(keyword.to_string(), count);
            }
        }
    }
}

/// Count every vocabulary keyword in `text`, case-insensitively.
pub fn count_keywords(text: &str, vocabulary: &Vocabulary) -> CountMap {
    let lowered = text.to_lowercase();
    let mut map = CountMap::default();
    for keyword in vocabulary.keywords() {
        map.add(keyword, lowered.matches(keyword.as_str()).count() as u64);
    }
    map
}
