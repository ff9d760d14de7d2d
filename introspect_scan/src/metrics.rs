// Derived metrics over keyword tallies.
//
// - `dominant_concept`: highest count, ties broken by earliest vocabulary
//   position. Zero total occurrences (including no files at all) yields the
//   configured sentinel with count 0. The same rule serves the per-file
//   "local" concept and the aggregate one.
// - `creation_ratio`: `creation / (destruction + smoothing)`, computed only
//   when both keywords are in the vocabulary and were tallied. A ratio of
//   exactly 1 is not benevolent.
// - `density`: raw character count divided by the configured divisor,
//   truncated, used for the bar in the per-file report.

use serde::{Deserialize, Serialize};

use crate::config::{ReflectionConfig, Vocabulary};
use crate::counter::CountMap;

/// The most frequent keyword and its count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dominant {
    pub keyword: String,
    pub count: u64,
}

/// Pick the dominant keyword of `counts`.
///
/// Walks the vocabulary in order and only replaces the current best on a
/// strictly greater count, so the earliest keyword wins a tie.
pub fn dominant_concept(counts: &CountMap, vocabulary: &Vocabulary, sentinel: &str) -> Dominant {
    if counts.total() == 0 {
        return Dominant {
            keyword: sentinel.to_string(),
            count: 0,
        };
    }
    let mut best: Option<(&str, u64)> = None;
    for keyword in vocabulary.keywords() {
        let count = counts.get(keyword);
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((keyword, count));
        }
    }
    match best {
        Some((keyword, count)) => Dominant {
            keyword: keyword.to_string(),
            count,
        },
        None => Dominant {
            keyword: sentinel.to_string(),
            count: 0,
        },
    }
}

/// Classification of the creation/destruction ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    BenevolentCreator,
    HarshGod,
}

impl Verdict {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 1.0 {
            Verdict::BenevolentCreator
        } else {
            Verdict::HarshGod
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::BenevolentCreator => "benevolent creator",
            Verdict::HarshGod => "harsh god",
        }
    }
}

/// The creation/destruction ratio with its inputs and verdict.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreationRatio {
    pub creation: u64,
    pub destruction: u64,
    pub ratio: f64,
    pub verdict: Verdict,
}

/// Compute the creation/destruction ratio from aggregate totals.
///
/// Returns `None` when either keyword is missing from the vocabulary or has
/// never been tallied (no files scanned).
pub fn creation_ratio(totals: &CountMap, config: &ReflectionConfig) -> Option<CreationRatio> {
    let creation_kw = config.creation_keyword.as_str();
    let destruction_kw = config.destruction_keyword.as_str();
    if !config.vocabulary.contains(creation_kw) || !config.vocabulary.contains(destruction_kw) {
        return None;
    }
    if !totals.is_tallied(creation_kw) || !totals.is_tallied(destruction_kw) {
        return None;
    }
    let creation = totals.get(creation_kw);
    let destruction = totals.get(destruction_kw);
    let ratio = creation as f64 / (destruction as f64 + config.ratio_smoothing as f64);
    Some(CreationRatio {
        creation,
        destruction,
        ratio,
        verdict: Verdict::from_ratio(ratio),
    })
}

/// Density bar length for a file of `char_count` characters.
pub fn density(char_count: usize, divisor: usize) -> usize {
    char_count / divisor
}
