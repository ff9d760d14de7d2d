// Poem generation from aggregate keyword totals.
//
// The token multiset repeats each keyword by its aggregate count, in
// vocabulary order, and is shuffled once. Each line is then an independent
// sample without replacement of `min(tokens, sample_size)` words from the
// full shuffled multiset: a token drawn for one line is still available to
// the next. An empty multiset yields the configured number of empty lines.
//
// All randomness comes from the caller's `RandomSource`.

use introspect_prng::{RandomSource, sample, shuffle};
use serde::{Deserialize, Serialize};

use crate::config::{ReflectionConfig, Vocabulary};
use crate::counter::CountMap;

/// Every counted keyword occurrence as one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMultiset {
    tokens: Vec<String>,
}

impl TokenMultiset {
    /// Expand `totals` in vocabulary order. Zero counts contribute nothing.
    pub fn from_totals(totals: &CountMap, vocabulary: &Vocabulary) -> Self {
        let mut tokens = Vec::with_capacity(totals.total() as usize);
        for keyword in vocabulary.keywords() {
            let count = totals.get(keyword);
            tokens.extend(std::iter::repeat_n(keyword.clone(), count as usize));
        }
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn shuffle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        shuffle(rng, &mut self.tokens);
    }
}

/// One poem line: the sampled words, in draw order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoemLine {
    pub words: Vec<String>,
}

impl PoemLine {
    /// Words joined by single spaces; empty for an empty line.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// The generated poem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub lines: Vec<PoemLine>,
}

/// Generate a poem from aggregate totals.
pub fn generate_poem<R: RandomSource + ?Sized>(
    totals: &CountMap,
    config: &ReflectionConfig,
    rng: &mut R,
) -> Poem {
    let mut multiset = TokenMultiset::from_totals(totals, &config.vocabulary);
    multiset.shuffle(&mut *rng);
    let lines = (0..config.poem_line_count)
        .map(|_| PoemLine {
            words: sample(&mut *rng, multiset.tokens(), config.poem_sample_size),
        })
        .collect();
    Poem { lines }
}
