// Cross-file aggregation of keyword counts.
//
// `Aggregator` is an explicit accumulator: it is created empty, folded over
// once per file, and consumed into its final `CountMap`. Merging is
// pointwise addition, so the result is independent of file order and an
// all-zero map only marks its keywords as tallied.

use crate::counter::CountMap;

/// Running keyword totals across every scanned file.
#[derive(Clone, Debug, Default)]
pub struct Aggregator {
    totals: CountMap,
    merged: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add each keyword's count from `counts` into the running totals.
    pub fn merge(&mut self, counts: &CountMap) {
        for (keyword, count) in counts.iter() {
            self.totals.add(keyword, count);
        }
        self.merged += 1;
    }

    /// Number of maps merged so far.
    pub fn merged(&self) -> usize {
        self.merged
    }

    pub fn totals(&self) -> &CountMap {
        &self.totals
    }

    pub fn into_totals(self) -> CountMap {
        self.totals
    }
}

/// Fold any number of per-file maps into aggregate totals.
pub fn aggregate<'a, I>(maps: I) -> CountMap
where
    I: IntoIterator<Item = &'a CountMap>,
{
    maps.into_iter()
        .fold(Aggregator::new(), |mut acc, counts| {
            acc.merge(counts);
            acc
        })
        .into_totals()
}
