// The reflection pipeline.
//
// files -> `count_keywords` per file -> `Aggregator` fold -> synthesis
// (dominant concept, emotion, creation ratio) + poem.
//
// Each file also produces a `SectorReport` with its density bar length and
// local dominant concept, computed from that file alone. Everything here is
// a pure function of its inputs and the random source; reading the
// directory is done up front by `source.rs`.

use std::path::Path;

use introspect_prng::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate::Aggregator;
use crate::config::ReflectionConfig;
use crate::counter::{CountMap, count_keywords};
use crate::error::ReflectError;
use crate::metrics::{CreationRatio, Dominant, creation_ratio, density, dominant_concept};
use crate::poem::{Poem, generate_poem};
use crate::source::{SourceFile, read_sources};

/// Per-file findings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorReport {
    pub name: String,
    pub density: usize,
    pub dominant: Dominant,
    pub counts: CountMap,
}

/// Findings over the aggregate totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    pub files_analyzed: usize,
    pub totals: CountMap,
    pub dominant: Dominant,
    /// Emotional label of the dominant concept, if it has one.
    pub emotion: Option<String>,
    pub ratio: Option<CreationRatio>,
}

/// A complete reflection run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub sectors: Vec<SectorReport>,
    pub synthesis: Synthesis,
    pub poem: Poem,
}

/// Count one file and compute its local metrics.
pub fn scan_sector(file: &SourceFile, config: &ReflectionConfig) -> SectorReport {
    let counts = count_keywords(&file.text, &config.vocabulary);
    let dominant = dominant_concept(&counts, &config.vocabulary, &config.sentinel);
    let density = density(file.char_count(), config.density_divisor);
    debug!(
        file = %file.name,
        density,
        dominant = %dominant.keyword,
        hits = counts.total(),
        "scanned sector"
    );
    SectorReport {
        name: file.name.clone(),
        density,
        dominant,
        counts,
    }
}

/// Derive the synthesis from aggregate totals.
pub fn synthesize(totals: CountMap, files_analyzed: usize, config: &ReflectionConfig) -> Synthesis {
    let dominant = dominant_concept(&totals, &config.vocabulary, &config.sentinel);
    let emotion = config.emotions.label(&dominant.keyword).map(str::to_string);
    let ratio = creation_ratio(&totals, config);
    if ratio.is_none() && files_analyzed > 0 {
        warn!(
            creation = %config.creation_keyword,
            destruction = %config.destruction_keyword,
            "creation/destruction keywords not both in vocabulary; ratio skipped"
        );
    }
    info!(
        files_analyzed,
        dominant = %dominant.keyword,
        count = dominant.count,
        "synthesis complete"
    );
    Synthesis {
        files_analyzed,
        totals,
        dominant,
        emotion,
        ratio,
    }
}

/// Run the full pipeline over already-read files.
pub fn reflect<R: RandomSource + ?Sized>(
    files: &[SourceFile],
    config: &ReflectionConfig,
    rng: &mut R,
) -> Reflection {
    let mut aggregator = Aggregator::new();
    let sectors: Vec<SectorReport> = files
        .iter()
        .map(|file| {
            let sector = scan_sector(file, config);
            aggregator.merge(&sector.counts);
            sector
        })
        .collect();
    let files_analyzed = aggregator.merged();
    let totals = aggregator.into_totals();
    let poem = generate_poem(&totals, config, rng);
    let synthesis = synthesize(totals, files_analyzed, config);
    Reflection {
        sectors,
        synthesis,
        poem,
    }
}

/// Read every eligible file under `root` and reflect on it.
pub fn reflect_dir<R: RandomSource + ?Sized>(
    root: &Path,
    config: &ReflectionConfig,
    rng: &mut R,
) -> Result<Reflection, ReflectError> {
    let files = read_sources(root, config)?;
    info!(root = %root.display(), files = files.len(), "scanning memory sectors");
    Ok(reflect(&files, config, rng))
}
