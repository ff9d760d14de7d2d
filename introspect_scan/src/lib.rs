// Keyword introspection of a source directory.
//
// Scans the text files in one directory, counts a fixed vocabulary of
// thematic keywords, and reflects on the tallies: which concept dominates,
// whether creation outweighs destruction, and a short poem sampled from
// every counted occurrence.
//
// Architecture:
// - `config.rs`: `Vocabulary`, `EmotionMap`, `ReflectionConfig` (JSON-loadable)
// - `error.rs`: `ReflectError`, the single error type of the crate
// - `counter.rs`: `CountMap` and case-insensitive substring counting
// - `aggregate.rs`: `Aggregator`, the explicit cross-file accumulator
// - `metrics.rs`: dominant concept, creation/destruction ratio, density
// - `poem.rs`: `TokenMultiset` expansion and line sampling
// - `source.rs`: directory listing and fail-fast file reading
// - `reflect.rs`: the pipeline tying the above into a `Reflection`
// - `report.rs`: text and JSON rendering
//
// Randomness is injected as an `introspect_prng::RandomSource`; nothing in
// this crate creates its own generator. The CLI in `main.rs` picks a seeded
// or entropy-seeded `ScanRng`.

pub mod aggregate;
pub mod config;
pub mod counter;
pub mod error;
pub mod metrics;
pub mod poem;
pub mod reflect;
pub mod report;
pub mod source;

pub use aggregate::{Aggregator, aggregate};
pub use config::{EmotionMap, ReflectionConfig, Vocabulary};
pub use counter::{CountMap, count_keywords};
pub use error::ReflectError;
pub use metrics::{CreationRatio, Dominant, Verdict, creation_ratio, density, dominant_concept};
pub use poem::{Poem, PoemLine, TokenMultiset, generate_poem};
pub use reflect::{Reflection, SectorReport, Synthesis, reflect, reflect_dir};
pub use report::{render_json, render_text};
pub use source::{SourceFile, list_sources, read_sources};
