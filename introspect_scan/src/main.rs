// Introspection CLI entry point.
//
// Scans a directory (default: the current one), prints the reflection
// report to stdout, and exits non-zero on the first unreadable file.
// Diagnostics go to stderr through `tracing`; set `RUST_LOG` to see them.
//
// Usage:
//   introspect [ROOT] [--config FILE] [--seed N] [--json]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use introspect_prng::ScanRng;
use introspect_scan::{ReflectError, ReflectionConfig, reflect_dir, render_json, render_text};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Reflect on the keywords hidden in a directory of source files")]
struct Args {
    /// Directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// JSON file overriding the default configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible poem (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the reflection as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("introspect_scan=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("introspection aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ReflectError> {
    let config = match &args.config {
        Some(path) => ReflectionConfig::load(path)?,
        None => ReflectionConfig::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => ScanRng::new(seed),
        None => ScanRng::from_entropy(),
    };

    let reflection = reflect_dir(&args.root, &config, &mut rng)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        render_json(&reflection, &mut out)?;
    } else {
        render_text(&reflection, &mut out)?;
    }
    out.flush().map_err(ReflectError::Render)
}
