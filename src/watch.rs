//! # Watch Module
//!
//! Watch mode keeps the generated source tree in sync with the entity spec
//! documents. Every time a watched document is saved, the full generation
//! pipeline runs again against the same options.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use telagen::generator::GenerateOptions;
//! use telagen::watch::watch_specs;
//!
//! let opts = GenerateOptions {
//!     specs: vec!["entities.json".into()],
//!     base_dir: "./src/app".into(),
//!     ..GenerateOptions::default()
//! };
//!
//! let watcher = watch_specs(&opts, |report| report.print_summary())?;
//!
//! // Keep watcher alive
//! std::mem::forget(watcher);
//! ```
//!
//! ## Error Handling
//!
//! A regeneration run that fails leaves the previously generated artifacts
//! untouched on disk:
//! - Document-level failures are reported and the remaining documents still
//!   regenerate.
//! - A run where nothing could be generated writes no files at all.
//!
//! Watch mode is a development loop, not a deployment mechanism; disable it
//! and run one-shot generation in CI.

use crate::generator::{generate_project, GenerateOptions, GenerationReport};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

/// Watch every spec document in `opts` and rerun generation when one changes.
///
/// The callback receives the report of each completed run so the caller can
/// print a summary or update its own state. The returned watcher stops
/// watching when dropped.
pub fn watch_specs<F>(opts: &GenerateOptions, mut on_generate: F) -> notify::Result<RecommendedWatcher>
where
    F: FnMut(&GenerationReport) + Send + 'static,
{
    let run_opts = opts.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    info!("spec change detected, regenerating");
                    match generate_project(&run_opts) {
                        Ok(report) => on_generate(&report),
                        Err(err) => {
                            warn!(error = %err, "regeneration failed, previous output kept");
                            eprintln!("watch: regeneration failed: {err}");
                        }
                    }
                }
            }
            Err(e) => eprintln!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    for path in &opts.specs {
        watcher.watch(path, RecursiveMode::NonRecursive)?;
    }
    Ok(watcher)
}
