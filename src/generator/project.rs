use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::features::{normalize_page_sizes, FeatureSet};
use crate::naming::EntityNames;
use crate::routes::RouteTable;
use crate::schema::{normalize_entity, EntityModel, FieldWarning, PkFallback};
use crate::spec::load_entities;

use super::compose::{
    compose_auth, compose_entity, compose_routes, compose_shared, Artifact, ArtifactRole,
    DEFAULT_BASE_URL,
};

/// Which artifact groups a run writes.
///
/// The shared runtime-config and alert artifacts ride along with any of the
/// per-entity groups; they are never selectable on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationScope {
    pub models: bool,
    pub services: bool,
    pub views: bool,
    pub routes: bool,
    pub auth: bool,
}

impl GenerationScope {
    /// Every group enabled; what `generate` does without `--only`.
    pub fn full() -> Self {
        GenerationScope {
            models: true,
            services: true,
            views: true,
            routes: true,
            auth: true,
        }
    }

    pub fn includes(&self, role: ArtifactRole) -> bool {
        match role {
            ArtifactRole::Model => self.models,
            ArtifactRole::Service => self.services,
            ArtifactRole::View => self.views,
            ArtifactRole::Shared => self.models || self.services || self.views,
            ArtifactRole::Auth => self.auth,
            ArtifactRole::Routes => self.routes,
        }
    }
}

impl Default for GenerationScope {
    fn default() -> Self {
        GenerationScope::full()
    }
}

/// Options for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Spec documents to process, in order.
    pub specs: Vec<PathBuf>,
    /// Output base directory.
    pub base_dir: PathBuf,
    /// API base URL baked into the generated runtime config.
    pub base_url: String,
    /// Normalized prefix in front of the generated auth endpoints.
    pub api_prefix: String,
    /// Policy when no field carries an explicit primary-key flag.
    pub pk_fallback: PkFallback,
    /// Page sizes applied to entities that declare none.
    pub page_sizes: Option<Vec<u32>>,
    /// Artifact groups to write.
    pub scope: GenerationScope,
    /// Compose and report without touching the filesystem.
    pub dry_run: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            specs: Vec::new(),
            base_dir: PathBuf::from("."),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: "/api".to_string(),
            pk_fallback: PkFallback::default(),
            page_sizes: None,
            scope: GenerationScope::full(),
            dry_run: false,
        }
    }
}

/// I/O failure writing one artifact.
///
/// Fatal for that entity's artifact set only; already-written siblings stay
/// on disk and no rollback is attempted.
#[derive(Debug)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to write {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for WriteFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Entity dropped from the batch with the error that stopped it.
#[derive(Debug, Clone)]
pub struct SkippedEntity {
    pub entity: String,
    pub reason: String,
}

/// Spec document that failed to load or parse as a whole.
#[derive(Debug, Clone)]
pub struct FailedDocument {
    pub document: String,
    pub reason: String,
}

/// What one generation run did. Never a silent partial success: every skip
/// and dropped field shows up here.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Type names of entities whose artifact set was fully written.
    pub generated: Vec<String>,
    pub skipped: Vec<SkippedEntity>,
    pub failed_documents: Vec<FailedDocument>,
    pub warnings: Vec<FieldWarning>,
    /// Artifacts written, or that would be written under dry-run.
    pub files_written: usize,
}

impl GenerationReport {
    /// True when there was work to do and none of it succeeded.
    pub fn all_failed(&self) -> bool {
        self.generated.is_empty()
            && (!self.skipped.is_empty() || !self.failed_documents.is_empty())
    }

    /// Print the end-of-run summary.
    pub fn print_summary(&self) {
        for entity in &self.generated {
            println!("✅ {entity}");
        }
        for skipped in &self.skipped {
            println!("❌ {} skipped: {}", skipped.entity, skipped.reason);
        }
        for failed in &self.failed_documents {
            println!("❌ {} failed: {}", failed.document, failed.reason);
        }
        for warning in &self.warnings {
            println!("⚠️  {warning}");
        }
        println!("ℹ️  {} artifact(s) written", self.files_written);
    }
}

/// Run the full pipeline over every spec document and write the results.
///
/// Failures are contained at the smallest scope that covers them: a document
/// that fails to parse drops only its own entities, an entity that fails to
/// compose or write drops only itself. Every entity is composed fully in
/// memory before its first write. Route aggregation is a barrier stage and
/// covers successfully written entities only; the batch-level shared and auth
/// artifacts are emitted once, after at least one entity succeeded.
pub fn generate_project(opts: &GenerateOptions) -> anyhow::Result<GenerationReport> {
    let mut report = GenerationReport::default();

    let mut specs = Vec::new();
    for path in &opts.specs {
        match load_entities(path) {
            Ok(batch) => {
                debug!(document = %path.display(), entities = batch.len(), "loaded spec document");
                specs.extend(batch);
            }
            Err(err) => {
                warn!(document = %path.display(), error = %err, "spec document dropped");
                report.failed_documents.push(FailedDocument {
                    document: path.display().to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let mut models: Vec<EntityModel> = Vec::with_capacity(specs.len());
    for spec in specs {
        let (mut model, warnings) = normalize_entity(&spec, opts.pk_fallback);
        report.warnings.extend(warnings);
        if spec.per_page.is_empty() {
            if let Some(sizes) = &opts.page_sizes {
                model.features.page_sizes = normalize_page_sizes(sizes);
            }
        }
        models.push(model);
    }

    let mut composed: Vec<(EntityModel, Vec<Artifact>)> = Vec::with_capacity(models.len());
    for model in models {
        match compose_entity(&model) {
            Ok(artifacts) => composed.push((model, artifacts)),
            Err(err) => {
                warn!(entity = %model.names.type_name, error = %err, "entity dropped");
                report.skipped.push(SkippedEntity {
                    entity: model.names.type_name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let mut succeeded: Vec<(EntityNames, FeatureSet)> = Vec::with_capacity(composed.len());
    for (model, artifacts) in composed {
        match write_entity(&opts.base_dir, &artifacts, &opts.scope, opts.dry_run) {
            Ok(written) => {
                report.files_written += written;
                report.generated.push(model.names.type_name.clone());
                succeeded.push((model.names, model.features));
            }
            Err(failure) => {
                warn!(entity = %model.names.type_name, error = %failure, "entity dropped");
                report.skipped.push(SkippedEntity {
                    entity: model.names.type_name.clone(),
                    reason: failure.to_string(),
                });
            }
        }
    }

    if !succeeded.is_empty() {
        if opts.scope.includes(ArtifactRole::Shared) {
            for artifact in compose_shared(&opts.base_url)? {
                write_artifact(&opts.base_dir, &artifact, opts.dry_run)?;
                report.files_written += 1;
            }
        }

        // batch auth policy: one auth entity pulls in the whole set, once;
        // the first one decides the storage kind
        let auth_entity = succeeded.iter().find(|(_, features)| features.auth);
        if opts.scope.auth {
            if let Some((_, features)) = auth_entity {
                for artifact in compose_auth(&opts.api_prefix, features.token_storage)? {
                    write_artifact(&opts.base_dir, &artifact, opts.dry_run)?;
                    report.files_written += 1;
                }
            }
        }

        if opts.scope.routes {
            let table = RouteTable::aggregate(&succeeded);
            let artifact = compose_routes(&table)?;
            write_artifact(&opts.base_dir, &artifact, opts.dry_run)?;
            report.files_written += 1;
        }
    }

    info!(
        generated = report.generated.len(),
        skipped = report.skipped.len(),
        files = report.files_written,
        "generation finished"
    );
    Ok(report)
}

fn write_entity(
    base: &Path,
    artifacts: &[Artifact],
    scope: &GenerationScope,
    dry_run: bool,
) -> Result<usize, WriteFailure> {
    let mut written = 0;
    for artifact in artifacts {
        if !scope.includes(artifact.role) {
            continue;
        }
        write_artifact(base, artifact, dry_run)?;
        written += 1;
    }
    Ok(written)
}

fn write_artifact(base: &Path, artifact: &Artifact, dry_run: bool) -> Result<(), WriteFailure> {
    let path = base.join(&artifact.path);
    if dry_run {
        println!("📝 Would write {path:?}");
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| WriteFailure {
            path: path.clone(),
            source,
        })?;
    }
    fs::write(&path, &artifact.contents).map_err(|source| WriteFailure {
        path: path.clone(),
        source,
    })?;
    println!("✅ Generated {path:?}");
    Ok(())
}
