use crate::generator::{
    generate_project, load_config, normalize_prefix, GenerateOptions, GenerationScope,
    DEFAULT_BASE_URL,
};
use crate::schema::{normalize_entity, PkFallback};
use crate::spec::load_entities;
use crate::watch::watch_specs;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Command-line interface for Telagen
///
/// Provides commands for generating CRUD source artifacts from entity
/// spec documents and for checking documents without writing anything.
#[derive(Parser)]
#[command(name = "telagen")]
#[command(version)]
#[command(about = "Telagen CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for Telagen
#[derive(Subcommand)]
pub enum Commands {
    /// Generate CRUD artifacts from entity spec documents
    Generate {
        /// Path to an entity spec document (repeatable)
        #[arg(short, long, required = true, num_args = 1..)]
        spec: Vec<PathBuf>,

        /// Output base directory (default: ".", or `base_dir` from telagen.toml)
        #[arg(short, long)]
        base: Option<PathBuf>,

        /// API prefix for the generated auth endpoints (default: "/api")
        #[arg(short, long)]
        prefix: Option<String>,

        /// Limit generation to specific artifact groups (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<OnlyPart>>,

        /// Perform a dry run: show what would be written without touching files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Watch the spec documents and regenerate on change
        #[arg(long, default_value_t = false)]
        watch: bool,

        /// Path to a telagen.toml config file
        /// If not provided, will auto-detect alongside the first spec document
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check entity spec documents without writing anything
    ///
    /// Loads and normalizes every document, printing the warnings and errors
    /// generation would report. No artifact is rendered or written.
    Check {
        /// Path to an entity spec document (repeatable)
        #[arg(short, long, required = true, num_args = 1..)]
        spec: Vec<PathBuf>,

        /// Exit with error code if any field warning is reported
        #[arg(long, default_value_t = false)]
        fail_on_warning: bool,
    },
}

/// Artifact groups that can be selectively regenerated
///
/// Used with the `--only` flag to limit generation to specific outputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnlyPart {
    /// TypeScript model interfaces
    Models,
    /// HTTP service classes
    Services,
    /// List and edit components with their templates and stylesheets
    Views,
    /// The aggregated routing table (app.routes.ts)
    Routes,
    /// Token store, interceptor, guard, and the login/reset screens
    Auth,
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly passed config file does not exist or cannot be parsed
/// - Artifact writing fails at the batch level
/// - The watcher cannot be installed on a spec document
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            spec,
            base,
            prefix,
            only,
            dry_run,
            watch,
            config,
        } => {
            let opts = resolve_options(
                spec,
                base.as_deref(),
                prefix.as_deref(),
                only.as_deref(),
                *dry_run,
                config.as_deref(),
            )?;
            let report = generate_project(&opts)?;
            report.print_summary();
            if report.all_failed() {
                std::process::exit(1);
            }
            if *watch {
                let _watcher = watch_specs(&opts, |r| r.print_summary())?;
                println!(
                    "👀 Watching {} spec document(s), Ctrl-C to stop",
                    opts.specs.len()
                );
                loop {
                    std::thread::park();
                }
            }
            Ok(())
        }
        Commands::Check {
            spec,
            fail_on_warning,
        } => {
            let mut checked = 0usize;
            let mut warning_count = 0usize;
            let mut failed = 0usize;
            for path in spec {
                match load_entities(path) {
                    Ok(entities) => {
                        for entity in &entities {
                            let (model, warnings) = normalize_entity(entity, PkFallback::default());
                            for warning in &warnings {
                                println!("⚠️  {warning}");
                            }
                            warning_count += warnings.len();
                            println!(
                                "✅ {} ({} field(s))",
                                model.names.type_name,
                                model.fields.len()
                            );
                            checked += 1;
                        }
                    }
                    Err(err) => {
                        println!("❌ {} failed: {err}", path.display());
                        failed += 1;
                    }
                }
            }
            println!("ℹ️  {checked} entity(ies) checked, {warning_count} warning(s)");
            if (checked == 0 && failed > 0) || (*fail_on_warning && warning_count > 0) {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Merge CLI flags, the optional `telagen.toml`, and built-in defaults into
/// one [`GenerateOptions`]. Flags win over file values, file values over
/// defaults; the prefix is normalized whichever source supplied it.
pub(crate) fn resolve_options(
    specs: &[PathBuf],
    base: Option<&Path>,
    prefix: Option<&str>,
    only: Option<&[OnlyPart]>,
    dry_run: bool,
    config_path: Option<&Path>,
) -> anyhow::Result<GenerateOptions> {
    let file_cfg = load_config(config_path, specs.first().map(PathBuf::as_path))?
        .unwrap_or_default();
    let raw_prefix = prefix
        .map(str::to_string)
        .or(file_cfg.api_prefix)
        .unwrap_or_else(|| "/api".to_string());
    Ok(GenerateOptions {
        specs: specs.to_vec(),
        base_dir: base
            .map(Path::to_path_buf)
            .or(file_cfg.base_dir)
            .unwrap_or_else(|| PathBuf::from(".")),
        base_url: file_cfg
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        api_prefix: normalize_prefix(&raw_prefix),
        pk_fallback: file_cfg.pk_fallback.unwrap_or_default(),
        page_sizes: file_cfg.page_sizes,
        scope: map_only_to_scope(only),
        dry_run,
    })
}

/// Convert CLI `--only` parts to a `GenerationScope` configuration
///
/// If `only` is `None`, all groups are enabled. If `only` is provided,
/// only the specified groups are enabled.
pub(crate) fn map_only_to_scope(only: Option<&[OnlyPart]>) -> GenerationScope {
    let mut scope = GenerationScope::full();
    if let Some(parts) = only {
        // Start with nothing, then enable selected parts
        scope = GenerationScope {
            models: false,
            services: false,
            views: false,
            routes: false,
            auth: false,
        };
        for p in parts {
            match p {
                OnlyPart::Models => scope.models = true,
                OnlyPart::Services => scope.services = true,
                OnlyPart::Views => scope.views = true,
                OnlyPart::Routes => scope.routes = true,
                OnlyPart::Auth => scope.auth = true,
            }
        }
    }
    scope
}
