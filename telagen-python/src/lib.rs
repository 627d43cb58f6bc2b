//! # Telagen Python Bindings
//!
//! Python bindings for telagen's entity-spec checking and artifact
//! generation. Python tooling gets the same tolerant parsing, normalization
//! warnings, and batch generation the CLI uses.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use telagen::generator::normalize_prefix;
use telagen::naming::EntityNames;
use telagen::schema::normalize_entity;
use telagen::spec::{load_entities, parse_entities, EntitySpec};
use telagen::{generate_project, GenerateOptions, GenerationReport, PkFallback};

/// Result of checking one spec document
#[derive(Serialize, Deserialize, Debug, Clone)]
#[pyclass]
pub struct CheckResult {
    /// Whether the document parsed at all
    #[pyo3(get)]
    pub valid: bool,
    /// Type names of the entities the document declares
    #[pyo3(get)]
    pub entities: Vec<String>,
    /// Parse errors and normalization warnings (empty for a clean document)
    #[pyo3(get)]
    pub issues: Vec<CheckIssue>,
}

#[pymethods]
impl CheckResult {
    #[new]
    fn new(valid: bool, entities: Vec<String>, issues: Vec<CheckIssue>) -> Self {
        CheckResult {
            valid,
            entities,
            issues,
        }
    }

    /// Convert to Python dict
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("valid", self.valid)?;
        dict.set_item("entities", &self.entities)?;
        let issues_list = PyList::empty(py);
        for issue in &self.issues {
            let issue_dict = PyDict::new(py);
            issue_dict.set_item("entity", &issue.entity)?;
            issue_dict.set_item("message", &issue.message)?;
            issue_dict.set_item("kind", &issue.kind)?;
            issues_list.append(issue_dict)?;
        }
        dict.set_item("issues", issues_list)?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "CheckResult(valid={}, entities=[{}], issues=[{}])",
            if self.valid { "True" } else { "False" },
            self.entities.len(),
            self.issues.len()
        )
    }
}

/// A single check issue
#[derive(Serialize, Deserialize, Debug, Clone)]
#[pyclass]
pub struct CheckIssue {
    /// Entity the issue belongs to, `<document>` for document-level failures
    #[pyo3(get)]
    pub entity: String,
    /// Human-readable message
    #[pyo3(get)]
    pub message: String,
    /// Issue class: "parse_error" or "field_warning"
    #[pyo3(get)]
    pub kind: String,
}

#[pymethods]
impl CheckIssue {
    #[new]
    fn new(entity: String, message: String, kind: String) -> Self {
        CheckIssue {
            entity,
            message,
            kind,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CheckIssue(entity='{}', kind='{}', message='{}')",
            self.entity, self.kind, self.message
        )
    }
}

/// What one generation run did
#[derive(Serialize, Deserialize, Debug, Clone)]
#[pyclass]
pub struct GenerationSummary {
    /// Type names of entities whose artifact set was fully written
    #[pyo3(get)]
    pub generated: Vec<String>,
    /// Entities dropped from the batch, with reasons
    #[pyo3(get)]
    pub skipped: Vec<CheckIssue>,
    /// Normalization warnings across the whole batch
    #[pyo3(get)]
    pub warnings: Vec<String>,
    /// Artifacts written (or that would be written under dry-run)
    #[pyo3(get)]
    pub files_written: usize,
}

#[pymethods]
impl GenerationSummary {
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        dict.set_item("generated", &self.generated)?;
        let skipped_list = PyList::empty(py);
        for issue in &self.skipped {
            let issue_dict = PyDict::new(py);
            issue_dict.set_item("entity", &issue.entity)?;
            issue_dict.set_item("message", &issue.message)?;
            skipped_list.append(issue_dict)?;
        }
        dict.set_item("skipped", skipped_list)?;
        dict.set_item("warnings", &self.warnings)?;
        dict.set_item("files_written", self.files_written)?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "GenerationSummary(generated=[{}], skipped=[{}], files_written={})",
            self.generated.len(),
            self.skipped.len(),
            self.files_written
        )
    }
}

/// Check a spec document on disk
///
/// # Arguments
///
/// * `spec_path` - Path to the tolerant-JSON entity spec file
///
/// # Returns
///
/// A `CheckResult` with the declared entities and every issue found.
#[pyfunction]
fn check_spec(spec_path: &str) -> PyResult<CheckResult> {
    match load_entities(Path::new(spec_path)) {
        Ok(specs) => Ok(check_entities(&specs)),
        Err(e) => Ok(parse_failure(&e.to_string())),
    }
}

/// Check spec document content already held in memory
#[pyfunction]
fn check_content(content: &str) -> PyResult<CheckResult> {
    match parse_entities(content) {
        Ok(specs) => Ok(check_entities(&specs)),
        Err(e) => Ok(parse_failure(&e.to_string())),
    }
}

/// Derive the identifier family for one entity name
///
/// Returns a dict with `raw`, `type_name`, `slug`, `route_segment`,
/// `file_stem`, and `label` keys.
#[pyfunction]
fn derive_names<'py>(py: Python<'py>, name: &str) -> PyResult<Bound<'py, PyDict>> {
    let names = EntityNames::derive(name);
    let dict = PyDict::new(py);
    dict.set_item("raw", &names.raw)?;
    dict.set_item("type_name", &names.type_name)?;
    dict.set_item("slug", &names.slug)?;
    dict.set_item("route_segment", &names.route_segment)?;
    dict.set_item("file_stem", &names.file_stem)?;
    dict.set_item("label", &names.label)?;
    Ok(dict)
}

/// Run a full generation batch over one spec document
///
/// # Arguments
///
/// * `spec_path` - Path to the entity spec file
/// * `base_dir` - Output base directory
/// * `api_prefix` - Prefix for the generated auth endpoints (default "/api")
/// * `dry_run` - Compose and report without writing anything
#[pyfunction]
#[pyo3(signature = (spec_path, base_dir, api_prefix = "/api", dry_run = false))]
fn generate(
    spec_path: &str,
    base_dir: &str,
    api_prefix: &str,
    dry_run: bool,
) -> PyResult<GenerationSummary> {
    let opts = GenerateOptions {
        specs: vec![PathBuf::from(spec_path)],
        base_dir: PathBuf::from(base_dir),
        api_prefix: normalize_prefix(api_prefix),
        dry_run,
        ..GenerateOptions::default()
    };
    let report = generate_project(&opts).map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok(summarize(&report))
}


fn check_entities(specs: &[EntitySpec]) -> CheckResult {
    let mut entities = Vec::with_capacity(specs.len());
    let mut issues = Vec::new();
    for spec in specs {
        let (model, warnings) = normalize_entity(spec, PkFallback::default());
        entities.push(model.names.type_name);
        for warning in warnings {
            issues.push(CheckIssue {
                entity: warning.entity.clone(),
                message: warning.to_string(),
                kind: "field_warning".to_string(),
            });
        }
    }
    CheckResult {
        valid: true,
        entities,
        issues,
    }
}

fn parse_failure(message: &str) -> CheckResult {
    CheckResult {
        valid: false,
        entities: vec![],
        issues: vec![CheckIssue {
            entity: "<document>".to_string(),
            message: message.to_string(),
            kind: "parse_error".to_string(),
        }],
    }
}

fn summarize(report: &GenerationReport) -> GenerationSummary {
    GenerationSummary {
        generated: report.generated.clone(),
        skipped: report
            .skipped
            .iter()
            .map(|s| CheckIssue {
                entity: s.entity.clone(),
                message: s.reason.clone(),
                kind: "skipped".to_string(),
            })
            .collect(),
        warnings: report.warnings.iter().map(|w| w.to_string()).collect(),
        files_written: report.files_written,
    }
}

/// Python module definition
#[pymodule]
fn telagen_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(check_spec, m)?)?;
    m.add_function(wrap_pyfunction!(check_content, m)?)?;
    m.add_function(wrap_pyfunction!(derive_names, m)?)?;
    m.add_function(wrap_pyfunction!(generate, m)?)?;
    m.add_class::<CheckResult>()?;
    m.add_class::<CheckIssue>()?;
    m.add_class::<GenerationSummary>()?;
    Ok(())
}
