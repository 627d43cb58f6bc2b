//! Generator configuration loaded from `telagen.toml`.
//!
//! The config file sits alongside the spec documents and supplies batch-level
//! defaults; command-line flags override it key by key.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::schema::PkFallback;

/// File name looked up next to the first spec document.
pub const CONFIG_FILE_NAME: &str = "telagen.toml";

/// Batch-level defaults from `telagen.toml`.
///
/// Every key is optional; unset keys fall back to built-in defaults after
/// flag merging. Unknown keys are ignored so configs can carry notes for
/// other tooling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelagenConfig {
    /// Output base directory for generated artifacts.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    /// API base URL baked into the generated runtime config.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Prefix in front of the generated auth endpoints.
    #[serde(default)]
    pub api_prefix: Option<String>,
    /// Primary-key fallback policy (`first-field` or `named-id`).
    #[serde(default)]
    pub pk_fallback: Option<PkFallback>,
    /// Page-size options applied to entities that declare none.
    #[serde(default)]
    pub page_sizes: Option<Vec<u32>>,
}

/// Load the generator config.
///
/// An explicitly named file must exist and parse; a missing explicit path is
/// an error rather than a silent fallback. Without an explicit path, a
/// `telagen.toml` beside the first spec document is picked up when present.
/// `Ok(None)` means no config applies.
pub fn load_config(
    explicit: Option<&Path>,
    first_spec: Option<&Path>,
) -> anyhow::Result<Option<TelagenConfig>> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => match auto_detect_config_path(first_spec) {
            Some(path) => path,
            None => return Ok(None),
        },
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: TelagenConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(Some(config))
}

/// `telagen.toml` next to the first spec document, when it exists.
fn auto_detect_config_path(first_spec: Option<&Path>) -> Option<PathBuf> {
    let spec_dir = first_spec?.parent()?;
    let candidate = spec_dir.join(CONFIG_FILE_NAME);
    candidate.exists().then_some(candidate)
}

/// Normalize an API prefix: empty stays empty, anything else gets exactly one
/// leading slash and no trailing slashes.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let with_lead = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    with_lead.trim_end_matches('/').to_string()
}
