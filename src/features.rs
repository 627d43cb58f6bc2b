//! Entity-level feature resolution.
//!
//! Feature flags decide which optional artifact blocks are rendered. The
//! switches here are the only thing the composer consults; raw spec flags
//! never reach a template.

use crate::spec::EntitySpec;
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;

/// Canonical page-size options applied when the spec supplies none.
pub const DEFAULT_PAGE_SIZES: [u32; 4] = [15, 25, 50, 100];

/// Where the generated token store persists the access token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageKind {
    #[default]
    LocalStorage,
    SessionStorage,
}

impl From<&str> for StorageKind {
    fn from(raw: &str) -> Self {
        if raw.trim().to_lowercase().contains("session") {
            StorageKind::SessionStorage
        } else {
            StorageKind::LocalStorage
        }
    }
}

impl StorageKind {
    /// The `Storage` global the generated token store binds to.
    pub fn ts_global(&self) -> &'static str {
        match self {
            StorageKind::LocalStorage => "localStorage",
            StorageKind::SessionStorage => "sessionStorage",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ts_global())
    }
}

/// Resolved switches controlling optional artifact blocks for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    /// Server-side paging state and the paginator element in the list view.
    pub pagination: bool,
    /// Login screen, token store, interceptor, guard.
    pub auth: bool,
    /// Password-change section in the edit form. Gated strictly on the
    /// user-profile flag; password-looking field names never activate it.
    pub password_change: bool,
    /// Image upload/download methods and form controls.
    pub file_upload: bool,
    /// Ascending, deduplicated, non-empty page-size options.
    pub page_sizes: SmallVec<[u32; 4]>,
    pub token_storage: StorageKind,
}

impl FeatureSet {
    pub fn resolve(spec: &EntitySpec) -> FeatureSet {
        FeatureSet {
            pagination: spec.pagination,
            auth: spec.auth_screen || spec.access_token,
            password_change: spec.user_profile,
            file_upload: spec.has_image,
            page_sizes: clamp_page_sizes(&spec.per_page),
            token_storage: spec
                .token_storage
                .as_deref()
                .map(StorageKind::from)
                .unwrap_or_default(),
        }
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        FeatureSet {
            pagination: false,
            auth: false,
            password_change: false,
            file_upload: false,
            page_sizes: SmallVec::from_slice(&DEFAULT_PAGE_SIZES),
            token_storage: StorageKind::default(),
        }
    }
}

/// Clamp raw page-size candidates to a usable sequence: positive integers
/// only, ascending, deduplicated. An empty result falls back to the default.
fn clamp_page_sizes(raw: &[Value]) -> SmallVec<[u32; 4]> {
    let mut sizes: SmallVec<[u32; 4]> = raw.iter().filter_map(page_size_value).collect();
    sizes.sort_unstable();
    sizes.dedup();
    if sizes.is_empty() {
        SmallVec::from_slice(&DEFAULT_PAGE_SIZES)
    } else {
        sizes
    }
}

/// Same clamping for already-numeric candidates, used for config-level
/// page-size defaults.
pub fn normalize_page_sizes(raw: &[u32]) -> SmallVec<[u32; 4]> {
    let mut sizes: SmallVec<[u32; 4]> = raw.iter().copied().filter(|n| *n > 0).collect();
    sizes.sort_unstable();
    sizes.dedup();
    if sizes.is_empty() {
        SmallVec::from_slice(&DEFAULT_PAGE_SIZES)
    } else {
        sizes
    }
}

fn page_size_value(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64))?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    let n = u32::try_from(n).ok()?;
    (n > 0).then_some(n)
}
