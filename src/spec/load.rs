use super::types::EntitySpec;
use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Structural parse failure for one spec document.
///
/// Fatal for that document only; sibling documents keep processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedSpecError {
    /// Document name or path, `<input>` for inline text.
    pub document: String,
    /// Underlying parse failure.
    pub reason: String,
}

impl fmt::Display for MalformedSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed spec document '{}': {}", self.document, self.reason)
    }
}

impl std::error::Error for MalformedSpecError {}

impl MalformedSpecError {
    fn new(document: &str, reason: impl Into<String>) -> Self {
        MalformedSpecError {
            document: document.to_string(),
            reason: reason.into(),
        }
    }
}

static LINE_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//[^\n]*").expect("line comment regex should be valid"));
static BLOCK_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex should be valid"));
static TRAILING_COMMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",(\s*[}\]])").expect("trailing comma regex should be valid"));

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

// Regex-based, not grammar-aware. Only runs after strict parsing already
// failed, so well-formed documents are never rewritten.
fn sanitize(text: &str) -> String {
    let without_line = LINE_COMMENT_RE.replace_all(text, "");
    let without_block = BLOCK_COMMENT_RE.replace_all(&without_line, "");
    TRAILING_COMMA_RE.replace_all(&without_block, "$1").into_owned()
}

/// Parse entity specs from raw document text.
///
/// Strict JSON is tried first; on failure the tolerant cleanup pass (BOM,
/// `//` and `/* */` comments, trailing commas) runs once and parsing is
/// retried. A document that still fails is malformed as a whole.
pub fn parse_entities(text: &str) -> Result<Vec<EntitySpec>, MalformedSpecError> {
    parse_entities_named("<input>", text)
}

/// Same as [`parse_entities`] but tags errors with the document name.
pub fn parse_entities_named(
    document: &str,
    text: &str,
) -> Result<Vec<EntitySpec>, MalformedSpecError> {
    let raw = strip_bom(text);
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => {
            let sanitized = sanitize(raw);
            serde_json::from_str(&sanitized)
                .map_err(|e| MalformedSpecError::new(document, e.to_string()))?
        }
    };
    collect_entities(document, value)
}

/// Read and parse one spec file.
pub fn load_entities(path: &Path) -> anyhow::Result<Vec<EntitySpec>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read spec file {}", path.display()))?;
    let document = path.display().to_string();
    Ok(parse_entities_named(&document, &text)?)
}

/// Container shapes are detected structurally: a wrapper object with an
/// `entidades`/`entities` array, a bare array, or a bare entity object.
fn collect_entities(document: &str, value: Value) -> Result<Vec<EntitySpec>, MalformedSpecError> {
    let items: Vec<Value> = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(collection) = map.remove("entidades").or_else(|| map.remove("entities")) {
                match collection {
                    Value::Array(items) => items,
                    other => {
                        return Err(MalformedSpecError::new(
                            document,
                            format!("entity collection key must hold an array, found {}", kind_name(&other)),
                        ))
                    }
                }
            } else if map.contains_key("nome")
                || map.contains_key("name")
                || map.contains_key("entity")
            {
                vec![Value::Object(map)]
            } else {
                return Err(MalformedSpecError::new(
                    document,
                    "top-level object is neither an entity nor an entity collection",
                ));
            }
        }
        other => {
            return Err(MalformedSpecError::new(
                document,
                format!("expected an object or array at the top level, found {}", kind_name(&other)),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<EntitySpec>(item)
                .map_err(|e| MalformedSpecError::new(document, format!("entity #{}: {}", idx + 1, e)))
        })
        .collect()
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
