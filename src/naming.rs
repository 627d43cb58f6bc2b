//! Identifier derivation from human-entered entity names.
//!
//! Every generated artifact agrees on one family of identifiers derived from
//! the raw entity name. Derivation is pure: the same input always yields the
//! same [`EntityNames`], and deriving from an already-derived form is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fallback used when the entity name is empty or has no usable characters.
const FALLBACK_NAME: &str = "Entidade";

static PASCAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("pascal regex should be valid"));

static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("separator regex should be valid"));

/// The full identifier family derived from one entity name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    /// Raw name as it appeared in the spec document.
    pub raw: String,
    /// PascalCase type name, acronyms preserved (`UserProfile`, `HTTPServer`).
    pub type_name: String,
    /// Lowercase alphanumeric slug used for component folders (`userprofile`).
    pub slug: String,
    /// URL path segment, pluralized slug (`userprofiles`).
    pub route_segment: String,
    /// kebab-case file stem for service files (`user-profile`).
    pub file_stem: String,
    /// Human-readable label for headings (`User profile`).
    pub label: String,
}

impl EntityNames {
    pub fn derive(raw: &str) -> Self {
        let trimmed = raw.trim();
        let source = if trimmed.is_empty() { FALLBACK_NAME } else { trimmed };
        EntityNames {
            raw: raw.to_string(),
            type_name: type_name(source),
            slug: slug(source),
            route_segment: format!("{}s", slug(source)),
            file_stem: file_stem(source),
            label: label(source),
        }
    }
}

/// PascalCase conversion that leaves already-Pascal names untouched so
/// caller-supplied acronym casing survives.
pub fn type_name(name: &str) -> String {
    if name.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    if PASCAL_RE.is_match(name) {
        return name.to_string();
    }
    let converted: String = SEPARATOR_RE
        .split(name)
        .filter(|p| !p.is_empty())
        .map(capitalize_lower)
        .collect();
    if converted.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        converted
    }
}

/// Lowercase slug with every non-alphanumeric character stripped.
pub fn slug(name: &str) -> String {
    let s: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    if s.is_empty() {
        FALLBACK_NAME.to_lowercase()
    } else {
        s.to_lowercase()
    }
}

/// kebab-case stem: splits at case boundaries and separator runs, so
/// `UserProfile` and `user_profile` map to the same file name.
pub fn file_stem(name: &str) -> String {
    let words = split_words(name);
    if words.is_empty() {
        return FALLBACK_NAME.to_lowercase();
    }
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Display label: separators become spaces, first letter capitalized.
pub fn label(name: &str) -> String {
    let spaced = SEPARATOR_RE.replace_all(name, " ");
    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize_lower(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Splits a name into words at non-alphanumeric runs, lower-to-upper
/// boundaries, digit boundaries, and acronym tails (`HTTPServer` ->
/// `HTTP` + `Server`).
fn split_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if !c.is_ascii_alphanumeric() {
            i += 1;
            continue;
        }
        let start = i;
        if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        } else if c.is_ascii_uppercase() {
            i += 1;
            if i < chars.len() && chars[i].is_ascii_uppercase() {
                while i < chars.len() && chars[i].is_ascii_uppercase() {
                    i += 1;
                }
                // last uppercase belongs to the next word when followed by lowercase
                if i < chars.len() && chars[i].is_ascii_lowercase() {
                    i -= 1;
                }
            } else {
                while i < chars.len() && chars[i].is_ascii_lowercase() {
                    i += 1;
                }
            }
        } else {
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
        }
        words.push(chars[start..i].iter().collect());
    }
    words
}
