use super::types::{EntityModel, Field, FieldKind, InputKind, PkFallback};
use crate::features::FeatureSet;
use crate::naming::{self, EntityNames};
use crate::spec::EntitySpec;
use std::collections::HashSet;
use std::fmt;

/// Non-fatal problem with a single field descriptor.
///
/// The offending field is dropped and the entity keeps normalizing; the batch
/// report lists every warning at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    pub entity: String,
    /// 1-based position in the declared field list, 0 for entity-level notes.
    pub position: usize,
    pub message: String,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.position == 0 {
            write!(f, "{}: {}", self.entity, self.message)
        } else {
            write!(f, "{} field #{}: {}", self.entity, self.position, self.message)
        }
    }
}

/// Normalize one raw entity into the canonical model, deriving identifiers
/// and resolving features along the way.
pub fn normalize_entity(spec: &EntitySpec, fallback: PkFallback) -> (EntityModel, Vec<FieldWarning>) {
    let (fields, warnings) = normalize_fields(spec, fallback);
    let model = EntityModel {
        names: EntityNames::derive(&spec.name),
        fields,
        features: FeatureSet::resolve(spec),
    };
    (model, warnings)
}

/// Normalize the raw field list. Total: malformed descriptors become
/// warnings, never errors, and an empty result is replaced by synthetic
/// fields so composition always has something to render.
pub fn normalize_fields(spec: &EntitySpec, fallback: PkFallback) -> (Vec<Field>, Vec<FieldWarning>) {
    let entity = entity_display_name(spec);
    let mut fields: Vec<Field> = Vec::with_capacity(spec.fields.len());
    let mut warnings = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, raw) in spec.fields.iter().enumerate() {
        let position = idx + 1;
        let name = match raw.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => {
                warnings.push(FieldWarning {
                    entity: entity.clone(),
                    position,
                    message: "missing field name, field dropped".to_string(),
                });
                continue;
            }
        };
        if !seen.insert(name.clone()) {
            warnings.push(FieldWarning {
                entity: entity.clone(),
                position,
                message: format!("duplicate field '{}' dropped, first declaration wins", name),
            });
            continue;
        }

        let kind = FieldKind::from_token(raw.kind.as_deref().unwrap_or("str"));
        let input = raw
            .input
            .as_deref()
            .and_then(InputKind::from_hint)
            .unwrap_or_else(|| infer_input(&name, kind));

        fields.push(Field {
            label: naming::label(&name),
            name,
            kind,
            input,
            max_length: raw.max_length,
            required: raw.required,
            // primary keys are never editable in the form
            readonly: raw.readonly || raw.primary_key,
            primary_key: raw.primary_key,
            listed: raw.listed,
            default_value: raw.default_value.clone(),
        });
    }

    if fields.is_empty() {
        warnings.push(FieldWarning {
            entity,
            position: 0,
            message: "no usable fields declared, synthesizing 'id' and 'nome'".to_string(),
        });
        return (synthetic_fields(), warnings);
    }

    if !fields.iter().any(|f| f.primary_key) {
        let idx = match fallback {
            PkFallback::FirstField => 0,
            PkFallback::NamedId => fields
                .iter()
                .position(|f| f.name.eq_ignore_ascii_case("id"))
                .unwrap_or(0),
        };
        fields[idx].primary_key = true;
        fields[idx].readonly = true;
    }

    (fields, warnings)
}

/// UI-input inference for fields without an explicit hint. Name conventions
/// win over the declared kind; first match applies.
fn infer_input(name: &str, kind: FieldKind) -> InputKind {
    let n = name.to_lowercase();
    if n.contains("email") {
        return InputKind::Email;
    }
    if n.contains("senha") || n.contains("password") {
        return InputKind::Password;
    }
    if n.starts_with("dt_") || kind == FieldKind::Date {
        return InputKind::Date;
    }
    if n.starts_with("dh_") || kind == FieldKind::DateTime {
        return InputKind::DateTime;
    }
    if n.starts_with("ic_") || kind == FieldKind::Boolean {
        return InputKind::Radio;
    }
    if kind.is_numeric() {
        return InputKind::Number;
    }
    InputKind::Text
}

fn synthetic_fields() -> Vec<Field> {
    vec![
        Field {
            name: "id".to_string(),
            kind: FieldKind::Integer,
            input: InputKind::Number,
            label: "Id".to_string(),
            max_length: None,
            required: false,
            readonly: true,
            primary_key: true,
            listed: false,
            default_value: None,
        },
        Field {
            name: "nome".to_string(),
            kind: FieldKind::Text,
            input: InputKind::Text,
            label: "Nome".to_string(),
            max_length: None,
            required: false,
            readonly: false,
            primary_key: false,
            listed: false,
            default_value: None,
        },
    ]
}

fn entity_display_name(spec: &EntitySpec) -> String {
    let trimmed = spec.name.trim();
    if trimmed.is_empty() {
        "<unnamed entity>".to_string()
    } else {
        trimmed.to_string()
    }
}
