use crate::features::FeatureSet;
use crate::naming::EntityNames;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Target-language field kind after type-token normalization.
///
/// Unknown tokens degrade to [`FieldKind::Text`]; normalization never fails
/// on a type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
    Text,
    Date,
    DateTime,
    Boolean,
}

impl FieldKind {
    pub fn from_token(token: &str) -> FieldKind {
        match token.trim().to_lowercase().as_str() {
            "int" | "integer" | "bigint" | "smallint" | "tinyint" => FieldKind::Integer,
            "decimal" | "float" | "double" | "real" | "number" => FieldKind::Decimal,
            "bool" | "boolean" => FieldKind::Boolean,
            "date" => FieldKind::Date,
            "datetime" | "timestamp" => FieldKind::DateTime,
            _ => FieldKind::Text,
        }
    }

    /// TypeScript model type. Booleans travel as 0/1 numbers on the wire.
    pub fn ts_type(&self) -> &'static str {
        match self {
            FieldKind::Integer | FieldKind::Decimal | FieldKind::Boolean => "number",
            FieldKind::Text | FieldKind::Date | FieldKind::DateTime => "string",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Decimal)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Integer => "Integer",
            FieldKind::Decimal => "Decimal",
            FieldKind::Text => "Text",
            FieldKind::Date => "Date",
            FieldKind::DateTime => "DateTime",
            FieldKind::Boolean => "Boolean",
        };
        write!(f, "{}", s)
    }
}

/// UI input control the edit form renders for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Password,
    Number,
    Radio,
    Date,
    DateTime,
}

impl InputKind {
    /// Parse an explicit `input` hint. Unknown hints return `None` so the
    /// caller falls back to inference.
    pub fn from_hint(hint: &str) -> Option<InputKind> {
        match hint.trim().to_lowercase().as_str() {
            "text" => Some(InputKind::Text),
            "email" => Some(InputKind::Email),
            "senha" | "password" => Some(InputKind::Password),
            "number" => Some(InputKind::Number),
            "radio" => Some(InputKind::Radio),
            "date" => Some(InputKind::Date),
            "datetime" => Some(InputKind::DateTime),
            _ => None,
        }
    }

    /// Literal used in the generated TypeScript field metadata. The password
    /// token stays `senha` because the generated form templates key on it.
    pub fn token(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Password => "senha",
            InputKind::Number => "number",
            InputKind::Radio => "radio",
            InputKind::Date => "date",
            InputKind::DateTime => "datetime",
        }
    }

    /// HTML `type` attribute for the edit-form input element. Radio groups
    /// render their own element, so the value is unused there.
    pub fn html_input_type(&self) -> &'static str {
        match self {
            InputKind::Text | InputKind::Radio => "text",
            InputKind::Email => "email",
            InputKind::Password => "password",
            InputKind::Number => "number",
            InputKind::Date | InputKind::DateTime => "date",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// One canonical field. Downstream stages read this shape exclusively;
/// no raw-dialect detail survives past normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub input: InputKind,
    pub label: String,
    pub max_length: Option<u32>,
    pub required: bool,
    pub readonly: bool,
    pub primary_key: bool,
    pub listed: bool,
    pub default_value: Option<Value>,
}

impl Field {
    pub fn ts_type(&self) -> &'static str {
        self.kind.ts_type()
    }

    /// Whether the submit payload casts this field through `Number(...)`.
    pub fn casts_to_number(&self) -> bool {
        self.kind.ts_type() == "number"
    }

    /// Render the declared default as a TypeScript literal, when one exists
    /// and is representable.
    pub fn default_literal(&self) -> Option<String> {
        match self.default_value.as_ref()? {
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Value::String(s) => Some(format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))),
            _ => None,
        }
    }
}

/// Policy applied when no field carries an explicit primary-key flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PkFallback {
    /// First declared field becomes the key.
    #[default]
    FirstField,
    /// A field literally named `id` becomes the key; first declared field
    /// when no such field exists.
    NamedId,
}

/// Fully normalized entity: identifiers, canonical fields, resolved features.
#[derive(Debug, Clone)]
pub struct EntityModel {
    pub names: EntityNames,
    pub fields: Vec<Field>,
    pub features: FeatureSet,
}

impl EntityModel {
    /// First field carrying the primary-key flag.
    pub fn primary_key(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.primary_key)
    }

    /// Fields shown in the list view: the explicitly listed ones, or the
    /// first two declared when none are marked.
    pub fn listed_fields(&self) -> Vec<&Field> {
        let marked: Vec<&Field> = self.fields.iter().filter(|f| f.listed).collect();
        if !marked.is_empty() {
            return marked;
        }
        self.fields.iter().take(2).collect()
    }
}
