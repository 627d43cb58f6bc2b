use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Raw entity description as authored in a spec document.
///
/// Field names follow the canonical English dialect; the Portuguese dialect
/// keys are accepted as serde aliases so both forms deserialize into the same
/// shape. Unrecognized keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntitySpec {
    #[serde(default, alias = "nome", alias = "entity")]
    pub name: String,
    #[serde(default, alias = "nome_tabela", alias = "tablename", alias = "table")]
    pub table_hint: Option<String>,
    #[serde(default, alias = "colunas", alias = "campos")]
    pub fields: Vec<RawField>,
    #[serde(default, deserialize_with = "flex_bool")]
    pub pagination: bool,
    /// Raw page-size candidates; validated and clamped by the feature resolver.
    #[serde(default, alias = "perpage")]
    pub per_page: Vec<Value>,
    #[serde(default, alias = "tela_login", alias = "authScreen", deserialize_with = "flex_bool")]
    pub auth_screen: bool,
    #[serde(default, alias = "accessToken", deserialize_with = "flex_bool")]
    pub access_token: bool,
    #[serde(default, alias = "token_armazenamento", alias = "tokenStorage")]
    pub token_storage: Option<String>,
    #[serde(default, alias = "user_perfil", alias = "userProfile", deserialize_with = "flex_bool")]
    pub user_profile: bool,
    #[serde(default, alias = "hasImage", deserialize_with = "flex_bool")]
    pub has_image: bool,
}

/// One raw field descriptor, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawField {
    #[serde(default, alias = "nome_col", alias = "nome")]
    pub name: Option<String>,
    /// Declared type token (`int`, `decimal`, `date`, ...). Unknown tokens
    /// degrade to text during normalization.
    #[serde(default, rename = "tipo", alias = "type")]
    pub kind: Option<String>,
    #[serde(default, alias = "tam", deserialize_with = "flex_opt_u32")]
    pub max_length: Option<u32>,
    #[serde(
        default,
        alias = "obrigatoria",
        alias = "obrigatorio",
        deserialize_with = "flex_bool"
    )]
    pub required: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub readonly: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub primary_key: bool,
    /// Explicit UI input hint; wins over inference when present.
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default, alias = "listar", deserialize_with = "flex_bool")]
    pub listed: bool,
    #[serde(default, rename = "default")]
    pub default_value: Option<Value>,
}

/// Boolean coercion matching the dialects in the wild: JSON booleans,
/// 0/1 numerics, and affirmative strings all count as flags.
fn flex_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flag_value(&value))
}

pub(crate) fn flag_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "y" | "sim"
        ),
        _ => false,
    }
}

/// Lenient length parsing: integers and numeric strings are accepted,
/// anything else is treated as absent.
fn flex_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}
