use askama::Template;

use crate::routes::RouteEntry;
use crate::schema::Field;

/// Per-field view rendered by the entity templates
///
/// Everything is pre-stringified so templates only interpolate; no formatting
/// decisions happen at render time.
#[derive(Debug, Clone)]
pub struct FieldView {
    /// Field name as it appears in the model and form controls
    pub name: String,
    /// Human-readable label
    pub label: String,
    /// Input-kind token (`text`, `email`, `senha`, `number`, `radio`, ...)
    pub input: String,
    /// HTML `type` attribute for the edit form input
    pub html_type: String,
    /// TypeScript model type (`number` or `string`)
    pub ts: String,
    /// Max-length literal for the metadata entry, `null` when absent
    pub tam: String,
    /// Whether the form control is disabled
    pub readonly: bool,
    /// Whether the control carries a required validator
    pub required: bool,
    /// Whether the submit payload casts through `Number(...)`
    pub numeric: bool,
    /// `, dflt: <literal>` metadata suffix, empty when no default exists
    pub dflt_entry: String,
}

impl From<&Field> for FieldView {
    fn from(field: &Field) -> FieldView {
        FieldView {
            name: field.name.clone(),
            label: field.label.clone(),
            input: field.input.token().to_string(),
            html_type: field.input.html_input_type().to_string(),
            ts: field.ts_type().to_string(),
            tam: field
                .max_length
                .map(|n| n.to_string())
                .unwrap_or_else(|| "null".to_string()),
            readonly: field.readonly,
            required: field.required,
            numeric: field.casts_to_number(),
            dflt_entry: field
                .default_literal()
                .map(|lit| format!(", dflt: {lit}"))
                .unwrap_or_default(),
        }
    }
}

/// Column shown in the generated list table
#[derive(Debug, Clone)]
pub struct ColumnView {
    /// Field name, used as the column id and row key
    pub name: String,
    /// Header cell text
    pub label: String,
}

/// Template data for the entity data model interface
#[derive(Template)]
#[template(path = "model.ts.txt", escape = "none")]
pub struct ModelTemplateData {
    /// Entity type name
    pub type_name: String,
    /// Canonical fields in declaration order
    pub fields: Vec<FieldView>,
}

/// Template data for the entity data-access service
#[derive(Template)]
#[template(path = "service.ts.txt", escape = "none")]
pub struct ServiceTemplateData {
    /// Entity type name
    pub type_name: String,
    /// Entity slug, used in the endpoint path and model import
    pub slug: String,
    /// Pre-rendered upload/download methods, empty when inactive
    pub upload_block: String,
}

/// Template for the upload/download service methods
#[derive(Template)]
#[template(path = "service_upload.ts.txt", escape = "none")]
pub struct ServiceUploadTemplate;

/// Template data for the list component class
#[derive(Template)]
#[template(path = "list.ts.txt", escape = "none")]
pub struct ListComponentTemplateData {
    /// Entity type name
    pub type_name: String,
    /// Entity slug, used in selector and file references
    pub slug: String,
    /// kebab-case service file stem
    pub file_stem: String,
    /// Route segment the action buttons navigate to
    pub segment: String,
    /// Primary-key field name used by edit/remove
    pub pk: String,
    /// Quoted column id list (`'id', 'nome', '_actions'`)
    pub displayed_columns: String,
    /// Page-size option literal (`[15, 25, 50, 100]`)
    pub page_sizes: String,
    /// Whether paging state and the paginator are rendered
    pub pagination: bool,
}

/// Template data for the list view markup
#[derive(Template)]
#[template(path = "list.html.txt", escape = "none")]
pub struct ListHtmlTemplateData {
    /// Entity type name
    pub type_name: String,
    /// Route segment for the new-record links
    pub segment: String,
    /// Columns in display order
    pub columns: Vec<ColumnView>,
    /// Whether the paginator element is rendered
    pub pagination: bool,
}

/// Template for the list view stylesheet
#[derive(Template)]
#[template(path = "list.css.txt", escape = "none")]
pub struct ListCssTemplate;

/// Template data for the insert/edit component class
#[derive(Template)]
#[template(path = "edit.ts.txt", escape = "none")]
pub struct EditComponentTemplateData {
    /// Entity type name
    pub type_name: String,
    /// Entity slug, used in selector and file references
    pub slug: String,
    /// kebab-case service file stem
    pub file_stem: String,
    /// Route segment navigated to after save/cancel
    pub segment: String,
    /// Canonical fields in declaration order
    pub fields: Vec<FieldView>,
    /// Pre-rendered password-control setup, empty when inactive
    pub password_init: String,
    /// Pre-rendered password payload logic, empty when inactive
    pub password_payload: String,
    /// Pre-rendered upload method body, or a disabled note
    pub upload_impl: String,
    /// Pre-rendered download method body, or a disabled note
    pub download_impl: String,
    /// Pre-rendered image-url assignment, empty when inactive
    pub image_url: String,
}

/// Template data for the insert/edit form markup
#[derive(Template)]
#[template(path = "edit.html.txt", escape = "none")]
pub struct EditHtmlTemplateData {
    /// Entity type name
    pub type_name: String,
    /// Canonical fields in declaration order
    pub fields: Vec<FieldView>,
    /// Pre-rendered password-change section, empty when inactive
    pub password_block: String,
    /// Pre-rendered image upload section, empty when inactive
    pub image_block: String,
}

/// Template for the edit view stylesheet
#[derive(Template)]
#[template(path = "edit.css.txt", escape = "none")]
pub struct EditCssTemplate;

/// Template for the password-control form setup
#[derive(Template)]
#[template(path = "edit_password_init.ts.txt", escape = "none")]
pub struct PasswordInitTemplate;

/// Template data for the password payload logic
#[derive(Template)]
#[template(path = "edit_password_payload.ts.txt", escape = "none")]
pub struct PasswordPayloadTemplateData {
    /// Column the new password value is written to
    pub password_field: String,
}

/// Template for the upload method body
#[derive(Template)]
#[template(path = "edit_upload_impl.ts.txt", escape = "none")]
pub struct UploadImplTemplate;

/// Template for the download method body
#[derive(Template)]
#[template(path = "edit_download_impl.ts.txt", escape = "none")]
pub struct DownloadImplTemplate;

/// Template for the password-change form section
#[derive(Template)]
#[template(path = "edit_password_block.html.txt", escape = "none")]
pub struct PasswordBlockTemplate;

/// Template for the image upload form section
#[derive(Template)]
#[template(path = "edit_image_block.html.txt", escape = "none")]
pub struct ImageBlockTemplate;

/// Template data for the aggregated routing table
#[derive(Template)]
#[template(path = "app_routes.ts.txt", escape = "none")]
pub struct RoutesTemplateData {
    /// Entries in entity-declaration order, three per entity
    pub entries: Vec<RouteEntry>,
    /// Whether the auth routes and guard imports are rendered
    pub guarded: bool,
    /// Target of the empty-path redirect, empty to omit it
    pub default_redirect: String,
}

/// Template for the runtime config interface
#[derive(Template)]
#[template(path = "config_model.ts.txt", escape = "none")]
pub struct ConfigModelTemplate;

/// Template data for the runtime config object
#[derive(Template)]
#[template(path = "config.ts.txt", escape = "none")]
pub struct ConfigTemplateData {
    /// API base URL baked into the generated app
    pub base_url: String,
}

/// Template for the alert message model
#[derive(Template)]
#[template(path = "alert_model.ts.txt", escape = "none")]
pub struct AlertModelTemplate;

/// Template for the alert signal store
#[derive(Template)]
#[template(path = "alert_store.ts.txt", escape = "none")]
pub struct AlertStoreTemplate;

/// Template data for the access-token store
#[derive(Template)]
#[template(path = "token_store.ts.txt", escape = "none")]
pub struct TokenStoreTemplateData {
    /// `Storage` global the store binds to (`localStorage` or `sessionStorage`)
    pub storage_global: String,
}

/// Template for the bearer-token HTTP interceptor
#[derive(Template)]
#[template(path = "auth_interceptor.ts.txt", escape = "none")]
pub struct AuthInterceptorTemplate;

/// Template data for the auth service
#[derive(Template)]
#[template(path = "auth_service.ts.txt", escape = "none")]
pub struct AuthServiceTemplateData {
    /// Normalized API prefix in front of the auth endpoints, may be empty
    pub api_prefix: String,
}

/// Template for the route guard
#[derive(Template)]
#[template(path = "auth_guard.ts.txt", escape = "none")]
pub struct AuthGuardTemplate;

/// Template for the login component class
#[derive(Template)]
#[template(path = "login.ts.txt", escape = "none")]
pub struct LoginComponentTemplate;

/// Template for the login view markup
#[derive(Template)]
#[template(path = "login.html.txt", escape = "none")]
pub struct LoginHtmlTemplate;

/// Template for the login view stylesheet
#[derive(Template)]
#[template(path = "login.css.txt", escape = "none")]
pub struct LoginCssTemplate;

/// Template for the reset-request component class
#[derive(Template)]
#[template(path = "request_reset.ts.txt", escape = "none")]
pub struct RequestResetComponentTemplate;

/// Template for the reset-request view markup
#[derive(Template)]
#[template(path = "request_reset.html.txt", escape = "none")]
pub struct RequestResetHtmlTemplate;

/// Template for the reset-request view stylesheet
#[derive(Template)]
#[template(path = "request_reset.css.txt", escape = "none")]
pub struct RequestResetCssTemplate;

/// Template for the password-reset component class
#[derive(Template)]
#[template(path = "reset_password.ts.txt", escape = "none")]
pub struct ResetPasswordComponentTemplate;

/// Template for the password-reset view markup
#[derive(Template)]
#[template(path = "reset_password.html.txt", escape = "none")]
pub struct ResetPasswordHtmlTemplate;

/// Template for the password-reset view stylesheet
#[derive(Template)]
#[template(path = "reset_password.css.txt", escape = "none")]
pub struct ResetPasswordCssTemplate;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, InputKind};
    use serde_json::json;

    fn field(name: &str, kind: FieldKind, input: InputKind) -> Field {
        Field {
            name: name.to_string(),
            kind,
            input,
            label: crate::naming::label(name),
            max_length: None,
            required: false,
            readonly: false,
            primary_key: false,
            listed: false,
            default_value: None,
        }
    }

    #[test]
    fn field_view_stringifies_metadata() {
        let mut f = field("nu_idade", FieldKind::Integer, InputKind::Number);
        f.max_length = Some(3);
        f.required = true;
        let view = FieldView::from(&f);
        assert_eq!(view.tam, "3");
        assert_eq!(view.ts, "number");
        assert_eq!(view.html_type, "number");
        assert!(view.numeric);
        assert!(view.required);
        assert_eq!(view.dflt_entry, "");
    }

    #[test]
    fn field_view_default_entry_renders_literal() {
        let mut f = field("ic_ativo", FieldKind::Boolean, InputKind::Radio);
        f.default_value = Some(json!(1));
        let view = FieldView::from(&f);
        assert_eq!(view.dflt_entry, ", dflt: 1");
        assert_eq!(view.tam, "null");
        assert_eq!(view.input, "radio");
        assert_eq!(view.html_type, "text");
    }

    #[test]
    fn password_input_keeps_senha_token() {
        let f = field("ds_senha_hash", FieldKind::Text, InputKind::Password);
        let view = FieldView::from(&f);
        assert_eq!(view.input, "senha");
        assert_eq!(view.html_type, "password");
    }
}
