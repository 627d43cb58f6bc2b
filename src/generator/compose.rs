use std::fmt;
use std::path::PathBuf;

use askama::Template;

use crate::features::StorageKind;
use crate::routes::RouteTable;
use crate::schema::{EntityModel, InputKind};

use super::templates::{
    AlertModelTemplate, AlertStoreTemplate, AuthGuardTemplate, AuthInterceptorTemplate,
    AuthServiceTemplateData, ColumnView, ConfigModelTemplate, ConfigTemplateData,
    DownloadImplTemplate, EditComponentTemplateData, EditCssTemplate, EditHtmlTemplateData,
    FieldView, ImageBlockTemplate, ListComponentTemplateData, ListCssTemplate,
    ListHtmlTemplateData, LoginComponentTemplate, LoginCssTemplate, LoginHtmlTemplate,
    ModelTemplateData, PasswordBlockTemplate, PasswordInitTemplate, PasswordPayloadTemplateData,
    RequestResetComponentTemplate, RequestResetCssTemplate, RequestResetHtmlTemplate,
    ResetPasswordComponentTemplate, ResetPasswordCssTemplate, ResetPasswordHtmlTemplate,
    RoutesTemplateData, ServiceTemplateData, ServiceUploadTemplate, TokenStoreTemplateData,
    UploadImplTemplate,
};

/// Base URL baked into generated apps when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Password column targeted by the password-change payload when the entity
/// declares no password-input field of its own.
const DEFAULT_PASSWORD_FIELD: &str = "ds_senha_hash";

/// Canonical model missing a structurally required element at render time.
///
/// Fatal for that entity only; sibling entities keep composing. The normal
/// pipeline never produces such a model (the normalizer synthesizes fields
/// and always resolves a key), so this guards direct callers of the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteModelError {
    /// Entity type name.
    pub entity: String,
    /// What the model is missing.
    pub reason: String,
}

impl IncompleteModelError {
    fn new(entity: &str, reason: impl Into<String>) -> Self {
        IncompleteModelError {
            entity: entity.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for IncompleteModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity '{}' cannot be composed: {}", self.entity, self.reason)
    }
}

impl std::error::Error for IncompleteModelError {}

/// Output role of a rendered artifact. Scope filtering keys on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Model,
    Service,
    View,
    Shared,
    Auth,
    Routes,
}

/// One rendered artifact: output path relative to the base directory plus
/// final contents. Composition never touches the filesystem.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
    pub role: ArtifactRole,
}

// Pre-rendered blocks splice into a slot that sits alone on its own template
// line; the slot supplies the trailing newline.
fn block(rendered: String) -> String {
    rendered.trim_end().to_string()
}

fn password_field(entity: &EntityModel) -> String {
    entity
        .fields
        .iter()
        .find(|f| f.input == InputKind::Password)
        .map(|f| f.name.clone())
        .unwrap_or_else(|| DEFAULT_PASSWORD_FIELD.to_string())
}

/// Compose the per-entity artifact set: model, service, list view, edit view,
/// and their stylesheets.
///
/// Every slot is filled exclusively from the canonical model. Inactive
/// feature blocks render as empty slots rather than being cut out of the
/// template, so output shape does not depend on feature combinations.
///
/// # Errors
///
/// Returns [`IncompleteModelError`] when the model has no fields or no
/// resolved primary key; composition refuses to emit references to
/// undefined fields.
pub fn compose_entity(entity: &EntityModel) -> anyhow::Result<Vec<Artifact>> {
    let names = &entity.names;
    if entity.fields.is_empty() {
        return Err(IncompleteModelError::new(&names.type_name, "field list is empty").into());
    }
    let pk = entity
        .primary_key()
        .ok_or_else(|| IncompleteModelError::new(&names.type_name, "no primary key resolved"))?;

    let features = &entity.features;
    let fields: Vec<FieldView> = entity.fields.iter().map(FieldView::from).collect();
    let columns: Vec<ColumnView> = entity
        .listed_fields()
        .iter()
        .map(|f| ColumnView {
            name: f.name.clone(),
            label: f.label.clone(),
        })
        .collect();
    let displayed_columns = columns
        .iter()
        .map(|c| format!("'{}'", c.name))
        .chain(std::iter::once("'_actions'".to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    let page_sizes = format!(
        "[{}]",
        features
            .page_sizes
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let upload_block = if features.file_upload {
        block(ServiceUploadTemplate.render()?)
    } else {
        String::new()
    };
    let password_init = if features.password_change {
        block(PasswordInitTemplate.render()?)
    } else {
        String::new()
    };
    let password_payload = if features.password_change {
        block(
            PasswordPayloadTemplateData {
                password_field: password_field(entity),
            }
            .render()?,
        )
    } else {
        String::new()
    };
    let upload_impl = if features.file_upload {
        block(UploadImplTemplate.render()?)
    } else {
        "    // upload não habilitado para esta entidade".to_string()
    };
    let download_impl = if features.file_upload {
        block(DownloadImplTemplate.render()?)
    } else {
        "    // download não habilitado para esta entidade".to_string()
    };
    let image_url = if features.file_upload {
        format!("          this.imgUrl = `/{}/img/${{id}}` as any;", names.slug)
    } else {
        String::new()
    };
    let password_block = if features.password_change {
        block(PasswordBlockTemplate.render()?)
    } else {
        String::new()
    };
    let image_block = if features.file_upload {
        block(ImageBlockTemplate.render()?)
    } else {
        String::new()
    };

    let component_dir = PathBuf::from("componentes").join(&names.slug);
    let mut artifacts = Vec::with_capacity(8);
    artifacts.push(Artifact {
        path: PathBuf::from("shared/models").join(format!("{}.model.ts", names.slug)),
        contents: ModelTemplateData {
            type_name: names.type_name.clone(),
            fields: fields.clone(),
        }
        .render()?,
        role: ArtifactRole::Model,
    });
    artifacts.push(Artifact {
        path: PathBuf::from("services").join(format!("{}.service.ts", names.file_stem)),
        contents: ServiceTemplateData {
            type_name: names.type_name.clone(),
            slug: names.slug.clone(),
            upload_block,
        }
        .render()?,
        role: ArtifactRole::Service,
    });
    artifacts.push(Artifact {
        path: component_dir.join(format!("listar.{}.ts", names.slug)),
        contents: ListComponentTemplateData {
            type_name: names.type_name.clone(),
            slug: names.slug.clone(),
            file_stem: names.file_stem.clone(),
            segment: names.route_segment.clone(),
            pk: pk.name.clone(),
            displayed_columns,
            page_sizes,
            pagination: features.pagination,
        }
        .render()?,
        role: ArtifactRole::View,
    });
    artifacts.push(Artifact {
        path: component_dir.join(format!("listar.{}.html", names.slug)),
        contents: ListHtmlTemplateData {
            type_name: names.type_name.clone(),
            segment: names.route_segment.clone(),
            columns,
            pagination: features.pagination,
        }
        .render()?,
        role: ArtifactRole::View,
    });
    artifacts.push(Artifact {
        path: component_dir.join(format!("listar.{}.css", names.slug)),
        contents: ListCssTemplate.render()?,
        role: ArtifactRole::View,
    });
    artifacts.push(Artifact {
        path: component_dir.join(format!("inserir.editar.{}.ts", names.slug)),
        contents: EditComponentTemplateData {
            type_name: names.type_name.clone(),
            slug: names.slug.clone(),
            file_stem: names.file_stem.clone(),
            segment: names.route_segment.clone(),
            fields,
            password_init,
            password_payload,
            upload_impl,
            download_impl,
            image_url,
        }
        .render()?,
        role: ArtifactRole::View,
    });
    artifacts.push(Artifact {
        path: component_dir.join(format!("inserir.editar.{}.html", names.slug)),
        contents: EditHtmlTemplateData {
            type_name: names.type_name.clone(),
            fields: entity.fields.iter().map(FieldView::from).collect(),
            password_block,
            image_block,
        }
        .render()?,
        role: ArtifactRole::View,
    });
    artifacts.push(Artifact {
        path: component_dir.join(format!("inserir.editar.{}.css", names.slug)),
        contents: EditCssTemplate.render()?,
        role: ArtifactRole::View,
    });
    Ok(artifacts)
}

/// Compose the batch-level shared artifacts: runtime config and the alert
/// store every generated component imports.
pub fn compose_shared(base_url: &str) -> anyhow::Result<Vec<Artifact>> {
    Ok(vec![
        Artifact {
            path: PathBuf::from("shared/models/config.model.ts"),
            contents: ConfigModelTemplate.render()?,
            role: ArtifactRole::Shared,
        },
        Artifact {
            path: PathBuf::from("shared/models/config.ts"),
            contents: ConfigTemplateData {
                base_url: base_url.to_string(),
            }
            .render()?,
            role: ArtifactRole::Shared,
        },
        Artifact {
            path: PathBuf::from("shared/models/alert.model.ts"),
            contents: AlertModelTemplate.render()?,
            role: ArtifactRole::Shared,
        },
        Artifact {
            path: PathBuf::from("services/alert.store.ts"),
            contents: AlertStoreTemplate.render()?,
            role: ArtifactRole::Shared,
        },
    ])
}

/// Compose the auth artifact set: token store, bearer interceptor, auth
/// service, route guard, and the login/reset screens. Emitted once per batch
/// no matter how many entities requested auth.
pub fn compose_auth(api_prefix: &str, storage: StorageKind) -> anyhow::Result<Vec<Artifact>> {
    let auth_dir = PathBuf::from("auth");
    let mut artifacts = Vec::with_capacity(13);
    artifacts.push(Artifact {
        path: auth_dir.join("token.store.ts"),
        contents: TokenStoreTemplateData {
            storage_global: storage.ts_global().to_string(),
        }
        .render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("auth.interceptor.ts"),
        contents: AuthInterceptorTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("auth.service.ts"),
        contents: AuthServiceTemplateData {
            api_prefix: api_prefix.to_string(),
        }
        .render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("auth.guard.ts"),
        contents: AuthGuardTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("login.ts"),
        contents: LoginComponentTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("login.html"),
        contents: LoginHtmlTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("login.css"),
        contents: LoginCssTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("request-reset.ts"),
        contents: RequestResetComponentTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("request-reset.html"),
        contents: RequestResetHtmlTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("request-reset.css"),
        contents: RequestResetCssTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("reset-password.ts"),
        contents: ResetPasswordComponentTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("reset-password.html"),
        contents: ResetPasswordHtmlTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    artifacts.push(Artifact {
        path: auth_dir.join("reset-password.css"),
        contents: ResetPasswordCssTemplate.render()?,
        role: ArtifactRole::Auth,
    });
    Ok(artifacts)
}

/// Render the aggregated routing table for the whole batch.
pub fn compose_routes(table: &RouteTable) -> anyhow::Result<Artifact> {
    Ok(Artifact {
        path: PathBuf::from("app.routes.ts"),
        contents: RoutesTemplateData {
            entries: table.entries.clone(),
            guarded: table.guarded,
            default_redirect: table.default_redirect.clone(),
        }
        .render()?,
        role: ArtifactRole::Routes,
    })
}
