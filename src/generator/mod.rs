//! # Generator Module
//!
//! The generator module turns canonical entity models into Angular source
//! artifacts and drives whole-batch runs end to end.
//!
//! ## Overview
//!
//! A run produces, per entity:
//! - **Model** - TypeScript interface for the entity record
//! - **Service** - HttpClient data-access service (list/get/create/update/delete)
//! - **List view** - standalone Material table component plus markup and stylesheet
//! - **Edit view** - standalone reactive insert/edit form plus markup and stylesheet
//!
//! and, per batch:
//! - **Routing table** - `app.routes.ts` spanning every generated entity
//! - **Shared infrastructure** - runtime config and the alert store
//! - **Auth block** - token store, interceptor, guard and the login/reset
//!   screens, when any entity asks for authentication
//!
//! ## Architecture
//!
//! Composition renders Askama templates from the canonical model:
//!
//! ```text
//! Entity Spec → Normalizer → Canonical Model → Template Rendering → Artifacts → Writer
//! ```
//!
//! 1. **Composer** (`compose_entity`) - renders the per-entity artifact set in memory
//! 2. **Batch driver** (`generate_project`) - loads documents, contains
//!    failures, writes artifacts, aggregates routes last
//! 3. **Config** (`TelagenConfig`) - optional `telagen.toml` sidecar with
//!    batch-level defaults
//!
//! Optional feature blocks (password change, image upload) are rendered to
//! strings first and spliced into fixed slots; an inactive feature leaves its
//! slot empty instead of changing the surrounding template.
//!
//! ## Generated Structure
//!
//! ```text
//! <base>/
//! ├── app.routes.ts               # Aggregated routing table
//! ├── shared/models/
//! │   ├── config.model.ts
//! │   ├── config.ts               # Base URL
//! │   ├── alert.model.ts
//! │   └── <slug>.model.ts         # One per entity
//! ├── services/
//! │   ├── alert.store.ts
//! │   └── <file-stem>.service.ts  # One per entity
//! ├── componentes/<slug>/
//! │   ├── listar.<slug>.{ts,html,css}
//! │   └── inserir.editar.<slug>.{ts,html,css}
//! └── auth/                       # Only when some entity requires auth
//!     ├── token.store.ts
//!     ├── auth.interceptor.ts
//!     ├── auth.service.ts
//!     ├── auth.guard.ts
//!     └── {login,request-reset,reset-password}.{ts,html,css}
//! ```
//!
//! ## Usage
//!
//! ### CLI Usage
//!
//! ```bash
//! telagen generate --spec entities.json --base ./src/app --prefix /api
//! ```
//!
//! ### Programmatic Usage
//!
//! ```rust,ignore
//! use telagen::generator::{generate_project, GenerateOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = generate_project(&GenerateOptions {
//!     specs: vec!["entities.json".into()],
//!     base_dir: "./src/app".into(),
//!     ..GenerateOptions::default()
//! })?;
//! report.print_summary();
//! # Ok(())
//! # }
//! ```
//!
//! ## Generation Scopes
//!
//! [`GenerationScope`] limits which artifact groups a run writes (models,
//! services, views, routes, auth), so one group can be regenerated without
//! touching the rest. Dry-run composes and reports without writing anything.

mod compose;
mod config;
mod project;
mod templates;

pub use compose::*;
pub use config::*;
pub use project::*;
pub use templates::*;
