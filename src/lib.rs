//! # Telagen
//!
//! **Telagen** is a schema-driven CRUD source generator: tolerant JSON entity
//! specs in, Angular standalone-component source artifacts out.
//!
//! ## Overview
//!
//! Telagen reads entity spec documents (JSON with human edits tolerated:
//! comments, trailing commas, aliased keys in two dialects), normalizes each
//! entity into one canonical model, and renders a complete CRUD slice per
//! entity: a typed model interface, an HTTP service, a list view, an edit
//! form, and a shared routing table across the whole batch. Optional feature
//! flags add pagination, image upload/download, a password-change section,
//! and a full auth block (login, token store, interceptor, guard).
//!
//! Generation is deterministic: the same documents and options always
//! produce byte-identical artifacts, so regeneration is diff-friendly.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`spec`]** - Tolerant parsing of entity spec documents
//! - **[`naming`]** - Identifier derivation (type name, slug, route segment, file stem, label)
//! - **[`schema`]** - Field normalization into the canonical entity model
//! - **[`features`]** - Feature-flag resolution (pagination, auth, upload, password change)
//! - **[`routes`]** - Route aggregation across the generated batch
//! - **[`generator`]** - Template rendering, batch driver, writer, sidecar config
//! - **[`watch`]** - Regeneration on spec-document change
//! - **[`cli`]** - The `telagen` command-line interface
//!
//! ### Generation Flow
//!
//! The generator transforms spec documents into a source tree in one pass:
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(telagen)
//!     participant Spec as spec::load_entities
//!     participant Schema as schema::normalize_entity
//!     participant Compose as generator::compose_entity
//!     participant Routes as routes::RouteTable
//!     participant Project as generator::generate_project
//!     participant FS as File System
//!
//!     User->>CLI: telagen generate<br/>--spec entities.json --base ./src/app
//!     CLI->>Project: generate_project(opts)
//!     Project->>Spec: load_entities(path)
//!     Spec->>Spec: Strict JSON parse
//!     Spec->>Spec: Tolerant cleanup retry<br/>(BOM, comments, trailing commas)
//!     Spec-->>Project: Vec<EntitySpec>
//!
//!     Project->>Schema: normalize_entity(spec)
//!     Schema->>Schema: Derive identifiers
//!     Schema->>Schema: Normalize fields<br/>(types, inputs, labels, key)
//!     Schema->>Schema: Resolve feature flags
//!     Schema-->>Project: EntityModel + warnings
//!
//!     Project->>Compose: compose_entity(&model)
//!     Compose->>Compose: Render Askama templates
//!     Compose->>Compose: Splice feature slots<br/>(upload, password, paginator)
//!     Compose-->>Project: Vec<Artifact>
//!
//!     Project->>FS: Write model, service,<br/>list view, edit view
//!     Project->>Routes: aggregate(successful entities)
//!     Routes-->>Project: RouteTable
//!     Project->>FS: Write app.routes.ts,<br/>shared + auth artifacts
//!     Project-->>CLI: GenerationReport
//!     CLI-->>User: ✅/⚠️/❌ summary
//! ```
//!
//! ### Key Architectural Patterns
//!
//! 1. **Canonical Model**: every downstream stage reads one normalized shape;
//!    raw dialect detail never reaches a template
//! 2. **Total Normalization**: malformed fields degrade to warnings, never
//!    abort an entity; an empty field list is synthesized, not rejected
//! 3. **Slot Splicing**: optional feature blocks are pre-rendered and spliced
//!    into fixed template slots, so inactive features leave no residue
//! 4. **Compose Before Write**: each entity renders fully in memory before
//!    any of its files touch disk
//! 5. **Failure Scoping**: field < entity < batch; one bad document never
//!    stops its siblings
//! 6. **Barrier Aggregation**: the routing table is built only after every
//!    entity finished, from the successful ones
//!
//! ## Quick Start
//!
//! ```no_run
//! use telagen::generator::{generate_project, GenerateOptions};
//!
//! let opts = GenerateOptions {
//!     specs: vec!["entities.json".into()],
//!     base_dir: "./src/app".into(),
//!     ..GenerateOptions::default()
//! };
//!
//! let report = generate_project(&opts).expect("generation failed");
//! report.print_summary();
//! ```
//!
//! ## Features
//!
//! - **Tolerant Input**: BOM, `//` and `/* */` comments, trailing commas,
//!   aliased keys in Portuguese and English dialects
//! - **Deterministic Output**: re-running on unchanged input rewrites
//!   byte-identical files
//! - **Feature Slots**: pagination, image upload/download, password change,
//!   auth screens, all gated per entity
//! - **Batch Reporting**: every skipped entity and dropped field is reported;
//!   nothing fails silently
//! - **Watch Mode**: keep the generated tree in sync while editing specs
//! - **Sidecar Config**: optional `telagen.toml` next to the spec documents
//!
//! ## Code Generation
//!
//! ```bash
//! telagen generate --spec entities.json --base ./src/app --prefix /api
//! ```
//!
//! ### Generated Structure
//!
//! ```text
//! src/app/
//! ├── app.routes.ts                        # Aggregated routing table
//! ├── shared/models/
//! │   ├── config.model.ts                  # Runtime config interface
//! │   ├── config.ts                        # Base URL constant
//! │   ├── alert.model.ts                   # Alert record shape
//! │   └── {entity}.model.ts                # One interface per entity
//! ├── services/
//! │   ├── alert.store.ts                   # Signal-based alert store
//! │   └── {entity}.service.ts              # One HTTP service per entity
//! ├── componentes/{entity}/
//! │   ├── listar.{entity}.ts|html|css      # List view
//! │   └── inserir.editar.{entity}.ts|html|css  # Edit form
//! └── auth/                                # Only when an entity requires auth
//!     ├── token.store.ts
//!     ├── auth.interceptor.ts
//!     ├── auth.service.ts
//!     ├── auth.guard.ts
//!     ├── login.ts|html|css
//!     ├── request-reset.ts|html|css
//!     └── reset-password.ts|html|css
//! ```
//!
//! ## Spec Documents
//!
//! A spec document is a JSON array of entities (or a wrapper object with an
//! `entidades`/`entities` key, or a single bare entity):
//!
//! ```json
//! [
//!   {
//!     "nome": "Produto",
//!     "pagination": true,
//!     "colunas": [
//!       { "nome_col": "nu_produto", "tipo": "int", "primary_key": 1 },
//!       { "nome_col": "ds_nome", "tipo": "str", "tam": 80, "obrigatoria": 1, "listar": 1 },
//!       { "nome_col": "vl_preco", "tipo": "decimal", "listar": 1 }
//!     ]
//!   }
//! ]
//! ```
//!
//! Key aliases are accepted per field (`nome_col`/`name`, `tipo`/`type`,
//! `tam`/`max_length`, `obrigatoria`/`required`, ...), unknown type tokens
//! degrade to text, and malformed fields are dropped with a warning instead
//! of failing the entity.

pub mod cli;

pub mod features;
pub mod generator;
pub mod naming;
pub mod routes;
pub mod schema;
pub mod spec;
pub mod watch;

pub use generator::{generate_project, GenerateOptions, GenerationReport, GenerationScope};
pub use schema::{normalize_entity, EntityModel, Field, FieldKind, InputKind, PkFallback};
pub use spec::{load_entities, parse_entities, EntitySpec, MalformedSpecError};
