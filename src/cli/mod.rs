//! # CLI Module
//!
//! The CLI module provides command-line interface functionality for the
//! Telagen generator.
//!
//! ## Overview
//!
//! The CLI supports:
//! - **Generation** - Generate the full CRUD artifact set from entity spec documents
//! - **Checking** - Load and normalize documents without writing anything
//! - **Watching** - Regenerate automatically while spec documents are being edited
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate CRUD artifacts from one or more spec documents:
//!
//! ```bash
//! telagen generate --spec entities.json --base ./src/app
//! ```
//!
//! Options:
//! - `--spec <FILE>` - Entity spec document, repeatable (required)
//! - `--base <DIR>` - Output base directory (default: ".")
//! - `--prefix <PREFIX>` - API prefix for the auth endpoints (default: "/api")
//! - `--only <GROUP>` - Limit output: models, services, views, routes, auth
//! - `--dry-run` - Report what would be written without touching files
//! - `--watch` - Keep running and regenerate when a document changes
//! - `--config <FILE>` - telagen.toml config file (default: auto-detect beside the first spec)
//!
//! ### `check`
//!
//! Check spec documents without writing anything:
//!
//! ```bash
//! telagen check --spec entities.json --fail-on-warning
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use telagen::cli::run_cli;
//!
//! run_cli()?;
//! ```
//!
//! ## Binary
//!
//! The CLI is available as the `telagen` binary:
//!
//! ```bash
//! cargo install telagen
//! telagen --help
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Generate a full application source tree
//! telagen generate \
//!     --spec entities.json \
//!     --base ./src/app \
//!     --prefix /api
//!
//! # Regenerate only the routing table
//! telagen generate \
//!     --spec entities.json \
//!     --base ./src/app \
//!     --only routes
//!
//! # Check documents before generation
//! telagen check --spec entities.json
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
