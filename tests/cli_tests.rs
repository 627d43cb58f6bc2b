#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::temp_files;
use std::fs;
use std::process::{Command, Output};

const GOOD_DOC: &str = r#"{
  "entidades": [
    {
      "nome": "Produto",
      "colunas": [
        { "nome_col": "nu_produto", "tipo": "int", "primary_key": 1 },
        { "nome_col": "ds_nome", "tipo": "str", "tam": 80 }
      ]
    }
  ]
}"#;

const WARNING_DOC: &str = r#"{
  "nome": "Produto",
  "colunas": [
    { "tipo": "int" },
    { "nome_col": "ds_nome", "tipo": "str" }
  ]
}"#;

fn run_telagen(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_telagen");
    Command::new(exe).args(args).output().expect("run telagen")
}

#[test]
fn test_cli_generate_writes_project() {
    let spec = temp_files::create_temp_spec(GOOD_DOC);
    let out = temp_files::create_out_dir();

    let output = run_telagen(&[
        "generate",
        "--spec",
        spec.to_str().unwrap(),
        "--base",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✅ Produto"));
    assert!(out.join("shared/models/produto.model.ts").exists());
    assert!(out.join("services/produto.service.ts").exists());
    assert!(out.join("componentes/produto/listar.produto.ts").exists());
    assert!(out.join("app.routes.ts").exists());

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out]);
}

#[test]
fn test_cli_generate_dry_run_touches_nothing() {
    let spec = temp_files::create_temp_spec(GOOD_DOC);
    let out = temp_files::create_out_dir();

    let output = run_telagen(&[
        "generate",
        "--spec",
        spec.to_str().unwrap(),
        "--base",
        out.to_str().unwrap(),
        "--dry-run",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would write"));
    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out]);
}

#[test]
fn test_cli_generate_only_routes() {
    let spec = temp_files::create_temp_spec(GOOD_DOC);
    let out = temp_files::create_out_dir();

    let output = run_telagen(&[
        "generate",
        "--spec",
        spec.to_str().unwrap(),
        "--base",
        out.to_str().unwrap(),
        "--only",
        "routes",
    ]);
    assert!(output.status.success());

    assert!(out.join("app.routes.ts").exists());
    assert!(!out.join("shared").exists());
    assert!(!out.join("services").exists());
    assert!(!out.join("componentes").exists());

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out]);
}

#[test]
fn test_cli_generate_malformed_spec_exits_nonzero() {
    let spec = temp_files::create_temp_spec("{ not a spec");
    let out = temp_files::create_out_dir();

    let output = run_telagen(&[
        "generate",
        "--spec",
        spec.to_str().unwrap(),
        "--base",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("failed"));

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out]);
}

#[test]
fn test_cli_check_reports_entities() {
    let spec = temp_files::create_temp_spec(GOOD_DOC);

    let output = run_telagen(&["check", "--spec", spec.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✅ Produto (2 field(s))"));
    assert!(stdout.contains("1 entity(ies) checked, 0 warning(s)"));

    temp_files::cleanup_temp_files(&[spec]);
}

#[test]
fn test_cli_check_fail_on_warning() {
    let spec = temp_files::create_temp_spec(WARNING_DOC);

    // Warnings alone do not fail the check.
    let output = run_telagen(&["check", "--spec", spec.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("⚠️"));

    let output = run_telagen(&[
        "check",
        "--spec",
        spec.to_str().unwrap(),
        "--fail-on-warning",
    ]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    temp_files::cleanup_temp_files(&[spec]);
}

#[test]
fn test_cli_check_unreadable_document_fails() {
    let missing = std::env::temp_dir().join("telagen_cli_missing_spec.json");

    let output = run_telagen(&["check", "--spec", missing.to_str().unwrap()]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("❌"));
}
