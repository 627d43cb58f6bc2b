#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::temp_files;
use std::fs;
use std::path::{Path, PathBuf};
use telagen::generator::{generate_project, GenerateOptions, GenerationScope};
use walkdir::WalkDir;

const CATALOG_DOC: &str = r#"{
  "entidades": [
    {
      "nome": "Produto",
      "pagination": true,
      "colunas": [
        { "nome_col": "nu_produto", "tipo": "int", "primary_key": 1 },
        { "nome_col": "ds_nome", "tipo": "str", "tam": 80, "obrigatoria": 1, "listar": 1 },
        { "nome_col": "vl_preco", "tipo": "decimal", "listar": 1 }
      ]
    },
    {
      "nome": "Categoria",
      "colunas": [
        { "nome_col": "nu_categoria", "tipo": "int", "primary_key": 1 },
        { "nome_col": "ds_descricao", "tipo": "str" }
      ]
    }
  ]
}"#;

const AUTH_DOC: &str = r#"{
  "entidades": [
    {
      "nome": "User",
      "tela_login": true,
      "user_perfil": true,
      "token_armazenamento": "sessionstorage",
      "colunas": [
        { "nome_col": "nu_user", "tipo": "int", "primary_key": 1 },
        { "nome_col": "no_email", "tipo": "str", "obrigatoria": 1 },
        { "nome_col": "ds_senha", "tipo": "str" }
      ]
    },
    {
      "nome": "Produto",
      "colunas": [
        { "nome_col": "nu_produto", "tipo": "int", "primary_key": 1 },
        { "nome_col": "ds_nome", "tipo": "str" }
      ]
    }
  ]
}"#;

fn options(spec: &Path, out: &Path) -> GenerateOptions {
    GenerateOptions {
        specs: vec![spec.to_path_buf()],
        base_dir: out.to_path_buf(),
        ..GenerateOptions::default()
    }
}

/// Every file under `root`, relative path plus raw bytes, in stable order.
fn tree_snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
            files.push((rel, fs::read(entry.path()).unwrap()));
        }
    }
    files
}

#[test]
fn test_generated_tree_is_reproducible() {
    let spec = temp_files::create_temp_spec(AUTH_DOC);
    let out_a = temp_files::create_out_dir();
    let out_b = temp_files::create_out_dir();

    let report_a = generate_project(&options(&spec, &out_a)).unwrap();
    let report_b = generate_project(&options(&spec, &out_b)).unwrap();
    assert_eq!(report_a.files_written, report_b.files_written);

    let snap_a = tree_snapshot(&out_a);
    let snap_b = tree_snapshot(&out_b);
    assert!(!snap_a.is_empty());
    assert_eq!(snap_a.len(), snap_b.len());
    for ((path_a, bytes_a), (path_b, bytes_b)) in snap_a.iter().zip(snap_b.iter()) {
        assert_eq!(path_a, path_b);
        assert_eq!(bytes_a, bytes_b, "contents differ for {}", path_a.display());
    }

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out_a, out_b]);
}

#[test]
fn test_auth_batch_guards_every_entity_route() {
    let spec = temp_files::create_temp_spec(AUTH_DOC);
    let out = temp_files::create_out_dir();

    let report = generate_project(&options(&spec, &out)).unwrap();
    assert_eq!(report.generated, vec!["User", "Produto"]);

    let auth_files = fs::read_dir(out.join("auth"))
        .unwrap()
        .filter_map(Result::ok)
        .count();
    assert_eq!(auth_files, 13);

    let token_store = fs::read_to_string(out.join("auth/token.store.ts")).unwrap();
    assert!(token_store.contains("const storage: Storage = sessionStorage;"));

    let routes = fs::read_to_string(out.join("app.routes.ts")).unwrap();
    // Two entities, three guarded routes each.
    assert_eq!(routes.matches("canActivate: [authGuard]").count(), 6);
    assert!(routes.contains("path: 'login'"));
    assert!(routes.contains("redirectTo: 'login'"));

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out]);
}

#[test]
fn test_per_page_values_are_clamped_in_list_view() {
    let doc = r#"{
      "nome": "Produto",
      "pagination": true,
      "perpage": [50, 15, 15, 0],
      "colunas": [
        { "nome_col": "nu_produto", "tipo": "int", "primary_key": 1 },
        { "nome_col": "ds_nome", "tipo": "str" }
      ]
    }"#;
    let spec = temp_files::create_temp_spec(doc);
    let out = temp_files::create_out_dir();

    generate_project(&options(&spec, &out)).unwrap();

    let list = fs::read_to_string(out.join("componentes/produto/listar.produto.ts")).unwrap();
    assert!(list.contains("pageSizeOptions: number[] = [15, 50];"));

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out]);
}

#[test]
fn test_scope_limits_written_groups() {
    let spec = temp_files::create_temp_spec(CATALOG_DOC);
    let out = temp_files::create_out_dir();

    let mut opts = options(&spec, &out);
    opts.scope = GenerationScope {
        models: true,
        services: true,
        views: false,
        routes: false,
        auth: false,
    };
    let report = generate_project(&opts).unwrap();
    assert_eq!(report.generated.len(), 2);

    assert!(out.join("shared/models/produto.model.ts").exists());
    assert!(out.join("shared/models/config.ts").exists());
    assert!(out.join("services/produto.service.ts").exists());
    assert!(out.join("services/categoria.service.ts").exists());
    assert!(!out.join("componentes").exists());
    assert!(!out.join("app.routes.ts").exists());
    assert!(!out.join("auth").exists());

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out]);
}

#[test]
fn test_mixed_batch_keeps_parsable_documents() {
    let good = temp_files::create_temp_spec(CATALOG_DOC);
    let bad = temp_files::create_temp_spec("{ not a spec");
    let out = temp_files::create_out_dir();

    let mut opts = options(&good, &out);
    opts.specs.push(bad.clone());
    let report = generate_project(&opts).unwrap();

    assert_eq!(report.generated, vec!["Produto", "Categoria"]);
    assert_eq!(report.failed_documents.len(), 1);
    assert_eq!(report.failed_documents[0].document, bad.display().to_string());
    assert!(!report.all_failed());

    let routes = fs::read_to_string(out.join("app.routes.ts")).unwrap();
    assert!(routes.contains("path: 'produtos'"));
    assert!(routes.contains("path: 'categorias'"));

    temp_files::cleanup_temp_files(&[good, bad]);
    temp_files::cleanup_dirs(&[out]);
}

#[test]
fn test_entity_without_fields_still_generates() {
    let spec = temp_files::create_temp_spec(r#"{"nome": "Vazio", "colunas": []}"#);
    let out = temp_files::create_out_dir();

    let report = generate_project(&options(&spec, &out)).unwrap();
    assert_eq!(report.generated, vec!["Vazio"]);
    assert!(report.skipped.is_empty());
    assert_eq!(report.warnings.len(), 1);

    let model = fs::read_to_string(out.join("shared/models/vazio.model.ts")).unwrap();
    assert!(model.contains("id: number | null;"));
    assert!(model.contains("nome: string | null;"));

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out]);
}

#[test]
fn test_unlisted_entity_defaults_columns_to_first_two_fields() {
    let spec = temp_files::create_temp_spec(CATALOG_DOC);
    let out = temp_files::create_out_dir();

    generate_project(&options(&spec, &out)).unwrap();

    // Categoria marks nothing, so the first two declared fields are shown.
    let list = fs::read_to_string(out.join("componentes/categoria/listar.categoria.ts")).unwrap();
    assert!(list.contains("displayedColumns = ['nu_categoria', 'ds_descricao', '_actions'];"));

    // Produto marks two fields explicitly.
    let list = fs::read_to_string(out.join("componentes/produto/listar.produto.ts")).unwrap();
    assert!(list.contains("displayedColumns = ['ds_nome', 'vl_preco', '_actions'];"));

    temp_files::cleanup_temp_files(&[spec]);
    temp_files::cleanup_dirs(&[out]);
}
