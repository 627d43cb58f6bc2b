//! Unit tests for CLI commands

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::commands::{map_only_to_scope, resolve_options, OnlyPart};
use crate::cli::{Cli, Commands};
use crate::schema::PkFallback;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("telagen_cli_{}_{}", std::process::id(), nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_generate_command_parses_multiple_specs() {
    let cli = Cli::try_parse_from([
        "telagen",
        "generate",
        "--spec",
        "a.json",
        "--spec",
        "b.json",
        "--base",
        "out",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate { spec, base, .. } => {
            assert_eq!(spec.len(), 2);
            assert_eq!(spec[1].to_string_lossy(), "b.json");
            assert_eq!(base.unwrap().to_string_lossy(), "out");
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_only_flag_accepts_comma_separated_parts() {
    let cli = Cli::try_parse_from([
        "telagen",
        "generate",
        "--spec",
        "a.json",
        "--only",
        "models,routes",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate { only, .. } => {
            assert_eq!(
                only.unwrap(),
                vec![OnlyPart::Models, OnlyPart::Routes]
            );
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_check_command_with_flags() {
    let cli = Cli::try_parse_from([
        "telagen",
        "check",
        "--spec",
        "entities.json",
        "--fail-on-warning",
    ])
    .unwrap();

    match cli.command {
        Commands::Check {
            spec,
            fail_on_warning,
        } => {
            assert_eq!(spec[0].to_string_lossy(), "entities.json");
            assert!(fail_on_warning);
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_generate_requires_a_spec() {
    assert!(Cli::try_parse_from(["telagen", "generate"]).is_err());
}

#[test]
fn test_all_commands_parse() {
    // Verify all commands can be parsed
    let commands = vec![
        vec!["telagen", "generate", "--spec", "a.json"],
        vec!["telagen", "generate", "--spec", "a.json", "--dry-run", "--watch"],
        vec!["telagen", "check", "--spec", "a.json"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_map_only_defaults_to_everything() {
    let scope = map_only_to_scope(None);
    assert!(scope.models && scope.services && scope.views && scope.routes && scope.auth);
}

#[test]
fn test_map_only_enables_selected_parts() {
    let scope = map_only_to_scope(Some(&[OnlyPart::Routes]));
    assert!(scope.routes);
    assert!(!scope.models && !scope.services && !scope.views && !scope.auth);
}

#[test]
fn test_resolve_options_defaults() {
    let dir = temp_dir();
    let spec = dir.join("entities.json");
    fs::write(&spec, "[]").unwrap();
    let opts = resolve_options(&[spec], None, None, None, false, None).unwrap();
    assert_eq!(opts.base_dir, PathBuf::from("."));
    assert_eq!(opts.api_prefix, "/api");
    assert_eq!(opts.pk_fallback, PkFallback::FirstField);
    assert!(opts.page_sizes.is_none());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_resolve_options_flags_win_over_config() {
    let dir = temp_dir();
    let spec = dir.join("entities.json");
    fs::write(&spec, "[]").unwrap();
    fs::write(
        dir.join("telagen.toml"),
        "base_dir = \"from-config\"\napi_prefix = \"config-prefix\"\npk_fallback = \"named-id\"\n",
    )
    .unwrap();

    // file values apply when no flag is passed, and the prefix is normalized
    let opts = resolve_options(&[spec.clone()], None, None, None, false, None).unwrap();
    assert_eq!(opts.base_dir, PathBuf::from("from-config"));
    assert_eq!(opts.api_prefix, "/config-prefix");
    assert_eq!(opts.pk_fallback, PkFallback::NamedId);

    // flags override the file
    let base = dir.join("cli-base");
    let opts =
        resolve_options(&[spec], Some(&base), Some("v2/"), None, true, None).unwrap();
    assert_eq!(opts.base_dir, base);
    assert_eq!(opts.api_prefix, "/v2");
    assert!(opts.dry_run);
    fs::remove_dir_all(&dir).unwrap();
}
