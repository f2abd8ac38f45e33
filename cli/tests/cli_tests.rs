//! Tests for argument parsing, command execution and the run entry point

use std::path::{Path, PathBuf};

use clap::Parser;
use km_cli::{commands, error_response, run, Cli, Command, IssueArgs};
use km_core::{KeyMaterial, Scope, TokenError, TokenService, TokenServiceConfig};
use uuid::Uuid;

fn key_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../core/tests/fixtures")
        .join(name)
}

fn config_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn service() -> TokenService {
    let keys = KeyMaterial::from_files(
        key_fixture("primary_private.pem"),
        key_fixture("primary_public.pem"),
    )
    .unwrap();
    TokenService::new(keys, TokenServiceConfig::default())
}

fn key_args() -> Vec<String> {
    vec![
        "--private-key".to_string(),
        key_fixture("primary_private.pem").display().to_string(),
        "--public-key".to_string(),
        key_fixture("primary_public.pem").display().to_string(),
    ]
}

#[test]
fn test_no_subcommand_defaults_to_issue() {
    let cli = Cli::try_parse_from(["keymint"]).unwrap();

    assert!(cli.command.is_none());
    assert_eq!(cli.command.unwrap_or_default(), Command::Issue(IssueArgs::default()));
}

#[test]
fn test_parse_issue_arguments() {
    let user_id = Uuid::new_v4();
    let cli = Cli::try_parse_from([
        "keymint",
        "issue",
        "--user-id",
        &user_id.to_string(),
        "-e",
        "u1@example.com",
        "--roles",
        "admin",
        "editor",
    ])
    .unwrap();

    match cli.command {
        Some(Command::Issue(args)) => {
            assert_eq!(args.user_id, Some(user_id));
            assert_eq!(args.email(), "u1@example.com");
            assert_eq!(args.roles, vec!["admin", "editor"]);
            assert_eq!(args.subject(), user_id.to_string());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_rejects_invalid_user_id() {
    assert!(Cli::try_parse_from(["keymint", "issue", "--user-id", "not-a-uuid"]).is_err());
}

#[test]
fn test_issue_defaults() {
    let args = IssueArgs::default();

    assert_eq!(args.email(), "default@mail.ru");
    assert!(Uuid::parse_str(&args.subject()).is_ok());
    assert_ne!(args.subject(), args.subject());
}

#[test]
fn test_execute_issue_prints_pair() {
    let service = service();
    let output = commands::execute(&service, Command::default()).unwrap();

    let access = output["access_token"].as_str().unwrap();
    let refresh = output["refresh_token"].as_str().unwrap();
    assert_eq!(output["access_expires_in"], 3600);
    assert_eq!(output["refresh_expires_in"], 3600);

    let claims = service.decode_access(access).unwrap();
    assert_eq!(claims.email, "default@mail.ru");
    assert!(claims.user_id().is_ok());
    assert_eq!(service.decode(refresh).unwrap().scope, Scope::Refresh);
}

#[test]
fn test_execute_decode_refresh_and_ttl() {
    let service = service();
    let refresh = service.issue_refresh("u1", "u1@example.com", &[]).unwrap();

    let decoded = commands::execute(
        &service,
        Command::Decode {
            token: refresh.clone(),
            access_only: false,
        },
    )
    .unwrap();
    assert_eq!(decoded["sub"], "u1");
    assert_eq!(decoded["scope"], "refresh_token");

    let err = commands::execute(
        &service,
        Command::Decode {
            token: refresh.clone(),
            access_only: true,
        },
    )
    .unwrap_err();
    assert_eq!(err, TokenError::InvalidScope { scope: Scope::Refresh });

    let refreshed = commands::execute(&service, Command::Refresh { token: refresh }).unwrap();
    let access = refreshed["access_token"].as_str().unwrap().to_string();
    assert_eq!(service.decode_access(&access).unwrap().sub, "u1");

    let ttl = commands::execute(&service, Command::Ttl { token: access }).unwrap();
    let seconds = ttl["expires_in"].as_i64().unwrap();
    assert!(seconds > 3590 && seconds <= 3600);
}

#[test]
fn test_run_uses_config_file_and_key_overrides() {
    let mut argv = vec![
        "keymint".to_string(),
        "--config".to_string(),
        config_fixture("short_lived.toml").display().to_string(),
    ];
    argv.extend(key_args());
    argv.extend(["issue", "--user-id", "6f1c3c52-8a0e-4f51-9f0e-3f3b2b1c9d11"].map(String::from));

    let output = run(Cli::try_parse_from(argv).unwrap()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["access_expires_in"], 600);
    assert_eq!(json["refresh_expires_in"], 86400);
    let claims = service()
        .decode_access(json["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.sub, "6f1c3c52-8a0e-4f51-9f0e-3f3b2b1c9d11");
}

#[test]
fn test_run_reports_token_errors() {
    let mut argv = vec!["keymint".to_string()];
    argv.extend(key_args());
    argv.extend(["decode".to_string(), "not-a-token".to_string()]);

    let err = run(Cli::try_parse_from(argv).unwrap()).unwrap_err();

    assert_eq!(error_response(&err).error, "TOKEN_MALFORMED");
}

#[test]
fn test_run_reports_missing_keys() {
    let argv = [
        "keymint",
        "--private-key",
        "/nonexistent/rsa.private",
        "--public-key",
        "/nonexistent/rsa.pub",
    ];

    let err = run(Cli::try_parse_from(argv).unwrap()).unwrap_err();
    let response = error_response(&err);

    assert_eq!(response.error, "KEY_LOAD_ERROR");
    assert_eq!(response.details.unwrap()["path"], "/nonexistent/rsa.private");
}

#[test]
fn test_run_reports_missing_config_file() {
    let mut argv = vec![
        "keymint".to_string(),
        "--config".to_string(),
        "/nonexistent/keymint.toml".to_string(),
    ];
    argv.extend(key_args());

    let err = run(Cli::try_parse_from(argv).unwrap()).unwrap_err();

    assert_eq!(error_response(&err).error, "CONFIGURATION_ERROR");
}

#[test]
fn test_run_reports_out_of_range_lifetime() {
    let mut argv = vec![
        "keymint".to_string(),
        "--config".to_string(),
        config_fixture("unbounded_lifetime.toml").display().to_string(),
    ];
    argv.extend(key_args());

    let err = run(Cli::try_parse_from(argv).unwrap()).unwrap_err();

    assert_eq!(error_response(&err).error, "CONFIGURATION_ERROR");
}

#[test]
fn test_empty_email_falls_back_to_default() {
    let cli = Cli::try_parse_from(["keymint", "issue", "--email", ""]).unwrap();

    match cli.command {
        Some(Command::Issue(args)) => assert_eq!(args.email(), "default@mail.ru"),
        other => panic!("unexpected command: {other:?}"),
    }
}
