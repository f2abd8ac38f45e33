//! End-to-end token lifecycle through the public API

use std::path::{Path, PathBuf};

use chrono::{Duration, TimeZone, Utc};
use km_core::{
    Clock, DomainError, KeyMaterial, ManualClock, Scope, TokenError, TokenService,
    TokenServiceConfig,
};
use km_shared::JwtConfig;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn load_keys(prefix: &str) -> KeyMaterial {
    KeyMaterial::from_files(
        fixture(&format!("{prefix}_private.pem")),
        fixture(&format!("{prefix}_public.pem")),
    )
    .expect("Failed to load fixture keys")
}

#[test]
fn access_token_lifecycle_with_injected_clock() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap());
    let config = TokenServiceConfig::new(Duration::hours(1), Duration::hours(24)).unwrap();
    let service = TokenService::with_clock(load_keys("primary"), config, clock.clone());

    let token = service
        .issue_access("u1", "u1@example.com", &["admin".to_string()])
        .unwrap();

    let claims = service.decode_access(&token).unwrap();
    assert_eq!(claims.sub, "u1");
    assert_eq!(claims.scope, Scope::Access);
    assert_eq!(claims.expires_at(), Some(clock.now() + Duration::hours(1)));

    clock.advance(Duration::hours(2));
    assert_eq!(service.decode_access(&token).unwrap_err(), TokenError::Expired);
}

#[test]
fn refresh_flow_outlives_access_token() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap());
    let config = TokenServiceConfig::from_jwt_config(
        &JwtConfig::default()
            .with_access_expiry_minutes(15)
            .with_refresh_expiry_days(7),
    )
    .unwrap();
    let service = TokenService::with_clock(load_keys("primary"), config, clock.clone());

    let pair = service
        .issue_pair("u1", "u1@example.com", &["reader".to_string()])
        .unwrap();

    clock.advance(Duration::hours(1));
    assert_eq!(
        service.decode_access(&pair.access_token).unwrap_err(),
        TokenError::Expired
    );

    let renewed = service.refresh(&pair.refresh_token).unwrap();
    let claims = service.decode_access(&renewed).unwrap();
    assert_eq!(claims.email, "u1@example.com");
    assert_eq!(claims.roles, vec!["reader".to_string()]);
    assert_eq!(
        service.time_remaining(&renewed).unwrap(),
        Duration::minutes(15)
    );
}

#[test]
fn services_with_different_keys_do_not_trust_each_other() {
    let primary = TokenService::new(load_keys("primary"), TokenServiceConfig::default());
    let other = TokenService::new(load_keys("other"), TokenServiceConfig::default());

    let token = other.issue_refresh("u1", "", &[]).unwrap();

    assert_eq!(primary.refresh(&token).unwrap_err(), TokenError::InvalidSignature);
    assert!(other.refresh(&token).is_ok());
}

#[test]
fn missing_key_file_reports_path() {
    let err = KeyMaterial::from_files(fixture("primary_private.pem"), fixture("absent.pem"))
        .unwrap_err();

    match err {
        DomainError::KeyLoad { path, .. } => assert!(path.ends_with("absent.pem")),
        other => panic!("unexpected error: {other:?}"),
    }
}
