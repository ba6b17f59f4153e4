// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Integration tests for loading resolver configuration from TOML files

use gcred_core::config::ROOT_ENV_VAR;
use gcred_core::{CredentialKind, CredentialResolver, CredentialSource, ResolverConfig};
use gcred_test_fixtures::{CredentialsSandbox, SampleCredentials, SERVICE_ACCOUNT_FILE};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_file_root_is_used_for_fallback_files() {
    let sandbox = CredentialsSandbox::new();
    let path = sandbox.write_json(
        SERVICE_ACCOUNT_FILE,
        &SampleCredentials::default().service_account,
    );

    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("gcred.toml");
    fs::write(
        &config_path,
        format!(
            "[credentials]\nroot-dir = {:?}\n",
            sandbox.root().display().to_string()
        ),
    )
    .unwrap();

    let config = ResolverConfig::from_file(&config_path).unwrap();
    let resolver = CredentialResolver::with_env(HashMap::new(), &config);

    assert_eq!(resolver.root(), Some(sandbox.root()));
    let resolution = resolver
        .resolve_with_report(CredentialKind::ServiceAccount)
        .unwrap();
    assert_eq!(resolution.source, CredentialSource::File { path });
}

#[test]
fn test_config_root_overrides_root_env() {
    let configured = CredentialsSandbox::new();
    let from_env = CredentialsSandbox::new();
    configured.write(SERVICE_ACCOUNT_FILE, r#"{"origin":"configured"}"#);
    from_env.write(SERVICE_ACCOUNT_FILE, r#"{"origin":"env"}"#);

    let mut env = HashMap::new();
    env.insert(
        ROOT_ENV_VAR.to_string(),
        from_env.root().display().to_string(),
    );

    let config = ResolverConfig::default().with_root_dir(configured.root());
    let resolver = CredentialResolver::with_env(env.clone(), &config);
    assert_eq!(
        resolver.service_account().unwrap()["origin"],
        serde_json::json!("configured")
    );

    let resolver = CredentialResolver::with_env(env, &ResolverConfig::default());
    assert_eq!(
        resolver.service_account().unwrap()["origin"],
        serde_json::json!("env")
    );
}

#[test]
fn test_missing_config_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let err = ResolverConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, gcred_core::Error::Config(_)));
    assert_eq!(err.kind(), None);
}
