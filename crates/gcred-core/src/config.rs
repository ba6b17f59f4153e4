// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration for where the resolver looks up fallback files

use crate::env::{EnvSource, EnvValue};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the root directory for fallback files
pub const ROOT_ENV_VAR: &str = "GCRED_ROOT";

/// Resolver configuration section (`[credentials]` in TOML files)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolverConfig {
    /// Directory that relative fallback paths are joined onto
    pub root_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    credentials: ResolverConfig,
}

impl ResolverConfig {
    pub fn with_root_dir(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root.into());
        self
    }

    /// Parse the `[credentials]` section of a TOML document. A document
    /// without that section yields the default configuration.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("invalid credentials config: {}", e)))?;
        Ok(file.credentials)
    }

    /// Load the `[credentials]` section from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("reading config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Root directory for fallback files.
    /// Precedence: root_dir > GCRED_ROOT > working directory (`None`)
    pub fn resolve_root(&self, env: &dyn EnvSource) -> Option<PathBuf> {
        if let Some(root) = &self.root_dir {
            return Some(root.clone());
        }

        match EnvValue::read(env, ROOT_ENV_VAR) {
            EnvValue::Set(root) => Some(PathBuf::from(root)),
            EnvValue::NotUnicode => env.var_os(ROOT_ENV_VAR).map(PathBuf::from),
            EnvValue::Unset | EnvValue::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_root_precedence() {
        let mut env = HashMap::new();
        env.insert(ROOT_ENV_VAR.to_string(), "/from/env".to_string());

        let explicit = ResolverConfig::default().with_root_dir("/explicit");
        assert_eq!(
            explicit.resolve_root(&env),
            Some(PathBuf::from("/explicit"))
        );

        let from_env = ResolverConfig::default();
        assert_eq!(
            from_env.resolve_root(&env),
            Some(PathBuf::from("/from/env"))
        );

        env.insert(ROOT_ENV_VAR.to_string(), String::new());
        assert_eq!(from_env.resolve_root(&env), None);
    }

    #[test]
    fn test_parse_credentials_section() {
        let config = ResolverConfig::from_toml_str(
            r#"
            [credentials]
            root-dir = "/srv/omi"
            "#,
        )
        .unwrap();
        assert_eq!(config.root_dir, Some(PathBuf::from("/srv/omi")));
    }

    #[test]
    fn test_missing_section_is_default() {
        let config = ResolverConfig::from_toml_str("[logging]\nlog-level = \"debug\"\n").unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ResolverConfig::from_toml_str("[credentials\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("invalid credentials config"));
    }
}
