// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Source inspection for operator self-diagnosis. Nothing here parses
//! credential content or reads file bodies.

use crate::env::{EnvSource, EnvValue};
use crate::kind::CredentialKind;
use crate::resolver::CredentialResolver;
use serde::Serialize;
use std::path::PathBuf;

/// State of the bound environment variable, without its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvState {
    Unset,
    Empty,
    NotUnicode,
    Set,
}

impl From<&EnvValue> for EnvState {
    fn from(value: &EnvValue) -> Self {
        match value {
            EnvValue::Unset => EnvState::Unset,
            EnvValue::Empty => EnvState::Empty,
            EnvValue::NotUnicode => EnvState::NotUnicode,
            EnvValue::Set(_) => EnvState::Set,
        }
    }
}

/// The first source resolution would attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Candidate {
    Environment,
    File,
    /// Only a template exists; resolution will report it
    Template,
    Nothing,
}

/// What is present for one credential kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub kind: CredentialKind,
    pub env_var: &'static str,
    pub env_state: EnvState,
    pub file: PathBuf,
    pub file_exists: bool,
    pub template: PathBuf,
    pub template_exists: bool,
}

impl SourceReport {
    /// The source resolution tries first. An environment value that turns
    /// out not to be JSON is skipped at resolution time, so this is a hint.
    pub fn first_candidate(&self) -> Candidate {
        if matches!(self.env_state, EnvState::Set | EnvState::NotUnicode) {
            Candidate::Environment
        } else if self.file_exists {
            Candidate::File
        } else if self.template_exists {
            Candidate::Template
        } else {
            Candidate::Nothing
        }
    }
}

impl<E: EnvSource> CredentialResolver<E> {
    /// Report which sources exist for `kind`
    pub fn inspect(&self, kind: CredentialKind) -> SourceReport {
        let binding = kind.binding();
        let env_state = EnvState::from(&EnvValue::read(self.env(), binding.env_var));
        let file = binding.file_path(self.root());
        let template = binding.template_path(self.root());

        SourceReport {
            kind,
            env_var: binding.env_var,
            env_state,
            file_exists: file.exists(),
            file,
            template_exists: template.exists(),
            template,
        }
    }

    /// Reports for every kind
    pub fn inspect_all(&self) -> Vec<SourceReport> {
        CredentialKind::ALL
            .iter()
            .map(|kind| self.inspect(*kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_reports_template_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("google-credentials.json.template"), "{}").unwrap();

        let resolver = CredentialResolver::with_env(HashMap::new(), &ResolverConfig::default())
            .with_root(temp.path());
        let report = resolver.inspect(CredentialKind::AuthorizedUser);

        assert_eq!(report.env_var, "GOOGLE_OAUTH_CREDENTIALS_JSON");
        assert_eq!(report.env_state, EnvState::Unset);
        assert!(!report.file_exists);
        assert!(report.template_exists);
        assert_eq!(report.first_candidate(), Candidate::Template);
    }

    #[test]
    fn test_inspect_environment_first() {
        let temp = TempDir::new().unwrap();
        let mut env = HashMap::new();
        env.insert(
            "GOOGLE_APPLICATION_CREDENTIALS_JSON".to_string(),
            "{\"type\":\"service_account\"}".to_string(),
        );

        let resolver =
            CredentialResolver::with_env(env, &ResolverConfig::default()).with_root(temp.path());
        let reports = resolver.inspect_all();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].first_candidate(), Candidate::Environment);
        assert_eq!(reports[1].first_candidate(), Candidate::Nothing);
    }

    #[test]
    fn test_empty_env_is_not_a_candidate() {
        let mut env = HashMap::new();
        env.insert("GOOGLE_OAUTH_CREDENTIALS_JSON".to_string(), String::new());
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("google-credentials.json"), "{}").unwrap();

        let resolver =
            CredentialResolver::with_env(env, &ResolverConfig::default()).with_root(temp.path());
        let report = resolver.inspect(CredentialKind::AuthorizedUser);

        assert_eq!(report.env_state, EnvState::Empty);
        assert_eq!(report.first_candidate(), Candidate::File);
    }
}
