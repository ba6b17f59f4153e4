// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for credential resolution

use crate::kind::CredentialKind;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal resolution failures. Each variant names enough context (kind,
/// variable, paths) for an operator to fix the deployment.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load {kind} credentials from {}", .path.display())]
    SourceMalformed {
        kind: CredentialKind,
        path: PathBuf,
        #[source]
        cause: MalformedCause,
    },

    #[error(
        "Credentials file {file} not found. Please copy {tpl} to {file} and fill in the placeholders with your actual credentials.",
        file = .path.display(),
        tpl = .template.display()
    )]
    NotConfiguredTemplateFound {
        kind: CredentialKind,
        path: PathBuf,
        template: PathBuf,
    },

    #[error(
        "Could not locate {kind} credentials file. Please set {env_var} environment variable or create a {} file.",
        .path.display()
    )]
    NotFound {
        kind: CredentialKind,
        env_var: &'static str,
        path: PathBuf,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The credential kind the failure relates to, if any
    pub fn kind(&self) -> Option<CredentialKind> {
        match self {
            Error::SourceMalformed { kind, .. }
            | Error::NotConfiguredTemplateFound { kind, .. }
            | Error::NotFound { kind, .. } => Some(*kind),
            Error::Config(_) => None,
        }
    }

    /// True when nothing usable was configured (as opposed to a broken source)
    pub fn is_not_configured(&self) -> bool {
        matches!(
            self,
            Error::NotConfiguredTemplateFound { .. } | Error::NotFound { .. }
        )
    }
}

/// Why an existing fallback file could not be turned into a credential record
#[derive(Debug, Error)]
pub enum MalformedCause {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("file is larger than the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(JsonType),
}

/// Top-level JSON value type, used to describe non-object documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Bool,
    Number,
    String,
    Array,
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Null => "null",
            JsonType::Bool => "a boolean",
            JsonType::Number => "a number",
            JsonType::String => "a string",
            JsonType::Array => "an array",
        };
        f.write_str(name)
    }
}
