// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Multi-source credential resolution
//!
//! Sources are consulted in a fixed order for every call:
//! 1. the environment variable bound to the kind (parse failures are logged and skipped)
//! 2. the fallback file (parse or read failures are fatal)
//! 3. the `.template` sibling of the fallback file, which only shapes the error

use crate::config::ResolverConfig;
use crate::env::{EnvSource, EnvValue, ProcessEnv};
use crate::error::{Error, JsonType, MalformedCause, Result};
use crate::kind::{template_path_for, CredentialKind};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Upper bound on the size of a fallback credential file
pub const MAX_CREDENTIAL_FILE_BYTES: u64 = 1024 * 1024;

/// Parsed credential document, handed to the caller as-is.
///
/// Only a top-level JSON object is accepted. Any other valid JSON value
/// (array, string, number, boolean or null) is treated as a parse failure
/// rather than returned to the caller.
pub type CredentialRecord = serde_json::Map<String, Value>;

/// The source that supplied a resolved record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    Environment { var: &'static str },
    File { path: PathBuf },
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment { var } => write!(f, "environment variable {}", var),
            CredentialSource::File { path } => write!(f, "file {}", path.display()),
        }
    }
}

/// Non-fatal problem observed while resolving: the environment variable was
/// set but did not hold a usable JSON object, so it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: CredentialKind,
    pub env_var: &'static str,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not parse {} credentials from environment variable {}: {}",
            self.kind, self.env_var, self.message
        )
    }
}

/// Successful resolution together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub kind: CredentialKind,
    pub record: CredentialRecord,
    pub source: CredentialSource,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves credential records from the environment and the filesystem.
///
/// Holds no state between calls besides the environment handle and the root
/// directory for fallback files; every call reads its sources afresh.
#[derive(Debug, Clone)]
pub struct CredentialResolver<E = ProcessEnv> {
    env: E,
    root: Option<PathBuf>,
}

impl CredentialResolver<ProcessEnv> {
    /// Resolver over the process environment with default configuration
    pub fn new() -> Self {
        Self::from_config(&ResolverConfig::default())
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::with_env(ProcessEnv, config)
    }
}

impl Default for CredentialResolver<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnvSource> CredentialResolver<E> {
    /// Resolver over a custom environment. The root directory is computed
    /// once here from `config` and the same environment.
    pub fn with_env(env: E, config: &ResolverConfig) -> Self {
        let root = config.resolve_root(&env);
        Self { env, root }
    }

    /// Override the root directory for fallback files
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Root directory for fallback files; `None` means the working directory
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub(crate) fn env(&self) -> &E {
        &self.env
    }

    /// Resolve the credential record for `kind`
    pub fn resolve(&self, kind: CredentialKind) -> Result<CredentialRecord> {
        self.resolve_with_report(kind).map(|resolution| resolution.record)
    }

    pub fn service_account(&self) -> Result<CredentialRecord> {
        self.resolve(CredentialKind::ServiceAccount)
    }

    pub fn authorized_user(&self) -> Result<CredentialRecord> {
        self.resolve(CredentialKind::AuthorizedUser)
    }

    /// Resolve `kind` and report which source won and which were skipped
    pub fn resolve_with_report(&self, kind: CredentialKind) -> Result<Resolution> {
        let binding = kind.binding();
        let mut diagnostics = Vec::new();

        let skipped = match EnvValue::read(&self.env, binding.env_var) {
            EnvValue::Set(raw) => match parse_record(raw.as_bytes()) {
                Ok(record) => {
                    tracing::debug!(
                        %kind,
                        env_var = binding.env_var,
                        "Resolved credentials from environment"
                    );
                    return Ok(Resolution {
                        kind,
                        record,
                        source: CredentialSource::Environment {
                            var: binding.env_var,
                        },
                        diagnostics,
                    });
                }
                Err(cause) => Some(cause.to_string()),
            },
            EnvValue::NotUnicode => Some("value is not valid UTF-8".to_string()),
            EnvValue::Unset | EnvValue::Empty => None,
        };

        if let Some(message) = skipped {
            let diagnostic = Diagnostic {
                kind,
                env_var: binding.env_var,
                message,
            };
            tracing::warn!(%kind, env_var = binding.env_var, "{}", diagnostic);
            diagnostics.push(diagnostic);
        }

        let path = binding.file_path(self.root());
        let malformed = |path: &Path, cause: MalformedCause| Error::SourceMalformed {
            kind,
            path: path.to_path_buf(),
            cause,
        };

        // A stat failure other than "not found" means the file may exist but
        // cannot be reached, which is not the same as unconfigured
        let exists = path
            .try_exists()
            .map_err(|err| malformed(&path, MalformedCause::Io(err)))?;
        if exists {
            let record = read_record(&path).map_err(|cause| malformed(&path, cause))?;
            tracing::debug!(%kind, path = %path.display(), "Resolved credentials from file");
            return Ok(Resolution {
                kind,
                record,
                source: CredentialSource::File { path },
                diagnostics,
            });
        }

        let template = template_path_for(&path);
        if template.try_exists().unwrap_or(false) {
            return Err(Error::NotConfiguredTemplateFound {
                kind,
                path,
                template,
            });
        }

        Err(Error::NotFound {
            kind,
            env_var: binding.env_var,
            path,
        })
    }
}

fn read_record(path: &Path) -> std::result::Result<CredentialRecord, MalformedCause> {
    let mut content = Vec::new();
    File::open(path)?
        .take(MAX_CREDENTIAL_FILE_BYTES + 1)
        .read_to_end(&mut content)?;
    if content.len() as u64 > MAX_CREDENTIAL_FILE_BYTES {
        return Err(MalformedCause::TooLarge {
            limit: MAX_CREDENTIAL_FILE_BYTES,
        });
    }
    parse_record(&content)
}

fn parse_record(content: &[u8]) -> std::result::Result<CredentialRecord, MalformedCause> {
    match serde_json::from_slice::<Value>(content)? {
        Value::Object(record) => Ok(record),
        Value::Null => Err(MalformedCause::NotAnObject(JsonType::Null)),
        Value::Bool(_) => Err(MalformedCause::NotAnObject(JsonType::Bool)),
        Value::Number(_) => Err(MalformedCause::NotAnObject(JsonType::Number)),
        Value::String(_) => Err(MalformedCause::NotAnObject(JsonType::String)),
        Value::Array(_) => Err(MalformedCause::NotAnObject(JsonType::Array)),
    }
}

/// Resolve `kind` with a resolver over the process environment
pub fn resolve(kind: CredentialKind) -> Result<CredentialRecord> {
    CredentialResolver::new().resolve(kind)
}

/// Service account credentials for backend services
pub fn resolve_service_account() -> Result<CredentialRecord> {
    resolve(CredentialKind::ServiceAccount)
}

/// OAuth credentials for user authentication
pub fn resolve_authorized_user() -> Result<CredentialRecord> {
    resolve(CredentialKind::AuthorizedUser)
}
