// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Credential kinds and their static source bindings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Suffix appended to a fallback path to locate its setup template
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Supported categories of Google identity material
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    ServiceAccount,
    AuthorizedUser,
}

impl CredentialKind {
    /// Every kind, in declaration order
    pub const ALL: [CredentialKind; 2] = [
        CredentialKind::ServiceAccount,
        CredentialKind::AuthorizedUser,
    ];

    /// Stable snake_case identifier used in messages and serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            CredentialKind::ServiceAccount => "service_account",
            CredentialKind::AuthorizedUser => "authorized_user",
        }
    }

    /// The source binding for this kind
    pub fn binding(self) -> &'static SourceBinding {
        match self {
            CredentialKind::ServiceAccount => &BINDINGS[0],
            CredentialKind::AuthorizedUser => &BINDINGS[1],
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "service_account" => Ok(CredentialKind::ServiceAccount),
            "authorized_user" => Ok(CredentialKind::AuthorizedUser),
            _ => Err(format!(
                "Invalid credential kind: {}. Use 'service_account' or 'authorized_user'",
                s
            )),
        }
    }
}

/// Where a credential kind may be found: an environment variable holding the
/// JSON document, and a fallback file path relative to the resolver root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBinding {
    pub kind: CredentialKind,
    pub env_var: &'static str,
    pub file: &'static str,
}

/// The binding table. Exactly one entry per kind, indexed in `CredentialKind::ALL` order.
pub static BINDINGS: [SourceBinding; 2] = [
    SourceBinding {
        kind: CredentialKind::ServiceAccount,
        env_var: "GOOGLE_APPLICATION_CREDENTIALS_JSON",
        file: "backend/google-credentials.json",
    },
    SourceBinding {
        kind: CredentialKind::AuthorizedUser,
        env_var: "GOOGLE_OAUTH_CREDENTIALS_JSON",
        file: "google-credentials.json",
    },
];

impl SourceBinding {
    /// Fallback file path joined onto `root` (or left relative when `root` is `None`)
    pub fn file_path(&self, root: Option<&Path>) -> PathBuf {
        match root {
            Some(root) => root.join(self.file),
            None => PathBuf::from(self.file),
        }
    }

    /// Template sibling of the fallback file
    pub fn template_path(&self, root: Option<&Path>) -> PathBuf {
        template_path_for(&self.file_path(root))
    }
}

/// Append the template suffix to a file path without touching its extension
pub fn template_path_for(file: &Path) -> PathBuf {
    let mut raw = file.as_os_str().to_os_string();
    raw.push(TEMPLATE_SUFFIX);
    PathBuf::from(raw)
}
