// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Resolution of Google credentials from prioritized sources.
//!
//! This crate provides:
//! - A static binding table from credential kind to environment variable and fallback file
//! - A resolver that checks the environment, then the file, then a setup template
//! - Classified errors carrying the kind, variable and paths involved
//! - Source inspection for diagnosing a deployment without parsing secrets

pub mod config;
pub mod env;
pub mod error;
pub mod inspect;
pub mod kind;
pub mod resolver;

/// Re-export key types for convenience
pub use config::ResolverConfig;
pub use env::{EnvSource, ProcessEnv};
pub use error::{Error, MalformedCause, Result};
pub use inspect::{Candidate, EnvState, SourceReport};
pub use kind::{CredentialKind, SourceBinding, BINDINGS};
pub use resolver::{
    resolve, resolve_authorized_user, resolve_service_account, CredentialRecord,
    CredentialResolver, CredentialSource, Diagnostic, Resolution, MAX_CREDENTIAL_FILE_BYTES,
};
