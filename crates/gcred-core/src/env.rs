// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Environment lookup seam used by the resolver

use std::collections::HashMap;
use std::ffi::OsString;

/// Read-only view of environment variables
pub trait EnvSource {
    /// Raw value of `name`, or `None` when unset
    fn var_os(&self, name: &str) -> Option<OsString>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

/// In-memory environment, mostly for tests and embedding
impl EnvSource for HashMap<String, String> {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.get(name).map(OsString::from)
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var_os(&self, name: &str) -> Option<OsString> {
        (**self).var_os(name)
    }
}

/// Observed state of an environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    Unset,
    Empty,
    /// Present but not valid Unicode
    NotUnicode,
    Set(String),
}

impl EnvValue {
    pub fn read(env: &dyn EnvSource, name: &str) -> Self {
        match env.var_os(name) {
            None => EnvValue::Unset,
            Some(raw) if raw.is_empty() => EnvValue::Empty,
            Some(raw) => match raw.into_string() {
                Ok(value) => EnvValue::Set(value),
                Err(_) => EnvValue::NotUnicode,
            },
        }
    }

    /// Whether the variable takes part in resolution at all
    pub fn is_present(&self) -> bool {
        matches!(self, EnvValue::Set(_) | EnvValue::NotUnicode)
    }
}
