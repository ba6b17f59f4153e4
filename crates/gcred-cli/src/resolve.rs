// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `gcred resolve`

use crate::KindArg;
use anyhow::Result;
use clap::Args;
use gcred_core::{CredentialKind, CredentialRecord, CredentialResolver, EnvSource, Resolution};
use gcred_logging::redact;
use serde_json::{json, Value};
use std::io::Write;

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Credential kind to resolve
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Emit JSON instead of human output
    #[arg(long)]
    pub json: bool,

    /// Print credential values instead of redacting them
    #[arg(long)]
    pub reveal: bool,
}

impl ResolveArgs {
    pub fn run<E: EnvSource>(
        &self,
        resolver: &CredentialResolver<E>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let kind = CredentialKind::from(self.kind);
        let resolution = resolver.resolve_with_report(kind)?;

        if self.json {
            render_json(&resolution, self.reveal, out)
        } else {
            render_human(&resolution, self.reveal, out)
        }
    }
}

fn redacted(record: &CredentialRecord) -> CredentialRecord {
    record
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(redact(value).to_string())))
        .collect()
}

fn render_json(resolution: &Resolution, reveal: bool, out: &mut dyn Write) -> Result<()> {
    let record = if reveal {
        resolution.record.clone()
    } else {
        redacted(&resolution.record)
    };

    let document = json!({
        "kind": resolution.kind,
        "source": resolution.source,
        "diagnostics": resolution.diagnostics,
        "record": record,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
    Ok(())
}

fn render_human(resolution: &Resolution, reveal: bool, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "kind: {}", resolution.kind)?;
    writeln!(out, "source: {}", resolution.source)?;
    for diagnostic in &resolution.diagnostics {
        writeln!(out, "skipped: {}", diagnostic)?;
    }

    if resolution.record.is_empty() {
        writeln!(out, "record: (empty object)")?;
        return Ok(());
    }

    writeln!(out, "record:")?;
    for (key, value) in &resolution.record {
        if reveal {
            writeln!(out, "  {}: {}", key, value)?;
        } else {
            writeln!(out, "  {}: {}", key, redact(value))?;
        }
    }
    Ok(())
}
