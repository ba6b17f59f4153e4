// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `gcred inspect`

use crate::KindArg;
use anyhow::Result;
use clap::Args;
use gcred_core::{Candidate, CredentialResolver, EnvSource, EnvState, SourceReport};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Credential kind to inspect (all kinds when omitted)
    #[arg(value_enum)]
    pub kind: Option<KindArg>,

    /// Emit JSON instead of human output
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct InspectEntry<'a> {
    #[serde(flatten)]
    report: &'a SourceReport,
    first_candidate: Candidate,
}

impl InspectArgs {
    pub fn run<E: EnvSource>(
        &self,
        resolver: &CredentialResolver<E>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let reports = match self.kind {
            Some(kind) => vec![resolver.inspect(kind.into())],
            None => resolver.inspect_all(),
        };

        if self.json {
            let entries: Vec<InspectEntry<'_>> = reports
                .iter()
                .map(|report| InspectEntry {
                    report,
                    first_candidate: report.first_candidate(),
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
            return Ok(());
        }

        for report in &reports {
            render_human(report, out)?;
        }
        Ok(())
    }
}

fn env_state_label(state: EnvState) -> &'static str {
    match state {
        EnvState::Unset => "unset",
        EnvState::Empty => "empty (ignored)",
        EnvState::NotUnicode => "set (not valid UTF-8)",
        EnvState::Set => "set",
    }
}

fn presence(exists: bool) -> &'static str {
    if exists {
        "present"
    } else {
        "missing"
    }
}

fn candidate_label(candidate: Candidate) -> &'static str {
    match candidate {
        Candidate::Environment => "environment variable",
        Candidate::File => "credentials file",
        Candidate::Template => "none (template found, copy and fill it in)",
        Candidate::Nothing => "none",
    }
}

fn render_human(report: &SourceReport, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", report.kind)?;
    writeln!(
        out,
        "  env {}: {}",
        report.env_var,
        env_state_label(report.env_state)
    )?;
    writeln!(
        out,
        "  file {}: {}",
        report.file.display(),
        presence(report.file_exists)
    )?;
    writeln!(
        out,
        "  template {}: {}",
        report.template.display(),
        presence(report.template_exists)
    )?;
    writeln!(
        out,
        "  first source: {}",
        candidate_label(report.first_candidate())
    )?;
    Ok(())
}
