// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Command-line surface over the credential resolver

pub mod inspect;
pub mod resolve;

pub use clap::Parser;

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use gcred_core::{CredentialKind, CredentialResolver, ResolverConfig};
use gcred_logging::CliLoggingArgs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gcred",
    version,
    about = "Resolve Google credentials from the environment, credential files and templates"
)]
pub struct Cli {
    /// TOML config file with a [credentials] section
    #[arg(long, global = true, env = "GCRED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory that credential file paths are relative to
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub logging: CliLoggingArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve credentials and print them (values redacted by default)
    Resolve(resolve::ResolveArgs),
    /// Show which credential sources are present without reading them
    Inspect(inspect::InspectArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    ServiceAccount,
    AuthorizedUser,
}

impl From<KindArg> for CredentialKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::ServiceAccount => CredentialKind::ServiceAccount,
            KindArg::AuthorizedUser => CredentialKind::AuthorizedUser,
        }
    }
}

impl Cli {
    /// Build the resolver configuration: config file first, `--root` on top
    pub fn resolver_config(&self) -> Result<ResolverConfig> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ResolverConfig::default(),
        };

        if let Some(root) = &self.root {
            config = config.with_root_dir(root);
        }

        Ok(config)
    }

    pub fn resolver(&self) -> Result<CredentialResolver> {
        Ok(CredentialResolver::from_config(&self.resolver_config()?))
    }

    /// Execute the selected command, writing its output to `out`
    pub fn run(&self, out: &mut dyn std::io::Write) -> Result<()> {
        let resolver = self.resolver()?;
        tracing::debug!(root = ?resolver.root(), "Resolver ready");

        match &self.command {
            Commands::Resolve(args) => args.run(&resolver, out),
            Commands::Inspect(args) => args.run(&resolver, out),
        }
    }
}
