// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use oc_logging::CliLoggingArgs;
use clap::Subcommand;

pub mod docs;
pub mod investigate;
pub mod render;
pub mod repos;

#[derive(clap::Parser)]
#[command(
    name = "oncall",
    about = "On-call console: submit and track deployment failure investigations",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Backend base URL; falls back to ONCALL_SERVICE_URL
    #[arg(long, global = true)]
    pub service_url: Option<String>,
    #[command(flatten)]
    pub logging: CliLoggingArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Repository registration and listing
    Repos {
        #[command(subcommand)]
        subcommand: repos::RepoCommands,
    },
    /// Reference documents attached to a repository
    Docs {
        #[command(subcommand)]
        subcommand: docs::DocCommands,
    },
    /// Submit a new investigation and watch it to completion
    Investigate(investigate::InvestigateArgs),
    /// Watch an existing investigation by id
    Watch(investigate::WatchArgs),
    /// List investigations
    Investigations,
}

pub use clap::Parser;
