// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `oncall repos` subcommands

use anyhow::Result;
use clap::Subcommand;
use oc_api_contract::{validation::validate_create_repository_request, CreateRepositoryRequest};
use oc_client_api::ClientApi;

#[derive(Subcommand, Clone)]
pub enum RepoCommands {
    /// List registered repositories
    List,
    /// Register a repository (get-or-create on owner/name)
    Add {
        /// Repository owner, e.g. "acme"
        owner: String,
        /// Repository name, e.g. "payments-api"
        name: String,
        #[arg(long, default_value = "main")]
        default_branch: String,
        /// Railway project to correlate deployments with
        #[arg(long)]
        railway_project: Option<String>,
    },
}

impl RepoCommands {
    pub async fn run(self, client: &dyn ClientApi) -> Result<()> {
        match self {
            Self::List => {
                let repositories = client.list_repositories().await?;
                if repositories.is_empty() {
                    println!("No repositories registered.");
                    return Ok(());
                }
                for repo in repositories {
                    println!("{:>6}  {:<40} {}", repo.id, repo.full_name(), repo.default_branch);
                }
                Ok(())
            }
            Self::Add {
                owner,
                name,
                default_branch,
                railway_project,
            } => {
                let request = CreateRepositoryRequest {
                    owner,
                    name,
                    default_branch,
                    railway_project_name: railway_project,
                };
                validate_create_repository_request(&request)?;
                let repo = client.create_repository(&request).await?;
                println!("Registered {} (id {})", repo.full_name(), repo.id);
                Ok(())
            }
        }
    }
}
