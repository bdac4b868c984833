// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;

use anyhow::{Context, Result};
use oc_cli::{Cli, Commands, Parser};
use oc_client_api::ClientApi;
use oc_rest_client::{NetworkConfig, RestClient};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.logging.clone().init("oncall")?;

    let network = NetworkConfig {
        service_base_url: cli.service_url.clone(),
    };
    let base_url = network
        .resolve_base_url()
        .context("No backend URL configured; pass --service-url or set ONCALL_SERVICE_URL")?;
    let client: Arc<dyn ClientApi> = Arc::new(RestClient::from_url(&base_url)?);

    match cli.command {
        Commands::Repos { subcommand } => subcommand.run(client.as_ref()).await,
        Commands::Docs { subcommand } => subcommand.run(client.as_ref()).await,
        Commands::Investigate(args) => args.run(client).await,
        Commands::Watch(args) => args.run(client).await,
        Commands::Investigations => oc_cli::investigate::list_investigations(client.as_ref()).await,
    }
}
