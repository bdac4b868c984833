// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `oncall docs` subcommands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use oc_client_api::ClientApi;

#[derive(Subcommand, Clone)]
pub enum DocCommands {
    /// Upload a reference document (runbook, architecture notes)
    Upload {
        /// Repository id the document belongs to
        repository_id: i64,
        /// Path to the file to upload
        path: PathBuf,
    },
    /// List documents attached to a repository
    List { repository_id: i64 },
}

impl DocCommands {
    pub async fn run(self, client: &dyn ClientApi) -> Result<()> {
        match self {
            Self::Upload {
                repository_id,
                path,
            } => {
                let filename = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .context("Document path has no file name")?
                    .to_string();
                let content = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;

                let doc = client.upload_document(repository_id, &filename, content).await?;
                println!("Uploaded {} (id {})", doc.filename, doc.id);
                Ok(())
            }
            Self::List { repository_id } => {
                let documents = client.list_documents(repository_id).await?;
                if documents.is_empty() {
                    println!("No documents uploaded.");
                    return Ok(());
                }
                for doc in documents {
                    println!(
                        "{:>6}  {:<40} {}",
                        doc.id,
                        doc.filename,
                        doc.file_type.as_deref().unwrap_or("-")
                    );
                }
                Ok(())
            }
        }
    }
}
