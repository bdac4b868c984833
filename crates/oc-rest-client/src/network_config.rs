// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Network configuration types

use serde::{Deserialize, Serialize};

/// Network configuration for reaching the on-call backend.
///
/// The base URL is always injected explicitly; there is no implicit
/// global default baked into the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Backend service base URL
    #[serde(rename = "service-base-url")]
    pub service_base_url: Option<String>,
}

impl NetworkConfig {
    /// Resolve the base URL, preferring the configured value over the
    /// `ONCALL_SERVICE_URL` environment variable.
    pub fn resolve_base_url(&self) -> Option<String> {
        self.service_base_url
            .clone()
            .or_else(|| std::env::var("ONCALL_SERVICE_URL").ok())
    }
}
