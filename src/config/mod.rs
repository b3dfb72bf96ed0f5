//! Provider configuration.
//!
//! # Design Decisions
//! - Configuration is an explicit struct handed to each operation, not
//!   process-global state
//! - The Infura key is redacted from `Debug` output and never logged

use serde::{Deserialize, Serialize};

use crate::provider::ProviderError;

/// Environment variable holding the Infura API key.
pub const INFURA_KEY_ENV_VAR: &str = "INFURA_KEY";

/// Environment variable holding the Origin header value.
pub const ORIGIN_ENV_VAR: &str = "SESSION_ORIGIN";

/// Settings for building RPC provider connections.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Infura API key, appended as the last URL segment.
    pub infura_key: String,

    /// Value sent as the `Origin` header on every RPC request.
    pub origin: String,

    /// Per-RPC-call timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Full RPC endpoint replacing the per-chain Infura URL (self-hosted
    /// nodes, local test nodes). The chain handshake still runs against it.
    pub endpoint_override: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            infura_key: String::new(),
            origin: "http://localhost".to_string(),
            rpc_timeout_secs: 10,
            endpoint_override: None,
        }
    }
}

impl ProviderConfig {
    /// Create a configuration with the default timeout.
    pub fn new(infura_key: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            infura_key: infura_key.into(),
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `INFURA_KEY` (required) and `SESSION_ORIGIN` (optional,
    /// defaults to `http://localhost`).
    pub fn from_env() -> Result<Self, ProviderError> {
        let infura_key = std::env::var(INFURA_KEY_ENV_VAR).map_err(|_| {
            ProviderError::Config(format!(
                "environment variable {} not set",
                INFURA_KEY_ENV_VAR
            ))
        })?;

        let origin =
            std::env::var(ORIGIN_ENV_VAR).unwrap_or_else(|_| Self::default().origin);
        Ok(Self::new(infura_key, origin))
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("infura_key", &"<redacted>")
            .field("origin", &self.origin)
            .field("rpc_timeout_secs", &self.rpc_timeout_secs)
            .field("endpoint_override", &self.endpoint_override)
            .finish()
    }
}
