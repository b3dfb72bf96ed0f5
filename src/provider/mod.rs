//! RPC provider construction with chain registry and readiness handshake.
//!
//! # Responsibilities
//! - Map supported chain IDs to their Infura endpoints
//! - Build an HTTP JSON-RPC client with explicit headers and compression
//! - Verify connectivity and chain identity before handing the provider out

use std::time::Duration;

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::transports::http::Http;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, ORIGIN};
use thiserror::Error;
use tokio::time::timeout;
use url::Url;

use crate::config::ProviderConfig;

/// Errors that can occur while building or probing a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Chain ID has no known RPC endpoint.
    #[error("unsupported chain id: {0}")]
    UnsupportedChain(u64),

    /// Invalid or missing configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Endpoint URL could not be constructed.
    #[error("invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Endpoint answered for a different chain.
    #[error("chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Supported chains, each with a fixed Infura base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainId {
    Mainnet,
    Ropsten,
    Rinkeby,
    Goerli,
    Polygon,
}

impl ChainId {
    /// Resolve a numeric chain ID, rejecting anything outside the registry.
    pub fn from_id(id: u64) -> ProviderResult<Self> {
        match id {
            1 => Ok(Self::Mainnet),
            3 => Ok(Self::Ropsten),
            4 => Ok(Self::Rinkeby),
            5 => Ok(Self::Goerli),
            137 => Ok(Self::Polygon),
            other => Err(ProviderError::UnsupportedChain(other)),
        }
    }

    /// Numeric chain ID.
    pub fn id(self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Ropsten => 3,
            Self::Rinkeby => 4,
            Self::Goerli => 5,
            Self::Polygon => 137,
        }
    }

    /// Infura endpoint base, without the trailing API-key segment.
    pub fn infura_base_url(self) -> &'static str {
        match self {
            Self::Mainnet => "https://mainnet.infura.io/v3",
            Self::Ropsten => "https://ropsten.infura.io/v3",
            Self::Rinkeby => "https://rinkeby.infura.io/v3",
            Self::Goerli => "https://goerli.infura.io/v3",
            Self::Polygon => "https://polygon-mainnet.infura.io/v3",
        }
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Mainnet => "mainnet",
            Self::Ropsten => "ropsten",
            Self::Rinkeby => "rinkeby",
            Self::Goerli => "goerli",
            Self::Polygon => "polygon",
        };
        write!(f, "{} ({})", name, self.id())
    }
}

/// A chain-bound, handshake-verified RPC connection.
///
/// One provider is built per verification or query call; its lifetime is the
/// duration of that call.
pub struct SessionProvider {
    inner: DynProvider,
    chain: ChainId,
    timeout_duration: Duration,
}

impl SessionProvider {
    /// Connect to the Infura endpoint for `chain` and verify it is reachable
    /// and answering for the expected chain.
    pub async fn connect(chain: ChainId, config: &ProviderConfig) -> ProviderResult<Self> {
        let endpoint = match &config.endpoint_override {
            Some(endpoint) => endpoint.clone(),
            None => format!("{}/{}", chain.infura_base_url(), config.infura_key),
        };
        let url: Url = endpoint
            .parse()
            .map_err(|e| ProviderError::InvalidUrl(format!("{}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            ORIGIN,
            HeaderValue::from_str(&config.origin)
                .map_err(|e| ProviderError::Config(format!("invalid origin header: {}", e)))?,
        );
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .map_err(|e| ProviderError::Config(format!("HTTP client: {}", e)))?;

        let transport = Http::with_client(http_client, url);
        let rpc_client = RpcClient::new(transport, false);
        let provider = ProviderBuilder::new().connect_client(rpc_client).erased();

        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let session = Self {
            inner: provider,
            chain,
            timeout_duration,
        };

        // Readiness handshake: one eth_chainId round trip. Note the endpoint
        // URL carries the API key and must not be logged.
        let reported = session.handshake().await?;
        if reported != chain.id() {
            return Err(ProviderError::ChainMismatch {
                expected: chain.id(),
                actual: reported,
            });
        }

        tracing::debug!(chain = %chain, "provider connected");
        Ok(session)
    }

    async fn handshake(&self) -> ProviderResult<u64> {
        let fut = self.inner.get_chain_id();
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(e)) => {
                tracing::warn!(chain = %self.chain, error = %e, "provider handshake failed");
                Err(ProviderError::Rpc(e.to_string()))
            }
            Err(_) => Err(ProviderError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// The underlying alloy provider.
    pub fn provider(&self) -> &DynProvider {
        &self.inner
    }

    /// Chain this provider is bound to.
    pub fn chain(&self) -> ChainId {
        self.chain
    }
}

impl std::fmt::Debug for SessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionProvider")
            .field("chain", &self.chain)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
