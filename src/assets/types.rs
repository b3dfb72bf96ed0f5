//! Asset query error definitions.

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors that can occur during asset queries.
///
/// Queries return a tagged result so callers can tell "no assets" apart from
/// "query failed".
#[derive(Debug, Error)]
pub enum AssetError {
    /// Provider construction or handshake failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Contract call failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Holder address missing or not parseable.
    #[error("invalid holder address: {0}")]
    InvalidAddress(String),

    /// Envelope unusable for a query (for example a missing chain id).
    #[error("malformed message: {0}")]
    Malformed(String),

    /// A returned token value does not fit a u64.
    #[error("token value out of range: {0}")]
    ValueOutOfRange(String),
}

/// Result type for asset queries.
pub type AssetResult<T> = Result<T, AssetError>;
