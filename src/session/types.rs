//! Session verification error definitions.

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors that can occur while verifying a session message.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Required fields are absent from the envelope.
    #[error("malformed session, missing: {}", missing.join(", "))]
    MalformedSession { missing: Vec<&'static str> },

    /// Envelope is present but not usable (bad JSON, bad hex, bad address).
    #[error("malformed session message: {0}")]
    Malformed(String),

    /// Recovered signer does not match the claimed address and the
    /// contract-wallet check did not accept the signature either.
    #[error("invalid signature: recovered {recovered}, claimed {claimed}")]
    InvalidSignature { recovered: String, claimed: String },

    /// Message carried an expiration time that has passed.
    #[error("session expired at {expired_at}")]
    Expired { expired_at: String },

    /// Nonce echoed back by validation differs from the input nonce.
    #[error("nonce mismatch between input and verified message")]
    NonceMismatch,

    /// Provider construction or handshake failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Contract-wallet call failed.
    #[error("RPC error: {0}")]
    Rpc(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
