//! Wallet session verification and mice asset queries.
//!
//! A thin integration layer over a JSON-RPC node provider:
//!
//! ```text
//! SessionMessage (signed JSON envelope from a wallet)
//!     → provider   (chain registry, Infura connection + handshake)
//!     → session    (EIP-191 recovery, EIP-1271 contract-wallet fallback,
//!                   expiration and nonce checks)
//!     → assets     (read-only contract queries: owned, staked and
//!                   breeding mice)
//! ```
//!
//! # Security Constraints
//! - The Infura API key is read from configuration and never logged
//! - Signature recovery runs over the exact bytes the wallet signed;
//!   field order of the incoming JSON object is preserved end to end
//! - No transaction submission; every contract call is read-only

pub mod assets;
pub mod config;
pub mod observability;
pub mod provider;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use assets::{
    get_adult_mice, get_baby_mice, get_breeding_mice, get_cheeth_grinding_mice, AssetError,
};
pub use config::ProviderConfig;
pub use provider::{ChainId, ProviderError, SessionProvider};
pub use session::{verify_session, SessionError, SessionMessage};
