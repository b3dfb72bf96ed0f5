//! Wallet-signed session messages and their verification.
//!
//! # Data Flow
//! ```text
//! incoming JSON envelope
//!     → message.rs (ordered envelope, payload reconstruction)
//!     → verify.rs  (EIP-191 recovery, EIP-1271 fallback, expiry, nonce)
//! ```

pub mod message;
pub mod types;
pub mod verify;

pub use message::SessionMessage;
pub use types::{SessionError, SessionResult};
pub use verify::verify_session;
