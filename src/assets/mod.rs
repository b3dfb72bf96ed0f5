//! Read-only asset queries against the mice contracts.
//!
//! # Data Flow
//! ```text
//! SessionMessage (holder address + chain id)
//!     → contracts.rs (fixed addresses, sol! bindings)
//!     → queries.rs   (one contract read per operation, mapped to token IDs)
//! ```

pub mod contracts;
pub mod queries;
pub mod types;

pub use queries::{get_adult_mice, get_baby_mice, get_breeding_mice, get_cheeth_grinding_mice};
pub use types::{AssetError, AssetResult};
