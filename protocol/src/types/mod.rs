//! # Wire Types
//!
//! The vocabulary a transaction is built from. Each type mirrors one XDR
//! definition from the ledger's protocol files, and each union is a Rust
//! enum so that encode/decode are exhaustive `match`es rather than a pile of
//! `if type == ...` checks.
//!
//! ```text
//! account.rs     — PublicKey, MuxedAccount
//! memo.rs        — Memo
//! operation.rs   — Operation, OperationBody, Asset
//! time_bounds.rs — TimeBounds
//! signature.rs   — DecoratedSignature
//! ```

pub mod account;
pub mod memo;
pub mod operation;
pub mod signature;
pub mod time_bounds;

use thiserror::Error;

pub use account::{MuxedAccount, PublicKey};
pub use memo::{Memo, MemoText};
pub use operation::{Asset, DataValue, Operation, OperationBody};
pub use signature::DecoratedSignature;
pub use time_bounds::TimeBounds;

/// Rejections from the checked constructors on wire types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("memo text is {len} bytes, maximum is {max}")]
    MemoTooLong { len: usize, max: usize },

    #[error("asset code must be 1 to 12 ASCII alphanumerics, got {0:?}")]
    InvalidAssetCode(String),

    #[error("data entry {what} is {len} bytes, maximum is {max}")]
    DataTooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("time bounds min_time {min_time} is after max_time {max_time}")]
    InvertedTimeBounds { min_time: u64, max_time: u64 },
}
