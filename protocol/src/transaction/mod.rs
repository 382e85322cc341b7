//! # Transaction Module
//!
//! Construction, signing and envelope assembly for ledger transactions.
//!
//! ## Architecture
//!
//! ```text
//! builder.rs      — Transaction record, its XDR, and TransactionBuilder
//! signing.rs      — ProtocolVersion, shape selection, signature base, sign()
//! envelope.rs     — TransactionV0, envelope union, to_envelope(), base64 output
//! verification.rs — TransactionError and signature checking
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — [`TransactionBuilder`] or [`Transaction::new`].
//! 2. **Sign** — [`Transaction::sign`] once per signer, or
//!    [`Transaction::add_signature`] for signatures made elsewhere.
//! 3. **Envelope** — [`Transaction::encoded_envelope`] for the base64 that
//!    gets submitted.
//!
//! ## Design Decisions
//!
//! - One private function picks the legacy or current body for a protocol
//!   version. Signing and enveloping both go through it, so a transaction
//!   can never be signed as one generation and shipped as another.
//! - The signature list is append-only and excluded from the body's XDR.
//! - The default protocol version is 12. Targeting 13+ is opt-in.

pub mod builder;
pub mod envelope;
pub mod signing;
pub mod verification;

pub use builder::{Transaction, TransactionBuilder};
pub use envelope::{TransactionEnvelope, TransactionV0, TransactionV0Envelope, TransactionV1Envelope};
pub use signing::ProtocolVersion;
pub use verification::TransactionError;
