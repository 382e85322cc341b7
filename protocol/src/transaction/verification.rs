//! Transaction errors and signature checking.
//!
//! This layer never decides whether a transaction is *acceptable* (fees,
//! sequence numbers and thresholds are the validator's business). It can
//! still tell a caller whether the signatures it collected actually verify
//! against a given key, which catches a wrong network or protocol version
//! before submission rather than after.

use thiserror::Error;

use super::builder::Transaction;
use super::signing::ProtocolVersion;
use crate::crypto::keys::SignerError;
use crate::network::Network;
use crate::types::PublicKey;
use crate::xdr::XdrError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from building, signing, enveloping or decoding transactions.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The caller asked for something that cannot be done with this
    /// transaction as it stands: an envelope with no signatures, or a legacy
    /// shape for a muxed source with an id.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Malformed, truncated or unrecognized XDR.
    #[error("malformed XDR: {0}")]
    Decode(#[from] XdrError),

    /// The signer failed. Passed through as-is.
    #[error("signing failed: {0}")]
    Signing(#[from] SignerError),
}

impl TransactionError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

impl Transaction {
    /// Counts the signatures that `key` produced over this transaction's
    /// hash for `network` and `version`.
    ///
    /// Signatures whose hint does not match the key are skipped without
    /// running Ed25519 verification, the same shortcut validators take.
    pub fn verify_signatures(
        &self,
        network: &Network,
        version: ProtocolVersion,
        key: &PublicKey,
    ) -> Result<usize, TransactionError> {
        let hash = self.hash(network, version)?;
        let hint = key.hint();
        Ok(self
            .signatures
            .iter()
            .filter(|sig| sig.hint == hint && key.verify(&hash, &sig.signature))
            .count())
    }
}
