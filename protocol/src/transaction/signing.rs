//! Signature base construction and signing.
//!
//! What gets signed is `SHA-256(networkId ‖ taggedTransaction)`. The tagged
//! part depends on the protocol generation the caller targets:
//!
//! - **< 13**: the legacy `TransactionV0` shape, whose source must be a
//!   plain Ed25519 key. Pre-13 validators hash it as `ENVELOPE_TYPE_TX`
//!   followed by an `AccountID` source, so that is what we emit.
//! - **≥ 13**: the [`Transaction`] itself, muxed source and all, tagged
//!   `ENVELOPE_TYPE_TX`.
//!
//! An `AccountID` and a plain `MuxedAccount` share their bytes, so for a
//! plain-key source both generations produce the same hash. That is what
//! lets a signature collected for a v0 envelope stay valid after the
//! network upgrades. An id-bearing muxed source has no legacy form and is
//! refused rather than silently stripped.

use std::fmt;

use tracing::debug;

use super::builder::Transaction;
use super::envelope::TransactionV0;
use super::verification::TransactionError;
use crate::config::{
    DEFAULT_PROTOCOL_VERSION, ENVELOPE_TYPE_TX, ENVELOPE_TYPE_TX_V0,
    MUXED_ACCOUNTS_PROTOCOL_VERSION,
};
use crate::crypto::hash::sha256;
use crate::crypto::keys::Signer;
use crate::network::Network;
use crate::xdr::io::{put_bytes, put_i32};
use crate::xdr::XdrEncode;

// ---------------------------------------------------------------------------
// ProtocolVersion
// ---------------------------------------------------------------------------

/// The ledger protocol version a transaction is being prepared for.
///
/// Defaults to 12, the last legacy generation. Callers on upgraded networks
/// must ask for 13 or later explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProtocolVersion(pub u32);

impl ProtocolVersion {
    pub const LEGACY: Self = Self(DEFAULT_PROTOCOL_VERSION);
    pub const MUXED_ACCOUNTS: Self = Self(MUXED_ACCOUNTS_PROTOCOL_VERSION);

    /// Whether validators at this version accept v1 envelopes.
    pub fn supports_muxed_accounts(self) -> bool {
        self >= Self::MUXED_ACCOUNTS
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::LEGACY
    }
}

impl From<u32> for ProtocolVersion {
    fn from(version: u32) -> Self {
        Self(version)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Shape selection
// ---------------------------------------------------------------------------

/// The unsigned body a given protocol generation expects.
///
/// Both the signature base and the envelope are derived from this one value,
/// so the bytes that get signed and the bytes that get sent cannot disagree
/// about which generation they target.
#[derive(Debug)]
pub(crate) enum TxShape<'a> {
    Legacy(TransactionV0),
    Current(&'a Transaction),
}

impl TxShape<'_> {
    /// Discriminant of the `TransactionEnvelope` arm carrying this shape.
    pub(crate) fn envelope_type(&self) -> i32 {
        match self {
            Self::Legacy(_) => ENVELOPE_TYPE_TX_V0,
            Self::Current(_) => ENVELOPE_TYPE_TX,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Legacy(_) => "legacy",
            Self::Current(_) => "current",
        }
    }

    /// `TransactionSignaturePayload.taggedTransaction` for this shape.
    fn encode_tagged(&self, out: &mut Vec<u8>) {
        put_i32(out, ENVELOPE_TYPE_TX);
        match self {
            Self::Legacy(tx) => tx.encode_with_account_id(out),
            Self::Current(tx) => tx.encode(out),
        }
    }
}

impl Transaction {
    /// Picks the body shape for `version`.
    ///
    /// # Errors
    ///
    /// [`TransactionError::InvalidArgument`] when a legacy shape is needed
    /// but the source carries a multiplexing id.
    pub(crate) fn shape_for(
        &self,
        version: ProtocolVersion,
    ) -> Result<TxShape<'_>, TransactionError> {
        if version.supports_muxed_accounts() {
            return Ok(TxShape::Current(self));
        }

        let source = self.source_account.to_public_key().ok_or_else(|| {
            TransactionError::invalid_argument(format!(
                "muxed source account with id {} cannot be used with protocol version {}; \
                 protocol {} or later is required",
                self.source_account.id().unwrap_or_default(),
                version,
                ProtocolVersion::MUXED_ACCOUNTS
            ))
        })?;

        Ok(TxShape::Legacy(TransactionV0 {
            source_account_ed25519: *source.as_bytes(),
            fee: self.fee,
            sequence_number: self.sequence_number,
            time_bounds: self.time_bounds,
            memo: self.memo.clone(),
            operations: self.operations.clone(),
            reserved: self.reserved,
        }))
    }

    /// The exact bytes validators hash: `networkId ‖ taggedTransaction`.
    pub fn signature_base(
        &self,
        network: &Network,
        version: ProtocolVersion,
    ) -> Result<Vec<u8>, TransactionError> {
        let shape = self.shape_for(version)?;
        let mut out = Vec::with_capacity(256);
        put_bytes(&mut out, &network.network_id());
        shape.encode_tagged(&mut out);
        Ok(out)
    }

    /// The transaction hash: SHA-256 of the signature base. This is what
    /// Horizon reports as the transaction id.
    pub fn hash(
        &self,
        network: &Network,
        version: ProtocolVersion,
    ) -> Result<[u8; 32], TransactionError> {
        Ok(sha256(&self.signature_base(network, version)?))
    }

    /// Hex form of [`Transaction::hash`].
    pub fn hash_hex(
        &self,
        network: &Network,
        version: ProtocolVersion,
    ) -> Result<String, TransactionError> {
        Ok(hex::encode(self.hash(network, version)?))
    }

    /// Signs the transaction hash and appends the decorated signature.
    ///
    /// Signing never replaces or deduplicates: sign with three keys and you
    /// get three signatures, in that order. Signing twice with the same key
    /// yields two identical entries.
    ///
    /// # Errors
    ///
    /// - [`TransactionError::InvalidArgument`] for an id-bearing muxed source
    ///   below protocol 13.
    /// - [`TransactionError::Signing`] with the signer's own error.
    ///
    /// On error the signature list is left untouched.
    pub fn sign<S: Signer + ?Sized>(
        &mut self,
        signer: &S,
        network: &Network,
        version: ProtocolVersion,
    ) -> Result<(), TransactionError> {
        let hash = self.hash(network, version)?;
        let signature = signer.sign_decorated(&hash)?;
        self.signatures.push(signature);

        debug!(
            protocol_version = version.0,
            network = %network,
            hint = %hex::encode(signer.hint()),
            signatures = self.signatures.len(),
            "signed transaction"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{KeyPair, SignerError};
    use crate::transaction::TransactionBuilder;
    use crate::types::{Asset, MuxedAccount, Operation, PublicKey};
    use crate::xdr::to_xdr;

    fn tx_from(source: impl Into<MuxedAccount>) -> Transaction {
        TransactionBuilder::new(source)
            .sequence_number(1)
            .add_operation(Operation::payment(
                PublicKey::Ed25519([0x42; 32]),
                Asset::Native,
                100,
            ))
            .build()
            .unwrap()
    }

    fn muxed_source() -> MuxedAccount {
        MuxedAccount::MuxedEd25519 {
            id: 420,
            ed25519: [0x17; 32],
        }
    }

    #[test]
    fn default_protocol_version_is_legacy() {
        assert_eq!(ProtocolVersion::default(), ProtocolVersion(12));
        assert!(!ProtocolVersion::default().supports_muxed_accounts());
        assert!(ProtocolVersion(13).supports_muxed_accounts());
        assert!(ProtocolVersion(20).supports_muxed_accounts());
    }

    #[test]
    fn current_base_is_network_id_tag_and_body() {
        let kp = KeyPair::from_seed(&[1; 32]);
        let tx = tx_from(kp.public_key());
        let network = Network::testnet();

        let base = tx.signature_base(&network, ProtocolVersion(13)).unwrap();
        assert_eq!(&base[..32], &network.network_id());
        assert_eq!(&base[32..36], &[0, 0, 0, 2]);
        assert_eq!(&base[36..], to_xdr(&tx).as_slice());
    }

    #[test]
    fn plain_source_hashes_identically_across_generations() {
        let kp = KeyPair::from_seed(&[2; 32]);
        let tx = tx_from(kp.public_key());
        let network = Network::testnet();

        let legacy = tx.signature_base(&network, ProtocolVersion(12)).unwrap();
        let current = tx.signature_base(&network, ProtocolVersion(13)).unwrap();
        assert_eq!(legacy, current);
        assert_eq!(
            tx.hash(&network, ProtocolVersion(12)).unwrap(),
            tx.hash(&network, ProtocolVersion(13)).unwrap()
        );
    }

    #[test]
    fn muxed_source_is_refused_below_13() {
        let tx = tx_from(muxed_source());
        let err = tx
            .signature_base(&Network::testnet(), ProtocolVersion(12))
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument { .. }));
        assert!(tx
            .signature_base(&Network::testnet(), ProtocolVersion(13))
            .is_ok());
    }

    #[test]
    fn network_changes_the_hash() {
        let tx = tx_from(PublicKey::Ed25519([3; 32]));
        let v = ProtocolVersion(13);
        assert_ne!(
            tx.hash(&Network::testnet(), v).unwrap(),
            tx.hash(&Network::public(), v).unwrap()
        );
    }

    #[test]
    fn shape_matches_envelope_type() {
        let tx = tx_from(PublicKey::Ed25519([3; 32]));
        let legacy = tx.shape_for(ProtocolVersion(12)).unwrap();
        let current = tx.shape_for(ProtocolVersion(13)).unwrap();
        assert_eq!(legacy.envelope_type(), ENVELOPE_TYPE_TX_V0);
        assert_eq!(current.envelope_type(), ENVELOPE_TYPE_TX);
        assert_eq!(legacy.name(), "legacy");
        assert_eq!(current.name(), "current");
    }

    #[test]
    fn sign_appends_a_verifiable_signature() {
        let kp = KeyPair::generate();
        let mut tx = tx_from(kp.public_key());
        let network = Network::testnet();

        tx.sign(&kp, &network, ProtocolVersion(13)).unwrap();
        assert_eq!(tx.signatures().len(), 1);

        let sig = &tx.signatures()[0];
        let hash = tx.hash(&network, ProtocolVersion(13)).unwrap();
        assert_eq!(sig.hint, kp.public_key().hint());
        assert!(kp.verify(&hash, &sig.signature));
    }

    #[test]
    fn signing_twice_with_one_key_keeps_both() {
        let kp = KeyPair::generate();
        let mut tx = tx_from(kp.public_key());
        let network = Network::testnet();
        tx.sign(&kp, &network, ProtocolVersion::default()).unwrap();
        tx.sign(&kp, &network, ProtocolVersion::default()).unwrap();
        assert_eq!(tx.signatures().len(), 2);
        assert_eq!(tx.signatures()[0], tx.signatures()[1]);
    }

    #[test]
    fn failed_downgrade_leaves_signatures_untouched() {
        let kp = KeyPair::generate();
        let mut tx = tx_from(muxed_source());
        assert!(tx
            .sign(&kp, &Network::testnet(), ProtocolVersion(12))
            .is_err());
        assert!(tx.signatures().is_empty());
    }

    struct UnpluggedSigner;

    impl Signer for UnpluggedSigner {
        fn public_key(&self) -> PublicKey {
            PublicKey::Ed25519([0; 32])
        }

        fn sign_raw(&self, _message: &[u8]) -> Result<Vec<u8>, SignerError> {
            Err(SignerError::Unavailable("device not connected".into()))
        }
    }

    #[test]
    fn signer_errors_propagate_unchanged() {
        let mut tx = tx_from(PublicKey::Ed25519([5; 32]));
        let err = tx
            .sign(&UnpluggedSigner, &Network::testnet(), ProtocolVersion(13))
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Signing(SignerError::Unavailable(ref m)) if m == "device not connected"
        ));
        assert!(tx.signatures().is_empty());
    }
}
