//! Envelope assembly.
//!
//! An envelope is what actually goes over the wire: an unsigned body plus
//! the signatures collected over its hash. Protocol 13 changed the body, so
//! the envelope is a union with one arm per generation:
//!
//! ```text
//! ENVELOPE_TYPE_TX_V0 (0) → TransactionV0Envelope { TransactionV0, sigs }
//! ENVELOPE_TYPE_TX    (2) → TransactionV1Envelope { Transaction,   sigs }
//! ```

use serde::Serialize;
use tracing::debug;

use super::builder::Transaction;
use super::signing::{ProtocolVersion, TxShape};
use super::verification::TransactionError;
use crate::config::{ENVELOPE_TYPE_TX, ENVELOPE_TYPE_TX_V0, PUBLIC_KEY_TYPE_ED25519};
use crate::types::{DecoratedSignature, Memo, MuxedAccount, Operation, TimeBounds};
use crate::xdr::io::{
    get_array, get_fixed, get_i32, get_i64, get_optional_array, get_u32, put_array, put_bytes,
    put_i32, put_i64, put_optional_array, put_u32,
};
use crate::xdr::{self, XdrDecode, XdrEncode, XdrError};

// ---------------------------------------------------------------------------
// TransactionV0
// ---------------------------------------------------------------------------

/// The pre-protocol-13 transaction body. Identical to [`Transaction`]
/// except that the source is a bare 32-byte key with no type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionV0 {
    #[serde(with = "hex::serde")]
    pub source_account_ed25519: [u8; 32],
    pub fee: u32,
    pub sequence_number: i64,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Vec<Operation>,
    pub reserved: i32,
}

impl TransactionV0 {
    /// Everything after the source account.
    fn encode_tail(&self, out: &mut Vec<u8>) {
        put_u32(out, self.fee);
        put_i64(out, self.sequence_number);
        put_optional_array(out, self.time_bounds.as_ref());
        self.memo.encode(out);
        put_array(out, &self.operations);
        put_i32(out, self.reserved);
    }

    /// The form legacy validators hash: the source written as an
    /// `AccountID` (type tag + key) rather than a bare key.
    pub(crate) fn encode_with_account_id(&self, out: &mut Vec<u8>) {
        put_i32(out, PUBLIC_KEY_TYPE_ED25519);
        put_bytes(out, &self.source_account_ed25519);
        self.encode_tail(out);
    }
}

impl XdrEncode for TransactionV0 {
    fn encode(&self, out: &mut Vec<u8>) {
        put_bytes(out, &self.source_account_ed25519);
        self.encode_tail(out);
    }
}

impl XdrDecode for TransactionV0 {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Self {
            source_account_ed25519: get_fixed::<32>(input)?,
            fee: get_u32(input)?,
            sequence_number: get_i64(input)?,
            time_bounds: get_optional_array(input)?,
            memo: Memo::decode(input)?,
            operations: get_array(input)?,
            reserved: get_i32(input)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionV0Envelope {
    pub tx: TransactionV0,
    pub signatures: Vec<DecoratedSignature>,
}

/// `tx` never carries signatures of its own; they live in `signatures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionV1Envelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

/// A signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransactionEnvelope {
    V0(TransactionV0Envelope),
    V1(TransactionV1Envelope),
}

impl TransactionEnvelope {
    /// The XDR `EnvelopeType` discriminant of this arm.
    pub fn envelope_type(&self) -> i32 {
        match self {
            Self::V0(_) => ENVELOPE_TYPE_TX_V0,
            Self::V1(_) => ENVELOPE_TYPE_TX,
        }
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        match self {
            Self::V0(env) => &env.signatures,
            Self::V1(env) => &env.signatures,
        }
    }

    pub fn to_base64(&self) -> String {
        xdr::to_base64(self)
    }

    pub fn from_base64(text: &str) -> Result<Self, TransactionError> {
        Ok(xdr::from_base64(text)?)
    }
}

impl XdrEncode for TransactionV0Envelope {
    fn encode(&self, out: &mut Vec<u8>) {
        self.tx.encode(out);
        put_array(out, &self.signatures);
    }
}

impl XdrDecode for TransactionV0Envelope {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Self {
            tx: TransactionV0::decode(input)?,
            signatures: get_array(input)?,
        })
    }
}

impl XdrEncode for TransactionV1Envelope {
    fn encode(&self, out: &mut Vec<u8>) {
        self.tx.encode(out);
        put_array(out, &self.signatures);
    }
}

impl XdrDecode for TransactionV1Envelope {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Self {
            tx: Transaction::decode(input)?,
            signatures: get_array(input)?,
        })
    }
}

impl XdrEncode for TransactionEnvelope {
    fn encode(&self, out: &mut Vec<u8>) {
        put_i32(out, self.envelope_type());
        match self {
            Self::V0(env) => env.encode(out),
            Self::V1(env) => env.encode(out),
        }
    }
}

impl XdrDecode for TransactionEnvelope {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        match get_i32(input)? {
            ENVELOPE_TYPE_TX_V0 => Ok(Self::V0(TransactionV0Envelope::decode(input)?)),
            ENVELOPE_TYPE_TX => Ok(Self::V1(TransactionV1Envelope::decode(input)?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "EnvelopeType",
                value,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

impl Transaction {
    fn require_signatures(&self) -> Result<(), TransactionError> {
        if self.signatures.is_empty() {
            return Err(TransactionError::invalid_argument(
                "transaction must be signed by at least one signer; use Transaction::sign",
            ));
        }
        Ok(())
    }

    /// Wraps the body and its signatures in the envelope arm `version`
    /// expects.
    ///
    /// # Errors
    ///
    /// [`TransactionError::InvalidArgument`] if nothing has signed yet, or
    /// if a legacy envelope is requested for an id-bearing muxed source.
    pub fn to_envelope(
        &self,
        version: ProtocolVersion,
    ) -> Result<TransactionEnvelope, TransactionError> {
        self.require_signatures()?;

        let shape = self.shape_for(version)?;
        debug!(
            protocol_version = version.0,
            shape = shape.name(),
            envelope_type = shape.envelope_type(),
            signatures = self.signatures.len(),
            "assembling envelope"
        );

        let signatures = self.signatures.clone();
        Ok(match shape {
            TxShape::Legacy(tx) => TransactionEnvelope::V0(TransactionV0Envelope { tx, signatures }),
            TxShape::Current(tx) => TransactionEnvelope::V1(TransactionV1Envelope {
                tx: tx.without_signatures(),
                signatures,
            }),
        })
    }

    /// The v1 envelope regardless of protocol version, for callers that only
    /// ever talk to upgraded networks.
    pub fn to_envelope_v1(&self) -> Result<TransactionV1Envelope, TransactionError> {
        self.require_signatures()?;
        Ok(TransactionV1Envelope {
            tx: self.without_signatures(),
            signatures: self.signatures.clone(),
        })
    }

    /// Base64 XDR of [`Transaction::to_envelope`]; the submission format.
    pub fn encoded_envelope(&self, version: ProtocolVersion) -> Result<String, TransactionError> {
        Ok(self.to_envelope(version)?.to_base64())
    }

    /// Base64 XDR of a v1 `TransactionEnvelope` (tag included).
    pub fn encoded_v1_envelope(&self) -> Result<String, TransactionError> {
        let envelope = TransactionEnvelope::V1(self.to_envelope_v1()?);
        Ok(envelope.to_base64())
    }

    /// Recovers a transaction and its signatures from either envelope arm.
    /// A legacy source becomes a plain muxed account.
    pub fn from_envelope(envelope: TransactionEnvelope) -> Self {
        match envelope {
            TransactionEnvelope::V0(env) => Self {
                source_account: MuxedAccount::Ed25519(env.tx.source_account_ed25519),
                fee: env.tx.fee,
                sequence_number: env.tx.sequence_number,
                time_bounds: env.tx.time_bounds,
                memo: env.tx.memo,
                operations: env.tx.operations,
                reserved: env.tx.reserved,
                signatures: env.signatures,
            },
            TransactionEnvelope::V1(env) => Self {
                signatures: env.signatures,
                ..env.tx
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::network::Network;
    use crate::transaction::TransactionBuilder;
    use crate::types::{Asset, PublicKey};
    use crate::xdr::{from_xdr, to_xdr};

    fn signed_tx(source: impl Into<MuxedAccount>, kp: &KeyPair, version: u32) -> Transaction {
        let mut tx = TransactionBuilder::new(source)
            .sequence_number(7)
            .memo(Memo::Id(1))
            .add_operation(Operation::payment(
                PublicKey::Ed25519([0x42; 32]),
                Asset::Native,
                1,
            ))
            .build()
            .unwrap();
        tx.sign(kp, &Network::testnet(), ProtocolVersion(version))
            .unwrap();
        tx
    }

    #[test]
    fn unsigned_transaction_has_no_envelope() {
        let tx = TransactionBuilder::new(PublicKey::Ed25519([1; 32]))
            .build()
            .unwrap();
        for version in [0, 12, 13, 21] {
            assert!(matches!(
                tx.to_envelope(ProtocolVersion(version)),
                Err(TransactionError::InvalidArgument { .. })
            ));
        }
        assert!(tx.to_envelope_v1().is_err());
        assert!(tx.encoded_envelope(ProtocolVersion(13)).is_err());
        assert!(tx.encoded_v1_envelope().is_err());
    }

    #[test]
    fn legacy_version_produces_v0_envelope() {
        let kp = KeyPair::generate();
        let tx = signed_tx(kp.public_key(), &kp, 12);
        let env = tx.to_envelope(ProtocolVersion(12)).unwrap();

        assert_eq!(env.envelope_type(), ENVELOPE_TYPE_TX_V0);
        let TransactionEnvelope::V0(v0) = &env else {
            panic!("expected a v0 envelope");
        };
        assert_eq!(&v0.tx.source_account_ed25519, kp.public_key().as_bytes());
        assert_eq!(v0.signatures, tx.signatures());

        // tag, then the bare key with no key-type prefix
        let bytes = to_xdr(&env);
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..36], kp.public_key().as_bytes());
    }

    #[test]
    fn current_version_produces_v1_envelope() {
        let kp = KeyPair::generate();
        let tx = signed_tx(kp.public_key(), &kp, 13);
        let env = tx.to_envelope(ProtocolVersion(13)).unwrap();

        assert_eq!(env.envelope_type(), ENVELOPE_TYPE_TX);
        let bytes = to_xdr(&env);
        assert_eq!(&bytes[..4], &[0, 0, 0, 2]);
        let body = to_xdr(&tx);
        assert_eq!(&bytes[4..4 + body.len()], body.as_slice());
    }

    #[test]
    fn muxed_source_envelope_needs_protocol_13() {
        let kp = KeyPair::generate();
        let muxed = MuxedAccount::MuxedEd25519 {
            id: 9,
            ed25519: *kp.public_key().as_bytes(),
        };
        let tx = signed_tx(muxed, &kp, 13);
        assert!(matches!(
            tx.to_envelope(ProtocolVersion(12)),
            Err(TransactionError::InvalidArgument { .. })
        ));
        assert!(tx.to_envelope(ProtocolVersion(13)).is_ok());
        assert!(tx.to_envelope_v1().is_ok());
    }

    #[test]
    fn envelope_decode_inverts_encode() {
        let kp = KeyPair::generate();
        let tx = signed_tx(kp.public_key(), &kp, 12);
        for version in [12, 13] {
            let env = tx.to_envelope(ProtocolVersion(version)).unwrap();
            assert_eq!(from_xdr::<TransactionEnvelope>(&to_xdr(&env)).unwrap(), env);
        }
    }

    #[test]
    fn from_envelope_recovers_record_and_signatures() {
        let kp = KeyPair::generate();
        let tx = signed_tx(kp.public_key(), &kp, 12);
        for version in [12, 13] {
            let text = tx.encoded_envelope(ProtocolVersion(version)).unwrap();
            let env = TransactionEnvelope::from_base64(&text).unwrap();
            assert_eq!(Transaction::from_envelope(env), tx);
        }
    }

    #[test]
    fn v1_envelope_ignores_protocol_version() {
        let kp = KeyPair::generate();
        let tx = signed_tx(kp.public_key(), &kp, 12);
        let text = tx.encoded_v1_envelope().unwrap();
        assert_eq!(text, tx.encoded_envelope(ProtocolVersion(13)).unwrap());
    }

    #[test]
    fn unknown_envelope_type_is_rejected() {
        assert!(matches!(
            from_xdr::<TransactionEnvelope>(&[0, 0, 0, 5]),
            Err(XdrError::UnknownDiscriminant {
                type_name: "EnvelopeType",
                value: 5
            })
        ));
    }

    #[test]
    fn envelope_json_lists_signatures_once() {
        let kp = KeyPair::from_seed(&[4; 32]);
        let tx = signed_tx(kp.public_key(), &kp, 13);
        let json = serde_json::to_value(tx.to_envelope(ProtocolVersion(13)).unwrap()).unwrap();

        assert_eq!(json["V1"]["signatures"].as_array().map(Vec::len), Some(1));
        assert!(json["V1"]["tx"].get("signatures").is_none());
    }
}
