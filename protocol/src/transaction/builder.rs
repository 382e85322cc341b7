//! The unsigned transaction record and its builder.
//!
//! A [`Transaction`] is the body validators hash, plus the list of
//! signatures collected over that hash. The signature list rides along with
//! the record but is never part of its XDR: signing covers the body only,
//! and the envelope serializes signatures separately.

use serde::Serialize;
use tracing::debug;

use super::verification::TransactionError;
use crate::config::BASE_FEE;
use crate::types::{DecoratedSignature, Memo, MuxedAccount, Operation, TimeBounds};
use crate::xdr::io::{
    get_array, get_i32, get_i64, get_optional_array, get_u32, put_array, put_i32, put_i64,
    put_optional_array, put_u32,
};
use crate::xdr::{self, XdrDecode, XdrEncode, XdrError};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A ledger transaction as validators see it from protocol 13 on.
///
/// # Canonical Byte Format
///
/// `MuxedAccount source ‖ uint32 fee ‖ int64 seqNum ‖ TimeBounds<1> ‖
/// Memo ‖ Operation<> ‖ int32 reserved`. Time bounds travel as a zero- or
/// one-element array, which on the wire is indistinguishable from the XDR
/// optional the protocol files declare. Signatures are excluded.
///
/// Fields are private: the body is fixed once built, and the signature list
/// only ever grows through [`Transaction::sign`] and
/// [`Transaction::add_signature`]. Records from elsewhere come in through
/// XDR ([`Transaction::from_base64`], [`Transaction::from_envelope`]); the
/// serde impl is output-only:
///
/// ```compile_fail
/// let tx: stellar_envelope::transaction::Transaction =
///     serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub(super) source_account: MuxedAccount,
    pub(super) fee: u32,
    pub(super) sequence_number: i64,
    pub(super) time_bounds: Option<TimeBounds>,
    pub(super) memo: Memo,
    pub(super) operations: Vec<Operation>,
    /// The `ext` union arm. Always zero today.
    pub(super) reserved: i32,
    /// Envelope JSON already lists these next to the body.
    #[serde(skip)]
    pub(super) signatures: Vec<DecoratedSignature>,
}

impl Transaction {
    /// Builds an unsigned transaction.
    ///
    /// `fee = max_operation_fee × operations.len()`, with the ceiling
    /// defaulting to [`BASE_FEE`]. No operations means a zero fee; the
    /// network will reject that, but this layer does not second-guess it.
    ///
    /// # Errors
    ///
    /// [`TransactionError::InvalidArgument`] if the fee does not fit in a
    /// `u32`.
    pub fn new(
        source_account: impl Into<MuxedAccount>,
        sequence_number: i64,
        time_bounds: Option<TimeBounds>,
        memo: Memo,
        operations: Vec<Operation>,
        max_operation_fee: Option<u32>,
    ) -> Result<Self, TransactionError> {
        let per_op = max_operation_fee.unwrap_or(BASE_FEE);
        let fee = u32::try_from(operations.len())
            .ok()
            .and_then(|count| per_op.checked_mul(count))
            .ok_or_else(|| {
                TransactionError::invalid_argument(format!(
                    "fee of {} per operation for {} operations overflows u32",
                    per_op,
                    operations.len()
                ))
            })?;

        Ok(Self {
            source_account: source_account.into(),
            fee,
            sequence_number,
            time_bounds,
            memo,
            operations,
            reserved: 0,
            signatures: Vec::new(),
        })
    }

    pub fn source_account(&self) -> &MuxedAccount {
        &self.source_account
    }

    /// Total fee in stroops.
    pub fn fee(&self) -> u32 {
        self.fee
    }

    pub fn sequence_number(&self) -> i64 {
        self.sequence_number
    }

    pub fn time_bounds(&self) -> Option<&TimeBounds> {
        self.time_bounds.as_ref()
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn reserved(&self) -> i32 {
        self.reserved
    }

    /// Signatures in the order they were added.
    pub fn signatures(&self) -> &[DecoratedSignature] {
        &self.signatures
    }

    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty()
    }

    /// Appends a signature produced elsewhere (hardware wallet, co-signer).
    ///
    /// Nothing is checked: whether the signature is any good is the
    /// validator's call. Duplicates are kept.
    pub fn add_signature(&mut self, signature: DecoratedSignature) {
        self.signatures.push(signature);
        debug!(
            signatures = self.signatures.len(),
            "appended external signature"
        );
    }

    /// Base64 of the unsigned body, for handing to co-signers.
    pub fn encoded_transaction(&self) -> String {
        xdr::to_base64(self)
    }

    /// Parses an unsigned body. The result carries no signatures.
    pub fn from_base64(text: &str) -> Result<Self, TransactionError> {
        Ok(xdr::from_base64(text)?)
    }

    /// A copy of the body with the signature list dropped.
    pub(super) fn without_signatures(&self) -> Self {
        Self {
            signatures: Vec::new(),
            ..self.clone()
        }
    }
}

impl XdrEncode for Transaction {
    fn encode(&self, out: &mut Vec<u8>) {
        self.source_account.encode(out);
        put_u32(out, self.fee);
        put_i64(out, self.sequence_number);
        put_optional_array(out, self.time_bounds.as_ref());
        self.memo.encode(out);
        put_array(out, &self.operations);
        put_i32(out, self.reserved);
    }
}

impl XdrDecode for Transaction {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: MuxedAccount::decode(input)?,
            fee: get_u32(input)?,
            sequence_number: get_i64(input)?,
            time_bounds: get_optional_array(input)?,
            memo: Memo::decode(input)?,
            operations: get_array(input)?,
            reserved: get_i32(input)?,
            signatures: Vec::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent construction of an unsigned [`Transaction`].
///
/// ```
/// use stellar_envelope::crypto::KeyPair;
/// use stellar_envelope::transaction::TransactionBuilder;
/// use stellar_envelope::types::{Asset, Memo, Operation};
///
/// let source = KeyPair::from_seed(&[1u8; 32]).public_key();
/// let dest = KeyPair::from_seed(&[2u8; 32]).public_key();
///
/// let tx = TransactionBuilder::new(source)
///     .sequence_number(42)
///     .memo(Memo::Id(7))
///     .add_operation(Operation::payment(dest, Asset::Native, 10_000_000))
///     .build()
///     .unwrap();
///
/// assert_eq!(tx.fee(), 100);
/// ```
pub struct TransactionBuilder {
    source_account: MuxedAccount,
    sequence_number: i64,
    time_bounds: Option<TimeBounds>,
    memo: Memo,
    operations: Vec<Operation>,
    max_operation_fee: Option<u32>,
}

impl TransactionBuilder {
    /// Defaults: sequence 0, no time bounds, no memo, no operations, and the
    /// network base fee per operation.
    pub fn new(source_account: impl Into<MuxedAccount>) -> Self {
        Self {
            source_account: source_account.into(),
            sequence_number: 0,
            time_bounds: None,
            memo: Memo::None,
            operations: Vec::new(),
            max_operation_fee: None,
        }
    }

    /// The sequence number this transaction consumes (account seq + 1).
    pub fn sequence_number(mut self, sequence_number: i64) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    pub fn time_bounds(mut self, time_bounds: TimeBounds) -> Self {
        self.time_bounds = Some(time_bounds);
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn add_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Per-operation fee ceiling in stroops.
    pub fn max_operation_fee(mut self, fee: u32) -> Self {
        self.max_operation_fee = Some(fee);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        Transaction::new(
            self.source_account,
            self.sequence_number,
            self.time_bounds,
            self.memo,
            self.operations,
            self.max_operation_fee,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
