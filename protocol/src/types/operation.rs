//! Operations and the assets they move.
//!
//! To a transaction an operation is an opaque list element: it is encoded in
//! order, hashed in order and never inspected. The codec still has to know
//! every body's layout to find where one operation ends and the next begins,
//! so this module carries the common subset of operation bodies. Anything
//! else fails to decode with an unknown-discriminant error rather than being
//! skipped.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::account::{MuxedAccount, PublicKey};
use super::TypeError;
use crate::config::{MAX_DATA_NAME_LEN, MAX_DATA_VALUE_LEN};
use crate::xdr::io::{
    get_fixed, get_i32, get_i64, get_opaque, get_option, get_string, put_bytes, put_i32, put_i64,
    put_opaque, put_option, put_string,
};
use crate::xdr::{XdrDecode, XdrEncode, XdrError};

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

const ASSET_TYPE_NATIVE: i32 = 0;
const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;

/// The native lumen or an issued credit asset.
///
/// Asset codes are stored zero-padded to their fixed width, exactly as they
/// appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    Native,
    CreditAlphanum4 { code: [u8; 4], issuer: PublicKey },
    CreditAlphanum12 { code: [u8; 12], issuer: PublicKey },
}

impl Asset {
    /// An issued asset. Codes of 1–4 characters become alphanum4, 5–12
    /// become alphanum12.
    pub fn credit(code: &str, issuer: PublicKey) -> Result<Self, TypeError> {
        if code.is_empty() || code.len() > 12 || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(TypeError::InvalidAssetCode(code.to_string()));
        }
        if code.len() <= 4 {
            let mut padded = [0u8; 4];
            padded[..code.len()].copy_from_slice(code.as_bytes());
            Ok(Self::CreditAlphanum4 {
                code: padded,
                issuer,
            })
        } else {
            let mut padded = [0u8; 12];
            padded[..code.len()].copy_from_slice(code.as_bytes());
            Ok(Self::CreditAlphanum12 {
                code: padded,
                issuer,
            })
        }
    }

    /// The asset code with padding stripped; `"native"` for lumens.
    pub fn code(&self) -> String {
        let raw: &[u8] = match self {
            Self::Native => return "native".to_string(),
            Self::CreditAlphanum4 { code, .. } => code,
            Self::CreditAlphanum12 { code, .. } => code,
        };
        raw.iter()
            .take_while(|b| **b != 0)
            .map(|b| *b as char)
            .collect()
    }
}

impl XdrEncode for Asset {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Native => put_i32(out, ASSET_TYPE_NATIVE),
            Self::CreditAlphanum4 { code, issuer } => {
                put_i32(out, ASSET_TYPE_CREDIT_ALPHANUM4);
                put_bytes(out, code);
                issuer.encode(out);
            }
            Self::CreditAlphanum12 { code, issuer } => {
                put_i32(out, ASSET_TYPE_CREDIT_ALPHANUM12);
                put_bytes(out, code);
                issuer.encode(out);
            }
        }
    }
}

impl XdrDecode for Asset {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        match get_i32(input)? {
            ASSET_TYPE_NATIVE => Ok(Self::Native),
            ASSET_TYPE_CREDIT_ALPHANUM4 => Ok(Self::CreditAlphanum4 {
                code: get_fixed::<4>(input)?,
                issuer: PublicKey::decode(input)?,
            }),
            ASSET_TYPE_CREDIT_ALPHANUM12 => Ok(Self::CreditAlphanum12 {
                code: get_fixed::<12>(input)?,
                issuer: PublicKey::decode(input)?,
            }),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "AssetType",
                value,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// DataValue
// ---------------------------------------------------------------------------

/// Payload of an account data entry (`opaque DataValue<64>`). Hex in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataValue(Vec<u8>);

impl DataValue {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TypeError> {
        let bytes = bytes.into();
        if bytes.len() > MAX_DATA_VALUE_LEN {
            return Err(TypeError::DataTooLong {
                what: "value",
                len: bytes.len(),
                max: MAX_DATA_VALUE_LEN,
            });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl XdrEncode for DataValue {
    fn encode(&self, out: &mut Vec<u8>) {
        put_opaque(out, &self.0);
    }
}

impl XdrDecode for DataValue {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Self(get_opaque(input, MAX_DATA_VALUE_LEN, "data value")?))
    }
}

impl Serialize for DataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for DataValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(text).map_err(serde::de::Error::custom)?;
        Self::new(bytes).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

const CREATE_ACCOUNT: i32 = 0;
const PAYMENT: i32 = 1;
const ACCOUNT_MERGE: i32 = 8;
const INFLATION: i32 = 9;
const MANAGE_DATA: i32 = 10;
const BUMP_SEQUENCE: i32 = 11;

/// The operation-specific part of an [`Operation`]. Amounts are in stroops
/// (1 lumen = 10^7 stroops).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationBody {
    CreateAccount {
        destination: PublicKey,
        starting_balance: i64,
    },
    Payment {
        destination: MuxedAccount,
        asset: Asset,
        amount: i64,
    },
    AccountMerge(MuxedAccount),
    Inflation,
    ManageData {
        name: String,
        value: Option<DataValue>,
    },
    BumpSequence {
        bump_to: i64,
    },
}

/// One step of a transaction. `source_account` overrides the transaction's
/// source for this operation only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub source_account: Option<MuxedAccount>,
    pub body: OperationBody,
}

impl Operation {
    pub fn new(body: OperationBody) -> Self {
        Self {
            source_account: None,
            body,
        }
    }

    pub fn with_source(mut self, source: MuxedAccount) -> Self {
        self.source_account = Some(source);
        self
    }

    pub fn create_account(destination: PublicKey, starting_balance: i64) -> Self {
        Self::new(OperationBody::CreateAccount {
            destination,
            starting_balance,
        })
    }

    pub fn payment(destination: impl Into<MuxedAccount>, asset: Asset, amount: i64) -> Self {
        Self::new(OperationBody::Payment {
            destination: destination.into(),
            asset,
            amount,
        })
    }

    pub fn bump_sequence(bump_to: i64) -> Self {
        Self::new(OperationBody::BumpSequence { bump_to })
    }

    /// Sets (or with `None`, deletes) a data entry on the source account.
    pub fn manage_data(name: &str, value: Option<Vec<u8>>) -> Result<Self, TypeError> {
        if name.is_empty() || name.len() > MAX_DATA_NAME_LEN {
            return Err(TypeError::DataTooLong {
                what: "name",
                len: name.len(),
                max: MAX_DATA_NAME_LEN,
            });
        }
        Ok(Self::new(OperationBody::ManageData {
            name: name.to_string(),
            value: value.map(DataValue::new).transpose()?,
        }))
    }
}

impl XdrEncode for OperationBody {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::CreateAccount {
                destination,
                starting_balance,
            } => {
                put_i32(out, CREATE_ACCOUNT);
                destination.encode(out);
                put_i64(out, *starting_balance);
            }
            Self::Payment {
                destination,
                asset,
                amount,
            } => {
                put_i32(out, PAYMENT);
                destination.encode(out);
                asset.encode(out);
                put_i64(out, *amount);
            }
            Self::AccountMerge(destination) => {
                put_i32(out, ACCOUNT_MERGE);
                destination.encode(out);
            }
            Self::Inflation => put_i32(out, INFLATION),
            Self::ManageData { name, value } => {
                put_i32(out, MANAGE_DATA);
                put_string(out, name);
                // DataValue* is a native optional, not the 0/1 array form.
                put_option(out, value.as_ref());
            }
            Self::BumpSequence { bump_to } => {
                put_i32(out, BUMP_SEQUENCE);
                put_i64(out, *bump_to);
            }
        }
    }
}

impl XdrDecode for OperationBody {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        match get_i32(input)? {
            CREATE_ACCOUNT => Ok(Self::CreateAccount {
                destination: PublicKey::decode(input)?,
                starting_balance: get_i64(input)?,
            }),
            PAYMENT => Ok(Self::Payment {
                destination: MuxedAccount::decode(input)?,
                asset: Asset::decode(input)?,
                amount: get_i64(input)?,
            }),
            ACCOUNT_MERGE => Ok(Self::AccountMerge(MuxedAccount::decode(input)?)),
            INFLATION => Ok(Self::Inflation),
            MANAGE_DATA => Ok(Self::ManageData {
                name: get_string(input, MAX_DATA_NAME_LEN, "data name")?,
                value: get_option(input)?,
            }),
            BUMP_SEQUENCE => Ok(Self::BumpSequence {
                bump_to: get_i64(input)?,
            }),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "OperationType",
                value,
            }),
        }
    }
}

impl XdrEncode for Operation {
    fn encode(&self, out: &mut Vec<u8>) {
        put_option(out, self.source_account.as_ref());
        self.body.encode(out);
    }
}

impl XdrDecode for Operation {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: get_option(input)?,
            body: OperationBody::decode(input)?,
        })
    }
}
