//! Account identifiers.
//!
//! Before protocol 13 a transaction source was a bare Ed25519 key. Protocol
//! 13 introduced [`MuxedAccount`], which can additionally carry a 64-bit id
//! so a single on-ledger account can stand in for many virtual ones
//! (exchanges love this).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{
    KEY_TYPE_ED25519, KEY_TYPE_MUXED_ED25519, PUBLIC_KEY_TYPE_ED25519, SIGNATURE_HINT_LENGTH,
};
use crate::xdr::io::{get_fixed, get_i32, get_u64, put_bytes, put_i32, put_u64};
use crate::xdr::{XdrDecode, XdrEncode, XdrError};

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// `PublicKey` / `AccountID` union. Ed25519 is the only arm the network
/// defines today, but the discriminant is on the wire regardless.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicKey {
    Ed25519(#[serde(with = "hex::serde")] [u8; 32]),
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        match self {
            Self::Ed25519(key) => key,
        }
    }

    /// The last four key bytes, used as a decorated signature's hint.
    pub fn hint(&self) -> [u8; SIGNATURE_HINT_LENGTH] {
        let key = self.as_bytes();
        let mut hint = [0u8; SIGNATURE_HINT_LENGTH];
        hint.copy_from_slice(&key[key.len() - SIGNATURE_HINT_LENGTH..]);
        hint
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl XdrEncode for PublicKey {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Ed25519(key) => {
                put_i32(out, PUBLIC_KEY_TYPE_ED25519);
                put_bytes(out, key);
            }
        }
    }
}

impl XdrDecode for PublicKey {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        match get_i32(input)? {
            PUBLIC_KEY_TYPE_ED25519 => Ok(Self::Ed25519(get_fixed::<32>(input)?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "PublicKeyType",
                value,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// MuxedAccount
// ---------------------------------------------------------------------------

/// A source or destination account, optionally multiplexed by an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MuxedAccount {
    /// A plain account key. Wire type `KEY_TYPE_ED25519`.
    Ed25519(#[serde(with = "hex::serde")] [u8; 32]),
    /// A key plus a virtual sub-account id. Wire type `KEY_TYPE_MUXED_ED25519`.
    MuxedEd25519 {
        id: u64,
        #[serde(with = "hex::serde")]
        ed25519: [u8; 32],
    },
}

impl MuxedAccount {
    /// The underlying account key, whichever arm this is.
    pub fn ed25519(&self) -> &[u8; 32] {
        match self {
            Self::Ed25519(key) => key,
            Self::MuxedEd25519 { ed25519, .. } => ed25519,
        }
    }

    /// The multiplexing id, if there is one.
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Ed25519(_) => None,
            Self::MuxedEd25519 { id, .. } => Some(*id),
        }
    }

    /// Downgrades to a pre-protocol-13 account key.
    ///
    /// Only the plain arm converts. An id-bearing account has no lossless
    /// legacy form, so it yields `None` and the caller decides how loudly to
    /// fail.
    pub fn to_public_key(&self) -> Option<PublicKey> {
        match self {
            Self::Ed25519(key) => Some(PublicKey::Ed25519(*key)),
            Self::MuxedEd25519 { .. } => None,
        }
    }
}

impl From<PublicKey> for MuxedAccount {
    fn from(key: PublicKey) -> Self {
        Self::Ed25519(*key.as_bytes())
    }
}

impl XdrEncode for MuxedAccount {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::Ed25519(key) => {
                put_i32(out, KEY_TYPE_ED25519);
                put_bytes(out, key);
            }
            Self::MuxedEd25519 { id, ed25519 } => {
                put_i32(out, KEY_TYPE_MUXED_ED25519);
                put_u64(out, *id);
                put_bytes(out, ed25519);
            }
        }
    }
}

impl XdrDecode for MuxedAccount {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        match get_i32(input)? {
            KEY_TYPE_ED25519 => Ok(Self::Ed25519(get_fixed::<32>(input)?)),
            KEY_TYPE_MUXED_ED25519 => {
                let id = get_u64(input)?;
                let ed25519 = get_fixed::<32>(input)?;
                Ok(Self::MuxedEd25519 { id, ed25519 })
            }
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "CryptoKeyType",
                value,
            }),
        }
    }
}
