//! Transaction memos.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::TypeError;
use crate::config::MAX_MEMO_TEXT_LEN;
use crate::xdr::io::{get_fixed, get_i32, get_opaque, get_u64, put_bytes, put_i32, put_opaque, put_u64};
use crate::xdr::{XdrDecode, XdrEncode, XdrError};

const MEMO_NONE: i32 = 0;
const MEMO_TEXT: i32 = 1;
const MEMO_ID: i32 = 2;
const MEMO_HASH: i32 = 3;
const MEMO_RETURN: i32 = 4;

/// At most 28 bytes of memo text.
///
/// The wire type is an XDR `string<28>`, which is raw bytes: wallets do put
/// non-UTF-8 data there, so the bytes are kept as they arrived and only
/// rendered lossily for display and JSON.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct MemoText(Vec<u8>);

impl MemoText {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TypeError> {
        let bytes = bytes.into();
        if bytes.len() > MAX_MEMO_TEXT_LEN {
            return Err(TypeError::MemoTooLong {
                len: bytes.len(),
                max: MAX_MEMO_TEXT_LEN,
            });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Debug for MemoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl Serialize for MemoText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

impl<'de> Deserialize<'de> for MemoText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::new(text).map_err(serde::de::Error::custom)
    }
}

/// Free-form data attached to a transaction. Exchanges use it to route
/// deposits; the ledger itself never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Memo {
    #[default]
    None,
    Text(MemoText),
    Id(u64),
    Hash(#[serde(with = "hex::serde")] [u8; 32]),
    Return(#[serde(with = "hex::serde")] [u8; 32]),
}

impl Memo {
    /// A text memo of at most 28 bytes (bytes, not characters).
    pub fn text(text: impl Into<String>) -> Result<Self, TypeError> {
        Ok(Self::Text(MemoText::new(text.into())?))
    }
}

impl XdrEncode for Memo {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            Self::None => put_i32(out, MEMO_NONE),
            Self::Text(text) => {
                put_i32(out, MEMO_TEXT);
                put_opaque(out, text.as_bytes());
            }
            Self::Id(id) => {
                put_i32(out, MEMO_ID);
                put_u64(out, *id);
            }
            Self::Hash(hash) => {
                put_i32(out, MEMO_HASH);
                put_bytes(out, hash);
            }
            Self::Return(hash) => {
                put_i32(out, MEMO_RETURN);
                put_bytes(out, hash);
            }
        }
    }
}

impl XdrDecode for Memo {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        match get_i32(input)? {
            MEMO_NONE => Ok(Self::None),
            MEMO_TEXT => Ok(Self::Text(MemoText(get_opaque(
                input,
                MAX_MEMO_TEXT_LEN,
                "memo text",
            )?))),
            MEMO_ID => Ok(Self::Id(get_u64(input)?)),
            MEMO_HASH => Ok(Self::Hash(get_fixed::<32>(input)?)),
            MEMO_RETURN => Ok(Self::Return(get_fixed::<32>(input)?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "MemoType",
                value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{from_xdr, to_xdr};

    #[test]
    fn none_is_just_the_discriminant() {
        assert_eq!(to_xdr(&Memo::None), [0, 0, 0, 0]);
    }

    #[test]
    fn text_memo_layout() {
        let memo = Memo::text("hi").unwrap();
        assert_eq!(to_xdr(&memo), [0, 0, 0, 1, 0, 0, 0, 2, b'h', b'i', 0, 0]);
        assert_eq!(from_xdr::<Memo>(&to_xdr(&memo)).unwrap(), memo);
    }

    #[test]
    fn text_limit_is_in_bytes() {
        assert!(Memo::text("a".repeat(28)).is_ok());
        assert_eq!(
            Memo::text("a".repeat(29)),
            Err(TypeError::MemoTooLong { len: 29, max: 28 })
        );
        // 10 three-byte characters: 30 bytes.
        assert!(Memo::text("€".repeat(10)).is_err());
    }

    #[test]
    fn oversized_text_cannot_be_built() {
        assert!(MemoText::new(vec![b'x'; 40]).is_err());
        assert!(Memo::text("x".repeat(40)).is_err());
        assert!(serde_json::from_str::<Memo>(&format!(r#"{{"Text":"{}"}}"#, "x".repeat(40))).is_err());
    }

    #[test]
    fn oversized_text_on_the_wire_is_rejected() {
        let mut bytes = vec![0, 0, 0, 1, 0, 0, 0, 40];
        bytes.extend_from_slice(&[b'x'; 40]);
        assert!(matches!(
            from_xdr::<Memo>(&bytes),
            Err(XdrError::LengthExceeded { len: 40, .. })
        ));
    }

    #[test]
    fn binary_text_survives_decode() {
        let bytes = [0, 0, 0, 1, 0, 0, 0, 2, 0xff, 0xfe, 0, 0];
        let memo = from_xdr::<Memo>(&bytes).unwrap();
        let Memo::Text(text) = &memo else {
            panic!("expected a text memo");
        };
        assert_eq!(text.as_bytes(), &[0xff, 0xfe]);
        assert_eq!(to_xdr(&memo), bytes);

        let json = serde_json::to_value(&memo).unwrap();
        assert_eq!(json["Text"], "\u{fffd}\u{fffd}");
    }

    #[test]
    fn id_hash_and_return_decode() {
        for memo in [Memo::Id(u64::MAX), Memo::Hash([9; 32]), Memo::Return([8; 32])] {
            assert_eq!(from_xdr::<Memo>(&to_xdr(&memo)).unwrap(), memo);
        }
    }

    #[test]
    fn unknown_memo_type_is_rejected() {
        assert_eq!(
            from_xdr::<Memo>(&[0, 0, 0, 9]),
            Err(XdrError::UnknownDiscriminant {
                type_name: "MemoType",
                value: 9
            })
        );
    }
}
