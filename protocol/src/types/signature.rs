//! Decorated signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{MAX_SIGNATURE_LENGTH, SIGNATURE_HINT_LENGTH};
use crate::xdr::io::{get_fixed, get_opaque, put_bytes, put_opaque};
use crate::xdr::{XdrDecode, XdrEncode, XdrError};

/// A raw signature plus the four-byte hint that tells validators which of an
/// account's signers produced it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecoratedSignature {
    #[serde(with = "hex::serde")]
    pub hint: [u8; SIGNATURE_HINT_LENGTH],
    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
}

impl DecoratedSignature {
    pub fn new(hint: [u8; SIGNATURE_HINT_LENGTH], signature: Vec<u8>) -> Self {
        Self { hint, signature }
    }
}

impl fmt::Debug for DecoratedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sig = hex::encode(&self.signature);
        let short = if sig.len() > 16 { &sig[..16] } else { &sig };
        write!(f, "DecoratedSignature(hint={}, sig={}..)", hex::encode(self.hint), short)
    }
}

impl XdrEncode for DecoratedSignature {
    fn encode(&self, out: &mut Vec<u8>) {
        put_bytes(out, &self.hint);
        put_opaque(out, &self.signature);
    }
}

impl XdrDecode for DecoratedSignature {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        Ok(Self {
            hint: get_fixed::<SIGNATURE_HINT_LENGTH>(input)?,
            signature: get_opaque(input, MAX_SIGNATURE_LENGTH, "signature")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{from_xdr, to_xdr};

    #[test]
    fn layout_is_hint_then_opaque() {
        let sig = DecoratedSignature::new([1, 2, 3, 4], vec![0xEE; 64]);
        let bytes = to_xdr(&sig);
        assert_eq!(bytes.len(), 4 + 4 + 64);
        assert_eq!(&bytes[..8], &[1, 2, 3, 4, 0, 0, 0, 64]);
        assert_eq!(from_xdr::<DecoratedSignature>(&bytes).unwrap(), sig);
    }

    #[test]
    fn oversized_signature_is_rejected() {
        let sig = DecoratedSignature::new([0; 4], vec![0; 65]);
        assert!(matches!(
            from_xdr::<DecoratedSignature>(&to_xdr(&sig)),
            Err(XdrError::LengthExceeded { len: 65, max: 64, .. })
        ));
    }
}
