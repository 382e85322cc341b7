//! # XDR Codec
//!
//! The ledger speaks XDR (RFC 4506): big-endian integers, 4-byte alignment,
//! length-prefixed variable data and `int`-tagged unions. Every wire type in
//! this crate implements [`XdrEncode`] and [`XdrDecode`], and those two impls
//! are the only place field order is written down. Signatures are computed
//! over these bytes, so "close enough" does not exist here.
//!
//! ```text
//! io.rs    — primitive put_*/get_* helpers
//! error.rs — XdrError, the single decode failure type
//! ```

pub mod error;
pub mod io;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub use error::XdrError;

/// Serializes a value into its canonical XDR bytes.
pub trait XdrEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Parses a value from the front of `input`, advancing the slice.
pub trait XdrDecode: Sized {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError>;
}

/// Encodes a value into a fresh buffer.
pub fn to_xdr<T: XdrEncode + ?Sized>(value: &T) -> Vec<u8> {
    let mut out = Vec::with_capacity(256);
    value.encode(&mut out);
    out
}

/// Decodes a value that must span the whole buffer.
pub fn from_xdr<T: XdrDecode>(bytes: &[u8]) -> Result<T, XdrError> {
    let mut input = bytes;
    let value = T::decode(&mut input)?;
    if !input.is_empty() {
        return Err(XdrError::TrailingBytes(input.len()));
    }
    Ok(value)
}

/// Standard (padded) base64 of the value's XDR. This is the text form that
/// Horizon and every SDK exchange.
pub fn to_base64<T: XdrEncode + ?Sized>(value: &T) -> String {
    STANDARD.encode(to_xdr(value))
}

pub fn from_base64<T: XdrDecode>(text: &str) -> Result<T, XdrError> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|_| XdrError::InvalidBase64)?;
    from_xdr(&bytes)
}

macro_rules! impl_xdr_int {
    ($ty:ty, $put:path, $get:path) => {
        impl XdrEncode for $ty {
            fn encode(&self, out: &mut Vec<u8>) {
                $put(out, *self);
            }
        }

        impl XdrDecode for $ty {
            fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
                $get(input)
            }
        }
    };
}

impl_xdr_int!(u32, io::put_u32, io::get_u32);
impl_xdr_int!(i32, io::put_i32, io::get_i32);
impl_xdr_int!(u64, io::put_u64, io::get_u64);
impl_xdr_int!(i64, io::put_i64, io::get_i64);

/// `uint256` / `Hash` and friends.
impl XdrEncode for [u8; 32] {
    fn encode(&self, out: &mut Vec<u8>) {
        io::put_bytes(out, self);
    }
}

impl XdrDecode for [u8; 32] {
    fn decode(input: &mut &[u8]) -> Result<Self, XdrError> {
        io::get_fixed::<32>(input)
    }
}
