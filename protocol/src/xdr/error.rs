//! Decode failures for the XDR codec.

use thiserror::Error;

/// Everything that can go wrong while turning bytes back into values.
///
/// Encoding is infallible: any value the type system lets you build has a
/// wire representation. Decoding is where untrusted input shows up, so every
/// malformed shape gets its own variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unknown {type_name} discriminant: {value}")]
    UnknownDiscriminant { type_name: &'static str, value: i32 },

    #[error("{what} length {len} exceeds maximum {max}")]
    LengthExceeded {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("optional array must hold 0 or 1 elements, got {len}")]
    InvalidOptional { len: usize },

    #[error("invalid boolean value: {0}")]
    InvalidBool(u32),

    #[error("non-zero padding bytes")]
    NonZeroPadding,

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("invalid base64 input")]
    InvalidBase64,

    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}
