//! Primitive XDR readers and writers.
//!
//! Integers are big-endian and every item is padded to a 4-byte boundary.
//! Readers take `&mut &[u8]` and advance the slice past what they consume.

use super::error::XdrError;
use super::{XdrDecode, XdrEncode};

pub fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn put_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn put_u64(out: &mut Vec<u8>, v: u64) {
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn put_i64(out: &mut Vec<u8>, v: i64) {
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn put_bool(out: &mut Vec<u8>, v: bool) {
    put_u32(out, v as u32);
}

/// Fixed-length opaque: no length prefix, padded to a multiple of 4.
pub fn put_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
    out.resize(out.len() + padding(bytes.len()), 0);
}

/// Variable-length opaque: 4-byte length, the bytes, then padding.
pub fn put_opaque(out: &mut Vec<u8>, bytes: &[u8]) {
    put_u32(out, len_to_u32(bytes.len()));
    put_bytes(out, bytes);
}

/// XDR `string<>`; identical to variable opaque on the wire.
pub fn put_string(out: &mut Vec<u8>, s: &str) {
    put_opaque(out, s.as_bytes());
}

/// Length-prefixed array of encodable items.
pub fn put_array<T: XdrEncode>(out: &mut Vec<u8>, items: &[T]) {
    put_u32(out, len_to_u32(items.len()));
    for item in items {
        item.encode(out);
    }
}

/// Native XDR optional (`T*`): a boolean followed by the value when present.
pub fn put_option<T: XdrEncode>(out: &mut Vec<u8>, value: Option<&T>) {
    match value {
        Some(v) => {
            put_bool(out, true);
            v.encode(out);
        }
        None => put_bool(out, false),
    }
}

/// Optional struct carried as a 0- or 1-element array.
pub fn put_optional_array<T: XdrEncode>(out: &mut Vec<u8>, value: Option<&T>) {
    match value {
        Some(v) => put_array(out, std::slice::from_ref(v)),
        None => put_u32(out, 0),
    }
}

pub fn get_u32(input: &mut &[u8]) -> Result<u32, XdrError> {
    let b = take(input, 4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

pub fn get_i32(input: &mut &[u8]) -> Result<i32, XdrError> {
    let b = take(input, 4)?;
    Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

pub fn get_u64(input: &mut &[u8]) -> Result<u64, XdrError> {
    let b = take(input, 8)?;
    let mut arr = [0u8; 8];
    arr.copy_from_slice(b);
    Ok(u64::from_be_bytes(arr))
}

pub fn get_i64(input: &mut &[u8]) -> Result<i64, XdrError> {
    let b = take(input, 8)?;
    let mut arr = [0u8; 8];
    arr.copy_from_slice(b);
    Ok(i64::from_be_bytes(arr))
}

pub fn get_bool(input: &mut &[u8]) -> Result<bool, XdrError> {
    match get_u32(input)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(XdrError::InvalidBool(other)),
    }
}

/// Reads `N` bytes of fixed opaque data plus its padding.
pub fn get_fixed<const N: usize>(input: &mut &[u8]) -> Result<[u8; N], XdrError> {
    let b = take(input, N)?;
    let mut arr = [0u8; N];
    arr.copy_from_slice(b);
    skip_padding(input, N)?;
    Ok(arr)
}

/// Reads variable opaque data bounded by `max` bytes.
pub fn get_opaque(input: &mut &[u8], max: usize, what: &'static str) -> Result<Vec<u8>, XdrError> {
    let len = get_u32(input)? as usize;
    if len > max {
        return Err(XdrError::LengthExceeded { what, len, max });
    }
    let bytes = take(input, len)?.to_vec();
    skip_padding(input, len)?;
    Ok(bytes)
}

pub fn get_string(input: &mut &[u8], max: usize, what: &'static str) -> Result<String, XdrError> {
    let bytes = get_opaque(input, max, what)?;
    String::from_utf8(bytes).map_err(|_| XdrError::InvalidUtf8)
}

/// Reads a length-prefixed array.
///
/// Each XDR item occupies at least four bytes, so a count that cannot fit in
/// what is left of the input is rejected before anything is allocated.
pub fn get_array<T: XdrDecode>(input: &mut &[u8]) -> Result<Vec<T>, XdrError> {
    let len = get_u32(input)? as usize;
    if len > input.len() / 4 {
        return Err(XdrError::UnexpectedEof);
    }
    let mut items = Vec::with_capacity(len);
    for _ in 0..len {
        items.push(T::decode(input)?);
    }
    Ok(items)
}

pub fn get_option<T: XdrDecode>(input: &mut &[u8]) -> Result<Option<T>, XdrError> {
    if get_bool(input)? {
        Ok(Some(T::decode(input)?))
    } else {
        Ok(None)
    }
}

pub fn get_optional_array<T: XdrDecode>(input: &mut &[u8]) -> Result<Option<T>, XdrError> {
    let len = get_u32(input)? as usize;
    match len {
        0 => Ok(None),
        1 => Ok(Some(T::decode(input)?)),
        _ => Err(XdrError::InvalidOptional { len }),
    }
}

fn take<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8], XdrError> {
    if input.len() < len {
        return Err(XdrError::UnexpectedEof);
    }
    let (b, rest) = input.split_at(len);
    *input = rest;
    Ok(b)
}

fn skip_padding(input: &mut &[u8], len: usize) -> Result<(), XdrError> {
    let pad = take(input, padding(len))?;
    if pad.iter().any(|b| *b != 0) {
        return Err(XdrError::NonZeroPadding);
    }
    Ok(())
}

fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Lengths on the wire are `u32`. Anything larger is a programming error,
/// not something a caller can recover from.
fn len_to_u32(len: usize) -> u32 {
    assert!(
        len <= u32::MAX as usize,
        "xdr length {} exceeds u32::MAX",
        len
    );
    len as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_big_endian() {
        let mut out = Vec::new();
        put_u32(&mut out, 1);
        put_i64(&mut out, -2);
        assert_eq!(out, [0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe]);

        let mut input = out.as_slice();
        assert_eq!(get_u32(&mut input).unwrap(), 1);
        assert_eq!(get_i64(&mut input).unwrap(), -2);
        assert!(input.is_empty());
    }

    #[test]
    fn opaque_is_padded_to_four_bytes() {
        let mut out = Vec::new();
        put_opaque(&mut out, b"abcde");
        assert_eq!(out, [0, 0, 0, 5, b'a', b'b', b'c', b'd', b'e', 0, 0, 0]);

        let mut input = out.as_slice();
        assert_eq!(get_opaque(&mut input, 28, "test").unwrap(), b"abcde");
        assert!(input.is_empty());
    }

    #[test]
    fn non_zero_padding_is_rejected() {
        let bytes = [0, 0, 0, 1, b'a', 0, 1, 0];
        let mut input = &bytes[..];
        assert_eq!(
            get_opaque(&mut input, 28, "test"),
            Err(XdrError::NonZeroPadding)
        );
    }

    #[test]
    fn opaque_over_limit_is_rejected() {
        let mut out = Vec::new();
        put_opaque(&mut out, &[7u8; 30]);
        let mut input = out.as_slice();
        assert_eq!(
            get_opaque(&mut input, 28, "memo text"),
            Err(XdrError::LengthExceeded {
                what: "memo text",
                len: 30,
                max: 28
            })
        );
    }

    #[test]
    fn truncated_integer_is_eof() {
        let mut input: &[u8] = &[0, 0, 1];
        assert_eq!(get_u32(&mut input), Err(XdrError::UnexpectedEof));
    }

    #[test]
    fn bool_outside_zero_one_is_rejected() {
        let mut input: &[u8] = &[0, 0, 0, 2];
        assert_eq!(get_bool(&mut input), Err(XdrError::InvalidBool(2)));
    }

    #[test]
    fn huge_array_count_does_not_allocate() {
        let mut input: &[u8] = &[0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0];
        let result: Result<Vec<u32>, _> = get_array(&mut input);
        assert_eq!(result, Err(XdrError::UnexpectedEof));
    }

    #[test]
    fn optional_array_shapes() {
        let mut none = Vec::new();
        put_optional_array::<u32>(&mut none, None);
        assert_eq!(none, [0, 0, 0, 0]);

        let mut some = Vec::new();
        put_optional_array(&mut some, Some(&9u32));
        assert_eq!(some, [0, 0, 0, 1, 0, 0, 0, 9]);

        let mut input = some.as_slice();
        assert_eq!(get_optional_array::<u32>(&mut input).unwrap(), Some(9));

        let two = [0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 2];
        let mut input = &two[..];
        assert_eq!(
            get_optional_array::<u32>(&mut input),
            Err(XdrError::InvalidOptional { len: 2 })
        );
    }
}
