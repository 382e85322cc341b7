//! # Hashing
//!
//! The ledger uses exactly one hash function for transaction work: SHA-256.
//! It derives network ids from passphrases and turns a signature base into
//! the 32 bytes that actually get signed.

use sha2::{Digest, Sha256};

/// SHA-256 of `data` as a fixed-size array.
///
/// # Example
///
/// ```
/// use stellar_envelope::crypto::sha256;
///
/// let hash = sha256(b"Test SDF Network ; September 2015");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hex-encoded SHA-256. Handy for logs and CLI output.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // NIST FIPS 180-2 test vector for "abc".
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha256_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn testnet_network_id() {
        // The well-known testnet id every SDK hardcodes in its fixtures.
        assert_eq!(
            sha256_hex(b"Test SDF Network ; September 2015"),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }
}
