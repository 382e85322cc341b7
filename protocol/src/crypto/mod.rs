//! # Cryptographic Primitives
//!
//! Thin, typed wrappers over audited implementations:
//!
//! - **Ed25519** (`ed25519-dalek`) for account keys and signatures.
//! - **SHA-256** (`sha2`) for network ids and transaction hashes.
//!
//! Nothing in here is clever, which is the point.

pub mod hash;
pub mod keys;

pub use hash::{sha256, sha256_hex};
pub use keys::{KeyError, KeyPair, Signer, SignerError};
