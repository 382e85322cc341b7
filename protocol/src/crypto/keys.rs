//! # Key Management
//!
//! Ed25519 key pairs and the [`Signer`] seam used by transaction signing.
//!
//! A ledger account *is* an Ed25519 public key, so the key pair here is the
//! only thing standing between a transaction and whoever would like to
//! spend from that account.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop (ed25519-dalek does this for us).
//! - Generation uses the OS RNG.
//! - Key bytes are never logged, and `Debug` only ever shows the public half.

use ed25519_dalek::{
    Signature as DalekSignature, Signer as _, SigningKey, Verifier, VerifyingKey,
    SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use crate::config::SIGNATURE_HINT_LENGTH;
use crate::types::{DecoratedSignature, PublicKey};

/// Errors from parsing key material.
///
/// Deliberately vague: echoing back what was wrong with a secret is a leak.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key: expected {SECRET_KEY_LENGTH} hex-encoded bytes")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// Failure reported by a [`Signer`].
///
/// [`KeyPair`] never fails, but hardware wallets and remote signers do, and
/// transaction signing hands their errors back to the caller untouched.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("signer unavailable: {0}")]
    Unavailable(String),

    #[error("signer refused to sign: {0}")]
    Rejected(String),
}

/// Something that can produce an Ed25519 signature over a transaction hash.
///
/// Implement this for out-of-process signers. The hint defaults to the last
/// four bytes of the public key, which is what validators use to match a
/// signature to a signer without trying every key on the account.
pub trait Signer {
    /// The key validators will check the signature against.
    fn public_key(&self) -> PublicKey;

    /// Raw signature bytes over `message`.
    fn sign_raw(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;

    fn hint(&self) -> [u8; SIGNATURE_HINT_LENGTH] {
        self.public_key().hint()
    }

    /// Signs `message` and wraps the result with this signer's hint.
    fn sign_decorated(&self, message: &[u8]) -> Result<DecoratedSignature, SignerError> {
        Ok(DecoratedSignature::new(self.hint(), self.sign_raw(message)?))
    }
}

/// An Ed25519 key pair.
///
/// `KeyPair` intentionally does NOT implement `Serialize`. Exporting a secret
/// should be a conscious call to [`KeyPair::secret_key_hex`], not a side
/// effect of dumping a struct to JSON.
///
/// # Examples
///
/// ```
/// use stellar_envelope::crypto::KeyPair;
///
/// let kp = KeyPair::generate();
/// let sig = kp.sign(b"hello ledger");
/// assert!(kp.public_key().verify(b"hello ledger", &sig));
/// ```
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Fresh key pair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic key pair from a 32-byte seed. Weak seed, weak key.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parses a hex-encoded 32-byte seed.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SECRET_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.signing_key.verifying_key().to_bytes())
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }

    /// Exports the secret seed. Don't log it. Don't paste it anywhere.
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Ed25519 signature over `message`. Deterministic for a given key.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.public_key().verify(message, signature)
    }
}

impl Signer for KeyPair {
    fn public_key(&self) -> PublicKey {
        KeyPair::public_key(self)
    }

    fn sign_raw(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        Ok(self.sign(message).to_vec())
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key_hex())
    }
}

impl PublicKey {
    /// Checks an Ed25519 signature against this key.
    ///
    /// Returns `false` for anything that is not a well-formed 64-byte
    /// signature or whose key bytes are not a curve point.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(self.as_bytes()) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
            return false;
        };
        verifying_key
            .verify(message, &DalekSignature::from_bytes(&sig_bytes))
            .is_ok()
    }

    /// Parses a hex-encoded key and checks that it is a valid curve point.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s.trim()).map_err(|_| KeyError::InvalidPublicKey)?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&arr).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(PublicKey::Ed25519(arr))
    }
}
