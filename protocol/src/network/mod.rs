//! # Network Identity
//!
//! Every signature is bound to one network: the signature base starts with
//! the SHA-256 of the network's passphrase. A transaction signed for testnet
//! is garbage on the public network, which is exactly the point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{FUTURENET_PASSPHRASE, PUBLIC_NETWORK_PASSPHRASE, TESTNET_PASSPHRASE};
use crate::crypto::hash::sha256;

/// A ledger network, identified by its passphrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Network {
    passphrase: String,
}

impl Network {
    pub fn public() -> Self {
        Self::custom(PUBLIC_NETWORK_PASSPHRASE)
    }

    pub fn testnet() -> Self {
        Self::custom(TESTNET_PASSPHRASE)
    }

    pub fn futurenet() -> Self {
        Self::custom(FUTURENET_PASSPHRASE)
    }

    /// A private or standalone network.
    pub fn custom(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// `SHA-256(passphrase)`, the first 32 bytes of every signature base.
    pub fn network_id(&self) -> [u8; 32] {
        sha256(self.passphrase.as_bytes())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.passphrase.as_str() {
            PUBLIC_NETWORK_PASSPHRASE => write!(f, "public"),
            TESTNET_PASSPHRASE => write!(f, "testnet"),
            FUTURENET_PASSPHRASE => write!(f, "futurenet"),
            other => write!(f, "custom({})", other),
        }
    }
}

/// Accepts the well-known names (case-insensitive) or a raw passphrase.
impl FromStr for Network {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "public" | "mainnet" | "pubnet" => Self::public(),
            "testnet" => Self::testnet(),
            "futurenet" => Self::futurenet(),
            _ => Self::custom(s),
        })
    }
}
