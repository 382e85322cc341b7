// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Stellar Envelope — Core Library
//!
//! Builds ledger transactions, encodes them to canonical XDR, signs them for
//! a specific network and protocol generation, and wraps the result in the
//! envelope a validator will accept.
//!
//! The hard part is not the cryptography (Ed25519 and SHA-256, both boring
//! on purpose). It is producing *exactly* the bytes a validator recomputes:
//! field order, optional encodings, union tags and the protocol-13 split
//! between legacy and muxed transaction shapes. Get one byte wrong and the
//! signature verifies against a transaction nobody submitted.
//!
//! ## Architecture
//!
//! - **xdr** — The XDR codec: encode/decode traits and primitive helpers.
//! - **types** — Wire types: accounts, memos, operations, signatures.
//! - **crypto** — SHA-256, Ed25519 key pairs, the `Signer` seam.
//! - **network** — Network passphrases and ids.
//! - **transaction** — The record, signing, and envelope assembly.
//! - **config** — Protocol constants and XDR discriminants.
//!
//! ## Quick Start
//!
//! ```
//! use stellar_envelope::crypto::KeyPair;
//! use stellar_envelope::network::Network;
//! use stellar_envelope::transaction::{ProtocolVersion, TransactionBuilder};
//! use stellar_envelope::types::{Asset, Operation};
//!
//! let kp = KeyPair::generate();
//! let dest = KeyPair::generate().public_key();
//!
//! let mut tx = TransactionBuilder::new(kp.public_key())
//!     .sequence_number(1)
//!     .add_operation(Operation::payment(dest, Asset::Native, 10_000_000))
//!     .build()
//!     .unwrap();
//!
//! tx.sign(&kp, &Network::testnet(), ProtocolVersion(13)).unwrap();
//! let envelope = tx.encoded_envelope(ProtocolVersion(13)).unwrap();
//! assert!(!envelope.is_empty());
//! ```
//!
//! ## Concurrency
//!
//! Everything here is synchronous and allocation-bounded. A [`Transaction`]
//! is mutated only by appending signatures; share one across threads behind
//! your own lock.
//!
//! [`Transaction`]: transaction::Transaction

pub mod config;
pub mod crypto;
pub mod network;
pub mod transaction;
pub mod types;
pub mod xdr;
