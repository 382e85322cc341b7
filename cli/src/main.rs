// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # stellar-envelope
//!
//! Entry point for the offline envelope tool. Parses CLI arguments,
//! initializes logging, and runs one subcommand:
//!
//! - `keygen`  — generate a key pair
//! - `sign`    — sign a transaction or co-sign an envelope
//! - `decode`  — dump an envelope as JSON
//! - `hash`    — print a transaction hash
//! - `version` — print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use stellar_envelope::crypto::KeyPair;
use stellar_envelope::network::Network;
use stellar_envelope::transaction::{ProtocolVersion, Transaction, TransactionEnvelope};

use cli::{Commands, EnvelopeCli};

fn main() -> Result<()> {
    let cli = EnvelopeCli::parse();
    logging::init_logging("stellar_envelope=info", cli.log_format.into());

    let version = ProtocolVersion(cli.protocol_version);
    let output = match cli.command {
        Commands::Keygen => keygen()?,
        Commands::Sign(args) => sign(&args.tx, &args.secret, &cli.network, version)?,
        Commands::Decode(args) => decode(&args.envelope)?,
        Commands::Hash(args) => hash(&args.tx, &cli.network, version)?,
        Commands::Version => version_info(),
    };
    println!("{}", output);
    Ok(())
}

/// Generates a key pair and renders it as JSON.
fn keygen() -> Result<String> {
    let keypair = KeyPair::generate();
    tracing::info!(public_key = %keypair.public_key_hex(), "generated key pair");
    Ok(serde_json::to_string_pretty(&json!({
        "public_key": keypair.public_key_hex(),
        "secret_key": keypair.secret_key_hex(),
    }))?)
}

/// Accepts either an unsigned body or a full envelope.
///
/// A v1 envelope opens with a tag no account type uses, and a v0 envelope
/// read as a body leaves its signature array behind as trailing bytes, so
/// trying the body first is unambiguous.
fn parse_transaction(text: &str) -> Result<Transaction> {
    if let Ok(tx) = Transaction::from_base64(text) {
        return Ok(tx);
    }
    let envelope = TransactionEnvelope::from_base64(text)
        .context("input is neither a transaction nor a transaction envelope")?;
    Ok(Transaction::from_envelope(envelope))
}

/// Signs and returns the base64 envelope for `version`.
fn sign(tx_b64: &str, secret: &str, network: &Network, version: ProtocolVersion) -> Result<String> {
    let keypair = KeyPair::from_hex(secret).context("failed to parse secret key")?;
    let mut tx = parse_transaction(tx_b64)?;

    tx.sign(&keypair, network, version)
        .with_context(|| format!("failed to sign for protocol version {}", version))?;
    tracing::info!(
        network = %network,
        protocol_version = version.0,
        signatures = tx.signatures().len(),
        "transaction signed"
    );

    tx.encoded_envelope(version)
        .context("failed to assemble envelope")
}

/// Renders an envelope as pretty JSON.
fn decode(envelope_b64: &str) -> Result<String> {
    let envelope =
        TransactionEnvelope::from_base64(envelope_b64).context("failed to decode envelope")?;
    Ok(serde_json::to_string_pretty(&json!({
        "envelope_type": envelope.envelope_type(),
        "signature_count": envelope.signatures().len(),
        "envelope": envelope,
    }))?)
}

fn hash(tx_b64: &str, network: &Network, version: ProtocolVersion) -> Result<String> {
    let tx = parse_transaction(tx_b64)?;
    tx.hash_hex(network, version)
        .with_context(|| format!("failed to hash for protocol version {}", version))
}

fn version_info() -> String {
    format!(
        "stellar-envelope {}\ndefault protocol {}",
        env!("CARGO_PKG_VERSION"),
        ProtocolVersion::default()
    )
}
