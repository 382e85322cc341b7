//! # CLI Interface
//!
//! Defines the command-line argument structure for `stellar-envelope` using
//! `clap` derive. Every flag that touches the network or keys has an
//! environment fallback so scripts don't need to pass secrets on argv.

use clap::{Parser, Subcommand, ValueEnum};

use stellar_envelope::config::DEFAULT_PROTOCOL_VERSION;
use stellar_envelope::network::Network;

/// Offline transaction signing for ledger networks.
///
/// Takes base64 XDR in, gives base64 XDR (or JSON) out. Never talks to the
/// network: fetch sequence numbers and submit envelopes with whatever
/// client you already use.
#[derive(Parser, Debug)]
#[command(
    name = "stellar-envelope",
    about = "Build, sign and inspect ledger transaction envelopes",
    version,
    propagate_version = true
)]
pub struct EnvelopeCli {
    /// Network name (public, testnet, futurenet) or a raw passphrase.
    #[arg(long, short = 'n', global = true, env = "STELLAR_NETWORK", default_value = "testnet")]
    pub network: Network,

    /// Ledger protocol version to target. Below 13 produces legacy v0
    /// envelopes and rejects muxed source accounts.
    #[arg(long, short = 'p', global = true, env = "STELLAR_PROTOCOL_VERSION", default_value_t = DEFAULT_PROTOCOL_VERSION)]
    pub protocol_version: u32,

    /// Log output format. Logs go to stderr.
    #[arg(long, global = true, env = "STELLAR_LOG_FORMAT", value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh Ed25519 key pair and print it as JSON.
    Keygen,
    /// Sign an unsigned transaction or add a signature to an envelope.
    Sign(SignArgs),
    /// Decode an envelope and print it as JSON.
    Decode(DecodeArgs),
    /// Print the hex transaction hash for the selected network and version.
    Hash(HashArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// Base64 XDR of an unsigned transaction or an existing envelope.
    #[arg(long)]
    pub tx: String,

    /// Hex-encoded 32-byte Ed25519 seed.
    ///
    /// Prefer the environment variable over the flag; argv shows up in
    /// process listings.
    #[arg(long, env = "STELLAR_SECRET_KEY", hide_env_values = true)]
    pub secret: String,
}

/// Arguments for the `decode` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Base64 XDR of a transaction envelope.
    pub envelope: String,
}

/// Arguments for the `hash` subcommand.
#[derive(Parser, Debug)]
pub struct HashArgs {
    /// Base64 XDR of an unsigned transaction or an envelope.
    #[arg(long)]
    pub tx: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        EnvelopeCli::command().debug_assert();
    }

    #[test]
    fn defaults_are_testnet_and_legacy() {
        let cli = EnvelopeCli::try_parse_from(["stellar-envelope", "keygen"]).unwrap();
        assert_eq!(cli.network, Network::testnet());
        assert_eq!(cli.protocol_version, 12);
        assert_eq!(cli.log_format, LogFormatArg::Pretty);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = EnvelopeCli::try_parse_from([
            "stellar-envelope",
            "hash",
            "--tx",
            "AAAA",
            "--network",
            "public",
            "-p",
            "13",
        ])
        .unwrap();
        assert_eq!(cli.network, Network::public());
        assert_eq!(cli.protocol_version, 13);
        assert!(matches!(cli.command, Commands::Hash(ref a) if a.tx == "AAAA"));
    }
}
