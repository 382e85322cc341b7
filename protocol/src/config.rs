//! # Protocol Configuration & Constants
//!
//! Every magic number the envelope code depends on lives here. Most of them
//! are fixed by the network's XDR definitions; changing one silently produces
//! bytes no validator will accept.

// ---------------------------------------------------------------------------
// Network Passphrases
// ---------------------------------------------------------------------------

/// The public network. The network id is the SHA-256 of this string.
pub const PUBLIC_NETWORK_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// The SDF test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Futurenet, where upcoming protocol versions are staged.
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";

// ---------------------------------------------------------------------------
// Protocol Generations
// ---------------------------------------------------------------------------

/// Protocol version assumed when a caller does not say otherwise. Older
/// networks reject v1 envelopes, so the conservative default is the legacy
/// shape.
pub const DEFAULT_PROTOCOL_VERSION: u32 = 12;

/// First protocol version whose validators accept muxed source accounts and
/// `ENVELOPE_TYPE_TX` envelopes.
pub const MUXED_ACCOUNTS_PROTOCOL_VERSION: u32 = 13;

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Default per-operation fee ceiling, in stroops.
pub const BASE_FEE: u32 = 100;

// ---------------------------------------------------------------------------
// XDR Discriminants
// ---------------------------------------------------------------------------

pub const ENVELOPE_TYPE_TX_V0: i32 = 0;
pub const ENVELOPE_TYPE_TX: i32 = 2;

pub const PUBLIC_KEY_TYPE_ED25519: i32 = 0;

pub const KEY_TYPE_ED25519: i32 = 0;
pub const KEY_TYPE_MUXED_ED25519: i32 = 0x100;

// ---------------------------------------------------------------------------
// XDR Limits
// ---------------------------------------------------------------------------

/// `string text<28>` in `Memo`.
pub const MAX_MEMO_TEXT_LEN: usize = 28;

/// `string64` used for manage-data entry names.
pub const MAX_DATA_NAME_LEN: usize = 64;

/// `opaque DataValue<64>`.
pub const MAX_DATA_VALUE_LEN: usize = 64;

/// `opaque Signature<64>`. Ed25519 always fills it.
pub const MAX_SIGNATURE_LENGTH: usize = 64;

/// Number of trailing public-key bytes carried in a signature hint.
pub const SIGNATURE_HINT_LENGTH: usize = 4;
