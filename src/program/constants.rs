//! Constants for the candy machine program.
//!
//! Program IDs, discriminators, seeds, error codes and size constants
//! matching the on-chain programs exactly.

use solana_pubkey::Pubkey;
use std::str::FromStr;

// ============================================================================
// Program IDs
// ============================================================================

lazy_static::lazy_static! {
    /// Candy Machine (v1) Program ID
    pub static ref CANDY_MACHINE_PROGRAM_ID: Pubkey = Pubkey::from_str("cndyAnrLdpjq1Ssp1z8xxDsB8dxe7u4HL5Nxi2K5WXZ").unwrap();

    /// Metaplex Token Metadata Program ID
    pub static ref TOKEN_METADATA_PROGRAM_ID: Pubkey = Pubkey::from_str("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s").unwrap();
}

/// SPL Token Program ID
pub const TOKEN_PROGRAM_ID: Pubkey = spl_token::ID;

/// Associated Token Account Program ID
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = spl_associated_token_account::ID;

/// System Program ID
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk_ids::system_program::ID;

/// Rent Sysvar ID
pub const RENT_SYSVAR_ID: Pubkey = solana_sdk_ids::sysvar::rent::ID;

/// Clock Sysvar ID
pub const CLOCK_SYSVAR_ID: Pubkey = solana_sdk_ids::sysvar::clock::ID;

// ============================================================================
// Discriminators (Anchor: first 8 bytes of sha256)
// ============================================================================

/// `sha256("account:CandyMachine")[..8]`
pub const CANDY_MACHINE_DISCRIMINATOR: [u8; 8] = [0x33, 0xad, 0xb1, 0x71, 0x19, 0xf1, 0x6d, 0xbd];

/// `sha256("global:mint_nft")[..8]`
pub const MINT_NFT_DISCRIMINATOR: [u8; 8] = [0xd3, 0x39, 0x06, 0xa7, 0x0f, 0xdb, 0x23, 0xfb];

// ============================================================================
// PDA Seeds
// ============================================================================

/// Token metadata PDA seed
pub const METADATA_SEED: &[u8] = b"metadata";
/// Master edition PDA seed suffix
pub const EDITION_SEED: &[u8] = b"edition";

// ============================================================================
// Program Error Codes
// ============================================================================

/// Candy machine custom error codes (Anchor user errors start at 300).
pub mod error_code {
    /// `CandyMachineEmpty` (0x137)
    pub const CANDY_MACHINE_EMPTY: u32 = 311;
    /// `CandyMachineNotLiveYet` (0x138)
    pub const CANDY_MACHINE_NOT_LIVE_YET: u32 = 312;
}

// ============================================================================
// Sizes
// ============================================================================

/// SPL mint account size in bytes
pub const MINT_ACCOUNT_SIZE: usize = 82;

/// Smallest possible candy machine account: fixed fields, `token_mint = None`,
/// empty uuid, `go_live_date = None`.
pub const CANDY_MACHINE_MIN_SIZE: usize = 8 + 32 + 32 + 1 + 32 + 4 + 8 + 8 + 1 + 8 + 1;

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
