//! PDA (Program Derived Address) derivation functions.
//!
//! Addresses the mint instruction needs from the token metadata and
//! associated token account programs.

use solana_pubkey::Pubkey;

use crate::program::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, EDITION_SEED, METADATA_SEED, TOKEN_METADATA_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};

/// Get the Metadata PDA for a mint.
///
/// Seeds: ["metadata", token_metadata_program, mint]
pub fn get_metadata_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

/// Get the Master Edition PDA for a mint.
///
/// Seeds: ["metadata", token_metadata_program, mint, "edition"]
pub fn get_master_edition_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            METADATA_SEED,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
            EDITION_SEED,
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

/// Get the Associated Token Address for a wallet and SPL Token mint.
///
/// Seeds: [wallet, token_program, mint] under the ATA program.
pub fn get_associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[wallet.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .0
}
