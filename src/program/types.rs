//! Parameter structs for candy machine instructions.

use solana_pubkey::Pubkey;

/// Addresses identifying one candy machine sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintAccounts {
    /// Candy machine account
    pub candy_machine: Pubkey,
    /// Config account the machine draws items from
    pub config: Pubkey,
    /// Treasury receiving payment (must match the machine's `wallet`)
    pub treasury: Pubkey,
}

/// Parameters for minting one NFT
#[derive(Debug, Clone, Copy)]
pub struct MintNftParams {
    /// Sale accounts
    pub accounts: MintAccounts,
    /// Payer, mint authority and update authority
    pub payer: Pubkey,
    /// Freshly generated mint account (must sign)
    pub mint: Pubkey,
}
