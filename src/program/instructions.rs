//! Instruction builders for minting from a candy machine.
//!
//! A mint is five instructions in one transaction: the payer creates and
//! initializes a fresh SPL mint, creates its own associated token account,
//! mints one token into it, and finally calls the candy machine's
//! `mint_nft`, which attaches metadata and a master edition.

use solana_instruction::{AccountMeta, Instruction};
use solana_pubkey::Pubkey;

use crate::error::{RawError, SdkError, SdkResult};
use crate::program::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, CLOCK_SYSVAR_ID, MINT_ACCOUNT_SIZE, MINT_NFT_DISCRIMINATOR,
    RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::program::pda::{get_associated_token_address, get_master_edition_pda, get_metadata_pda};
use crate::program::types::MintNftParams;

// ============================================================================
// Helper Functions
// ============================================================================

/// Create an account meta for a signer+writable account.
fn signer_mut(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, true)
}

/// Create an account meta for a read-only signer.
fn signer(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, true)
}

/// Create an account meta for a writable account.
fn writable(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new(pubkey, false)
}

/// Create an account meta for a read-only account.
fn readonly(pubkey: Pubkey) -> AccountMeta {
    AccountMeta::new_readonly(pubkey, false)
}

fn token_instruction_error(e: impl std::fmt::Display) -> SdkError {
    SdkError::Submission(RawError::from_message(format!(
        "failed to build token instruction: {}",
        e
    )))
}

// ============================================================================
// Instruction Builders
// ============================================================================

/// Build the candy machine `mint_nft` instruction.
///
/// Accounts:
/// 0. config (readonly)
/// 1. candy_machine (mut)
/// 2. payer (signer, mut)
/// 3. wallet (mut) - treasury
/// 4. metadata (mut) - Metadata PDA of the new mint
/// 5. mint (mut)
/// 6. mint_authority (signer) - payer
/// 7. update_authority (signer) - payer
/// 8. master_edition (mut)
/// 9. token_metadata_program
/// 10. token_program
/// 11. system_program
/// 12. rent sysvar
/// 13. clock sysvar
pub fn build_mint_nft_ix(params: &MintNftParams, program_id: &Pubkey) -> Instruction {
    let (metadata, _) = get_metadata_pda(&params.mint);
    let (master_edition, _) = get_master_edition_pda(&params.mint);

    let keys = vec![
        readonly(params.accounts.config),
        writable(params.accounts.candy_machine),
        signer_mut(params.payer),
        writable(params.accounts.treasury),
        writable(metadata),
        writable(params.mint),
        signer(params.payer),
        signer(params.payer),
        writable(master_edition),
        readonly(*TOKEN_METADATA_PROGRAM_ID),
        readonly(TOKEN_PROGRAM_ID),
        readonly(SYSTEM_PROGRAM_ID),
        readonly(RENT_SYSVAR_ID),
        readonly(CLOCK_SYSVAR_ID),
    ];

    // Data: [anchor discriminator (8)], no arguments
    Instruction {
        program_id: *program_id,
        accounts: keys,
        data: MINT_NFT_DISCRIMINATOR.to_vec(),
    }
}

/// Build the associated token account `Create` instruction.
///
/// Accounts:
/// 0. funding (signer, mut)
/// 1. associated_token_account (mut)
/// 2. wallet (readonly)
/// 3. mint (readonly)
/// 4. system_program
/// 5. token_program
pub fn build_create_associated_token_account_ix(
    funding: &Pubkey,
    wallet: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    let ata = get_associated_token_address(wallet, mint);

    let keys = vec![
        signer_mut(*funding),
        writable(ata),
        readonly(*wallet),
        readonly(*mint),
        readonly(SYSTEM_PROGRAM_ID),
        readonly(TOKEN_PROGRAM_ID),
    ];

    Instruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: keys,
        data: vec![0],
    }
}

/// Build every instruction of a single mint, in execution order.
///
/// `mint_rent_lamports` is the rent-exempt minimum for an 82-byte mint account.
pub fn build_mint_instructions(
    params: &MintNftParams,
    mint_rent_lamports: u64,
    program_id: &Pubkey,
) -> SdkResult<Vec<Instruction>> {
    let payer = &params.payer;
    let mint = &params.mint;
    let token_account = get_associated_token_address(payer, mint);

    let create_mint = solana_system_interface::instruction::create_account(
        payer,
        mint,
        mint_rent_lamports,
        MINT_ACCOUNT_SIZE as u64,
        &TOKEN_PROGRAM_ID,
    );

    let initialize_mint =
        spl_token::instruction::initialize_mint(&TOKEN_PROGRAM_ID, mint, payer, Some(payer), 0)
            .map_err(token_instruction_error)?;

    let create_token_account = build_create_associated_token_account_ix(payer, payer, mint);

    let mint_one =
        spl_token::instruction::mint_to(&TOKEN_PROGRAM_ID, mint, &token_account, payer, &[], 1)
            .map_err(token_instruction_error)?;

    Ok(vec![
        create_mint,
        initialize_mint,
        create_token_account,
        mint_one,
        build_mint_nft_ix(params, program_id),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::constants::CANDY_MACHINE_PROGRAM_ID;
    use crate::program::types::MintAccounts;

    fn params() -> MintNftParams {
        MintNftParams {
            accounts: MintAccounts {
                candy_machine: Pubkey::new_unique(),
                config: Pubkey::new_unique(),
                treasury: Pubkey::new_unique(),
            },
            payer: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_mint_nft_ix_layout() {
        let params = params();
        let ix = build_mint_nft_ix(&params, &CANDY_MACHINE_PROGRAM_ID);

        assert_eq!(ix.program_id, *CANDY_MACHINE_PROGRAM_ID);
        assert_eq!(ix.data, MINT_NFT_DISCRIMINATOR.to_vec());
        assert_eq!(ix.accounts.len(), 14);

        assert_eq!(ix.accounts[0].pubkey, params.accounts.config);
        assert!(!ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, params.accounts.candy_machine);
        assert!(ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[2].pubkey, params.payer);
        assert!(ix.accounts[2].is_signer && ix.accounts[2].is_writable);
        assert_eq!(ix.accounts[3].pubkey, params.accounts.treasury);
        assert_eq!(ix.accounts[4].pubkey, get_metadata_pda(&params.mint).0);
        assert_eq!(ix.accounts[5].pubkey, params.mint);
        assert!(ix.accounts[6].is_signer && ix.accounts[7].is_signer);
        assert_eq!(ix.accounts[8].pubkey, get_master_edition_pda(&params.mint).0);
        assert_eq!(ix.accounts[13].pubkey, CLOCK_SYSVAR_ID);
    }

    #[test]
    fn test_mint_instructions_order() {
        let params = params();
        let ixs = build_mint_instructions(&params, 1_461_600, &CANDY_MACHINE_PROGRAM_ID).unwrap();

        assert_eq!(ixs.len(), 5);
        assert_eq!(ixs[0].program_id, SYSTEM_PROGRAM_ID);
        assert_eq!(ixs[1].program_id, TOKEN_PROGRAM_ID);
        assert_eq!(ixs[2].program_id, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert_eq!(ixs[3].program_id, TOKEN_PROGRAM_ID);
        assert_eq!(ixs[4].program_id, *CANDY_MACHINE_PROGRAM_ID);

        // mint_to targets the payer's associated token account
        let ata = get_associated_token_address(&params.payer, &params.mint);
        assert_eq!(ixs[3].accounts[1].pubkey, ata);
        assert_eq!(ixs[2].accounts[1].pubkey, ata);
    }
}
