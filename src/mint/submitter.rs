//! Transaction submitter: build, sign and send one mint transaction.

use chrono::{DateTime, Utc};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;
use solana_transaction::Transaction;

use crate::connection::ChainConnection;
use crate::error::{RawError, SdkError, SdkResult};
use crate::mint::poller::Confirmation;
use crate::program::constants::MINT_ACCOUNT_SIZE;
use crate::program::instructions::build_mint_instructions;
use crate::program::types::{MintAccounts, MintNftParams};

/// A wallet able to sign mint transactions.
pub type WalletSigner = dyn Signer + Send + Sync;

/// Lifecycle of a single submitted mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Pending,
    Confirmed,
    Failed,
}

/// One mint transaction in flight. Lives for a single attempt only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintAttempt {
    pub signature: Signature,
    /// Address of the minted token's mint account
    pub mint: Pubkey,
    pub submitted_at: DateTime<Utc>,
    pub status: AttemptStatus,
}

impl MintAttempt {
    /// Record the poller's verdict on this attempt.
    pub fn record(&mut self, confirmation: &Confirmation) {
        self.status = confirmation.attempt_status();
    }
}

fn submission_error(raw: RawError) -> SdkError {
    SdkError::Submission(raw)
}

/// Build, sign and send a mint transaction for `wallet`.
///
/// Exactly one transaction is dispatched per call. Callers must not invoke
/// this while a previous attempt for the same wallet is still pending.
pub async fn submit_mint<C: ChainConnection + ?Sized>(
    wallet: &WalletSigner,
    accounts: &MintAccounts,
    payer: &Pubkey,
    program_id: &Pubkey,
    connection: &C,
) -> SdkResult<MintAttempt> {
    let mint = Keypair::new();
    let params = MintNftParams {
        accounts: *accounts,
        payer: *payer,
        mint: mint.pubkey(),
    };

    let rent = connection
        .get_minimum_balance_for_rent_exemption(MINT_ACCOUNT_SIZE)
        .await
        .map_err(submission_error)?;
    let instructions = build_mint_instructions(&params, rent, program_id)?;
    let blockhash = connection
        .get_latest_blockhash()
        .await
        .map_err(submission_error)?;

    let mut transaction = Transaction::new_with_payer(&instructions, Some(payer));
    {
        let signers: Vec<&dyn Signer> = vec![wallet as &dyn Signer, &mint as &dyn Signer];
        transaction
            .try_sign(&signers, blockhash)
            .map_err(|e| submission_error(RawError::from_message(format!("signing failed: {}", e))))?;
    }

    let signature = connection
        .send_transaction(&transaction)
        .await
        .map_err(submission_error)?;

    tracing::info!(
        %signature,
        mint = %params.mint,
        candy_machine = %accounts.candy_machine,
        "Mint transaction submitted"
    );

    Ok(MintAttempt {
        signature,
        mint: params.mint,
        submitted_at: Utc::now(),
        status: AttemptStatus::Pending,
    })
}
