//! Network connection seam.
//!
//! Everything the mint engine needs from the chain goes through
//! [`ChainConnection`]. The JSON-RPC implementation lives in
//! [`crate::program::client`]; tests supply in-memory ones.

use async_trait::async_trait;
use solana_commitment_config::CommitmentConfig;
use solana_hash::Hash;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::Transaction;

use crate::error::RawError;

/// Terminal status of a transaction signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureStatus {
    /// Executed without error at the requested commitment.
    Succeeded,
    /// Executed and rejected on-chain.
    Failed(RawError),
}

/// Reads and writes against a Solana cluster.
///
/// Implementations must be safe to call concurrently. Timeouts are the
/// transport's concern, except in the confirmation poller which bounds every
/// call itself.
#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// Raw account data, or `None` if the account does not exist.
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, RawError>;

    /// Account balance in lamports.
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, RawError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, RawError>;

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize)
        -> Result<u64, RawError>;

    /// Dispatch a signed transaction. Preflight rejections surface as `Err`.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RawError>;

    /// Status of a signature, or `None` while it has not reached a terminal
    /// state at `commitment`.
    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<Option<SignatureStatus>, RawError>;
}
