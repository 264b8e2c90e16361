//! Solana JSON-RPC implementation of [`ChainConnection`].

use async_trait::async_trait;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_hash::Hash;
use solana_instruction::error::InstructionError;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::Transaction;
use solana_transaction_error::TransactionError;

use crate::config::MintConfig;
use crate::connection::{ChainConnection, SignatureStatus};
use crate::error::RawError;

/// Connection to a Solana cluster over JSON-RPC.
pub struct RpcConnection {
    /// RPC client for Solana
    pub rpc_client: RpcClient,
}

impl RpcConnection {
    /// Create a new connection at `confirmed` commitment.
    pub fn new(rpc_url: &str) -> Self {
        Self::new_with_commitment(rpc_url, CommitmentConfig::confirmed())
    }

    /// Create a new connection with a custom read commitment.
    pub fn new_with_commitment(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc_client: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
        }
    }

    /// Create a connection for a configured sale.
    pub fn from_config(config: &MintConfig) -> Self {
        Self::new_with_commitment(&config.rpc_url, config.commitment.to_config())
    }

    /// Create a new connection from an existing RpcClient.
    pub fn from_rpc_client(rpc_client: RpcClient) -> Self {
        Self { rpc_client }
    }
}

/// Extract the custom program error code carried by a transaction error.
pub fn custom_error_code(err: &TransactionError) -> Option<u32> {
    match err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
        _ => None,
    }
}

fn raw_from_transaction_error(err: &TransactionError) -> RawError {
    RawError {
        code: custom_error_code(err),
        message: err.to_string(),
    }
}

/// Keep both shapes: the structured code when the client decoded one, and the
/// full text (which includes preflight logs) for marker matching.
fn raw_from_client_error(err: ClientError) -> RawError {
    let code = err
        .get_transaction_error()
        .as_ref()
        .and_then(custom_error_code);
    RawError {
        code,
        message: err.to_string(),
    }
}

#[async_trait]
impl ChainConnection for RpcConnection {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, RawError> {
        let response = self
            .rpc_client
            .get_account_with_commitment(address, self.rpc_client.commitment())
            .await
            .map_err(raw_from_client_error)?;
        Ok(response.value.map(|account| account.data))
    }

    async fn get_balance(&self, address: &Pubkey) -> Result<u64, RawError> {
        self.rpc_client
            .get_balance(address)
            .await
            .map_err(raw_from_client_error)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RawError> {
        self.rpc_client
            .get_latest_blockhash()
            .await
            .map_err(raw_from_client_error)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, RawError> {
        self.rpc_client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(raw_from_client_error)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RawError> {
        self.rpc_client
            .send_transaction(transaction)
            .await
            .map_err(raw_from_client_error)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<Option<SignatureStatus>, RawError> {
        let response = self
            .rpc_client
            .get_signature_statuses(&[*signature])
            .await
            .map_err(raw_from_client_error)?;

        let Some(status) = response.value.into_iter().next().flatten() else {
            return Ok(None);
        };

        // A rejection is final as soon as it is observed.
        if let Some(err) = &status.err {
            return Ok(Some(SignatureStatus::Failed(raw_from_transaction_error(err))));
        }
        if status.satisfies_commitment(commitment) {
            Ok(Some(SignatureStatus::Succeeded))
        } else {
            Ok(None)
        }
    }
}
