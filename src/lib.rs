//! # Candy Mint
//!
//! Mint orchestration for Metaplex candy machine (v1) sales.
//!
//! ## Modules
//!
//! - [`mint`]: the mint flow (sale reads, eligibility, submission,
//!   confirmation, error translation and reconciliation) and the
//!   per-wallet [`mint::MintSession`] that ties it together
//! - [`program`]: candy machine account layouts, PDAs, instruction builders
//!   and the JSON-RPC connection
//! - [`connection`]: the [`connection::ChainConnection`] seam
//! - [`config`]: sale configuration
//!
//! Plus a shared module:
//! - [`shared`]: lamport conversion, address formatting and serde helpers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use candy_mint::prelude::*;
//! use solana_keypair::Keypair;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MintConfig::from_json(&std::fs::read_to_string("mint.json")?)?;
//!     let connection = Arc::new(RpcConnection::from_config(&config));
//!     let session = MintSession::new(config, Arc::new(Keypair::new()), connection);
//!
//!     session.refresh().await?;
//!     let snapshot = session.snapshot();
//!     println!("{} of {} left", snapshot.items_remaining, snapshot.items_available);
//!
//!     match session.mint().await {
//!         MintOutcome::Confirmed { mint, .. } => println!("Minted {}", mint),
//!         other => println!("{:?}", other),
//!     }
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Mint orchestration: gate, submitter, poller, translator, reconciler and
/// the per-wallet session.
pub mod mint;

/// On-chain program interaction.
pub mod program;

/// Network seam used by every chain read and write.
pub mod connection;

/// Sale configuration and its builder.
pub mod config;

/// SDK error types.
pub mod error;

/// Shared utilities.
pub mod shared;

/// Network URL constants.
pub mod network;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use candy_mint::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Commitment, MintConfig, MintConfigBuilder};
    pub use crate::connection::{ChainConnection, SignatureStatus};
    pub use crate::error::{RawError, SdkError, SdkResult};

    pub use crate::mint::{
        // Session
        Alert, MintOutcome, MintSession, Severity, UiSnapshot,
        // Stages
        await_confirmation, evaluate, fetch_sale_state, reconcile, submit_mint, translate,
        translate_error,
        // Types
        Confirmation, DenyReason, Eligibility, ErrorKind, ErrorOutcome, MintAttempt, PollConfig,
        Reconciliation, SaleState, WalletSigner,
    };

    pub use crate::program::{
        CandyMachine, CandyMachineData, MintAccounts, MintNftParams,
        get_associated_token_address, get_master_edition_pda, get_metadata_pda,
        CANDY_MACHINE_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID,
    };

    #[cfg(feature = "rpc")]
    pub use crate::program::RpcConnection;

    pub use crate::network::{DEFAULT_RPC_URL, MAINNET_RPC_URL};

    pub use crate::shared::{lamports_to_sol, shorten_address, sol_to_lamports};
}
