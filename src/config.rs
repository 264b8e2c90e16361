//! Mint configuration.
//!
//! Built in code with [`MintConfig::builder`] or loaded from JSON with
//! [`MintConfig::from_json`]. Pubkeys are base58 strings; the start date is
//! Unix millis or RFC 3339.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solana_commitment_config::CommitmentConfig;
use solana_pubkey::Pubkey;

use crate::error::{SdkError, SdkResult};
use crate::mint::poller::PollConfig;
use crate::program::constants::CANDY_MACHINE_PROGRAM_ID;
use crate::program::types::MintAccounts;
use crate::shared::serde_util::{pubkey_str, timestamp_ms};

/// Default confirmation timeout.
pub const DEFAULT_TX_TIMEOUT_MS: u64 = 30_000;

/// Durability required before a mint counts as confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn to_config(self) -> CommitmentConfig {
        match self {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

fn default_rpc_url() -> String {
    crate::network::DEFAULT_RPC_URL.to_string()
}

fn default_program_id() -> Pubkey {
    *CANDY_MACHINE_PROGRAM_ID
}

fn default_tx_timeout_ms() -> u64 {
    DEFAULT_TX_TIMEOUT_MS
}

/// Everything a mint session needs to know about its sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(with = "pubkey_str", default = "default_program_id")]
    pub program_id: Pubkey,
    #[serde(with = "pubkey_str")]
    pub candy_machine_id: Pubkey,
    #[serde(with = "pubkey_str")]
    pub config_address: Pubkey,
    #[serde(with = "pubkey_str")]
    pub treasury: Pubkey,
    /// Nominal start, shown until the on-chain go-live date is read.
    #[serde(with = "timestamp_ms")]
    pub start_date: DateTime<Utc>,
    #[serde(default = "default_tx_timeout_ms")]
    pub tx_timeout_ms: u64,
    #[serde(default)]
    pub commitment: Commitment,
    #[serde(default)]
    pub poll: PollConfig,
}

impl MintConfig {
    pub fn builder(
        candy_machine_id: Pubkey,
        config_address: Pubkey,
        treasury: Pubkey,
    ) -> MintConfigBuilder {
        MintConfigBuilder::new(candy_machine_id, config_address, treasury)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> SdkResult<Self> {
        let config: MintConfig = serde_json::from_str(json)
            .map_err(|e| SdkError::Config(format!("invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SdkResult<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(SdkError::Config("rpc_url is empty".to_string()));
        }
        for (name, key) in [
            ("candy_machine_id", &self.candy_machine_id),
            ("config_address", &self.config_address),
            ("treasury", &self.treasury),
        ] {
            if *key == Pubkey::default() {
                return Err(SdkError::Config(format!("{} is not set", name)));
            }
        }
        if self.poll.initial_interval.is_zero() {
            return Err(SdkError::Config(
                "poll.initial_interval must be greater than zero".to_string(),
            ));
        }
        if self.poll.max_interval < self.poll.initial_interval {
            return Err(SdkError::Config(
                "poll.max_interval must be at least poll.initial_interval".to_string(),
            ));
        }
        if !(self.poll.backoff_factor >= 1.0) {
            return Err(SdkError::Config(
                "poll.backoff_factor must be at least 1.0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tx_timeout(&self) -> Duration {
        Duration::from_millis(self.tx_timeout_ms)
    }

    pub fn mint_accounts(&self) -> MintAccounts {
        MintAccounts {
            candy_machine: self.candy_machine_id,
            config: self.config_address,
            treasury: self.treasury,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MintConfigBuilder {
    config: MintConfig,
}

impl MintConfigBuilder {
    fn new(candy_machine_id: Pubkey, config_address: Pubkey, treasury: Pubkey) -> Self {
        Self {
            config: MintConfig {
                rpc_url: default_rpc_url(),
                program_id: default_program_id(),
                candy_machine_id,
                config_address,
                treasury,
                start_date: Utc::now(),
                tx_timeout_ms: DEFAULT_TX_TIMEOUT_MS,
                commitment: Commitment::default(),
                poll: PollConfig::default(),
            },
        }
    }

    pub fn rpc_url(mut self, url: &str) -> Self {
        self.config.rpc_url = url.to_string();
        self
    }

    pub fn program_id(mut self, program_id: Pubkey) -> Self {
        self.config.program_id = program_id;
        self
    }

    pub fn start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.config.start_date = start_date;
        self
    }

    pub fn tx_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.tx_timeout_ms = timeout_ms;
        self
    }

    pub fn commitment(mut self, commitment: Commitment) -> Self {
        self.config.commitment = commitment;
        self
    }

    pub fn poll(mut self, poll: PollConfig) -> Self {
        self.config.poll = poll;
        self
    }

    pub fn build(self) -> SdkResult<MintConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
