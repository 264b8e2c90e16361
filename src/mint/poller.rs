//! Confirmation poller: wait for a signature to reach a terminal status.
//!
//! Bounded by a wall-clock deadline rather than a retry count, since
//! confirmation latency depends on cluster load. Every status query is
//! itself cut off at the deadline, so a hung transport cannot stall the
//! caller.

use std::time::Duration;

use solana_commitment_config::CommitmentConfig;
use solana_signature::Signature;
use tokio::time::Instant;

use crate::connection::{ChainConnection, SignatureStatus};
use crate::error::RawError;
use crate::mint::submitter::AttemptStatus;

/// Poll interval schedule.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay before the second status query.
    #[serde(with = "duration_ms")]
    pub initial_interval: Duration,
    /// Upper bound for any single delay.
    #[serde(with = "duration_ms")]
    pub max_interval: Duration,
    /// Multiplier applied to the delay after each query.
    pub backoff_factor: f64,
    /// Whether to add ±25% jitter to the delay.
    pub jitter: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(2),
            backoff_factor: 1.5,
            jitter: true,
        }
    }
}

impl PollConfig {
    /// Fixed interval, no backoff or jitter.
    pub fn fixed(interval: Duration) -> Self {
        Self {
            initial_interval: interval,
            max_interval: interval,
            backoff_factor: 1.0,
            jitter: false,
        }
    }

    /// Calculate delay after a given query (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_interval.as_millis() as f64
            * self.backoff_factor.powi(attempt.min(i32::MAX as u32) as i32);
        let capped = base.min(self.max_interval.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

/// Result of waiting for a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    /// Included and rejected on-chain.
    Failed(RawError),
    /// No terminal status before the deadline. The outcome is unknown.
    TimedOut,
}

impl Confirmation {
    pub fn confirmed(&self) -> bool {
        matches!(self, Confirmation::Confirmed)
    }

    /// Program error code of an on-chain rejection. `None` on success, on
    /// rejections without a custom code, and on timeout.
    pub fn error_code(&self) -> Option<u32> {
        match self {
            Confirmation::Failed(raw) => raw.code,
            _ => None,
        }
    }

    pub fn attempt_status(&self) -> AttemptStatus {
        match self {
            Confirmation::Confirmed => AttemptStatus::Confirmed,
            Confirmation::Failed(_) => AttemptStatus::Failed,
            Confirmation::TimedOut => AttemptStatus::Pending,
        }
    }
}

/// Poll `signature` until it is confirmed, rejected, or `timeout` elapses.
pub async fn await_confirmation<C: ChainConnection + ?Sized>(
    signature: &Signature,
    timeout: Duration,
    connection: &C,
    commitment: CommitmentConfig,
    poll: &PollConfig,
) -> Confirmation {
    let deadline = Instant::now() + timeout;
    let mut attempt: u32 = 0;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let query = connection.get_signature_status(signature, commitment);

        match tokio::time::timeout(remaining, query).await {
            Ok(Ok(Some(SignatureStatus::Succeeded))) => {
                tracing::info!(%signature, queries = attempt + 1, "Transaction confirmed");
                return Confirmation::Confirmed;
            }
            Ok(Ok(Some(SignatureStatus::Failed(raw)))) => {
                tracing::warn!(%signature, code = ?raw.code, "Transaction failed on-chain: {}", raw);
                return Confirmation::Failed(raw);
            }
            Ok(Ok(None)) => {
                tracing::debug!(%signature, attempt = attempt + 1, "No terminal status yet");
            }
            Ok(Err(e)) => {
                tracing::warn!(%signature, attempt = attempt + 1, "Status query failed: {}", e);
            }
            Err(_) => {
                tracing::debug!(%signature, "Status query cut off at deadline");
            }
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            tracing::warn!(
                %signature,
                timeout_ms = timeout.as_millis() as u64,
                "Confirmation timed out without a terminal status"
            );
            return Confirmation::TimedOut;
        }

        let delay = poll.delay_for_attempt(attempt).min(remaining);
        tracing::debug!(%signature, delay_ms = delay.as_millis() as u64, "Polling again");
        tokio::time::sleep(delay).await;
        attempt = attempt.saturating_add(1);
    }
}
