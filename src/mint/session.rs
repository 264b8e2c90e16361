//! Per-identity mint session.
//!
//! A [`MintSession`] owns everything one wallet's mint flow needs: the last
//! sale state read from chain, the in-flight flag, the sold-out and active
//! latches, and the alert to show. Sessions for different wallets share a
//! connection but never state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_signer::Signer;

use crate::config::MintConfig;
use crate::connection::ChainConnection;
use crate::error::{RawError, SdkError, SdkResult};
use crate::mint::gate::{evaluate, ActiveLatch, DenyReason, Eligibility, GateFlags};
use crate::mint::poller::{await_confirmation, Confirmation};
use crate::mint::reconciler::{reconcile, Reconciliation};
use crate::mint::sale::SaleState;
use crate::mint::submitter::{submit_mint, WalletSigner};
use crate::mint::translator::{messages, translate_error, ErrorOutcome};
use crate::shared::lamports_to_sol;

// ============================================================================
// OUTCOMES & ALERTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Result of one call to [`MintSession::mint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// The gate refused; nothing was submitted.
    Skipped(DenyReason),
    /// The mint reached the configured commitment.
    Confirmed { signature: Signature, mint: Pubkey },
    /// Submitted, but no terminal status was seen before the timeout. The
    /// transaction may still land; the following reconciliation shows it.
    Unconfirmed { signature: Signature },
    Failed(ErrorOutcome),
}

impl MintOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, MintOutcome::Confirmed { .. })
    }

    pub fn signature(&self) -> Option<&Signature> {
        match self {
            MintOutcome::Confirmed { signature, .. } | MintOutcome::Unconfirmed { signature } => {
                Some(signature)
            }
            MintOutcome::Skipped(_) | MintOutcome::Failed(_) => None,
        }
    }
}

/// Everything a presentation layer needs, computed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiSnapshot {
    /// The sale window has opened at least once.
    pub is_active: bool,
    pub is_sold_out: bool,
    pub is_minting: bool,
    /// Wallet balance in SOL.
    pub balance: Option<Decimal>,
    pub alert: Option<Alert>,
    pub items_available: u64,
    pub items_redeemed: u64,
    pub items_remaining: u64,
    /// Time until the sale opens, if it has not yet.
    pub countdown: Option<Duration>,
}

// ============================================================================
// SESSION
// ============================================================================

#[derive(Debug, Default)]
struct SessionState {
    sale: Option<SaleState>,
    balance_lamports: Option<u64>,
    is_minting: bool,
    sold_out_latch: bool,
    active: ActiveLatch,
    alert: Option<Alert>,
}

impl SessionState {
    fn flags(&self) -> GateFlags {
        GateFlags {
            is_minting: self.is_minting,
            sold_out_latched: self.sold_out_latch,
            active_latched: self.active.is_set(),
        }
    }

    fn observe_and_evaluate(&mut self, now: DateTime<Utc>) -> Eligibility {
        self.active.observe(now, self.sale.as_ref());
        evaluate(now, self.sale.as_ref(), self.flags())
    }

    fn apply(&mut self, reconciliation: Reconciliation, now: DateTime<Utc>) {
        self.sold_out_latch = reconciliation.sale.is_sold_out();
        self.sale = Some(reconciliation.sale);
        if reconciliation.balance_lamports.is_some() {
            self.balance_lamports = reconciliation.balance_lamports;
        }
        self.active.observe(now, self.sale.as_ref());
    }
}

/// Clears the in-flight flag when the attempt ends, including when the mint
/// future is dropped mid-flight.
struct AttemptGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.is_minting = false;
    }
}

/// Mint orchestration for one wallet.
pub struct MintSession<C: ChainConnection + ?Sized> {
    config: MintConfig,
    wallet: Arc<WalletSigner>,
    identity: Pubkey,
    connection: Arc<C>,
    state: Mutex<SessionState>,
}

impl<C: ChainConnection + ?Sized> MintSession<C> {
    pub fn new(config: MintConfig, wallet: Arc<WalletSigner>, connection: Arc<C>) -> Self {
        let identity = wallet.pubkey();
        Self {
            config,
            wallet,
            identity,
            connection,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn identity(&self) -> &Pubkey {
        &self.identity
    }

    pub fn config(&self) -> &MintConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-read sale state and balance from chain.
    ///
    /// On failure the previous state is kept and a warning alert is raised.
    pub async fn refresh(&self) -> SdkResult<()> {
        let result = reconcile(&self.identity, &self.config.candy_machine_id, &*self.connection).await;
        let mut state = self.lock();
        match result {
            Ok(reconciliation) => {
                state.apply(reconciliation, Utc::now());
                if state
                    .alert
                    .as_ref()
                    .is_some_and(|a| a.message == messages::SALE_UNAVAILABLE)
                {
                    state.alert = None;
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(identity = %self.identity, "Refresh failed: {}", e);
                state.alert = Some(Alert::new(translate_error(&e).message, Severity::Warning));
                Err(e)
            }
        }
    }

    /// Whether a mint may be submitted right now.
    pub fn eligibility(&self) -> Eligibility {
        self.lock().observe_and_evaluate(Utc::now())
    }

    pub fn snapshot(&self) -> UiSnapshot {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> UiSnapshot {
        let mut state = self.lock();
        let eligibility = state.observe_and_evaluate(now);

        let countdown = match &state.sale {
            Some(_) => eligibility.countdown(),
            None => (self.config.start_date - now)
                .to_std()
                .ok()
                .filter(|d| !d.is_zero()),
        };
        let (available, redeemed, remaining) = state
            .sale
            .as_ref()
            .map(|s| (s.items_available, s.items_redeemed, s.items_remaining()))
            .unwrap_or_default();

        UiSnapshot {
            is_active: state.active.is_set(),
            is_sold_out: state.sold_out_latch || state.sale.as_ref().is_some_and(SaleState::is_sold_out),
            is_minting: state.is_minting,
            balance: state.balance_lamports.map(lamports_to_sol),
            alert: state.alert.clone(),
            items_available: available,
            items_redeemed: redeemed,
            items_remaining: remaining,
            countdown,
        }
    }

    /// Run one mint attempt end to end.
    ///
    /// Denied attempts return [`MintOutcome::Skipped`] without touching the
    /// chain. Every attempt that gets past the gate is followed by a
    /// reconciliation before the in-flight flag clears.
    pub async fn mint(&self) -> MintOutcome {
        let guard = {
            let mut state = self.lock();
            let eligibility = state.observe_and_evaluate(Utc::now());
            if let Some(reason) = eligibility.reason {
                tracing::warn!(identity = %self.identity, %reason, "Mint attempt denied");
                return MintOutcome::Skipped(reason);
            }
            if let Some(token_mint) = state.sale.as_ref().and_then(|s| s.token_mint) {
                let outcome = translate_error(&SdkError::Submission(RawError::from_message(
                    format!("sale priced in token {} is not supported", token_mint),
                )));
                state.alert = Some(Alert::new(outcome.message.clone(), Severity::Error));
                return MintOutcome::Failed(outcome);
            }
            state.is_minting = true;
            AttemptGuard { state: &self.state }
        };

        let outcome = self.attempt().await;

        {
            let mut state = self.lock();
            let alert = match &outcome {
                MintOutcome::Confirmed { .. } => {
                    Some(Alert::new(messages::MINT_SUCCEEDED, Severity::Success))
                }
                MintOutcome::Unconfirmed { .. } => {
                    Some(Alert::new(messages::MINT_UNCONFIRMED, Severity::Info))
                }
                MintOutcome::Failed(failure) => {
                    if failure.forces_sold_out() {
                        state.sold_out_latch = true;
                    }
                    Some(Alert::new(failure.message.clone(), Severity::Error))
                }
                MintOutcome::Skipped(_) => None,
            };
            if alert.is_some() {
                state.alert = alert;
            }
        }

        match reconcile(&self.identity, &self.config.candy_machine_id, &*self.connection).await {
            Ok(reconciliation) => self.lock().apply(reconciliation, Utc::now()),
            Err(e) => {
                tracing::warn!(identity = %self.identity, "Reconciliation after mint failed: {}", e);
            }
        }

        drop(guard);
        outcome
    }

    async fn attempt(&self) -> MintOutcome {
        let accounts = self.config.mint_accounts();
        let mut attempt = match submit_mint(
            &*self.wallet,
            &accounts,
            &self.identity,
            &self.config.program_id,
            &*self.connection,
        )
        .await
        {
            Ok(attempt) => attempt,
            Err(e) => {
                tracing::warn!(identity = %self.identity, "Mint submission failed: {}", e);
                return MintOutcome::Failed(translate_error(&e));
            }
        };

        let confirmation = await_confirmation(
            &attempt.signature,
            self.config.tx_timeout(),
            &*self.connection,
            self.config.commitment.to_config(),
            &self.config.poll,
        )
        .await;
        attempt.record(&confirmation);
        tracing::debug!(
            identity = %self.identity,
            signature = %attempt.signature,
            status = ?attempt.status,
            "Mint attempt settled"
        );

        match confirmation {
            Confirmation::Confirmed => MintOutcome::Confirmed {
                signature: attempt.signature,
                mint: attempt.mint,
            },
            Confirmation::Failed(raw) => MintOutcome::Failed(translate_error(&SdkError::Program(raw))),
            Confirmation::TimedOut => {
                let timeout = SdkError::ConfirmationTimeout {
                    signature: attempt.signature.to_string(),
                };
                tracing::info!(identity = %self.identity, "{}", timeout);
                MintOutcome::Unconfirmed {
                    signature: attempt.signature,
                }
            }
        }
    }
}
