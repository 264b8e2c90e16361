//! End-to-end mint flow tests against an in-memory chain.
//!
//! The mock applies a successful send to the candy machine's counters the
//! way the program would, so reconciliation observes the effect of a mint.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use candy_mint::mint::messages;
use candy_mint::prelude::*;
use candy_mint::program::constants::CANDY_MACHINE_DISCRIMINATOR;
use chrono::Utc;
use rust_decimal::Decimal;
use solana_commitment_config::CommitmentConfig;
use solana_hash::Hash;
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::Transaction;
use tokio::sync::Notify;

// ============================================================================
// Mock chain
// ============================================================================

const PRICE: u64 = 1_000_000_000;

struct ChainState {
    machine: CandyMachine,
    balance: u64,
    /// Status queries answered with "no status yet" before the terminal one.
    pending_polls: u32,
    /// Terminal status; `None` never reaches one.
    terminal: Option<SignatureStatus>,
    reject_with: Option<RawError>,
    /// On rejection, another buyer took the last item.
    sell_out_on_reject: bool,
    /// Land the transaction on chain even though no status is reported.
    land_silently: bool,
    hold_reads: bool,
    sends: usize,
    polls: u32,
}

struct MockChain {
    state: Mutex<ChainState>,
    release_reads: Notify,
}

impl MockChain {
    fn new(available: u64, redeemed: u64, go_live: Option<i64>) -> Self {
        let machine = CandyMachine {
            discriminator: CANDY_MACHINE_DISCRIMINATOR,
            authority: Pubkey::new_unique(),
            wallet: Pubkey::new_unique(),
            token_mint: None,
            config: Pubkey::new_unique(),
            data: CandyMachineData {
                uuid: "8f2c1d".to_string(),
                price: PRICE,
                items_available: available,
                go_live_date: go_live,
            },
            items_redeemed: redeemed,
            bump: 255,
        };
        Self {
            state: Mutex::new(ChainState {
                machine,
                balance: 5 * PRICE,
                pending_polls: 0,
                terminal: Some(SignatureStatus::Succeeded),
                reject_with: None,
                sell_out_on_reject: false,
                land_silently: false,
                hold_reads: false,
                sends: 0,
                polls: 0,
            }),
            release_reads: Notify::new(),
        }
    }

    fn live(available: u64, redeemed: u64) -> Self {
        Self::new(available, redeemed, Some(Utc::now().timestamp() - 60))
    }

    fn with<F: FnOnce(&mut ChainState)>(self, f: F) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    fn sends(&self) -> usize {
        self.state.lock().unwrap().sends
    }

    fn redeemed(&self) -> u64 {
        self.state.lock().unwrap().machine.items_redeemed
    }
}

#[async_trait]
impl ChainConnection for MockChain {
    async fn get_account_data(&self, _: &Pubkey) -> Result<Option<Vec<u8>>, RawError> {
        let hold = self.state.lock().unwrap().hold_reads;
        if hold {
            self.release_reads.notified().await;
        }
        Ok(Some(self.state.lock().unwrap().machine.serialize()))
    }

    async fn get_balance(&self, _: &Pubkey) -> Result<u64, RawError> {
        Ok(self.state.lock().unwrap().balance)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RawError> {
        Ok(Hash::default())
    }

    async fn get_minimum_balance_for_rent_exemption(&self, _: usize) -> Result<u64, RawError> {
        Ok(1_461_600)
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature, RawError> {
        let mut state = self.state.lock().unwrap();
        state.sends += 1;
        if let Some(raw) = state.reject_with.clone() {
            if state.sell_out_on_reject {
                state.machine.items_redeemed = state.machine.data.items_available;
            }
            return Err(raw);
        }
        if matches!(state.terminal, Some(SignatureStatus::Succeeded)) || state.land_silently {
            state.machine.items_redeemed += 1;
            state.balance -= PRICE;
        }
        Ok(tx.signatures[0])
    }

    async fn get_signature_status(
        &self,
        _: &Signature,
        _: CommitmentConfig,
    ) -> Result<Option<SignatureStatus>, RawError> {
        let mut state = self.state.lock().unwrap();
        state.polls += 1;
        if state.polls <= state.pending_polls {
            return Ok(None);
        }
        Ok(state.terminal.clone())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn config() -> MintConfig {
    MintConfig::builder(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique())
        .tx_timeout_ms(2_000)
        .poll(PollConfig::fixed(Duration::from_millis(100)))
        .build()
        .unwrap()
}

fn session(chain: &Arc<MockChain>) -> MintSession<MockChain> {
    MintSession::new(config(), Arc::new(Keypair::new()), chain.clone())
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_sold_out_mint_is_a_no_op() {
    let chain = Arc::new(MockChain::live(100, 100));
    let s = session(&chain);
    s.refresh().await.unwrap();

    let snapshot = s.snapshot();
    assert!(snapshot.is_sold_out);
    assert_eq!(snapshot.items_remaining, 0);

    assert_eq!(s.mint().await, MintOutcome::Skipped(DenyReason::SoldOut));
    assert_eq!(chain.sends(), 0);
    assert!(!s.snapshot().is_minting);
}

#[tokio::test(start_paused = true)]
async fn test_successful_mint_reconciles_counters_and_balance() {
    let chain = Arc::new(MockChain::live(100, 40).with(|c| c.pending_polls = 3));
    let s = session(&chain);
    s.refresh().await.unwrap();
    assert_eq!(s.snapshot().balance, Some(Decimal::from(5)));

    let outcome = s.mint().await;
    assert!(outcome.is_confirmed(), "unexpected outcome {:?}", outcome);
    assert_eq!(chain.sends(), 1);

    let snapshot = s.snapshot();
    assert!(!snapshot.is_minting);
    assert_eq!(snapshot.items_redeemed, 41);
    assert_eq!(snapshot.items_remaining, 59);
    assert_eq!(snapshot.balance, Some(Decimal::from(4)));
    assert_eq!(snapshot.alert.unwrap().severity, Severity::Success);
}

#[tokio::test(start_paused = true)]
async fn test_sold_out_mid_flight_latches_before_next_read() {
    let chain = Arc::new(MockChain::live(100, 99).with(|c| {
        c.reject_with = Some(RawError::with_code(311, "custom program error: 0x137"));
        c.sell_out_on_reject = true;
    }));
    let s = Arc::new(session(&chain));
    s.refresh().await.unwrap();
    assert!(!s.snapshot().is_sold_out);

    chain.state.lock().unwrap().hold_reads = true;
    let task = tokio::spawn({
        let s = s.clone();
        async move { s.mint().await }
    });

    // The reconciliation read is parked; the latch must already be visible.
    let mut latched = false;
    for _ in 0..100 {
        let snapshot = s.snapshot();
        if chain.sends() == 1 && snapshot.is_sold_out {
            assert!(snapshot.is_minting);
            assert_eq!(snapshot.alert.unwrap().message, messages::SOLD_OUT);
            latched = true;
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(latched, "sold-out latch not set while reconciliation was pending");

    chain.state.lock().unwrap().hold_reads = false;
    chain.release_reads.notify_one();

    match task.await.unwrap() {
        MintOutcome::Failed(outcome) => assert_eq!(outcome.kind, ErrorKind::SoldOut),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(s.eligibility().reason, Some(DenyReason::SoldOut));
    assert_eq!(s.mint().await, MintOutcome::Skipped(DenyReason::SoldOut));
    assert_eq!(chain.sends(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_preflight_rejection_is_translated_from_message() {
    let chain = Arc::new(MockChain::live(100, 0).with(|c| {
        c.reject_with = Some(RawError::from_message(
            "Transaction simulation failed: Error processing Instruction 4: custom program error: 0x135",
        ));
    }));
    let s = session(&chain);
    s.refresh().await.unwrap();

    match s.mint().await {
        MintOutcome::Failed(outcome) => {
            assert_eq!(outcome.kind, ErrorKind::InsufficientFunds);
            assert_eq!(outcome.message, messages::INSUFFICIENT_FUNDS);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let snapshot = s.snapshot();
    assert!(!snapshot.is_minting);
    assert!(!snapshot.is_sold_out);
    assert_eq!(snapshot.alert.unwrap().severity, Severity::Error);
    assert!(s.eligibility().allowed);
}

#[tokio::test(start_paused = true)]
async fn test_on_chain_failure_without_code_uses_generic_message() {
    let chain = Arc::new(MockChain::live(100, 0).with(|c| {
        c.terminal = Some(SignatureStatus::Failed(RawError::from_message(
            "Transaction results in an account with insufficient funds for rent",
        )));
    }));
    let s = session(&chain);
    s.refresh().await.unwrap();

    match s.mint().await {
        MintOutcome::Failed(outcome) => {
            assert_eq!(outcome.kind, ErrorKind::Unknown);
            assert_eq!(outcome.message, messages::MINT_FAILED);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(chain.redeemed(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_reported_unconfirmed_and_reconciled() {
    let chain = Arc::new(MockChain::live(100, 10).with(|c| {
        c.terminal = None;
        c.land_silently = true;
    }));
    let s = session(&chain);
    s.refresh().await.unwrap();

    let started = tokio::time::Instant::now();
    let outcome = s.mint().await;
    assert!(matches!(outcome, MintOutcome::Unconfirmed { .. }));
    assert!(started.elapsed() >= Duration::from_millis(2_000));
    assert!(started.elapsed() < Duration::from_millis(2_500));

    let snapshot = s.snapshot();
    assert!(!snapshot.is_minting);
    assert_eq!(snapshot.items_redeemed, 11);
    let alert = snapshot.alert.unwrap();
    assert_eq!(alert.severity, Severity::Info);
    assert_eq!(alert.message, messages::MINT_UNCONFIRMED);
}

#[tokio::test(start_paused = true)]
async fn test_double_mint_submits_once() {
    let chain = Arc::new(MockChain::live(100, 0).with(|c| c.pending_polls = 2));
    let s = session(&chain);
    s.refresh().await.unwrap();

    let (first, second) = tokio::join!(s.mint(), s.mint());

    assert!(first.is_confirmed(), "unexpected outcome {:?}", first);
    assert_eq!(second, MintOutcome::Skipped(DenyReason::AttemptInProgress));
    assert_eq!(chain.sends(), 1);
    assert_eq!(chain.redeemed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sessions_do_not_share_attempt_state() {
    let chain = Arc::new(MockChain::live(100, 0).with(|c| c.pending_polls = 2));
    let alice = session(&chain);
    let bob = session(&chain);
    alice.refresh().await.unwrap();
    bob.refresh().await.unwrap();

    let (a, b) = tokio::join!(alice.mint(), bob.mint());

    assert!(a.is_confirmed(), "unexpected outcome {:?}", a);
    assert!(b.is_confirmed(), "unexpected outcome {:?}", b);
    assert_ne!(a.signature(), b.signature());
    assert_eq!(chain.sends(), 2);
    assert_eq!(alice.snapshot().items_redeemed, 2);
    assert_eq!(bob.snapshot().items_redeemed, 2);
}

#[tokio::test(start_paused = true)]
async fn test_not_started_sale_shows_countdown() {
    let go_live = Utc::now() + chrono::Duration::minutes(10);
    let chain = Arc::new(MockChain::new(100, 0, Some(go_live.timestamp())));
    let s = session(&chain);
    s.refresh().await.unwrap();

    let snapshot = s.snapshot();
    assert!(!snapshot.is_active);
    let countdown = snapshot.countdown.unwrap();
    assert!(countdown > Duration::from_secs(9 * 60));
    assert!(countdown <= Duration::from_secs(10 * 60));

    assert!(matches!(
        s.mint().await,
        MintOutcome::Skipped(DenyReason::NotStarted { .. })
    ));
    assert_eq!(chain.sends(), 0);

    // Once the window opens the latch holds, even if the clock moves back.
    let after = go_live + chrono::Duration::seconds(1);
    assert!(s.snapshot_at(after).is_active);
    assert!(s.snapshot_at(after - chrono::Duration::minutes(5)).is_active);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = config();
    let json = serde_json::to_string(&config).unwrap();
    let parsed = MintConfig::from_json(&json).unwrap();
    assert_eq!(parsed.candy_machine_id, config.candy_machine_id);
    assert_eq!(parsed.poll, config.poll);
    assert_eq!(parsed.start_date.timestamp_millis(), config.start_date.timestamp_millis());
}
