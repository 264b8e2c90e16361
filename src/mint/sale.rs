//! Sale state as read from the candy machine.

use chrono::{DateTime, Utc};
use solana_pubkey::Pubkey;

use crate::program::accounts::CandyMachine;

/// Authoritative sale configuration and counters for one candy machine.
///
/// Replaced wholesale on every read; never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleState {
    /// Candy machine this state was read from
    pub candy_machine: Pubkey,
    /// Treasury recorded on-chain
    pub treasury: Pubkey,
    /// SPL payment mint, `None` when priced in SOL
    pub token_mint: Option<Pubkey>,
    /// Price per mint in lamports (or payment token base units)
    pub price: u64,
    pub items_available: u64,
    pub items_redeemed: u64,
    /// Public sale start, `None` if the authority has not scheduled one
    pub go_live_date: Option<DateTime<Utc>>,
}

impl SaleState {
    /// Build from a decoded account.
    ///
    /// `items_redeemed` is clamped to `items_available` so the counters stay
    /// consistent even if the account is mid-migration.
    pub fn from_account(candy_machine: Pubkey, account: &CandyMachine) -> Self {
        let items_available = account.data.items_available;
        Self {
            candy_machine,
            treasury: account.wallet,
            token_mint: account.token_mint,
            price: account.data.price,
            items_available,
            items_redeemed: account.items_redeemed.min(items_available),
            go_live_date: account
                .data
                .go_live_date
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
        }
    }

    /// Items left to mint, always derived from the two counters.
    pub fn items_remaining(&self) -> u64 {
        self.items_available.saturating_sub(self.items_redeemed)
    }

    pub fn is_sold_out(&self) -> bool {
        self.items_remaining() == 0
    }

    /// Whether `now` is at or past the go-live date.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.go_live_date.is_some_and(|go_live| now >= go_live)
    }
}
