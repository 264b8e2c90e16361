//! Eligibility gate: may this identity mint right now?
//!
//! Pure decision over the clock, the last sale state and the session's local
//! flags. No I/O; the chain remains the final arbiter of whether a mint
//! actually succeeds.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::mint::sale::SaleState;

/// Local flags the gate consults besides the sale state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateFlags {
    /// An attempt for this identity is in flight.
    pub is_minting: bool,
    /// The program reported the machine empty since the last chain read.
    pub sold_out_latched: bool,
    /// The sale has been observed open at least once.
    pub active_latched: bool,
}

/// Why minting is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    AttemptInProgress,
    SoldOut,
    /// No sale state has been read yet.
    NotLoaded,
    /// The sale opens after `countdown`.
    NotStarted { countdown: Duration },
    /// The machine has no go-live date.
    NotScheduled,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::AttemptInProgress => write!(f, "attempt in progress"),
            DenyReason::SoldOut => write!(f, "sold out"),
            DenyReason::NotLoaded => write!(f, "sale state not loaded"),
            DenyReason::NotStarted { .. } => write!(f, "not started"),
            DenyReason::NotScheduled => write!(f, "not scheduled"),
        }
    }
}

/// Gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub allowed: bool,
    pub reason: Option<DenyReason>,
}

impl Eligibility {
    fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn deny(reason: DenyReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }

    /// Time left until the sale opens, when denied for that reason.
    pub fn countdown(&self) -> Option<Duration> {
        match self.reason {
            Some(DenyReason::NotStarted { countdown }) => Some(countdown),
            _ => None,
        }
    }
}

/// Decide whether a mint may be submitted.
///
/// Rules in priority order: in-flight attempt, sold out (counters or latch),
/// sale not loaded, sale not yet open. Once `active_latched` is set the
/// go-live date is no longer consulted.
pub fn evaluate(now: DateTime<Utc>, sale: Option<&SaleState>, flags: GateFlags) -> Eligibility {
    if flags.is_minting {
        return Eligibility::deny(DenyReason::AttemptInProgress);
    }
    if flags.sold_out_latched || sale.is_some_and(SaleState::is_sold_out) {
        return Eligibility::deny(DenyReason::SoldOut);
    }
    let Some(sale) = sale else {
        return Eligibility::deny(DenyReason::NotLoaded);
    };
    if !flags.active_latched {
        match sale.go_live_date {
            None => return Eligibility::deny(DenyReason::NotScheduled),
            Some(go_live) if now < go_live => {
                let countdown = (go_live - now).to_std().unwrap_or(Duration::ZERO);
                return Eligibility::deny(DenyReason::NotStarted { countdown });
            }
            Some(_) => {}
        }
    }
    Eligibility::allow()
}

/// One-way latch recording that the sale window has opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveLatch {
    set: bool,
}

impl ActiveLatch {
    /// Set the latch if `sale` has started at `now`. Returns the latch state.
    pub fn observe(&mut self, now: DateTime<Utc>, sale: Option<&SaleState>) -> bool {
        if !self.set && sale.is_some_and(|s| s.has_started(now)) {
            self.set = true;
        }
        self.set
    }

    pub fn is_set(&self) -> bool {
        self.set
    }
}
