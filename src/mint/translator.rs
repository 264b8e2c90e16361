//! Error translator: raw failures → user-facing outcomes.
//!
//! Submission-time failures usually arrive as text (preflight logs), and
//! confirmation-time failures as a custom program error code. Both are
//! classified through the tables below; control flow never matches on
//! codes or message text directly. Every string shown to a user is defined
//! in this module.

use std::fmt;

use crate::error::{RawError, SdkError};
use crate::program::constants::error_code;

// ============================================================================
// Messages
// ============================================================================

pub mod messages {
    pub const SOLD_OUT: &str = "SOLD OUT!";
    pub const NOT_STARTED: &str = "Minting period hasn't started yet.";
    pub const INSUFFICIENT_FUNDS: &str = "Insufficient funds to mint. Please fund your wallet.";
    pub const MINTING_FAILED: &str = "Minting failed! Please try again!";
    pub const MINT_FAILED: &str = "Mint failed! Please try again!";
    pub const MINT_SUCCEEDED: &str = "Congratulations! Mint succeeded!";
    pub const MINT_UNCONFIRMED: &str =
        "Mint submitted but not yet confirmed. Check your wallet shortly.";
    pub const SALE_UNAVAILABLE: &str = "Unable to load sale state. Retrying on next refresh.";
}

/// Closed taxonomy of user-facing failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SoldOut,
    NotStarted,
    InsufficientFunds,
    Unknown,
}

impl ErrorKind {
    fn message(self) -> &'static str {
        match self {
            ErrorKind::SoldOut => messages::SOLD_OUT,
            ErrorKind::NotStarted => messages::NOT_STARTED,
            ErrorKind::InsufficientFunds => messages::INSUFFICIENT_FUNDS,
            ErrorKind::Unknown => messages::MINTING_FAILED,
        }
    }
}

/// A failure ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorOutcome {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorOutcome {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn of_kind(kind: ErrorKind) -> Self {
        Self::new(kind, kind.message())
    }

    /// The program reported the machine empty; the gate must close at once.
    pub fn forces_sold_out(&self) -> bool {
        self.kind == ErrorKind::SoldOut
    }
}

impl fmt::Display for ErrorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============================================================================
// Mapping tables
// ============================================================================

/// Structured program error codes.
const PROGRAM_CODES: &[(u32, ErrorKind)] = &[
    (error_code::CANDY_MACHINE_EMPTY, ErrorKind::SoldOut),
    (error_code::CANDY_MACHINE_NOT_LIVE_YET, ErrorKind::NotStarted),
];

/// Markers searched for in free-text messages, first match wins.
///
/// Only sold out (`CandyMachineEmpty`) and insufficient funds (`NotEnoughSOL`)
/// are recognised in text; anything else is reported generically.
const MESSAGE_MARKERS: &[(&str, ErrorKind)] = &[
    ("0x137", ErrorKind::SoldOut),
    ("0x135", ErrorKind::InsufficientFunds),
];

/// Substring match where a hex marker must not run into further hex digits
/// (`0x137` must not match `0x1370`).
fn contains_marker(message: &str, marker: &str) -> bool {
    let is_hex = marker.starts_with("0x");
    message.match_indices(marker).any(|(start, matched)| {
        !is_hex
            || !message[start + matched.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_hexdigit())
    })
}

fn kind_for_code(code: u32) -> Option<ErrorKind> {
    PROGRAM_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, kind)| *kind)
}

fn kind_for_message(message: &str) -> Option<ErrorKind> {
    let lowered = message.to_ascii_lowercase();
    MESSAGE_MARKERS
        .iter()
        .find(|(marker, _)| contains_marker(&lowered, marker))
        .map(|(_, kind)| *kind)
}

// ============================================================================
// Translation
// ============================================================================

/// Classify a raw failure.
///
/// With a code: known codes map to their kind, unknown codes pass the raw
/// message through. Without one: marker matching, falling back to a generic
/// retry message.
pub fn translate(raw: &RawError) -> ErrorOutcome {
    match raw.code {
        Some(code) => match kind_for_code(code) {
            Some(kind) => ErrorOutcome::of_kind(kind),
            None => ErrorOutcome::new(ErrorKind::Unknown, raw.message.clone()),
        },
        None => match kind_for_message(&raw.message) {
            Some(kind) => ErrorOutcome::of_kind(kind),
            None => ErrorOutcome::of_kind(ErrorKind::Unknown),
        },
    }
}

/// Classify any SDK error surfaced at the mint-attempt boundary.
pub fn translate_error(error: &SdkError) -> ErrorOutcome {
    match error {
        SdkError::Submission(raw) => translate(raw),
        SdkError::Program(raw) => {
            let outcome = translate(raw);
            if outcome.kind == ErrorKind::Unknown && raw.code.is_none() {
                ErrorOutcome::new(ErrorKind::Unknown, messages::MINT_FAILED)
            } else {
                outcome
            }
        }
        SdkError::Unavailable(_)
        | SdkError::InvalidDiscriminator { .. }
        | SdkError::InvalidDataLength { .. }
        | SdkError::InvalidAccountData(_) => {
            ErrorOutcome::new(ErrorKind::Unknown, messages::SALE_UNAVAILABLE)
        }
        SdkError::ConfirmationTimeout { .. } => {
            ErrorOutcome::new(ErrorKind::Unknown, messages::MINT_UNCONFIRMED)
        }
        SdkError::Config(_) => ErrorOutcome::of_kind(ErrorKind::Unknown),
    }
}
