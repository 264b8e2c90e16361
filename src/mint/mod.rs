//! Mint orchestration.
//!
//! [`session::MintSession`] drives one attempt through the gate, submitter,
//! poller, translator and reconciler. The stages are usable on their own.

pub mod gate;
pub mod poller;
pub mod reader;
pub mod reconciler;
pub mod sale;
pub mod session;
pub mod submitter;
pub mod translator;

pub use gate::{evaluate, ActiveLatch, DenyReason, Eligibility, GateFlags};
pub use poller::{await_confirmation, Confirmation, PollConfig};
pub use reader::fetch_sale_state;
pub use reconciler::{reconcile, Reconciliation};
pub use sale::SaleState;
pub use session::{Alert, MintOutcome, MintSession, Severity, UiSnapshot};
pub use submitter::{submit_mint, AttemptStatus, MintAttempt, WalletSigner};
pub use translator::{messages, translate, translate_error, ErrorKind, ErrorOutcome};
