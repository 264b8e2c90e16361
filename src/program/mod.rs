//! Candy machine program interaction.
//!
//! Account layouts, PDAs and instruction builders for the candy machine and
//! token metadata programs, plus the JSON-RPC connection.

pub mod accounts;
#[cfg(feature = "rpc")]
pub mod client;
pub mod constants;
pub mod instructions;
pub mod pda;
pub mod types;

// Re-export commonly used items
pub use accounts::{CandyMachine, CandyMachineData};
#[cfg(feature = "rpc")]
pub use client::RpcConnection;
pub use constants::*;
pub use instructions::*;
pub use pda::*;
pub use types::*;
