//! Shared utilities used across the program and mint modules.

pub mod lamports;
pub mod serde_util;

pub use lamports::{lamports_to_sol, sol_to_lamports};

/// Shorten a base58 address for display: first and last `chars` characters.
///
/// Addresses too short to shorten are returned unchanged.
pub fn shorten_address(address: &str, chars: usize) -> String {
    let len = address.chars().count();
    if len <= chars * 2 {
        return address.to_string();
    }
    let head: String = address.chars().take(chars).collect();
    let tail: String = address.chars().skip(len - chars).collect();
    format!("{}...{}", head, tail)
}
