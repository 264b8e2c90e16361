//! Network URL constants.

/// Default RPC endpoint (devnet).
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Mainnet-beta RPC endpoint.
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
