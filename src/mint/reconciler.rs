//! State reconciler: re-derive truth from the chain after every attempt.

use rust_decimal::Decimal;
use solana_pubkey::Pubkey;

use crate::connection::ChainConnection;
use crate::error::SdkResult;
use crate::mint::reader::fetch_sale_state;
use crate::mint::sale::SaleState;
use crate::shared::lamports_to_sol;

/// Fresh chain view for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub sale: SaleState,
    /// Wallet balance, `None` if the balance read failed.
    pub balance_lamports: Option<u64>,
}

impl Reconciliation {
    pub fn balance_sol(&self) -> Option<Decimal> {
        self.balance_lamports.map(lamports_to_sol)
    }
}

/// Read sale state and wallet balance concurrently.
///
/// Never assumes the outcome of a preceding attempt. A failed sale read fails
/// the whole reconciliation; a failed balance read only drops the balance.
pub async fn reconcile<C: ChainConnection + ?Sized>(
    identity: &Pubkey,
    candy_machine: &Pubkey,
    connection: &C,
) -> SdkResult<Reconciliation> {
    let (sale, balance) = tokio::join!(
        fetch_sale_state(identity, candy_machine, connection),
        connection.get_balance(identity),
    );

    let sale = sale?;
    let balance_lamports = match balance {
        Ok(lamports) => Some(lamports),
        Err(e) => {
            tracing::warn!(%identity, "Balance read failed: {}", e);
            None
        }
    };

    tracing::info!(
        %identity,
        redeemed = sale.items_redeemed,
        remaining = sale.items_remaining(),
        "Reconciled sale state"
    );

    Ok(Reconciliation {
        sale,
        balance_lamports,
    })
}
