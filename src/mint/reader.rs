//! Chain state reader.

use solana_pubkey::Pubkey;

use crate::connection::ChainConnection;
use crate::error::{SdkError, SdkResult};
use crate::mint::sale::SaleState;
use crate::program::accounts::CandyMachine;

/// Read the candy machine and return a fresh [`SaleState`].
///
/// `identity` is only used to attribute the read in logs. Fails with
/// [`SdkError::Unavailable`] if the account cannot be fetched, does not
/// exist, or does not decode as a candy machine.
pub async fn fetch_sale_state<C: ChainConnection + ?Sized>(
    identity: &Pubkey,
    candy_machine: &Pubkey,
    connection: &C,
) -> SdkResult<SaleState> {
    let data = connection
        .get_account_data(candy_machine)
        .await
        .map_err(|e| SdkError::Unavailable(format!("CandyMachine {}: {}", candy_machine, e)))?
        .ok_or_else(|| {
            SdkError::Unavailable(format!("CandyMachine {}: account not found", candy_machine))
        })?;

    let account = CandyMachine::deserialize(&data)
        .map_err(|e| SdkError::Unavailable(format!("CandyMachine {}: {}", candy_machine, e)))?;
    let sale = SaleState::from_account(*candy_machine, &account);

    tracing::debug!(
        %identity,
        %candy_machine,
        available = sale.items_available,
        redeemed = sale.items_redeemed,
        "Fetched sale state"
    );
    Ok(sale)
}
