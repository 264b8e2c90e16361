//! Lamport / SOL conversion.
//!
//! Balances are carried as integer lamports and only converted for display,
//! using `Decimal` so no precision is lost.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::program::constants::LAMPORTS_PER_SOL;

/// Number of decimal places in one SOL.
pub const SOL_DECIMALS: u32 = 9;

/// Convert lamports to SOL.
pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from_i128_with_scale(lamports as i128, SOL_DECIMALS).normalize()
}

/// Convert SOL to lamports, truncating sub-lamport digits.
///
/// Returns `None` for negative amounts or values that overflow `u64`.
pub fn sol_to_lamports(sol: Decimal) -> Option<u64> {
    if sol.is_sign_negative() {
        return None;
    }
    sol.checked_mul(Decimal::from(LAMPORTS_PER_SOL))?.trunc().to_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_lamports_to_sol() {
        assert_eq!(lamports_to_sol(1_000_000_000), Decimal::ONE);
        assert_eq!(lamports_to_sol(1_500_000_000), Decimal::from_str("1.5").unwrap());
        assert_eq!(lamports_to_sol(1), Decimal::from_str("0.000000001").unwrap());
        assert_eq!(lamports_to_sol(0), Decimal::ZERO);
    }

    #[test]
    fn test_lamports_to_sol_large_balance() {
        assert_eq!(
            lamports_to_sol(u64::MAX),
            Decimal::from_str("18446744073.709551615").unwrap()
        );
    }

    #[test]
    fn test_sol_to_lamports() {
        assert_eq!(sol_to_lamports(Decimal::from_str("0.5").unwrap()), Some(500_000_000));
        assert_eq!(sol_to_lamports(Decimal::from_str("-1").unwrap()), None);
        assert_eq!(
            sol_to_lamports(Decimal::from_str("0.0000000019").unwrap()),
            Some(1)
        );
    }
}
