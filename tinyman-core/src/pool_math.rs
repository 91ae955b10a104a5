//! Liquidity mint/burn math.

use crate::error::CoreError;

/// Liquidity units permanently locked by the first mint.
pub const LOCKED_POOL_TOKENS: u64 = 1_000;

fn to_u64(n: u128) -> Result<u64, CoreError> {
  u64::try_from(n).map_err(|_| CoreError::Overflow)
}

/// Integer square root by the Babylonian method.
#[must_use]
pub fn integer_sqrt(n: u128) -> u128 {
  if n <= 1 {
    return n;
  }
  let mut x0 = n / 2;
  let mut x1 = (x0 + n / x0) / 2;
  while x1 < x0 {
    x0 = x1;
    x1 = (x0 + n / x0) / 2;
  }
  x0
}

/// Liquidity minted by the pool's very first deposit: the geometric mean
/// of the two amounts, less [`LOCKED_POOL_TOKENS`] which stay locked in
/// the pool forever.
pub fn initial_mint_liquidity(
  amount1: u64,
  amount2: u64,
) -> Result<u64, CoreError> {
  let product = u128::from(amount1) * u128::from(amount2);
  let minted = integer_sqrt(product)
    .checked_sub(u128::from(LOCKED_POOL_TOKENS))
    .ok_or(CoreError::InsufficientAmounts)?;
  to_u64(minted)
}

/// Liquidity minted by a deposit into a live pool: proportional to each
/// reserve, taking the smaller of the two sides.
pub fn proportional_mint_liquidity(
  amount1: u64,
  amount2: u64,
  asset1_reserves: u64,
  asset2_reserves: u64,
  issued_liquidity: u64,
) -> Result<u64, CoreError> {
  if asset1_reserves == 0 || asset2_reserves == 0 {
    return Err(CoreError::NoLiquidity);
  }
  let issued = u128::from(issued_liquidity);
  let from1 = u128::from(amount1) * issued / u128::from(asset1_reserves);
  let from2 = u128::from(amount2) * issued / u128::from(asset2_reserves);
  to_u64(from1.min(from2))
}

/// Derives the second deposit amount from the first at the current
/// reserve ratio: `floor(given * other_reserve / given_reserve)`.
pub fn convert_by_ratio(
  given: u64,
  given_reserve: u64,
  other_reserve: u64,
) -> Result<u64, CoreError> {
  if given_reserve == 0 {
    return Err(CoreError::DivisionByZero);
  }
  let other =
    u128::from(given) * u128::from(other_reserve) / u128::from(given_reserve);
  to_u64(other)
}

/// Reserves released by burning `liquidity_in` pool tokens.
pub fn burn_amounts(
  liquidity_in: u64,
  asset1_reserves: u64,
  asset2_reserves: u64,
  issued_liquidity: u64,
) -> Result<(u64, u64), CoreError> {
  if issued_liquidity == 0 {
    return Err(CoreError::NoLiquidity);
  }
  let liquidity = u128::from(liquidity_in);
  let issued = u128::from(issued_liquidity);
  let out1 = liquidity * u128::from(asset1_reserves) / issued;
  let out2 = liquidity * u128::from(asset2_reserves) / issued;
  Ok((to_u64(out1)?, to_u64(out2)?))
}

#[cfg(test)]
mod tests {
  use super::*;

  use more_asserts::assert_le;
  use proptest::prelude::*;

  #[test]
  fn initial_mint_reference() -> Result<(), CoreError> {
    // sqrt(1e6 * 4e6) = 2e6, minus the locked 1000
    let minted = initial_mint_liquidity(1_000_000, 4_000_000)?;
    assert_eq!(minted, 1_999_000);
    Ok(())
  }

  #[test]
  fn initial_mint_below_lock_rejected() {
    assert_eq!(
      initial_mint_liquidity(10, 10),
      Err(CoreError::InsufficientAmounts)
    );
  }

  #[test]
  fn proportional_mint_takes_min_side() -> Result<(), CoreError> {
    // Balanced deposit against 1:2 reserves
    let minted =
      proportional_mint_liquidity(1_000, 2_000, 1_000_000, 2_000_000, 1_414_213)?;
    assert_eq!(minted, 1_414);
    // Starving one side caps the mint
    let starved =
      proportional_mint_liquidity(1_000, 500, 1_000_000, 2_000_000, 1_414_213)?;
    assert_eq!(starved, 353);
    Ok(())
  }

  #[test]
  fn burn_reference() -> Result<(), CoreError> {
    let (out1, out2) = burn_amounts(1_414, 1_000_000, 2_000_000, 1_414_213)?;
    assert_eq!(out1, 999);
    assert_eq!(out2, 1_999);
    Ok(())
  }

  #[test]
  fn convert_by_ratio_floors() -> Result<(), CoreError> {
    assert_eq!(convert_by_ratio(1_000, 3_000_000, 1_000_000)?, 333);
    assert_eq!(convert_by_ratio(1, 0, 1), Err(CoreError::DivisionByZero));
    Ok(())
  }

  #[test]
  fn sqrt_exact_and_flooring() {
    assert_eq!(integer_sqrt(0), 0);
    assert_eq!(integer_sqrt(1), 1);
    assert_eq!(integer_sqrt(4_000_000_000_000), 2_000_000);
    assert_eq!(integer_sqrt(4_000_000_000_001), 2_000_000);
    assert_eq!(integer_sqrt(3_999_999_999_999), 1_999_999);
  }

  proptest! {
    #[test]
    fn sqrt_is_floor_of_root(n in 0u128..u128::from(u64::MAX)) {
      let root = integer_sqrt(n);
      prop_assert!(root * root <= n);
      prop_assert!((root + 1) * (root + 1) > n);
    }

    // Burning exactly what a proportional mint issued returns the
    // deposited amounts, short only of flooring losses.
    #[test]
    fn mint_burn_inversion(
      reserves1 in 1_000_000u64..1_000_000_000_000,
      reserves2 in 1_000_000u64..1_000_000_000_000,
      amount1 in 1_000u64..1_000_000_000,
    ) {
      let issued = u64::try_from(
        integer_sqrt(u128::from(reserves1) * u128::from(reserves2)),
      )?;
      let amount2 = convert_by_ratio(amount1, reserves1, reserves2)?;
      prop_assume!(amount2 > 0);
      let minted = proportional_mint_liquidity(
        amount1, amount2, reserves1, reserves2, issued,
      )?;
      prop_assume!(minted > 0);
      let (out1, out2) = burn_amounts(
        minted,
        reserves1 + amount1,
        reserves2 + amount2,
        issued + minted,
      )?;
      assert_le!(out1, amount1);
      assert_le!(out2, amount2);
      // The mint floors at most two units of liquidity away; each unit
      // is worth roughly reserve/issued of the matching asset.
      let loss_bound = |reserve: u64, amount: u64, other: u64| {
        let grown = u128::from(reserve) + u128::from(amount);
        3 + grown / u128::from(other) + 2 * grown / u128::from(issued)
      };
      prop_assert!(
        u128::from(amount1 - out1) <= loss_bound(reserves1, amount1, reserves2)
      );
      prop_assert!(
        u128::from(amount2 - out2) <= loss_bound(reserves2, amount2, reserves1)
      );
    }
  }

  #[test]
  fn mint_burn_inversion_balanced_pool() -> Result<(), CoreError> {
    // Ratio-exact deposit: round trip loses at most 1 unit per asset.
    let minted =
      proportional_mint_liquidity(10_000, 20_000, 1_000_000, 2_000_000, 1_414_213)?;
    assert_eq!(minted, 14_142);
    let (out1, out2) =
      burn_amounts(minted, 1_010_000, 2_020_000, 1_414_213 + minted)?;
    assert_eq!(out1, 9_999);
    assert_eq!(out2, 19_999);
    Ok(())
  }
}
