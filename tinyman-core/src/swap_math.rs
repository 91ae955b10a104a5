//! Constant-product swap math.
//!
//! Reserves and amounts are 64-bit base units; every intermediate product
//! runs in `u128` so `u64 × u64` stays exact. All divisions floor, which
//! is what the validator app computes at settlement.

use crate::error::CoreError;

/// Swap fee taken on input amounts: 30 bps, i.e. `in * 997 / 1000` passes
/// through to the curve.
pub const FEE_NUMERATOR: u128 = 997;
pub const FEE_DENOMINATOR: u128 = 1000;

/// Amounts resolved by a swap computation, before slippage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
  pub amount_in: u64,
  pub amount_out: u64,
  pub swap_fee: u64,
}

fn to_u64(n: u128) -> Result<u64, CoreError> {
  u64::try_from(n).map_err(|_| CoreError::Overflow)
}

/// Quotes a fixed-input swap: selling `amount_in` of the input-side asset.
///
/// ```txt
/// in_after_fee = floor(amount_in * 997 / 1000)
/// amount_out   = out_supply - floor(k / (in_supply + in_after_fee))
/// ```
pub fn fixed_input_swap(
  in_supply: u64,
  out_supply: u64,
  amount_in: u64,
) -> Result<SwapOutcome, CoreError> {
  if in_supply == 0 || out_supply == 0 {
    return Err(CoreError::NoLiquidity);
  }
  let k = u128::from(in_supply) * u128::from(out_supply);
  let in_after_fee =
    u128::from(amount_in) * FEE_NUMERATOR / FEE_DENOMINATOR;
  let swap_fee = u128::from(amount_in) - in_after_fee;
  let new_in_supply = u128::from(in_supply) + in_after_fee;
  let amount_out = u128::from(out_supply) - k / new_in_supply;
  Ok(SwapOutcome {
    amount_in,
    amount_out: to_u64(amount_out)?,
    swap_fee: to_u64(swap_fee)?,
  })
}

/// Quotes a fixed-output swap: buying exactly `amount_out` of the
/// output-side asset.
///
/// The curve division rounds up so the quoted input always covers the
/// requested output; flooring here would under-pay the pool by one unit
/// whenever the division is inexact.
///
/// ```txt
/// net_in    = ceil(k / (out_supply - amount_out)) - in_supply
/// amount_in = floor(net_in * 1000 / 997)
/// ```
pub fn fixed_output_swap(
  in_supply: u64,
  out_supply: u64,
  amount_out: u64,
) -> Result<SwapOutcome, CoreError> {
  if in_supply == 0 || out_supply == 0 {
    return Err(CoreError::NoLiquidity);
  }
  if amount_out >= out_supply {
    return Err(CoreError::NoLiquidity);
  }
  let k = u128::from(in_supply) * u128::from(out_supply);
  let remaining_out = u128::from(out_supply) - u128::from(amount_out);
  let net_in = k.div_ceil(remaining_out) - u128::from(in_supply);
  let amount_in = net_in * FEE_DENOMINATOR / FEE_NUMERATOR;
  let swap_fee = amount_in - net_in;
  Ok(SwapOutcome {
    amount_in: to_u64(amount_in)?,
    amount_out,
    swap_fee: to_u64(swap_fee)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  use more_asserts::assert_ge;
  use proptest::prelude::*;

  const R1: u64 = 1_000_000;
  const R2: u64 = 2_000_000;

  #[test]
  fn fixed_input_reference() -> Result<(), CoreError> {
    let outcome = fixed_input_swap(R1, R2, 1_000)?;
    // in_after_fee = 997, k = 2e12, out = 2_000_000 - 1_998_007
    assert_eq!(outcome.amount_out, 1_993);
    assert_eq!(outcome.swap_fee, 3);
    assert_eq!(outcome.amount_in, 1_000);
    Ok(())
  }

  #[test]
  fn fixed_output_reference() -> Result<(), CoreError> {
    let outcome = fixed_output_swap(R1, R2, 1_993)?;
    // net_in = ceil(2e12 / 1_998_007) - 1_000_000 = 998
    assert_eq!(outcome.amount_in, 1_001);
    assert_eq!(outcome.swap_fee, 3);
    assert_eq!(outcome.amount_out, 1_993);
    Ok(())
  }

  // The curve division rounds up only when inexact, and the resulting
  // input always satisfies the constant-product requirement.
  #[test]
  fn fixed_output_covers_the_curve() -> Result<(), CoreError> {
    // 4e12 / 1_000_000 is exact: no extra unit charged.
    let exact = fixed_output_swap(2_000_000, 2_000_000, 1_000_000)?;
    assert_eq!(exact.amount_in, 2_006_018);
    assert_eq!(exact.swap_fee, 6_018);

    let outcome = fixed_output_swap(R1, R2, 1_993)?;
    let net_in = outcome.amount_in - outcome.swap_fee;
    let k = u128::from(R1) * u128::from(R2);
    let new_k = (u128::from(R1) + u128::from(net_in))
      * (u128::from(R2) - u128::from(outcome.amount_out));
    assert_ge!(new_k, k);
    Ok(())
  }

  #[test]
  fn empty_reserves_reject() {
    assert_eq!(fixed_input_swap(0, R2, 1), Err(CoreError::NoLiquidity));
    assert_eq!(fixed_input_swap(R1, 0, 1), Err(CoreError::NoLiquidity));
    assert_eq!(fixed_output_swap(0, R2, 1), Err(CoreError::NoLiquidity));
    assert_eq!(fixed_output_swap(R1, R2, R2), Err(CoreError::NoLiquidity));
  }

  proptest! {
    // After a fixed-input swap the product of reserves never decreases:
    // the fee stays in the input reserve.
    #[test]
    fn constant_product_non_decreasing(
      in_supply in 1_000u64..1_000_000_000_000,
      out_supply in 1_000u64..1_000_000_000_000,
      amount_in in 1u64..1_000_000_000,
    ) {
      let outcome = fixed_input_swap(in_supply, out_supply, amount_in)?;
      let k = u128::from(in_supply) * u128::from(out_supply);
      let new_k = (u128::from(in_supply) + u128::from(outcome.amount_in))
        * (u128::from(out_supply) - u128::from(outcome.amount_out));
      prop_assert!(new_k >= k);
    }

    // Buying back the output of a fixed-input swap never costs less than
    // the original input.
    #[test]
    fn fixed_output_dominates_fixed_input(
      in_supply in 1_000u64..1_000_000_000_000,
      out_supply in 1_000u64..1_000_000_000_000,
      amount_in in 1u64..1_000_000_000,
    ) {
      let fi = fixed_input_swap(in_supply, out_supply, amount_in)?;
      if fi.amount_out > 0 {
        let fo = fixed_output_swap(in_supply, out_supply, fi.amount_out)?;
        assert_ge!(fo.amount_in + 1, fi.amount_in);
      }
    }
  }
}
