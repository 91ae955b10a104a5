//! Quote value types returned by pool computations.
//!
//! Quotes are pure snapshots: computing one has no side effects and the
//! pool does not retain them. The `*_with_slippage` accessors apply the
//! caller's tolerance with integer flooring, matching what the validator
//! app will accept at settlement.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetAmount};
use crate::error::CoreError;

/// Whether a swap fixes the amount sold or the amount bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapType {
  FixedInput,
  FixedOutput,
}

impl SwapType {
  /// Application-argument code for this swap type.
  #[must_use]
  pub fn code(self) -> &'static [u8] {
    match self {
      SwapType::FixedInput => b"fi",
      SwapType::FixedOutput => b"fo",
    }
  }
}

fn floor_scaled(amount: u64, factor: Decimal) -> Result<u64, CoreError> {
  (Decimal::from(amount) * factor)
    .floor()
    .to_u64()
    .ok_or(CoreError::Overflow)
}

/// A swap quote at a fixed pool state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapQuote {
  pub swap_type: SwapType,
  pub amount_in: AssetAmount,
  pub amount_out: AssetAmount,
  pub swap_fees: AssetAmount,
  pub slippage: Decimal,
}

impl SwapQuote {
  /// The guaranteed minimum received: reduced by slippage for
  /// fixed-input swaps, exact for fixed-output.
  pub fn amount_out_with_slippage(&self) -> Result<AssetAmount, CoreError> {
    match self.swap_type {
      SwapType::FixedOutput => Ok(self.amount_out.clone()),
      SwapType::FixedInput => {
        let amount =
          floor_scaled(self.amount_out.amount, Decimal::ONE - self.slippage)?;
        Ok(AssetAmount::new(self.amount_out.asset.clone(), amount))
      }
    }
  }

  /// The maximum paid: increased by slippage for fixed-output swaps,
  /// exact for fixed-input.
  pub fn amount_in_with_slippage(&self) -> Result<AssetAmount, CoreError> {
    match self.swap_type {
      SwapType::FixedInput => Ok(self.amount_in.clone()),
      SwapType::FixedOutput => {
        let amount =
          floor_scaled(self.amount_in.amount, Decimal::ONE + self.slippage)?;
        Ok(AssetAmount::new(self.amount_in.asset.clone(), amount))
      }
    }
  }

  /// Quoted execution price, for display only.
  #[must_use]
  pub fn price(&self) -> f64 {
    if self.amount_in.amount == 0 {
      return 0.0;
    }
    self.amount_out.amount as f64 / self.amount_in.amount as f64
  }
}

/// A liquidity-mint quote: deposits for both pool assets and the
/// liquidity tokens they buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintQuote {
  pub amounts_in: HashMap<Asset, AssetAmount>,
  pub liquidity_asset_amount: AssetAmount,
  pub slippage: Decimal,
}

impl MintQuote {
  /// The minimum acceptable liquidity-token issue under slippage.
  pub fn liquidity_asset_amount_with_slippage(
    &self,
  ) -> Result<AssetAmount, CoreError> {
    let amount = floor_scaled(
      self.liquidity_asset_amount.amount,
      Decimal::ONE - self.slippage,
    )?;
    Ok(AssetAmount::new(
      self.liquidity_asset_amount.asset.clone(),
      amount,
    ))
  }
}

/// A liquidity-burn quote: tokens consumed and reserves released.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnQuote {
  pub amounts_out: HashMap<Asset, AssetAmount>,
  pub liquidity_asset_amount: AssetAmount,
  pub slippage: Decimal,
}

impl BurnQuote {
  /// The minimum acceptable amounts out, each reduced by slippage
  /// independently.
  pub fn amounts_out_with_slippage(
    &self,
  ) -> Result<HashMap<Asset, AssetAmount>, CoreError> {
    let factor = Decimal::ONE - self.slippage;
    self
      .amounts_out
      .iter()
      .map(|(asset, amount)| {
        let floored = floor_scaled(amount.amount, factor)?;
        Ok((asset.clone(), AssetAmount::new(asset.clone(), floored)))
      })
      .collect()
  }
}
