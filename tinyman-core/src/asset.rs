use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Asset ID of the chain's native token.
pub const ALGO_ASSET_ID: u64 = 0;

/// An on-chain asset, identified by its numeric ID.
///
/// ID 0 denotes the native token. Metadata is immutable once resolved;
/// equality and hashing go by ID alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
  pub id: u64,
  pub name: String,
  pub unit_name: String,
  pub decimals: u32,
}

impl Asset {
  #[must_use]
  pub fn new(id: u64, name: &str, unit_name: &str, decimals: u32) -> Asset {
    Asset {
      id,
      name: name.to_string(),
      unit_name: unit_name.to_string(),
      decimals,
    }
  }

  /// The synthetic native token record for asset ID 0.
  #[must_use]
  pub fn algo() -> Asset {
    Asset::new(ALGO_ASSET_ID, "Algo", "ALGO", 6)
  }

  #[must_use]
  pub fn is_native(&self) -> bool {
    self.id == ALGO_ASSET_ID
  }

  /// Pairs this asset with an amount of base units.
  #[must_use]
  pub fn amount(&self, amount: u64) -> AssetAmount {
    AssetAmount::new(self.clone(), amount)
  }
}

impl PartialEq for Asset {
  fn eq(&self, other: &Asset) -> bool {
    self.id == other.id
  }
}

impl Eq for Asset {}

impl Hash for Asset {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Display for Asset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}({})", self.unit_name, self.id)
  }
}

/// A quantity of one asset in base units.
///
/// Arithmetic is checked two ways: operands must refer to the same asset,
/// and results must stay within the ledger's nonnegative 64-bit range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAmount {
  pub asset: Asset,
  pub amount: u64,
}

impl AssetAmount {
  #[must_use]
  pub fn new(asset: Asset, amount: u64) -> AssetAmount {
    AssetAmount { asset, amount }
  }

  fn guard(&self, other: &AssetAmount) -> Result<(), CoreError> {
    if self.asset == other.asset {
      Ok(())
    } else {
      Err(CoreError::AssetMismatch {
        left: self.asset.id,
        right: other.asset.id,
      })
    }
  }

  pub fn checked_add(&self, other: &AssetAmount) -> Result<AssetAmount, CoreError> {
    self.guard(other)?;
    let amount = self
      .amount
      .checked_add(other.amount)
      .ok_or(CoreError::Overflow)?;
    Ok(AssetAmount::new(self.asset.clone(), amount))
  }

  pub fn checked_sub(&self, other: &AssetAmount) -> Result<AssetAmount, CoreError> {
    self.guard(other)?;
    let amount = self
      .amount
      .checked_sub(other.amount)
      .ok_or(CoreError::Underflow)?;
    Ok(AssetAmount::new(self.asset.clone(), amount))
  }

  /// Multiplies by a decimal scalar, flooring to base units.
  /// Slippage application relies on this flooring.
  pub fn mul_decimal(&self, k: Decimal) -> Result<AssetAmount, CoreError> {
    if k.is_sign_negative() {
      return Err(CoreError::Underflow);
    }
    let amount = (Decimal::from(self.amount) * k)
      .floor()
      .to_u64()
      .ok_or(CoreError::Overflow)?;
    Ok(AssetAmount::new(self.asset.clone(), amount))
  }

  pub fn eq_amount(&self, other: &AssetAmount) -> Result<bool, CoreError> {
    self.guard(other)?;
    Ok(self.amount == other.amount)
  }

  pub fn gt(&self, other: &AssetAmount) -> Result<bool, CoreError> {
    self.guard(other)?;
    Ok(self.amount > other.amount)
  }

  pub fn lt(&self, other: &AssetAmount) -> Result<bool, CoreError> {
    self.guard(other)?;
    Ok(self.amount < other.amount)
  }
}

impl fmt::Display for AssetAmount {
  /// Scales by `10^decimals` for display only; base units stay integral.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let scaled = Decimal::from_i128_with_scale(
      i128::from(self.amount),
      self.asset.decimals,
    );
    write!(f, "{} {}", scaled.normalize(), self.asset.unit_name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn usdc() -> Asset {
    Asset::new(31566704, "USDC", "USDC", 6)
  }

  fn goeth() -> Asset {
    Asset::new(386192725, "goETH", "goETH", 8)
  }

  #[test]
  fn add_sub_same_asset() -> Result<(), CoreError> {
    let a = usdc().amount(1_500_000);
    let b = usdc().amount(500_000);
    assert_eq!(a.checked_add(&b)?.amount, 2_000_000);
    assert_eq!(a.checked_sub(&b)?.amount, 1_000_000);
    Ok(())
  }

  #[test]
  fn mismatched_assets_always_fail() {
    let a = usdc().amount(1);
    let b = goeth().amount(1);
    let mismatch = CoreError::AssetMismatch {
      left: usdc().id,
      right: goeth().id,
    };
    assert_eq!(a.checked_add(&b), Err(mismatch.clone()));
    assert_eq!(a.checked_sub(&b), Err(mismatch.clone()));
    assert_eq!(a.eq_amount(&b), Err(mismatch.clone()));
    assert_eq!(a.gt(&b), Err(mismatch.clone()));
    assert_eq!(a.lt(&b), Err(mismatch));
  }

  #[test]
  fn sub_underflow() {
    let a = usdc().amount(1);
    let b = usdc().amount(2);
    assert_eq!(a.checked_sub(&b), Err(CoreError::Underflow));
  }

  #[test]
  fn mul_decimal_floors() -> Result<(), CoreError> {
    let a = usdc().amount(1_993);
    assert_eq!(a.mul_decimal(Decimal::new(995, 3))?.amount, 1_983);
    assert_eq!(a.mul_decimal(Decimal::ONE)?.amount, 1_993);
    assert_eq!(a.mul_decimal(Decimal::ZERO)?.amount, 0);
    Ok(())
  }

  #[test]
  fn equality_is_by_id() {
    let renamed = Asset::new(31566704, "USD Coin", "USDC", 6);
    assert_eq!(usdc(), renamed);
    assert_ne!(usdc(), goeth());
  }

  #[test]
  fn display_scales_by_decimals() {
    let a = usdc().amount(1_500_000);
    assert_eq!(a.to_string(), "1.5 USDC");
    let algo = Asset::algo().amount(250_000);
    assert_eq!(algo.to_string(), "0.25 ALGO");
  }
}
