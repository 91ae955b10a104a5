//! Per-operation transaction-group builders.
//!
//! Each builder assembles the exact group the validator app expects:
//! order, fee payments, notes, application arguments, and foreign-asset
//! lists. Builders validate their preconditions before touching the
//! ledger facade and logic-sig-sign every pool-sent transaction before
//! returning; the caller signs its own transactions afterwards.

pub mod bootstrap;
pub mod burn;
pub mod fees;
pub mod mint;
pub mod optin;
pub mod redeem;
pub mod swap;

use crate::ledger::Address;
use crate::txn::LogicSig;

/// Static description of a bootstrapped pool, as the builders need it.
#[derive(Debug, Clone)]
pub struct PoolRef<'a> {
  pub validator_app_id: u64,
  pub asset1_id: u64,
  pub asset2_id: u64,
  pub liquidity_asset_id: u64,
  pub address: Address,
  pub logicsig: &'a LogicSig,
}

impl PoolRef<'_> {
  /// Assets an application call may touch. The native token (ID 0) is
  /// never listed.
  #[must_use]
  pub fn foreign_assets(&self) -> Vec<u64> {
    let mut assets = vec![self.asset1_id];
    if self.asset2_id != 0 {
      assets.push(self.asset2_id);
    }
    assets.push(self.liquidity_asset_id);
    assets
  }
}
