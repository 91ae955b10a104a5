//! Liquidity burn: return liquidity tokens, withdraw both assets.

use anyhow::Result;

use crate::group::TransactionGroup;
use crate::ledger::{Address, Ledger, SuggestedParams};
use crate::operations::PoolRef;
use crate::txn::Transaction;

/// Covers the pool's three transactions in the group (the application
/// call and both withdrawals).
const BURN_POOL_FEE: u64 = 3_000;

pub struct BurnArgs {
  pub asset1_amount: u64,
  pub asset2_amount: u64,
  pub liquidity_asset_amount: u64,
  pub sender: Address,
}

/// Builds the 5-transaction burn group: fee payment, `burn` application
/// call, both withdrawals, and the liquidity deposit back to the pool.
pub fn prepare_burn_transactions(
  ledger: &dyn Ledger,
  params: &SuggestedParams,
  pool: &PoolRef<'_>,
  args: &BurnArgs,
) -> Result<TransactionGroup> {
  let withdraw2 = if pool.asset2_id == 0 {
    Transaction::payment(
      params,
      pool.address,
      args.sender,
      args.asset2_amount,
      None,
    )
  } else {
    Transaction::asset_transfer(
      params,
      pool.address,
      args.sender,
      pool.asset2_id,
      args.asset2_amount,
    )
  };
  let transactions = vec![
    Transaction::payment(
      params,
      args.sender,
      pool.address,
      BURN_POOL_FEE,
      Some(b"fee"),
    ),
    Transaction::app_call(
      params,
      pool.address,
      pool.validator_app_id,
      vec![b"burn".to_vec()],
      vec![args.sender],
      pool.foreign_assets(),
    ),
    Transaction::asset_transfer(
      params,
      pool.address,
      args.sender,
      pool.asset1_id,
      args.asset1_amount,
    ),
    withdraw2,
    Transaction::asset_transfer(
      params,
      args.sender,
      pool.address,
      pool.liquidity_asset_id,
      args.liquidity_asset_amount,
    ),
  ];
  let mut group = TransactionGroup::new(transactions, ledger)?;
  group.sign_with_logicsig(pool.logicsig, ledger)?;
  Ok(group)
}
