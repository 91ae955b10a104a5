//! Liquidity mint: deposit both assets, receive liquidity tokens.

use anyhow::Result;

use crate::group::TransactionGroup;
use crate::ledger::{Address, Ledger, SuggestedParams};
use crate::operations::PoolRef;
use crate::txn::Transaction;

/// Covers the pool's two transactions in the group (the application call
/// and the liquidity payout).
const MINT_POOL_FEE: u64 = 2_000;

pub struct MintArgs {
  pub asset1_amount: u64,
  pub asset2_amount: u64,
  pub liquidity_asset_amount: u64,
  pub sender: Address,
}

/// Builds the 5-transaction mint group: fee payment, `mint` application
/// call, both deposits, and the pool's liquidity payout.
pub fn prepare_mint_transactions(
  ledger: &dyn Ledger,
  params: &SuggestedParams,
  pool: &PoolRef<'_>,
  args: &MintArgs,
) -> Result<TransactionGroup> {
  let deposit2 = if pool.asset2_id == 0 {
    Transaction::payment(
      params,
      args.sender,
      pool.address,
      args.asset2_amount,
      None,
    )
  } else {
    Transaction::asset_transfer(
      params,
      args.sender,
      pool.address,
      pool.asset2_id,
      args.asset2_amount,
    )
  };
  let transactions = vec![
    Transaction::payment(
      params,
      args.sender,
      pool.address,
      MINT_POOL_FEE,
      Some(b"fee"),
    ),
    Transaction::app_call(
      params,
      pool.address,
      pool.validator_app_id,
      vec![b"mint".to_vec()],
      vec![args.sender],
      pool.foreign_assets(),
    ),
    Transaction::asset_transfer(
      params,
      args.sender,
      pool.address,
      pool.asset1_id,
      args.asset1_amount,
    ),
    deposit2,
    Transaction::asset_transfer(
      params,
      pool.address,
      args.sender,
      pool.liquidity_asset_id,
      args.liquidity_asset_amount,
    ),
  ];
  let mut group = TransactionGroup::new(transactions, ledger)?;
  group.sign_with_logicsig(pool.logicsig, ledger)?;
  Ok(group)
}
