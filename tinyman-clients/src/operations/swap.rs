//! Swap: trade one pool asset for the other.

use anyhow::Result;
use tinyman_core::quote::SwapType;

use crate::group::TransactionGroup;
use crate::ledger::{Address, Ledger, SuggestedParams};
use crate::operations::PoolRef;
use crate::txn::Transaction;

/// Covers the pool's two transactions in the group (the application call
/// and the outgoing transfer).
const SWAP_POOL_FEE: u64 = 2_000;

pub struct SwapArgs {
  pub asset_in_id: u64,
  pub asset_in_amount: u64,
  pub asset_out_amount: u64,
  pub swap_type: SwapType,
  pub sender: Address,
}

fn transfer(
  params: &SuggestedParams,
  sender: Address,
  receiver: Address,
  asset_id: u64,
  amount: u64,
) -> Transaction {
  if asset_id == 0 {
    Transaction::payment(params, sender, receiver, amount, None)
  } else {
    Transaction::asset_transfer(params, sender, receiver, asset_id, amount)
  }
}

/// Builds the 4-transaction swap group: fee payment, `swap` application
/// call with the swap-type code, the deposit, and the pool's payout of
/// its other asset.
pub fn prepare_swap_transactions(
  ledger: &dyn Ledger,
  params: &SuggestedParams,
  pool: &PoolRef<'_>,
  args: &SwapArgs,
) -> Result<TransactionGroup> {
  let asset_out_id = if args.asset_in_id == pool.asset1_id {
    pool.asset2_id
  } else {
    pool.asset1_id
  };
  let transactions = vec![
    Transaction::payment(
      params,
      args.sender,
      pool.address,
      SWAP_POOL_FEE,
      Some(b"fee"),
    ),
    Transaction::app_call(
      params,
      pool.address,
      pool.validator_app_id,
      vec![b"swap".to_vec(), args.swap_type.code().to_vec()],
      vec![args.sender],
      pool.foreign_assets(),
    ),
    transfer(
      params,
      args.sender,
      pool.address,
      args.asset_in_id,
      args.asset_in_amount,
    ),
    transfer(
      params,
      pool.address,
      args.sender,
      asset_out_id,
      args.asset_out_amount,
    ),
  ];
  let mut group = TransactionGroup::new(transactions, ledger)?;
  group.sign_with_logicsig(pool.logicsig, ledger)?;
  Ok(group)
}
