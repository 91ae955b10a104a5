//! Redeem excess amounts left behind by partially-filled operations.

use anyhow::Result;

use crate::group::TransactionGroup;
use crate::ledger::{Address, Ledger, SuggestedParams};
use crate::operations::PoolRef;
use crate::txn::Transaction;

const REDEEM_POOL_FEE: u64 = 2_000;

pub struct RedeemArgs {
  pub asset_id: u64,
  pub asset_amount: u64,
  pub sender: Address,
}

/// Builds the 3-transaction redeem group: fee payment, `redeem`
/// application call, and the pool's release of the excess amount.
pub fn prepare_redeem_transactions(
  ledger: &dyn Ledger,
  params: &SuggestedParams,
  pool: &PoolRef<'_>,
  args: &RedeemArgs,
) -> Result<TransactionGroup> {
  let release = if args.asset_id == 0 {
    Transaction::payment(
      params,
      pool.address,
      args.sender,
      args.asset_amount,
      None,
    )
  } else {
    Transaction::asset_transfer(
      params,
      pool.address,
      args.sender,
      args.asset_id,
      args.asset_amount,
    )
  };
  let transactions = vec![
    Transaction::payment(
      params,
      args.sender,
      pool.address,
      REDEEM_POOL_FEE,
      Some(b"fee"),
    ),
    Transaction::app_call(
      params,
      pool.address,
      pool.validator_app_id,
      vec![b"redeem".to_vec()],
      vec![args.sender],
      pool.foreign_assets(),
    ),
    release,
  ];
  let mut group = TransactionGroup::new(transactions, ledger)?;
  group.sign_with_logicsig(pool.logicsig, ledger)?;
  Ok(group)
}
