//! Redeem accumulated protocol fees to the pool creator.

use anyhow::Result;

use crate::group::TransactionGroup;
use crate::ledger::{Address, Ledger, SuggestedParams};
use crate::operations::PoolRef;
use crate::txn::Transaction;

const REDEEM_FEES_POOL_FEE: u64 = 2_000;

pub struct RedeemFeesArgs {
  pub amount: u64,
  pub creator: Address,
  pub sender: Address,
}

/// Builds the 3-transaction fee-redemption group: fee payment, `fees`
/// application call, and the liquidity-asset payout to the creator.
pub fn prepare_redeem_fees_transactions(
  ledger: &dyn Ledger,
  params: &SuggestedParams,
  pool: &PoolRef<'_>,
  args: &RedeemFeesArgs,
) -> Result<TransactionGroup> {
  let transactions = vec![
    Transaction::payment(
      params,
      args.sender,
      pool.address,
      REDEEM_FEES_POOL_FEE,
      Some(b"fee"),
    ),
    Transaction::app_call(
      params,
      pool.address,
      pool.validator_app_id,
      vec![b"fees".to_vec()],
      Vec::new(),
      pool.foreign_assets(),
    ),
    Transaction::asset_transfer(
      params,
      pool.address,
      args.creator,
      pool.liquidity_asset_id,
      args.amount,
    ),
  ];
  let mut group = TransactionGroup::new(transactions, ledger)?;
  group.sign_with_logicsig(pool.logicsig, ledger)?;
  Ok(group)
}
