//! Opt-in helpers. Both groups are sender-signed externally.

use anyhow::Result;

use crate::group::TransactionGroup;
use crate::ledger::{Address, Ledger, SuggestedParams};
use crate::txn::Transaction;

/// A single application opt-in to the validator.
pub fn prepare_app_optin_transactions(
  ledger: &dyn Ledger,
  params: &SuggestedParams,
  validator_app_id: u64,
  sender: Address,
) -> Result<TransactionGroup> {
  let transaction = Transaction::app_opt_in(
    params,
    sender,
    validator_app_id,
    Vec::new(),
    Vec::new(),
  );
  TransactionGroup::new(vec![transaction], ledger)
}

/// A single asset opt-in (0-amount self-transfer).
pub fn prepare_asset_optin_transactions(
  ledger: &dyn Ledger,
  params: &SuggestedParams,
  asset_id: u64,
  sender: Address,
) -> Result<TransactionGroup> {
  let transaction = Transaction::asset_opt_in(params, sender, asset_id);
  TransactionGroup::new(vec![transaction], ledger)
}
