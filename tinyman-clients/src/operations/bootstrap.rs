//! Pool bootstrap: fund the pool account, opt it into the validator,
//! and create its liquidity asset.

use anyhow::Result;
use tinyman_core::asset::Asset;
use tinyman_core::encoding::int_to_bytes;
use tinyman_core::error::CoreError;

use crate::group::TransactionGroup;
use crate::ledger::{Address, Ledger, SuggestedParams};
use crate::txn::{LogicSig, Transaction};

/// Funding the pool account for 3 inner transactions plus the asset and
/// app minimum-balance increments; one increment less when asset2 is the
/// native token.
const BOOTSTRAP_FUNDING: u64 = 961_000;
const BOOTSTRAP_FUNDING_NATIVE: u64 = 860_000;

pub const LIQUIDITY_ASSET_UNIT_NAME: &str = "TMPOOL11";
pub const LIQUIDITY_ASSET_URL: &str = "https://tinyman.org";

/// Builds the bootstrap group: fee payment, validator opt-in, liquidity
/// asset creation, and the pool's asset opt-ins. 5 transactions, or 4
/// when asset2 is the native token.
pub fn prepare_bootstrap_transactions(
  ledger: &dyn Ledger,
  params: &SuggestedParams,
  validator_app_id: u64,
  asset1: &Asset,
  asset2: &Asset,
  pool_logicsig: &LogicSig,
  sender: Address,
) -> Result<TransactionGroup> {
  if asset1.id <= asset2.id {
    return Err(
      CoreError::OrderingViolation {
        asset1: asset1.id,
        asset2: asset2.id,
      }
      .into(),
    );
  }
  let pool = ledger.address_from_program(&pool_logicsig.logic)?;
  let asset2_unit = if asset2.is_native() {
    "ALGO"
  } else {
    &asset2.unit_name
  };
  let funding = if asset2.is_native() {
    BOOTSTRAP_FUNDING_NATIVE
  } else {
    BOOTSTRAP_FUNDING
  };
  let foreign_assets = if asset2.is_native() {
    vec![asset1.id]
  } else {
    vec![asset1.id, asset2.id]
  };

  let mut transactions = vec![
    Transaction::payment(params, sender, pool, funding, Some(b"fee")),
    Transaction::app_opt_in(
      params,
      pool,
      validator_app_id,
      vec![
        b"bootstrap".to_vec(),
        int_to_bytes(asset1.id).to_vec(),
        int_to_bytes(asset2.id).to_vec(),
      ],
      foreign_assets,
    ),
    Transaction::asset_create(
      params,
      pool,
      u64::MAX,
      6,
      LIQUIDITY_ASSET_UNIT_NAME,
      &format!("TinymanPool1.1 {}-{}", asset1.unit_name, asset2_unit),
      LIQUIDITY_ASSET_URL,
    ),
    Transaction::asset_opt_in(params, pool, asset1.id),
  ];
  if !asset2.is_native() {
    transactions.push(Transaction::asset_opt_in(params, pool, asset2.id));
  }

  let mut group = TransactionGroup::new(transactions, ledger)?;
  group.sign_with_logicsig(pool_logicsig, ledger)?;
  Ok(group)
}
