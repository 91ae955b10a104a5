//! Pool handle: state refresh, quotes, and transaction-group builders.

use std::collections::HashMap;

use anyhow::Result;
use rust_decimal::Decimal;
use tinyman_contracts::pool_logic_program;
use tinyman_core::asset::{Asset, AssetAmount};
use tinyman_core::error::CoreError;
use tinyman_core::pool_math;
use tinyman_core::quote::{BurnQuote, MintQuote, SwapQuote, SwapType};
use tinyman_core::state::{get_state_int, outstanding_key, AppState};
use tinyman_core::swap_math;
use tracing::debug;

use crate::client::TinymanClient;
use crate::group::TransactionGroup;
use crate::ledger::{AccountInformation, Address};
use crate::operations::bootstrap::prepare_bootstrap_transactions;
use crate::operations::burn::{prepare_burn_transactions, BurnArgs};
use crate::operations::fees::{prepare_redeem_fees_transactions, RedeemFeesArgs};
use crate::operations::mint::{prepare_mint_transactions, MintArgs};
use crate::operations::optin::prepare_asset_optin_transactions;
use crate::operations::redeem::{prepare_redeem_transactions, RedeemArgs};
use crate::operations::swap::{prepare_swap_transactions, SwapArgs};
use crate::operations::PoolRef;
use crate::txn::LogicSig;

const MIN_BALANCE_BASE: u64 = 100_000;
const MIN_BALANCE_PER_ASSET: u64 = 100_000;
const MIN_BALANCE_PER_APP: u64 = 100_000;
const MIN_BALANCE_PER_APP_UINT: u64 = 28_500;
const LOCAL_STATE_UINTS: u64 = 16;

/// Decoded pool account state as of one ledger round.
#[derive(Debug, Clone, Default)]
pub struct PoolInfo {
  pub address: Address,
  pub validator_app_id: u64,
  pub exists: bool,
  pub asset1_id: u64,
  pub asset2_id: u64,
  pub liquidity_asset_id: u64,
  pub liquidity_asset_name: String,
  pub asset1_reserves: u64,
  pub asset2_reserves: u64,
  pub issued_liquidity: u64,
  pub unclaimed_protocol_fees: u64,
  pub outstanding_asset1_amount: u64,
  pub outstanding_asset2_amount: u64,
  pub outstanding_liquidity_asset_amount: u64,
  pub algo_balance: u64,
  pub round: u64,
}

impl PoolInfo {
  /// Decodes a pool account snapshot. A pool only exists once
  /// `bootstrap` has created its liquidity asset; an account without
  /// validator local state reports `exists: false` with all-zero
  /// fields.
  #[must_use]
  pub fn from_account(
    account: &AccountInformation,
    validator_app_id: u64,
  ) -> PoolInfo {
    let Some(state) = account.local_state(validator_app_id) else {
      return PoolInfo {
        address: account.address,
        validator_app_id,
        round: account.round,
        ..PoolInfo::default()
      };
    };
    let asset1_id = get_state_int(&state, b"a1");
    let asset2_id = get_state_int(&state, b"a2");
    let liquidity_asset = account.created_assets.first();
    let liquidity_asset_id = liquidity_asset.map_or(0, |a| a.id);
    PoolInfo {
      address: account.address,
      validator_app_id,
      // A pool exists once bootstrap has created its liquidity asset;
      // local state alone is not enough.
      exists: liquidity_asset_id != 0,
      asset1_id,
      asset2_id,
      liquidity_asset_id,
      liquidity_asset_name: liquidity_asset
        .map(|a| a.params.name.clone())
        .unwrap_or_default(),
      asset1_reserves: get_state_int(&state, b"s1"),
      asset2_reserves: get_state_int(&state, b"s2"),
      issued_liquidity: get_state_int(&state, b"ilt"),
      unclaimed_protocol_fees: get_state_int(&state, b"p"),
      outstanding_asset1_amount: outstanding(&state, asset1_id),
      outstanding_asset2_amount: outstanding(&state, asset2_id),
      outstanding_liquidity_asset_amount: outstanding(
        &state,
        liquidity_asset_id,
      ),
      algo_balance: account.amount,
      round: account.round,
    }
  }
}

fn outstanding(state: &AppState, asset_id: u64) -> u64 {
  get_state_int(state, &outstanding_key(asset_id))
}

/// A user's stake in a pool.
#[derive(Debug, Clone)]
pub struct PoolPosition {
  pub asset1: AssetAmount,
  pub asset2: AssetAmount,
  pub liquidity_asset: AssetAmount,
  /// Fraction of the issued liquidity held, for display.
  pub share: Decimal,
}

/// A constant-product pool for one asset pair under one validator app.
///
/// The asset pair is held in canonical order: `asset1.id > asset2.id`,
/// so a native-token pair always has the native token as asset2. Quote
/// methods refresh the cached state first; `prepare_*` builders use the
/// state as of the last refresh.
#[derive(Clone)]
pub struct Pool {
  client: TinymanClient,
  pub validator_app_id: u64,
  pub asset1: Asset,
  pub asset2: Asset,
  pub exists: bool,
  pub liquidity_asset: Option<Asset>,
  pub asset1_reserves: u64,
  pub asset2_reserves: u64,
  pub issued_liquidity: u64,
  pub unclaimed_protocol_fees: u64,
  pub outstanding_asset1_amount: u64,
  pub outstanding_asset2_amount: u64,
  pub outstanding_liquidity_asset_amount: u64,
  pub algo_balance: u64,
  pub min_balance: u64,
  pub round: u64,
}

impl Pool {
  /// Builds a pool handle for the asset pair, reordering it into
  /// canonical form, and fetches current state when `fetch` is set.
  ///
  /// # Errors
  /// Fails when both assets are the same.
  pub async fn new(
    client: &TinymanClient,
    asset_a: Asset,
    asset_b: Asset,
    fetch: bool,
  ) -> Result<Pool> {
    if asset_a.id == asset_b.id {
      return Err(
        CoreError::OrderingViolation {
          asset1: asset_a.id,
          asset2: asset_b.id,
        }
        .into(),
      );
    }
    let (asset1, asset2) = if asset_a.id > asset_b.id {
      (asset_a, asset_b)
    } else {
      (asset_b, asset_a)
    };
    let mut pool = Pool {
      client: client.clone(),
      validator_app_id: client.validator_app_id,
      asset1,
      asset2,
      exists: false,
      liquidity_asset: None,
      asset1_reserves: 0,
      asset2_reserves: 0,
      issued_liquidity: 0,
      unclaimed_protocol_fees: 0,
      outstanding_asset1_amount: 0,
      outstanding_asset2_amount: 0,
      outstanding_liquidity_asset_amount: 0,
      algo_balance: 0,
      min_balance: 0,
      round: 0,
    };
    if fetch {
      pool.refresh().await?;
    }
    Ok(pool)
  }

  /// The pool's logic signature, parameterized for this pair.
  pub fn logicsig(&self) -> Result<LogicSig> {
    let logic = pool_logic_program(
      self.validator_app_id,
      self.asset1.id,
      self.asset2.id,
    )?;
    Ok(LogicSig::new(logic))
  }

  /// The pool's account address, derived from its logic program.
  pub fn address(&self) -> Result<Address> {
    let logicsig = self.logicsig()?;
    self.client.ledger().address_from_program(&logicsig.logic)
  }

  /// Refetches the pool account and updates the cached state.
  pub async fn refresh(&mut self) -> Result<()> {
    let info = self.fetch_pool_info().await?;
    self.update_from_info(&info);
    Ok(())
  }

  /// Fetches and decodes the pool account without touching the handle.
  pub async fn fetch_pool_info(&self) -> Result<PoolInfo> {
    let address = self.address()?;
    let account = self.client.ledger().account_information(&address).await?;
    Ok(PoolInfo::from_account(&account, self.validator_app_id))
  }

  /// Applies a decoded snapshot to the handle.
  ///
  /// When asset2 is the native token its reserves live in the account
  /// balance rather than in app state: everything above the minimum
  /// balance and the outstanding obligation belongs to the reserves.
  pub fn update_from_info(&mut self, info: &PoolInfo) {
    self.exists = info.exists;
    self.liquidity_asset = if info.liquidity_asset_id == 0 {
      None
    } else {
      Some(Asset::new(
        info.liquidity_asset_id,
        &info.liquidity_asset_name,
        crate::operations::bootstrap::LIQUIDITY_ASSET_UNIT_NAME,
        6,
      ))
    };
    self.asset1_reserves = info.asset1_reserves;
    self.issued_liquidity = info.issued_liquidity;
    self.unclaimed_protocol_fees = info.unclaimed_protocol_fees;
    self.outstanding_asset1_amount = info.outstanding_asset1_amount;
    self.outstanding_asset2_amount = info.outstanding_asset2_amount;
    self.outstanding_liquidity_asset_amount =
      info.outstanding_liquidity_asset_amount;
    self.algo_balance = info.algo_balance;
    self.min_balance = self.get_minimum_balance();
    self.asset2_reserves = if self.asset2.is_native() {
      info
        .algo_balance
        .saturating_sub(self.min_balance)
        .saturating_sub(info.outstanding_asset2_amount)
    } else {
      info.asset2_reserves
    };
    self.round = info.round;
    debug!(
      asset1 = self.asset1.id,
      asset2 = self.asset2.id,
      round = self.round,
      reserves1 = self.asset1_reserves,
      reserves2 = self.asset2_reserves,
      issued = self.issued_liquidity,
      "pool state refreshed"
    );
  }

  /// Minimum balance the pool account must keep: the base requirement,
  /// one increment per held asset (the liquidity asset and each
  /// non-native pool asset), and the validator opt-in with its 16 local
  /// integers.
  #[must_use]
  pub fn get_minimum_balance(&self) -> u64 {
    let num_assets = if self.asset2.is_native() { 2 } else { 3 };
    MIN_BALANCE_BASE
      + MIN_BALANCE_PER_ASSET * num_assets
      + MIN_BALANCE_PER_APP
      + MIN_BALANCE_PER_APP_UINT * LOCAL_STATE_UINTS
  }

  fn ensure_bootstrapped(&self) -> Result<(), CoreError> {
    if self.exists {
      Ok(())
    } else {
      Err(CoreError::PoolNotBootstrapped)
    }
  }

  fn liquidity_asset(&self) -> Result<&Asset, CoreError> {
    self
      .liquidity_asset
      .as_ref()
      .ok_or(CoreError::PoolNotBootstrapped)
  }

  /// Splits an amount pair given in any order into `(amount1, amount2)`
  /// along the canonical asset order.
  fn align(
    &self,
    amount_a: &AssetAmount,
    amount_b: Option<&AssetAmount>,
  ) -> Result<(Option<u64>, Option<u64>), CoreError> {
    let mut amount1 = None;
    let mut amount2 = None;
    for amount in std::iter::once(amount_a).chain(amount_b) {
      if amount.asset == self.asset1 {
        amount1 = Some(amount.amount);
      } else if amount.asset == self.asset2 {
        amount2 = Some(amount.amount);
      } else {
        return Err(CoreError::AssetMismatch {
          left: amount.asset.id,
          right: self.asset1.id,
        });
      }
    }
    Ok((amount1, amount2))
  }

  /// Quotes a liquidity mint. With one amount given the other side is
  /// derived at the current reserve ratio; the initial mint requires
  /// both amounts and admits no slippage.
  pub async fn fetch_mint_quote(
    &mut self,
    amount_a: AssetAmount,
    amount_b: Option<AssetAmount>,
    slippage: Decimal,
  ) -> Result<MintQuote> {
    self.refresh().await?;
    self.ensure_bootstrapped()?;
    let liquidity_asset = self.liquidity_asset()?.clone();
    let (amount1, amount2) = self.align(&amount_a, amount_b.as_ref())?;

    let (amount1, amount2, minted, slippage) = if self.issued_liquidity == 0 {
      let (Some(amount1), Some(amount2)) = (amount1, amount2) else {
        return Err(CoreError::InsufficientAmounts.into());
      };
      let minted = pool_math::initial_mint_liquidity(amount1, amount2)?;
      (amount1, amount2, minted, Decimal::ZERO)
    } else {
      let (amount1, amount2) = match (amount1, amount2) {
        (Some(a1), Some(a2)) => (a1, a2),
        (Some(a1), None) => (
          a1,
          pool_math::convert_by_ratio(
            a1,
            self.asset1_reserves,
            self.asset2_reserves,
          )?,
        ),
        (None, Some(a2)) => (
          pool_math::convert_by_ratio(
            a2,
            self.asset2_reserves,
            self.asset1_reserves,
          )?,
          a2,
        ),
        (None, None) => return Err(CoreError::InsufficientAmounts.into()),
      };
      let minted = pool_math::proportional_mint_liquidity(
        amount1,
        amount2,
        self.asset1_reserves,
        self.asset2_reserves,
        self.issued_liquidity,
      )?;
      (amount1, amount2, minted, slippage)
    };

    Ok(MintQuote {
      amounts_in: HashMap::from([
        (self.asset1.clone(), self.asset1.amount(amount1)),
        (self.asset2.clone(), self.asset2.amount(amount2)),
      ]),
      liquidity_asset_amount: liquidity_asset.amount(minted),
      slippage,
    })
  }

  /// Quotes a liquidity burn for `liquidity_asset_in` pool tokens.
  pub async fn fetch_burn_quote(
    &mut self,
    liquidity_asset_in: AssetAmount,
    slippage: Decimal,
  ) -> Result<BurnQuote> {
    self.refresh().await?;
    self.ensure_bootstrapped()?;
    let liquidity_asset = self.liquidity_asset()?;
    if liquidity_asset_in.asset != *liquidity_asset {
      return Err(
        CoreError::AssetMismatch {
          left: liquidity_asset_in.asset.id,
          right: liquidity_asset.id,
        }
        .into(),
      );
    }
    let (out1, out2) = pool_math::burn_amounts(
      liquidity_asset_in.amount,
      self.asset1_reserves,
      self.asset2_reserves,
      self.issued_liquidity,
    )?;
    Ok(BurnQuote {
      amounts_out: HashMap::from([
        (self.asset1.clone(), self.asset1.amount(out1)),
        (self.asset2.clone(), self.asset2.amount(out2)),
      ]),
      liquidity_asset_amount: liquidity_asset_in,
      slippage,
    })
  }

  /// Reserve supplies seen from the input side of a swap, plus the asset
  /// on the other side.
  fn swap_supplies(
    &self,
    asset_in_id: u64,
  ) -> Result<(u64, u64, Asset), CoreError> {
    if asset_in_id == self.asset1.id {
      Ok((self.asset1_reserves, self.asset2_reserves, self.asset2.clone()))
    } else if asset_in_id == self.asset2.id {
      Ok((self.asset2_reserves, self.asset1_reserves, self.asset1.clone()))
    } else {
      Err(CoreError::AssetMismatch {
        left: asset_in_id,
        right: self.asset1.id,
      })
    }
  }

  /// Quotes selling exactly `amount_in`.
  pub async fn fetch_fixed_input_swap_quote(
    &mut self,
    amount_in: AssetAmount,
    slippage: Decimal,
  ) -> Result<SwapQuote> {
    self.refresh().await?;
    self.ensure_bootstrapped()?;
    let (in_supply, out_supply, asset_out) =
      self.swap_supplies(amount_in.asset.id)?;
    let outcome =
      swap_math::fixed_input_swap(in_supply, out_supply, amount_in.amount)?;
    Ok(SwapQuote {
      swap_type: SwapType::FixedInput,
      amount_out: asset_out.amount(outcome.amount_out),
      swap_fees: amount_in.asset.amount(outcome.swap_fee),
      amount_in,
      slippage,
    })
  }

  /// Quotes buying exactly `amount_out`.
  pub async fn fetch_fixed_output_swap_quote(
    &mut self,
    amount_out: AssetAmount,
    slippage: Decimal,
  ) -> Result<SwapQuote> {
    self.refresh().await?;
    self.ensure_bootstrapped()?;
    let (out_supply, in_supply, asset_in) =
      self.swap_supplies(amount_out.asset.id)?;
    let outcome =
      swap_math::fixed_output_swap(in_supply, out_supply, amount_out.amount)?;
    Ok(SwapQuote {
      swap_type: SwapType::FixedOutput,
      amount_in: asset_in.amount(outcome.amount_in),
      swap_fees: asset_in.amount(outcome.swap_fee),
      amount_out,
      slippage,
    })
  }

  /// Converts an amount of one pool asset into the other at the current
  /// reserve ratio, without fees. For display and sizing only.
  pub fn convert(&self, amount: &AssetAmount) -> Result<AssetAmount> {
    let (given_reserve, other_reserve, other) =
      self.swap_supplies(amount.asset.id)?;
    let converted =
      pool_math::convert_by_ratio(amount.amount, given_reserve, other_reserve)?;
    Ok(other.amount(converted))
  }

  /// Mid price of asset1 denominated in asset2.
  #[must_use]
  pub fn asset1_price(&self) -> f64 {
    if self.asset1_reserves == 0 {
      return 0.0;
    }
    self.asset2_reserves as f64 / self.asset1_reserves as f64
  }

  /// Mid price of asset2 denominated in asset1.
  #[must_use]
  pub fn asset2_price(&self) -> f64 {
    if self.asset2_reserves == 0 {
      return 0.0;
    }
    self.asset1_reserves as f64 / self.asset2_reserves as f64
  }

  /// Excess amounts this pool owes `address`, out of the account-wide
  /// scan.
  pub async fn fetch_excess_amounts(
    &self,
    address: &Address,
  ) -> Result<HashMap<Asset, AssetAmount>> {
    let pool_address = self.address()?;
    let all = self.client.fetch_excess_amounts(address).await?;
    Ok(all.get(&pool_address).cloned().unwrap_or_default())
  }

  /// The user's current stake: liquidity tokens held plus the reserves
  /// they would release if burned now.
  pub async fn fetch_pool_position(
    &mut self,
    address: &Address,
  ) -> Result<PoolPosition> {
    self.refresh().await?;
    self.ensure_bootstrapped()?;
    let liquidity_asset = self.liquidity_asset()?.clone();
    let account = self.client.ledger().account_information(address).await?;
    let held = account.asset_amount(liquidity_asset.id);
    let (out1, out2) = pool_math::burn_amounts(
      held,
      self.asset1_reserves,
      self.asset2_reserves,
      self.issued_liquidity,
    )?;
    let share = if self.issued_liquidity == 0 {
      Decimal::ZERO
    } else {
      Decimal::from(held) / Decimal::from(self.issued_liquidity)
    };
    Ok(PoolPosition {
      asset1: self.asset1.amount(out1),
      asset2: self.asset2.amount(out2),
      liquidity_asset: liquidity_asset.amount(held),
      share,
    })
  }

  fn pool_ref<'a>(&self, logicsig: &'a LogicSig) -> Result<PoolRef<'a>> {
    Ok(PoolRef {
      validator_app_id: self.validator_app_id,
      asset1_id: self.asset1.id,
      asset2_id: self.asset2.id,
      liquidity_asset_id: self.liquidity_asset()?.id,
      address: self.address()?,
      logicsig,
    })
  }

  /// Bootstrap group for this pair. Valid before the pool exists.
  pub async fn prepare_bootstrap_transactions(
    &self,
    sender: Address,
  ) -> Result<TransactionGroup> {
    let params = self.client.suggested_params().await?;
    let logicsig = self.logicsig()?;
    prepare_bootstrap_transactions(
      self.client.ledger(),
      &params,
      self.validator_app_id,
      &self.asset1,
      &self.asset2,
      &logicsig,
      sender,
    )
  }

  /// Mint group from a quote, depositing the quoted amounts for at
  /// least the slippage-adjusted liquidity issue.
  pub async fn prepare_mint_transactions_from_quote(
    &self,
    quote: &MintQuote,
    sender: Address,
  ) -> Result<TransactionGroup> {
    let amount_of = |asset: &Asset| -> Result<u64, CoreError> {
      quote
        .amounts_in
        .get(asset)
        .map(|a| a.amount)
        .ok_or(CoreError::AssetMismatch {
          left: asset.id,
          right: quote.liquidity_asset_amount.asset.id,
        })
    };
    let args = MintArgs {
      asset1_amount: amount_of(&self.asset1)?,
      asset2_amount: amount_of(&self.asset2)?,
      liquidity_asset_amount: quote
        .liquidity_asset_amount_with_slippage()?
        .amount,
      sender,
    };
    let params = self.client.suggested_params().await?;
    let logicsig = self.logicsig()?;
    prepare_mint_transactions(
      self.client.ledger(),
      &params,
      &self.pool_ref(&logicsig)?,
      &args,
    )
  }

  /// Burn group from a quote, consuming the quoted liquidity tokens for
  /// at least the slippage-adjusted withdrawals.
  pub async fn prepare_burn_transactions_from_quote(
    &self,
    quote: &BurnQuote,
    sender: Address,
  ) -> Result<TransactionGroup> {
    let adjusted = quote.amounts_out_with_slippage()?;
    let amount_of = |asset: &Asset| -> Result<u64, CoreError> {
      adjusted
        .get(asset)
        .map(|a| a.amount)
        .ok_or(CoreError::AssetMismatch {
          left: asset.id,
          right: quote.liquidity_asset_amount.asset.id,
        })
    };
    let args = BurnArgs {
      asset1_amount: amount_of(&self.asset1)?,
      asset2_amount: amount_of(&self.asset2)?,
      liquidity_asset_amount: quote.liquidity_asset_amount.amount,
      sender,
    };
    let params = self.client.suggested_params().await?;
    let logicsig = self.logicsig()?;
    prepare_burn_transactions(
      self.client.ledger(),
      &params,
      &self.pool_ref(&logicsig)?,
      &args,
    )
  }

  /// Swap group from a quote, applying the quote's slippage to the
  /// variable side.
  pub async fn prepare_swap_transactions_from_quote(
    &self,
    quote: &SwapQuote,
    sender: Address,
  ) -> Result<TransactionGroup> {
    let amount_in = quote.amount_in_with_slippage()?;
    let amount_out = quote.amount_out_with_slippage()?;
    let args = SwapArgs {
      asset_in_id: amount_in.asset.id,
      asset_in_amount: amount_in.amount,
      asset_out_amount: amount_out.amount,
      swap_type: quote.swap_type,
      sender,
    };
    let params = self.client.suggested_params().await?;
    let logicsig = self.logicsig()?;
    prepare_swap_transactions(
      self.client.ledger(),
      &params,
      &self.pool_ref(&logicsig)?,
      &args,
    )
  }

  /// Redeem group for an excess amount this pool owes the sender.
  pub async fn prepare_redeem_transactions(
    &self,
    amount: AssetAmount,
    sender: Address,
  ) -> Result<TransactionGroup> {
    self.ensure_bootstrapped()?;
    let args = RedeemArgs {
      asset_id: amount.asset.id,
      asset_amount: amount.amount,
      sender,
    };
    let params = self.client.suggested_params().await?;
    let logicsig = self.logicsig()?;
    prepare_redeem_transactions(
      self.client.ledger(),
      &params,
      &self.pool_ref(&logicsig)?,
      &args,
    )
  }

  /// Fee-redemption group paying accumulated protocol fees to the pool
  /// creator.
  pub async fn prepare_redeem_fees_transactions(
    &self,
    amount: u64,
    creator: Address,
    sender: Address,
  ) -> Result<TransactionGroup> {
    self.ensure_bootstrapped()?;
    let args = RedeemFeesArgs {
      amount,
      creator,
      sender,
    };
    let params = self.client.suggested_params().await?;
    let logicsig = self.logicsig()?;
    prepare_redeem_fees_transactions(
      self.client.ledger(),
      &params,
      &self.pool_ref(&logicsig)?,
      &args,
    )
  }

  /// Opt-in group for this pool's liquidity asset, sender-signed.
  pub async fn prepare_liquidity_asset_optin_transactions(
    &self,
    sender: Address,
  ) -> Result<TransactionGroup> {
    let asset_id = self.liquidity_asset()?.id;
    let params = self.client.suggested_params().await?;
    prepare_asset_optin_transactions(
      self.client.ledger(),
      &params,
      asset_id,
      sender,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn minimum_balance_by_pair_kind() {
    let mut pool = pool_fixture(Asset::new(5, "X", "X", 6), Asset::algo());
    // base + 2 assets + app + 16 uints
    assert_eq!(pool.get_minimum_balance(), 856_000);
    pool.asset2 = Asset::new(3, "Y", "Y", 6);
    assert_eq!(pool.get_minimum_balance(), 956_000);
  }

  #[test]
  fn native_reserves_come_from_balance() {
    let mut pool = pool_fixture(Asset::new(5, "X", "X", 6), Asset::algo());
    let info = PoolInfo {
      exists: true,
      asset1_id: 5,
      asset2_id: 0,
      liquidity_asset_id: 7,
      liquidity_asset_name: "TinymanPool1.1 X-ALGO".to_string(),
      asset1_reserves: 1_000_000,
      asset2_reserves: 0,
      issued_liquidity: 1_414_213,
      outstanding_asset2_amount: 4_000,
      algo_balance: 2_860_000,
      round: 19,
      ..PoolInfo::default()
    };
    pool.update_from_info(&info);
    assert!(pool.exists);
    // 2_860_000 - 856_000 min balance - 4_000 outstanding
    assert_eq!(pool.asset2_reserves, 2_000_000);
    assert_eq!(pool.asset1_reserves, 1_000_000);
    assert_eq!(pool.liquidity_asset.as_ref().unwrap().id, 7);
    assert_eq!(pool.round, 19);
  }

  #[test]
  fn prices_are_reciprocal() {
    let mut pool = pool_fixture(Asset::new(5, "X", "X", 6), Asset::algo());
    pool.asset1_reserves = 1_000_000;
    pool.asset2_reserves = 2_000_000;
    assert!((pool.asset1_price() - 2.0).abs() < f64::EPSILON);
    assert!((pool.asset2_price() - 0.5).abs() < f64::EPSILON);
  }

  fn pool_fixture(asset1: Asset, asset2: Asset) -> Pool {
    let ledger = std::sync::Arc::new(NullLedger);
    let client = TinymanClient::new_testnet(ledger);
    Pool {
      client,
      validator_app_id: crate::client::TESTNET_VALIDATOR_APP_ID,
      asset1,
      asset2,
      exists: false,
      liquidity_asset: None,
      asset1_reserves: 0,
      asset2_reserves: 0,
      issued_liquidity: 0,
      unclaimed_protocol_fees: 0,
      outstanding_asset1_amount: 0,
      outstanding_asset2_amount: 0,
      outstanding_liquidity_asset_amount: 0,
      algo_balance: 0,
      min_balance: 0,
      round: 0,
    }
  }

  struct NullLedger;

  #[async_trait::async_trait]
  impl crate::ledger::Ledger for NullLedger {
    async fn suggested_params(
      &self,
    ) -> Result<crate::ledger::SuggestedParams> {
      anyhow::bail!("unused")
    }

    async fn account_information(
      &self,
      _address: &Address,
    ) -> Result<AccountInformation> {
      anyhow::bail!("unused")
    }

    async fn asset_information(
      &self,
      _asset_id: u64,
    ) -> Result<crate::ledger::AssetParams> {
      anyhow::bail!("unused")
    }

    async fn send_raw_transaction(&self, _raw: &[u8]) -> Result<String> {
      anyhow::bail!("unused")
    }

    async fn wait_for_confirmation(
      &self,
      _txid: &str,
    ) -> Result<crate::ledger::PendingTransaction> {
      anyhow::bail!("unused")
    }

    fn address_from_program(&self, _program: &[u8]) -> Result<Address> {
      anyhow::bail!("unused")
    }

    fn group_id(
      &self,
      _transactions: &[crate::txn::Transaction],
    ) -> Result<[u8; 32]> {
      anyhow::bail!("unused")
    }
  }
}
