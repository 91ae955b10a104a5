//! Client façade: asset cache, opt-in checks, excess scan, submission.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use base64::prelude::{Engine, BASE64_STANDARD};
use futures::future::try_join_all;
use itertools::Itertools;
use tinyman_core::asset::{Asset, AssetAmount};
use tinyman_core::state::{parse_excess_key, StateValue};
use tracing::debug;

use crate::group::TransactionGroup;
use crate::ledger::{Address, Ledger, SuggestedParams};
use crate::operations::optin;

/// Validator app ID on testnet.
pub const TESTNET_VALIDATOR_APP_ID: u64 = 62_368_684;
/// Validator app ID on mainnet.
pub const MAINNET_VALIDATOR_APP_ID: u64 = 552_635_992;

/// Result of submitting a transaction group.
#[derive(Debug, Clone)]
pub struct SubmitResult {
  pub txid: String,
  pub confirmed_round: Option<u64>,
}

/// Entry point for interacting with Tinyman pools under one validator
/// app.
///
/// Cloning is cheap; clones share the ledger handle and the asset cache.
/// Cached assets are never evicted during a process run.
#[derive(Clone)]
pub struct TinymanClient {
  ledger: Arc<dyn Ledger>,
  pub validator_app_id: u64,
  assets: Arc<Mutex<HashMap<u64, Asset>>>,
}

impl TinymanClient {
  #[must_use]
  pub fn new(ledger: Arc<dyn Ledger>, validator_app_id: u64) -> TinymanClient {
    TinymanClient {
      ledger,
      validator_app_id,
      assets: Arc::new(Mutex::new(HashMap::new())),
    }
  }

  #[must_use]
  pub fn new_testnet(ledger: Arc<dyn Ledger>) -> TinymanClient {
    TinymanClient::new(ledger, TESTNET_VALIDATOR_APP_ID)
  }

  #[must_use]
  pub fn new_mainnet(ledger: Arc<dyn Ledger>) -> TinymanClient {
    TinymanClient::new(ledger, MAINNET_VALIDATOR_APP_ID)
  }

  #[must_use]
  pub fn ledger(&self) -> &dyn Ledger {
    &*self.ledger
  }

  pub async fn suggested_params(&self) -> Result<SuggestedParams> {
    self
      .ledger
      .suggested_params()
      .await
      .context("failed to fetch suggested params")
  }

  /// Resolves an asset by ID, consulting the cache first. ID 0 resolves
  /// to the synthetic native token without a ledger round trip.
  pub async fn fetch_asset(&self, asset_id: u64) -> Result<Asset> {
    if let Some(asset) = self.cached_asset(asset_id) {
      return Ok(asset);
    }
    let asset = if asset_id == 0 {
      Asset::algo()
    } else {
      let params = self
        .ledger
        .asset_information(asset_id)
        .await
        .with_context(|| format!("failed to fetch asset {asset_id}"))?;
      Asset::new(asset_id, &params.name, &params.unit_name, params.decimals)
    };
    debug!(asset_id, name = %asset.name, "caching asset");
    self
      .assets
      .lock()
      .expect("asset cache lock")
      .insert(asset_id, asset.clone());
    Ok(asset)
  }

  fn cached_asset(&self, asset_id: u64) -> Option<Asset> {
    self
      .assets
      .lock()
      .expect("asset cache lock")
      .get(&asset_id)
      .cloned()
  }

  /// Whether the account has opted in to the validator app.
  pub async fn is_opted_in(&self, address: &Address) -> Result<bool> {
    let account = self.ledger.account_information(address).await?;
    Ok(
      account
        .apps_local_state
        .iter()
        .any(|app| app.id == self.validator_app_id),
    )
  }

  /// Whether the account holds the asset. The native token is always
  /// held.
  pub async fn asset_is_opted_in(
    &self,
    asset_id: u64,
    address: &Address,
  ) -> Result<bool> {
    if asset_id == 0 {
      return Ok(true);
    }
    let account = self.ledger.account_information(address).await?;
    Ok(account.holds_asset(asset_id))
  }

  /// Scans the account's validator-app local state for excess-amount
  /// entries, keyed `pool_pubkey || 'e' || be64(asset_id)`.
  pub async fn fetch_excess_amounts(
    &self,
    address: &Address,
  ) -> Result<HashMap<Address, HashMap<Asset, AssetAmount>>> {
    let account = self.ledger.account_information(address).await?;
    let Some(state) = account
      .apps_local_state
      .iter()
      .find(|app| app.id == self.validator_app_id)
    else {
      return Ok(HashMap::new());
    };

    let entries = state
      .key_value
      .iter()
      .filter_map(|entry| {
        let key = BASE64_STANDARD.decode(&entry.key).ok()?;
        let (pool_pubkey, asset_id) = parse_excess_key(&key)?;
        match entry.value {
          StateValue::Uint(amount) => Some((pool_pubkey, asset_id, amount)),
          StateValue::Bytes(_) => None,
        }
      })
      .collect_vec();

    let assets = try_join_all(
      entries.iter().map(|(_, asset_id, _)| self.fetch_asset(*asset_id)),
    )
    .await?;

    let mut excess: HashMap<Address, HashMap<Asset, AssetAmount>> =
      HashMap::new();
    for ((pool_pubkey, _, amount), asset) in entries.into_iter().zip(assets) {
      excess
        .entry(Address(pool_pubkey))
        .or_default()
        .insert(asset.clone(), asset.amount(amount));
    }
    Ok(excess)
  }

  /// Opt-in group for the validator app, to be sender-signed.
  pub async fn prepare_app_optin_transactions(
    &self,
    sender: Address,
  ) -> Result<TransactionGroup> {
    let params = self.suggested_params().await?;
    optin::prepare_app_optin_transactions(
      self.ledger(),
      &params,
      self.validator_app_id,
      sender,
    )
  }

  /// Opt-in group for an asset, to be sender-signed.
  pub async fn prepare_asset_optin_transactions(
    &self,
    asset_id: u64,
    sender: Address,
  ) -> Result<TransactionGroup> {
    let params = self.suggested_params().await?;
    optin::prepare_asset_optin_transactions(
      self.ledger(),
      &params,
      asset_id,
      sender,
    )
  }

  /// Submits a complete group as one atomic unit; optionally waits for
  /// confirmation.
  pub async fn submit(
    &self,
    group: &TransactionGroup,
    wait: bool,
  ) -> Result<SubmitResult> {
    let raw = group.signed_bytes()?;
    let txid = self
      .ledger
      .send_raw_transaction(&raw)
      .await
      .context("failed to submit transaction group")?;
    debug!(%txid, transactions = group.len(), "submitted group");
    if !wait {
      return Ok(SubmitResult {
        txid,
        confirmed_round: None,
      });
    }
    let pending = self
      .ledger
      .wait_for_confirmation(&txid)
      .await
      .with_context(|| format!("confirmation failed for {txid}"))?;
    debug!(round = pending.confirmed_round, "group confirmed");
    Ok(SubmitResult {
      txid: pending.txid,
      confirmed_round: Some(pending.confirmed_round),
    })
  }
}
