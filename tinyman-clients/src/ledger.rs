//! Ledger facade (enables testing and keeps the chain RPC out of scope).
//!
//! The SDK never talks to a node directly: everything it needs from the
//! chain goes through [`Ledger`]. Implementations wrap a real RPC client;
//! tests substitute a deterministic mock.

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tinyman_core::state::AppState;

use crate::txn::Transaction;

/// A 32-byte account public key.
///
/// The chain's human-readable address string form is a facade concern;
/// within the SDK an address is just its key bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl fmt::Display for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for byte in &self.0 {
      write!(f, "{byte:02x}")?;
    }
    Ok(())
  }
}

impl fmt::Debug for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Address({self})")
  }
}

/// Transaction parameters suggested by the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestedParams {
  pub fee: u64,
  pub genesis_id: String,
  pub genesis_hash: [u8; 32],
  pub first_round_valid: u64,
  pub last_round_valid: u64,
  pub consensus_version: String,
  pub flat_fee: bool,
  pub min_fee: u64,
}

/// One key-value entry of an application's local state, with the key in
/// the ledger's base64 string form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateEntry {
  pub key: String,
  pub value: tinyman_core::state::StateValue,
}

/// An application's local state held by an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationLocalState {
  pub id: u64,
  pub key_value: Vec<StateEntry>,
}

impl ApplicationLocalState {
  /// Collects the entry list into the state codec's map form.
  #[must_use]
  pub fn state(&self) -> AppState {
    self
      .key_value
      .iter()
      .map(|entry| (entry.key.clone(), entry.value.clone()))
      .collect()
  }
}

/// Immutable asset metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetParams {
  pub name: String,
  pub unit_name: String,
  pub decimals: u32,
}

/// An asset created by an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedAsset {
  pub id: u64,
  pub params: AssetParams,
}

/// An asset holding of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetHolding {
  pub asset_id: u64,
  pub amount: u64,
}

/// An account snapshot as of `round`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInformation {
  pub address: Address,
  pub amount: u64,
  pub apps_local_state: Vec<ApplicationLocalState>,
  pub created_assets: Vec<CreatedAsset>,
  pub assets: Vec<AssetHolding>,
  pub round: u64,
}

impl AccountInformation {
  /// Local state for `app_id`, in map form, if the account opted in.
  #[must_use]
  pub fn local_state(&self, app_id: u64) -> Option<AppState> {
    self
      .apps_local_state
      .iter()
      .find(|app| app.id == app_id)
      .map(ApplicationLocalState::state)
  }

  #[must_use]
  pub fn holds_asset(&self, asset_id: u64) -> bool {
    self.assets.iter().any(|h| h.asset_id == asset_id)
  }

  #[must_use]
  pub fn asset_amount(&self, asset_id: u64) -> u64 {
    self
      .assets
      .iter()
      .find(|h| h.asset_id == asset_id)
      .map_or(0, |h| h.amount)
  }
}

/// A confirmed (or pending) transaction lookup result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransaction {
  pub txid: String,
  pub confirmed_round: u64,
}

/// Abstraction over the ledger operations the SDK needs.
///
/// The async methods may block on network I/O and honor whatever
/// deadline or cancellation the host platform provides. The two sync
/// methods are pure functions of their inputs, defined by the chain's
/// hashing rules rather than by node state.
#[async_trait]
pub trait Ledger: Send + Sync {
  async fn suggested_params(&self) -> Result<SuggestedParams>;

  async fn account_information(
    &self,
    address: &Address,
  ) -> Result<AccountInformation>;

  async fn asset_information(&self, asset_id: u64) -> Result<AssetParams>;

  /// Submits raw signed bytes, returning the transaction ID.
  async fn send_raw_transaction(&self, raw: &[u8]) -> Result<String>;

  async fn wait_for_confirmation(
    &self,
    txid: &str,
  ) -> Result<PendingTransaction>;

  /// The chain's program-address rule: a domain-separated hash of the
  /// program bytes producing a 32-byte public key.
  fn address_from_program(&self, program: &[u8]) -> Result<Address>;

  /// The chain's group-id rule: a hash over the per-transaction hashes.
  fn group_id(&self, transactions: &[Transaction]) -> Result<[u8; 32]>;
}
