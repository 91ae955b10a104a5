//! Codec for the pool's on-chain key-value store.
//!
//! The ledger exposes application state as a list of entries whose keys
//! are base64-encoded byte strings and whose values are either a 64-bit
//! unsigned integer or a byte string. Reserved keys:
//!
//! - static ASCII keys: `a1`, `a2` (asset IDs), `s1`, `s2` (reserves),
//!   `ilt` (issued liquidity), `p` (protocol fees)
//! - outstanding amounts: `'o' || be64(asset_id)`
//! - excess amounts (kept in the *user's* local state):
//!   `pool_pubkey || 'e' || be64(asset_id)`

use std::collections::HashMap;

use base64::prelude::{Engine, BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use crate::encoding::int_to_bytes;

/// Marker byte between the pool public key and the asset ID in an
/// excess-amount key.
pub const EXCESS_MARKER: u8 = b'e';

/// A decoded state value as reported by the ledger facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateValue {
  Uint(u64),
  Bytes(Vec<u8>),
}

/// Application state keyed by base64-encoded key strings, exactly as the
/// ledger returns it.
pub type AppState = HashMap<String, StateValue>;

/// Looks up `key` (raw bytes) and returns its integer value, or 0 when
/// the key is absent or holds bytes.
#[must_use]
pub fn get_state_int(state: &AppState, key: &[u8]) -> u64 {
  match state.get(&BASE64_STANDARD.encode(key)) {
    Some(StateValue::Uint(n)) => *n,
    _ => 0,
  }
}

/// Looks up `key` (raw bytes) and returns its byte value, or empty when
/// the key is absent or holds an integer.
#[must_use]
pub fn get_state_bytes(state: &AppState, key: &[u8]) -> Vec<u8> {
  match state.get(&BASE64_STANDARD.encode(key)) {
    Some(StateValue::Bytes(b)) => b.clone(),
    _ => Vec::new(),
  }
}

/// Key under which the pool tracks its unreleased obligation in `asset_id`.
#[must_use]
pub fn outstanding_key(asset_id: u64) -> Vec<u8> {
  let mut key = vec![b'o'];
  key.extend_from_slice(&int_to_bytes(asset_id));
  key
}

/// Key under which a user's local state tracks excess `asset_id` left
/// behind by `pool_pubkey`.
#[must_use]
pub fn excess_key(pool_pubkey: &[u8; 32], asset_id: u64) -> Vec<u8> {
  let mut key = Vec::with_capacity(41);
  key.extend_from_slice(pool_pubkey);
  key.push(EXCESS_MARKER);
  key.extend_from_slice(&int_to_bytes(asset_id));
  key
}

/// Parses an excess-amount key back into `(pool_pubkey, asset_id)`.
/// Returns `None` for keys of any other shape.
#[must_use]
pub fn parse_excess_key(key: &[u8]) -> Option<([u8; 32], u64)> {
  if key.len() != 41 || key[32] != EXCESS_MARKER {
    return None;
  }
  let pubkey: [u8; 32] = key[..32].try_into().ok()?;
  let asset_id: [u8; 8] = key[33..].try_into().ok()?;
  Some((pubkey, u64::from_be_bytes(asset_id)))
}
