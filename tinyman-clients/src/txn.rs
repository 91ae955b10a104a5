//! Transaction model and signing facades.
//!
//! The canonical wire encoding of a signed transaction belongs to the
//! chain standard and is out of scope; submissions serialize through
//! `bincode` at the facade boundary, and a real ledger implementation
//! re-encodes as needed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ledger::{Address, SuggestedParams};

/// Operation-specific part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionPayload {
  Payment {
    receiver: Address,
    amount: u64,
  },
  AssetTransfer {
    asset_id: u64,
    receiver: Address,
    amount: u64,
  },
  AssetCreate {
    total: u64,
    decimals: u32,
    unit_name: String,
    asset_name: String,
    url: String,
  },
  AppOptIn {
    app_id: u64,
    app_args: Vec<Vec<u8>>,
    foreign_assets: Vec<u64>,
  },
  AppNoOp {
    app_id: u64,
    app_args: Vec<Vec<u8>>,
    accounts: Vec<Address>,
    foreign_assets: Vec<u64>,
  },
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
  pub sender: Address,
  pub fee: u64,
  pub first_valid: u64,
  pub last_valid: u64,
  pub genesis_id: String,
  pub genesis_hash: [u8; 32],
  pub note: Option<Vec<u8>>,
  pub group: Option<[u8; 32]>,
  pub payload: TransactionPayload,
}

impl Transaction {
  fn from_params(
    params: &SuggestedParams,
    sender: Address,
    note: Option<&[u8]>,
    payload: TransactionPayload,
  ) -> Transaction {
    Transaction {
      sender,
      fee: if params.flat_fee { params.fee } else { params.min_fee },
      first_valid: params.first_round_valid,
      last_valid: params.last_round_valid,
      genesis_id: params.genesis_id.clone(),
      genesis_hash: params.genesis_hash,
      note: note.map(<[u8]>::to_vec),
      group: None,
      payload,
    }
  }

  #[must_use]
  pub fn payment(
    params: &SuggestedParams,
    sender: Address,
    receiver: Address,
    amount: u64,
    note: Option<&[u8]>,
  ) -> Transaction {
    Transaction::from_params(
      params,
      sender,
      note,
      TransactionPayload::Payment { receiver, amount },
    )
  }

  #[must_use]
  pub fn asset_transfer(
    params: &SuggestedParams,
    sender: Address,
    receiver: Address,
    asset_id: u64,
    amount: u64,
  ) -> Transaction {
    Transaction::from_params(
      params,
      sender,
      None,
      TransactionPayload::AssetTransfer {
        asset_id,
        receiver,
        amount,
      },
    )
  }

  /// A 0-amount self-transfer, the chain's asset opt-in form.
  #[must_use]
  pub fn asset_opt_in(
    params: &SuggestedParams,
    sender: Address,
    asset_id: u64,
  ) -> Transaction {
    Transaction::asset_transfer(params, sender, sender, asset_id, 0)
  }

  #[must_use]
  pub fn asset_create(
    params: &SuggestedParams,
    sender: Address,
    total: u64,
    decimals: u32,
    unit_name: &str,
    asset_name: &str,
    url: &str,
  ) -> Transaction {
    Transaction::from_params(
      params,
      sender,
      None,
      TransactionPayload::AssetCreate {
        total,
        decimals,
        unit_name: unit_name.to_string(),
        asset_name: asset_name.to_string(),
        url: url.to_string(),
      },
    )
  }

  #[must_use]
  pub fn app_opt_in(
    params: &SuggestedParams,
    sender: Address,
    app_id: u64,
    app_args: Vec<Vec<u8>>,
    foreign_assets: Vec<u64>,
  ) -> Transaction {
    Transaction::from_params(
      params,
      sender,
      None,
      TransactionPayload::AppOptIn {
        app_id,
        app_args,
        foreign_assets,
      },
    )
  }

  #[must_use]
  pub fn app_call(
    params: &SuggestedParams,
    sender: Address,
    app_id: u64,
    app_args: Vec<Vec<u8>>,
    accounts: Vec<Address>,
    foreign_assets: Vec<u64>,
  ) -> Transaction {
    Transaction::from_params(
      params,
      sender,
      None,
      TransactionPayload::AppNoOp {
        app_id,
        app_args,
        accounts,
        foreign_assets,
      },
    )
  }
}

/// A logic signature: the program bytes that control a keyless account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicSig {
  pub logic: Vec<u8>,
}

impl LogicSig {
  #[must_use]
  pub fn new(logic: Vec<u8>) -> LogicSig {
    LogicSig { logic }
  }
}

/// A transaction paired with exactly one authorization: an account
/// signature or a logic signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
  pub transaction: Transaction,
  pub signature: Option<Vec<u8>>,
  pub logic: Option<Vec<u8>>,
}

impl SignedTransaction {
  #[must_use]
  pub fn by_signature(
    transaction: Transaction,
    signature: Vec<u8>,
  ) -> SignedTransaction {
    SignedTransaction {
      transaction,
      signature: Some(signature),
      logic: None,
    }
  }

  #[must_use]
  pub fn by_logic(
    transaction: Transaction,
    logic: Vec<u8>,
  ) -> SignedTransaction {
    SignedTransaction {
      transaction,
      signature: None,
      logic: Some(logic),
    }
  }

  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    bincode::serialize(self).context("failed to encode signed transaction")
  }
}

/// Account signing facade. Key management stays with the caller; the
/// SDK only asks for signature bytes over a transaction.
pub trait TransactionSigner: Send + Sync {
  fn address(&self) -> Address;

  fn sign(&self, transaction: &Transaction) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params() -> SuggestedParams {
    SuggestedParams {
      fee: 0,
      genesis_id: "testnet-v1.0".to_string(),
      genesis_hash: [7; 32],
      first_round_valid: 100,
      last_round_valid: 1100,
      consensus_version: "v30".to_string(),
      flat_fee: false,
      min_fee: 1_000,
    }
  }

  #[test]
  fn min_fee_applies_unless_flat() {
    let sender = Address([1; 32]);
    let txn = Transaction::payment(&params(), sender, Address([2; 32]), 5, None);
    assert_eq!(txn.fee, 1_000);
    let mut flat = params();
    flat.flat_fee = true;
    flat.fee = 2_500;
    let txn = Transaction::payment(&flat, sender, Address([2; 32]), 5, None);
    assert_eq!(txn.fee, 2_500);
  }

  #[test]
  fn asset_opt_in_is_zero_self_transfer() {
    let sender = Address([1; 32]);
    let txn = Transaction::asset_opt_in(&params(), sender, 42);
    assert_eq!(
      txn.payload,
      TransactionPayload::AssetTransfer {
        asset_id: 42,
        receiver: sender,
        amount: 0,
      }
    );
  }

  #[test]
  fn signed_transaction_round_trips() -> Result<()> {
    let txn = Transaction::payment(
      &params(),
      Address([1; 32]),
      Address([2; 32]),
      2_000,
      Some(b"fee"),
    );
    let signed = SignedTransaction::by_logic(txn, vec![4, 32, 1, 1]);
    let decoded: SignedTransaction =
      bincode::deserialize(&signed.to_bytes()?)?;
    assert_eq!(decoded, signed);
    Ok(())
  }
}
