//! Atomic transaction groups.

use anyhow::Result;
use itertools::Itertools;
use tinyman_core::error::CoreError;

use crate::ledger::Ledger;
use crate::txn::{LogicSig, SignedTransaction, Transaction, TransactionSigner};

/// Ledger-imposed ceiling on transactions per atomic group.
pub const MAX_TRANSACTION_GROUP_SIZE: usize = 16;

/// An ordered bundle of transactions that commit or fail together.
///
/// Construction assigns the group ID to every member. Each slot of
/// `signed` is filled as the matching sender signs; the group can only
/// be submitted once every slot is populated.
#[derive(Debug, Clone)]
pub struct TransactionGroup {
  transactions: Vec<Transaction>,
  signed: Vec<Option<Vec<u8>>>,
}

impl TransactionGroup {
  pub fn new(
    mut transactions: Vec<Transaction>,
    ledger: &dyn Ledger,
  ) -> Result<TransactionGroup> {
    if transactions.len() > MAX_TRANSACTION_GROUP_SIZE {
      return Err(CoreError::GroupTooLarge(transactions.len()).into());
    }
    let group_id = ledger.group_id(&transactions)?;
    for transaction in &mut transactions {
      transaction.group = Some(group_id);
    }
    let signed = vec![None; transactions.len()];
    Ok(TransactionGroup {
      transactions,
      signed,
    })
  }

  #[must_use]
  pub fn transactions(&self) -> &[Transaction] {
    &self.transactions
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.transactions.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.transactions.is_empty()
  }

  /// Whether the slot at `index` already holds signed bytes.
  #[must_use]
  pub fn is_signed(&self, index: usize) -> bool {
    self.signed.get(index).is_some_and(Option::is_some)
  }

  /// Signs every transaction sent by the logic program's own address.
  pub fn sign_with_logicsig(
    &mut self,
    logicsig: &LogicSig,
    ledger: &dyn Ledger,
  ) -> Result<()> {
    let address = ledger.address_from_program(&logicsig.logic)?;
    for (transaction, slot) in
      self.transactions.iter().zip(self.signed.iter_mut())
    {
      if transaction.sender == address {
        let signed = SignedTransaction::by_logic(
          transaction.clone(),
          logicsig.logic.clone(),
        );
        *slot = Some(signed.to_bytes()?);
      }
    }
    Ok(())
  }

  /// Signs every transaction sent by the signer's address.
  pub fn sign_with_signer(
    &mut self,
    signer: &dyn TransactionSigner,
  ) -> Result<()> {
    let address = signer.address();
    for (transaction, slot) in
      self.transactions.iter().zip(self.signed.iter_mut())
    {
      if transaction.sender == address {
        let signature = signer
          .sign(transaction)
          .map_err(|e| CoreError::SigningError(e.to_string()))?;
        let signed =
          SignedTransaction::by_signature(transaction.clone(), signature);
        *slot = Some(signed.to_bytes()?);
      }
    }
    Ok(())
  }

  /// A group is complete when every slot carries signed bytes.
  #[must_use]
  pub fn is_complete(&self) -> bool {
    self.signed.iter().all(Option::is_some)
  }

  /// Concatenated signed bytes in index order, ready for one atomic
  /// submission. Fails unless the group is complete.
  pub fn signed_bytes(&self) -> Result<Vec<u8>> {
    let unsigned = self
      .signed
      .iter()
      .positions(Option::is_none)
      .collect_vec();
    if !unsigned.is_empty() {
      return Err(
        CoreError::SigningError(format!(
          "group is missing signatures at indexes {unsigned:?}"
        ))
        .into(),
      );
    }
    Ok(self.signed.iter().flatten().flatten().copied().collect())
  }
}
