//! One-stop import for typical SDK usage.

pub use rust_decimal::Decimal;
pub use tinyman_core::asset::{Asset, AssetAmount, ALGO_ASSET_ID};
pub use tinyman_core::error::CoreError;
pub use tinyman_core::quote::{BurnQuote, MintQuote, SwapQuote, SwapType};

pub use crate::client::{
  SubmitResult, TinymanClient, MAINNET_VALIDATOR_APP_ID,
  TESTNET_VALIDATOR_APP_ID,
};
pub use crate::group::TransactionGroup;
pub use crate::ledger::{
  AccountInformation, Address, AssetParams, Ledger, PendingTransaction,
  SuggestedParams,
};
pub use crate::pool::{Pool, PoolInfo, PoolPosition};
pub use crate::txn::{
  LogicSig, SignedTransaction, Transaction, TransactionSigner,
};
