use thiserror::Error;

/// Error taxonomy for the SDK's pure core.
///
/// Everything here is deterministic: the same inputs always produce the
/// same error, and no variant is retried anywhere in the SDK.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
  // `asset`
  #[error("Arithmetic between amounts of different assets ({left} and {right}).")]
  AssetMismatch { left: u64, right: u64 },
  #[error("Amount arithmetic underflowed below zero.")]
  Underflow,
  #[error("Division by zero in amount math.")]
  DivisionByZero,
  #[error("Amount arithmetic overflowed the ledger's 64-bit width.")]
  Overflow,
  // `pool`
  #[error("Pool assets must satisfy asset1 > asset2, got {asset1} and {asset2}.")]
  OrderingViolation { asset1: u64, asset2: u64 },
  #[error("Pool has not been bootstrapped.")]
  PoolNotBootstrapped,
  #[error("Quote requested against an empty reserve.")]
  NoLiquidity,
  #[error("Initial mint requires amounts for both assets.")]
  InsufficientAmounts,
  // `template`
  #[error("Unsupported template value kind `{0}`.")]
  UnsupportedEncoding(String),
  #[error("No value provided for template variable `{0}`.")]
  MissingTemplateValue(String),
  // `group`
  #[error("Transaction group holds {0} transactions, the maximum is 16.")]
  GroupTooLarge(usize),
  #[error("Signing failed: {0}")]
  SigningError(String),
}
