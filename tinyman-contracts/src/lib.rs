//! # Tinyman Contracts
//!
//! The bundled v1.1 contract artifact and the template engine that turns
//! its parameterized pool logic program into per-pair program bytes.
//!
//! The artifact ships inside the crate (`contracts/asc.json`) and is
//! parsed once on first use. The validator app's approval and clear
//! programs are carried for deployment tooling; the SDK itself only
//! parameterizes the pool logicsig.

pub mod artifact;
pub mod template;

use std::collections::HashMap;

use anyhow::Result;
use tinyman_core::encoding::TemplateValue;
use tinyman_core::error::CoreError;

use crate::artifact::contracts;
use crate::template::parameterize;

/// Produces the pool logic program for an asset pair under a validator
/// app. The contract requires strictly descending asset order,
/// `asset1_id > asset2_id`.
pub fn pool_logic_program(
  validator_app_id: u64,
  asset1_id: u64,
  asset2_id: u64,
) -> Result<Vec<u8>> {
  if asset1_id <= asset2_id {
    return Err(
      CoreError::OrderingViolation {
        asset1: asset1_id,
        asset2: asset2_id,
      }
      .into(),
    );
  }
  let values = HashMap::from([
    ("validator_app_id".to_string(), TemplateValue::Int(validator_app_id)),
    ("asset_id_1".to_string(), TemplateValue::Int(asset1_id)),
    ("asset_id_2".to_string(), TemplateValue::Int(asset2_id)),
  ]);
  parameterize(&contracts().pool_logicsig.logic, &values)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bundled_pool_program_parameterizes() -> Result<()> {
    let program = pool_logic_program(10, 2, 1)?;
    // Three 10-byte varint placeholders collapse to one byte each.
    assert_eq!(program.len(), 650);
    // version, intcblock of 8: 1, 0, asset_id_2, asset_id_1,
    // validator_app_id, ...
    assert_eq!(
      &program[..8],
      &[0x04, 0x20, 0x08, 0x01, 0x00, 0x01, 0x02, 0x0a]
    );
    Ok(())
  }

  #[test]
  fn distinct_pairs_produce_distinct_programs() -> Result<()> {
    let a = pool_logic_program(10, 2, 1)?;
    let b = pool_logic_program(10, 3, 1)?;
    assert_ne!(a, b);
    Ok(())
  }

  #[test]
  fn ordering_is_enforced() {
    assert!(pool_logic_program(10, 1, 2).is_err());
    assert!(pool_logic_program(10, 2, 2).is_err());
  }
}
