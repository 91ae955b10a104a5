//! The bundled contract artifact, parsed once on first use.

use std::sync::LazyLock;

use serde::Deserialize;

/// One logic program template: base64 bytecode plus the variables to
/// substitute into it. `address` and `source` ride along from the build
/// pipeline and are unused here; program addresses are derived through
/// the ledger facade after substitution.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramTemplate {
  pub bytecode: String,
  #[serde(default)]
  pub address: String,
  pub size: usize,
  pub variables: Vec<TemplateVariable>,
  #[serde(default)]
  pub source: String,
}

/// A named placeholder inside a template: `length` bytes at `index` of
/// the decoded bytecode, to be replaced by the encoded value.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateVariable {
  pub name: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub index: usize,
  pub length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolLogicsig {
  pub logic: ProgramTemplate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StateSchema {
  pub num_uints: u32,
  pub num_byte_slices: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidatorApp {
  pub approval_program: ProgramTemplate,
  pub clear_program: ProgramTemplate,
  pub global_state_schema: StateSchema,
  pub local_state_schema: StateSchema,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contracts {
  pub pool_logicsig: PoolLogicsig,
  pub validator_app: ValidatorApp,
}

#[derive(Debug, Clone, Deserialize)]
struct Artifact {
  contracts: Contracts,
}

static ARTIFACT: LazyLock<Artifact> = LazyLock::new(|| {
  serde_json::from_str(include_str!("../contracts/asc.json"))
    .expect("bundled contracts/asc.json parses")
});

/// The parsed contract definitions.
#[must_use]
pub fn contracts() -> &'static Contracts {
  &ARTIFACT.contracts
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn artifact_parses_and_matches_declared_size() {
    use base64::prelude::{Engine, BASE64_STANDARD};

    let logic = &contracts().pool_logicsig.logic;
    let bytecode = BASE64_STANDARD.decode(&logic.bytecode).unwrap();
    assert_eq!(bytecode.len(), logic.size);
    assert!(logic.bytecode.starts_with("BCAIAQCB"));
    assert_eq!(logic.variables.len(), 3);
    // 16 local uints back the pool's state schema.
    assert_eq!(contracts().validator_app.local_state_schema.num_uints, 16);
  }
}
