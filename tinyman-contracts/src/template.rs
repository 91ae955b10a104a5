//! Template substitution.

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use base64::prelude::{Engine, BASE64_STANDARD};
use tinyman_core::encoding::{encode_value, TemplateValue};
use tinyman_core::error::CoreError;

use crate::artifact::ProgramTemplate;

/// Fills a template's variables and returns the finished program bytes.
///
/// Variables are substituted in ascending byte order. Integer values are
/// varint-encoded, so each substitution usually writes fewer bytes than
/// its placeholder occupies; a running offset keeps later indices aligned
/// with the shrinking program.
pub fn parameterize(
  template: &ProgramTemplate,
  values: &HashMap<String, TemplateValue>,
) -> Result<Vec<u8>> {
  let mut program = BASE64_STANDARD
    .decode(&template.bytecode)
    .context("template bytecode is not valid base64")?;

  let mut variables = template.variables.clone();
  variables.sort_by_key(|v| v.index);

  let mut offset = 0usize;
  for variable in &variables {
    let value = values
      .get(&variable.name)
      .ok_or_else(|| CoreError::MissingTemplateValue(variable.name.clone()))?;
    let encoded = encode_value(value, &variable.kind)?;
    let start = variable.index - offset;
    let end = start + variable.length;
    if end > program.len() {
      return Err(anyhow!(
        "template variable `{}` spans {start}..{end} outside the {}-byte program",
        variable.name,
        program.len(),
      ));
    }
    program.splice(start..end, encoded.iter().copied());
    offset += variable.length - encoded.len();
  }
  Ok(program)
}

#[cfg(test)]
mod tests {
  use super::*;

  use crate::artifact::TemplateVariable;

  fn variable(name: &str, index: usize, length: usize) -> TemplateVariable {
    TemplateVariable {
      name: name.to_string(),
      kind: "int".to_string(),
      index,
      length,
    }
  }

  /// 25-byte template: 3-byte header, variable `a` at 3 (10 bytes),
  /// one opcode byte, variable `b` at 14 (10 bytes), one opcode byte.
  fn compact_template() -> ProgramTemplate {
    let mut bytecode = vec![0x04, 0x20, 0x02];
    bytecode.extend_from_slice(&[0; 10]);
    bytecode.push(0x22);
    bytecode.extend_from_slice(&[0; 10]);
    bytecode.push(0x23);
    ProgramTemplate {
      bytecode: BASE64_STANDARD.encode(&bytecode),
      address: String::new(),
      size: bytecode.len(),
      variables: vec![variable("b", 14, 10), variable("a", 3, 10)],
      source: String::new(),
    }
  }

  #[test]
  fn substitution_golden_bytes() -> Result<()> {
    let values = HashMap::from([
      ("a".to_string(), TemplateValue::Int(10)),
      ("b".to_string(), TemplateValue::Int(123_123)),
    ]);
    let program = parameterize(&compact_template(), &values)?;
    // `a` shrinks to one byte (0x0a), shifting `b`'s slot by 9; `b`
    // becomes the three-byte varint f3 c1 07.
    assert_eq!(
      program,
      vec![0x04, 0x20, 0x02, 0x0a, 0x22, 0xf3, 0xc1, 0x07, 0x23]
    );
    Ok(())
  }

  #[test]
  fn missing_value_is_rejected() {
    let values = HashMap::from([("a".to_string(), TemplateValue::Int(1))]);
    let err = parameterize(&compact_template(), &values).unwrap_err();
    assert_eq!(
      err.downcast_ref::<CoreError>(),
      Some(&CoreError::MissingTemplateValue("b".to_string()))
    );
  }

  #[test]
  fn unknown_kind_is_rejected() {
    let mut template = compact_template();
    template.variables[0].kind = "address".to_string();
    let values = HashMap::from([
      ("a".to_string(), TemplateValue::Int(1)),
      ("b".to_string(), TemplateValue::Int(2)),
    ]);
    let err = parameterize(&template, &values).unwrap_err();
    assert_eq!(
      err.downcast_ref::<CoreError>(),
      Some(&CoreError::UnsupportedEncoding("address".to_string()))
    );
  }
}
