//! Byte-level encodings shared by the state codec and the contract
//! template engine.

use crate::error::CoreError;

/// A value destined for a template variable slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
  Int(u64),
  Bytes(Vec<u8>),
}

/// Encodes a 64-bit integer as 8 big-endian bytes, the form used for
/// asset IDs inside state keys and application arguments.
#[must_use]
pub fn int_to_bytes(n: u64) -> [u8; 8] {
  n.to_be_bytes()
}

/// Encodes an unsigned integer as a LEB128 varint: 7-bit groups, least
/// significant first, MSB set on every byte but the last.
#[must_use]
pub fn encode_varint(mut n: u64) -> Vec<u8> {
  let mut out = Vec::new();
  loop {
    let byte = (n & 0x7f) as u8;
    n >>= 7;
    if n == 0 {
      out.push(byte);
      return out;
    }
    out.push(byte | 0x80);
  }
}

/// Decodes a LEB128 varint from the front of `bytes`, returning the value
/// and the number of bytes consumed. `None` on truncated input or a value
/// exceeding 64 bits.
#[must_use]
pub fn decode_varint(bytes: &[u8]) -> Option<(u64, usize)> {
  let mut value: u64 = 0;
  for (i, byte) in bytes.iter().enumerate() {
    let group = u64::from(byte & 0x7f);
    value |= group.checked_shl(7 * i as u32)?;
    if byte & 0x80 == 0 {
      return Some((value, i + 1));
    }
  }
  None
}

/// Encodes a template value according to its artifact-declared kind:
/// `int` values become varints, `bytes` values pass through literally.
pub fn encode_value(
  value: &TemplateValue,
  kind: &str,
) -> Result<Vec<u8>, CoreError> {
  match (kind, value) {
    ("int", TemplateValue::Int(n)) => Ok(encode_varint(*n)),
    ("bytes", TemplateValue::Bytes(b)) => Ok(b.clone()),
    _ => Err(CoreError::UnsupportedEncoding(kind.to_string())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn int_to_bytes_big_endian() {
    assert_eq!(
      int_to_bytes(123_123_123_123_123),
      [0x00, 0x00, 0x6f, 0xfa, 0xd6, 0x04, 0x73, 0xb3]
    );
    assert_eq!(int_to_bytes(0), [0; 8]);
    assert_eq!(int_to_bytes(u64::MAX), [0xff; 8]);
  }

  #[test]
  fn varint_reference_vector() {
    assert_eq!(encode_varint(123_123), vec![0xf3, 0xc1, 0x07]);
    assert_eq!(encode_varint(0), vec![0x00]);
    assert_eq!(encode_varint(127), vec![0x7f]);
    assert_eq!(encode_varint(128), vec![0x80, 0x01]);
  }

  #[test]
  fn varint_round_trip() {
    for n in [0, 1, 127, 128, 300, 123_123, u64::from(u32::MAX), u64::MAX] {
      let encoded = encode_varint(n);
      assert_eq!(decode_varint(&encoded), Some((n, encoded.len())));
    }
  }

  #[test]
  fn varint_decode_truncated() {
    assert_eq!(decode_varint(&[0x80]), None);
    assert_eq!(decode_varint(&[]), None);
  }

  #[test]
  fn encode_value_dispatch() {
    let int = TemplateValue::Int(123_123);
    assert_eq!(encode_value(&int, "int"), Ok(vec![0xf3, 0xc1, 0x07]));
    let bytes = TemplateValue::Bytes(vec![1, 2, 3]);
    assert_eq!(encode_value(&bytes, "bytes"), Ok(vec![1, 2, 3]));
    assert_eq!(
      encode_value(&int, "address"),
      Err(CoreError::UnsupportedEncoding("address".to_string()))
    );
    assert_eq!(
      encode_value(&bytes, "int"),
      Err(CoreError::UnsupportedEncoding("int".to_string()))
    );
  }
}
