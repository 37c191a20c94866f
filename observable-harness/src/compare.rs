//! Structural equality between two emitted values.

use crate::value::Value;
use std::collections::BTreeMap;

/// Decide whether two emissions are equal.
///
/// - Values of different [`Kind`](crate::Kind)s are never equal.
/// - Arrays compare element-wise; records compare field-wise regardless of key order. A record
///   field holding `Undefined` counts as absent.
/// - Primitives use strict equality: `NaN` never equals anything, dates compare by instant.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
  if a.kind() != b.kind() {
    return false;
  }
  match (a, b) {
    (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
    (Value::Bool(a), Value::Bool(b)) => a == b,
    (Value::Number(a), Value::Number(b)) => a == b,
    (Value::String(a), Value::String(b)) => a == b,
    (Value::Date(a), Value::Date(b)) => a == b,
    (Value::Array(a), Value::Array(b)) => {
      a.len() == b.len() && a.iter().zip(b).all(|(a, b)| structurally_equal(a, b))
    }
    (Value::Record(a), Value::Record(b)) => records_equal(a, b),
    _ => false,
  }
}

fn records_equal(a: &BTreeMap<String, Value>, b: &BTreeMap<String, Value>) -> bool {
  let (a, b) = (present_fields(a), present_fields(b));
  a.len() == b.len()
    && a
      .iter()
      .zip(&b)
      .all(|((ka, va), (kb, vb))| ka == kb && structurally_equal(va, vb))
}

fn present_fields(fields: &BTreeMap<String, Value>) -> Vec<(&String, &Value)> {
  fields
    .iter()
    .filter(|(_, value)| !matches!(value, Value::Undefined))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kinds_must_agree() {
    assert!(!structurally_equal(&Value::from(1.0), &Value::from("1")));
    assert!(!structurally_equal(&Value::Undefined, &Value::Null));
    assert!(!structurally_equal(&Value::Undefined, &Value::from(0.0)));
    assert!(!structurally_equal(
      &Value::array(Vec::<Value>::new()),
      &Value::record(Vec::<(String, Value)>::new())
    ));
    assert!(!structurally_equal(&Value::date(0.0), &Value::from(0.0)));
  }

  #[test]
  fn primitives_use_strict_equality() {
    assert!(structurally_equal(&Value::from(10.0), &Value::from(10)));
    assert!(structurally_equal(&Value::Undefined, &Value::Undefined));
    assert!(!structurally_equal(
      &Value::from(f64::NAN),
      &Value::from(f64::NAN)
    ));
    assert!(structurally_equal(
      &Value::date(-233784000000.0),
      &Value::date(-233784000000.0)
    ));
  }

  #[test]
  fn records_ignore_key_order_and_undefined_fields() {
    let a = Value::record([("owner", "Alice"), ("pet", "Fido")]);
    let b = Value::record([("pet", "Fido"), ("owner", "Alice")]);
    assert!(structurally_equal(&a, &b));

    let with_hole = Value::record([
      ("owner", Value::from("Alice")),
      ("pet", Value::from("Fido")),
      ("vet", Value::Undefined),
    ]);
    assert!(structurally_equal(&a, &with_hole));

    let different = Value::record([("owner", "Alice"), ("pet", "Max")]);
    assert!(!structurally_equal(&a, &different));
  }

  #[test]
  fn arrays_are_positional() {
    let ab = Value::array(["a", "b"]);
    let ba = Value::array(["b", "a"]);
    assert!(!structurally_equal(&ab, &ba));
    assert!(!structurally_equal(&ab, &Value::array(["a"])));
    assert!(structurally_equal(&ab, &Value::array(["a", "b"])));
  }
}
