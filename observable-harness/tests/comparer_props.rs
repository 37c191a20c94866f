use observable_harness::structurally_equal;
use observable_harness::Value;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn leaf() -> impl Strategy<Value = Value> {
  prop_oneof![
    Just(Value::Undefined),
    Just(Value::Null),
    any::<bool>().prop_map(Value::Bool),
    // NaN is never equal to itself, so keep it out of the reflexive properties.
    (-1e6f64..1e6).prop_map(Value::Number),
    "[a-z]{0,6}".prop_map(Value::String),
    (-1e12f64..1e12).prop_map(Value::Date),
  ]
}

fn value() -> impl Strategy<Value = Value> {
  leaf().prop_recursive(3, 24, 4, |inner| {
    prop_oneof![
      prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
      prop::collection::btree_map("[a-d]", inner, 0..4).prop_map(Value::Record),
    ]
  })
}

proptest! {
  #[test]
  fn comparison_is_reflexive(v in value()) {
    prop_assert!(structurally_equal(&v, &v.clone()));
  }

  #[test]
  fn comparison_is_symmetric(a in value(), b in value()) {
    prop_assert_eq!(structurally_equal(&a, &b), structurally_equal(&b, &a));
  }

  #[test]
  fn record_field_order_is_irrelevant(fields in prop::collection::vec(("[a-f]{1,3}", value()), 0..6)) {
    let mut unique = BTreeMap::new();
    for (key, v) in fields {
      unique.entry(key).or_insert(v);
    }
    let forward: Vec<_> = unique.clone().into_iter().collect();
    let backward: Vec<_> = unique.into_iter().rev().collect();
    prop_assert!(structurally_equal(&Value::record(forward), &Value::record(backward)));
  }

  #[test]
  fn undefined_fields_count_as_absent(v in value(), extra in "[x-z]") {
    let base = Value::record([("field", v.clone())]);
    let padded = Value::record([("field", v), (extra.as_str(), Value::Undefined)]);
    prop_assert!(structurally_equal(&base, &padded));
  }

  #[test]
  fn nan_never_matches(v in value()) {
    prop_assert!(!structurally_equal(&Value::Number(f64::NAN), &v));
  }
}
