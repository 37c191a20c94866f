use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed value emitted by a stream under comparison.
///
/// Streams carry ordinary Rust types; they are lifted into `Value` right before comparison so the
/// comparer can reason about the runtime kind of each emission. `Undefined` stands for the absence
/// of a value (a `None`), which is distinct from every concrete value including `Null`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Undefined,
  Null,
  Bool(bool),
  /// An IEEE-754 double, like every JavaScript number.
  Number(f64),
  String(String),
  /// An instant, as milliseconds since the Unix epoch.
  Date(f64),
  Array(Vec<Value>),
  /// A keyed record. Keys are kept sorted, so field order never affects equality.
  Record(BTreeMap<String, Value>),
}

/// Runtime type tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
  Undefined,
  Null,
  Boolean,
  Number,
  String,
  Date,
  Array,
  Record,
}

impl Kind {
  /// Arrays and records are compared structurally; everything else by value.
  pub fn is_composite(self) -> bool {
    matches!(self, Kind::Array | Kind::Record)
  }
}

impl Value {
  pub fn kind(&self) -> Kind {
    match self {
      Value::Undefined => Kind::Undefined,
      Value::Null => Kind::Null,
      Value::Bool(_) => Kind::Boolean,
      Value::Number(_) => Kind::Number,
      Value::String(_) => Kind::String,
      Value::Date(_) => Kind::Date,
      Value::Array(_) => Kind::Array,
      Value::Record(_) => Kind::Record,
    }
  }

  /// Build a record from `(key, value)` pairs.
  pub fn record<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
  where
    K: Into<String>,
    V: Into<Value>,
  {
    Value::Record(
      fields
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect(),
    )
  }

  pub fn array<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
    Value::Array(items.into_iter().map(Into::into).collect())
  }

  pub fn date(epoch_millis: f64) -> Self {
    Value::Date(epoch_millis)
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Undefined => f.write_str("undefined"),
      Value::Null => f.write_str("null"),
      Value::Bool(b) => write!(f, "{b}"),
      Value::Number(n) => write_number(f, *n),
      Value::String(s) => write!(f, "{s:?}"),
      Value::Date(ms) => {
        f.write_str("Date(")?;
        write_number(f, *ms)?;
        f.write_str(")")
      }
      Value::Array(items) => {
        f.write_str("[")?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{item}")?;
        }
        f.write_str("]")
      }
      Value::Record(fields) => {
        f.write_str("{")?;
        for (i, (key, value)) in fields.iter().enumerate() {
          if i > 0 {
            f.write_str(",")?;
          }
          write!(f, " {key}: {value}")?;
        }
        if !fields.is_empty() {
          f.write_str(" ")?;
        }
        f.write_str("}")
      }
    }
  }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
  if n.is_nan() {
    f.write_str("NaN")
  } else if n.is_infinite() {
    f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
  } else if n == 0.0 {
    f.write_str("0")
  } else {
    // `f64`'s Display already omits a trailing `.0`.
    write!(f, "{n}")
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Value::Bool(value)
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Value::Number(value)
  }
}

impl From<i32> for Value {
  fn from(value: i32) -> Self {
    Value::Number(value.into())
  }
}

impl From<u32> for Value {
  fn from(value: u32) -> Self {
    Value::Number(value.into())
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Value::String(value.to_string())
  }
}

impl From<String> for Value {
  fn from(value: String) -> Self {
    Value::String(value)
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(value: Option<T>) -> Self {
    value.map_or(Value::Undefined, Into::into)
  }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
  fn from(value: Vec<T>) -> Self {
    Value::array(value)
  }
}

impl From<BTreeMap<String, Value>> for Value {
  fn from(value: BTreeMap<String, Value>) -> Self {
    Value::Record(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn option_none_lifts_to_undefined() {
    assert_eq!(Value::from(None::<f64>), Value::Undefined);
    assert_eq!(Value::from(Some(4.0)), Value::Number(4.0));
    assert_ne!(Value::Undefined, Value::Null);
  }

  #[test]
  fn display_is_js_like() {
    let value = Value::record([
      ("q", Value::array([Value::from("t"), Value::from(2.5)])),
      ("n", Value::from(10.0)),
      ("missing", Value::Undefined),
    ]);
    assert_eq!(
      value.to_string(),
      r#"{ missing: undefined, n: 10, q: ["t", 2.5] }"#
    );
    assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
    assert_eq!(Value::Number(-0.0).to_string(), "0");
    assert_eq!(Value::Record(BTreeMap::new()).to_string(), "{}");
  }

  #[test]
  fn kinds_separate_composites_from_primitives() {
    assert!(Value::array(Vec::<Value>::new()).kind().is_composite());
    assert!(Value::record(Vec::<(String, Value)>::new()).kind().is_composite());
    assert!(!Value::date(0.0).kind().is_composite());
    assert!(!Value::Null.kind().is_composite());
  }
}
