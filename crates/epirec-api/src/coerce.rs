//! Lenient integer fields for request bodies.
//!
//! Accepts JSON integers, floats with no fractional part (`100.0`) and
//! strings holding an integer (`"100"`). Anything else is a validation error.

use std::fmt;

use serde::{
  Deserializer,
  de::{self, Unexpected, Visitor},
};

/// `#[serde(deserialize_with = "...")]` adapter for `i64` fields.
pub fn deserialize_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
  D: Deserializer<'de>,
{
  deserializer.deserialize_any(IntVisitor)
}

struct IntVisitor;

impl<'de> Visitor<'de> for IntVisitor {
  type Value = i64;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("an integer, an integral float or an integer string")
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> { Ok(v) }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
    i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
  }

  fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
      Ok(v as i64)
    } else {
      Err(E::invalid_value(Unexpected::Float(v), &self))
    }
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
    v.trim()
      .parse()
      .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
  }
}

#[cfg(test)]
mod tests {
  use serde::Deserialize;
  use serde_json::json;

  use super::*;

  #[derive(Debug, Deserialize)]
  struct Count {
    #[serde(deserialize_with = "deserialize_int")]
    n: i64,
  }

  fn count(v: serde_json::Value) -> Result<i64, serde_json::Error> {
    serde_json::from_value::<Count>(json!({ "n": v })).map(|c| c.n)
  }

  #[test]
  fn accepts_integers_integral_floats_and_integer_strings() {
    assert_eq!(count(json!(100)).unwrap(), 100);
    assert_eq!(count(json!(-4)).unwrap(), -4);
    assert_eq!(count(json!(100.0)).unwrap(), 100);
    assert_eq!(count(json!("100")).unwrap(), 100);
    assert_eq!(count(json!(" 12 ")).unwrap(), 12);
  }

  #[test]
  fn rejects_everything_else() {
    for bad in [
      json!(1.5),
      json!("1.5"),
      json!("many"),
      json!(true),
      json!(null),
      json!([1]),
      json!(u64::MAX),
    ] {
      assert!(count(bad.clone()).is_err(), "{bad} should not coerce");
    }
  }
}
