//! Deserialisation helpers for the loosely-typed backend JSON.

use serde::{Deserialize, Deserializer};

/// Treat a JSON `null` list (a nil slice on the backend) as empty.
pub(crate) fn nullable_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

/// Treat a JSON `null` string as empty.
pub(crate) fn nullable_string<'de, D>(d: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Accept a string, an integer or `null`; blank strings become `None`.
pub(crate) fn string_or_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Text(String),
    Int(i64),
    Float(f64),
  }

  Ok(match Option::<Raw>::deserialize(d)? {
    Some(Raw::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
    Some(Raw::Int(n)) if n != 0 => Some(n.to_string()),
    Some(Raw::Float(n)) if n != 0.0 => Some(format!("{n}")),
    _ => None,
  })
}
