//! Helpers for optional query-string parameters.
//!
//! Browser forms submit untouched filter inputs as `key=`; those must behave
//! exactly like an absent key rather than failing to parse.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// `deserialize_with` helper: blank or missing → `None`, otherwise `FromStr`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}
