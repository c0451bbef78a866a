//! Deserialization helpers for tool arguments
//!
//! Integer arguments are clamped later, so any JSON number is accepted here
//! and saturated into `i64` instead of being rejected for its size.

use serde::{Deserialize, Deserializer};
use serde_json::Number;

fn saturate(number: &Number) -> i64 {
    if let Some(value) = number.as_i64() {
        value
    } else if number.as_u64().is_some() {
        i64::MAX
    } else {
        // `as` saturates at the i64 bounds and maps NaN to 0
        number.as_f64().map_or(0, |value| value as i64)
    }
}

/// Deserialize any JSON number into an `i64`, saturating at the bounds
pub fn saturating_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    Ok(saturate(&number))
}

/// Like [`saturating_i64`], with `null` read as absent
pub fn saturating_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.as_ref().map(saturate))
}
