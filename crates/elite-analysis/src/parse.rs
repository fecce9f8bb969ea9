// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lenient decoding of model-produced JSON.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Remove every ```` ```json ```` and ```` ``` ```` marker and trim.
///
/// Markers are removed wherever they appear, not only at the edges.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Strip fences, then decode a JSON object into `T`.
///
/// Top-level arrays and scalars are rejected even when `T` could be built
/// from a sequence.
pub fn parse_object<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    let value: Value = serde_json::from_str(&strip_code_fences(raw))?;
    if !value.is_object() {
        return Err(de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}

/// Accept `85`, `85.0` and `"85"` as an integer score.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                _ => Err(de::Error::custom(format!("{n} is not an integer"))),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("`{s}` is not an integer"))),
        other => Err(de::Error::custom(format!("expected integer, got {other}"))),
    }
}
