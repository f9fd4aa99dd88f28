//! Upstream rows carry numbers either as JSON numbers or as numeric strings.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

pub(crate) fn u64_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(v) => Ok(v),
        NumberOrString::Signed(v) => Err(D::Error::custom(format!(
            "count must be non-negative, got {v}"
        ))),
        NumberOrString::Float(v) => integral_u64(v)
            .ok_or_else(|| D::Error::custom(format!("count must be a whole number, got {v}"))),
        NumberOrString::Text(s) => {
            let s = s.trim();
            if let Ok(v) = s.parse::<u64>() {
                return Ok(v);
            }
            s.parse::<f64>()
                .ok()
                .and_then(integral_u64)
                .ok_or_else(|| D::Error::custom(format!("invalid count: {s:?}")))
        }
    }
}

pub(crate) fn f64_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(v) => v as f64,
        NumberOrString::Signed(v) => v as f64,
        NumberOrString::Float(v) => v,
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid number: {s:?}")))?,
    };
    if !value.is_finite() {
        return Err(D::Error::custom("number must be finite"));
    }
    Ok(value)
}

pub(crate) fn string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(v) => v.to_string(),
        NumberOrString::Signed(v) => v.to_string(),
        NumberOrString::Float(v) => v.to_string(),
        NumberOrString::Text(s) => s,
    })
}

fn integral_u64(v: f64) -> Option<u64> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}
