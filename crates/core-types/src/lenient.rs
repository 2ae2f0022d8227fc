//! Field decoders for loosely-typed stored records.
//!
//! Used through `#[serde(deserialize_with = "...")]`. None of them ever fail on a
//! well-formed JSON value: anything that cannot be interpreted becomes zero or
//! absent.

use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(Decimal),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Other(IgnoredAny),
}

impl RawScalar {
    fn into_string(self) -> Option<String> {
        match self {
            RawScalar::Text(s) => Some(s),
            RawScalar::Unsigned(n) => Some(n.to_string()),
            RawScalar::Signed(n) => Some(n.to_string()),
            RawScalar::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{f:.0}")),
            RawScalar::Float(f) if f.is_finite() => Some(f.to_string()),
            RawScalar::Float(_) | RawScalar::Other(_) => None,
        }
    }
}

/// Parses a numeric string, accepting plain and scientific notation.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// A number that may be missing. Unparsable values count as missing.
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => Some(n),
        RawNumber::Text(s) => parse_decimal(&s),
        RawNumber::Other(_) => None,
    })
}

/// A number where anything missing or invalid is zero.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_decimal(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// An identifier stored either as a number or a string. Normalized to a trimmed
/// string so `7` and `"7"` compare equal.
pub fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawScalar::deserialize(deserializer)?
        .into_string()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Free text. Numbers (phone numbers stored numerically, mostly) are kept as their
/// decimal rendering.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawScalar::deserialize(deserializer)?.into_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawElement<T> {
    Value(T),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList<T> {
    List(Vec<RawElement<T>>),
    Other(IgnoredAny),
}

/// A sequence that may be `null` or not a sequence at all. Elements that do not
/// decode are dropped, so one broken line item never costs the whole record.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let RawList::List(raw) = RawList::<T>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    let total = raw.len();
    let elements: Vec<T> = raw
        .into_iter()
        .filter_map(|element| match element {
            RawElement::Value(value) => Some(value),
            RawElement::Other(_) => None,
        })
        .collect();

    if elements.len() < total {
        tracing::debug!(dropped = total - elements.len(), "Undecodable list elements skipped.");
    }
    Ok(elements)
}
