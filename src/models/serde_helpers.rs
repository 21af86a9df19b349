//! Serde serialization helpers for ensuring consistent JSON output

use serde::{Deserialize, Deserializer, Serializer};

/// Serialize a percentage as an integer when it has no fractional part
///
/// `64.0` is written as `64`, `12.5` stays `12.5`.
pub fn serialize_percent<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// A coordinate as it arrives from outside: a bare number or a numeric string
///
/// Strings may carry a trailing `%` (`"64%"`), which is how the legacy widget
/// stored positions.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    /// Resolve to a percentage in [0, 100], or `None` if unusable
    pub fn percent(&self) -> Option<f64> {
        let value = match self {
            Coordinate::Number(n) => *n,
            Coordinate::Text(s) => {
                let trimmed = s.trim();
                let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
                if digits.is_empty() {
                    return None;
                }
                digits.parse::<f64>().ok()?
            }
        };

        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Some(value)
        } else {
            None
        }
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Coordinate::Text(value.to_string())
    }
}

/// Deserialize a percentage from either a number or a numeric string
pub fn deserialize_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let coordinate = Coordinate::deserialize(deserializer)?;
    coordinate
        .percent()
        .ok_or_else(|| serde::de::Error::custom(format!("invalid percentage: {:?}", coordinate)))
}
