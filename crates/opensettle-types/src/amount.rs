//! Arbitrary-precision quantity handling.
//!
//! Every monetary and quantity field in OpenSettle is a non-negative
//! arbitrary-precision integer ([`num_bigint::BigUint`]), stored and
//! serialized as a base-10 string. Floating point is never used for token
//! quantities.

use num_bigint::BigUint;

/// Parse a strict base-10 amount string into a [`BigUint`].
///
/// Returns `None` for the empty string, signs, whitespace, or any
/// non-digit character. `"0"` parses fine; positivity checks belong to the
/// caller.
#[must_use]
pub fn parse_amount(s: &str) -> Option<BigUint> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(s.as_bytes(), 10)
}

/// Serde adapter serializing a [`BigUint`] as a base-10 string.
///
/// Use as `#[serde(with = "opensettle_types::amount::serde_string")]` on
/// amount and price fields.
pub mod serde_string {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_amount(&s)
            .ok_or_else(|| D::Error::custom(format!("invalid base-10 amount: {s:?}")))
    }
}
