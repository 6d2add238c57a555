// SPDX-License-Identifier: MIT

//! Numeric value trees and their literal domains
//!
//! The three domains (`uint`, `int`, `decimal`) only differ in how literals
//! are written and bounded. Every value resolves to a [`BigDecimal`].

use crate::sdk::error::NumericDomainError;
use crate::warp::variable::VariableRef;
use bigdecimal::BigDecimal;
use once_cell::sync::Lazy;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 2^256 - 1
const UINT256_MAX: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

/// (2^256 - 1) / 10^18
const DECIMAL256_MAX: &str =
    "115792089237316195423570985008687907853269984665640564039457.584007913129639935";

pub const DECIMAL_PLACES: usize = 18;

static UINT256_MAX_DEC: Lazy<BigDecimal> =
    Lazy::new(|| BigDecimal::from_str(UINT256_MAX).unwrap_or_default());
static DECIMAL256_MAX_DEC: Lazy<BigDecimal> =
    Lazy::new(|| BigDecimal::from_str(DECIMAL256_MAX).unwrap_or_default());

/// A numeric value node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumValue<T> {
    Simple(T),
    Expr(NumExprValue<T>),
    Ref(VariableRef),
    Fn(NumFnValue<T>),
    Env(NumEnvValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumExprValue<T> {
    pub left: Box<NumValue<T>>,
    pub op: NumExprOp,
    pub right: Box<NumValue<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumFnValue<T> {
    pub op: NumFnOp,
    pub right: Box<NumValue<T>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumExprOp {
    Add,
    Sub,
    Div,
    Mul,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumFnOp {
    Abs,
    Neg,
    Floor,
    Sqrt,
    Ceil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumEnvValue {
    Time,
    BlockHeight,
}

impl fmt::Display for NumFnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NumFnOp::Abs => "abs",
            NumFnOp::Neg => "neg",
            NumFnOp::Floor => "floor",
            NumFnOp::Sqrt => "sqrt",
            NumFnOp::Ceil => "ceil",
        };
        f.write_str(name)
    }
}

/// A literal type usable in `NumValue::Simple`
pub trait NumLiteral {
    const DOMAIN: &'static str;

    fn to_decimal(&self) -> Result<BigDecimal, NumericDomainError>;

    /// Parse a raw variable value under the same rules and bounds as a
    /// literal of this domain
    fn parse_raw(raw: &str) -> Result<BigDecimal, NumericDomainError>;

    /// floor/ceil only make sense for fractional domains
    fn supports(op: NumFnOp) -> bool {
        !matches!(op, NumFnOp::Floor | NumFnOp::Ceil)
    }
}

/// Unsigned 256-bit integer, written as a decimal string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uint256(pub String);

/// Signed 128-bit integer, written as a JSON number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Int128(pub i128);

/// Unsigned fixed-point decimal with 18 fractional digits, written as a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decimal256(pub String);

/// u64 carried as a string on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uint64(pub u64);

impl NumLiteral for Uint256 {
    const DOMAIN: &'static str = "uint";

    fn to_decimal(&self) -> Result<BigDecimal, NumericDomainError> {
        Self::parse_raw(&self.0)
    }

    fn parse_raw(raw: &str) -> Result<BigDecimal, NumericDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumericDomainError::InvalidLiteral(raw.to_string()));
        }
        let value = parse_decimal(trimmed)?;
        if value > *UINT256_MAX_DEC {
            return Err(NumericDomainError::OutOfBounds {
                value: raw.to_string(),
                domain: Self::DOMAIN,
            });
        }
        Ok(value)
    }
}

impl NumLiteral for Int128 {
    const DOMAIN: &'static str = "int";

    fn to_decimal(&self) -> Result<BigDecimal, NumericDomainError> {
        Ok(BigDecimal::from(self.0))
    }

    fn parse_raw(raw: &str) -> Result<BigDecimal, NumericDomainError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix(&['-', '+'][..]).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumericDomainError::InvalidLiteral(raw.to_string()));
        }
        trimmed
            .parse::<i128>()
            .map(BigDecimal::from)
            .map_err(|_| NumericDomainError::OutOfBounds {
                value: raw.to_string(),
                domain: Self::DOMAIN,
            })
    }
}

impl NumLiteral for Decimal256 {
    const DOMAIN: &'static str = "decimal";

    fn to_decimal(&self) -> Result<BigDecimal, NumericDomainError> {
        Self::parse_raw(&self.0)
    }

    fn parse_raw(raw: &str) -> Result<BigDecimal, NumericDomainError> {
        let trimmed = raw.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let well_formed = !whole.is_empty()
            && whole.bytes().all(|b| b.is_ascii_digit())
            && fraction.bytes().all(|b| b.is_ascii_digit())
            && !(trimmed.contains('.') && fraction.is_empty());
        if !well_formed {
            return Err(NumericDomainError::InvalidLiteral(raw.to_string()));
        }
        if fraction.len() > DECIMAL_PLACES {
            return Err(NumericDomainError::OutOfBounds {
                value: raw.to_string(),
                domain: Self::DOMAIN,
            });
        }
        let value = parse_decimal(trimmed)?;
        if value > *DECIMAL256_MAX_DEC {
            return Err(NumericDomainError::OutOfBounds {
                value: raw.to_string(),
                domain: Self::DOMAIN,
            });
        }
        Ok(value)
    }

    fn supports(_op: NumFnOp) -> bool {
        true
    }
}

/// Only called on digit strings that already passed a domain check
fn parse_decimal(raw: &str) -> Result<BigDecimal, NumericDomainError> {
    BigDecimal::from_str(raw).map_err(|_| NumericDomainError::InvalidLiteral(raw.to_string()))
}

/// Values beyond the 64-bit range are written as strings; JSON readers
/// would otherwise round them through f64
impl Serialize for Int128 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match i64::try_from(self.0) {
            Ok(small) => serializer.serialize_i64(small),
            Err(_) => serializer.collect_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Int128 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Int128Visitor;

        impl Visitor<'_> for Int128Visitor {
            type Value = Int128;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a signed 128-bit integer")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Int128, E> {
                Ok(Int128(v.into()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Int128, E> {
                Ok(Int128(v.into()))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<Int128, E> {
                Ok(Int128(v))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Int128, E> {
                i128::try_from(v)
                    .map(Int128)
                    .map_err(|_| E::custom(format!("{} overflows i128", v)))
            }

            /// JSON integers outside the 64-bit range only reach us rounded
            /// to f64, so they are refused rather than silently altered
            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Int128, E> {
                if v.is_finite() && v.fract() == 0.0 {
                    Err(E::custom(format!(
                        "int literal {} exceeds the 64-bit JSON number range; write it as a string",
                        v
                    )))
                } else {
                    Err(E::invalid_type(de::Unexpected::Float(v), &self))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Int128, E> {
                v.trim()
                    .parse::<i128>()
                    .map(Int128)
                    .map_err(|_| E::custom(format!("invalid int literal '{}'", v)))
            }
        }

        deserializer.deserialize_any(Int128Visitor)
    }
}

impl TryFrom<String> for Uint64 {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse().map(Uint64)
    }
}

impl From<Uint64> for String {
    fn from(value: Uint64) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for Uint64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_uint256_literal() {
        assert_eq!(Uint256("1000".to_string()).to_decimal().unwrap(), dec("1000"));
        assert_eq!(
            Uint256(UINT256_MAX.to_string()).to_decimal().unwrap(),
            dec(UINT256_MAX)
        );
    }

    #[test]
    fn test_uint256_rejects_negative_and_fraction() {
        assert_eq!(
            Uint256("-1".to_string()).to_decimal(),
            Err(NumericDomainError::InvalidLiteral("-1".to_string()))
        );
        assert!(Uint256("1.5".to_string()).to_decimal().is_err());
        assert!(Uint256("abc".to_string()).to_decimal().is_err());
    }

    #[test]
    fn test_uint256_overflow() {
        let too_big =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(
            Uint256(too_big.to_string()).to_decimal(),
            Err(NumericDomainError::OutOfBounds { domain: "uint", .. })
        ));
    }

    #[test]
    fn test_decimal256_literal() {
        assert_eq!(Decimal256("1.25".to_string()).to_decimal().unwrap(), dec("1.25"));
        assert_eq!(Decimal256("7".to_string()).to_decimal().unwrap(), dec("7"));
        assert!(Decimal256("1.".to_string()).to_decimal().is_err());
        assert!(Decimal256("-0.5".to_string()).to_decimal().is_err());
        assert!(matches!(
            Decimal256("0.0000000000000000001".to_string()).to_decimal(),
            Err(NumericDomainError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_int128_accepts_numbers_and_strings() {
        let v: Int128 = serde_json::from_value(json!(-42)).unwrap();
        assert_eq!(v, Int128(-42));
        let v: Int128 = serde_json::from_value(json!("-170141183460469231731687303715884105728"))
            .unwrap();
        assert_eq!(v, Int128(i128::MIN));
        assert_eq!(Int128(-42).to_decimal().unwrap(), dec("-42"));
    }

    #[test]
    fn test_parse_raw_applies_domain_rules() {
        assert_eq!(Uint256::parse_raw(" 42 ").unwrap(), dec("42"));
        assert!(Uint256::parse_raw("4.2e1").is_err());
        assert_eq!(Int128::parse_raw("-7").unwrap(), dec("-7"));
        assert!(Int128::parse_raw("1.5").is_err());
        assert!(matches!(
            Int128::parse_raw("170141183460469231731687303715884105728"),
            Err(NumericDomainError::OutOfBounds { domain: "int", .. })
        ));
        assert_eq!(Decimal256::parse_raw("0.5").unwrap(), dec("0.5"));
        assert!(matches!(
            Decimal256::parse_raw("1E+400000000"),
            Err(NumericDomainError::InvalidLiteral(_))
        ));
    }

    #[test]
    fn test_int128_beyond_64_bits_uses_string_form() {
        let err = serde_json::from_str::<Int128>("10000000000000000000000").unwrap_err();
        assert!(err.to_string().contains("write it as a string"));
        assert!(serde_json::from_str::<Int128>("1.5").is_err());

        let big = Int128(10_000_000_000_000_000_000_000);
        let encoded = serde_json::to_string(&big).unwrap();
        assert_eq!(encoded, "\"10000000000000000000000\"");
        assert_eq!(serde_json::from_str::<Int128>(&encoded).unwrap(), big);
        assert_eq!(serde_json::to_string(&Int128(-3)).unwrap(), "-3");
    }

    #[test]
    fn test_rounding_support_by_domain() {
        assert!(!Uint256::supports(NumFnOp::Floor));
        assert!(!Int128::supports(NumFnOp::Ceil));
        assert!(Int128::supports(NumFnOp::Abs));
        assert!(Decimal256::supports(NumFnOp::Floor));
    }

    #[test]
    fn test_num_value_decode() {
        let value: NumValue<Decimal256> = serde_json::from_value(json!({
            "fn": {"op": "sqrt", "right": {"expr": {
                "left": {"simple": "2.5"},
                "op": "mul",
                "right": {"ref": "$warp.variable.factor"}
            }}}
        }))
        .unwrap();

        let NumValue::Fn(func) = value else {
            panic!("Expected fn value");
        };
        assert_eq!(func.op, NumFnOp::Sqrt);
        assert!(matches!(*func.right, NumValue::Expr(_)));
    }

    #[test]
    fn test_num_value_unknown_tag_is_error() {
        let result = serde_json::from_value::<NumValue<Uint256>>(json!({"oracle": "btc"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_uint64_string_wire_format() {
        assert_eq!(serde_json::to_value(Uint64(5)).unwrap(), json!("5"));
        assert_eq!(serde_json::from_value::<Uint64>(json!("77")).unwrap(), Uint64(77));
        assert!(serde_json::from_value::<Uint64>(json!("-1")).is_err());
    }
}
