// SPDX-License-Identifier: MIT

//! Comparison operators
//!
//! An unresolved operand never matches: every operator returns false.

use super::ast::{NumOp, StringOp, TimeOp};
use crate::warp::variable::Resolution;
use bigdecimal::BigDecimal;

pub fn resolve_string_op(
    left: &Resolution<String>,
    right: &Resolution<String>,
    op: StringOp,
) -> bool {
    let (Resolution::Resolved(left), Resolution::Resolved(right)) = (left, right) else {
        return false;
    };

    match op {
        StringOp::Contains => left.contains(right.as_str()),
        StringOp::StartsWith => left.starts_with(right.as_str()),
        StringOp::EndsWith => left.ends_with(right.as_str()),
        StringOp::Eq => left == right,
        StringOp::Neq => left != right,
    }
}

/// Exact decimal comparison, no tolerance
pub fn resolve_num_op(
    left: &Resolution<BigDecimal>,
    right: &Resolution<BigDecimal>,
    op: NumOp,
) -> bool {
    let (Resolution::Resolved(left), Resolution::Resolved(right)) = (left, right) else {
        return false;
    };

    match op {
        NumOp::Eq => left == right,
        NumOp::Neq => left != right,
        NumOp::Lt => left < right,
        NumOp::Gt => left > right,
        NumOp::Gte => left >= right,
        NumOp::Lte => left <= right,
    }
}

/// Block time (Unix seconds) against a fixed timestamp
pub fn resolve_time_op(block_time: i64, comparator: u64, op: TimeOp) -> bool {
    let block_time = i128::from(block_time);
    let comparator = i128::from(comparator);
    match op {
        TimeOp::Lt => block_time < comparator,
        TimeOp::Gt => block_time > comparator,
    }
}

/// Block height against a fixed height
pub fn resolve_height_op(height: u64, comparator: u64, op: NumOp) -> bool {
    match op {
        NumOp::Eq => height == comparator,
        NumOp::Neq => height != comparator,
        NumOp::Lt => height < comparator,
        NumOp::Gt => height > comparator,
        NumOp::Gte => height >= comparator,
        NumOp::Lte => height <= comparator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn s(v: &str) -> Resolution<String> {
        Resolution::Resolved(v.to_string())
    }

    fn n(v: &str) -> Resolution<BigDecimal> {
        Resolution::Resolved(BigDecimal::from_str(v).unwrap())
    }

    #[test]
    fn test_string_ops() {
        assert!(resolve_string_op(&s("hello world"), &s("hello world"), StringOp::Eq));
        assert!(!resolve_string_op(&s("hello"), &s("wor"), StringOp::Contains));
        assert!(resolve_string_op(&s("hello world"), &s("wor"), StringOp::Contains));
        assert!(resolve_string_op(&s("hello"), &s("he"), StringOp::StartsWith));
        assert!(resolve_string_op(&s("hello"), &s("llo"), StringOp::EndsWith));
        assert!(resolve_string_op(&s("a"), &s("b"), StringOp::Neq));
    }

    #[test]
    fn test_string_ops_unresolved_is_false() {
        for op in [
            StringOp::Eq,
            StringOp::Neq,
            StringOp::Contains,
            StringOp::StartsWith,
            StringOp::EndsWith,
        ] {
            assert!(!resolve_string_op(&Resolution::Unresolved, &s("x"), op));
            assert!(!resolve_string_op(&s("x"), &Resolution::Unresolved, op));
        }
    }

    #[test]
    fn test_num_ops() {
        assert!(resolve_num_op(&n("1.50"), &n("1.5"), NumOp::Eq));
        assert!(resolve_num_op(&n("2"), &n("1.999999999999999999"), NumOp::Gt));
        assert!(resolve_num_op(&n("-3"), &n("0"), NumOp::Lt));
        assert!(resolve_num_op(&n("1"), &n("1"), NumOp::Lte));
        assert!(!resolve_num_op(&n("1"), &n("1"), NumOp::Neq));
    }

    #[test]
    fn test_eq_iff_gte_and_lte() {
        let samples = ["0", "1", "1.0", "-7.25", "1000000000000000000000000.000001"];
        for a in samples {
            for b in samples {
                let eq = resolve_num_op(&n(a), &n(b), NumOp::Eq);
                let both = resolve_num_op(&n(a), &n(b), NumOp::Gte)
                    && resolve_num_op(&n(a), &n(b), NumOp::Lte);
                assert_eq!(eq, both, "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_num_ops_unresolved_is_false() {
        assert!(!resolve_num_op(&Resolution::Unresolved, &n("1"), NumOp::Neq));
        assert!(!resolve_num_op(&n("1"), &Resolution::Unresolved, NumOp::Eq));
    }

    #[test]
    fn test_time_ops_are_strict() {
        assert!(resolve_time_op(2000, 1000, TimeOp::Gt));
        assert!(!resolve_time_op(1000, 1000, TimeOp::Gt));
        assert!(!resolve_time_op(1000, 1000, TimeOp::Lt));
        assert!(resolve_time_op(-1, 0, TimeOp::Lt));
    }

    #[test]
    fn test_height_ops() {
        assert!(resolve_height_op(10, 10, NumOp::Eq));
        assert!(resolve_height_op(10, 10, NumOp::Gte));
        assert!(!resolve_height_op(9, 10, NumOp::Gte));
        assert!(resolve_height_op(9, 10, NumOp::Neq));
    }
}
