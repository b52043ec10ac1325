//! Numeric operands for predicates, using `rust_decimal`.
//!
//! Placeholder-derived numbers are compared as `rust_decimal::Decimal` so
//! `"10.50"` and `"10.5"` are equal and no `f64` rounding creeps in.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::Condition;

/// Parse resolved text as a decimal number.
///
/// Accepts plain (`-12.5`) and scientific (`1.2e3`) notation, ignoring
/// surrounding whitespace. Anything else is `None`.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parse an index operand. Integers only.
pub fn parse_index(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

/// Resolve a possibly negative index against `total`: `-1` is the last item.
///
/// `None` when the offset does not fit in an `i32`; nothing can match it.
pub fn resolve_index(value: i32, total: i32) -> Option<i32> {
    if value < 0 {
        total.checked_add(value)
    } else {
        Some(value)
    }
}

/// Apply an ordering condition to `actual` versus `expected`.
///
/// Only `is`, `isNot`, `isAbove` and `isBelow` are ordering conditions;
/// every other condition is false.
pub fn compare<T: Ord>(condition: Condition, actual: T, expected: T) -> bool {
    let ordering = actual.cmp(&expected);
    match condition {
        Condition::Is => ordering == Ordering::Equal,
        Condition::IsNot => ordering != Ordering::Equal,
        Condition::IsAbove => ordering == Ordering::Greater,
        Condition::IsBelow => ordering == Ordering::Less,
        _ => false,
    }
}
