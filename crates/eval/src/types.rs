//! Predicate tree types for conditional layout branches.
//!
//! These types are DISTINCT from the raw schema JSON. The schema decoder
//! hands over predicate arrays, which [`crate::decode`] turns into a
//! [`PredicateSet`] before evaluation.

use std::fmt;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Errors that can occur while decoding predicates.
///
/// Evaluation itself never fails: malformed or absent operands evaluate to
/// false instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Error deserializing predicate JSON.
    DeserializeError { message: String },
    /// The predicate kind is not one this engine knows.
    UnknownPredicate { kind: String },
    /// A condition name that is not recognized at all.
    InvalidCondition { predicate: String, condition: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DeserializeError { message } => {
                write!(f, "deserialization error: {}", message)
            }
            EvalError::UnknownPredicate { kind } => {
                write!(f, "unknown predicate kind: {}", kind)
            }
            EvalError::InvalidCondition {
                predicate,
                condition,
            } => {
                write!(
                    f,
                    "invalid condition '{}' for predicate '{}'",
                    condition, predicate
                )
            }
        }
    }
}

impl std::error::Error for EvalError {}

// ──────────────────────────────────────────────
// Conditions
// ──────────────────────────────────────────────

/// Comparison operator carried by every predicate.
///
/// Not every predicate accepts every condition; a condition a predicate
/// does not understand evaluates to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Is,
    IsNot,
    IsAbove,
    IsBelow,
    Exists,
    NotExists,
    IsTrue,
    IsFalse,
}

impl Condition {
    pub fn parse(s: &str) -> Option<Condition> {
        match s {
            "is" => Some(Condition::Is),
            "isNot" => Some(Condition::IsNot),
            "isAbove" => Some(Condition::IsAbove),
            "isBelow" => Some(Condition::IsBelow),
            "exists" => Some(Condition::Exists),
            "notExists" => Some(Condition::NotExists),
            "isTrue" => Some(Condition::IsTrue),
            "isFalse" => Some(Condition::IsFalse),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Is => "is",
            Condition::IsNot => "isNot",
            Condition::IsAbove => "isAbove",
            Condition::IsBelow => "isBelow",
            Condition::Exists => "exists",
            Condition::NotExists => "notExists",
            Condition::IsTrue => "isTrue",
            Condition::IsFalse => "isFalse",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ──────────────────────────────────────────────
// Predicates
// ──────────────────────────────────────────────

/// One typed condition over UI state.
///
/// Index-like operands are kept as text and parsed at evaluation time so a
/// malformed value makes the predicate false rather than failing the whole
/// layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Current progress index; negative values count from the end.
    Progression { condition: Condition, value: String },
    /// Position of the node being rendered; negative values count from the end.
    Position { condition: Condition, value: String },
    /// Breakpoint name, compared by ordinal.
    Breakpoint { condition: Condition, value: String },
    DarkMode { condition: Condition, value: bool },
    /// Integer custom state keyed by (current position, key).
    CustomState {
        key: String,
        condition: Condition,
        value: i32,
    },
    StaticBoolean { condition: Condition, value: bool },
    StaticString {
        input: String,
        condition: Condition,
        value: String,
    },
    CreativeCopyExists { key: String, condition: Condition },
    /// `input` and `value` are both placeholder templates.
    PlaceholderTextValue {
        input: String,
        condition: Condition,
        value: String,
    },
    /// Character count of the expanded `input`.
    PlaceholderTextLength {
        input: String,
        condition: Condition,
        value: String,
    },
    /// Expanded `input` parsed as a decimal number.
    PlaceholderNumeric {
        input: String,
        condition: Condition,
        value: String,
    },
}

impl Predicate {
    /// Schema name of this predicate kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Predicate::Progression { .. } => "progression",
            Predicate::Position { .. } => "position",
            Predicate::Breakpoint { .. } => "breakpoint",
            Predicate::DarkMode { .. } => "darkMode",
            Predicate::CustomState { .. } => "customState",
            Predicate::StaticBoolean { .. } => "staticBoolean",
            Predicate::StaticString { .. } => "staticString",
            Predicate::CreativeCopyExists { .. } => "creativeCopy",
            Predicate::PlaceholderTextValue { .. } => "placeholderTextValue",
            Predicate::PlaceholderTextLength { .. } => "placeholderTextLength",
            Predicate::PlaceholderNumeric { .. } => "placeholderNumeric",
        }
    }
}

/// A conjunction of predicates. The empty set always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.predicates.iter()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl From<Vec<Predicate>> for PredicateSet {
    fn from(predicates: Vec<Predicate>) -> Self {
        PredicateSet { predicates }
    }
}

impl FromIterator<Predicate> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        PredicateSet {
            predicates: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PredicateSet {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}
