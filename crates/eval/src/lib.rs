//! placard-eval: predicate evaluation for conditional layout branches.
//!
//! A branch carries a `when` array of typed predicates. The renderer decodes
//! it once with [`parse_predicates`], then calls [`should_apply`] with a
//! fresh [`UiStateSnapshot`] whenever the UI state changes.
//!
//! Evaluation is pure and synchronous: it borrows the snapshot, never
//! mutates it, and never fails. Placeholder-derived predicates expand their
//! operands through `placard-core` before comparing.

pub mod decode;
pub mod numeric;
pub mod predicate;
pub mod state;
pub mod types;

pub use decode::{parse_predicate, parse_predicates};
pub use predicate::{eval_predicate, should_apply};
pub use state::{
    breakpoint_for_width, Breakpoints, CustomStateKey, CustomStateMap, UiStateSnapshot,
};
pub use types::{Condition, EvalError, Predicate, PredicateSet};

/// Decode a `when` array and evaluate it in one step.
///
/// Convenience for callers that do not cache decoded predicate sets.
pub fn evaluate(when: &serde_json::Value, state: &UiStateSnapshot<'_>) -> Result<bool, EvalError> {
    let predicates = parse_predicates(when)?;
    Ok(should_apply(&predicates, state))
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn evaluate_decodes_and_applies() {
        let mut breakpoints = Breakpoints::new();
        breakpoints.insert("mobile".to_string(), 100);
        breakpoints.insert("tablet".to_string(), 500);
        let state = UiStateSnapshot::new(&breakpoints)
            .with_width(250.0)
            .with_progress(0, 3);

        let when = serde_json::json!([
            { "breakpoint": { "condition": "is", "value": "tablet" } },
            { "progression": { "condition": "isNot", "value": -1 } }
        ]);
        assert_eq!(evaluate(&when, &state), Ok(true));

        let bad = serde_json::json!([{ "nope": {} }]);
        assert!(evaluate(&bad, &state).is_err());
    }
}
