//! Predicate evaluation against a UI state snapshot.
//!
//! A predicate set is a conjunction: every predicate must hold, and the
//! empty set holds unconditionally. Evaluation has no error channel. An
//! operand that is missing or does not parse makes its predicate false,
//! except that `isNot` holds when the compared quantity is absent.

use tracing::trace;

use crate::numeric::{compare, parse_decimal, parse_index, resolve_index};
use crate::state::{breakpoint_for_width, breakpoint_ordinal, UiStateSnapshot};
use crate::types::{Condition, Predicate, PredicateSet};

/// Whether the branch guarded by `predicates` is active in `state`.
pub fn should_apply(predicates: &PredicateSet, state: &UiStateSnapshot<'_>) -> bool {
    predicates.iter().all(|p| eval_predicate(p, state))
}

/// Evaluate a single predicate.
pub fn eval_predicate(predicate: &Predicate, state: &UiStateSnapshot<'_>) -> bool {
    let result = match predicate {
        Predicate::Progression { condition, value } => parse_index(value)
            .and_then(|v| resolve_index(v, state.total_items))
            .is_some_and(|target| compare(*condition, state.current_progress, target)),

        Predicate::Position { condition, value } => match (parse_index(value), state.position) {
            (None, _) => false,
            (Some(v), Some(position)) => resolve_index(v, state.total_items)
                .is_some_and(|target| compare(*condition, position, target)),
            (Some(_), None) => *condition == Condition::IsNot,
        },

        Predicate::Breakpoint { condition, value } => {
            let current = breakpoint_for_width(state.breakpoints, state.width);
            let target = breakpoint_ordinal(state.breakpoints, value);
            match (current, target) {
                (Some((current, _)), Some(target)) => compare(*condition, current, target),
                _ => false,
            }
        }

        Predicate::DarkMode { condition, value } => match condition {
            Condition::Is => state.dark_mode == *value,
            Condition::IsNot => state.dark_mode != *value,
            Condition::IsTrue => state.dark_mode,
            Condition::IsFalse => !state.dark_mode,
            _ => false,
        },

        Predicate::CustomState {
            key,
            condition,
            value,
        } => match state.custom_value(key) {
            Some(current) => compare(*condition, current, *value),
            None => *condition == Condition::IsNot,
        },

        Predicate::StaticBoolean { condition, value } => match condition {
            Condition::IsTrue => *value,
            Condition::IsFalse => !*value,
            _ => false,
        },

        Predicate::StaticString {
            input,
            condition,
            value,
        } => match condition {
            Condition::Is => input == value,
            Condition::IsNot => input != value,
            _ => false,
        },

        Predicate::CreativeCopyExists { key, condition } => {
            let exists = copy_exists(state, key);
            match condition {
                Condition::Exists => exists,
                Condition::NotExists => !exists,
                _ => false,
            }
        }

        Predicate::PlaceholderTextValue {
            input,
            condition,
            value,
        } => match (expand_operand(input, state), expand_operand(value, state)) {
            (Some(input), Some(value)) => match condition {
                Condition::Is => input == value,
                Condition::IsNot => input != value,
                _ => false,
            },
            _ => false,
        },

        Predicate::PlaceholderTextLength {
            input,
            condition,
            value,
        } => {
            let length = expand_operand(input, state).map(|s| s.chars().count() as i64);
            let expected = expand_operand(value, state)
                .and_then(|v| v.trim().parse::<i64>().ok());
            match (length, expected) {
                (Some(length), Some(expected)) => compare(*condition, length, expected),
                _ => false,
            }
        }

        Predicate::PlaceholderNumeric {
            input,
            condition,
            value,
        } => {
            let actual = expand_operand(input, state).and_then(|s| parse_decimal(&s));
            let expected = expand_operand(value, state).and_then(|s| parse_decimal(&s));
            match (actual, expected) {
                (Some(actual), Some(expected)) => compare(*condition, actual, expected),
                _ => false,
            }
        }
    };

    trace!(kind = predicate.kind(), result, "predicate evaluated");
    result
}

/// Key present with a non-empty value in the creative copy, or failing
/// that in the catalog item's copy.
fn copy_exists(state: &UiStateSnapshot<'_>, key: &str) -> bool {
    let in_creative = state
        .creative
        .and_then(|c| c.copy.get(key))
        .is_some_and(|v| !v.is_empty());
    if in_creative {
        return true;
    }
    state
        .catalog_item
        .and_then(|i| i.copy.get(key))
        .is_some_and(|v| !v.is_empty())
}

/// Expand a placeholder operand against the snapshot's records, rendering
/// live state placeholders from the snapshot's progress.
fn expand_operand(template: &str, state: &UiStateSnapshot<'_>) -> Option<String> {
    match placard_core::expand_with_state(template, &state.data_source(), &state.state_values()) {
        Ok(text) => Some(text),
        Err(e) => {
            trace!(error = %e, template, "predicate operand did not expand");
            None
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Breakpoints, CustomStateKey, CustomStateMap};
    use placard_interchange::{CatalogItem, Creative};

    fn breakpoints() -> Breakpoints {
        let mut b = Breakpoints::new();
        b.insert("mobile".to_string(), 100);
        b.insert("tablet".to_string(), 500);
        b.insert("desktop".to_string(), 1000);
        b
    }

    fn set(predicates: Vec<Predicate>) -> PredicateSet {
        PredicateSet::from(predicates)
    }

    fn position(condition: Condition, value: &str) -> Predicate {
        Predicate::Position {
            condition,
            value: value.to_string(),
        }
    }

    #[test]
    fn empty_set_is_true() {
        let b = breakpoints();
        assert!(should_apply(&PredicateSet::new(), &UiStateSnapshot::new(&b)));
    }

    #[test]
    fn progression_negative_index() {
        let b = breakpoints();
        let pred = Predicate::Progression {
            condition: Condition::Is,
            value: "-1".to_string(),
        };
        let last = UiStateSnapshot::new(&b).with_progress(2, 3);
        let first = UiStateSnapshot::new(&b).with_progress(0, 3);
        assert!(eval_predicate(&pred, &last));
        assert!(!eval_predicate(&pred, &first));
    }

    #[test]
    fn progression_ordering() {
        let b = breakpoints();
        let state = UiStateSnapshot::new(&b).with_progress(1, 3);
        let above = Predicate::Progression {
            condition: Condition::IsAbove,
            value: "0".to_string(),
        };
        let below = Predicate::Progression {
            condition: Condition::IsBelow,
            value: "1".to_string(),
        };
        assert!(eval_predicate(&above, &state));
        assert!(!eval_predicate(&below, &state));
    }

    #[test]
    fn position_negative_index() {
        let b = breakpoints();
        let pred = position(Condition::Is, "-1");
        for p in 0..3 {
            let state = UiStateSnapshot::new(&b)
                .with_progress(0, 3)
                .with_position(Some(p));
            assert_eq!(eval_predicate(&pred, &state), p == 2);
        }
    }

    #[test]
    fn absent_position_asymmetry() {
        let b = breakpoints();
        let state = UiStateSnapshot::new(&b).with_position(None);
        assert!(eval_predicate(&position(Condition::IsNot, "1"), &state));
        assert!(!eval_predicate(&position(Condition::Is, "1"), &state));
        assert!(!eval_predicate(&position(Condition::IsAbove, "0"), &state));
        assert!(!eval_predicate(&position(Condition::IsBelow, "5"), &state));
    }

    #[test]
    fn malformed_position_operand_is_false() {
        let b = breakpoints();
        let state = UiStateSnapshot::new(&b).with_position(None);
        assert!(!eval_predicate(&position(Condition::IsNot, "first"), &state));
    }

    #[test]
    fn out_of_range_negative_index_matches_nothing() {
        let b = breakpoints();
        let state = UiStateSnapshot::new(&b)
            .with_progress(0, i32::MIN)
            .with_position(Some(0));
        let min = i32::MIN.to_string();
        for condition in [Condition::Is, Condition::IsNot, Condition::IsAbove] {
            let progression = Predicate::Progression {
                condition,
                value: "-1".to_string(),
            };
            assert!(!eval_predicate(&progression, &state));
        }
        let far = UiStateSnapshot::new(&b)
            .with_progress(0, -1)
            .with_position(Some(0));
        assert!(!eval_predicate(&position(Condition::IsNot, &min), &far));
        assert!(!eval_predicate(&position(Condition::IsBelow, &min), &far));
    }

    #[test]
    fn breakpoint_ordinal_comparison() {
        let b = breakpoints();
        let state = UiStateSnapshot::new(&b).with_width(250.0);
        let above_mobile = Predicate::Breakpoint {
            condition: Condition::IsAbove,
            value: "mobile".to_string(),
        };
        let is_tablet = Predicate::Breakpoint {
            condition: Condition::Is,
            value: "tablet".to_string(),
        };
        let below_desktop = Predicate::Breakpoint {
            condition: Condition::IsBelow,
            value: "desktop".to_string(),
        };
        let unknown = Predicate::Breakpoint {
            condition: Condition::IsNot,
            value: "watch".to_string(),
        };
        assert!(eval_predicate(&above_mobile, &state));
        assert!(eval_predicate(&is_tablet, &state));
        assert!(eval_predicate(&below_desktop, &state));
        assert!(!eval_predicate(&unknown, &state));
    }

    #[test]
    fn dark_mode() {
        let b = breakpoints();
        let dark = UiStateSnapshot::new(&b).with_dark_mode(true);
        assert!(eval_predicate(
            &Predicate::DarkMode {
                condition: Condition::Is,
                value: true
            },
            &dark
        ));
        assert!(!eval_predicate(
            &Predicate::DarkMode {
                condition: Condition::IsNot,
                value: true
            },
            &dark
        ));
        assert!(eval_predicate(
            &Predicate::DarkMode {
                condition: Condition::IsTrue,
                value: false
            },
            &dark
        ));
    }

    #[test]
    fn static_boolean_ignores_nothing_but_input() {
        let b = breakpoints();
        let state = UiStateSnapshot::new(&b);
        let t = Predicate::StaticBoolean {
            condition: Condition::IsTrue,
            value: true,
        };
        let f = Predicate::StaticBoolean {
            condition: Condition::IsFalse,
            value: true,
        };
        let bad = Predicate::StaticBoolean {
            condition: Condition::Is,
            value: true,
        };
        assert!(eval_predicate(&t, &state));
        assert!(!eval_predicate(&f, &state));
        assert!(!eval_predicate(&bad, &state));
    }

    #[test]
    fn static_string() {
        let b = breakpoints();
        let state = UiStateSnapshot::new(&b);
        let pred = Predicate::StaticString {
            input: "variant-a".to_string(),
            condition: Condition::IsNot,
            value: "variant-b".to_string(),
        };
        assert!(eval_predicate(&pred, &state));
    }

    #[test]
    fn custom_state_scoping_and_absence() {
        let b = breakpoints();
        let mut custom = CustomStateMap::new();
        custom.insert(CustomStateKey::new(None, "expanded"), 1);

        let is_one = Predicate::CustomState {
            key: "expanded".to_string(),
            condition: Condition::Is,
            value: 1,
        };
        let is_not_one = Predicate::CustomState {
            key: "expanded".to_string(),
            condition: Condition::IsNot,
            value: 1,
        };
        let above_zero = Predicate::CustomState {
            key: "expanded".to_string(),
            condition: Condition::IsAbove,
            value: 0,
        };

        let global = UiStateSnapshot::new(&b).with_custom_state(&custom);
        assert!(eval_predicate(&is_one, &global));
        assert!(eval_predicate(&above_zero, &global));
        assert!(!eval_predicate(&is_not_one, &global));

        // The global entry does not leak into a positioned node.
        let positioned = global.with_position(Some(1));
        assert!(!eval_predicate(&is_one, &positioned));
        assert!(!eval_predicate(&above_zero, &positioned));
        assert!(eval_predicate(&is_not_one, &positioned));
    }

    #[test]
    fn creative_copy_exists_falls_back_to_catalog_item() {
        let b = breakpoints();
        let mut creative = Creative::default();
        creative
            .copy
            .insert("creative.title".to_string(), "Title".to_string());
        creative
            .copy
            .insert("creative.empty".to_string(), String::new());
        let mut item = CatalogItem::default();
        item.copy
            .insert("creative.empty".to_string(), "From catalog".to_string());
        item.copy.insert("item.only".to_string(), "x".to_string());

        let creative_only = UiStateSnapshot::new(&b).with_creative(&creative);
        let both = creative_only.with_catalog_item(&item);

        let exists = |key: &str| Predicate::CreativeCopyExists {
            key: key.to_string(),
            condition: Condition::Exists,
        };
        let not_exists = |key: &str| Predicate::CreativeCopyExists {
            key: key.to_string(),
            condition: Condition::NotExists,
        };

        assert!(eval_predicate(&exists("creative.title"), &creative_only));
        assert!(!eval_predicate(&exists("creative.empty"), &creative_only));
        assert!(eval_predicate(&not_exists("creative.empty"), &creative_only));
        assert!(eval_predicate(&exists("creative.empty"), &both));
        assert!(eval_predicate(&exists("item.only"), &both));
        assert!(eval_predicate(&not_exists("missing"), &both));
    }

    #[test]
    fn placeholder_text_value() {
        let b = breakpoints();
        let mut creative = Creative::default();
        creative
            .copy
            .insert("creative.variant".to_string(), "compact".to_string());
        let state = UiStateSnapshot::new(&b).with_creative(&creative);

        let pred = Predicate::PlaceholderTextValue {
            input: "%^DATA.creativeCopy.creative.variant|full^%".to_string(),
            condition: Condition::Is,
            value: "compact".to_string(),
        };
        assert!(eval_predicate(&pred, &state));

        let illegal = Predicate::PlaceholderTextValue {
            input: "%^DATA.catalogItem.title^%".to_string(),
            condition: Condition::IsNot,
            value: "anything".to_string(),
        };
        assert!(!eval_predicate(&illegal, &state));
    }

    #[test]
    fn placeholder_text_length_counts_chars() {
        let b = breakpoints();
        let mut creative = Creative::default();
        creative
            .copy
            .insert("creative.title".to_string(), "Café ✓".to_string());
        let state = UiStateSnapshot::new(&b).with_creative(&creative);

        let pred = Predicate::PlaceholderTextLength {
            input: "%^DATA.creativeCopy.creative.title^%".to_string(),
            condition: Condition::Is,
            value: "6".to_string(),
        };
        assert!(eval_predicate(&pred, &state));

        let longer = Predicate::PlaceholderTextLength {
            input: "%^DATA.creativeCopy.creative.title^%".to_string(),
            condition: Condition::IsAbove,
            value: "10".to_string(),
        };
        assert!(!eval_predicate(&longer, &state));
    }

    #[test]
    fn placeholder_numeric_with_placeholder_value() {
        let b = breakpoints();
        let item = CatalogItem {
            price: Some(serde_json::Number::from_f64(19.99).unwrap()),
            original_price: Some(serde_json::Number::from(25)),
            ..Default::default()
        };
        let state = UiStateSnapshot::new(&b).with_catalog_item(&item);

        let discounted = Predicate::PlaceholderNumeric {
            input: "%^DATA.catalogItem.price^%".to_string(),
            condition: Condition::IsBelow,
            value: "%^DATA.catalogItem.originalPrice^%".to_string(),
        };
        assert!(eval_predicate(&discounted, &state));

        let not_a_number = Predicate::PlaceholderNumeric {
            input: "%^DATA.catalogItem.currency|n/a^%".to_string(),
            condition: Condition::IsNot,
            value: "0".to_string(),
        };
        assert!(!eval_predicate(&not_a_number, &state));
    }

    #[test]
    fn placeholder_numeric_reads_live_state() {
        let b = breakpoints();
        let state = UiStateSnapshot::new(&b).with_progress(1, 4);
        let pred = Predicate::PlaceholderNumeric {
            input: "%^STATE.TotalOffers^%".to_string(),
            condition: Condition::Is,
            value: "4".to_string(),
        };
        assert!(eval_predicate(&pred, &state));
    }

    #[test]
    fn conjunction() {
        let b = breakpoints();
        let state = UiStateSnapshot::new(&b)
            .with_progress(0, 2)
            .with_dark_mode(false);
        let both = set(vec![
            Predicate::Progression {
                condition: Condition::Is,
                value: "0".to_string(),
            },
            Predicate::DarkMode {
                condition: Condition::Is,
                value: false,
            },
        ]);
        let one_false = set(vec![
            Predicate::Progression {
                condition: Condition::Is,
                value: "0".to_string(),
            },
            Predicate::DarkMode {
                condition: Condition::Is,
                value: true,
            },
        ]);
        assert!(should_apply(&both, &state));
        assert!(!should_apply(&one_false, &state));
    }
}
