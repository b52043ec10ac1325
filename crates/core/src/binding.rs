//! Resolved values versus live state bindings.

use serde::{Deserialize, Serialize};

/// The result of mapping a placeholder or a templated string.
///
/// `Value` is final text. `State` names something that changes while the
/// layout is on screen and must be re-rendered on every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DataBinding<T> {
    Value(T),
    State(T),
}

impl<T> DataBinding<T> {
    pub fn is_state(&self) -> bool {
        matches!(self, DataBinding::State(_))
    }

    pub fn inner(&self) -> &T {
        match self {
            DataBinding::Value(v) | DataBinding::State(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            DataBinding::Value(v) | DataBinding::State(v) => v,
        }
    }
}

/// A recognized `STATE.*` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    IndicatorPosition,
    TotalOffers,
}

impl StateKey {
    /// Case-insensitive lookup; unrecognized keys are `None`.
    pub fn parse(key: &str) -> Option<StateKey> {
        if key.eq_ignore_ascii_case("IndicatorPosition") {
            Some(StateKey::IndicatorPosition)
        } else if key.eq_ignore_ascii_case("TotalOffers") {
            Some(StateKey::TotalOffers)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StateKey::IndicatorPosition => "IndicatorPosition",
            StateKey::TotalOffers => "TotalOffers",
        }
    }
}

/// Current values of the live state keys, supplied at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateValues {
    /// Zero-based index of the offer on screen.
    pub indicator_position: usize,
    pub total_offers: usize,
}

impl StateValues {
    /// Display text for `key`. The indicator position is shown one-based.
    pub fn render(&self, key: StateKey) -> String {
        match key {
            StateKey::IndicatorPosition => self.indicator_position.saturating_add(1).to_string(),
            StateKey::TotalOffers => self.total_offers.to_string(),
        }
    }
}

/// One piece of a bound template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Final text: template literal or an already substituted value.
    Text(String),
    /// A placeholder that resolved to live state. `raw` is its source text.
    State { raw: String, key: StateKey },
}

/// A template after data substitution, with its state placeholders kept
/// as separate segments.
///
/// Substituted values are never scanned for markers again, so copy that
/// happens to contain `%^` or another placeholder's text renders verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundText {
    segments: Vec<Segment>,
}

impl BoundText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append final text, merging with a preceding text segment.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Text(last)) => last.push_str(text),
            _ => self.segments.push(Segment::Text(text.to_string())),
        }
    }

    pub fn push_state(&mut self, raw: impl Into<String>, key: StateKey) {
        self.segments.push(Segment::State {
            raw: raw.into(),
            key,
        });
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_state(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::State { .. }))
    }

    /// The text with state placeholders left in their source form.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Text(text) => text.as_str(),
                Segment::State { raw, .. } => raw.as_str(),
            })
            .collect()
    }

    /// The text with every state placeholder replaced by its live value.
    pub fn render(&self, values: &StateValues) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::State { key, .. } => out.push_str(&values.render(*key)),
            }
        }
        out
    }
}

impl std::fmt::Display for BoundText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}
