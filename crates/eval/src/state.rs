//! The UI state a predicate set is evaluated against.

use std::collections::{BTreeMap, HashMap};

use placard_core::{DataSource, StateValues};
use placard_interchange::{CatalogItem, Creative};

/// Breakpoint name to pixel width, as carried by the layout schema.
pub type Breakpoints = BTreeMap<String, u32>;

/// Identity of one custom state entry.
///
/// `position: None` is the global scope. Lookups always use the position
/// being rendered, so a global entry is only seen where no position applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomStateKey {
    pub position: Option<i32>,
    pub key: String,
}

impl CustomStateKey {
    pub fn new(position: Option<i32>, key: impl Into<String>) -> Self {
        CustomStateKey {
            position,
            key: key.into(),
        }
    }
}

pub type CustomStateMap = HashMap<CustomStateKey, i32>;

/// Immutable snapshot of everything a predicate may look at.
///
/// Built fresh for each evaluation; nothing here is mutated while
/// predicates run.
#[derive(Debug, Clone, Copy)]
pub struct UiStateSnapshot<'a> {
    /// Zero-based index of the item currently in view.
    pub current_progress: i32,
    pub total_items: i32,
    /// Position of the node being rendered, if it sits inside a
    /// positioned container.
    pub position: Option<i32>,
    /// Viewport width in pixels.
    pub width: f32,
    pub breakpoints: &'a Breakpoints,
    pub dark_mode: bool,
    pub custom_state: Option<&'a CustomStateMap>,
    pub creative: Option<&'a Creative>,
    pub catalog_item: Option<&'a CatalogItem>,
}

impl<'a> UiStateSnapshot<'a> {
    pub fn new(breakpoints: &'a Breakpoints) -> Self {
        UiStateSnapshot {
            current_progress: 0,
            total_items: 1,
            position: None,
            width: 0.0,
            breakpoints,
            dark_mode: false,
            custom_state: None,
            creative: None,
            catalog_item: None,
        }
    }

    pub fn with_progress(mut self, current: i32, total: i32) -> Self {
        self.current_progress = current;
        self.total_items = total;
        self
    }

    pub fn with_position(mut self, position: Option<i32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    pub fn with_custom_state(mut self, custom_state: &'a CustomStateMap) -> Self {
        self.custom_state = Some(custom_state);
        self
    }

    pub fn with_creative(mut self, creative: &'a Creative) -> Self {
        self.creative = Some(creative);
        self
    }

    pub fn with_catalog_item(mut self, item: &'a CatalogItem) -> Self {
        self.catalog_item = Some(item);
        self
    }

    /// Custom state value for `key` at the current position.
    pub fn custom_value(&self, key: &str) -> Option<i32> {
        let lookup = CustomStateKey::new(self.position, key);
        self.custom_state?.get(&lookup).copied()
    }

    /// The placeholder data source implied by the records in view.
    pub fn data_source(&self) -> DataSource<'a> {
        match (self.creative, self.catalog_item) {
            (Some(c), Some(i)) => DataSource::offer_with_catalog_item(c, i),
            (Some(c), None) => DataSource::offer(c),
            (None, Some(i)) => DataSource::catalog_item(i),
            (None, None) => DataSource::state_only(),
        }
    }

    /// Live state values for rendering `STATE.*` placeholders.
    pub fn state_values(&self) -> StateValues {
        StateValues {
            indicator_position: usize::try_from(self.current_progress).unwrap_or(0),
            total_offers: usize::try_from(self.total_items).unwrap_or(0),
        }
    }
}

/// Breakpoints in ascending pixel order (ties keep name order).
pub fn ordered_breakpoints(breakpoints: &Breakpoints) -> Vec<(&str, u32)> {
    let mut ordered: Vec<(&str, u32)> = breakpoints
        .iter()
        .map(|(name, px)| (name.as_str(), *px))
        .collect();
    ordered.sort_by_key(|(_, px)| *px);
    ordered
}

/// Map a viewport width to a breakpoint, returning its ordinal and name.
///
/// Scans breakpoints in ascending pixel order and picks the first whose
/// pixel value exceeds `width`; if none does, the last one. `None` only
/// when there are no breakpoints.
pub fn breakpoint_for_width(breakpoints: &Breakpoints, width: f32) -> Option<(usize, &str)> {
    let ordered = ordered_breakpoints(breakpoints);
    let last = ordered.len().checked_sub(1)?;
    let index = ordered
        .iter()
        .position(|(_, px)| *px as f32 > width)
        .unwrap_or(last);
    Some((index, ordered[index].0))
}

/// Ordinal of the named breakpoint in ascending pixel order.
pub fn breakpoint_ordinal(breakpoints: &Breakpoints, name: &str) -> Option<usize> {
    ordered_breakpoints(breakpoints)
        .iter()
        .position(|(n, _)| *n == name)
}
