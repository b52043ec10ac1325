//! Property-chain walking over the closed set of record shapes.
//!
//! Every record the resolver can see implements [`PropertySource`], which
//! exposes its fields by name as a [`Property`]. [`walk`] follows a dotted
//! path through nested records until it reaches text or a map.
//!
//! Reaching a map ends the walk: all remaining segments, rejoined with `.`,
//! form a single map key. Copy keys are themselves dotted (`creative.title`),
//! so drilling further would never find them.

use std::borrow::Cow;
use std::collections::BTreeMap;

use placard_interchange::{CatalogItem, ResponseOption};

/// A named field of a record, as seen by the path walker.
#[derive(Debug, Clone)]
pub enum Property<'a> {
    Text(Cow<'a, str>),
    Record(&'a dyn PropertySource),
    Map(&'a BTreeMap<String, String>),
}

/// A record whose fields can be looked up by name.
pub trait PropertySource: std::fmt::Debug {
    fn property(&self, name: &str) -> Option<Property<'_>>;
}

/// Walk `path` starting at `root`.
///
/// Returns `None` when a segment is missing, when the path ends on a record
/// or map rather than text, or when text is reached with segments left over.
pub fn walk(root: &dyn PropertySource, path: &str) -> Option<String> {
    walk_from(Property::Record(root), path)
}

/// Walk `path` starting at an arbitrary property.
pub fn walk_from(start: Property<'_>, path: &str) -> Option<String> {
    let segments: Vec<&str> = if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    };

    let mut current = start;
    let mut i = 0;
    loop {
        match current {
            Property::Text(text) => {
                return (i == segments.len()).then(|| text.into_owned());
            }
            Property::Map(map) => {
                if i == segments.len() {
                    return None;
                }
                let key = segments[i..].join(".");
                return map.get(&key).cloned();
            }
            Property::Record(record) => {
                let segment = segments.get(i)?;
                current = record.property(segment)?;
                i += 1;
            }
        }
    }
}

// ── Dynamic records ─────────────────────────────────────────────────

/// An owned field of a dynamic [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    Record(Record),
    Map(BTreeMap<String, String>),
}

/// An owned, dynamically shaped record.
///
/// Lets callers hand the resolver data that does not fit one of the schema
/// record types, while keeping the record/map distinction explicit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: Field) {
        self.fields.insert(name.into(), field);
    }
}

impl PropertySource for Record {
    fn property(&self, name: &str) -> Option<Property<'_>> {
        self.fields.get(name).map(|f| match f {
            Field::Text(s) => Property::Text(Cow::Borrowed(s.as_str())),
            Field::Record(r) => Property::Record(r),
            Field::Map(m) => Property::Map(m),
        })
    }
}

// ── Schema records ──────────────────────────────────────────────────

fn text(s: &str) -> Option<Property<'_>> {
    Some(Property::Text(Cow::Borrowed(s)))
}

fn opt_text(s: &Option<String>) -> Option<Property<'_>> {
    s.as_deref().and_then(text)
}

fn number(n: &Option<serde_json::Number>) -> Option<Property<'static>> {
    n.as_ref().map(|n| Property::Text(Cow::Owned(n.to_string())))
}

impl PropertySource for CatalogItem {
    fn property(&self, name: &str) -> Option<Property<'_>> {
        match name {
            "catalogItemId" => text(&self.catalog_item_id),
            "cartItemId" => opt_text(&self.cart_item_id),
            "title" => text(&self.title),
            "description" => text(&self.description),
            "price" => number(&self.price),
            "originalPrice" => number(&self.original_price),
            "currency" => opt_text(&self.currency),
            "quantity" => number(&self.quantity),
            "linkedProductId" => opt_text(&self.linked_product_id),
            "providerData" => opt_text(&self.provider_data),
            "copy" => Some(Property::Map(&self.copy)),
            _ => None,
        }
    }
}

impl PropertySource for ResponseOption {
    fn property(&self, name: &str) -> Option<Property<'_>> {
        match name {
            "id" => text(&self.id),
            "action" => opt_text(&self.action),
            "instanceGuid" => text(&self.instance_guid),
            "token" => text(&self.token),
            "signalType" => opt_text(&self.signal_type),
            "shortLabel" => opt_text(&self.short_label),
            "longLabel" => opt_text(&self.long_label),
            "shortSuccessLabel" => opt_text(&self.short_success_label),
            "isPositive" => Some(Property::Text(Cow::Borrowed(if self.is_positive {
                "true"
            } else {
                "false"
            }))),
            "url" => opt_text(&self.url),
            "responseJWTToken" => opt_text(&self.response_jwt_token),
            _ => None,
        }
    }
}
