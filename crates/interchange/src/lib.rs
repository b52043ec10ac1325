//! placard-interchange: decoded layout schema records.
//!
//! Provides the typed records (catalog items, creatives, response options,
//! links, images, offers, slots) that the placeholder and predicate engines
//! consume, and a single `from_schema()` entry point that decodes a
//! `serde_json::Value` document into a `LayoutSchema`.
//!
//! Layout trees and settings are renderer territory and are carried through
//! as raw JSON.

pub mod deserialize;
pub mod types;

pub use deserialize::{from_schema, from_schema_str, SchemaError};
pub use types::*;
