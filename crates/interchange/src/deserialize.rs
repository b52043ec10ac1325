//! Deserialization from layout schema JSON into typed records.
//!
//! The main entry point is [`from_schema`], which takes a
//! `&serde_json::Value` and produces a [`LayoutSchema`].

use std::collections::BTreeMap;
use std::fmt;

use crate::types::*;

/// Errors during schema deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document is missing a required top-level field.
    MissingField { field: String },
    /// A record inside the document does not have the expected shape.
    InvalidRecord { kind: String, message: String },
    /// The input was not valid JSON at all.
    Json(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingField { field } => {
                write!(f, "schema missing required field: '{}'", field)
            }
            SchemaError::InvalidRecord { kind, message } => {
                write!(f, "invalid {}: {}", kind, message)
            }
            SchemaError::Json(msg) => write!(f, "invalid schema JSON: {}", msg),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Parse a schema document from its JSON text.
pub fn from_schema_str(text: &str) -> Result<LayoutSchema, SchemaError> {
    let doc: serde_json::Value =
        serde_json::from_str(text).map_err(|e| SchemaError::Json(e.to_string()))?;
    from_schema(&doc)
}

/// Deserialize a layout schema document into typed records.
///
/// `breakpoints` and `slots` are required. Everything the engines do not
/// interpret (`layout`, `settings`, slot layout variants) is carried through
/// untouched.
pub fn from_schema(doc: &serde_json::Value) -> Result<LayoutSchema, SchemaError> {
    let breakpoints = parse_breakpoints(doc.get("breakpoints").ok_or_else(|| {
        SchemaError::MissingField {
            field: "breakpoints".to_string(),
        }
    })?)?;

    let slots_arr = doc
        .get("slots")
        .and_then(|s| s.as_array())
        .ok_or_else(|| SchemaError::MissingField {
            field: "slots".to_string(),
        })?;

    let mut slots = Vec::with_capacity(slots_arr.len());
    for (i, obj) in slots_arr.iter().enumerate() {
        let slot: Slot =
            serde_json::from_value(obj.clone()).map_err(|e| SchemaError::InvalidRecord {
                kind: format!("slot[{}]", i),
                message: e.to_string(),
            })?;
        slots.push(slot);
    }

    Ok(LayoutSchema {
        session_id: optional_str(doc, "sessionId"),
        page_instance_guid: optional_str(doc, "pageInstanceGuid"),
        token: optional_str(doc, "token"),
        breakpoints,
        settings: doc
            .get("settings")
            .cloned()
            .unwrap_or(serde_json::Value::Null),
        layout: doc.get("layout").cloned(),
        slots,
    })
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn optional_str(obj: &serde_json::Value, field: &str) -> String {
    obj.get(field)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn parse_breakpoints(v: &serde_json::Value) -> Result<BTreeMap<String, u32>, SchemaError> {
    let obj = v.as_object().ok_or_else(|| SchemaError::InvalidRecord {
        kind: "breakpoints".to_string(),
        message: "expected an object of name -> pixel width".to_string(),
    })?;

    let mut out = BTreeMap::new();
    for (name, px) in obj {
        let width = px
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| SchemaError::InvalidRecord {
                kind: "breakpoints".to_string(),
                message: format!("breakpoint '{}' is not a pixel width", name),
            })?;
        out.insert(name.clone(), width);
    }
    Ok(out)
}
