//! Tokenizer for `%^LINK|LINK|DEFAULT^%` placeholder expressions.
//!
//! A placeholder runs from a start marker to the first end marker after it.
//! Start markers found in between are not special: they become part of the
//! expression text, so an unterminated placeholder followed by a complete one
//! collapses into a single expression whose default literal swallows the
//! second start marker. A start marker with no end marker after it is plain
//! text.

use std::ops::Range;

use crate::error::PlaceholderError;
use crate::namespace::{Namespace, DATA_PREFIX, STATE_PREFIX};

pub const START: &str = "%^";
pub const END: &str = "^%";
/// Suffix marking a namespaced link as mandatory.
pub const MANDATORY_MARKER: char = '!';
pub const LINK_SEPARATOR: char = '|';

/// One element of a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// `DATA.<namespace>.<dotted.path>`
    Data {
        namespace: Namespace,
        path: String,
        mandatory: bool,
    },
    /// `STATE.<key>`
    State { key: String, mandatory: bool },
    /// A bare default with no namespace prefix.
    Literal(String),
}

impl Link {
    pub fn is_mandatory(&self) -> bool {
        match self {
            Link::Data { mandatory, .. } | Link::State { mandatory, .. } => *mandatory,
            Link::Literal(_) => false,
        }
    }
}

/// A placeholder found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Exact source text including both markers.
    pub raw: String,
    /// Byte range of `raw` within the template.
    pub span: Range<usize>,
    /// The fallback chain, left to right.
    pub links: Vec<Link>,
}

/// Find every placeholder in `template`, in order of appearance.
pub fn lex(template: &str) -> Result<Vec<Placeholder>, PlaceholderError> {
    let mut placeholders = Vec::new();
    let mut pos = 0usize;

    while let Some(offset) = template[pos..].find(START) {
        let start = pos + offset;
        let body_start = start + START.len();
        let Some(end_offset) = template[body_start..].find(END) else {
            // Unterminated: the rest of the template is literal text.
            break;
        };
        let body_end = body_start + end_offset;
        let end = body_end + END.len();

        let links = parse_chain(&template[body_start..body_end])?;
        placeholders.push(Placeholder {
            raw: template[start..end].to_string(),
            span: start..end,
            links,
        });
        pos = end;
    }

    Ok(placeholders)
}

/// Parse the text between the markers into a fallback chain.
///
/// Surrounding whitespace on each link is ignored and empty links are
/// skipped; a chain with no links at all is malformed.
pub fn parse_chain(expr: &str) -> Result<Vec<Link>, PlaceholderError> {
    let links = expr
        .split(LINK_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_link)
        .collect::<Result<Vec<_>, _>>()?;

    if links.is_empty() {
        return Err(PlaceholderError::malformed(format!(
            "empty placeholder expression '{}{}{}'",
            START, expr, END
        )));
    }
    Ok(links)
}

fn parse_link(text: &str) -> Result<Link, PlaceholderError> {
    let (body, mandatory) = match text.strip_suffix(MANDATORY_MARKER) {
        Some(body) => (body.trim_end(), true),
        None => (text, false),
    };

    if let Some(rest) = strip_namespace_prefix(body, DATA_PREFIX) {
        let (segment, path) = rest.split_once('.').unwrap_or((rest, ""));
        let namespace =
            Namespace::from_data_segment(segment).ok_or_else(|| PlaceholderError::UnknownNamespace {
                link: text.to_string(),
            })?;
        if path.is_empty() {
            return Err(PlaceholderError::malformed(format!(
                "link '{}' names no key",
                text
            )));
        }
        return Ok(Link::Data {
            namespace,
            path: path.to_string(),
            mandatory,
        });
    }

    if let Some(key) = strip_namespace_prefix(body, STATE_PREFIX) {
        if key.is_empty() {
            return Err(PlaceholderError::malformed(format!(
                "link '{}' names no key",
                text
            )));
        }
        return Ok(Link::State {
            key: key.to_string(),
            mandatory,
        });
    }

    // Defaults keep a trailing marker as text.
    Ok(Link::Literal(text.to_string()))
}

fn strip_namespace_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.strip_prefix(prefix)?.strip_prefix('.')
}
