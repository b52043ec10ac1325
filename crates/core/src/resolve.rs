//! Placeholder resolution and substitution.
//!
//! Each placeholder's chain is tried left to right and the first link with a
//! non-empty value wins. A recognized `STATE.*` link wins as a binding rather
//! than a value; such placeholders stay in the text until render time.
//!
//! Every namespace a template names is checked against the source's scope
//! before anything is resolved, so an illegal link is an error whether or
//! not an earlier link would have won.

use tracing::debug;

use crate::binding::{BoundText, DataBinding, StateKey, StateValues};
use crate::error::PlaceholderError;
use crate::lexer::{lex, parse_chain, Link, END, START};
use crate::namespace::Namespace;
use crate::source::DataSource;

/// What a chain resolved to.
enum Resolved {
    Value(String),
    State(StateKey),
}

/// Fail if any link in `links` names a namespace outside the source's scope.
pub fn check_scope(links: &[Link], source: &DataSource<'_>) -> Result<(), PlaceholderError> {
    for link in links {
        match link {
            Link::Data { namespace, .. } => source.check(*namespace)?,
            Link::State { .. } => source.check(Namespace::State)?,
            Link::Literal(_) => {}
        }
    }
    Ok(())
}

/// Walk a chain whose scope has already been checked.
fn resolve_chain(
    links: &[Link],
    source: &DataSource<'_>,
) -> Result<Option<Resolved>, PlaceholderError> {
    for link in links {
        match link {
            Link::Literal(text) => {
                if !text.is_empty() {
                    return Ok(Some(Resolved::Value(text.clone())));
                }
            }
            Link::Data {
                namespace,
                path,
                mandatory,
            } => {
                if let Some(value) = source.lookup(*namespace, path) {
                    return Ok(Some(Resolved::Value(value)));
                }
                if *mandatory {
                    return Err(PlaceholderError::MandatoryKeyEmpty {
                        key: format!("{}.{}", namespace, path),
                    });
                }
            }
            Link::State { key, mandatory } => {
                if let Some(state) = StateKey::parse(key) {
                    return Ok(Some(Resolved::State(state)));
                }
                if *mandatory {
                    return Err(PlaceholderError::MandatoryKeyEmpty {
                        key: format!("{}.{}", Namespace::State, key),
                    });
                }
            }
        }
    }
    Ok(None)
}

/// Resolve one fallback chain.
///
/// Returns `Ok(None)` when no link produced anything. A mandatory link that
/// comes up empty fails the chain; links after it are never consulted.
pub fn resolve_links(
    links: &[Link],
    source: &DataSource<'_>,
) -> Result<Option<DataBinding<String>>, PlaceholderError> {
    check_scope(links, source)?;
    Ok(resolve_chain(links, source)?.map(|resolved| match resolved {
        Resolved::Value(value) => DataBinding::Value(value),
        Resolved::State(key) => DataBinding::State(key.name().to_string()),
    }))
}

/// Resolve a single placeholder expression.
///
/// Accepts either the bare chain (`DATA.creativeCopy.title|Default`) or a
/// complete token with its markers. An expression that resolves to nothing
/// yields an empty `Value`.
pub fn resolve(
    expression: &str,
    source: &DataSource<'_>,
) -> Result<DataBinding<String>, PlaceholderError> {
    let trimmed = expression.trim();
    let chain = trimmed
        .strip_prefix(START)
        .and_then(|s| s.strip_suffix(END))
        .unwrap_or(trimmed);
    let links = parse_chain(chain)?;
    Ok(resolve_links(&links, source)?.unwrap_or_else(|| DataBinding::Value(String::new())))
}

/// Splice resolved values into `template` in one pass over the lexer's
/// spans. State placeholders become their own segments. All errors
/// propagate.
fn substitute(template: &str, source: &DataSource<'_>) -> Result<BoundText, PlaceholderError> {
    let placeholders = lex(template)?;
    for placeholder in &placeholders {
        check_scope(&placeholder.links, source)?;
    }

    let mut bound = BoundText::new();
    let mut pos = 0;
    for placeholder in &placeholders {
        bound.push_text(&template[pos..placeholder.span.start]);
        match resolve_chain(&placeholder.links, source)? {
            Some(Resolved::Value(value)) => bound.push_text(&value),
            Some(Resolved::State(key)) => bound.push_state(placeholder.raw.as_str(), key),
            None => {}
        }
        pos = placeholder.span.end;
    }
    bound.push_text(&template[pos..]);
    Ok(bound)
}

/// Like [`substitute`], but mandatory misses and malformed templates give
/// empty text instead of an error.
fn substitute_or_empty(
    template: &str,
    source: &DataSource<'_>,
) -> Result<BoundText, PlaceholderError> {
    match substitute(template, source) {
        Ok(bound) => Ok(bound),
        Err(e) if e.collapses_to_empty() => {
            debug!(error = %e, template, "placeholder expansion collapsed to empty");
            Ok(BoundText::new())
        }
        Err(e) => Err(e),
    }
}

/// Expand every placeholder in `template` against `source`.
///
/// A mandatory link that comes up empty, or a template that cannot be
/// tokenized, collapses the whole string to `""`. Referencing a namespace
/// the source does not allow is returned as an error. State placeholders are
/// left in their source form; use [`bind`] or [`expand_with_state`] to
/// render them.
pub fn expand(template: &str, source: &DataSource<'_>) -> Result<String, PlaceholderError> {
    substitute_or_empty(template, source).map(|bound| bound.text())
}

/// [`expand`], then render state placeholders from `values`.
pub fn expand_with_state(
    template: &str,
    source: &DataSource<'_>,
    values: &StateValues,
) -> Result<String, PlaceholderError> {
    substitute_or_empty(template, source).map(|bound| bound.render(values))
}

/// Map a whole templated string to a binding.
///
/// `State` when at least one placeholder resolved to live state, otherwise
/// `Value`. Either way the [`BoundText`] holds data values already spliced
/// in; call [`BoundText::render`] on every state change. Unlike [`expand`],
/// every error propagates so the caller can decide what to do with the node.
pub fn bind(
    template: &str,
    source: &DataSource<'_>,
) -> Result<DataBinding<BoundText>, PlaceholderError> {
    let bound = substitute(template, source)?;
    Ok(if bound.has_state() {
        DataBinding::State(bound)
    } else {
        DataBinding::Value(bound)
    })
}
