//! placard-core: placeholder grammar engine and property-chain resolver.
//!
//! Templated strings embed `%^LINK|LINK|DEFAULT^%` expressions. Each link
//! names a namespace and a dotted path (`DATA.creativeCopy.creative.title`),
//! a live state key (`STATE.IndicatorPosition`), or a bare default. The first
//! link that produces a non-empty value wins.
//!
//! # Public API
//!
//! - [`expand()`] -- substitute every placeholder in a string
//! - [`bind()`] -- map a string to a [`DataBinding`] (value or live state)
//! - [`resolve()`] -- resolve one placeholder expression
//! - [`expand_with_state()`] -- expand, then render state placeholders
//! - [`BoundText`] -- expanded text with state placeholders kept as segments
//! - [`DataSource`] -- the records and namespaces visible to a call site
//! - [`PlaceholderError`] -- mandatory, namespace and syntax failures

pub mod binding;
pub mod error;
pub mod lexer;
pub mod namespace;
pub mod property;
pub mod resolve;
pub mod source;

// ── Convenience re-exports ───────────────────────────────────────────

pub use binding::{BoundText, DataBinding, Segment, StateKey, StateValues};
pub use error::PlaceholderError;
pub use lexer::{lex as parse_placeholders, Link, Placeholder};
pub use namespace::Namespace;
pub use property::{walk, Field, Property, PropertySource, Record};
pub use resolve::{bind, check_scope, expand, expand_with_state, resolve};
pub use source::DataSource;
