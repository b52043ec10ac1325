/// Errors raised while tokenizing or resolving placeholder expressions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceholderError {
    /// A link marked mandatory resolved to nothing. Aborts the whole
    /// containing string, not just the placeholder it appears in.
    #[error("mandatory placeholder key resolved empty: {key}")]
    MandatoryKeyEmpty { key: String },

    /// The namespace exists but is not legal for the current data source.
    #[error("namespace {namespace} is not available in this context")]
    IllegalNamespace { namespace: String },

    /// `DATA.<name>` where `<name>` is not a known namespace.
    #[error("unknown placeholder namespace in '{link}'")]
    UnknownNamespace { link: String },

    /// The template could not be tokenized into placeholder expressions.
    #[error("malformed placeholder: {message}")]
    Malformed { message: String },
}

impl PlaceholderError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        PlaceholderError::Malformed {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the group that collapses a string to
    /// empty during expansion instead of surfacing to the caller.
    pub fn collapses_to_empty(&self) -> bool {
        !matches!(self, PlaceholderError::IllegalNamespace { .. })
    }
}
