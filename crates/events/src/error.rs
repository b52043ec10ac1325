/// All errors that can be returned by the event pipeline.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The pipeline configuration could not be read or parsed.
    #[error("invalid pipeline config: {0}")]
    Config(String),

    /// A config file could not be read.
    #[error("cannot read config file {path}: {message}")]
    Io { path: String, message: String },

    /// A batch payload could not be serialized. The batch is dropped.
    #[error("event payload serialization failed: {0}")]
    Serialize(String),

    /// The pipeline was created outside a tokio runtime.
    #[error("event pipeline needs a tokio runtime: {0}")]
    NoRuntime(String),
}
