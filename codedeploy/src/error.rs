use thiserror::Error;

/// Every way a single query invocation can fail. All of them are terminal for
/// the invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum FactsError {
    /// Missing required parameter, or a linked pair supplied by half.
    #[error("{0}")]
    Validation(String),

    #[error("unknown query kind: {0:?}")]
    UnknownQueryKind(String),

    /// The remote client raised. `message` is the client's own message.
    #[error("{operation} failed: {message}")]
    RemoteCall { operation: &'static str, message: String },

    #[error("Can't authorize connection - {0}")]
    ClientUnavailable(String),

    #[error("invalid module arguments: {0}")]
    Config(String),
}

impl FactsError {
    pub fn validation(msg: impl Into<String>) -> Self {
        FactsError::Validation(msg.into())
    }
}
