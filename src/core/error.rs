//! Error types for the remote console

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The payload is not a JSON object; no record can be built from it
    #[error("Malformed payload: {source}")]
    MalformedPayload {
        #[source]
        source: serde_json::Error,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl ConsoleError {
    /// Create a malformed payload error
    pub fn malformed(source: serde_json::Error) -> Self {
        ConsoleError::MalformedPayload { source }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        ConsoleError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        ConsoleError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, ConsoleError::MalformedPayload { .. })
    }
}
