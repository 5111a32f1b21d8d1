//! Error types for TruthGuard

/// Result type alias using TruthGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for TruthGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input text could not be decoded or tokenized
    #[error("tokenization error: {0}")]
    Tokenization(String),

    /// Model or tokenizer artifact could not be loaded (startup only)
    #[error("model load error: {0}")]
    ModelLoad(String),

    /// Forward pass failed for a single request
    #[error("inference error: {0}")]
    Inference(String),

    /// No usable text was supplied
    #[error("{0}")]
    InvalidInput(String),

    /// Fetching text from a URL failed
    #[error("scrape error: {0}")]
    UpstreamFetch(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new tokenization error
    pub fn tokenization(msg: impl Into<String>) -> Self {
        Self::Tokenization(msg.into())
    }

    /// Create a new model load error
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new upstream fetch error
    pub fn upstream_fetch(msg: impl Into<String>) -> Self {
        Self::UpstreamFetch(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller, not the service, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Tokenization(_))
    }

    /// Short stable name used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tokenization(_) => "tokenization",
            Self::ModelLoad(_) => "model_load",
            Self::Inference(_) => "inference",
            Self::InvalidInput(_) => "invalid_input",
            Self::UpstreamFetch(_) => "upstream_fetch",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(Error::invalid_input("No input text provided").is_client_error());
        assert!(Error::tokenization("bad utf-8").is_client_error());
        assert!(!Error::inference("shape mismatch").is_client_error());
        assert!(!Error::upstream_fetch("timeout").is_client_error());
    }

    #[test]
    fn test_display_includes_cause() {
        let err = Error::upstream_fetch("operation timed out");
        assert_eq!(err.to_string(), "scrape error: operation timed out");

        let err = Error::invalid_input("No input text provided");
        assert_eq!(err.to_string(), "No input text provided");
    }
}
