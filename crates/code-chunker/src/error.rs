use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur while configuring the chunker or parsing sources.
///
/// Chunking itself never fails on data: malformed or pathological input
/// degrades to smaller or fewer chunks instead of producing one of these.
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No grammar registered for the language id
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Failed to parse the source code
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Tree-sitter rejected a grammar
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    /// Configuration text could not be deserialized
    #[error("Config format error: {0}")]
    ConfigFormat(#[from] toml::de::Error),
}

impl ChunkerError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChunkerError::invalid_config("chunk_size must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: chunk_size must be > 0"
        );

        let err = ChunkerError::unsupported_language("cobol");
        assert_eq!(err.to_string(), "Unsupported language: cobol");
    }
}
