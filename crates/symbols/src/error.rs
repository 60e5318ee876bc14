use thiserror::Error;

pub type Result<T> = std::result::Result<T, SymbolError>;

/// Errors raised while preparing symbol queries.
///
/// Extraction entry points never return these; they log and degrade to empty
/// results instead.
#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("No symbol queries for language: {0}")]
    UnsupportedLanguage(String),

    #[error("Query compile error ({language}): {message}")]
    QueryCompile { language: String, message: String },

    #[error("Query has no @name capture ({0})")]
    MissingCapture(String),
}

impl SymbolError {
    pub fn unsupported_language(language: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(language.into())
    }

    pub fn query_compile(language: impl Into<String>, err: &tree_sitter::QueryError) -> Self {
        Self::QueryCompile {
            language: language.into(),
            message: format!("{err} at row {} column {}", err.row, err.column),
        }
    }
}
