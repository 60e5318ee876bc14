use codeweave_symbols::SymbolExtractionResult;
use serde::{Deserialize, Serialize};

/// Type of relationship between chunks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    /// A references a symbol B defines
    #[default]
    Calls,
}

impl RelationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calls => "calls",
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed edge from the chunk using a symbol to the chunk defining it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolEdge {
    pub from_chunk_id: String,
    pub to_chunk_id: String,
    pub relation_type: RelationType,
    pub symbol_name: String,
}

impl SymbolEdge {
    pub fn calls(
        from_chunk_id: impl Into<String>,
        to_chunk_id: impl Into<String>,
        symbol_name: impl Into<String>,
    ) -> Self {
        Self {
            from_chunk_id: from_chunk_id.into(),
            to_chunk_id: to_chunk_id.into(),
            relation_type: RelationType::Calls,
            symbol_name: symbol_name.into(),
        }
    }
}

/// Builder input: the symbols of one chunk under its durable id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSymbols {
    pub chunk_id: String,
    pub defines_symbols: Vec<String>,
    pub uses_symbols: Vec<String>,
}

impl ChunkSymbols {
    pub fn new<D, U>(chunk_id: impl Into<String>, defines: D, uses: U) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        Self {
            chunk_id: chunk_id.into(),
            defines_symbols: defines.into_iter().map(Into::into).collect(),
            uses_symbols: uses.into_iter().map(Into::into).collect(),
        }
    }

    /// Pair an extraction result with the id the orchestrator assigned
    pub fn from_extraction(chunk_id: impl Into<String>, result: &SymbolExtractionResult) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            defines_symbols: result.defines_symbols.clone(),
            uses_symbols: result.uses_symbols.clone(),
        }
    }
}
