use crate::hash::content_hash;
use serde::{Deserialize, Serialize};

/// A bounded segment of one source file.
///
/// Lines are 0-indexed and inclusive. `content` is the text of those lines
/// joined with `\n`, except for fragments of a hard-split over-long line,
/// which all report that line's range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ChunkResult {
    /// The chunk text
    pub content: String,

    /// First line (0-indexed)
    pub start_line: u32,

    /// Last line (0-indexed, inclusive)
    pub end_line: u32,

    /// First 16 hex chars of the SHA-256 of `content`
    pub hash: String,
}

impl ChunkResult {
    /// Create a chunk, deriving its hash from the content
    #[must_use]
    pub fn new(content: String, start_line: u32, end_line: u32) -> Self {
        let hash = content_hash(&content);
        Self {
            content,
            start_line,
            end_line,
            hash,
        }
    }

    /// Get the number of lines in this chunk
    #[must_use]
    pub const fn line_count(&self) -> u32 {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Check if chunk contains a specific line
    #[must_use]
    pub const fn contains_line(&self, line: u32) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// Anything that covers an inclusive range of source lines.
pub trait LineSpan {
    fn start_line(&self) -> u32;
    fn end_line(&self) -> u32;
}

impl LineSpan for ChunkResult {
    fn start_line(&self) -> u32 {
        self.start_line
    }

    fn end_line(&self) -> u32 {
        self.end_line
    }
}

impl LineSpan for (u32, u32) {
    fn start_line(&self) -> u32 {
        self.0
    }

    fn end_line(&self) -> u32 {
        self.1
    }
}

/// Semantic category of a definition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Standalone function
    Function,
    /// Class definition
    Class,
    /// Function bound to a type
    Method,
    /// Interface/Trait/Protocol definition
    Interface,
    /// Type alias or struct-like type
    Type,
    /// Enum definition
    Enum,
    /// Constant
    Constant,
    /// Variable declaration
    Variable,
    /// Module/namespace
    Module,
    /// HTTP route handler
    Route,
    /// Infrastructure resource (terraform and friends)
    Resource,
    /// Generic block
    Block,
    #[default]
    Unknown,
}

impl ChunkKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Method => "method",
            Self::Interface => "interface",
            Self::Type => "type",
            Self::Enum => "enum",
            Self::Constant => "constant",
            Self::Variable => "variable",
            Self::Module => "module",
            Self::Route => "route",
            Self::Resource => "resource",
            Self::Block => "block",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chunk_line_count() {
        let chunk = ChunkResult::new("fn a() {}\nfn b() {}".to_string(), 10, 11);
        assert_eq!(chunk.line_count(), 2);
        assert!(chunk.contains_line(10));
        assert!(chunk.contains_line(11));
        assert!(!chunk.contains_line(12));
    }

    #[test]
    fn test_chunk_hash_depends_only_on_content() {
        let a = ChunkResult::new("let x = 1;".to_string(), 0, 0);
        let b = ChunkResult::new("let x = 1;".to_string(), 40, 40);
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.hash.len(), 16);
    }

    #[test]
    fn test_chunk_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ChunkKind::Interface).unwrap();
        assert_eq!(json, "\"interface\"");

        let kind: ChunkKind = serde_json::from_str("\"resource\"").unwrap();
        assert_eq!(kind, ChunkKind::Resource);
        assert_eq!(ChunkKind::default(), ChunkKind::Unknown);
    }

    #[test]
    fn test_line_span_for_tuple() {
        let span = (3u32, 7u32);
        assert_eq!(span.start_line(), 3);
        assert_eq!(span.end_line(), 7);
    }
}
