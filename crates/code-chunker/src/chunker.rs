use crate::ast_chunker::chunk_by_ast;
use crate::config::ChunkerConfig;
use crate::error::Result;
use crate::heuristic;
use crate::parser::ParsedFile;
use crate::types::ChunkResult;
use tree_sitter::Tree;

/// Main chunker interface: picks the syntax-tree splitter when a tree is
/// available and the heuristic splitter otherwise.
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker with a validated configuration
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Chunk `content`, preferring the syntax tree when one is given
    #[must_use]
    pub fn chunk(&self, content: &str, language_id: &str, tree: Option<&Tree>) -> Vec<ChunkResult> {
        match tree {
            Some(tree) => chunk_by_ast(tree, content, &self.config),
            None => {
                log::debug!("No syntax tree for {language_id}, using heuristic boundaries");
                heuristic::chunk(content, language_id, &self.config)
            }
        }
    }

    /// Chunk the output of [`crate::SourceParser::parse_file`]
    #[must_use]
    pub fn chunk_parsed(
        &self,
        content: &str,
        language_id: &str,
        parsed: Option<&ParsedFile>,
    ) -> Vec<ChunkResult> {
        self.chunk(content, language_id, parsed.map(|p| &p.tree))
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Get statistics about chunking
    #[must_use]
    pub fn get_stats(chunks: &[ChunkResult]) -> ChunkingStats {
        let sizes = || chunks.iter().map(|c| c.content.len());
        let total_bytes: usize = sizes().sum();
        ChunkingStats {
            total_chunks: chunks.len(),
            total_lines: chunks.iter().map(|c| c.line_count() as usize).sum(),
            total_bytes,
            avg_bytes_per_chunk: if chunks.is_empty() {
                0
            } else {
                total_bytes / chunks.len()
            },
            min_bytes: sizes().min().unwrap_or(0),
            max_bytes: sizes().max().unwrap_or(0),
        }
    }
}

/// Statistics about chunking results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_lines: usize,
    pub total_bytes: usize,
    pub avg_bytes_per_chunk: usize,
    pub min_bytes: usize,
    pub max_bytes: usize,
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Lines: {} | Bytes: {} | Avg: {} | Range: {}-{}",
            self.total_chunks,
            self.total_lines,
            self.total_bytes,
            self.avg_bytes_per_chunk,
            self.min_bytes,
            self.max_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceParser;
    use pretty_assertions::assert_eq;

    const RUST_CODE: &str = r#"
use std::collections::HashMap;

/// Main function
fn main() {
    println!("Hello, world!");
}

struct Point {
    x: i32,
    y: i32,
}

impl Point {
    fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
"#;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ChunkerConfig {
            chunk_size: 100,
            overlap: 100,
            max_chunk_size: None,
        };
        assert!(Chunker::new(config).is_err());
    }

    #[test]
    fn test_tree_and_heuristic_paths_cover_same_lines() {
        let chunker = Chunker::new(ChunkerConfig::with_chunk_size(80)).unwrap();
        let mut parser = SourceParser::new();
        let parsed = parser.parse_file(RUST_CODE, "rust");
        assert!(parsed.is_some());

        let with_tree = chunker.chunk_parsed(RUST_CODE, "rust", parsed.as_ref());
        let without_tree = chunker.chunk(RUST_CODE, "rust", None);

        for chunks in [&with_tree, &without_tree] {
            assert!(chunks.len() >= 3);
            assert_eq!(chunks.first().unwrap().start_line, 1);
            assert_eq!(chunks.last().unwrap().end_line, 17);
        }
    }

    #[test]
    fn test_chunking_stats() {
        let chunker = Chunker::default();
        let chunks = chunker.chunk(RUST_CODE, "rust", None);
        let stats = Chunker::get_stats(&chunks);

        assert_eq!(stats.total_chunks, chunks.len());
        assert!(stats.total_bytes > 0);
        assert!(stats.min_bytes <= stats.avg_bytes_per_chunk);
        assert!(stats.avg_bytes_per_chunk <= stats.max_bytes);
        assert!(stats.to_string().starts_with(&format!("Chunks: {}", chunks.len())));

        assert_eq!(Chunker::get_stats(&[]), ChunkingStats::default());
    }
}
