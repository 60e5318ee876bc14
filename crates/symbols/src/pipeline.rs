use crate::extractor::extract_symbols_with_queries;
use crate::heuristic::extract_symbols_heuristic;
use crate::queries::QueryCache;
use crate::types::SymbolExtractionResult;
use codeweave_chunker::{chunk_by_ast, heuristic, ChunkResult, ChunkerConfig, ParsedFile};
use serde::{Deserialize, Serialize};

/// Which pair of chunker and extractor produced a [`FileAnalysis`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPath {
    Tree,
    Heuristic,
}

/// Chunks of one file with their symbols, index-aligned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub chunks: Vec<ChunkResult>,
    pub symbols: Vec<SymbolExtractionResult>,
    pub path: AnalysisPath,
}

impl FileAnalysis {
    /// Chunks zipped with their symbols
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkResult, &SymbolExtractionResult)> {
        self.chunks.iter().zip(&self.symbols)
    }
}

/// Chunk a file and extract its symbols.
///
/// With a parsed tree the syntax-tree chunker and the query extractor run;
/// without one the heuristic chunker and heuristic extractor do. A tree for a
/// language whose queries are unavailable yields empty symbol results.
pub fn analyze_file(
    content: &str,
    language_id: &str,
    parsed: Option<&ParsedFile>,
    config: &ChunkerConfig,
    cache: &mut QueryCache,
) -> FileAnalysis {
    match parsed {
        Some(parsed) => {
            let chunks = chunk_by_ast(&parsed.tree, content, config);
            let symbols = match cache.get(parsed.language) {
                Some(queries) => extract_symbols_with_queries(queries, &parsed.tree, content, &chunks),
                None => SymbolExtractionResult::empty_for(chunks.len()),
            };
            FileAnalysis {
                chunks,
                symbols,
                path: AnalysisPath::Tree,
            }
        }
        None => {
            log::debug!("No syntax tree for {language_id}, using heuristic analysis");
            let chunks = heuristic::chunk(content, language_id, config);
            let symbols = extract_symbols_heuristic(&chunks, language_id);
            FileAnalysis {
                chunks,
                symbols,
                path: AnalysisPath::Heuristic,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeweave_chunker::SourceParser;
    use pretty_assertions::assert_eq;

    const PY: &str = "def greet(name):\n    return name\n\n\ndef main():\n    greet('x')\n";

    #[test]
    fn test_tree_path() {
        let mut parser = SourceParser::new();
        let parsed = parser.parse_file(PY, "python").unwrap();
        let mut cache = QueryCache::new();
        let config = ChunkerConfig::with_chunk_size(40);

        let analysis = analyze_file(PY, "python", Some(&parsed), &config, &mut cache);
        assert_eq!(analysis.path, AnalysisPath::Tree);
        assert_eq!(analysis.chunks.len(), analysis.symbols.len());

        let greet = analysis
            .iter()
            .find(|(_, s)| s.defines_symbols.contains(&"greet".to_string()));
        assert!(greet.is_some());
        assert!(analysis
            .symbols
            .iter()
            .any(|s| s.uses_symbols.contains(&"greet".to_string())));
    }

    #[test]
    fn test_heuristic_path_without_tree() {
        let mut cache = QueryCache::new();
        let analysis = analyze_file(PY, "python", None, &ChunkerConfig::default(), &mut cache);
        assert_eq!(analysis.path, AnalysisPath::Heuristic);
        assert_eq!(analysis.chunks.len(), analysis.symbols.len());
        assert!(cache.is_empty());
        assert!(analysis.symbols.iter().all(|s| s.uses_symbols.is_empty()));
    }

    #[test]
    fn test_empty_content() {
        let mut cache = QueryCache::new();
        let analysis = analyze_file("  \n", "rust", None, &ChunkerConfig::default(), &mut cache);
        assert!(analysis.chunks.is_empty());
        assert!(analysis.symbols.is_empty());
    }
}
