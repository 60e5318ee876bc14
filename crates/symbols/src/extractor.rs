//! Tree-query symbol extraction.
//!
//! Both queries run once over the whole tree. Each capture lands in the chunk
//! whose line range contains the capture's start row.

use crate::kinds::{kind_table, resolve_kind};
use crate::noise::is_noise;
use crate::queries::LanguageQueries;
use crate::types::{SymbolAccumulator, SymbolExtractionResult};
use codeweave_chunker::LineSpan;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor, Tree};

/// Extract per-chunk symbols, compiling the language's queries for this call.
///
/// Returns one result per chunk in input order. Unsupported languages and
/// query compile failures yield empty results.
pub fn extract_symbols_for_chunks<S: LineSpan>(
    tree: &Tree,
    source: &str,
    language: &tree_sitter::Language,
    chunks: &[S],
    language_id: &str,
) -> Vec<SymbolExtractionResult> {
    match LanguageQueries::compile_for(language, language_id) {
        Ok(queries) => extract_symbols_with_queries(&queries, tree, source, chunks),
        Err(e) => {
            log::warn!("Skipping symbol extraction for {language_id}: {e}");
            SymbolExtractionResult::empty_for(chunks.len())
        }
    }
}

/// Extract per-chunk symbols with already compiled queries
pub fn extract_symbols_with_queries<S: LineSpan>(
    queries: &LanguageQueries,
    tree: &Tree,
    source: &str,
    chunks: &[S],
) -> Vec<SymbolExtractionResult> {
    if chunks.is_empty() {
        return Vec::new();
    }

    let rows = RowTable::new(source, chunks);
    let table = kind_table(queries.language_id);
    let root = tree.root_node();
    let mut accumulators: Vec<SymbolAccumulator> =
        chunks.iter().map(|_| SymbolAccumulator::default()).collect();

    for_each_name(
        &queries.definitions,
        queries.definition_name,
        root,
        source,
        |node, name| {
            if let Some(idx) = rows.chunk_at(node.start_position().row) {
                accumulators[idx].define(name, resolve_kind(node, table));
            }
        },
    );

    for_each_name(&queries.usages, queries.usage_name, root, source, |node, name| {
        if let Some(idx) = rows.chunk_at(node.start_position().row) {
            accumulators[idx].use_symbol(name);
        }
    });

    accumulators
        .into_iter()
        .map(SymbolAccumulator::finish)
        .collect()
}

/// Run `query` and hand every non-noise `@name` capture to `visit`
fn for_each_name<'t, F>(query: &Query, name_index: u32, root: Node<'t>, source: &str, mut visit: F)
where
    F: FnMut(Node<'t>, &str),
{
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source.as_bytes());
    while let Some(m) = matches.next() {
        for capture in m.captures.iter().filter(|c| c.index == name_index) {
            let Ok(name) = capture.node.utf8_text(source.as_bytes()) else {
                continue;
            };
            if !is_noise(name) {
                visit(capture.node, name);
            }
        }
    }
}

/// Row → chunk index; the first chunk covering a row owns it
struct RowTable {
    owners: Vec<Option<usize>>,
}

impl RowTable {
    fn new<S: LineSpan>(source: &str, chunks: &[S]) -> Self {
        let line_count = source.split('\n').count();
        let mut owners = vec![None; line_count];
        for (idx, chunk) in chunks.iter().enumerate() {
            let start = chunk.start_line() as usize;
            let end = (chunk.end_line() as usize).min(line_count.saturating_sub(1));
            if start > end {
                continue;
            }
            for owner in &mut owners[start..=end] {
                owner.get_or_insert(idx);
            }
        }
        Self { owners }
    }

    fn chunk_at(&self, row: usize) -> Option<usize> {
        self.owners.get(row).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeweave_chunker::{ChunkKind, Language};
    use pretty_assertions::assert_eq;

    fn parse(src: &str, language: Language) -> Tree {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&language.tree_sitter_language()).unwrap();
        parser.parse(src, None).unwrap()
    }

    #[test]
    fn test_row_table_first_chunk_wins() {
        let src = "a\nb\nc\nd";
        let table = RowTable::new(src, &[(0u32, 2u32), (1, 3)]);
        assert_eq!(table.chunk_at(0), Some(0));
        assert_eq!(table.chunk_at(2), Some(0));
        assert_eq!(table.chunk_at(3), Some(1));
        assert_eq!(table.chunk_at(9), None);
    }

    #[test]
    fn test_row_table_ignores_gaps_and_out_of_range() {
        let src = "a\n\nc";
        let table = RowTable::new(src, &[(2u32, 7u32)]);
        assert_eq!(table.chunk_at(0), None);
        assert_eq!(table.chunk_at(1), None);
        assert_eq!(table.chunk_at(2), Some(0));
    }

    #[test]
    fn test_rust_definitions_and_usages() {
        let src = "struct Config {\n    port: u16,\n}\n\nfn load() -> Config {\n    build_default()\n}\n";
        let tree = parse(src, Language::Rust);
        let chunks = [(0u32, 2u32), (4, 6)];
        let results = extract_symbols_for_chunks(
            &tree,
            src,
            &Language::Rust.tree_sitter_language(),
            &chunks,
            "rust",
        );

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].defines_symbols, vec!["Config"]);
        assert_eq!(results[0].kind_of("Config"), Some(ChunkKind::Class));
        assert_eq!(results[1].defines_symbols, vec!["load"]);
        assert_eq!(results[1].kind_of("load"), Some(ChunkKind::Function));
        let mut uses = results[1].uses_symbols.clone();
        uses.sort();
        assert_eq!(uses, vec!["Config", "build_default"]);
        // the struct's own name is a self-reference in the first chunk
        assert!(results[0].uses_symbols.is_empty());
    }

    #[test]
    fn test_unsupported_language_degrades_to_empty() {
        let src = "x = 1\n";
        let tree = parse(src, Language::Python);
        let results = extract_symbols_for_chunks(
            &tree,
            src,
            &Language::Python.tree_sitter_language(),
            &[(0u32, 0u32)],
            "cobol",
        );
        assert_eq!(results, vec![SymbolExtractionResult::default()]);
    }

    #[test]
    fn test_empty_chunk_list() {
        let src = "def f():\n    pass\n";
        let tree = parse(src, Language::Python);
        let queries = LanguageQueries::compile(Language::Python).unwrap();
        let chunks: [(u32, u32); 0] = [];
        assert!(extract_symbols_with_queries(&queries, &tree, src, &chunks).is_empty());
    }
}
