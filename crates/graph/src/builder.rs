use crate::types::{ChunkSymbols, SymbolEdge};
use std::collections::{HashMap, HashSet};

/// Build cross-chunk `calls` edges from per-chunk symbols.
///
/// Every chunk using a name gets one edge to each chunk defining it.
/// Self-edges are skipped and `(from, to, symbol)` triples are unique. Names
/// defined in several chunks fan out to all of them, which over-links common
/// names across a large project.
///
/// Output order follows the input: users in order, then their uses, then
/// definers in first-definition order.
#[must_use]
pub fn build_symbol_edges(chunks: &[ChunkSymbols]) -> Vec<SymbolEdge> {
    // Phase 1: symbol -> defining chunk ids, in first-definition order
    let mut definers: HashMap<&str, Vec<&str>> = HashMap::new();
    for chunk in chunks {
        for symbol in &chunk.defines_symbols {
            let ids = definers.entry(symbol.as_str()).or_default();
            if !ids.contains(&chunk.chunk_id.as_str()) {
                ids.push(chunk.chunk_id.as_str());
            }
        }
    }

    // Phase 2: one edge per (user, definer, symbol)
    let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();
    let mut edges = Vec::new();
    for chunk in chunks {
        let from = chunk.chunk_id.as_str();
        for symbol in &chunk.uses_symbols {
            let Some(targets) = definers.get(symbol.as_str()) else {
                continue;
            };
            for &to in targets {
                if to != from && seen.insert((from, to, symbol.as_str())) {
                    edges.push(SymbolEdge::calls(from, to, symbol.as_str()));
                }
            }
        }
    }

    log::debug!(
        "Built {} symbol edges from {} chunks ({} defined symbols)",
        edges.len(),
        chunks.len(),
        definers.len()
    );

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunk(id: &str, defines: &[&str], uses: &[&str]) -> ChunkSymbols {
        ChunkSymbols::new(id, defines.iter().copied(), uses.iter().copied())
    }

    #[test]
    fn test_single_use_links_user_to_definer() {
        let edges = build_symbol_edges(&[chunk("a", &["greet"], &[]), chunk("b", &[], &["greet"])]);
        assert_eq!(edges, vec![SymbolEdge::calls("b", "a", "greet")]);
    }

    #[test]
    fn test_empty_and_disjoint_inputs() {
        assert!(build_symbol_edges(&[]).is_empty());
        let edges = build_symbol_edges(&[
            chunk("a", &["alpha"], &["gamma"]),
            chunk("b", &["beta"], &["delta"]),
        ]);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_self_edges_are_skipped() {
        // a defines and uses `parse` (e.g. overlapping ids from the orchestrator)
        let edges = build_symbol_edges(&[chunk("a", &["parse"], &["parse"])]);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_multiply_defined_names_fan_out_in_definition_order() {
        let edges = build_symbol_edges(&[
            chunk("user", &[], &["render"]),
            chunk("web", &["render"], &[]),
            chunk("cli", &["render"], &[]),
        ]);
        assert_eq!(
            edges,
            vec![
                SymbolEdge::calls("user", "web", "render"),
                SymbolEdge::calls("user", "cli", "render"),
            ]
        );
    }

    #[test]
    fn test_duplicate_inputs_are_deduplicated() {
        let edges = build_symbol_edges(&[
            chunk("a", &["load", "load"], &[]),
            chunk("b", &[], &["load", "load"]),
            chunk("b", &[], &["load"]),
        ]);
        assert_eq!(edges, vec![SymbolEdge::calls("b", "a", "load")]);
    }

    #[test]
    fn test_output_follows_user_then_use_order() {
        let edges = build_symbol_edges(&[
            chunk("defs", &["one", "two"], &[]),
            chunk("x", &[], &["two", "one"]),
            chunk("y", &[], &["one"]),
        ]);
        let triples: Vec<(&str, &str)> = edges
            .iter()
            .map(|e| (e.from_chunk_id.as_str(), e.symbol_name.as_str()))
            .collect();
        assert_eq!(triples, vec![("x", "two"), ("x", "one"), ("y", "one")]);
    }
}
