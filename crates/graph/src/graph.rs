use crate::error::{GraphError, Result};
use crate::types::{RelationType, SymbolEdge};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};

/// Edge weight: the symbol that links two chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    pub relation_type: RelationType,
    pub symbol_name: String,
}

/// Chunk-level graph over [`SymbolEdge`]s.
///
/// Nodes are chunk ids; an edge `a -> b` means chunk `a` uses a symbol that
/// chunk `b` defines. Parallel edges exist when two chunks share several
/// symbols.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    graph: DiGraph<String, EdgeData>,
    index: HashMap<String, NodeIndex>,
}

impl SymbolGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph containing every chunk id mentioned by `edges`
    #[must_use]
    pub fn from_edges(edges: &[SymbolEdge]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge);
        }
        log::debug!(
            "Built symbol graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    /// Add a chunk id, returning its node
    pub fn add_chunk(&mut self, chunk_id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(chunk_id) {
            return idx;
        }
        let idx = self.graph.add_node(chunk_id.to_string());
        self.index.insert(chunk_id.to_string(), idx);
        idx
    }

    pub fn add_edge(&mut self, edge: &SymbolEdge) {
        let from = self.add_chunk(&edge.from_chunk_id);
        let to = self.add_chunk(&edge.to_chunk_id);
        self.graph.add_edge(
            from,
            to,
            EdgeData {
                relation_type: edge.relation_type,
                symbol_name: edge.symbol_name.clone(),
            },
        );
    }

    #[must_use]
    pub fn contains(&self, chunk_id: &str) -> bool {
        self.index.contains_key(chunk_id)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Chunks that `chunk_id` depends on (outgoing edges), sorted
    pub fn callees(&self, chunk_id: &str) -> Result<Vec<&str>> {
        self.neighbors(chunk_id, Direction::Outgoing)
    }

    /// Chunks that depend on `chunk_id` (incoming edges), sorted
    pub fn callers(&self, chunk_id: &str) -> Result<Vec<&str>> {
        self.neighbors(chunk_id, Direction::Incoming)
    }

    /// Symbols through which `from` reaches `to`
    pub fn linking_symbols(&self, from: &str, to: &str) -> Result<Vec<&str>> {
        let from_idx = self.node(from)?;
        let to_idx = self.node(to)?;
        let mut symbols: Vec<&str> = self
            .graph
            .edges_connecting(from_idx, to_idx)
            .map(|e| e.weight().symbol_name.as_str())
            .collect();
        symbols.sort_unstable();
        Ok(symbols)
    }

    /// Chunks within `max_depth` hops of `chunk_id` in either direction.
    ///
    /// Returns `(chunk_id, distance)` pairs sorted by distance then id; the
    /// start chunk itself is excluded.
    pub fn neighborhood(&self, chunk_id: &str, max_depth: usize) -> Result<Vec<(&str, usize)>> {
        let start = self.node(chunk_id)?;
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);
        let mut result = Vec::new();

        while let Some((current, depth)) = queue.pop_front() {
            if current != start {
                result.push((self.graph[current].as_str(), depth));
            }
            if depth == max_depth {
                continue;
            }
            for next in self.graph.neighbors_undirected(current) {
                if visited.insert(next) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        result.sort_unstable_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        Ok(result)
    }

    fn node(&self, chunk_id: &str) -> Result<NodeIndex> {
        self.index
            .get(chunk_id)
            .copied()
            .ok_or_else(|| GraphError::node_not_found(chunk_id))
    }

    fn neighbors(&self, chunk_id: &str, direction: Direction) -> Result<Vec<&str>> {
        let idx = self.node(chunk_id)?;
        let mut ids: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> SymbolGraph {
        // main -> service -> repo -> db, util -> repo
        SymbolGraph::from_edges(&[
            SymbolEdge::calls("main", "service", "UserService"),
            SymbolEdge::calls("service", "repo", "find_user"),
            SymbolEdge::calls("service", "repo", "save_user"),
            SymbolEdge::calls("repo", "db", "connect"),
            SymbolEdge::calls("util", "repo", "find_user"),
        ])
    }

    #[test]
    fn test_counts() {
        let graph = sample();
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.contains("db"));
        assert!(!graph.contains("missing"));
    }

    #[test]
    fn test_callers_and_callees() {
        let graph = sample();
        assert_eq!(graph.callees("service").unwrap(), vec!["repo"]);
        assert_eq!(graph.callers("repo").unwrap(), vec!["service", "util"]);
        assert!(graph.callers("main").unwrap().is_empty());
        assert_eq!(
            graph.linking_symbols("service", "repo").unwrap(),
            vec!["find_user", "save_user"]
        );
    }

    #[test]
    fn test_neighborhood_walks_both_directions() {
        let graph = sample();
        assert_eq!(
            graph.neighborhood("repo", 1).unwrap(),
            vec![("db", 1), ("service", 1), ("util", 1)]
        );
        assert_eq!(
            graph.neighborhood("repo", 2).unwrap(),
            vec![("db", 1), ("service", 1), ("util", 1), ("main", 2)]
        );
        assert!(graph.neighborhood("repo", 0).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_chunk() {
        let graph = sample();
        assert_eq!(
            graph.callees("nope").unwrap_err(),
            GraphError::NodeNotFound("nope".into())
        );
        assert!(graph.neighborhood("nope", 3).is_err());
    }
}
