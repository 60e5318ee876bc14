//! # Codeweave Graph
//!
//! Links chunks through the symbols they define and use.
//!
//! ## Architecture
//!
//! ```text
//! ChunkSymbols[] (chunk id + defines/uses, from codeweave-symbols)
//!     │
//!     ├──> build_symbol_edges
//!     │      ├─ Index symbol → defining chunks
//!     │      ├─ Emit user → definer `calls` edges
//!     │      └─ Skip self-edges, dedup (from, to, symbol)
//!     │
//!     └──> SymbolGraph (petgraph)
//!            ├─ Nodes: chunk ids
//!            ├─ Edges: symbols linking them
//!            └─ callers / callees / neighborhood queries
//! ```

mod builder;
mod error;
mod graph;
mod types;

pub use builder::build_symbol_edges;
pub use error::{GraphError, Result};
pub use graph::{EdgeData, SymbolGraph};
pub use types::{ChunkSymbols, RelationType, SymbolEdge};
