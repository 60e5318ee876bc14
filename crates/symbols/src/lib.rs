//! # Codeweave Symbols
//!
//! Per-chunk symbol extraction: which names each chunk defines and which it
//! references.
//!
//! ## Architecture
//!
//! ```text
//! ChunkResult[] + Option<ParsedFile>
//!     │
//!     ├──> tree available?
//!     │    ├─> yes: definition / usage queries over the whole tree
//!     │    │        ├─> bucket captures by start row → chunk
//!     │    │        ├─> drop noise names
//!     │    │        └─> resolve kinds from ancestor node types
//!     │    └─> no:  regex scan of each chunk's leading lines
//!     │             (one definition at most, no usages)
//!     │
//!     └──> SymbolExtractionResult[] (one per chunk, self-references removed)
//! ```
//!
//! The heuristic path is a much weaker approximation than the query path;
//! graphs built from it link far fewer chunks.
//!
//! ## Example
//!
//! ```rust
//! use codeweave_chunker::{ChunkerConfig, SourceParser};
//! use codeweave_symbols::{analyze_file, QueryCache};
//!
//! let code = "def helper():\n    return 1\n\n\ndef run():\n    return helper()\n";
//!
//! let mut parser = SourceParser::new();
//! let mut cache = QueryCache::new();
//! let parsed = parser.parse_file(code, "python");
//!
//! let analysis = analyze_file(code, "python", parsed.as_ref(), &ChunkerConfig::default(), &mut cache);
//! for (chunk, symbols) in analysis.iter() {
//!     println!("{}-{}: defines {:?}", chunk.start_line, chunk.end_line, symbols.defines_symbols);
//! }
//! ```

mod error;
mod extractor;
pub mod heuristic;
mod kinds;
mod noise;
mod pipeline;
mod queries;
mod types;

pub use error::{Result, SymbolError};
pub use extractor::{extract_symbols_for_chunks, extract_symbols_with_queries};
pub use heuristic::{extract_symbol, extract_symbols_heuristic};
pub use kinds::{kind_table, resolve_kind, KIND_SEARCH_DEPTH};
pub use noise::is_noise;
pub use pipeline::{analyze_file, AnalysisPath, FileAnalysis};
pub use queries::{query_source, LanguageQueries, QueryCache, QuerySource};
pub use types::{DefinedSymbol, HeuristicSymbol, SymbolExtractionResult};
