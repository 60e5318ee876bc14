//! # Codeweave Chunker
//!
//! Cuts raw source text into bounded, line-aligned chunks for embedding and
//! retrieval.
//!
//! ## Architecture
//!
//! ```text
//! (content, language id)
//!     │
//!     ├──> SourceParser::parse_file → Option<ParsedFile>
//!     │
//!     ├──> tree available?
//!     │    ├─> yes: chunk_by_ast
//!     │    │        ├─> pack top-level nodes up to chunk_size
//!     │    │        └─> split oversized nodes along children (depth ≤ 3)
//!     │    └─> no:  heuristic::chunk
//!     │             ├─> keyword / brace / indent boundary rules
//!     │             └─> line windows for unknown languages
//!     │
//!     └──> ChunkSink: trim blank edges, bound every chunk by max_chunk_size,
//!          hash content → ChunkResult[]
//! ```
//!
//! ## Example
//!
//! ```rust
//! use codeweave_chunker::{Chunker, ChunkerConfig, SourceParser};
//!
//! let code = "fn process(input: &str) -> String {\n    input.trim().to_uppercase()\n}\n";
//!
//! let chunker = Chunker::new(ChunkerConfig::default()).unwrap();
//! let mut parser = SourceParser::new();
//! let parsed = parser.parse_file(code, "rust");
//!
//! for chunk in chunker.chunk_parsed(code, "rust", parsed.as_ref()) {
//!     println!("lines {}-{} [{}]", chunk.start_line, chunk.end_line, chunk.hash);
//! }
//! ```

mod ast_chunker;
mod chunker;
mod config;
mod error;
mod hash;
pub mod heuristic;
mod language;
mod lines;
mod parser;
mod rules;
mod strip;
mod types;

pub use ast_chunker::{chunk_by_ast, MAX_RECURSIVE_DEPTH};
pub use chunker::{Chunker, ChunkingStats};
pub use config::{ChunkerConfig, MIN_CHUNK_SIZE};
pub use error::{ChunkerError, Result};
pub use hash::{content_hash, HASH_LEN};
pub use heuristic::{chunk, has_boundary_rules};
pub use language::{canonical_language_id, Language};
pub use parser::{ParsedFile, SourceParser};
pub use types::{ChunkKind, ChunkResult, LineSpan};
