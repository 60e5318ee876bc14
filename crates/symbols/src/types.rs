use codeweave_chunker::ChunkKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A definition found in a chunk
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefinedSymbol {
    pub name: String,
    pub kind: ChunkKind,
}

impl DefinedSymbol {
    pub fn new(name: impl Into<String>, kind: ChunkKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Symbols defined and referenced by one chunk.
///
/// `defines_symbols` always equals the names of `defined_symbols`, and no name
/// appears in both `defines_symbols` and `uses_symbols`. Lists keep the order
/// in which names were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolExtractionResult {
    pub defines_symbols: Vec<String>,
    pub uses_symbols: Vec<String>,
    pub defined_symbols: Vec<DefinedSymbol>,
}

impl SymbolExtractionResult {
    /// Result with nothing in it, one per chunk when extraction is skipped
    #[must_use]
    pub fn empty_for(count: usize) -> Vec<Self> {
        vec![Self::default(); count]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defines_symbols.is_empty() && self.uses_symbols.is_empty()
    }

    /// Kind of a name this chunk defines
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<ChunkKind> {
        self.defined_symbols
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.kind)
    }
}

/// Builds one [`SymbolExtractionResult`] with first-occurrence dedup.
#[derive(Debug, Default)]
pub(crate) struct SymbolAccumulator {
    defined: Vec<DefinedSymbol>,
    defined_names: HashSet<String>,
    uses: Vec<String>,
    used_names: HashSet<String>,
}

impl SymbolAccumulator {
    pub fn define(&mut self, name: &str, kind: ChunkKind) {
        if self.defined_names.insert(name.to_string()) {
            self.defined.push(DefinedSymbol::new(name, kind));
        }
    }

    pub fn use_symbol(&mut self, name: &str) {
        if self.used_names.insert(name.to_string()) {
            self.uses.push(name.to_string());
        }
    }

    /// Drop uses of names the chunk defines itself
    pub fn finish(self) -> SymbolExtractionResult {
        let defined_names = self.defined_names;
        SymbolExtractionResult {
            defines_symbols: self.defined.iter().map(|s| s.name.clone()).collect(),
            uses_symbols: self
                .uses
                .into_iter()
                .filter(|name| !defined_names.contains(name))
                .collect(),
            defined_symbols: self.defined,
        }
    }
}

/// Best-effort symbol guessed from a chunk's leading lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicSymbol {
    pub name: String,
    pub kind: ChunkKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accumulator_dedups_and_removes_self_references() {
        let mut acc = SymbolAccumulator::default();
        acc.use_symbol("helper");
        acc.define("factorial", ChunkKind::Function);
        acc.use_symbol("factorial");
        acc.define("factorial", ChunkKind::Variable);
        acc.use_symbol("helper");
        acc.use_symbol("format_output");

        let result = acc.finish();
        assert_eq!(result.defines_symbols, vec!["factorial"]);
        assert_eq!(result.uses_symbols, vec!["helper", "format_output"]);
        assert_eq!(result.kind_of("factorial"), Some(ChunkKind::Function));
        assert_eq!(result.kind_of("helper"), None);
    }

    #[test]
    fn test_result_serialization_shape() {
        let result = SymbolExtractionResult {
            defines_symbols: vec!["greet".to_string()],
            uses_symbols: vec![],
            defined_symbols: vec![DefinedSymbol::new("greet", ChunkKind::Function)],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["defined_symbols"][0]["kind"], "function");
        assert_eq!(json["defines_symbols"][0], "greet");
    }
}
