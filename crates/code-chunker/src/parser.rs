use crate::error::{ChunkerError, Result};
use crate::language::Language;
use std::collections::HashMap;
use tree_sitter::{Parser, Tree};

/// A successfully parsed source file
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub tree: Tree,
    pub language: Language,
    /// Canonical id of `language`
    pub language_id: &'static str,
}

/// Parses source text into syntax trees, one `tree_sitter::Parser` per language.
///
/// A parser is not reentrant, so `parse_file` takes `&mut self`. Keep one
/// `SourceParser` per worker.
#[derive(Default)]
pub struct SourceParser {
    parsers: HashMap<Language, Parser>,
}

impl SourceParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a grammar exists for the language id and the runtime accepts it
    #[must_use]
    pub fn is_available(&self, language_id: &str) -> bool {
        Language::from_id(language_id)
            .is_some_and(|language| self.parsers.contains_key(&language) || language.is_loadable())
    }

    /// Parse `content`. Returns `None` when the language has no grammar or
    /// tree-sitter gives up; callers then use the heuristic paths.
    pub fn parse_file(&mut self, content: &str, language_id: &str) -> Option<ParsedFile> {
        let language = Language::from_id(language_id)?;
        match self.try_parse(content, language) {
            Ok(tree) => Some(ParsedFile {
                tree,
                language,
                language_id: language.as_str(),
            }),
            Err(e) => {
                log::debug!("No syntax tree for {language_id}: {e}");
                None
            }
        }
    }

    fn try_parse(&mut self, content: &str, language: Language) -> Result<Tree> {
        let parser = self.parser_for(language)?;
        parser
            .parse(content, None)
            .ok_or_else(|| ChunkerError::parse(format!("{language} parser returned no tree")))
    }

    fn parser_for(&mut self, language: Language) -> Result<&mut Parser> {
        if !self.parsers.contains_key(&language) {
            let mut parser = Parser::new();
            parser
                .set_language(&language.tree_sitter_language())
                .map_err(|e| ChunkerError::tree_sitter(e.to_string()))?;
            self.parsers.insert(language, parser);
        }
        self.parsers
            .get_mut(&language)
            .ok_or_else(|| ChunkerError::tree_sitter(format!("parser for {language} missing")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_language() {
        let mut parser = SourceParser::new();
        assert!(parser.is_available("rs"));

        let parsed = parser
            .parse_file("fn main() {}\n", "rust")
            .expect("rust parses");
        assert_eq!(parsed.language, Language::Rust);
        assert_eq!(parsed.language_id, "rust");
        assert_eq!(parsed.tree.root_node().kind(), "source_file");
    }

    #[test]
    fn test_unsupported_language_yields_none() {
        let mut parser = SourceParser::new();
        assert!(!parser.is_available("lua"));
        assert!(parser.parse_file("local x = 1", "lua").is_none());
    }

    #[test]
    fn test_every_available_language_parses() {
        let mut parser = SourceParser::new();
        for language in Language::ALL {
            assert!(parser.is_available(language.as_str()), "{language}");
            assert!(
                parser.parse_file("x", language.as_str()).is_some(),
                "{language} advertised but not parsed"
            );
        }
        let parsed = parser
            .parse_file("class Greeter { void Hi() {} }\n", "c#")
            .expect("csharp parses");
        assert_eq!(parsed.tree.root_node().kind(), "compilation_unit");
    }

    #[test]
    fn test_parser_is_reused() {
        let mut parser = SourceParser::new();
        assert!(parser.parse_file("x = 1\n", "python").is_some());
        assert!(parser.parse_file("y = 2\n", "py").is_some());
        assert_eq!(parser.parsers.len(), 1);
    }
}
