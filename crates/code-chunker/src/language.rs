use crate::error::{ChunkerError, Result};
use std::path::Path;
use std::str::FromStr;

/// Map a free-form language identifier to its canonical id.
///
/// Canonical ids are lowercase (`typescript`, `csharp`, `cpp`, `hcl`, ...).
/// Unrecognized ids are returned lowercased so they still flow into the
/// line-window fallback.
#[must_use]
pub fn canonical_language_id(id: &str) -> String {
    let lower = id.trim().to_ascii_lowercase();
    let canonical = match lower.as_str() {
        "ts" | "mts" | "cts" => "typescript",
        "js" | "jsx" | "mjs" | "cjs" | "node" => "javascript",
        "py" | "pyw" | "python3" => "python",
        "rb" => "ruby",
        "rs" => "rust",
        "golang" => "go",
        "c++" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => "cpp",
        "c#" | "cs" | "c_sharp" => "csharp",
        "kt" | "kts" => "kotlin",
        "ex" | "exs" => "elixir",
        "tf" | "tfvars" | "terraform" => "hcl",
        _ => return lower,
    };
    canonical.to_string()
}

/// Languages with a tree-sitter grammar compiled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
    Python,
    Rust,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Php,
}

impl Language {
    pub const ALL: [Self; 12] = [
        Self::TypeScript,
        Self::Tsx,
        Self::JavaScript,
        Self::Python,
        Self::Rust,
        Self::Go,
        Self::Java,
        Self::C,
        Self::Cpp,
        Self::CSharp,
        Self::Ruby,
        Self::Php,
    ];

    /// Look up a grammar by language id (aliases accepted)
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let canonical = canonical_language_id(id);
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == canonical)
    }

    /// Detect language from file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "tsx" => Some(Self::Tsx),
            "h" => Some(Self::C),
            "php" | "phtml" => Some(Self::Php),
            other => Self::from_id(other),
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical language id
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::CSharp => "csharp",
            Self::Ruby => "ruby",
            Self::Php => "php",
        }
    }

    /// Get Tree-sitter language instance
    #[must_use]
    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::Java => tree_sitter_java::LANGUAGE.into(),
            Self::C => tree_sitter_c::LANGUAGE.into(),
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Self::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            Self::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            Self::Php => tree_sitter_php::LANGUAGE_PHP.into(),
        }
    }

    /// Whether the bundled grammar's ABI is one the linked tree-sitter
    /// runtime accepts
    #[must_use]
    pub fn is_loadable(self) -> bool {
        let abi = self.tree_sitter_language().version();
        (tree_sitter::MIN_COMPATIBLE_LANGUAGE_VERSION..=tree_sitter::LANGUAGE_VERSION).contains(&abi)
    }
}

impl FromStr for Language {
    type Err = ChunkerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_id(s).ok_or_else(|| ChunkerError::unsupported_language(s))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_canonical_ids() {
        assert_eq!(canonical_language_id("TS"), "typescript");
        assert_eq!(canonical_language_id("c++"), "cpp");
        assert_eq!(canonical_language_id("C#"), "csharp");
        assert_eq!(canonical_language_id("terraform"), "hcl");
        assert_eq!(canonical_language_id("Lua"), "lua");
        assert_eq!(canonical_language_id("fortran"), "fortran");
    }

    #[test]
    fn test_language_detection() {
        assert_eq!(Language::from_extension("rs"), Some(Language::Rust));
        assert_eq!(Language::from_extension("tsx"), Some(Language::Tsx));
        assert_eq!(Language::from_extension("h"), Some(Language::C));
        assert_eq!(Language::from_extension("lua"), None);
        assert_eq!(Language::from_path("src/app.py"), Some(Language::Python));
        assert_eq!(Language::from_path("Makefile"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("csharp".parse::<Language>().unwrap(), Language::CSharp);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_every_grammar_loads() {
        for lang in Language::ALL {
            let mut parser = tree_sitter::Parser::new();
            assert!(
                parser.set_language(&lang.tree_sitter_language()).is_ok(),
                "grammar for {lang} rejected"
            );
            assert!(lang.is_loadable(), "{lang}");
        }
    }
}
