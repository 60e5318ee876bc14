//! Regex symbol guessing for chunks without a syntax tree.
//!
//! Only the first [`SCAN_LINES`] lines of a chunk are inspected and at most
//! one definition is reported. Usages are never produced, so graphs built from
//! these results are much sparser than tree-query ones.

use crate::noise::is_noise;
use crate::types::{HeuristicSymbol, SymbolAccumulator, SymbolExtractionResult};
use codeweave_chunker::{canonical_language_id, ChunkKind, ChunkResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Leading lines of a chunk searched for a definition
pub const SCAN_LINES: usize = 5;

/// A pattern capturing `name`, and optionally `sub` which is joined as
/// `name.sub` (terraform `resource "type" "name"`).
struct SymbolPattern {
    regex: Regex,
    kind: ChunkKind,
}

fn pat(pattern: &str, kind: ChunkKind) -> SymbolPattern {
    SymbolPattern {
        regex: Regex::new(pattern).expect("valid regex"),
        kind,
    }
}

/// Identifiers that method-shaped patterns pick up from control flow
const CONTROL_WORDS: &[&str] = &[
    "if", "else", "for", "while", "switch", "catch", "return", "match", "when", "sizeof",
];

static PATTERNS: Lazy<HashMap<&'static str, Vec<SymbolPattern>>> = Lazy::new(|| {
    use ChunkKind::*;

    let mut table: HashMap<&'static str, Vec<SymbolPattern>> = HashMap::new();

    let js = || {
        vec![
            pat(
                r#"^\s*(?:app|router|server)\.(?:get|post|put|patch|delete|all)\(\s*['"`](?P<name>[^'"`]+)"#,
                Route,
            ),
            pat(
                r"^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+(?P<name>[\w$]+)",
                Class,
            ),
            pat(r"^\s*(?:export\s+)?interface\s+(?P<name>\w+)", Interface),
            pat(r"^\s*(?:export\s+)?type\s+(?P<name>\w+)\s*(?:<[^>]*>)?\s*=", Type),
            pat(r"^\s*(?:export\s+)?(?:const\s+)?enum\s+(?P<name>\w+)", Enum),
            pat(
                r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>[\w$]+)",
                Function,
            ),
            pat(
                r"^\s*(?:export\s+)?(?:const|let|var)\s+(?P<name>[\w$]+)\s*(?::[^=]+)?=",
                Variable,
            ),
            pat(
                r"^\s*(?:(?:public|private|protected|static|async|readonly|override|get|set)\s+)*(?P<name>[\w$]+)\s*\([^)]*\)\s*(?::\s*[^{]+)?\{",
                Method,
            ),
        ]
    };
    table.insert("javascript", js());
    table.insert("typescript", js());
    table.insert("tsx", js());

    table.insert(
        "python",
        vec![
            pat(
                r#"^\s*@(?:\w+\.)?(?:route|get|post|put|patch|delete)\(\s*['"](?P<name>[^'"]+)"#,
                Route,
            ),
            pat(r"^\s*class\s+(?P<name>\w+)", Class),
            pat(r"^\s*(?:async\s+)?def\s+(?P<name>\w+)", Function),
            pat(r"^(?P<name>[A-Z][A-Z0-9_]*)\s*(?::[^=]+)?=[^=]", Constant),
            pat(r"^(?P<name>[a-z_]\w*)\s*(?::[^=]+)?=[^=]", Variable),
        ],
    );

    table.insert(
        "rust",
        vec![
            pat(r"^\s*(?:pub(?:\([^)]*\))?\s+)?struct\s+(?P<name>\w+)", Class),
            pat(r"^\s*(?:pub(?:\([^)]*\))?\s+)?enum\s+(?P<name>\w+)", Enum),
            pat(
                r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:unsafe\s+)?trait\s+(?P<name>\w+)",
                Interface,
            ),
            pat(
                r#"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+"[^"]*"\s+)?fn\s+(?P<name>\w+)"#,
                Function,
            ),
            pat(r"^\s*(?:pub(?:\([^)]*\))?\s+)?type\s+(?P<name>\w+)", Type),
            pat(r"^\s*(?:pub(?:\([^)]*\))?\s+)?mod\s+(?P<name>\w+)", Module),
            pat(r"^\s*(?:pub(?:\([^)]*\))?\s+)?const\s+(?P<name>\w+)\s*:", Constant),
            pat(
                r"^\s*(?:pub(?:\([^)]*\))?\s+)?static\s+(?:mut\s+)?(?P<name>\w+)\s*:",
                Variable,
            ),
            pat(r"^\s*macro_rules!\s*(?P<name>\w+)", Function),
        ],
    );

    table.insert(
        "go",
        vec![
            pat(r"^func\s+\([^)]*\)\s*(?P<name>\w+)", Method),
            pat(r"^func\s+(?P<name>\w+)", Function),
            pat(r"^type\s+(?P<name>\w+)\s+interface\b", Interface),
            pat(r"^type\s+(?P<name>\w+)", Type),
            pat(r"^const\s+(?P<name>\w+)", Constant),
            pat(r"^var\s+(?P<name>\w+)", Variable),
        ],
    );

    table.insert(
        "java",
        vec![
            pat(
                r#"^\s*@(?:Get|Post|Put|Patch|Delete|Request)Mapping\(\s*(?:(?:value|path)\s*=\s*)?"(?P<name>[^"]+)""#,
                Route,
            ),
            pat(
                r"^\s*(?:(?:public|private|protected|static|final|abstract|sealed)\s+)*(?:class|record)\s+(?P<name>\w+)",
                Class,
            ),
            pat(
                r"^\s*(?:(?:public|private|protected|static)\s+)*@?interface\s+(?P<name>\w+)",
                Interface,
            ),
            pat(
                r"^\s*(?:(?:public|private|protected|static)\s+)*enum\s+(?P<name>\w+)",
                Enum,
            ),
            pat(
                r"^\s*(?:(?:public|private|protected|static|final|abstract|synchronized|native)\s+)+[\w<>\[\],.?\s]*?(?P<name>\w+)\s*\(",
                Method,
            ),
        ],
    );

    table.insert(
        "kotlin",
        vec![
            pat(
                r"^\s*(?:(?:public|private|internal|open|abstract|sealed|data|enum|inner)\s+)*class\s+(?P<name>\w+)",
                Class,
            ),
            pat(r"^\s*(?:(?:public|private|internal)\s+)*interface\s+(?P<name>\w+)", Interface),
            pat(r"^\s*(?:(?:public|private|internal|companion)\s+)*object\s+(?P<name>\w+)", Class),
            pat(
                r"^\s*(?:(?:public|private|internal|protected|override|suspend|inline|open)\s+)*fun\s+(?:<[^>]*>\s*)?(?:\w+\.)?(?P<name>\w+)",
                Function,
            ),
            pat(r"^\s*(?:const\s+)?val\s+(?P<name>[A-Z][A-Z0-9_]*)\s*[:=]", Constant),
        ],
    );

    table.insert(
        "csharp",
        vec![
            pat(
                r#"^\s*\[(?:Http(?:Get|Post|Put|Patch|Delete)|Route)\(\s*"(?P<name>[^"]+)""#,
                Route,
            ),
            pat(
                r"^\s*(?:(?:public|private|protected|internal|static|sealed|abstract|partial)\s+)*(?:class|record)\s+(?P<name>\w+)",
                Class,
            ),
            pat(
                r"^\s*(?:(?:public|private|protected|internal)\s+)*interface\s+(?P<name>\w+)",
                Interface,
            ),
            pat(
                r"^\s*(?:(?:public|private|protected|internal|readonly)\s+)*struct\s+(?P<name>\w+)",
                Type,
            ),
            pat(r"^\s*(?:(?:public|private|protected|internal)\s+)*enum\s+(?P<name>\w+)", Enum),
            pat(r"^\s*namespace\s+(?P<name>[\w.]+)", Module),
            pat(
                r"^\s*(?:(?:public|private|protected|internal|static|virtual|override|abstract|async|sealed)\s+)+[\w<>\[\],.?\s]*?(?P<name>\w+)\s*\(",
                Method,
            ),
        ],
    );

    let c_family = || {
        vec![
            pat(r"^\s*(?:template\s*<[^>]*>\s*)?class\s+(?P<name>\w+)", Class),
            pat(r"^\s*(?:typedef\s+)?(?:struct|union)\s+(?P<name>\w+)\s*\{?\s*$", Type),
            pat(r"^\s*(?:typedef\s+)?enum\s+(?:class\s+)?(?P<name>\w+)", Enum),
            pat(r"^\s*namespace\s+(?P<name>\w+)", Module),
            pat(r"^\s*#\s*define\s+(?P<name>\w+)", Constant),
            pat(
                r"^(?:[\w*&<>,]+\s+)+\**(?:\w+::)*(?P<name>~?\w+)\s*\([^;]*$",
                Function,
            ),
        ]
    };
    table.insert("c", c_family());
    table.insert("cpp", c_family());

    table.insert(
        "ruby",
        vec![
            pat(
                r#"^\s*(?:get|post|put|patch|delete)\s+['"](?P<name>[^'"]+)"#,
                Route,
            ),
            pat(r"^\s*class\s+(?P<name>[\w:]+)", Class),
            pat(r"^\s*module\s+(?P<name>[\w:]+)", Module),
            pat(r"^\s*def\s+(?:self\.)?(?P<name>[\w?!=]+)", Method),
            pat(r"^\s*(?P<name>[A-Z][A-Z0-9_]*)\s*=", Constant),
        ],
    );

    table.insert(
        "php",
        vec![
            pat(
                r#"Route::(?:get|post|put|patch|delete|any|match)\(\s*['"](?P<name>[^'"]+)"#,
                Route,
            ),
            pat(r"^\s*(?:(?:abstract|final|readonly)\s+)*class\s+(?P<name>\w+)", Class),
            pat(r"^\s*interface\s+(?P<name>\w+)", Interface),
            pat(r"^\s*trait\s+(?P<name>\w+)", Interface),
            pat(r"^\s*enum\s+(?P<name>\w+)", Enum),
            pat(
                r"^\s*(?:(?:public|private|protected|static|final|abstract)\s+)+function\s+(?P<name>\w+)",
                Method,
            ),
            pat(r"^\s*function\s+(?P<name>\w+)", Function),
        ],
    );

    table.insert(
        "hcl",
        vec![
            pat(
                r#"^\s*(?:resource|data)\s+"(?P<name>[^"]+)"\s+"(?P<sub>[^"]+)""#,
                Resource,
            ),
            pat(r#"^\s*module\s+"(?P<name>[^"]+)""#, Module),
            pat(r#"^\s*(?:variable|output)\s+"(?P<name>[^"]+)""#, Variable),
            pat(r#"^\s*provider\s+"(?P<name>[^"]+)""#, Resource),
        ],
    );

    table.insert(
        "lua",
        vec![
            pat(r"^\s*(?:local\s+)?function\s+(?P<name>[\w.:]+)", Function),
            pat(r"^\s*(?:local\s+)?(?P<name>\w+)\s*=\s*function\b", Function),
        ],
    );

    table.insert(
        "elixir",
        vec![
            pat(r"^\s*defmodule\s+(?P<name>[\w.]+)", Module),
            pat(r"^\s*defp?\s+(?P<name>\w+[?!]?)", Function),
            pat(r"^\s*defmacrop?\s+(?P<name>\w+[?!]?)", Function),
        ],
    );

    table.insert(
        "swift",
        vec![
            pat(r"^\s*(?:(?:public|private|internal|open|final)\s+)*class\s+(?P<name>\w+)", Class),
            pat(r"^\s*(?:(?:public|private|internal)\s+)*struct\s+(?P<name>\w+)", Type),
            pat(r"^\s*(?:(?:public|private|internal)\s+)*protocol\s+(?P<name>\w+)", Interface),
            pat(r"^\s*(?:(?:public|private|internal|indirect)\s+)*enum\s+(?P<name>\w+)", Enum),
            pat(
                r"^\s*(?:(?:public|private|internal|open|static|override|mutating)\s+)*func\s+(?P<name>\w+)",
                Function,
            ),
        ],
    );

    table.insert(
        "scala",
        vec![
            pat(r"^\s*(?:(?:case|abstract|sealed|final)\s+)*class\s+(?P<name>\w+)", Class),
            pat(r"^\s*(?:case\s+)?object\s+(?P<name>\w+)", Class),
            pat(r"^\s*(?:sealed\s+)?trait\s+(?P<name>\w+)", Interface),
            pat(r"^\s*(?:(?:private|protected|override|final)\s+)*def\s+(?P<name>\w+)", Function),
        ],
    );

    table
});

/// Guess the main definition of a chunk from its leading lines.
///
/// Patterns are tried in priority order; the first one matching any of the
/// scanned lines wins. Returns `None` for unknown languages.
#[must_use]
pub fn extract_symbol(content: &str, language: &str) -> Option<HeuristicSymbol> {
    let patterns = PATTERNS.get(canonical_language_id(language).as_str())?;
    let head: Vec<&str> = content.lines().take(SCAN_LINES).collect();

    patterns.iter().find_map(|pattern| {
        head.iter().find_map(|line| {
            let caps = pattern.regex.captures(line)?;
            let name = caps.name("name")?.as_str();
            if CONTROL_WORDS.contains(&name) {
                return None;
            }
            let name = match caps.name("sub") {
                Some(sub) => format!("{name}.{}", sub.as_str()),
                None => name.to_string(),
            };
            Some(HeuristicSymbol {
                name,
                kind: pattern.kind,
            })
        })
    })
}

/// Heuristic results parallel to `chunks`: at most one definition each
#[must_use]
pub fn extract_symbols_heuristic(chunks: &[ChunkResult], language: &str) -> Vec<SymbolExtractionResult> {
    chunks
        .iter()
        .map(|chunk| {
            let mut acc = SymbolAccumulator::default();
            if let Some(symbol) = extract_symbol(&chunk.content, language) {
                if !is_noise(&symbol.name) {
                    acc.define(&symbol.name, symbol.kind);
                }
            }
            acc.finish()
        })
        .collect()
}

/// Whether `language` has heuristic symbol patterns (aliases accepted)
#[must_use]
pub fn has_symbol_patterns(language: &str) -> bool {
    PATTERNS.contains_key(canonical_language_id(language).as_str())
}
