//! Regex/line based chunking for content without a syntax tree.
//!
//! Every language maps to a family spec in [`FAMILIES`]. All families share
//! one buffering loop and differ only in their [`BoundaryRule`]. Languages
//! with no entry fall back to a sliding window over lines.

use crate::config::ChunkerConfig;
use crate::language::canonical_language_id;
use crate::lines::{ChunkSink, Oversize, SourceLines};
use crate::rules::{BoundaryRule, BraceRule, IndentRule, KeywordRule};
use crate::strip::CodeStripper;
use crate::types::ChunkResult;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

enum Family {
    Keyword {
        open: Regex,
        close: Regex,
        one_liner: Regex,
    },
    Brace {
        open: Regex,
        hash_comments: bool,
        char_literals_only: bool,
    },
    Indent {
        open: Regex,
    },
}

struct FamilySpec {
    family: Family,
    trivia: Regex,
}

impl FamilySpec {
    fn rule(&self) -> Box<dyn BoundaryRule + '_> {
        match &self.family {
            Family::Keyword {
                open,
                close,
                one_liner,
            } => Box::new(KeywordRule::new(open, close, one_liner, &self.trivia)),
            Family::Brace {
                open,
                hash_comments,
                char_literals_only,
            } => Box::new(BraceRule::new(
                open,
                &self.trivia,
                CodeStripper::new(*hash_comments, *char_literals_only),
            )),
            Family::Indent { open } => Box::new(IndentRule::new(open, &self.trivia)),
        }
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

fn keyword(open: &str, one_liner: &str, trivia: &str) -> FamilySpec {
    FamilySpec {
        family: Family::Keyword {
            open: re(open),
            close: re(r"^\s*end\b"),
            one_liner: re(one_liner),
        },
        trivia: re(trivia),
    }
}

fn brace(open: &str, trivia: &str) -> FamilySpec {
    FamilySpec {
        family: Family::Brace {
            open: re(open),
            hash_comments: false,
            char_literals_only: false,
        },
        trivia: re(trivia),
    }
}

const C_TRIVIA: &str = r"^\s*(//|/\*|\*)";
const ANNOTATION_TRIVIA: &str = r"^\s*(//|/\*|\*|@[A-Za-z])";

const JS_OPEN: &str = r"^\s*(export\s+)?(default\s+)?(declare\s+)?(abstract\s+)?(async\s+)?(function\b|class\b|interface\b|enum\b|namespace\b|module\b|type\s+[\w$]+)|^\s*(export\s+)?(const|let|var)\s+[\w$]+[^=]*=\s*(async\s+)?(function\b|class\b|\(|[\w$]+\s*=>|\{)";
const JVM_OPEN: &str = r"^\s*((public|private|protected|internal|static|final|abstract|sealed|open|data|inline|override|suspend|export|partial|readonly|unsafe|virtual|async|extern|new)\s+)*(class|interface|enum|record|struct|object|trait|fun|def|func|protocol|extension|namespace|actor|case\s+class)\b";
const C_OPEN: &str = r"^(struct|class|enum|union|namespace|typedef|template)\b|^[A-Za-z_][\w\s\*&:<>,]*[\s\*&]\**~?[\w:]+\s*\([^;]*$";

static FAMILIES: Lazy<HashMap<&'static str, FamilySpec>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        "ruby",
        keyword(r"^\s*(def|class|module)\b", r"\bend\s*$", r"^\s*#"),
    );
    table.insert(
        "lua",
        keyword(r"^\s*(local\s+)?function\b", r"\bend\s*$", r"^\s*--"),
    );
    table.insert(
        "elixir",
        keyword(
            r"^\s*(defp?|defmodule|defmacrop?|defimpl|defprotocol|defstruct)\b",
            r"(\bend|,\s*do:.*)\s*$",
            r"^\s*(#|@[a-z])",
        ),
    );

    for lang in ["typescript", "tsx", "javascript"] {
        table.insert(lang, brace(JS_OPEN, ANNOTATION_TRIVIA));
    }
    table.insert(
        "rust",
        FamilySpec {
            family: Family::Brace {
                open: re(
                    r#"^\s*(pub(\([^)]*\))?\s+)?(default\s+)?((const|async|unsafe)\s+)*(extern\s+"[^"]*"\s+)?(fn|struct|enum|trait|impl|mod|union|type|static|const|macro_rules!)\b"#,
                ),
                hash_comments: false,
                char_literals_only: true,
            },
            trivia: re(r"^\s*(//|/\*|\*|#!?\[)"),
        },
    );
    table.insert("go", brace(r"^(func|type|var|const)\b", C_TRIVIA));
    for lang in ["java", "kotlin", "scala", "swift"] {
        table.insert(lang, brace(JVM_OPEN, ANNOTATION_TRIVIA));
    }
    table.insert("csharp", brace(JVM_OPEN, r"^\s*(//|/\*|\*|\[[A-Za-z])"));
    for lang in ["c", "cpp"] {
        table.insert(lang, brace(C_OPEN, C_TRIVIA));
    }
    table.insert(
        "php",
        FamilySpec {
            family: Family::Brace {
                open: re(
                    r"^\s*((abstract|final|public|private|protected|static|readonly)\s+)*(function|class|interface|trait|enum|namespace)\b",
                ),
                hash_comments: true,
                char_literals_only: false,
            },
            trivia: re(r"^\s*(//|/\*|\*|#)"),
        },
    );
    table.insert(
        "hcl",
        FamilySpec {
            family: Family::Brace {
                open: re(
                    r"^\s*(resource|data|module|variable|output|provider|locals|terraform)\b",
                ),
                hash_comments: true,
                char_literals_only: false,
            },
            trivia: re(r"^\s*(#|//|/\*|\*)"),
        },
    );

    table.insert(
        "python",
        FamilySpec {
            family: Family::Indent {
                open: re(r"^(async\s+def|def|class)\s"),
            },
            trivia: re(r"^(#|@)"),
        },
    );

    table
});

/// Whether `language` has a dedicated boundary rule (aliases accepted)
#[must_use]
pub fn has_boundary_rules(language: &str) -> bool {
    FAMILIES.contains_key(canonical_language_id(language).as_str())
}

/// Split `content` without a syntax tree.
///
/// Blocks are found per language family; unknown languages use a sliding
/// window that honours `config.overlap`. Every chunk is at most
/// `max_chunk_size` bytes and whitespace-only input yields no chunks.
#[must_use]
pub fn chunk(content: &str, language: &str, config: &ChunkerConfig) -> Vec<ChunkResult> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let lines = SourceLines::new(content);
    let mut sink = ChunkSink::new(&lines, config.limits(), Oversize::Bisect);

    match FAMILIES.get(canonical_language_id(language).as_str()) {
        Some(spec) => {
            let mut rule = spec.rule();
            chunk_blocks(&mut sink, rule.as_mut());
        }
        None => {
            log::debug!("No boundary rules for {language:?}, using line windows");
            chunk_windows(&mut sink);
        }
    }

    sink.finish()
}

fn chunk_blocks<R: BoundaryRule + ?Sized>(sink: &mut ChunkSink<'_, '_>, rule: &mut R) {
    let lines = sink.lines();
    let valve = sink.limits().chunk_size.saturating_mul(2);
    let mut buffer_start = 0usize;
    let mut trivia_start: Option<usize> = None;

    for i in 0..lines.len() {
        let line = lines.line(i);

        if rule.opens_block(line) {
            let cut = trivia_start.unwrap_or(i);
            if lines.has_code(buffer_start, cut) {
                sink.emit(buffer_start, cut - 1);
                buffer_start = cut;
            }
        }

        if rule.is_trivia(line) {
            trivia_start.get_or_insert(i);
        } else {
            trivia_start = None;
        }

        if rule.consume(line) {
            sink.emit(buffer_start, i);
            buffer_start = i + 1;
            trivia_start = None;
        } else if lines.text_len(buffer_start, i) > valve {
            log::debug!("Buffer passed {valve} bytes at line {i}, flushing");
            sink.emit(buffer_start, i);
            buffer_start = i + 1;
            trivia_start = None;
        }
    }

    if buffer_start < lines.len() {
        sink.emit(buffer_start, lines.len() - 1);
    }
}

fn chunk_windows(sink: &mut ChunkSink<'_, '_>) {
    let lines = sink.lines();
    let limits = sink.limits();
    let n = lines.len();
    let mut start = 0usize;

    loop {
        while start < n && lines.is_blank(start) {
            start += 1;
        }
        if start >= n {
            break;
        }

        let mut end = start;
        while end + 1 < n && lines.text_len(start, end + 1) <= limits.chunk_size {
            end += 1;
        }
        sink.emit(start, end);
        if end + 1 >= n {
            break;
        }

        let mut next = end + 1;
        while next - 1 > start && lines.text_len(next - 1, end) <= limits.overlap {
            next -= 1;
        }
        start = next;
    }
}
