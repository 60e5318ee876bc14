use codeweave_chunker::{canonical_language_id, ChunkKind};
use tree_sitter::Node;

/// How many ancestors of a captured name are inspected for a known node type
pub const KIND_SEARCH_DEPTH: usize = 3;

type KindTable = &'static [(&'static str, ChunkKind)];

const RUST: KindTable = &[
    ("function_item", ChunkKind::Function),
    ("function_signature_item", ChunkKind::Function),
    ("macro_definition", ChunkKind::Function),
    ("struct_item", ChunkKind::Class),
    ("enum_item", ChunkKind::Enum),
    ("trait_item", ChunkKind::Interface),
    ("type_item", ChunkKind::Type),
    ("union_item", ChunkKind::Type),
    ("mod_item", ChunkKind::Module),
    ("const_item", ChunkKind::Constant),
    ("static_item", ChunkKind::Variable),
];

const PYTHON: KindTable = &[
    ("function_definition", ChunkKind::Function),
    ("class_definition", ChunkKind::Class),
    ("assignment", ChunkKind::Variable),
];

const JAVASCRIPT: KindTable = &[
    ("function_declaration", ChunkKind::Function),
    ("generator_function_declaration", ChunkKind::Function),
    ("class_declaration", ChunkKind::Class),
    ("abstract_class_declaration", ChunkKind::Class),
    ("method_definition", ChunkKind::Method),
    ("interface_declaration", ChunkKind::Interface),
    ("type_alias_declaration", ChunkKind::Type),
    ("enum_declaration", ChunkKind::Enum),
    ("variable_declarator", ChunkKind::Variable),
];

const GO: KindTable = &[
    ("function_declaration", ChunkKind::Function),
    ("method_declaration", ChunkKind::Method),
    ("type_spec", ChunkKind::Type),
    ("const_spec", ChunkKind::Constant),
    ("var_spec", ChunkKind::Variable),
];

const JAVA: KindTable = &[
    ("class_declaration", ChunkKind::Class),
    ("record_declaration", ChunkKind::Class),
    ("interface_declaration", ChunkKind::Interface),
    ("annotation_type_declaration", ChunkKind::Interface),
    ("enum_declaration", ChunkKind::Enum),
    ("method_declaration", ChunkKind::Method),
    ("constructor_declaration", ChunkKind::Method),
    ("field_declaration", ChunkKind::Variable),
];

const C_FAMILY: KindTable = &[
    ("function_definition", ChunkKind::Function),
    ("preproc_function_def", ChunkKind::Function),
    ("class_specifier", ChunkKind::Class),
    ("struct_specifier", ChunkKind::Type),
    ("union_specifier", ChunkKind::Type),
    ("type_definition", ChunkKind::Type),
    ("enum_specifier", ChunkKind::Enum),
    ("namespace_definition", ChunkKind::Module),
    ("preproc_def", ChunkKind::Constant),
];

const CSHARP: KindTable = &[
    ("class_declaration", ChunkKind::Class),
    ("struct_declaration", ChunkKind::Type),
    ("interface_declaration", ChunkKind::Interface),
    ("enum_declaration", ChunkKind::Enum),
    ("method_declaration", ChunkKind::Method),
    ("constructor_declaration", ChunkKind::Method),
    ("namespace_declaration", ChunkKind::Module),
    ("property_declaration", ChunkKind::Variable),
];

const RUBY: KindTable = &[
    ("method", ChunkKind::Method),
    ("singleton_method", ChunkKind::Method),
    ("class", ChunkKind::Class),
    ("module", ChunkKind::Module),
    ("assignment", ChunkKind::Constant),
];

const PHP: KindTable = &[
    ("function_definition", ChunkKind::Function),
    ("class_declaration", ChunkKind::Class),
    ("interface_declaration", ChunkKind::Interface),
    ("trait_declaration", ChunkKind::Interface),
    ("enum_declaration", ChunkKind::Enum),
    ("method_declaration", ChunkKind::Method),
];

/// Node type → kind table for a language id; empty for unknown languages
#[must_use]
pub fn kind_table(language_id: &str) -> &'static [(&'static str, ChunkKind)] {
    match canonical_language_id(language_id).as_str() {
        "rust" => RUST,
        "python" => PYTHON,
        "typescript" | "tsx" | "javascript" => JAVASCRIPT,
        "go" => GO,
        "java" => JAVA,
        "c" | "cpp" => C_FAMILY,
        "csharp" => CSHARP,
        "ruby" => RUBY,
        "php" => PHP,
        _ => &[],
    }
}

/// Kind of the definition a captured name belongs to: the first of up to
/// [`KIND_SEARCH_DEPTH`] ancestors found in `table`.
#[must_use]
pub fn resolve_kind(capture: Node<'_>, table: &[(&str, ChunkKind)]) -> ChunkKind {
    let mut current = capture.parent();
    for _ in 0..KIND_SEARCH_DEPTH {
        let Some(node) = current else {
            break;
        };
        if let Some((_, kind)) = table.iter().find(|(ty, _)| *ty == node.kind()) {
            return *kind;
        }
        current = node.parent();
    }
    ChunkKind::Unknown
}
