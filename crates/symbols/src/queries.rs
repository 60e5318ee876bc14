//! Declarative definition/usage queries per language and their compiled form.
//!
//! Every pattern captures the symbol name as `@name`. Other captures are
//! ignored by the extractor.

use crate::error::{Result, SymbolError};
use codeweave_chunker::{canonical_language_id, Language};
use std::collections::HashMap;
use tree_sitter::Query;

/// Query text for one language
#[derive(Debug, Clone, Copy)]
pub struct QuerySource {
    pub language_id: &'static str,
    pub definitions: &'static str,
    pub usages: &'static str,
}

const RUST: QuerySource = QuerySource {
    language_id: "rust",
    definitions: r#"
(function_item name: (_) @name)
(function_signature_item name: (_) @name)
(struct_item name: (_) @name)
(enum_item name: (_) @name)
(trait_item name: (_) @name)
(type_item name: (_) @name)
(union_item name: (_) @name)
(mod_item name: (_) @name)
(const_item name: (_) @name)
(static_item name: (_) @name)
(macro_definition name: (_) @name)
"#,
    usages: r#"
(call_expression function: (identifier) @name)
(call_expression function: (field_expression field: (field_identifier) @name))
(call_expression function: (scoped_identifier name: (identifier) @name))
(macro_invocation macro: (identifier) @name)
(type_identifier) @name
"#,
};

const PYTHON: QuerySource = QuerySource {
    language_id: "python",
    definitions: r#"
(function_definition name: (identifier) @name)
(class_definition name: (identifier) @name)
(module (expression_statement (assignment left: (identifier) @name)))
"#,
    usages: r#"
(call function: (identifier) @name)
(call function: (attribute attribute: (identifier) @name))
(class_definition superclasses: (argument_list (identifier) @name))
"#,
};

const JAVASCRIPT: QuerySource = QuerySource {
    language_id: "javascript",
    definitions: r#"
(function_declaration name: (_) @name)
(generator_function_declaration name: (_) @name)
(class_declaration name: (_) @name)
(method_definition name: (_) @name)
(program (lexical_declaration (variable_declarator name: (identifier) @name)))
(program (variable_declaration (variable_declarator name: (identifier) @name)))
(export_statement (lexical_declaration (variable_declarator name: (identifier) @name)))
"#,
    usages: r#"
(call_expression function: (identifier) @name)
(call_expression function: (member_expression property: (property_identifier) @name))
(new_expression constructor: (identifier) @name)
(class_heritage (identifier) @name)
"#,
};

const TYPESCRIPT_DEFINITIONS: &str = r#"
(function_declaration name: (_) @name)
(generator_function_declaration name: (_) @name)
(class_declaration name: (_) @name)
(abstract_class_declaration name: (_) @name)
(method_definition name: (_) @name)
(interface_declaration name: (_) @name)
(type_alias_declaration name: (_) @name)
(enum_declaration name: (_) @name)
(program (lexical_declaration (variable_declarator name: (identifier) @name)))
(program (variable_declaration (variable_declarator name: (identifier) @name)))
(export_statement (lexical_declaration (variable_declarator name: (identifier) @name)))
"#;

const TYPESCRIPT_USAGES: &str = r#"
(call_expression function: (identifier) @name)
(call_expression function: (member_expression property: (property_identifier) @name))
(new_expression constructor: (identifier) @name)
(type_identifier) @name
"#;

const TYPESCRIPT: QuerySource = QuerySource {
    language_id: "typescript",
    definitions: TYPESCRIPT_DEFINITIONS,
    usages: TYPESCRIPT_USAGES,
};

const TSX: QuerySource = QuerySource {
    language_id: "tsx",
    definitions: TYPESCRIPT_DEFINITIONS,
    usages: TYPESCRIPT_USAGES,
};

const GO: QuerySource = QuerySource {
    language_id: "go",
    definitions: r#"
(function_declaration name: (identifier) @name)
(method_declaration name: (field_identifier) @name)
(type_spec name: (type_identifier) @name)
(const_spec name: (identifier) @name)
(source_file (var_declaration (var_spec name: (identifier) @name)))
"#,
    usages: r#"
(call_expression function: (identifier) @name)
(call_expression function: (selector_expression field: (field_identifier) @name))
(type_identifier) @name
"#,
};

const JAVA: QuerySource = QuerySource {
    language_id: "java",
    definitions: r#"
(class_declaration name: (identifier) @name)
(interface_declaration name: (identifier) @name)
(enum_declaration name: (identifier) @name)
(record_declaration name: (identifier) @name)
(annotation_type_declaration name: (identifier) @name)
(method_declaration name: (identifier) @name)
(constructor_declaration name: (identifier) @name)
(field_declaration declarator: (variable_declarator name: (identifier) @name))
"#,
    usages: r#"
(method_invocation name: (identifier) @name)
(object_creation_expression type: (type_identifier) @name)
(type_identifier) @name
"#,
};

const C_DEFINITIONS: &str = r#"
(function_definition declarator: (function_declarator declarator: (identifier) @name))
(function_definition declarator: (pointer_declarator declarator: (function_declarator declarator: (identifier) @name)))
(struct_specifier name: (type_identifier) @name body: (_))
(union_specifier name: (type_identifier) @name body: (_))
(enum_specifier name: (type_identifier) @name body: (_))
(type_definition declarator: (type_identifier) @name)
(preproc_def name: (identifier) @name)
(preproc_function_def name: (identifier) @name)
"#;

const C: QuerySource = QuerySource {
    language_id: "c",
    definitions: C_DEFINITIONS,
    usages: r#"
(call_expression function: (identifier) @name)
(call_expression function: (field_expression field: (field_identifier) @name))
(type_identifier) @name
"#,
};

const CPP: QuerySource = QuerySource {
    language_id: "cpp",
    definitions: r#"
(function_definition declarator: (function_declarator declarator: (identifier) @name))
(function_definition declarator: (function_declarator declarator: (field_identifier) @name))
(function_definition declarator: (function_declarator declarator: (qualified_identifier name: (identifier) @name)))
(function_definition declarator: (pointer_declarator declarator: (function_declarator declarator: (identifier) @name)))
(class_specifier name: (type_identifier) @name body: (_))
(struct_specifier name: (type_identifier) @name body: (_))
(union_specifier name: (type_identifier) @name body: (_))
(enum_specifier name: (type_identifier) @name body: (_))
(type_definition declarator: (type_identifier) @name)
(namespace_definition name: (_) @name)
(preproc_def name: (identifier) @name)
(preproc_function_def name: (identifier) @name)
"#,
    usages: r#"
(call_expression function: (identifier) @name)
(call_expression function: (field_expression field: (field_identifier) @name))
(call_expression function: (qualified_identifier name: (identifier) @name))
(type_identifier) @name
"#,
};

const CSHARP: QuerySource = QuerySource {
    language_id: "csharp",
    definitions: r#"
(class_declaration name: (identifier) @name)
(struct_declaration name: (identifier) @name)
(interface_declaration name: (identifier) @name)
(enum_declaration name: (identifier) @name)
(method_declaration name: (identifier) @name)
(constructor_declaration name: (identifier) @name)
(property_declaration name: (identifier) @name)
(namespace_declaration name: (_) @name)
"#,
    usages: r#"
(invocation_expression function: (identifier) @name)
(invocation_expression function: (member_access_expression name: (identifier) @name))
(object_creation_expression type: (identifier) @name)
"#,
};

const RUBY: QuerySource = QuerySource {
    language_id: "ruby",
    definitions: r#"
(method name: (_) @name)
(singleton_method name: (_) @name)
(class name: (_) @name)
(module name: (_) @name)
(assignment left: (constant) @name)
"#,
    usages: r#"
(call method: (identifier) @name)
(superclass (constant) @name)
"#,
};

const PHP: QuerySource = QuerySource {
    language_id: "php",
    definitions: r#"
(function_definition name: (name) @name)
(class_declaration name: (name) @name)
(interface_declaration name: (name) @name)
(trait_declaration name: (name) @name)
(enum_declaration name: (name) @name)
(method_declaration name: (name) @name)
"#,
    usages: r#"
(function_call_expression function: (name) @name)
(member_call_expression name: (name) @name)
(scoped_call_expression name: (name) @name)
"#,
};

/// Query text for a language id (aliases accepted)
#[must_use]
pub fn query_source(language_id: &str) -> Option<QuerySource> {
    let source = match canonical_language_id(language_id).as_str() {
        "rust" => RUST,
        "python" => PYTHON,
        "javascript" => JAVASCRIPT,
        "typescript" => TYPESCRIPT,
        "tsx" => TSX,
        "go" => GO,
        "java" => JAVA,
        "c" => C,
        "cpp" => CPP,
        "csharp" => CSHARP,
        "ruby" => RUBY,
        "php" => PHP,
        _ => return None,
    };
    Some(source)
}

/// Compiled definition and usage queries for one grammar
#[derive(Debug)]
pub struct LanguageQueries {
    pub(crate) language_id: &'static str,
    pub(crate) definitions: Query,
    pub(crate) definition_name: u32,
    pub(crate) usages: Query,
    pub(crate) usage_name: u32,
}

impl LanguageQueries {
    /// Compile the queries for a grammar with a compiled-in parser
    pub fn compile(language: Language) -> Result<Self> {
        Self::compile_for(&language.tree_sitter_language(), language.as_str())
    }

    /// Compile the queries registered for `language_id` against `grammar`
    pub fn compile_for(grammar: &tree_sitter::Language, language_id: &str) -> Result<Self> {
        let source =
            query_source(language_id).ok_or_else(|| SymbolError::unsupported_language(language_id))?;

        let compile = |text: &str| {
            Query::new(grammar, text).map_err(|e| SymbolError::query_compile(source.language_id, &e))
        };
        let definitions = compile(source.definitions)?;
        let usages = compile(source.usages)?;

        let name_index = |query: &Query| {
            query
                .capture_index_for_name("name")
                .ok_or_else(|| SymbolError::MissingCapture(source.language_id.to_string()))
        };
        let definition_name = name_index(&definitions)?;
        let usage_name = name_index(&usages)?;

        Ok(Self {
            language_id: source.language_id,
            definitions,
            definition_name,
            usages,
            usage_name,
        })
    }

    /// Canonical id of the language these queries target
    #[must_use]
    pub const fn language_id(&self) -> &'static str {
        self.language_id
    }
}

/// Compiled queries keyed by grammar, owned by the caller.
///
/// Compilation failures are remembered so a broken grammar is reported once
/// per cache rather than once per file.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<Language, Option<LanguageQueries>>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queries for `language`, compiling on first request
    pub fn get(&mut self, language: Language) -> Option<&LanguageQueries> {
        self.entries
            .entry(language)
            .or_insert_with(|| match LanguageQueries::compile(language) {
                Ok(queries) => Some(queries),
                Err(e) => {
                    log::warn!("Symbol queries unavailable for {language}: {e}");
                    None
                }
            })
            .as_ref()
    }

    /// Number of languages looked up so far, including failures
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
