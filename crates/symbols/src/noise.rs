use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Names too generic to link chunks by: builtins, prelude types and
/// ubiquitous method names shared across languages.
static DENYLIST: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // receivers and keywords that grammars expose as identifiers
        "self", "Self", "this", "super", "cls", "new", "init", "__init__",
        // output and assertions
        "print", "println", "printf", "sprintf", "puts", "console", "log", "dbg", "assert",
        "assert_eq", "panic", "format", "write", "writeln",
        // module loading
        "require", "include", "import",
        // collection and iterator plumbing
        "len", "make", "append", "delete", "range", "map", "filter", "reduce", "forEach",
        "push", "pop", "get", "set", "has", "add", "keys", "values", "iter", "collect",
        "vec", "clone", "unwrap", "expect", "into", "from", "to_string", "toString",
        // prelude and primitive types
        "String", "Vec", "Option", "Result", "Some", "None", "Ok", "Err", "Box", "str",
        "int", "bool", "byte", "rune", "char", "float", "double", "long", "string",
        "number", "any", "void", "object", "Object", "Array", "Promise", "Error",
        "error", "Exception", "u8", "u16", "u32", "u64", "usize", "i8", "i16", "i32",
        "i64", "isize", "f32", "f64", "int32", "int64", "uint", "float64",
    ]
    .into_iter()
    .collect()
});

/// Whether a captured name should be discarded
#[must_use]
pub fn is_noise(name: &str) -> bool {
    name.chars().count() < 2 || DENYLIST.contains(name)
}
