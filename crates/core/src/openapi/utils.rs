//! String-case helpers shared by the model builders and the renderer.

use std::collections::HashSet;
use std::path::{Component, Path};
use std::sync::LazyLock;

/// Words that cannot be used as TypeScript identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Convert a kebab-case string to camelCase.
///
/// The first segment is kept as is; every following segment gets an uppercase
/// first letter and a lowercased remainder.
pub fn camelize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for (i, part) in s.split('-').enumerate() {
        if i == 0 {
            result.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(&chars.as_str().to_lowercase());
        }
    }
    result
}

/// Convert a camelCase or PascalCase string to kebab-case.
///
/// Every ASCII uppercase letter after the first character starts a new segment.
pub fn kebabize(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut chars = s.chars();
    if let Some(first) = chars.next() {
        result.extend(first.to_lowercase());
    }
    for c in chars {
        if c.is_ascii_uppercase() {
            result.push('-');
        }
        result.push(c);
    }
    result.to_lowercase()
}

/// Convert a kebab-case string to PascalCase.
pub fn pascalize(s: &str) -> String {
    capitalize_first(&camelize(s))
}

/// Rewrite `{param}` placeholders into template-literal `${param}` placeholders.
pub fn literalize(s: &str) -> String {
    s.replace('{', "${")
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Check if a property key needs quoting.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_bracket_notation(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Whether `name` is a TypeScript reserved word.
pub fn is_reserved_word(name: &str) -> bool {
    TS_RESERVED_WORDS.contains(name)
}

/// Escape a string for use in a double-quoted TypeScript string literal.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a property key if it is not a valid identifier.
///
/// Index signatures (`[key: string]`) are returned untouched.
pub fn quote_if_needed(name: &str) -> String {
    if is_index_signature(name) || !needs_bracket_notation(name) {
        name.to_string()
    } else {
        format!("\"{}\"", escape_js_string(name))
    }
}

fn is_index_signature(name: &str) -> bool {
    name.starts_with('[') && name.ends_with(']')
}

/// Relative module path from one output directory to another, for use in an
/// ES `import` specifier.
///
/// Computed lexically: `.` components are dropped and `..` pops the previous
/// component. The result always starts with `.` so bundlers treat it as a
/// relative import.
pub fn relative_module_path(from: &Path, to: &Path) -> String {
    let from = normalize(from);
    let to = normalize(to);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    for component in &to[common..] {
        parts.push(component.clone());
    }

    match parts.first().map(String::as_str) {
        None => ".".to_string(),
        Some("..") => parts.join("/"),
        Some(_) => format!("./{}", parts.join("/")),
    }
}

fn normalize(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|last| last != "..") {
                    parts.pop();
                } else {
                    parts.push("..".to_string());
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                parts.push(component.as_os_str().to_string_lossy().into_owned());
            }
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
        }
    }
    parts
}
