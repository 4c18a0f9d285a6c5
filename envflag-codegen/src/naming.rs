//! Identifiers derived from flag, environment and application names.

use envflag_core::{to_pascal_case, to_screaming_snake_case, to_snake_case};

/// Words that need the `r#` prefix when used as identifiers.
const RESERVED_WORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be raw identifiers either.
const UNESCAPABLE_WORDS: &[&str] = &["crate", "self", "Self", "super"];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Escape a reserved word (e.g. "type" -> "r#type").
pub fn safe_name(name: &str) -> String {
    if is_reserved(name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Field and accessor name for a flag, or `None` when no valid Rust
/// identifier can be derived from it.
pub fn field_name(flag: &str) -> Option<String> {
    let snake = to_snake_case(flag);
    let starts_ok = snake
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    if !starts_ok || UNESCAPABLE_WORDS.contains(&snake.as_str()) {
        return None;
    }
    Some(safe_name(&snake))
}

/// Name of the `FlagInfo` constant of a flag (e.g. "log-level" -> "LOG_LEVEL").
pub fn flag_const(flag: &str) -> String {
    to_screaming_snake_case(flag)
}

/// Name of the constant holding an environment name (e.g. "dev" -> "ENV_DEV").
pub fn env_const(env: &str) -> String {
    format!("ENV_{}", to_screaming_snake_case(env))
}

/// Variable selecting the environment of an app (e.g. "demo" -> "DEMO_ENV").
pub fn env_key(app: &str) -> String {
    format!("{}_ENV", to_screaming_snake_case(app))
}

/// Constant naming an enum variant: the flag and the label in PascalCase,
/// e.g. "log-level" and "debug" -> "LogLevelDebug".
pub fn enum_ident(flag: &str, variant: &str) -> String {
    format!("{}{}", to_pascal_case(flag), to_pascal_case(variant))
}
