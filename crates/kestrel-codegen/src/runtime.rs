//! JavaScript runtime support emitted ahead of every program.
//!
//! Helper names start with `$`, which Kestrel identifiers cannot contain,
//! so user bindings never clash with them. The prelude functions are
//! curried to match their Kestrel types.

pub(crate) const PRELUDE: &str = r#""use strict";
const $eq = (a, b) =>
  Array.isArray(a)
    ? a.length === b.length && a.every((x, i) => $eq(x, b[i]))
    : a === b;
const $show = (v) =>
  typeof v === "boolean" ? (v ? "True" : "False")
  : typeof v === "function" ? "<function>"
  : Array.isArray(v) ? "(" + v.map($show).join(", ") + ")"
  : String(v);
const eq = (a) => (b) => $eq(a, b);
const add = (a) => (b) => a + b;
const sub = (a) => (b) => a - b;
const mul = (a) => (b) => a * b;
"#;

/// Names that cannot be used as JavaScript bindings in strict mode.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield",
];

/// The JavaScript spelling of a Kestrel identifier.
pub(crate) fn mangle(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}$")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_get_a_suffix() {
        assert_eq!(mangle("class"), "class$");
        assert_eq!(mangle("true"), "true$");
        assert_eq!(mangle("x"), "x");
        assert_eq!(mangle("classy"), "classy");
    }

    #[test]
    fn prelude_defines_every_builtin() {
        for name in ["eq", "add", "sub", "mul"] {
            assert!(PRELUDE.contains(&format!("const {name} = ")), "{name}");
        }
    }
}
