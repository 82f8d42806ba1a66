//! Diagnostic formatting shared by every matcher.
//!
//! Values render as `<TYPE>: VALUE`, indented by four spaces per level:
//!
//! ```text
//! Expected
//!     <i32>: 5
//! to equal
//!     <i32>: 6
//! ```

use std::fmt;

/// One indentation level.
pub const INDENT: &str = "    ";

/// Render `value` with its type name at the given indentation level.
pub fn object(type_name: &str, value: &dyn fmt::Debug, indent: usize) -> String {
    format!("{}<{}>: {:?}", INDENT.repeat(indent), short_type_name(type_name), value)
}

/// [`object`] with the type name taken from `T`.
pub fn object_of<T: fmt::Debug + ?Sized>(value: &T, indent: usize) -> String {
    object(std::any::type_name::<T>(), &value, indent)
}

/// Prefix every line of `s` with `indent` indentation levels.
pub fn indent_string(s: &str, indent: usize) -> String {
    let pad = INDENT.repeat(indent);
    s.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `Expected\n<actual>\n<message>\n<expected>`, the shape most matchers use.
pub fn message(actual: &str, message: &str, expected: &str) -> String {
    format!("Expected\n{actual}\n{message}\n{expected}")
}

/// Strip module paths from a type name, keeping generic structure:
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        match ch {
            '<' | '>' | ',' | ' ' | '&' | '[' | ']' | ';' | '(' | ')' | '*' => {
                out.push_str(last_path_segment(&segment));
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_renders_type_and_debug() {
        assert_eq!(object_of(&5_i32, 1), "    <i32>: 5");
        assert_eq!(object_of("foo", 1), "    <str>: \"foo\"");
    }

    #[test]
    fn short_type_name_strips_paths() {
        assert_eq!(
            short_type_name("alloc::vec::Vec<alloc::string::String>"),
            "Vec<String>"
        );
        assert_eq!(
            short_type_name("&std::collections::HashMap<&str, i32>"),
            "&HashMap<&str, i32>"
        );
        assert_eq!(short_type_name("i64"), "i64");
    }

    #[test]
    fn indent_string_prefixes_each_line() {
        assert_eq!(indent_string("a\nb", 1), "    a\n    b");
        assert_eq!(indent_string("a", 2), "        a");
    }
}
