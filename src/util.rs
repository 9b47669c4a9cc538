//! Shared utility functions
//!
//! Kotlin source helpers used by value rendering and test generation.

/// Convert snake_case or camelCase to PascalCase
///
/// # Examples
/// ```
/// use compose_testgen::util::to_pascal_case;
/// assert_eq!(to_pascal_case("login_screen"), "LoginScreen");
/// assert_eq!(to_pascal_case("loginScreen"), "LoginScreen");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Quote `s` as a Kotlin string literal
///
/// # Examples
/// ```
/// use compose_testgen::util::kotlin_string;
/// assert_eq!(kotlin_string("a\"b"), "\"a\\\"b\"");
/// assert_eq!(kotlin_string("$x"), "\"\\$x\"");
/// ```
pub fn kotlin_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Make `s` usable inside a backtick-quoted Kotlin function name.
///
/// Characters the JVM (and Android's dex format) reject in method names are
/// replaced with `_`.
pub fn backtick_name(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '.' | ';' | '[' | ']' | '/' | '<' | '>' | ':' | '\\' | '`' | '"' | '\n' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("ProfileScreen"), "ProfileScreen");
        assert_eq!(to_pascal_case("profileScreen"), "ProfileScreen");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_kotlin_string() {
        assert_eq!(kotlin_string(""), "\"\"");
        assert_eq!(kotlin_string("plain"), "\"plain\"");
        assert_eq!(kotlin_string("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(kotlin_string("back\\slash"), "\"back\\\\slash\"");
    }

    #[test]
    fn test_backtick_name() {
        assert_eq!(
            backtick_name("email click is performed 0"),
            "email click is performed 0"
        );
        assert_eq!(backtick_name("a.b:c<d>"), "a_b_c_d_");
    }
}
