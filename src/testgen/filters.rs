//! Custom MiniJinja filters for Kotlin output

use crate::util;
use minijinja::Environment;

/// Register all custom filters with the environment
pub fn register_filters(env: &mut Environment<'_>) {
    env.add_filter("kotlin_string", kotlin_string);
    env.add_filter("backtick_name", backtick_name);
    env.add_filter("indent", indent);
}

fn kotlin_string(value: &str) -> String {
    util::kotlin_string(value)
}

fn backtick_name(value: &str) -> String {
    util::backtick_name(value)
}

/// Add indentation to each non-empty line
fn indent(value: &str, spaces: usize) -> String {
    let indent_str = " ".repeat(spaces);
    value
        .lines()
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indent_str, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
