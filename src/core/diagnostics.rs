// src/core/diagnostics.rs
//! Pretty, colored, line+column diagnostics for formula errors.

use colored::Colorize;

use crate::core::error::CoreError;

pub struct Span {
    pub line: usize,
    pub col: usize,
    pub len: usize, // underline length (use 1 if unknown)
}

impl Span {
    pub fn single(line: usize, col: usize) -> Self {
        Self { line, col, len: 1 }
    }
}

pub fn render_error(origin: &str, source: &str, title: &str, span: Span) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "error:".bright_red().bold(), title.bright_white()));
    let (ln, col) = (span.line, span.col);
    let line_text = nth_line(source, ln).unwrap_or_default();

    // line number gutter
    let ln_str = format!("{:>4}", ln);
    out.push_str(&format!("{} {}\n", "-->".bright_blue(), format!("{}:{}:{}", origin, ln, col).bright_white()));
    out.push_str(&format!(" {} {}\n", " ".repeat(ln_str.len()), "|".dimmed()));
    out.push_str(&format!("{} {} {}\n", ln_str.dimmed(), "|".dimmed(), line_text));

    // underline with ^^^^^
    let underline = " ".repeat(col.saturating_sub(1)) + &"^".repeat(span.len.max(1));
    out.push_str(&format!(" {} {} {}\n", " ".repeat(ln_str.len()), "|".dimmed(), underline.bright_red()));
    out
}

/// Renders a core error against the formula it came from; errors without a
/// position get the title line only.
pub fn render_core_error(source: &str, err: &CoreError) -> String {
    match err.span() {
        Some((line, col, len)) => render_error("formula", source, &err.title(), Span { line, col, len }),
        None => format!("{} {}\n", "error:".bright_red().bold(), err),
    }
}

fn nth_line(src: &str, n: usize) -> Option<String> {
    src.lines().nth(n.saturating_sub(1)).map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_points_at_column() {
        colored::control::set_override(false);
        let out = render_error("formula", "x + yy", "undefined name 'yy'", Span { line: 1, col: 5, len: 2 });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "error: undefined name 'yy'");
        assert_eq!(lines[1], "--> formula:1:5");
        assert_eq!(lines[3], "   1 | x + yy");
        assert_eq!(lines[4], "      |     ^^");
    }

    #[test]
    fn span_single_is_one_wide() {
        colored::control::set_override(false);
        let out = render_error("formula", "(", "Expected an expression", Span::single(1, 2));
        assert!(out.lines().last().unwrap().ends_with(" ^"));
    }

    #[test]
    fn errors_without_span_render_title_only() {
        colored::control::set_override(false);
        let out = render_core_error("x", &CoreError::unsupported_rule("simpson"));
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("error: Unsupported Rule"));
    }
}
