//! Light formatting of message text into HTML fragments.
//!
//! Text from the assistant (and text the user typed) is untrusted so
//! it is always escaped first. Only after that are the emphasis and
//! line break markers turned into tags, which means the only tags in
//! the output are the ones added here.
use std::sync::LazyLock;

use regex::Regex;

static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid strong regex"));
static EM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("Invalid emphasis regex"));
static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("Invalid line break regex"));

/// Escape every character with meaning in HTML.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert message text to an HTML fragment that is safe to insert
/// into a page as is.
///
/// Supports `**strong**`, `*emphasis*` and line breaks. Anything
/// else, including unbalanced markers, is left as literal text.
pub fn format_message(text: &str) -> String {
    let escaped = escape_markup(text);
    // Order matters: `**` pairs have to be consumed before single `*`
    let strong = STRONG_RE.replace_all(&escaped, "<strong>$1</strong>");
    let em = EM_RE.replace_all(&strong, "<em>$1</em>");
    LINE_BREAK_RE.replace_all(&em, "<br>").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_strong_em_and_line_break() {
        assert_eq!(
            format_message("**a** *b*\nc"),
            "<strong>a</strong> <em>b</em><br>c"
        );
    }

    #[test]
    fn test_format_escapes_script_tags() {
        let out = format_message("<script>alert('x')</script>");
        assert!(!out.contains("<script>"));
        assert_eq!(
            out,
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_format_escapes_before_decorating() {
        assert_eq!(
            format_message("**<b>bold</b>** & \"quoted\""),
            "<strong>&lt;b&gt;bold&lt;/b&gt;</strong> &amp; &quot;quoted&quot;"
        );
    }

    #[test]
    fn test_format_non_greedy() {
        assert_eq!(
            format_message("**one** and **two**"),
            "<strong>one</strong> and <strong>two</strong>"
        );
        assert_eq!(format_message("*x* y *z*"), "<em>x</em> y <em>z</em>");
    }

    #[test]
    fn test_format_bold_is_not_split_into_italics() {
        assert_eq!(
            format_message("**Computer Science** at *APIIT*"),
            "<strong>Computer Science</strong> at <em>APIIT</em>"
        );
    }

    #[test]
    fn test_format_unbalanced_markers_pass_through() {
        assert_eq!(format_message("5 * 3 = 15"), "5 * 3 = 15");
        assert_eq!(format_message("*open"), "*open");
        // Best effort, not a parser: a lone `**` reads as empty emphasis
        assert_eq!(format_message("**open"), "<em></em>open");
    }

    #[test]
    fn test_format_markers_do_not_span_lines() {
        assert_eq!(format_message("*a\nb*"), "*a<br>b*");
    }

    #[test]
    fn test_format_crlf_line_breaks() {
        assert_eq!(format_message("a\r\nb\nc"), "a<br>b<br>c");
    }

    #[test]
    fn test_format_plain_text_unchanged() {
        assert_eq!(format_message("See page X"), "See page X");
        assert_eq!(format_message(""), "");
    }
}
