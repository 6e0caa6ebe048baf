//! Free-text sanitizing for user-submitted content.
//!
//! Blog bodies are stored as markup and rendered as-is. Comments are stored
//! as plain text and escaped when rendered.

/// Encodes text the way ammonia's serializer writes text nodes.
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`encode_text`]. `&amp;` goes last so `&amp;lt;` decodes to
/// `&lt;` and not `<`.
fn decode_text(serialized: &str) -> String {
    serialized
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Strips script/style elements (with their content), event-handler
/// attributes and any other markup outside ammonia's safe list. Never fails;
/// disallowed content is dropped silently.
///
/// Input that parses as text only comes back untouched, so "Fish & chips"
/// is not stored as "Fish &amp; chips".
pub fn sanitize(input: &str) -> String {
    let cleaned = ammonia::clean(input);
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    if cleaned == encode_text(&normalized) {
        input.to_string()
    } else {
        cleaned
    }
}

/// Reduces user input to the plain text a reader would see: scripts and
/// styles are dropped with their content, other tags are unwrapped, and
/// entities are decoded.
pub fn sanitize_text(input: &str) -> String {
    let safe = ammonia::clean(input);
    let text = ammonia::Builder::empty().clean(&safe).to_string();
    decode_text(&text)
}

/// Plain-text preview of a stored body: tags are removed first, then the
/// text is cut to `max_chars` characters. The caller escapes the result.
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let text = sanitize_text(body);
    let mut cut: String = text.chars().take(max_chars).collect();
    if text.chars().nth(max_chars).is_some() {
        cut.push_str("...");
    }
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_script_payloads() {
        let cleaned = sanitize("<p>Hello</p><script>alert('pwned')</script>");
        assert_eq!(cleaned, "<p>Hello</p>");
    }

    #[test]
    fn removes_event_handlers_but_keeps_safe_markup() {
        let cleaned = sanitize(r#"<b onclick="steal()">bold</b>"#);
        assert_eq!(cleaned, "<b>bold</b>");
    }

    #[test]
    fn plain_text_is_unchanged() {
        for text in [
            "Just a plain paragraph about my trip",
            "Fish & chips",
            "1 < 2 and 3 > 2",
            "line one\r\nline two",
        ] {
            assert_eq!(sanitize(text), text);
        }
    }

    #[test]
    fn markup_keeps_its_entities() {
        let cleaned = sanitize("<p>A &amp; B</p><script>x()</script>");
        assert_eq!(cleaned, "<p>A &amp; B</p>");
    }

    #[test]
    fn text_sanitizing_keeps_special_characters() {
        assert_eq!(sanitize_text("Tom & Jerry say 1 < 2"), "Tom & Jerry say 1 < 2");
        assert_eq!(
            sanitize_text("<b>bold</b> &amp; <script>x()</script>done"),
            "bold & done"
        );
        assert_eq!(sanitize_text("&lt;script&gt;"), "<script>");
        assert_eq!(sanitize_text("&amp;lt;"), "&lt;");
    }

    #[test]
    fn sanitized_text_is_stable() {
        let once = sanitize_text("Tom & Jerry <i>say</i> 1 < 2");
        assert_eq!(sanitize_text(&once), once);
    }

    #[test]
    fn excerpt_strips_tags_before_truncating() {
        assert_eq!(excerpt("<p>Hello <b>there</b></p>", 100), "Hello there");
        assert_eq!(excerpt("abcdef", 3), "abc...");
        assert_eq!(excerpt("<p><b>abcdef</b></p>", 3), "abc...");
        assert_eq!(excerpt("<b>Fish</b> &amp; chips", 100), "Fish & chips");
    }
}
