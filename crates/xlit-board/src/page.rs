/// Shown when the message table is empty.
pub const NO_MESSAGES: &str = "No messages yet.";

/// Render the page body: the latest message wrapped in a heading, or the
/// fixed fallback.
pub fn render_message(content: Option<&str>) -> String {
    match content {
        Some(content) => format!("<h1>{}</h1>", escape_html(content)),
        None => NO_MESSAGES.to_string(),
    }
}

/// Minimal escaping for interpolating untrusted text into HTML.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_message_in_heading() {
        assert_eq!(render_message(Some("hello")), "<h1>hello</h1>");
    }

    #[test]
    fn empty_table_yields_fallback() {
        assert_eq!(render_message(None), NO_MESSAGES);
    }

    #[test]
    fn markup_in_content_is_escaped() {
        assert_eq!(
            render_message(Some("<script>alert(1)</script> & co")),
            "<h1>&lt;script&gt;alert(1)&lt;/script&gt; &amp; co</h1>"
        );
    }
}
