//! Model output is Markdown-ish; render it, but never pass raw HTML through.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};

const OPTIONS: Options = Options::ENABLE_TABLES.union(Options::ENABLE_STRIKETHROUGH);

/// Render Markdown to HTML. Embedded HTML is shown as text and links with
/// scripting schemes are neutralised.
pub fn to_html(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut out, Parser::new_ext(markdown, OPTIONS).map(sanitize));
    out
}

/// Render a single list item: emphasis, code and links only. Block
/// structure (paragraphs, headings, lists) is flattened into the text.
pub fn inline_to_html(markdown: &str) -> String {
    let events = Parser::new_ext(markdown, OPTIONS)
        .map(sanitize)
        .filter_map(|event| match event {
            Event::Start(tag) => is_inline(&tag).then_some(Event::Start(tag)),
            Event::End(tag) => is_inline_end(tag).then_some(Event::End(tag)),
            Event::SoftBreak | Event::HardBreak => Some(Event::Text(CowStr::Borrowed(" "))),
            Event::Rule => None,
            other => Some(other),
        });

    let mut out = String::with_capacity(markdown.len() + 16);
    pulldown_cmark::html::push_html(&mut out, events);
    out.trim().to_string()
}

fn is_inline(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. }
    )
}

fn is_inline_end(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link
    )
}

fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    }
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    match lower.split_once(':') {
        // No scheme, or the colon comes after a path/query/fragment start
        None => true,
        Some((scheme, _)) if scheme.contains(['/', '?', '#']) => true,
        Some((scheme, _)) => matches!(scheme, "http" | "https" | "mailto"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_bullets() {
        let html = to_html("# Cells\n\n- Nucleus\n- Mitochondria");
        assert!(html.contains("<h1>Cells</h1>"));
        assert!(html.contains("<li>Nucleus</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = to_html("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_are_neutralised() {
        let html = to_html("[click](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r##"href="#""##));

        let html = to_html("[docs](https://example.com/a:b)");
        assert!(html.contains("https://example.com/a:b"));
    }

    #[test]
    fn test_inline_renders_emphasis_without_paragraph() {
        assert_eq!(
            inline_to_html("**Research**: find sources"),
            "<strong>Research</strong>: find sources"
        );
        assert_eq!(inline_to_html("Plain & simple"), "Plain &amp; simple");
    }

    #[test]
    fn test_inline_flattens_blocks_and_escapes_html() {
        let html = inline_to_html("# Big <b>idea</b>");
        assert!(!html.contains("<h1>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("Big"));
        assert!(html.contains("&lt;b&gt;"));
    }
}
