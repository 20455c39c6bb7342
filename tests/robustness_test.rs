use rs_linkpreview::{extract, Metadata};
use std::time::{Duration, Instant};

const URI: &str = "https://example.com/";

fn assert_invariants(metadata: &Metadata) {
    assert_eq!(metadata.title, metadata.title.trim());
    assert_eq!(metadata.description, metadata.description.trim());
    assert_eq!(metadata.content, metadata.content.trim());
    assert!(metadata.images.iter().all(|image| !image.is_empty()));
    assert!(metadata.keywords.iter().all(|keyword| !keyword.is_empty()));
    assert!(metadata.open_graph_tags.iter().all(|tag| tag.key.starts_with("og:")));
}

#[test]
fn extract_handles_malformed_html_unclosed_tags() {
    let metadata = extract(URI, "<p>text<div>more");
    assert_invariants(&metadata);
    assert_eq!(metadata.content, "textmore");
}

#[test]
fn extract_handles_malformed_html_invalid_nesting() {
    let metadata = extract(URI, "<p><div></p></div>");
    assert_invariants(&metadata);
    assert_eq!(metadata.content, "");
}

#[test]
fn extract_handles_malformed_html_broken_attributes() {
    let metadata = extract(URI, "<div class=\"test id=broken>");
    assert_invariants(&metadata);
}

#[test]
fn extract_handles_incomplete_entities() {
    let metadata = extract(URI, "&amp text &lt;");
    assert_invariants(&metadata);
    assert!(metadata.content.contains("text"));
}

#[test]
fn extract_returns_empty_fields_for_empty_string() {
    let metadata = extract(URI, "");
    assert_invariants(&metadata);
    assert!(metadata.title.is_empty());
    assert!(metadata.description.is_empty());
    assert!(metadata.content.is_empty());
    assert_eq!(metadata.url, URI);
}

#[test]
fn extract_returns_empty_fields_for_whitespace_only_input() {
    let metadata = extract(URI, "   \n\t  ");
    assert_invariants(&metadata);
    assert!(metadata.content.is_empty());
    assert_eq!(metadata.raw, "   \n\t  ");
}

#[test]
fn extract_returns_empty_fields_for_minimal_html() {
    for html in ["<html></html>", "<body></body>", "<head></head>"] {
        let metadata = extract(URI, html);
        assert_invariants(&metadata);
        assert!(metadata.content.is_empty(), "content not empty for {html:?}");
        assert!(metadata.description.is_empty(), "description not empty for {html:?}");
    }
}

#[test]
fn extract_handles_meta_without_attributes() {
    let html = r#"<html><head><meta><meta property><meta name="keywords"></head></html>"#;
    let metadata = extract(URI, html);
    assert_invariants(&metadata);
    assert!(metadata.keywords.is_empty());
    assert!(metadata.open_graph_tags.is_empty());
}

#[test]
fn extract_handles_large_html_without_panic() {
    let target_size = 2 * 1024 * 1024;
    let chunk = "<div><p>Some repeated <em>content</em> for stress testing.</p></div>";
    let mut html = String::with_capacity(target_size + 128);
    html.push_str("<html><body><article>");
    while html.len() < target_size {
        html.push_str(chunk);
    }
    html.push_str("</article></body></html>");

    let start = Instant::now();
    let metadata = extract(URI, &html);
    let elapsed = start.elapsed();

    assert_invariants(&metadata);
    assert_eq!(metadata.description.chars().count(), 300);
    assert!(elapsed < Duration::from_secs(30), "large HTML extraction took {elapsed:?}");
}

#[test]
fn extract_skips_script_tags() {
    let html = r#"<html><body>
        <script>alert('xss')</script>
        <article><p>Safe content here</p></article>
    </body></html>"#;

    let metadata = extract(URI, html);
    assert!(!metadata.content.contains("alert"));
    assert!(!metadata.description.contains("xss"));
    assert_eq!(metadata.content, "Safe content here");
}

#[test]
fn extract_handles_null_bytes_gracefully() {
    let metadata = extract(URI, "text\x00more");
    assert_invariants(&metadata);
}
