//! Edge case integration tests
//!
//! Tests for unusual shapes of input: very deep nesting, very wide documents,
//! and markup that the sanitizer has to take apart piece by piece.

use std::time::{Duration, Instant};

use rs_linkpreview::sanitize::sanitize;
use rs_linkpreview::{extract, extract_with_options, FixedLanguage, Metadata, Options};

const URI: &str = "https://example.com/edge";

fn extract_fixed(html: &str) -> Metadata {
    rs_linkpreview::Extractor::with_collaborators(
        Options::default(),
        std::sync::Arc::new(NoFetch),
        std::sync::Arc::new(FixedLanguage::new("en")),
    )
    .extract(URI, html)
}

struct NoFetch;

#[async_trait::async_trait]
impl rs_linkpreview::Fetcher for NoFetch {
    async fn fetch(&self, uri: &url::Url) -> Result<String, rs_linkpreview::FetchError> {
        Err(rs_linkpreview::FetchError::Status(404, uri.to_string()))
    }

    fn fetch_blocking(&self, uri: &url::Url) -> Result<String, rs_linkpreview::FetchError> {
        Err(rs_linkpreview::FetchError::Status(404, uri.to_string()))
    }
}

#[test]
fn test_deeply_nested_whitelisted_tags() {
    let html = "<em>".repeat(200_000) + "x";

    let content = sanitize(&html);
    assert!(content.starts_with("<em><em>"));
    assert!(content.ends_with("x</em></em>"));
    assert_eq!(content.matches("<em>").count(), content.matches("</em>").count());
}

#[test]
fn test_deeply_nested_whitelisted_tags_through_extract() {
    let html = format!(
        "<html><body><p>{}deep</p></body></html>",
        "<strong>".repeat(100_000)
    );

    let metadata = extract_fixed(&html);
    assert!(metadata.content.starts_with("<strong>"));
    assert!(metadata.content.contains("deep"));
    assert_eq!(metadata.description, "deep");
}

#[test]
fn test_deeply_nested_wrappers_are_flattened() {
    let depth = 20_000;
    let html = format!("{}inner{}", "<span>".repeat(depth), "</span>".repeat(depth));
    assert_eq!(sanitize(&html), "inner");
}

#[test]
fn test_wide_document_flattens_quickly() {
    let n = 40_000;
    let mut html = String::from("<html><body>");
    for i in 0..n {
        html.push_str(&format!("<p>{i}</p>"));
    }
    html.push_str("</body></html>");

    let start = Instant::now();
    let content = sanitize(&html);
    let elapsed = start.elapsed();

    let expected: String = (0..n).map(|i| i.to_string()).collect();
    assert_eq!(content, expected);
    assert!(elapsed < Duration::from_secs(10), "flattening {n} siblings took {elapsed:?}");
}

#[test]
fn test_wide_document_keeps_whitelisted_siblings_in_order() {
    let mut html = String::from("<div>");
    for i in 0..5_000 {
        html.push_str(&format!("<p><i>{i}</i></p>"));
    }
    html.push_str("</div>");

    let content = sanitize(&html);
    assert!(content.starts_with("<i>0</i><i>1</i><i>2</i>"));
    assert!(content.ends_with("<i>4998</i><i>4999</i>"));
}

#[test]
fn test_mixed_depth_and_width() {
    let mut html = String::from("<body>");
    for i in 0..1_000 {
        html.push_str(&format!("<div><section><u>{i}</u></section></div>"));
    }
    html.push_str("</body>");

    let metadata = extract(URI, &html);
    assert!(metadata.content.starts_with("<u>0</u><u>1</u>"));
    assert_eq!(metadata.content.matches("<u>").count(), 1_000);
}

#[test]
fn test_empty_og_image_falls_back_to_default() {
    let options = Options {
        default_image: Some("https://example.com/fallback.png".to_string()),
        ..Options::default()
    };
    let html = r#"<html><head><meta property="og:image" content="   "></head></html>"#;

    assert_eq!(
        extract_with_options(URI, html, &options).images,
        vec!["https://example.com/fallback.png"]
    );
}
