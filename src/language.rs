//! Language detection collaborators.
//!
//! Detection never fails: when nothing can be determined the detector
//! answers with `UNDETERMINED`.

use whatlang::Lang;

use crate::dom;
use crate::tree::{NodeArena, NodeKind};

/// Language code returned when detection has nothing to go on.
pub const UNDETERMINED: &str = "und";

/// Detects the language of a raw HTML document.
pub trait LanguageDetector: Send + Sync {
    /// Language code for `html`. Must not fail on malformed input.
    fn detect(&self, html: &str) -> String;
}

/// Detector that always reports the same code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLanguage(String);

impl FixedLanguage {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }
}

impl LanguageDetector for FixedLanguage {
    fn detect(&self, _html: &str) -> String {
        self.0.clone()
    }
}

/// Default detector.
///
/// Uses the primary subtag of `<html lang>` when present, otherwise runs
/// `whatlang` over the visible document text.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, html: &str) -> String {
        let doc = dom::parse(html);

        let declared = dom::select_first(&doc, "html")
            .and_then(|root| dom::get_attribute(&root, "lang"))
            .and_then(|lang| primary_subtag(&lang));
        if let Some(lang) = declared {
            return lang;
        }

        let text = visible_text(&NodeArena::from_document(&doc));
        match whatlang::detect(&text) {
            Some(info) => iso_code(info.lang()),
            None => {
                tracing::debug!("language detection found no signal");
                UNDETERMINED.to_string()
            }
        }
    }
}

fn primary_subtag(lang: &str) -> Option<String> {
    lang.split(['-', '_'])
        .next()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Text outside `<script>`, `<style>` and `<head>`.
fn visible_text(arena: &NodeArena) -> String {
    let mut out = String::new();
    let mut stack = vec![arena.root()];
    while let Some(id) = stack.pop() {
        match arena.kind(id) {
            NodeKind::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            NodeKind::Element { name, .. }
                if matches!(name.as_str(), "script" | "style" | "head") => {}
            _ => stack.extend(arena.children(id).into_iter().rev()),
        }
    }
    out
}

/// ISO 639-1 code for common languages, ISO 639-3 otherwise.
fn iso_code(lang: Lang) -> String {
    match lang {
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Nld => "nl",
        Lang::Rus => "ru",
        Lang::Pol => "pl",
        Lang::Swe => "sv",
        Lang::Tur => "tr",
        Lang::Ara => "ar",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Cmn => "zh",
        other => other.code(),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_language() {
        assert_eq!(FixedLanguage::new("fr").detect("<p>anything</p>"), "fr");
    }

    #[test]
    fn test_html_lang_attribute_wins() {
        let detector = WhatlangDetector;
        assert_eq!(detector.detect(r#"<html lang="pt-BR"><body>Hello</body></html>"#), "pt");
        assert_eq!(detector.detect(r#"<html lang="EN_us"><body></body></html>"#), "en");
    }

    #[test]
    fn test_detects_from_text() {
        let html = "<html><head><title>x</title><script>var a = 1;</script></head><body>\
            <p>The quick brown fox jumps over the lazy dog while the farmer watches \
            from the porch and drinks his morning coffee.</p></body></html>";

        assert_eq!(WhatlangDetector.detect(html), "en");
    }

    #[test]
    fn test_undetermined_on_empty_input() {
        assert_eq!(WhatlangDetector.detect(""), UNDETERMINED);
        assert_eq!(WhatlangDetector.detect("<html lang=\"\"><body></body></html>"), UNDETERMINED);
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("de-AT").as_deref(), Some("de"));
        assert_eq!(primary_subtag("  ").as_deref(), None);
    }
}
