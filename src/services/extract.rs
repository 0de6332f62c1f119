// src/services/extract.rs

//! Source code extraction from submission detail pages.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};

/// Extracts code blocks from detail page HTML with a CSS selector.
pub struct CodeExtractor {
    selector: Selector,
    selector_str: String,
}

impl CodeExtractor {
    /// Create an extractor for the given CSS selector.
    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self {
            selector: Self::parse_selector(selector)?,
            selector_str: selector.to_string(),
        })
    }

    pub fn selector(&self) -> &str {
        &self.selector_str
    }

    /// Text of every matching element, verbatim, in document order.
    ///
    /// Empty blocks are logged and dropped, so an empty result means no
    /// code was found on the page.
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut blocks = Vec::new();

        for element in document.select(&self.selector) {
            let code: String = element.text().collect();
            if code.is_empty() {
                log::warn!("Empty code block for selector '{}'", self.selector_str);
                continue;
            }
            blocks.push(code);
        }
        blocks
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="col-sm-12">
<pre id="submission-code" class="prettyprint linenums">#include &lt;iostream&gt;
int main() {
    std::cout &lt;&lt; 42 &lt;&lt; std::endl;
}
</pre>
</div>
</body></html>"#;

    #[test]
    fn test_parse_selector_valid() {
        assert!(CodeExtractor::new("#submission-code").is_ok());
        assert!(CodeExtractor::new(".linenums").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(CodeExtractor::new("[[invalid").is_err());
    }

    #[test]
    fn test_extract_verbatim_text() {
        let extractor = CodeExtractor::new("#submission-code").unwrap();
        let blocks = extractor.extract(DETAIL_PAGE);
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0],
            "#include <iostream>\nint main() {\n    std::cout << 42 << std::endl;\n}\n"
        );
    }

    #[test]
    fn test_extract_legacy_class_selector() {
        let extractor = CodeExtractor::new(".linenums").unwrap();
        assert_eq!(extractor.extract(DETAIL_PAGE).len(), 1);
    }

    #[test]
    fn test_extract_no_match() {
        let extractor = CodeExtractor::new("#submission-code").unwrap();
        assert!(extractor.extract("<html><body><p>Sign in</p></body></html>").is_empty());
    }

    #[test]
    fn test_extract_skips_empty_blocks() {
        let extractor = CodeExtractor::new(".linenums").unwrap();
        let html = r#"<pre class="linenums"></pre><pre class="linenums">print(1)</pre>"#;
        assert_eq!(extractor.extract(html), vec!["print(1)".to_string()]);
    }

    #[test]
    fn test_extract_multiple_blocks() {
        let extractor = CodeExtractor::new(".linenums").unwrap();
        let html = r#"<pre class="linenums">a</pre><pre class="linenums">b</pre>"#;
        assert_eq!(extractor.extract(html), vec!["a".to_string(), "b".to_string()]);
    }
}
