// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use crate::engines::html_scanner::HtmlScanner;

    #[test]
    fn test_extract_all_fields() {
        let html = r#"<html><head>
            <title>Example Page</title>
            <link rel="canonical" href="https://example.com/page" />
            <meta name="description" content="A page about examples" />
        </head><body></body></html>"#;

        let outcome = HtmlScanner::extract(html);
        assert_eq!(
            outcome.canonical_url.as_deref(),
            Some("https://example.com/page")
        );
        assert_eq!(
            outcome.meta_tags.get("title").map(String::as_str),
            Some("Example Page")
        );
        assert_eq!(
            outcome.meta_tags.get("description").map(String::as_str),
            Some("A page about examples")
        );
    }

    #[test]
    fn test_extract_missing_fields_are_absent() {
        let html = "<html><head></head><body><p>no metadata here</p></body></html>";

        let outcome = HtmlScanner::extract(html);
        assert!(outcome.canonical_url.is_none());
        assert!(!outcome.meta_tags.contains_key("title"));
        assert!(!outcome.meta_tags.contains_key("description"));
    }

    #[test]
    fn test_extract_never_fails_on_broken_markup() {
        let outcome = HtmlScanner::extract("<<<not <html at all");
        assert!(outcome.canonical_url.is_none());
        assert!(outcome.meta_tags.is_empty());
    }
}
