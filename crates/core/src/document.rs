use crate::extractor::ExtractedFields;
use crate::models::{IndexDocument, PublishTarget};
use crate::tokenizer::tokenize;
use crate::url_map::UrlMap;

/// A url map miss leaves `url` empty rather than dropping the page.
pub fn build_document(
    fields: &ExtractedFields,
    target: &PublishTarget,
    url_map: &UrlMap,
) -> IndexDocument {
    let mut tokens = Vec::new();
    for (_, span) in fields.spans() {
        tokens.extend(tokenize(span));
    }

    IndexDocument {
        url: url_map
            .resolve(&target.dir_name, &target.file_name)
            .map(str::to_string),
        title: tokenize(&fields.title),
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ExtractedFields {
        ExtractedFields {
            headings: "Cats".to_string(),
            title: "Cat".to_string(),
            bold: String::new(),
            italic: "so, very".to_string(),
            body: "Cats are great".to_string(),
            links: "--".to_string(),
        }
    }

    #[test]
    fn token_bag_is_sum_of_spans() {
        let fields = fields();
        let document = build_document(&fields, &PublishTarget::new("pages", "a.html"), &UrlMap::default());

        let expected: usize = fields.spans().iter().map(|(_, span)| tokenize(span).len()).sum();
        assert_eq!(document.tokens.len(), expected);
        assert_eq!(
            document.tokens,
            vec!["cats", "cat", "so", "very", "cats", "are", "great"]
        );
        assert_eq!(document.title, vec!["cat"]);
    }

    #[test]
    fn lookup_miss_keeps_document_with_null_url() {
        let document = build_document(&fields(), &PublishTarget::new("pages", "b.html"), &UrlMap::default());
        assert_eq!(document.url, None);
        assert!(!document.tokens.is_empty());
    }

    #[test]
    fn lookup_hit_uses_directory_and_file_name() {
        let url_map: UrlMap = [("pages/a.html".to_string(), "http://example.com/a".to_string())]
            .into_iter()
            .collect();
        let document = build_document(&fields(), &PublishTarget::new("pages", "a.html"), &url_map);
        assert_eq!(document.url.as_deref(), Some("http://example.com/a"));
    }
}
