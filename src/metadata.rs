//! HTML metadata extraction: basic title/description, and (when enabled)
//! rich structured-data fields.
//!
//! Grounded on `original_source/src/docpull/pipeline/steps/metadata.py`'s
//! `MetadataStep` (title/description fallback chain) and
//! `original_source/src/docpull/metadata_extractor.py`'s
//! `RichMetadataExtractor` (Open Graph + JSON-LD + microdata). The Python
//! original delegates structured-data parsing to `extruct`; this
//! reimplements the Open Graph and JSON-LD passes directly over
//! `scraper`/`ego-tree` selectors, since `extruct` has no Rust equivalent in
//! the pack. Microdata (`itemprop` walking) is not reimplemented: it is the
//! least-used of the three syntaxes in the original and duplicates most of
//! the JSON-LD field set once a page provides either.

use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageMetadata {
    pub description: Option<String>,
    pub canonical_url: Option<String>,
    pub author: Option<String>,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub section: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub site_name: Option<String>,
    pub keywords: Vec<String>,
    pub page_type: Option<String>,
}

impl PageMetadata {
    /// Flatten into a string map suitable for frontmatter/JSON-sink output,
    /// dropping empty fields.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        let mut put = |key: &str, value: Option<&String>| {
            if let Some(v) = value {
                if !v.is_empty() {
                    map.insert(key.to_string(), v.clone());
                }
            }
        };
        put("description", self.description.as_ref());
        put("canonical_url", self.canonical_url.as_ref());
        put("author", self.author.as_ref());
        put("published_time", self.published_time.as_ref());
        put("modified_time", self.modified_time.as_ref());
        put("section", self.section.as_ref());
        put("image", self.image.as_ref());
        put("site_name", self.site_name.as_ref());
        put("type", self.page_type.as_ref());
        if !self.tags.is_empty() {
            map.insert("tags".to_string(), self.tags.join(", "));
        }
        if !self.keywords.is_empty() {
            map.insert("keywords".to_string(), self.keywords.join(", "));
        }
        map
    }
}

/// Title fallback chain: `og:title` meta tag, then `<title>`, then the
/// first `<h1>`'s text content.
#[must_use]
pub fn extract_title(document: &Html) -> Option<String> {
    if let Some(content) = meta_property(document, "og:title") {
        return Some(content);
    }
    if let Ok(selector) = Selector::parse("title") {
        if let Some(el) = document.select(&selector).next() {
            let text = el.text().collect::<String>();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    if let Ok(selector) = Selector::parse("h1") {
        if let Some(el) = document.select(&selector).next() {
            let text = el.text().collect::<String>();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// Description fallback chain: `og:description`, then `meta[name=description]`.
#[must_use]
pub fn extract_description(document: &Html) -> Option<String> {
    meta_property(document, "og:description").or_else(|| meta_name(document, "description"))
}

/// Extract Open Graph and JSON-LD structured data, non-fatal on malformed
/// input (an empty/partial result is returned instead of an error).
#[must_use]
pub fn extract_rich(document: &Html) -> PageMetadata {
    let mut meta = PageMetadata::default();

    meta.description = extract_description(document);
    meta.canonical_url = meta_property(document, "og:url");
    meta.image = meta_property(document, "og:image");
    meta.page_type = meta_property(document, "og:type");
    meta.site_name = meta_property(document, "og:site_name");
    meta.author = meta_property(document, "article:author");
    meta.published_time = meta_property(document, "article:published_time");
    meta.modified_time = meta_property(document, "article:modified_time");
    meta.section = meta_property(document, "article:section");
    if let Some(tag) = meta_property(document, "article:tag") {
        meta.tags.push(tag);
    }
    if let Some(keywords) = meta_name(document, "keywords") {
        meta.keywords = keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();
    }

    merge_json_ld(document, &mut meta);
    meta
}

fn meta_property(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{property}"]"#)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn meta_name(document: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn merge_json_ld(document: &Html, meta: &mut PageMetadata) {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return;
    };
    for el in document.select(&selector) {
        let text = el.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
            continue;
        };
        apply_json_ld(&value, meta);
    }
}

fn apply_json_ld(value: &serde_json::Value, meta: &mut PageMetadata) {
    if let Some(items) = value.as_array() {
        for item in items {
            apply_json_ld(item, meta);
        }
        return;
    }
    let Some(obj) = value.as_object() else { return };

    if meta.description.is_none() {
        if let Some(desc) = obj.get("description").and_then(|v| v.as_str()) {
            meta.description = Some(desc.trim().to_string());
        }
    }
    if meta.author.is_none() {
        meta.author = match obj.get("author") {
            Some(serde_json::Value::String(s)) => Some(s.trim().to_string()),
            Some(serde_json::Value::Object(a)) => {
                a.get("name").and_then(|v| v.as_str()).map(|s| s.trim().to_string())
            }
            _ => None,
        };
    }
    if meta.published_time.is_none() {
        if let Some(v) = obj.get("datePublished").and_then(|v| v.as_str()) {
            meta.published_time = Some(v.to_string());
        }
    }
    if meta.modified_time.is_none() {
        if let Some(v) = obj.get("dateModified").and_then(|v| v.as_str()) {
            meta.modified_time = Some(v.to_string());
        }
    }
    if meta.image.is_none() {
        meta.image = match obj.get("image") {
            Some(serde_json::Value::String(s)) => Some(s.to_string()),
            Some(serde_json::Value::Object(i)) => {
                i.get("url").and_then(|v| v.as_str()).map(str::to_string)
            }
            _ => None,
        };
    }
    if meta.keywords.is_empty() {
        match obj.get("keywords") {
            Some(serde_json::Value::String(s)) => {
                meta.keywords = s
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            Some(serde_json::Value::Array(arr)) => {
                meta.keywords = arr
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prefers_og_title_over_title_tag() {
        let html = r#"<html><head>
            <meta property="og:title" content="OG Title">
            <title>HTML Title</title>
        </head></html>"#;
        let doc = Html::parse_document(html);
        assert_eq!(extract_title(&doc), Some("OG Title".to_string()));
    }

    #[test]
    fn title_falls_back_to_title_tag_then_h1() {
        let doc = Html::parse_document("<html><head><title>Page</title></head></html>");
        assert_eq!(extract_title(&doc), Some("Page".to_string()));

        let doc = Html::parse_document("<html><body><h1>Heading</h1></body></html>");
        assert_eq!(extract_title(&doc), Some("Heading".to_string()));

        let doc = Html::parse_document("<html><body></body></html>");
        assert_eq!(extract_title(&doc), None);
    }

    #[test]
    fn description_prefers_og_over_meta_name() {
        let html = r#"<html><head>
            <meta property="og:description" content="OG desc">
            <meta name="description" content="Meta desc">
        </head></html>"#;
        let doc = Html::parse_document(html);
        assert_eq!(extract_description(&doc), Some("OG desc".to_string()));
    }

    #[test]
    fn rich_extracts_open_graph_fields() {
        let html = r#"<html><head>
            <meta property="og:image" content="https://example.com/img.png">
            <meta property="og:site_name" content="Example Docs">
            <meta property="article:author" content="Jane Doe">
        </head></html>"#;
        let doc = Html::parse_document(html);
        let meta = extract_rich(&doc);
        assert_eq!(meta.image.as_deref(), Some("https://example.com/img.png"));
        assert_eq!(meta.site_name.as_deref(), Some("Example Docs"));
        assert_eq!(meta.author.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn rich_merges_json_ld_without_overwriting_open_graph() {
        let html = r#"<html><head>
            <meta property="og:description" content="OG desc">
            <script type="application/ld+json">
            {"@type": "Article", "author": {"name": "JSON-LD Author"}, "datePublished": "2024-01-01"}
            </script>
        </head></html>"#;
        let doc = Html::parse_document(html);
        let meta = extract_rich(&doc);
        assert_eq!(meta.description.as_deref(), Some("OG desc"));
        assert_eq!(meta.author.as_deref(), Some("JSON-LD Author"));
        assert_eq!(meta.published_time.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn rich_is_non_fatal_on_malformed_json_ld() {
        let html = r#"<html><head>
            <script type="application/ld+json">{not valid json</script>
        </head></html>"#;
        let doc = Html::parse_document(html);
        let meta = extract_rich(&doc);
        assert!(meta.author.is_none());
    }

    #[test]
    fn to_map_drops_empty_fields() {
        let mut meta = PageMetadata::default();
        meta.author = Some("Jane".to_string());
        let map = meta.to_map();
        assert_eq!(map.get("author"), Some(&"Jane".to_string()));
        assert!(!map.contains_key("description"));
    }
}
