use std::collections::BTreeSet;

use corpus_logging::corpus_warn;
use scraper::{ElementRef, Html, Selector};
use url::Url;
use wikicorpus_core::normalize_url;

use crate::types::{compile_selector, SelectorError};

/// Region of a MediaWiki page holding the rendered article or listing.
pub const DEFAULT_CONTENT_SELECTOR: &str = "div#mw-content-text";

/// Href fragments marking administrative namespaces and edit actions.
pub const DEFAULT_RESERVED_MARKERS: &[&str] = &[
    "Special:",
    "User:",
    "File:",
    "Talk:",
    "Category:",
    "Template:",
    "action=edit",
];

#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// Origin that candidate and next-page hrefs are resolved against.
    pub base_url: Url,
    pub content_selector: String,
    pub reserved_markers: Vec<String>,
    /// Anchor texts that mark pagination controls rather than articles.
    pub pagination_labels: Vec<String>,
    pub next_page_label: String,
}

impl DiscoverySettings {
    pub fn for_site(base_url: Url) -> Self {
        Self {
            base_url,
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            reserved_markers: DEFAULT_RESERVED_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            pagination_labels: vec!["Next page".to_string(), "Previous page".to_string()],
            next_page_label: "Next page".to_string(),
        }
    }
}

/// Links found on one index page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// Normalized absolute article URLs.
    pub candidates: BTreeSet<String>,
    pub next_page: Option<String>,
    /// False when the page had no content container.
    pub content_found: bool,
}

/// Extracts article links and the pagination link from a MediaWiki index page.
#[derive(Debug, Clone)]
pub struct LinkDiscoverer {
    settings: DiscoverySettings,
    content: Selector,
    anchors: Selector,
}

impl LinkDiscoverer {
    pub fn new(settings: DiscoverySettings) -> Result<Self, SelectorError> {
        let content = compile_selector(&settings.content_selector)?;
        let anchors = compile_selector("a")?;
        Ok(Self {
            settings,
            content,
            anchors,
        })
    }

    pub fn settings(&self) -> &DiscoverySettings {
        &self.settings
    }

    pub fn discover(&self, html: &str) -> PageLinks {
        let document = Html::parse_document(html);
        let mut links = PageLinks::default();

        match document.select(&self.content).next() {
            Some(container) => {
                links.content_found = true;
                for anchor in container.select(&self.anchors) {
                    if let Some(url) = self.candidate_url(anchor) {
                        links.candidates.insert(url);
                    }
                }
            }
            None => corpus_warn!(
                "No content container matching {:?} on index page",
                self.settings.content_selector
            ),
        }

        links.next_page = self.next_page_url(&document);
        links
    }

    fn candidate_url(&self, anchor: ElementRef) -> Option<String> {
        let href = anchor.value().attr("href")?.trim();
        let text = anchor_text(anchor);
        if text.is_empty() || self.is_pagination_label(&text) || self.is_reserved(href) {
            return None;
        }
        let resolved = resolve_href(href, &self.settings.base_url)?;
        normalize_url(resolved.as_str())
    }

    /// Full-document scan: the pagination bar sits outside the content container on some skins.
    fn next_page_url(&self, document: &Html) -> Option<String> {
        document
            .select(&self.anchors)
            .filter(|anchor| anchor_text(*anchor).contains(&self.settings.next_page_label))
            .find_map(|anchor| anchor.value().attr("href"))
            .and_then(|href| resolve_href(href, &self.settings.base_url))
            .map(String::from)
    }

    fn is_pagination_label(&self, text: &str) -> bool {
        self.settings
            .pagination_labels
            .iter()
            .any(|label| text.contains(label.as_str()))
    }

    fn is_reserved(&self, href: &str) -> bool {
        self.settings
            .reserved_markers
            .iter()
            .any(|marker| href.contains(marker.as_str()))
    }
}

fn anchor_text(anchor: ElementRef) -> String {
    anchor
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_href(reference: &str, base: &Url) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") || lower.starts_with("mailto:")
    {
        return None;
    }
    base.join(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hrefs_resolve_against_the_site_origin() {
        let base = Url::parse("https://wiki.example.org").unwrap();
        assert_eq!(
            resolve_href("/w/Main_Page", &base).unwrap().as_str(),
            "https://wiki.example.org/w/Main_Page"
        );
        assert_eq!(
            resolve_href("https://other.example.org/x", &base)
                .unwrap()
                .as_str(),
            "https://other.example.org/x"
        );
        assert!(resolve_href("#cite_note-1", &base).is_none());
        assert!(resolve_href("  ", &base).is_none());
        assert!(resolve_href("JavaScript:void(0)", &base).is_none());
    }

    #[test]
    fn anchor_text_collapses_whitespace() {
        let doc = Html::parse_fragment("<a href=\"/x\">  Next\n   page (Foo) </a>");
        let sel = Selector::parse("a").unwrap();
        let anchor = doc.select(&sel).next().unwrap();
        assert_eq!(anchor_text(anchor), "Next page (Foo)");
    }
}
