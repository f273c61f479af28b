use corpus_logging::corpus_debug;
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use wikicorpus_core::UNKNOWN_TITLE;

use crate::discover::DEFAULT_CONTENT_SELECTOR;
use crate::types::{compile_selector, SelectorError};

pub const DEFAULT_TITLE_SELECTOR: &str = "h1#firstHeading";

/// Subtrees dropped before text is collected.
pub const DEFAULT_STRIP_SELECTORS: &[&str] =
    &["script", "style", "noscript", "aside", "nav", "#toc", ".toc"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    /// Empty when the page has no content container or no text in it.
    pub content: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedPage;
}

#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    pub content_selector: String,
    pub title_selector: String,
    pub strip_selectors: Vec<String>,
    pub placeholder_title: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            title_selector: DEFAULT_TITLE_SELECTOR.to_string(),
            strip_selectors: DEFAULT_STRIP_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            placeholder_title: UNKNOWN_TITLE.to_string(),
        }
    }
}

/// Pulls the heading and the readable body text out of a MediaWiki article page.
#[derive(Debug, Clone)]
pub struct MediaWikiExtractor {
    content: Selector,
    title: Selector,
    strip: Vec<Selector>,
    placeholder_title: String,
}

impl MediaWikiExtractor {
    pub fn new(settings: ExtractionSettings) -> Result<Self, SelectorError> {
        let strip = settings
            .strip_selectors
            .iter()
            .map(|s| compile_selector(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            content: compile_selector(&settings.content_selector)?,
            title: compile_selector(&settings.title_selector)?,
            strip,
            placeholder_title: settings.placeholder_title,
        })
    }

    /// Text of the primary heading, or the placeholder title.
    pub fn title(&self, document: &Html) -> String {
        let title = document
            .select(&self.title)
            .next()
            .map(|heading| collapse_whitespace(&heading.text().collect::<String>()))
            .filter(|title| !title.is_empty());
        match title {
            Some(title) => title,
            None => {
                corpus_debug!("No title heading; using {:?}", self.placeholder_title);
                self.placeholder_title.clone()
            }
        }
    }

    /// Newline-joined text segments of the content container.
    pub fn content(&self, document: &Html) -> String {
        let Some(container) = document.select(&self.content).next() else {
            corpus_debug!("No content container; page yields no text");
            return String::new();
        };
        let mut flattener = TextFlattener::new(&self.strip);
        flattener.visit_children(container);
        flattener.finish()
    }
}

impl Default for MediaWikiExtractor {
    fn default() -> Self {
        Self::new(ExtractionSettings::default()).expect("default selectors are valid")
    }
}

impl Extractor for MediaWikiExtractor {
    fn extract(&self, html: &str) -> ExtractedPage {
        let document = Html::parse_document(html);
        ExtractedPage {
            title: self.title(&document),
            content: self.content(&document),
        }
    }
}

/// Collects text into segments, starting a new segment at every block boundary.
///
/// Segments are trimmed at both ends; whitespace inside a segment is kept.
struct TextFlattener<'s> {
    strip: &'s [Selector],
    segments: Vec<String>,
    current: String,
}

impl<'s> TextFlattener<'s> {
    fn new(strip: &'s [Selector]) -> Self {
        Self {
            strip,
            segments: Vec::new(),
            current: String::new(),
        }
    }

    fn visit_node(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Text(text) => self.current.push_str(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.visit_element(element);
                }
            }
            _ => {}
        }
    }

    fn visit_element(&mut self, element: ElementRef) {
        if self.strip.iter().any(|sel| sel.matches(&element)) {
            return;
        }
        let block = is_block(element.value().name());
        if block {
            self.break_segment();
        }
        self.visit_children(element);
        if block {
            self.break_segment();
        }
    }

    fn visit_children(&mut self, element: ElementRef) {
        for child in element.children() {
            self.visit_node(child);
        }
    }

    fn break_segment(&mut self) {
        let segment = self.current.trim();
        if !segment.is_empty() {
            self.segments.push(segment.to_string());
        }
        self.current.clear();
    }

    fn finish(mut self) -> String {
        self.break_segment();
        self.segments.join("\n")
    }
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "p" | "div"
            | "section"
            | "article"
            | "header"
            | "footer"
            | "blockquote"
            | "pre"
            | "ul"
            | "ol"
            | "li"
            | "dl"
            | "dt"
            | "dd"
            | "table"
            | "caption"
            | "tr"
            | "td"
            | "th"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "br"
            | "hr"
            | "figure"
            | "figcaption"
            | "address"
    )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
