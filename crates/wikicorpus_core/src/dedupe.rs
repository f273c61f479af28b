use std::collections::BTreeSet;

use url::Url;

/// Normalize an absolute URL into the form used as the dedupe key.
///
/// Parsing canonicalizes scheme/host case, default ports and percent-encoding;
/// the fragment is dropped since it never selects a different article.
/// Returns `None` for anything that is not an absolute URL.
pub fn normalize_url(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;
    if url.cannot_be_a_base() {
        return None;
    }
    url.set_fragment(None);
    Some(url.into())
}

/// Set of discovered article URLs keyed by their normalized absolute form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredUrls {
    urls: BTreeSet<String>,
}

impl DiscoveredUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one URL. Returns `true` if it was not already present.
    /// Unparseable input is ignored and reported as not inserted.
    pub fn insert(&mut self, raw: &str) -> bool {
        match normalize_url(raw) {
            Some(normalized) => self.urls.insert(normalized),
            None => false,
        }
    }

    /// Set union; returns how many URLs were new.
    pub fn merge<I, S>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        urls.into_iter()
            .filter(|url| self.insert(url.as_ref()))
            .count()
    }

    pub fn contains(&self, raw: &str) -> bool {
        normalize_url(raw).is_some_and(|normalized| self.urls.contains(&normalized))
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls.into_iter().collect()
    }
}
