#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use wikicorpus_engine::{
    Engine, EngineConfig, Pacer, ReqwestFetcher,
};
use wiremock::MockServer;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(corpus_logging::initialize_for_tests);
}

/// Records requested pauses instead of sleeping.
#[derive(Default)]
pub struct RecordingPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().unwrap().push(delay);
    }
}

pub fn html_response(body: impl Into<String>) -> wiremock::ResponseTemplate {
    wiremock::ResponseTemplate::new(200).set_body_raw(body.into(), "text/html; charset=utf-8")
}

/// A MediaWiki-shaped article page.
pub fn article_html(title: &str, body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>{title} - Wiki</title></head><body>
        <div id="mw-navigation"><nav><a href="/w/Main_Page">Main page</a></nav></div>
        <div id="content"><h1 id="firstHeading">{title}</h1>
        <div id="mw-content-text">{body_html}</div></div></body></html>"#
    )
}

/// An index page listing `links` inside the content container, with an
/// optional pagination bar outside it.
pub fn index_html(links: &[(&str, &str)], next_href: Option<&str>) -> String {
    let items: String = links
        .iter()
        .map(|(href, text)| format!(r#"<li><a href="{href}">{text}</a></li>"#))
        .collect();
    let nav = next_href
        .map(|href| format!(r#"<div class="mw-allpages-nav"><a href="{href}">Next page (More)</a></div>"#))
        .unwrap_or_default();
    format!(
        r#"<html><body>{nav}<div id="mw-content-text"><ul>{items}</ul></div>{nav}</body></html>"#
    )
}

pub fn test_config(server: &MockServer, start_path: &str, output_dir: std::path::PathBuf) -> EngineConfig {
    let base = url::Url::parse(&server.uri()).unwrap();
    EngineConfig::for_site(base, format!("{}{}", server.uri(), start_path), output_dir)
}

pub fn test_engine(config: EngineConfig, pacer: Arc<RecordingPacer>) -> Engine {
    let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()).unwrap());
    Engine::with_parts(config, fetcher, pacer)
}
