use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    configuration::SearchSettings,
    domain::search_result::{RawSearchResult, SearchResult},
};

const WEB_SEARCH_PATH: &str = "res/v1/web/search";

#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>>;
}

pub struct BraveSearcher {
    client: Client,
    api_key: String,
    url: Url,
}

#[derive(Serialize)]
struct WebSearchQuery<'a> {
    q: &'a str,
    source: &'a str,
    count: u32,
}

#[derive(Deserialize)]
struct WebSearchResponse {
    #[serde(default)]
    web: Option<WebResults>,
}

#[derive(Deserialize)]
struct WebResults {
    #[serde(default)]
    results: Vec<RawSearchResult>,
}

impl BraveSearcher {
    pub fn new(settings: &SearchSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build search http client")?;

        Ok(BraveSearcher {
            client,
            api_key: settings.api_key.clone(),
            url: web_search_url(&settings.base_url)?,
        })
    }
}

/// The endpoint path is appended to whatever path `base_url` already carries.
fn web_search_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)
        .with_context(|| format!("Invalid search base url: {}", base_url))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(WEB_SEARCH_PATH)
        .context("Failed to build web search endpoint")
}

#[async_trait]
impl WebSearcher for BraveSearcher {
    async fn search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>> {
        log::info!("Searching for '{}' (count {})", query, count);

        let response = self
            .client
            .get(self.url.clone())
            .query(&WebSearchQuery {
                q: query,
                source: "web",
                count,
            })
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .send()
            .await
            .with_context(|| format!("Search request failed for query: {}", query))?
            .error_for_status()
            .with_context(|| format!("Search returned an error status for query: {}", query))?;

        let body: WebSearchResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse search response for query: {}", query))?;

        let raw_results = body.web.map(|web| web.results).unwrap_or_default();
        let total = raw_results.len();

        let results: Vec<SearchResult> = raw_results
            .into_iter()
            .filter_map(SearchResult::from_raw)
            .collect();

        log::info!(
            "Found {} results for '{}' ({} without url or title)",
            results.len(),
            query,
            total - results.len()
        );

        Ok(results)
    }
}
