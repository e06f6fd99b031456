//! Topic search providers.
//!
//! A provider turns a topic into candidate page URLs. The bundled
//! [`SiteQuerySearch`] only plans the per-site engine queries; result pages
//! are not parsed, so it never yields candidates.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::models::SearchSettings;

/// Source of candidate URLs for a topic.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Candidate URLs for `topic`, best first. May be empty.
    async fn search(&self, topic: &str) -> Result<Vec<String>>;
}

/// Builds one site-restricted engine query per configured site.
#[derive(Debug, Clone)]
pub struct SiteQuerySearch {
    engine_url: String,
    sites: Vec<String>,
}

impl SiteQuerySearch {
    pub fn new(settings: &SearchSettings) -> Self {
        Self {
            engine_url: settings.engine_url.clone(),
            sites: settings.sites.clone(),
        }
    }

    /// Engine query URLs for `topic`, one per site.
    pub fn queries(&self, topic: &str) -> Result<Vec<Url>> {
        self.sites
            .iter()
            .map(|site| {
                let query = format!("{topic} site:{site}");
                Ok(Url::parse_with_params(&self.engine_url, &[("q", query)])?)
            })
            .collect()
    }
}

#[async_trait]
impl SearchProvider for SiteQuerySearch {
    async fn search(&self, topic: &str) -> Result<Vec<String>> {
        for query in self.queries(topic)? {
            log::info!("Planned search query: {}", query);
        }
        Ok(Vec::new())
    }
}
