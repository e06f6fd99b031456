//! End-to-end runs of the ingestion pipeline against in-memory fetchers and
//! a temporary corpus directory.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use knowledge_bot::error::{AppError, Result};
use knowledge_bot::models::Config;
use knowledge_bot::pipeline::{self, Pipeline, UrlOutcome};
use knowledge_bot::services::SearchProvider;
use knowledge_bot::storage::{CorpusStore, INDEX_FILE, LocalStorage, WriteReceipt};
use knowledge_bot::utils::http::PageFetcher;

const ARKTS_PAGE: &str = r#"
<html>
  <head><title>ignored</title><script>var tracking = 1;</script></head>
  <body>
    <h1>ArkTS State Management</h1>
    <p>HarmonyOS uses decorators to bind component state to the UI.</p>
    <p>The @State decorator marks data owned by a component and triggers a rebuild on change.</p>
    <pre>@Entry
@Component
struct Index {
  @State message: string = 'Hello'
}</pre>
  </body>
</html>
"#;

const THIN_PAGE: &str = "<html><body><p>Nothing much here.</p></body></html>";

fn page_with_title(title: &str) -> String {
    ARKTS_PAGE.replace("ArkTS State Management", title)
}

/// Serves canned HTML by URL; unknown URLs fail.
struct StubFetcher {
    pages: HashMap<String, String>,
}

impl StubFetcher {
    fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::fetch(url, "connection refused"))
    }
}

/// Returns the same candidate list for every topic.
struct StubSearch {
    results: Vec<String>,
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, _topic: &str) -> Result<Vec<String>> {
        Ok(self.results.clone())
    }
}

/// Empty corpus that refuses every write.
struct ReadOnlyStore;

#[async_trait]
impl CorpusStore for ReadOnlyStore {
    async fn list_documents(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn read_document(&self, name: &str) -> Result<String> {
        Err(AppError::validation(format!("no document {name}")))
    }

    async fn write_document(&self, name: &str, _contents: &str) -> Result<WriteReceipt> {
        Err(AppError::write(std::path::Path::new(name), "read-only corpus"))
    }
}

fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.output_dir = dir.path().to_path_buf();
    config.crawl_settings.delay_range = (0.0, 0.0);
    config.quality_settings.min_content_length = 50;
    config.quality_settings.min_code_lines = 5;
    config
}

#[tokio::test]
async fn test_crawl_writes_document_and_index() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StubFetcher::new(&[("https://example.com/state", ARKTS_PAGE.to_string())]);
    let storage = LocalStorage::new(dir.path());
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let report = pipeline::run_crawl(&pipeline, "https://example.com/state").await;

    let path = report.outcome.written_path().expect("document written").clone();
    assert_eq!(report.stats.found, 1);
    assert_eq!(report.stats.valid, 1);
    assert_eq!(report.stats.new_docs, 1);
    assert_eq!(report.stats.code_samples, 1);

    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.ends_with("-arkts-state-management.md"));

    let markdown = std::fs::read_to_string(&path).unwrap();
    assert!(markdown.starts_with("# ArkTS State Management\n"));
    assert!(markdown.contains("https://example.com/state"));
    assert!(markdown.contains("```typescript"));
    assert!(!markdown.contains("tracking"));

    let index = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
    assert!(index.contains(&format!("[ArkTS State Management](./{file_name})")));
}

#[tokio::test]
async fn test_low_quality_page_is_not_written() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StubFetcher::new(&[("https://example.com/thin", THIN_PAGE.to_string())]);
    let storage = LocalStorage::new(dir.path());
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let report = pipeline::run_crawl(&pipeline, "https://example.com/thin").await;

    assert!(matches!(report.outcome, UrlOutcome::LowQuality { score } if score < 0.6));
    assert_eq!(report.stats.found, 1);
    assert_eq!(report.stats.low_quality, 1);
    assert_eq!(report.stats.new_docs, 0);
    assert!(storage.list_documents().await.unwrap().is_empty());
    assert!(!dir.path().join(INDEX_FILE).exists());
}

#[tokio::test]
async fn test_second_crawl_of_same_page_is_duplicate() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StubFetcher::new(&[("https://example.com/state", ARKTS_PAGE.to_string())]);
    let storage = LocalStorage::new(dir.path());
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let first = pipeline::run_crawl(&pipeline, "https://example.com/state").await;
    let second = pipeline::run_crawl(&pipeline, "https://example.com/state").await;

    assert_eq!(first.stats.new_docs, 1);
    assert!(matches!(second.outcome, UrlOutcome::Duplicate { .. }));
    assert_eq!(second.stats.duplicated, 1);
    assert_eq!(second.stats.valid, 0);
    assert_eq!(storage.list_documents().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_fetch_failure_counts_nothing_found() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StubFetcher::new(&[]);
    let storage = LocalStorage::new(dir.path());
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let report = pipeline::run_crawl(&pipeline, "https://example.com/missing").await;

    assert!(matches!(report.outcome, UrlOutcome::FetchFailed { .. }));
    assert_eq!(report.stats.found, 0);
    assert_eq!(report.stats.fetch_failures, 1);
    assert!(!dir.path().exists() || storage.list_documents().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_mode_counts_topics_without_following() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.search_topics = vec!["ArkTS".to_string(), "ArkUI".to_string()];
    let fetcher = StubFetcher::new(&[("https://example.com/state", ARKTS_PAGE.to_string())]);
    let storage = LocalStorage::new(dir.path());
    let search = StubSearch {
        results: vec!["https://example.com/state".to_string()],
    };
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let stats = pipeline::run_search(&pipeline, &search, None).await;

    assert_eq!(stats.searched, 2);
    assert_eq!(stats.found, 0);
    assert_eq!(stats.new_docs, 0);
}

#[tokio::test]
async fn test_search_mode_single_topic() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StubFetcher::new(&[]);
    let storage = LocalStorage::new(dir.path());
    let search = StubSearch { results: vec![] };
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let stats = pipeline::run_search(&pipeline, &search, Some("分布式数据")).await;

    assert_eq!(stats.searched, 1);
}

#[tokio::test]
async fn test_auto_mode_stops_at_document_cap() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.search_settings.follow_results = true;
    config.output_settings.max_documents_per_run = 2;
    config.search_topics = vec!["ArkTS".to_string(), "ArkUI".to_string()];

    let urls: Vec<String> = (1..=3).map(|n| format!("https://example.com/doc{n}")).collect();
    let pages: Vec<(&str, String)> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| (url.as_str(), page_with_title(&format!("Guide number {}", i + 1))))
        .collect();
    let fetcher = StubFetcher::new(&pages);
    let storage = LocalStorage::new(dir.path());
    let search = StubSearch {
        results: urls.clone(),
    };
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let stats = pipeline::run_auto(&pipeline, &search).await;

    assert_eq!(stats.searched, 1);
    assert_eq!(stats.new_docs, 2);
    assert_eq!(storage.list_documents().await.unwrap().len(), 2);
    assert!(dir.path().join(INDEX_FILE).exists());
}

#[tokio::test]
async fn test_auto_mode_without_following_only_updates_index() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.search_topics = vec!["ArkTS".to_string(), "ArkUI".to_string(), "Stage".to_string()];
    let fetcher = StubFetcher::new(&[]);
    let storage = LocalStorage::new(dir.path());
    let search = StubSearch {
        results: vec!["https://example.com/a".to_string()],
    };
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let stats = pipeline::run_auto(&pipeline, &search).await;

    assert_eq!(stats.searched, 3);
    assert_eq!(stats.found, 0);
    let index = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
    assert!(index.starts_with("# Knowledge Index"));
}

#[tokio::test]
async fn test_corpus_path_that_is_a_file_is_unavailable() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "plain file").unwrap();

    let mut config = test_config(&dir);
    config.output_dir = blocker.clone();
    let fetcher = StubFetcher::new(&[("https://example.com/state", ARKTS_PAGE.to_string())]);
    let storage = LocalStorage::new(&blocker);
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let report = pipeline::run_crawl(&pipeline, "https://example.com/state").await;

    assert!(matches!(report.outcome, UrlOutcome::CorpusUnavailable { .. }));
    assert_eq!(report.stats.found, 1);
    assert_eq!(report.stats.scan_failures, 1);
    assert_eq!(report.stats.write_failures, 0);
    assert_eq!(report.stats.new_docs, 0);
    assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "plain file");
}

#[tokio::test]
async fn test_failed_write_is_reported_and_counted() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let fetcher = StubFetcher::new(&[("https://example.com/state", ARKTS_PAGE.to_string())]);
    let pipeline = Pipeline::new(&config, &fetcher, &ReadOnlyStore);

    let report = pipeline::run_crawl(&pipeline, "https://example.com/state").await;

    assert!(matches!(report.outcome, UrlOutcome::WriteFailed { .. }));
    assert_eq!(report.stats.valid, 1);
    assert_eq!(report.stats.write_failures, 1);
    assert_eq!(report.stats.new_docs, 0);
}

#[tokio::test]
async fn test_failed_url_does_not_stop_the_topic() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.search_settings.follow_results = true;
    config.search_topics = vec!["ArkTS".to_string()];

    let fetcher = StubFetcher::new(&[
        ("https://example.com/good1", page_with_title("Layout basics")),
        ("https://example.com/good2", page_with_title("Animation basics")),
    ]);
    let storage = LocalStorage::new(dir.path());
    let search = StubSearch {
        results: vec![
            "https://example.com/bad".to_string(),
            "https://example.com/good1".to_string(),
            "https://example.com/good2".to_string(),
        ],
    };
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let stats = pipeline::run_search(&pipeline, &search, None).await;

    assert_eq!(stats.fetch_failures, 1);
    assert_eq!(stats.found, 2);
    assert_eq!(stats.new_docs, 2);
    assert_eq!(storage.list_documents().await.unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_search_pauses_only_between_topics() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.crawl_settings.delay_range = (2.0, 2.0);
    config.search_topics = vec!["ArkTS".to_string(), "ArkUI".to_string(), "Stage".to_string()];
    let fetcher = StubFetcher::new(&[]);
    let storage = LocalStorage::new(dir.path());
    let search = StubSearch { results: vec![] };
    let pipeline = Pipeline::new(&config, &fetcher, &storage);

    let start = tokio::time::Instant::now();
    let stats = pipeline::run_search(&pipeline, &search, None).await;
    let elapsed = start.elapsed();

    assert_eq!(stats.searched, 3);
    assert!(elapsed >= Duration::from_secs(4), "paused {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "paused {elapsed:?}");

    let start = tokio::time::Instant::now();
    pipeline::run_search(&pipeline, &search, Some("ArkTS")).await;
    assert!(start.elapsed() < Duration::from_secs(1));
}
