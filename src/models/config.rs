//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Language, LanguageRule};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and pacing behavior
    #[serde(default)]
    pub crawl_settings: CrawlSettings,

    /// Extraction and acceptance thresholds
    #[serde(default)]
    pub quality_settings: QualitySettings,

    /// Topical keywords contributing to the quality score
    #[serde(default = "defaults::filter_keywords")]
    pub filter_keywords: Vec<String>,

    /// Directory holding the document corpus
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,

    /// Document and index output settings
    #[serde(default)]
    pub output_settings: OutputSettings,

    /// Topics iterated by `search` and `auto` modes
    #[serde(default = "defaults::search_topics")]
    pub search_topics: Vec<String>,

    /// Search provider settings
    #[serde(default)]
    pub search_settings: SearchSettings,

    /// Summary and body formatting rules
    #[serde(default)]
    pub format_settings: FormatSettings,

    /// Ordered code language rules, first match wins
    #[serde(default = "defaults::language_rules")]
    pub language_rules: Vec<LanguageRule>,
}

impl Config {
    /// Load configuration from a TOML file, or JSON when the extension is `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Load and validate configuration. Any failure here is fatal for a run.
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::load(path).map_err(|e| {
            AppError::config(format!("failed to load {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let crawl = &self.crawl_settings;
        if crawl.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawl_settings.user_agent is empty"));
        }
        if crawl.timeout == 0 {
            return Err(AppError::validation("crawl_settings.timeout must be > 0"));
        }
        let (min, max) = crawl.delay_range;
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
            return Err(AppError::validation(format!(
                "crawl_settings.delay_range must satisfy 0 <= min <= max, got ({min}, {max})"
            )));
        }

        let threshold = self.quality_settings.quality_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AppError::validation(format!(
                "quality_settings.quality_threshold must be within [0, 1], got {threshold}"
            )));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(AppError::validation("output_dir is empty"));
        }
        if self.output_settings.max_summary_length == 0 {
            return Err(AppError::validation(
                "output_settings.max_summary_length must be > 0",
            ));
        }
        if self.format_settings.sentence_terminator.is_empty() {
            return Err(AppError::validation(
                "format_settings.sentence_terminator is empty",
            ));
        }
        if let Some(pos) = self
            .language_rules
            .iter()
            .position(|rule| rule.any_of.is_empty() && rule.all_of.is_empty())
        {
            return Err(AppError::validation(format!(
                "language_rules[{pos}] has neither any_of nor all_of tokens"
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawl_settings: CrawlSettings::default(),
            quality_settings: QualitySettings::default(),
            filter_keywords: defaults::filter_keywords(),
            output_dir: defaults::output_dir(),
            output_settings: OutputSettings::default(),
            search_topics: defaults::search_topics(),
            search_settings: SearchSettings::default(),
            format_settings: FormatSettings::default(),
            language_rules: defaults::language_rules(),
        }
    }
}

/// HTTP client and pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSettings {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout: u64,

    /// Pause between topics in seconds, drawn uniformly from `[min, max]`
    #[serde(default = "defaults::delay_range")]
    pub delay_range: (f64, f64),
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout: defaults::timeout(),
            delay_range: defaults::delay_range(),
        }
    }
}

/// Extraction and acceptance thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualitySettings {
    /// Minimum trimmed length (in characters) of a code block worth keeping
    #[serde(default = "defaults::min_code_lines")]
    pub min_code_lines: usize,

    /// Minimum body length (in characters) for the length bonus
    #[serde(default = "defaults::min_content_length")]
    pub min_content_length: usize,

    /// Pages scoring below this are rejected
    #[serde(default = "defaults::quality_threshold")]
    pub quality_threshold: f64,
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self {
            min_code_lines: defaults::min_code_lines(),
            min_content_length: defaults::min_content_length(),
            quality_threshold: defaults::quality_threshold(),
        }
    }
}

/// Document and index output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Regenerate the reserved index file after a run
    #[serde(default = "defaults::auto_update_index")]
    pub auto_update_index: bool,

    /// Auto mode stops once this many documents were written
    #[serde(default = "defaults::max_documents_per_run")]
    pub max_documents_per_run: usize,

    /// Summary length budget in characters
    #[serde(default = "defaults::max_summary_length")]
    pub max_summary_length: usize,

    /// Section labels used when rendering documents
    #[serde(default)]
    pub labels: DocumentLabels,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            auto_update_index: defaults::auto_update_index(),
            max_documents_per_run: defaults::max_documents_per_run(),
            max_summary_length: defaults::max_summary_length(),
            labels: DocumentLabels::default(),
        }
    }
}

/// Section labels for rendered documents.
///
/// `example` supports the `{n}` placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLabels {
    #[serde(default = "defaults::label_source")]
    pub source: String,
    #[serde(default = "defaults::label_updated")]
    pub updated: String,
    #[serde(default = "defaults::label_overview")]
    pub overview: String,
    #[serde(default = "defaults::label_code_examples")]
    pub code_examples: String,
    #[serde(default = "defaults::label_example")]
    pub example: String,
    #[serde(default = "defaults::label_details")]
    pub details: String,
    #[serde(default = "defaults::label_index_title")]
    pub index_title: String,
}

impl Default for DocumentLabels {
    fn default() -> Self {
        Self {
            source: defaults::label_source(),
            updated: defaults::label_updated(),
            overview: defaults::label_overview(),
            code_examples: defaults::label_code_examples(),
            example: defaults::label_example(),
            details: defaults::label_details(),
            index_title: defaults::label_index_title(),
        }
    }
}

/// Search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Search engine endpoint; the query is passed as `q`
    #[serde(default = "defaults::engine_url")]
    pub engine_url: String,

    /// Sites each topic query is restricted to
    #[serde(default = "defaults::sites")]
    pub sites: Vec<String>,

    /// Feed search candidates into the crawl pipeline
    #[serde(default)]
    pub follow_results: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            engine_url: defaults::engine_url(),
            sites: defaults::sites(),
            follow_results: false,
        }
    }
}

/// Summary and body formatting rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatSettings {
    /// Terminator used to split body text into sentences
    #[serde(default = "defaults::sentence_terminator")]
    pub sentence_terminator: String,

    /// A body line containing any of these becomes a subsection heading
    #[serde(default = "defaults::heading_markers")]
    pub heading_markers: Vec<String>,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            sentence_terminator: defaults::sentence_terminator(),
            heading_markers: defaults::heading_markers(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use super::{Language, LanguageRule};

    // Crawl defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; KnowledgeBot/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn delay_range() -> (f64, f64) {
        (1.0, 3.0)
    }

    // Quality defaults
    pub fn min_code_lines() -> usize {
        5
    }
    pub fn min_content_length() -> usize {
        200
    }
    pub fn quality_threshold() -> f64 {
        0.6
    }
    pub fn filter_keywords() -> Vec<String> {
        vec![
            "HarmonyOS".into(),
            "ArkTS".into(),
            "ArkUI".into(),
            "鸿蒙".into(),
        ]
    }

    // Output defaults
    pub fn output_dir() -> PathBuf {
        PathBuf::from("knowledge")
    }
    pub fn auto_update_index() -> bool {
        true
    }
    pub fn max_documents_per_run() -> usize {
        10
    }
    pub fn max_summary_length() -> usize {
        200
    }

    // Label defaults
    pub fn label_source() -> String {
        "Source".into()
    }
    pub fn label_updated() -> String {
        "Updated".into()
    }
    pub fn label_overview() -> String {
        "Overview".into()
    }
    pub fn label_code_examples() -> String {
        "Code Examples".into()
    }
    pub fn label_example() -> String {
        "Example {n}".into()
    }
    pub fn label_details() -> String {
        "Details".into()
    }
    pub fn label_index_title() -> String {
        "Knowledge Index".into()
    }

    // Search defaults
    pub fn search_topics() -> Vec<String> {
        vec![
            "ArkTS 状态管理".into(),
            "ArkUI 组件".into(),
            "HarmonyOS 网络请求".into(),
        ]
    }
    pub fn engine_url() -> String {
        "https://cn.bing.com/search".into()
    }
    pub fn sites() -> Vec<String> {
        vec![
            "developer.harmonyos.com".into(),
            "gitee.com/harmonyos_samples".into(),
            "51cto.com".into(),
        ]
    }

    // Format defaults
    pub fn sentence_terminator() -> String {
        "。".into()
    }
    pub fn heading_markers() -> Vec<String> {
        ["一、", "二、", "三、", "1.", "2.", "3."]
            .into_iter()
            .map(String::from)
            .collect()
    }

    // Framework annotations outrank import syntax, which outranks bare keywords.
    pub fn language_rules() -> Vec<LanguageRule> {
        vec![
            LanguageRule::any_of(["@Component", "@Entry"], Language::Typescript),
            LanguageRule::all_of(["import", "from"], Language::Typescript),
            LanguageRule::any_of(["function", "const"], Language::Javascript),
        ]
    }
}
