use serde::Deserialize;

/// Main configuration structure for chartrake
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub dates: DateConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub seed: Vec<SeedEntry>,
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldSpec>,
}

/// Crawler behavior and budget configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Hard ceiling on fetch attempts for the whole run
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Maximum link-following depth from the seed URLs
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Politeness delay between consecutive fetches (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Fetch attempts per URL before giving up on it
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Linear backoff base between retries (milliseconds)
    #[serde(rename = "backoff-base-ms")]
    pub backoff_base_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    #[serde(rename = "contact-url")]
    pub contact_url: String,

    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Accepted year range for date resolution and output filtering
#[derive(Debug, Clone, Deserialize)]
pub struct DateConfig {
    #[serde(rename = "min-year")]
    pub min_year: i32,

    #[serde(rename = "max-year")]
    pub max_year: i32,
}

/// Table extraction policy
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// Strip non-digit characters from observed cell values
    #[serde(default = "default_numeric_only", rename = "numeric-only")]
    pub numeric_only: bool,

    /// Cell tokens that count as "no result" (compared case-insensitively;
    /// the empty cell always counts)
    #[serde(default = "default_placeholders")]
    pub placeholders: Vec<String>,
}

fn default_numeric_only() -> bool {
    true
}

fn default_placeholders() -> Vec<String> {
    vec!["xx".to_string(), "--".to_string(), "null".to_string()]
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            numeric_only: default_numeric_only(),
            placeholders: default_placeholders(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the canonical CSV dataset written at the end of a run
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

/// A seed URL to start crawling from (depth 0)
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    pub url: String,
}

/// One target field with its known header-text aliases
///
/// Alias matching is substring-based and case-insensitive, so a single alias
/// like "desaw" covers "Desawer", "DESAWAR" and friends. The alias list is
/// configuration data on purpose: sites disagree on spellings and the set
/// changes without notice.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    /// Canonical field identifier (also the CSV column name)
    pub name: String,

    /// Known header-text aliases for this field
    pub aliases: Vec<String>,
}
