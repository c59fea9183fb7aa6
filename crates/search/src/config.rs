//! Search configuration via TOML
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock behavior: top 5 results, 1e-6 relevance tie threshold.

use serde::{Deserialize, Serialize};
use sift_core::{Error, Result};
use std::path::Path;

/// Default number of results returned by ranking
pub const DEFAULT_MAX_RESULTS: usize = 5;
/// Default relevance difference under which two hits are tied
pub const DEFAULT_RELEVANCE_EPSILON: f64 = 1e-6;
/// Default number of accumulator shards for parallel ranking
pub const DEFAULT_SHARD_COUNT: usize = 4;
/// Default request-queue window (one day of minutes)
pub const DEFAULT_REQUEST_WINDOW: usize = 1440;

/// Search engine configuration
///
/// # Example
///
/// ```toml
/// max_results = 5
/// relevance_epsilon = 1e-6
/// shard_count = 4
/// case_sensitive = true
/// request_window = 1440
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Top-K truncation limit
    pub max_results: usize,
    /// Hits whose relevance differs by less than this are ordered by rating
    pub relevance_epsilon: f64,
    /// Shard count of the parallel relevance accumulator
    pub shard_count: usize,
    /// When false, documents, queries and stop words are lower-cased
    pub case_sensitive: bool,
    /// Number of trailing requests tracked by `RequestQueue`
    pub request_window: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_results: DEFAULT_MAX_RESULTS,
            relevance_epsilon: DEFAULT_RELEVANCE_EPSILON,
            shard_count: DEFAULT_SHARD_COUNT,
            case_sensitive: true,
            request_window: DEFAULT_REQUEST_WINDOW,
        }
    }
}

impl SearchConfig {
    /// Builder: set the top-K limit
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Builder: set the relevance tie threshold
    pub fn with_relevance_epsilon(mut self, epsilon: f64) -> Self {
        self.relevance_epsilon = epsilon;
        self
    }

    /// Builder: set the accumulator shard count
    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count;
        self
    }

    /// Builder: set the case policy
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Builder: set the request-queue window
    pub fn with_request_window(mut self, request_window: usize) -> Self {
        self.request_window = request_window;
        self
    }

    /// Reject values the engine cannot work with
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a zero limit, shard count or window, or for a
    /// negative or non-finite epsilon.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(Error::invalid_argument("max_results must be at least 1"));
        }
        if self.shard_count == 0 {
            return Err(Error::invalid_argument("shard_count must be at least 1"));
        }
        if self.request_window == 0 {
            return Err(Error::invalid_argument("request_window must be at least 1"));
        }
        if !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0 {
            return Err(Error::invalid_argument(format!(
                "relevance_epsilon must be finite and non-negative, got {}",
                self.relevance_epsilon
            )));
        }
        Ok(())
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SearchConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse search config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize search config: {}", e)))
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# sift search configuration
#
# Number of results returned by ranking (top-K)
max_results = 5

# Hits whose relevance differs by less than this are ordered by rating
relevance_epsilon = 1e-6

# Shards of the relevance accumulator used by parallel ranking
shard_count = 4

# When false, documents, queries and stop words are lower-cased
case_sensitive = true

# Requests tracked by the request queue's no-result counter
request_window = 1440
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.max_results, 5);
        assert_eq!(config.relevance_epsilon, 1e-6);
        assert_eq!(config.shard_count, 4);
        assert!(config.case_sensitive);
        assert_eq!(config.request_window, 1440);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_toml_matches_default() {
        let parsed = SearchConfig::from_toml_str(SearchConfig::default_toml()).unwrap();
        assert_eq!(parsed, SearchConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            SearchConfig::from_toml_str("").unwrap(),
            SearchConfig::default()
        );
    }

    #[test]
    fn test_partial_toml() {
        let config = SearchConfig::from_toml_str("max_results = 10\ncase_sensitive = false").unwrap();
        assert_eq!(config.max_results, 10);
        assert!(!config.case_sensitive);
        assert_eq!(config.shard_count, DEFAULT_SHARD_COUNT);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SearchConfig::from_toml_str("max_result = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SearchConfig::from_toml_str("max_results = 0")
            .unwrap_err()
            .is_invalid_argument());
        assert!(SearchConfig::default().with_shard_count(0).validate().is_err());
        assert!(SearchConfig::default().with_request_window(0).validate().is_err());
        assert!(SearchConfig::default()
            .with_relevance_epsilon(-1.0)
            .validate()
            .is_err());
        assert!(SearchConfig::default()
            .with_relevance_epsilon(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sift.toml");
        let config = SearchConfig::default()
            .with_max_results(3)
            .with_case_sensitive(false);
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        assert_eq!(SearchConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SearchConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
